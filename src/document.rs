use std::fs;
use std::path::Path;

use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};
use tracing::debug;

use crate::error::ProcessError;

/// Load a .docx file and return its paragraph texts joined with newlines.
/// A missing path and a file docx-rs cannot parse both come back as
/// `DocumentNotFound`; the detail says which.
pub fn load_paragraph_text(path: &Path) -> Result<String, ProcessError> {
    if !path.exists() {
        return Err(ProcessError::DocumentNotFound {
            path: path.to_path_buf(),
            detail: "no such file".to_string(),
        });
    }

    let bytes = fs::read(path).map_err(|e| ProcessError::DocumentNotFound {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;

    let docx = read_docx(&bytes).map_err(|e| ProcessError::DocumentNotFound {
        path: path.to_path_buf(),
        detail: format!("not a docx document: {:?}", e),
    })?;

    let mut paragraphs = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(para) = child {
            paragraphs.push(paragraph_text(para));
        }
    }
    debug!("loaded {} paragraphs from {:?}", paragraphs.len(), path);

    Ok(paragraphs.join("\n"))
}

// Runs within one paragraph are parts of the same sentence; concatenate with
// no separator.
fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut parts: Vec<&str> = Vec::new();
    for child in &para.children {
        if let ParagraphChild::Run(run) = child {
            for rc in &run.children {
                if let RunChild::Text(t) = rc {
                    parts.push(&t.text);
                }
            }
        }
    }
    parts.concat()
}
