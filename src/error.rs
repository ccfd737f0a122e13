use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal errors for a whole `process` run. Per-link fetch problems are not
/// here; they are reported as values in the run report and never abort the
/// batch.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// The input path is missing, or the file is not a readable docx.
    #[error("document {path:?} is not readable: {detail}")]
    DocumentNotFound { path: PathBuf, detail: String },

    /// The document text contains no http(s) links. Raised before the output
    /// file is created, so nothing is written in this case.
    #[error("no links found in {0:?}")]
    NoLinksFound(PathBuf),

    /// Creating or writing the output file failed.
    #[error("output error: {0}")]
    Output(#[from] io::Error),
}
