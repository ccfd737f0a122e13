use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use crate::config::PipelineConfig;
use crate::document;
use crate::error::ProcessError;
use crate::fetch::{FetchFailure, PageSource};
use crate::links;
use crate::writer::PageWriter;

/// One link the run could not turn into a page block.
#[derive(Debug)]
pub struct LinkFailure {
    pub url: String,
    pub error: FetchFailure,
}

/// Outcome of one `process` run.
#[derive(Debug)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub links_total: usize,
    pub pages_written: usize,
    pub page_breaks: usize,
    pub failures: Vec<LinkFailure>,
}

/// Sequential extract-fetch-paginate batch over one document. All state is
/// scoped to the run; construct, call `process`, drop.
pub struct Pipeline<S> {
    config: PipelineConfig,
    source: S,
}

impl<S: PageSource> Pipeline<S> {
    pub fn new(config: PipelineConfig, source: S) -> Self {
        Pipeline { config, source }
    }

    /// Extract links from `docx_path`, fetch each in order, and write the
    /// paginated text to `output_path` (truncating any previous content).
    ///
    /// Per-link failures are collected in the report and do not abort the
    /// run. `NoLinksFound` is raised before the output file is created.
    pub fn process(&self, docx_path: &Path, output_path: &Path) -> Result<RunReport, ProcessError> {
        let text = document::load_paragraph_text(docx_path)?;
        let urls = links::extract_links(&text);
        if urls.is_empty() {
            return Err(ProcessError::NoLinksFound(docx_path.to_path_buf()));
        }
        info!("extracted {} links from {:?}", urls.len(), docx_path);

        let out = File::create(output_path)?;
        let mut writer = PageWriter::new(
            BufWriter::new(out),
            self.config.words_per_page,
            &self.config.page_break_marker,
        );

        let pb = ProgressBar::new(urls.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40} {pos}/{len} ({per_sec})")
                .unwrap()
                .progress_chars("=> "),
        );

        let mut failures = Vec::new();
        for url in &urls {
            match self.source.fetch(url) {
                Ok(page) => {
                    debug!(
                        "fetched {} ({} words)",
                        page.url,
                        crate::text::word_count(&page.text)
                    );
                    writer.append(&page.text)?;
                }
                Err(e) => {
                    warn!("fetch failed for {}: {}", url, e);
                    failures.push(LinkFailure {
                        url: url.clone(),
                        error: e,
                    });
                }
            }
            pb.inc(1);
        }
        pb.finish_and_clear();

        let pages_written = writer.pages_written();
        let page_breaks = writer.page_breaks();
        writer.finish()?;

        info!(
            "wrote {} page blocks to {:?} ({} failed links)",
            pages_written,
            output_path,
            failures.len()
        );

        Ok(RunReport {
            output_path: output_path.to_path_buf(),
            links_total: urls.len(),
            pages_written,
            page_breaks,
            failures,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{Docx, Paragraph, Run};
    use reqwest::StatusCode;
    use std::collections::HashMap;
    use std::fs;
    use crate::fetch::FetchedPage;

    /// Canned pages keyed by URL; unknown URLs fail with a 404.
    struct StubSource {
        pages: HashMap<String, String>,
    }

    impl StubSource {
        fn new(pages: &[(&str, &str)]) -> Self {
            StubSource {
                pages: pages
                    .iter()
                    .map(|(u, t)| (u.to_string(), t.to_string()))
                    .collect(),
            }
        }
    }

    impl PageSource for StubSource {
        fn fetch(&self, url: &str) -> Result<FetchedPage, FetchFailure> {
            match self.pages.get(url) {
                Some(text) => Ok(FetchedPage {
                    url: url.to_string(),
                    text: text.clone(),
                }),
                None => Err(FetchFailure::Status(StatusCode::NOT_FOUND)),
            }
        }
    }

    fn write_docx(path: &Path, paragraphs: &[&str]) {
        let mut docx = Docx::new();
        for text in paragraphs {
            docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*text)));
        }
        let file = fs::File::create(path).unwrap();
        docx.build().pack(file).unwrap();
    }

    fn pipeline(pages: &[(&str, &str)]) -> Pipeline<StubSource> {
        Pipeline::new(PipelineConfig::default(), StubSource::new(pages))
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn no_links_fails_without_creating_output() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(&docx, &["plain paragraph", "no urls anywhere"]);

        let err = pipeline(&[]).process(&docx, &out).unwrap_err();
        assert!(matches!(err, ProcessError::NoLinksFound(_)));
        assert!(!out.exists());
    }

    #[test]
    fn pages_appear_in_first_seen_order_with_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(
            &docx,
            &[
                "first https://a.example then https://b.example",
                "and again https://a.example",
            ],
        );

        let report = pipeline(&[("https://a.example", "alpha"), ("https://b.example", "beta")])
            .process(&docx, &out)
            .unwrap();

        assert_eq!(report.links_total, 3);
        assert_eq!(report.pages_written, 3);
        assert!(report.failures.is_empty());
        assert_eq!(fs::read_to_string(&out).unwrap(), "alpha\n\nbeta\n\nalpha\n\n");
    }

    #[test]
    fn failed_link_is_skipped_without_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(&docx, &["https://dead.example then https://b.example"]);

        let report = pipeline(&[("https://b.example", "beta")])
            .process(&docx, &out)
            .unwrap();

        assert_eq!(report.links_total, 2);
        assert_eq!(report.pages_written, 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].url, "https://dead.example");
        assert_eq!(fs::read_to_string(&out).unwrap(), "beta\n\n");
    }

    #[test]
    fn page_breaks_follow_the_word_threshold() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(
            &docx,
            &["https://a.example https://b.example https://c.example https://d.example"],
        );

        let half = words(500);
        let report = pipeline(&[
            ("https://a.example", half.as_str()),
            ("https://b.example", half.as_str()),
            ("https://c.example", half.as_str()),
            ("https://d.example", half.as_str()),
        ])
        .process(&docx, &out)
        .unwrap();

        assert_eq!(report.pages_written, 4);
        assert_eq!(report.page_breaks, 2);
        let written = fs::read_to_string(&out).unwrap();
        assert_eq!(written.matches("следующая страница").count(), 2);
    }

    #[test]
    fn reruns_are_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(&docx, &["https://a.example and https://b.example"]);

        let p = pipeline(&[("https://a.example", "alpha"), ("https://b.example", "beta")]);
        p.process(&docx, &out).unwrap();
        let first = fs::read(&out).unwrap();
        p.process(&docx, &out).unwrap();
        let second = fs::read(&out).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_page_text_still_writes_a_blank_block() {
        let dir = tempfile::tempdir().unwrap();
        let docx = dir.path().join("input.docx");
        let out = dir.path().join("out.md");
        write_docx(&docx, &["https://empty.example https://b.example"]);

        let report = pipeline(&[("https://empty.example", ""), ("https://b.example", "beta")])
            .process(&docx, &out)
            .unwrap();

        assert_eq!(report.pages_written, 2);
        assert_eq!(fs::read_to_string(&out).unwrap(), "\n\nbeta\n\n");
    }

    #[test]
    fn missing_document_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let err = pipeline(&[])
            .process(Path::new("/no/such/input.docx"), &out)
            .unwrap_err();
        assert!(matches!(err, ProcessError::DocumentNotFound { .. }));
        assert!(!out.exists());
    }
}
