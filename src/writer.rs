use std::io::{self, Write};

use crate::text;

const MARKER_INDENT: &str = "          ";

/// Paginated text sink. Each appended page block is followed by a blank line;
/// once the running word counter reaches the configured threshold a marker
/// line is written and the counter resets.
///
/// Pages are never split: the block that crosses the threshold is written
/// whole, so only the overflow page may exceed the threshold.
pub struct PageWriter<W: Write> {
    out: W,
    words_per_page: usize,
    marker: String,
    words_on_page: usize,
    pages_written: usize,
    page_breaks: usize,
}

impl<W: Write> PageWriter<W> {
    pub fn new(out: W, words_per_page: usize, marker: &str) -> Self {
        PageWriter {
            out,
            words_per_page,
            marker: marker.to_string(),
            words_on_page: 0,
            pages_written: 0,
            page_breaks: 0,
        }
    }

    /// Write one page block. Empty text still produces a blank block and
    /// contributes zero words.
    pub fn append(&mut self, page_text: &str) -> io::Result<()> {
        writeln!(self.out, "{}\n", page_text)?;
        self.pages_written += 1;
        self.words_on_page += text::word_count(page_text);

        if self.words_on_page >= self.words_per_page {
            writeln!(self.out, "{}{}\n", MARKER_INDENT, self.marker)?;
            self.page_breaks += 1;
            self.words_on_page = 0;
        }
        Ok(())
    }

    pub fn pages_written(&self) -> usize {
        self.pages_written
    }

    pub fn page_breaks(&self) -> usize {
        self.page_breaks
    }

    pub fn finish(mut self) -> io::Result<()> {
        self.out.flush()
    }
}
