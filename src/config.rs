use config::Config;
use tracing::debug;

pub const DEFAULT_WORDS_PER_PAGE: usize = 1000;
pub const DEFAULT_PAGE_BREAK_MARKER: &str = "следующая страница";

/// Per-run settings. Built explicitly and handed to the pipeline; nothing is
/// read from process-global state after construction.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Words accumulated before a page-break marker is written.
    pub words_per_page: usize,
    /// Marker text written (ten-space indented) at each page break.
    pub page_break_marker: String,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            words_per_page: DEFAULT_WORDS_PER_PAGE,
            page_break_marker: DEFAULT_PAGE_BREAK_MARKER.to_string(),
        }
    }
}

impl PipelineConfig {
    /// Defaults, overridden by DOC2MD_WORDS_PER_PAGE / DOC2MD_PAGE_BREAK_MARKER.
    pub fn from_env() -> Self {
        let settings = Config::builder()
            .add_source(config::Environment::with_prefix("DOC2MD"))
            .build()
            .unwrap_or_default();

        let mut cfg = PipelineConfig::default();
        if let Ok(n) = settings.get_int("words_per_page") {
            if n > 0 {
                cfg.words_per_page = n as usize;
            }
        }
        if let Ok(marker) = settings.get_string("page_break_marker") {
            if !marker.trim().is_empty() {
                cfg.page_break_marker = marker;
            }
        }
        debug!(?cfg, "pipeline config resolved");
        cfg
    }
}
