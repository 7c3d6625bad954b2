//! Input and intermediate types for one extraction pass.

/// What kind of page the fetch collaborator handed us.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageType {
    Search,
    Detail,
}

/// Optional context the caller already knows about the page, used to build
/// search URLs and to bias logging. Never trusted as extracted data.
#[derive(Debug, Clone, Default)]
pub struct SourceHints {
    pub model: Option<String>,
    pub trim: Option<String>,
}

/// A fully fetched, fully rendered HTML page. The core never fetches;
/// whoever produced this owns rate limiting, proxies, and encoding (the
/// string is assumed to already be UTF-8 text).
#[derive(Debug, Clone)]
pub struct RawPage {
    pub html: String,
    pub page_type: PageType,
    pub hints: SourceHints,
}

impl RawPage {
    #[must_use]
    pub fn detail(html: impl Into<String>) -> Self {
        RawPage {
            html: html.into(),
            page_type: PageType::Detail,
            hints: SourceHints::default(),
        }
    }
}

/// Which part of the page a candidate value was found in. Ordering here is
/// meaningful: earlier regions are more authoritative for most fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceRegion {
    /// A labeled definition-list / essentials row.
    Structured,
    /// The listing's primary title or heading.
    Title,
    /// Description text with comment subtrees removed.
    Body,
    /// Comment/discussion text. Never authoritative; kept only so logs can
    /// say where a rejected candidate came from.
    Comments,
}

/// A provisionally matched numeric value, carried with enough surrounding
/// context to support tie-breaking and diagnostics. Created and discarded
/// within a single field-extractor invocation.
#[derive(Debug, Clone)]
pub struct ExtractionCandidate {
    pub value: u64,
    pub region: SourceRegion,
    /// The exact text the pattern matched, e.g. `"8k-Mile"`.
    pub raw_match: String,
    /// Byte offset of the match within its region's text.
    pub position: usize,
    /// ± window of surrounding text, for logs and proximity scoring.
    pub context: String,
}
