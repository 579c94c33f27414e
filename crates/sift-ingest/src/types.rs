use serde::Deserialize;

/// One styled run of text. Font size and name drive heading classification.
#[derive(Debug, Clone, Deserialize)]
pub struct Span {
    pub text: String,
    #[serde(default)]
    pub font_size: f32,
    #[serde(default)]
    pub font_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Line {
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub lines: Vec<Line>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub blocks: Vec<Block>,
}

/// Per-document output of the layout extractor. Pages are in reading order
/// and 1-indexed by position.
#[derive(Debug, Clone, Deserialize)]
pub struct DocumentLayout {
    #[serde(default)]
    pub name: String,
    pub pages: Vec<Page>,
}

/// A contiguous run of body text attributed to the heading that preceded it.
///
/// `page` is the page the owning heading appeared on, not where the body text
/// ends. `text` is trimmed and never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub doc_name: String,
    pub page: u32,
    pub section_title: String,
    pub text: String,
}
