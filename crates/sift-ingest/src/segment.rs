use serde::Deserialize;

use crate::cancel::CancelToken;
use crate::error::IngestError;
use crate::types::{Block, Chunk, DocumentLayout, Span};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SegmenterConfig {
    /// Any first span larger than this is a heading, bold or not.
    pub heading_font_size: f32,
    /// Bold first spans larger than this are also headings.
    pub bold_font_size: f32,
    /// Title attributed to body text seen before the first heading.
    pub default_title: String,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            heading_font_size: 14.0,
            bold_font_size: 11.5,
            default_title: "Introduction".to_owned(),
        }
    }
}

/// Running section accumulator. A section closes when the next heading
/// arrives or the document ends; `flush_into` emits a chunk only when the
/// accumulated body is non-empty after trimming.
#[derive(Debug)]
struct SectionState {
    heading: String,
    body: String,
    owner_page: u32,
}

impl SectionState {
    fn new(default_title: &str) -> Self {
        Self {
            heading: default_title.to_owned(),
            body: String::new(),
            owner_page: 1,
        }
    }

    fn flush_into(&mut self, doc_name: &str, out: &mut Vec<Chunk>) {
        let text = self.body.trim();
        if !text.is_empty() {
            out.push(Chunk {
                doc_name: doc_name.to_owned(),
                page: self.owner_page,
                section_title: self.heading.clone(),
                text: text.to_owned(),
            });
        }
        self.body.clear();
    }

    fn start_section(&mut self, heading: String, page: u32) {
        self.heading = heading;
        self.body.clear();
        self.owner_page = page;
    }

    fn push_body(&mut self, block: &Block) {
        for line in &block.lines {
            for span in &line.spans {
                self.body.push_str(&span.text);
                self.body.push(' ');
            }
        }
        self.body.push('\n');
    }
}

/// Splits a document layout into titled chunks using font-size heuristics.
#[derive(Debug, Clone, Default)]
pub struct Segmenter {
    config: SegmenterConfig,
}

impl Segmenter {
    #[must_use]
    pub fn new(config: SegmenterConfig) -> Self {
        Self { config }
    }

    /// Segment one document into ordered chunks.
    ///
    /// A chunk's `page` is the page its heading appeared on; a document with
    /// no heading-classified block yields one chunk attributed to page 1 under
    /// the default title, wherever its text came from.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Cancelled`] when the token is cancelled between
    /// pages. No other failures: malformed blocks (no lines or no spans) are
    /// skipped.
    pub fn segment(
        &self,
        layout: &DocumentLayout,
        cancel: &CancelToken,
    ) -> Result<Vec<Chunk>, IngestError> {
        let mut chunks = Vec::new();
        let mut state = SectionState::new(&self.config.default_title);

        for (idx, page) in layout.pages.iter().enumerate() {
            if cancel.is_cancelled() {
                return Err(IngestError::Cancelled);
            }
            let page_no = u32::try_from(idx + 1).unwrap_or(u32::MAX);

            for block in &page.blocks {
                // Only the first span of the first line decides the whole
                // block; later spans never influence classification.
                let Some(first_span) = block.lines.first().and_then(|l| l.spans.first()) else {
                    continue;
                };

                if self.is_heading(first_span) {
                    state.flush_into(&layout.name, &mut chunks);
                    state.start_section(block_title(block), page_no);
                } else {
                    state.push_body(block);
                }
            }
        }

        state.flush_into(&layout.name, &mut chunks);
        tracing::debug!(doc = %layout.name, chunks = chunks.len(), "segmented document");
        Ok(chunks)
    }

    fn is_heading(&self, span: &Span) -> bool {
        let is_bold = span.font_name.to_lowercase().contains("bold");
        span.font_size > self.config.heading_font_size
            || (span.font_size > self.config.bold_font_size && is_bold)
    }
}

/// Heading text: every span across every line of the block, space-joined.
fn block_title(block: &Block) -> String {
    let joined = block
        .lines
        .iter()
        .flat_map(|l| &l.spans)
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    joined.trim().to_owned()
}
