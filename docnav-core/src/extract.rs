//! Section extraction: the query surface over a loaded document

use serde::Serialize;
use std::collections::BTreeSet;
use std::path::Path;

use crate::analyze::{self, CodeBlock, DiagramBlock, DiagramKind};
use crate::doc::{Document, DocumentStats};
use crate::error::Result;
use crate::locate;
use crate::toc::TocEntry;

/// Extraction response: a text span plus the fenced blocks found inside it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub heading_level: Option<u8>,
    pub line_start: usize,
    pub line_end: usize,
    pub line_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub has_diagrams: bool,
    pub diagrams: Vec<DiagramBlock>,
    pub has_code_blocks: bool,
    pub code_blocks: Vec<CodeBlock>,
    pub metadata: SectionMetadata,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_length: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionMetadata {
    pub diagram_count: usize,
    pub code_block_count: usize,
    pub diagram_types: BTreeSet<DiagramKind>,
    pub code_languages: BTreeSet<String>,
}

/// Metadata-only view of a TOC entry, used for listings
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    pub title: String,
    pub level: u8,
    pub line_start: usize,
    pub line_end: usize,
    pub size_lines: usize,
}

impl From<&TocEntry> for SectionSummary {
    fn from(entry: &TocEntry) -> Self {
        Self {
            title: entry.title.clone(),
            level: entry.level,
            line_start: entry.line_start,
            line_end: entry.line_end,
            size_lines: entry.size_lines(),
        }
    }
}

impl SectionResult {
    fn analyze(line_start: usize, line_end: usize, content: String) -> Self {
        let diagrams = analyze::find_diagrams(&content);
        let code_blocks = analyze::find_code_blocks(&content, None);

        let metadata = SectionMetadata {
            diagram_count: diagrams.len(),
            code_block_count: code_blocks.len(),
            diagram_types: diagrams.iter().map(|d| d.kind).collect(),
            code_languages: code_blocks.iter().map(|b| b.language.clone()).collect(),
        };

        Self {
            section_title: None,
            heading_level: None,
            line_start,
            line_end,
            line_count: if line_end < line_start {
                0
            } else {
                line_end - line_start + 1
            },
            content: Some(content),
            has_diagrams: !diagrams.is_empty(),
            diagrams,
            has_code_blocks: !code_blocks.is_empty(),
            code_blocks,
            metadata,
            content_length: None,
        }
    }

    /// Drop the content, keeping only its length in characters
    pub fn without_content(mut self) -> Self {
        if let Some(content) = self.content.take() {
            self.content_length = Some(content.chars().count());
        }
        self
    }
}

/// Section queries over a single document.
///
/// Each extractor owns its document exclusively; queries are read-only.
#[derive(Debug, Clone)]
pub struct SectionExtractor {
    doc: Document,
}

impl SectionExtractor {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    /// Load a document and build an extractor for it
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Document::load(path)?))
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn toc(&self) -> &[TocEntry] {
        &self.doc.toc
    }

    pub fn stats(&self) -> DocumentStats {
        self.doc.stats()
    }

    /// Extract lines `line_start..=line_end` (1-indexed)
    pub fn extract_by_lines(&self, line_start: usize, line_end: usize) -> SectionResult {
        let content = self.doc.get_section_by_line_range(line_start, line_end);
        SectionResult::analyze(line_start, line_end, content)
    }

    /// Extract the first section whose title matches `name`, or `None`
    pub fn extract_by_name(&self, name: &str, fuzzy: bool) -> Option<SectionResult> {
        let Some(entry) = locate::find_by_title(&self.doc.toc, name, fuzzy) else {
            log::debug!("no section matching {name:?} (fuzzy: {fuzzy})");
            return None;
        };

        let content = self.doc.get_section_content(entry);
        let mut result = SectionResult::analyze(entry.line_start, entry.line_end, content);
        result.section_title = Some(entry.title.clone());
        result.heading_level = Some(entry.level);
        Some(result)
    }

    /// Summaries of every section whose title contains `keyword`
    pub fn list_sections_matching(&self, keyword: &str) -> Vec<SectionSummary> {
        locate::filter_by_keywords(&self.doc.toc, &[keyword])
            .into_iter()
            .map(SectionSummary::from)
            .collect()
    }
}
