//! Capability discovery over a document's TOC
//!
//! A capability is a reasonably large, shallow section whose title names an
//! NLP feature ("Evidence Detection", "Service: Pro/Con", ...).

use serde::Serialize;
use std::collections::BTreeSet;

use crate::analyze::{self, DiagramKind};
use crate::config::ScannerConfig;
use crate::doc::{Document, DocumentStats};
use crate::toc::TocEntry;

const TITLE_PATTERNS: [&str; 2] = ["feature:", "service:"];
const STOP_WORDS: [&str; 10] = ["the", "a", "an", "and", "or", "for", "to", "of", "in", "on"];
const CONTENT_PREFIX_CHARS: usize = 1000;

/// Broad category of a capability, by title/content wording
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CapabilityKind {
    TextAnalysis,
    Classification,
    Extraction,
    Matching,
    Scoring,
    Generation,
    Detection,
    Unknown,
}

/// Checked in order; the first family with a hit wins
const KIND_PATTERNS: [(CapabilityKind, &[&str]); 7] = [
    (CapabilityKind::TextAnalysis, &["analysis", "analyze", "detect", "identify"]),
    (CapabilityKind::Classification, &["classif", "categor"]),
    (CapabilityKind::Extraction, &["extract", "find", "locate"]),
    (CapabilityKind::Matching, &["match", "align", "similar"]),
    (CapabilityKind::Scoring, &["score", "quality", "assess"]),
    (CapabilityKind::Generation, &["generat", "creat", "produce"]),
    (CapabilityKind::Detection, &["detect", "identif"]),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Capability {
    pub name: String,
    pub line_start: usize,
    pub line_end: usize,
    pub section_size_lines: usize,
    pub heading_level: u8,
    pub has_diagrams: bool,
    pub diagram_count: usize,
    pub diagram_types: Vec<DiagramKind>,
    pub has_code_examples: bool,
    pub code_example_count: usize,
    pub code_languages: BTreeSet<String>,
    pub keywords: Vec<String>,
    pub capability_type: CapabilityKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityReport {
    pub capabilities: Vec<Capability>,
    pub total_capabilities: usize,
    pub document_stats: DocumentStats,
}

pub struct CapabilityScanner<'a> {
    config: &'a ScannerConfig,
}

impl<'a> CapabilityScanner<'a> {
    pub fn new(config: &'a ScannerConfig) -> Self {
        Self { config }
    }

    pub fn scan(&self, doc: &Document) -> CapabilityReport {
        let capabilities: Vec<Capability> = doc
            .toc
            .iter()
            .filter(|entry| self.is_capability(entry))
            .map(|entry| analyze_capability(doc, entry))
            .collect();

        log::debug!(
            "found {} capabilities among {} sections",
            capabilities.len(),
            doc.toc.len()
        );

        CapabilityReport {
            total_capabilities: capabilities.len(),
            capabilities,
            document_stats: doc.stats(),
        }
    }

    fn is_capability(&self, entry: &TocEntry) -> bool {
        if entry.level > self.config.max_heading_level {
            return false;
        }
        if entry.size_lines() < self.config.min_section_lines {
            return false;
        }

        let title = entry.title.to_lowercase();
        self.config.keywords.iter().any(|k| title.contains(&k.to_lowercase()))
            || TITLE_PATTERNS.iter().any(|p| title.contains(p))
    }
}

fn analyze_capability(doc: &Document, entry: &TocEntry) -> Capability {
    let content = doc.get_section_content(entry);
    let diagrams = analyze::find_diagrams(&content);
    let code_blocks = analyze::find_code_blocks(&content, None);

    Capability {
        name: entry.title.clone(),
        line_start: entry.line_start,
        line_end: entry.line_end,
        section_size_lines: entry.size_lines(),
        heading_level: entry.level,
        has_diagrams: !diagrams.is_empty(),
        diagram_count: diagrams.len(),
        diagram_types: diagrams.iter().map(|d| d.kind).collect(),
        has_code_examples: !code_blocks.is_empty(),
        code_example_count: code_blocks.len(),
        code_languages: code_blocks.into_iter().map(|b| b.language).collect(),
        keywords: title_keywords(&entry.title),
        capability_type: detect_kind(&entry.title, &content),
    }
}

/// Searchable words from a title: lowercase, longer than three characters, no stop words
pub fn title_keywords(title: &str) -> Vec<String> {
    title
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w))
        .map(String::from)
        .collect()
}

fn detect_kind(title: &str, content: &str) -> CapabilityKind {
    let title = title.to_lowercase();
    let prefix: String = content.chars().take(CONTENT_PREFIX_CHARS).collect();
    let prefix = prefix.to_lowercase();

    KIND_PATTERNS
        .iter()
        .find(|(_, patterns)| {
            patterns
                .iter()
                .any(|p| title.contains(p) || prefix.contains(p))
        })
        .map_or(CapabilityKind::Unknown, |(kind, _)| *kind)
}
