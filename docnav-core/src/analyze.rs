//! Fenced block detection: mermaid diagrams and generic code blocks
//!
//! Both scans split the given span on `\n` and report 1-indexed line numbers
//! relative to that span. A block is only emitted once its closing fence is
//! seen; an unterminated fence yields nothing.

use serde::Serialize;
use std::fmt;

const FENCE: &str = "```";
const DIAGRAM_FENCE: &str = "```mermaid";
const DEFAULT_LANGUAGE: &str = "text";

/// Mermaid diagram sub-type, detected from the first content line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiagramKind {
    Flowchart,
    Class,
    Sequence,
    State,
    Unknown,
}

impl DiagramKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiagramKind::Flowchart => "flowchart",
            DiagramKind::Class => "class",
            DiagramKind::Sequence => "sequence",
            DiagramKind::State => "state",
            DiagramKind::Unknown => "unknown",
        }
    }

    /// Classify a diagram by keyword search on its first line
    fn detect(first_line: Option<&str>) -> Self {
        let Some(line) = first_line else {
            return DiagramKind::Unknown;
        };
        let line = line.trim().to_lowercase();

        if line.contains("flowchart") || line.contains("graph") {
            DiagramKind::Flowchart
        } else if line.contains("classdiagram") {
            DiagramKind::Class
        } else if line.contains("sequencediagram") {
            DiagramKind::Sequence
        } else if line.contains("statediagram") {
            DiagramKind::State
        } else {
            DiagramKind::Unknown
        }
    }
}

impl fmt::Display for DiagramKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramBlock {
    pub line_start: usize,
    pub line_end: usize,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: DiagramKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    pub line_start: usize,
    pub line_end: usize,
    pub content: String,
    pub language: String,
}

/// State of an open fence while scanning
struct OpenFence {
    line_start: usize,
    lines: Vec<String>,
}

impl OpenFence {
    fn new(line_start: usize) -> Self {
        Self {
            line_start,
            lines: Vec::new(),
        }
    }
}

/// Find all mermaid diagrams in `text`
pub fn find_diagrams(text: &str) -> Vec<DiagramBlock> {
    let mut diagrams = Vec::new();
    let mut open: Option<OpenFence> = None;

    for (idx, line) in text.split('\n').enumerate() {
        let line_num = idx + 1;

        if line.to_lowercase().contains(DIAGRAM_FENCE) {
            // A new diagram fence restarts any capture in progress
            open = Some(OpenFence::new(line_num));
        } else if let Some(mut fence) = open.take() {
            if line.contains(FENCE) {
                diagrams.push(DiagramBlock {
                    line_start: fence.line_start,
                    line_end: line_num,
                    kind: DiagramKind::detect(fence.lines.first().map(String::as_str)),
                    content: fence.lines.join("\n"),
                });
            } else {
                fence.lines.push(line.trim_end().to_string());
                open = Some(fence);
            }
        }
    }

    diagrams
}

/// Find fenced code blocks in `text`, optionally keeping only one language.
///
/// Blocks of other languages are still scanned (so their fences pair up
/// correctly) but are not returned.
pub fn find_code_blocks(text: &str, language: Option<&str>) -> Vec<CodeBlock> {
    let mut blocks = Vec::new();
    let mut open: Option<(OpenFence, String)> = None;

    for (idx, line) in text.split('\n').enumerate() {
        let line_num = idx + 1;

        match open.take() {
            None => {
                if let Some(lang) = parse_fence_open(line) {
                    open = Some((OpenFence::new(line_num), lang));
                }
            }
            Some((fence, lang)) if line.contains(FENCE) => {
                if language.map_or(true, |wanted| wanted == lang) {
                    blocks.push(CodeBlock {
                        line_start: fence.line_start,
                        line_end: line_num,
                        content: fence.lines.join("\n"),
                        language: lang,
                    });
                }
            }
            Some((mut fence, lang)) => {
                fence.lines.push(line.trim_end().to_string());
                open = Some((fence, lang));
            }
        }
    }

    blocks
}

/// Opening fence at line start; returns the info-string language or the default
fn parse_fence_open(line: &str) -> Option<String> {
    let rest = line.strip_prefix(FENCE)?;
    let lang: String = rest
        .chars()
        .take_while(|&c| c.is_alphanumeric() || c == '_')
        .collect();

    if lang.is_empty() {
        Some(DEFAULT_LANGUAGE.to_string())
    } else {
        Some(lang)
    }
}
