//! Document model with Rope-based text storage

use ropey::Rope;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::analyze;
use crate::error::{Error, Result};
use crate::toc::{self, TocEntry};

/// A loaded markdown document and its table of contents
#[derive(Clone, Debug)]
pub struct Document {
    pub path: Option<PathBuf>,
    pub rope: Rope,
    pub toc: Vec<TocEntry>,
}

/// Whole-document statistics
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    pub total_lines: usize,
    pub total_headings: usize,
    /// Heading count per level, always keyed 1 through 6
    pub heading_levels: BTreeMap<u8, usize>,
    pub total_diagrams: usize,
    pub total_code_blocks: usize,
    pub file_size_bytes: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

impl Document {
    /// Load a document from a file path
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let mut doc = Self::from_text(&content);
        doc.path = Some(path.to_path_buf());
        log::debug!(
            "loaded {} ({} lines, {} headings)",
            path.display(),
            doc.line_count(),
            doc.toc.len()
        );

        Ok(doc)
    }

    /// Build a document from in-memory text
    pub fn from_text(text: &str) -> Self {
        let rope = Rope::from_str(text);
        let mut doc = Self {
            path: None,
            rope,
            toc: Vec::new(),
        };
        doc.toc = toc::extract_toc(doc.lines());
        doc
    }

    /// Number of lines, counting a final unterminated line but not the
    /// empty line the rope reports after a trailing newline
    pub fn line_count(&self) -> usize {
        let len_chars = self.rope.len_chars();
        if len_chars == 0 {
            return 0;
        }

        let len_lines = self.rope.len_lines();
        if self.rope.char(len_chars - 1) == '\n' {
            len_lines - 1
        } else {
            len_lines
        }
    }

    /// Text of a 0-indexed line, including its terminator
    pub fn line(&self, line_idx: usize) -> String {
        self.rope.line(line_idx).chunks().collect()
    }

    /// Iterate over all lines, terminators included
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.line_count()).map(move |idx| self.line(idx))
    }

    /// Full document text
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Lines `start..=end` (1-indexed), terminators preserved.
    ///
    /// Out-of-range bounds are clamped; `end < start` gives an empty string.
    pub fn get_section_by_line_range(&self, start: usize, end: usize) -> String {
        let start_idx = start.saturating_sub(1);
        let end_idx = end.min(self.line_count());

        if start_idx >= end_idx {
            return String::new();
        }

        let char_start = self.rope.line_to_char(start_idx);
        let char_end = self.rope.line_to_char(end_idx);
        self.rope.slice(char_start..char_end).to_string()
    }

    /// Content of the section owned by a TOC entry, heading line included
    pub fn get_section_content(&self, entry: &TocEntry) -> String {
        self.get_section_by_line_range(entry.line_start, entry.line_end)
    }

    pub fn stats(&self) -> DocumentStats {
        let mut heading_levels: BTreeMap<u8, usize> = (1..=6).map(|level| (level, 0)).collect();
        for entry in &self.toc {
            *heading_levels.entry(entry.level).or_default() += 1;
        }

        let text = self.text();

        DocumentStats {
            total_lines: self.line_count(),
            total_headings: self.toc.len(),
            heading_levels,
            total_diagrams: analyze::find_diagrams(&text).len(),
            total_code_blocks: analyze::find_code_blocks(&text, None).len(),
            file_size_bytes: self.rope.len_bytes(),
            file_path: self.path.as_ref().map(|p| p.display().to_string()),
        }
    }
}

impl std::str::FromStr for Document {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"")?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.line_count(), 0);
        assert!(doc.toc.is_empty());
        assert_eq!(doc.path.as_deref(), Some(file.path()));

        Ok(())
    }

    #[test]
    fn test_load_simple_file() -> anyhow::Result<()> {
        let mut file = NamedTempFile::new()?;
        file.write_all(b"# Heading\n\nSome text\n")?;

        let doc = Document::load(file.path())?;
        assert_eq!(doc.line_count(), 3);
        assert_eq!(doc.toc.len(), 1);
        assert_eq!(doc.toc[0].level, 1);
        assert_eq!(doc.toc[0].title, "Heading");
        assert_eq!(doc.toc[0].line_end, 3);

        Ok(())
    }

    #[test]
    fn test_load_missing_file() {
        let result = Document::load(Path::new("/nonexistent/deepwiki.md"));
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_line_count_without_trailing_newline() {
        assert_eq!(Document::from_text("a\nb").line_count(), 2);
        assert_eq!(Document::from_text("a\nb\n").line_count(), 2);
        assert_eq!(Document::from_text("\n").line_count(), 1);
    }

    #[test]
    fn test_only_newlines_break_lines() {
        let doc = Document::from_text("# A\nform\x0cfeed and\u{2028}sep\u{85}nel\n# B\nbody\n");

        assert_eq!(doc.line_count(), 4);
        assert_eq!(doc.toc.len(), 2);
        assert_eq!((doc.toc[0].line_start, doc.toc[0].line_end), (1, 2));
        assert_eq!((doc.toc[1].line_start, doc.toc[1].line_end), (3, 4));
        assert_eq!(
            doc.get_section_by_line_range(2, 2),
            "form\x0cfeed and\u{2028}sep\u{85}nel\n"
        );
        assert_eq!(doc.stats().total_lines, 4);
    }

    #[test]
    fn test_line_range_inclusive() {
        let doc = Document::from_text("Line 1\nLine 2\nLine 3\n");
        assert_eq!(doc.get_section_by_line_range(1, 1), "Line 1\n");
        assert_eq!(doc.get_section_by_line_range(2, 3), "Line 2\nLine 3\n");
    }

    #[test]
    fn test_line_range_out_of_bounds_clamps() {
        let doc = Document::from_text("Line 1\nLine 2\n");
        assert_eq!(doc.get_section_by_line_range(0, 100), "Line 1\nLine 2\n");
        assert_eq!(doc.get_section_by_line_range(5, 9), "");
    }

    #[test]
    fn test_line_range_reversed_is_empty() {
        let doc = Document::from_text("1\n2\n3\n4\n5\n6\n");
        assert_eq!(doc.get_section_by_line_range(5, 3), "");
    }

    #[test]
    fn test_sections_reconstruct_document() {
        let text = "# A\ntext1\n## B\ntext2\n```mermaid\ngraph TD\n```\n## C\ntext3\n";
        let doc = Document::from_text(text);

        let rebuilt: String = doc
            .toc
            .iter()
            .map(|entry| doc.get_section_content(entry))
            .collect();
        assert_eq!(rebuilt, text);
    }

    #[test]
    fn test_stats() {
        let text = "# A\n## B\n```mermaid\ngraph TD\n```\n```json\n{}\n```\n## C\n";
        let stats = Document::from_text(text).stats();

        assert_eq!(stats.total_lines, 9);
        assert_eq!(stats.total_headings, 3);
        assert_eq!(stats.heading_levels[&1], 1);
        assert_eq!(stats.heading_levels[&2], 2);
        assert_eq!(stats.heading_levels[&6], 0);
        assert_eq!(stats.heading_levels.len(), 6);
        assert_eq!(stats.total_diagrams, 1);
        assert_eq!(stats.total_code_blocks, 2);
        assert_eq!(stats.file_size_bytes, text.len());
        assert!(stats.file_path.is_none());
    }
}
