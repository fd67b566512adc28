//! Table of Contents extraction from Markdown

use serde::Serialize;

/// A heading occurrence and the span of lines it owns.
///
/// Line numbers are 1-indexed. `line_end` is the line just before the next
/// heading at any level, or the last line of the document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TocEntry {
    pub level: u8,
    pub title: String,
    pub line_start: usize,
    pub line_end: usize,
}

impl TocEntry {
    /// Section size as reported in listings (`line_end - line_start`)
    pub fn size_lines(&self) -> usize {
        self.line_end.saturating_sub(self.line_start)
    }
}

/// Extract ATX headings from a sequence of document lines
pub fn extract_toc<I, S>(lines: I) -> Vec<TocEntry>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut entries: Vec<TocEntry> = Vec::new();
    let mut total = 0;

    for (idx, line) in lines.into_iter().enumerate() {
        let line_num = idx + 1;
        total = line_num;

        let Some((level, title)) = parse_atx_heading(line.as_ref().trim_end()) else {
            continue;
        };

        // Close the previous entry
        if let Some(prev) = entries.last_mut() {
            prev.line_end = line_num - 1;
        }

        entries.push(TocEntry {
            level,
            title: title.to_string(),
            line_start: line_num,
            // Provisional until the next heading or end of document
            line_end: line_num,
        });
    }

    if let Some(last) = entries.last_mut() {
        last.line_end = total;
    }

    entries
}

/// Parse an ATX heading anchored at line start: `#{1,6}`, whitespace, text
fn parse_atx_heading(line: &str) -> Option<(u8, &str)> {
    if !line.starts_with('#') {
        return None;
    }

    let hash_count = line.chars().take_while(|&c| c == '#').count();
    if hash_count > 6 {
        return None;
    }

    // Must be followed by whitespace and then some text
    let rest = &line[hash_count..];
    if !rest.starts_with(|c: char| c.is_whitespace()) {
        return None;
    }

    let title = rest.trim();
    if title.is_empty() {
        return None;
    }

    Some((hash_count as u8, title))
}
