//! Section lookup against an extracted TOC
//!
//! Lookups never fail: a miss is `None` (or an empty list), and ties are
//! always broken by document order.

use crate::toc::TocEntry;

/// Find the first entry whose title matches `title`.
///
/// With `fuzzy`, the match is a case-insensitive substring test of `title`
/// against each entry title. Without it, titles must be exactly equal.
pub fn find_by_title<'a>(toc: &'a [TocEntry], title: &str, fuzzy: bool) -> Option<&'a TocEntry> {
    if fuzzy {
        let needle = title.to_lowercase();
        toc.iter().find(|entry| entry.title.to_lowercase().contains(&needle))
    } else {
        toc.iter().find(|entry| entry.title == title)
    }
}

/// Entries whose title contains any of `keywords` (case-insensitive), in document order
pub fn filter_by_keywords<'a, S: AsRef<str>>(toc: &'a [TocEntry], keywords: &[S]) -> Vec<&'a TocEntry> {
    let keywords: Vec<String> = keywords.iter().map(|k| k.as_ref().to_lowercase()).collect();

    toc.iter()
        .filter(|entry| {
            let title = entry.title.to_lowercase();
            keywords.iter().any(|k| title.contains(k.as_str()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(level: u8, title: &str, line_start: usize, line_end: usize) -> TocEntry {
        TocEntry {
            level,
            title: title.to_string(),
            line_start,
            line_end,
        }
    }

    fn capabilities_toc() -> Vec<TocEntry> {
        vec![
            entry(2, "Key Point Analysis", 1, 10),
            entry(2, "Evidence Detection", 11, 20),
            entry(2, "Argument Quality", 21, 30),
        ]
    }

    #[test]
    fn test_fuzzy_match_is_case_insensitive_substring() {
        let toc = capabilities_toc();
        let found = find_by_title(&toc, "evidence", true).unwrap();
        assert_eq!(found.title, "Evidence Detection");
    }

    #[test]
    fn test_fuzzy_first_match_wins() {
        let toc = vec![
            entry(1, "Analysis Overview", 1, 4),
            entry(2, "Key Point Analysis", 5, 9),
        ];
        let found = find_by_title(&toc, "ANALYSIS", true).unwrap();
        assert_eq!(found.line_start, 1);
    }

    #[test]
    fn test_exact_match_is_case_sensitive() {
        let toc = capabilities_toc();
        assert!(find_by_title(&toc, "argument quality", false).is_none());
        assert!(find_by_title(&toc, "Argument", false).is_none());

        let found = find_by_title(&toc, "Argument Quality", false).unwrap();
        assert_eq!(found.line_start, 21);
    }

    #[test]
    fn test_missing_title_is_none() {
        let toc = capabilities_toc();
        assert!(find_by_title(&toc, "nonexistent section", true).is_none());
        assert!(find_by_title(&[], "anything", true).is_none());
    }

    #[test]
    fn test_filter_by_single_keyword() {
        let toc = capabilities_toc();
        let matches = filter_by_keywords(&toc, &["analysis"]);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].title, "Key Point Analysis");
        assert_eq!(matches[0].line_start, 1);
    }

    #[test]
    fn test_filter_keywords_use_or_semantics_in_document_order() {
        let toc = capabilities_toc();
        let matches = filter_by_keywords(&toc, &["QUALITY", "evidence"]);

        let titles: Vec<&str> = matches.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Evidence Detection", "Argument Quality"]);
    }

    #[test]
    fn test_filter_without_keywords_is_empty() {
        let toc = capabilities_toc();
        let none: [&str; 0] = [];
        assert!(filter_by_keywords(&toc, &none).is_empty());
    }
}
