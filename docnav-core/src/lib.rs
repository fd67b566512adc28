//! docnav core - Markdown section navigation
//!
//! This crate contains the document logic behind the `docnav` CLI:
//! - Document model with Rope-based text storage
//! - TOC extraction and section lookup
//! - Fenced diagram and code block analysis
//! - Section extraction results and capability scanning
//! - Configuration management
//! - Agent session phase selection (optional feature)

pub mod analyze;
pub mod config;
pub mod doc;
pub mod error;
pub mod extract;
pub mod locate;
pub mod range;
pub mod scan;
pub mod toc;

#[cfg(feature = "session")]
pub mod session;

// Re-export commonly used types
pub use config::Config;
pub use doc::{Document, DocumentStats};
pub use error::{Error, Result};
pub use extract::{SectionExtractor, SectionResult, SectionSummary};
pub use range::LineRange;
pub use scan::CapabilityScanner;
pub use toc::TocEntry;
