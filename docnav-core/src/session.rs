//! Agent session phases
//!
//! The pipeline runs in three phases, chosen by which artifacts exist in the
//! project directory. Phase selection is a pure function of [`Artifacts`];
//! only [`Artifacts::probe`] touches the filesystem.

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

pub const REQUIREMENT_CARDS: &str = "requirement_cards.json";
pub const FEATURE_LIST: &str = "feature_list.json";
pub const REVIEW_NOTES: &str = "review_notes.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    SpecDerivation,
    SpecReview,
    Implementation,
}

/// Which phase-gating artifacts are present
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Artifacts {
    pub requirement_cards: bool,
    pub feature_list: bool,
    pub review_notes: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub from: Phase,
    pub to: Phase,
}

impl Artifacts {
    pub fn probe(project_dir: &Path) -> Self {
        Self {
            requirement_cards: project_dir.join(REQUIREMENT_CARDS).exists(),
            feature_list: project_dir.join(FEATURE_LIST).exists(),
            review_notes: project_dir.join(REVIEW_NOTES).exists(),
        }
    }
}

impl Phase {
    pub fn determine(artifacts: &Artifacts) -> Self {
        if !artifacts.requirement_cards || !artifacts.feature_list {
            Phase::SpecDerivation
        } else if !artifacts.review_notes {
            Phase::SpecReview
        } else {
            Phase::Implementation
        }
    }

    /// A transition is only reported when the phase actually changed
    pub fn transition(previous: Option<Phase>, next: Phase) -> Option<Transition> {
        match previous {
            Some(from) if from != next => Some(Transition { from, to: next }),
            _ => None,
        }
    }

    /// Name of the prompt file (without extension) driving this phase
    pub fn prompt_name(&self) -> &'static str {
        match self {
            Phase::SpecDerivation => "spec_librarian_prompt",
            Phase::SpecReview => "spec_reviewer_prompt",
            Phase::Implementation => "coding_prompt",
        }
    }

    fn as_str(&self) -> &'static str {
        match self {
            Phase::SpecDerivation => "SPEC_DERIVATION",
            Phase::SpecReview => "SPEC_REVIEW",
            Phase::Implementation => "IMPLEMENTATION",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prompt templates stored as `<dir>/<name>.md`
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    dir: PathBuf,
}

impl PromptLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, phase: Phase) -> PathBuf {
        self.dir.join(format!("{}.md", phase.prompt_name()))
    }

    pub fn load(&self, phase: Phase) -> Result<String> {
        let path = self.path_for(phase);
        std::fs::read_to_string(&path).map_err(|source| Error::Prompt { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_project_derives_specs() {
        assert_eq!(Phase::determine(&Artifacts::default()), Phase::SpecDerivation);
    }

    #[test]
    fn test_cards_without_feature_list_still_derives() {
        let artifacts = Artifacts {
            requirement_cards: true,
            review_notes: true,
            ..Artifacts::default()
        };
        assert_eq!(Phase::determine(&artifacts), Phase::SpecDerivation);
    }

    #[test]
    fn test_unreviewed_specs_go_to_review() {
        let artifacts = Artifacts {
            requirement_cards: true,
            feature_list: true,
            review_notes: false,
        };
        assert_eq!(Phase::determine(&artifacts), Phase::SpecReview);
    }

    #[test]
    fn test_reviewed_specs_go_to_implementation() {
        let artifacts = Artifacts {
            requirement_cards: true,
            feature_list: true,
            review_notes: true,
        };
        assert_eq!(Phase::determine(&artifacts), Phase::Implementation);
    }

    #[test]
    fn test_transition_only_on_change() {
        assert_eq!(Phase::transition(None, Phase::SpecReview), None);
        assert_eq!(Phase::transition(Some(Phase::SpecReview), Phase::SpecReview), None);
        assert_eq!(
            Phase::transition(Some(Phase::SpecDerivation), Phase::SpecReview),
            Some(Transition {
                from: Phase::SpecDerivation,
                to: Phase::SpecReview
            })
        );
    }

    #[test]
    fn test_probe_reads_project_dir() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        assert_eq!(Artifacts::probe(dir.path()), Artifacts::default());

        std::fs::write(dir.path().join(REQUIREMENT_CARDS), "[]")?;
        std::fs::write(dir.path().join(FEATURE_LIST), "[]")?;
        let artifacts = Artifacts::probe(dir.path());
        assert_eq!(Phase::determine(&artifacts), Phase::SpecReview);

        Ok(())
    }

    #[test]
    fn test_prompt_library_loads_phase_prompt() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        std::fs::write(dir.path().join("coding_prompt.md"), "Implement the next feature.")?;

        let prompts = PromptLibrary::new(dir.path());
        assert_eq!(prompts.load(Phase::Implementation)?, "Implement the next feature.");
        assert!(matches!(
            prompts.load(Phase::SpecReview),
            Err(Error::Prompt { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(Phase::SpecDerivation.to_string(), "SPEC_DERIVATION");
        assert_eq!(Phase::Implementation.to_string(), "IMPLEMENTATION");
    }
}
