//! Core data structures for the codenest application.
//!
//! This module contains the tutorial record and the draft that the add form
//! fills in before it is submitted to the store.
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::TutorialId;

/// Format used for the pre-populated draft date, e.g. `Sep 21, 2025`
pub const DRAFT_DATE_FORMAT: &str = "%b %-d, %Y";

/// Represents a single tutorial in our system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    /// Unique identifier for the tutorial
    pub id: TutorialId,
    /// Tutorial title
    pub title: String,
    /// Tags for organization, distinct and in input order
    pub tags: Vec<String>,
    /// Display date, never parsed
    pub date: String,
    /// Short description shown in the list view
    pub summary: String,
    /// Tutorial body in a markdown-like format
    pub content: String,
    /// Link to a related project
    pub project_link: Option<String>,
    /// Set at creation only
    pub favorite: bool,
}

impl Tutorial {
    /// Builds a tutorial from a submitted draft
    pub(crate) fn from_draft(id: TutorialId, draft: TutorialDraft) -> Self {
        let project_link = draft
            .project_link
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty());

        let mut tags: Vec<String> = Vec::with_capacity(draft.tags.len());
        for tag in draft.tags {
            let tag = tag.trim();
            if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
                tags.push(tag.to_string());
            }
        }

        Tutorial {
            id,
            title: draft.title,
            tags,
            date: draft.date,
            summary: draft.summary,
            content: draft.content,
            project_link,
            favorite: false,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The add form's state before submission
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TutorialDraft {
    pub title: String,
    pub tags: Vec<String>,
    pub date: String,
    pub project_link: Option<String>,
    pub summary: String,
    pub content: String,
}

impl TutorialDraft {
    /// Creates an empty draft dated today
    pub fn new() -> Self {
        TutorialDraft {
            date: today(),
            ..Default::default()
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        TutorialDraft {
            title: title.into(),
            ..Self::new()
        }
    }

    /// Adds a tag unless it is blank or already present.
    /// Returns whether the tag list changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        let tag = tag.trim();
        if tag.is_empty() || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

/// Today's local date in the draft display format
pub fn today() -> String {
    Local::now().format(DRAFT_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_tags_are_deduplicated() {
        let mut draft = TutorialDraft::new();
        assert!(draft.add_tag("React"));
        assert!(draft.add_tag("  Hooks "));
        assert!(!draft.add_tag("React"));
        assert!(!draft.add_tag("   "));
        assert_eq!(draft.tags, vec!["React", "Hooks"]);
    }

    #[test]
    fn test_draft_remove_tag() {
        let mut draft = TutorialDraft::new();
        draft.add_tag("Rust");
        draft.add_tag("CLI");
        assert!(draft.remove_tag("Rust"));
        assert!(!draft.remove_tag("Rust"));
        assert_eq!(draft.tags, vec!["CLI"]);
    }

    #[test]
    fn test_new_draft_is_dated() {
        let draft = TutorialDraft::new();
        assert!(!draft.date.is_empty());
        assert!(draft.title.is_empty());
        assert!(draft.tags.is_empty());
    }

    #[test]
    fn test_blank_project_link_is_dropped() {
        let mut draft = TutorialDraft::with_title("Test");
        draft.project_link = Some("   ".to_string());
        let tutorial = Tutorial::from_draft(1, draft);
        assert_eq!(tutorial.project_link, None);
        assert!(!tutorial.favorite);
    }
}
