//! Search and tag filtering over a tutorial collection.
//!
//! Everything here is a pure function of its inputs; results keep the
//! collection order.
use crate::Tutorial;

/// Case-insensitive substring match against title or summary.
/// An empty term matches everything.
pub fn matches_search(tutorial: &Tutorial, search_term: &str) -> bool {
    if search_term.is_empty() {
        return true;
    }
    let needle = search_term.to_lowercase();
    tutorial.title.to_lowercase().contains(&needle)
        || tutorial.summary.to_lowercase().contains(&needle)
}

/// True when the tutorial carries every selected tag
pub fn matches_tags(tutorial: &Tutorial, selected_tags: &[String]) -> bool {
    selected_tags.iter().all(|tag| tutorial.has_tag(tag))
}

pub fn filter_tutorials<'a>(
    tutorials: &'a [Tutorial],
    search_term: &str,
    selected_tags: &[String],
) -> Vec<&'a Tutorial> {
    tutorials
        .iter()
        .filter(|t| matches_search(t, search_term) && matches_tags(t, selected_tags))
        .collect()
}

/// Deduplicated union of all tags, in first-seen order
pub fn all_tags(tutorials: &[Tutorial]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in tutorials.iter().flat_map(|t| t.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}

/// The set of tags currently selected in the list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSelection {
    tags: Vec<String>,
}

impl TagSelection {
    /// Selects the tag, or deselects it if already selected.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    pub fn clear(&mut self) {
        self.tags.clear();
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_tutorials;

    fn titles(found: &[&Tutorial]) -> Vec<String> {
        found.iter().map(|t| t.title.clone()).collect()
    }

    fn tagged(id: u64, title: &str, summary: &str, tags: &[&str]) -> Tutorial {
        Tutorial {
            id,
            title: title.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            date: String::new(),
            summary: summary.to_string(),
            content: String::new(),
            project_link: None,
            favorite: false,
        }
    }

    #[test]
    fn test_no_filters_returns_everything_in_order() {
        let tutorials = sample_tutorials();
        let found = filter_tutorials(&tutorials, "", &[]);
        assert_eq!(found.len(), tutorials.len());
        assert!(found.iter().zip(&tutorials).all(|(a, b)| a.id == b.id));
    }

    #[test]
    fn test_search_is_case_insensitive_on_title_and_summary() {
        let tutorials = vec![
            tagged(1, "Intro to REACT", "", &[]),
            tagged(2, "Vue", "compares with React", &[]),
            tagged(3, "Svelte", "no mention", &[]),
        ];
        let found = filter_tutorials(&tutorials, "react", &[]);
        assert_eq!(titles(&found), vec!["Intro to REACT", "Vue"]);
    }

    #[test]
    fn test_search_ignores_content() {
        let mut tutorial = tagged(1, "Title", "Summary", &[]);
        tutorial.content = "react".to_string();
        assert!(!matches_search(&tutorial, "react"));
    }

    #[test]
    fn test_tags_are_anded() {
        let tutorials = vec![
            tagged(1, "a", "", &["React", "Hooks"]),
            tagged(2, "b", "", &["React"]),
            tagged(3, "c", "", &["Hooks", "React", "Extra"]),
        ];
        let selected = vec!["React".to_string(), "Hooks".to_string()];
        let found = filter_tutorials(&tutorials, "", &selected);
        assert_eq!(titles(&found), vec!["a", "c"]);
    }

    #[test]
    fn test_search_and_tags_combined() {
        let tutorials = vec![
            tagged(1, "Hooks guide", "", &["React"]),
            tagged(2, "Hooks elsewhere", "", &["Vue"]),
        ];
        let found = filter_tutorials(&tutorials, "hooks", &["React".to_string()]);
        assert_eq!(titles(&found), vec!["Hooks guide"]);
    }

    #[test]
    fn test_all_tags_first_seen_order() {
        let tutorials = vec![
            tagged(1, "a", "", &["Supabase", "Auth", "React"]),
            tagged(2, "b", "", &["React", "Hooks", "JavaScript"]),
        ];
        assert_eq!(
            all_tags(&tutorials),
            vec!["Supabase", "Auth", "React", "Hooks", "JavaScript"]
        );
    }

    #[test]
    fn test_tag_selection_toggle() {
        let mut selection = TagSelection::default();
        assert!(selection.toggle("React"));
        assert!(selection.toggle("Hooks"));
        assert!(!selection.toggle("React"));
        assert_eq!(selection.as_slice(), &["Hooks".to_string()]);
        selection.clear();
        assert!(selection.is_empty());
    }
}
