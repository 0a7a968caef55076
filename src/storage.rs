use log::{debug, info, trace, warn};

use crate::{
    all_tags, filter_tutorials, sample_tutorials, AddOutcome, CodeNestError, RejectReason,
    Result, Tutorial, TutorialDraft, TutorialId,
};

/// Holds the tutorials of one session, in insertion order.
#[derive(Debug, Clone)]
pub struct TutorialStore {
    /// Tutorials in the order they were added
    tutorials: Vec<Tutorial>,

    /// Id handed to the next created tutorial
    next_id: TutorialId,
}

impl Default for TutorialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TutorialStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self {
            tutorials: Vec::new(),
            next_id: 1,
        }
    }

    /// Creates a store holding the sample catalogue.
    ///
    /// # Returns
    ///
    /// The seeded store or an error if the catalogue holds duplicate ids
    pub fn with_samples() -> Result<Self> {
        let mut store = Self::new();
        for tutorial in sample_tutorials() {
            store.seed(tutorial)?;
        }
        info!("Seeded store with {} sample tutorials", store.len());
        Ok(store)
    }

    /// Inserts a fully formed tutorial, keeping its id and favorite flag.
    ///
    /// # Arguments
    ///
    /// * `tutorial` - The tutorial to append
    ///
    /// # Returns
    ///
    /// An error if a tutorial with the same id is already stored, or if the
    /// id is the largest one and nothing could be added after it
    pub fn seed(&mut self, tutorial: Tutorial) -> Result<()> {
        if self.get(tutorial.id).is_some() {
            return Err(CodeNestError::TutorialAlreadyExists { id: tutorial.id });
        }
        let after = tutorial
            .id
            .checked_add(1)
            .ok_or(CodeNestError::TutorialIdOutOfRange { id: tutorial.id })?;

        self.next_id = self.next_id.max(after);
        debug!("Seeding tutorial {}: {}", tutorial.id, tutorial.title);
        self.tutorials.push(tutorial);
        Ok(())
    }

    /// Appends a tutorial built from the draft.
    ///
    /// A draft whose title is empty or whitespace-only is rejected and the
    /// store is left unchanged.
    pub fn add_tutorial(&mut self, draft: TutorialDraft) -> AddOutcome {
        if draft.title.trim().is_empty() {
            warn!("Rejected tutorial draft: {}", RejectReason::EmptyTitle);
            return AddOutcome::Rejected(RejectReason::EmptyTitle);
        }

        let id = self.next_id;
        let Some(next_id) = id.checked_add(1) else {
            warn!("Rejected tutorial draft: {}", RejectReason::IdsExhausted);
            return AddOutcome::Rejected(RejectReason::IdsExhausted);
        };
        self.next_id = next_id;

        let tutorial = Tutorial::from_draft(id, draft);
        info!("Adding tutorial {}: {}", id, tutorial.title);
        trace!("Tutorial tags: {:?}", tutorial.tags);
        self.tutorials.push(tutorial);

        AddOutcome::Added(id)
    }

    /// All tutorials in insertion order
    pub fn list_tutorials(&self) -> &[Tutorial] {
        &self.tutorials
    }

    /// Retrieves a tutorial by its ID
    pub fn get(&self, id: TutorialId) -> Option<&Tutorial> {
        debug!("Retrieving tutorial by ID: {}", id);
        self.tutorials.iter().find(|t| t.id == id)
    }

    /// Like [`TutorialStore::get`], failing with `TutorialNotFound`
    pub fn require(&self, id: TutorialId) -> Result<&Tutorial> {
        self.get(id)
            .ok_or(CodeNestError::TutorialNotFound { id })
    }

    /// Tutorials matching the search term and every selected tag
    pub fn search(&self, search_term: &str, selected_tags: &[String]) -> Vec<&Tutorial> {
        let found = filter_tutorials(&self.tutorials, search_term, selected_tags);
        debug!(
            "Search '{}' with tags {:?} matched {} of {} tutorials",
            search_term,
            selected_tags,
            found.len(),
            self.tutorials.len()
        );
        found
    }

    /// Every tag in use, in first-seen order
    pub fn all_tags(&self) -> Vec<String> {
        all_tags(&self.tutorials)
    }

    pub fn len(&self) -> usize {
        self.tutorials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tutorials.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_title_is_rejected() {
        let mut store = TutorialStore::new();
        let outcome = store.add_tutorial(TutorialDraft::with_title("   "));
        assert_eq!(outcome, AddOutcome::Rejected(RejectReason::EmptyTitle));
        assert!(store.is_empty());
    }

    #[test]
    fn test_add_appends_with_defaults() {
        let mut store = TutorialStore::with_samples().unwrap();
        let before = store.len();

        let outcome = store.add_tutorial(TutorialDraft::with_title("Test"));
        let id = outcome.id().expect("tutorial should be added");

        assert_eq!(store.len(), before + 1);
        let added = store.list_tutorials().last().unwrap();
        assert_eq!(added.id, id);
        assert_eq!(added.title, "Test");
        assert!(!added.favorite);
        assert!(added.tags.is_empty());
        assert!(store.list_tutorials()[..before].iter().all(|t| t.id != id));
    }

    #[test]
    fn test_ids_are_unique_and_insertion_order_kept() {
        let mut store = TutorialStore::new();
        let a = store.add_tutorial(TutorialDraft::with_title("B")).id().unwrap();
        let b = store.add_tutorial(TutorialDraft::with_title("A")).id().unwrap();
        let c = store.add_tutorial(TutorialDraft::with_title("B")).id().unwrap();
        assert!(a != b && b != c && a != c);

        let titles: Vec<&str> = store.list_tutorials().iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A", "B"]);
    }

    #[test]
    fn test_seed_rejects_duplicate_id_and_advances_counter() {
        let mut store = TutorialStore::with_samples().unwrap();
        let duplicate = store.list_tutorials()[0].clone();
        assert!(matches!(
            store.seed(duplicate),
            Err(CodeNestError::TutorialAlreadyExists { id: 1 })
        ));

        let id = store.add_tutorial(TutorialDraft::with_title("New")).id().unwrap();
        assert_eq!(id, 3);
    }

    #[test]
    fn test_seed_rejects_largest_id() {
        let mut store = TutorialStore::new();
        let mut tutorial = sample_tutorials().remove(0);
        tutorial.id = u64::MAX;

        assert!(matches!(
            store.seed(tutorial),
            Err(CodeNestError::TutorialIdOutOfRange { id: u64::MAX })
        ));
        assert!(store.is_empty());
        assert_eq!(store.add_tutorial(TutorialDraft::with_title("First")).id(), Some(1));
    }

    #[test]
    fn test_add_rejects_when_ids_run_out() {
        let mut store = TutorialStore::new();
        let mut tutorial = sample_tutorials().remove(0);
        tutorial.id = u64::MAX - 1;
        store.seed(tutorial).unwrap();

        assert_eq!(
            store.add_tutorial(TutorialDraft::with_title("Last")),
            AddOutcome::Rejected(RejectReason::IdsExhausted)
        );
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_added_tags_are_normalized() {
        let mut store = TutorialStore::new();
        let mut draft = TutorialDraft::with_title("Tags");
        draft.tags = vec![
            "a".to_string(),
            "a".to_string(),
            " b ".to_string(),
            "".to_string(),
            "   ".to_string(),
        ];

        store.add_tutorial(draft);
        assert_eq!(store.list_tutorials()[0].tags, vec!["a", "b"]);
        assert_eq!(store.all_tags(), vec!["a", "b"]);
    }

    #[test]
    fn test_require_missing() {
        let store = TutorialStore::new();
        assert!(matches!(
            store.require(9),
            Err(CodeNestError::TutorialNotFound { id: 9 })
        ));
    }
}
