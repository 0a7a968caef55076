//! Session view state.
//!
//! The session is always in one of three views. The add form is an
//! independent flag layered over the home and list views. Search and tag
//! selection belong to the list view but survive navigation.
use log::{debug, info};

use crate::{AddOutcome, TagSelection, Tutorial, TutorialDraft, TutorialId, TutorialStore};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    TutorialsList,
    TutorialDetail(TutorialId),
}

#[derive(Debug, Clone)]
pub struct ViewModel {
    view: View,
    add_form_open: bool,
    search_term: String,
    selected_tags: TagSelection,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewModel {
    /// Starts on the home view with the form closed and no filters
    pub fn new() -> Self {
        Self {
            view: View::Home,
            add_form_open: false,
            search_term: String::new(),
            selected_tags: TagSelection::default(),
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn is_add_form_open(&self) -> bool {
        self.add_form_open
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn selected_tags(&self) -> &TagSelection {
        &self.selected_tags
    }

    pub fn go_home(&mut self) {
        self.transition(View::Home);
    }

    pub fn browse_tutorials(&mut self) {
        self.transition(View::TutorialsList);
    }

    /// Opens the reading view. Returns false, leaving the view as it was,
    /// when the store has no such tutorial.
    pub fn open_tutorial(&mut self, store: &TutorialStore, id: TutorialId) -> bool {
        if store.get(id).is_none() {
            debug!("Cannot open missing tutorial {}", id);
            return false;
        }
        self.add_form_open = false;
        self.transition(View::TutorialDetail(id));
        true
    }

    /// Leaves the reading view for the list. No effect elsewhere.
    pub fn back(&mut self) -> bool {
        if matches!(self.view, View::TutorialDetail(_)) {
            self.transition(View::TutorialsList);
            true
        } else {
            false
        }
    }

    /// The form is only reachable from the home and list views
    pub fn open_add_form(&mut self) -> bool {
        if matches!(self.view, View::TutorialDetail(_)) {
            return false;
        }
        self.add_form_open = true;
        true
    }

    pub fn close_add_form(&mut self) {
        self.add_form_open = false;
    }

    /// Submits the draft. The form closes when the tutorial is stored and
    /// stays open when the draft is rejected or the form was not open.
    pub fn submit_add_form(&mut self, store: &mut TutorialStore, draft: TutorialDraft) -> Option<AddOutcome> {
        if !self.add_form_open {
            debug!("Ignoring submit with the add form closed");
            return None;
        }
        let outcome = store.add_tutorial(draft);
        if let AddOutcome::Added(id) = outcome {
            info!("Tutorial {} added from form", id);
            self.add_form_open = false;
        }
        Some(outcome)
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.selected_tags.toggle(tag)
    }

    pub fn clear_tags(&mut self) {
        self.selected_tags.clear();
    }

    /// Tutorials shown by the list view under the current filters
    pub fn visible_tutorials<'a>(&self, store: &'a TutorialStore) -> Vec<&'a Tutorial> {
        store.search(&self.search_term, self.selected_tags.as_slice())
    }

    /// The tutorial being read, if the view is the reading view
    pub fn selected_tutorial<'a>(&self, store: &'a TutorialStore) -> Option<&'a Tutorial> {
        match self.view {
            View::TutorialDetail(id) => store.get(id),
            _ => None,
        }
    }

    fn transition(&mut self, next: View) {
        if self.view != next {
            debug!("View {:?} -> {:?}", self.view, next);
        }
        self.view = next;
    }
}
