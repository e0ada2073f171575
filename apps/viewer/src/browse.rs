//! Card-grid state for one browsing session.
//!
//! Every replacing query (any filter change) starts a new generation. Requests
//! carry the generation they were issued under, and [`BrowseState::apply`]
//! drops responses from older generations, so a slow response to an earlier
//! filter can never overwrite the results of a later one. "Load more" always
//! pages the query the displayed items came from, never a filter that has not
//! been loaded yet.

use crate::error::ClientError;
use crate::models::{CollectionSummary, Filters, ListPage, ListQuery};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading,
    Loaded,
    /// Last request for the current filters failed; loaded items are kept.
    Failed(String),
}

/// A list request the caller must send and hand back to [`BrowseState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingList {
    pub generation: u64,
    /// Replace the grid (filter change) or append to it (load more).
    pub replace: bool,
    pub query: ListQuery,
}

#[derive(Debug, Clone)]
pub struct BrowseState {
    /// Filters of the latest replacing query.
    filters: Filters,
    /// Search box contents, applied to `filters` on the next refresh.
    draft_text: String,
    /// Query the displayed items were loaded with. `None` until the replacing
    /// load of the current generation succeeds.
    shown: Option<ListQuery>,
    items: Vec<CollectionSummary>,
    total: i64,
    next_offset: i64,
    generation: u64,
    status: LoadStatus,
    page_size: i64,
}

impl BrowseState {
    pub fn new(page_size: i64) -> Self {
        Self {
            filters: Filters::default(),
            draft_text: String::new(),
            shown: None,
            items: Vec::new(),
            total: 0,
            next_offset: 0,
            generation: 0,
            status: LoadStatus::Idle,
            page_size,
        }
    }

    pub fn filters(&self) -> &Filters {
        &self.filters
    }

    pub fn draft_text(&self) -> &str {
        &self.draft_text
    }

    pub fn items(&self) -> &[CollectionSummary] {
        &self.items
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn next_offset(&self) -> i64 {
        self.next_offset
    }

    /// Gates the "load more" control.
    pub fn has_more(&self) -> bool {
        (self.items.len() as i64) < self.total
    }

    /// Records the search box contents without issuing a request; the caller
    /// debounces and then calls [`BrowseState::refresh`].
    pub fn set_text(&mut self, text: &str) {
        self.draft_text = text.to_string();
    }

    pub fn set_shiny(&mut self, shiny: Option<bool>) -> PendingList {
        self.filters.shiny = shiny;
        self.refresh()
    }

    pub fn set_trainer(&mut self, trainer: Option<String>) -> PendingList {
        self.filters.trainer = trainer.filter(|t| !t.trim().is_empty());
        self.refresh()
    }

    /// Starts a replacing query for the current filters and search text.
    pub fn refresh(&mut self) -> PendingList {
        self.filters.text = self.draft_text.clone();
        self.generation += 1;
        self.shown = None;
        self.replace_request()
    }

    fn replace_request(&mut self) -> PendingList {
        self.status = LoadStatus::Loading;
        PendingList {
            generation: self.generation,
            replace: true,
            query: self.filters.to_query(self.page_size, 0),
        }
    }

    /// Next page of the displayed query. `None` while a request is in flight
    /// or when everything is loaded. If the replacing load for the current
    /// filters failed, the replace is retried instead of appending to items
    /// that belong to other filters.
    pub fn load_more(&mut self) -> Option<PendingList> {
        if self.status == LoadStatus::Loading {
            return None;
        }
        let Some(shown) = self.shown.clone() else {
            let failed = matches!(self.status, LoadStatus::Failed(_));
            return failed.then(|| self.replace_request());
        };
        if !self.has_more() {
            return None;
        }
        let query = ListQuery {
            offset: self.next_offset,
            ..shown
        };
        self.status = LoadStatus::Loading;
        Some(PendingList {
            generation: self.generation,
            replace: false,
            query,
        })
    }

    /// Returns `false` when the response belongs to a superseded generation
    /// and was discarded.
    pub fn apply(&mut self, pending: &PendingList, result: Result<ListPage, ClientError>) -> bool {
        if pending.generation != self.generation {
            return false;
        }

        match result {
            Ok(page) => {
                let returned = page.items.len() as i64;
                if pending.replace {
                    self.items = page.items;
                    self.next_offset = returned;
                    self.shown = Some(pending.query.clone());
                } else {
                    self.items.extend(page.items);
                    self.next_offset += returned;
                }
                self.total = page.total;
                self.status = LoadStatus::Loaded;
            }
            Err(e) => {
                self.status = LoadStatus::Failed(e.to_string());
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: i64) -> CollectionSummary {
        CollectionSummary {
            id,
            box_number: 0,
            box_slot: id,
            species_name: format!("Species {id}"),
            dex_number: Some(id),
            form_name: None,
            nickname: None,
            level: None,
            nature: None,
            is_shiny: false,
            gender: None,
            original_trainer: None,
            trainer_id: None,
            ball_type: None,
            image_url: None,
        }
    }

    fn page(ids: std::ops::Range<i64>, total: i64) -> ListPage {
        ListPage {
            total,
            items: ids.map(card).collect(),
        }
    }

    #[test]
    fn test_starts_idle_and_refresh_goes_loading() {
        let mut state = BrowseState::new(2);
        assert_eq!(*state.status(), LoadStatus::Idle);
        assert!(!state.has_more());

        let pending = state.refresh();
        assert_eq!(*state.status(), LoadStatus::Loading);
        assert!(pending.replace);
        assert_eq!(pending.query.offset, 0);
        assert_eq!(pending.query.limit, 2);
    }

    #[test]
    fn test_load_more_appends_and_advances_by_returned_count() {
        let mut state = BrowseState::new(3);
        let first = state.refresh();
        assert!(state.apply(&first, Ok(page(0..3, 5))));
        assert!(state.has_more());

        let more = state.load_more().unwrap();
        assert!(!more.replace);
        assert_eq!(more.query.offset, 3);

        // Short final page.
        assert!(state.apply(&more, Ok(page(3..5, 5))));
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.next_offset(), 5);
        assert!(!state.has_more());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_load_more_blocked_while_loading() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 10)));

        assert!(state.load_more().is_some());
        assert!(state.load_more().is_none());
    }

    #[test]
    fn test_filter_change_replaces_on_completion() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 4)));

        let shiny = state.set_shiny(Some(true));
        assert_eq!(shiny.query.shiny, Some(true));
        assert_eq!(shiny.query.offset, 0);
        // Old cards stay visible until the replacement arrives.
        assert_eq!(state.items().len(), 2);

        state.apply(&shiny, Ok(page(10..11, 1)));
        assert_eq!(state.items().iter().map(|c| c.id).collect::<Vec<_>>(), vec![10]);
        assert_eq!(state.total(), 1);
        assert_eq!(*state.status(), LoadStatus::Loaded);
    }

    #[test]
    fn test_stale_generation_is_discarded() {
        let mut state = BrowseState::new(2);
        let old = state.set_trainer(Some("Red".into()));
        let new = state.set_trainer(Some("Blue".into()));

        assert!(state.apply(&new, Ok(page(0..1, 1))));
        assert!(!state.apply(&old, Ok(page(5..7, 9))));

        assert_eq!(state.total(), 1);
        assert_eq!(state.items()[0].id, 0);
    }

    #[test]
    fn test_stale_load_more_after_filter_change_is_discarded() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 6)));

        let more = state.load_more().unwrap();
        let refreshed = state.set_shiny(Some(false));
        state.apply(&refreshed, Ok(page(20..22, 2)));

        assert!(!state.apply(&more, Ok(page(2..4, 6))));
        assert_eq!(state.items().len(), 2);
        assert_eq!(state.total(), 2);
    }

    #[test]
    fn test_failure_keeps_loaded_items() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 6)));

        let more = state.load_more().unwrap();
        state.apply(&more, Err(ClientError::Unavailable("down".into())));

        assert!(matches!(state.status(), LoadStatus::Failed(msg) if msg.contains("down")));
        assert_eq!(state.items().len(), 2);
        // A failed page can be retried.
        assert_eq!(state.load_more().unwrap().query.offset, 2);
    }

    #[test]
    fn test_load_more_after_failed_filter_change_retries_replace() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 10)));

        let shiny = state.set_shiny(Some(true));
        state.apply(&shiny, Err(ClientError::Unavailable("down".into())));
        assert_eq!(state.items().len(), 2);

        let retry = state.load_more().unwrap();
        assert!(retry.replace);
        assert_eq!(retry.query.offset, 0);
        assert_eq!(retry.query.shiny, Some(true));

        state.apply(&retry, Ok(page(30..31, 1)));
        assert_eq!(state.items().iter().map(|c| c.id).collect::<Vec<_>>(), vec![30]);
        assert!(!state.has_more());
    }

    #[test]
    fn test_failed_initial_load_retries_and_idle_does_nothing() {
        let mut state = BrowseState::new(2);
        assert!(state.load_more().is_none());

        let first = state.refresh();
        state.apply(&first, Err(ClientError::Unavailable("down".into())));
        assert!(state.load_more().unwrap().replace);
    }

    #[test]
    fn test_typed_text_waits_for_refresh() {
        let mut state = BrowseState::new(2);
        let first = state.refresh();
        state.apply(&first, Ok(page(0..2, 10)));

        state.set_text("pika");
        assert_eq!(state.draft_text(), "pika");
        assert_eq!(state.filters().text, "");

        let more = state.load_more().unwrap();
        assert!(!more.replace);
        assert_eq!(more.query.q, None);
        assert_eq!(more.query.offset, 2);
        state.apply(&more, Ok(page(2..4, 10)));
        assert_eq!(state.items().len(), 4);
        assert!(state.items().len() as i64 <= state.total());

        let search = state.refresh();
        assert_eq!(search.query.q.as_deref(), Some("pika"));
        assert_eq!(state.filters().text, "pika");
    }

    #[test]
    fn test_toggle_carries_typed_text() {
        let mut state = BrowseState::new(2);
        state.set_text("eevee");
        let pending = state.set_shiny(Some(false));
        assert_eq!(pending.query.q.as_deref(), Some("eevee"));
    }

    #[test]
    fn test_blank_trainer_clears_filter() {
        let mut state = BrowseState::new(2);
        let pending = state.set_trainer(Some("  ".into()));
        assert_eq!(pending.query.ot, None);
        assert_eq!(state.filters().trainer, None);
    }
}
