use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, warn};

use crate::browse::{BrowseState, PendingList};
use crate::client::CollectionSource;
use crate::config::ViewerConfig;
use crate::debounce::Debouncer;
use crate::overlay::{DetailOverlay, OverlayEvent, OverlayView};

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

/// One viewer session: filters, card grid and detail overlay over a
/// [`CollectionSource`]. Each user action issues at most one request.
pub struct Browser<S> {
    source: Arc<S>,
    grid: Arc<Mutex<BrowseState>>,
    overlay: Mutex<DetailOverlay>,
    search: Debouncer,
}

impl<S: CollectionSource + 'static> Browser<S> {
    pub fn new(source: S, config: &ViewerConfig) -> Self {
        Self {
            source: Arc::new(source),
            grid: Arc::new(Mutex::new(BrowseState::new(config.page_size))),
            overlay: Mutex::new(DetailOverlay::default()),
            search: Debouncer::new(config.debounce),
        }
    }

    /// Copy of the grid state for rendering.
    pub fn grid(&self) -> BrowseState {
        lock(&self.grid).clone()
    }

    pub fn overlay(&self) -> OverlayView {
        lock(&self.overlay).view().clone()
    }

    /// Initial load with empty filters.
    pub async fn start(&self) {
        let pending = lock(&self.grid).refresh();
        run_list(self.source.as_ref(), &self.grid, pending).await;
    }

    /// Keystroke in the search box. The query goes out once typing has been
    /// quiet for the debounce delay, with whatever text is current by then.
    /// Needs a running tokio runtime.
    pub fn search_input(&self, text: &str) {
        lock(&self.grid).set_text(text);
        let source = Arc::clone(&self.source);
        let grid = Arc::clone(&self.grid);
        self.search.schedule(async move {
            let pending = lock(&grid).refresh();
            run_list(source.as_ref(), &grid, pending).await;
        });
    }

    /// Applies immediately. A pending debounced search is dropped because
    /// this request already carries the latest text.
    pub async fn set_shiny(&self, shiny: Option<bool>) {
        self.search.cancel();
        let pending = lock(&self.grid).set_shiny(shiny);
        run_list(self.source.as_ref(), &self.grid, pending).await;
    }

    pub async fn set_trainer(&self, trainer: Option<String>) {
        self.search.cancel();
        let pending = lock(&self.grid).set_trainer(trainer);
        run_list(self.source.as_ref(), &self.grid, pending).await;
    }

    /// Returns `false` without a request when nothing more can be loaded or
    /// a request is already in flight. After a failed filter change this
    /// retries the filter change instead of appending.
    pub async fn load_more(&self) -> bool {
        let Some(pending) = lock(&self.grid).load_more() else {
            return false;
        };
        run_list(self.source.as_ref(), &self.grid, pending).await;
        true
    }

    /// Opens the overlay on a card and fetches its detail.
    pub async fn select(&self, id: i64) {
        let ticket = lock(&self.overlay).open(id);
        let result = self.source.detail(id).await;
        if let Err(e) = &result {
            warn!("Detail fetch for {id} failed: {e}");
        }
        if !lock(&self.overlay).resolve(ticket, result) {
            debug!("Discarded detail response for superseded selection {id}");
        }
    }

    /// Returns `true` when the event closed the overlay.
    pub fn overlay_event(&self, event: &OverlayEvent) -> bool {
        lock(&self.overlay).handle(event)
    }
}

async fn run_list<S: CollectionSource + ?Sized>(
    source: &S,
    grid: &Mutex<BrowseState>,
    pending: PendingList,
) {
    debug!(
        "Dispatching list request generation={} replace={} offset={}",
        pending.generation, pending.replace, pending.query.offset
    );
    let result = source.list(&pending.query).await;
    if let Err(e) = &result {
        warn!("List request failed: {e}");
    }
    if !lock(grid).apply(&pending, result) {
        debug!(
            "Discarded stale list response from generation {}",
            pending.generation
        );
    }
}
