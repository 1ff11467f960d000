use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, warn};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;
use tokio::time;

use crate::error::BrowseError;
use crate::model::SearchHit;
use crate::render;
use crate::sources::ApiClient;

const DEBOUNCE: Duration = Duration::from_millis(300);
const MIN_QUERY_CHARS: usize = 2;
const SUGGESTION_TOP_K: usize = 10;
const SEARCH_TOP_K: usize = 50;

/// How the query string is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// Free-text search against recipe names
    Name,
    /// Comma-separated ingredient list
    Ingredients,
}

/// Dropdown updates, in the order they should reach the screen.
#[derive(Debug)]
pub enum DropdownEvent {
    Loading,
    Results { query: String, hits: Vec<SearchHit> },
    NoResults { message: String },
    Hidden,
}

/// Debounced live-search driver for the suggestion dropdown.
///
/// Keystrokes restart a 300 ms timer; only a query that survives the quiet
/// period (and has at least two characters) is sent. Every dispatched
/// request carries a monotonic sequence number and responses that are no
/// longer the latest are discarded, so a slow early request can never
/// overwrite a newer one's results.
pub struct SuggestController {
    api: Arc<ApiClient>,
    mode: SearchMode,
    seq: Arc<AtomicU64>,
    pending: Option<JoinHandle<()>>,
    events: UnboundedSender<DropdownEvent>,
}

impl SuggestController {
    pub fn new(api: Arc<ApiClient>) -> (Self, UnboundedReceiver<DropdownEvent>) {
        let (events, receiver) = mpsc::unbounded_channel();
        (
            SuggestController {
                api,
                mode: SearchMode::Name,
                seq: Arc::new(AtomicU64::new(0)),
                pending: None,
                events,
            },
            receiver,
        )
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    /// Switching modes dismisses whatever the dropdown was showing.
    pub fn set_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.dismiss();
    }

    /// Keystroke entry point: restarts the debounce timer.
    pub fn on_input(&mut self, query: &str) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let query = query.trim().to_string();
        if query.chars().count() < MIN_QUERY_CHARS {
            self.hide();
            return;
        }

        let seq = self.next_seq();
        let api = self.api.clone();
        let latest = self.seq.clone();
        let events = self.events.clone();
        let mode = self.mode;

        self.pending = Some(tokio::spawn(async move {
            time::sleep(DEBOUNCE).await;
            let _ = events.send(DropdownEvent::Loading);

            let result = run_search(&api, mode, &query, SUGGESTION_TOP_K).await;
            if latest.load(Ordering::SeqCst) != seq {
                debug!("Discarding stale suggestion response for '{}'", query);
                return;
            }

            let event = match result {
                Ok(Some(hits)) => DropdownEvent::Results { query, hits },
                // Nothing worth sending (e.g. only commas typed in ingredient mode)
                Ok(None) => DropdownEvent::Hidden,
                Err(e) => {
                    warn!("Suggestion search failed: {}", e);
                    DropdownEvent::Hidden
                }
            };
            let _ = events.send(event);
        }));
    }

    /// Explicit search (Enter key or button): fires immediately with the
    /// larger top-k and supersedes any pending suggestion.
    pub async fn commit_search(&mut self, query: &str) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }

        let query = query.trim().to_string();
        if query.is_empty() {
            self.hide();
            return;
        }

        let seq = self.next_seq();
        let _ = self.events.send(DropdownEvent::Loading);

        let result = run_search(&self.api, self.mode, &query, SEARCH_TOP_K).await;
        if self.seq.load(Ordering::SeqCst) != seq {
            return;
        }

        let event = match result {
            Ok(Some(hits)) if hits.is_empty() => DropdownEvent::NoResults {
                message: match self.mode {
                    SearchMode::Name => format!("No recipes found for \"{query}\""),
                    SearchMode::Ingredients => {
                        "No recipes found with these ingredients".to_string()
                    }
                },
            },
            Ok(Some(hits)) => DropdownEvent::Results { query, hits },
            Ok(None) => DropdownEvent::NoResults {
                message: "Please enter at least one ingredient".to_string(),
            },
            Err(e) => {
                warn!("Search failed: {}", e);
                DropdownEvent::NoResults {
                    message: "Search error. Please try again.".to_string(),
                }
            }
        };
        let _ = self.events.send(event);
    }

    /// Outside click, or the query dropping below two characters.
    pub fn dismiss(&mut self) {
        if let Some(task) = self.pending.take() {
            task.abort();
        }
        self.hide();
    }

    /// Navigation target for a chosen suggestion, carrying the query for
    /// detail-page highlighting.
    pub fn selection_url(hit: &SearchHit, query: &str) -> String {
        render::detail_url(&hit.id, Some(query))
    }

    fn next_seq(&self) -> u64 {
        self.seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn hide(&self) {
        let _ = self.events.send(DropdownEvent::Hidden);
    }
}

async fn run_search(
    api: &ApiClient,
    mode: SearchMode,
    query: &str,
    top_k: usize,
) -> Result<Option<Vec<SearchHit>>, BrowseError> {
    match mode {
        SearchMode::Name => api.search_by_text(query, top_k).await.map(Some),
        SearchMode::Ingredients => {
            let terms: Vec<String> = query
                .split(',')
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .map(str::to_string)
                .collect();
            if terms.is_empty() {
                return Ok(None);
            }
            api.search_by_ingredients(&terms).await.map(Some)
        }
    }
}
