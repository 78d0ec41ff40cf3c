//! Incremental player search.
//!
//! Keystrokes flow through [`SearchController::on_input_change`] into the
//! [`QueryDebouncer`]. When the quiet period elapses a lookup is dispatched
//! and tagged by the [`AsyncResultGuard`]; its reply is adopted only if the
//! tag is still authoritative. The dropdown shows live results, falling back
//! to the [`RecentSelectionStore`], and [`NavigationStateMachine`] moves the
//! highlight over whichever list is displayed.
//!
//! Timers and lookups run as tokio tasks that report back through
//! [`SearchEvent`]s. The host drives the controller by awaiting
//! [`SearchController::next_event`] and passing each event to
//! [`SearchController::handle_event`], so all state changes happen on the
//! host's task.

mod controller;
mod debounce;
mod guard;
mod navigation;
mod recent;

pub use controller::{SearchController, SearchOptions, SearchView, SelectionCallback, ViewStatus};
pub use debounce::{Debounce, QueryDebouncer, eligible_query};
pub use guard::{AsyncResultGuard, LookupTag};
pub use navigation::{NavKey, NavOutcome, NavState, NavigationStateMachine, displayed_list};
pub use recent::RecentSelectionStore;

use crate::api::ApiError;
use crate::models::Player;

/// Completion notices posted by the controller's background tasks.
#[derive(Debug)]
pub enum SearchEvent {
    /// A debounce timer elapsed without being replaced.
    QuerySettled { ticket: u64 },
    /// A lookup finished, successfully or not.
    LookupFinished {
        tag: LookupTag,
        outcome: Result<Vec<Player>, ApiError>,
    },
}
