use crate::models::Player;

/// List shown in the dropdown: live results when there are any, otherwise
/// the recent selections.
///
/// An empty result set for a real query and "nothing typed yet" both fall
/// back to the recent list, so the two states look the same.
pub fn displayed_list<'a>(live: &'a [Player], recent: &'a [Player]) -> &'a [Player] {
    if live.is_empty() { recent } else { live }
}

/// Keys the dropdown reacts to. Everything else is [`NavKey::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    ArrowUp,
    ArrowDown,
    Enter,
    Escape,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Closed,
    /// Dropdown visible; `highlight` indexes the displayed list.
    Open { highlight: Option<usize> },
}

/// Result of feeding a key to the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavOutcome {
    Ignored,
    Opened,
    Moved(usize),
    Closed,
    /// Commit the entry at this index of the displayed list.
    Commit(usize),
}

/// Open/closed dropdown plus a wrapping highlight.
///
/// The navigated list is never stored here; every transition receives the
/// length of the list currently displayed.
#[derive(Debug, Clone)]
pub struct NavigationStateMachine {
    state: NavState,
}

impl Default for NavigationStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl NavigationStateMachine {
    pub fn new() -> Self {
        Self {
            state: NavState::Closed,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, NavState::Open { .. })
    }

    pub fn highlight(&self) -> Option<usize> {
        match self.state {
            NavState::Open { highlight } => highlight,
            NavState::Closed => None,
        }
    }

    /// Input focus or a text change.
    pub fn open(&mut self) {
        self.state = NavState::Open { highlight: None };
    }

    /// Escape, an outside interaction, or a commit. Only visibility changes.
    pub fn close(&mut self) {
        self.state = NavState::Closed;
    }

    pub fn handle_key(&mut self, key: NavKey, len: usize) -> NavOutcome {
        let highlight = match self.state {
            NavState::Closed => {
                return match key {
                    NavKey::ArrowDown | NavKey::ArrowUp => {
                        self.open();
                        NavOutcome::Opened
                    }
                    _ => NavOutcome::Ignored,
                };
            }
            NavState::Open { highlight } => highlight,
        };

        match key {
            NavKey::Escape => {
                self.close();
                NavOutcome::Closed
            }
            _ if len == 0 => NavOutcome::Ignored,
            NavKey::ArrowDown => {
                let next = match highlight {
                    Some(index) => (index + 1) % len,
                    None => 0,
                };
                self.state = NavState::Open {
                    highlight: Some(next),
                };
                NavOutcome::Moved(next)
            }
            NavKey::ArrowUp => {
                let next = match highlight {
                    Some(index) => (index + len - 1) % len,
                    // No highlight counts as index -1, so one step up from it.
                    None => (2 * len - 2) % len,
                };
                self.state = NavState::Open {
                    highlight: Some(next),
                };
                NavOutcome::Moved(next)
            }
            NavKey::Enter => {
                let index = highlight.filter(|index| *index < len).unwrap_or(0);
                self.close();
                NavOutcome::Commit(index)
            }
            NavKey::Other => NavOutcome::Ignored,
        }
    }

    /// Pointer hover over row `index`.
    pub fn hover(&mut self, index: usize, len: usize) {
        if let NavState::Open { .. } = self.state {
            if index < len {
                self.state = NavState::Open {
                    highlight: Some(index),
                };
            }
        }
    }

    /// Drop a highlight that no longer points into the displayed list.
    pub fn reconcile(&mut self, len: usize) {
        if let NavState::Open {
            highlight: Some(index),
        } = self.state
        {
            if index >= len {
                self.state = NavState::Open { highlight: None };
            }
        }
    }
}
