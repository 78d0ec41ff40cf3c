use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use super::SearchEvent;
use crate::config::constants::search::{DEFAULT_MIN_QUERY_CHARS, DEFAULT_QUIET_PERIOD_MS};

/// What a call to [`QueryDebouncer::schedule`] did with the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Debounce {
    /// The trimmed query was too short; live results must be cleared.
    Cleared,
    /// A lookup for the trimmed query fires after the quiet period.
    Pending(String),
}

/// The trimmed query if it is long enough to look up.
pub fn eligible_query(text: &str, min_chars: usize) -> Option<&str> {
    let trimmed = text.trim();
    (trimmed.chars().count() >= min_chars).then_some(trimmed)
}

struct PendingLookup {
    ticket: u64,
    query: String,
    timer: JoinHandle<()>,
}

/// Collapses bursts of input into one delayed lookup trigger.
///
/// Exactly one timer is owned at a time. Every `schedule` call aborts it
/// before doing anything else, so only the last call of a burst can fire.
/// When the timer elapses it posts [`SearchEvent::QuerySettled`]; the owner
/// redeems the ticket with [`take_settled`](Self::take_settled), which also
/// rejects a ticket that was already in the channel when it got superseded.
///
/// Must be used from within a tokio runtime.
pub struct QueryDebouncer {
    quiet_period: Duration,
    min_chars: usize,
    pending: Option<PendingLookup>,
    next_ticket: u64,
    events: UnboundedSender<SearchEvent>,
}

impl QueryDebouncer {
    pub fn new(events: UnboundedSender<SearchEvent>) -> Self {
        Self::with_settings(
            events,
            Duration::from_millis(DEFAULT_QUIET_PERIOD_MS),
            DEFAULT_MIN_QUERY_CHARS,
        )
    }

    pub fn with_settings(
        events: UnboundedSender<SearchEvent>,
        quiet_period: Duration,
        min_chars: usize,
    ) -> Self {
        Self {
            quiet_period,
            min_chars,
            pending: None,
            next_ticket: 0,
            events,
        }
    }

    pub fn schedule(&mut self, text: &str) -> Debounce {
        self.cancel();

        let Some(query) = eligible_query(text, self.min_chars) else {
            return Debounce::Cleared;
        };

        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let delay = self.quiet_period;
        let events = self.events.clone();
        let timer = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SearchEvent::QuerySettled { ticket });
        });

        self.pending = Some(PendingLookup {
            ticket,
            query: query.to_string(),
            timer,
        });
        Debounce::Pending(query.to_string())
    }

    /// Redeem a settled ticket. Returns the query to look up, or `None` when
    /// the ticket belongs to a timer that has since been replaced.
    pub fn take_settled(&mut self, ticket: u64) -> Option<String> {
        match &self.pending {
            Some(pending) if pending.ticket == ticket => {
                self.pending.take().map(|pending| pending.query)
            }
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            pending.timer.abort();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn pending_query(&self) -> Option<&str> {
        self.pending.as_ref().map(|pending| pending.query.as_str())
    }

    pub fn min_chars(&self) -> usize {
        self.min_chars
    }

    pub fn quiet_period(&self) -> Duration {
        self.quiet_period
    }
}

impl Drop for QueryDebouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc;

    fn settled_ticket(event: SearchEvent) -> u64 {
        match event {
            SearchEvent::QuerySettled { ticket } => ticket,
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn eligibility_counts_trimmed_characters() {
        assert_eq!(eligible_query("  ta ", 2), Some("ta"));
        assert_eq!(eligible_query(" t ", 2), None);
        assert_eq!(eligible_query("é", 2), None);
        assert_eq!(eligible_query("", 0), Some(""));
    }

    #[tokio::test(start_paused = true)]
    async fn short_queries_never_schedule() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);

        assert_eq!(debouncer.schedule(""), Debounce::Cleared);
        assert_eq!(debouncer.schedule("  t  "), Debounce::Cleared);
        assert!(!debouncer.is_pending());

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn fires_once_after_quiet_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);

        assert_eq!(
            debouncer.schedule("  tatum "),
            Debounce::Pending("tatum".to_string())
        );

        tokio::time::sleep(Duration::from_millis(249)).await;
        assert!(rx.try_recv().is_err());

        let ticket = settled_ticket(rx.recv().await.unwrap());
        assert_eq!(debouncer.take_settled(ticket).as_deref(), Some("tatum"));
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.take_settled(ticket), None);
    }

    #[tokio::test(start_paused = true)]
    async fn burst_only_fires_last_query() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);

        for text in ["ta", "tat", "tatu", "tatum"] {
            debouncer.schedule(text);
            tokio::time::sleep(Duration::from_millis(100)).await;
        }

        let ticket = settled_ticket(rx.recv().await.unwrap());
        assert_eq!(debouncer.take_settled(ticket).as_deref(), Some("tatum"));

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn superseded_ticket_is_rejected() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);

        debouncer.schedule("tat");
        let stale = settled_ticket(rx.recv().await.unwrap());

        // The ticket is already queued when the user types again.
        debouncer.schedule("tatum");
        assert_eq!(debouncer.take_settled(stale), None);
        assert_eq!(debouncer.pending_query(), Some("tatum"));
    }

    #[tokio::test(start_paused = true)]
    async fn short_query_cancels_pending_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);

        debouncer.schedule("tatum");
        assert_eq!(debouncer.schedule("t"), Debounce::Cleared);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn drop_aborts_timer() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut debouncer = QueryDebouncer::new(tx);
        debouncer.schedule("tatum");
        drop(debouncer);

        tokio::time::sleep(Duration::from_secs(1)).await;
        assert!(rx.try_recv().is_err());
    }
}
