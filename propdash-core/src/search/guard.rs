/// Identity of a dispatched lookup: the exact trimmed query that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTag(String);

impl LookupTag {
    pub fn query(&self) -> &str {
        &self.0
    }
}

/// Decides whether a completed lookup may still touch visible state.
///
/// Only the most recently dispatched query is authoritative. Replies for any
/// other query are dropped without side effects, which gives visible results
/// a total order even though lookups can complete in any order.
#[derive(Debug, Default)]
pub struct AsyncResultGuard {
    authoritative: Option<String>,
}

impl AsyncResultGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `query` as authoritative and return the tag its reply must carry.
    pub fn dispatch(&mut self, query: &str) -> LookupTag {
        self.authoritative = Some(query.to_string());
        LookupTag(query.to_string())
    }

    /// Whether a reply carrying `tag` may be applied.
    pub fn admits(&self, tag: &LookupTag) -> bool {
        self.authoritative.as_deref() == Some(tag.query())
    }

    /// Revoke authority from every outstanding lookup.
    pub fn invalidate(&mut self) {
        self.authoritative = None;
    }

    pub fn authoritative(&self) -> Option<&str> {
        self.authoritative.as_deref()
    }
}
