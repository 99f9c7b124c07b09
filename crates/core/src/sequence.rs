//! Request sequencing for search sessions.
//!
//! Each resolve is issued a ticket; only the response carrying the most
//! recently issued ticket may be published. A slow response for an older
//! query is discarded instead of overwriting a newer result.

/// Opaque, monotonically increasing request number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SearchTicket(u64);

impl SearchTicket {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// Issues tickets and tells whether a ticket is still the latest.
#[derive(Debug, Default)]
pub struct SearchSequence {
    latest: u64,
}

impl SearchSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket, superseding every ticket issued before it.
    pub fn issue(&mut self) -> SearchTicket {
        self.latest += 1;
        SearchTicket(self.latest)
    }

    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        ticket.0 == self.latest
    }

    pub fn latest(&self) -> Option<SearchTicket> {
        (self.latest > 0).then_some(SearchTicket(self.latest))
    }
}
