//! # Request Lifecycle
//!
//! The application shell's state machine:
//!
//! ```text
//! Idle ──begin──▶ Loading ──settle(Ok)──▶ Succeeded
//!                   ▲    └──settle(Err)─▶ Failed
//!                   └──────begin─────────┘
//! ```
//!
//! Triggers are never refused: `begin` is valid from any state, including
//! `Loading`. Each `begin` hands out a [`Ticket`]; only the ticket of the most
//! recent submission may settle the session, so a slow earlier response can
//! not overwrite a newer one.

use serde::{Deserialize, Serialize};

use crate::result::{CalcOutcome, ResultKind};

/// Identifies one submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ticket {
    pub seq: u64,
    pub kind: ResultKind,
}

/// Exactly one of these holds at any time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    /// Waiting on the service. The last successful result stays visible.
    Loading {
        kind: ResultKind,
        previous: Option<CalcOutcome>,
    },
    Succeeded(CalcOutcome),
    /// Normalized, user-facing message
    Failed(String),
}

/// Owner of the request lifecycle state
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: RequestState,
    next_seq: u64,
    latest: Option<Ticket>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RequestState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, RequestState::Loading { .. })
    }

    /// Which action is in flight, if any
    pub fn loading_kind(&self) -> Option<ResultKind> {
        match self.state {
            RequestState::Loading { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// Result to render, if any. During loading this is the previous result.
    pub fn result(&self) -> Option<&CalcOutcome> {
        match &self.state {
            RequestState::Succeeded(outcome) => Some(outcome),
            RequestState::Loading { previous, .. } => previous.as_ref(),
            _ => None,
        }
    }

    /// Error to render, if any
    pub fn error(&self) -> Option<&str> {
        match &self.state {
            RequestState::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Enter loading for a new submission, clearing any prior error.
    pub fn begin(&mut self, kind: ResultKind) -> Ticket {
        self.next_seq += 1;
        let ticket = Ticket {
            seq: self.next_seq,
            kind,
        };
        let previous = self.result().cloned();
        self.state = RequestState::Loading { kind, previous };
        self.latest = Some(ticket);
        tracing::debug!(seq = ticket.seq, %kind, "request started");
        ticket
    }

    /// Record the outcome of a submission.
    ///
    /// Returns `false` and leaves the state alone when `ticket` has been
    /// superseded by a later `begin`.
    pub fn settle(&mut self, ticket: Ticket, outcome: Result<CalcOutcome, String>) -> bool {
        if self.latest != Some(ticket) || !self.is_loading() {
            tracing::debug!(seq = ticket.seq, kind = %ticket.kind, "discarding stale response");
            return false;
        }
        self.state = match outcome {
            Ok(result) => RequestState::Succeeded(result),
            Err(message) => RequestState::Failed(message),
        };
        true
    }
}
