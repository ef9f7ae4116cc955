//! Status line and transient notification for the converter panel.

use std::sync::Arc;
use std::time::{Duration, Instant};

use super::cache::{RefreshTicket, RefreshTrigger};
use super::error::RefreshError;
use super::exchange::RateTable;

/// Status shown before the first refresh completes.
pub const FETCHING_STATUS: &str = "Fetching rates…";

/// Tone of a transient message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    /// Refresh succeeded.
    Success,
    /// Refresh failed.
    Failure,
}

/// Message shown for a limited time after a manual refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransientMessage {
    /// Text to render.
    pub text: String,
    /// Success or failure styling.
    pub kind: MessageKind,
    /// Instant after which the message is no longer shown.
    pub expires_at: Instant,
}

/// Rate status line plus an optional expiring message.
#[derive(Debug, Clone)]
pub struct StatusBoard {
    status: String,
    message: Option<TransientMessage>,
    last_success: Option<String>,
    ttl: Duration,
}

impl StatusBoard {
    /// Creates a board whose transient messages live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            status: FETCHING_STATUS.to_string(),
            message: None,
            last_success: None,
            ttl,
        }
    }

    /// Current status line.
    #[must_use]
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Transient message still visible at `now`.
    #[must_use]
    pub fn message(&self, now: Instant) -> Option<&TransientMessage> {
        self.message.as_ref().filter(|msg| now < msg.expires_at)
    }

    /// Record that a refresh was issued. The startup fetch keeps the initial
    /// status.
    pub fn refresh_started(&mut self, ticket: &RefreshTicket, trigger: RefreshTrigger) {
        match trigger {
            RefreshTrigger::Startup => {}
            RefreshTrigger::BaseChanged => {
                self.status = format!("Updating rates for {}…", ticket.base);
            }
            RefreshTrigger::Manual => {
                self.status = format!("Updating rates for {}…", ticket.base);
                self.message = None;
            }
        }
    }

    /// Record the outcome of a refresh as returned by the cache.
    ///
    /// Only manual refreshes raise a transient message. A stale result leaves
    /// the status line alone; if it was manual, the message reports the table
    /// that superseded it.
    pub fn refresh_finished(
        &mut self,
        trigger: RefreshTrigger,
        outcome: &Result<Arc<RateTable>, RefreshError>,
        now: Instant,
    ) {
        let (text, kind) = match outcome {
            Err(RefreshError::Superseded { .. }) => match &self.last_success {
                Some(text) => (text.clone(), MessageKind::Success),
                None => return,
            },
            Ok(table) => {
                self.status = format!("Rates updated: {}", table.date().format("%Y-%m-%d"));
                let text = format!(
                    "✓ Successfully updated {} exchange rates for {}!",
                    table.len(),
                    table.base()
                );
                self.last_success = Some(text.clone());
                (text, MessageKind::Success)
            }
            Err(RefreshError::Network(_) | RefreshError::Timeout(_)) => {
                self.status = "Error: Network issue - Could not fetch rates".to_string();
                (
                    "✗ Failed to update rates. Please check your internet connection.".to_string(),
                    MessageKind::Failure,
                )
            }
            Err(RefreshError::InvalidResponse(_)) => {
                self.status = "Error: Could not fetch rates".to_string();
                (
                    "✗ An error occurred while updating rates. Please try again.".to_string(),
                    MessageKind::Failure,
                )
            }
        };

        if trigger == RefreshTrigger::Manual {
            self.message = Some(TransientMessage {
                text,
                kind,
                expires_at: now + self.ttl,
            });
        }
    }
}
