//! Incremental loading state machine
//!
//! Grows the visible count of a list in fixed chunks whenever the end of the
//! rendered window comes into view. This module holds only the transitions;
//! the settle delay between a proximity signal and the growth step is driven
//! by the caller, which receives a [`GrowthTicket`] for the pending step and
//! hands it back once the delay has elapsed.
//!
//! ```text
//!            proximity && has_more
//!   Idle ─────────────────────────▶ AwaitingMore
//!    ▲                                   │ complete_growth
//!    │◀──────────── has_more ────────────┤
//!    │                                   ▼
//!    └──────── reset (new term) ──── Exhausted
//! ```
//!
//! A ticket is only honored if nothing invalidated it in the meantime: a
//! [`IncrementalLoader::reset`] or [`IncrementalLoader::dispose`] bumps the
//! generation, so a growth step that was in flight is discarded.

use std::time::Duration;

use serde::Serialize;

/// Visible count right after mount or a search change.
pub const INITIAL_CHUNK: usize = 20;

/// Rows added per growth step.
pub const CHUNK_SIZE: usize = 20;

/// Delay between a proximity signal and the growth step it triggers.
pub const SETTLE_DELAY: Duration = Duration::from_millis(1300);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoaderState {
    Idle,
    AwaitingMore,
    Exhausted,
}

impl std::fmt::Display for LoaderState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoaderState::Idle => write!(f, "idle"),
            LoaderState::AwaitingMore => write!(f, "awaiting more"),
            LoaderState::Exhausted => write!(f, "exhausted"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub initial_chunk: usize,
    pub chunk_size: usize,
    pub settle_delay: Duration,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            initial_chunk: INITIAL_CHUNK,
            chunk_size: CHUNK_SIZE,
            settle_delay: SETTLE_DELAY,
        }
    }
}

/// Handle for one pending growth step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowthTicket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    config: LoaderConfig,
    state: LoaderState,
    visible_count: usize,
    generation: u64,
    disposed: bool,
}

impl IncrementalLoader {
    pub fn new(config: LoaderConfig) -> Self {
        Self {
            config,
            state: LoaderState::Idle,
            visible_count: config.initial_chunk,
            generation: 0,
            disposed: false,
        }
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    pub fn state(&self) -> LoaderState {
        self.state
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    pub fn has_more(&self, total: usize) -> bool {
        self.visible_count < total
    }

    /// The last rendered row entered the viewport.
    ///
    /// Returns a ticket when a growth step should be scheduled. Signals are
    /// ignored while a step is already pending, once the list is exhausted,
    /// when nothing is left to show, and after disposal.
    pub fn on_proximity(&mut self, total: usize) -> Option<GrowthTicket> {
        if self.disposed || self.state != LoaderState::Idle || !self.has_more(total) {
            return None;
        }

        self.state = LoaderState::AwaitingMore;
        Some(GrowthTicket {
            generation: self.generation,
        })
    }

    /// Apply the growth step for `ticket` once its settle delay has elapsed.
    ///
    /// Returns `false` and leaves the loader untouched when the ticket is
    /// stale (reset or disposed since it was issued).
    pub fn complete_growth(&mut self, ticket: GrowthTicket, total: usize) -> bool {
        if self.disposed
            || ticket.generation != self.generation
            || self.state != LoaderState::AwaitingMore
        {
            return false;
        }

        let grown = self
            .visible_count
            .saturating_add(self.config.chunk_size)
            .min(total);
        self.visible_count = self.visible_count.max(grown);
        self.state = if self.has_more(total) {
            LoaderState::Idle
        } else {
            LoaderState::Exhausted
        };

        true
    }

    /// Start over after the search term (or the underlying list) changed.
    pub fn reset(&mut self) {
        if self.disposed {
            return;
        }

        self.generation += 1;
        self.visible_count = self.config.initial_chunk;
        self.state = LoaderState::Idle;
    }

    /// The owning view is gone; no pending or future step may apply.
    pub fn dispose(&mut self) {
        self.generation += 1;
        self.disposed = true;
    }
}

impl Default for IncrementalLoader {
    fn default() -> Self {
        Self::new(LoaderConfig::default())
    }
}
