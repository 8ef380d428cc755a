use std::time::Instant;

use log::{info, trace};

use crate::metrics::Stats;
use crate::verses::{self, VerseEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum Phase {
    InProgress,
    Complete,
}

/// What a single input update did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The session is complete and the input surface is read-only
    Ignored,
    /// Live stats were recomputed
    Updated,
    /// Input ran past the target without matching it, stats kept their last values
    Stale,
    /// Input matched the target exactly and the final score was recorded
    Completed,
}

/// Per-attempt state, replaced wholesale on reset and advance
#[derive(Debug, Clone, Default)]
struct SessionState {
    typed: String,
    started_at: Option<Instant>,
    complete: bool,
    stats: Stats,
}

/// Drives one practice screen: the active verse, what has been typed
/// against it, and the score for the current attempt.
#[derive(Debug, Clone)]
pub struct TypingSession {
    entries: Vec<VerseEntry>,
    current_index: usize,
    session_state: SessionState,
}

impl Default for TypingSession {
    fn default() -> Self {
        Self {
            entries: verses::all().to_vec(),
            current_index: 0,
            session_state: SessionState::default(),
        }
    }
}

impl TypingSession {
    /// Session over `entries`, or None when the list is empty or holds an empty text
    pub fn new(entries: Vec<VerseEntry>) -> Option<Self> {
        Self::starting_at(entries, 0)
    }

    /// Like [`TypingSession::new`] but opens on `index`, wrapping it into range
    pub fn starting_at(entries: Vec<VerseEntry>, index: usize) -> Option<Self> {
        if entries.is_empty() || entries.iter().any(VerseEntry::is_empty) {
            return None;
        }

        let current_index = index % entries.len();
        Some(Self {
            entries,
            current_index,
            session_state: SessionState::default(),
        })
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn verse(&self) -> &VerseEntry {
        &self.entries[self.current_index]
    }

    pub fn target(&self) -> &'static str {
        self.verse().text
    }

    pub fn typed(&self) -> &str {
        &self.session_state.typed
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.session_state.started_at
    }

    pub fn phase(&self) -> Phase {
        if self.session_state.complete {
            Phase::Complete
        } else {
            Phase::InProgress
        }
    }

    pub fn is_complete(&self) -> bool {
        self.session_state.complete
    }

    pub fn wpm(&self) -> u32 {
        self.session_state.stats.wpm
    }

    pub fn accuracy(&self) -> u32 {
        self.session_state.stats.accuracy
    }

    pub fn stats(&self) -> Stats {
        self.session_state.stats
    }

    /// (typed chars, target chars)
    pub fn progress(&self) -> (usize, usize) {
        (
            self.session_state.typed.chars().count(),
            self.target().chars().count(),
        )
    }

    /// Feed the full current contents of the input surface.
    pub fn handle_input(&mut self, value: &str, now: Instant) -> InputOutcome {
        if self.session_state.complete {
            return InputOutcome::Ignored;
        }

        let typed_len = value.chars().count();
        if self.session_state.started_at.is_none() && typed_len == 1 {
            self.session_state.started_at = Some(now);
        }

        self.session_state.typed = value.to_owned();

        let target = self.target();
        if value == target {
            self.session_state.complete = true;
            self.record_final_stats(now);
            info!(
                "completed {} with {}% accuracy at {} wpm",
                self.verse().reference,
                self.accuracy(),
                self.wpm()
            );
            return InputOutcome::Completed;
        }

        if typed_len > target.chars().count() {
            trace!("input overran target ({typed_len} chars), stats held");
            return InputOutcome::Stale;
        }

        self.session_state.stats =
            Stats::measure(value, target, self.session_state.started_at, now);
        trace!(
            "typed {typed_len} chars: {} wpm, {}%",
            self.wpm(),
            self.accuracy()
        );
        InputOutcome::Updated
    }

    // No-op when the clock never started (e.g. the whole text was pasted at once)
    fn record_final_stats(&mut self, now: Instant) {
        if self.session_state.started_at.is_none() {
            return;
        }

        self.session_state.stats = Stats::measure(
            &self.session_state.typed,
            self.target(),
            self.session_state.started_at,
            now,
        );
    }

    /// Move to the next entry, wrapping to the first, and start a fresh attempt
    pub fn advance(&mut self) {
        self.current_index = verses::next_index(self.current_index, self.entries.len());
        self.session_state = SessionState::default();
        info!(
            "advanced to {} ({}/{})",
            self.verse().reference,
            self.current_index + 1,
            self.entries.len()
        );
    }

    /// Start the current entry over
    pub fn reset(&mut self) {
        self.session_state = SessionState::default();
        info!("reset {}", self.verse().reference);
    }
}
