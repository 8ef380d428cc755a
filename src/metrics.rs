use std::time::Instant;

/// Live score shown while typing and frozen as the final score on completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: u32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            wpm: 0,
            accuracy: 100,
        }
    }
}

impl Stats {
    pub fn measure(typed: &str, target: &str, started_at: Option<Instant>, now: Instant) -> Self {
        Self {
            wpm: wpm(typed, started_at, now),
            accuracy: accuracy(typed, target),
        }
    }
}

/// Number of positions where `typed` agrees with `target`.
/// Only the overlap is compared; chars past the end of `target` never match.
pub fn correct_chars(typed: &str, target: &str) -> usize {
    typed
        .chars()
        .zip(target.chars())
        .filter(|(typed, expected)| typed == expected)
        .count()
}

/// Rounded percentage of typed chars that match, 100 when nothing is typed
pub fn accuracy(typed: &str, target: &str) -> u32 {
    let typed_len = typed.chars().count();
    if typed_len == 0 {
        return 100;
    }

    ((correct_chars(typed, target) as f64 / typed_len as f64) * 100.0).round() as u32
}

/// Whitespace-delimited tokens in `typed`.
///
/// An empty or whitespace-only string still counts as a single word, so a
/// session that has only typed spaces reports a non-zero speed.
pub fn word_count(typed: &str) -> usize {
    typed.split_whitespace().count().max(1)
}

pub fn elapsed_minutes(started_at: Option<Instant>, now: Instant) -> f64 {
    match started_at {
        Some(start) => now.saturating_duration_since(start).as_secs_f64() / 60.0,
        None => 0.0,
    }
}

/// Words per minute since `started_at`, 0 when the clock has not started or
/// no time has passed yet.
pub fn wpm(typed: &str, started_at: Option<Instant>, now: Instant) -> u32 {
    let minutes = elapsed_minutes(started_at, now);
    if minutes <= 0.0 {
        return 0;
    }

    let wpm = (word_count(typed) as f64 / minutes).round();
    if wpm.is_finite() {
        wpm as u32
    } else {
        0
    }
}
