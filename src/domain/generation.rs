//! Monotonic tokens stamped on async operations at issue time.
//!
//! A completion is applied only if its token is still the current one;
//! anything older was superseded and is dropped silently.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues generations. Starts at zero; the first issued token is #1.
#[derive(Debug, Default, Clone)]
pub struct GenerationCounter {
    current: u64,
}

impl GenerationCounter {
    /// Supersedes every previously issued token and returns the new current one.
    pub fn advance(&mut self) -> Generation {
        self.current += 1;
        Generation(self.current)
    }

    pub fn current(&self) -> Generation {
        Generation(self.current)
    }

    pub fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.current
    }
}

/// What happened to an async result when it came back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Token was current; the result was applied.
    Applied,
    /// Token was current; the result was a failure and was recorded as such.
    Failed,
    /// Token was superseded; the result was discarded.
    Stale,
}
