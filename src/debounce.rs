//! Trailing-edge debouncing for query updates.

use std::time::{Duration, Instant};
use tracing::debug;

/// Handle for one armed debounce window.
///
/// Each call to [`Debouncer::schedule`] bumps an internal generation counter
/// and returns a token carrying it. Firing a token from a superseded window
/// is a no-op, so at most one outstanding timer can ever commit, and a host
/// callback that arrives late does nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerToken(u64);

/// Coalesces rapid query updates into a single commit after a quiescence
/// window.
///
/// The debouncer never blocks and owns no timer thread: `schedule` returns
/// the deadline at which the host should call back with the token, and
/// `fire` consumes the pending query only when the token is still current.
/// Dropping the owning engine cancels everything implicitly, because firing
/// requires exclusive access to it.
#[derive(Debug)]
pub struct Debouncer {
  window: Duration,
  generation: u64,
  pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
  query: String,
  deadline: Instant,
}

impl Debouncer {
  /// Create a debouncer with the given quiescence window.
  pub fn new(window: Duration) -> Self {
    Self {
      window,
      generation: 0,
      pending: None,
    }
  }

  /// Arm the window for `query`, superseding any pending value.
  ///
  /// Returns the token the host must fire with, and the deadline at which
  /// to fire it. Tokens from earlier calls stop working immediately.
  pub fn schedule(&mut self, query: impl Into<String>, now: Instant) -> (TimerToken, Instant) {
    self.generation += 1;
    let deadline = now + self.window;
    self.pending = Some(Pending {
      query: query.into(),
      deadline,
    });
    (TimerToken(self.generation), deadline)
  }

  /// Consume the pending query if `token` is still current.
  pub fn fire(&mut self, token: TimerToken) -> Option<String> {
    if token.0 != self.generation {
      return None;
    }
    self.pending.take().map(|pending| pending.query)
  }

  /// Discard the pending query and invalidate all outstanding tokens.
  pub fn cancel(&mut self) {
    if self.pending.take().is_some() {
      debug!("cancelled pending debounce");
    }
    self.generation += 1;
  }

  /// The configured quiescence window.
  pub fn window(&self) -> Duration {
    self.window
  }

  /// Deadline of the pending window, if one is armed.
  pub fn deadline(&self) -> Option<Instant> {
    self.pending.as_ref().map(|pending| pending.deadline)
  }

  /// Whether a window is currently armed.
  pub fn is_pending(&self) -> bool {
    self.pending.is_some()
  }
}
