use std::time::{Duration, Instant};

/// Time-windowed rate limiter that coalesces calls.
///
/// Calls made while a window is open are not run; only the most recent one
/// is kept and becomes due once the window has elapsed (trailing edge).
/// With the leading edge enabled, a call that arrives when no window is
/// open runs immediately and opens a new window.
///
/// The throttle owns no timer. The caller passes `now` to every method and
/// is expected to [`poll`](Throttle::poll) again by [`deadline`](Throttle::deadline).
#[derive(Debug, Clone)]
pub struct Throttle<T> {
    window: Duration,
    leading: bool,
    last_run: Option<Instant>,
    pending: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    value: T,
    due: Instant,
}

impl<T> Throttle<T> {
    /// Trailing-edge throttle.
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            leading: false,
            last_run: None,
            pending: None,
        }
    }

    /// Throttle that also runs the first call of each window immediately.
    pub fn with_leading(window: Duration) -> Self {
        Self {
            leading: true,
            ..Self::new(window)
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Offer a call. Returns the value if it should run right now;
    /// otherwise it replaces any pending value and `None` is returned.
    pub fn call(&mut self, now: Instant, value: T) -> Option<T> {
        if self.window.is_zero() {
            self.last_run = Some(now);
            return Some(value);
        }

        if self.leading && self.pending.is_none() && self.window_closed(now) {
            self.last_run = Some(now);
            return Some(value);
        }

        let due = match &self.pending {
            Some(pending) => pending.due,
            None => self.next_due(now),
        };
        self.pending = Some(Pending { value, due });
        None
    }

    /// Take the pending value if its window has elapsed.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        if self.pending.as_ref()?.due > now {
            return None;
        }
        let pending = self.pending.take()?;
        self.last_run = Some(now);
        Some(pending.value)
    }

    /// Take the pending value regardless of its deadline.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|pending| pending.value)
    }

    /// Drop the pending value, if any.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    /// When the pending value becomes due.
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.due)
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    fn window_closed(&self, now: Instant) -> bool {
        match self.last_run {
            Some(last) => now.saturating_duration_since(last) >= self.window,
            None => true,
        }
    }

    fn next_due(&self, now: Instant) -> Instant {
        match (self.leading, self.last_run) {
            // Keep runs at least one window apart when the leading call
            // already used this window.
            (true, Some(last)) if !self.window_closed(now) => last + self.window,
            _ => now + self.window,
        }
    }
}
