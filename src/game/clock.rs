use std::time::Instant;

/// A source of "now" for the update loop.  The game samples it once per tick
/// so that timed behavior can be driven by a fake clock in tests.
pub(crate) trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MonotonicClock;

impl Clock for MonotonicClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to
#[cfg(test)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ManualClock {
    now: Instant,
}

#[cfg(test)]
impl ManualClock {
    pub(crate) fn new() -> ManualClock {
        ManualClock {
            now: Instant::now(),
        }
    }

    pub(crate) fn advance(&mut self, by: std::time::Duration) {
        self.now += by;
    }
}

#[cfg(test)]
impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now
    }
}
