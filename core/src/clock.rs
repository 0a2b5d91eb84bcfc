use crate::animation::Millis;

/// Turns readings of a free running, wrapping millisecond counter into tick
/// deltas.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickClock {
    last: Option<u32>,
}

impl TickClock {
    pub const fn new() -> Self {
        Self { last: None }
    }

    /// Time since the previous call. The first call yields zero.
    pub fn advance(&mut self, now: u32) -> Millis {
        let delta = match self.last {
            Some(last) => now.wrapping_sub(last),
            None => 0,
        };
        self.last = Some(now);
        delta
    }

    /// Forget the previous reading, e.g. after the device slept.
    pub fn reset(&mut self) {
        self.last = None;
    }
}
