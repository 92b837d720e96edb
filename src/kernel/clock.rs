// Monotonic millisecond clock
//
// Everything that waits goes through Clock so the blocking paths
// (button hold, row delay, loop settle) can run against simulated
// time in tests. Timestamps are u32 ms and wrap after ~49 days;
// always compare through elapsed_ms().

use super::wake;

/// Milliseconds since boot, wrapping.
pub type Millis = u32;

pub trait Clock {
    fn now_ms(&self) -> Millis;

    fn sleep_ms(&mut self, ms: u32);
}

/// Milliseconds from `a` to `b`, tolerating one wrap of the counter.
#[inline]
pub const fn elapsed_ms(a: Millis, b: Millis) -> u32 {
    b.wrapping_sub(a)
}

/// Clock driven by the periodic timer interrupt.
///
/// `now_ms` has tick resolution; `sleep_ms` parks the core with WFI
/// between ticks, so a sleep shorter than one tick still lasts until
/// the next tick edge.
#[derive(Default, Clone, Copy)]
pub struct TickClock;

impl TickClock {
    pub const fn new() -> Self {
        Self
    }
}

impl Clock for TickClock {
    fn now_ms(&self) -> Millis {
        wake::uptime_ms()
    }

    fn sleep_ms(&mut self, ms: u32) {
        let start = self.now_ms();
        while elapsed_ms(start, self.now_ms()) < ms {
            wake::wait_for_interrupt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_survives_wrap() {
        assert_eq!(elapsed_ms(10, 25), 15);
        assert_eq!(elapsed_ms(u32::MAX - 4, 5), 10);
        assert_eq!(elapsed_ms(7, 7), 0);
    }
}
