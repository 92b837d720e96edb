// Timekeeping and job sequencing
// Single core, no preemption. WFI idles the CPU between timer ticks.
//
// Clock: monotonic ms time plus sleep, backed by the tick ISR on
// hardware and by a simulated clock in tests.

pub mod clock;
pub mod job;
pub mod wake;

pub use clock::{Clock, Millis, TickClock, elapsed_ms};
pub use job::{CYCLE, Job};
