// The fixed job sequence of one main-loop pass
//
// Every pass runs the same four jobs in order. Button polls block
// while their button is held, so nothing overlaps.

use crate::board::button::Button;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Job {
    RenderFrame,
    PollButton(Button),
    Settle,
}

/// One loop iteration, in execution order.
pub const CYCLE: [Job; 4] = [
    Job::RenderFrame,
    Job::PollButton(Button::Primary),
    Job::PollButton(Button::Secondary),
    Job::Settle,
];
