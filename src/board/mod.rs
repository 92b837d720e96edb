//! Pokédex box Board Support Package (BSP)
//!
//! Maps the physical hardware to named subsystems so that application
//! code doesn't need to know GPIO numbers or peripheral details.
//! Peripheral bring-up only exists when building for the ESP32-C3;
//! buttons, actions and the pin table are target independent.

pub mod action;
pub mod button;
pub mod pins;

#[cfg(target_arch = "riscv32")]
mod hw;

pub use action::{Action, map_event};
pub use button::Button;

#[cfg(target_arch = "riscv32")]
pub use hw::{AudioHw, Board, InputHw, LedHw, PlayerUart};
