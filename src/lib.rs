// Firmware for the Pokédex box (ESP32-C3, DFPlayer Mini, 5x5 WS2812)

#![cfg_attr(not(test), no_std)]

pub mod apps;
pub mod board;
pub mod config;
pub mod drivers;
pub mod kernel;
