//! GPIO |     Function      |      Notes
//! -----+-------------------+----------------------------------
//!  3   | UART1 TX          | -> DFPlayer RX (1K series resistor)
//!  4   | UART1 RX          | <- DFPlayer TX
//!  5   | Button primary    | Active LOW, internal pullup
//!  6   | Button secondary  | Active LOW, internal pullup
//!  7   | RMT ch0           | WS2812 data in, 5x5 matrix (25 px)
//! 20   | UART0 RX          | USB serial console
//! 21   | UART0 TX          | USB serial console

// ----- DFPlayer Mini (UART1) -----
pub const PLAYER_TX: u8 = 3;
pub const PLAYER_RX: u8 = 4;
pub const PLAYER_BAUD: u32 = 9600;

// ----- Buttons -----
pub const BTN_PRIMARY: u8 = 5; // Digital, active LOW
pub const BTN_SECONDARY: u8 = 6; // Digital, active LOW

// ----- LED matrix -----
pub const LED_DATA: u8 = 7;
pub const RMT_FREQ_MHZ: u32 = 80;
