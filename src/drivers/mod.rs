// Hardware drivers: chip-level and protocol-level, board-independent.
//
// Each module is generic over embedded-hal / embedded-io / smart-leds
// traits; only pin assignments and peripheral setup (in board/) are
// board-specific.

pub mod audio;
pub mod dfplayer;
pub mod input;
pub mod matrix;
