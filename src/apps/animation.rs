// Row-by-row paint-in of the Pokéball on the 5x5 matrix.
//
// Each pass starts from a dark frame, then lights one row at a time
// top to bottom, flushing and pausing after every row. The bitmap is
// stored flipped vertically so row 0 lands on LED 0.

use log::warn;
use smart_leds::{RGB8, SmartLedsWrite};

use crate::drivers::matrix::{LedMatrix, MATRIX_SIDE, OFF, index_of};
use crate::kernel::clock::Clock;

pub type Bitmap = [[RGB8; MATRIX_SIDE]; MATRIX_SIDE];

pub const RED: RGB8 = RGB8 { r: 40, g: 0, b: 0 };
pub const WHITE: RGB8 = RGB8 { r: 35, g: 35, b: 35 };

#[rustfmt::skip]
pub const POKEBALL: Bitmap = [
    [OFF,   WHITE, WHITE, WHITE, OFF  ],
    [WHITE, WHITE, WHITE, WHITE, WHITE],
    [RED,   RED,   WHITE, RED,   RED  ],
    [RED,   RED,   RED,   RED,   RED  ],
    [OFF,   RED,   RED,   RED,   OFF  ],
];

pub struct Animator<W> {
    matrix: LedMatrix<W>,
    row_delay_ms: u32,
}

impl<W> Animator<W>
where
    W: SmartLedsWrite,
    W::Color: From<RGB8>,
{
    pub fn new(leds: W, row_delay_ms: u32) -> Self {
        Self {
            matrix: LedMatrix::new(leds),
            row_delay_ms,
        }
    }

    pub fn matrix(&self) -> &LedMatrix<W> {
        &self.matrix
    }

    /// One full pass; blocks for MATRIX_SIDE row delays.
    pub fn paint_in<C: Clock>(&mut self, clock: &mut C) {
        self.matrix.clear();
        for (row, colors) in POKEBALL.iter().enumerate() {
            for (col, &color) in colors.iter().enumerate() {
                self.matrix.set_pixel(index_of(row, col), color);
            }
            if self.matrix.flush().is_err() {
                warn!("leds: flush failed on row {}", row);
            }
            clock.sleep_ms(self.row_delay_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::matrix::PIXEL_COUNT;
    use crate::kernel::clock::Millis;
    use std::vec::Vec;

    #[derive(Default)]
    struct Capture {
        writes: Vec<Vec<RGB8>>,
    }

    impl SmartLedsWrite for Capture {
        type Error = ();
        type Color = RGB8;

        fn write<T, I>(&mut self, iterator: T) -> Result<(), ()>
        where
            T: IntoIterator<Item = I>,
            I: Into<RGB8>,
        {
            self.writes.push(iterator.into_iter().map(Into::into).collect());
            Ok(())
        }
    }

    struct StepClock {
        now: Millis,
        sleeps: Vec<u32>,
    }

    impl Clock for StepClock {
        fn now_ms(&self) -> Millis {
            self.now
        }

        fn sleep_ms(&mut self, ms: u32) {
            self.sleeps.push(ms);
            self.now += ms;
        }
    }

    fn clock() -> StepClock {
        StepClock {
            now: 0,
            sleeps: Vec::new(),
        }
    }

    #[test]
    fn rows_appear_one_flush_at_a_time() {
        let mut anim = Animator::new(Capture::default(), 100);
        let mut clk = clock();
        anim.paint_in(&mut clk);

        let writes = &anim.matrix().leds().writes;
        assert_eq!(writes.len(), MATRIX_SIDE);
        for (k, frame) in writes.iter().enumerate() {
            assert_eq!(frame.len(), PIXEL_COUNT);
            for (i, &px) in frame.iter().enumerate() {
                let (row, col) = (i / MATRIX_SIDE, i % MATRIX_SIDE);
                let expected = if row <= k { POKEBALL[row][col] } else { OFF };
                assert_eq!(px, expected, "flush {k} pixel {i}");
            }
        }
        assert_eq!(clk.sleeps, [100; MATRIX_SIDE]);
        assert_eq!(clk.now, 500);
    }

    #[test]
    fn every_pass_restarts_from_dark() {
        let mut anim = Animator::new(Capture::default(), 100);
        let mut clk = clock();
        anim.paint_in(&mut clk);
        anim.paint_in(&mut clk);

        let writes = &anim.matrix().leds().writes;
        assert_eq!(writes.len(), 2 * MATRIX_SIDE);
        // first flush of the second pass shows only row 0
        assert!(writes[MATRIX_SIDE][MATRIX_SIDE..].iter().all(|&p| p == OFF));
        assert_eq!(anim.matrix().frame().pixels()[..], writes[9][..]);
    }

    #[test]
    fn flush_errors_do_not_stop_the_pass() {
        struct Broken(u32);
        impl SmartLedsWrite for Broken {
            type Error = ();
            type Color = RGB8;
            fn write<T, I>(&mut self, _: T) -> Result<(), ()>
            where
                T: IntoIterator<Item = I>,
                I: Into<RGB8>,
            {
                self.0 += 1;
                Err(())
            }
        }

        let mut anim = Animator::new(Broken(0), 100);
        let mut clk = clock();
        anim.paint_in(&mut clk);
        assert_eq!(anim.matrix().leds().0, 5);
        assert_eq!(clk.now, 500);
    }
}
