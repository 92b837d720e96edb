// ESP32-C3 peripheral bring-up
//
// Everything here runs once at boot; the handles live for the whole
// program. Failures are fatal because nothing works without them.

use esp_hal::{
    Blocking,
    gpio::{Input, InputConfig, Pull},
    peripherals::{GPIO7, Peripherals},
    rmt::Rmt,
    time::Rate,
    uart::{self, Uart},
};
use log::info;

use super::button::Button;
use super::pins;

// Type Aliases
pub type PlayerUart = Uart<'static, Blocking>;

// Hardware Bundles
/// Input subsystem hardware: the two pulled-up push-buttons.
pub struct InputHw {
    pub primary: Input<'static>,
    pub secondary: Input<'static>,
}

/// Audio subsystem hardware: serial link to the DFPlayer Mini.
pub struct AudioHw {
    pub uart: PlayerUart,
}

/// LED subsystem hardware: RMT peripheral and the matrix data pin.
/// The smart-LED adapter is built in main because it borrows a
/// 'static pulse buffer.
pub struct LedHw {
    pub rmt: Rmt<'static, Blocking>,
    pub data: GPIO7<'static>,
}

/// Complete board hardware, ready for driver initialization.
pub struct Board {
    pub input: InputHw,
    pub audio: AudioHw,
    pub leds: LedHw,
}

impl Board {
    pub fn init(p: Peripherals) -> Self {
        let input = InputHw {
            primary: Input::new(p.GPIO5, InputConfig::default().with_pull(Pull::Up)),
            secondary: Input::new(p.GPIO6, InputConfig::default().with_pull(Pull::Up)),
        };
        for button in Button::ALL {
            info!("button {} on GPIO{}", button, button.gpio());
        }

        let uart_cfg = uart::Config::default().with_baudrate(pins::PLAYER_BAUD);
        let uart = Uart::new(p.UART1, uart_cfg)
            .expect("UART1 config rejected")
            .with_tx(p.GPIO3)
            .with_rx(p.GPIO4);
        info!(
            "player uart: tx GPIO{} rx GPIO{} @ {} baud",
            pins::PLAYER_TX,
            pins::PLAYER_RX,
            pins::PLAYER_BAUD
        );

        let rmt = Rmt::new(p.RMT, Rate::from_mhz(pins::RMT_FREQ_MHZ))
            .expect("RMT init failed");
        info!("led matrix: GPIO{}", pins::LED_DATA);

        Board {
            input,
            audio: AudioHw { uart },
            leds: LedHw { rmt, data: p.GPIO7 },
        }
    }
}
