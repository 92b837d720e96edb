// DFPlayer Mini MP3 module over UART (board-independent)
// 9600 8N1. Every command and reply is a fixed 10-byte frame:
//
//   7E FF 06 CMD FB PH PL CH CL EF
//
// FB = 1 asks the module to acknowledge with a 0x41 frame. CH:CL is
// the 16-bit two's complement of FF + 06 + CMD + FB + PH + PL.
//
// Default is fire-and-forget; with_ack() makes every command wait for
// the acknowledgement so a missing or faulty module shows up as an
// error instead of silence. Replies already sitting in the RX FIFO
// are drained and logged before each command goes out, so an ack
// wait never matches a stale frame.

use embedded_hal::delay::DelayNs;
use embedded_io::{Error as _, Read, ReadReady, Write};
use log::{debug, info, warn};

use super::audio::{AudioPlayer, MAX_VOLUME, PlayerError, Source};

pub const FRAME_LEN: usize = 10;
pub const DEFAULT_ACK_TIMEOUT_MS: u32 = 200;

const START: u8 = 0x7E;
const VERSION: u8 = 0xFF;
const LEN: u8 = 0x06;
const END: u8 = 0xEF;

// DFPlayer commands
mod cmd {
    pub const PLAY_TRACK: u8 = 0x03;
    pub const SET_VOLUME: u8 = 0x06;
    pub const SELECT_SOURCE: u8 = 0x09;
    pub const RESET: u8 = 0x0C;
    pub const RESUME: u8 = 0x0D;
    pub const PAUSE: u8 = 0x0E;
}

// module -> host
mod reply {
    pub const CARD_INSERTED: u8 = 0x3A;
    pub const CARD_REMOVED: u8 = 0x3B;
    pub const TRACK_FINISHED: u8 = 0x3D;
    pub const ONLINE: u8 = 0x3F;
    pub const ERROR: u8 = 0x40;
    pub const ACK: u8 = 0x41;
}

const fn source_code(source: Source) -> u16 {
    match source {
        Source::Usb => 1,
        Source::SdCard => 2,
        Source::Aux => 3,
        Source::Flash => 5,
    }
}

pub const fn checksum(command: u8, feedback: u8, param: u16) -> u16 {
    let sum = VERSION as u16
        + LEN as u16
        + command as u16
        + feedback as u16
        + (param >> 8)
        + (param & 0xFF);
    0u16.wrapping_sub(sum)
}

pub const fn encode(command: u8, param: u16, feedback: bool) -> [u8; FRAME_LEN] {
    let fb = feedback as u8;
    let sum = checksum(command, fb, param);
    [
        START,
        VERSION,
        LEN,
        command,
        fb,
        (param >> 8) as u8,
        param as u8,
        (sum >> 8) as u8,
        sum as u8,
        END,
    ]
}

/// A checksummed frame as received from the module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub command: u8,
    pub param: u16,
}

impl Frame {
    pub fn decode(buf: &[u8; FRAME_LEN]) -> Option<Self> {
        if buf[0] != START || buf[1] != VERSION || buf[2] != LEN || buf[9] != END {
            return None;
        }
        let param = u16::from_be_bytes([buf[5], buf[6]]);
        let sum = u16::from_be_bytes([buf[7], buf[8]]);
        if sum != checksum(buf[3], buf[4], param) {
            return None;
        }
        Some(Self {
            command: buf[3],
            param,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ack,
    /// Error code: 1 busy, 2 sleeping, 3 serial error, 4 checksum,
    /// 5 track out of range, 6 track not found, 8 card read failure
    Error(u8),
    /// Bitmask of online storage devices (bit 1 = SD)
    Online(u8),
    CardInserted,
    CardRemoved,
    TrackFinished(u16),
    Other(Frame),
}

impl From<Frame> for Reply {
    fn from(frame: Frame) -> Self {
        match frame.command {
            reply::ACK => Reply::Ack,
            reply::ERROR => Reply::Error(frame.param as u8),
            reply::ONLINE => Reply::Online(frame.param as u8),
            reply::CARD_INSERTED => Reply::CardInserted,
            reply::CARD_REMOVED => Reply::CardRemoved,
            reply::TRACK_FINISHED => Reply::TrackFinished(frame.param),
            _ => Reply::Other(frame),
        }
    }
}

pub struct DfPlayer<U, D> {
    uart: U,
    delay: D,
    ack: bool,
    ack_timeout_ms: u32,
    rx: [u8; FRAME_LEN],
    rx_len: usize,
}

impl<U, D> DfPlayer<U, D>
where
    U: Read + Write + ReadReady,
    D: DelayNs,
{
    pub fn new(uart: U, delay: D) -> Self {
        Self {
            uart,
            delay,
            ack: false,
            ack_timeout_ms: DEFAULT_ACK_TIMEOUT_MS,
            rx: [0; FRAME_LEN],
            rx_len: 0,
        }
    }

    /// Require an acknowledgement for every command.
    pub fn with_ack(mut self, timeout_ms: u32) -> Self {
        self.ack = true;
        self.ack_timeout_ms = timeout_ms;
        self
    }

    pub fn release(self) -> (U, D) {
        (self.uart, self.delay)
    }

    fn send(&mut self, command: u8, param: u16) -> Result<(), PlayerError> {
        self.drain_replies()?;

        let frame = encode(command, param, self.ack);
        self.uart.write_all(&frame).map_err(|e| {
            warn!("dfplayer: write {:#04x} failed: {:?}", command, e.kind());
            PlayerError::DeviceUnavailable
        })?;
        self.uart.flush().map_err(|e| {
            warn!("dfplayer: flush failed: {:?}", e.kind());
            PlayerError::DeviceUnavailable
        })?;

        if self.ack {
            self.wait_ack(command)
        } else {
            Ok(())
        }
    }

    fn wait_ack(&mut self, command: u8) -> Result<(), PlayerError> {
        let mut waited_ms = 0;
        loop {
            while let Some(r) = self.read_reply()? {
                match r {
                    Reply::Ack => return Ok(()),
                    Reply::Error(code) => {
                        warn!("dfplayer: {:#04x} rejected, error {}", command, code);
                        return Err(PlayerError::DeviceUnavailable);
                    }
                    other => log_notification(other),
                }
            }
            if waited_ms >= self.ack_timeout_ms {
                warn!("dfplayer: no ack for {:#04x} after {}ms", command, waited_ms);
                return Err(PlayerError::CommandTimeout);
            }
            self.delay.delay_ms(1);
            waited_ms += 1;
        }
    }

    /// Log every reply that is already buffered.
    pub fn drain_replies(&mut self) -> Result<(), PlayerError> {
        while let Some(r) = self.read_reply()? {
            log_notification(r);
        }
        Ok(())
    }

    /// Drain buffered bytes; returns a reply once a full frame is in.
    /// Never blocks.
    pub fn read_reply(&mut self) -> Result<Option<Reply>, PlayerError> {
        let unavailable = |e: U::Error| {
            warn!("dfplayer: read failed: {:?}", e.kind());
            PlayerError::DeviceUnavailable
        };

        while self.uart.read_ready().map_err(unavailable)? {
            let mut byte = [0u8; 1];
            if self.uart.read(&mut byte).map_err(unavailable)? == 0 {
                break;
            }
            if let Some(frame) = self.push_byte(byte[0]) {
                return Ok(Some(Reply::from(frame)));
            }
        }
        Ok(None)
    }

    fn push_byte(&mut self, byte: u8) -> Option<Frame> {
        // resync on the start marker
        if self.rx_len == 0 && byte != START {
            return None;
        }
        self.rx[self.rx_len] = byte;
        self.rx_len += 1;
        if self.rx_len < FRAME_LEN {
            return None;
        }
        self.rx_len = 0;

        let frame = Frame::decode(&self.rx);
        if frame.is_none() {
            debug!("dfplayer: dropped malformed frame {:02x?}", self.rx);
        }
        frame
    }
}

fn log_notification(r: Reply) {
    match r {
        Reply::Online(devices) => info!("dfplayer: online, devices {:#04b}", devices),
        Reply::CardInserted => info!("dfplayer: card inserted"),
        Reply::CardRemoved => warn!("dfplayer: card removed"),
        Reply::TrackFinished(track) => info!("dfplayer: track {} finished", track),
        other => debug!("dfplayer: {:?}", other),
    }
}

impl<U, D> AudioPlayer for DfPlayer<U, D>
where
    U: Read + Write + ReadReady,
    D: DelayNs,
{
    fn reset(&mut self) -> Result<(), PlayerError> {
        self.rx_len = 0;
        self.send(cmd::RESET, 0)
    }

    fn select_source(&mut self, source: Source) -> Result<(), PlayerError> {
        self.send(cmd::SELECT_SOURCE, source_code(source))
    }

    fn set_volume(&mut self, level: u8) -> Result<(), PlayerError> {
        self.send(cmd::SET_VOLUME, level.min(MAX_VOLUME) as u16)
    }

    fn play(&mut self, track: u16) -> Result<(), PlayerError> {
        self.send(cmd::PLAY_TRACK, track)
    }

    fn pause(&mut self) -> Result<(), PlayerError> {
        self.send(cmd::PAUSE, 0)
    }

    fn resume(&mut self) -> Result<(), PlayerError> {
        self.send(cmd::RESUME, 0)
    }
}
