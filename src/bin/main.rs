// pokedex-player entry point
//
// Boot sequence: logger -> tick timer -> board -> drivers -> player boot
// Main loop: Jukebox::run, never returns.
//
// The 10ms tick timer is the only interrupt. It advances uptime and
// wakes the core from WFI; all sleeping in the loop goes through
// TickClock.

#![no_std]
#![no_main]

use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::rmt::PulseCode;
use esp_hal::time::Duration;
use esp_hal::timer::PeriodicTimer;
use esp_hal::timer::timg::TimerGroup;
use esp_hal_smartled::SmartLedsAdapter;
use log::info;
use static_cell::StaticCell;

use core::cell::RefCell;
use critical_section::Mutex;

use pokedex_player::apps::Jukebox;
use pokedex_player::board::Board;
use pokedex_player::config::Config;
use pokedex_player::drivers::dfplayer::DfPlayer;
use pokedex_player::drivers::matrix::PIXEL_COUNT;
use pokedex_player::kernel::TickClock;
use pokedex_player::kernel::wake::{self, TICK_MS, signal_timer};

esp_bootloader_esp_idf::esp_app_desc!();

// 24 pulses per LED plus the end marker
const RMT_BUFFER_SIZE: usize = PIXEL_COUNT * 24 + 1;

static RMT_BUFFER: StaticCell<[PulseCode; RMT_BUFFER_SIZE]> = StaticCell::new();

static TIMER0: Mutex<RefCell<Option<PeriodicTimer<'static, esp_hal::Blocking>>>> =
    Mutex::new(RefCell::new(None));

#[esp_hal::handler(priority = esp_hal::interrupt::Priority::Priority1)]
fn timer0_handler() {
    critical_section::with(|cs| {
        if let Some(timer) = TIMER0.borrow_ref_mut(cs).as_mut() {
            timer.clear_interrupt();
        }
    });
    signal_timer();
}

#[esp_hal::main]
fn main() -> ! {
    esp_println::logger::init_logger_from_env();
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    info!("booting...");

    let timg0 = TimerGroup::new(unsafe { peripherals.TIMG0.clone_unchecked() });
    let mut timer0 = PeriodicTimer::new(timg0.timer0);
    critical_section::with(|cs| {
        timer0.set_interrupt_handler(timer0_handler);
        timer0
            .start(Duration::from_millis(TICK_MS as u64))
            .expect("tick timer start");
        timer0.listen();
        TIMER0.borrow_ref_mut(cs).replace(timer0);
    });
    info!("timer initialized ({}ms tick).", TICK_MS);

    let board = Board::init(peripherals);
    info!("hardware initialized.");

    let settings = Config::defaults();

    let mut player = DfPlayer::new(board.audio.uart, Delay::new());
    if settings.player_ack {
        player = player.with_ack(settings.ack_timeout_ms);
    }

    let rmt_buffer = RMT_BUFFER.init([PulseCode::default(); RMT_BUFFER_SIZE]);
    let leds = SmartLedsAdapter::new(board.leds.rmt.channel0, board.leds.data, rmt_buffer);

    let mut jukebox = Jukebox::new(
        player,
        leds,
        board.input.primary,
        board.input.secondary,
        TickClock::new(),
        settings,
    );

    jukebox.boot();
    info!("ready after {}s.", wake::uptime_secs());

    jukebox.run()
}
