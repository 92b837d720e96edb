// Tick signaling between the timer ISR and the main loop
//
// The timer ISR calls signal_timer() every TICK_MS; the main loop
// reads uptime and parks between ticks with WFI. Critical section
// guards the counter because riscv32imc has no atomic RMW.

/// Period of the hardware tick that drives uptime and sleeping.
pub const TICK_MS: u32 = 10;

// cs: riscv32imc has no atomic add
static UPTIME_TICKS: critical_section::Mutex<core::cell::Cell<u32>> =
    critical_section::Mutex::new(core::cell::Cell::new(0));

#[inline]
pub fn signal_timer() {
    critical_section::with(|cs| {
        let ticks = UPTIME_TICKS.borrow(cs);
        ticks.set(ticks.get().wrapping_add(1));
    });
}

pub fn uptime_ticks() -> u32 {
    critical_section::with(|cs| UPTIME_TICKS.borrow(cs).get())
}

pub fn uptime_ms() -> u32 {
    uptime_ticks().wrapping_mul(TICK_MS)
}

pub fn uptime_secs() -> u32 {
    uptime_ticks() / (1000 / TICK_MS)
}

#[inline]
pub fn wait_for_interrupt() {
    #[cfg(target_arch = "riscv32")]
    unsafe {
        core::arch::asm!("wfi", options(nomem, nostack));
    }

    #[cfg(not(target_arch = "riscv32"))]
    {
        core::hint::spin_loop();
    }
}
