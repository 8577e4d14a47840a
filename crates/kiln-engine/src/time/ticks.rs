use web_time::{Duration, Instant};

/// Millisecond tick counter with a blocking delay.
///
/// This is the only clock the pacer reads. Implementations must be monotonic;
/// the counter is allowed to wrap.
pub trait TickSource {
    /// Milliseconds since an arbitrary fixed origin.
    fn ticks_ms(&self) -> u32;

    /// Blocks the calling thread for roughly `ms` milliseconds.
    fn delay_ms(&mut self, ms: u32);
}

/// Wall-clock tick source.
///
/// Natively the delay sleeps the thread. Browsers do not allow blocking the
/// main thread, so on wasm32 the delay spins until the deadline; the pacer
/// bounds it by one frame budget.
#[derive(Debug, Clone)]
pub struct SystemTicks {
    origin: Instant,
}

impl SystemTicks {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource for SystemTicks {
    fn ticks_ms(&self) -> u32 {
        // Truncation to u32 is the wrapping counter.
        self.origin.elapsed().as_millis() as u32
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn delay_ms(&mut self, ms: u32) {
        std::thread::sleep(Duration::from_millis(u64::from(ms)));
    }

    #[cfg(target_arch = "wasm32")]
    fn delay_ms(&mut self, ms: u32) {
        let deadline = Instant::now() + Duration::from_millis(u64::from(ms));
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}
