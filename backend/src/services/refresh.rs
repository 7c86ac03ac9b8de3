#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    Advanced,
    Elapsed,
}

/// Tick counter behind the progress bar. Stays in `[0, max_ticks)`.
#[derive(Debug, Clone)]
pub struct RefreshCounter {
    ticks: u32,
    max_ticks: u32,
    interval_secs: u64,
}

impl RefreshCounter {
    /// One cycle spans `interval_secs` of ticks that are each `tick_millis` long.
    pub fn new(interval_secs: u64, tick_millis: u64) -> Self {
        let cycle_ticks = (interval_secs.saturating_mul(1000) / tick_millis.max(1)).max(1);
        let max_ticks = u32::try_from(cycle_ticks).unwrap_or(u32::MAX);
        RefreshCounter {
            ticks: 0,
            max_ticks,
            interval_secs,
        }
    }

    pub fn tick(&mut self) -> Tick {
        self.ticks += 1;
        if self.ticks >= self.max_ticks {
            self.ticks = 0;
            Tick::Elapsed
        } else {
            Tick::Advanced
        }
    }

    pub fn ticks(&self) -> u32 {
        self.ticks
    }

    pub fn max_ticks(&self) -> u32 {
        self.max_ticks
    }

    pub fn interval_secs(&self) -> u64 {
        self.interval_secs
    }

    pub fn progress(&self) -> f64 {
        self.ticks as f64 / self.max_ticks as f64
    }

    /// Bar colour, shading from blue towards cyan as the interval fills.
    pub fn color(&self) -> [u8; 3] {
        let ratio = self.progress();
        [0, (120.0 + ratio * 50.0) as u8, (215.0 + ratio * 40.0) as u8]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapses_once_per_interval_and_resets() {
        let mut counter = RefreshCounter::new(2, 100);
        assert_eq!(counter.max_ticks(), 20);

        let elapsed = (0..20).filter(|_| counter.tick() == Tick::Elapsed).count();
        assert_eq!(elapsed, 1);
        assert_eq!(counter.ticks(), 0);

        let elapsed = (0..40).filter(|_| counter.tick() == Tick::Elapsed).count();
        assert_eq!(elapsed, 2);
    }

    #[test]
    fn elapses_exactly_on_the_last_tick() {
        let mut counter = RefreshCounter::new(1, 250);
        assert_eq!(counter.tick(), Tick::Advanced);
        assert_eq!(counter.tick(), Tick::Advanced);
        assert_eq!(counter.tick(), Tick::Advanced);
        assert_eq!(counter.progress(), 0.75);
        assert_eq!(counter.tick(), Tick::Elapsed);
        assert_eq!(counter.progress(), 0.0);
    }

    #[test]
    fn color_shifts_with_progress() {
        let mut counter = RefreshCounter::new(1, 500);
        assert_eq!(counter.color(), [0, 120, 215]);
        counter.tick();
        assert_eq!(counter.color(), [0, 145, 235]);
    }

    #[test]
    fn zero_interval_still_has_one_tick() {
        let mut counter = RefreshCounter::new(0, 100);
        assert_eq!(counter.max_ticks(), 1);
        assert_eq!(counter.tick(), Tick::Elapsed);
    }

    #[test]
    fn cycle_matches_interval_for_uneven_tick_lengths() {
        for tick_millis in [100, 250, 300, 400, 5_000] {
            let counter = RefreshCounter::new(60, tick_millis);
            assert_eq!(
                counter.max_ticks() as u64 * tick_millis,
                60_000,
                "tick of {tick_millis}ms"
            );
        }
    }

    #[test]
    fn tick_longer_than_interval_elapses_every_tick() {
        let mut counter = RefreshCounter::new(1, 5_000);
        assert_eq!(counter.max_ticks(), 1);
        assert_eq!(counter.tick(), Tick::Elapsed);
    }

    #[test]
    fn huge_interval_saturates() {
        let counter = RefreshCounter::new(u64::MAX, 1);
        assert_eq!(counter.max_ticks(), u32::MAX);
    }
}
