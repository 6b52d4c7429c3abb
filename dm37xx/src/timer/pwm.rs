//! PWM output of a GP timer.
//!
//! The counter counts up from `u32::MAX - resolution` and reloads on overflow, which
//! sets the period. The match register toggles the output part way through the ramp,
//! which sets the duty cycle.
//!
//! Example usage:
//!
//! ```
//! use dm37xx::mmio::Recorder;
//! use dm37xx::timer::pwm;
//!
//! let config = pwm::Config { frequency: 10_000, clock: 13_000_000 };
//! let pwm = config.make(Recorder::new(0x1000), 50.0);
//! assert_eq!(pwm.resolution(), 1300);
//! assert_eq!(pwm.values().compare, u32::MAX - 650);
//! ```

use embedded_hal::PwmPin;

use super::gpt::{Tclr, TCLR, TCRR, TLDR, TMAR};
use crate::mmio::RegisterBlock;

/// Overflow value of the counter.
const OVERFLOW: u32 = u32::MAX;

/// Match and reload values must stay at least this far below [OVERFLOW] (TRM 16.2.4.6).
const OVERFLOW_GUARD: u32 = 2;

/// Number of clock ticks in one PWM period.
///
/// Computed through the reciprocal periods, truncated towards zero. Both frequencies
/// must be non-zero.
#[inline]
pub fn calc_resolution(pwm_frequency: u32, clock_frequency: u32) -> u32 {
    let pwm_period = 1.0 / pwm_frequency as f64;
    let clock_period = 1.0 / clock_frequency as f64;
    (pwm_period / clock_period) as u32
}

/// Counter start and match values for a PWM.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerValues {
    /// Loaded into the counter and the reload register.
    pub counter_start: u32,
    /// Loaded into the match register.
    pub compare: u32,
}

impl TimerValues {
    /// Values for `resolution` ticks per period at `duty_cycle` percent.
    ///
    /// The duty cycle is not range checked. Both values are clamped to
    /// `u32::MAX - 2`.
    pub fn new(resolution: u32, duty_cycle: f32) -> Self {
        let duty = duty_cycle / 100.0;
        let mut counter_start = OVERFLOW - resolution;
        let mut compare = OVERFLOW - (resolution as f32 * duty) as u32;

        if OVERFLOW - compare <= OVERFLOW_GUARD {
            compare = OVERFLOW - OVERFLOW_GUARD;
        }

        // Only reached for a resolution of two ticks or less.
        if OVERFLOW - counter_start <= OVERFLOW_GUARD {
            counter_start = OVERFLOW - OVERFLOW_GUARD;
        }

        Self {
            counter_start,
            compare,
        }
    }
}

/// Program the timer for a PWM and start it.
///
/// The timer is stopped before its counter, reload and match registers are written.
pub fn configure_timer(gpt: &mut impl RegisterBlock, resolution: u32, duty_cycle: f32) {
    let values = TimerValues::new(resolution, duty_cycle);

    gpt.write_register(TCLR, 0);
    gpt.write_register(TCRR, values.counter_start);
    gpt.write_register(TLDR, values.counter_start);
    gpt.write_register(TMAR, values.compare);
    gpt.write_register(TCLR, Tclr::PWM.bits());

    log::debug!(
        "timer started: resolution {resolution}, duty {duty_cycle}%, start {:#010x}, match {:#010x}",
        values.counter_start,
        values.compare,
    );
}

/// PWM frequency setup.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Config {
    /// PWM frequency in Hertz.
    pub frequency: u32,
    /// Timer functional clock in Hertz.
    pub clock: u32,
}

impl Config {
    #[inline]
    pub fn resolution(&self) -> u32 {
        calc_resolution(self.frequency, self.clock)
    }

    /// Program the timer and return the running [Pwm].
    #[inline]
    pub fn make<R: RegisterBlock>(self, gpt: R, duty_cycle: f32) -> Pwm<R> {
        Pwm::new(gpt, self, duty_cycle)
    }
}

/// Running PWM on a GP timer.
///
/// The duty cycle is expressed in percent, see [PwmPin].
#[derive(Debug)]
pub struct Pwm<R> {
    gpt: R,
    resolution: u32,
    duty_cycle: f32,
}

impl<R: RegisterBlock> Pwm<R> {
    pub fn new(mut gpt: R, config: Config, duty_cycle: f32) -> Self {
        let resolution = config.resolution();
        configure_timer(&mut gpt, resolution, duty_cycle);
        Self {
            gpt,
            resolution,
            duty_cycle,
        }
    }

    /// Clock ticks per period.
    #[inline]
    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Values the timer was last programmed with.
    #[inline]
    pub fn values(&self) -> TimerValues {
        TimerValues::new(self.resolution, self.duty_cycle)
    }

    #[inline]
    pub fn read_counter_value(&self) -> u32 {
        self.gpt.read_register(TCRR)
    }

    #[inline]
    pub fn registers(&self) -> &R {
        &self.gpt
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.gpt
    }
}

impl<R: RegisterBlock> PwmPin for Pwm<R> {
    type Duty = f32;

    fn disable(&mut self) {
        self.gpt.write_register(TCLR, 0);
    }

    fn enable(&mut self) {
        self.gpt.write_register(TCLR, Tclr::PWM.bits());
    }

    fn get_duty(&self) -> f32 {
        self.duty_cycle
    }

    fn get_max_duty(&self) -> f32 {
        100.0
    }

    /// Reprograms and restarts the timer.
    fn set_duty(&mut self, duty: f32) {
        self.duty_cycle = duty;
        configure_timer(&mut self.gpt, self.resolution, duty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::Recorder;

    const MAX: u32 = u32::MAX;

    #[test]
    fn resolution_exact_divisors() {
        assert_eq!(calc_resolution(10_000, 13_000_000), 1300);
        assert_eq!(calc_resolution(1_000, 13_000_000), 13_000);
        assert_eq!(calc_resolution(50, 13_000_000), 260_000);
        assert_eq!(calc_resolution(1_000, 32_000), 32);
        assert_eq!(calc_resolution(1, 1), 1);
    }

    #[test]
    fn resolution_truncates() {
        assert_eq!(calc_resolution(10_000, 32_000), 3);
        assert_eq!(calc_resolution(7, 13_000_000), 1_857_142);
        assert_eq!(calc_resolution(30, 32_000), 1066);
    }

    #[test]
    fn resolution_rounds_through_reciprocals() {
        // (1/3) / (1/33) lands just below 11.
        assert_eq!(calc_resolution(3, 33), 10);
        assert_eq!(calc_resolution(9, 45), 4);
        assert_eq!(calc_resolution(1, 93), 92);
    }

    #[test]
    fn half_duty_at_10khz() {
        let values = TimerValues::new(1300, 50.0);
        assert_eq!(values.counter_start, MAX - 1300);
        assert_eq!(values.compare, MAX - 650);
    }

    #[test]
    fn full_and_empty_duty() {
        let values = TimerValues::new(1300, 100.0);
        assert_eq!(values.compare, values.counter_start);

        let values = TimerValues::new(1300, 0.0);
        assert_eq!(values.compare, MAX - 2);
        assert_eq!(values.counter_start, MAX - 1300);
    }

    #[test]
    fn duty_truncates() {
        // 1300 * 0.333 = 432.9
        assert_eq!(TimerValues::new(1300, 33.3).compare, MAX - 432);
    }

    #[test]
    fn clamp_at_tiny_resolutions() {
        for resolution in 0..=2 {
            let values = TimerValues::new(resolution, 0.0);
            assert_eq!(values.compare, MAX - 2, "resolution {resolution}");
            assert_eq!(values.counter_start, MAX - 2, "resolution {resolution}");

            let values = TimerValues::new(resolution, 100.0);
            assert_eq!(values.compare, MAX - 2, "resolution {resolution}");
            assert_eq!(values.counter_start, MAX - 2, "resolution {resolution}");
        }

        let values = TimerValues::new(3, 0.0);
        assert_eq!(values.compare, MAX - 2);
        assert_eq!(values.counter_start, MAX - 3);

        let values = TimerValues::new(3, 100.0);
        assert_eq!(values.compare, MAX - 3);
        assert_eq!(values.counter_start, MAX - 3);

        // 3 * 0.5 = 1.5 truncates into the guard band.
        assert_eq!(TimerValues::new(3, 50.0).compare, MAX - 2);
    }

    #[test]
    fn compare_stays_within_period() {
        let resolutions = [0, 1, 2, 3, 4, 10, 32, 1300, 13_000, 260_000, 1 << 20];
        for resolution in resolutions {
            for step in 0..=200 {
                let duty = step as f32 * 0.5;
                let values = TimerValues::new(resolution, duty);
                assert!(
                    values.counter_start <= values.compare,
                    "resolution {resolution}, duty {duty}"
                );
                assert!(MAX - values.compare >= 2, "resolution {resolution}, duty {duty}");
                assert!(MAX - values.counter_start >= 2);
            }
        }
    }

    #[test]
    fn out_of_range_duty_does_not_panic() {
        assert_eq!(TimerValues::new(1300, -10.0).compare, MAX - 2);
        assert_eq!(TimerValues::new(1300, 150.0).compare, MAX - 1950);
    }

    #[test]
    fn register_write_order() {
        let mut gpt = Recorder::new(0x1000);
        configure_timer(&mut gpt, 1300, 50.0);
        assert_eq!(
            gpt.writes(),
            &[
                (TCLR, 0),
                (TCRR, MAX - 1300),
                (TLDR, MAX - 1300),
                (TMAR, MAX - 650),
                (TCLR, 0x1000 | 0x800 | 0x80 | 0x40 | 0x02 | 0x01),
            ]
        );
    }

    #[test]
    fn clamped_values_are_written() {
        let mut gpt = Recorder::new(0x1000);
        configure_timer(&mut gpt, 1, 50.0);
        assert_eq!(gpt.read_register(TCRR), MAX - 2);
        assert_eq!(gpt.read_register(TLDR), MAX - 2);
        assert_eq!(gpt.read_register(TMAR), MAX - 2);
    }

    #[test]
    fn end_to_end_10khz_from_sys_clock() {
        let config = Config {
            frequency: 10_000,
            clock: 13_000_000,
        };
        let pwm = config.make(Recorder::new(0x1000), 50.0);
        assert_eq!(pwm.resolution(), 1300);
        assert_eq!(pwm.read_counter_value(), MAX - 1300);

        let gpt = pwm.into_inner();
        assert_eq!(gpt.writes().len(), 5);
        assert_eq!(gpt.read_register(TMAR), MAX - 650);
        assert_eq!(gpt.read_register(TCLR), Tclr::PWM.bits());
    }

    #[test]
    fn pwm_pin_interface() {
        let config = Config {
            frequency: 10_000,
            clock: 13_000_000,
        };
        let mut pwm = config.make(Recorder::new(0x1000), 50.0);
        assert_eq!(pwm.get_max_duty(), 100.0);
        assert_eq!(pwm.get_duty(), 50.0);

        pwm.disable();
        assert_eq!(pwm.registers().read_register(TCLR), 0);
        pwm.enable();
        assert_eq!(pwm.registers().read_register(TCLR), 0x18c3);

        pwm.set_duty(25.0);
        assert_eq!(pwm.get_duty(), 25.0);
        assert_eq!(pwm.values().compare, MAX - 325);
        assert_eq!(pwm.registers().read_register(TMAR), MAX - 325);

        let writes = pwm.registers().writes();
        assert_eq!(writes.len(), 12);
        assert_eq!(writes[7], (TCLR, 0));
        assert_eq!(writes[11], (TCLR, 0x18c3));
    }
}
