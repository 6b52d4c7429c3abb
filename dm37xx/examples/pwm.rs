//! Ramps the GPTIMER10 PWM duty cycle from 0% to 100%, once per second.
//!
//! Run on the board with `sudo`.

use std::{thread, time::Duration};

use dm37xx::{clock, mmio::DevMem, padconf, timer::pwm, DM3730_GPT10};
use embedded_hal::PwmPin;

fn main() -> Result<(), dm37xx::Error> {
    let target = DM3730_GPT10;
    let mem = DevMem::open()?;

    {
        let mut cm = mem.map(target.clock_manager)?;
        clock::select_source(&mut cm, target.timer_clock, clock::Source::Sys);
        clock::enable_functional(&mut cm, target.timer_clock);
        clock::enable_interface(&mut cm, target.timer_clock);
    }

    {
        let mut scm = mem.map(target.system_control)?;
        padconf::configure(&mut scm, target.pad, target.pad_config);
    }

    // Set the pwm frequency.
    let config = pwm::Config {
        frequency: 1_000,
        clock: clock::SYS_CLK,
    };

    let mut pwm = config.make(mem.map(target.timer)?, 0.0);

    loop {
        for step in 0..=10 {
            pwm.set_duty(pwm.get_max_duty() * step as f32 / 10.0);
            thread::sleep(Duration::from_millis(100));
        }
    }
}
