//! Starts a PWM on GPTIMER10 of the DM3730, output on pad `gpmc_ncs5` (GPIO_56).
//!
//! Run like: `sudo gpt-pwm 50`

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use dm37xx::{
    clock,
    mmio::{DevMem, Recorder, RegisterBlock, Window},
    padconf,
    timer::pwm,
    Target, DM3730_GPT10,
};

/// Exit code when the memory device can not be opened.
const EXIT_OPEN_FAILED: u8 = 255;

/// Exit code for any other failure.
const EXIT_FAILURE: u8 = 1;

#[derive(Debug, Parser)]
#[command(version, about = "Start a PWM on GPTIMER10 of the DM3730")]
struct Cli {
    /// Duty cycle in percent.
    #[arg(allow_negative_numbers = true)]
    duty_cycle: f32,
    /// PWM frequency in Hertz.
    #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
    frequency: u32,
    /// Timer functional clock.
    #[arg(long, value_enum, default_value_t = ClockSource::Sys13mhz)]
    clock: ClockSource,
    /// Log the register writes instead of programming the hardware.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClockSource {
    /// 13 MHz system clock.
    #[value(name = "sys-13mhz")]
    Sys13mhz,
    /// 32 kHz clock.
    #[value(name = "fclk-32khz")]
    Fclk32khz,
}

impl From<ClockSource> for clock::Source {
    fn from(source: ClockSource) -> Self {
        match source {
            ClockSource::Sys13mhz => clock::Source::Sys,
            ClockSource::Fclk32khz => clock::Source::Fclk32k,
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn exit_code(err: &anyhow::Error) -> u8 {
    match err.downcast_ref::<dm37xx::Error>() {
        Some(dm37xx::Error::OpenDevice { .. }) => EXIT_OPEN_FAILED,
        _ => EXIT_FAILURE,
    }
}

fn run(cli: &Cli) -> Result<()> {
    if !(0.0..=100.0).contains(&cli.duty_cycle) {
        log::warn!("duty cycle {}% is outside of 0..=100%", cli.duty_cycle);
    }

    let target = DM3730_GPT10;
    let source = clock::Source::from(cli.clock);
    let config = pwm::Config {
        frequency: cli.frequency,
        clock: source.frequency(),
    };

    if cli.dry_run {
        let mut cm = Recorder::new(target.clock_manager.len);
        let mut scm = Recorder::new(target.system_control.len);
        setup_clocks(&mut cm, &target, source);
        route_pad(&mut scm, &target);
        let pwm = config.make(Recorder::new(target.timer.len), cli.duty_cycle);
        log_started(&pwm);

        log_writes(target.clock_manager, &cm);
        log_writes(target.system_control, &scm);
        log_writes(target.timer, pwm.registers());
        return Ok(());
    }

    let mem = DevMem::open()?;

    {
        let mut cm = mem.map(target.clock_manager)?;
        setup_clocks(&mut cm, &target, source);
    }

    {
        let mut scm = mem.map(target.system_control)?;
        route_pad(&mut scm, &target);
    }

    let pwm = config.make(mem.map(target.timer)?, cli.duty_cycle);
    log_started(&pwm);

    Ok(())
}

/// Select the timer clock source and enable its functional and interface clocks.
fn setup_clocks(cm: &mut impl RegisterBlock, target: &Target, source: clock::Source) {
    clock::select_source(cm, target.timer_clock, source);
    log::info!("{} Hz clock source selected", source.frequency());

    clock::enable_functional(cm, target.timer_clock);
    log::info!("functional clock enabled");

    clock::enable_interface(cm, target.timer_clock);
    log::info!("interface clock enabled");
}

/// Route the timer PWM event to its pad.
fn route_pad(scm: &mut impl RegisterBlock, target: &Target) {
    padconf::configure(scm, target.pad, target.pad_config);
    log::info!("pad at {:#05x} configured for PWM", target.pad.offset);
}

fn log_started<R: RegisterBlock>(pwm: &pwm::Pwm<R>) {
    let values = pwm.values();
    log::info!(
        "PWM started: {} ticks per period, counter start {:#010x}, match {:#010x}",
        pwm.resolution(),
        values.counter_start,
        values.compare,
    );
}

fn log_writes(window: Window, regs: &Recorder) {
    for (offset, value) in regs.writes() {
        log::info!("{:#010x} <- {value:#010x}", window.base + *offset as u64);
    }
}
