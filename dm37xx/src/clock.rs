//! Core clock manager (CM_CORE) setup.
//!
//! Every operation is a read-modify-write, bits belonging to other peripherals are
//! left untouched.

use crate::mmio::RegisterBlock;

/// SYS_CLK speed in Hertz.
pub const SYS_CLK: u32 = 13_000_000;

/// 32K_FCLK speed in Hertz.
pub const FCLK_32K: u32 = 32_000;

/// Functional clock enable register.
pub const CM_FCLKEN1_CORE: usize = 0xa00;

/// Interface clock enable register.
pub const CM_ICLKEN1_CORE: usize = 0xa10;

/// Clock select register.
pub const CM_CLKSEL_CORE: usize = 0xa40;

/// Functional clock source of a GP timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Source {
    /// 13 MHz system clock.
    Sys,
    /// 32 kHz clock.
    Fclk32k,
}

impl Source {
    /// Clock speed in Hertz.
    #[inline]
    pub fn frequency(self) -> u32 {
        match self {
            Self::Sys => SYS_CLK,
            Self::Fclk32k => FCLK_32K,
        }
    }
}

/// Clock manager bits belonging to one GP timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimerClock {
    /// `CLKSEL_GPTx` bit in [CM_CLKSEL_CORE]. Set selects [Source::Sys].
    pub clksel: u32,
    /// `EN_GPTx` bit in [CM_FCLKEN1_CORE] and [CM_ICLKEN1_CORE].
    pub enable: u32,
}

/// GPTIMER10 clock bits.
pub const GPT10: TimerClock = TimerClock {
    clksel: 1 << 6,
    enable: 1 << 11,
};

/// Select the functional clock source of the timer.
#[inline]
pub fn select_source(cm: &mut impl RegisterBlock, timer: TimerClock, source: Source) {
    cm.modify_register(CM_CLKSEL_CORE, |value| match source {
        Source::Sys => value | timer.clksel,
        Source::Fclk32k => value & !timer.clksel,
    });
    log::debug!("timer clock source: {source:?}");
}

/// Enable the functional clock of the timer.
#[inline]
pub fn enable_functional(cm: &mut impl RegisterBlock, timer: TimerClock) {
    cm.modify_register(CM_FCLKEN1_CORE, |value| value | timer.enable);
}

/// Enable the interface clock of the timer.
#[inline]
pub fn enable_interface(cm: &mut impl RegisterBlock, timer: TimerClock) {
    cm.modify_register(CM_ICLKEN1_CORE, |value| value | timer.enable);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mmio::Recorder;

    fn cm() -> Recorder {
        Recorder::new(0x1000)
            .with_value(CM_CLKSEL_CORE, 0x0000_130a)
            .with_value(CM_FCLKEN1_CORE, 0x0300_0000)
            .with_value(CM_ICLKEN1_CORE, 0x0000_0042)
    }

    #[test]
    fn select_sys_clock_sets_only_clksel_bit() {
        let mut cm = cm();
        select_source(&mut cm, GPT10, Source::Sys);
        assert_eq!(cm.writes(), &[(CM_CLKSEL_CORE, 0x0000_134a)]);
    }

    #[test]
    fn select_32k_clock_clears_clksel_bit() {
        let mut cm = Recorder::new(0x1000).with_value(CM_CLKSEL_CORE, 0xffff_ffff);
        select_source(&mut cm, GPT10, Source::Fclk32k);
        assert_eq!(cm.read_register(CM_CLKSEL_CORE), 0xffff_ffbf);
    }

    #[test]
    fn enable_clocks() {
        let mut cm = cm();
        enable_functional(&mut cm, GPT10);
        enable_interface(&mut cm, GPT10);
        assert_eq!(
            cm.writes(),
            &[(CM_FCLKEN1_CORE, 0x0300_0800), (CM_ICLKEN1_CORE, 0x0000_0842)]
        );
    }

    #[test]
    fn enabling_twice_is_stable() {
        let mut cm = cm();
        enable_functional(&mut cm, GPT10);
        enable_functional(&mut cm, GPT10);
        assert_eq!(cm.read_register(CM_FCLKEN1_CORE), 0x0300_0800);
    }

    #[test]
    fn source_frequencies() {
        assert_eq!(Source::Sys.frequency(), 13_000_000);
        assert_eq!(Source::Fclk32k.frequency(), 32_000);
    }
}
