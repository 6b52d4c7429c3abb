//! Physical layout of the supported PWM output.
//!
//! Everything that ties the PWM to a particular SoC, timer and pad lives in a
//! [Target]. The register programming itself only sees register blocks.

use crate::{clock, mmio::Window, padconf};

/// Addresses and settings for one timer driven PWM output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Target {
    /// Core clock manager (CM_CORE).
    pub clock_manager: Window,
    /// System control module, pad configuration registers.
    pub system_control: Window,
    /// GP timer register block.
    pub timer: Window,
    /// Clock manager bits of the timer.
    pub timer_clock: clock::TimerClock,
    /// Pad the PWM event is routed to.
    pub pad: padconf::Pad,
    /// Pad configuration selecting the PWM event.
    pub pad_config: padconf::PadConfig,
}

/// GPTIMER10 on pad `gpmc_ncs5` (GPIO_56) of the DM3730.
pub const DM3730_GPT10: Target = Target {
    clock_manager: Window {
        base: 0x4800_4000,
        len: 0x1000,
    },
    system_control: Window {
        base: 0x4800_2000,
        len: 0x200,
    },
    timer: Window {
        base: 0x4808_6000,
        len: 0x1_0000,
    },
    timer_clock: clock::GPT10,
    pad: padconf::GPMC_NCS5,
    pad_config: padconf::GPT10_PWM_EVT,
};
