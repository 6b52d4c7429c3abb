//! System control module pad configuration.
//!
//! Each 32-bit `CONTROL_PADCONF_x` register holds the configuration of two pads, one
//! per half-word. Configuring a pad leaves the other half-word untouched.
//!
//! Example usage:
//!
//! ```
//! use dm37xx::mmio::{Recorder, RegisterBlock};
//! use dm37xx::padconf;
//!
//! let mut scm = Recorder::new(0x200);
//! padconf::configure(&mut scm, padconf::GPMC_NCS5, padconf::GPT10_PWM_EVT);
//! assert_eq!(scm.read_register(0x0b8), 0x0000_011b);
//! ```

mod mode;

pub use mode::*;

use crate::mmio::RegisterBlock;

/// Half-word of a `CONTROL_PADCONF_x` register.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Half {
    Low,
    High,
}

/// Location of a pad configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pad {
    /// Byte offset of the `CONTROL_PADCONF_x` register.
    pub offset: usize,
    pub half: Half,
}

/// `gpmc_ncs5` pad, GPIO_56.
pub const GPMC_NCS5: Pad = Pad {
    offset: 0x0b8,
    half: Half::Low,
};

/// `gpt10_pwm_evt` output on [GPMC_NCS5], pulled up, input buffer enabled.
pub const GPT10_PWM_EVT: PadConfig = PadConfig {
    mode: MuxMode::M3,
    pull: Pull::Up,
    input_enable: true,
};

/// Configure the given pad.
#[inline]
pub fn configure(scm: &mut impl RegisterBlock, pad: Pad, config: PadConfig) {
    let shift = match pad.half {
        Half::Low => 0,
        Half::High => 16,
    };
    let mask = !(0xffff << shift);
    scm.modify_register(pad.offset, |value| {
        (value & mask) | ((config.bits() as u32) << shift)
    });
    log::debug!("pad {pad:?}: {config:?}");
}
