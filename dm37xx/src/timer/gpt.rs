//! GP timer register map.

use bitflags::bitflags;

/// Timer control register.
pub const TCLR: usize = 0x024;

/// Timer counter register.
pub const TCRR: usize = 0x028;

/// Timer load register, loaded into [TCRR] on overflow when autoreload is enabled.
pub const TLDR: usize = 0x02c;

/// Timer match register.
pub const TMAR: usize = 0x038;

bitflags! {
    /// [TCLR] fields.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct Tclr: u32 {
        /// Start the counter.
        const ST = 1 << 0;
        /// Autoreload on overflow.
        const AR = 1 << 1;
        /// Compare enabled.
        const CE = 1 << 6;
        /// Inverted pulse polarity.
        const SCPWM = 1 << 7;
        /// Trigger on overflow.
        const TRG_OVERFLOW = 0b01 << 10;
        /// Trigger on overflow and match.
        const TRG_OVERFLOW_AND_MATCH = 0b10 << 10;
        /// Toggle modulation.
        const PT = 1 << 12;
    }
}

impl Tclr {
    /// Running, autoreloaded toggle PWM on overflow and match.
    pub const PWM: Self = Self::ST
        .union(Self::AR)
        .union(Self::CE)
        .union(Self::SCPWM)
        .union(Self::TRG_OVERFLOW_AND_MATCH)
        .union(Self::PT);
}
