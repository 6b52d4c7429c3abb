/// Pad multiplexing mode.
///
/// The meaning of each mode depends on the pad, see the pad multiplexing table of
/// the TRM.
#[repr(u16)]
#[rustfmt::skip]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MuxMode {
    M0 = 0,
    M1 = 1,
    M2 = 2,
    M3 = 3,
    M4 = 4,
    M5 = 5,
    M6 = 6,
    /// Safe mode.
    M7 = 7,
}

/// Pad pull resistor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pull {
    Disabled,
    Down,
    Up,
}

/// Pad configuration half-word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PadConfig {
    pub mode: MuxMode,
    pub pull: Pull,
    /// Input buffer enable, needed for bidirectional pads.
    pub input_enable: bool,
}

const PULL_ENABLE: u16 = 1 << 3;
const PULL_UP: u16 = 1 << 4;
const INPUT_ENABLE: u16 = 1 << 8;

impl PadConfig {
    /// Register encoding of the configuration.
    #[inline]
    pub const fn bits(self) -> u16 {
        let pull = match self.pull {
            Pull::Disabled => 0,
            Pull::Down => PULL_ENABLE,
            Pull::Up => PULL_ENABLE | PULL_UP,
        };
        let input = if self.input_enable { INPUT_ENABLE } else { 0 };
        self.mode as u16 | pull | input
    }
}
