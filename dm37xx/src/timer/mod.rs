pub mod gpt;
pub mod pwm;

pub use gpt::Tclr;
