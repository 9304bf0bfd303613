mod formatters;
mod palette;

pub use formatters::*;
pub use palette::Palette;
