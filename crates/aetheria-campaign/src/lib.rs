//! Campaign rules that do not need the ECS: wave composition and the
//! dual-currency economy.

pub mod economy;
pub mod waves;

pub use economy::{Economy, EconomyError};
pub use waves::{compose_wave, get_wave, WaveComposition};
