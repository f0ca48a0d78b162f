//! Per-cell context factors.
//!
//! [`ContextFactors`] carries the two scalars that drive weight adjustment,
//! climate harshness and urbanization, both held in `[0, 1]`. Out-of-range
//! inputs are clamped and recorded rather than rejected.

mod demographics;
mod factors;

pub use demographics::CellDemographics;
pub use factors::{ClampedInput, ContextFactors, Factor};
