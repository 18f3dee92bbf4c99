//! 물(액상) 관련 물성표.

pub mod saturated_water;

pub use saturated_water::{SaturatedWaterRow, SaturatedWaterTable};
