//! 공기 관련 물성: 습공기 계산과 건공기 물성표.

pub mod dry_air;
pub mod moist_air;
pub mod psychrometrics;

pub use dry_air::{DryAirRow, DryAirTable};
pub use moist_air::{MoistAirCalculator, MoistAirState};
pub use psychrometrics::{Ashrae, Magnus, PsychroError, PsychroModel, Psychrometrics};
