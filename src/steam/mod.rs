//! 건포화 증기 물성표.

pub mod steam_tables;

pub use steam_tables::{SteamRow, SteamTable};
