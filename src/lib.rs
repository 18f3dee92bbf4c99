//! 포화수, 건포화 증기, 건공기 물성표 조회와 습공기 계산.
//!
//! 조회 로직은 라이브러리에 두고 CLI(`thermo_property_tables_cli`)와
//! GUI(`thermo_property_tables`) 두 실행 파일이 같은 코드를 쓴다.

pub mod air;
pub mod app;
pub mod catalog;
pub mod config;
pub mod conversion;
pub mod error;
pub mod i18n;
pub mod input;
pub mod quantity;
pub mod report;
pub mod steam;
pub mod tables;
pub mod ui_cli;
pub mod units;
pub mod water;

pub use catalog::{Module, PropertyTables};
pub use error::QueryError;
