//! 입력/표시용 단위 정의 및 변환.
//!
//! 물성표와 계산은 항상 °C, Pa 기준으로 동작하고, 단위 변환은 입력을 받을 때와
//! 결과를 보여줄 때만 일어난다.

pub mod pressure;
pub mod temperature;

pub use pressure::{from_pascal, to_pascal, PressureUnit};
pub use temperature::{from_celsius, to_celsius, TemperatureUnit};

use serde::{Deserialize, Serialize};

/// 한 화면(모듈)에서 쓰는 입력/표시 단위 묶음.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub pressure: PressureUnit,
}

impl DisplayUnits {
    pub const fn new(temperature: TemperatureUnit, pressure: PressureUnit) -> Self {
        Self {
            temperature,
            pressure,
        }
    }
}

impl Default for DisplayUnits {
    fn default() -> Self {
        Self::new(TemperatureUnit::Celsius, PressureUnit::Pascal)
    }
}
