use thiserror::Error;

use crate::units::{PressureUnit, TemperatureUnit};

/// 단위 이름 해석 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 온도 단위 이름 (`C`, `K`, `F`, `R` 등)을 해석한다.
pub fn parse_temperature_unit(s: &str) -> Result<TemperatureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "c" | "celsius" | "°c" | "℃" => Ok(TemperatureUnit::Celsius),
        "k" | "kelvin" => Ok(TemperatureUnit::Kelvin),
        "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
        "r" | "rankine" | "°r" => Ok(TemperatureUnit::Rankine),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

/// 압력 단위 이름을 해석한다. 모두 절대압으로 본다.
pub fn parse_pressure_unit(s: &str) -> Result<PressureUnit, ConversionError> {
    match s.trim().to_lowercase().as_str() {
        "pa" | "pascal" => Ok(PressureUnit::Pascal),
        "kpa" | "kilopascal" => Ok(PressureUnit::KiloPascal),
        "mpa" | "megapascal" => Ok(PressureUnit::MegaPascal),
        "bar" | "bara" | "1e5pa" => Ok(PressureUnit::Bar),
        "mbar" | "millibar" => Ok(PressureUnit::MilliBar),
        "kg/cm2" | "kgf/cm2" => Ok(PressureUnit::KgPerCm2),
        "psi" | "psia" => Ok(PressureUnit::Psi),
        "atm" => Ok(PressureUnit::Atm),
        "mmhg" | "torr" => Ok(PressureUnit::MmHg),
        _ => Err(ConversionError::UnknownUnit(s.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_spellings() {
        assert_eq!(parse_pressure_unit(" kPa ").unwrap(), PressureUnit::KiloPascal);
        assert_eq!(parse_pressure_unit("BAR").unwrap(), PressureUnit::Bar);
        assert_eq!(parse_pressure_unit("Torr").unwrap(), PressureUnit::MmHg);
        assert_eq!(parse_temperature_unit("℃").unwrap(), TemperatureUnit::Celsius);
        assert_eq!(parse_temperature_unit("F").unwrap(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn unknown_units_fail() {
        assert_eq!(
            parse_pressure_unit("furlong").unwrap_err(),
            ConversionError::UnknownUnit("furlong".into())
        );
        assert!(parse_temperature_unit("").is_err());
    }
}
