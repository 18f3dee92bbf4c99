use crate::error::QueryError;
use crate::tables::Axis;
use crate::units::{to_celsius, to_pascal, DisplayUnits};

/// 사용자 입력 문자열을 숫자로 변환한다.
///
/// 앞뒤 공백은 무시한다. `NaN`/`inf`처럼 파싱은 되지만 유한하지 않은 값도
/// 숫자가 아닌 입력으로 취급한다.
pub fn parse_number(field: &'static str, text: &str) -> Result<f64, QueryError> {
    let trimmed = text.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(QueryError::Parse {
            field,
            input: trimmed.to_string(),
        }),
    }
}

/// 표시 단위로 입력된 축 값을 기준 단위(°C, Pa)로 바꾼다.
pub fn parse_axis_value(axis: Axis, text: &str, units: &DisplayUnits) -> Result<f64, QueryError> {
    let value = parse_number(axis.as_str(), text)?;
    Ok(match axis {
        Axis::Temperature => to_celsius(value, units.temperature),
        Axis::Pressure => to_pascal(value, units.pressure),
    })
}

/// 습공기 건구온도 입력. 결과는 °C.
pub fn parse_dry_bulb(text: &str, units: &DisplayUnits) -> Result<f64, QueryError> {
    let value = parse_number("dry bulb temperature", text)?;
    Ok(to_celsius(value, units.temperature))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{PressureUnit, TemperatureUnit};
    use approx::assert_relative_eq;

    #[test]
    fn accepts_padded_numbers() {
        assert_eq!(parse_number("t", " 25.5 ").unwrap(), 25.5);
        assert_eq!(parse_number("t", "-50").unwrap(), -50.0);
        assert_eq!(parse_number("p", "1e5").unwrap(), 100_000.0);
    }

    #[test]
    fn rejects_text_empty_and_non_finite() {
        for bad in ["abc", "", "   ", "NaN", "inf", "12,5"] {
            let err = parse_number("temperature", bad).unwrap_err();
            assert!(matches!(err, QueryError::Parse { field: "temperature", .. }), "{bad}");
        }
    }

    #[test]
    fn axis_values_are_normalised_to_base_units() {
        let units = DisplayUnits::new(TemperatureUnit::Kelvin, PressureUnit::Bar);
        assert_relative_eq!(
            parse_axis_value(Axis::Temperature, "373.15", &units).unwrap(),
            100.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            parse_axis_value(Axis::Pressure, "1.013", &units).unwrap(),
            101_300.0,
            epsilon = 1e-6
        );
        let err = parse_axis_value(Axis::Pressure, "x", &units).unwrap_err();
        assert!(matches!(err, QueryError::Parse { field: "pressure", .. }));
    }

    #[test]
    fn dry_bulb_names_its_field() {
        let units = DisplayUnits::new(TemperatureUnit::Fahrenheit, PressureUnit::KiloPascal);
        assert_relative_eq!(parse_dry_bulb("212", &units).unwrap(), 100.0, epsilon = 1e-9);
        assert!(matches!(
            parse_dry_bulb("warm", &units),
            Err(QueryError::Parse { field: "dry bulb temperature", .. })
        ));
    }
}
