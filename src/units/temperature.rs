use serde::{Deserialize, Serialize};

/// 온도 단위를 정의한다. 내부 기준은 °C 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Kelvin,
    Fahrenheit,
    Rankine,
}

impl TemperatureUnit {
    pub const ALL: [TemperatureUnit; 4] = [
        TemperatureUnit::Celsius,
        TemperatureUnit::Kelvin,
        TemperatureUnit::Fahrenheit,
        TemperatureUnit::Rankine,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Kelvin => "K",
            TemperatureUnit::Fahrenheit => "°F",
            TemperatureUnit::Rankine => "°R",
        }
    }
}

/// 주어진 값을 섭씨로 변환한다.
pub fn to_celsius(value: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value,
        TemperatureUnit::Kelvin => value - 273.15,
        TemperatureUnit::Fahrenheit => (value - 32.0) * 5.0 / 9.0,
        TemperatureUnit::Rankine => (value - 491.67) * 5.0 / 9.0,
    }
}

/// 섭씨 값을 원하는 단위로 변환한다.
pub fn from_celsius(value_c: f64, unit: TemperatureUnit) -> f64 {
    match unit {
        TemperatureUnit::Celsius => value_c,
        TemperatureUnit::Kelvin => value_c + 273.15,
        TemperatureUnit::Fahrenheit => value_c * 9.0 / 5.0 + 32.0,
        TemperatureUnit::Rankine => (value_c + 273.15) * 9.0 / 5.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn fixed_points() {
        assert_relative_eq!(to_celsius(212.0, TemperatureUnit::Fahrenheit), 100.0, epsilon = 1e-12);
        assert_relative_eq!(to_celsius(273.15, TemperatureUnit::Kelvin), 0.0, epsilon = 1e-12);
        assert_relative_eq!(from_celsius(0.0, TemperatureUnit::Rankine), 491.67, epsilon = 1e-9);
        let minus_forty = from_celsius(-40.0, TemperatureUnit::Fahrenheit);
        assert_relative_eq!(minus_forty, -40.0, epsilon = 1e-12);
    }
}
