use crate::units::{from_celsius, from_pascal, DisplayUnits};

/// 결과 표에 나오는 물리량 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Temperature,
    Pressure,
    Density,
    SpecificEnthalpy,
    SpecificHeat,
    ThermalConductivity,
    ThermalDiffusivity,
    DynamicViscosity,
    KinematicViscosity,
    ExpansionCoefficient,
    SurfaceTension,
    HumidityRatio,
    SpecificVolume,
    Dimensionless,
}

impl QuantityKind {
    /// 내부 기준 단위 기호. 온도/압력은 표시 단위에 따라 바뀐다.
    pub fn base_unit(&self) -> &'static str {
        match self {
            QuantityKind::Temperature => "°C",
            QuantityKind::Pressure => "Pa",
            QuantityKind::Density => "kg/m³",
            QuantityKind::SpecificEnthalpy => "kJ/kg",
            QuantityKind::SpecificHeat => "kJ/(kg·K)",
            QuantityKind::ThermalConductivity => "W/(m·K)",
            QuantityKind::ThermalDiffusivity => "m²/s",
            QuantityKind::DynamicViscosity => "Pa·s",
            QuantityKind::KinematicViscosity => "m²/s",
            QuantityKind::ExpansionCoefficient => "1/K",
            QuantityKind::SurfaceTension => "N/m",
            QuantityKind::HumidityRatio => "g/kg",
            QuantityKind::SpecificVolume => "m³/kg",
            QuantityKind::Dimensionless => "-",
        }
    }
}

/// 숫자 표시 형식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberFormat {
    /// 소수점 이하 자릿수 고정
    Fixed(usize),
    /// 지수 표기, 가수 소수점 이하 자릿수
    Scientific(usize),
}

impl NumberFormat {
    pub fn format(&self, value: f64) -> String {
        match *self {
            NumberFormat::Fixed(d) => format!("{value:.d$}"),
            NumberFormat::Scientific(d) => format!("{value:.d$e}"),
        }
    }
}

/// 내부 기준 단위로 환산된 값을 담는 컨테이너.
///
/// `value_base`는 온도=°C, 압력=Pa, 비엔탈피=kJ/kg, 습도비=g/kg, 그 밖의 물리량은 SI 값이다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuantityValue {
    pub kind: QuantityKind,
    pub value_base: f64,
}

impl QuantityValue {
    pub fn new(kind: QuantityKind, value_base: f64) -> Self {
        Self { kind, value_base }
    }

    /// 표시 단위로 환산한 값과 단위 기호.
    pub fn in_units(&self, units: &DisplayUnits) -> (f64, &'static str) {
        match self.kind {
            QuantityKind::Temperature => (
                from_celsius(self.value_base, units.temperature),
                units.temperature.symbol(),
            ),
            QuantityKind::Pressure => (
                from_pascal(self.value_base, units.pressure),
                units.pressure.symbol(),
            ),
            other => (self.value_base, other.base_unit()),
        }
    }
}
