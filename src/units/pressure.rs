use serde::{Deserialize, Serialize};

/// 압력 단위. 물성표 압력은 모두 절대압이므로 여기서도 절대압만 다룬다.
/// 내부 기준은 Pa 이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    KiloPascal,
    MegaPascal,
    /// 10⁵ Pa. 증기표 원자료의 압력 단위와 같다.
    Bar,
    MilliBar,
    KgPerCm2,
    Psi,
    Atm,
    MmHg,
}

const PA_PER_BAR: f64 = 100_000.0;
const PA_PER_ATM: f64 = 101_325.0;
const PA_PER_KGCM2: f64 = 98_066.5;
const PA_PER_PSI: f64 = 6_894.757;
const PA_PER_MMHG: f64 = 133.322_4;

impl PressureUnit {
    pub const ALL: [PressureUnit; 9] = [
        PressureUnit::Pascal,
        PressureUnit::KiloPascal,
        PressureUnit::MegaPascal,
        PressureUnit::Bar,
        PressureUnit::MilliBar,
        PressureUnit::KgPerCm2,
        PressureUnit::Psi,
        PressureUnit::Atm,
        PressureUnit::MmHg,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::MegaPascal => "MPa",
            PressureUnit::Bar => "×10⁵ Pa",
            PressureUnit::MilliBar => "mbar",
            PressureUnit::KgPerCm2 => "kgf/cm²",
            PressureUnit::Psi => "psia",
            PressureUnit::Atm => "atm",
            PressureUnit::MmHg => "mmHg",
        }
    }

    fn pascal_per_unit(&self) -> f64 {
        match self {
            PressureUnit::Pascal => 1.0,
            PressureUnit::KiloPascal => 1_000.0,
            PressureUnit::MegaPascal => 1_000_000.0,
            PressureUnit::Bar => PA_PER_BAR,
            PressureUnit::MilliBar => PA_PER_BAR / 1000.0,
            PressureUnit::KgPerCm2 => PA_PER_KGCM2,
            PressureUnit::Psi => PA_PER_PSI,
            PressureUnit::Atm => PA_PER_ATM,
            PressureUnit::MmHg => PA_PER_MMHG,
        }
    }
}

/// 주어진 압력을 Pa 로 변환한다.
pub fn to_pascal(value: f64, unit: PressureUnit) -> f64 {
    value * unit.pascal_per_unit()
}

/// Pa 값을 원하는 단위로 변환한다.
pub fn from_pascal(value_pa: f64, unit: PressureUnit) -> f64 {
    value_pa / unit.pascal_per_unit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn bar_matches_table_scale() {
        assert_relative_eq!(to_pascal(1.013, PressureUnit::Bar), 101_300.0, epsilon = 1e-9);
        assert_relative_eq!(from_pascal(210.54e5, PressureUnit::Bar), 210.54, epsilon = 1e-9);
    }

    #[test]
    fn atmosphere_in_other_units() {
        let atm = to_pascal(1.0, PressureUnit::Atm);
        assert_relative_eq!(from_pascal(atm, PressureUnit::MmHg), 760.0, max_relative = 1e-5);
        assert_relative_eq!(from_pascal(atm, PressureUnit::Psi), 14.696, max_relative = 1e-4);
        let kpa = to_pascal(101.325, PressureUnit::KiloPascal);
        assert_relative_eq!(from_pascal(kpa, PressureUnit::MilliBar), 1013.25, epsilon = 1e-9);
    }
}
