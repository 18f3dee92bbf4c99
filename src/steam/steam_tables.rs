//! 건포화 수증기 열물성표 (0~370 °C, 10 °C 간격).
//!
//! 포화수 표와 같은 온도/압력 이중 축 보간을 쓰지만, 범위 밖 조회는
//! 거부하지 않고 가장 가까운 끝 행을 돌려준다.

use crate::error::QueryError;
use crate::tables::{lerp, Axis, Lookup, RangePolicy, ReferenceTable, TableRow};

/// 표에 수록된 압력 단위(×10⁵ Pa)를 Pa로 바꾸는 배율.
pub const PRESSURE_SCALE: f64 = 1e5;
/// 확산율/점성 열에 적용하는 정규화 배율.
pub const TRANSPORT_SCALE: f64 = 1e-6;

/// 건포화 증기 한 상태점. 생성 시 정규화된 기준 단위로 보관한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SteamRow {
    /// 포화 온도 [°C]
    pub temperature_c: f64,
    /// 포화 압력 [Pa]
    pub pressure_pa: f64,
    /// 밀도 [kg/m³]
    pub density_kg_m3: f64,
    /// 비엔탈피 [kJ/kg]
    pub enthalpy_kj_kg: f64,
    /// 증발잠열 [kJ/kg]
    pub latent_heat_kj_kg: f64,
    /// 정압비열 [kJ/(kg·K)]
    pub specific_heat_kj_kgk: f64,
    /// 열전도율 [W/(m·K)]
    pub thermal_conductivity_w_mk: f64,
    /// 열확산율 (표 값 × 1e-6)
    pub thermal_diffusivity_m2_s: f64,
    /// 점성계수 (표 값 × 1e-6)
    pub dynamic_viscosity_pa_s: f64,
    /// 동점성계수 (표 값 × 1e-6)
    pub kinematic_viscosity_m2_s: f64,
    /// 프란틀 수 [-]
    pub prandtl: f64,
}

impl SteamRow {
    /// 열 순서: t, p[×10⁵ Pa], ρ, h, r, cp, λ, a, μ, ν, Pr
    fn from_table_units(raw: &[f64; 11]) -> Self {
        Self {
            temperature_c: raw[0],
            pressure_pa: raw[1] * PRESSURE_SCALE,
            density_kg_m3: raw[2],
            enthalpy_kj_kg: raw[3],
            latent_heat_kj_kg: raw[4],
            specific_heat_kj_kgk: raw[5],
            thermal_conductivity_w_mk: raw[6],
            thermal_diffusivity_m2_s: raw[7] * TRANSPORT_SCALE,
            dynamic_viscosity_pa_s: raw[8] * TRANSPORT_SCALE,
            kinematic_viscosity_m2_s: raw[9] * TRANSPORT_SCALE,
            prandtl: raw[10],
        }
    }
}

impl TableRow for SteamRow {
    fn key(&self, axis: Axis) -> Option<f64> {
        Some(match axis {
            Axis::Temperature => self.temperature_c,
            Axis::Pressure => self.pressure_pa,
        })
    }

    fn set_key(&mut self, axis: Axis, value: f64) {
        match axis {
            Axis::Temperature => self.temperature_c = value,
            Axis::Pressure => self.pressure_pa = value,
        }
    }

    fn lerp(&self, upper: &Self, ratio: f64) -> Self {
        Self {
            temperature_c: lerp(self.temperature_c, upper.temperature_c, ratio),
            pressure_pa: lerp(self.pressure_pa, upper.pressure_pa, ratio),
            density_kg_m3: lerp(self.density_kg_m3, upper.density_kg_m3, ratio),
            enthalpy_kj_kg: lerp(self.enthalpy_kj_kg, upper.enthalpy_kj_kg, ratio),
            latent_heat_kj_kg: lerp(self.latent_heat_kj_kg, upper.latent_heat_kj_kg, ratio),
            specific_heat_kj_kgk: lerp(
                self.specific_heat_kj_kgk,
                upper.specific_heat_kj_kgk,
                ratio,
            ),
            thermal_conductivity_w_mk: lerp(
                self.thermal_conductivity_w_mk,
                upper.thermal_conductivity_w_mk,
                ratio,
            ),
            thermal_diffusivity_m2_s: lerp(
                self.thermal_diffusivity_m2_s,
                upper.thermal_diffusivity_m2_s,
                ratio,
            ),
            dynamic_viscosity_pa_s: lerp(
                self.dynamic_viscosity_pa_s,
                upper.dynamic_viscosity_pa_s,
                ratio,
            ),
            kinematic_viscosity_m2_s: lerp(
                self.kinematic_viscosity_m2_s,
                upper.kinematic_viscosity_m2_s,
                ratio,
            ),
            prandtl: lerp(self.prandtl, upper.prandtl, ratio),
        }
    }
}

// 온도℃ | 압력×10⁵Pa | 밀도 | 엔탈피 | 잠열 | cp | λ | a | μ | ν | Pr
#[rustfmt::skip]
const RAW_ROWS: [[f64; 11]; 38] = [
    [0.0,   0.00611, 0.004847, 2501.6, 2501.6, 1.8543,  1.83e-2, 7.313e-5,  8.022e-6,  1.655e-6,  0.815],
    [10.0,  0.01227, 0.009396, 2520.0, 2477.7, 1.8594,  1.88e-2, 3.8813e-5, 8.424e-6,  8.9654e-7, 0.831],
    [20.0,  0.02338, 0.01729,  2538.0, 2454.3, 1.8661,  1.94e-2, 2.1672e-5, 8.84e-6,   5.099e-7,  0.847],
    [30.0,  0.04241, 0.03037,  2556.5, 2430.9, 1.8744,  2.00e-2, 1.2651e-5, 9.218e-6,  3.0353e-7, 0.863],
    [40.0,  0.07375, 0.05116,  2574.5, 2407.0, 1.8853,  2.06e-2, 7.6845e-6, 9.62e-6,   1.8804e-7, 0.883],
    [50.0,  0.12335, 0.08302,  2592.0, 2382.7, 1.8987,  2.12e-2, 4.8359e-6, 1.022e-5,  1.2072e-7, 0.896],
    [60.0,  0.19920, 0.1302,   2609.6, 2358.4, 1.9155,  2.19e-2, 3.1555e-6, 1.0424e-5, 8.007e-8,  0.913],
    [70.0,  0.3116,  0.1982,   2626.8, 2334.1, 1.9364,  2.25e-2, 2.1057e-6, 1.0817e-5, 5.457e-8,  0.930],
    [80.0,  0.4736,  0.2993,   2643.5, 2309.0, 1.9615,  2.33e-2, 1.4553e-6, 1.1219e-5, 3.825e-8,  0.947],
    [90.0,  0.7011,  0.4235,   2660.3, 2238.1, 1.9921,  2.40e-2, 1.0222e-6, 1.1621e-5, 2.744e-8,  0.966],
    [100.0, 1.0130,  0.5977,   2676.2, 2257.1, 2.0281,  2.48e-2, 7.357e-7,  1.2023e-5, 2.012e-8,  0.984],
    [110.0, 1.4327,  0.8265,   2691.3, 2229.9, 2.0704,  2.56e-2, 5.383e-7,  1.2425e-5, 1.503e-8,  1.00],
    [120.0, 1.9854,  1.122,    2705.9, 2202.3, 2.1198,  2.65e-2, 4.015e-7,  1.2798e-5, 1.141e-8,  1.02],
    [130.0, 2.7013,  1.497,    2719.7, 2173.8, 2.1763,  2.76e-2, 3.046e-7,  1.317e-5,  8.8e-9,    1.04],
    [140.0, 3.614,   1.967,    2733.1, 2144.1, 2.2408,  2.85e-2, 2.338e-7,  1.3543e-5, 6.89e-9,   1.06],
    [150.0, 4.760,   2.548,    2745.3, 2113.1, 2.3142,  2.97e-2, 1.81e-7,   1.3896e-5, 5.45e-9,   1.08],
    [160.0, 6.181,   3.260,    2756.6, 2081.3, 2.3974,  3.08e-2, 1.42e-7,   1.4249e-5, 4.37e-9,   1.11],
    [170.0, 7.920,   4.123,    2767.1, 2047.8, 2.4911,  3.21e-2, 1.125e-7,  1.4612e-5, 3.54e-9,   1.13],
    [180.0, 10.027,  5.165,    2776.3, 2013.0, 2.5958,  3.36e-2, 9.03e-8,   1.4965e-5, 2.9e-9,    1.15],
    [190.0, 12.551,  6.397,    2784.2, 1976.6, 2.7126,  3.51e-2, 7.29e-8,   1.5298e-5, 2.39e-9,   1.18],
    [200.0, 15.549,  7.864,    2790.9, 1938.5, 2.8428,  3.68e-2, 5.92e-8,   1.5651e-5, 1.99e-9,   1.21],
    [210.0, 19.077,  9.593,    2796.4, 1898.3, 2.9877,  3.87e-2, 4.86e-8,   1.5995e-5, 1.67e-9,   1.24],
    [220.0, 23.198,  11.62,    2799.7, 1856.4, 3.1497,  4.07e-2, 4.0e-8,    1.6338e-5, 1.41e-9,   1.26],
    [230.0, 27.976,  14.00,    2801.8, 1811.6, 3.3310,  4.30e-2, 3.32e-8,   1.6701e-5, 1.19e-9,   1.29],
    [240.0, 33.478,  16.76,    2802.2, 1764.7, 3.5366,  4.54e-2, 2.76e-8,   1.7073e-5, 1.02e-9,   1.33],
    [250.0, 39.776,  19.99,    2800.6, 1714.5, 3.7723,  4.84e-2, 2.31e-8,   1.7446e-5, 8.73e-10,  1.36],
    [260.0, 46.943,  23.73,    2796.4, 1661.3, 4.0470,  5.18e-2, 1.94e-8,   1.7848e-5, 7.52e-10,  1.40],
    [270.0, 55.058,  23.10,    2789.7, 1604.8, 4.3735,  5.55e-2, 1.63e-8,   1.828e-5,  6.51e-10,  1.44],
    [280.0, 64.202,  33.19,    2780.5, 1543.7, 4.7675,  6.00e-2, 1.37e-8,   1.875e-5,  5.65e-10,  1.49],
    [290.0, 74.461,  39.16,    2767.5, 1477.5, 5.2528,  6.55e-2, 1.15e-8,   1.927e-5,  4.92e-10,  1.54],
    [300.0, 85.927,  46.19,    2751.1, 1405.9, 5.8632,  7.22e-2, 9.6e-9,    1.9839e-5, 4.30e-10,  1.61],
    [310.0, 98.700,  54.54,    2730.2, 1327.6, 6.6503,  8.02e-2, 8.0e-9,    2.0691e-5, 3.80e-10,  1.71],
    [320.0, 112.89,  64.60,    2703.8, 1241.0, 7.7217,  8.65e-2, 6.2e-9,    2.1691e-5, 3.36e-10,  1.94],
    [330.0, 128.63,  76.99,    2670.3, 1143.8, 9.3613,  9.61e-2, 4.8e-9,    2.3093e-5, 3.0e-10,   2.24],
    [340.0, 146.05,  92.76,    2626.0, 1030.8, 12.2103, 1.07e-1, 3.4e-9,    2.4692e-5, 2.66e-10,  2.82],
    [350.0, 165.35,  113.6,    2567.8, 895.6,  17.1504, 1.19e-1, 2.2e-9,    2.6594e-5, 2.34e-10,  3.83],
    [360.0, 186.75,  144.1,    2485.3, 721.4,  25.1162, 1.37e-1, 1.4e-9,    2.9193e-5, 2.03e-10,  5.34],
    [370.0, 210.54,  201.1,    2342.9, 452.6,  81.1025, 1.66e-1, 4.0e-10,   3.3989e-5, 1.69e-10,  15.7],
];

/// 건포화 수증기 물성표. 범위 밖 조회는 끝 행으로 클램프한다.
#[derive(Debug, Clone)]
pub struct SteamTable {
    table: ReferenceTable<SteamRow>,
}

impl SteamTable {
    pub const NAME: &'static str = "saturated steam";

    pub fn new() -> Self {
        let rows = RAW_ROWS.iter().map(SteamRow::from_table_units).collect();
        Self {
            table: ReferenceTable::new(Self::NAME, RangePolicy::Clamp, rows),
        }
    }

    pub fn rows(&self) -> &[SteamRow] {
        self.table.rows()
    }

    pub fn range(&self, axis: Axis) -> Option<(f64, f64)> {
        self.table.range(axis)
    }

    pub fn policy(&self) -> RangePolicy {
        self.table.policy()
    }

    /// 포화 온도[°C]로 조회한다. 범위 밖이면 끝 행을 돌려준다.
    pub fn query_by_temperature(&self, temperature_c: f64) -> Result<Lookup<SteamRow>, QueryError> {
        self.table.query(Axis::Temperature, temperature_c)
    }

    /// 포화 압력[Pa]으로 조회한다. 범위 밖이면 끝 행을 돌려준다.
    pub fn query_by_pressure(&self, pressure_pa: f64) -> Result<Lookup<SteamRow>, QueryError> {
        self.table.query(Axis::Pressure, pressure_pa)
    }

    pub fn query(&self, axis: Axis, value: f64) -> Result<Lookup<SteamRow>, QueryError> {
        self.table.query(axis, value)
    }

    pub fn query_text(&self, axis: Axis, text: &str) -> Result<Lookup<SteamRow>, QueryError> {
        self.table.query_text(axis, text)
    }
}

impl Default for SteamTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::{is_strictly_increasing, Bound, LookupSource};
    use approx::assert_relative_eq;

    #[test]
    fn normalises_units_at_construction() {
        let table = SteamTable::new();
        let first = table.rows()[0];
        assert_relative_eq!(first.pressure_pa, 611.0, epsilon = 1e-9);
        assert_relative_eq!(first.thermal_diffusivity_m2_s, 7.313e-11, max_relative = 1e-12);
        assert_relative_eq!(first.dynamic_viscosity_pa_s, 8.022e-12, max_relative = 1e-12);
        assert_relative_eq!(first.kinematic_viscosity_m2_s, 1.655e-12, max_relative = 1e-12);
        assert_eq!(first.thermal_conductivity_w_mk, 1.83e-2);
    }

    #[test]
    fn both_axes_are_strictly_increasing() {
        let table = SteamTable::new();
        assert!(is_strictly_increasing(table.rows(), Axis::Temperature));
        assert!(is_strictly_increasing(table.rows(), Axis::Pressure));
    }

    #[test]
    fn clamps_above_max_pressure() {
        let table = SteamTable::new();
        let res = table.query_by_pressure(500e5).unwrap();
        assert_eq!(res.row.temperature_c, 370.0);
        assert_eq!(res.row, *table.rows().last().unwrap());
        assert_eq!(res.source, LookupSource::Clamped { bound: Bound::Upper });
    }

    #[test]
    fn clamps_below_min_temperature() {
        let table = SteamTable::new();
        let res = table.query_by_temperature(-1.0).unwrap();
        assert!(res.is_clamped());
        assert_eq!(res.row, table.rows()[0]);
    }

    #[test]
    fn nan_is_not_clamped() {
        let table = SteamTable::new();
        let err = table.query_by_temperature(f64::NAN).unwrap_err();
        assert!(matches!(err, QueryError::Parse { field: "temperature", .. }), "{err:?}");
        assert!(table.query_by_pressure(f64::INFINITY).is_err());
    }

    #[test]
    fn interpolates_latent_heat_by_temperature() {
        let res = SteamTable::new().query_by_temperature(105.0).unwrap();
        assert_relative_eq!(res.row.latent_heat_kj_kg, (2257.1 + 2229.9) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(res.row.pressure_pa, (1.0130e5 + 1.4327e5) / 2.0, epsilon = 1e-6);
    }

    #[test]
    fn query_by_exact_pressure_returns_row() {
        let table = SteamTable::new();
        let row = table.rows()[10];
        let res = table.query_by_pressure(row.pressure_pa).unwrap();
        assert!(res.is_exact());
        assert_eq!(res.row, row);
    }
}
