//! 대기압 건공기 열물성표 (-50~1200 °C).
//!
//! 온도 단일 축 조회만 지원하며 범위 밖은 거부한다.

use crate::error::QueryError;
use crate::tables::{lerp, Axis, Lookup, RangePolicy, ReferenceTable, TableRow};

/// 건공기 한 상태점 (SI 기준 단위).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DryAirRow {
    /// 온도 [°C]
    pub temperature_c: f64,
    /// 밀도 [kg/m³]
    pub density_kg_m3: f64,
    /// 정압비열 [kJ/(kg·K)]
    pub specific_heat_kj_kgk: f64,
    /// 열전도율 [W/(m·K)]
    pub thermal_conductivity_w_mk: f64,
    /// 열확산율 [m²/s]
    pub thermal_diffusivity_m2_s: f64,
    /// 점성계수 [Pa·s]
    pub dynamic_viscosity_pa_s: f64,
    /// 동점성계수 [m²/s]
    pub kinematic_viscosity_m2_s: f64,
    /// 프란틀 수 [-]
    pub prandtl: f64,
}

impl DryAirRow {
    /// 열 순서: t, ρ, cp, λ[×10⁻² W/(m·K)], a[×10⁻⁵ m²/s], μ[×10⁻⁵ Pa·s], ν[×10⁻⁶ m²/s], Pr
    fn from_table_units(raw: &[f64; 8]) -> Self {
        Self {
            temperature_c: raw[0],
            density_kg_m3: raw[1],
            specific_heat_kj_kgk: raw[2],
            thermal_conductivity_w_mk: raw[3] * 1e-2,
            thermal_diffusivity_m2_s: raw[4] * 1e-5,
            dynamic_viscosity_pa_s: raw[5] * 1e-5,
            kinematic_viscosity_m2_s: raw[6] * 1e-6,
            prandtl: raw[7],
        }
    }
}

impl TableRow for DryAirRow {
    fn key(&self, axis: Axis) -> Option<f64> {
        match axis {
            Axis::Temperature => Some(self.temperature_c),
            Axis::Pressure => None,
        }
    }

    fn set_key(&mut self, axis: Axis, value: f64) {
        if axis == Axis::Temperature {
            self.temperature_c = value;
        }
    }

    fn lerp(&self, upper: &Self, ratio: f64) -> Self {
        Self {
            temperature_c: lerp(self.temperature_c, upper.temperature_c, ratio),
            density_kg_m3: lerp(self.density_kg_m3, upper.density_kg_m3, ratio),
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

#[rustfmt::skip]
const RAW_ROWS: [[f64; 8]; 33] = [
    [-50.0,  1.584, 1.013, 2.034, 1.27,  1.46,  9.23,   0.728],
    [-40.0,  1.515, 1.013, 2.115, 1.38,  1.52,  10.04,  0.728],
    [-30.0,  1.453, 1.013, 2.196, 1.49,  1.57,  10.80,  0.723],
    [-20.0,  1.395, 1.009, 2.278, 1.62,  1.62,  11.60,  0.716],
    [-10.0,  1.342, 1.009, 2.359, 1.74,  1.67,  12.43,  0.712],
    [0.0,    1.293, 1.005, 2.440, 1.88,  1.72,  13.28,  0.707],
    [10.0,   1.247, 1.005, 2.510, 2.01,  1.77,  14.16,  0.705],
    [20.0,   1.205, 1.005, 2.581, 2.14,  1.81,  15.06,  0.703],
    [30.0,   1.165, 1.005, 2.673, 2.29,  1.86,  16.00,  0.701],
    [40.0,   1.128, 1.005, 2.754, 2.43,  1.91,  16.96,  0.699],
    [50.0,   1.093, 1.005, 2.824, 2.57,  1.96,  17.95,  0.698],
    [60.0,   1.060, 1.005, 2.893, 2.72,  2.01,  18.97,  0.696],
    [70.0,   1.029, 1.009, 2.963, 2.86,  2.06,  20.02,  0.694],
    [80.0,   1.000, 1.009, 3.004, 3.02,  2.11,  21.09,  0.692],
    [90.0,   0.972, 1.009, 3.126, 3.19,  2.15,  22.10,  0.690],
    [100.0,  0.946, 1.009, 3.207, 3.36,  2.19,  23.13,  0.688],
    [120.0,  0.898, 1.009, 3.335, 3.68,  2.29,  25.45,  0.686],
    [140.0,  0.854, 1.013, 3.486, 4.03,  2.37,  27.80,  0.684],
    [160.0,  0.815, 1.017, 3.637, 4.39,  2.45,  30.09,  0.682],
    [180.0,  0.779, 1.022, 3.777, 4.75,  2.53,  32.49,  0.681],
    [200.0,  0.746, 1.026, 3.928, 5.14,  2.60,  34.85,  0.680],
    [250.0,  0.674, 1.038, 4.625, 6.10,  2.74,  40.61,  0.677],
    [300.0,  0.615, 1.047, 4.602, 7.16,  2.97,  48.33,  0.674],
    [350.0,  0.566, 1.059, 4.904, 8.19,  3.14,  55.46,  0.676],
    [400.0,  0.524, 1.068, 5.206, 9.31,  3.31,  63.09,  0.678],
    [500.0,  0.456, 1.093, 5.740, 11.53, 3.62,  79.38,  0.687],
    [600.0,  0.404, 1.114, 6.217, 13.83, 3.91,  96.89,  0.699],
    [700.0,  0.362, 1.135, 6.70,  16.34, 4.018, 115.4,  0.706],
    [800.0,  0.329, 1.156, 7.170, 18.88, 4.43,  134.8,  0.713],
    [900.0,  0.301, 1.172, 7.623, 21.82, 4.67,  155.1,  0.717],
    [1000.0, 0.277, 1.185, 8.064, 24.59, 4.90,  177.1,  0.719],
    [1100.0, 0.257, 1.197, 8.494, 27.63, 5.12,  199.3,  0.722],
    [1200.0, 0.239, 1.210, 9.145, 31.65, 5.35,  233.7,  0.724],
];

/// 건공기 물성표.
#[derive(Debug, Clone)]
pub struct DryAirTable {
    table: ReferenceTable<DryAirRow>,
}

impl DryAirTable {
    pub const NAME: &'static str = "dry air";

    pub fn new() -> Self {
        let rows = RAW_ROWS.iter().map(DryAirRow::from_table_units).collect();
        Self {
            table: ReferenceTable::new(Self::NAME, RangePolicy::Reject, rows),
        }
    }

    pub fn rows(&self) -> &[DryAirRow] {
        self.table.rows()
    }

    /// 온도 열의 (최솟값, 최댓값).
    pub fn range(&self) -> Option<(f64, f64)> {
        self.table.range(Axis::Temperature)
    }

    pub fn policy(&self) -> RangePolicy {
        self.table.policy()
    }

    /// 온도[°C]로 조회한다.
    pub fn query_by_temperature(
        &self,
        temperature_c: f64,
    ) -> Result<Lookup<DryAirRow>, QueryError> {
        self.table.query(Axis::Temperature, temperature_c)
    }

    /// 축을 지정해 조회한다. 압력 축은 `UnsupportedAxis`.
    pub fn query(&self, axis: Axis, value: f64) -> Result<Lookup<DryAirRow>, QueryError> {
        self.table.query(axis, value)
    }

    pub fn query_text(&self, text: &str) -> Result<Lookup<DryAirRow>, QueryError> {
        self.table.query_text(Axis::Temperature, text)
    }
}

impl Default for DryAirTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeSide;
    use approx::assert_relative_eq;

    #[test]
    fn spans_minus_50_to_1200() {
        assert_eq!(DryAirTable::new().range(), Some((-50.0, 1200.0)));
    }

    #[test]
    fn density_at_25c_is_midpoint() {
        let res = DryAirTable::new().query_by_temperature(25.0).unwrap();
        assert_relative_eq!(res.row.density_kg_m3, 1.185, epsilon = 1e-12);
        assert_relative_eq!(res.row.prandtl, 0.702, epsilon = 1e-12);
    }

    #[test]
    fn interpolates_across_uneven_spacing() {
        // 200 °C와 250 °C 사이 (간격 50)
        let res = DryAirTable::new().query_by_temperature(210.0).unwrap();
        assert_relative_eq!(res.row.density_kg_m3, 0.746 + 0.2 * (0.674 - 0.746), epsilon = 1e-12);
    }

    #[test]
    fn transport_columns_use_si_units() {
        let row = DryAirTable::new().query_by_temperature(20.0).unwrap().row;
        assert_relative_eq!(row.thermal_conductivity_w_mk, 0.02581, max_relative = 1e-12);
        assert_relative_eq!(row.dynamic_viscosity_pa_s, 1.81e-5, max_relative = 1e-12);
        // ν ≈ μ/ρ
        assert_relative_eq!(
            row.kinematic_viscosity_m2_s,
            row.dynamic_viscosity_pa_s / row.density_kg_m3,
            max_relative = 0.01
        );
    }

    #[test]
    fn rejects_out_of_range_and_pressure_axis() {
        let table = DryAirTable::new();
        let err = table.query_by_temperature(-51.0).unwrap_err();
        assert!(matches!(err, QueryError::Range { side: RangeSide::Below, .. }));
        let err = table.query_by_temperature(1200.5).unwrap_err();
        assert!(matches!(err, QueryError::Range { side: RangeSide::Above, .. }));
        let err = table.query(Axis::Pressure, 101_325.0).unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedAxis { axis: Axis::Pressure, .. }));
    }
}
