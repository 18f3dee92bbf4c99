//! 포화수 열물성표 (0~370 °C, 10 °C 간격).
//!
//! 온도와 압력 모두 단조 증가하므로 두 축 어느 쪽으로도 조회할 수 있다.
//! 범위 밖 조회는 거부한다.

use crate::error::QueryError;
use crate::tables::{lerp, Axis, Lookup, RangePolicy, ReferenceTable, TableRow};

/// 포화수 한 상태점. 모든 값은 SI 기준 단위.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SaturatedWaterRow {
    /// 온도 [°C]
    pub temperature_c: f64,
    /// 포화 압력 [Pa]
    pub pressure_pa: f64,
    /// 밀도 [kg/m³]
    pub density_kg_m3: f64,
    /// 비엔탈피 [kJ/kg]
    pub enthalpy_kj_kg: f64,
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
    /// 체적팽창계수 [1/K]
    pub expansion_coefficient_per_k: f64,
    /// 표면장력 [N/m]
    pub surface_tension_n_m: f64,
    /// 프란틀 수 [-]
    pub prandtl: f64,
}

impl SaturatedWaterRow {
    /// 핸드북 표기 단위의 한 행을 기준 단위 행으로 바꾼다.
    ///
    /// 열 순서: t[°C], p[×10⁵ Pa], ρ, h, cp, λ[W/(m·K)], a[×10⁻⁸ m²/s],
    /// μ[×10⁻⁶ Pa·s], ν[×10⁻⁶ m²/s], β[×10⁻⁴ 1/K], σ[×10⁻⁴ N/m], Pr
    fn from_table_units(raw: &[f64; 12]) -> Self {
        Self {
            temperature_c: raw[0],
            pressure_pa: raw[1] * 1e5,
            density_kg_m3: raw[2],
            enthalpy_kj_kg: raw[3],
            specific_heat_kj_kgk: raw[4],
            thermal_conductivity_w_mk: raw[5],
            thermal_diffusivity_m2_s: raw[6] * 1e-8,
            dynamic_viscosity_pa_s: raw[7] * 1e-6,
            kinematic_viscosity_m2_s: raw[8] * 1e-6,
            expansion_coefficient_per_k: raw[9] * 1e-4,
            surface_tension_n_m: raw[10] * 1e-4,
            prandtl: raw[11],
        }
    }
}

impl TableRow for SaturatedWaterRow {
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
            expansion_coefficient_per_k: lerp(
                self.expansion_coefficient_per_k,
                upper.expansion_coefficient_per_k,
                ratio,
            ),
            surface_tension_n_m: lerp(self.surface_tension_n_m, upper.surface_tension_n_m, ratio),
            prandtl: lerp(self.prandtl, upper.prandtl, ratio),
        }
    }
}

// 핸드북 표기 그대로. 320 °C 행의 β/σ는 310 °C 행과 같은 값으로 수록되어 있다.
#[rustfmt::skip]
const RAW_ROWS: [[f64; 12]; 38] = [
    [0.0,   0.00611, 999.9, 0.0,    4.212,  0.551, 13.1, 1788.0, 1.789, -0.63, 756.4, 13.67],
    [10.0,  0.01227, 999.7, 42.04,  4.191,  0.574, 13.7, 1306.0, 1.306, 0.70,  741.6, 9.52],
    [20.0,  0.02338, 998.2, 83.91,  4.183,  0.599, 14.3, 1004.0, 1.006, 1.82,  726.2, 5.42],
    [30.0,  0.04241, 995.7, 125.7,  4.174,  0.618, 14.9, 801.5,  0.805, 3.21,  712.2, 4.31],
    [40.0,  0.07375, 992.2, 167.5,  4.174,  0.635, 15.3, 653.3,  0.659, 3.87,  696.5, 3.54],
    [50.0,  0.12335, 988.1, 209.3,  4.174,  0.648, 15.7, 549.4,  0.556, 4.49,  676.9, 3.54],
    [60.0,  0.19920, 983.2, 251.1,  4.179,  0.659, 16.0, 469.9,  0.478, 5.11,  662.2, 2.98],
    [70.0,  0.3116,  977.8, 293.0,  4.187,  0.668, 16.3, 406.1,  0.415, 5.70,  643.5, 2.55],
    [80.0,  0.4736,  971.8, 335.0,  4.195,  0.674, 16.6, 355.1,  0.365, 6.32,  625.9, 2.21],
    [90.0,  0.7011,  965.3, 377.0,  4.208,  0.680, 16.8, 314.9,  0.325, 6.95,  607.2, 1.95],
    [100.0, 1.013,   958.4, 419.1,  4.220,  0.683, 16.9, 282.5,  0.295, 7.52,  588.6, 1.75],
    [110.0, 1.43,    951.0, 461.4,  4.233,  0.685, 17.0, 259.0,  0.272, 8.08,  569.0, 1.60],
    [120.0, 1.98,    943.1, 503.7,  4.250,  0.686, 17.1, 237.4,  0.252, 8.64,  548.4, 1.47],
    [130.0, 2.7,     934.8, 546.4,  4.266,  0.686, 17.2, 217.8,  0.233, 9.19,  528.8, 1.36],
    [140.0, 3.61,    926.1, 589.1,  4.287,  0.685, 17.2, 201.1,  0.217, 9.72,  507.2, 1.26],
    [150.0, 4.76,    917.0, 632.2,  4.313,  0.684, 17.3, 186.4,  0.203, 10.3,  486.6, 1.17],
    [160.0, 6.18,    907.4, 675.4,  4.264,  0.683, 17.3, 173.6,  0.191, 10.7,  466.0, 1.10],
    [170.0, 7.92,    897.3, 719.3,  4.380,  0.679, 17.3, 162.8,  0.181, 11.3,  443.4, 1.05],
    [180.0, 10.03,   886.9, 763.3,  4.417,  0.674, 17.2, 153.0,  0.173, 11.9,  422.8, 1.00],
    [190.0, 12.55,   870.0, 807.8,  4.459,  0.670, 17.1, 144.2,  0.165, 12.6,  400.2, 0.96],
    [200.0, 15.55,   863.0, 852.5,  4.505,  0.663, 17.0, 136.4,  0.158, 13.3,  376.7, 0.93],
    [210.0, 19.08,   852.3, 897.7,  4.555,  0.655, 16.9, 130.5,  0.153, 14.1,  354.1, 0.91],
    [220.0, 23.20,   840.3, 943.7,  4.614,  0.645, 16.6, 124.6,  0.148, 14.8,  331.6, 0.89],
    [230.0, 27.98,   827.3, 990.2,  4.681,  0.637, 16.4, 119.7,  0.145, 15.9,  310.0, 0.88],
    [240.0, 33.48,   813.6, 1037.5, 4.756,  0.628, 16.2, 114.8,  0.141, 16.8,  285.5, 0.87],
    [250.0, 39.78,   799.0, 1085.7, 4.844,  0.618, 15.9, 109.9,  0.137, 18.1,  261.9, 0.86],
    [260.0, 46.94,   784.0, 1135.1, 4.949,  0.605, 15.6, 105.9,  0.135, 19.7,  237.4, 0.87],
    [270.0, 55.05,   767.9, 1185.3, 5.070,  0.590, 15.1, 102.0,  0.133, 21.6,  214.8, 0.88],
    [280.0, 64.20,   750.7, 1236.8, 5.230,  0.574, 14.6, 98.1,   0.131, 23.7,  191.3, 0.90],
    [290.0, 74.46,   732.3, 1290.0, 5.485,  0.558, 13.9, 94.2,   0.129, 26.2,  168.7, 0.93],
    [300.0, 85.92,   712.5, 1344.9, 5.736,  0.540, 13.2, 91.2,   0.128, 29.2,  144.2, 0.97],
    [310.0, 98.70,   691.1, 1402.2, 6.071,  0.523, 12.5, 88.3,   0.128, 32.9,  120.7, 1.03],
    [320.0, 112.89,  667.1, 1462.1, 6.574,  0.506, 11.5, 85.3,   0.128, 32.9,  120.7, 1.03],
    [330.0, 128.63,  640.2, 1526.2, 7.244,  0.484, 10.4, 81.4,   0.127, 43.3,  76.71, 1.22],
    [340.0, 146.05,  610.1, 1594.8, 8.165,  0.457, 9.17, 77.5,   0.127, 53.4,  56.70, 1.39],
    [350.0, 165.35,  574.4, 1671.4, 9.504,  0.430, 7.88, 72.6,   0.126, 66.8,  38.16, 1.60],
    [360.0, 186.75,  528.0, 1761.5, 13.984, 0.395, 5.36, 66.7,   0.126, 109.0, 20.21, 2.35],
    [370.0, 210.54,  450.5, 1892.5, 40.321, 0.337, 1.86, 56.9,   0.126, 264.0, 4.709, 6.79],
];

/// 포화수 물성표.
#[derive(Debug, Clone)]
pub struct SaturatedWaterTable {
    table: ReferenceTable<SaturatedWaterRow>,
}

impl SaturatedWaterTable {
    pub const NAME: &'static str = "saturated water";

    pub fn new() -> Self {
        let rows = RAW_ROWS
            .iter()
            .map(SaturatedWaterRow::from_table_units)
            .collect();
        Self {
            table: ReferenceTable::new(Self::NAME, RangePolicy::Reject, rows),
        }
    }

    pub fn rows(&self) -> &[SaturatedWaterRow] {
        self.table.rows()
    }

    pub fn range(&self, axis: Axis) -> Option<(f64, f64)> {
        self.table.range(axis)
    }

    pub fn policy(&self) -> RangePolicy {
        self.table.policy()
    }

    /// 온도[°C]로 조회한다.
    pub fn query_by_temperature(
        &self,
        temperature_c: f64,
    ) -> Result<Lookup<SaturatedWaterRow>, QueryError> {
        self.table.query(Axis::Temperature, temperature_c)
    }

    /// 포화 압력[Pa]으로 조회한다. 온도도 함께 보간된다.
    pub fn query_by_pressure(
        &self,
        pressure_pa: f64,
    ) -> Result<Lookup<SaturatedWaterRow>, QueryError> {
        self.table.query(Axis::Pressure, pressure_pa)
    }

    pub fn query(&self, axis: Axis, value: f64) -> Result<Lookup<SaturatedWaterRow>, QueryError> {
        self.table.query(axis, value)
    }

    /// 입력 문자열(기준 단위)로 조회한다.
    pub fn query_text(
        &self,
        axis: Axis,
        text: &str,
    ) -> Result<Lookup<SaturatedWaterRow>, QueryError> {
        self.table.query_text(axis, text)
    }
}

impl Default for SaturatedWaterTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeSide;
    use crate::tables::is_strictly_increasing;
    use approx::assert_relative_eq;

    #[test]
    fn both_axes_are_strictly_increasing() {
        let table = SaturatedWaterTable::new();
        assert!(is_strictly_increasing(table.rows(), Axis::Temperature));
        assert!(is_strictly_increasing(table.rows(), Axis::Pressure));
        assert_eq!(table.rows().len(), 38);
    }

    #[test]
    fn exact_row_at_20c() {
        let res = SaturatedWaterTable::new().query_by_temperature(20.0).unwrap();
        assert!(res.is_exact());
        assert_eq!(res.row.density_kg_m3, 998.2);
        assert_eq!(res.row.enthalpy_kj_kg, 83.91);
    }

    #[test]
    fn midpoint_at_25c() {
        let res = SaturatedWaterTable::new().query_by_temperature(25.0).unwrap();
        assert_relative_eq!(res.row.density_kg_m3, 996.95, epsilon = 1e-9);
        assert_relative_eq!(res.row.enthalpy_kj_kg, (83.91 + 125.7) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(res.row.pressure_pa, (2338.0 + 4241.0) / 2.0, epsilon = 1e-6);
        assert_eq!(res.row.temperature_c, 25.0);
    }

    #[test]
    fn pressure_is_stored_in_pascal() {
        let table = SaturatedWaterTable::new();
        let (min, max) = table.range(Axis::Pressure).unwrap();
        assert_relative_eq!(min, 611.0, epsilon = 1e-9);
        assert_relative_eq!(max, 210.54e5, epsilon = 1e-3);
    }

    #[test]
    fn query_by_pressure_interpolates_temperature() {
        let table = SaturatedWaterTable::new();
        // 100 °C(1.013e5 Pa)와 110 °C(1.43e5 Pa)의 중간
        let p = (1.013e5 + 1.43e5) / 2.0;
        let res = table.query_by_pressure(p).unwrap();
        assert_eq!(res.row.pressure_pa, p);
        assert_relative_eq!(res.row.temperature_c, 105.0, epsilon = 1e-9);
        assert_relative_eq!(res.row.density_kg_m3, (958.4 + 951.0) / 2.0, epsilon = 1e-9);
    }

    #[test]
    fn rejects_out_of_range() {
        let table = SaturatedWaterTable::new();
        let below = table.query_by_temperature(-1.0).unwrap_err();
        assert!(matches!(below, QueryError::Range { side: RangeSide::Below, .. }));
        let above = table.query_by_pressure(300e5).unwrap_err();
        assert!(matches!(above, QueryError::Range { side: RangeSide::Above, .. }));
    }

    #[test]
    fn diffusivity_scale_matches_conductivity() {
        // a = λ / (ρ·cp)
        for row in SaturatedWaterTable::new().rows().iter().take(5) {
            let a = row.thermal_conductivity_w_mk
                / (row.density_kg_m3 * row.specific_heat_kj_kgk * 1000.0);
            assert_relative_eq!(a, row.thermal_diffusivity_m2_s, max_relative = 0.02);
        }
    }
}
