//! 건구온도/상대습도로부터 습공기 상태를 계산한다.
//!
//! 표 보간은 없고, 선도 함수는 모두 [`Psychrometrics`] 구현에 위임한다.
//! 압력은 표준 대기압으로 고정한다.

use tracing::debug;

use super::psychrometrics::{Ashrae, Psychrometrics};
use crate::error::QueryError;
use crate::input::parse_number;

/// 표준 대기압 [Pa]
pub const STANDARD_PRESSURE_PA: f64 = 101_325.0;
/// 포화온도 표시값 [°C]. 실제 계산값이 아닌 고정값이다.
pub const SATURATION_TEMPERATURE_C: f64 = 100.0;
/// 허용 건구온도 [°C]
pub const DRY_BULB_RANGE_C: (f64, f64) = (-50.0, 100.0);
/// 허용 상대습도 [%]
pub const RELATIVE_HUMIDITY_RANGE_PCT: (f64, f64) = (0.0, 100.0);

/// 습공기 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoistAirState {
    /// 대기압 [Pa]
    pub pressure_pa: f64,
    /// 습도비 [kg/kg 건공기]
    pub humidity_ratio: f64,
    /// 습구온도 [°C]
    pub wet_bulb_c: f64,
    /// 노점온도 [°C]
    pub dew_point_c: f64,
    /// 포화온도 [°C] (고정값)
    pub saturation_temperature_c: f64,
    /// 엔탈피 [J/kg 건공기]
    pub enthalpy_j_kg: f64,
    /// 수증기 분압 [Pa]
    pub vapor_pressure_pa: f64,
    /// 비열 [kJ/(kg·K)]
    pub specific_heat_kj_kgk: f64,
    /// 비체적 [m³/kg 건공기]
    pub specific_volume_m3_kg: f64,
    /// 밀도 [kg/m³]
    pub density_kg_m3: f64,
}

/// 습공기 계산기.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoistAirCalculator<P = Ashrae> {
    provider: P,
}

impl MoistAirCalculator<Ashrae> {
    pub fn new() -> Self {
        Self { provider: Ashrae }
    }
}

impl<P: Psychrometrics> MoistAirCalculator<P> {
    pub fn with_provider(provider: P) -> Self {
        Self { provider }
    }

    /// 건구온도[°C], 상대습도[%]로 상태를 계산한다.
    pub fn calculate(
        &self,
        dry_bulb_c: f64,
        relative_humidity_pct: f64,
    ) -> Result<MoistAirState, QueryError> {
        check_input("dry bulb temperature", dry_bulb_c, DRY_BULB_RANGE_C)?;
        check_input(
            "relative humidity",
            relative_humidity_pct,
            RELATIVE_HUMIDITY_RANGE_PCT,
        )?;

        let p = STANDARD_PRESSURE_PA;
        let rh = relative_humidity_pct / 100.0;
        let t = dry_bulb_c;

        let humidity_ratio = self.provider.hum_ratio_from_rel_hum(t, rh, p)?;
        let wet_bulb_c = self.provider.t_wet_bulb_from_rel_hum(t, rh, p)?;
        let dew_point_c = self.provider.t_dew_point_from_rel_hum(t, rh)?;
        let enthalpy_j_kg = self.provider.moist_air_enthalpy(t, humidity_ratio)?;
        let vapor_pressure_pa = self.provider.vap_pres_from_rel_hum(t, rh)?;
        let specific_volume_m3_kg = self.provider.moist_air_volume(t, humidity_ratio, p)?;

        debug!(dry_bulb_c, relative_humidity_pct, humidity_ratio, "moist air state computed");
        Ok(MoistAirState {
            pressure_pa: p,
            humidity_ratio,
            wet_bulb_c,
            dew_point_c,
            saturation_temperature_c: SATURATION_TEMPERATURE_C,
            enthalpy_j_kg,
            vapor_pressure_pa,
            specific_heat_kj_kgk: 1.006 + 1.86 * humidity_ratio,
            specific_volume_m3_kg,
            density_kg_m3: 1.0 / specific_volume_m3_kg,
        })
    }

    /// 입력 문자열을 파싱한 뒤 [`calculate`](Self::calculate).
    pub fn calculate_text(
        &self,
        dry_bulb: &str,
        relative_humidity: &str,
    ) -> Result<MoistAirState, QueryError> {
        let t = parse_number("dry bulb temperature", dry_bulb)?;
        let rh = parse_number("relative humidity", relative_humidity)?;
        self.calculate(t, rh)
    }
}

fn check_input(
    quantity: &'static str,
    value: f64,
    (min, max): (f64, f64),
) -> Result<(), QueryError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(QueryError::InputRange {
            quantity,
            value,
            min,
            max,
        })
    }
}
