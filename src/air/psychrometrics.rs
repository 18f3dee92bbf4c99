//! 습공기 선도 계산.
//!
//! 습공기 계산기는 이 모듈의 [`Psychrometrics`] 트레이트만 사용한다.
//! 기본 구현 [`Ashrae`]는 ASHRAE Handbook Fundamentals (SI) 식을 따르고,
//! [`Magnus`]는 Magnus 포화압 식과 Stull 습구 근사를 쓰는 간이 모델이다.
//!
//! 단위: 온도 °C, 압력 Pa, 상대습도 0~1, 습도비 kg/kg(건공기), 엔탈피 J/kg, 비체적 m³/kg.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// 수증기/건공기 분자량 비
const RATIO_MW: f64 = 0.621945;
/// 건공기 기체상수 [J/(kg·K)]
const R_DA: f64 = 287.042;
const ZERO_C_K: f64 = 273.15;
const TRIPLE_POINT_C: f64 = 0.01;
const MIN_HUM_RATIO: f64 = 1e-7;
/// 반복 계산 허용 오차 [K]
const TOLERANCE: f64 = 0.001;
const MAX_ITER: u32 = 100;
/// 포화압 식의 유효 온도 범위 [°C]
const T_BOUNDS: (f64, f64) = (-100.0, 200.0);

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PsychroError {
    #[error("{what} out of valid range: {value}")]
    OutOfRange { what: &'static str, value: f64 },
    #[error("{what} did not converge after {iterations} iterations")]
    NoConvergence { what: &'static str, iterations: u32 },
}

/// 습공기 물성 계산 기능.
pub trait Psychrometrics {
    /// 상대습도 → 습도비 [kg/kg]
    fn hum_ratio_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError>;

    /// 상대습도 → 습구온도 [°C]
    fn t_wet_bulb_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError>;

    /// 상대습도 → 노점온도 [°C]
    fn t_dew_point_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError>;

    /// 습공기 엔탈피 [J/kg 건공기]
    fn moist_air_enthalpy(&self, t_db_c: f64, hum_ratio: f64) -> Result<f64, PsychroError>;

    /// 수증기 분압 [Pa]
    fn vap_pres_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError>;

    /// 습공기 비체적 [m³/kg 건공기]
    fn moist_air_volume(
        &self,
        t_db_c: f64,
        hum_ratio: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError>;
}

fn check_rel_hum(rel_hum: f64) -> Result<(), PsychroError> {
    if (0.0..=1.0).contains(&rel_hum) {
        Ok(())
    } else {
        Err(PsychroError::OutOfRange {
            what: "relative humidity",
            value: rel_hum,
        })
    }
}

fn check_hum_ratio(hum_ratio: f64) -> Result<(), PsychroError> {
    if hum_ratio >= 0.0 {
        Ok(())
    } else {
        Err(PsychroError::OutOfRange {
            what: "humidity ratio",
            value: hum_ratio,
        })
    }
}

fn hum_ratio_from_vap_pres(vap_pres_pa: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    if vap_pres_pa < 0.0 || vap_pres_pa >= pressure_pa {
        return Err(PsychroError::OutOfRange {
            what: "vapour pressure",
            value: vap_pres_pa,
        });
    }
    let w = RATIO_MW * vap_pres_pa / (pressure_pa - vap_pres_pa);
    Ok(w.max(MIN_HUM_RATIO))
}

fn vap_pres_from_hum_ratio(hum_ratio: f64, pressure_pa: f64) -> f64 {
    let w = hum_ratio.max(MIN_HUM_RATIO);
    pressure_pa * w / (RATIO_MW + w)
}

fn enthalpy(t_db_c: f64, hum_ratio: f64) -> Result<f64, PsychroError> {
    check_hum_ratio(hum_ratio)?;
    let w = hum_ratio.max(MIN_HUM_RATIO);
    Ok((1.006 * t_db_c + w * (2501.0 + 1.86 * t_db_c)) * 1000.0)
}

fn volume(t_db_c: f64, hum_ratio: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
    check_hum_ratio(hum_ratio)?;
    if pressure_pa <= 0.0 {
        return Err(PsychroError::OutOfRange {
            what: "pressure",
            value: pressure_pa,
        });
    }
    let w = hum_ratio.max(MIN_HUM_RATIO);
    Ok(R_DA * (t_db_c + ZERO_C_K) * (1.0 + 1.607858 * w) / pressure_pa)
}

/// 습구온도에서의 포화 습도비로부터 건구온도 측 습도비를 구한다.
fn hum_ratio_from_wet_bulb(t_db_c: f64, t_wb_c: f64, sat_hum_ratio: f64) -> f64 {
    let w = if t_wb_c >= 0.0 {
        ((2501.0 - 2.326 * t_wb_c) * sat_hum_ratio - 1.006 * (t_db_c - t_wb_c))
            / (2501.0 + 1.86 * t_db_c - 4.186 * t_wb_c)
    } else {
        ((2830.0 - 0.24 * t_wb_c) * sat_hum_ratio - 1.006 * (t_db_c - t_wb_c))
            / (2830.0 + 1.86 * t_db_c - 2.1 * t_wb_c)
    };
    w.max(MIN_HUM_RATIO)
}

/// ASHRAE Handbook Fundamentals (SI) 식.
///
/// 포화수증기압은 Hyland-Wexler 식, 노점은 Newton-Raphson,
/// 습구는 노점과 건구 사이 이분법으로 구한다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ashrae;

impl Ashrae {
    /// 포화수증기압 [Pa]. 0.01 °C 이하는 얼음 기준.
    pub fn sat_vap_pres(&self, t_c: f64) -> Result<f64, PsychroError> {
        if !(T_BOUNDS.0..=T_BOUNDS.1).contains(&t_c) {
            return Err(PsychroError::OutOfRange {
                what: "temperature",
                value: t_c,
            });
        }
        let t = t_c + ZERO_C_K;
        let ln_pws = if t_c <= TRIPLE_POINT_C {
            -5.674_535_9e3 / t + 6.392_524_7 - 9.677_843e-3 * t + 6.221_570_1e-7 * t.powi(2)
                + 2.074_782_5e-9 * t.powi(3)
                - 9.484_024e-13 * t.powi(4)
                + 4.163_501_9 * t.ln()
        } else {
            -5.800_220_6e3 / t + 1.391_499_3 - 4.864_023_9e-2 * t + 4.176_476_8e-5 * t.powi(2)
                - 1.445_209_3e-8 * t.powi(3)
                + 6.545_967_3 * t.ln()
        };
        Ok(ln_pws.exp())
    }

    /// ln(포화압)의 온도 미분.
    fn d_ln_pws(t_c: f64) -> f64 {
        let t = t_c + ZERO_C_K;
        if t_c <= TRIPLE_POINT_C {
            5.674_535_9e3 / t.powi(2) - 9.677_843e-3 + 2.0 * 6.221_570_1e-7 * t
                + 3.0 * 2.074_782_5e-9 * t.powi(2)
                - 4.0 * 9.484_024e-13 * t.powi(3)
                + 4.163_501_9 / t
        } else {
            5.800_220_6e3 / t.powi(2) - 4.864_023_9e-2 + 2.0 * 4.176_476_8e-5 * t
                - 3.0 * 1.445_209_3e-8 * t.powi(2)
                + 6.545_967_3 / t
        }
    }

    fn sat_hum_ratio(&self, t_c: f64, pressure_pa: f64) -> Result<f64, PsychroError> {
        let p_ws = self.sat_vap_pres(t_c)?;
        hum_ratio_from_vap_pres(p_ws, pressure_pa)
    }

    /// 수증기 분압으로부터 노점 [°C]. 결과는 건구온도를 넘지 않는다.
    pub fn t_dew_point_from_vap_pres(
        &self,
        t_db_c: f64,
        vap_pres_pa: f64,
    ) -> Result<f64, PsychroError> {
        let p_min = self.sat_vap_pres(T_BOUNDS.0)?;
        let p_max = self.sat_vap_pres(T_BOUNDS.1)?;
        if !(p_min..=p_max).contains(&vap_pres_pa) {
            return Err(PsychroError::OutOfRange {
                what: "vapour pressure",
                value: vap_pres_pa,
            });
        }

        let ln_vp = vap_pres_pa.ln();
        let mut t_dp = t_db_c.clamp(T_BOUNDS.0, T_BOUNDS.1);
        for iteration in 1..=MAX_ITER {
            let prev = t_dp;
            let ln_vp_iter = self.sat_vap_pres(prev)?.ln();
            let step = (ln_vp_iter - ln_vp) / Self::d_ln_pws(prev);
            t_dp = (prev - step).clamp(T_BOUNDS.0, T_BOUNDS.1);
            if (t_dp - prev).abs() <= TOLERANCE {
                debug!(t_db_c, vap_pres_pa, t_dp, iteration, "dew point converged");
                return Ok(t_dp.min(t_db_c));
            }
        }
        Err(PsychroError::NoConvergence {
            what: "dew point",
            iterations: MAX_ITER,
        })
    }

    /// 습도비로부터 습구온도 [°C].
    pub fn t_wet_bulb_from_hum_ratio(
        &self,
        t_db_c: f64,
        hum_ratio: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        check_hum_ratio(hum_ratio)?;
        let w = hum_ratio.max(MIN_HUM_RATIO);
        let t_dp = self.t_dew_point_from_vap_pres(t_db_c, vap_pres_from_hum_ratio(w, pressure_pa))?;

        let mut hi = t_db_c;
        let mut lo = t_dp;
        let mut t_wb = (lo + hi) / 2.0;
        let mut iteration = 1;
        while hi - lo > TOLERANCE {
            let w_sat = self.sat_hum_ratio(t_wb, pressure_pa)?;
            let w_star = hum_ratio_from_wet_bulb(t_db_c, t_wb, w_sat);
            if w_star > w {
                hi = t_wb;
            } else {
                lo = t_wb;
            }
            t_wb = (lo + hi) / 2.0;
            if iteration >= MAX_ITER {
                return Err(PsychroError::NoConvergence {
                    what: "wet bulb",
                    iterations: MAX_ITER,
                });
            }
            iteration += 1;
        }
        Ok(t_wb)
    }
}

impl Psychrometrics for Ashrae {
    fn hum_ratio_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        let pv = self.vap_pres_from_rel_hum(t_db_c, rel_hum)?;
        hum_ratio_from_vap_pres(pv, pressure_pa)
    }

    fn t_wet_bulb_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        let w = self.hum_ratio_from_rel_hum(t_db_c, rel_hum, pressure_pa)?;
        self.t_wet_bulb_from_hum_ratio(t_db_c, w, pressure_pa)
    }

    fn t_dew_point_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError> {
        let pv = self.vap_pres_from_rel_hum(t_db_c, rel_hum)?;
        self.t_dew_point_from_vap_pres(t_db_c, pv)
    }

    fn moist_air_enthalpy(&self, t_db_c: f64, hum_ratio: f64) -> Result<f64, PsychroError> {
        enthalpy(t_db_c, hum_ratio)
    }

    fn vap_pres_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError> {
        check_rel_hum(rel_hum)?;
        Ok(rel_hum * self.sat_vap_pres(t_db_c)?)
    }

    fn moist_air_volume(
        &self,
        t_db_c: f64,
        hum_ratio: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        volume(t_db_c, hum_ratio, pressure_pa)
    }
}

/// Magnus 포화압 식 기반 간이 모델.
///
/// 노점은 Magnus 역함수, 습구는 Stull(2011) 근사식. 반복 계산이 없어 빠르지만
/// 영하나 고온에서는 오차가 커진다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Magnus;

impl Magnus {
    const A: f64 = 17.2694;
    const B: f64 = 238.3;
    const P0: f64 = 610.78;

    pub fn sat_vap_pres(&self, t_c: f64) -> f64 {
        Self::P0 * (Self::A * t_c / (t_c + Self::B)).exp()
    }
}

impl Psychrometrics for Magnus {
    fn hum_ratio_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        let pv = self.vap_pres_from_rel_hum(t_db_c, rel_hum)?;
        hum_ratio_from_vap_pres(pv, pressure_pa)
    }

    fn t_wet_bulb_from_rel_hum(
        &self,
        t_db_c: f64,
        rel_hum: f64,
        _pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        check_rel_hum(rel_hum)?;
        let rh = rel_hum * 100.0;
        let t = t_db_c;
        let t_wb = t * (0.151_977 * (rh + 8.313_659).sqrt()).atan() + (t + rh).atan()
            - (rh - 1.676_331).atan()
            + 0.003_918_38 * rh.powf(1.5) * (0.023_101 * rh).atan()
            - 4.686_035;
        Ok(t_wb.min(t_db_c))
    }

    fn t_dew_point_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError> {
        check_rel_hum(rel_hum)?;
        if rel_hum <= 0.0 {
            return Err(PsychroError::OutOfRange {
                what: "vapour pressure",
                value: 0.0,
            });
        }
        let gamma = rel_hum.ln() + Self::A * t_db_c / (Self::B + t_db_c);
        Ok((Self::B * gamma / (Self::A - gamma)).min(t_db_c))
    }

    fn moist_air_enthalpy(&self, t_db_c: f64, hum_ratio: f64) -> Result<f64, PsychroError> {
        enthalpy(t_db_c, hum_ratio)
    }

    fn vap_pres_from_rel_hum(&self, t_db_c: f64, rel_hum: f64) -> Result<f64, PsychroError> {
        check_rel_hum(rel_hum)?;
        Ok(rel_hum * self.sat_vap_pres(t_db_c))
    }

    fn moist_air_volume(
        &self,
        t_db_c: f64,
        hum_ratio: f64,
        pressure_pa: f64,
    ) -> Result<f64, PsychroError> {
        volume(t_db_c, hum_ratio, pressure_pa)
    }
}

/// 설정 파일에서 고르는 계산 모델.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PsychroModel {
    #[default]
    Ashrae,
    Magnus,
}

impl PsychroModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PsychroModel::Ashrae => "ashrae",
            PsychroModel::Magnus => "magnus",
        }
    }
}

impl Psychrometrics for PsychroModel {
    fn hum_ratio_from_rel_hum(&self, t: f64, rh: f64, p: f64) -> Result<f64, PsychroError> {
        match self {
            PsychroModel::Ashrae => Ashrae.hum_ratio_from_rel_hum(t, rh, p),
            PsychroModel::Magnus => Magnus.hum_ratio_from_rel_hum(t, rh, p),
        }
    }

    fn t_wet_bulb_from_rel_hum(&self, t: f64, rh: f64, p: f64) -> Result<f64, PsychroError> {
        match self {
            PsychroModel::Ashrae => Ashrae.t_wet_bulb_from_rel_hum(t, rh, p),
            PsychroModel::Magnus => Magnus.t_wet_bulb_from_rel_hum(t, rh, p),
        }
    }

    fn t_dew_point_from_rel_hum(&self, t: f64, rh: f64) -> Result<f64, PsychroError> {
        match self {
            PsychroModel::Ashrae => Ashrae.t_dew_point_from_rel_hum(t, rh),
            PsychroModel::Magnus => Magnus.t_dew_point_from_rel_hum(t, rh),
        }
    }

    fn moist_air_enthalpy(&self, t: f64, w: f64) -> Result<f64, PsychroError> {
        enthalpy(t, w)
    }

    fn vap_pres_from_rel_hum(&self, t: f64, rh: f64) -> Result<f64, PsychroError> {
        match self {
            PsychroModel::Ashrae => Ashrae.vap_pres_from_rel_hum(t, rh),
            PsychroModel::Magnus => Magnus.vap_pres_from_rel_hum(t, rh),
        }
    }

    fn moist_air_volume(&self, t: f64, w: f64, p: f64) -> Result<f64, PsychroError> {
        volume(t, w, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const P_ATM: f64 = 101_325.0;

    #[test]
    fn saturation_pressure_matches_handbook() {
        // ASHRAE 표: 20 °C 2339 Pa, 0 °C 611.2 Pa, 100 °C 101 418 Pa
        assert_relative_eq!(Ashrae.sat_vap_pres(20.0).unwrap(), 2339.0, max_relative = 1e-3);
        assert_relative_eq!(Ashrae.sat_vap_pres(0.0).unwrap(), 611.2, max_relative = 2e-3);
        assert_relative_eq!(Ashrae.sat_vap_pres(100.0).unwrap(), 101_418.0, max_relative = 2e-3);
    }

    #[test]
    fn saturation_pressure_outside_bounds_fails() {
        assert!(matches!(
            Ashrae.sat_vap_pres(-101.0),
            Err(PsychroError::OutOfRange { what: "temperature", .. })
        ));
        assert!(Ashrae.sat_vap_pres(201.0).is_err());
    }

    #[test]
    fn derivative_matches_finite_difference() {
        for t in [-40.0, -5.0, 10.0, 60.0, 150.0] {
            let h = 1e-4;
            let numeric = (Ashrae.sat_vap_pres(t + h).unwrap().ln()
                - Ashrae.sat_vap_pres(t - h).unwrap().ln())
                / (2.0 * h);
            assert_relative_eq!(Ashrae::d_ln_pws(t), numeric, max_relative = 1e-5);
        }
    }

    #[test]
    fn state_at_30c_50pct() {
        let w = Ashrae.hum_ratio_from_rel_hum(30.0, 0.5, P_ATM).unwrap();
        assert!((0.0130..0.0136).contains(&w), "W = {w}");

        let t_dp = Ashrae.t_dew_point_from_rel_hum(30.0, 0.5).unwrap();
        assert!((18.0..19.0).contains(&t_dp), "dew point = {t_dp}");

        let t_wb = Ashrae.t_wet_bulb_from_rel_hum(30.0, 0.5, P_ATM).unwrap();
        assert!((21.5..22.5).contains(&t_wb), "wet bulb = {t_wb}");
        assert!(t_dp < t_wb && t_wb < 30.0);

        let h = Ashrae.moist_air_enthalpy(30.0, w).unwrap();
        assert_relative_eq!(h, 64_200.0, max_relative = 0.01);

        let v = Ashrae.moist_air_volume(30.0, w, P_ATM).unwrap();
        assert!((0.87..0.88).contains(&v), "v = {v}");
    }

    #[test]
    fn saturated_air_wet_bulb_equals_dry_bulb() {
        let t_wb = Ashrae.t_wet_bulb_from_rel_hum(25.0, 1.0, P_ATM).unwrap();
        assert_relative_eq!(t_wb, 25.0, epsilon = 0.01);
        let t_dp = Ashrae.t_dew_point_from_rel_hum(25.0, 1.0).unwrap();
        assert_relative_eq!(t_dp, 25.0, epsilon = 0.01);
    }

    #[test]
    fn below_freezing_uses_ice_branch() {
        let t_dp = Ashrae.t_dew_point_from_rel_hum(-10.0, 0.6).unwrap();
        assert!(t_dp < -10.0);
        let t_wb = Ashrae.t_wet_bulb_from_rel_hum(-10.0, 0.6, P_ATM).unwrap();
        assert!(t_dp <= t_wb && t_wb <= -10.0);
    }

    #[test]
    fn zero_humidity_has_no_dew_point() {
        let err = Ashrae.t_dew_point_from_rel_hum(20.0, 0.0).unwrap_err();
        assert!(matches!(err, PsychroError::OutOfRange { what: "vapour pressure", .. }));
        assert!(Magnus.t_dew_point_from_rel_hum(20.0, 0.0).is_err());
    }

    #[test]
    fn relative_humidity_must_be_a_fraction() {
        assert!(Ashrae.vap_pres_from_rel_hum(20.0, 1.5).is_err());
        assert!(Ashrae.hum_ratio_from_rel_hum(20.0, -0.1, P_ATM).is_err());
    }

    #[test]
    fn magnus_agrees_with_ashrae_at_room_conditions() {
        let a = Ashrae.hum_ratio_from_rel_hum(25.0, 0.6, P_ATM).unwrap();
        let m = Magnus.hum_ratio_from_rel_hum(25.0, 0.6, P_ATM).unwrap();
        assert_relative_eq!(a, m, max_relative = 0.02);

        let a = Ashrae.t_dew_point_from_rel_hum(25.0, 0.6).unwrap();
        let m = Magnus.t_dew_point_from_rel_hum(25.0, 0.6).unwrap();
        assert!((a - m).abs() < 0.5, "ashrae {a}, magnus {m}");

        let a = Ashrae.t_wet_bulb_from_rel_hum(25.0, 0.6, P_ATM).unwrap();
        let m = Magnus.t_wet_bulb_from_rel_hum(25.0, 0.6, P_ATM).unwrap();
        assert!((a - m).abs() < 0.5, "ashrae {a}, magnus {m}");
    }

    #[test]
    fn model_dispatches_to_provider() {
        let via_model = PsychroModel::Magnus.vap_pres_from_rel_hum(30.0, 0.5).unwrap();
        assert_eq!(via_model, Magnus.vap_pres_from_rel_hum(30.0, 0.5).unwrap());
        assert_eq!(PsychroModel::default(), PsychroModel::Ashrae);
    }
}
