//! 세 물성표 공통 성질: 정확 일치, 보간값의 단조 경계, 반복 조회 동일성.

use proptest::prelude::*;
use thermo_property_tables::air::{DryAirRow, DryAirTable};
use thermo_property_tables::error::QueryError;
use thermo_property_tables::steam::{SteamRow, SteamTable};
use thermo_property_tables::tables::{Axis, LookupSource};
use thermo_property_tables::water::{SaturatedWaterRow, SaturatedWaterTable};

fn water_fields(r: &SaturatedWaterRow) -> [f64; 11] {
    [
        r.pressure_pa,
        r.density_kg_m3,
        r.enthalpy_kj_kg,
        r.specific_heat_kj_kgk,
        r.thermal_conductivity_w_mk,
        r.thermal_diffusivity_m2_s,
        r.dynamic_viscosity_pa_s,
        r.kinematic_viscosity_m2_s,
        r.expansion_coefficient_per_k,
        r.surface_tension_n_m,
        r.prandtl,
    ]
}

fn steam_fields(r: &SteamRow) -> [f64; 10] {
    [
        r.pressure_pa,
        r.density_kg_m3,
        r.enthalpy_kj_kg,
        r.latent_heat_kj_kg,
        r.specific_heat_kj_kgk,
        r.thermal_conductivity_w_mk,
        r.thermal_diffusivity_m2_s,
        r.dynamic_viscosity_pa_s,
        r.kinematic_viscosity_m2_s,
        r.prandtl,
    ]
}

fn dry_air_fields(r: &DryAirRow) -> [f64; 7] {
    [
        r.density_kg_m3,
        r.specific_heat_kj_kgk,
        r.thermal_conductivity_w_mk,
        r.thermal_diffusivity_m2_s,
        r.dynamic_viscosity_pa_s,
        r.kinematic_viscosity_m2_s,
        r.prandtl,
    ]
}

/// 보간된 값이 인접 두 행 값 사이(부동소수 오차 허용)에 있는지.
fn within(value: f64, a: f64, b: f64) -> bool {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let slack = 1e-12 * hi.abs().max(lo.abs()).max(1.0);
    value >= lo - slack && value <= hi + slack
}

#[test]
fn every_row_is_an_exact_match_on_every_axis() {
    let water = SaturatedWaterTable::new();
    for row in water.rows() {
        for axis in [Axis::Temperature, Axis::Pressure] {
            let value = match axis {
                Axis::Temperature => row.temperature_c,
                Axis::Pressure => row.pressure_pa,
            };
            let res = water.query(axis, value).unwrap();
            assert!(res.is_exact(), "water {axis} {value}");
            assert_eq!(res.row, *row);
        }
    }

    let steam = SteamTable::new();
    for row in steam.rows() {
        assert_eq!(steam.query_by_temperature(row.temperature_c).unwrap().row, *row);
        assert_eq!(steam.query_by_pressure(row.pressure_pa).unwrap().row, *row);
    }

    let air = DryAirTable::new();
    for row in air.rows() {
        let res = air.query_by_temperature(row.temperature_c).unwrap();
        assert!(res.is_exact());
        assert_eq!(res.row, *row);
    }
}

#[test]
fn one_below_minimum() {
    assert!(matches!(
        SaturatedWaterTable::new().query_by_temperature(-1.0),
        Err(QueryError::Range { .. })
    ));
    assert!(matches!(
        DryAirTable::new().query_by_temperature(-51.0),
        Err(QueryError::Range { .. })
    ));
    let steam = SteamTable::new();
    assert_eq!(steam.query_by_temperature(-1.0).unwrap().row, steam.rows()[0]);
}

#[test]
fn handbook_spot_values() {
    let water = SaturatedWaterTable::new();
    let r20 = water.query_by_temperature(20.0).unwrap().row;
    assert_eq!(r20.density_kg_m3, 998.2);
    assert_eq!(r20.enthalpy_kj_kg, 83.91);
    let r25 = water.query_by_temperature(25.0).unwrap().row;
    assert!((r25.density_kg_m3 - 996.95).abs() < 1e-9);

    let steam = SteamTable::new().query_by_pressure(500e5).unwrap();
    assert_eq!(steam.row.temperature_c, 370.0);

    let air = DryAirTable::new().query_by_temperature(25.0).unwrap();
    assert!((air.row.density_kg_m3 - 1.185).abs() < 1e-9);
}

proptest! {
    #[test]
    fn water_by_temperature_is_bounded(t in 0.0f64..=370.0) {
        let table = SaturatedWaterTable::new();
        let res = table.query_by_temperature(t).unwrap();
        prop_assert_eq!(res.row.temperature_c, t);
        if let LookupSource::Interpolated { lower, upper, ratio } = res.source {
            prop_assert_eq!(upper, lower + 1);
            prop_assert!((0.0..=1.0).contains(&ratio));
            let (a, b) = (water_fields(&table.rows()[lower]), water_fields(&table.rows()[upper]));
            for (i, v) in water_fields(&res.row).iter().enumerate() {
                prop_assert!(
                    within(*v, a[i], b[i]),
                    "field {} = {} not in [{}, {}]",
                    i,
                    v,
                    a[i],
                    b[i]
                );
            }
        }
    }

    #[test]
    fn water_by_pressure_is_bounded(p in 700.0f64..=21_000_000.0) {
        let table = SaturatedWaterTable::new();
        let res = table.query_by_pressure(p).unwrap();
        prop_assert_eq!(res.row.pressure_pa, p);
        if let LookupSource::Interpolated { lower, upper, .. } = res.source {
            let (lo, hi) = (&table.rows()[lower], &table.rows()[upper]);
            prop_assert!(within(res.row.temperature_c, lo.temperature_c, hi.temperature_c));
        }
    }

    #[test]
    fn steam_is_bounded_and_idempotent(t in -20.0f64..=400.0) {
        let table = SteamTable::new();
        let first = table.query_by_temperature(t).unwrap();
        let again = table.query_by_temperature(t).unwrap();
        prop_assert_eq!(first, again);
        match first.source {
            LookupSource::Interpolated { lower, upper, .. } => {
                let a = steam_fields(&table.rows()[lower]);
                let b = steam_fields(&table.rows()[upper]);
                for (i, v) in steam_fields(&first.row).iter().enumerate() {
                    prop_assert!(within(*v, a[i], b[i]));
                }
            }
            LookupSource::Clamped { .. } => prop_assert!(!(0.0..=370.0).contains(&t)),
            LookupSource::Exact { index } => prop_assert_eq!(table.rows()[index].temperature_c, t),
        }
    }

    #[test]
    fn dry_air_is_bounded(t in -50.0f64..=1200.0) {
        let table = DryAirTable::new();
        let res = table.query_by_temperature(t).unwrap();
        if let LookupSource::Interpolated { lower, upper, .. } = res.source {
            let a = dry_air_fields(&table.rows()[lower]);
            let b = dry_air_fields(&table.rows()[upper]);
            for (i, v) in dry_air_fields(&res.row).iter().enumerate() {
                prop_assert!(within(*v, a[i], b[i]));
            }
        }
    }

    #[test]
    fn rejecting_tables_never_return_partial_rows(
        t in prop_oneof![-1e6f64..-0.001, 370.001f64..1e6]
    ) {
        let err = SaturatedWaterTable::new().query_by_temperature(t).unwrap_err();
        let is_range_error = matches!(err, QueryError::Range { .. });
        prop_assert!(is_range_error);
    }
}
