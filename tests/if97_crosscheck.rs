//! 수록된 포화압력을 IAPWS-IF97(seuif97)과 비교한다.

use seuif97::{tx, OP};
use thermo_property_tables::steam::SteamTable;
use thermo_property_tables::water::SaturatedWaterTable;

/// IF97 포화압력 [Pa]. seuif97은 MPa를 돌려준다.
fn if97_saturation_pressure_pa(t_c: f64) -> f64 {
    tx(t_c, 0.0, OP) * 1e6
}

fn assert_within_one_percent(label: &str, t_c: f64, tabulated_pa: f64) {
    let reference = if97_saturation_pressure_pa(t_c);
    let rel = (tabulated_pa - reference).abs() / reference;
    assert!(
        rel < 0.01,
        "{label} {t_c} °C: table {tabulated_pa:.1} Pa, IF97 {reference:.1} Pa ({:.3} %)",
        rel * 100.0
    );
}

#[test]
fn saturated_water_pressures_match_if97() {
    for row in SaturatedWaterTable::new().rows() {
        // 0 °C는 삼중점(0.01 °C) 아래라 IF97 포화선 밖이다.
        if row.temperature_c < 10.0 {
            continue;
        }
        assert_within_one_percent("water", row.temperature_c, row.pressure_pa);
    }
}

#[test]
fn steam_pressures_match_if97() {
    for row in SteamTable::new().rows() {
        if row.temperature_c < 10.0 {
            continue;
        }
        assert_within_one_percent("steam", row.temperature_c, row.pressure_pa);
    }
}

#[test]
fn interpolated_pressure_stays_close_to_if97() {
    let table = SaturatedWaterTable::new();
    for t in [25.0, 95.0, 155.0, 245.0] {
        let res = table.query_by_temperature(t).unwrap();
        let reference = if97_saturation_pressure_pa(t);
        // 10 °C 간격 선형 보간은 지수 곡선보다 위에 놓인다.
        assert!(res.row.pressure_pa >= reference * 0.99, "{t}");
        assert!(res.row.pressure_pa <= reference * 1.05, "{t}");
    }
}
