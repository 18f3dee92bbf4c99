//! 표는 생성 후 읽기 전용이므로 잠금 없이 여러 스레드에서 조회할 수 있다.

use std::thread;

use thermo_property_tables::catalog::PropertyTables;
use thermo_property_tables::tables::Axis;

#[test]
fn shared_tables_answer_consistently_across_threads() {
    let tables = PropertyTables::default();
    let expected = tables.saturated_water.query(Axis::Temperature, 42.5).unwrap();

    thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let tables = &tables;
                s.spawn(move || {
                    for k in 0..200 {
                        let t = (i * 200 + k) as f64 % 370.0;
                        tables.saturated_water.query(Axis::Temperature, t).unwrap();
                        tables.steam.query(Axis::Pressure, 1e3 + t * 5e4).unwrap();
                        tables.dry_air.query_by_temperature(t).unwrap();
                        tables.moist_air.calculate(t.min(95.0) - 40.0, 50.0).unwrap();
                    }
                    tables.saturated_water.query(Axis::Temperature, 42.5).unwrap()
                })
            })
            .collect();
        for h in handles {
            assert_eq!(h.join().unwrap(), expected);
        }
    });
}
