//! CLI와 GUI가 함께 쓰는 조회 흐름과 대화형 메뉴 루프.

use std::io::{self, BufRead, Write};

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Module, PropertyTables};
use crate::config::{Config, ConfigError};
use crate::error::QueryError;
use crate::i18n::{keys, Translator};
use crate::input::{parse_axis_value, parse_dry_bulb, parse_number};
use crate::report::{self, format_axis_value, Report, TableView};
use crate::tables::Axis;
use crate::ui_cli::{Console, MenuChoice};
use crate::units::DisplayUnits;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 콘솔/파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// 설정 저장/로드 오류
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// 물성 조회 오류 (단발 CLI 명령에서만 여기까지 올라온다)
    #[error(transparent)]
    Query(#[from] QueryError),
}

/// 표 모듈을 `axis` 기준으로 조회해 결과 줄을 만든다.
///
/// `text`는 `units`의 표시 단위로 해석한다. 습공기는 표가 아니므로
/// `UnsupportedAxis`를 돌려준다.
pub fn query_table(
    tables: &PropertyTables,
    module: Module,
    axis: Axis,
    text: &str,
    units: &DisplayUnits,
) -> Result<Report, QueryError> {
    let value = parse_axis_value(axis, text, units)?;
    debug!(?module, %axis, value, "table query");
    match module {
        Module::SaturatedWater => {
            let res = tables.saturated_water.query(axis, value)?;
            Ok(report::saturated_water(&res, units))
        }
        Module::Steam => {
            let res = tables.steam.query(axis, value)?;
            Ok(report::steam(&res, units))
        }
        Module::DryAir => {
            let res = tables.dry_air.query(axis, value)?;
            Ok(report::dry_air(&res, units))
        }
        Module::MoistAir => Err(QueryError::UnsupportedAxis {
            table: "moist air",
            axis,
        }),
    }
}

/// 건구온도(표시 단위)와 상대습도[%] 문자열로 습공기 상태를 계산한다.
pub fn calculate_moist_air(
    tables: &PropertyTables,
    dry_bulb: &str,
    relative_humidity: &str,
    units: &DisplayUnits,
) -> Result<Report, QueryError> {
    let t = parse_dry_bulb(dry_bulb, units)?;
    let rh = parse_number("relative humidity", relative_humidity)?;
    let state = tables.moist_air.calculate(t, rh)?;
    Ok(report::moist_air(&state, units))
}

/// 전체 물성표. 습공기는 표가 없어 `None`.
pub fn reference_table(
    tables: &PropertyTables,
    module: Module,
    units: &DisplayUnits,
) -> Option<TableView> {
    match module {
        Module::SaturatedWater => Some(report::saturated_water_table(
            tables.saturated_water.rows(),
            units,
        )),
        Module::Steam => Some(report::steam_table(tables.steam.rows(), units)),
        Module::DryAir => Some(report::dry_air_table(tables.dry_air.rows(), units)),
        Module::MoistAir => None,
    }
}

/// 축 열의 데이터 범위를 표시 단위로 안내하는 문구.
pub fn range_hint(
    tables: &PropertyTables,
    module: Module,
    axis: Axis,
    units: &DisplayUnits,
    tr: &Translator,
) -> Option<String> {
    let (min, max) = match module {
        Module::SaturatedWater => tables.saturated_water.range(axis)?,
        Module::Steam => tables.steam.range(axis)?,
        Module::DryAir => tables.dry_air.range().filter(|_| axis == Axis::Temperature)?,
        Module::MoistAir => match axis {
            Axis::Temperature => crate::air::moist_air::DRY_BULB_RANGE_C,
            Axis::Pressure => return None,
        },
    };
    let unit = match axis {
        Axis::Temperature => units.temperature.symbol(),
        Axis::Pressure => units.pressure.symbol(),
    };
    let strip = |v: f64| {
        let s = format_axis_value(axis, v, units);
        s.trim_end_matches(unit).trim_end().to_string()
    };
    Some(tr.format(
        keys::RANGE_HINT,
        &[("min", strip(min)), ("max", strip(max)), ("unit", unit.to_string())],
    ))
}

/// 표준 입출력으로 대화형 메뉴를 실행한다.
pub fn run(config: &Config, tables: &PropertyTables, tr: &Translator) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut console = Console::new(stdin.lock(), stdout.lock(), tr);
    run_with(&mut console, config, tables)
}

/// 메뉴 루프 본체. 입력이 끝나거나(EOF) 종료를 고르면 돌아온다.
pub fn run_with<R: BufRead, W: Write>(
    console: &mut Console<'_, R, W>,
    config: &Config,
    tables: &PropertyTables,
) -> Result<(), AppError> {
    loop {
        match console.main_menu()? {
            MenuChoice::Module(module) => {
                console.handle_module(module, tables, &config.units.get(module))?
            }
            MenuChoice::Exit => {
                console.say(keys::APP_EXIT)?;
                break;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::{PressureUnit, TemperatureUnit};

    #[test]
    fn queries_each_table_module() {
        let tables = PropertyTables::default();
        let units = DisplayUnits::default();
        for module in [Module::SaturatedWater, Module::Steam, Module::DryAir] {
            let report = query_table(&tables, module, Axis::Temperature, "50", &units).unwrap();
            assert_eq!(report.lines[0].value, "50.00", "{module:?}");
        }
    }

    #[test]
    fn input_follows_display_units() {
        let tables = PropertyTables::default();
        let units = DisplayUnits::new(TemperatureUnit::Kelvin, PressureUnit::Bar);
        let report =
            query_table(&tables, Module::Steam, Axis::Pressure, "1.013", &units).unwrap();
        assert_eq!(report.lines[0].value, "1.01300");
        assert_eq!(report.lines[1].value, "373.15");
    }

    #[test]
    fn moist_air_is_not_a_table() {
        let tables = PropertyTables::default();
        let err = query_table(
            &tables,
            Module::MoistAir,
            Axis::Temperature,
            "20",
            &DisplayUnits::default(),
        )
        .unwrap_err();
        assert!(matches!(err, QueryError::UnsupportedAxis { .. }));
        assert!(reference_table(&tables, Module::MoistAir, &DisplayUnits::default()).is_none());
    }

    #[test]
    fn moist_air_from_text() {
        let tables = PropertyTables::default();
        let units = DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::KiloPascal);
        let report = calculate_moist_air(&tables, "30", "50", &units).unwrap();
        assert_eq!(report.lines.len(), 10);
        let err = calculate_moist_air(&tables, "30", "", &units).unwrap_err();
        assert!(matches!(err, QueryError::Parse { field: "relative humidity", .. }));
    }

    #[test]
    fn range_hint_in_display_units() {
        let tables = PropertyTables::default();
        let tr = Translator::new("en");
        let units = DisplayUnits::default();
        let hint = range_hint(&tables, Module::SaturatedWater, Axis::Temperature, &units, &tr);
        assert_eq!(hint.as_deref(), Some("Range: 0.00 ~ 370.00 °C"));
        assert!(range_hint(&tables, Module::DryAir, Axis::Pressure, &units, &tr).is_none());
    }
}
