//! 대화형 메뉴 전체 흐름과 설정 파일 연동.

use std::io::Cursor;

use tempfile::tempdir;
use thermo_property_tables::app;
use thermo_property_tables::catalog::PropertyTables;
use thermo_property_tables::config::{self, Config};
use thermo_property_tables::i18n::Translator;
use thermo_property_tables::ui_cli::Console;
use thermo_property_tables::units::{PressureUnit, TemperatureUnit};

fn session(cfg: &Config, lang: &str, script: &str) -> String {
    let tr = Translator::new(lang);
    let tables = PropertyTables::new(cfg.psychrometric_model);
    let mut console = Console::new(Cursor::new(script.to_string()), Vec::new(), &tr);
    app::run_with(&mut console, cfg, &tables).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn visits_every_module_then_exits() {
    let script = "1\n30\n50\n2\n1\n20\n0\n3\n2\n1.013\n0\n4\n1\n25\n0\n0\n";
    let out = session(&Config::default(), "en", script);
    assert!(out.contains("Humidity ratio"), "{out}");
    assert!(out.contains("998.20"), "{out}");
    assert!(out.contains("Latent heat"), "{out}");
    assert!(out.contains("2257.1"), "{out}");
    assert!(out.contains("1.1850"), "{out}");
    assert!(out.trim_end().ends_with("Exiting application."), "{out}");
}

#[test]
fn moist_air_errors_are_reported_and_menu_continues() {
    let out = session(&Config::default(), "en", "1\n120\n50\n1\n30\n0\n0\n");
    assert!(out.contains("Error:"), "{out}");
    assert!(out.contains("must be within"), "{out}");
    assert!(out.contains("Psychrometric calculation failed"), "{out}");
}

#[test]
fn eof_ends_the_session() {
    let out = session(&Config::default(), "ko", "2\n1\n");
    assert!(out.contains("포화수 열물성"), "{out}");
    assert!(out.contains("프로그램을 종료합니다."), "{out}");
}

#[test]
fn units_from_config_file_drive_input_and_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.units.saturated_water.temperature = TemperatureUnit::Fahrenheit;
    cfg.units.saturated_water.pressure = PressureUnit::KiloPascal;
    cfg.save_to(&path).unwrap();

    let loaded = config::load_from(&path).unwrap();
    let out = session(&loaded, "en", "2\n1\n212\n0\n0\n");
    assert!(out.contains("[°F]"), "{out}");
    assert!(out.contains("101.300 kPa"), "{out}");
    assert!(out.contains("958.40"), "{out}");
}

#[test]
fn reference_table_is_printed_from_menu() {
    let out = session(&Config::default(), "en", "4\n3\n0\n0\n");
    assert!(out.contains("Reference table"), "{out}");
    assert!(out.lines().any(|l| l.starts_with("1200.00 |")), "{out}");
}
