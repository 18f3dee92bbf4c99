//! 조회 결과를 (라벨 키, 표시 문자열, 단위) 줄 목록으로 만든다.
//!
//! CLI와 GUI가 같은 줄 목록을 그대로 출력하므로 숫자 형식과 순서는 여기서만 정한다.

use crate::air::{DryAirRow, MoistAirState};
use crate::error::QueryError;
use crate::i18n::{keys, Translator};
use crate::quantity::{NumberFormat, QuantityKind, QuantityValue};
use crate::steam::SteamRow;
use crate::tables::{Axis, Bound, Lookup, LookupSource};
use crate::units::{from_celsius, from_pascal, DisplayUnits, PressureUnit};
use crate::water::SaturatedWaterRow;

const TEMPERATURE_FORMAT: NumberFormat = NumberFormat::Fixed(2);

/// 결과 한 줄.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportLine {
    pub label_key: &'static str,
    pub value: String,
    pub unit: &'static str,
}

/// 결과 줄 목록과 부가 설명.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub lines: Vec<ReportLine>,
    /// 결과가 어떻게 만들어졌는지 설명하는 문구 키
    pub note_key: Option<&'static str>,
}

/// 전체 물성표 보기용 데이터.
#[derive(Debug, Clone, PartialEq)]
pub struct TableView {
    /// (라벨 키, 단위)
    pub columns: Vec<(&'static str, &'static str)>,
    pub rows: Vec<Vec<String>>,
}

/// 압력 단위별 표시 자릿수.
pub fn pressure_format(unit: PressureUnit) -> NumberFormat {
    match unit {
        PressureUnit::Pascal => NumberFormat::Fixed(1),
        PressureUnit::KiloPascal | PressureUnit::MmHg => NumberFormat::Fixed(3),
        PressureUnit::Bar => NumberFormat::Fixed(5),
        PressureUnit::MegaPascal => NumberFormat::Fixed(6),
        PressureUnit::MilliBar => NumberFormat::Fixed(2),
        PressureUnit::KgPerCm2 | PressureUnit::Psi | PressureUnit::Atm => NumberFormat::Fixed(4),
    }
}

fn line(
    label_key: &'static str,
    kind: QuantityKind,
    value_base: f64,
    format: NumberFormat,
    units: &DisplayUnits,
) -> ReportLine {
    let (value, unit) = QuantityValue::new(kind, value_base).in_units(units);
    ReportLine {
        label_key,
        value: format.format(value),
        unit,
    }
}

fn temperature_line(label_key: &'static str, value_c: f64, units: &DisplayUnits) -> ReportLine {
    line(label_key, QuantityKind::Temperature, value_c, TEMPERATURE_FORMAT, units)
}

fn pressure_line(label_key: &'static str, value_pa: f64, units: &DisplayUnits) -> ReportLine {
    let format = pressure_format(units.pressure);
    line(label_key, QuantityKind::Pressure, value_pa, format, units)
}

/// 조회 출처에 따른 설명 문구 키.
pub fn note_for(source: &LookupSource) -> &'static str {
    match source {
        LookupSource::Exact { .. } => keys::NOTE_EXACT,
        LookupSource::Interpolated { .. } => keys::NOTE_INTERPOLATED,
        LookupSource::Clamped { bound: Bound::Lower } => keys::NOTE_CLAMPED_LOWER,
        LookupSource::Clamped { bound: Bound::Upper } => keys::NOTE_CLAMPED_UPPER,
    }
}

/// 압력으로 조회했으면 압력 줄을 맨 앞으로 올린다.
fn axis_first(mut lines: Vec<ReportLine>, axis: Axis) -> Vec<ReportLine> {
    if axis == Axis::Pressure && lines.len() >= 2 {
        lines.swap(0, 1);
    }
    lines
}

fn saturated_water_lines(row: &SaturatedWaterRow, units: &DisplayUnits) -> Vec<ReportLine> {
    use QuantityKind as Q;
    vec![
        temperature_line(keys::PROP_TEMPERATURE, row.temperature_c, units),
        pressure_line(keys::PROP_PRESSURE, row.pressure_pa, units),
        line(keys::PROP_DENSITY, Q::Density, row.density_kg_m3, NumberFormat::Fixed(2), units),
        line(
            keys::PROP_ENTHALPY,
            Q::SpecificEnthalpy,
            row.enthalpy_kj_kg,
            NumberFormat::Fixed(2),
            units,
        ),
        line(
            keys::PROP_SPECIFIC_HEAT,
            Q::SpecificHeat,
            row.specific_heat_kj_kgk,
            NumberFormat::Fixed(3),
            units,
        ),
        line(
            keys::PROP_THERMAL_CONDUCTIVITY,
            Q::ThermalConductivity,
            row.thermal_conductivity_w_mk,
            NumberFormat::Fixed(4),
            units,
        ),
        line(
            keys::PROP_THERMAL_DIFFUSIVITY,
            Q::ThermalDiffusivity,
            row.thermal_diffusivity_m2_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(
            keys::PROP_DYNAMIC_VISCOSITY,
            Q::DynamicViscosity,
            row.dynamic_viscosity_pa_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(
            keys::PROP_KINEMATIC_VISCOSITY,
            Q::KinematicViscosity,
            row.kinematic_viscosity_m2_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(
            keys::PROP_EXPANSION_COEFFICIENT,
            Q::ExpansionCoefficient,
            row.expansion_coefficient_per_k,
            NumberFormat::Scientific(2),
            units,
        ),
        line(
            keys::PROP_SURFACE_TENSION,
            Q::SurfaceTension,
            row.surface_tension_n_m,
            NumberFormat::Fixed(5),
            units,
        ),
        line(keys::PROP_PRANDTL, Q::Dimensionless, row.prandtl, NumberFormat::Fixed(2), units),
    ]
}

fn steam_lines(row: &SteamRow, units: &DisplayUnits) -> Vec<ReportLine> {
    use QuantityKind as Q;
    vec![
        temperature_line(keys::PROP_TEMPERATURE, row.temperature_c, units),
        pressure_line(keys::PROP_PRESSURE, row.pressure_pa, units),
        line(keys::PROP_DENSITY, Q::Density, row.density_kg_m3, NumberFormat::Fixed(5), units),
        line(
            keys::PROP_ENTHALPY,
            Q::SpecificEnthalpy,
            row.enthalpy_kj_kg,
            NumberFormat::Fixed(1),
            units,
        ),
        line(
            keys::PROP_LATENT_HEAT,
            Q::SpecificEnthalpy,
            row.latent_heat_kj_kg,
            NumberFormat::Fixed(1),
            units,
        ),
        line(
            keys::PROP_SPECIFIC_HEAT,
            Q::SpecificHeat,
            row.specific_heat_kj_kgk,
            NumberFormat::Fixed(4),
            units,
        ),
        line(
            keys::PROP_THERMAL_CONDUCTIVITY,
            Q::ThermalConductivity,
            row.thermal_conductivity_w_mk,
            NumberFormat::Fixed(4),
            units,
        ),
        line(
            keys::PROP_THERMAL_DIFFUSIVITY,
            Q::ThermalDiffusivity,
            row.thermal_diffusivity_m2_s,
            NumberFormat::Scientific(2),
            units,
        ),
        line(
            keys::PROP_DYNAMIC_VISCOSITY,
            Q::DynamicViscosity,
            row.dynamic_viscosity_pa_s,
            NumberFormat::Scientific(2),
            units,
        ),
        line(
            keys::PROP_KINEMATIC_VISCOSITY,
            Q::KinematicViscosity,
            row.kinematic_viscosity_m2_s,
            NumberFormat::Scientific(2),
            units,
        ),
        line(keys::PROP_PRANDTL, Q::Dimensionless, row.prandtl, NumberFormat::Fixed(3), units),
    ]
}

fn dry_air_lines(row: &DryAirRow, units: &DisplayUnits) -> Vec<ReportLine> {
    use QuantityKind as Q;
    vec![
        temperature_line(keys::PROP_TEMPERATURE, row.temperature_c, units),
        line(keys::PROP_DENSITY, Q::Density, row.density_kg_m3, NumberFormat::Fixed(4), units),
        line(
            keys::PROP_SPECIFIC_HEAT,
            Q::SpecificHeat,
            row.specific_heat_kj_kgk,
            NumberFormat::Fixed(4),
            units,
        ),
        line(
            keys::PROP_THERMAL_CONDUCTIVITY,
            Q::ThermalConductivity,
            row.thermal_conductivity_w_mk,
            NumberFormat::Fixed(5),
            units,
        ),
        line(
            keys::PROP_THERMAL_DIFFUSIVITY,
            Q::ThermalDiffusivity,
            row.thermal_diffusivity_m2_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(
            keys::PROP_DYNAMIC_VISCOSITY,
            Q::DynamicViscosity,
            row.dynamic_viscosity_pa_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(
            keys::PROP_KINEMATIC_VISCOSITY,
            Q::KinematicViscosity,
            row.kinematic_viscosity_m2_s,
            NumberFormat::Scientific(3),
            units,
        ),
        line(keys::PROP_PRANDTL, Q::Dimensionless, row.prandtl, NumberFormat::Fixed(3), units),
    ]
}

pub fn saturated_water(lookup: &Lookup<SaturatedWaterRow>, units: &DisplayUnits) -> Report {
    Report {
        lines: axis_first(saturated_water_lines(&lookup.row, units), lookup.axis),
        note_key: Some(note_for(&lookup.source)),
    }
}

pub fn steam(lookup: &Lookup<SteamRow>, units: &DisplayUnits) -> Report {
    Report {
        lines: axis_first(steam_lines(&lookup.row, units), lookup.axis),
        note_key: Some(note_for(&lookup.source)),
    }
}

pub fn dry_air(lookup: &Lookup<DryAirRow>, units: &DisplayUnits) -> Report {
    Report {
        lines: dry_air_lines(&lookup.row, units),
        note_key: Some(note_for(&lookup.source)),
    }
}

/// 습공기 결과. 엔탈피는 kJ/kg, 습도비는 g/kg 으로 보여준다.
pub fn moist_air(state: &MoistAirState, units: &DisplayUnits) -> Report {
    use QuantityKind as Q;
    let lines = vec![
        pressure_line(keys::PROP_AMBIENT_PRESSURE, state.pressure_pa, units),
        line(
            keys::PROP_HUMIDITY_RATIO,
            Q::HumidityRatio,
            state.humidity_ratio * 1000.0,
            NumberFormat::Fixed(4),
            units,
        ),
        temperature_line(keys::PROP_WET_BULB, state.wet_bulb_c, units),
        temperature_line(keys::PROP_DEW_POINT, state.dew_point_c, units),
        temperature_line(keys::PROP_SATURATION_TEMPERATURE, state.saturation_temperature_c, units),
        line(
            keys::PROP_ENTHALPY,
            Q::SpecificEnthalpy,
            state.enthalpy_j_kg / 1000.0,
            NumberFormat::Fixed(3),
            units,
        ),
        pressure_line(keys::PROP_VAPOR_PRESSURE, state.vapor_pressure_pa, units),
        line(
            keys::PROP_SPECIFIC_HEAT,
            Q::SpecificHeat,
            state.specific_heat_kj_kgk,
            NumberFormat::Fixed(4),
            units,
        ),
        line(
            keys::PROP_SPECIFIC_VOLUME,
            Q::SpecificVolume,
            state.specific_volume_m3_kg,
            NumberFormat::Fixed(4),
            units,
        ),
        line(keys::PROP_DENSITY, Q::Density, state.density_kg_m3, NumberFormat::Fixed(4), units),
    ];
    Report {
        lines,
        note_key: Some(keys::NOTE_SATURATION_PLACEHOLDER),
    }
}

fn table_view<R>(rows: &[R], to_lines: impl Fn(&R) -> Vec<ReportLine>) -> TableView {
    let mut columns = Vec::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let lines = to_lines(row);
        if columns.is_empty() {
            columns = lines.iter().map(|l| (l.label_key, l.unit)).collect();
        }
        out.push(lines.into_iter().map(|l| l.value).collect());
    }
    TableView { columns, rows: out }
}

pub fn saturated_water_table(rows: &[SaturatedWaterRow], units: &DisplayUnits) -> TableView {
    table_view(rows, |r| saturated_water_lines(r, units))
}

pub fn steam_table(rows: &[SteamRow], units: &DisplayUnits) -> TableView {
    table_view(rows, |r| steam_lines(r, units))
}

pub fn dry_air_table(rows: &[DryAirRow], units: &DisplayUnits) -> TableView {
    table_view(rows, |r| dry_air_lines(r, units))
}

/// 축 값(기준 단위)을 표시 단위 문자열로.
pub fn format_axis_value(axis: Axis, value: f64, units: &DisplayUnits) -> String {
    match axis {
        Axis::Temperature => format!(
            "{} {}",
            TEMPERATURE_FORMAT.format(from_celsius(value, units.temperature)),
            units.temperature.symbol()
        ),
        Axis::Pressure => format!(
            "{} {}",
            pressure_format(units.pressure).format(from_pascal(value, units.pressure)),
            units.pressure.symbol()
        ),
    }
}

/// 입력 항목 이름을 번역 키로. 알 수 없는 이름이면 `None`.
fn field_key(field: &str) -> Option<&'static str> {
    match field {
        "temperature" => Some(keys::PROP_TEMPERATURE),
        "pressure" => Some(keys::PROP_PRESSURE),
        "dry bulb temperature" => Some(keys::PROMPT_DRY_BULB),
        "relative humidity" => Some(keys::PROMPT_RELATIVE_HUMIDITY),
        _ => None,
    }
}

fn field_label(tr: &Translator, field: &str) -> String {
    match field_key(field) {
        Some(key) => tr.t(key).into_owned(),
        None => field.to_string(),
    }
}

/// 사용자에게 보여줄 오류 문구.
pub fn localize_error(err: &QueryError, tr: &Translator, units: &DisplayUnits) -> String {
    let key = err.message_key();
    match err {
        QueryError::Parse { field, input } => tr.format(
            key,
            &[("field", field_label(tr, field)), ("input", input.clone())],
        ),
        QueryError::InputRange {
            quantity,
            value,
            min,
            max,
        } => {
            let show = |v: f64| {
                if *quantity == "dry bulb temperature" {
                    format_axis_value(Axis::Temperature, v, units)
                } else if *quantity == "relative humidity" {
                    format!("{v} %")
                } else {
                    v.to_string()
                }
            };
            tr.format(
                key,
                &[
                    ("field", field_label(tr, quantity)),
                    ("value", show(*value)),
                    ("min", show(*min)),
                    ("max", show(*max)),
                ],
            )
        }
        QueryError::Range {
            axis,
            value,
            min,
            max,
            ..
        } => tr.format(
            key,
            &[
                ("value", format_axis_value(*axis, *value, units)),
                ("min", format_axis_value(*axis, *min, units)),
                ("max", format_axis_value(*axis, *max, units)),
            ],
        ),
        QueryError::UnsupportedAxis { axis, .. } => {
            tr.format(key, &[("field", field_label(tr, axis.as_str()))])
        }
        QueryError::Psychrometric(e) => tr.format(key, &[("detail", e.to_string())]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::SteamTable;
    use crate::units::TemperatureUnit;
    use crate::water::SaturatedWaterTable;

    fn water_units() -> DisplayUnits {
        DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Pascal)
    }

    #[test]
    fn temperature_query_lists_temperature_first() {
        let res = SaturatedWaterTable::new().query_by_temperature(20.0).unwrap();
        let report = saturated_water(&res, &water_units());
        assert_eq!(report.lines[0].label_key, keys::PROP_TEMPERATURE);
        assert_eq!(report.lines[0].value, "20.00");
        assert_eq!(report.lines[2].value, "998.20");
        assert_eq!(report.lines.len(), 12);
        assert_eq!(report.note_key, Some(keys::NOTE_EXACT));
    }

    #[test]
    fn pressure_query_lists_pressure_first() {
        let res = SaturatedWaterTable::new().query_by_pressure(2338.0).unwrap();
        let report = saturated_water(&res, &water_units());
        assert_eq!(report.lines[0].label_key, keys::PROP_PRESSURE);
        assert_eq!(report.lines[0].unit, "Pa");
        assert_eq!(report.lines[1].label_key, keys::PROP_TEMPERATURE);
    }

    #[test]
    fn steam_pressure_shown_in_table_units() {
        let units = DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Bar);
        let res = SteamTable::new().query_by_temperature(100.0).unwrap();
        let report = steam(&res, &units);
        assert_eq!(report.lines[1].value, "1.01300");
        assert_eq!(report.lines[1].unit, "×10⁵ Pa");
        assert_eq!(report.lines[4].label_key, keys::PROP_LATENT_HEAT);
    }

    #[test]
    fn clamped_result_carries_note() {
        let units = DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Bar);
        let res = SteamTable::new().query_by_pressure(500e5).unwrap();
        assert_eq!(steam(&res, &units).note_key, Some(keys::NOTE_CLAMPED_UPPER));
    }

    #[test]
    fn moist_air_report_order_and_units() {
        let state = crate::air::MoistAirCalculator::new().calculate(30.0, 50.0).unwrap();
        let units = DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::KiloPascal);
        let report = moist_air(&state, &units);
        let order: Vec<_> = report.lines.iter().map(|l| l.label_key).collect();
        assert_eq!(
            order,
            [
                keys::PROP_AMBIENT_PRESSURE,
                keys::PROP_HUMIDITY_RATIO,
                keys::PROP_WET_BULB,
                keys::PROP_DEW_POINT,
                keys::PROP_SATURATION_TEMPERATURE,
                keys::PROP_ENTHALPY,
                keys::PROP_VAPOR_PRESSURE,
                keys::PROP_SPECIFIC_HEAT,
                keys::PROP_SPECIFIC_VOLUME,
                keys::PROP_DENSITY,
            ]
        );
        assert_eq!(report.lines[0].value, "101.325");
        assert_eq!(report.lines[4].value, "100.00");
        assert_eq!(report.lines[5].unit, "kJ/kg");
    }

    #[test]
    fn reference_table_has_one_row_per_entry() {
        let table = SaturatedWaterTable::new();
        let view = saturated_water_table(table.rows(), &water_units());
        assert_eq!(view.rows.len(), 38);
        assert_eq!(view.columns.len(), 12);
        assert!(view.rows.iter().all(|r| r.len() == 12));
    }

    #[test]
    fn range_error_uses_display_units() {
        let tr = Translator::new("en");
        let err = SaturatedWaterTable::new().query_by_temperature(400.0).unwrap_err();
        let msg = localize_error(&err, &tr, &water_units());
        assert_eq!(msg, "Input 400.00 °C is above the data range (0.00 °C ~ 370.00 °C).");
    }

    #[test]
    fn parse_error_names_the_field() {
        let tr = Translator::new("en");
        let err = SaturatedWaterTable::new()
            .query_text(Axis::Pressure, "abc")
            .unwrap_err();
        let msg = localize_error(&err, &tr, &water_units());
        assert_eq!(msg, "'abc' is not a valid number (Pressure).");
    }
}
