use std::io::{BufRead, Write};

use crate::app::{self, AppError};
use crate::catalog::{Module, PropertyTables};
use crate::error::QueryError;
use crate::i18n::{keys, Translator};
use crate::report::{localize_error, Report, TableView};
use crate::tables::Axis;
use crate::units::DisplayUnits;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Module(Module),
    Exit,
}

/// 줄 단위 입출력 콘솔. 테스트에서는 `Cursor`와 `Vec<u8>`을 꽂아 쓴다.
pub struct Console<'a, R, W> {
    input: R,
    output: W,
    tr: &'a Translator,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(input: R, output: W, tr: &'a Translator) -> Self {
        Self { input, output, tr }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 번역문 한 줄을 출력한다.
    pub fn say(&mut self, key: &str) -> Result<(), AppError> {
        writeln!(self.output, "{}", self.tr.t(key))?;
        Ok(())
    }

    /// 메인 메뉴를 표시하고 선택값을 반환한다. 입력이 끝나면 `Exit`.
    pub fn main_menu(&mut self) -> Result<MenuChoice, AppError> {
        for key in [
            keys::MAIN_MENU_TITLE,
            keys::MAIN_MENU_MOIST_AIR,
            keys::MAIN_MENU_SATURATED_WATER,
            keys::MAIN_MENU_STEAM,
            keys::MAIN_MENU_DRY_AIR,
            keys::MAIN_MENU_EXIT,
        ] {
            self.say(key)?;
        }
        loop {
            let prompt = self.tr.t(keys::PROMPT_MENU_SELECT).into_owned();
            let Some(sel) = self.read_line(&prompt)? else {
                return Ok(MenuChoice::Exit);
            };
            match sel.trim() {
                "1" => return Ok(MenuChoice::Module(Module::MoistAir)),
                "2" => return Ok(MenuChoice::Module(Module::SaturatedWater)),
                "3" => return Ok(MenuChoice::Module(Module::Steam)),
                "4" => return Ok(MenuChoice::Module(Module::DryAir)),
                "0" => return Ok(MenuChoice::Exit),
                _ => self.say(keys::INVALID_SELECTION_RETRY)?,
            }
        }
    }

    /// 선택된 모듈 화면. 조회 오류는 출력하고 같은 화면에 머문다.
    pub fn handle_module(
        &mut self,
        module: Module,
        tables: &PropertyTables,
        units: &DisplayUnits,
    ) -> Result<(), AppError> {
        writeln!(self.output, "\n-- {} --", self.tr.t(module.heading_key()))?;
        if module == Module::MoistAir {
            return self.handle_moist_air(tables, units);
        }
        let options = if module.axes().contains(&Axis::Pressure) {
            keys::QUERY_OPTIONS_DUAL
        } else {
            keys::QUERY_OPTIONS_SINGLE
        };
        loop {
            self.say(options)?;
            let prompt = self.tr.t(keys::PROMPT_SELECT).into_owned();
            let Some(sel) = self.read_line(&prompt)? else {
                return Ok(());
            };
            let axis = match sel.trim() {
                "1" => Axis::Temperature,
                "2" if module.axes().contains(&Axis::Pressure) => Axis::Pressure,
                "3" => {
                    if let Some(view) = app::reference_table(tables, module, units) {
                        self.print_table(&view)?;
                    }
                    continue;
                }
                "0" => return Ok(()),
                _ => {
                    self.say(keys::INVALID_SELECTION_RETRY)?;
                    continue;
                }
            };
            let prompt = self.axis_prompt(tables, module, axis, units);
            let Some(text) = self.read_line(&prompt)? else {
                return Ok(());
            };
            match app::query_table(tables, module, axis, &text, units) {
                Ok(report) => self.print_report(&report)?,
                Err(err) => self.print_error(&err, units)?,
            }
        }
    }

    fn handle_moist_air(
        &mut self,
        tables: &PropertyTables,
        units: &DisplayUnits,
    ) -> Result<(), AppError> {
        let t_prompt = self.axis_prompt(tables, Module::MoistAir, Axis::Temperature, units);
        let Some(t) = self.read_line(&t_prompt)? else {
            return Ok(());
        };
        let rh_prompt = format!("{}: ", self.tr.t(keys::PROMPT_RELATIVE_HUMIDITY));
        let Some(rh) = self.read_line(&rh_prompt)? else {
            return Ok(());
        };
        match app::calculate_moist_air(tables, &t, &rh, units) {
            Ok(report) => self.print_report(&report),
            Err(err) => self.print_error(&err, units),
        }
    }

    /// "온도 [°C] (범위: ...): " 형태의 입력 안내.
    fn axis_prompt(
        &self,
        tables: &PropertyTables,
        module: Module,
        axis: Axis,
        units: &DisplayUnits,
    ) -> String {
        let (label, unit) = match (module, axis) {
            (Module::MoistAir, _) => (keys::PROMPT_DRY_BULB, units.temperature.symbol()),
            (_, Axis::Temperature) => (keys::PROMPT_TEMPERATURE, units.temperature.symbol()),
            (_, Axis::Pressure) => (keys::PROMPT_PRESSURE, units.pressure.symbol()),
        };
        match app::range_hint(tables, module, axis, units, self.tr) {
            Some(hint) => format!("{} [{unit}] ({hint}): ", self.tr.t(label)),
            None => format!("{} [{unit}]: ", self.tr.t(label)),
        }
    }

    pub fn print_report(&mut self, report: &Report) -> Result<(), AppError> {
        let labels: Vec<_> = report
            .lines
            .iter()
            .map(|l| self.tr.t(l.label_key).into_owned())
            .collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        for (label, line) in labels.iter().zip(&report.lines) {
            let pad = width - label.chars().count();
            writeln!(
                self.output,
                "  {label}{:pad$} : {} {}",
                "",
                line.value,
                line.unit
            )?;
        }
        if let Some(note) = report.note_key {
            writeln!(self.output, "  ({})", self.tr.t(note))?;
        }
        Ok(())
    }

    pub fn print_table(&mut self, view: &TableView) -> Result<(), AppError> {
        writeln!(self.output, "\n{}", self.tr.t(keys::HEADING_REFERENCE_TABLE))?;
        let header: Vec<String> = view
            .columns
            .iter()
            .map(|(key, unit)| format!("{} [{unit}]", self.tr.t(key)))
            .collect();
        writeln!(self.output, "{}", header.join(" | "))?;
        for row in &view.rows {
            writeln!(self.output, "{}", row.join(" | "))?;
        }
        Ok(())
    }

    pub fn print_error(&mut self, err: &QueryError, units: &DisplayUnits) -> Result<(), AppError> {
        writeln!(
            self.output,
            "{}: {}",
            self.tr.t(keys::ERROR_PREFIX),
            localize_error(err, self.tr, units)
        )?;
        Ok(())
    }

    /// 안내문을 출력하고 한 줄을 읽는다. EOF면 `None`.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(script: &str) -> String {
        let tr = Translator::new("en");
        let tables = PropertyTables::default();
        let units = DisplayUnits::default();
        let mut console = Console::new(Cursor::new(script.to_string()), Vec::new(), &tr);
        console
            .handle_module(Module::SaturatedWater, &tables, &units)
            .unwrap();
        String::from_utf8(console.into_output()).unwrap()
    }

    #[test]
    fn query_then_back() {
        let out = run_script("1\n20\n0\n");
        assert!(out.contains("Density"), "{out}");
        assert!(out.contains("998.20"), "{out}");
        assert!(out.contains("Exact table row"), "{out}");
    }

    #[test]
    fn errors_do_not_leave_the_module() {
        let out = run_script("1\nabc\n1\n400\n2\n3000\n");
        assert!(out.contains("'abc' is not a valid number"), "{out}");
        assert!(out.contains("above the data range"), "{out}");
        assert!(out.contains("interpolated"), "{out}");
    }

    #[test]
    fn menu_retries_then_exits_on_eof() {
        let tr = Translator::new("en");
        let mut console = Console::new(Cursor::new("9\n3\n"), Vec::new(), &tr);
        assert_eq!(
            console.main_menu().unwrap(),
            MenuChoice::Module(Module::Steam)
        );
        assert_eq!(console.main_menu().unwrap(), MenuChoice::Exit);
        let out = String::from_utf8(console.into_output()).unwrap();
        assert!(out.contains("Invalid input"));
    }
}
