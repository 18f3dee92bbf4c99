#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::{fs, path::Path, path::PathBuf};

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use thermo_property_tables::{
    air::PsychroModel,
    app,
    catalog::{Module, PropertyTables},
    config::{self, Config},
    i18n::{self, keys, Language, Translator},
    report::{localize_error, Report, TableView},
    tables::Axis,
    units::{DisplayUnits, PressureUnit, TemperatureUnit},
};
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "thermo_property_tables")]
struct GuiArgs {
    /// UI language (ko, en, zh-cn)
    #[arg(long, short = 'L')]
    lang: Option<String>,
    /// Path to config.toml
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<(), eframe::Error> {
    let args = GuiArgs::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILE));
    let app_cfg = config::load_or_create(&config_path).unwrap_or_default();

    let _ = tracing_subscriber::fmt()
        .with_max_level(app_cfg.tracing_level())
        .with_writer(std::io::stderr)
        .try_init();

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(egui::vec2(900.0, 640.0))
        .with_transparent(true);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let cli_lang = args.lang;
    eframe::run_native(
        "Thermophysical Property Tables",
        options,
        Box::new(move |cc| {
            let font_result = match app_cfg.font_path.as_deref() {
                Some(path) => load_custom_font(&cc.egui_ctx, path),
                None => setup_fonts(&cc.egui_ctx),
            };
            if let Err(e) = font_result {
                warn!("font setup: {e}");
            }
            let base_visuals = cc.egui_ctx.style().visuals.clone();
            Box::new(GuiApp::new(app_cfg, config_path, cli_lang, base_visuals))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 공통: 바이너리 폰트 바이트를 egui에 등록.
fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .insert(0, font_name.clone());
    fonts
        .families
        .entry(egui::FontFamily::Monospace)
        .or_default()
        .insert(0, font_name);
    ctx.set_fonts(fonts);
}

/// 한글/중국어를 표시할 수 있는 시스템 글꼴을 찾아 적용한다.
/// 1) assets/fonts 아래 글꼴
/// 2) Windows 글꼴 폴더 (맑은 고딕, 굴림, 微软雅黑)
/// 3) 일반적인 리눅스/맥 CJK 글꼴 경로
/// 모두 실패하면 Err. 설정 창에서 사용자 글꼴을 고르게 한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![
        PathBuf::from("assets/fonts/malgun.ttf"),
        PathBuf::from("assets/fonts/NotoSansCJK-Regular.ttc"),
    ];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        for name in ["malgun.ttf", "gulim.ttc", "msyh.ttc", "simsun.ttc"] {
            candidates.push(fonts.join(name));
        }
    }
    for p in [
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
        "/System/Library/Fonts/AppleSDGothicNeo.ttc",
    ] {
        candidates.push(PathBuf::from(p));
    }

    for p in candidates.iter().filter(|p| p.exists()) {
        let bytes =
            fs::read(p).map_err(|e| format!("Failed to read font file ({}): {e}", p.display()))?;
        apply_font_bytes(ctx, bytes, "cjk_font");
        info!(path = %p.display(), "font loaded");
        return Ok(());
    }
    Err("No CJK font found. Please choose a font file (.ttf/.ttc) in settings.".into())
}

/// 사용자가 선택한 경로의 폰트를 egui에 등록한다.
fn load_custom_font(ctx: &egui::Context, path: &Path) -> Result<(), String> {
    if !path.exists() {
        return Err(format!("Font file not found: {}", path.display()));
    }
    let bytes = fs::read(path).map_err(|e| format!("Failed to read font file: {e}"))?;
    apply_font_bytes(ctx, bytes, "user_font");
    Ok(())
}

/// 모듈 화면 하나의 입력과 결과.
#[derive(Default)]
struct ModulePage {
    temperature: String,
    pressure: String,
    relative_humidity: String,
    report: Option<Report>,
    error: Option<String>,
}

struct GuiApp {
    config: Config,
    config_path: PathBuf,
    tr: Translator,
    tables: PropertyTables,
    module: Module,
    pages: [ModulePage; 4],
    show_table_window: bool,
    show_settings: bool,
    settings_status: Option<String>,
    /// 투명도를 곱하기 전의 원본 색상. 매 프레임 여기서 다시 계산한다.
    base_visuals: egui::Visuals,
}

/// 원본 색상의 창/패널 배경에 투명도를 곱한다.
fn dimmed_visuals(base: &egui::Visuals, alpha: f32) -> egui::Visuals {
    let mut visuals = base.clone();
    visuals.window_fill = base.window_fill.linear_multiply(alpha);
    visuals.panel_fill = base.panel_fill.linear_multiply(alpha);
    visuals
}

fn page_index(module: Module) -> usize {
    match module {
        Module::MoistAir => 0,
        Module::SaturatedWater => 1,
        Module::Steam => 2,
        Module::DryAir => 3,
    }
}

impl GuiApp {
    fn new(
        config: Config,
        config_path: PathBuf,
        cli_lang: Option<String>,
        base_visuals: egui::Visuals,
    ) -> Self {
        let lang_code = i18n::resolve_language(cli_lang.as_deref(), Some(&config.language));
        let tr = Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        info!(lang = %lang_code, "GUI language resolved");
        let tables = PropertyTables::new(config.psychrometric_model);
        Self {
            config,
            config_path,
            tr,
            tables,
            module: Module::MoistAir,
            pages: Default::default(),
            show_table_window: false,
            show_settings: false,
            settings_status: None,
            base_visuals,
        }
    }

    fn units(&self) -> DisplayUnits {
        self.config.units.get(self.module)
    }

    fn page_mut(&mut self) -> &mut ModulePage {
        &mut self.pages[page_index(self.module)]
    }

    fn run_table_query(&mut self, axis: Axis) {
        let units = self.units();
        let module = self.module;
        let text = match axis {
            Axis::Temperature => self.page_mut().temperature.clone(),
            Axis::Pressure => self.page_mut().pressure.clone(),
        };
        let outcome = app::query_table(&self.tables, module, axis, &text, &units)
            .map_err(|e| localize_error(&e, &self.tr, &units));
        self.store(outcome);
    }

    fn run_moist_air(&mut self) {
        let units = self.units();
        let page = &self.pages[page_index(Module::MoistAir)];
        let outcome = app::calculate_moist_air(
            &self.tables,
            &page.temperature,
            &page.relative_humidity,
            &units,
        )
        .map_err(|e| localize_error(&e, &self.tr, &units));
        self.store(outcome);
    }

    /// 성공하면 결과를 바꾸고, 실패하면 결과를 비우고 오류만 남긴다.
    fn store(&mut self, outcome: Result<Report, String>) {
        let page = self.page_mut();
        match outcome {
            Ok(report) => {
                page.report = Some(report);
                page.error = None;
            }
            Err(msg) => {
                page.report = None;
                page.error = Some(msg);
            }
        }
    }

    fn clear(&mut self) {
        *self.page_mut() = ModulePage::default();
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(self.tr.t(keys::APP_TITLE).as_ref());
            ui.add_space(8.0);
        });
        for module in Module::ALL {
            let selected = self.module == module;
            let button = egui::Button::new(self.tr.t(module.heading_key()).as_ref())
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            if ui.add(button).clicked() {
                self.module = module;
            }
            ui.add_space(4.0);
        }
        ui.separator();
        if ui.button(self.tr.t(keys::ACTION_SETTINGS).as_ref()).clicked() {
            self.show_settings = true;
        }
    }

    fn input_row(
        ui: &mut egui::Ui,
        label: &str,
        unit: &str,
        hint: Option<String>,
        value: &mut String,
    ) {
        ui.label(label);
        ui.add(egui::TextEdit::singleline(value).desired_width(140.0));
        ui.label(unit);
        match hint {
            Some(h) => ui.small(h),
            None => ui.label(""),
        };
        ui.end_row();
    }

    fn ui_module(&mut self, ui: &mut egui::Ui) {
        let module = self.module;
        let units = self.units();
        ui.heading(self.tr.t(module.heading_key()).as_ref());
        ui.separator();

        let t_label = if module == Module::MoistAir {
            self.tr.t(keys::PROMPT_DRY_BULB).into_owned()
        } else {
            self.tr.t(keys::PROMPT_TEMPERATURE).into_owned()
        };
        let t_hint = app::range_hint(&self.tables, module, Axis::Temperature, &units, &self.tr);
        let p_hint = app::range_hint(&self.tables, module, Axis::Pressure, &units, &self.tr);
        let rh_label = self.tr.t(keys::PROMPT_RELATIVE_HUMIDITY).into_owned();
        let p_label = self.tr.t(keys::PROMPT_PRESSURE).into_owned();
        let has_pressure = module.axes().contains(&Axis::Pressure);

        egui::Grid::new("input_grid")
            .num_columns(4)
            .spacing([8.0, 6.0])
            .show(ui, |ui| {
                let page = &mut self.pages[page_index(module)];
                let (t_unit, p_unit) = (units.temperature.symbol(), units.pressure.symbol());
                Self::input_row(ui, &t_label, t_unit, t_hint, &mut page.temperature);
                if has_pressure {
                    Self::input_row(ui, &p_label, p_unit, p_hint, &mut page.pressure);
                }
                if module == Module::MoistAir {
                    Self::input_row(ui, &rh_label, "%", None, &mut page.relative_humidity);
                }
            });

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if module == Module::MoistAir {
                if ui.button(self.tr.t(keys::ACTION_CALCULATE).as_ref()).clicked() {
                    self.run_moist_air();
                }
            } else {
                if ui.button(self.tr.t(keys::ACTION_QUERY_TEMPERATURE).as_ref()).clicked() {
                    self.run_table_query(Axis::Temperature);
                }
                if has_pressure
                    && ui
                        .button(self.tr.t(keys::ACTION_QUERY_PRESSURE).as_ref())
                        .clicked()
                {
                    self.run_table_query(Axis::Pressure);
                }
                if ui.button(self.tr.t(keys::ACTION_SHOW_TABLE).as_ref()).clicked() {
                    self.show_table_window = true;
                }
            }
            if ui.button(self.tr.t(keys::ACTION_CLEAR).as_ref()).clicked() {
                self.clear();
            }
        });
        ui.separator();

        let page = &self.pages[page_index(module)];
        if let Some(err) = &page.error {
            ui.colored_label(ui.visuals().error_fg_color, err);
        }
        match &page.report {
            Some(report) => report_grid(ui, report, &self.tr),
            None if page.error.is_none() => {
                ui.weak(self.tr.t(keys::RESULT_PENDING).as_ref());
            }
            None => {}
        }
    }

    fn ui_table_window(&mut self, ctx: &egui::Context) {
        if !self.show_table_window {
            return;
        }
        let units = self.units();
        let Some(view) = app::reference_table(&self.tables, self.module, &units) else {
            self.show_table_window = false;
            return;
        };
        let title = format!(
            "{}: {}",
            self.tr.t(keys::HEADING_REFERENCE_TABLE).as_ref(),
            self.tr.t(self.module.heading_key()).as_ref()
        );
        let tr = &self.tr;
        egui::Window::new(title)
            .id(egui::Id::new("reference_table"))
            .resizable(true)
            .default_size(egui::vec2(760.0, 480.0))
            .open(&mut self.show_table_window)
            .show(ctx, |ui| {
                egui::ScrollArea::both().show(ui, |ui| table_grid(ui, &view, tr));
            });
    }

    fn ui_settings(&mut self, ctx: &egui::Context) {
        if !self.show_settings {
            return;
        }
        let mut open = true;
        let module = self.module;
        let before_units = self.config.units.get(module);
        let before_model = self.config.psychrometric_model;
        let before_lang = self.config.language.clone();
        let mut save_clicked = false;
        let mut pick_font = false;
        let mut reset_font = false;

        let tr = self.tr.clone();
        let txt = |key: &str| tr.t(key).into_owned();
        egui::Window::new(txt(keys::HEADING_SETTINGS))
            .collapsible(false)
            .resizable(true)
            .open(&mut open)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label(txt(keys::SETTINGS_LANGUAGE));
                        egui::ComboBox::from_id_source("lang_choice")
                            .selected_text(&self.config.language)
                            .show_ui(ui, |ui| {
                                ui.selectable_value(
                                    &mut self.config.language,
                                    "auto".into(),
                                    "auto",
                                );
                                for lang in Language::ALL {
                                    ui.selectable_value(
                                        &mut self.config.language,
                                        lang.as_code().into(),
                                        lang.native_name(),
                                    );
                                }
                            });
                        ui.end_row();

                        ui.label(txt(keys::SETTINGS_FONT));
                        ui.horizontal(|ui| {
                            let current = self
                                .config
                                .font_path
                                .as_ref()
                                .map(|p| p.display().to_string())
                                .unwrap_or_else(|| txt(keys::SETTINGS_FONT_NONE));
                            ui.label(current);
                            pick_font = ui.button(txt(keys::ACTION_PICK_FONT)).clicked();
                            reset_font = ui.button(txt(keys::ACTION_RESET_FONT)).clicked();
                        });
                        ui.end_row();

                        let units = self.config.units.get_mut(module);
                        ui.label(format!(
                            "{} ({})",
                            txt(keys::SETTINGS_TEMPERATURE_UNIT),
                            txt(module.heading_key())
                        ));
                        egui::ComboBox::from_id_source("temperature_unit")
                            .selected_text(units.temperature.symbol())
                            .show_ui(ui, |ui| {
                                for unit in TemperatureUnit::ALL {
                                    ui.selectable_value(
                                        &mut units.temperature,
                                        unit,
                                        unit.symbol(),
                                    );
                                }
                            });
                        ui.end_row();

                        if module != Module::DryAir {
                            ui.label(format!(
                                "{} ({})",
                                txt(keys::SETTINGS_PRESSURE_UNIT),
                                txt(module.heading_key())
                            ));
                            egui::ComboBox::from_id_source("pressure_unit")
                                .selected_text(units.pressure.symbol())
                                .show_ui(ui, |ui| {
                                    for unit in PressureUnit::ALL {
                                        ui.selectable_value(
                                            &mut units.pressure,
                                            unit,
                                            unit.symbol(),
                                        );
                                    }
                                });
                            ui.end_row();
                        }

                        ui.label(txt(keys::SETTINGS_PSYCHRO_MODEL));
                        ui.horizontal(|ui| {
                            for model in [PsychroModel::Ashrae, PsychroModel::Magnus] {
                                ui.selectable_value(
                                    &mut self.config.psychrometric_model,
                                    model,
                                    model.as_str(),
                                );
                            }
                        });
                        ui.end_row();

                        ui.label(txt(keys::SETTINGS_OPACITY));
                        ui.add(egui::Slider::new(&mut self.config.window_opacity, 0.3..=1.0));
                        ui.end_row();
                    });

                ui.separator();
                save_clicked = ui.button(txt(keys::ACTION_SAVE)).clicked();
                if let Some(msg) = &self.settings_status {
                    ui.label(msg);
                }
            });

        if pick_font {
            if let Some(path) = FileDialog::new()
                .add_filter("Font", &["ttf", "otf", "ttc"])
                .pick_file()
            {
                match load_custom_font(ctx, &path) {
                    Ok(()) => self.config.font_path = Some(path),
                    Err(e) => {
                        warn!("{e}");
                        self.settings_status =
                            Some(format!("{}: {e}", txt(keys::FONT_LOAD_FAILED)));
                    }
                }
            }
        }
        if reset_font {
            self.config.font_path = None;
            if setup_fonts(ctx).is_err() {
                ctx.set_fonts(egui::FontDefinitions::default());
            }
        }
        if self.config.language != before_lang {
            let code = i18n::resolve_language(None, Some(&self.config.language));
            self.tr = Translator::new_with_pack(&code, self.config.language_pack_dir.as_deref());
        }
        if self.config.psychrometric_model != before_model {
            self.tables = PropertyTables::new(self.config.psychrometric_model);
            self.pages[page_index(Module::MoistAir)].report = None;
        }
        // 입력 문자열은 새 단위로 다시 해석되므로 이전 결과는 버린다.
        if self.config.units.get(module) != before_units {
            let page = self.page_mut();
            page.report = None;
            page.error = None;
        }
        if save_clicked {
            self.settings_status = Some(match self.config.save_to(&self.config_path) {
                Ok(()) => self.tr.t(keys::SETTINGS_SAVED).into_owned(),
                Err(e) => format!("{}: {e}", self.tr.t(keys::SETTINGS_SAVE_FAILED).as_ref()),
            });
        }
        self.show_settings = open;
    }
}

fn report_grid(ui: &mut egui::Ui, report: &Report, tr: &Translator) {
    egui::Grid::new("result_grid")
        .striped(true)
        .num_columns(3)
        .spacing([24.0, 4.0])
        .show(ui, |ui| {
            ui.strong(tr.t(keys::RESULT_PARAMETER).as_ref());
            ui.strong(tr.t(keys::RESULT_VALUE).as_ref());
            ui.strong(tr.t(keys::RESULT_UNIT).as_ref());
            ui.end_row();
            for line in &report.lines {
                ui.label(tr.t(line.label_key).as_ref());
                ui.monospace(&line.value);
                ui.label(line.unit);
                ui.end_row();
            }
        });
    if let Some(note) = report.note_key {
        ui.add_space(4.0);
        ui.small(tr.t(note).as_ref());
    }
}

fn table_grid(ui: &mut egui::Ui, view: &TableView, tr: &Translator) {
    egui::Grid::new("reference_grid")
        .striped(true)
        .num_columns(view.columns.len())
        .show(ui, |ui| {
            for (key, unit) in &view.columns {
                ui.strong(format!("{}\n[{unit}]", tr.t(key).as_ref()));
            }
            ui.end_row();
            for row in &view.rows {
                for cell in row {
                    ui.monospace(cell);
                }
                ui.end_row();
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // 투명도 적용 + 라벨 복사 방지 스타일
        let mut style = (*ctx.style()).clone();
        style.interaction.selectable_labels = false;
        style.visuals = dimmed_visuals(&self.base_visuals, self.config.opacity());
        ctx.set_style(style);

        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(360.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| self.ui_module(ui));
        });

        self.ui_table_window(ctx);
        self.ui_settings(ctx);
    }
}
