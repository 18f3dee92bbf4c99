use std::borrow::Cow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use sys_locale::get_locale;
use tracing::{debug, warn};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_MOIST_AIR: &str = "main_menu.moist_air";
    pub const MAIN_MENU_SATURATED_WATER: &str = "main_menu.saturated_water";
    pub const MAIN_MENU_STEAM: &str = "main_menu.steam";
    pub const MAIN_MENU_DRY_AIR: &str = "main_menu.dry_air";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";

    pub const QUERY_OPTIONS_DUAL: &str = "query.options_dual";
    pub const QUERY_OPTIONS_SINGLE: &str = "query.options_single";
    pub const PROMPT_SELECT: &str = "prompt.select";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_PRESSURE: &str = "prompt.pressure";
    pub const PROMPT_DRY_BULB: &str = "prompt.dry_bulb";
    pub const PROMPT_RELATIVE_HUMIDITY: &str = "prompt.relative_humidity";

    pub const HEADING_MOIST_AIR: &str = "heading.moist_air";
    pub const HEADING_SATURATED_WATER: &str = "heading.saturated_water";
    pub const HEADING_STEAM: &str = "heading.steam";
    pub const HEADING_DRY_AIR: &str = "heading.dry_air";
    pub const HEADING_REFERENCE_TABLE: &str = "heading.reference_table";
    pub const HEADING_SETTINGS: &str = "heading.settings";

    pub const ACTION_QUERY_TEMPERATURE: &str = "action.query_temperature";
    pub const ACTION_QUERY_PRESSURE: &str = "action.query_pressure";
    pub const ACTION_CALCULATE: &str = "action.calculate";
    pub const ACTION_CLEAR: &str = "action.clear";
    pub const ACTION_SHOW_TABLE: &str = "action.show_table";
    pub const ACTION_SETTINGS: &str = "action.settings";
    pub const ACTION_SAVE: &str = "action.save";
    pub const ACTION_CLOSE: &str = "action.close";
    pub const ACTION_PICK_FONT: &str = "action.pick_font";
    pub const ACTION_RESET_FONT: &str = "action.reset_font";

    pub const RESULT_PARAMETER: &str = "result.parameter";
    pub const RESULT_VALUE: &str = "result.value";
    pub const RESULT_UNIT: &str = "result.unit";
    pub const RESULT_PENDING: &str = "result.pending";
    pub const RANGE_HINT: &str = "result.range_hint";
    pub const NOTE_EXACT: &str = "note.exact";
    pub const NOTE_INTERPOLATED: &str = "note.interpolated";
    pub const NOTE_CLAMPED_LOWER: &str = "note.clamped_lower";
    pub const NOTE_CLAMPED_UPPER: &str = "note.clamped_upper";
    pub const NOTE_SATURATION_PLACEHOLDER: &str = "note.saturation_placeholder";

    pub const PROP_TEMPERATURE: &str = "property.temperature";
    pub const PROP_PRESSURE: &str = "property.pressure";
    pub const PROP_DENSITY: &str = "property.density";
    pub const PROP_ENTHALPY: &str = "property.enthalpy";
    pub const PROP_LATENT_HEAT: &str = "property.latent_heat";
    pub const PROP_SPECIFIC_HEAT: &str = "property.specific_heat";
    pub const PROP_THERMAL_CONDUCTIVITY: &str = "property.thermal_conductivity";
    pub const PROP_THERMAL_DIFFUSIVITY: &str = "property.thermal_diffusivity";
    pub const PROP_DYNAMIC_VISCOSITY: &str = "property.dynamic_viscosity";
    pub const PROP_KINEMATIC_VISCOSITY: &str = "property.kinematic_viscosity";
    pub const PROP_EXPANSION_COEFFICIENT: &str = "property.expansion_coefficient";
    pub const PROP_SURFACE_TENSION: &str = "property.surface_tension";
    pub const PROP_PRANDTL: &str = "property.prandtl";
    pub const PROP_AMBIENT_PRESSURE: &str = "property.ambient_pressure";
    pub const PROP_HUMIDITY_RATIO: &str = "property.humidity_ratio";
    pub const PROP_WET_BULB: &str = "property.wet_bulb";
    pub const PROP_DEW_POINT: &str = "property.dew_point";
    pub const PROP_SATURATION_TEMPERATURE: &str = "property.saturation_temperature";
    pub const PROP_VAPOR_PRESSURE: &str = "property.vapor_pressure";
    pub const PROP_SPECIFIC_VOLUME: &str = "property.specific_volume";

    pub const ERROR_PARSE: &str = "error.parse";
    pub const ERROR_INPUT_RANGE: &str = "error.input_range";
    pub const ERROR_RANGE_BELOW: &str = "error.range_below";
    pub const ERROR_RANGE_ABOVE: &str = "error.range_above";
    pub const ERROR_UNSUPPORTED_AXIS: &str = "error.unsupported_axis";
    pub const ERROR_PSYCHROMETRIC: &str = "error.psychrometric";

    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_FONT: &str = "settings.font";
    pub const SETTINGS_FONT_NONE: &str = "settings.font_none";
    pub const SETTINGS_TEMPERATURE_UNIT: &str = "settings.temperature_unit";
    pub const SETTINGS_PRESSURE_UNIT: &str = "settings.pressure_unit";
    pub const SETTINGS_PSYCHRO_MODEL: &str = "settings.psychro_model";
    pub const SETTINGS_OPACITY: &str = "settings.opacity";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_SAVE_FAILED: &str = "settings.save_failed";
    pub const FONT_LOAD_FAILED: &str = "settings.font_load_failed";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Zh,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("zh") {
            Language::Zh
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko-kr",
            Language::En => "en-us",
            Language::Zh => "zh-cn",
        }
    }

    /// 설정 화면에 보여줄 이름 (각 언어 고유 표기).
    pub fn native_name(&self) -> &'static str {
        match self {
            Language::Ko => "한국어",
            Language::En => "English",
            Language::Zh => "简体中文",
        }
    }

    pub const ALL: [Language; 3] = [Language::Ko, Language::En, Language::Zh];
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: built_in_pack(lang_code),
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리에 `<code>.toml`이 없으면 내장 언어팩/문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&Path>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 해당 언어 내장 문자열 → 영어 → 한국어 순으로 찾는다.
    pub fn t(&self, key: &str) -> Cow<'_, str> {
        if let Some(v) = self.overrides.as_ref().and_then(|m| m.get(key)) {
            return Cow::Borrowed(v.as_str());
        }
        let builtin = match self.lang {
            Language::Ko => ko(key),
            Language::En | Language::Zh => en(key).or_else(|| ko(key)),
        };
        match builtin {
            Some(s) => Cow::Borrowed(s),
            None => {
                debug!(key, "missing translation");
                Cow::Owned(key.to_string())
            }
        }
    }

    /// `{name}` 형태의 자리표시자를 채운 번역문.
    pub fn format(&self, key: &str, args: &[(&str, String)]) -> String {
        let mut out = self.t(key).into_owned();
        for (name, value) in args {
            out = out.replace(&format!("{{{name}}}"), value);
        }
        out
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("zh") => Some("zh-cn".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    normalize_lang(&lang)
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 섹션은 점으로 이어 붙인 키가 된다.
fn load_overrides(dir: &Path, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = dir.join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            warn!(path = %path.display(), "language pack ignored: not a valid TOML table");
        }
        map
    };

    // 1) full code (e.g., en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match Language::from_code(lang) {
        Language::Zh => parse_toml_to_map(include_str!("../locales/zh-cn.toml")),
        Language::Ko | Language::En => None,
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "열물성 조회",
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 열물성 조회 ===",
        MAIN_MENU_MOIST_AIR => "1) 습공기 선도 계산",
        MAIN_MENU_SATURATED_WATER => "2) 포화수 물성",
        MAIN_MENU_STEAM => "3) 건포화 증기 물성",
        MAIN_MENU_DRY_AIR => "4) 건공기 물성",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        QUERY_OPTIONS_DUAL => "1) 온도로 조회  2) 압력으로 조회  3) 전체 표 보기  0) 돌아가기",
        QUERY_OPTIONS_SINGLE => "1) 온도로 조회  3) 전체 표 보기  0) 돌아가기",
        PROMPT_SELECT => "선택: ",
        PROMPT_TEMPERATURE => "온도",
        PROMPT_PRESSURE => "압력",
        PROMPT_DRY_BULB => "건구온도",
        PROMPT_RELATIVE_HUMIDITY => "상대습도 (%)",
        HEADING_MOIST_AIR => "습공기 선도 계산",
        HEADING_SATURATED_WATER => "포화수 열물성",
        HEADING_STEAM => "건포화 증기 열물성",
        HEADING_DRY_AIR => "건공기 열물성 (대기압)",
        HEADING_REFERENCE_TABLE => "물성표",
        HEADING_SETTINGS => "설정",
        ACTION_QUERY_TEMPERATURE => "온도로 조회",
        ACTION_QUERY_PRESSURE => "압력으로 조회",
        ACTION_CALCULATE => "계산",
        ACTION_CLEAR => "지우기",
        ACTION_SHOW_TABLE => "물성표 보기",
        ACTION_SETTINGS => "설정",
        ACTION_SAVE => "저장",
        ACTION_CLOSE => "닫기",
        ACTION_PICK_FONT => "글꼴 파일 선택",
        ACTION_RESET_FONT => "기본 글꼴",
        RESULT_PARAMETER => "항목",
        RESULT_VALUE => "값",
        RESULT_UNIT => "단위",
        RESULT_PENDING => "조회 대기 중...",
        RANGE_HINT => "범위: {min} ~ {max} {unit}",
        NOTE_EXACT => "표의 값과 정확히 일치",
        NOTE_INTERPOLATED => "인접한 두 행 사이 선형 보간",
        NOTE_CLAMPED_LOWER => "범위 아래: 첫 행 값을 표시합니다",
        NOTE_CLAMPED_UPPER => "범위 위: 마지막 행 값을 표시합니다",
        NOTE_SATURATION_PLACEHOLDER => "포화온도는 계산값이 아닌 고정값(100 °C)입니다",
        PROP_TEMPERATURE => "온도",
        PROP_PRESSURE => "압력",
        PROP_DENSITY => "밀도",
        PROP_ENTHALPY => "엔탈피",
        PROP_LATENT_HEAT => "증발잠열",
        PROP_SPECIFIC_HEAT => "정압비열",
        PROP_THERMAL_CONDUCTIVITY => "열전도율",
        PROP_THERMAL_DIFFUSIVITY => "열확산율",
        PROP_DYNAMIC_VISCOSITY => "점성계수",
        PROP_KINEMATIC_VISCOSITY => "동점성계수",
        PROP_EXPANSION_COEFFICIENT => "체적팽창계수",
        PROP_SURFACE_TENSION => "표면장력",
        PROP_PRANDTL => "프란틀 수",
        PROP_AMBIENT_PRESSURE => "대기압",
        PROP_HUMIDITY_RATIO => "절대습도",
        PROP_WET_BULB => "습구온도",
        PROP_DEW_POINT => "노점온도",
        PROP_SATURATION_TEMPERATURE => "포화온도",
        PROP_VAPOR_PRESSURE => "수증기 분압",
        PROP_SPECIFIC_VOLUME => "비체적",
        ERROR_PARSE => "'{input}'은(는) 올바른 숫자가 아닙니다 ({field}).",
        ERROR_INPUT_RANGE => "{field}은(는) {min} ~ {max} 범위여야 합니다 (입력: {value}).",
        ERROR_RANGE_BELOW => "입력값 {value}이(가) 데이터 범위({min} ~ {max})보다 작습니다.",
        ERROR_RANGE_ABOVE => "입력값 {value}이(가) 데이터 범위({min} ~ {max})보다 큽니다.",
        ERROR_UNSUPPORTED_AXIS => "이 표는 {field}(으)로 조회할 수 없습니다.",
        ERROR_PSYCHROMETRIC => "습공기 계산에 실패했습니다: {detail}",
        SETTINGS_LANGUAGE => "언어",
        SETTINGS_FONT => "글꼴",
        SETTINGS_FONT_NONE => "(기본)",
        SETTINGS_TEMPERATURE_UNIT => "온도 단위",
        SETTINGS_PRESSURE_UNIT => "압력 단위",
        SETTINGS_PSYCHRO_MODEL => "습공기 계산 모델",
        SETTINGS_OPACITY => "창 불투명도",
        SETTINGS_SAVED => "설정을 저장했습니다.",
        SETTINGS_SAVE_FAILED => "설정 저장 실패",
        FONT_LOAD_FAILED => "글꼴을 불러오지 못했습니다",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Thermophysical Property Tables",
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Thermophysical Property Tables ===",
        MAIN_MENU_MOIST_AIR => "1) Psychrometrics (moist air)",
        MAIN_MENU_SATURATED_WATER => "2) Saturated water",
        MAIN_MENU_STEAM => "3) Dry saturated steam",
        MAIN_MENU_DRY_AIR => "4) Dry air",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        QUERY_OPTIONS_DUAL => "1) By temperature  2) By pressure  3) Show table  0) Back",
        QUERY_OPTIONS_SINGLE => "1) By temperature  3) Show table  0) Back",
        PROMPT_SELECT => "Select: ",
        PROMPT_TEMPERATURE => "Temperature",
        PROMPT_PRESSURE => "Pressure",
        PROMPT_DRY_BULB => "Dry-bulb temperature",
        PROMPT_RELATIVE_HUMIDITY => "Relative humidity (%)",
        HEADING_MOIST_AIR => "Psychrometric calculation",
        HEADING_SATURATED_WATER => "Saturated water properties",
        HEADING_STEAM => "Dry saturated steam properties",
        HEADING_DRY_AIR => "Dry air properties (atmospheric)",
        HEADING_REFERENCE_TABLE => "Reference table",
        HEADING_SETTINGS => "Settings",
        ACTION_QUERY_TEMPERATURE => "Query by temperature",
        ACTION_QUERY_PRESSURE => "Query by pressure",
        ACTION_CALCULATE => "Calculate",
        ACTION_CLEAR => "Clear",
        ACTION_SHOW_TABLE => "Show table",
        ACTION_SETTINGS => "Settings",
        ACTION_SAVE => "Save",
        ACTION_CLOSE => "Close",
        ACTION_PICK_FONT => "Choose font file",
        ACTION_RESET_FONT => "Default font",
        RESULT_PARAMETER => "Parameter",
        RESULT_VALUE => "Value",
        RESULT_UNIT => "Unit",
        RESULT_PENDING => "Waiting for query...",
        RANGE_HINT => "Range: {min} ~ {max} {unit}",
        NOTE_EXACT => "Exact table row",
        NOTE_INTERPOLATED => "Linearly interpolated between adjacent rows",
        NOTE_CLAMPED_LOWER => "Below range: showing the first row",
        NOTE_CLAMPED_UPPER => "Above range: showing the last row",
        NOTE_SATURATION_PLACEHOLDER => "Saturation temperature is a fixed 100 °C, not computed",
        PROP_TEMPERATURE => "Temperature",
        PROP_PRESSURE => "Pressure",
        PROP_DENSITY => "Density",
        PROP_ENTHALPY => "Enthalpy",
        PROP_LATENT_HEAT => "Latent heat",
        PROP_SPECIFIC_HEAT => "Specific heat (cp)",
        PROP_THERMAL_CONDUCTIVITY => "Thermal conductivity",
        PROP_THERMAL_DIFFUSIVITY => "Thermal diffusivity",
        PROP_DYNAMIC_VISCOSITY => "Dynamic viscosity",
        PROP_KINEMATIC_VISCOSITY => "Kinematic viscosity",
        PROP_EXPANSION_COEFFICIENT => "Volumetric expansion coefficient",
        PROP_SURFACE_TENSION => "Surface tension",
        PROP_PRANDTL => "Prandtl number",
        PROP_AMBIENT_PRESSURE => "Ambient pressure",
        PROP_HUMIDITY_RATIO => "Humidity ratio",
        PROP_WET_BULB => "Wet-bulb temperature",
        PROP_DEW_POINT => "Dew-point temperature",
        PROP_SATURATION_TEMPERATURE => "Saturation temperature",
        PROP_VAPOR_PRESSURE => "Vapour pressure",
        PROP_SPECIFIC_VOLUME => "Specific volume",
        ERROR_PARSE => "'{input}' is not a valid number ({field}).",
        ERROR_INPUT_RANGE => "{field} must be within {min} ~ {max} (got {value}).",
        ERROR_RANGE_BELOW => "Input {value} is below the data range ({min} ~ {max}).",
        ERROR_RANGE_ABOVE => "Input {value} is above the data range ({min} ~ {max}).",
        ERROR_UNSUPPORTED_AXIS => "This table cannot be queried by {field}.",
        ERROR_PSYCHROMETRIC => "Psychrometric calculation failed: {detail}",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_FONT => "Font",
        SETTINGS_FONT_NONE => "(default)",
        SETTINGS_TEMPERATURE_UNIT => "Temperature unit",
        SETTINGS_PRESSURE_UNIT => "Pressure unit",
        SETTINGS_PSYCHRO_MODEL => "Psychrometric model",
        SETTINGS_OPACITY => "Window opacity",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_SAVE_FAILED => "Failed to save settings",
        FONT_LOAD_FAILED => "Could not load font",
        _ => return None,
    })
}
