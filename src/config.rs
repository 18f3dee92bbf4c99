use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::air::PsychroModel;
use crate::catalog::Module;
use crate::units::{DisplayUnits, PressureUnit, TemperatureUnit};

/// 기본 설정 파일 이름 (작업 디렉터리 기준).
pub const CONFIG_FILE: &str = "config.toml";

/// 모듈별 입력/표시 단위.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModuleUnits {
    pub moist_air: DisplayUnits,
    pub saturated_water: DisplayUnits,
    pub steam: DisplayUnits,
    pub dry_air: DisplayUnits,
}

impl Default for ModuleUnits {
    /// 물성표 원자료의 표기를 그대로 따른다 (증기표 압력은 ×10⁵ Pa).
    fn default() -> Self {
        Self {
            moist_air: DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::KiloPascal),
            saturated_water: DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Pascal),
            steam: DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Bar),
            dry_air: DisplayUnits::new(TemperatureUnit::Celsius, PressureUnit::Pascal),
        }
    }
}

impl ModuleUnits {
    pub fn get(&self, module: Module) -> DisplayUnits {
        match module {
            Module::MoistAir => self.moist_air,
            Module::SaturatedWater => self.saturated_water,
            Module::Steam => self.steam,
            Module::DryAir => self.dry_air,
        }
    }

    pub fn get_mut(&mut self, module: Module) -> &mut DisplayUnits {
        match module {
            Module::MoistAir => &mut self.moist_air,
            Module::SaturatedWater => &mut self.saturated_water,
            Module::Steam => &mut self.steam,
            Module::DryAir => &mut self.dry_air,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (`auto`, `ko`, `en`, `zh-cn` ...)
    pub language: String,
    /// 외부 언어팩 디렉터리. `<code>.toml` 파일을 찾는다.
    pub language_pack_dir: Option<PathBuf>,
    /// GUI에서 사용할 글꼴 파일
    pub font_path: Option<PathBuf>,
    pub psychrometric_model: PsychroModel,
    /// tracing 로그 레벨 (`error` ~ `trace`)
    pub log_level: String,
    /// GUI 창 불투명도 (0.3~1.0)
    pub window_opacity: f32,
    pub units: ModuleUnits,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            language_pack_dir: None,
            font_path: None,
            psychrometric_model: PsychroModel::default(),
            log_level: "info".to_string(),
            window_opacity: 1.0,
            units: ModuleUnits::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config serialization error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// config.toml을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_create(Path::new(CONFIG_FILE))
}

/// `path`의 설정을 로드한다. 파일이 없으면 기본 설정을 그 경로에 저장한 뒤 반환한다.
pub fn load_or_create(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        info!(path = %path.display(), "created default config");
        Ok(cfg)
    }
}

pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    let cfg: Config = toml::from_str(&content)?;
    info!(path = %path.display(), "config loaded");
    Ok(cfg)
}

impl Config {
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// 로그 레벨 문자열을 해석한다. 알 수 없는 값이면 INFO.
    pub fn tracing_level(&self) -> tracing::Level {
        match self.log_level.trim().parse() {
            Ok(level) => level,
            Err(_) => {
                warn!(value = %self.log_level, "unknown log level, using info");
                tracing::Level::INFO
            }
        }
    }

    /// 0.3~1.0 으로 제한한 창 불투명도.
    pub fn opacity(&self) -> f32 {
        if self.window_opacity.is_finite() {
            self.window_opacity.clamp(0.3, 1.0)
        } else {
            1.0
        }
    }
}
