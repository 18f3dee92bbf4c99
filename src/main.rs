use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use thermo_property_tables::app::{self, AppError};
use thermo_property_tables::catalog::{Module, PropertyTables};
use thermo_property_tables::config::{self, Config};
use thermo_property_tables::conversion::{parse_pressure_unit, parse_temperature_unit};
use thermo_property_tables::i18n::{keys, resolve_language, Translator};
use thermo_property_tables::report::localize_error;
use thermo_property_tables::tables::Axis;
use thermo_property_tables::ui_cli::Console;
use thermo_property_tables::units::{DisplayUnits, PressureUnit, TemperatureUnit};

#[derive(Parser)]
#[command(name = "thermo_property_tables_cli")]
#[command(
    about = "Saturated water, steam, dry air and moist air property lookup",
    long_about = None
)]
struct Cli {
    /// UI language (ko, en, zh-cn). Overrides the config file.
    #[arg(long, global = true)]
    lang: Option<String>,
    /// Path to config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up saturated water properties
    Water(TableQuery),
    /// Look up dry saturated steam properties (clamped to the table range)
    Steam(TableQuery),
    /// Look up dry air properties at atmospheric pressure
    DryAir {
        /// Temperature in the selected unit
        #[arg(long, allow_hyphen_values = true)]
        temperature: String,
        #[arg(long, value_parser = parse_temperature_unit)]
        temperature_unit: Option<TemperatureUnit>,
    },
    /// Compute moist air state at standard pressure
    MoistAir {
        /// Dry-bulb temperature in the selected unit
        #[arg(long, allow_hyphen_values = true)]
        temperature: String,
        /// Relative humidity in percent (0~100)
        #[arg(long)]
        rh: String,
        #[arg(long, value_parser = parse_temperature_unit)]
        temperature_unit: Option<TemperatureUnit>,
        #[arg(long, value_parser = parse_pressure_unit)]
        pressure_unit: Option<PressureUnit>,
    },
    /// Print a whole reference table
    Table {
        #[arg(value_enum)]
        table: TableName,
        #[arg(long, value_parser = parse_temperature_unit)]
        temperature_unit: Option<TemperatureUnit>,
        #[arg(long, value_parser = parse_pressure_unit)]
        pressure_unit: Option<PressureUnit>,
    },
    /// Interactive menu (default)
    Menu,
}

#[derive(Args)]
#[command(group(ArgGroup::new("axis").required(true).args(["temperature", "pressure"])))]
struct TableQuery {
    /// Query by temperature
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<String>,
    /// Query by pressure
    #[arg(long, allow_hyphen_values = true)]
    pressure: Option<String>,
    #[arg(long, value_parser = parse_temperature_unit)]
    temperature_unit: Option<TemperatureUnit>,
    #[arg(long, value_parser = parse_pressure_unit)]
    pressure_unit: Option<PressureUnit>,
}

#[derive(Clone, Copy, ValueEnum)]
enum TableName {
    Water,
    Steam,
    DryAir,
}

impl From<TableName> for Module {
    fn from(value: TableName) -> Self {
        match value {
            TableName::Water => Module::SaturatedWater,
            TableName::Steam => Module::Steam,
            TableName::DryAir => Module::DryAir,
        }
    }
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 하위 명령 또는 대화형 메뉴를 실행한다.
fn main() -> ExitCode {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config, AppError> {
    Ok(match path {
        Some(p) => config::load_or_create(p)?,
        None => config::load_or_default()?,
    })
}

fn init_tracing(cfg: &Config, verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        cfg.tracing_level()
    };
    // 이미 전역 구독자가 있으면 그대로 둔다.
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn with_overrides(
    mut units: DisplayUnits,
    temperature: Option<TemperatureUnit>,
    pressure: Option<PressureUnit>,
) -> DisplayUnits {
    if let Some(t) = temperature {
        units.temperature = t;
    }
    if let Some(p) = pressure {
        units.pressure = p;
    }
    units
}

fn try_run(cli: Cli) -> Result<(), String> {
    let cfg = load_config(cli.config.as_deref()).map_err(|e| e.to_string())?;
    init_tracing(&cfg, cli.verbose);

    let lang = resolve_language(cli.lang.as_deref(), Some(&cfg.language));
    let tr = Translator::new_with_pack(&lang, cfg.language_pack_dir.as_deref());
    let tables = PropertyTables::new(cfg.psychrometric_model);
    tracing::debug!(lang = %lang, "starting CLI");

    // 조회 오류는 표시 단위로 번역해 내보낸다.
    let query_failed = |err: AppError, units: &DisplayUnits| {
        let prefix = tr.t(keys::ERROR_PREFIX);
        match err {
            AppError::Query(q) => format!("{prefix}: {}", localize_error(&q, &tr, units)),
            other => format!("{prefix}: {other}"),
        }
    };

    let command = cli.command.unwrap_or(Commands::Menu);
    if let Commands::Menu = command {
        return app::run(&cfg, &tables, &tr).map_err(|e| e.to_string());
    }

    // 단발 명령은 입력을 읽지 않는다.
    let stdout = std::io::stdout();
    let mut console = Console::new(std::io::empty(), stdout.lock(), &tr);

    match command {
        Commands::Menu => Ok(()),
        Commands::Water(q) => {
            run_table_query(&mut console, &tables, &cfg, Module::SaturatedWater, q)
                .map_err(|(e, units)| query_failed(e, &units))
        }
        Commands::Steam(q) => run_table_query(&mut console, &tables, &cfg, Module::Steam, q)
            .map_err(|(e, units)| query_failed(e, &units)),
        Commands::DryAir {
            temperature,
            temperature_unit,
        } => {
            let units = with_overrides(cfg.units.dry_air, temperature_unit, None);
            app::query_table(&tables, Module::DryAir, Axis::Temperature, &temperature, &units)
                .map_err(AppError::from)
                .and_then(|report| console.print_report(&report))
                .map_err(|e| query_failed(e, &units))
        }
        Commands::MoistAir {
            temperature,
            rh,
            temperature_unit,
            pressure_unit,
        } => {
            let units = with_overrides(cfg.units.moist_air, temperature_unit, pressure_unit);
            app::calculate_moist_air(&tables, &temperature, &rh, &units)
                .map_err(AppError::from)
                .and_then(|report| console.print_report(&report))
                .map_err(|e| query_failed(e, &units))
        }
        Commands::Table {
            table,
            temperature_unit,
            pressure_unit,
        } => {
            let module = Module::from(table);
            let units = with_overrides(cfg.units.get(module), temperature_unit, pressure_unit);
            match app::reference_table(&tables, module, &units) {
                Some(view) => console.print_table(&view).map_err(|e| e.to_string()),
                None => Ok(()),
            }
        }
    }
}

fn run_table_query<R, W>(
    console: &mut Console<'_, R, W>,
    tables: &PropertyTables,
    cfg: &Config,
    module: Module,
    q: TableQuery,
) -> Result<(), (AppError, DisplayUnits)>
where
    R: std::io::BufRead,
    W: std::io::Write,
{
    let units = with_overrides(cfg.units.get(module), q.temperature_unit, q.pressure_unit);
    let (axis, text) = match (q.temperature, q.pressure) {
        (Some(t), _) => (Axis::Temperature, t),
        (None, Some(p)) => (Axis::Pressure, p),
        // ArgGroup이 둘 중 하나를 강제한다.
        (None, None) => return Ok(()),
    };
    let report =
        app::query_table(tables, module, axis, &text, &units).map_err(|e| (e.into(), units))?;
    console.print_report(&report).map_err(|e| (e, units))
}
