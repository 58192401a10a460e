use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;

use super::status::DEFAULT_STATUS_TTL;
use crate::data::{ColumnId, ResortSource, SortDir, SortState};
use crate::error::{Result, WebtopError};

const MIN_TICK_MS: u64 = 100;
const DEFAULT_TICK_MS: u64 = 1000;
const DEFAULT_TIMEOUT_MS: u64 = 5000;
const DEFAULT_SERVER: &str = "http://127.0.0.1:3000";

/// Runtime configuration
#[derive(Debug)]
pub struct Config {
    pub server_url: String,
    pub tick_rate: Duration,
    pub request_timeout: Duration,
    pub status_ttl: Duration,
    pub sort: SortState,
    pub resort_source: ResortSource,
    pub log_level: String,
    pub log_file: PathBuf,
}

/// Command-line flags; anything given here wins over the config file.
#[derive(Debug, Default, Parser)]
#[command(name = "webtop", about = "Terminal dashboard for a remote system-metrics server")]
pub struct Args {
    /// Metrics server base URL (e.g. http://127.0.0.1:3000)
    #[arg(long, short)]
    pub server: Option<String>,

    /// Poll interval in milliseconds (min 100)
    #[arg(long = "tick-ms")]
    pub tick_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long = "timeout-ms")]
    pub timeout_ms: Option<u64>,

    /// Initial sort column: pid | name | cpu_usage | memory | status | run_time
    #[arg(long)]
    pub sort: Option<String>,

    /// Initial sort direction: asc | desc
    #[arg(long = "sort-dir")]
    pub sort_dir: Option<String>,

    /// Header activation input: records | rendered
    #[arg(long = "resort-from")]
    pub resort_from: Option<String>,

    /// Config file (default: <config dir>/webtop/config.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file (default: <cache dir>/webtop/webtop.log)
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,

    /// Log level when RUST_LOG is unset: error | warn | info | debug | trace
    #[arg(long = "log-level")]
    pub log_level: Option<String>,
}

/// File-based configuration (TOML)
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct FileConfig {
    general: GeneralConfig,
    display: DisplayConfig,
    table: TableConfig,
    logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GeneralConfig {
    server_url: String,
    tick_rate_ms: u64,
    request_timeout_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER.to_string(),
            tick_rate_ms: DEFAULT_TICK_MS,
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DisplayConfig {
    default_sort: String,
    sort_dir: String,
    status_ttl_ms: u64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: String::new(),
            sort_dir: String::new(),
            status_ttl_ms: DEFAULT_STATUS_TTL.as_millis() as u64,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct TableConfig {
    resort_from: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            resort_from: ResortSource::default().label().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct LoggingConfig {
    level: String,
    file: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: String::new(),
        }
    }
}

impl Config {
    pub fn from_args() -> Result<Self> {
        let args = Args::parse();
        let file_config = match args.config.as_deref() {
            Some(path) => load_config_file(path)?,
            None => match config_path() {
                Some(path) if path.exists() => load_config_file(&path)?,
                _ => FileConfig::default(),
            },
        };
        Self::resolve(file_config, args)
    }

    fn resolve(file: FileConfig, args: Args) -> Result<Self> {
        let server_url = args.server.unwrap_or(file.general.server_url);
        let tick_ms = normalize_tick_ms(args.tick_ms.unwrap_or(file.general.tick_rate_ms));
        let timeout_ms = args.timeout_ms.unwrap_or(file.general.request_timeout_ms);
        if timeout_ms == 0 {
            return Err(WebtopError::invalid_argument("request timeout must be > 0"));
        }

        let sort_name = args.sort.unwrap_or(file.display.default_sort);
        let dir_name = args.sort_dir.unwrap_or(file.display.sort_dir);
        let sort = parse_sort(&sort_name, &dir_name)?;
        let status_ttl = Duration::from_millis(file.display.status_ttl_ms);

        let resort_name = args.resort_from.unwrap_or(file.table.resort_from);
        let resort_source = ResortSource::parse(&resort_name)
            .ok_or_else(|| WebtopError::invalid_argument(format!("resort source: {resort_name}")))?;

        let log_level = args.log_level.unwrap_or(file.logging.level);
        let log_file = match args.log_file {
            Some(path) => path,
            None if !file.logging.file.is_empty() => PathBuf::from(file.logging.file),
            None => default_log_path(),
        };

        Ok(Self {
            server_url,
            tick_rate: Duration::from_millis(tick_ms),
            request_timeout: Duration::from_millis(timeout_ms),
            status_ttl,
            sort,
            resort_source,
            log_level,
            log_file,
        })
    }
}

fn parse_sort(column: &str, dir: &str) -> Result<SortState> {
    let column = column.trim();
    if column.is_empty() || column.eq_ignore_ascii_case("none") {
        return Ok(SortState::unsorted());
    }
    let column = ColumnId::parse(column)
        .ok_or_else(|| WebtopError::invalid_argument(format!("sort column: {column}")))?;
    let dir = if dir.trim().is_empty() {
        SortDir::Asc
    } else {
        SortDir::parse(dir.trim())
            .ok_or_else(|| WebtopError::invalid_argument(format!("sort direction: {dir}")))?
    };
    Ok(SortState::new(column, dir))
}

fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("webtop").join("config.toml"))
}

fn default_log_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("webtop")
        .join("webtop.log")
}

fn load_config_file(path: &Path) -> Result<FileConfig> {
    let content = fs::read_to_string(path)
        .map_err(|_| WebtopError::config_not_found(path.to_path_buf()))?;
    toml::from_str(&content)
        .map_err(|err| WebtopError::config_invalid(path.to_path_buf(), err.to_string()))
}

fn normalize_tick_ms(value: u64) -> u64 {
    value.max(MIN_TICK_MS)
}
