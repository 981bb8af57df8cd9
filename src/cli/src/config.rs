//! Configuration for ethdo.
//!
//! Every setting is resolved once at startup, in order of precedence:
//! an explicitly given flag, an `ETHDO_<KEY>` environment variable, the
//! configuration file, and finally the built-in default.

use crate::cli::{GlobalFlags, TransactionFlags};
use crate::errors::CliError;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Default store type.
pub const DEFAULT_STORE: &str = "filesystem";

/// Default beacon node connection.
pub const DEFAULT_CONNECTION: &str = "localhost:5052";

/// Default network timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Name of the configuration file looked for in the home directory.
pub const CONFIG_FILE_NAME: &str = ".ethdo.yaml";

/// Name of the transaction log looked for in the home directory.
pub const LOG_FILE_NAME: &str = "ethdo.log";

/// Prefix of environment variables overriding configuration.
const ENV_PREFIX: &str = "ETHDO_";

/// Resolved configuration for one invocation.
#[derive(Clone, Debug)]
pub struct Config {
    /// Transaction log file
    pub log: PathBuf,
    /// Store type
    pub store: String,
    /// Base directory of the store, if not the default
    pub base_dir: Option<PathBuf>,
    /// Account specifier, `wallet/account`
    pub account: String,
    /// Store passphrase
    pub store_passphrase: String,
    /// Wallet passphrase
    pub wallet_passphrase: String,
    /// Account passphrase
    pub passphrase: String,
    pub quiet: bool,
    pub verbose: bool,
    pub debug: bool,
    /// Beacon node connection
    pub connection: String,
    /// Network timeout
    pub timeout: Duration,
    /// Generate transactions rather than sending them
    pub generate: bool,
    /// Wait for transactions to take effect
    pub wait: bool,
}

impl Config {
    /// Loads configuration from the process environment and the home directory.
    pub fn load(flags: &GlobalFlags, tx: Option<TransactionFlags>) -> Result<Self, CliError> {
        Self::resolve(
            flags,
            tx,
            |key| std::env::var(key).ok(),
            dirs::home_dir().as_deref(),
        )
    }

    /// Resolves configuration with an explicit environment lookup and home
    /// directory.
    pub fn resolve<E>(
        flags: &GlobalFlags,
        tx: Option<TransactionFlags>,
        env: E,
        home: Option<&Path>,
    ) -> Result<Self, CliError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let file = match &flags.config {
            Some(path) => read_config_file(path)?,
            None => match home {
                Some(home) => {
                    let path = home.join(CONFIG_FILE_NAME);
                    if path.exists() {
                        read_config_file(&path)?
                    } else {
                        // No default file is fine.
                        BTreeMap::new()
                    }
                }
                None => BTreeMap::new(),
            },
        };
        let layers = Layers { env, file };
        let tx = tx.unwrap_or_default();

        let log = match layers.string("log", path_flag(&flags.log)) {
            Some(log) => PathBuf::from(log),
            None => home.ok_or(CliError::NoHomeDir)?.join(LOG_FILE_NAME),
        };
        let timeout = match layers.string("timeout", flags.timeout.clone()) {
            Some(text) => parse_duration(&text).map_err(|message| CliError::InvalidConfig {
                key: "timeout".to_string(),
                value: text.clone(),
                message,
            })?,
            None => DEFAULT_TIMEOUT,
        };

        let config = Config {
            log,
            store: layers
                .string("store", flags.store.clone())
                .unwrap_or_else(|| DEFAULT_STORE.to_string()),
            base_dir: layers
                .string("basedir", path_flag(&flags.basedir))
                .map(PathBuf::from),
            account: layers
                .string("account", flags.account.clone())
                .unwrap_or_default(),
            store_passphrase: layers
                .string("storepassphrase", flags.storepassphrase.clone())
                .unwrap_or_default(),
            wallet_passphrase: layers
                .string("walletpassphrase", flags.walletpassphrase.clone())
                .unwrap_or_default(),
            passphrase: layers
                .string("passphrase", flags.passphrase.clone())
                .unwrap_or_default(),
            quiet: layers.bool("quiet", flags.quiet)?,
            verbose: layers.bool("verbose", flags.verbose)?,
            debug: layers.bool("debug", flags.debug)?,
            connection: layers
                .string("connection", flags.connection.clone())
                .unwrap_or_else(|| DEFAULT_CONNECTION.to_string()),
            timeout,
            generate: layers.bool("generate", tx.generate)?,
            wait: layers.bool("wait", tx.wait)?,
        };
        config.validate()?;
        debug!("Resolved configuration for store {}", config.store);
        Ok(config)
    }

    /// Rejects mutually exclusive settings.
    pub fn validate(&self) -> Result<(), CliError> {
        if self.quiet && self.verbose {
            return Err(CliError::ConflictingFlags("quiet", "verbose"));
        }
        if self.quiet && self.debug {
            return Err(CliError::ConflictingFlags("quiet", "debug"));
        }
        if self.generate && self.wait {
            return Err(CliError::ConflictingFlags("generate", "wait"));
        }
        Ok(())
    }
}

fn path_flag(flag: &Option<PathBuf>) -> Option<String> {
    flag.as_ref().map(|p| p.to_string_lossy().into_owned())
}

fn read_config_file(path: &Path) -> Result<BTreeMap<String, Value>, CliError> {
    let fail = |message: String| CliError::ConfigFile {
        path: path.to_path_buf(),
        message,
    };
    let contents = fs::read_to_string(path).map_err(|e| fail(e.to_string()))?;
    if contents.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    let values: BTreeMap<String, Value> =
        serde_yaml::from_str(&contents).map_err(|e| fail(e.to_string()))?;
    debug!("Read configuration from {}", path.display());
    // Keys are case-insensitive.
    Ok(values
        .into_iter()
        .map(|(k, v)| (k.to_lowercase(), v))
        .collect())
}

/// Environment and file layers beneath the flags.
struct Layers<E> {
    env: E,
    file: BTreeMap<String, Value>,
}

impl<E: Fn(&str) -> Option<String>> Layers<E> {
    fn lower(&self, key: &str) -> Option<String> {
        let env_key = format!("{}{}", ENV_PREFIX, key.to_uppercase());
        if let Some(value) = (self.env)(&env_key) {
            return Some(value);
        }
        match self.file.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Bool(b) => Some(b.to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    fn string(&self, key: &str, flag: Option<String>) -> Option<String> {
        flag.or_else(|| self.lower(key))
    }

    fn bool(&self, key: &str, flag: bool) -> Result<bool, CliError> {
        if flag {
            return Ok(true);
        }
        match self.lower(key) {
            Some(value) => parse_bool(&value).ok_or_else(|| CliError::InvalidConfig {
                key: key.to_string(),
                value,
                message: "not a boolean".to_string(),
            }),
            None => Ok(false),
        }
    }
}

/// Parses a boolean the way Go's `strconv.ParseBool` does.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Some(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Some(false),
        _ => None,
    }
}

/// Parses a duration such as `10s`, `1m30s`, `1.5h` or `500ms`. A bare
/// number is taken as seconds.
pub fn parse_duration(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("empty duration".to_string());
    }
    if let Ok(secs) = value.parse::<u64>() {
        return Ok(Duration::from_secs(secs));
    }

    let mut total = 0f64;
    let mut rest = value;
    while !rest.is_empty() {
        let number_len = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .ok_or_else(|| format!("missing unit in duration {:?}", value))?;
        if number_len == 0 {
            return Err(format!("invalid duration {:?}", value));
        }
        let number: f64 = rest[..number_len]
            .parse()
            .map_err(|_| format!("invalid duration {:?}", value))?;
        rest = &rest[number_len..];

        let unit_len = rest
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(rest.len());
        let scale = match &rest[..unit_len] {
            "ns" => 1e-9,
            "us" | "µs" => 1e-6,
            "ms" => 1e-3,
            "s" => 1.0,
            "m" => 60.0,
            "h" => 3600.0,
            unit => return Err(format!("unknown unit {:?} in duration {:?}", unit, value)),
        };
        rest = &rest[unit_len..];
        total += number * scale;
    }
    Ok(Duration::from_secs_f64(total))
}
