//! Chain configuration as reported by a beacon node.
//!
//! Nodes report every configuration value as a string. Values are coerced
//! on a best-effort basis: integers become `Uint`, bracketed space-separated
//! integer lists become `Bytes`, and everything else stays a `String`.

use crate::errors::BeaconError;
use ethdo_core::serde_utils::{decode_hex, encode_hex};
use std::collections::BTreeMap;
use std::fmt;

/// A single coerced configuration value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigValue {
    /// An unsigned integer
    Uint(u64),
    /// A byte sequence written as `[1 2 3]`
    Bytes(Vec<u8>),
    /// Anything else, unchanged
    String(String),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Uint(v) => write!(f, "{}", v),
            ConfigValue::Bytes(v) => f.write_str(&encode_hex(v)),
            ConfigValue::String(v) => f.write_str(v),
        }
    }
}

/// Coerces one raw configuration value.
pub fn parse_config_value(key: &str, value: &str) -> Result<ConfigValue, BeaconError> {
    if value == "0" {
        return Ok(ConfigValue::Uint(0));
    }
    if let Ok(v) = value.parse::<u64>() {
        if v != 0 {
            return Ok(ConfigValue::Uint(v));
        }
    }

    if value.starts_with('[') {
        let fail = |message: String| BeaconError::ConfigValueError {
            key: key.to_string(),
            value: value.to_string(),
            message,
        };
        // The closing bracket is dropped without being checked.
        let inner = value
            .get(1..value.len().saturating_sub(1).max(1))
            .ok_or_else(|| fail("truncated list".to_string()))?;
        let bytes = inner
            .split(' ')
            .map(|item| {
                item.parse::<i64>()
                    .map(|v| v as u8)
                    .map_err(|e| fail(format!("{:?}: {}", item, e)))
            })
            .collect::<Result<Vec<u8>, _>>()?;
        return Ok(ConfigValue::Bytes(bytes));
    }

    Ok(ConfigValue::String(value.to_string()))
}

/// Coerces a JSON value from a configuration response.
pub(crate) fn parse_json_value(
    key: &str,
    value: &serde_json::Value,
) -> Result<ConfigValue, BeaconError> {
    match value {
        serde_json::Value::String(s) => parse_config_value(key, s),
        serde_json::Value::Number(n) => match n.as_u64() {
            Some(v) => Ok(ConfigValue::Uint(v)),
            None => Ok(ConfigValue::String(n.to_string())),
        },
        other => Ok(ConfigValue::String(other.to_string())),
    }
}

/// The coerced configuration of a chain, keyed by name.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChainConfig(BTreeMap<String, ConfigValue>);

impl ChainConfig {
    /// Coerces every entry of a raw configuration map.
    pub fn from_raw<'a, I>(entries: I) -> Result<Self, BeaconError>
    where
        I: IntoIterator<Item = (&'a String, &'a serde_json::Value)>,
    {
        let mut config = BTreeMap::new();
        for (key, value) in entries {
            config.insert(key.clone(), parse_json_value(key, value)?);
        }
        Ok(ChainConfig(config))
    }

    /// Gets a value.
    pub fn get(&self, key: &str) -> Option<&ConfigValue> {
        self.0.get(key)
    }

    /// Gets an integer value.
    pub fn uint(&self, key: &str) -> Option<u64> {
        match self.0.get(key)? {
            ConfigValue::Uint(v) => Some(*v),
            _ => None,
        }
    }

    /// Gets a byte value, accepting both the list form and `0x` hex strings.
    pub fn bytes(&self, key: &str) -> Option<Vec<u8>> {
        match self.0.get(key)? {
            ConfigValue::Bytes(v) => Some(v.clone()),
            ConfigValue::String(s) if s.starts_with("0x") => decode_hex(s).ok(),
            _ => None,
        }
    }

    /// Iterates over entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &ConfigValue)> {
        self.0.iter()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the configuration is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
