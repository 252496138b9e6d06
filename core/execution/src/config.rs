// evmhost/core/execution/src/config.rs

use crate::hash_resolver::HashLookupWindow;
use evmhost_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Ethash-era default difficulty handed to the interpreter
pub const DEFAULT_DIFFICULTY: u64 = 0x20000;

/// Block gas limit used when none is configured
pub const DEFAULT_GAS_LIMIT: u64 = i64::MAX as u64;

/// Environment values that are not derived from the block header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Difficulty reported to the interpreter (0x-prefixed hex)
    pub difficulty: U256,

    /// Block gas limit reported to the interpreter
    pub gas_limit: u64,

    /// Coinbase used when the proposed beneficiary is the zero address
    #[serde(with = "address_hex")]
    pub placeholder_coinbase: Address,

    /// How many blocks back `get_hash` may reach; absent means unbounded
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blockhash_window: Option<u64>,
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            difficulty: U256::from(DEFAULT_DIFFICULTY),
            gas_limit: DEFAULT_GAS_LIMIT,
            placeholder_coinbase: Address::zero(),
            blockhash_window: None,
        }
    }
}

impl ContextConfig {
    /// Parse from TOML and validate
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ContextConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.gas_limit == 0 {
            return Err(ConfigError::Invalid("gas_limit must be non-zero".to_string()));
        }
        if self.blockhash_window == Some(0) {
            return Err(ConfigError::Invalid(
                "blockhash_window must be at least 1; omit it for an unbounded lookup".to_string(),
            ));
        }
        Ok(())
    }

    pub fn lookup_window(&self) -> HashLookupWindow {
        HashLookupWindow::from(self.blockhash_window)
    }
}

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Chooses the coinbase recorded in a context from the proposed beneficiary
pub trait BeneficiaryPolicy: Send + Sync {
    fn resolve(&self, proposed: Address) -> Address;
}

/// Keeps a real beneficiary, substitutes a placeholder for the zero address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZeroAddressFallback {
    pub placeholder: Address,
}

impl ZeroAddressFallback {
    pub fn new(placeholder: Address) -> Self {
        Self { placeholder }
    }
}

impl Default for ZeroAddressFallback {
    fn default() -> Self {
        Self::new(Address::zero())
    }
}

impl BeneficiaryPolicy for ZeroAddressFallback {
    fn resolve(&self, proposed: Address) -> Address {
        if proposed.is_zero() {
            self.placeholder
        } else {
            proposed
        }
    }
}

mod address_hex {
    use evmhost_primitives::Address;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(address)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Address, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}
