// src/config.rs

//! Manages server configuration: loading, defaults, and validation.

use crate::core::firewall::FirewallScript;
use crate::core::protocol::command_codec::DEFAULT_MAX_COMMAND_LENGTH;
use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Where the packet-filter scripts live and which interfaces they act on.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FirewallConfig {
    /// The LAN-facing interface passed to every script.
    #[serde(default = "default_lan_interface")]
    pub lan_interface: String,
    /// The WAN-facing interface passed to every script.
    #[serde(default = "default_wan_interface")]
    pub wan_interface: String,
    /// The interpreter each script is run with.
    #[serde(default = "default_shell")]
    pub shell: String,
    /// Relative script names are resolved against this directory.
    #[serde(default = "default_scripts_dir")]
    pub scripts_dir: String,
    #[serde(default = "default_nat_script")]
    pub nat_script: String,
    #[serde(default = "default_forward_script")]
    pub forward_script: String,
    #[serde(default = "default_address_script")]
    pub address_script: String,
    #[serde(default = "default_clear_script")]
    pub clear_script: String,
}

fn default_lan_interface() -> String {
    "eth1".to_string()
}
fn default_wan_interface() -> String {
    "eth0".to_string()
}
fn default_shell() -> String {
    "/bin/sh".to_string()
}
fn default_scripts_dir() -> String {
    "scripts".to_string()
}
fn default_nat_script() -> String {
    "nat.sh".to_string()
}
fn default_forward_script() -> String {
    "forward.sh".to_string()
}
fn default_address_script() -> String {
    "address.sh".to_string()
}
fn default_clear_script() -> String {
    "clear.sh".to_string()
}

impl Default for FirewallConfig {
    fn default() -> Self {
        Self {
            lan_interface: default_lan_interface(),
            wan_interface: default_wan_interface(),
            shell: default_shell(),
            scripts_dir: default_scripts_dir(),
            nat_script: default_nat_script(),
            forward_script: default_forward_script(),
            address_script: default_address_script(),
            clear_script: default_clear_script(),
        }
    }
}

impl FirewallConfig {
    /// The file to run for `script`.
    pub fn script_path(&self, script: FirewallScript) -> PathBuf {
        let name = match script {
            FirewallScript::EnableNat => &self.nat_script,
            FirewallScript::SetForwarding => &self.forward_script,
            FirewallScript::FilterAddress => &self.address_script,
            FirewallScript::ClearAddresses => &self.clear_script,
        };
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            Path::new(&self.scripts_dir).join(path)
        }
    }
}

/// The server configuration.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Connections served at the same time; further ones are turned away.
    #[serde(default = "default_max_clients")]
    pub max_clients: usize,
    /// The longest command line accepted, in bytes.
    #[serde(default = "default_max_command_length")]
    pub max_command_length: usize,
    /// The JSON document holding users and rules.
    #[serde(default = "default_store_path")]
    pub store_path: String,
    #[serde(default)]
    pub firewall: FirewallConfig,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}
fn default_port() -> u16 {
    5000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_max_clients() -> usize {
    64
}
fn default_max_command_length() -> usize {
    DEFAULT_MAX_COMMAND_LENGTH
}
fn default_store_path() -> String {
    "fwgate_data/database.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            max_clients: default_max_clients(),
            max_command_length: default_max_command_length(),
            store_path: default_store_path(),
            firewall: FirewallConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new `Config` instance by reading and parsing a TOML file.
    pub fn from_file(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{path}'"))?;
        Self::from_toml_str(&contents).with_context(|| format!("Invalid config in '{path}'"))
    }

    /// Parses and validates TOML text.
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Like `from_file`, but a missing file yields the defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::from_file(path)
        } else {
            info!("Config file '{}' not found, using defaults.", path);
            let config = Self::default();
            config.validate()?;
            Ok(config)
        }
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            return Err(anyhow!("port cannot be 0"));
        }
        if self.host.trim().is_empty() {
            return Err(anyhow!("host cannot be empty"));
        }
        if self.max_clients == 0 {
            return Err(anyhow!("max_clients cannot be 0"));
        }
        if self.max_command_length == 0 {
            return Err(anyhow!("max_command_length cannot be 0"));
        }
        if self.store_path.trim().is_empty() {
            return Err(anyhow!("store_path cannot be empty"));
        }
        if self.firewall.lan_interface.trim().is_empty() {
            return Err(anyhow!("firewall.lan_interface cannot be empty"));
        }
        if self.firewall.wan_interface.trim().is_empty() {
            return Err(anyhow!("firewall.wan_interface cannot be empty"));
        }
        if self.firewall.shell.trim().is_empty() {
            return Err(anyhow!("firewall.shell cannot be empty"));
        }
        Ok(())
    }
}
