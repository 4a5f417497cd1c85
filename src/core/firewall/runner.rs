// src/core/firewall/runner.rs

//! The seam between the firewall engine and the scripts that talk to the packet filter.

use crate::config::FirewallConfig;
use async_trait::async_trait;
use std::fmt;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, error, warn};

/// The external operations the engine knows how to ask for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FirewallScript {
    /// Args: LAN interface, WAN interface.
    EnableNat,
    /// Args: `1` or `0`.
    SetForwarding,
    /// Args: LAN interface, WAN interface, address, `ACCEPT` or `DROP`.
    FilterAddress,
    /// Args: LAN interface, WAN interface.
    ClearAddresses,
}

impl fmt::Display for FirewallScript {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FirewallScript::EnableNat => "enable-nat",
            FirewallScript::SetForwarding => "set-forwarding",
            FirewallScript::FilterAddress => "filter-address",
            FirewallScript::ClearAddresses => "clear-addresses",
        };
        f.write_str(name)
    }
}

/// Runs one external step and reports whether it succeeded.
#[async_trait]
pub trait ExternalCommandRunner: Send + Sync + fmt::Debug {
    async fn run(&self, script: FirewallScript, args: &[String]) -> bool;
}

/// Runs the configured shell scripts, one process per step. A zero exit status is success.
#[derive(Debug, Clone)]
pub struct ShellScriptRunner {
    config: FirewallConfig,
}

impl ShellScriptRunner {
    pub fn new(config: FirewallConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl ExternalCommandRunner for ShellScriptRunner {
    async fn run(&self, script: FirewallScript, args: &[String]) -> bool {
        let script_path = self.config.script_path(script);
        debug!(
            "Running {} step: {} {} {}",
            script,
            self.config.shell,
            script_path.display(),
            args.join(" ")
        );

        let output = Command::new(&self.config.shell)
            .arg(&script_path)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await;

        match output {
            Ok(output) if output.status.success() => {
                let stdout = String::from_utf8_lossy(&output.stdout);
                if !stdout.trim().is_empty() {
                    debug!("{} step output: {}", script, stdout.trim());
                }
                true
            }
            Ok(output) => {
                warn!(
                    "{} step exited with {}: {}",
                    script,
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                );
                false
            }
            Err(e) => {
                error!(
                    "Failed to launch {} step '{}': {}",
                    script,
                    script_path.display(),
                    e
                );
                false
            }
        }
    }
}
