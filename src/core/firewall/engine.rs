// src/core/firewall/engine.rs

//! Translates stored rules into an ordered sequence of external packet-filter steps and
//! tracks whether enforcement is running.
//!
//! A sequence stops at the first failing step. Steps that already ran are not undone, so
//! the packet filter can be left partially configured; `stop` clears it again.

use super::runner::{ExternalCommandRunner, FirewallScript};
use crate::core::FwGateError;
use crate::core::model::Rule;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FirewallState {
    Stopped,
    Started,
}

/// The LAN-facing and WAN-facing interface names, fixed at process start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkInterfaces {
    pub lan: String,
    pub wan: String,
}

/// One external invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptStep {
    pub script: FirewallScript,
    pub args: Vec<String>,
}

impl ScriptStep {
    fn new(script: FirewallScript, args: Vec<String>) -> Self {
        Self { script, args }
    }
}

#[derive(Debug)]
pub struct FirewallEngine {
    runner: Arc<dyn ExternalCommandRunner>,
    interfaces: NetworkInterfaces,
    state: FirewallState,
}

impl FirewallEngine {
    pub fn new(runner: Arc<dyn ExternalCommandRunner>, interfaces: NetworkInterfaces) -> Self {
        Self {
            runner,
            interfaces,
            state: FirewallState::Stopped,
        }
    }

    pub fn state(&self) -> FirewallState {
        self.state
    }

    /// The steps `start` runs for `rules`: NAT, forwarding on, then one filter per address.
    pub fn start_plan(&self, rules: &[Rule]) -> Vec<ScriptStep> {
        let NetworkInterfaces { lan, wan } = &self.interfaces;
        let mut steps = vec![
            ScriptStep::new(FirewallScript::EnableNat, vec![lan.clone(), wan.clone()]),
            ScriptStep::new(FirewallScript::SetForwarding, vec!["1".to_string()]),
        ];
        steps.extend(rules.iter().map(|rule| {
            ScriptStep::new(
                FirewallScript::FilterAddress,
                vec![
                    lan.clone(),
                    wan.clone(),
                    rule.ip_address.clone(),
                    rule.action.verdict().to_string(),
                ],
            )
        }));
        steps
    }

    /// The steps `stop` runs: forwarding off, then clear every address rule.
    pub fn stop_plan(&self) -> Vec<ScriptStep> {
        let NetworkInterfaces { lan, wan } = &self.interfaces;
        vec![
            ScriptStep::new(FirewallScript::SetForwarding, vec!["0".to_string()]),
            ScriptStep::new(
                FirewallScript::ClearAddresses,
                vec![lan.clone(), wan.clone()],
            ),
        ]
    }

    /// Applies `rules`. Fails with `FirewallAlreadyStarted` if running, or `ScriptFailed`
    /// at the first failing step, in which case the engine stays stopped.
    pub async fn start(&mut self, rules: &[Rule]) -> Result<(), FwGateError> {
        if self.state == FirewallState::Started {
            return Err(FwGateError::FirewallAlreadyStarted);
        }
        let plan = self.start_plan(rules);
        self.execute(&plan).await?;
        self.state = FirewallState::Started;
        info!("Firewall started with {} address rule(s).", rules.len());
        Ok(())
    }

    /// Disables forwarding and clears address rules. Accepted in either state.
    pub async fn stop(&mut self) -> Result<(), FwGateError> {
        let plan = self.stop_plan();
        self.execute(&plan).await?;
        self.state = FirewallState::Stopped;
        info!("Firewall stopped.");
        Ok(())
    }

    async fn execute(&self, plan: &[ScriptStep]) -> Result<(), FwGateError> {
        for (index, step) in plan.iter().enumerate() {
            if !self.runner.run(step.script, &step.args).await {
                error!(
                    "Firewall step {}/{} ({}) failed; {} earlier step(s) remain applied.",
                    index + 1,
                    plan.len(),
                    step.script,
                    index
                );
                return Err(FwGateError::ScriptFailed);
            }
        }
        Ok(())
    }
}
