// tests/integration/firewall_test.rs

//! Integration tests for the firewall command and the rule engine behind it

use super::test_helpers::{RecordingRunner, TestContext};
use fwgate::core::firewall::{FirewallScript, FirewallState};

async fn logged_in_with_rules(runner: RecordingRunner) -> TestContext {
    let ctx = TestContext::with_runner(runner).await;
    ctx.create_user("Alice", "alice@x.com", "a").await;
    ctx.login("alice@x.com", "a").await;
    ctx.execute_ok("rule add 10.0.0.5 DENY").await;
    ctx.execute_ok("rule add 10.0.0.6 ACCEPT").await;
    ctx.execute_ok("rule add 10.0.0.7 DENY").await;
    ctx
}

#[tokio::test]
async fn test_firewall_requires_login() {
    let ctx = TestContext::new().await;

    ctx.execute_err("firewall start").await;
    ctx.execute_err("firewall stop").await;
    for line in ["firewall restart", "firewall start now", "firewall"] {
        let message = ctx.execute_err(line).await;
        assert_eq!(message, "é necessário estar logado para executar este comando");
    }

    assert!(ctx.runner.calls().is_empty());
}

#[tokio::test]
async fn test_start_runs_steps_in_order() {
    let ctx = logged_in_with_rules(RecordingRunner::new()).await;

    let message = ctx.execute_ok("firewall start").await;
    assert!(message.contains('3'));

    let calls = ctx.runner.calls();
    assert_eq!(
        calls,
        vec![
            (
                FirewallScript::EnableNat,
                vec!["lan0".to_string(), "wan0".to_string()]
            ),
            (FirewallScript::SetForwarding, vec!["1".to_string()]),
            (
                FirewallScript::FilterAddress,
                vec!["lan0".into(), "wan0".into(), "10.0.0.5".into(), "DROP".into()]
            ),
            (
                FirewallScript::FilterAddress,
                vec!["lan0".into(), "wan0".into(), "10.0.0.6".into(), "ACCEPT".into()]
            ),
            (
                FirewallScript::FilterAddress,
                vec!["lan0".into(), "wan0".into(), "10.0.0.7".into(), "DROP".into()]
            ),
        ]
    );
    assert_eq!(
        ctx.state.core.lock().await.firewall.state(),
        FirewallState::Started
    );
}

#[tokio::test]
async fn test_start_only_applies_session_owners_rules() {
    let ctx = logged_in_with_rules(RecordingRunner::new()).await;
    ctx.execute_ok("user logout").await;
    ctx.create_user("Bob", "bob@x.com", "b").await;
    ctx.login("bob@x.com", "b").await;
    ctx.execute_ok("rule add 172.16.0.1 ACCEPT").await;

    ctx.execute_ok("firewall start").await;

    let addresses: Vec<String> = ctx
        .runner
        .calls()
        .into_iter()
        .filter(|(script, _)| *script == FirewallScript::FilterAddress)
        .map(|(_, args)| args[2].clone())
        .collect();
    assert_eq!(addresses, vec!["172.16.0.1".to_string()]);
}

#[tokio::test]
async fn test_start_failure_aborts_without_rollback() {
    // Step index 3 is the second address rule.
    let ctx = logged_in_with_rules(RecordingRunner::failing_at(3)).await;

    let message = ctx.execute_err("firewall start").await;
    assert_eq!(message, "script execution failed");

    // Steps before the failure ran, the failing one was attempted, nothing after it,
    // and nothing was undone.
    assert_eq!(
        ctx.runner.scripts(),
        vec![
            FirewallScript::EnableNat,
            FirewallScript::SetForwarding,
            FirewallScript::FilterAddress,
            FirewallScript::FilterAddress,
        ]
    );
    assert_eq!(
        ctx.state.core.lock().await.firewall.state(),
        FirewallState::Stopped
    );
}

#[tokio::test]
async fn test_start_twice_is_conflict() {
    let ctx = logged_in_with_rules(RecordingRunner::new()).await;
    ctx.execute_ok("firewall start").await;
    let steps_after_start = ctx.runner.calls().len();

    let message = ctx.execute_err("firewall start").await;
    assert_eq!(message, "o firewall já está ativo");
    assert_eq!(ctx.runner.calls().len(), steps_after_start);
}

#[tokio::test]
async fn test_stop_disables_forwarding_then_clears() {
    let ctx = logged_in_with_rules(RecordingRunner::new()).await;
    ctx.execute_ok("firewall start").await;
    let steps_after_start = ctx.runner.calls().len();

    ctx.execute_ok("firewall stop").await;

    let calls = ctx.runner.calls();
    assert_eq!(
        calls[steps_after_start..],
        [
            (FirewallScript::SetForwarding, vec!["0".to_string()]),
            (
                FirewallScript::ClearAddresses,
                vec!["lan0".to_string(), "wan0".to_string()]
            ),
        ]
    );
    assert_eq!(
        ctx.state.core.lock().await.firewall.state(),
        FirewallState::Stopped
    );

    // Enforcement can be started again after a stop.
    ctx.execute_ok("firewall start").await;
}

#[tokio::test]
async fn test_stop_reports_failure() {
    // Steps 0 and 1 are the stop's forwarding and clear steps.
    let ctx = TestContext::with_runner(RecordingRunner::failing_at(1)).await;
    ctx.create_user("Alice", "alice@x.com", "a").await;
    ctx.login("alice@x.com", "a").await;

    let message = ctx.execute_err("firewall stop").await;
    assert_eq!(message, "script execution failed");
    assert_eq!(ctx.runner.calls().len(), 2);
}

#[tokio::test]
async fn test_stop_after_failed_start_clears_partial_state() {
    let ctx = logged_in_with_rules(RecordingRunner::failing_at(2)).await;
    ctx.execute_err("firewall start").await;

    ctx.execute_ok("firewall stop").await;

    let scripts = ctx.runner.scripts();
    assert_eq!(scripts.last(), Some(&FirewallScript::ClearAddresses));
}

#[tokio::test]
async fn test_firewall_unknown_action() {
    let ctx = logged_in_with_rules(RecordingRunner::new()).await;
    ctx.execute_err("firewall restart").await;
    ctx.execute_err("firewall").await;
    assert!(ctx.runner.calls().is_empty());
}
