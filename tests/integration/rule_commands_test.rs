// tests/integration/rule_commands_test.rs

//! Integration tests for the rule command
//! Tests: rule add, rule list all, rule remove, and owner scoping

use super::test_helpers::TestContext;
use fwgate::core::model::RuleAction;

async fn two_users() -> TestContext {
    let ctx = TestContext::new().await;
    ctx.create_user("Alice", "alice@x.com", "a").await;
    ctx.create_user("Bob", "bob@x.com", "b").await;
    ctx
}

#[tokio::test]
async fn test_rule_commands_require_login() {
    let ctx = two_users().await;

    let message = ctx.execute_err("rule add 10.0.0.5 ACCEPT").await;
    assert_eq!(message, "é necessário estar logado para executar este comando");
    ctx.execute_err("rule list all").await;
    ctx.execute_err("rule remove 10.0.0.5").await;

    assert!(ctx.document().await.rules.is_empty());
}

#[tokio::test]
async fn test_login_is_checked_before_arguments() {
    let ctx = two_users().await;

    for line in ["rule add 1.2.3.4 FOO", "rule add 1.2.3.4", "rule list mine", "rule flush"] {
        let message = ctx.execute_err(line).await;
        assert_eq!(
            message, "é necessário estar logado para executar este comando",
            "line: {line}"
        );
    }

    ctx.login("alice@x.com", "a").await;
    let message = ctx.execute_err("rule add 1.2.3.4 FOO").await;
    assert!(message.contains("ACCEPT ou DENY"));
}

#[tokio::test]
async fn test_add_creates_one_rule_owned_by_session() {
    let ctx = two_users().await;
    let alice_id = ctx.user_id("alice@x.com").await;
    ctx.login("alice@x.com", "a").await;

    ctx.execute_ok("rule add 10.0.0.5 ACCEPT").await;

    let doc = ctx.document().await;
    assert_eq!(doc.rules.len(), 1);
    let rule = doc.rules().next().unwrap();
    assert_eq!(rule.owner_user_id, alice_id);
    assert_eq!(rule.ip_address, "10.0.0.5");
    assert_eq!(rule.action, RuleAction::Accept);
}

#[tokio::test]
async fn test_add_rejects_unknown_action() {
    let ctx = two_users().await;
    ctx.login("alice@x.com", "a").await;

    let message = ctx.execute_err("rule add 10.0.0.5 allow").await;
    assert!(message.contains("ACCEPT ou DENY"));
    ctx.execute_err("rule add 10.0.0.5 deny").await;
    ctx.execute_err("rule add 10.0.0.5").await;

    assert!(ctx.document().await.rules.is_empty());
}

#[tokio::test]
async fn test_add_rejects_duplicate_address_for_same_owner() {
    let ctx = two_users().await;
    ctx.login("alice@x.com", "a").await;
    ctx.execute_ok("rule add 10.0.0.5 ACCEPT").await;

    ctx.execute_err("rule add 10.0.0.5 DENY").await;
    ctx.execute_ok("user logout").await;

    // Another user may filter the same address.
    ctx.login("bob@x.com", "b").await;
    ctx.execute_ok("rule add 10.0.0.5 DENY").await;

    assert_eq!(ctx.document().await.rules.len(), 2);
}

#[tokio::test]
async fn test_list_is_scoped_to_owner() {
    let ctx = two_users().await;
    ctx.login("alice@x.com", "a").await;
    ctx.execute_ok("rule add 10.0.0.5 DENY").await;
    let listing = ctx.execute_ok("rule list all").await;
    assert!(listing.contains("10.0.0.5"));
    assert!(listing.contains("DENY"));
    ctx.execute_ok("user logout").await;

    ctx.login("bob@x.com", "b").await;
    let message = ctx.execute_err("rule list all").await;
    assert_eq!(message, "nenhuma regra cadastrada");

    ctx.execute_ok("rule add 192.168.1.1 ACCEPT").await;
    let listing = ctx.execute_ok("rule list all").await;
    assert!(listing.contains("192.168.1.1"));
    assert!(!listing.contains("10.0.0.5"));
}

#[tokio::test]
async fn test_remove_by_address_and_by_id() {
    let ctx = two_users().await;
    ctx.login("alice@x.com", "a").await;
    ctx.execute_ok("rule add 10.0.0.5 DENY").await;
    ctx.execute_ok("rule add 10.0.0.6 ACCEPT").await;
    let id = ctx
        .document()
        .await
        .rules()
        .find(|r| r.ip_address == "10.0.0.6")
        .unwrap()
        .id;

    ctx.execute_ok("rule remove 10.0.0.5").await;
    ctx.execute_ok(&format!("rule remove {id}")).await;

    assert!(ctx.document().await.rules.is_empty());
}

#[tokio::test]
async fn test_remove_foreign_rule_is_not_found() {
    let ctx = two_users().await;
    ctx.login("alice@x.com", "a").await;
    ctx.execute_ok("rule add 10.0.0.5 DENY").await;
    let alice_rule_id = ctx.document().await.rules().next().unwrap().id;
    ctx.execute_ok("user logout").await;

    ctx.login("bob@x.com", "b").await;
    let message = ctx.execute_err("rule remove 10.0.0.5").await;
    assert_eq!(message, "regra não encontrada");
    ctx.execute_err(&format!("rule remove {alice_rule_id}")).await;

    assert_eq!(ctx.document().await.rules.len(), 1);
}
