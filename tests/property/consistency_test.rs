// tests/property/consistency_test.rs

//! Property-based tests for command consistency
//! Tests that the store agrees with a simple model after any sequence of commands

use crate::test_helpers::TestContext;
use fwgate::core::commands::Command;
use fwgate::core::ResponseCode;
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum RuleOp {
    Add(u8, bool),
    Remove(u8),
}

fn rule_op() -> impl Strategy<Value = RuleOp> {
    prop_oneof![
        (0u8..8, any::<bool>()).prop_map(|(host, deny)| RuleOp::Add(host, deny)),
        (0u8..8).prop_map(RuleOp::Remove),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 16, // Each case hashes a password, keep it small
        max_shrink_iters: 200,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_rule_table_matches_model(ops in prop::collection::vec(rule_op(), 1..25)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ctx = TestContext::new().await;
            ctx.create_user("Alice", "alice@x.com", "a").await;
            ctx.login("alice@x.com", "a").await;

            let mut model: HashSet<u8> = HashSet::new();
            for op in &ops {
                match op {
                    RuleOp::Add(host, deny) => {
                        let action = if *deny { "DENY" } else { "ACCEPT" };
                        let response = ctx.execute(&format!("rule add 10.0.0.{host} {action}")).await;
                        assert_eq!(response.code == ResponseCode::Ok, model.insert(*host));
                    }
                    RuleOp::Remove(host) => {
                        let response = ctx.execute(&format!("rule remove 10.0.0.{host}")).await;
                        assert_eq!(response.code == ResponseCode::Ok, model.remove(host));
                    }
                }
            }

            let stored: HashSet<String> = ctx
                .document()
                .await
                .rules
                .values()
                .map(|r| r.ip.clone())
                .collect();
            let expected: HashSet<String> = model.iter().map(|h| format!("10.0.0.{h}")).collect();
            assert_eq!(stored, expected);
        });
    }

    #[test]
    fn test_emails_stay_unique(picks in prop::collection::vec(0u8..4, 1..8)) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let ctx = TestContext::new().await;

            let mut seen: HashSet<u8> = HashSet::new();
            for pick in &picks {
                let response = ctx
                    .execute(&format!("user create User{pick} user{pick}@x.com pw"))
                    .await;
                assert_eq!(response.code == ResponseCode::Ok, seen.insert(*pick));
            }

            let doc = ctx.document().await;
            assert_eq!(doc.users.len(), seen.len());
            let emails: HashSet<String> = doc.users.values().map(|u| u.email.clone()).collect();
            assert_eq!(emails.len(), doc.users.len());
        });
    }

    #[test]
    fn test_parse_never_panics(line in "\\PC{0,120}") {
        let _ = Command::try_from(line.as_str());
    }

    #[test]
    fn test_unknown_first_token_is_invalid_command(
        name in "[a-z]{1,12}",
        rest in "[a-z0-9 ]{0,40}",
    ) {
        prop_assume!(!matches!(name.as_str(), "user" | "rule" | "firewall"));
        let err = Command::try_from(format!("{name} {rest}").as_str()).unwrap_err();
        prop_assert_eq!(err.to_string(), "invalid command");
    }
}
