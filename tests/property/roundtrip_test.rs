// tests/property/roundtrip_test.rs

//! Property-based tests for store persistence
//! Tests that whatever document is saved is exactly what is loaded back

use fwgate::core::model::RuleAction;
use fwgate::core::store::{JsonStore, StoreDocument, StoredRule, StoredUser};
use indexmap::IndexMap;
use proptest::prelude::*;

fn stored_user() -> impl Strategy<Value = StoredUser> {
    ("[\\PC]{1,40}", "[a-z0-9.]{1,20}@[a-z]{1,10}\\.com", "[ -~]{1,80}").prop_map(
        |(name, email, password)| StoredUser {
            name,
            email,
            password,
        },
    )
}

fn stored_rule() -> impl Strategy<Value = StoredRule> {
    (
        "[a-f0-9-]{36}",
        "[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
        prop_oneof![Just(RuleAction::Accept), Just(RuleAction::Deny)],
    )
        .prop_map(|(user_id, ip, action)| StoredRule {
            user_id,
            ip,
            action,
        })
}

fn document() -> impl Strategy<Value = StoreDocument> {
    (
        prop::collection::vec(("[a-f0-9]{8}", stored_user()), 0..20),
        prop::collection::vec(("[a-f0-9]{8}", stored_rule()), 0..40),
    )
        .prop_map(|(users, rules)| StoreDocument {
            users: users.into_iter().collect::<IndexMap<_, _>>(),
            rules: rules.into_iter().collect::<IndexMap<_, _>>(),
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        max_shrink_iters: 500,
        ..ProptestConfig::default()
    })]

    #[test]
    fn test_store_save_load_roundtrip(doc in document()) {
        let rt = tokio::runtime::Runtime::new().unwrap();
        rt.block_on(async {
            let dir = tempfile::tempdir().unwrap();
            let store = JsonStore::new(dir.path().join("database.json"));

            store.save(&doc).await.unwrap();
            let loaded = store.load().await.unwrap();

            // Equality on IndexMap ignores order, so check the order separately.
            assert_eq!(loaded, doc);
            assert!(loaded.users.keys().eq(doc.users.keys()));
            assert!(loaded.rules.keys().eq(doc.rules.keys()));
        });
    }

    #[test]
    fn test_rule_action_text_roundtrip(action in prop_oneof![Just(RuleAction::Accept), Just(RuleAction::Deny)]) {
        let parsed: RuleAction = action.as_str().parse().unwrap();
        prop_assert_eq!(parsed, action);
        let json = serde_json::to_string(&action).unwrap();
        prop_assert_eq!(json, format!("\"{}\"", action));
    }
}
