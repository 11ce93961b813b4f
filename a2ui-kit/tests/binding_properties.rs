//! Property-based tests for bindings and the data model.
//!
//! - Resolution precedence: typed literal, then generic `literal`, then `path`
//! - set/get round-trip on any object path
//! - Shallow merge keeps sibling keys
//! - Replacing a tree twice yields the same resolved tree

use a2ui_kit::a2ui::{
    A2uiMessageProcessor, ComponentNode, DataModel, ProtocolMessage, ReplaceTree, StringValue,
    coerce_string,
};
use proptest::prelude::*;
use serde_json::{Map, Value, json};

// =============================================================================
// HELPER STRATEGIES
// =============================================================================

fn key_strategy() -> impl Strategy<Value = String> {
    "[a-z]{1,6}"
}

fn path_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(key_strategy(), 1..5).prop_map(|segments| format!("/{}", segments.join("/")))
}

fn scalar_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-zA-Z0-9 ]{0,12}".prop_map(Value::String),
    ]
}

fn json_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![Just(Value::Null), scalar_strategy()];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key_strategy(), inner, 0..4)
                .prop_map(|m| Value::Object(m.into_iter().collect())),
        ]
    })
}

fn object_strategy() -> impl Strategy<Value = Map<String, Value>> {
    prop::collection::btree_map(key_strategy(), scalar_strategy(), 0..6).prop_map(|m| m.into_iter().collect())
}

// =============================================================================
// RESOLUTION PRECEDENCE
// =============================================================================

proptest! {
    /// A typed literal wins whatever the generic literal, path and model hold.
    #[test]
    fn typed_literal_always_wins(
        typed in "[a-z]{0,10}",
        generic in proptest::option::of(scalar_strategy()),
        path in proptest::option::of(path_strategy()),
        data in json_strategy(),
    ) {
        let value = StringValue {
            path,
            literal_string: Some(typed.clone()),
            literal: generic,
        };
        let model = DataModel::with_data(data);
        prop_assert_eq!(value.resolve(&model), Some(typed));
    }

    /// Without a typed literal, the generic literal governs even if the path resolves.
    #[test]
    fn generic_literal_beats_path(
        generic in scalar_strategy(),
        path in path_strategy(),
        bound in scalar_strategy(),
    ) {
        let mut model = DataModel::new();
        model.set(&path, bound).unwrap();

        let value = StringValue {
            path: Some(path),
            literal_string: None,
            literal: Some(generic.clone()),
        };
        prop_assert_eq!(value.resolve(&model), coerce_string(&generic));
    }

    /// A bare path reads the model, and a miss is absent rather than an error.
    #[test]
    fn path_reads_model(path in path_strategy(), bound in scalar_strategy()) {
        let value = StringValue::path(path.clone());
        prop_assert_eq!(value.resolve(&DataModel::new()), None);

        let mut model = DataModel::new();
        model.set(&path, bound.clone()).unwrap();
        prop_assert_eq!(value.resolve(&model), coerce_string(&bound));
    }
}

// =============================================================================
// DATA MODEL LAWS
// =============================================================================

proptest! {
    /// get(set(p, v), p) == v
    #[test]
    fn set_get_round_trip(
        writes in prop::collection::vec((path_strategy(), json_strategy()), 0..6),
        path in path_strategy(),
        value in json_strategy(),
    ) {
        let mut model = DataModel::new();
        for (p, v) in writes {
            // Earlier writes may make later paths invalid; those are rejected untouched.
            let _ = model.set(&p, v);
        }
        let before = model.clone();
        match model.set(&path, value.clone()) {
            Ok(()) => prop_assert_eq!(model.get(&path), Some(&value)),
            Err(_) => prop_assert_eq!(model, before),
        }
    }

    /// Merging at the root overwrites supplied keys and keeps the rest.
    #[test]
    fn merge_preserves_siblings(base in object_strategy(), patch in object_strategy()) {
        let mut model = DataModel::with_data(Value::Object(base.clone()));
        model.merge("/", Value::Object(patch.clone())).unwrap();

        for (key, value) in &patch {
            prop_assert_eq!(model.get(&format!("/{}", key)), Some(value));
        }
        for (key, value) in base.iter().filter(|(k, _)| !patch.contains_key(*k)) {
            prop_assert_eq!(model.get(&format!("/{}", key)), Some(value));
        }
    }
}

// =============================================================================
// PROCESSOR
// =============================================================================

proptest! {
    /// Replaying the same tree gives an identical resolved tree.
    #[test]
    fn replace_tree_is_idempotent(
        texts in prop::collection::vec("[a-z ]{0,8}", 1..5),
        data in object_strategy(),
    ) {
        let ids: Vec<String> = (0..texts.len()).map(|i| format!("t{}", i)).collect();
        let mut components = vec![ComponentNode::new("root", "Column").with_property("children", json!(ids))];
        for (id, text) in ids.iter().zip(&texts) {
            components.push(ComponentNode::new(id.clone(), "Text").with_property("text", json!({"path": format!("/{}", text.trim())})));
        }
        let message = ProtocolMessage::ReplaceTree(ReplaceTree {
            surface_id: "s".into(),
            root: "root".into(),
            components,
            styles: None,
        });

        let mut processor = A2uiMessageProcessor::default();
        processor.process(vec![
            message.clone(),
            ProtocolMessage::from_value(json!({"setData": {"surfaceId": "s", "value": Value::Object(data)}})).unwrap(),
        ]);
        let first = processor.get_component_tree("s");
        processor.process(vec![message]);
        prop_assert_eq!(processor.get_component_tree("s"), first);
    }
}
