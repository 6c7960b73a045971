//! Documents pass through the model unchanged apart from the cites a
//! filter rewrites.

use citesort_pandoc::{Citation, Cite, Pandoc};
use proptest::prelude::*;
use serde_json::{Value, json};

fn cite_node(ids: &[String]) -> Value {
    let cite = Cite::new(ids.iter().map(|id| Citation::new(id.as_str())).collect());
    json!({"t": "Cite", "c": serde_json::to_value(cite).unwrap()})
}

/// Inline nodes, including node types and fields this crate has never
/// heard of.
fn arb_inline() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        "[a-z]{1,8}".prop_map(|s| json!({"t": "Str", "c": s})),
        Just(json!({"t": "Space"})),
        Just(json!({"t": "FutureInline", "c": {"z": 1, "a": [true, null]}})),
        prop::collection::vec("[a-z][a-z0-9]{0,6}", 1..4).prop_map(|ids| cite_node(&ids)),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(|c| json!({"t": "Emph", "c": c})),
            prop::collection::vec(inner, 0..4).prop_map(|c| json!({
                "t": "Span",
                "c": [["", ["x"], [["k", "v"]]], c]
            })),
        ]
    })
}

fn arb_document() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::collection::vec(arb_inline(), 0..5), 0..5).prop_map(|paras| {
        let blocks: Vec<Value> = paras
            .into_iter()
            .map(|inlines| json!({"t": "Para", "c": inlines}))
            .collect();
        json!({
            "pandoc-api-version": [1, 23, 1],
            "meta": {"title": {"t": "MetaInlines", "c": [{"t": "Str", "c": "T"}]}},
            "blocks": blocks
        })
        .to_string()
    })
}

#[test]
fn test_unknown_nodes_survive_a_round_trip() {
    let input = r#"{"pandoc-api-version":[1,23,1],"meta":{},"blocks":[{"t":"FutureBlock","c":{"zeta":[1,2],"alpha":"x"}},{"t":"Para","c":[{"t":"Str","c":"a"}]}]}"#;
    let doc = Pandoc::from_json_str(input).unwrap();
    assert_eq!(doc.to_json_string().unwrap(), input);
}

proptest! {
    #[test]
    fn untouched_documents_are_byte_identical(input in arb_document()) {
        let mut doc = Pandoc::from_json_str(&input).unwrap();
        doc.walk_cites_mut(|_| false);
        prop_assert_eq!(doc.to_json_string().unwrap(), input);
    }

    #[test]
    fn mutable_walk_visits_what_the_immutable_walk_sees(input in arb_document()) {
        let mut doc = Pandoc::from_json_str(&input).unwrap();

        let mut seen = Vec::new();
        doc.walk_cites(|cite| seen.push(cite.clone()));

        let mut visited = Vec::new();
        doc.walk_cites_mut(|cite| {
            visited.push(cite.clone());
            cite.citations.reverse();
            true
        });
        prop_assert_eq!(&seen, &visited);

        let mut reversed = Vec::new();
        doc.walk_cites(|cite| reversed.push(cite.ids().join(",")));
        let expected: Vec<String> = seen
            .iter()
            .map(|cite| cite.ids().into_iter().rev().collect::<Vec<_>>().join(","))
            .collect();
        prop_assert_eq!(reversed, expected);
    }
}
