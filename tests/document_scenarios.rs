// Table-driven document scenarios: accepted shapes, rejected shapes, round trips.
use oneshape::api::{
    self, DecodeOptions, Decoder, Document, ErrorKind, MatchPolicy, Registry, SelectorSpec,
    StaticSpec, Variant, VariantKind,
};

struct Case {
    name: &'static str,
    input: &'static str,
    expect: Result<&'static [(VariantKind, &'static str)], ErrorKind>,
}

const CASES: &[Case] = &[
    Case {
        name: "empty data",
        input: r#"{"name":"x","data":[]}"#,
        expect: Ok(&[]),
    },
    Case {
        name: "one of each",
        input: r#"{"name":"x","data":[{"static":{"key":"keyA"}},{"selector":{"selector":"selA"}}]}"#,
        expect: Ok(&[(VariantKind::Static, "keyA"), (VariantKind::Selector, "selA")]),
    },
    Case {
        name: "interleaved",
        input: r#"
{
    "name": "validJson",
    "data": [
        { "static": { "key": "keyA" } },
        { "selector": { "selector": "selectorA" } },
        { "static": { "key": "keyB" } },
        { "selector": { "selector": "selectorB" } }
    ]
}
"#,
        expect: Ok(&[
            (VariantKind::Static, "keyA"),
            (VariantKind::Selector, "selectorA"),
            (VariantKind::Static, "keyB"),
            (VariantKind::Selector, "selectorB"),
        ]),
    },
    Case {
        name: "unknown key",
        input: r#"{"name":"x","data":[{"other":{"key":"keyA"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "unknown key before valid entry",
        input: r#"{"name":"x","data":[{"other":{"key":"keyA"}},{"selector":{"selector":"selectorA"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "both keys",
        input: r#"{"name":"x","data":[{"static":{"key":"keyA"},"selector":{"selector":"selA"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "empty entry",
        input: r#"{"name":"x","data":[{}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "swapped payload",
        input: r#"{"name":"x","data":[{"static":{"selector":"selA"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "non-string key",
        input: r#"{"name":"x","data":[{"static":{"key":["keyA"]}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "capitalized discriminator and field",
        input: r#"{"name":"x","data":[{"Static":{"Key":"k"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "capitalized field only",
        input: r#"{"name":"x","data":[{"static":{"Key":"k"}}]}"#,
        expect: Err(ErrorKind::NoMatchingVariant),
    },
    Case {
        name: "entry is a string",
        input: r#"{"name":"x","data":["static"]}"#,
        expect: Err(ErrorKind::MalformedInput),
    },
    Case {
        name: "truncated text",
        input: r#"{"name":"x","data":[{"static":"#,
        expect: Err(ErrorKind::MalformedInput),
    },
];

#[test]
fn scenario_table() {
    let decoder = Decoder::default();
    for case in CASES {
        let result = decoder.decode_document_str(case.input);
        match (&case.expect, result) {
            (Ok(expected), Ok(doc)) => {
                let got: Vec<(VariantKind, &str)> =
                    doc.variants().map(|v| (v.kind(), v.value())).collect();
                assert_eq!(got.as_slice(), *expected, "case: {}", case.name);
            }
            (Err(kind), Err(err)) => {
                assert_eq!(err.kind(), *kind, "case: {} ({err})", case.name);
            }
            (expected, got) => panic!(
                "case {}: expected ok={}, got ok={}",
                case.name,
                expected.is_ok(),
                got.is_ok()
            ),
        }
    }
}

#[test]
fn first_failure_is_named_by_index() {
    let err = api::decode(
        r#"{"name":"x","data":[{"static":{"key":"a"}},{"static":{"key":"b","x":1}},{"nope":{}}]}"#,
    )
    .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NoMatchingVariant);
    assert_eq!(err.index(), Some(1));
}

#[test]
fn encoded_document_round_trips() {
    let input = r#"{"name":"x","data":[{"static":{"key":"keyA"}},{"selector":{"selector":"selA"}}]}"#;
    let doc = api::decode(input).expect("decode");
    let encoded = api::encode(&doc).expect("encode");
    let again = api::decode(&encoded).expect("re-decode");
    assert_eq!(again, doc);

    let original: serde_json::Value = serde_json::from_str(input).expect("json");
    let reencoded: serde_json::Value = serde_json::from_str(&encoded).expect("json");
    assert!(api::value_differences(&original, &reencoded).is_empty());
}

#[test]
fn decoded_value_equals_hand_built_document() {
    let expected = Document::new(
        "validJson",
        vec![
            Variant::Static(StaticSpec {
                key: "keyA".to_string(),
            }),
            Variant::Selector(SelectorSpec {
                selector: "selectorA".to_string(),
            }),
        ],
    );
    let doc = api::decode(
        r#"{"data":[{"static":{"key":"keyA"}},{"selector":{"selector":"selectorA"}}],"name":"validJson"}"#,
    )
    .expect("decode");
    assert_eq!(doc, expected);
}

#[test]
fn policies_agree_on_the_standard_registry() {
    let input = r#"{"name":"x","data":[{"selector":{"selector":"a"}},{"static":{"key":"b"}}]}"#;
    let exclusive = Decoder::default().decode_document_str(input).expect("exclusive");
    let first = Decoder::new(
        Registry::standard(),
        DecodeOptions::new().with_policy(MatchPolicy::FirstMatch),
    )
    .decode_document_str(input)
    .expect("first match");
    assert_eq!(exclusive, first);
}

#[test]
fn decoder_is_shareable_across_threads() {
    let decoder = Decoder::default();
    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|n| {
                let decoder = &decoder;
                scope.spawn(move || {
                    let input = format!(r#"{{"name":"t{n}","data":[{{"static":{{"key":"k{n}"}}}}]}}"#);
                    decoder.decode_document_str(&input).expect("decode")
                })
            })
            .collect();
        for (n, handle) in handles.into_iter().enumerate() {
            let doc = handle.join().expect("join");
            assert_eq!(doc.name(), format!("t{n}"));
            assert_eq!(doc.len(), 1);
        }
    });
}
