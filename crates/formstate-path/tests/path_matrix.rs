use formstate_path::{format_path, get, parse_path, Path, PathError, PathStep};
use formstate_util::Value;
use proptest::prelude::*;
use serde_json::json;

#[test]
fn path_parse_format_roundtrip_matrix() {
    let cases = [
        "email",
        "user.name",
        "addresses[0]",
        "addresses[0].city",
        "grid[2][3].cell",
        "[0]",
        "a-b.c_d.e f",
    ];

    for src in cases {
        let path = parse_path(src).expect("valid path");
        assert_eq!(format_path(path.steps()), src);
    }
}

#[test]
fn path_dotted_index_canonicalizes_matrix() {
    let cases = [
        ("a.0", "a[0]"),
        ("a.0.b", "a[0].b"),
        ("list.10.x", "list[10].x"),
    ];

    for (src, canonical) in cases {
        assert_eq!(parse_path(src).unwrap().to_string(), canonical);
    }
}

#[test]
fn path_malformed_matrix() {
    let cases = ["", ".", "a.", ".a", "a..b", "a[", "a[1", "a[01]", "a[-1]", "a[1.5]", "a]b", "a[0]x"];

    for src in cases {
        assert!(parse_path(src).is_err(), "{src:?} should be malformed");
    }
}

#[test]
fn path_get_matrix() {
    let doc = Value::from(json!({"user": {"tags": ["a", "b"], "meta": null}}));

    let at = |src: &str| get(&doc, parse_path(src).unwrap().steps()).cloned();
    assert_eq!(at("user.tags[1]"), Some(Value::from("b")));
    assert_eq!(at("user.tags[2]"), None);
    assert_eq!(at("user.meta"), Some(Value::Null));
    assert_eq!(at("user.meta.deep"), None);
    assert_eq!(at("nobody.home"), None);
}

#[test]
fn path_builder_matches_parser() {
    let built = Path::root()
        .push("addresses")
        .with_index(1)
        .push("city");
    assert_eq!(built, "addresses[1].city".parse::<Path>().unwrap());
    assert_eq!(
        built.last(),
        Some(&PathStep::Key("city".to_string()))
    );
}

#[test]
fn path_error_messages() {
    assert_eq!(PathError::Empty.to_string(), "path is empty");
    assert_eq!(
        parse_path("a..b").unwrap_err().to_string(),
        "empty segment at offset 2"
    );
}

fn arb_step() -> impl Strategy<Value = PathStep> {
    prop_oneof![
        "[a-zA-Z_][a-zA-Z0-9_]{0,8}".prop_map(PathStep::Key),
        (0usize..1000).prop_map(PathStep::Index),
    ]
}

proptest! {
    #[test]
    fn parse_inverts_format(first in "[a-z]{1,6}", rest in prop::collection::vec(arb_step(), 0..8)) {
        let mut steps = vec![PathStep::Key(first)];
        steps.extend(rest);
        let text = format_path(&steps);
        let parsed = parse_path(&text).unwrap();
        prop_assert_eq!(parsed.steps(), steps.as_slice());
    }
}
