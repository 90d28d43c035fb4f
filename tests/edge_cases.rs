mod common;
use common::create_properties;
use propsub::{parse, Properties};
use std::borrow::Cow;

#[test]
fn test_empty_input() {
    let props = create_properties();
    assert_eq!(parse("", Some(&props)), "");
    assert_eq!(parse(None::<&str>, Some(&props)), "");
    assert_eq!(parse(None::<&str>, None), "");
}

#[test]
fn test_no_placeholder_returns_input() {
    let props = create_properties();
    for input in ["plain", "a } b", "$ {x}", "{db.user}", "$"] {
        let result = parse(input, Some(&props));
        assert!(matches!(result, Cow::Borrowed(_)));
        assert_eq!(result, input);
    }
}

#[test]
fn test_unterminated_placeholder() {
    let props = create_properties();
    assert_eq!(parse("a${b", Some(&props)), "a${b");
    assert_eq!(parse("${db.user} ${db.host", Some(&props)), "root ${db.host");
}

#[test]
fn test_first_close_marker_ends_placeholder() {
    let props = create_properties();
    assert_eq!(parse("${db.user ${db.host}", Some(&props)), "${db.user ${db.host}");
}

#[test]
fn test_nested_placeholders_do_not_nest() {
    let mut props = Properties::new();
    props.insert("a${b", "inner");
    assert_eq!(parse("${a${b}}", Some(&props)), "inner}");
}

#[test]
fn test_empty_key() {
    let mut props = create_properties();
    assert_eq!(parse("${}", Some(&props)), "${}");
    props.insert("", "empty_key_val");
    assert_eq!(parse("${}", Some(&props)), "empty_key_val");
}

#[test]
fn test_utf8() {
    let mut props = create_properties();
    props.insert("🚀", "rocket");
    props.insert("greeting", "Héllo Wörld");
    assert_eq!(parse("${🚀} → ${greeting}", Some(&props)), "rocket → Héllo Wörld");
}

#[test]
fn test_lone_markers() {
    let props = create_properties();
    assert_eq!(parse("${", Some(&props)), "${");
    assert_eq!(parse("}${db.user}}", Some(&props)), "}root}");
}

#[test]
fn test_idempotent_once_resolved() {
    let props = create_properties();
    let once = parse("${db.user}@${db.host}", Some(&props)).into_owned();
    let twice = parse(once.as_str(), Some(&props));
    assert_eq!(twice, once);
}
