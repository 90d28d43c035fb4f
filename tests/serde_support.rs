#![cfg(feature = "serde")]
use propsub::{parse, ParserConfig, Properties};

#[test]
fn test_properties_as_json_object() {
    let props: Properties = serde_json::from_str(r#"{"db.user": "root"}"#).unwrap();
    assert_eq!(props.get("db.user"), Some("root"));
    assert_eq!(parse("${db.user}", Some(&props)), "root");

    let json = serde_json::to_string(&props).unwrap();
    assert_eq!(json, r#"{"db.user":"root"}"#);
}

#[test]
fn test_parser_config_defaults() {
    let config: ParserConfig = serde_json::from_str(r#"{"enable_default_value": true}"#).unwrap();
    assert!(config.enable_default_value);
    assert_eq!(config.default_value_separator, ":");
}
