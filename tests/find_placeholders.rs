use propsub::find_placeholders;

#[test]
fn test_simple_placeholder() {
    let refs = find_placeholders("Hello ${user}");
    assert_eq!(refs, vec!["user"]);
}

#[test]
fn test_sorted_and_deduplicated() {
    let refs = find_placeholders("${b} and ${a} and ${b} and ${c}");
    assert_eq!(refs, vec!["a", "b", "c"]);
}

#[test]
fn test_content_is_raw() {
    let refs = find_placeholders("${db.pass:123} ${odd\\}key}");
    assert_eq!(refs, vec!["db.pass:123", "odd}key"]);
}

#[test]
fn test_skips_escaped_and_unterminated() {
    let refs = find_placeholders("\\${escaped} ${real} ${open");
    assert_eq!(refs, vec!["real"]);
}

#[test]
fn test_no_placeholders() {
    assert!(find_placeholders("").is_empty());
    assert!(find_placeholders("nothing here").is_empty());
    assert!(find_placeholders("$user {user}").is_empty());
}
