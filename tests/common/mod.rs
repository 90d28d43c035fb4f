use propsub::{Properties, KEY_ENABLE_DEFAULT_VALUE};

#[allow(dead_code)]
pub fn create_properties() -> Properties {
    let mut props = Properties::new();
    props.insert("db.user", "root");
    props.insert("db.host", "localhost");
    props.insert("db.port", "5432");
    props.insert("empty", "");
    props
}

#[allow(dead_code)]
pub fn create_properties_with_defaults() -> Properties {
    let mut props = create_properties();
    props.insert(KEY_ENABLE_DEFAULT_VALUE, "true");
    props
}
