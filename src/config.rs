#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::properties::PropertySource;

/// Property key that switches on the `${key:default}` syntax.
pub const KEY_ENABLE_DEFAULT_VALUE: &str = "org.apache.ibatis.parsing.PropertyParser.enable-default-value";

/// Property key holding the separator between key and default value.
pub const KEY_DEFAULT_VALUE_SEPARATOR: &str = "org.apache.ibatis.parsing.PropertyParser.default-value-separator";

const DEFAULT_VALUE_SEPARATOR: &str = ":";

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ParserConfig {
    /// Enable default values (`${key:default}`)
    pub enable_default_value: bool,
    /// Separator between key and default value, only used when defaults are enabled
    pub default_value_separator: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            enable_default_value: false,
            default_value_separator: DEFAULT_VALUE_SEPARATOR.to_string(),
        }
    }
}

impl ParserConfig {
    /// Reads both settings from the property set they configure.
    ///
    /// Missing keys, or a missing property set, keep the defaults. Only a
    /// case-insensitive `"true"` enables default values.
    pub fn from_properties(properties: Option<&dyn PropertySource>) -> Self {
        let mut config = Self::default();
        let Some(properties) = properties else {
            return config;
        };

        if let Some(enabled) = properties.get_value(KEY_ENABLE_DEFAULT_VALUE) {
            config.enable_default_value = enabled.eq_ignore_ascii_case("true");
        }
        if let Some(separator) = properties.get_value(KEY_DEFAULT_VALUE_SEPARATOR) {
            config.default_value_separator = separator.to_string();
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_without_properties() {
        let config = ParserConfig::from_properties(None);
        assert!(!config.enable_default_value);
        assert_eq!(config.default_value_separator, ":");
    }

    #[test]
    fn test_reads_both_keys() {
        let mut props = HashMap::new();
        props.insert(KEY_ENABLE_DEFAULT_VALUE, "TRUE");
        props.insert(KEY_DEFAULT_VALUE_SEPARATOR, "?:");
        let config = ParserConfig::from_properties(Some(&props));
        assert!(config.enable_default_value);
        assert_eq!(config.default_value_separator, "?:");
    }

    #[test]
    fn test_anything_but_true_disables() {
        let mut props = HashMap::new();
        props.insert(KEY_ENABLE_DEFAULT_VALUE, "yes");
        let config = ParserConfig::from_properties(Some(&props));
        assert!(!config.enable_default_value);
    }
}
