use std::borrow::Cow;
use std::sync::OnceLock;

use crate::config::ParserConfig;
use crate::properties::PropertySource;
use crate::scanner::{TokenHandler, TokenScanner};

const OPEN: &str = "${";
const CLOSE: &str = "}";

fn placeholder_scanner() -> &'static TokenScanner {
    static SCANNER: OnceLock<TokenScanner> = OnceLock::new();
    SCANNER.get_or_init(TokenScanner::default)
}

/// Resolves `${key}` placeholders against a property set.
pub struct VariableResolver<'p> {
    properties: Option<&'p dyn PropertySource>,
    config: ParserConfig,
}

impl<'p> VariableResolver<'p> {
    /// Build a resolver whose settings come from `properties` itself.
    pub fn new(properties: Option<&'p dyn PropertySource>) -> Self {
        let config = ParserConfig::from_properties(properties);
        Self { properties, config }
    }

    /// Build a resolver with explicit settings, ignoring the configuration
    /// keys in `properties`.
    pub fn with_config(properties: Option<&'p dyn PropertySource>, config: ParserConfig) -> Self {
        Self { properties, config }
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Replace every `${...}` placeholder in `text`.
    ///
    /// Returns `Cow::Borrowed` if `text` holds no placeholder (zero-copy).
    pub fn resolve<'b>(&self, text: impl Into<Option<&'b str>>) -> Cow<'b, str> {
        placeholder_scanner().parse(text, self)
    }

    fn unresolved<'s>(content: &str) -> Cow<'s, str> {
        log::debug!("placeholder ${{{}}} left unresolved", content);
        Cow::Owned(format!("{}{}{}", OPEN, content, CLOSE))
    }
}

impl<'p> TokenHandler for VariableResolver<'p> {
    fn handle_token<'s>(&'s self, content: &str) -> Cow<'s, str> {
        let Some(properties) = self.properties else {
            return Self::unresolved(content);
        };

        if self.config.enable_default_value {
            let separator = self.config.default_value_separator.as_str();
            if let Some((key, default)) = content.split_once(separator) {
                return match properties.get_value(key) {
                    Some(value) => {
                        log::trace!("resolved ${{{}}}", key);
                        Cow::Borrowed(value)
                    }
                    None => {
                        log::debug!("property {} not set, using default value", key);
                        Cow::Owned(default.to_string())
                    }
                };
            }
        }

        match properties.get_value(content) {
            Some(value) => {
                log::trace!("resolved ${{{}}}", content);
                Cow::Borrowed(value)
            }
            None => Self::unresolved(content),
        }
    }
}
