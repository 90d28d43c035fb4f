mod config;
mod error;
mod properties;
mod resolver;
pub mod scanner;

use std::borrow::Cow;
use std::collections::BTreeSet;

pub use config::{ParserConfig, KEY_DEFAULT_VALUE_SEPARATOR, KEY_ENABLE_DEFAULT_VALUE};
pub use error::Error;
pub use properties::{Properties, PropertySource};
pub use resolver::VariableResolver;
pub use scanner::{Token, TokenHandler, TokenScanner};

/// Resolve the `${key}` placeholders of `text` against `properties`.
///
/// Default values (`${key:default}`) are honored only when `properties`
/// enables them through [`KEY_ENABLE_DEFAULT_VALUE`]. Unresolved
/// placeholders are kept as they are.
pub fn parse<'b>(text: impl Into<Option<&'b str>>, properties: Option<&dyn PropertySource>) -> Cow<'b, str> {
    VariableResolver::new(properties).resolve(text)
}

/// Contents of every terminated `${...}` placeholder in `input`, sorted and
/// without duplicates. Escaped and unterminated markers are skipped.
pub fn find_placeholders(input: &str) -> Vec<String> {
    let scanner = TokenScanner::default();
    let placeholders: BTreeSet<String> = scanner
        .tokens(input)
        .filter_map(|(token, _)| match token {
            Token::Placeholder(content) => Some(content.into_owned()),
            _ => None,
        })
        .collect();
    placeholders.into_iter().collect()
}
