use std::borrow::Cow;
use std::ops::Range;

use memchr::memmem::Finder;

use crate::error::Error;

/// Turns the content of a placeholder into its replacement text.
pub trait TokenHandler {
    fn handle_token<'s>(&'s self, content: &str) -> Cow<'s, str>;
}

impl<F> TokenHandler for F
where
    F: Fn(&str) -> String,
{
    fn handle_token<'s>(&'s self, content: &str) -> Cow<'s, str> {
        Cow::Owned(self(content))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Text copied through unchanged
    Literal(&'a str),
    /// A backslash-escaped open marker; holds the marker without the backslash
    Escaped(&'a str),
    /// Placeholder content between the markers, with `\close` unescaped
    Placeholder(Cow<'a, str>),
    /// An open marker that is never closed, through to the end of input
    Unterminated(&'a str),
}

/// Scanner for placeholders delimited by an open and a close marker.
#[derive(Debug, Clone)]
pub struct TokenScanner {
    open: String,
    close: String,
    open_finder: Finder<'static>,
    close_finder: Finder<'static>,
}

/// `${` / `}` placeholders.
impl Default for TokenScanner {
    fn default() -> Self {
        Self::build("${".to_string(), "}".to_string())
    }
}

impl TokenScanner {
    pub fn new(open: impl Into<String>, close: impl Into<String>) -> Result<Self, Error> {
        let open = open.into();
        let close = close.into();
        if open.is_empty() {
            return Err(Error::EmptyMarker("open"));
        }
        if close.is_empty() {
            return Err(Error::EmptyMarker("close"));
        }
        Ok(Self::build(open, close))
    }

    fn build(open: String, close: String) -> Self {
        let open_finder = Finder::new(open.as_bytes()).into_owned();
        let close_finder = Finder::new(close.as_bytes()).into_owned();
        Self {
            open,
            close,
            open_finder,
            close_finder,
        }
    }

    pub fn open(&self) -> &str {
        &self.open
    }

    pub fn close(&self) -> &str {
        &self.close
    }

    /// Iterate over the tokens of `source`. The yielded ranges cover the
    /// input end to end.
    pub fn tokens<'s, 'a>(&'s self, source: &'a str) -> Tokens<'s, 'a> {
        Tokens {
            scanner: self,
            source,
            offset: 0,
            pending: None,
        }
    }

    /// Replace every placeholder in `text` with what `handler` returns for it.
    ///
    /// Returns `Cow::Borrowed` when `text` holds no open marker. Absent or
    /// empty input gives an empty string.
    pub fn parse<'a, H>(&self, text: impl Into<Option<&'a str>>, handler: &H) -> Cow<'a, str>
    where
        H: TokenHandler + ?Sized,
    {
        let text = match text.into() {
            Some(text) if !text.is_empty() => text,
            _ => return Cow::Borrowed(""),
        };
        if self.find_open(text, 0).is_none() {
            return Cow::Borrowed(text);
        }

        let mut result = String::with_capacity(text.len() + 16);
        for (token, _) in self.tokens(text) {
            match token {
                Token::Literal(s) | Token::Escaped(s) | Token::Unterminated(s) => result.push_str(s),
                Token::Placeholder(content) => result.push_str(&handler.handle_token(&content)),
            }
        }
        Cow::Owned(result)
    }

    fn find_open(&self, source: &str, from: usize) -> Option<usize> {
        self.open_finder.find(&source.as_bytes()[from..]).map(|p| from + p)
    }

    fn find_close(&self, source: &str, from: usize) -> Option<usize> {
        self.close_finder.find(&source.as_bytes()[from..]).map(|p| from + p)
    }
}

#[derive(Debug)]
pub struct Tokens<'s, 'a> {
    scanner: &'s TokenScanner,
    source: &'a str,
    offset: usize,
    pending: Option<(Token<'a>, Range<usize>)>,
}

impl<'s, 'a> Tokens<'s, 'a> {
    /// Emit the literal text before `item` first, if there is any.
    fn after_literal(&mut self, literal_end: usize, item: (Token<'a>, Range<usize>)) -> (Token<'a>, Range<usize>) {
        let literal = self.offset..literal_end;
        self.offset = item.1.end;
        if literal.is_empty() {
            item
        } else {
            self.pending = Some(item);
            (Token::Literal(&self.source[literal.clone()]), literal)
        }
    }

    /// Collect placeholder content starting right after an open marker.
    /// Returns the content and the position just past the genuine close
    /// marker, or `None` when there is none.
    fn scan_placeholder(&self, content_start: usize) -> Option<(Cow<'a, str>, usize)> {
        let source = self.source;
        let bytes = source.as_bytes();
        let close = self.scanner.close.as_str();
        let mut cursor = content_start;
        let mut unescaped: Option<String> = None;

        loop {
            let end = self.scanner.find_close(source, cursor)?;
            if end == cursor || bytes[end - 1] != b'\\' {
                let tail = &source[cursor..end];
                let content = match unescaped {
                    Some(mut buf) => {
                        buf.push_str(tail);
                        Cow::Owned(buf)
                    }
                    None => Cow::Borrowed(tail),
                };
                return Some((content, end + close.len()));
            }

            // Escaped close marker: drop the backslash, keep the marker.
            let buf = unescaped.get_or_insert_with(String::new);
            buf.push_str(&source[cursor..end - 1]);
            buf.push_str(close);
            cursor = end + close.len();
        }
    }
}

impl<'s, 'a> Iterator for Tokens<'s, 'a> {
    type Item = (Token<'a>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(item) = self.pending.take() {
            return Some(item);
        }

        let source = self.source;
        if self.offset >= source.len() {
            return None;
        }

        let Some(start) = self.scanner.find_open(source, self.offset) else {
            let rest = self.offset..source.len();
            self.offset = source.len();
            return Some((Token::Literal(&source[rest.clone()]), rest));
        };
        let content_start = start + self.scanner.open.len();

        // Only a backslash that has not been emitted yet escapes the marker.
        if start > self.offset && source.as_bytes()[start - 1] == b'\\' {
            let item = (Token::Escaped(&source[start..content_start]), start - 1..content_start);
            return Some(self.after_literal(start - 1, item));
        }

        let item = match self.scan_placeholder(content_start) {
            Some((content, end)) => (Token::Placeholder(content), start..end),
            None => (Token::Unterminated(&source[start..]), start..source.len()),
        };
        Some(self.after_literal(start, item))
    }
}
