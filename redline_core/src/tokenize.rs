//! Splitting text into comparison tokens.
//!
//! Tokens always cover their input exactly: the leading whitespace followed
//! by every token and its trailing whitespace yields the original text.

use crate::config::Granularity;

/// A unit of comparison and the whitespace that follows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    /// Compared content. Never empty.
    pub content: &'a str,
    /// Whitespace after the content, compared separately.
    pub trailing: &'a str,
}

impl<'a> Token<'a> {
    const fn bare(content: &'a str) -> Self {
        Self {
            content,
            trailing: "",
        }
    }

    /// Content followed by its trailing whitespace.
    #[must_use]
    pub fn span(&self) -> String {
        [self.content, self.trailing].concat()
    }
}

/// Tokenized text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens<'a> {
    /// Whitespace before the first token.
    pub leading: &'a str,
    /// Tokens in text order.
    pub tokens: Vec<Token<'a>>,
}

impl Tokens<'_> {
    /// Reassemble the text the tokens were taken from.
    #[must_use]
    pub fn text(&self) -> String {
        let mut text = String::from(self.leading);
        for token in &self.tokens {
            text.push_str(token.content);
            text.push_str(token.trailing);
        }
        text
    }
}

/// Split `text` into tokens of the requested granularity.
///
/// Only word tokens carry trailing whitespace; character and line tokens
/// include whitespace in their content.
#[must_use]
pub fn tokenize(text: &str, granularity: Granularity) -> Tokens<'_> {
    match granularity {
        Granularity::Word => words(text),
        Granularity::Character => Tokens {
            leading: "",
            tokens: text
                .char_indices()
                .map(|(index, ch)| Token::bare(&text[index..index + ch.len_utf8()]))
                .collect(),
        },
        Granularity::Line => Tokens {
            leading: "",
            tokens: text.split_inclusive('\n').map(Token::bare).collect(),
        },
    }
}

/// Word tokens: each maximal non-whitespace run, with the whitespace run
/// after it as its trailing part.
fn words(text: &str) -> Tokens<'_> {
    let content_start = text
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map_or(text.len(), |(index, _)| index);
    let (leading, mut rest) = text.split_at(content_start);

    let mut tokens = Vec::new();
    while !rest.is_empty() {
        let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let (content, after) = rest.split_at(word_end);
        let gap_end = after
            .find(|ch: char| !ch.is_whitespace())
            .unwrap_or(after.len());
        let (trailing, next) = after.split_at(gap_end);
        tokens.push(Token { content, trailing });
        rest = next;
    }

    Tokens { leading, tokens }
}

/// Comparison key for a token when whitespace differences are ignored.
#[must_use]
pub fn whitespace_insensitive_key(content: &str) -> &str {
    content.trim()
}
