//! Recursive-descent parser for segment patterns.
//!
//! Grammar:
//!
//! ```text
//! sequence    := ( literal | placeholder | optional )*
//! literal     := any run of characters other than ':' '[' ']'
//! placeholder := ':' name ( '{' delimiter-chars '}' )?
//! name        := [A-Za-z0-9_]+
//! optional    := '[' sequence ']'          (non-empty, may nest)
//! ```

use std::collections::HashSet;

use crate::error::RouteError;

/// Character that ends every placeholder capture.
pub const SEPARATOR: char = '/';

/// One element of a compiled segment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Text that must appear verbatim
    Literal(String),
    /// A named capture
    Placeholder(Placeholder),
    /// A group that is either matched in full or treated as absent
    Optional(Vec<Token>),
}

/// A named placeholder and the characters that terminate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Parameter name the capture is stored under
    pub name: String,
    /// Extra terminating characters declared with `:name{chars}`
    pub delimiters: Option<String>,
    /// Leading character of the literal that follows this placeholder, if any
    pub(crate) stop: Option<char>,
}

impl Placeholder {
    /// Whether `c` ends a capture for this placeholder.
    #[inline]
    pub(crate) fn stops_at(&self, c: char) -> bool {
        c == SEPARATOR
            || self.stop == Some(c)
            || self
                .delimiters
                .as_deref()
                .is_some_and(|delims| delims.contains(c))
    }
}

/// A parsed segment pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
}

impl Pattern {
    /// Parse `source` into a token tree.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Syntax`] for unbalanced brackets, empty optional
    /// groups, empty or malformed placeholder names, unterminated delimiter
    /// sets and placeholder names used twice.
    pub fn parse(source: &str) -> Result<Self, RouteError> {
        let mut parser = Parser {
            source,
            pos: 0,
            seen: HashSet::new(),
        };
        let mut tokens = parser.sequence(None)?;
        link_stops(&mut tokens, None);
        Ok(Self {
            source: source.to_string(),
            tokens,
        })
    }

    /// The pattern string this was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Top-level token sequence.
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Every placeholder name in declaration order, including those inside
    /// optional groups.
    #[must_use]
    pub fn placeholder_names(&self) -> Vec<&str> {
        fn collect<'a>(tokens: &'a [Token], out: &mut Vec<&'a str>) {
            for token in tokens {
                match token {
                    Token::Literal(_) => {}
                    Token::Placeholder(p) => out.push(p.name.as_str()),
                    Token::Optional(inner) => collect(inner, out),
                }
            }
        }
        let mut names = Vec::new();
        collect(&self.tokens, &mut names);
        names
    }
}

struct Parser<'a> {
    source: &'a str,
    pos: usize,
    seen: HashSet<String>,
}

impl Parser<'_> {
    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    /// Parse tokens until end of input or, inside a group opened at `open`,
    /// until the matching `]`.
    fn sequence(&mut self, open: Option<usize>) -> Result<Vec<Token>, RouteError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();

        while let Some(c) = self.peek() {
            match c {
                ':' => {
                    flush(&mut literal, &mut tokens);
                    let start = self.pos;
                    self.bump(c);
                    let placeholder = self.placeholder(start)?;
                    tokens.push(Token::Placeholder(placeholder));
                }
                '[' => {
                    flush(&mut literal, &mut tokens);
                    let start = self.pos;
                    self.bump(c);
                    let inner = self.sequence(Some(start))?;
                    if inner.is_empty() {
                        return Err(RouteError::syntax(self.source, start, "empty optional group"));
                    }
                    tokens.push(Token::Optional(inner));
                }
                ']' => {
                    if open.is_none() {
                        return Err(RouteError::syntax(
                            self.source,
                            self.pos,
                            "found closing bracket without matching opening bracket",
                        ));
                    }
                    self.bump(c);
                    flush(&mut literal, &mut tokens);
                    return Ok(tokens);
                }
                _ => {
                    literal.push(c);
                    self.bump(c);
                }
            }
        }

        if let Some(start) = open {
            return Err(RouteError::syntax(
                self.source,
                start,
                "found unbalanced brackets",
            ));
        }
        flush(&mut literal, &mut tokens);
        Ok(tokens)
    }

    fn placeholder(&mut self, start: usize) -> Result<Placeholder, RouteError> {
        let name_start = self.pos;
        while let Some(c) = self.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                self.bump(c);
            } else {
                break;
            }
        }
        let name = &self.source[name_start..self.pos];
        if name.is_empty() {
            return Err(RouteError::syntax(
                self.source,
                start,
                "placeholder name must not be empty",
            ));
        }
        if !self.seen.insert(name.to_string()) {
            return Err(RouteError::syntax(
                self.source,
                start,
                format!("placeholder '{}' is declared more than once", name),
            ));
        }
        let name = name.to_string();

        let mut delimiters = None;
        if self.peek() == Some('{') {
            let brace = self.pos;
            self.bump('{');
            let Some(len) = self.source[self.pos..].find('}') else {
                return Err(RouteError::syntax(
                    self.source,
                    brace,
                    "unterminated delimiter set",
                ));
            };
            if len == 0 {
                return Err(RouteError::syntax(self.source, brace, "empty delimiter set"));
            }
            delimiters = Some(self.source[self.pos..self.pos + len].to_string());
            self.pos += len + 1;
        }

        Ok(Placeholder {
            name,
            delimiters,
            stop: None,
        })
    }
}

fn flush(literal: &mut String, tokens: &mut Vec<Token>) {
    if !literal.is_empty() {
        tokens.push(Token::Literal(std::mem::take(literal)));
    }
}

/// First literal character a sequence would match, looking into a leading
/// optional group.
fn leading_char(tokens: &[Token]) -> Option<char> {
    match tokens.first()? {
        Token::Literal(text) => text.chars().next(),
        Token::Placeholder(_) => None,
        Token::Optional(inner) => leading_char(inner),
    }
}

/// Record on each placeholder the leading character of whatever follows it.
fn link_stops(tokens: &mut [Token], follow: Option<char>) {
    for i in (0..tokens.len()).rev() {
        let next = match tokens.get(i + 1) {
            Some(_) => leading_char(&tokens[i + 1..]),
            None => follow,
        };
        match &mut tokens[i] {
            Token::Literal(_) => {}
            Token::Placeholder(p) => p.stop = next,
            Token::Optional(inner) => link_stops(inner, next),
        }
    }
}
