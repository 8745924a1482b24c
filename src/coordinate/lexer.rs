//! Tokenizer for the Clojure-like coordinate micro-grammar.
//!
//! Only what build tools print inside a dependency vector is understood:
//! brackets, symbols, keywords, numbers, string literals, whitespace (commas
//! included) and `;` comments. Everything else becomes a one-character
//! [`TokenKind::Other`] token so the lexer never fails.

/// Classification of a lexed token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    OpenBracket,
    CloseBracket,
    Symbol,
    Keyword,
    Number,
    String,
    Whitespace,
    Comment,
    Other,
}

/// A token borrowing its text from the source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    /// Byte offset of the token in the source.
    pub start: usize,
}

impl Token<'_> {
    /// Content of a string literal without the quotes, escapes resolved.
    ///
    /// An unterminated literal yields everything after the opening quote.
    /// For non-string tokens the raw text is returned.
    #[must_use]
    pub fn unquoted(&self) -> String {
        if self.kind != TokenKind::String {
            return self.text.to_string();
        }
        let body = self.text.strip_prefix('"').unwrap_or(self.text);
        let body = if !body.is_empty() && body.ends_with('"') && !ends_with_escape(body) {
            &body[..body.len() - 1]
        } else {
            body
        };

        let mut out = String::with_capacity(body.len());
        let mut chars = body.chars();
        while let Some(ch) = chars.next() {
            if ch != '\\' {
                out.push(ch);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        out
    }
}

// A closing quote preceded by an odd number of backslashes is escaped.
fn ends_with_escape(body: &str) -> bool {
    let without_quote = &body[..body.len() - 1];
    without_quote.bytes().rev().take_while(|b| *b == b'\\').count() % 2 == 1
}

pub struct Lexer<'src> {
    source: &'src str,
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            bytes: source.as_bytes(),
            pos: 0,
        }
    }

    /// Lex the whole source, whitespace and comments included.
    pub fn tokenize(mut self) -> Vec<Token<'src>> {
        let mut tokens = Vec::new();
        while let Some(tok) = self.next_token() {
            tokens.push(tok);
        }
        tokens
    }

    fn next_token(&mut self) -> Option<Token<'src>> {
        if self.pos >= self.bytes.len() {
            return None;
        }

        let start = self.pos;
        let ch = self.bytes[start];

        let kind = match ch {
            b'[' | b'(' | b'{' => {
                self.pos += 1;
                TokenKind::OpenBracket
            }
            b']' | b')' | b'}' => {
                self.pos += 1;
                TokenKind::CloseBracket
            }
            b'"' => {
                self.scan_string();
                TokenKind::String
            }
            b';' => {
                while self.pos < self.bytes.len() && self.bytes[self.pos] != b'\n' {
                    self.pos += 1;
                }
                TokenKind::Comment
            }
            b':' => {
                self.pos += 1;
                self.scan_symbol_chars();
                TokenKind::Keyword
            }
            _ if is_whitespace(ch) => {
                while self.pos < self.bytes.len() && is_whitespace(self.bytes[self.pos]) {
                    self.pos += 1;
                }
                TokenKind::Whitespace
            }
            _ if ch.is_ascii_digit() => {
                self.scan_symbol_chars();
                TokenKind::Number
            }
            _ if is_symbol_start(ch) => {
                self.scan_symbol_chars();
                TokenKind::Symbol
            }
            _ => {
                // Advance a whole UTF-8 character, not a byte
                let width = self.source[start..].chars().next().map_or(1, char::len_utf8);
                self.pos += width;
                TokenKind::Other
            }
        };

        Some(Token {
            kind,
            text: &self.source[start..self.pos],
            start,
        })
    }

    fn scan_string(&mut self) {
        // Opening quote
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.bytes[self.pos] {
                b'\\' => self.pos = (self.pos + 2).min(self.bytes.len()),
                b'"' => {
                    self.pos += 1;
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn scan_symbol_chars(&mut self) {
        while self.pos < self.bytes.len() && is_symbol_char(self.bytes[self.pos]) {
            self.pos += 1;
        }
    }
}

fn is_whitespace(ch: u8) -> bool {
    ch.is_ascii_whitespace() || ch == b','
}

fn is_symbol_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic()
        || matches!(ch, b'*' | b'+' | b'!' | b'-' | b'_' | b'?' | b'<' | b'>' | b'=' | b'.' | b'/' | b'&' | b'%' | b'$')
}

fn is_symbol_char(ch: u8) -> bool {
    is_symbol_start(ch) || ch.is_ascii_digit() || matches!(ch, b'#' | b'\'' | b':')
}
