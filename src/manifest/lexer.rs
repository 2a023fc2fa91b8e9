//! Tokenizer for the subset of GN syntax found in `*_sources.gni` manifests.

use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical unit of a manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Identifier made of word characters.
    Ident(&'a str),
    /// Double-quoted string with escapes resolved.
    Str(String),
    /// A lone `=`.
    Assign,
    /// `[`
    OpenBracket,
    /// `]`
    CloseBracket,
    /// `,`
    Comma,
    /// A bare `.`, `-` or `/`, allowed between list values.
    Punct(char),
    /// Any other character or operator, including `==` and `+=`.
    Other,
}

/// Streaming tokenizer over manifest text. Whitespace and `#` comments are skipped.
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<CharIndices<'a>>,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
        }
    }

    fn skip_line(&mut self) {
        while let Some((_, c)) = self.chars.next() {
            if c == '\n' {
                break;
            }
        }
    }

    fn ident(&mut self, start: usize) -> Token<'a> {
        let mut end = self.source.len();
        while let Some(&(index, c)) = self.chars.peek() {
            if !is_word_char(c) {
                end = index;
                break;
            }
            self.chars.next();
        }
        Token::Ident(&self.source[start..end])
    }

    fn string(&mut self) -> Token<'a> {
        let mut value = String::new();
        while let Some((_, c)) = self.chars.next() {
            match c {
                '"' => return Token::Str(value),
                '\\' => match self.chars.next() {
                    Some((_, escaped)) => value.push(escaped),
                    None => break,
                },
                _ => value.push(c),
            }
        }
        // Unterminated strings never form part of a list.
        Token::Other
    }

    // `[]` with nothing in between is never a list body.
    fn open_bracket(&mut self) -> Token<'a> {
        if matches!(self.chars.peek(), Some(&(_, ']'))) {
            self.chars.next();
            return Token::Other;
        }
        Token::OpenBracket
    }

    fn operator(&mut self, first: char) -> Token<'a> {
        let followed_by_eq = matches!(self.chars.peek(), Some(&(_, '=')));
        if followed_by_eq {
            self.chars.next();
            return Token::Other;
        }
        match first {
            '=' => Token::Assign,
            '-' => Token::Punct('-'),
            _ => Token::Other,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (index, c) = self.chars.next()?;
            let token = match c {
                c if c.is_whitespace() => continue,
                '#' => {
                    self.skip_line();
                    continue;
                }
                '"' => self.string(),
                '[' => self.open_bracket(),
                ']' => Token::CloseBracket,
                ',' => Token::Comma,
                '.' | '/' => Token::Punct(c),
                '=' | '+' | '-' | '!' | '<' | '>' => self.operator(c),
                c if is_word_char(c) => self.ident(index),
                _ => Token::Other,
            };
            return Some(token);
        }
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
