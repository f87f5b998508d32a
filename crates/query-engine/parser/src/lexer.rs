//! Split ADQL text into tokens.

use crate::error::{LexError, LexErrorKind};
use crate::token::{Keyword, Token, TokenKind};

/// A lazy iterator over the tokens of a query. It ends with a single `Eof` token, or stops
/// after the first error. Cloning a lexer gives an independent cursor at the same place.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    query: &'a str,
    position: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(query: &'a str) -> Lexer<'a> {
        Lexer {
            query,
            position: 0,
            done: false,
        }
    }

    /// Go back to the start of the query.
    pub fn restart(&mut self) {
        self.position = 0;
        self.done = false;
    }

    /// The offset just past the last character of the query.
    pub fn end(&self) -> usize {
        self.query.len()
    }

    fn peek(&self) -> Option<char> {
        self.query[self.position..].chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        let mut chars = self.query[self.position..].chars();
        chars.next();
        chars.next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn bump_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.peek().is_some_and(&predicate) {
            self.bump();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            text: self.query[start..self.position].to_string(),
            offset: start,
        }
    }

    fn error(&self, kind: LexErrorKind, offset: usize) -> LexError {
        LexError { kind, offset }
    }

    /// Skip whitespace and comments.
    fn skip_trivia(&mut self) -> Result<(), LexError> {
        loop {
            match (self.peek(), self.peek_second()) {
                (Some(c), _) if c.is_whitespace() => self.bump_while(char::is_whitespace),
                (Some('-'), Some('-')) => self.bump_while(|c| c != '\n'),
                (Some('/'), Some('*')) => {
                    let start = self.position;
                    match self.query[start + 2..].find("*/") {
                        Some(end) => self.position = start + 2 + end + 2,
                        None => return Err(self.error(LexErrorKind::UnterminatedComment, start)),
                    }
                }
                _ => return Ok(()),
            }
        }
    }

    /// Text between `quote`s, where a doubled quote stands for itself.
    fn quoted(&mut self, quote: char) -> Option<String> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.bump()? {
                c if c == quote => {
                    if self.peek() == Some(quote) {
                        self.bump();
                        value.push(quote);
                    } else {
                        return Some(value);
                    }
                }
                c => value.push(c),
            }
        }
    }

    fn malformed_number(&mut self, start: usize) -> LexError {
        self.bump_while(is_identifier_char);
        let text = self.query[start..self.position].to_string();
        self.error(LexErrorKind::MalformedNumber(text), start)
    }

    fn number(&mut self, start: usize) -> Result<Token, LexError> {
        self.bump_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') {
            self.bump();
            self.bump_while(|c| c.is_ascii_digit());
        }
        if matches!(self.peek(), Some('e' | 'E')) {
            self.bump();
            if matches!(self.peek(), Some('+' | '-')) {
                self.bump();
            }
            if !self.peek().is_some_and(|c| c.is_ascii_digit()) {
                return Err(self.malformed_number(start));
            }
            self.bump_while(|c| c.is_ascii_digit());
        }
        if self.peek().is_some_and(is_identifier_char) {
            return Err(self.malformed_number(start));
        }
        Ok(self.token(TokenKind::Number, start))
    }

    fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_trivia()?;
        let start = self.position;
        let Some(c) = self.peek() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        if c.is_alphabetic() || c == '_' {
            self.bump_while(is_identifier_char);
            let word = &self.query[start..self.position];
            let kind = match Keyword::lookup(word) {
                Some(keyword) => TokenKind::Keyword(keyword),
                None => TokenKind::Identifier,
            };
            return Ok(self.token(kind, start));
        }
        if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|c| c.is_ascii_digit()))
        {
            return self.number(start);
        }
        if c == '\'' || c == '"' {
            let (kind, error) = if c == '\'' {
                (TokenKind::String, LexErrorKind::UnterminatedString)
            } else {
                (
                    TokenKind::QuotedIdentifier,
                    LexErrorKind::UnterminatedIdentifier,
                )
            };
            let text = self.quoted(c).ok_or_else(|| self.error(error, start))?;
            return Ok(Token {
                kind,
                text,
                offset: start,
            });
        }

        self.bump();
        let kind = match (c, self.peek()) {
            ('<', Some('>')) | ('!', Some('=')) => {
                self.bump();
                TokenKind::NotEquals
            }
            ('<', Some('=')) => {
                self.bump();
                TokenKind::LessOrEqual
            }
            ('>', Some('=')) => {
                self.bump();
                TokenKind::GreaterOrEqual
            }
            ('|', Some('|')) => {
                self.bump();
                TokenKind::Concat
            }
            ('<', _) => TokenKind::Less,
            ('>', _) => TokenKind::Greater,
            ('=', _) => TokenKind::Equals,
            (',', _) => TokenKind::Comma,
            ('.', _) => TokenKind::Period,
            ('(', _) => TokenKind::LeftParen,
            (')', _) => TokenKind::RightParen,
            ('*', _) => TokenKind::Asterisk,
            ('+', _) => TokenKind::Plus,
            ('-', _) => TokenKind::Minus,
            ('/', _) => TokenKind::Slash,
            ('%', _) => TokenKind::Percent,
            (';', _) => TokenKind::Semicolon,
            (c, _) => return Err(self.error(LexErrorKind::InvalidCharacter(c), start)),
        };
        Ok(self.token(kind, start))
    }
}

fn is_identifier_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        match &result {
            Ok(Token {
                kind: TokenKind::Eof,
                ..
            })
            | Err(_) => self.done = true,
            Ok(_) => (),
        }
        Some(result)
    }
}
