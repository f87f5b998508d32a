//! Tokens produced by the lexer.

use std::fmt;

use enum_iterator::Sequence;

/// A single lexical token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The source text of the token. For string literals and delimited identifiers this is
    /// the value with the quotes removed and escapes resolved.
    pub text: String,
    /// Byte offset of the first character of the token in the query.
    pub offset: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier,
    QuotedIdentifier,
    Number,
    String,
    Comma,
    Period,
    LeftParen,
    RightParen,
    Asterisk,
    Plus,
    Minus,
    Slash,
    Percent,
    Concat,
    Equals,
    NotEquals,
    Less,
    LessOrEqual,
    Greater,
    GreaterOrEqual,
    Semicolon,
    Eof,
}

/// Reserved words. Matching is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Sequence)]
pub enum Keyword {
    All,
    And,
    As,
    Asc,
    Between,
    By,
    Case,
    Cross,
    Desc,
    Distinct,
    Else,
    End,
    Exists,
    False,
    From,
    Full,
    Group,
    Having,
    Ilike,
    In,
    Inner,
    Is,
    Join,
    Left,
    Like,
    Limit,
    Natural,
    Not,
    Null,
    Offset,
    On,
    Or,
    Order,
    Outer,
    Right,
    Select,
    Then,
    Top,
    True,
    Using,
    When,
    Where,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::All => "ALL",
            Keyword::And => "AND",
            Keyword::As => "AS",
            Keyword::Asc => "ASC",
            Keyword::Between => "BETWEEN",
            Keyword::By => "BY",
            Keyword::Case => "CASE",
            Keyword::Cross => "CROSS",
            Keyword::Desc => "DESC",
            Keyword::Distinct => "DISTINCT",
            Keyword::Else => "ELSE",
            Keyword::End => "END",
            Keyword::Exists => "EXISTS",
            Keyword::False => "FALSE",
            Keyword::From => "FROM",
            Keyword::Full => "FULL",
            Keyword::Group => "GROUP",
            Keyword::Having => "HAVING",
            Keyword::Ilike => "ILIKE",
            Keyword::In => "IN",
            Keyword::Inner => "INNER",
            Keyword::Is => "IS",
            Keyword::Join => "JOIN",
            Keyword::Left => "LEFT",
            Keyword::Like => "LIKE",
            Keyword::Limit => "LIMIT",
            Keyword::Natural => "NATURAL",
            Keyword::Not => "NOT",
            Keyword::Null => "NULL",
            Keyword::Offset => "OFFSET",
            Keyword::On => "ON",
            Keyword::Or => "OR",
            Keyword::Order => "ORDER",
            Keyword::Outer => "OUTER",
            Keyword::Right => "RIGHT",
            Keyword::Select => "SELECT",
            Keyword::Then => "THEN",
            Keyword::Top => "TOP",
            Keyword::True => "TRUE",
            Keyword::Using => "USING",
            Keyword::When => "WHEN",
            Keyword::Where => "WHERE",
        }
    }

    /// The keyword spelled by a word, if any.
    pub fn lookup(word: &str) -> Option<Keyword> {
        enum_iterator::all::<Keyword>().find(|keyword| keyword.as_str().eq_ignore_ascii_case(word))
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Token {
    /// How the token is described in syntax errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Keyword(keyword) => keyword.to_string(),
            TokenKind::Identifier => format!("identifier {}", self.text),
            TokenKind::QuotedIdentifier => format!("identifier \"{}\"", self.text),
            TokenKind::Number => format!("number {}", self.text),
            TokenKind::String => format!("string '{}'", self.text),
            TokenKind::Eof => "end of query".to_string(),
            _ => format!("'{}'", self.text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_ignore_case() {
        assert_eq!(Keyword::lookup("select"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("SeLeCt"), Some(Keyword::Select));
        assert_eq!(Keyword::lookup("contains"), None);
    }

    #[test]
    fn every_keyword_round_trips_through_lookup() {
        for keyword in enum_iterator::all::<Keyword>() {
            assert_eq!(Keyword::lookup(keyword.as_str()), Some(keyword));
        }
    }
}
