//! Token types for the Robolang language.

use std::fmt;

use robolang_core::method::Method;

use crate::span::{Position, Span};

/// Classification of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    RobotKeyword,

    // Names and literals
    Identifier,
    Number,
    MethodName(Method),

    // Punctuation
    Dot,    // .
    Equals, // =
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }

    // Trivia, recognized by the lexer but never emitted
    Comment,
    Whitespace,

    Error,
    EndOfInput,
}

impl TokenKind {
    /// Returns `true` for comments and whitespace.
    pub fn is_trivia(&self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::Whitespace)
    }

    /// Short upper-case name used in token listings.
    pub fn label(&self) -> &'static str {
        match self {
            TokenKind::RobotKeyword => "ROBOT",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Number => "NUMBER",
            TokenKind::MethodName(_) => "METHOD",
            TokenKind::Dot => "DOT",
            TokenKind::Equals => "EQUALS",
            TokenKind::LParen => "LPAREN",
            TokenKind::RParen => "RPAREN",
            TokenKind::LBrace => "LBRACE",
            TokenKind::RBrace => "RBRACE",
            TokenKind::Comment => "COMMENT",
            TokenKind::Whitespace => "WHITESPACE",
            TokenKind::Error => "ERROR",
            TokenKind::EndOfInput => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::RobotKeyword => write!(f, "keyword `Robot`"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::MethodName(method) => write!(f, "method `{method}`"),
            TokenKind::Dot => write!(f, "`.`"),
            TokenKind::Equals => write!(f, "`=`"),
            TokenKind::LParen => write!(f, "`(`"),
            TokenKind::RParen => write!(f, "`)`"),
            TokenKind::LBrace => write!(f, "`{{`"),
            TokenKind::RBrace => write!(f, "`}}`"),
            TokenKind::Comment => write!(f, "comment"),
            TokenKind::Whitespace => write!(f, "whitespace"),
            TokenKind::Error => write!(f, "invalid character"),
            TokenKind::EndOfInput => write!(f, "end of input"),
        }
    }
}

/// A classified slice of the source text with its location.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    lexeme: &'src str,
    kind: TokenKind,
    position: Position,
    span: Span,
}

impl<'src> Token<'src> {
    pub fn new(lexeme: &'src str, kind: TokenKind, position: Position, span: Span) -> Self {
        Self {
            lexeme,
            kind,
            position,
            span,
        }
    }

    /// The exact source text of the token. Empty for [`TokenKind::EndOfInput`].
    pub fn lexeme(&self) -> &'src str {
        self.lexeme
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn position(&self) -> Position {
        self.position
    }

    /// 1-based line of the first character.
    pub fn line(&self) -> u32 {
        self.position.line()
    }

    /// 1-based column of the first character.
    pub fn column(&self) -> u32 {
        self.position.column()
    }

    pub fn span(&self) -> Span {
        self.span
    }

    /// Describe the token for "found ..." messages, e.g. ``number `5` ``.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Identifier | TokenKind::Number | TokenKind::Error => {
                format!("{} `{}`", self.kind, self.lexeme)
            }
            _ => self.kind.to_string(),
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<12} {:<16} {}",
            self.kind.label(),
            format!("'{}'", self.lexeme),
            self.position
        )
    }
}
