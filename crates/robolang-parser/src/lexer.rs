//! Lexical analyzer for Robolang source text.
//!
//! The [`Lexer`] turns source text into a lazy stream of [`Token`]s. Each
//! token class has its own small winnow recognizer and [`token_kind`] picks
//! between them. Comments and whitespace are recognized and dropped.
//!
//! Lexing never fails. A character that cannot start any token becomes a
//! [`TokenKind::Error`] token on its own and scanning resumes with the next
//! character, so one stray character costs exactly one diagnostic.

use log::debug;
use winnow::{
    Parser as _,
    ascii::digit1,
    combinator::{alt, opt, preceded},
    error::ModalResult,
    stream::{LocatingSlice, Location, Stream},
    token::take_while,
};

use robolang_core::method::Method;

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{LineTracker, Span},
    tokens::{Token, TokenKind},
};

/// The declaration keyword. Case-sensitive.
pub const ROBOT_KEYWORD: &str = "Robot";

type Input<'src> = LocatingSlice<&'src str>;

/// Parse line comment starting with '//'
///
/// The terminator is left for [`whitespace`], so a `\r\n` pair stays intact.
fn line_comment(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    preceded("//", take_while(0.., |c: char| c != '\n' && c != '\r'))
        .value(TokenKind::Comment)
        .parse_next(input)
}

/// Parse whitespace, newlines included
fn whitespace(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    take_while(1.., char::is_whitespace)
        .value(TokenKind::Whitespace)
        .parse_next(input)
}

/// Parse a number: digits, optionally followed by one `.` and more digits.
///
/// A `.` that is not followed by a digit is left in place, so `1.` lexes as
/// the number `1` and a dot.
fn number(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    (digit1, opt(('.', digit1)))
        .value(TokenKind::Number)
        .parse_next(input)
}

/// Parse a word: the `Robot` keyword, a method name or an identifier.
fn word(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    take_while(1.., |c: char| c.is_alphanumeric() || c == '_')
        .verify(|s: &str| s.chars().next().is_some_and(char::is_alphabetic))
        .map(classify_word)
        .parse_next(input)
}

fn classify_word(word: &str) -> TokenKind {
    if word == ROBOT_KEYWORD {
        return TokenKind::RobotKeyword;
    }
    match word.parse::<Method>() {
        Ok(method) => TokenKind::MethodName(method),
        Err(_) => TokenKind::Identifier,
    }
}

/// Parse single character tokens
fn punctuation(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        '.'.value(TokenKind::Dot),
        '='.value(TokenKind::Equals),
        '('.value(TokenKind::LParen),
        ')'.value(TokenKind::RParen),
        '{'.value(TokenKind::LBrace),
        '}'.value(TokenKind::RBrace),
    ))
    .parse_next(input)
}

/// Recognize the next token class, trivia included.
fn token_kind(input: &mut Input<'_>) -> ModalResult<TokenKind> {
    alt((
        line_comment, // Must come before any single char
        whitespace,
        number, // Must come before word so digits never start an identifier
        word,
        punctuation,
    ))
    .parse_next(input)
}

/// Lazy tokenizer over one source string.
///
/// Yields every significant token in source order, then exactly one
/// [`TokenKind::EndOfInput`], then `None`. Cloning a lexer forks it; a fresh
/// [`Lexer::new`] always starts from the beginning of the source.
#[derive(Debug, Clone)]
pub struct Lexer<'src> {
    source: &'src str,
    input: Input<'src>,
    lines: LineTracker<'src>,
    finished: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            input: LocatingSlice::new(source),
            lines: LineTracker::new(source),
            finished: false,
        }
    }

    fn make_token(&self, kind: TokenKind, start: usize, end: usize) -> Token<'src> {
        Token::new(
            &self.source[start..end],
            kind,
            self.lines.position(),
            Span::new(start..end),
        )
    }
}

impl<'src> Iterator for Lexer<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            let start = self.input.current_token_start();
            self.lines.advance_to(start);

            if self.input.is_empty() {
                self.finished = true;
                return Some(self.make_token(TokenKind::EndOfInput, start, start));
            }

            match token_kind(&mut self.input) {
                Ok(kind) if kind.is_trivia() => continue,
                Ok(kind) => {
                    let end = self.input.current_token_start();
                    return Some(self.make_token(kind, start, end));
                }
                Err(_) => {
                    // Skip exactly one character and report it.
                    let ch = self.input.next_token()?;
                    return Some(self.make_token(TokenKind::Error, start, start + ch.len_utf8()));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}

/// Tokenize a whole source string.
///
/// The returned vector always ends with a single [`TokenKind::EndOfInput`].
pub fn tokenize(source: &str) -> Vec<Token<'_>> {
    debug!(bytes = source.len(); "Lexing source");

    let tokens: Vec<_> = Lexer::new(source).collect();

    debug!(
        tokens = tokens.len(),
        errors = tokens.iter().filter(|t| t.kind() == TokenKind::Error).count();
        "Lexing finished"
    );

    tokens
}

/// Build the lexical diagnostic for one [`TokenKind::Error`] token.
pub(crate) fn error_token_diagnostic(token: &Token<'_>) -> Diagnostic {
    Diagnostic::lexical(
        token.position(),
        format!("unexpected character `{}`", token.lexeme().escape_debug()),
    )
    .with_code(ErrorCode::E001)
    .with_label(token.span(), ErrorCode::E001.description())
    .with_help(
        "only letters, digits, `_`, `.`, `=`, `(`, `)`, `{`, `}` and `//` comments may appear",
    )
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::span::Position;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(Token::kind).collect()
    }

    fn test_single_token(input: &str, expected: TokenKind) {
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2, "Expected one token for {input:?}: {tokens:?}");
        assert_eq!(tokens[0].kind(), expected, "Wrong kind for {input:?}");
        assert_eq!(tokens[0].lexeme(), input);
    }

    #[test]
    fn test_keyword_is_case_sensitive() {
        test_single_token("Robot", TokenKind::RobotKeyword);
        test_single_token("robot", TokenKind::Identifier);
        test_single_token("ROBOT", TokenKind::Identifier);
        test_single_token("Robots", TokenKind::Identifier);
    }

    #[test]
    fn test_method_names() {
        for method in Method::ALL {
            test_single_token(method.name(), TokenKind::MethodName(method));
        }
        test_single_token("Base", TokenKind::Identifier);
        test_single_token("abrirgarra", TokenKind::Identifier);
        test_single_token("baseline", TokenKind::Identifier);
    }

    #[test]
    fn test_identifiers() {
        test_single_token("r1", TokenKind::Identifier);
        test_single_token("brazo_izq", TokenKind::Identifier);
        test_single_token("ñandú", TokenKind::Identifier);
    }

    #[test]
    fn test_numbers() {
        test_single_token("0", TokenKind::Number);
        test_single_token("360", TokenKind::Number);
        test_single_token("50.5", TokenKind::Number);
    }

    #[test]
    fn test_number_takes_one_decimal_point() {
        let tokens = tokenize("1.2.3");
        let lexemes: Vec<_> = tokens.iter().map(Token::lexeme).collect();
        assert_eq!(lexemes, ["1.2", ".", "3", ""]);
    }

    #[test]
    fn test_trailing_dot_is_not_part_of_number() {
        assert_eq!(
            kinds("7."),
            [TokenKind::Number, TokenKind::Dot, TokenKind::EndOfInput]
        );
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = tokenize("12ab");
        assert_eq!(tokens[0].kind(), TokenKind::Number);
        assert_eq!(tokens[0].lexeme(), "12");
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
        assert_eq!(tokens[1].lexeme(), "ab");
    }

    #[test]
    fn test_punctuation() {
        assert_eq!(
            kinds(". = ( ) { }"),
            [
                TokenKind::Dot,
                TokenKind::Equals,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_statement() {
        assert_eq!(
            kinds("r1.base(90)"),
            [
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::MethodName(Method::Base),
                TokenKind::LParen,
                TokenKind::Number,
                TokenKind::RParen,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_comments_and_whitespace_are_dropped() {
        assert_eq!(kinds("  // Robot r1\n\t\r\n"), [TokenKind::EndOfInput]);
        assert_eq!(kinds(""), [TokenKind::EndOfInput]);
    }

    #[test]
    fn test_comment_ends_at_line_break() {
        let tokens = tokenize("// note\r\nRobot r1");
        assert_eq!(tokens[0].kind(), TokenKind::RobotKeyword);
        assert_eq!(tokens[0].position(), Position::new(2, 1));
    }

    #[test]
    fn test_single_slash_is_an_error() {
        let tokens = tokenize("/ x");
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(tokens[0].lexeme(), "/");
        assert_eq!(tokens[1].kind(), TokenKind::Identifier);
    }

    #[test]
    fn test_each_bad_character_is_one_error_token() {
        let tokens = tokenize("@#$");
        let errors: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind() == TokenKind::Error)
            .map(|t| (t.lexeme(), t.column()))
            .collect();
        assert_eq!(errors, [("@", 1), ("#", 2), ("$", 3)]);
    }

    #[test]
    fn test_error_token_recovers() {
        let tokens = tokenize("r1.garra = @30");
        let kinds: Vec<_> = tokens.iter().map(Token::kind).collect();
        assert_eq!(
            kinds,
            [
                TokenKind::Identifier,
                TokenKind::Dot,
                TokenKind::MethodName(Method::Garra),
                TokenKind::Equals,
                TokenKind::Error,
                TokenKind::Number,
                TokenKind::EndOfInput,
            ]
        );
        assert_eq!(tokens[4].position(), Position::new(1, 12));
        assert_eq!(tokens[5].position(), Position::new(1, 13));
    }

    #[test]
    fn test_error_token_diagnostic() {
        let tokens = tokenize("r1.garra = @30");
        let diag = error_token_diagnostic(&tokens[4]);

        assert_eq!(diag.code(), Some(ErrorCode::E001));
        assert_eq!(diag.message(), "unexpected character `@`");
        assert_eq!(diag.position(), Position::new(1, 12));
        assert_eq!(diag.labels()[0].span(), Span::new(11..12));
        assert!(diag.help().is_some());
    }

    #[test]
    fn test_multibyte_error_character() {
        let tokens = tokenize("€1");
        assert_eq!(tokens[0].kind(), TokenKind::Error);
        assert_eq!(tokens[0].lexeme(), "€");
        assert_eq!(tokens[0].span(), Span::new(0..3));
        assert_eq!(tokens[1].column(), 2);
    }

    #[test]
    fn test_positions() {
        let source = "Robot r1\n  r1.iniciar\r\nr1.detener";
        let positions: Vec<_> = tokenize(source)
            .iter()
            .map(|t| (t.lexeme(), t.line(), t.column()))
            .collect();
        assert_eq!(
            positions,
            [
                ("Robot", 1, 1),
                ("r1", 1, 7),
                ("r1", 2, 3),
                (".", 2, 5),
                ("iniciar", 2, 6),
                ("r1", 3, 1),
                (".", 3, 3),
                ("detener", 3, 4),
                ("", 3, 11),
            ]
        );
    }

    #[test]
    fn test_lone_carriage_return_takes_a_column() {
        let tokens = tokenize("a\rb");
        assert_eq!(tokens[1].position(), Position::new(1, 3));
    }

    #[test]
    fn test_end_of_input_span_is_empty_at_end() {
        let tokens = tokenize("r1");
        let eof = tokens.last().expect("end of input");
        assert_eq!(eof.kind(), TokenKind::EndOfInput);
        assert_eq!(eof.span(), Span::new(2..2));
        assert_eq!(eof.lexeme(), "");
    }

    #[test]
    fn test_lexer_is_fused_after_end_of_input() {
        let mut lexer = Lexer::new("r1");
        assert_eq!(lexer.next().map(|t| t.kind()), Some(TokenKind::Identifier));
        assert_eq!(lexer.next().map(|t| t.kind()), Some(TokenKind::EndOfInput));
        assert_eq!(lexer.next(), None);
        assert_eq!(lexer.next(), None);
    }

    #[test]
    fn test_lexer_restarts_from_scratch() {
        let source = "Robot r1 r1.base(10)";
        let first: Vec<_> = Lexer::new(source).collect();
        let second: Vec<_> = Lexer::new(source).collect();
        assert_eq!(first, second);

        let mut lexer = Lexer::new(source);
        lexer.next();
        let fork = lexer.clone();
        assert_eq!(lexer.collect::<Vec<_>>(), fork.collect::<Vec<_>>());
    }

    proptest! {
        #[test]
        fn prop_exactly_one_end_of_input_last(source in "\\PC{0,64}") {
            let tokens = tokenize(&source);
            let eof_count = tokens
                .iter()
                .filter(|t| t.kind() == TokenKind::EndOfInput)
                .count();
            prop_assert_eq!(eof_count, 1);
            prop_assert_eq!(tokens.last().map(Token::kind), Some(TokenKind::EndOfInput));
        }

        #[test]
        fn prop_tokens_cover_source_slices(source in "[ a-z0-9.=(){}@#\\n\\r/]{0,64}") {
            for token in tokenize(&source) {
                prop_assert!(token.line() >= 1);
                prop_assert!(token.column() >= 1);
                prop_assert!(!token.kind().is_trivia());
                prop_assert_eq!(&source[token.span().start()..token.span().end()], token.lexeme());
            }
        }
    }
}
