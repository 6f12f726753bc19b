//! Parser for Robolang token streams.
//!
//! A recursive descent parser over a winnow [`TokenSlice`]. It recognizes the
//! statement grammar below and, as each statement completes, calls into the
//! [`SymbolTable`](crate::symbols::SymbolTable) held by the
//! [`AnalysisContext`] to declare robots and validate calls:
//!
//! ```text
//! Program      := Statement*
//! Statement    := RobotDecl | Assignment | SimpleCall | ParamCall | RepeatBlock
//! RobotDecl    := "Robot" Identifier
//! Assignment   := Identifier "." MethodName "=" Number
//! SimpleCall   := Identifier "." MethodName ( "(" ")" )?
//! ParamCall    := Identifier "." MethodName "(" Number ")"
//! RepeatBlock  := Identifier "." "repetir" "(" Number ")" "{" Statement* "}"
//! ```
//!
//! Which alternative applies to a call is decided by the arity of the method
//! in the catalog. There is no statement terminator; a statement ends where
//! the next one starts.
//!
//! Parsing never stops early. A malformed statement produces one syntax
//! diagnostic, then the parser skips ahead to the next token that can start
//! a statement (`Robot`, a robot name followed by `.`), a `}` or the end of
//! input.

use log::{debug, trace};
use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use robolang_core::method::{Arity, Method};

use crate::{
    context::AnalysisContext,
    error::{Diagnostic, ErrorCode},
    tokens::{Token, TokenKind},
};

type Input<'t, 'src> = TokenSlice<'t, Token<'src>>;
type PResult<O> = Result<O, Diagnostic>;

struct Parser<'t, 'src, 'ctx> {
    input: Input<'t, 'src>,
    /// Returned by every peek past the last token.
    end: Token<'src>,
    ctx: &'ctx mut AnalysisContext,
    recognized: usize,
}

impl<'t, 'src, 'ctx> Parser<'t, 'src, 'ctx> {
    fn peek(&self) -> Token<'src> {
        self.input.peek_token().copied().unwrap_or(self.end)
    }

    /// Look one token past the current one.
    fn peek_second(&mut self) -> Token<'src> {
        let checkpoint = self.input.checkpoint();
        let _ = self.input.next_token();
        let token = self.peek();
        self.input.reset(&checkpoint);
        token
    }

    /// Consume the current token. The end of input is never consumed.
    fn bump(&mut self) -> Token<'src> {
        let token = self.peek();
        if token.kind() != TokenKind::EndOfInput {
            let _ = self.input.next_token();
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> PResult<Token<'src>> {
        any::<_, ErrMode<ContextError>>
            .verify(|token: &Token<'_>| token.kind() == kind)
            .parse_next(&mut self.input)
            .copied()
            .map_err(|_| self.unexpected(expected))
    }

    /// "expected X, found Y" at the current token.
    fn unexpected(&self, expected: &str) -> Diagnostic {
        let found = self.peek();
        let code = if found.kind() == TokenKind::EndOfInput {
            ErrorCode::E101
        } else {
            ErrorCode::E100
        };

        Diagnostic::syntax(
            found.position(),
            format!("expected {expected}, found {}", found.describe()),
        )
        .with_code(code)
        .with_label(found.span(), format!("expected {expected}"))
    }

    /// Each nested `repetir` block recurses once, so nesting depth is bounded
    /// by the thread's stack.
    fn statement_list(&mut self, block: Option<Token<'src>>) {
        loop {
            let token = self.peek();
            match (token.kind(), block) {
                (TokenKind::EndOfInput, None) => return,
                (TokenKind::EndOfInput, Some(open)) => {
                    self.ctx.diagnostics.emit(unclosed_block(open, token));
                    return;
                }
                (TokenKind::RBrace, Some(_)) => {
                    self.bump();
                    return;
                }
                (TokenKind::RBrace, None) => {
                    self.bump();
                    self.ctx.diagnostics.emit(
                        Diagnostic::syntax(token.position(), "unexpected `}` outside of a block")
                            .with_code(ErrorCode::E100)
                            .with_label(token.span(), "no block to close"),
                    );
                }
                _ => self.statement_or_recover(),
            }
        }
    }

    fn statement_or_recover(&mut self) {
        let before = self.input.eof_offset();

        if let Err(diagnostic) = self.statement() {
            trace!(diagnostic:% = diagnostic; "Recovering from syntax error");
            self.ctx.diagnostics.emit(diagnostic);

            // Make progress even when the statement failed on its first token.
            if self.input.eof_offset() == before {
                self.bump();
            }
            self.synchronize();
        }
    }

    /// Skip to the next token that can start a statement or close a block.
    fn synchronize(&mut self) {
        loop {
            let token = self.peek();
            match token.kind() {
                TokenKind::RobotKeyword | TokenKind::RBrace | TokenKind::EndOfInput => return,
                TokenKind::Identifier if self.peek_second().kind() == TokenKind::Dot => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn statement(&mut self) -> PResult<()> {
        match self.peek().kind() {
            TokenKind::RobotKeyword => self.robot_declaration(),
            TokenKind::Identifier => self.method_statement(),
            _ => Err(self
                .unexpected("a statement")
                .with_help("statements start with `Robot <name>` or `<robot>.<method>`")),
        }
    }

    fn robot_declaration(&mut self) -> PResult<()> {
        self.bump();
        let name = self.expect(TokenKind::Identifier, "a robot name")?;

        self.recognized += 1;
        trace!(robot = name.lexeme(); "Robot declaration");

        if let Err(duplicate) =
            self.ctx
                .symbols
                .declare_robot(name.lexeme(), name.position(), name.span())
        {
            self.ctx.diagnostics.emit(duplicate.into());
        }
        Ok(())
    }

    fn method_statement(&mut self) -> PResult<()> {
        let robot = self.bump();
        self.expect(TokenKind::Dot, "`.`")?;
        let (method_token, method) = self.method_name()?;

        if method == Method::Repetir {
            return self.repeat_block(robot, method_token);
        }

        match self.ctx.symbols.catalog().signature(method).arity() {
            Arity::Unary => {
                let argument = self.value(robot, method_token, method)?;
                self.finish_call(robot, method, Some(argument));
            }
            Arity::Nullary => {
                self.no_value(robot, method)?;
                self.finish_call(robot, method, None);
            }
        }
        Ok(())
    }

    fn method_name(&mut self) -> PResult<(Token<'src>, Method)> {
        let found = self.peek();

        any::<_, ErrMode<ContextError>>
            .verify_map(|token: &Token<'src>| match token.kind() {
                TokenKind::MethodName(method) => Some((*token, method)),
                _ => None,
            })
            .parse_next(&mut self.input)
            .map_err(|_| {
                let diagnostic = self.unexpected("a method name");
                if found.kind() != TokenKind::Identifier {
                    return diagnostic;
                }
                let names: Vec<_> = Method::ALL.iter().map(|method| method.name()).collect();
                diagnostic
                    .with_code(ErrorCode::E104)
                    .with_help(format!("available methods: {}", names.join(", ")))
            })
    }

    /// Parse `= N` or `(N)` after a method that takes a value.
    fn value(
        &mut self,
        robot: Token<'src>,
        method_token: Token<'src>,
        method: Method,
    ) -> PResult<Token<'src>> {
        match self.peek().kind() {
            TokenKind::Equals => {
                self.bump();
                self.expect(TokenKind::Number, "a number")
            }
            TokenKind::LParen => {
                self.bump();
                if self.peek().kind() == TokenKind::RParen {
                    return Err(self.missing_value(robot, method_token, method));
                }
                let argument = self.expect(TokenKind::Number, "a number")?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(argument)
            }
            _ => Err(self.missing_value(robot, method_token, method)),
        }
    }

    /// Accept nothing or `()` after a method that takes no value.
    fn no_value(&mut self, robot: Token<'src>, method: Method) -> PResult<()> {
        let next = self.peek();
        match next.kind() {
            TokenKind::LParen => {
                self.bump();
                let inside = self.peek();
                match inside.kind() {
                    TokenKind::RParen => {
                        self.bump();
                        Ok(())
                    }
                    TokenKind::Number => Err(unexpected_value(robot, method, inside)),
                    _ => Err(self.unexpected("`)`")),
                }
            }
            TokenKind::Equals => Err(unexpected_value(robot, method, next)),
            _ => Ok(()),
        }
    }

    /// A malformed header is reported once; a `{` following it still opens
    /// the block, so the body keeps its nesting.
    fn repeat_block(&mut self, robot: Token<'src>, method_token: Token<'src>) -> PResult<()> {
        let open = match self.repeat_header(robot, method_token) {
            Ok((count, open)) => {
                // The header is checked before the body is parsed.
                if let Some(count) = count {
                    self.finish_call(robot, Method::Repetir, Some(count));
                }
                Some(open)
            }
            Err(diagnostic) => {
                trace!(diagnostic:% = diagnostic; "Recovering from malformed repeat header");
                self.ctx.diagnostics.emit(diagnostic);
                self.skip_to_block()
            }
        };

        if let Some(open) = open {
            self.statement_list(Some(open));
        }
        Ok(())
    }

    /// Parse `(N) {`, returning the count (if one was given) and the brace.
    fn repeat_header(
        &mut self,
        robot: Token<'src>,
        method_token: Token<'src>,
    ) -> PResult<(Option<Token<'src>>, Token<'src>)> {
        let method = Method::Repetir;
        let block_help = format!("write `{}.repetir(3) {{ ... }}`", robot.lexeme());

        let count = match self.peek().kind() {
            TokenKind::LParen => Some(self.value(robot, method_token, method)?),
            TokenKind::Equals => return Err(self.unexpected("`(`").with_help(block_help)),
            // `r1.repetir { ... }`: report the count, keep the block.
            TokenKind::LBrace => {
                let diagnostic = self.missing_value(robot, method_token, method);
                self.ctx.diagnostics.emit(diagnostic);
                None
            }
            _ => return Err(self.missing_value(robot, method_token, method)),
        };
        let open = self
            .expect(TokenKind::LBrace, "`{`")
            .map_err(|diagnostic| diagnostic.with_help(block_help))?;

        Ok((count, open))
    }

    /// Consume up to and including the `{` of a broken header, unless a
    /// statement boundary comes first.
    fn skip_to_block(&mut self) -> Option<Token<'src>> {
        loop {
            let token = self.peek();
            match token.kind() {
                TokenKind::LBrace => return Some(self.bump()),
                TokenKind::RobotKeyword | TokenKind::RBrace | TokenKind::EndOfInput => return None,
                TokenKind::Identifier if self.peek_second().kind() == TokenKind::Dot => return None,
                _ => {
                    self.bump();
                }
            }
        }
    }

    fn finish_call(&mut self, robot: Token<'src>, method: Method, argument: Option<Token<'src>>) {
        self.recognized += 1;
        trace!(
            robot = robot.lexeme(),
            method = method.name(),
            line = robot.line();
            "Method call"
        );

        let diagnostics = self
            .ctx
            .symbols
            .validate_call(&robot, method, argument.as_ref());
        self.ctx.diagnostics.extend(diagnostics);
    }

    fn missing_value(
        &self,
        robot: Token<'src>,
        method_token: Token<'src>,
        method: Method,
    ) -> Diagnostic {
        let robot = robot.lexeme();
        let help = if method == Method::Repetir {
            format!("write `{robot}.repetir(3) {{ ... }}`")
        } else {
            let example = self
                .ctx
                .symbols
                .catalog()
                .signature(method)
                .range()
                .map_or(0, |range| range.min());
            format!("write `{robot}.{method}({example})` or `{robot}.{method} = {example}`")
        };

        Diagnostic::syntax(
            method_token.position(),
            format!("method `{method}` requires a value"),
        )
        .with_code(ErrorCode::E102)
        .with_label(method_token.span(), ErrorCode::E102.description())
        .with_help(help)
    }
}

fn unexpected_value(robot: Token<'_>, method: Method, found: Token<'_>) -> Diagnostic {
    Diagnostic::syntax(
        found.position(),
        format!("method `{method}` does not take a value"),
    )
    .with_code(ErrorCode::E103)
    .with_label(found.span(), ErrorCode::E103.description())
    .with_help(format!("write `{}.{method}`", robot.lexeme()))
}

fn unclosed_block(open: Token<'_>, end: Token<'_>) -> Diagnostic {
    Diagnostic::syntax(end.position(), "unclosed block: expected `}`, found end of input")
        .with_code(ErrorCode::E101)
        .with_label(end.span(), "expected `}`")
        .with_secondary_label(open.span(), "block opened here")
        .with_help("add `}` to close the `repetir` block")
}

/// Parse a token stream, driving the symbol table in `ctx`.
///
/// [`TokenKind::Error`] tokens are skipped; the lexical diagnostics for them
/// are not this function's concern. Every syntax diagnostic and every
/// semantic diagnostic from the symbol table is appended to `ctx`.
///
/// Returns the number of statements recognized, nested ones included.
pub fn parse(tokens: &[Token<'_>], ctx: &mut AnalysisContext) -> usize {
    let significant: Vec<_> = tokens
        .iter()
        .copied()
        .filter(|token| token.kind() != TokenKind::Error)
        .collect();

    let end = match tokens.last() {
        Some(last) if last.kind() == TokenKind::EndOfInput => *last,
        // Streams not produced by the lexer still get an end to stop at.
        Some(last) => Token::new(
            "",
            TokenKind::EndOfInput,
            last.position(),
            (last.span().end()..last.span().end()).into(),
        ),
        None => Token::new("", TokenKind::EndOfInput, Default::default(), Default::default()),
    };

    debug!(tokens = significant.len(); "Parsing");

    let diagnostics_before = ctx.diagnostics.len();
    let mut parser = Parser {
        input: TokenSlice::new(&significant),
        end,
        ctx,
        recognized: 0,
    };
    parser.statement_list(None);

    let recognized = parser.recognized;
    debug!(
        statements = recognized,
        diagnostics = parser.ctx.diagnostics.len() - diagnostics_before;
        "Parsing finished"
    );

    recognized
}
