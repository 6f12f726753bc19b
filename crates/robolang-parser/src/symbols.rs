//! Symbol table and range validation.
//!
//! The [`SymbolTable`] owns the robots declared during one analysis run and
//! refers to the shared, read-only [`MethodCatalog`]. The parser calls into it
//! as it recognizes statements: [`SymbolTable::declare_robot`] for each
//! `Robot <name>` and [`SymbolTable::validate_call`] for each method call.

use indexmap::{IndexMap, map::Entry};
use log::{debug, trace};
use thiserror::Error;

use robolang_core::method::{Method, MethodCatalog, MethodSignature, ValueRange};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::{Position, Span},
    tokens::Token,
};

/// A robot declared with `Robot <name>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RobotSymbol {
    name: String,
    position: Position,
    span: Span,
}

impl RobotSymbol {
    pub fn new(name: impl Into<String>, position: Position, span: Span) -> Self {
        Self {
            name: name.into(),
            position,
            span,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the name in the declaration.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn span(&self) -> Span {
        self.span
    }
}

/// A second declaration of an already declared robot.
///
/// The original declaration is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error(
    "robot `{}` is already declared (first declared at {})",
    .duplicate.name,
    .original.position
)]
pub struct DuplicateDeclaration {
    original: RobotSymbol,
    duplicate: RobotSymbol,
}

impl DuplicateDeclaration {
    /// The declaration that is kept.
    pub fn original(&self) -> &RobotSymbol {
        &self.original
    }

    /// The rejected declaration.
    pub fn duplicate(&self) -> &RobotSymbol {
        &self.duplicate
    }
}

impl From<DuplicateDeclaration> for Diagnostic {
    fn from(err: DuplicateDeclaration) -> Self {
        Diagnostic::semantic(err.duplicate.position, err.to_string())
            .with_code(ErrorCode::E201)
            .with_label(err.duplicate.span, ErrorCode::E201.description())
            .with_secondary_label(err.original.span, "first declared here")
            .with_help("remove the second declaration or pick another name")
    }
}

/// Robots declared in one analysis run plus the method catalog.
#[derive(Debug)]
pub struct SymbolTable {
    robots: IndexMap<String, RobotSymbol>,
    catalog: &'static MethodCatalog,
}

impl SymbolTable {
    /// Create an empty table over the built-in method catalog.
    pub fn new() -> Self {
        Self {
            robots: IndexMap::new(),
            catalog: MethodCatalog::builtin(),
        }
    }

    /// The method catalog this table validates against.
    pub fn catalog(&self) -> &'static MethodCatalog {
        self.catalog
    }

    /// Declare a robot.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateDeclaration`] if `name` is already declared. The
    /// existing symbol is kept as is.
    pub fn declare_robot(
        &mut self,
        name: &str,
        position: Position,
        span: Span,
    ) -> Result<(), DuplicateDeclaration> {
        let symbol = RobotSymbol::new(name, position, span);
        match self.robots.entry(name.to_string()) {
            Entry::Occupied(existing) => Err(DuplicateDeclaration {
                original: existing.get().clone(),
                duplicate: symbol,
            }),
            Entry::Vacant(slot) => {
                debug!(robot = name, position:% = position; "Robot declared");
                slot.insert(symbol);
                Ok(())
            }
        }
    }

    /// Returns `true` if a robot named `name` has been declared.
    pub fn is_robot_declared(&self, name: &str) -> bool {
        self.robots.contains_key(name)
    }

    /// Look up a declared robot.
    pub fn robot(&self, name: &str) -> Option<&RobotSymbol> {
        self.robots.get(name)
    }

    /// Declared robots, in declaration order.
    pub fn robots(&self) -> impl Iterator<Item = &RobotSymbol> {
        self.robots.values()
    }

    /// Check one structurally complete method call.
    ///
    /// Reports an undeclared robot at `robot`, and an argument that is
    /// fractional or out of the method's range at `argument`. A missing
    /// argument is never reported here; the parser already did that.
    pub fn validate_call(
        &self,
        robot: &Token<'_>,
        method: Method,
        argument: Option<&Token<'_>>,
    ) -> Vec<Diagnostic> {
        trace!(
            robot = robot.lexeme(),
            method = method.name(),
            argument:? = argument.map(Token::lexeme);
            "Validating call"
        );

        let mut diagnostics = Vec::new();

        if !self.is_robot_declared(robot.lexeme()) {
            diagnostics.push(
                Diagnostic::semantic(
                    robot.position(),
                    format!("robot `{}` is not declared", robot.lexeme()),
                )
                .with_code(ErrorCode::E200)
                .with_label(robot.span(), ErrorCode::E200.description())
                .with_help(format!("declare it first: `Robot {}`", robot.lexeme())),
            );
        }

        let signature = self.catalog.signature(method);
        if let (Some(argument), Some(range)) = (argument, signature.range()) {
            diagnostics.extend(check_argument(signature, range, argument));
        }

        diagnostics
    }

    /// Re-check the committed robots for duplicate names.
    ///
    /// Two symbols are duplicates when their names match exactly. Since
    /// [`declare_robot`](Self::declare_robot) rejects duplicates up front,
    /// this is empty whenever it was the only way robots were added.
    pub fn find_duplicate_robots(&self) -> Vec<Diagnostic> {
        let mut seen: IndexMap<&str, &RobotSymbol> = IndexMap::new();
        let mut diagnostics = Vec::new();

        for symbol in self.robots.values() {
            match seen.entry(symbol.name()) {
                Entry::Occupied(first) => diagnostics.push(
                    DuplicateDeclaration {
                        original: (*first.get()).clone(),
                        duplicate: symbol.clone(),
                    }
                    .into(),
                ),
                Entry::Vacant(slot) => {
                    slot.insert(symbol);
                }
            }
        }

        diagnostics
    }

    /// Copy out the current robots and the method catalog.
    pub fn snapshot(&self) -> SymbolTableSnapshot {
        SymbolTableSnapshot {
            robots: self.robots.values().cloned().collect(),
            methods: self.catalog.iter().copied().collect(),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

fn check_argument(
    signature: &MethodSignature,
    range: ValueRange,
    argument: &Token<'_>,
) -> Option<Diagnostic> {
    let lexeme = argument.lexeme();

    if lexeme.contains('.') {
        return Some(
            Diagnostic::semantic(
                argument.position(),
                format!(
                    "malformed numeric argument `{lexeme}` for method `{}`: expected an integer",
                    signature.name()
                ),
            )
            .with_code(ErrorCode::E203)
            .with_label(argument.span(), ErrorCode::E203.description())
            .with_help("arguments are whole numbers; drop the fractional part"),
        );
    }

    // Literals too large for i64 are out of every range.
    let in_range = lexeme
        .parse::<i64>()
        .is_ok_and(|value| range.contains(value));
    if in_range {
        return None;
    }

    let help = match range.max() {
        Some(max) => format!("use a value between {} and {max}", range.min()),
        None => format!("use a value of at least {}", range.min()),
    };

    Some(
        Diagnostic::semantic(
            argument.position(),
            format!(
                "value {lexeme} is out of range {range} for method `{}`",
                signature.name()
            ),
        )
        .with_code(ErrorCode::E202)
        .with_label(argument.span(), ErrorCode::E202.description())
        .with_help(help),
    )
}

/// A read-only copy of a [`SymbolTable`], handed to callers of `analyze`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymbolTableSnapshot {
    robots: Vec<RobotSymbol>,
    methods: Vec<MethodSignature>,
}

impl SymbolTableSnapshot {
    /// Declared robots, in declaration order.
    pub fn robots(&self) -> &[RobotSymbol] {
        &self.robots
    }

    /// Look up a declared robot by name.
    pub fn robot(&self, name: &str) -> Option<&RobotSymbol> {
        self.robots.iter().find(|robot| robot.name() == name)
    }

    /// The built-in methods, in catalog order.
    pub fn methods(&self) -> &[MethodSignature] {
        &self.methods
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Severity, tokens::TokenKind};

    fn ident(name: &str, line: u32, column: u32) -> Token<'_> {
        Token::new(
            name,
            TokenKind::Identifier,
            Position::new(line, column),
            Span::new(0..name.len()),
        )
    }

    fn number(lexeme: &str) -> Token<'_> {
        Token::new(
            lexeme,
            TokenKind::Number,
            Position::new(1, 9),
            Span::new(8..8 + lexeme.len()),
        )
    }

    fn table_with(names: &[&str]) -> SymbolTable {
        let mut table = SymbolTable::new();
        for (line, name) in (1..).zip(names) {
            table
                .declare_robot(name, Position::new(line, 7), Span::new(0..name.len()))
                .expect("fresh name");
        }
        table
    }

    #[test]
    fn test_declare_robot() {
        let table = table_with(&["r1", "r2"]);
        assert!(table.is_robot_declared("r1"));
        assert!(table.is_robot_declared("r2"));
        assert!(!table.is_robot_declared("R1"));

        let names: Vec<_> = table.robots().map(RobotSymbol::name).collect();
        assert_eq!(names, ["r1", "r2"]);
    }

    #[test]
    fn test_duplicate_declaration_keeps_original() {
        let mut table = table_with(&["r1"]);

        let err = table
            .declare_robot("r1", Position::new(4, 7), Span::new(30..32))
            .unwrap_err();

        assert_eq!(err.original().position(), Position::new(1, 7));
        assert_eq!(err.duplicate().position(), Position::new(4, 7));
        assert_eq!(
            err.to_string(),
            "robot `r1` is already declared (first declared at 1:7)"
        );
        assert_eq!(table.robot("r1").map(RobotSymbol::position), Some(Position::new(1, 7)));
        assert_eq!(table.robots().count(), 1);
    }

    #[test]
    fn test_duplicate_declaration_diagnostic() {
        let mut table = table_with(&["r1"]);
        let err = table
            .declare_robot("r1", Position::new(2, 7), Span::new(15..17))
            .unwrap_err();

        let diag = Diagnostic::from(err);
        assert_eq!(diag.severity(), Severity::Semantic);
        assert_eq!(diag.code(), Some(ErrorCode::E201));
        assert_eq!(diag.position(), Position::new(2, 7));
        assert_eq!(diag.labels().len(), 2);
        assert!(diag.labels()[0].is_primary());
        assert_eq!(diag.labels()[0].span(), Span::new(15..17));
        assert!(diag.labels()[1].is_secondary());
        assert_eq!(diag.labels()[1].message(), "first declared here");
    }

    #[test]
    fn test_undeclared_robot() {
        let table = SymbolTable::new();
        let diags = table.validate_call(&ident("r3", 1, 1), Method::Iniciar, None);

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E200));
        assert_eq!(diags[0].message(), "robot `r3` is not declared");
        assert_eq!(diags[0].position(), Position::new(1, 1));
    }

    #[test]
    fn test_value_in_range() {
        let table = table_with(&["r1"]);
        let robot = ident("r1", 2, 1);

        for (method, value) in [
            (Method::Base, "0"),
            (Method::Base, "360"),
            (Method::Cuerpo, "180"),
            (Method::Garra, "90"),
            (Method::Velocidad, "1"),
            (Method::Velocidad, "100"),
            (Method::Repetir, "1"),
            (Method::Repetir, "1000000"),
        ] {
            let diags = table.validate_call(&robot, method, Some(&number(value)));
            assert!(diags.is_empty(), "{method}({value}) reported {diags:?}");
        }
    }

    #[test]
    fn test_value_out_of_range() {
        let table = table_with(&["r1"]);
        let diags = table.validate_call(&ident("r1", 2, 1), Method::Base, Some(&number("400")));

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E202));
        assert_eq!(
            diags[0].message(),
            "value 400 is out of range [0..360] for method `base`"
        );
        assert_eq!(diags[0].position(), Position::new(1, 9));
        assert_eq!(diags[0].help(), Some("use a value between 0 and 360"));
    }

    #[test]
    fn test_open_range_lower_bound() {
        let table = table_with(&["r1"]);
        let diags = table.validate_call(&ident("r1", 2, 1), Method::Repetir, Some(&number("0")));

        assert_eq!(diags.len(), 1);
        assert_eq!(
            diags[0].message(),
            "value 0 is out of range [1..+∞) for method `repetir`"
        );
        assert_eq!(diags[0].help(), Some("use a value of at least 1"));
    }

    #[test]
    fn test_oversized_literal_is_out_of_range() {
        let table = table_with(&["r1"]);
        let diags = table.validate_call(
            &ident("r1", 2, 1),
            Method::Repetir,
            Some(&number("99999999999999999999")),
        );

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E202));
    }

    #[test]
    fn test_fractional_argument_is_malformed() {
        let table = table_with(&["r1"]);
        let diags =
            table.validate_call(&ident("r1", 2, 1), Method::Velocidad, Some(&number("50.5")));

        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code(), Some(ErrorCode::E203));
        assert_eq!(diags[0].severity(), Severity::Semantic);
    }

    #[test]
    fn test_undeclared_and_out_of_range_are_both_reported() {
        let table = SymbolTable::new();
        let diags = table.validate_call(&ident("r9", 1, 1), Method::Garra, Some(&number("91")));

        let codes: Vec<_> = diags.iter().filter_map(Diagnostic::code).collect();
        assert_eq!(codes, [ErrorCode::E200, ErrorCode::E202]);
    }

    #[test]
    fn test_find_duplicate_robots_is_empty_after_declarations() {
        let mut table = table_with(&["r1", "r2"]);
        let _ = table.declare_robot("r1", Position::new(9, 7), Span::new(50..52));

        assert!(table.find_duplicate_robots().is_empty());
        assert!(table.find_duplicate_robots().is_empty());
    }

    #[test]
    fn test_snapshot() {
        let table = table_with(&["r1"]);
        let snapshot = table.snapshot();

        assert_eq!(snapshot.robots().len(), 1);
        assert_eq!(snapshot.robot("r1").map(RobotSymbol::name), Some("r1"));
        assert!(snapshot.robot("r2").is_none());
        assert_eq!(snapshot.methods().len(), Method::ALL.len());
        assert_eq!(snapshot.methods()[0].method(), Method::Base);
    }
}
