//! Built-in actuator methods and their signatures.
//!
//! Every Robolang program talks to its robots through a closed set of nine
//! methods. Each method either takes no argument or takes one integer
//! argument constrained to a [`ValueRange`]. The [`MethodCatalog`] maps the
//! source spelling of a method to its [`MethodSignature`].

use std::{fmt, str::FromStr, sync::LazyLock};

use indexmap::IndexMap;
use thiserror::Error;

/// One of the nine built-in actuator methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Method {
    /// Rotate the base, in degrees.
    Base,
    /// Tilt the body, in degrees.
    Cuerpo,
    /// Set the claw angle, in degrees.
    Garra,
    /// Set the movement speed, as a percentage.
    Velocidad,
    /// Repeat a block of statements a number of times.
    Repetir,
    /// Open the claw.
    AbrirGarra,
    /// Close the claw.
    CerrarGarra,
    /// Power the arm on.
    Iniciar,
    /// Power the arm off.
    Detener,
}

impl Method {
    /// All methods, in catalog order.
    pub const ALL: [Method; 9] = [
        Method::Base,
        Method::Cuerpo,
        Method::Garra,
        Method::Velocidad,
        Method::Repetir,
        Method::AbrirGarra,
        Method::CerrarGarra,
        Method::Iniciar,
        Method::Detener,
    ];

    /// The exact, case-sensitive source spelling of this method.
    pub fn name(self) -> &'static str {
        match self {
            Method::Base => "base",
            Method::Cuerpo => "cuerpo",
            Method::Garra => "garra",
            Method::Velocidad => "velocidad",
            Method::Repetir => "repetir",
            Method::AbrirGarra => "abrirGarra",
            Method::CerrarGarra => "cerrarGarra",
            Method::Iniciar => "iniciar",
            Method::Detener => "detener",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when a name is not one of the built-in methods.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown method `{0}`")]
pub struct UnknownMethod(pub String);

impl FromStr for Method {
    type Err = UnknownMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Method::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| UnknownMethod(s.to_string()))
    }
}

/// Number of arguments a method takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arity {
    /// The method is called without a value: `r1.iniciar`.
    Nullary,
    /// The method needs exactly one value: `r1.base(90)` or `r1.base = 90`.
    Unary,
}

impl Arity {
    /// Number of arguments as an integer.
    pub fn count(self) -> usize {
        match self {
            Arity::Nullary => 0,
            Arity::Unary => 1,
        }
    }
}

/// An inclusive integer range, optionally unbounded above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueRange {
    min: i64,
    max: Option<i64>,
}

impl ValueRange {
    /// A range closed on both ends: `[min..max]`.
    pub const fn bounded(min: i64, max: i64) -> Self {
        Self {
            min,
            max: Some(max),
        }
    }

    /// A range with no upper bound: `[min..+∞)`.
    pub const fn at_least(min: i64) -> Self {
        Self { min, max: None }
    }

    /// Lower bound, inclusive.
    pub fn min(&self) -> i64 {
        self.min
    }

    /// Upper bound, inclusive, or `None` when unbounded.
    pub fn max(&self) -> Option<i64> {
        self.max
    }

    /// Returns `true` if `value` lies inside the range.
    pub fn contains(&self, value: i64) -> bool {
        value >= self.min && self.max.is_none_or(|max| value <= max)
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.max {
            Some(max) => write!(f, "[{}..{}]", self.min, max),
            None => write!(f, "[{}..+∞)", self.min),
        }
    }
}

/// Arity and valid range of one built-in method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MethodSignature {
    method: Method,
    arity: Arity,
    range: Option<ValueRange>,
}

impl MethodSignature {
    const fn nullary(method: Method) -> Self {
        Self {
            method,
            arity: Arity::Nullary,
            range: None,
        }
    }

    const fn unary(method: Method, range: ValueRange) -> Self {
        Self {
            method,
            arity: Arity::Unary,
            range: Some(range),
        }
    }

    /// The method this signature describes.
    pub fn method(&self) -> Method {
        self.method
    }

    /// Source spelling of the method.
    pub fn name(&self) -> &'static str {
        self.method.name()
    }

    /// Number of arguments the method takes.
    pub fn arity(&self) -> Arity {
        self.arity
    }

    /// Valid argument range. `Some` exactly when the arity is [`Arity::Unary`].
    pub fn range(&self) -> Option<ValueRange> {
        self.range
    }

    /// Returns `true` if the method needs a value.
    pub fn takes_value(&self) -> bool {
        matches!(self.arity, Arity::Unary)
    }
}

const SIGNATURES: [MethodSignature; 9] = [
    MethodSignature::unary(Method::Base, ValueRange::bounded(0, 360)),
    MethodSignature::unary(Method::Cuerpo, ValueRange::bounded(0, 180)),
    MethodSignature::unary(Method::Garra, ValueRange::bounded(0, 90)),
    MethodSignature::unary(Method::Velocidad, ValueRange::bounded(1, 100)),
    MethodSignature::unary(Method::Repetir, ValueRange::at_least(1)),
    MethodSignature::nullary(Method::AbrirGarra),
    MethodSignature::nullary(Method::CerrarGarra),
    MethodSignature::nullary(Method::Iniciar),
    MethodSignature::nullary(Method::Detener),
];

static BUILTIN: LazyLock<MethodCatalog> = LazyLock::new(|| MethodCatalog {
    signatures: SIGNATURES
        .into_iter()
        .map(|signature| (signature.name(), signature))
        .collect(),
});

/// Immutable lookup from method name to [`MethodSignature`].
#[derive(Debug)]
pub struct MethodCatalog {
    signatures: IndexMap<&'static str, MethodSignature>,
}

impl MethodCatalog {
    /// The catalog of built-in methods, shared by every analysis run.
    pub fn builtin() -> &'static MethodCatalog {
        &BUILTIN
    }

    /// Look up a signature by its source spelling.
    pub fn get(&self, name: &str) -> Option<&MethodSignature> {
        self.signatures.get(name)
    }

    /// The signature of a known method.
    pub fn signature(&self, method: Method) -> &MethodSignature {
        // Every `Method` variant has an entry, in `Method::ALL` order.
        &self.signatures[method as usize]
    }

    /// All signatures, in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &MethodSignature> {
        self.signatures.values()
    }

    /// Number of methods in the catalog.
    pub fn len(&self) -> usize {
        self.signatures.len()
    }

    /// Returns `true` if the catalog has no methods.
    pub fn is_empty(&self) -> bool {
        self.signatures.is_empty()
    }
}
