//! # Robolang Core
//!
//! Core types shared by the Robolang crates. The only state this crate owns is
//! the fixed catalog of actuator methods a robotic arm understands, which is
//! immutable for the lifetime of the process and safe to share between
//! threads.
//!
//! ```
//! # use robolang_core::method::{Method, MethodCatalog};
//! let catalog = MethodCatalog::builtin();
//! let base = catalog.signature(Method::Base);
//!
//! assert!(base.range().is_some_and(|range| range.contains(360)));
//! assert!(!base.range().is_some_and(|range| range.contains(361)));
//! ```

pub mod method;
