//! Core library for the flexwec-casegen command line application.
//!
//! The library turns a directory of BEM solver templates into case files for
//! one design-variable combination. Placeholder substitution lives in
//! [`substitute`], the variable representations inside [`model`], document
//! loaders under [`io`], the analysis-type layout in [`catalog`] and
//! [`config`], and the file-driving orchestration in [`casegen`].

pub mod casegen;
pub mod catalog;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod substitute;

pub use casegen::{CaseFile, CaseGenerator};
pub use error::{CaseGenError, Result};
pub use model::{Scalar, Value, VariableSource};
