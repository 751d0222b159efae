//! csig generates interface signature listings from C headers.
//!
//! A header is expanded by the system C preprocessor and parsed with the
//! lang-c grammar. Its function declarations are then reduced to a small
//! data model covering pointer chains, `const` qualification, and named
//! leaf types, and rendered one signature per line in source order:
//!
//! ```text
//! extern glGetString(name: GLenum): const char*
//! ```
//!
//! The listing is deliberately language neutral so downstream binding
//! generators can consume it without a C parser of their own. Rendering is
//! all-or-nothing: a declaration outside the supported subset fails the
//! whole run rather than producing a listing with silent gaps.

mod ast;
mod csig;
mod error;
mod loc;
mod lower;
mod render;

pub use crate::{
    ast::{FunctionDecl, Item, ParameterDecl, SourceUnit, TypeNode},
    csig::Csig,
    error::{CsigError, Result},
    render::{Declarator, Renderer, translate_type, unwrap_declarator},
};
