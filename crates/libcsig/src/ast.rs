//! Data model for the subset of C declarations csig understands.
//!
//! The lang-c tree covers the full C grammar; lowering reduces it to the
//! types here, which mirror how a declaration reads: pointer layers around
//! a qualified name layer around a terminal leaf type. Constructs outside
//! the subset survive lowering as [`TypeNode::Unsupported`] so that
//! rendering, not parsing, decides when they are fatal.

use serde::Serialize;

/// A type expression as it appears in a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum TypeNode {
    /// Pointer to the wrapped type.
    Pointer(Box<TypeNode>),
    /// A qualifier layer around a base type.
    Named {
        /// Identifier declared at this layer, when the declarator names
        /// one. The identifier always sits on the innermost name layer,
        /// below any pointer wrapping.
        declname: Option<String>,
        /// Whether this layer is `const`-qualified.
        is_const: bool,
        /// The wrapped base type.
        inner: Box<TypeNode>,
    },
    /// A terminal named type, such as `int` or a typedef name.
    Leaf {
        /// Specifier tokens in source order, e.g. `["unsigned", "long"]`.
        /// Only the first token is honored when translating.
        names: Vec<String>,
    },
    /// A construct outside the supported subset, kept by kind name so a
    /// translation attempt can report what it hit.
    Unsupported {
        /// Name of the offending construct.
        kind: String,
    },
}

impl TypeNode {
    /// A leaf type with a single specifier token.
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::Leaf {
            names: vec![name.into()],
        }
    }

    /// An anonymous name layer around `inner`.
    pub fn named(inner: Self, is_const: bool) -> Self {
        Self::Named {
            declname: None,
            is_const,
            inner: Box::new(inner),
        }
    }

    /// A pointer to `inner`.
    pub fn pointer(inner: Self) -> Self {
        Self::Pointer(Box::new(inner))
    }
}

/// A single function parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParameterDecl {
    /// Parameter name as declared. `None` for an abstract declarator.
    pub name: Option<String>,
    /// Declared type of the parameter.
    pub ty: TypeNode,
}

/// A function declaration discovered in a translation unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionDecl {
    /// The return declarator chain. The declared name lives on the
    /// innermost [`TypeNode::Named`] layer, below any pointer wrapping for
    /// pointer-returning functions.
    pub return_type: TypeNode,
    /// Parameters in declaration order. `None` when the function was
    /// declared without a parameter list, as in `int f();`.
    pub parameters: Option<Vec<ParameterDecl>>,
    /// Whether the parameter list ends with `...`.
    pub variadic: bool,
    /// Source coordinates of the declarator, as `file:line:column`.
    pub location: String,
}

/// A top-level item in a translation unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Item {
    /// A function declaration.
    Function(FunctionDecl),
    /// Any other declaration, kept by kind name. Skipped when rendering.
    Other {
        /// Name of the declaration kind.
        kind: String,
    },
}

/// A parsed translation unit reduced to the csig data model.
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SourceUnit {
    /// Top-level items in source order.
    pub items: Vec<Item>,
}
