//! Rendering of function declarations into interface signature lines.

use std::io::Write;

use crate::{
    ast::{FunctionDecl, Item, SourceUnit, TypeNode},
    error::{CsigError, Result},
};

/// Translate a type expression into its textual form.
///
/// Pointer layers append a trailing `*` after the fully translated inner
/// type, `const` qualification prefixes `const `, and a leaf renders as its
/// first specifier token. Anything else fails the translation.
pub fn translate_type(ty: &TypeNode) -> Result<String> {
    match ty {
        TypeNode::Pointer(inner) => Ok(format!("{}*", translate_type(inner)?)),
        TypeNode::Named {
            is_const, inner, ..
        } => {
            let inner = translate_type(inner)?;
            if *is_const {
                Ok(format!("const {inner}"))
            } else {
                Ok(inner)
            }
        }
        TypeNode::Leaf { names } => names.first().cloned().ok_or_else(|| {
            CsigError::MalformedDeclaration("type specifier with no name tokens".to_string())
        }),
        TypeNode::Unsupported { kind } => Err(CsigError::UnsupportedTypeKind(kind.clone())),
    }
}

/// The named declarator recovered from a function's return chain.
#[derive(Debug, Clone, PartialEq)]
pub struct Declarator<'a> {
    /// The name layer that carries the identifier.
    pub node: &'a TypeNode,
    /// The declared function name.
    pub name: &'a str,
    /// Source coordinates of the declaration.
    pub location: &'a str,
}

/// Locate the layer of a function's return chain that carries the declared
/// identifier.
///
/// A pointer-returning function wraps its name layer in one `Pointer` per
/// level of indirection; the identifier itself always sits on the innermost
/// name layer, so we descend through the wrapping until we reach it. A
/// non-pointer return needs zero steps. This never changes the function's
/// return type, which is translated from the unmodified chain root.
pub fn unwrap_declarator(decl: &FunctionDecl) -> Result<Declarator<'_>> {
    let mut node = &decl.return_type;
    while let TypeNode::Pointer(inner) = node {
        node = inner;
    }
    match node {
        TypeNode::Named {
            declname: Some(name),
            ..
        } => Ok(Declarator {
            node,
            name,
            location: &decl.location,
        }),
        _ => Err(CsigError::MalformedDeclaration(format!(
            "function declaration at {} carries no name",
            decl.location
        ))),
    }
}

/// Renders the function declarations of a [`SourceUnit`] as interface
/// signature lines, one per declaration in source order.
#[derive(Debug, Clone)]
pub struct Renderer {
    marker: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Creates a renderer with the default `extern` marker.
    pub fn new() -> Self {
        Self {
            marker: "extern".to_string(),
        }
    }

    /// Sets the marker tag emitted ahead of every signature line.
    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = marker.into();
        self
    }

    /// Render every function declaration in the unit.
    ///
    /// The listing is accumulated in memory and returned only if the whole
    /// unit renders; a declaration outside the supported subset fails the
    /// entire render, so callers never observe a truncated listing. One
    /// `name at location` line per rendered function is written to
    /// `diagnostics` as declarations are processed, flushed per line.
    pub fn render(&self, unit: &SourceUnit, diagnostics: &mut dyn Write) -> Result<String> {
        let mut out = String::new();
        for item in &unit.items {
            if let Item::Function(decl) = item {
                out.push_str(&self.render_function(decl, diagnostics)?);
            }
        }
        Ok(out)
    }

    fn render_function(&self, decl: &FunctionDecl, diagnostics: &mut dyn Write) -> Result<String> {
        let declarator = unwrap_declarator(decl)?;

        let mut params = Vec::new();
        if let Some(parameters) = &decl.parameters {
            for param in parameters {
                let ty = translate_type(&param.ty)?;
                let name = param.name.as_deref().ok_or_else(|| {
                    CsigError::MalformedDeclaration(format!(
                        "unnamed parameter in declaration of {}",
                        declarator.name
                    ))
                })?;
                params.push(format!("{name}: {ty}"));
            }
        }
        if decl.variadic {
            return Err(CsigError::UnsupportedTypeKind("Ellipsis".to_string()));
        }
        let return_type = translate_type(&decl.return_type)?;

        writeln!(diagnostics, "{} at {}", declarator.name, decl.location)?;
        diagnostics.flush()?;

        Ok(format!(
            "{} {}({}): {}\n",
            self.marker,
            declarator.name,
            params.join(", "),
            return_type
        ))
    }
}
