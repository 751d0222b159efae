//! Lowering of the lang-c syntax tree into the csig data model.
//!
//! The upstream parser exposes the full C grammar; csig understands a
//! narrow subset. Lowering is total: it never fails, and constructs outside
//! the subset come through as [`TypeNode::Unsupported`] or [`Item::Other`],
//! so only a signature that actually needs an unsupported construct aborts
//! a render. Declarations that are never rendered can contain anything.

use lang_c::ast as c;
use lang_c::driver::Parse;
use lang_c::span::Node;

use crate::{
    ast::{FunctionDecl, Item, ParameterDecl, SourceUnit, TypeNode},
    loc,
};

/// Lower a parsed translation unit into the csig data model.
///
/// `file` names the input header and is used for locations in source that
/// carries no linemarkers.
pub(crate) fn lower_unit(parse: &Parse, file: &str) -> SourceUnit {
    let mut items = Vec::new();
    for external in &parse.unit.0 {
        match &external.node {
            c::ExternalDeclaration::Declaration(decl) => {
                lower_declaration(&decl.node, parse, file, &mut items);
            }
            c::ExternalDeclaration::FunctionDefinition(def) => {
                lower_function_definition(&def.node, parse, file, &mut items);
            }
            _ => items.push(Item::Other {
                kind: "StaticAssert".to_string(),
            }),
        }
    }
    SourceUnit { items }
}

/// What the declaration specifiers contribute to every declarator that
/// follows them.
struct BaseType {
    base: TypeNode,
    is_const: bool,
    is_typedef: bool,
}

fn lower_declaration(decl: &c::Declaration, parse: &Parse, file: &str, items: &mut Vec<Item>) {
    let base = lower_specifiers(&decl.specifiers);
    if decl.declarators.is_empty() {
        // A bare type definition, e.g. `struct point { ... };`.
        items.push(Item::Other {
            kind: "Declaration".to_string(),
        });
        return;
    }
    for init in &decl.declarators {
        items.push(lower_declarator(&base, &init.node.declarator, parse, file));
    }
}

fn lower_function_definition(
    def: &c::FunctionDefinition,
    parse: &Parse,
    file: &str,
    items: &mut Vec<Item>,
) {
    let base = lower_specifiers(&def.specifiers);
    items.push(lower_declarator(&base, &def.declarator, parse, file));
}

fn lower_specifiers(specifiers: &[Node<c::DeclarationSpecifier>]) -> BaseType {
    let mut names = Vec::new();
    let mut is_const = false;
    let mut is_typedef = false;
    let mut unsupported: Option<String> = None;

    for specifier in specifiers {
        match &specifier.node {
            c::DeclarationSpecifier::TypeSpecifier(ts) => match &ts.node {
                c::TypeSpecifier::Void => names.push("void".to_string()),
                c::TypeSpecifier::Char => names.push("char".to_string()),
                c::TypeSpecifier::Short => names.push("short".to_string()),
                c::TypeSpecifier::Int => names.push("int".to_string()),
                c::TypeSpecifier::Long => names.push("long".to_string()),
                c::TypeSpecifier::Float => names.push("float".to_string()),
                c::TypeSpecifier::Double => names.push("double".to_string()),
                c::TypeSpecifier::Signed => names.push("signed".to_string()),
                c::TypeSpecifier::Unsigned => names.push("unsigned".to_string()),
                c::TypeSpecifier::Bool => names.push("_Bool".to_string()),
                c::TypeSpecifier::Complex => names.push("_Complex".to_string()),
                c::TypeSpecifier::TypedefName(id) => names.push(id.node.name.clone()),
                other => unsupported = Some(type_specifier_kind(other).to_string()),
            },
            c::DeclarationSpecifier::TypeQualifier(qualifier) => {
                if matches!(qualifier.node, c::TypeQualifier::Const) {
                    is_const = true;
                }
            }
            c::DeclarationSpecifier::StorageClass(storage) => {
                if matches!(storage.node, c::StorageClassSpecifier::Typedef) {
                    is_typedef = true;
                }
            }
            // Function specifiers, alignment, and extensions do not shape
            // the declared type.
            _ => {}
        }
    }

    let base = match unsupported {
        Some(kind) => TypeNode::Unsupported { kind },
        None => TypeNode::Leaf { names },
    };
    BaseType {
        base,
        is_const,
        is_typedef,
    }
}

fn type_specifier_kind(ts: &c::TypeSpecifier) -> &'static str {
    match ts {
        c::TypeSpecifier::Struct(_) => "Struct",
        c::TypeSpecifier::Enum(_) => "Enum",
        _ => "TypeSpecifier",
    }
}

/// How a function's parameter list was written.
enum ParameterShape<'a> {
    /// A prototype parameter list.
    Prototype(&'a c::FunctionDeclarator),
    /// An empty identifier list, `int f();`.
    Unspecified,
}

fn lower_declarator(
    base: &BaseType,
    declarator: &Node<c::Declarator>,
    parse: &Parse,
    file: &str,
) -> Item {
    let mut pointers = 0usize;
    let mut shape: Option<ParameterShape> = None;
    let mut unsupported: Option<String> = None;

    for derived in &declarator.node.derived {
        match &derived.node {
            c::DerivedDeclarator::Pointer(_) => pointers += 1,
            c::DerivedDeclarator::Function(function) => {
                shape = Some(ParameterShape::Prototype(&function.node));
            }
            c::DerivedDeclarator::KRFunction(identifiers) if identifiers.is_empty() => {
                shape = Some(ParameterShape::Unspecified);
            }
            other => unsupported = Some(derived_declarator_kind(other).to_string()),
        }
    }

    // The identifier, possibly behind one level of parenthesized pointer
    // declarator as in `void (*cb)(int x)`. Those pointers belong to the
    // declared entity rather than the return type; the name still sits on
    // the innermost layer.
    let name = match &declarator.node.kind.node {
        c::DeclaratorKind::Identifier(id) => Some(id.node.name.clone()),
        c::DeclaratorKind::Abstract => None,
        c::DeclaratorKind::Declarator(inner) => {
            let only_pointers = inner
                .node
                .derived
                .iter()
                .all(|derived| matches!(derived.node, c::DerivedDeclarator::Pointer(_)));
            match &inner.node.kind.node {
                c::DeclaratorKind::Identifier(id) if only_pointers => Some(id.node.name.clone()),
                _ => {
                    unsupported = Some("Declarator".to_string());
                    None
                }
            }
        }
    };

    let Some(shape) = shape else {
        // Not a function declarator: a variable, a plain typedef, or
        // something stranger. None of these render.
        let kind = if base.is_typedef {
            "Typedef"
        } else {
            "Declaration"
        };
        return Item::Other {
            kind: kind.to_string(),
        };
    };

    let mut return_type = TypeNode::Named {
        declname: name,
        is_const: base.is_const,
        inner: Box::new(match &unsupported {
            Some(kind) => TypeNode::Unsupported { kind: kind.clone() },
            None => base.base.clone(),
        }),
    };
    for _ in 0..pointers {
        return_type = TypeNode::Pointer(Box::new(return_type));
    }

    let (parameters, variadic) = match shape {
        ParameterShape::Prototype(function) => {
            let variadic = matches!(function.ellipsis, c::Ellipsis::Some);
            let params: Vec<ParameterDecl> = function
                .parameters
                .iter()
                .map(|parameter| lower_parameter(&parameter.node))
                .collect();
            if is_void_parameter_list(&params) {
                (Some(Vec::new()), variadic)
            } else {
                (Some(params), variadic)
            }
        }
        ParameterShape::Unspecified => (None, false),
    };

    Item::Function(FunctionDecl {
        return_type,
        parameters,
        variadic,
        location: loc::location_for_offset(&parse.source, declarator.span.start, file),
    })
}

fn derived_declarator_kind(derived: &c::DerivedDeclarator) -> &'static str {
    match derived {
        c::DerivedDeclarator::Array(_) => "Array",
        c::DerivedDeclarator::Function(_) => "Function",
        c::DerivedDeclarator::KRFunction(_) => "KRFunction",
        _ => "DerivedDeclarator",
    }
}

fn lower_parameter(parameter: &c::ParameterDeclaration) -> ParameterDecl {
    let base = lower_specifiers(&parameter.specifiers);

    let mut pointers = 0usize;
    let mut unsupported: Option<String> = None;
    let mut name = None;

    if let Some(declarator) = &parameter.declarator {
        for derived in &declarator.node.derived {
            match &derived.node {
                c::DerivedDeclarator::Pointer(_) => pointers += 1,
                other => unsupported = Some(derived_declarator_kind(other).to_string()),
            }
        }
        name = match &declarator.node.kind.node {
            c::DeclaratorKind::Identifier(id) => Some(id.node.name.clone()),
            c::DeclaratorKind::Abstract => None,
            c::DeclaratorKind::Declarator(_) => {
                unsupported = Some("Declarator".to_string());
                None
            }
        };
    }

    let mut ty = TypeNode::Named {
        declname: name.clone(),
        is_const: base.is_const,
        inner: Box::new(match unsupported {
            Some(kind) => TypeNode::Unsupported { kind },
            None => base.base,
        }),
    };
    for _ in 0..pointers {
        ty = TypeNode::Pointer(Box::new(ty));
    }

    ParameterDecl { name, ty }
}

/// `f(void)` declares an empty parameter list: a single unnamed,
/// unqualified `void` with no pointer or other wrapping.
fn is_void_parameter_list(params: &[ParameterDecl]) -> bool {
    match params {
        [
            ParameterDecl {
                name: None,
                ty:
                    TypeNode::Named {
                        is_const: false,
                        inner,
                        ..
                    },
            },
        ] => {
            matches!(&**inner, TypeNode::Leaf { names } if names.len() == 1 && names[0] == "void")
        }
        _ => false,
    }
}
