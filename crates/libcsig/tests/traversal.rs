mod utils;
use libcsig::{Item, Renderer};
use utils::*;

#[test]
fn test_output_lines_follow_source_order() {
    rt(
        r#"
            void first(void);
            int second(int a);
            char *third(void);
        "#,
        r#"
            extern first(): void
            extern second(a: int): int
            extern third(): char*
        "#,
    );
}

#[test]
fn test_non_function_declarations_are_skipped() {
    rt(
        r#"
            typedef unsigned int GLenum;
            extern int gl_error_count;
            struct color { int r; int g; int b; };
            void glFlush(void);
        "#,
        "extern glFlush(): void",
    );
}

#[test]
fn test_unsupported_types_in_skipped_declarations_are_harmless() {
    // A variable with a struct type never gets translated, so it must not
    // fail the run.
    rt(
        r#"
            struct color { int r; int g; int b; };
            struct color background;
            void glFlush(void);
        "#,
        "extern glFlush(): void",
    );
}

#[test]
fn test_lowered_items_preserve_order_and_kind() {
    let unit = inspect_source(
        "typedef unsigned int GLenum;\nvoid glBegin(GLenum mode);\nextern int level;\n",
    );
    assert_eq!(unit.items.len(), 3);
    assert!(matches!(&unit.items[0], Item::Other { kind } if kind == "Typedef"));
    assert!(matches!(&unit.items[1], Item::Function(_)));
    assert!(matches!(&unit.items[2], Item::Other { kind } if kind == "Declaration"));
}

#[test]
fn test_diagnostics_name_each_function_in_order() {
    let source = "void first(void);\nint second(int a);\n";
    let (result, diagnostics) = render_source(&Renderer::default(), source);
    result.unwrap();

    let lines: Vec<&str> = diagnostics.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(
        lines[0].starts_with("first at ") && lines[0].ends_with("input.h:1:6"),
        "unexpected diagnostic: {}",
        lines[0]
    );
    assert!(
        lines[1].starts_with("second at ") && lines[1].ends_with("input.h:2:5"),
        "unexpected diagnostic: {}",
        lines[1]
    );
}

#[test]
fn test_no_diagnostics_without_functions() {
    let (result, diagnostics) = render_source(&Renderer::default(), "typedef int myint;\n");
    assert_eq!(result.unwrap(), "");
    assert_eq!(diagnostics, "");
}
