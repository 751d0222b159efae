mod utils;
use libcsig::Renderer;
use utils::*;

#[test]
fn test_simple_function() {
    rt(
        "unsigned int glCreateShader(unsigned int shaderType);",
        "extern glCreateShader(shaderType: unsigned): unsigned",
    );
}

#[test]
fn test_typedef_named_types() {
    rt(
        r#"
            typedef unsigned int GLenum;
            typedef unsigned int GLuint;
            GLuint glCreateShader(GLenum shaderType);
        "#,
        "extern glCreateShader(shaderType: GLenum): GLuint",
    );
}

#[test]
fn test_parameters_join_in_declared_order() {
    rt(
        "void glUniform2i(int location, int v0, int v1);",
        "extern glUniform2i(location: int, v0: int, v1: int): void",
    );
}

#[test]
fn test_pointer_parameter() {
    rt(
        "void glShaderSource(unsigned int shader, char **string);",
        "extern glShaderSource(shader: unsigned, string: char**): void",
    );
}

#[test]
fn test_const_pointer_parameter() {
    rt(
        "void glBufferData(long size, const void *data);",
        "extern glBufferData(size: long, data: const void*): void",
    );
}

#[test]
fn test_void_parameter_list_renders_empty() {
    rt("void glEnd(void);", "extern glEnd(): void");
}

#[test]
fn test_missing_parameter_list_renders_empty() {
    rt("void glEnd();", "extern glEnd(): void");
}

#[test]
fn test_pointer_return_keeps_name_and_stars() {
    rt(
        "const char *glGetString(unsigned int name);",
        "extern glGetString(name: unsigned): const char*",
    );
}

#[test]
fn test_double_pointer_return() {
    rt("char **strv(void);", "extern strv(): char**");
}

#[test]
fn test_function_typedef_emits_signature() {
    rt(
        "typedef void (*GLDEBUGPROC)(unsigned int source, const char *message);",
        "extern GLDEBUGPROC(source: unsigned, message: const char*): void",
    );
}

#[test]
fn test_function_definition_emits_signature() {
    rt(
        "int add(int a, int b) { return a + b; }",
        "extern add(a: int, b: int): int",
    );
}

#[test]
fn test_custom_marker() {
    let (result, _) = render_source(
        &Renderer::default().with_marker("GLAPI"),
        "void glBegin(unsigned int mode);",
    );
    assert_eq!(result.unwrap(), "GLAPI glBegin(mode: unsigned): void\n");
}
