//! SCSS compilation for the `scss` directive.
//!
//! Compiles from source with grass in expanded style. No source maps are produced.

use grass::{Options, OutputStyle};

/// Compile SCSS source to CSS.
///
/// The compiler error is returned as is, so callers can downcast it.
pub fn compile_scss(scss: &str) -> Result<String, Box<grass::Error>> {
    let options = Options::default().style(OutputStyle::Expanded);
    grass::from_string(scss.to_string(), &options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_nested() {
        let css = compile_scss("$c: red;\n.a { .b { color: $c; } }").unwrap();
        assert!(css.contains(".a .b"));
        assert!(css.contains("color: red;"));
    }

    #[test]
    fn test_compile_error_keeps_compiler_message() {
        let err = compile_scss(".a { color: $undefined; }").unwrap_err();
        assert!(err.to_string().contains("Undefined variable"));
    }
}
