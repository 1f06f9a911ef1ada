//! Lexer, parser, and AST for **forma markup** (`.fml`).
//!
//! A form document is a tree of widget nodes carrying `key: value`
//! properties. The widget layer turns properties into attributes; this crate
//! only knows the syntax, so editors and linters can use it on its own.
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`ast`] | `Document`, `Node`, `Prop`, `Value` |
//! | [`error`] | `ParseError` |
//! | [`lexer`] | `Lexer`, `Token` |
//! | [`parser`] | `parse_str` entry point |
//!
//! # Quick start
//!
//! ```rust
//! use forma_markup::parse_str;
//!
//! let src = r##"
//!     Form {
//!         InputNumber "amount" { min: 0  max: 10  step: 0.5 }
//!         InputSliderGradient "hue" { color-steps: "#f00,#0f0,#00f" }
//!     }
//! "##;
//!
//! let doc = parse_str(src).unwrap();
//! assert_eq!(doc.root.widget, "Form");
//! assert_eq!(doc.root.children.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;

pub use ast::{Document, Node, Prop, Value};
pub use error::ParseError;
pub use parser::parse_str;

#[cfg(test)]
mod parse_tests {
    use super::*;

    fn ok(src: &str) -> Document { parse_str(src).unwrap() }
    fn err(src: &str) -> ParseError { parse_str(src).unwrap_err() }

    #[test] fn empty_form() { ok("Form { }"); }
    #[test] fn bare_widget() { ok("Form"); }
    #[test] fn named_widget_with_props() {
        let doc = ok(r#"Form { InputText "email" { placeholder: "you@example.com" autocomplete: email } }"#);
        let child = &doc.root.children[0];
        assert_eq!(child.widget, "InputText");
        assert_eq!(child.content.as_deref(), Some("email"));
        assert_eq!(child.prop_str("placeholder"), Some("you@example.com"));
        assert_eq!(child.prop_str("autocomplete"), Some("email"));
    }
    #[test] fn hyphenated_keys() {
        let doc = ok(r##"InputSliderGradient { color-steps: "#f00,#00f" }"##);
        assert_eq!(doc.root.prop_str("color-steps"), Some("#f00,#00f"));
    }
    #[test] fn numbers() {
        let doc = ok("InputNumber { min: -10  max: 2.5  step: .5 }");
        assert_eq!(doc.root.prop_f64("min"), Some(-10.0));
        assert_eq!(doc.root.prop_f64("max"), Some(2.5));
        assert_eq!(doc.root.prop_f64("step"), Some(0.5));
    }
    #[test] fn colors() {
        let doc = ok("X { a: #aabbcc  b: #aabbcc80 }");
        assert_eq!(doc.root.prop_color("a"), Some([0xaa, 0xbb, 0xcc, 0xff]));
        assert_eq!(doc.root.prop_color("b"), Some([0xaa, 0xbb, 0xcc, 0x80]));
    }
    #[test] fn last_prop_wins() {
        let doc = ok("X { min: 1 min: 2 }");
        assert_eq!(doc.root.prop_f64("min"), Some(2.0));
    }
    #[test] fn comments() {
        ok("// top\nForm {\n  /* block */ InputText // trailing\n}");
    }
    #[test] fn string_escape() {
        let doc = ok(r#"X { placeholder: "say \"hi\"" }"#);
        assert_eq!(doc.root.prop_str("placeholder"), Some("say \"hi\""));
    }
    #[test] fn prop_lines_are_recorded() {
        let doc = ok("Form {\n  min: 1\n  InputText\n}");
        assert_eq!(doc.root.props[0].line, 2);
        assert_eq!(doc.root.children[0].line, 3);
    }
    #[test] fn attribute_text() {
        assert_eq!(Value::Number(10.0).to_attribute_text(), "10");
        assert_eq!(Value::Number(0.25).to_attribute_text(), "0.25");
        assert_eq!(Value::Color([255, 0, 16, 255]).to_attribute_text(), "#ff0010ff");
        assert_eq!(Value::Ident("true".into()).to_attribute_text(), "true");
    }

    #[test] fn err_bad_color() { err("X { bg: #xyz }"); }
    #[test] fn err_unclosed_string() { err(r#"X { placeholder: "oops }"#); }
    #[test] fn err_unclosed_block() { err("Form { InputText {"); }
    #[test] fn err_unclosed_comment() { err("Form { /* never closed }"); }
    #[test] fn err_double_colon() { err("X { min: : 8 }"); }
    #[test] fn err_trailing_input() { err("Form { } Form { }"); }
    #[test] fn err_position() {
        let e = err("Form {\n  min: @\n}");
        assert_eq!((e.line, e.col), (2, 8));
    }
}
