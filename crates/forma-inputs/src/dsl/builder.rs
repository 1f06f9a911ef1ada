use forma_core::coords::Rect;
use forma_markup::{parse_str, Document, Node, Value};

use crate::dsl::error::FormLoadError;
use crate::form::Form;
use crate::widget::Element;
use crate::widgets::{InputNumber, InputPassword, InputSliderGradient, InputText, InputTextarea};

/// Keys that place a widget instead of configuring it.
const LAYOUT_KEYS: [&str; 4] = ["left", "top", "width", "height"];

const DEFAULT_WIDTH: f64 = 232.0;
const DEFAULT_HEIGHT: f64 = 32.0;

// ── FormLoader ────────────────────────────────────────────────────────────

/// Builds a [`Form`] from `.fml` markup.
///
/// Every child of the `Form` root becomes one attached widget. The inline
/// string names it; `left`/`top`/`width`/`height` place it; any other
/// property is applied as an attribute, in source order.
pub struct FormLoader;

impl FormLoader {
    pub fn new() -> Self {
        Self
    }

    /// Parse `.fml` source without building anything.
    pub fn parse(&self, src: &str) -> Result<Document, FormLoadError> {
        Ok(parse_str(src)?)
    }

    /// Parse and build in one go.
    pub fn load(&self, src: &str) -> Result<Form, FormLoadError> {
        let doc = self.parse(src)?;
        self.build(&doc)
    }

    /// Build a form from a parsed document.
    ///
    /// Attributes are applied before attaching, so loading notifies nobody.
    pub fn build(&self, doc: &Document) -> Result<Form, FormLoadError> {
        let root = &doc.root;
        if root.widget != "Form" {
            return Err(FormLoadError::UnexpectedRoot { widget: root.widget.clone(), line: root.line });
        }
        let mut form = Form::new();
        for node in &root.children {
            let mut element = self.build_widget(node)?;
            for prop in node.props.iter().filter(|p| !LAYOUT_KEYS.contains(&p.key.as_str())) {
                let raw = attribute_text(&prop.value);
                if !element.set_attribute(&prop.key, raw.as_deref()) {
                    log::warn!("line {}: {} ignores attribute {:?}", prop.line, node.widget, prop.key);
                }
            }
            let name = node.content.clone().unwrap_or_default();
            form.attach(name, layout_rect(node), element);
        }
        log::debug!("loaded form with {} widgets", form.len());
        Ok(form)
    }

    fn build_widget(&self, node: &Node) -> Result<Element, FormLoadError> {
        let name = node.content.clone().unwrap_or_default();
        Ok(match node.widget.as_str() {
            "InputText"           => InputText::new().named(name).into(),
            "InputPassword"       => InputPassword::new().named(name).into(),
            "InputTextarea"       => InputTextarea::new().named(name).into(),
            "InputNumber"         => InputNumber::new().named(name).into(),
            "InputSliderGradient" => InputSliderGradient::new().named(name).into(),
            other => {
                return Err(FormLoadError::UnknownWidget { widget: other.to_string(), line: node.line });
            }
        })
    }
}

impl Default for FormLoader {
    fn default() -> Self {
        Self::new()
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────

/// `true` sets a boolean attribute, `false` removes it.
fn attribute_text(value: &Value) -> Option<String> {
    match value {
        Value::Ident(s) if s == "true" => Some(String::new()),
        Value::Ident(s) if s == "false" => None,
        other => Some(other.to_attribute_text()),
    }
}

fn layout_rect(node: &Node) -> Rect {
    Rect::new(
        node.prop_f64("left").unwrap_or(0.0),
        node.prop_f64("top").unwrap_or(0.0),
        node.prop_f64("width").unwrap_or(DEFAULT_WIDTH),
        node.prop_f64("height").unwrap_or(DEFAULT_HEIGHT),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contract::ValueHolder;

    const SRC: &str = r##"
        Form {
            InputText "email" {
                placeholder: "you@example.com"
                autocomplete: email
                value: "a@b.c"
            }
            InputPassword "pw" { top: 40 readonly: true }
            InputTextarea "notes" { top: 80 height: 96 disabled: false }
            InputNumber "qty" { top: 200 min: 5 max: 2 value: 10 step: 1 }
            InputSliderGradient "hue" {
                top: 240
                width: 300
                color-steps: "#f00,#0f0,#00f"
                value: 50
            }
        }
    "##;

    #[test]
    fn builds_every_widget_kind() {
        let mut form = FormLoader::new().load(SRC).unwrap();
        assert_eq!(form.len(), 5);

        let email = form.find("email").unwrap();
        let text = form.get::<InputText>(email).unwrap();
        assert_eq!(text.value(), "a@b.c");
        assert_eq!(text.name(), "email");
        assert_eq!(text.props().autocomplete, "email");
        assert_eq!(text.props().placeholder.as_deref(), Some("you@example.com"));

        let pw = form.find("pw").unwrap();
        assert!(form.get::<InputPassword>(pw).unwrap().props().read_only);
        assert_eq!(form.rect_of(pw), Some(Rect::new(0.0, 40.0, 232.0, 32.0)));

        let notes = form.find("notes").unwrap();
        assert!(!form.get::<InputTextarea>(notes).unwrap().props().disabled);
        assert_eq!(form.rect_of(notes).map(|r| r.height), Some(96.0));

        let qty = form.find("qty").unwrap();
        assert_eq!(*form.get::<InputNumber>(qty).unwrap().value(), 5.0);

        let hue = form.find("hue").unwrap();
        let slider = form.get::<InputSliderGradient>(hue).unwrap();
        assert_eq!(*slider.value(), 50.0);
        assert_eq!(slider.gradient_stops().stops().len(), 3);
        assert!(form.is_subscribed(hue));

        assert!(form.take_notifications().is_empty());
    }

    #[test]
    fn rejects_unknown_widgets() {
        let err = FormLoader::new().load("Form {\n  InputDate \"d\"\n}").err();
        assert_eq!(err, Some(FormLoadError::UnknownWidget { widget: "InputDate".to_string(), line: 2 }));
    }

    #[test]
    fn rejects_non_form_root() {
        let err = FormLoader::new().load("InputText").err();
        assert!(matches!(err, Some(FormLoadError::UnexpectedRoot { .. })));
    }

    #[test]
    fn passes_parse_errors_through() {
        let err = FormLoader::new().load("Form {").err();
        assert!(matches!(err, Some(FormLoadError::Parse(_))));
    }

    #[test]
    fn attribute_text_mapping() {
        assert_eq!(attribute_text(&Value::Ident("true".into())), Some(String::new()));
        assert_eq!(attribute_text(&Value::Ident("false".into())), None);
        assert_eq!(attribute_text(&Value::Number(2.5)), Some("2.5".to_string()));
        assert_eq!(attribute_text(&Value::Str("x".into())), Some("x".to_string()));
    }
}
