//! Built-in directives and filters.
//!
//! Nothing here is special to the engine. These are ordinary registry
//! entries, handy as defaults and as examples of the hook signatures.
//!
//! | Directive | Effect                                      |
//! |-----------|---------------------------------------------|
//! | `text`    | text content = value, or `""` when falsy    |
//! | `show`    | display = `""` when truthy, else `none`     |
//!
//! Filters `upper`, `lower`, `trim` and `capitalize` transform strings and
//! pass every other value through unchanged.

use crate::directive::{DirectiveDefinition, DirectiveRegistry};
use crate::dom::ElementMut;
use crate::filter::FilterRegistry;
use crate::types::Value;

/// `text` and `show`.
pub fn directives() -> DirectiveRegistry {
    DirectiveRegistry::new()
        .with("text", DirectiveDefinition::simple(text))
        .with("show", DirectiveDefinition::simple(show))
}

/// `upper`, `lower`, `trim`, `capitalize`.
pub fn filters() -> FilterRegistry {
    FilterRegistry::new()
        .with("upper", map_str(str::to_uppercase))
        .with("lower", map_str(str::to_lowercase))
        .with("trim", map_str(|s| s.trim().to_string()))
        .with("capitalize", map_str(capitalize))
}

pub fn text(el: &mut ElementMut<'_>, value: &Value) {
    if value.is_truthy() {
        el.set_text_content(&value.to_string());
    } else {
        el.set_text_content("");
    }
}

pub fn show(el: &mut ElementMut<'_>, value: &Value) {
    el.set_display(if value.is_truthy() { "" } else { "none" });
}

fn map_str(f: fn(&str) -> String) -> impl Fn(&Value) -> Value {
    move |value| match value {
        Value::String(s) => Value::String(f(s)),
        other => other.clone(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::Document;

    fn apply(name: &str, value: Value) -> Value {
        let filters = filters();
        let filter = filters.get(name).unwrap();
        filter(&value)
    }

    #[test]
    fn test_text_directive() {
        let mut doc = Document::new();
        let span = doc.create_element("span");
        let mut el = ElementMut::new(&mut doc, span).unwrap();

        text(&mut el, &Value::from("hi"));
        assert_eq!(el.text_content(), "hi");
        text(&mut el, &Value::from(42));
        assert_eq!(el.text_content(), "42");
        text(&mut el, &Value::from(0));
        assert_eq!(el.text_content(), "");
        text(&mut el, &Value::Undefined);
        assert_eq!(el.text_content(), "");
    }

    #[test]
    fn test_show_directive() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let mut el = ElementMut::new(&mut doc, div).unwrap();

        show(&mut el, &Value::from(false));
        assert_eq!(el.display(), "none");
        show(&mut el, &Value::from("yes"));
        assert_eq!(el.display(), "");
    }

    #[test]
    fn test_string_filters() {
        assert_eq!(apply("upper", "abc".into()), Value::from("ABC"));
        assert_eq!(apply("lower", "AbC".into()), Value::from("abc"));
        assert_eq!(apply("trim", "  x ".into()), Value::from("x"));
        assert_eq!(apply("capitalize", "élan vital".into()), Value::from("Élan vital"));
        assert_eq!(apply("capitalize", "".into()), Value::from(""));
    }

    #[test]
    fn test_filters_pass_non_strings_through() {
        assert_eq!(apply("upper", Value::from(3)), Value::from(3));
        assert_eq!(apply("trim", Value::Null), Value::Null);
    }
}
