//! End-to-end binding tests.
//!
//! Builds small documents, runs the full construction pass and checks the
//! resulting DOM and the order in which directives are updated.
//!
//! Run with: cargo test --test binding

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use pretty_assertions::assert_eq;
use spark_seed::{
    builtin, DirectiveDefinition, DirectiveRegistry, Document, FilterRegistry, NodeId, Seed,
    SeedOptions, Value,
};

// =============================================================================
// HELPERS
// =============================================================================

type Calls = Rc<RefCell<Vec<(NodeId, Value)>>>;

fn element(doc: &mut Document, parent: NodeId, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let el = doc.create_element(tag);
    for (name, value) in attrs {
        doc.set_attribute(el, name, *value).unwrap();
    }
    doc.append_child(parent, el).unwrap();
    el
}

fn root(doc: &mut Document, attrs: &[(&str, &str)]) -> NodeId {
    let mut all = vec![("id", "app")];
    all.extend_from_slice(attrs);
    let parent = doc.root();
    element(doc, parent, "div", &all)
}

/// Registry with a `rec` directive that records every update.
fn recording(calls: &Calls) -> DirectiveRegistry {
    let calls = calls.clone();
    builtin::directives().with(
        "rec",
        DirectiveDefinition::simple(move |el, v| calls.borrow_mut().push((el.node(), v.clone()))),
    )
}

fn upper_trim() -> FilterRegistry {
    FilterRegistry::new()
        .with("upper", |v: &Value| Value::from(v.to_string().to_uppercase()))
        .with("trim", |v: &Value| Value::from(v.to_string().trim().to_string()))
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_greeting_end_to_end() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(&mut doc, app, "span", &[("sd-text", "greeting")]);

    let seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("greeting", "hi"),
        builtin::directives(),
        builtin::filters(),
    )
    .unwrap();

    assert_eq!(seed.document().text_content(span), "hi");
    assert!(!seed.document().has_attribute(span, "sd-text"));
    assert_eq!(
        seed.document().outer_html(app),
        "<div id=\"app\"><span>hi</span></div>"
    );
}

#[test]
fn test_non_directive_attributes_untouched() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(
        &mut doc,
        app,
        "span",
        &[("class", "big"), ("sd-text", "msg"), ("data-x", "1"), ("sd-model", "m")],
    );

    let seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("msg", "x"),
        builtin::directives(),
        builtin::filters(),
    )
    .unwrap();

    let names: Vec<&str> = seed
        .document()
        .attributes(span)
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    // Unknown directive `model` is ignored and left in place
    assert_eq!(names, vec!["class", "data-x", "sd-model"]);
    assert_eq!(seed.bindings().keys().collect::<Vec<_>>(), vec!["msg"]);
}

#[test]
fn test_shared_key_single_accessor() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let text = element(&mut doc, app, "span", &[("sd-text", "msg")]);
    let shown = element(&mut doc, app, "p", &[("sd-show", "msg")]);

    let mut seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("msg", "hello"),
        builtin::directives(),
        builtin::filters(),
    )
    .unwrap();

    assert_eq!(seed.scope().keys().collect::<Vec<_>>(), vec!["msg"]);
    assert_eq!(seed.bindings().len(), 1);
    assert_eq!(seed.bindings().by_key("msg").unwrap().directives().len(), 2);

    seed.set("msg", "");
    assert_eq!(seed.document().text_content(text), "");
    assert_eq!(seed.document().display(shown), "none");

    seed.set("msg", "back");
    assert_eq!(seed.document().text_content(text), "back");
    assert_eq!(seed.document().display(shown), "");
}

#[test]
fn test_fan_out_follows_discovery_order() {
    let calls: Calls = Rc::default();
    let mut doc = Document::new();
    let app = root(&mut doc, &[("sd-rec", "k")]);
    let outer = element(&mut doc, app, "section", &[("sd-rec", "k")]);
    let inner = element(&mut doc, outer, "span", &[("sd-rec", "k")]);

    let mut seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("k", 1),
        recording(&calls),
        FilterRegistry::new(),
    )
    .unwrap();

    calls.borrow_mut().clear();
    seed.set("k", 2);

    let order: Vec<NodeId> = calls.borrow().iter().map(|(node, _)| *node).collect();
    // Descendants in document order, root last
    assert_eq!(order, vec![outer, inner, app]);
}

#[test]
fn test_multiple_directives_on_one_element_keep_attribute_order() {
    let calls: Calls = Rc::default();
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    element(&mut doc, app, "span", &[("sd-show", "k"), ("sd-rec", "k")]);

    let mut seed = Seed::create(doc, SeedOptions::new("app"), recording(&calls), FilterRegistry::new())
        .unwrap();

    let binding = seed.bindings().by_key("k").unwrap();
    let names: Vec<&str> = binding
        .directives()
        .iter()
        .map(|d| d.descriptor.name.as_str())
        .collect();
    assert_eq!(names, vec!["show", "rec"]);

    seed.set("k", "v");
    assert_eq!(calls.borrow().last().map(|(_, v)| v.clone()), Some(Value::from("v")));
}

#[test]
fn test_filters_compose_left_to_right() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(&mut doc, app, "span", &[("sd-text", "msg|upper|trim")]);

    let mut seed = Seed::create(doc, SeedOptions::new("app"), builtin::directives(), upper_trim())
        .unwrap();

    seed.set("msg", "  hi  ");
    assert_eq!(seed.document().text_content(span), "HI");
    // The scope keeps the raw value
    assert_eq!(seed.get("msg"), Some(Value::from("  hi  ")));
}

#[test]
fn test_falsy_values_bypass_filters() {
    let invoked = Rc::new(Cell::new(0));
    let invoked_clone = invoked.clone();
    let filters = FilterRegistry::new().with("upper", move |v: &Value| {
        invoked_clone.set(invoked_clone.get() + 1);
        v.clone()
    });

    let calls: Calls = Rc::default();
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    element(&mut doc, app, "span", &[("sd-rec", "n | upper")]);

    let mut seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("n", 0),
        recording(&calls),
        filters,
    )
    .unwrap();
    seed.set("n", "");

    assert_eq!(invoked.get(), 0);
    let values: Vec<Value> = calls.borrow().iter().map(|(_, v)| v.clone()).collect();
    assert_eq!(values, vec![Value::from(0), Value::from("")]);
}

#[test]
fn test_custom_filter_never_consults_registry() {
    let invoked = Rc::new(Cell::new(0));
    let invoked_clone = invoked.clone();
    let filters = FilterRegistry::new().with("upper", move |v: &Value| {
        invoked_clone.set(invoked_clone.get() + 1);
        v.clone()
    });

    let directives = builtin::directives().with(
        "shout",
        DirectiveDefinition::simple(builtin::text)
            .with_custom_filter(|v, names| Value::from(format!("{v}<{}>", names.join("+")))),
    );

    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(&mut doc, app, "span", &[("sd-shout", "msg | upper")]);

    let mut seed = Seed::create(doc, SeedOptions::new("app"), directives, filters).unwrap();
    seed.set("msg", "hey");

    assert_eq!(seed.document().text_content(span), "hey<upper>");
    assert_eq!(invoked.get(), 0);
}

#[test]
fn test_unknown_filter_is_skipped() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(&mut doc, app, "span", &[("sd-text", "msg | nope | upper")]);

    let mut seed = Seed::create(doc, SeedOptions::new("app"), builtin::directives(), upper_trim())
        .unwrap();
    seed.set("msg", "ok");

    assert_eq!(seed.document().text_content(span), "OK");
}

#[test]
fn test_argument_directive_only_found_on_root() {
    let calls: Calls = Rc::default();
    let mut doc = Document::new();
    let app = root(&mut doc, &[("sd-rec-click", "a")]);
    let hidden = element(&mut doc, app, "button", &[("sd-rec-click", "b")]);

    let seed = Seed::create(doc, SeedOptions::new("app"), recording(&calls), FilterRegistry::new())
        .unwrap();

    // `[sd-rec]` does not match `sd-rec-click`, so the button is never scanned
    assert_eq!(seed.bindings().keys().collect::<Vec<_>>(), vec!["a"]);
    assert_eq!(seed.document().get_attribute(hidden, "sd-rec-click"), Some("b"));
    assert!(!seed.document().has_attribute(app, "sd-rec-click"));

    let binding = seed.bindings().by_key("a").unwrap();
    assert_eq!(binding.directives()[0].descriptor.argument.as_deref(), Some("click"));
}

#[test]
fn test_plain_writes_are_not_reactive() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    element(&mut doc, app, "span", &[("sd-text", "msg")]);

    let mut seed = Seed::create(doc, SeedOptions::new("app"), builtin::directives(), builtin::filters())
        .unwrap();
    let before = seed.document().outer_html(app);

    seed.set("other", "x");
    assert_eq!(seed.get("other"), Some(Value::from("x")));
    assert!(!seed.scope().is_reactive("other"));
    assert_eq!(seed.document().outer_html(app), before);
}

#[test]
fn test_independent_instances() {
    let build = |value: &str| {
        let mut doc = Document::new();
        let app = root(&mut doc, &[]);
        let span = element(&mut doc, app, "span", &[("sd-text", "msg")]);
        let seed = Seed::create(
            doc,
            SeedOptions::new("app").with_value("msg", value),
            builtin::directives(),
            builtin::filters(),
        )
        .unwrap();
        (seed, span)
    };

    let (mut a, span_a) = build("a");
    let (b, span_b) = build("b");
    a.set("msg", "changed");

    assert_eq!(a.document().text_content(span_a), "changed");
    assert_eq!(b.document().text_content(span_b), "b");
}

#[test]
fn test_repeated_writes_keep_node_count() {
    let mut doc = Document::new();
    let app = root(&mut doc, &[]);
    let span = element(&mut doc, app, "span", &[("sd-text", "n")]);

    let mut seed = Seed::create(
        doc,
        SeedOptions::new("app").with_value("n", "start"),
        builtin::directives(),
        builtin::filters(),
    )
    .unwrap();
    let count = seed.document().node_count();

    for i in 0..200 {
        seed.set("n", i);
        seed.set("n", "");
    }
    seed.set("n", "end");

    assert_eq!(seed.document().node_count(), count);
    assert_eq!(seed.document().text_content(span), "end");
}
