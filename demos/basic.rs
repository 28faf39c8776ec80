//! Basic Example - Bind a small document and drive it from the scope.
//!
//! Builds the equivalent of:
//!
//! ```html
//! <div id="app" sd-show="visible">
//!     <h1 sd-text="title | capitalize"></h1>
//!     <p sd-text="message | trim | upper"></p>
//! </div>
//! ```
//!
//! Run with: cargo run --example basic

use spark_seed::{builtin, DomError, Document, Seed, SeedOptions};

fn build() -> Result<Document, DomError> {
    let mut doc = Document::new();
    let app = doc.create_element("div");
    let title = doc.create_element("h1");
    let message = doc.create_element("p");

    doc.set_attribute(app, "id", "app")?;
    doc.set_attribute(app, "sd-show", "visible")?;
    doc.set_attribute(title, "sd-text", "title | capitalize")?;
    doc.set_attribute(message, "sd-text", "message | trim | upper")?;

    doc.append_child(doc.root(), app)?;
    doc.append_child(app, title)?;
    doc.append_child(app, message)?;
    Ok(doc)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .init();

    println!("=== spark-seed Basic Example ===\n");

    let mut seed = Seed::create(
        build()?,
        SeedOptions::new("app")
            .with_value("title", "hello seed")
            .with_value("message", "  bound on construction  ")
            .with_value("visible", true),
        builtin::directives(),
        builtin::filters(),
    )?;

    let root = seed.root();
    println!("after construction:\n  {}\n", seed.document().outer_html(root));

    seed.set("message", "  updated from the scope ");
    println!("after set(message):\n  {}\n", seed.document().outer_html(root));

    seed.set("visible", false);
    println!("after set(visible, false):\n  {}\n", seed.document().outer_html(root));

    println!("scope keys: {:?}", seed.scope().keys().collect::<Vec<_>>());
    Ok(())
}
