//! Serialize - Markup output.

use super::document::{Document, NodeId, NodeKind};

impl Document {
    /// Serialize `node` and its subtree as markup.
    ///
    /// The document node serializes as its children. An inline display is
    /// written as a trailing `style` attribute.
    pub fn outer_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        self.write_html(node, &mut out);
        out
    }

    /// Serialize only the children of `node`.
    pub fn inner_html(&self, node: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(node) {
            self.write_html(child, &mut out);
        }
        out
    }

    fn write_html(&self, node: NodeId, out: &mut String) {
        match self.kind(node) {
            Some(NodeKind::Document) => out.push_str(&self.inner_html(node)),
            Some(NodeKind::Text(data)) => escape_into(data, false, out),
            Some(NodeKind::Element { tag }) => {
                out.push('<');
                out.push_str(tag);
                for attr in self.attributes(node) {
                    out.push(' ');
                    out.push_str(&attr.name);
                    out.push_str("=\"");
                    escape_into(&attr.value, true, out);
                    out.push('"');
                }
                let display = self.display(node);
                if !display.is_empty() {
                    out.push_str(" style=\"display: ");
                    escape_into(display, true, out);
                    out.push('"');
                }
                out.push('>');
                for &child in self.children(node) {
                    self.write_html(child, out);
                }
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
            }
            None => {}
        }
    }
}

fn escape_into(text: &str, attribute: bool, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if attribute => out.push_str("&quot;"),
            c => out.push(c),
        }
    }
}
