//! Inner-markup serialization for section entries.
//!
//! Text is written as literal characters (entities decoded). Links with no target are
//! unwrapped to their content. Attribute values escape `"` only.

use scraper::ElementRef;

const VOID_ELEMENTS: [&str; 13] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source",
    "track", "wbr",
];

/// Concatenated text of `el` and its descendants.
pub fn text_content(el: ElementRef<'_>) -> String {
    el.text().collect()
}

/// Markup of the children of `el`.
pub fn inner_markup(el: ElementRef<'_>) -> String {
    let mut out = String::new();
    write_children(el, &mut out);
    out
}

fn write_children(el: ElementRef<'_>, out: &mut String) {
    for child in el.children() {
        if let Some(child_el) = ElementRef::wrap(child) {
            write_element(child_el, out);
        } else if let Some(text) = child.value().as_text() {
            out.push_str(text);
        }
    }
}

fn write_element(el: ElementRef<'_>, out: &mut String) {
    let element = el.value();
    let name = element.name();
    if name == "a" && element.attr("href").map_or(true, |h| h.trim().is_empty()) {
        write_children(el, out);
        return;
    }
    out.push('<');
    out.push_str(name);
    for (attr, value) in element.attrs() {
        out.push(' ');
        out.push_str(attr);
        out.push_str("=\"");
        out.push_str(&value.replace('"', "&quot;"));
        out.push('"');
    }
    out.push('>');
    if VOID_ELEMENTS.contains(&name) {
        return;
    }
    write_children(el, out);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}
