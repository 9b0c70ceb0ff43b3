//
// Copyright (c) 2024 Nathan Fiedler
//
pub mod contact;
pub mod header;
pub mod nav;
pub mod page;

///
/// A component that renders itself as a fragment of HTML.
///
pub trait Render {
    fn render(&self) -> String;
}

/// Escape text for use as HTML element content.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Escape text for use inside a double-quoted HTML attribute.
pub fn html_attr(s: &str) -> String {
    html_escape(s).replace('"', "&quot;")
}
