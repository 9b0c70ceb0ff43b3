//
// Copyright (c) 2024 Nathan Fiedler
//
use super::{html_attr, html_escape, Render};

///
/// Navigation component: a brand link followed by a list of page links.
///
#[derive(Clone, Debug)]
pub struct NavLinks {
    brand: String,
    links: Vec<(String, String)>,
}

impl NavLinks {
    pub fn new<S: Into<String>>(brand: S) -> Self {
        Self {
            brand: brand.into(),
            links: Vec::new(),
        }
    }

    /// Append a link with the given label and target.
    pub fn link<L: Into<String>, H: Into<String>>(mut self, label: L, href: H) -> Self {
        self.links.push((label.into(), href.into()));
        self
    }
}

impl Default for NavLinks {
    fn default() -> Self {
        NavLinks::new("Blog").link("Home", "/").link("Contact", "/contact")
    }
}

impl Render for NavLinks {
    fn render(&self) -> String {
        let mut items = String::new();
        for (label, href) in &self.links {
            items.push_str(&format!(
                "<li><a href=\"{}\">{}</a></li>",
                html_attr(href),
                html_escape(label)
            ));
        }
        format!(
            "<nav class=\"nav\"><a class=\"nav__brand\" href=\"/\">{}</a><ul class=\"nav__links\">{}</ul></nav>",
            html_escape(&self.brand),
            items
        )
    }
}
