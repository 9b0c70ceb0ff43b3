//
// Copyright (c) 2024 Nathan Fiedler
//
use super::{html_escape, Render};

///
/// Lay out a complete HTML document: the header followed by the body.
///
pub fn document<H: Render>(title: &str, header: &H, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
  <head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{}</title>
    <link rel="stylesheet" href="/static/style.css">
  </head>
  <body>
    {}
    <main>
      {}
    </main>
  </body>
</html>"#,
        html_escape(title),
        header.render(),
        body
    )
}
