//
// Copyright (c) 2024 Nathan Fiedler
//
use super::{html_attr, html_escape, Render};

/// Script that loads the bot-verification widget.
const WIDGET_SCRIPT: &str = "https://www.google.com/recaptcha/api.js";

/// Element identifier of the submit button, toggled by the widget callbacks.
const SUBMIT_ID: &str = "contact-submit";

// name, label, placeholder, input type ("textarea" for multi-line)
const FIELDS: [(&str, &str, &str, &str); 4] = [
    ("subject", "Subject", "Subject", "text"),
    ("name", "Name", "Your name", "text"),
    ("email", "Email", "you@example.com", "email"),
    ("message", "Message", "Your message", "textarea"),
];

///
/// Contact form posting directly to an external relay endpoint.
///
/// When a site key is configured the submit button stays disabled until the
/// verification widget reports a token. Without a site key there is no
/// verification step and the button is always enabled.
///
/// The browser side of the gating lives in the `contactVerified` and
/// `contactExpired` scripts emitted by `render`. This type holds the same
/// state so the page is rendered with the button already in the state those
/// scripts would leave it in.
///
#[derive(Clone, Debug)]
pub struct ContactForm {
    site_key: Option<String>,
    relay_url: String,
    verified: bool,
}

impl ContactForm {
    pub fn new<S: Into<String>>(site_key: Option<String>, relay_url: S) -> Self {
        Self {
            site_key: site_key.filter(|k| !k.is_empty()),
            relay_url: relay_url.into(),
            verified: false,
        }
    }

    /// Mirrors the widget callbacks: `Some` is `contactVerified`, `None` is
    /// `contactExpired`.
    pub fn on_verification(&mut self, token: Option<&str>) {
        self.verified = token.is_some();
    }

    pub fn requires_verification(&self) -> bool {
        self.site_key.is_some()
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn is_submit_disabled(&self) -> bool {
        self.requires_verification() && !self.verified
    }

    fn render_fields(&self) -> String {
        let mut fields = String::new();
        for (name, label, placeholder, kind) in FIELDS.iter() {
            fields.push_str(&format!(
                "<label for=\"{name}\">{label}</label>\n",
                name = name,
                label = html_escape(label)
            ));
            if *kind == "textarea" {
                fields.push_str(&format!(
                    "<textarea id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" required></textarea>\n",
                    name = name,
                    placeholder = html_attr(placeholder)
                ));
            } else {
                fields.push_str(&format!(
                    "<input id=\"{name}\" name=\"{name}\" type=\"{kind}\" placeholder=\"{placeholder}\" required>\n",
                    name = name,
                    kind = kind,
                    placeholder = html_attr(placeholder)
                ));
            }
        }
        fields
    }

    fn render_widget(&self, site_key: &str) -> String {
        format!(
            r#"<div class="contact__verify"><div class="g-recaptcha" data-sitekey="{key}" data-callback="contactVerified" data-expired-callback="contactExpired"></div></div>
"#,
            key = html_attr(site_key)
        )
    }

    fn render_scripts(&self) -> String {
        format!(
            r#"<script src="{src}" async defer></script>
<script>
function contactVerified(token) {{ document.getElementById("{id}").disabled = token === null; }}
function contactExpired() {{ document.getElementById("{id}").disabled = true; }}
</script>
"#,
            src = WIDGET_SCRIPT,
            id = SUBMIT_ID
        )
    }
}

impl Render for ContactForm {
    fn render(&self) -> String {
        let widget = self
            .site_key
            .as_deref()
            .map(|key| self.render_widget(key))
            .unwrap_or_default();
        let scripts = if self.requires_verification() {
            self.render_scripts()
        } else {
            String::new()
        };
        let disabled = if self.is_submit_disabled() {
            " disabled"
        } else {
            ""
        };
        format!(
            r#"<div class="contact">
<form class="contact__form" action="{action}" method="POST">
<p class="contact__intro">Have a question or feedback? Use the form below to get in touch with us.</p>
<div class="contact__fields">
{fields}{widget}<button type="submit" id="{id}"{disabled}>Send Message</button>
</div>
</form>
{scripts}</div>"#,
            action = html_attr(&self.relay_url),
            fields = self.render_fields(),
            widget = widget,
            id = SUBMIT_ID,
            disabled = disabled,
            scripts = scripts
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RELAY: &str = "https://relay.example.com/inbox";

    #[test]
    fn test_gating_with_site_key() {
        let mut form = ContactForm::new(Some("6Lc-site-key".into()), RELAY);
        assert!(form.requires_verification());
        assert!(!form.is_verified());
        assert!(form.is_submit_disabled());

        form.on_verification(Some("token-123"));
        assert!(form.is_verified());
        assert!(!form.is_submit_disabled());

        // expired token
        form.on_verification(None);
        assert!(form.is_submit_disabled());
    }

    #[test]
    fn test_gating_without_site_key() {
        for site_key in [None, Some("".to_owned())] {
            let mut form = ContactForm::new(site_key, RELAY);
            assert!(!form.requires_verification());
            assert!(!form.is_submit_disabled());
            form.on_verification(None);
            assert!(!form.is_submit_disabled());
            form.on_verification(Some("token-123"));
            assert!(!form.is_submit_disabled());
        }
    }

    #[test]
    fn test_render_with_site_key() {
        let form = ContactForm::new(Some("6Lc-site-key".into()), RELAY);
        let html = form.render();
        assert!(html.contains(r#"action="https://relay.example.com/inbox" method="POST""#));
        assert!(html.contains(r#"data-sitekey="6Lc-site-key""#));
        assert!(html.contains(WIDGET_SCRIPT));
        assert!(html.contains(r#"<button type="submit" id="contact-submit" disabled>"#));
    }

    #[test]
    fn test_render_without_site_key() {
        let form = ContactForm::new(None, RELAY);
        let html = form.render();
        assert!(!html.contains("g-recaptcha"));
        assert!(!html.contains(WIDGET_SCRIPT));
        assert!(html.contains(r#"<button type="submit" id="contact-submit">Send Message</button>"#));
    }

    #[test]
    fn test_render_follows_verification() {
        let mut form = ContactForm::new(Some("6Lc-site-key".into()), RELAY);
        form.on_verification(Some("token-123"));
        let html = form.render();
        assert!(html.contains(r#"<button type="submit" id="contact-submit">Send Message</button>"#));
        // the callbacks are still emitted so an expiry can disable it again
        assert!(html.contains("function contactExpired()"));

        form.on_verification(None);
        let html = form.render();
        assert!(html.contains(r#"<button type="submit" id="contact-submit" disabled>"#));
    }

    #[test]
    fn test_render_fields() {
        let html = ContactForm::new(None, RELAY).render();
        for name in ["subject", "name", "email", "message"] {
            assert!(html.contains(&format!("name=\"{}\"", name)));
        }
        assert!(html.contains(r#"type="email" placeholder="you@example.com" required"#));
        assert!(html.contains(r#"<textarea id="message" name="message""#));
    }

    #[test]
    fn test_render_escapes_settings() {
        let form = ContactForm::new(Some("k\"><script>".into()), "https://x/?a=1&b=2");
        let html = form.render();
        assert!(html.contains(r#"data-sitekey="k&quot;&gt;&lt;script&gt;""#));
        assert!(html.contains(r#"action="https://x/?a=1&amp;b=2""#));
    }
}
