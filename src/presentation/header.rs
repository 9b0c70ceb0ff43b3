//
// Copyright (c) 2024 Nathan Fiedler
//
use super::Render;

///
/// Site header: a container pinned to the top of the page that holds the
/// navigation component. It has no state of its own.
///
pub struct Header<N: Render> {
    nav: N,
}

impl<N: Render> Header<N> {
    pub fn new(nav: N) -> Self {
        Self { nav }
    }
}

impl<N: Render> Render for Header<N> {
    fn render(&self) -> String {
        format!(
            "<header class=\"site-header\"><div class=\"site-header__inner\">{}</div></header>",
            self.nav.render()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stub;

    impl Render for Stub {
        fn render(&self) -> String {
            "<nav>stub</nav>".into()
        }
    }

    #[test]
    fn test_header_wraps_nav() {
        let html = Header::new(Stub).render();
        assert_eq!(
            html,
            "<header class=\"site-header\"><div class=\"site-header__inner\"><nav>stub</nav></div></header>"
        );
    }
}
