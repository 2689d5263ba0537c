//! Askama templates for the web frontend.

use askama::Template;

/// The map page: search box, "use my location" button, and the map.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub station_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_renders_controls() {
        let html = IndexTemplate { station_count: 42 }.render().unwrap();
        assert!(html.contains("id=\"search\""));
        assert!(html.contains("id=\"locate\""));
        assert!(html.contains("42 stations"));
    }
}
