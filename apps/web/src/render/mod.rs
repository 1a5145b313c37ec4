//! Server-side HTML rendering of the view-state components.
//!
//! Everything that changes after the page loads without touching the backend (the
//! filters panel, the description clamp, the carousel window, opening and closing the
//! details modal) is handled in the browser by `<details>`, CSS and the page script.
//! Only searches, "see more" listings and the similar-jobs fragment hit the server.

pub mod listing;
pub mod modal;
pub mod script;
pub mod search;

use html_escape::encode_double_quoted_attribute;
use url::form_urlencoded;

use crate::ui::{JobDetailsModal, SearchSection, ViewState};

/// The jobs a modal opened from the listing went through: the listing job, then each
/// job picked from a similar-jobs carousel after it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModalPath {
    pub root: String,
    pub trail: Vec<String>,
}

impl ModalPath {
    pub fn new(root: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            trail: Vec::new(),
        }
    }

    /// Id of the job currently shown.
    pub fn current(&self) -> &str {
        self.trail.last().unwrap_or(&self.root)
    }

    pub fn then(&self, job_id: &str) -> Self {
        let mut next = self.clone();
        next.trail.push(job_id.to_string());
        next
    }

    pub fn trail_json(&self) -> String {
        serde_json::to_string(&self.trail).unwrap_or_else(|_| "[]".to_string())
    }
}

fn page_href(pairs: &[(&str, &str)]) -> String {
    let query = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(pairs)
        .finish();
    format!("/?{query}")
}

/// "See more" listing of jobs similar to `job_id`, labelled with its title.
pub fn see_more_href(job_id: &str, title: &str) -> String {
    page_href(&[("similar_to", job_id), ("title", title)])
}

pub fn example_href(index: usize) -> String {
    format!("/?example={index}")
}

/// An explicitly empty query resets the page.
pub fn clear_href() -> String {
    page_href(&[("q", "")])
}

/// Everything the page template needs, borrowed from the request's components.
pub struct PageView<'a> {
    pub state: &'a ViewState,
    pub search: &'a SearchSection,
    /// A modal already open when the page is served, with the path that reached it.
    pub modal: Option<(&'a JobDetailsModal, &'a ModalPath)>,
}

pub fn render_page(view: &PageView<'_>) -> String {
    let mut html = String::new();
    let scroll_locked = view
        .modal
        .is_some_and(|(details, _)| details.locks_background_scroll());
    let body_class = if scroll_locked {
        "min-h-screen bg-gradient-to-br from-gray-900 to-gray-800 overflow-hidden"
    } else {
        "min-h-screen bg-gradient-to-br from-gray-900 to-gray-800"
    };

    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str("<title>AI Job Search</title>\n");
    html.push_str("<script src=\"https://cdn.tailwindcss.com\"></script>\n");
    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body class=\"{}\">\n",
        encode_double_quoted_attribute(body_class)
    ));

    html.push_str(&render_header());
    html.push_str("<main class=\"max-w-7xl mx-auto px-4 sm:px-6 lg:px-8 py-8\">\n");
    html.push_str(&search::render_search_section(
        view.search,
        view.state.is_loading(),
        view.state.has_searched,
    ));
    html.push_str(&listing::render_listing(view.state));
    html.push_str("</main>\n");

    html.push_str(&modal::render_modal_shell(view.modal));

    html.push_str(&render_footer());
    html.push_str(&script::render_page_script());
    html.push_str("</body>\n</html>\n");
    html
}

fn render_header() -> String {
    concat!(
        "<header class=\"bg-gray-800 border-b border-gray-700\">\n",
        "<div class=\"max-w-7xl mx-auto px-4 py-4 flex items-center justify-between\">\n",
        "<a href=\"/\" class=\"text-2xl font-bold text-gray-100\">AI Job Search</a>\n",
        "<span class=\"text-sm text-gray-400\">Semantic job matching</span>\n",
        "</div>\n</header>\n"
    )
    .to_string()
}

fn render_footer() -> String {
    concat!(
        "<footer class=\"border-t border-gray-700 mt-16 py-8 text-center text-sm text-gray-400\">\n",
        "Powered by semantic vector search\n",
        "</footer>\n"
    )
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_links_are_form_encoded() {
        assert_eq!(
            see_more_href("j9", "Data Engineer & Co"),
            "/?similar_to=j9&title=Data+Engineer+%26+Co"
        );
        assert_eq!(example_href(2), "/?example=2");
        assert_eq!(clear_href(), "/?q=");
    }

    #[test]
    fn test_modal_path_trail() {
        let path = ModalPath::new("a").then("b").then("c");
        assert_eq!(path.current(), "c");
        assert_eq!(path.trail_json(), r#"["b","c"]"#);
        assert_eq!(ModalPath::new("a").current(), "a");
        assert_eq!(ModalPath::new("a").trail_json(), "[]");
    }

    #[test]
    fn test_page_carries_script_and_closed_modal_shell() {
        let state = ViewState::default();
        let search = SearchSection::default();
        let html = render_page(&PageView {
            state: &state,
            search: &search,
            modal: None,
        });

        assert!(html.contains("data-modal "));
        assert!(html.contains("data-page-script"));
        assert!(!html.contains("overflow-hidden\">"));
    }
}
