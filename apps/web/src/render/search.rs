use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::render::{clear_href, example_href};
use crate::ui::search_section::EXAMPLE_QUERIES;
use crate::ui::SearchSection;

pub fn render_search_section(section: &SearchSection, is_loading: bool, has_searched: bool) -> String {
    let mut html = String::new();

    html.push_str(concat!(
        "<div class=\"text-center mb-12\">\n",
        "<h2 class=\"text-4xl font-bold text-gray-100 mb-4\">Find Your Dream Job with AI</h2>\n",
        "<p class=\"text-xl text-gray-300 mb-8 max-w-3xl mx-auto\">",
        "Describe your ideal position in everyday language and instantly discover the most ",
        "relevant job opportunities.</p>\n",
        "</div>\n"
    ));

    let disabled = if section.can_submit(is_loading) { "" } else { " disabled" };
    let button_label = if is_loading { "Searching..." } else { "Search" };
    let clear = if section.query().is_empty() {
        String::new()
    } else {
        format!(
            "<a href=\"{}\" class=\"px-3 py-2 text-sm text-gray-400 hover:text-gray-200\" data-clear-query>Clear</a>\n",
            encode_double_quoted_attribute(&clear_href())
        )
    };

    html.push_str(&format!(
        concat!(
            "<div class=\"mb-8\">\n",
            "<form method=\"get\" action=\"/\" class=\"max-w-4xl mx-auto\" data-search-form>\n",
            "<div class=\"relative\">\n",
            "<input type=\"text\" name=\"q\" value=\"{query}\" placeholder=\"{placeholder}\" ",
            "class=\"w-full pl-12 pr-32 py-4 text-lg border border-gray-600 bg-gray-800 text-gray-100 rounded-xl\" ",
            "spellcheck=\"false\" autocomplete=\"off\" data-query-input{animated}{readonly}>\n",
            "<div class=\"absolute inset-y-0 right-0 pr-2 flex items-center\">\n",
            "{clear}",
            "<button type=\"submit\" class=\"bg-blue-600 hover:bg-blue-700 disabled:bg-gray-600 text-white font-medium px-6 py-2 rounded-lg\" data-search-submit{disabled}>{label}</button>\n",
            "</div>\n</div>\n</form>\n</div>\n"
        ),
        query = encode_double_quoted_attribute(section.query()),
        placeholder = encode_double_quoted_attribute(&section.initial_placeholder()),
        animated = if section.is_animating() { " data-animate-placeholder" } else { "" },
        readonly = if is_loading { " readonly" } else { "" },
        clear = clear,
        disabled = disabled,
        label = button_label,
    ));

    if !has_searched {
        html.push_str("<div class=\"max-w-4xl mx-auto mb-12\">\n");
        html.push_str("<h3 class=\"text-lg font-semibold text-gray-100 mb-4 text-center\">Try these example searches:</h3>\n");
        html.push_str("<div class=\"flex flex-wrap justify-center gap-3\">\n");
        for (index, example) in EXAMPLE_QUERIES.iter().enumerate() {
            html.push_str(&format!(
                "<a href=\"{}\" class=\"px-4 py-2 bg-gray-800 border border-gray-600 rounded-lg hover:bg-gray-700 text-sm text-gray-200\">{}</a>\n",
                encode_double_quoted_attribute(&example_href(index)),
                encode_text(example)
            ));
        }
        html.push_str("</div>\n</div>\n");
    }

    html
}
