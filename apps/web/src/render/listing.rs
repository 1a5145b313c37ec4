use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::models::filters::{ChipIcon, FilterChip, Polarity};
use crate::models::{DetectedFilters, JobResult};
use crate::render::modal::render_job_details;
use crate::ui::{JobDetailsModal, ViewState};

const CARD_SKILL_LIMIT: usize = 8;

/// Error banner, loading indicator and the results area under the search box.
pub fn render_listing(state: &ViewState) -> String {
    let mut html = String::new();

    if let Some(error) = state.error() {
        html.push_str(&format!(
            concat!(
                "<div class=\"max-w-4xl mx-auto mb-8\">",
                "<div class=\"bg-red-900 border border-red-700 rounded-lg p-4\">",
                "<p class=\"text-red-200\">{}</p></div></div>\n"
            ),
            encode_text(error)
        ));
    }

    // Always present so the page script can show it while a submitted search loads.
    html.push_str(&render_loading(state.is_loading()));

    if !state.shows_results_area() {
        return html;
    }

    html.push_str("<div class=\"max-w-6xl mx-auto\" data-results>\n");

    if let Some(filters) = state.response.as_ref().and_then(|r| r.detected_filters()) {
        html.push_str(&render_filters_panel(filters));
    }

    let count = state.results.len();
    if count > 0 {
        html.push_str(&format!(
            concat!(
                "<div class=\"mb-6\"><h3 class=\"text-xl font-semibold text-gray-100 mb-2\">",
                "Found {} job{} matching your search</h3>",
                "<p class=\"text-gray-300\">Results are ranked by relevance to your query</p></div>\n"
            ),
            count,
            if count == 1 { "" } else { "s" }
        ));
    }

    if state.shows_empty_state() {
        html.push_str(concat!(
            "<div class=\"text-center py-12\">\n",
            "<h3 class=\"text-lg font-semibold text-gray-100 mb-2\">No jobs found</h3>\n",
            "<p class=\"text-gray-300 mb-4\">Try adjusting your search terms or make them more general.</p>\n",
            "</div>\n"
        ));
    }

    html.push_str("<div class=\"space-y-6\">\n");
    for job in &state.results {
        html.push_str(&render_job_card(job));
    }
    html.push_str("</div>\n</div>\n");
    html
}

pub fn render_loading(visible: bool) -> String {
    format!(
        concat!(
            "<div class=\"flex flex-col items-center justify-center py-16{}\" role=\"status\" data-loading-indicator>\n",
            "<div class=\"animate-spin rounded-full h-12 w-12 border-4 border-blue-500 border-t-transparent\"></div>\n",
            "<p class=\"mt-4 text-gray-300\">Searching for the best matches...</p>\n",
            "</div>\n"
        ),
        if visible { "" } else { " hidden" }
    )
}

fn icon_class(icon: ChipIcon) -> &'static str {
    match icon {
        ChipIcon::Briefcase => "icon-briefcase",
        ChipIcon::Tag => "icon-tag",
        ChipIcon::MapPin => "icon-map-pin",
        ChipIcon::Building => "icon-building",
        ChipIcon::Users => "icon-users",
        ChipIcon::Dollar => "icon-dollar",
    }
}

fn render_chip(chip: &FilterChip) -> String {
    let (bg, label_class, value_class, icon) = match chip {
        FilterChip::Plain { icon, .. } => ("bg-gray-700", "text-gray-300", "text-gray-100", *icon),
        FilterChip::Scoped {
            icon,
            polarity: Polarity::Include,
            ..
        } => ("bg-green-800", "text-green-200", "text-green-200", *icon),
        FilterChip::Scoped {
            icon,
            polarity: Polarity::Exclude,
            ..
        } => ("bg-red-800", "text-red-200", "text-red-200", *icon),
    };

    format!(
        concat!(
            "<div class=\"flex items-center space-x-2 {bg} px-3 py-2 rounded-lg\" data-chip>",
            "<span class=\"{icon}\"></span>",
            "<span class=\"text-sm {label_class}\">{label}:</span>",
            "<span class=\"text-sm font-medium {value_class}\">{value}</span></div>\n"
        ),
        bg = bg,
        icon = icon_class(icon),
        label_class = label_class,
        label = encode_text(&chip.display_label()),
        value_class = value_class,
        value = encode_text(chip.value()),
    )
}

/// Collapsed `<details>` panel; opening it is a browser toggle, not a request.
pub fn render_filters_panel(filters: &DetectedFilters) -> String {
    let chips = filters.chips();
    if chips.is_empty() {
        return String::new();
    }

    let mut html = String::new();
    html.push_str(concat!(
        "<details class=\"group max-w-6xl mx-auto mb-6 bg-gray-800 border border-gray-700 rounded-lg p-4\" data-filters-panel>",
        "<summary class=\"flex items-center justify-between cursor-pointer list-none\">",
        "<h3 class=\"text-lg font-semibold text-gray-100\">Detected Search Filters</h3>",
        "<span class=\"text-gray-400 group-open:rotate-180\">&#9660;</span></summary>\n",
        "<div class=\"grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-3 mt-4\">\n"
    ));
    for chip in &chips {
        html.push_str(&render_chip(chip));
    }
    html.push_str("</div>\n</details>\n");
    html
}

/// Card plus the details it opens, kept in an inert `<template>` so opening the
/// modal needs no request.
pub fn render_job_card(job: &JobResult) -> String {
    let mut html = String::new();
    let f = &job.fields;

    html.push_str(&format!(
        concat!(
            "<article class=\"bg-gray-800 border border-gray-700 rounded-xl p-6\" data-job-id=\"{id}\">",
            "<div class=\"flex justify-between items-start mb-4\"><div>",
            "<h3 class=\"text-xl font-semibold text-gray-100 mb-2\">{title}</h3>",
            "<div class=\"flex items-center space-x-4 text-sm text-gray-300 mb-3\">",
            "<span>{company}</span><span>{location}</span></div></div>",
            "<span class=\"text-sm font-medium text-green-400\">Match Score: {score}%</span></div>\n"
        ),
        id = encode_double_quoted_attribute(&job.id),
        title = encode_text(&f.job_title),
        company = encode_text(&f.company),
        location = encode_text(&f.job_location),
        score = job.match_percent(),
    ));

    html.push_str(&format!(
        concat!(
            "<div class=\"flex flex-wrap gap-2 mb-4\">",
            "<span class=\"px-3 py-1 rounded-full text-sm capitalize {level_class}\">{level}</span>",
            "<span class=\"px-3 py-1 bg-gray-700 text-gray-300 rounded-full text-sm capitalize\">{job_type}</span>",
            "</div>",
            "<p class=\"text-gray-300 text-sm leading-relaxed mb-4\">{summary}</p>\n"
        ),
        level_class = job.level_badge_class(),
        level = encode_text(&f.job_level),
        job_type = encode_text(&f.job_type),
        summary = encode_text(&job.summary_preview()),
    ));

    html.push_str(&render_skill_chips(&job.skills(), CARD_SKILL_LIMIT));

    html.push_str(&format!(
        concat!(
            "<div class=\"flex justify-end\"><button type=\"button\" data-open-job=\"{id}\" ",
            "class=\"bg-blue-600 hover:bg-blue-700 text-white font-medium px-4 py-2 rounded-lg\">",
            "View Details</button></div>\n",
            "<template data-job-details=\"{id}\">{details}</template></article>\n"
        ),
        id = encode_double_quoted_attribute(&job.id),
        details = render_job_details(&JobDetailsModal::new(job.clone())),
    ));

    html
}

/// Up to `limit` skill chips followed by a "+N more" chip; nothing for no skills.
pub fn render_skill_chips(skills: &[&str], limit: usize) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut html = String::from("<div class=\"flex flex-wrap gap-2 mb-4\">");
    for skill in skills.iter().take(limit) {
        html.push_str(&format!(
            "<span class=\"px-3 py-1 bg-blue-900 text-blue-200 rounded-full text-sm\" data-skill>{}</span>",
            encode_text(skill)
        ));
    }
    if skills.len() > limit {
        html.push_str(&format!(
            "<span class=\"px-3 py-1 bg-gray-700 text-gray-300 rounded-full text-sm\">+{} more</span>",
            skills.len() - limit
        ));
    }
    html.push_str("</div>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::sample_job;
    use crate::models::search::{SearchMetadata, SearchResponse};
    use crate::ui::ResultsStatus;

    fn finished(results: Vec<JobResult>, filters: Option<DetectedFilters>) -> ViewState {
        ViewState {
            query: "analyst".to_string(),
            response: Some(SearchResponse {
                entries: results.clone(),
                metadata: Some(SearchMetadata {
                    search_params: filters,
                    ..Default::default()
                }),
            }),
            results,
            status: ResultsStatus::Success,
            has_searched: true,
            selected: None,
        }
    }

    #[test]
    fn test_empty_results_render_no_jobs_found() {
        let html = render_listing(&finished(vec![], None));
        assert!(html.contains("No jobs found"));
        assert!(!html.contains("bg-red-900"));
    }

    #[test]
    fn test_result_count_heading_pluralizes() {
        let one = render_listing(&finished(vec![sample_job("1", "A")], None));
        assert!(one.contains("Found 1 job matching your search"));

        let two = finished(vec![sample_job("1", "A"), sample_job("2", "B")], None);
        assert!(render_listing(&two).contains("Found 2 jobs matching your search"));
    }

    #[test]
    fn test_error_banner_without_empty_state() {
        let state = ViewState {
            status: ResultsStatus::Error("Search failed. Please try again.".to_string()),
            has_searched: true,
            ..Default::default()
        };
        let html = render_listing(&state);
        assert!(html.contains("Search failed. Please try again."));
        assert!(!html.contains("No jobs found"));
    }

    #[test]
    fn test_loading_hides_results() {
        let mut state = finished(vec![sample_job("1", "A")], None);
        state.status = ResultsStatus::Loading;
        let html = render_listing(&state);
        assert!(html.contains("py-16\" role=\"status\" data-loading-indicator"));
        assert!(!html.contains("data-job-id"));
    }

    #[test]
    fn test_idle_page_keeps_hidden_loading_indicator() {
        let html = render_listing(&finished(vec![sample_job("1", "A")], None));
        assert!(html.contains("py-16 hidden\" role=\"status\" data-loading-indicator"));
        assert!(html.contains("data-results"));
    }

    #[test]
    fn test_filters_panel_is_a_collapsed_details_element() {
        let filters = DetectedFilters {
            states_exclude: Some(vec!["TX".to_string()]),
            natural_query: Some("secret query text".to_string()),
            ..Default::default()
        };
        let html = render_listing(&finished(vec![], Some(filters)));

        assert!(html.contains("<details class=\"group"));
        assert!(!html.contains("<details open"));
        assert!(html.contains("Detected Search Filters"));
        assert_eq!(html.matches("data-chip").count(), 1);
        assert!(html.contains("Not States:"));
        assert!(!html.contains("secret query text"));
        assert!(!html.contains("href=\"/?"), "toggling is not a link");
    }

    #[test]
    fn test_filters_panel_hidden_without_chips() {
        assert!(render_filters_panel(&DetectedFilters::default()).is_empty());
    }

    #[test]
    fn test_card_skills_and_truncation() {
        let mut job = sample_job("1", "Analyst");
        job.fields.job_skills = vec!["A, B, C, D, E, F, G, H, I, J".to_string()];
        job.fields.job_summary = "s".repeat(310);
        let html = render_job_card(&job);

        let card = &html[..html.find("<template").unwrap()];
        assert_eq!(card.matches("data-skill").count(), 8);
        assert!(card.contains("+2 more"));
        assert!(card.contains(&format!("{}...", "s".repeat(300))));
        assert!(card.contains("Match Score: 50%"));
        assert!(card.contains("data-open-job=\"1\""));
    }

    #[test]
    fn test_card_embeds_details_for_client_side_open() {
        let html = render_job_card(&sample_job("1", "Analyst"));
        assert!(html.contains("<template data-job-details=\"1\">"));
        assert!(html.contains("data-carousel-slot"));
        assert!(!html.contains("href=\"/?"));
    }

    #[test]
    fn test_no_skills_no_chip_row() {
        assert!(render_skill_chips(&[], 8).is_empty());
    }
}
