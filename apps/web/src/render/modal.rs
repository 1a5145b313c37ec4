use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::render::listing::render_skill_chips;
use crate::render::{see_more_href, ModalPath};
use crate::ui::carousel::{CarouselStatus, VISIBLE_SLOTS};
use crate::ui::{CarouselSlot, CarouselView, JobDetailsModal, SimilarJobsCarousel};

const CAROUSEL_SKILL_LIMIT: usize = 3;

/// The single modal container. The page script fills it from a job's details
/// template; a modal open at render time (a `?job=` link) is served filled in.
pub fn render_modal_shell(open: Option<(&JobDetailsModal, &ModalPath)>) -> String {
    let (hidden, path_attrs, body) = match open {
        Some((modal, path)) => (
            "",
            format!(
                " data-root=\"{}\" data-trail=\"{}\"",
                encode_double_quoted_attribute(&path.root),
                encode_double_quoted_attribute(&path.trail_json())
            ),
            render_job_details(modal),
        ),
        None => (" hidden", String::new(), String::new()),
    };

    format!(
        concat!(
            "<div class=\"fixed inset-0 bg-black bg-opacity-50 flex items-center justify-center p-4 z-50{hidden}\" ",
            "role=\"dialog\" aria-modal=\"true\" data-modal data-modal-backdrop{path_attrs}>",
            "<div class=\"bg-gray-800 rounded-xl max-w-4xl w-full max-h-[90vh] overflow-y-auto p-6\" data-modal-panel>",
            "<div data-modal-body>{body}</div></div></div>\n"
        ),
        hidden = hidden,
        path_attrs = path_attrs,
        body = body,
    )
}

/// Modal content for one job: header, badges, description, skills, actions and the
/// similar-jobs carousel slot.
pub fn render_job_details(modal: &JobDetailsModal) -> String {
    let job = modal.job();
    let f = &job.fields;
    let mut html = String::new();

    html.push_str(&format!(
        concat!(
            "<div class=\"flex justify-between items-start mb-6\"><div>",
            "<h2 class=\"text-2xl font-bold text-gray-100 mb-2\">{title}</h2>",
            "<div class=\"flex items-center space-x-4 text-gray-300\">",
            "<span>{company}</span><span>{location}</span></div></div>",
            "<button type=\"button\" class=\"text-gray-400 hover:text-gray-200\" aria-label=\"Close\" data-modal-close>&times;</button></div>\n"
        ),
        title = encode_text(&f.job_title),
        company = encode_text(&f.company),
        location = encode_text(&f.job_location),
    ));

    html.push_str(&format!(
        concat!(
            "<div class=\"flex flex-wrap gap-2 mb-6\">",
            "<span class=\"px-3 py-1 bg-green-900 text-green-200 rounded-full text-sm\">{score}% match</span>",
            "<span class=\"px-3 py-1 rounded-full text-sm capitalize {level_class}\">{level}</span>",
            "<span class=\"px-3 py-1 bg-gray-700 text-gray-300 rounded-full text-sm capitalize\">{job_type}</span>",
            "<span class=\"px-3 py-1 bg-gray-700 text-gray-300 rounded-full text-sm capitalize\">{category}</span>",
            "</div>\n"
        ),
        score = job.match_percent(),
        level_class = job.level_badge_class(),
        level = encode_text(&f.job_level),
        job_type = encode_text(&f.job_type),
        category = encode_text(&f.job_category),
    ));

    html.push_str(&render_description(modal));

    let skills = job.skills();
    if !skills.is_empty() {
        html.push_str("<div class=\"mb-6\"><h3 class=\"text-lg font-semibold text-gray-100 mb-3\">Required Skills</h3>");
        html.push_str(&render_skill_chips(&skills, skills.len()));
        html.push_str("</div>\n");
    }

    html.push_str(&format!(
        concat!(
            "<div class=\"flex justify-end space-x-3\">",
            "<button type=\"button\" class=\"px-6 py-2 border border-gray-600 text-gray-300 rounded-lg\" data-modal-close>Close</button>",
            "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" ",
            "class=\"bg-blue-600 hover:bg-blue-700 text-white font-medium px-6 py-2 rounded-lg\">Apply Now</a></div>\n"
        ),
        encode_double_quoted_attribute(&modal.apply_url())
    ));

    let carousel = modal.carousel();
    let loaded = if *carousel.status() == CarouselStatus::Loading {
        ""
    } else {
        " data-loaded=\"true\""
    };
    html.push_str(&format!(
        "<div data-carousel-slot data-origin-id=\"{}\" data-origin-title=\"{}\"{}>{}</div>\n",
        encode_double_quoted_attribute(carousel.origin_id()),
        encode_double_quoted_attribute(&f.job_title),
        loaded,
        render_carousel(carousel, &f.job_title)
    ));
    html
}

/// Long descriptions start clamped; a CSS checkbox flips between clamped and full.
fn render_description(modal: &JobDetailsModal) -> String {
    let summary = encode_text(&modal.job().fields.job_summary);
    let heading = "<h3 class=\"text-lg font-semibold text-gray-100 mb-3\">Job Description</h3>";

    if !modal.has_description_toggle() {
        return format!(
            "<div class=\"mb-6\" data-description>{heading}<div class=\"text-gray-300 whitespace-pre-wrap leading-relaxed\">{summary}</div></div>\n"
        );
    }

    let toggle_id = format!("description-toggle-{}", modal.job().id);
    format!(
        concat!(
            "<div class=\"mb-6\" data-description>{heading}",
            "<input type=\"checkbox\" id=\"{id}\" class=\"peer sr-only\">",
            "<div class=\"text-gray-300 whitespace-pre-wrap leading-relaxed overflow-hidden line-clamp-6 peer-checked:line-clamp-none\">{summary}</div>",
            "<label for=\"{id}\" class=\"mt-3 inline-block cursor-pointer text-blue-400 hover:text-blue-300 text-sm font-medium peer-checked:hidden\">Show more</label>",
            "<label for=\"{id}\" class=\"mt-3 hidden cursor-pointer text-blue-400 hover:text-blue-300 text-sm font-medium peer-checked:inline-block\">Show less</label>",
            "</div>\n"
        ),
        heading = heading,
        id = encode_double_quoted_attribute(&toggle_id),
        summary = summary,
    )
}

/// Every slot is rendered; the page script slides the `VISIBLE_SLOTS` window over
/// them. The "see more" slot hands off to the listing of jobs like `origin_title`.
pub fn render_carousel(carousel: &SimilarJobsCarousel, origin_title: &str) -> String {
    let mut html = String::new();

    match carousel.view() {
        CarouselView::Hidden => return html,
        CarouselView::Loading => {
            html.push_str(concat!(
                "<div class=\"mt-8 pt-6 border-t border-gray-700\">",
                "<h3 class=\"text-lg font-semibold text-gray-100 mb-4\">Similar Jobs</h3>",
                "<div class=\"animate-spin rounded-full h-8 w-8 border-b-2 border-blue-500 mx-auto\"></div></div>\n"
            ));
            return html;
        }
        CarouselView::Failed => {
            html.push_str(concat!(
                "<div class=\"mt-8 pt-6 border-t border-gray-700\">",
                "<p class=\"text-red-200\">Failed to load similar jobs</p></div>\n"
            ));
            return html;
        }
        CarouselView::Ready => {}
    }

    html.push_str(&format!(
        "<div class=\"mt-8 pt-6 border-t border-gray-700\" data-carousel data-index=\"0\" data-max-index=\"{}\" data-visible=\"{}\">",
        carousel.max_index(),
        VISIBLE_SLOTS
    ));
    html.push_str("<div class=\"flex items-center justify-between mb-4\">");
    html.push_str("<h3 class=\"text-lg font-semibold text-gray-100\">Similar Jobs</h3>");
    if carousel.shows_navigation() {
        html.push_str("<div class=\"flex space-x-2\" data-carousel-nav>");
        html.push_str(&nav_button("&lsaquo;", "Previous", -1, carousel.can_go_prev(0)));
        html.push_str(&nav_button("&rsaquo;", "Next", 1, carousel.can_go_next(0)));
        html.push_str("</div>");
    }
    html.push_str("</div>\n");

    html.push_str(&format!("<div class=\"grid grid-cols-{VISIBLE_SLOTS} gap-4\">"));
    for (index, slot) in carousel.slots().into_iter().enumerate() {
        let hidden = if carousel.is_visible(index, 0) { "" } else { " class=\"hidden\"" };
        html.push_str(&format!("<div data-slot-index=\"{index}\"{hidden}>"));
        match slot {
            CarouselSlot::Job(job) => {
                html.push_str(&format!(
                    concat!(
                        "<button type=\"button\" data-select-job=\"{id}\" data-slot=\"job\" ",
                        "class=\"block w-full text-left bg-gray-700 rounded-lg p-4 hover:bg-gray-600\">",
                        "<h4 class=\"font-semibold text-gray-100 mb-1\">{title}</h4>",
                        "<p class=\"text-sm text-gray-300\">{company}</p>",
                        "<p class=\"text-xs text-gray-400 mb-2\">{location}</p>",
                        "<span class=\"px-2 py-1 rounded text-xs {level_class}\">{level}</span>",
                        "{skills}</button>",
                        "<template data-job-details=\"{id}\">{details}</template>"
                    ),
                    id = encode_double_quoted_attribute(&job.id),
                    title = encode_text(&job.fields.job_title),
                    company = encode_text(&job.fields.company),
                    location = encode_text(&job.fields.job_location),
                    level_class = job.level_badge_class(),
                    level = encode_text(&job.fields.job_level),
                    skills = render_skill_chips(&job.skills(), CAROUSEL_SKILL_LIMIT),
                    details = render_job_details(&JobDetailsModal::new(job.clone())),
                ));
            }
            CarouselSlot::SeeMore => {
                html.push_str(&format!(
                    concat!(
                        "<a href=\"{}\" class=\"flex items-center justify-center h-full bg-gray-700 rounded-lg p-4 ",
                        "border-2 border-dashed border-gray-500 text-blue-400\" data-slot=\"see-more\" data-see-more>",
                        "See more similar jobs</a>"
                    ),
                    encode_double_quoted_attribute(&see_more_href(carousel.origin_id(), origin_title))
                ));
            }
        }
        html.push_str("</div>");
    }
    html.push_str("</div>\n");

    if carousel.shows_navigation() {
        html.push_str("<div class=\"flex justify-center mt-4 space-x-2\">");
        for dot in 0..=carousel.max_index() {
            let colour = if dot == 0 { "bg-blue-500" } else { "bg-gray-600" };
            html.push_str(&format!(
                "<button type=\"button\" data-carousel-dot=\"{dot}\" class=\"w-2 h-2 rounded-full {colour}\" aria-label=\"Go to slide {}\"></button>",
                dot + 1
            ));
        }
        html.push_str("</div>\n");
    }

    html.push_str("</div>\n");
    html
}

fn nav_button(glyph: &str, label: &str, step: i8, enabled: bool) -> String {
    format!(
        concat!(
            "<button type=\"button\" data-carousel-step=\"{step}\" aria-label=\"{label}\" ",
            "class=\"p-2 rounded-full bg-gray-700 hover:bg-gray-600 text-gray-200 disabled:opacity-50\"{disabled}>{glyph}</button>"
        ),
        step = step,
        label = label,
        disabled = if enabled { "" } else { " disabled" },
        glyph = glyph,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::BackendError;
    use crate::models::job::sample_job;
    use crate::models::search::SearchResponse;

    fn modal_with_similar(count: usize) -> JobDetailsModal {
        let mut modal = JobDetailsModal::new(sample_job("origin", "Data Analyst"));
        let entries = (0..count)
            .map(|i| sample_job(&format!("s{i}"), "Similar"))
            .collect();
        modal.carousel_mut().apply(Ok(SearchResponse {
            entries,
            metadata: None,
        }));
        modal
    }

    #[test]
    fn test_short_description_has_no_toggle() {
        let modal = modal_with_similar(0);
        let html = render_job_details(&modal);
        assert!(!html.contains("Show more"));
        assert!(!html.contains("data-carousel "), "empty carousel renders nothing");
        assert!(html.contains("https://www.google.com/search?q=Data+Analyst+Acme"));
    }

    #[test]
    fn test_long_description_toggles_in_the_browser() {
        let mut job = sample_job("origin", "Data Analyst");
        job.fields.job_summary = "d".repeat(301);
        let html = render_job_details(&JobDetailsModal::new(job));

        assert!(html.contains("<input type=\"checkbox\" id=\"description-toggle-origin\""));
        assert!(html.contains("line-clamp-6 peer-checked:line-clamp-none"));
        assert!(html.contains("peer-checked:hidden\">Show more</label>"));
        assert!(html.contains("peer-checked:inline-block\">Show less</label>"));
        assert!(!html.contains("href=\"/?"), "no request to toggle");
    }

    #[test]
    fn test_unloaded_carousel_is_marked_for_fetch() {
        let html = render_job_details(&JobDetailsModal::new(sample_job("j1", "Analyst")));
        assert!(html.contains("data-carousel-slot data-origin-id=\"j1\" data-origin-title=\"Analyst\">"));
        assert!(html.contains("animate-spin"));

        let loaded = render_job_details(&modal_with_similar(1));
        assert!(loaded.contains("data-loaded=\"true\""));
    }

    #[test]
    fn test_carousel_renders_every_slot_with_window_hidden_past_three() {
        let two = modal_with_similar(2);
        let html = render_carousel(two.carousel(), "Data Analyst");
        assert!(html.contains("data-carousel "));
        assert!(!html.contains("data-carousel-nav"));
        assert_eq!(html.matches("data-slot-index=").count(), 3);

        let five = modal_with_similar(5);
        let html = render_carousel(five.carousel(), "Data Analyst");
        assert!(html.contains("data-carousel-nav"));
        assert!(html.contains("data-max-index=\"3\" data-visible=\"3\""));
        assert_eq!(html.matches("data-slot-index=").count(), 6);
        assert_eq!(html.matches("data-slot-index=\"3\" class=\"hidden\"").count(), 1);
        assert!(html.contains("data-carousel-step=\"-1\" aria-label=\"Previous\""));
        assert!(html.contains("disabled:opacity-50\" disabled>&lsaquo;"));
        assert_eq!(html.matches("data-carousel-dot=").count(), 4);
        assert!(!html.contains("href=\"/?q"), "sliding never reloads the page");
    }

    #[test]
    fn test_see_more_slot_links_to_similar_listing() {
        let modal = modal_with_similar(1);
        let html = render_carousel(modal.carousel(), "Data Analyst");
        assert!(html.contains("data-slot=\"see-more\""));
        assert!(html.contains("href=\"/?similar_to=origin&amp;title=Data+Analyst\""));
    }

    #[test]
    fn test_carousel_jobs_carry_their_details() {
        let modal = modal_with_similar(1);
        let html = render_carousel(modal.carousel(), "Data Analyst");
        assert!(html.contains("data-select-job=\"s0\""));
        assert!(html.contains("<template data-job-details=\"s0\">"));
    }

    #[test]
    fn test_failed_carousel_notice_only_when_not_silent() {
        let failure = || {
            Err(BackendError::Status {
                status: 500,
                body: String::new(),
            })
        };
        let mut silent = SimilarJobsCarousel::new("origin");
        silent.apply(failure());
        assert!(render_carousel(&silent, "X").is_empty());

        let mut loud = SimilarJobsCarousel::new("origin").with_silent_failures(false);
        loud.apply(failure());
        assert!(render_carousel(&loud, "X").contains("Failed to load similar jobs"));
    }

    #[test]
    fn test_shell_is_hidden_until_opened() {
        let closed = render_modal_shell(None);
        assert!(closed.contains("z-50 hidden\""));
        assert!(closed.contains("<div data-modal-body></div>"));

        let modal = modal_with_similar(1);
        let path = ModalPath::new("root").then("origin");
        let open = render_modal_shell(Some((&modal, &path)));
        assert!(!open.contains("z-50 hidden\""));
        assert!(open.contains("data-root=\"root\" data-trail=\"[&quot;origin&quot;]\""));
        assert!(open.contains(">Data Analyst</h2>"));
    }
}
