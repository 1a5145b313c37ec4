use serde::{Deserialize, Deserializer, Serialize};

/// Characters of `job_summary` shown before a card truncates or the modal clamps.
pub const SUMMARY_PREVIEW_CHARS: usize = 300;

/// A single ranked search hit as returned by the search backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResult {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: JobFields,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: JobMetadata,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobFields {
    #[serde(deserialize_with = "null_as_default")]
    pub job_title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_summary: String,
    #[serde(deserialize_with = "null_as_default")]
    pub company: String,
    /// Backend quirk: a single element holding a comma-joined skills string.
    #[serde(deserialize_with = "null_as_default")]
    pub job_skills: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub job_location: String,
    #[serde(deserialize_with = "null_as_default")]
    pub city: String,
    #[serde(deserialize_with = "null_as_default")]
    pub state: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_level: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub job_category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_link: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobMetadata {
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: f64,
}

/// The backend writes `null` for fields it has no value for; treat those like absent keys.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl JobResult {
    /// Skills split out of the comma-joined first element, trimmed, empties dropped.
    pub fn skills(&self) -> Vec<&str> {
        split_skills(&self.fields.job_skills)
    }

    /// Relevance score as a rounded percentage.
    pub fn match_percent(&self) -> u32 {
        (self.metadata.score.clamp(0.0, 1.0) * 100.0).round() as u32
    }

    /// Whether the summary is long enough to need a show more / show less control.
    pub fn has_long_summary(&self) -> bool {
        self.fields.job_summary.chars().count() > SUMMARY_PREVIEW_CHARS
    }

    /// Summary cut to the preview length, with `...` appended when it was cut.
    pub fn summary_preview(&self) -> String {
        let summary = &self.fields.job_summary;
        match summary.char_indices().nth(SUMMARY_PREVIEW_CHARS) {
            Some((cut, _)) => format!("{}...", &summary[..cut]),
            None => summary.clone(),
        }
    }

    /// Non-empty link to the original posting, if the backend supplied one.
    pub fn link(&self) -> Option<&str> {
        self.fields
            .job_link
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
    }

    /// Badge colour classes keyed by job level.
    pub fn level_badge_class(&self) -> &'static str {
        match self.fields.job_level.to_lowercase().as_str() {
            "associate" => "bg-green-900 text-green-200",
            "mid senior" => "bg-blue-900 text-blue-200",
            "senior" => "bg-purple-900 text-purple-200",
            _ => "bg-gray-700 text-gray-200",
        }
    }
}

pub fn split_skills(raw: &[String]) -> Vec<&str> {
    match raw.first() {
        Some(joined) => joined
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect(),
        None => Vec::new(),
    }
}

/// Removes every entry whose id equals `origin_id`, keeping rank order.
pub fn without_job(entries: Vec<JobResult>, origin_id: &str) -> Vec<JobResult> {
    entries.into_iter().filter(|j| j.id != origin_id).collect()
}

#[cfg(test)]
pub(crate) fn sample_job(id: &str, title: &str) -> JobResult {
    JobResult {
        id: id.to_string(),
        fields: JobFields {
            job_title: title.to_string(),
            job_summary: format!("{title} summary"),
            company: "Acme".to_string(),
            job_skills: vec!["Python, SQL".to_string()],
            job_location: "New York, NY".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            job_level: "Mid senior".to_string(),
            job_type: "Onsite".to_string(),
            job_category: "Data".to_string(),
            job_link: None,
        },
        metadata: JobMetadata { score: 0.5 },
    }
}
