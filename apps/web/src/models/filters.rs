//! Detected filters: the structured constraints the backend inferred from a
//! natural-language query, and their normalization into display chips.

use serde::{Deserialize, Serialize};

/// A free-text filter that the backend may send as a string or a list of strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TextValue {
    Text(String),
    List(Vec<String>),
}

impl TextValue {
    /// Display form, or `None` when the value normalizes to empty.
    pub fn normalized(&self) -> Option<String> {
        match self {
            TextValue::Text(s) if !s.trim().is_empty() => Some(s.clone()),
            TextValue::List(items) => {
                let items: Vec<&str> = items
                    .iter()
                    .map(String::as_str)
                    .filter(|s| !s.trim().is_empty())
                    .collect();
                (!items.is_empty()).then(|| items.join(", "))
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectedFilters {
    pub title: Option<TextValue>,
    pub description: Option<TextValue>,
    pub skills: Option<TextValue>,
    pub location: Option<TextValue>,
    pub company: Option<TextValue>,
    pub experience_level: Option<TextValue>,
    pub work_type: Option<TextValue>,
    pub remote_preference: Option<TextValue>,
    pub salary: Option<f64>,

    pub similar_description_weight: Option<f64>,
    pub similar_title_weight: Option<f64>,
    pub similar_skills_weight: Option<f64>,
    pub description_weight: Option<f64>,
    pub title_weight: Option<f64>,
    pub skills_weight: Option<f64>,
    pub limit: Option<u32>,

    pub states_include: Option<Vec<String>>,
    pub states_exclude: Option<Vec<String>>,
    pub search_cities_include: Option<Vec<String>>,
    pub search_cities_exclude: Option<Vec<String>>,
    pub search_countries_include: Option<Vec<String>>,
    pub search_countries_exclude: Option<Vec<String>>,
    pub companies_include: Option<Vec<String>>,
    pub companies_exclude: Option<Vec<String>>,
    pub job_levels_include: Option<Vec<String>>,
    pub job_levels_exclude: Option<Vec<String>>,
    pub job_types_include: Option<Vec<String>>,
    pub job_types_exclude: Option<Vec<String>>,
    pub job_categories_include: Option<Vec<String>>,
    pub job_categories_exclude: Option<Vec<String>>,

    /// Echo of the user's query. Never shown as a chip.
    pub natural_query: Option<String>,
    #[serde(rename = "system_prompt_param__")]
    pub system_prompt_param: Option<String>,
    #[serde(rename = "radius_param__")]
    pub radius_param: Option<f64>,
    #[serde(rename = "select_param__")]
    pub select_param: Option<Vec<String>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipIcon {
    Briefcase,
    Tag,
    MapPin,
    Building,
    Users,
    Dollar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Include,
    Exclude,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterChip {
    Plain {
        icon: ChipIcon,
        label: &'static str,
        value: String,
    },
    Scoped {
        icon: ChipIcon,
        label: &'static str,
        polarity: Polarity,
        values: String,
    },
}

impl FilterChip {
    /// Label as displayed, with `Not ` prefixed on exclusions.
    pub fn display_label(&self) -> String {
        match self {
            FilterChip::Plain { label, .. } => (*label).to_string(),
            FilterChip::Scoped {
                label,
                polarity: Polarity::Include,
                ..
            } => (*label).to_string(),
            FilterChip::Scoped {
                label,
                polarity: Polarity::Exclude,
                ..
            } => format!("Not {label}"),
        }
    }

    pub fn value(&self) -> &str {
        match self {
            FilterChip::Plain { value, .. } => value,
            FilterChip::Scoped { values, .. } => values,
        }
    }
}

fn list_value(values: &Option<Vec<String>>) -> Option<String> {
    values
        .as_ref()
        .and_then(|v| TextValue::List(v.clone()).normalized())
}

impl DetectedFilters {
    /// Free-text and salary chips, in display order.
    pub fn plain_chips(&self) -> Vec<FilterChip> {
        let text_fields: [(ChipIcon, &'static str, &Option<TextValue>); 8] = [
            (ChipIcon::Briefcase, "Job Title", &self.title),
            (ChipIcon::Tag, "Description", &self.description),
            (ChipIcon::Tag, "Skills", &self.skills),
            (ChipIcon::MapPin, "Location", &self.location),
            (ChipIcon::Building, "Company", &self.company),
            (ChipIcon::Users, "Experience Level", &self.experience_level),
            (ChipIcon::Briefcase, "Work Type", &self.work_type),
            (ChipIcon::MapPin, "Remote Preference", &self.remote_preference),
        ];

        let mut chips: Vec<FilterChip> = text_fields
            .into_iter()
            .filter_map(|(icon, label, value)| {
                let value = value.as_ref()?.normalized()?;
                Some(FilterChip::Plain { icon, label, value })
            })
            .collect();

        // 0 is the backend's "no preference" sentinel.
        if let Some(salary) = self.salary.filter(|s| *s != 0.0 && !s.is_nan()) {
            let direction = if salary > 0.0 { "Higher" } else { "Lower" };
            chips.push(FilterChip::Plain {
                icon: ChipIcon::Dollar,
                label: "Salary Preference",
                value: format!("{direction} salary priority"),
            });
        }

        chips
    }

    /// Include/exclude chips, in display order.
    pub fn scoped_chips(&self) -> Vec<FilterChip> {
        let pairs: [(ChipIcon, &'static str, &Option<Vec<String>>, &Option<Vec<String>>); 7] = [
            (ChipIcon::MapPin, "States", &self.states_include, &self.states_exclude),
            (
                ChipIcon::MapPin,
                "Cities",
                &self.search_cities_include,
                &self.search_cities_exclude,
            ),
            (
                ChipIcon::MapPin,
                "Countries",
                &self.search_countries_include,
                &self.search_countries_exclude,
            ),
            (
                ChipIcon::Building,
                "Companies",
                &self.companies_include,
                &self.companies_exclude,
            ),
            (
                ChipIcon::Users,
                "Job Levels",
                &self.job_levels_include,
                &self.job_levels_exclude,
            ),
            (
                ChipIcon::Briefcase,
                "Job Types",
                &self.job_types_include,
                &self.job_types_exclude,
            ),
            (
                ChipIcon::Tag,
                "Job Categories",
                &self.job_categories_include,
                &self.job_categories_exclude,
            ),
        ];

        let mut chips = Vec::new();
        for (icon, label, include, exclude) in pairs {
            for (polarity, values) in [(Polarity::Include, include), (Polarity::Exclude, exclude)] {
                if let Some(values) = list_value(values) {
                    chips.push(FilterChip::Scoped {
                        icon,
                        label,
                        polarity,
                        values,
                    });
                }
            }
        }
        chips
    }

    pub fn chips(&self) -> Vec<FilterChip> {
        let mut chips = self.plain_chips();
        chips.extend(self.scoped_chips());
        chips
    }
}
