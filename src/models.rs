use clap::ValueEnum;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// Recency filter passed to the remote API as `date_posted`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum DatePosted {
    #[default]
    All,
    Today,
    #[value(name = "3days")]
    ThreeDays,
    Week,
    Month,
}

impl DatePosted {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatePosted::All => "all",
            DatePosted::Today => "today",
            DatePosted::ThreeDays => "3days",
            DatePosted::Week => "week",
            DatePosted::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EmploymentType {
    #[value(name = "fulltime")]
    Fulltime,
    #[value(name = "contractor")]
    Contractor,
    #[value(name = "parttime")]
    Parttime,
    #[value(name = "intern")]
    Intern,
}

impl EmploymentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EmploymentType::Fulltime => "FULLTIME",
            EmploymentType::Contractor => "CONTRACTOR",
            EmploymentType::Parttime => "PARTTIME",
            EmploymentType::Intern => "INTERN",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExperienceLevel {
    #[value(name = "under-3-years")]
    Under3YearsExperience,
    #[value(name = "more-than-3-years")]
    MoreThan3YearsExperience,
    #[value(name = "no-experience")]
    NoExperience,
    #[value(name = "no-degree")]
    NoDegree,
}

impl ExperienceLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExperienceLevel::Under3YearsExperience => "under_3_years_experience",
            ExperienceLevel::MoreThan3YearsExperience => "more_than_3_years_experience",
            ExperienceLevel::NoExperience => "no_experience",
            ExperienceLevel::NoDegree => "no_degree",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum SortOrder {
    #[default]
    #[serde(rename = "date-desc")]
    #[value(name = "date-desc")]
    DateDesc,
    #[serde(rename = "date-asc")]
    #[value(name = "date-asc")]
    DateAsc,
    #[serde(rename = "company")]
    #[value(name = "company")]
    Company,
}

impl SortOrder {
    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::DateDesc => "Newest first",
            SortOrder::DateAsc => "Oldest first",
            SortOrder::Company => "Company A-Z",
        }
    }

    /// Next order in selector order, wrapping around.
    pub fn cycle(&self) -> SortOrder {
        match self {
            SortOrder::DateDesc => SortOrder::DateAsc,
            SortOrder::DateAsc => SortOrder::Company,
            SortOrder::Company => SortOrder::DateDesc,
        }
    }
}

/// Filter fields as entered by the user. Rebuilt for every search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilters {
    pub title: String,
    pub location: String,
    pub posted_within: DatePosted,
    pub remote_only: bool,
    pub employment_type: Option<EmploymentType>,
    pub experience: Option<ExperienceLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequiredExperience {
    #[serde(default, deserialize_with = "lenient")]
    pub no_experience_required: Option<bool>,
}

/// A job as returned by the remote API. Every field may be missing or
/// carry an unexpected type; such values decode as `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub job_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub employer_name: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_city: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_state: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_country: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_is_remote: Option<bool>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_employment_type: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_min_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_max_salary: Option<f64>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_posted_at_datetime_utc: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_posted_at_timestamp: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_description: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_apply_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_google_link: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub job_required_experience: Option<RequiredExperience>,
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| serde_json::from_value(v).ok()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub text: String,
    pub is_remote: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplyLink {
    pub label: String,
    pub url: String,
}

/// Render-ready projection of a [`JobRecord`]. Text here is plain, not
/// escaped: each presenter escapes for its own output medium.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayJob {
    pub title: String,
    pub company: String,
    pub location_label: Option<String>,
    pub posted_label: String,
    pub salary_label: Option<String>,
    pub tags: Vec<Tag>,
    pub description_preview: String,
    pub apply_links: Vec<ApplyLink>,
}
