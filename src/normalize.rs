use chrono::{DateTime, Utc};

use crate::models::{ApplyLink, DisplayJob, JobRecord, Tag};

pub const MAX_DESCRIPTION_LENGTH: usize = 200;
const ELLIPSIS: &str = "...";

/// Treats empty and whitespace-only strings as missing.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

/// Posting instant, from the ISO timestamp or, failing that, the Unix one.
pub fn posted_at(job: &JobRecord) -> Option<DateTime<Utc>> {
    present(&job.job_posted_at_datetime_utc)
        .and_then(|s| DateTime::parse_from_rfc3339(s.trim()).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            job.job_posted_at_timestamp
                .and_then(|ts| DateTime::from_timestamp(ts, 0))
        })
}

pub fn posted_label(job: &JobRecord) -> String {
    match posted_at(job) {
        Some(dt) => dt.format("%-m/%-d/%Y").to_string(),
        None => "Recently".to_string(),
    }
}

pub fn location_label(job: &JobRecord) -> Option<String> {
    match (present(&job.job_city), present(&job.job_state)) {
        (Some(city), Some(state)) => Some(format!("{}, {}", city, state)),
        _ => present(&job.job_country).map(str::to_string),
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// US dollars, whole units, thousands separated.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{}${}", sign, group_thousands(rounded.abs() as u64))
}

pub fn salary_label(job: &JobRecord) -> Option<String> {
    let usable = |v: Option<f64>| v.filter(|n| n.is_finite() && *n != 0.0);
    let min = usable(job.job_min_salary)?;
    let max = usable(job.job_max_salary)?;
    Some(format!("{} - {}", format_usd(min), format_usd(max)))
}

pub fn tags(job: &JobRecord) -> Vec<Tag> {
    let mut tags = Vec::new();
    if let Some(kind) = present(&job.job_employment_type) {
        tags.push(Tag {
            text: kind.to_string(),
            is_remote: false,
        });
    }
    if job.job_is_remote == Some(true) {
        tags.push(Tag {
            text: "Remote".to_string(),
            is_remote: true,
        });
    }
    let experience_required = job
        .job_required_experience
        .as_ref()
        .and_then(|e| e.no_experience_required)
        == Some(false);
    if experience_required {
        tags.push(Tag {
            text: "Experience Required".to_string(),
            is_remote: false,
        });
    }
    tags
}

pub fn description_preview(description: Option<&str>, max_len: usize) -> String {
    let Some(text) = description.filter(|s| !s.trim().is_empty()) else {
        return "No description available".to_string();
    };
    match text.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &text[..cut], ELLIPSIS),
        None => text.to_string(),
    }
}

pub fn apply_links(job: &JobRecord) -> Vec<ApplyLink> {
    [
        ("Apply Now", &job.job_apply_link),
        ("View on Google", &job.job_google_link),
    ]
    .into_iter()
    .filter_map(|(label, url)| {
        present(url).map(|url| ApplyLink {
            label: label.to_string(),
            url: url.trim().to_string(),
        })
    })
    .collect()
}

pub fn normalize(job: &JobRecord) -> DisplayJob {
    normalize_with(job, MAX_DESCRIPTION_LENGTH)
}

pub fn normalize_with(job: &JobRecord, max_description: usize) -> DisplayJob {
    DisplayJob {
        title: present(&job.job_title)
            .unwrap_or("Untitled Position")
            .to_string(),
        company: present(&job.employer_name)
            .unwrap_or("Unknown Company")
            .to_string(),
        location_label: location_label(job),
        posted_label: posted_label(job),
        salary_label: salary_label(job),
        tags: tags(job),
        description_preview: description_preview(present(&job.job_description), max_description),
        apply_links: apply_links(job),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequiredExperience;

    #[test]
    fn test_fallback_labels() {
        let display = normalize(&JobRecord::default());
        assert_eq!(display.title, "Untitled Position");
        assert_eq!(display.company, "Unknown Company");
        assert_eq!(display.location_label, None);
        assert_eq!(display.posted_label, "Recently");
        assert_eq!(display.salary_label, None);
        assert!(display.tags.is_empty());
        assert_eq!(display.description_preview, "No description available");
        assert!(display.apply_links.is_empty());
    }

    #[test]
    fn test_empty_employer_is_unknown() {
        let job = JobRecord {
            employer_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(normalize(&job).company, "Unknown Company");
    }

    #[test]
    fn test_location_label_rules() {
        let mut job = JobRecord {
            job_city: Some("Austin".to_string()),
            job_state: Some("TX".to_string()),
            job_country: Some("US".to_string()),
            ..Default::default()
        };
        assert_eq!(location_label(&job).as_deref(), Some("Austin, TX"));

        // City without state falls back to country
        job.job_state = None;
        assert_eq!(location_label(&job).as_deref(), Some("US"));

        job.job_country = None;
        assert_eq!(location_label(&job), None);
    }

    #[test]
    fn test_salary_label() {
        let job = JobRecord {
            job_min_salary: Some(50000.0),
            job_max_salary: Some(90000.0),
            ..Default::default()
        };
        assert_eq!(salary_label(&job).as_deref(), Some("$50,000 - $90,000"));
    }

    #[test]
    fn test_salary_label_needs_both_bounds() {
        let job = JobRecord {
            job_min_salary: Some(50000.0),
            ..Default::default()
        };
        assert_eq!(salary_label(&job), None);

        let zero = JobRecord {
            job_min_salary: Some(0.0),
            job_max_salary: Some(90000.0),
            ..Default::default()
        };
        assert_eq!(salary_label(&zero), None);
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.4), "$0");
        assert_eq!(format_usd(999.0), "$999");
        assert_eq!(format_usd(1000.0), "$1,000");
        assert_eq!(format_usd(123456.7), "$123,457");
        assert_eq!(format_usd(1_250_000.0), "$1,250,000");
        assert_eq!(format_usd(-2500.0), "-$2,500");
    }

    #[test]
    fn test_tags_in_order() {
        let job = JobRecord {
            job_employment_type: Some("FULLTIME".to_string()),
            job_is_remote: Some(true),
            job_required_experience: Some(RequiredExperience {
                no_experience_required: Some(false),
            }),
            ..Default::default()
        };
        let tags = tags(&job);
        let texts: Vec<&str> = tags.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["FULLTIME", "Remote", "Experience Required"]);
        assert!(!tags[0].is_remote);
        assert!(tags[1].is_remote);
    }

    #[test]
    fn test_experience_tag_only_when_explicitly_required() {
        let mut job = JobRecord {
            job_required_experience: Some(RequiredExperience {
                no_experience_required: Some(true),
            }),
            ..Default::default()
        };
        assert!(tags(&job).is_empty());

        job.job_required_experience = Some(RequiredExperience::default());
        assert!(tags(&job).is_empty());
    }

    #[test]
    fn test_description_preview_lengths() {
        let exact = "a".repeat(200);
        assert_eq!(description_preview(Some(&exact), 200), exact);

        let long = "b".repeat(201);
        let preview = description_preview(Some(&long), 200);
        assert_eq!(preview, format!("{}...", "b".repeat(200)));
        assert_eq!(preview.chars().count(), 203);

        assert_eq!(description_preview(Some("short"), 200), "short");
        assert_eq!(description_preview(None, 200), "No description available");
    }

    #[test]
    fn test_description_preview_multibyte() {
        let text = "é".repeat(250);
        let preview = description_preview(Some(&text), 200);
        assert!(preview.starts_with(&"é".repeat(200)));
        assert_eq!(preview.chars().count(), 203);
    }

    #[test]
    fn test_posted_label_formats() {
        let mut job = JobRecord {
            job_posted_at_datetime_utc: Some("2024-03-05T14:30:00.000Z".to_string()),
            ..Default::default()
        };
        assert_eq!(posted_label(&job), "3/5/2024");

        job.job_posted_at_datetime_utc = Some("not a date".to_string());
        assert_eq!(posted_label(&job), "Recently");

        // Unix timestamp fallback: 2024-01-15T00:00:00Z
        job.job_posted_at_timestamp = Some(1_705_276_800);
        assert_eq!(posted_label(&job), "1/15/2024");
    }

    #[test]
    fn test_apply_links() {
        let job = JobRecord {
            job_apply_link: Some("https://acme.example/apply".to_string()),
            job_google_link: Some("https://www.google.com/search?q=acme".to_string()),
            ..Default::default()
        };
        let links = apply_links(&job);
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].label, "Apply Now");
        assert_eq!(links[1].label, "View on Google");

        let only_google = JobRecord {
            job_google_link: Some("https://www.google.com/search?q=x".to_string()),
            ..Default::default()
        };
        let links = apply_links(&only_google);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].label, "View on Google");
    }
}
