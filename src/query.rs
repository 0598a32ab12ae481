use crate::models::SearchFilters;
use crate::pagination::clamp_page;

const DEFAULT_QUERY: &str = "jobs";
const NUM_PAGES: u32 = 1;

/// Parameters for one request to the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub query: String,
    pub page: u32,
    pub num_pages: u32,
    pub date_posted: &'static str,
    pub work_from_home: bool,
    pub employment_types: Option<&'static str>,
    pub job_requirements: Option<&'static str>,
}

impl SearchQuery {
    /// Query pairs in wire order. Unset optional filters are left out.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("query", self.query.clone()),
            ("page", self.page.to_string()),
            ("num_pages", self.num_pages.to_string()),
            ("date_posted", self.date_posted.to_string()),
        ];
        if self.work_from_home {
            params.push(("work_from_home", "true".to_string()));
        }
        if let Some(kind) = self.employment_types {
            params.push(("employment_types", kind.to_string()));
        }
        if let Some(req) = self.job_requirements {
            params.push(("job_requirements", req.to_string()));
        }
        params
    }
}

pub fn query_text(title: &str, location: &str) -> String {
    match (title.trim(), location.trim()) {
        ("", "") => DEFAULT_QUERY.to_string(),
        (title, "") => title.to_string(),
        ("", location) => location.to_string(),
        (title, location) => format!("{} in {}", title, location),
    }
}

pub fn build_query(filters: &SearchFilters, page: u32) -> SearchQuery {
    SearchQuery {
        query: query_text(&filters.title, &filters.location),
        page: clamp_page(page as i64),
        num_pages: NUM_PAGES,
        date_posted: filters.posted_within.as_str(),
        work_from_home: filters.remote_only,
        employment_types: filters.employment_type.map(|t| t.as_str()),
        job_requirements: filters.experience.map(|e| e.as_str()),
    }
}
