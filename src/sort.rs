use std::cmp::Ordering;

use chrono::{DateTime, Utc};

use crate::models::{JobRecord, SortOrder};
use crate::normalize::posted_at;

/// Undated records go after every dated one, whichever direction.
fn compare_dates(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>, newest_first: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) if newest_first => b.cmp(&a),
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn company_key(job: &JobRecord) -> String {
    job.employer_name.as_deref().unwrap_or("").to_lowercase()
}

/// Stable, in-place ordering of a single page of results.
pub fn sort_jobs(jobs: &mut [JobRecord], order: SortOrder) {
    match order {
        SortOrder::DateDesc | SortOrder::DateAsc => {
            let newest_first = order == SortOrder::DateDesc;
            jobs.sort_by_cached_key(|job| DateKey(posted_at(job), newest_first));
        }
        SortOrder::Company => jobs.sort_by_cached_key(company_key),
    }
}

#[derive(PartialEq, Eq)]
struct DateKey(Option<DateTime<Utc>>, bool);

impl Ord for DateKey {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_dates(self.0, other.0, self.1)
    }
}

impl PartialOrd for DateKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
