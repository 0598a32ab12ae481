use std::io::{self, Write};

use crate::config::Config;
use crate::escape::{escape_html, is_safe_link, sanitize_terminal};
use crate::models::{DisplayJob, SortOrder};
use crate::normalize::normalize_with;
use crate::notify::NoticeKind;
use crate::pagination::{has_next_page, has_prev_page};
use crate::session::{DisplayState, SearchState};

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub page_size: usize,
    pub max_description_length: usize,
}

impl From<&Config> for RenderOptions {
    fn from(config: &Config) -> Self {
        Self {
            page_size: config.page_size,
            max_description_length: config.max_description_length,
        }
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions::from(&Config::default())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Controls {
    pub sort_order: SortOrder,
    pub page: u32,
    pub page_label: String,
    pub prev_enabled: bool,
    /// Estimated from page fullness, not from a reported total.
    pub next_enabled: bool,
}

/// Everything a presenter needs, with no presentation decisions made yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Idle,
    Loading { page: u32 },
    Error { message: String, guidance: bool },
    Results {
        summary: String,
        jobs: Vec<DisplayJob>,
        controls: Controls,
    },
}

impl View {
    /// The failure or guidance message, for outputs that do not print the view itself.
    pub fn notice(&self) -> Option<(&str, NoticeKind)> {
        match self {
            View::Error { message, guidance } => {
                let kind = if *guidance { NoticeKind::Info } else { NoticeKind::Error };
                Some((message.as_str(), kind))
            }
            _ => None,
        }
    }
}

pub fn results_summary(count: usize, page: u32) -> String {
    let plural = if count == 1 { "" } else { "s" };
    format!("Found {} job{} on page {}", count, plural, page)
}

/// Projects the session onto a view. Display jobs are derived fresh each call.
pub fn view(state: &SearchState, display: &DisplayState, options: RenderOptions) -> View {
    match display {
        DisplayState::Idle => View::Idle,
        DisplayState::Loading => View::Loading {
            page: state.current_page,
        },
        DisplayState::Error(err) => View::Error {
            message: err.to_string(),
            guidance: err.is_guidance(),
        },
        DisplayState::Results => {
            let count = state.results.len();
            View::Results {
                summary: results_summary(count, state.current_page),
                jobs: state
                    .results
                    .iter()
                    .map(|job| normalize_with(job, options.max_description_length))
                    .collect(),
                controls: Controls {
                    sort_order: state.sort_order,
                    page: state.current_page,
                    page_label: format!("Page {}", state.current_page),
                    prev_enabled: has_prev_page(state.current_page),
                    next_enabled: has_next_page(state.current_page, count, options.page_size),
                },
            }
        }
    }
}

// --- Terminal cards ---

pub struct TextPresenter {
    pub width: usize,
}

impl Default for TextPresenter {
    fn default() -> Self {
        Self { width: 80 }
    }
}

impl TextPresenter {
    pub fn present(&self, view: &View, out: &mut dyn Write) -> io::Result<()> {
        match view {
            View::Idle => writeln!(out, "Enter a search to get started."),
            View::Loading { page } => writeln!(out, "Searching page {}...", page),
            View::Error { message, guidance } => {
                if *guidance {
                    writeln!(out, "{}", message)
                } else {
                    writeln!(out, "Error: {}", message)
                }
            }
            View::Results {
                summary,
                jobs,
                controls,
            } => {
                writeln!(out, "{}  (sorted: {})", summary, controls.sort_order.label())?;
                writeln!(out, "{}", "-".repeat(self.width.min(84)))?;
                for (i, job) in jobs.iter().enumerate() {
                    self.present_card(i + 1, job, out)?;
                }
                let prev = if controls.prev_enabled {
                    format!("prev: --page {}", controls.page - 1)
                } else {
                    "prev: -".to_string()
                };
                let next = if controls.next_enabled {
                    format!("next: --page {}", controls.page + 1)
                } else {
                    "next: -".to_string()
                };
                writeln!(out, "{}  [{} | {}]", controls.page_label, prev, next)
            }
        }
    }

    pub fn card_lines(&self, index: usize, job: &DisplayJob) -> Vec<String> {
        let mut lines = Vec::new();
        lines.push(format!("[{}] {}", index, sanitize_terminal(&job.title)));
        lines.push(format!("    {}", sanitize_terminal(&job.company)));

        let mut meta = Vec::new();
        if let Some(location) = &job.location_label {
            meta.push(sanitize_terminal(location));
        }
        meta.push(job.posted_label.clone());
        if let Some(salary) = &job.salary_label {
            meta.push(salary.clone());
        }
        lines.push(format!("    {}", meta.join(" · ")));

        if !job.tags.is_empty() {
            let tags: Vec<String> = job
                .tags
                .iter()
                .map(|t| {
                    let text = sanitize_terminal(&t.text);
                    if t.is_remote {
                        format!("<{}>", text)
                    } else {
                        format!("[{}]", text)
                    }
                })
                .collect();
            lines.push(format!("    {}", tags.join(" ")));
        }

        let options = textwrap::Options::new(self.width.max(20))
            .initial_indent("    ")
            .subsequent_indent("    ");
        let description = sanitize_terminal(&job.description_preview).replace('\n', " ");
        for line in textwrap::fill(&description, options).lines() {
            lines.push(line.to_string());
        }

        for link in job.apply_links.iter().filter(|l| is_safe_link(&l.url)) {
            lines.push(format!("    {}: {}", link.label, sanitize_terminal(&link.url)));
        }
        lines
    }

    fn present_card(&self, index: usize, job: &DisplayJob, out: &mut dyn Write) -> io::Result<()> {
        for line in self.card_lines(index, job) {
            writeln!(out, "{}", line)?;
        }
        writeln!(out)
    }
}

// --- HTML export ---

pub struct HtmlPresenter;

impl HtmlPresenter {
    pub fn present(&self, view: &View) -> String {
        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
        html.push_str("<title>Job search results</title>\n</head>\n<body>\n");

        match view {
            View::Idle => html.push_str("<p class=\"idle\">Enter a search to get started.</p>\n"),
            View::Loading { page } => {
                html.push_str(&format!("<p class=\"loading\">Searching page {}...</p>\n", page));
            }
            View::Error { message, guidance } => {
                let class = if *guidance { "notice" } else { "error" };
                html.push_str(&format!("<p class=\"{}\">{}</p>\n", class, escape_html(message)));
            }
            View::Results {
                summary,
                jobs,
                controls,
            } => {
                html.push_str(&format!("<p class=\"results-info\">{}</p>\n", escape_html(summary)));
                html.push_str("<div class=\"jobs\">\n");
                for job in jobs {
                    self.card(job, &mut html);
                }
                html.push_str("</div>\n");
                html.push_str(&format!(
                    "<nav class=\"pagination\"><span class=\"prev{}\">Previous</span> <span class=\"page-info\">{}</span> <span class=\"next{}\">Next</span></nav>\n",
                    if controls.prev_enabled { "" } else { " disabled" },
                    escape_html(&controls.page_label),
                    if controls.next_enabled { "" } else { " disabled" },
                ));
            }
        }

        html.push_str("</body>\n</html>\n");
        html
    }

    fn card(&self, job: &DisplayJob, html: &mut String) {
        html.push_str("<div class=\"job-card\">\n");
        html.push_str(&format!("<h3 class=\"job-title\">{}</h3>\n", escape_html(&job.title)));
        html.push_str(&format!("<p class=\"job-company\">{}</p>\n", escape_html(&job.company)));

        html.push_str("<div class=\"job-meta\">");
        if let Some(location) = &job.location_label {
            html.push_str(&format!("<span class=\"job-meta-item\">{}</span>", escape_html(location)));
        }
        html.push_str(&format!("<span class=\"job-meta-item\">{}</span>", escape_html(&job.posted_label)));
        if let Some(salary) = &job.salary_label {
            html.push_str(&format!("<span class=\"job-meta-item\">{}</span>", escape_html(salary)));
        }
        html.push_str("</div>\n");

        if !job.tags.is_empty() {
            html.push_str("<div class=\"job-tags\">");
            for tag in &job.tags {
                let class = if tag.is_remote { "job-tag remote" } else { "job-tag" };
                html.push_str(&format!("<span class=\"{}\">{}</span>", class, escape_html(&tag.text)));
            }
            html.push_str("</div>\n");
        }

        html.push_str(&format!(
            "<div class=\"job-description\">{}</div>\n",
            escape_html(&job.description_preview)
        ));

        html.push_str("<div class=\"job-actions\">");
        for link in job.apply_links.iter().filter(|l| is_safe_link(&l.url)) {
            html.push_str(&format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\" class=\"btn-apply\">{}</a>",
                escape_html(&link.url),
                escape_html(&link.label)
            ));
        }
        html.push_str("</div>\n</div>\n");
    }
}
