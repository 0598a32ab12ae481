use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

use crate::client::JobSource;
use crate::escape::{is_safe_link, sanitize_terminal};
use crate::models::{DisplayJob, SearchFilters};
use crate::notify::{NoticeKind, Notifier, StatusLine};
use crate::pagination::PageDirection;
use crate::render::{view, RenderOptions, View};
use crate::session::Session;

struct AppState<'a> {
    session: Session,
    filters: SearchFilters,
    source: &'a dyn JobSource,
    options: RenderOptions,
    status: StatusLine,
    selected: usize,
    scroll_offset: u16,
}

impl<'a> AppState<'a> {
    fn current_view(&self) -> View {
        view(self.session.state(), self.session.display(), self.options)
    }

    fn job_count(&self) -> usize {
        self.session.state().results.len()
    }

    fn next(&mut self) {
        if self.selected + 1 < self.job_count() {
            self.selected += 1;
            self.scroll_offset = 0;
        }
    }

    fn prev(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.scroll_offset = 0;
        }
    }

    fn scroll_down(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_add(3);
    }

    fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(3);
    }

    fn cycle_sort(&mut self) {
        let order = self.session.state().sort_order.cycle();
        self.session.set_sort(order);
        self.selected = 0;
        self.status.notify(&format!("Sorted: {}", order.label()), NoticeKind::Info);
    }
}

pub fn run_browse(
    session: Session,
    filters: SearchFilters,
    source: &dyn JobSource,
    options: RenderOptions,
) -> Result<()> {
    let mut state = AppState {
        session,
        filters,
        source,
        options,
        status: StatusLine::default(),
        selected: 0,
        scroll_offset: 0,
    };

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = run_loop(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

/// Runs one fetch, drawing the Loading screen first. Keys are not read
/// until the fetch settles, so a second search cannot start meanwhile.
fn fetch(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    list_state: &mut ListState,
) -> Result<()> {
    let Ok(pending) = state.session.begin_search(&state.filters) else {
        return Ok(());
    };
    terminal.draw(|frame| draw(frame, state, list_state))?;
    let outcome = state.source.search(&pending.query, &pending.credential);
    state.session.finish_search(pending, outcome);
    state.selected = 0;
    state.scroll_offset = 0;
    Ok(())
}

fn run_loop(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, state: &mut AppState) -> Result<()> {
    let mut list_state = ListState::default();
    fetch(terminal, state, &mut list_state)?;

    loop {
        list_state.select((state.job_count() > 0).then_some(state.selected));
        terminal.draw(|frame| draw(frame, state, &mut list_state))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Down | KeyCode::Char('j') => state.next(),
                KeyCode::Up | KeyCode::Char('k') => state.prev(),
                KeyCode::Char('J') | KeyCode::PageDown => state.scroll_down(),
                KeyCode::Char('K') | KeyCode::PageUp => state.scroll_up(),
                KeyCode::Char('s') => {
                    if matches!(state.current_view(), View::Results { .. }) {
                        state.cycle_sort();
                    }
                }
                KeyCode::Char('r') => fetch(terminal, state, &mut list_state)?,
                KeyCode::Right | KeyCode::Char('n') => page(terminal, state, &mut list_state, PageDirection::Next)?,
                KeyCode::Left | KeyCode::Char('p') => page(terminal, state, &mut list_state, PageDirection::Prev)?,
                _ => {}
            }
        }
    }
    Ok(())
}

fn page(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    list_state: &mut ListState,
    direction: PageDirection,
) -> Result<()> {
    let View::Results { controls, .. } = state.current_view() else {
        return Ok(());
    };
    let allowed = match direction {
        PageDirection::Prev => controls.prev_enabled,
        PageDirection::Next => controls.next_enabled,
    };
    if !allowed {
        state.status.notify("No more pages in that direction", NoticeKind::Info);
        return Ok(());
    }
    if !state.session.step_page(direction) {
        return Ok(());
    }
    fetch(terminal, state, list_state)
}

fn draw(frame: &mut Frame, state: &AppState, list_state: &mut ListState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());

    let current = state.current_view();
    match &current {
        View::Results { summary, jobs, controls } => {
            let chunks = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
                .split(rows[0]);

            // Left panel: job list
            let items: Vec<ListItem> = jobs
                .iter()
                .map(|job| {
                    let title = truncate(&sanitize_terminal(&job.title), 32);
                    ListItem::new(format!("{} | {}", title, sanitize_terminal(&job.company)))
                })
                .collect();

            let list = List::new(items)
                .block(Block::default().borders(Borders::ALL).title(format!(
                    " {} · {} · {} ",
                    summary,
                    controls.sort_order.label(),
                    controls.page_label
                )))
                .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
                .highlight_symbol("> ");
            frame.render_stateful_widget(list, chunks[0], list_state);

            // Right panel: job detail
            let detail = match jobs.get(state.selected) {
                Some(job) => build_detail(job),
                None => Text::raw("No job selected"),
            };
            let detail_widget = Paragraph::new(detail)
                .block(Block::default().borders(Borders::ALL).title(" Detail "))
                .wrap(Wrap { trim: false })
                .scroll((state.scroll_offset, 0));
            frame.render_widget(detail_widget, chunks[1]);
        }
        View::Idle => {
            let idle = Paragraph::new("Press r to search.")
                .block(Block::default().borders(Borders::ALL).title(" Jobs "));
            frame.render_widget(idle, rows[0]);
        }
        View::Loading { page } => {
            let loading = Paragraph::new(format!("Searching page {}...", page))
                .block(Block::default().borders(Borders::ALL).title(" Jobs "));
            frame.render_widget(loading, rows[0]);
        }
        View::Error { message, guidance } => {
            let style = if *guidance {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::Red)
            };
            let error = Paragraph::new(Span::styled(message.clone(), style))
                .block(Block::default().borders(Borders::ALL).title(" Jobs "))
                .wrap(Wrap { trim: true });
            frame.render_widget(error, rows[0]);
        }
    }

    // Footer: latest notice, else key help
    let footer = match state.status.take() {
        Some((message, NoticeKind::Error)) => {
            Paragraph::new(format!(" {}", message)).style(Style::default().fg(Color::Red))
        }
        Some((message, _)) => Paragraph::new(format!(" {}", message)).style(Style::default().fg(Color::Green)),
        None => Paragraph::new(" j/k:navigate  J/K:scroll  s:sort  n/p:page  r:refresh  q:quit")
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(footer, rows[1]);
}

fn build_detail(job: &DisplayJob) -> Text<'static> {
    let mut lines: Vec<Line> = Vec::new();

    lines.push(Line::from(Span::styled(
        sanitize_terminal(&job.title),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(format!("at {}", sanitize_terminal(&job.company))));

    if let Some(location) = &job.location_label {
        lines.push(Line::from(format!("Location: {}", sanitize_terminal(location))));
    }
    lines.push(Line::from(format!("Posted: {}", job.posted_label)));
    if let Some(salary) = &job.salary_label {
        lines.push(Line::from(format!("Pay: {}", salary)));
    }

    if !job.tags.is_empty() {
        let spans: Vec<Span> = job
            .tags
            .iter()
            .flat_map(|tag| {
                let style = if tag.is_remote {
                    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Cyan)
                };
                [Span::styled(format!("[{}]", sanitize_terminal(&tag.text)), style), Span::raw(" ")]
            })
            .collect();
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(""));
    for line in textwrap::fill(&sanitize_terminal(&job.description_preview), 70).lines() {
        lines.push(Line::from(line.to_string()));
    }
    lines.push(Line::from(""));

    for link in job.apply_links.iter().filter(|l| is_safe_link(&l.url)) {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", link.label), Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(sanitize_terminal(&link.url)),
        ]));
    }

    Text::from(lines)
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ApplyLink, Tag};

    fn display_job() -> DisplayJob {
        DisplayJob {
            title: "Platform Engineer".to_string(),
            company: "Acme".to_string(),
            location_label: None,
            posted_label: "Recently".to_string(),
            salary_label: None,
            tags: vec![Tag {
                text: "Remote".to_string(),
                is_remote: true,
            }],
            description_preview: "Keep the lights on.".to_string(),
            apply_links: vec![
                ApplyLink {
                    label: "Apply Now".to_string(),
                    url: "javascript:void(0)".to_string(),
                },
                ApplyLink {
                    label: "View on Google".to_string(),
                    url: "https://google.com".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_build_detail_skips_unsafe_links() {
        let text = build_detail(&display_job());
        let rendered: Vec<String> = text
            .lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        assert_eq!(rendered[0], "Platform Engineer");
        assert!(rendered.iter().any(|l| l == "View on Google: https://google.com"));
        assert!(rendered.iter().all(|l| !l.contains("javascript")));
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("ééééééééééé", 6), "ééé...");
    }
}
