use std::cell::RefCell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// Transient user-facing banners. Presentation only.
pub trait Notifier {
    fn notify(&self, message: &str, kind: NoticeKind);
}

pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => eprintln!("✓ {}", message),
            NoticeKind::Info => eprintln!("{}", message),
            NoticeKind::Error => eprintln!("Error: {}", message),
        }
    }
}

/// Keeps the latest notice for a status line to draw.
#[derive(Default)]
pub struct StatusLine {
    latest: RefCell<Option<(String, NoticeKind)>>,
}

impl StatusLine {
    pub fn take(&self) -> Option<(String, NoticeKind)> {
        self.latest.borrow_mut().take()
    }
}

impl Notifier for StatusLine {
    fn notify(&self, message: &str, kind: NoticeKind) {
        *self.latest.borrow_mut() = Some((message.to_string(), kind));
    }
}
