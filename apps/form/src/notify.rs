/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
}

/// Toast-style notification sink. The form controller reports every
/// outcome through this trait instead of owning a global toast singleton.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, description: &str, kind: NoticeKind);
}

/// Routes notices to `tracing`; useful for headless runs.
#[derive(Debug, Default, Clone)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, title: &str, description: &str, kind: NoticeKind) {
        match kind {
            NoticeKind::Success => tracing::info!("{title}: {description}"),
            NoticeKind::Error => tracing::warn!("{title}: {description}"),
        }
    }
}
