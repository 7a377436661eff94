use crate::error::Rejection;
use std::sync::Mutex;

/// Receives rejected lines on behalf of the caller.
pub trait DiagnosticSink {
    fn rejected(&self, rejection: &Rejection);
}

impl<F> DiagnosticSink for F
where
    F: Fn(&Rejection),
{
    fn rejected(&self, rejection: &Rejection) {
        self(rejection)
    }
}

/// Emits one `warn` event per rejected line.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn rejected(&self, rejection: &Rejection) {
        tracing::warn!(
            kind = %rejection.kind(),
            line = %rejection.line,
            reason = %rejection.reason,
            "Skipping journey line"
        );
    }
}

/// Drops every rejection.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn rejected(&self, _rejection: &Rejection) {}
}

/// Keeps every rejection in arrival order.
#[derive(Debug, Default)]
pub struct CollectingSink {
    rejections: Mutex<Vec<Rejection>>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_rejections(self) -> Vec<Rejection> {
        self.rejections
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl DiagnosticSink for CollectingSink {
    fn rejected(&self, rejection: &Rejection) {
        let mut rejections = self
            .rejections
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        rejections.push(rejection.clone());
    }
}
