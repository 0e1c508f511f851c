/// Sink for human-readable problems found while categorizing. Reports never
/// abort the run on their own.
pub trait Diagnostics {
    fn report(&self, message: &str);
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn report(&self, message: &str) {
        (**self).report(message)
    }
}

/// Default sink: forwards every report to the log as a warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, message: &str) {
        tracing::warn!(target: "diagnostics", "{message}");
    }
}

#[cfg(test)]
pub use recording::RecordingDiagnostics;

#[cfg(test)]
mod recording {
    use parking_lot::Mutex;

    use super::Diagnostics;

    /// Keeps every report in memory so tests can assert on them.
    #[derive(Debug, Default)]
    pub struct RecordingDiagnostics {
        messages: Mutex<Vec<String>>,
    }

    impl RecordingDiagnostics {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn messages(&self) -> Vec<String> {
            self.messages.lock().clone()
        }

        pub fn count(&self) -> usize {
            self.messages.lock().len()
        }
    }

    impl Diagnostics for RecordingDiagnostics {
        fn report(&self, message: &str) {
            self.messages.lock().push(message.to_string());
        }
    }
}
