/// Side-channel for attaching free-form parameters and messages to a
/// scenario's report. Purely observational; the core never reads it back.
pub trait ReportSink: Send {
    fn parameter(&mut self, name: &str, value: &str);
    fn message(&mut self, text: &str);
}

/// Default sink: forwards report entries to the tracing subscriber.
#[derive(Debug, Default)]
pub struct TracingSink;

impl ReportSink for TracingSink {
    fn parameter(&mut self, name: &str, value: &str) {
        tracing::info!(name, value, "report parameter");
    }

    fn message(&mut self, text: &str) {
        tracing::info!("{text}");
    }
}

/// Sink that keeps entries in memory, for tests and post-run inspection.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub parameters: Vec<(String, String)>,
    pub messages: Vec<String>,
}

impl ReportSink for RecordingSink {
    fn parameter(&mut self, name: &str, value: &str) {
        self.parameters.push((name.to_string(), value.to_string()));
    }

    fn message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
