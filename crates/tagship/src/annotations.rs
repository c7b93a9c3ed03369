//! GitHub Actions annotation layer.
//!
//! Prints `::warning::` and `::error::` workflow commands for WARN and ERROR
//! events so recoverable failures surface in the workflow run summary.

use std::fmt::Write as _;
use std::io::Write as _;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::Layer;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::Context;

/// A tracing Layer that writes workflow commands for WARN and ERROR events.
pub struct ActionsAnnotationLayer<W> {
    make_writer: W,
}

impl<W> ActionsAnnotationLayer<W>
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    /// Create a layer writing annotations to `make_writer` (stdout in the CLI).
    pub const fn new(make_writer: W) -> Self {
        Self { make_writer }
    }
}

impl<S, W> Layer<S> for ActionsAnnotationLayer<W>
where
    S: Subscriber,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let level = *event.metadata().level();
        let command = if level == Level::ERROR {
            "error"
        } else if level == Level::WARN {
            "warning"
        } else {
            return;
        };

        let mut visitor = AnnotationVisitor::default();
        event.record(&mut visitor);

        let mut writer = self.make_writer.make_writer();
        let _ = writeln!(writer, "{}", workflow_command(command, &visitor.text()));
    }
}

/// Formats a workflow command, escaping the message.
#[must_use]
pub fn workflow_command(command: &str, message: &str) -> String {
    format!("::{command}::{}", escape_data(message))
}

/// Escapes command data: `%`, CR and LF.
fn escape_data(value: &str) -> String {
    value
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Collects the message and the remaining fields of an event.
#[derive(Default)]
struct AnnotationVisitor {
    message: String,
    fields: String,
}

impl AnnotationVisitor {
    fn text(&self) -> String {
        if self.fields.is_empty() {
            self.message.clone()
        } else if self.message.is_empty() {
            self.fields.clone()
        } else {
            format!("{} ({})", self.message, self.fields)
        }
    }

    fn push_field(&mut self, name: &str, value: &dyn std::fmt::Display) {
        if !self.fields.is_empty() {
            self.fields.push_str(", ");
        }
        let _ = write!(self.fields, "{name}={value}");
    }
}

impl Visit for AnnotationVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.push_field(field.name(), &value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let rendered = format!("{value:?}");
        if field.name() == "message" {
            self.message = rendered;
        } else {
            self.push_field(field.name(), &rendered);
        }
    }
}
