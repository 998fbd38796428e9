// alerts 模块
// 发往监控通道的告警消息队列：运行期间追加，结束时一次性合并输出

use crate::errors::AppError;

/// Start/end markers delimiting text that must never reach the alert channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreMarkers {
    pub start: String,
    pub end: String,
}

/// Removes every `start…end` span, markers included.
///
/// Markers must alternate start/end without nesting. On a dangling start, a
/// leading unmatched end or a nested start a warning is logged and `text`
/// is returned unchanged. When one marker is a prefix of the other, the
/// longer one wins at a shared offset.
pub fn strip_ignorable_substrings(text: &str, start_marker: &str, end_marker: &str) -> String {
    if start_marker.is_empty() || end_marker.is_empty() {
        tracing::warn!("Ignorable substring markers must not be empty");
        return text.to_string();
    }

    let mut output = String::with_capacity(text.len());
    let mut rest = text;

    loop {
        let next_start = rest.find(start_marker);
        let next_end = rest.find(end_marker);

        match (next_start, next_end) {
            (None, None) => {
                output.push_str(rest);
                return output;
            }
            (Some(s), Some(e)) if s < e || (s == e && start_marker.len() > end_marker.len()) => {
                output.push_str(&rest[..s]);
                let inside = &rest[s + start_marker.len()..];
                let Some(close) = inside.find(end_marker) else {
                    return malformed(text, "dangling start marker");
                };
                if inside[..close].contains(start_marker) {
                    return malformed(text, "nested start marker");
                }
                rest = &inside[close + end_marker.len()..];
            }
            (Some(_), None) => return malformed(text, "dangling start marker"),
            (None, Some(_)) | (Some(_), Some(_)) => {
                return malformed(text, "end marker without matching start")
            }
        }
    }
}

fn malformed(text: &str, reason: &str) -> String {
    tracing::warn!(reason, "Malformed ignorable substring markers, leaving text unchanged");
    text.to_string()
}

/// Collapses runs of identical adjacent messages into `"(Nx) message"`.
pub fn coalesce(messages: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    let mut iter = messages.iter().peekable();

    while let Some(message) = iter.next() {
        let mut run = 1;
        while iter.peek().is_some_and(|next| *next == message) {
            iter.next();
            run += 1;
        }

        if run > 1 {
            out.push(format!("({}x) {}", run, message));
        } else {
            out.push(message.clone());
        }
    }

    out
}

/// Receives flushed alerts.
pub trait AlertSink {
    fn send(&mut self, message: &str) -> Result<(), AppError>;
}

/// Writes every alert as an `info` log event.
#[derive(Debug, Clone, Default)]
pub struct TracingAlertSink {
    pub channel: Option<String>,
}

impl AlertSink for TracingAlertSink {
    fn send(&mut self, message: &str) -> Result<(), AppError> {
        match &self.channel {
            Some(channel) => tracing::info!(channel = %channel, "{}", message),
            None => tracing::info!("{}", message),
        }
        Ok(())
    }
}

/// Collects alerts in memory, used by tests and by callers that forward
/// alerts themselves.
#[derive(Debug, Clone, Default)]
pub struct MemoryAlertSink {
    pub sent: Vec<String>,
}

impl AlertSink for MemoryAlertSink {
    fn send(&mut self, message: &str) -> Result<(), AppError> {
        self.sent.push(message.to_string());
        Ok(())
    }
}

/// 告警队列
///
/// Append-only until flushed. The run driver owns it and lends it to the
/// components that report.
#[derive(Debug, Clone, Default)]
pub struct AlertQueue {
    messages: Vec<String>,
    markers: Option<IgnoreMarkers>,
}

impl AlertQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue that strips `markers` spans from every enqueued message.
    pub fn with_markers(markers: IgnoreMarkers) -> Self {
        Self {
            messages: Vec::new(),
            markers: Some(markers),
        }
    }

    pub fn enqueue(&mut self, message: impl Into<String>) {
        let message = message.into();
        let message = match &self.markers {
            Some(m) => strip_ignorable_substrings(&message, &m.start, &m.end),
            None => message,
        };
        self.messages.push(message);
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Drains the queue and returns its coalesced content.
    pub fn flush(&mut self) -> Vec<String> {
        let drained = std::mem::take(&mut self.messages);
        coalesce(&drained)
    }

    /// Flushes into `sink`, returning how many alerts were delivered.
    pub fn flush_to<S: AlertSink + ?Sized>(&mut self, sink: &mut S) -> Result<usize, AppError> {
        let alerts = self.flush();
        for alert in &alerts {
            sink.send(alert)?;
        }
        Ok(alerts.len())
    }
}
