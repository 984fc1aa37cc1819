use crate::error::SinkError;
use crate::record::LogEvent;
use crate::sink::{Delivery, LogSink};
use async_trait::async_trait;
use std::io::Write;

/// Writes each event as one JSON line on stdout instead of publishing it.
///
/// Backs `--dry-run`.
#[derive(Clone, Default)]
pub struct StdoutSink {
    /// Prefix each line with the record key and a tab (`--dry-run-keys`),
    /// mirroring what the broker would receive.
    pub with_key: bool,
}

impl StdoutSink {
    pub fn render(&self, event: &LogEvent) -> Result<String, SinkError> {
        let payload = serde_json::to_string(event)?;
        Ok(if self.with_key {
            format!("{}\t{}", event.key(), payload)
        } else {
            payload
        })
    }
}

#[async_trait]
impl LogSink for StdoutSink {
    async fn send(&self, event: &LogEvent) -> Result<Delivery, SinkError> {
        let line = self.render(event)?;
        let mut out = std::io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(Delivery::default())
    }

    async fn flush(&self) -> Result<(), SinkError> {
        std::io::stdout().lock().flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_event;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_render_with_key() {
        let mut rng = StdRng::seed_from_u64(8);
        let event = generate_event(&mut rng);
        let line = StdoutSink { with_key: true }.render(&event).unwrap();
        let (key, payload) = line.split_once('\t').unwrap();
        assert_eq!(key, event.service);
        let parsed: LogEvent = serde_json::from_str(payload).unwrap();
        assert_eq!(parsed.request_id, event.request_id);
    }

    #[test]
    fn test_render_plain_is_single_json_line() {
        let mut rng = StdRng::seed_from_u64(9);
        let event = generate_event(&mut rng);
        let line = StdoutSink::default().render(&event).unwrap();
        assert!(!line.contains('\n'));
        assert!(line.starts_with('{'));
    }
}
