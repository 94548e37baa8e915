//! Completed-interview reporting.
//!
//! Finalized (or torn-down) interviews are forwarded to a sink as snapshots.
//! Snapshots never carry connection handles, so a sink structurally cannot
//! observe transport identities. Recording is fire-and-forget: a sink must
//! not fail the operation that triggered it.

use parking_lot::Mutex;

use crate::models::InterviewSnapshot;

/// Receives finished interviews.
pub trait OutcomeSink: Send + Sync {
    /// Record one interview. Fire-and-forget.
    fn record(&self, interview: &InterviewSnapshot);
}

/// Sink that emits one structured log event per interview.
#[derive(Debug, Default)]
pub struct TracingSink;

impl OutcomeSink for TracingSink {
    fn record(&self, interview: &InterviewSnapshot) {
        tracing::info!(
            id = interview.id,
            status = %interview.status,
            packet = interview.packet.as_deref(),
            outcome = interview.outcome.map(|o| o.as_str()),
            "interview recorded"
        );
    }
}

/// Sink that buffers snapshots in memory, for tests and local inspection.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<InterviewSnapshot>>,
}

impl MemorySink {
    /// All snapshots recorded so far, in order.
    pub fn records(&self) -> Vec<InterviewSnapshot> {
        self.records.lock().clone()
    }
}

impl OutcomeSink for MemorySink {
    fn record(&self, interview: &InterviewSnapshot) {
        self.records.lock().push(interview.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Interview;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::default();

        sink.record(&Interview::new(1).snapshot());
        sink.record(&Interview::new(2).snapshot());

        let ids: Vec<u64> = sink.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
