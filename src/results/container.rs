//! Result container for merging per-provider record lists

use super::dedup::dedupe;
use super::types::*;
use crate::error::ProviderError;

/// Outcome of one provider call
#[derive(Debug)]
enum Slot {
    Pending,
    Answered(Vec<SearchRecord>),
    Failed,
}

/// Collects provider outcomes in request order.
///
/// Each provider owns one slot, filled after its call completes, so the
/// merged order depends only on the order slots were opened and never on
/// which provider answered first.
#[derive(Debug)]
pub struct ResultContainer {
    slots: Vec<(String, Slot)>,
    unresponsive: Vec<UnresponsiveEngine>,
    timings: Vec<Timing>,
}

impl ResultContainer {
    /// Open one slot per source, in the order given
    pub fn with_sources<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            slots: sources
                .into_iter()
                .map(|name| (name.into(), Slot::Pending))
                .collect(),
            unresponsive: Vec::new(),
            timings: Vec::new(),
        }
    }

    /// Store a provider's records, tagging each with the slot's source
    pub fn add_results(&mut self, index: usize, mut records: Vec<SearchRecord>, time_ms: u64) {
        let Some((name, slot)) = self.slots.get_mut(index) else {
            return;
        };

        for record in &mut records {
            record.source = name.clone();
        }

        self.timings.push(Timing {
            engine: name.clone(),
            time_ms,
            result_count: records.len(),
        });
        *slot = Slot::Answered(records);
    }

    /// Record a provider failure
    pub fn add_unresponsive(&mut self, index: usize, error: ProviderError) {
        let Some((name, slot)) = self.slots.get_mut(index) else {
            return;
        };

        self.unresponsive.push(UnresponsiveEngine {
            name: name.clone(),
            error,
        });
        *slot = Slot::Failed;
    }

    /// Number of sources with an open slot
    pub fn source_count(&self) -> usize {
        self.slots.len()
    }

    /// Records collected so far, before deduplication
    pub fn raw_count(&self) -> usize {
        self.slots
            .iter()
            .map(|(_, slot)| match slot {
                Slot::Answered(records) => records.len(),
                _ => 0,
            })
            .sum()
    }

    /// Concatenate answered slots in order and deduplicate by link
    pub fn into_result(self) -> AggregationResult {
        let requested = self.slots.len();
        let merged: Vec<SearchRecord> = self
            .slots
            .into_iter()
            .flat_map(|(_, slot)| match slot {
                Slot::Answered(records) => records,
                Slot::Pending | Slot::Failed => Vec::new(),
            })
            .collect();

        AggregationResult {
            records: dedupe(merged),
            unresponsive: self.unresponsive,
            timings: self.timings,
            requested,
        }
    }
}
