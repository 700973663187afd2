//! Details panel — which entry is open and its analysis, if one was requested.
//!
//! Analysis requests run without holding the panel lock. Every state change bumps
//! `generation`; a result is applied only if its ticket still matches, so a slow
//! response can never overwrite a newer panel state.

pub mod handlers;

use crate::models::entry::AnalysisResult;

#[derive(Debug, Default)]
pub struct DetailsPanel {
    entry_id: Option<String>,
    analysis: Option<AnalysisResult>,
    generation: u64,
}

/// Identifies the panel state an analysis request was started from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisTicket {
    entry_id: String,
    generation: u64,
}

impl AnalysisTicket {
    pub fn entry_id(&self) -> &str {
        &self.entry_id
    }
}

impl DetailsPanel {
    pub fn entry_id(&self) -> Option<&str> {
        self.entry_id.as_deref()
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    /// Opens `entry_id`, discarding any previous analysis.
    pub fn open(&mut self, entry_id: impl Into<String>) {
        self.generation += 1;
        self.entry_id = Some(entry_id.into());
        self.analysis = None;
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.entry_id = None;
        self.analysis = None;
    }

    /// Closes the panel if it shows `entry_id`.
    pub fn forget(&mut self, entry_id: &str) {
        if self.entry_id() == Some(entry_id) {
            self.close();
        }
    }

    /// `None` when no entry is open. Supersedes any analysis still in flight.
    pub fn begin_analysis(&mut self) -> Option<AnalysisTicket> {
        let entry_id = self.entry_id.clone()?;
        self.generation += 1;
        Some(AnalysisTicket {
            entry_id,
            generation: self.generation,
        })
    }

    /// Stores `analysis` if `ticket` is still current. Returns whether it was applied.
    pub fn complete_analysis(&mut self, ticket: &AnalysisTicket, analysis: AnalysisResult) -> bool {
        if ticket.generation != self.generation
            || self.entry_id.as_deref() != Some(ticket.entry_id.as_str())
        {
            return false;
        }
        self.analysis = Some(analysis);
        true
    }
}
