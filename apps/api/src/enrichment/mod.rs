//! Enrichment — metadata for new entries and on-demand synopsis analysis.
//!
//! Both operations are infallible: any failure (no API key, transport error,
//! bad status, unparseable payload) resolves to the fixed fallback in
//! [`fallback`] and is logged at `warn`. Callers never branch on errors.
//!
//! `AppState` holds an `Arc<dyn Enricher>`; tests swap in a stub.

use async_trait::async_trait;
use tracing::warn;

use crate::llm_client::prompts::{DISPLAY_LANGUAGE_INSTRUCTION, JSON_ONLY_SYSTEM};
use crate::llm_client::LlmClient;
use crate::models::entry::{AnalysisResult, EntryMetadata};

pub mod fallback;
pub mod prompts;

use prompts::{
    analysis_prompt, analysis_schema, metadata_prompt, metadata_schema, ANALYSIS_SYSTEM,
    METADATA_SYSTEM,
};

#[async_trait]
pub trait Enricher: Send + Sync {
    /// One metadata request for `title`. Returns the fallback on any failure.
    async fn fetch_metadata(&self, title: &str) -> EntryMetadata;

    /// One analysis request for the synopsis. Returns the fallback on any failure.
    async fn analyze(&self, title: &str, synopsis: &str) -> AnalysisResult;
}

/// Gemini-backed enricher. All calls go through the shared [`LlmClient`].
pub struct GeminiEnricher {
    llm: LlmClient,
    metadata_system: String,
    analysis_system: String,
}

impl GeminiEnricher {
    pub fn new(llm: LlmClient) -> Self {
        Self {
            llm,
            metadata_system: system_prompt(METADATA_SYSTEM),
            analysis_system: system_prompt(ANALYSIS_SYSTEM),
        }
    }
}

fn system_prompt(role: &str) -> String {
    format!("{role} {JSON_ONLY_SYSTEM} {DISPLAY_LANGUAGE_INSTRUCTION}")
}

#[async_trait]
impl Enricher for GeminiEnricher {
    async fn fetch_metadata(&self, title: &str) -> EntryMetadata {
        let result = self
            .llm
            .call_json::<EntryMetadata>(
                &metadata_prompt(title),
                &self.metadata_system,
                &metadata_schema(),
            )
            .await;

        match result {
            Ok(metadata) => metadata,
            Err(e) => {
                warn!("Metadata generation failed for {title:?}, using fallback: {e}");
                fallback::metadata()
            }
        }
    }

    async fn analyze(&self, title: &str, synopsis: &str) -> AnalysisResult {
        let result = self
            .llm
            .call_json::<AnalysisResult>(
                &analysis_prompt(title, synopsis),
                &self.analysis_system,
                &analysis_schema(),
            )
            .await;

        match result {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Analysis failed for {title:?}, using fallback: {e}");
                fallback::analysis()
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    /// Canned enricher that counts its calls.
    pub struct StubEnricher {
        metadata: EntryMetadata,
        analysis: AnalysisResult,
        metadata_calls: AtomicUsize,
        analysis_calls: AtomicUsize,
    }

    impl StubEnricher {
        pub fn new(metadata: EntryMetadata) -> Self {
            Self {
                metadata,
                analysis: AnalysisResult {
                    psychological_profile: "主角处于高度警觉状态。".to_string(),
                    visual_motifs: vec!["沙漠".to_string(), "香料".to_string()],
                    risk_assessment: "高".to_string(),
                },
                metadata_calls: AtomicUsize::new(0),
                analysis_calls: AtomicUsize::new(0),
            }
        }

        pub fn metadata_calls(&self) -> usize {
            self.metadata_calls.load(Ordering::SeqCst)
        }

        pub fn analysis_calls(&self) -> usize {
            self.analysis_calls.load(Ordering::SeqCst)
        }

        pub fn analysis(&self) -> &AnalysisResult {
            &self.analysis
        }
    }

    #[async_trait]
    impl Enricher for StubEnricher {
        async fn fetch_metadata(&self, _title: &str) -> EntryMetadata {
            self.metadata_calls.fetch_add(1, Ordering::SeqCst);
            self.metadata.clone()
        }

        async fn analyze(&self, _title: &str, _synopsis: &str) -> AnalysisResult {
            self.analysis_calls.fetch_add(1, Ordering::SeqCst);
            self.analysis.clone()
        }
    }
}
