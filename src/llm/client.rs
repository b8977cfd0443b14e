//! PlanFetcher trait definition

use async_trait::async_trait;

use crate::plan::Plan;
use crate::playback::AudioTrack;

use super::FetchError;

/// A fetched plan plus optional pre-synthesized narration
///
/// Narration is produced by an external TTS collaborator, never here; the
/// stock fetchers return `None` and playback falls back to fixed per-step
/// timers.
#[derive(Debug, Clone)]
pub struct PlanResponse {
    pub plan: Plan,
    pub narration: Option<AudioTrack>,
}

impl PlanResponse {
    pub fn new(plan: Plan) -> Self {
        Self { plan, narration: None }
    }
}

/// Stateless plan fetcher - each call is independent
///
/// The orchestrator invokes this once per submission and tags the in-flight
/// call with the session generation; a late response from a superseded call
/// is discarded on arrival, so implementations need no cancellation support.
#[async_trait]
pub trait PlanFetcher: Send + Sync {
    /// Turn a prompt into a drawing plan
    async fn fetch_plan(&self, prompt: &str) -> Result<PlanResponse, FetchError>;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Mock plan fetcher for unit tests
    ///
    /// Returns a fixed plan or failure, optionally after a virtual-time
    /// delay so tests can observe the Thinking phase.
    pub struct MockPlanFetcher {
        plan: Option<Plan>,
        narration: Option<AudioTrack>,
        failure: Option<String>,
        delay: Duration,
        calls: AtomicUsize,
    }

    impl MockPlanFetcher {
        pub fn ok(plan: Plan) -> Self {
            Self {
                plan: Some(plan),
                narration: None,
                failure: None,
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(message: &str) -> Self {
            Self {
                plan: None,
                narration: None,
                failure: Some(message.to_string()),
                delay: Duration::ZERO,
                calls: AtomicUsize::new(0),
            }
        }

        pub fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn with_narration(mut self, track: AudioTrack) -> Self {
            self.narration = Some(track);
            self
        }

        /// How many times `fetch_plan` was invoked
        pub fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl PlanFetcher for MockPlanFetcher {
        async fn fetch_plan(&self, _prompt: &str) -> Result<PlanResponse, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            if let Some(message) = &self.failure {
                return Err(FetchError::Malformed(message.clone()));
            }
            match &self.plan {
                Some(plan) => Ok(PlanResponse {
                    plan: plan.clone(),
                    narration: self.narration.clone(),
                }),
                None => Err(FetchError::Malformed("no mock plan configured".to_string())),
            }
        }
    }
}
