//! One round trip to an external suggestion source.
//!
//! A run moves through
//! `Idle → AwaitingSource → ParsingResponse → Validating → Accepted | Rejected`.
//! The source is called at most once, its answer is decoded into a
//! [`SuggestionResult`](crate::decode::SuggestionResult), and the placements go
//! through the same [`LayoutValidator`](crate::validate::LayoutValidator) as
//! human submissions before anything is registered.

use std::fmt;
use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use crate::board::LayoutRegistry;
use crate::context::SuggestionContext;
use crate::decode::{decode_suggestion, DecodeError};
use crate::layout::{LayoutCandidate, LayoutId};
use crate::validate::Violation;

/// Creator label given to layouts produced by a suggestion run.
pub const AI_CREATOR: &str = "DormCraft AI";

/// Anything that turns a context payload into a response text.
///
/// The returned future is `Send` so runs can be spawned on a multi-threaded
/// runtime.
pub trait SuggestionSource: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn generate(&self, context: &str) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    AwaitingSource,
    ParsingResponse,
    Validating,
    Accepted,
    Rejected,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PipelineState::Idle => "idle",
            PipelineState::AwaitingSource => "awaiting-source",
            PipelineState::ParsingResponse => "parsing-response",
            PipelineState::Validating => "validating",
            PipelineState::Accepted => "accepted",
            PipelineState::Rejected => "rejected",
        };
        f.write_str(name)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SuggestionError {
    #[error("no layout proposals on the board to build a suggestion from")]
    NoContextAvailable,

    #[error("suggestion source unavailable: {0}")]
    SourceUnavailable(String),

    #[error("malformed suggestion: {reason}")]
    MalformedSuggestion {
        #[source]
        reason: DecodeError,
        /// The raw response, kept for diagnostics.
        raw: String,
    },

    #[error(transparent)]
    Invalid(#[from] Violation),
}

impl SuggestionError {
    /// The state the run was in when it was rejected.
    pub fn stage(&self) -> PipelineState {
        match self {
            SuggestionError::NoContextAvailable => PipelineState::Idle,
            SuggestionError::SourceUnavailable(_) => PipelineState::AwaitingSource,
            SuggestionError::MalformedSuggestion { .. } => PipelineState::ParsingResponse,
            SuggestionError::Invalid(_) => PipelineState::Validating,
        }
    }
}

/// A suggestion that passed validation and joined the board.
#[derive(Debug, Clone, PartialEq)]
pub struct AcceptedSuggestion {
    pub layout_id: LayoutId,
    pub rationale: String,
}

#[derive(Debug, Clone, Default)]
pub struct SuggestionPipeline {
    deadline: Option<Duration>,
}

impl SuggestionPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bounds the source call; expiry counts as the source being unavailable.
    pub fn with_deadline(deadline: Duration) -> Self {
        Self {
            deadline: Some(deadline),
        }
    }

    /// Runs one suggestion round trip against `registry`.
    ///
    /// Nothing is registered unless the decoded layout passes validation.
    #[instrument(skip_all)]
    pub async fn run<R, S>(
        &self,
        registry: &mut R,
        source: &S,
    ) -> Result<AcceptedSuggestion, SuggestionError>
    where
        R: LayoutRegistry,
        S: SuggestionSource,
    {
        let result = self.advance(registry, source).await;
        match &result {
            Ok(accepted) => {
                transition(PipelineState::Validating, PipelineState::Accepted);
                info!(layout_id = %accepted.layout_id, "suggestion accepted");
            }
            Err(err) => {
                transition(err.stage(), PipelineState::Rejected);
                warn!(error = %err, "suggestion rejected");
            }
        }
        result
    }

    async fn advance<R, S>(
        &self,
        registry: &mut R,
        source: &S,
    ) -> Result<AcceptedSuggestion, SuggestionError>
    where
        R: LayoutRegistry,
        S: SuggestionSource,
    {
        if registry.current_layouts().is_empty() {
            return Err(SuggestionError::NoContextAvailable);
        }

        transition(PipelineState::Idle, PipelineState::AwaitingSource);
        let payload = SuggestionContext::from_registry(&*registry).render();
        let raw = self.call_source(source, &payload).await?;

        transition(PipelineState::AwaitingSource, PipelineState::ParsingResponse);
        let suggestion = match decode_suggestion(&raw) {
            Ok(suggestion) => suggestion,
            Err(reason) => return Err(SuggestionError::MalformedSuggestion { reason, raw }),
        };

        transition(PipelineState::ParsingResponse, PipelineState::Validating);
        let candidate = LayoutCandidate::new(AI_CREATOR, suggestion.placements);
        let validated = registry.validator().admit(candidate)?;
        let layout_id = registry.register(validated);

        Ok(AcceptedSuggestion {
            layout_id,
            rationale: suggestion.rationale,
        })
    }

    async fn call_source<S: SuggestionSource>(
        &self,
        source: &S,
        payload: &str,
    ) -> Result<String, SuggestionError> {
        let call = source.generate(payload);
        let response = match self.deadline {
            Some(deadline) => tokio::time::timeout(deadline, call).await.map_err(|_| {
                SuggestionError::SourceUnavailable(format!(
                    "no response within {}s",
                    deadline.as_secs_f64()
                ))
            })?,
            None => call.await,
        };
        response.map_err(|e| SuggestionError::SourceUnavailable(e.to_string()))
    }
}

fn transition(from: PipelineState, to: PipelineState) {
    debug!(%from, %to, "pipeline transition");
}
