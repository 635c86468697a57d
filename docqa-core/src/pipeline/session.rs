//! Session controller
//!
//! Builds the pipeline on first use and caches the outcome for the life of
//! the process. A failed build is never retried.

use super::{Backends, CorpusStats, InitError, Pipeline, PipelineConfig, QueryError, Result};
use crate::generation::Answer;
use crate::providers::gemini::GeminiConfig;
use tokio::sync::OnceCell;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Uninitialized,
    Ready,
    Failed,
}

pub struct Session {
    config: PipelineConfig,
    backends: Option<Backends>,
    pipeline: OnceCell<std::result::Result<Pipeline, InitError>>,
}

impl Session {
    pub fn new(config: PipelineConfig, backends: Backends) -> Self {
        Self {
            config,
            backends: Some(backends),
            pipeline: OnceCell::new(),
        }
    }

    /// A session that failed before it could be built
    pub fn failed(config: PipelineConfig, error: InitError) -> Self {
        Self {
            config,
            backends: None,
            pipeline: OnceCell::new_with(Some(Err(error))),
        }
    }

    /// Gemini-backed session using credentials from the environment
    pub fn from_env(config: PipelineConfig) -> Self {
        match GeminiConfig::from_env().and_then(Backends::gemini) {
            Ok(backends) => Self::new(config, backends),
            Err(e) => {
                debug!(error = %e, "provider configuration failed");
                Self::failed(config, InitError::Provider(e))
            }
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        match self.pipeline.get() {
            None => SessionState::Uninitialized,
            Some(Ok(_)) => SessionState::Ready,
            Some(Err(_)) => SessionState::Failed,
        }
    }

    /// The built pipeline, building it on first call
    pub async fn ready(&self) -> std::result::Result<&Pipeline, &InitError> {
        self.pipeline
            .get_or_init(|| self.initialize())
            .await
            .as_ref()
    }

    async fn initialize(&self) -> std::result::Result<Pipeline, InitError> {
        let backends = self.backends.clone().ok_or(InitError::NoBackends)?;
        let result = Pipeline::build(&self.config, backends).await;
        if let Err(e) = &result {
            debug!(error = %e, "pipeline initialization failed");
        }
        result
    }

    /// Answer one question. Errors leave the session as it was.
    pub async fn ask(&self, question: &str) -> Result<Answer> {
        let pipeline = self
            .ready()
            .await
            .map_err(|e| QueryError::Unavailable(e.to_string()))?;

        pipeline.answer(question).await.inspect_err(|e| {
            debug!(error = %e, "query failed");
        })
    }

    /// Corpus summary once the session is ready
    pub fn stats(&self) -> Option<&CorpusStats> {
        match self.pipeline.get() {
            Some(Ok(pipeline)) => Some(pipeline.stats()),
            _ => None,
        }
    }
}
