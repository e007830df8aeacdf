pub mod prompt;
pub mod search;
pub mod stats;
pub mod translate;

use crate::output::{CliError, OutputMode, render_error};
use anyhow::Result;
use ramadvisor_core::error::{ErrorCode, KnowledgeError};
use ramadvisor_core::{AdvisorConfig, JsonDirectorySource};
use ramadvisor_search::RetrievalEngine;
use std::fmt;
use std::path::PathBuf;

/// Marks an error that has already been rendered to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reported(pub ErrorCode);

impl fmt::Display for Reported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0.message(), self.0)
    }
}

/// Whether `err` was already rendered by a command.
pub fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<Reported>().is_some()
}

/// Settings shared by every command, resolved once in `main`.
#[derive(Debug, Clone)]
pub struct Context {
    pub config: AdvisorConfig,
    pub data_dir: PathBuf,
    pub output: OutputMode,
}

impl Context {
    pub fn engine(&self) -> RetrievalEngine {
        RetrievalEngine::new(
            JsonDirectorySource::new(&self.data_dir),
            self.config.clone(),
        )
    }

    /// Report a blank query and fail.
    pub fn reject_empty_query(&self, query: &str) -> Result<()> {
        if query.trim().is_empty() {
            render_error(
                self.output,
                &CliError::from_code(ErrorCode::EmptyQuery, "query must not be empty"),
            )?;
            return Err(anyhow::Error::msg(Reported(ErrorCode::EmptyQuery)));
        }
        Ok(())
    }

    /// Initialize `engine`, reporting load failures with their error code.
    pub fn ready(&self, engine: &RetrievalEngine) -> Result<()> {
        if let Err(err) = engine.initialize() {
            let code = err
                .chain()
                .find_map(|cause| cause.downcast_ref::<KnowledgeError>())
                .map_or(ErrorCode::EngineUnavailable, KnowledgeError::code);
            render_error(self.output, &CliError::from_code(code, format!("{err:#}")))?;
            return Err(err.context(Reported(code)));
        }
        Ok(())
    }
}
