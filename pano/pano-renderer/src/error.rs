//! Renderer errors.

use std::fmt;

/// Shader/pipeline build failure. Fatal to the surface: there is nothing to
/// draw with, so creation fails instead of limping on.
#[derive(Clone, Debug)]
pub struct CompileError {
    /// Backend-reported diagnostic text.
    pub log: String,
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "shader compile failed: {}", self.log)
    }
}

impl std::error::Error for CompileError {}

impl From<CompileError> for String {
    fn from(e: CompileError) -> Self {
        e.to_string()
    }
}
