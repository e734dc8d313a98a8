use std::convert::Infallible;
use std::path::Path;

use dormcraft_core::SuggestionSource;

use crate::error::{read_file, ToolError};

/// Serves a recorded model response instead of calling out.
#[derive(Debug, Clone)]
pub struct ReplaySource {
    response: String,
}

impl ReplaySource {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ToolError> {
        Ok(Self::new(read_file(path)?))
    }
}

impl SuggestionSource for ReplaySource {
    type Error = Infallible;

    fn generate(&self, _context: &str) -> impl Future<Output = Result<String, Self::Error>> + Send {
        let response = self.response.clone();
        async move { Ok(response) }
    }
}
