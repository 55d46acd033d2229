use crate::buffer_diff::BufferDiff;
use crate::config::DiffConfig;
use crate::error::DiffError;

/// Wrapper around text diff operations
pub struct TextDiff;

impl TextDiff {
    /// Create a diff between two texts
    pub fn diff(old_text: &str, new_text: &str) -> Result<BufferDiff, DiffError> {
        BufferDiff::new(old_text, new_text)
    }

    /// Generate a unified diff string (like git diff).
    ///
    /// Uses the algorithm, granularity and size limits of `config`.
    pub fn unified_diff(
        config: &DiffConfig,
        old_text: &str,
        new_text: &str,
        context_lines: usize,
    ) -> Result<String, DiffError> {
        config.check_size(old_text)?;
        config.check_size(new_text)?;

        Ok(config
            .text_diff(old_text, new_text)
            .unified_diff()
            .context_radius(context_lines)
            .header("old", "new")
            .to_string())
    }
}
