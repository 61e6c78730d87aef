use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_DIR: &str = "datasets";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TOP_K: usize = 10;

/// Where to read category files from, where to write results, and how many
/// ranked states to keep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    pub base_dir: PathBuf,
    pub output_dir: PathBuf,
    pub top_k: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_BASE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            top_k: DEFAULT_TOP_K,
        }
    }
}

impl PipelineConfig {
    pub fn with_base_dir(mut self, base_dir: impl AsRef<Path>) -> Self {
        self.base_dir = base_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = output_dir.as_ref().to_path_buf();
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.base_dir, PathBuf::from("datasets"));
        assert_eq!(config.top_k, 10);
    }

    #[test]
    fn test_builders() {
        let config = PipelineConfig::default()
            .with_base_dir("/data")
            .with_output_dir("/out")
            .with_top_k(3);
        assert_eq!(config.base_dir, PathBuf::from("/data"));
        assert_eq!(config.output_dir, PathBuf::from("/out"));
        assert_eq!(config.top_k, 3);
    }
}
