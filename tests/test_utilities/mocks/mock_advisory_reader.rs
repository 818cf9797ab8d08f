use cvrf2csaf::prelude::*;
use std::path::Path;

/// Mock AdvisoryReader for testing
pub struct MockAdvisoryReader {
    pub content: String,
    pub should_fail: bool,
}

impl MockAdvisoryReader {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            should_fail: false,
        }
    }

    pub fn from_fixture(name: &str) -> Self {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests/fixtures")
            .join(name);
        Self::new(std::fs::read_to_string(path).unwrap())
    }

    pub fn with_failure() -> Self {
        Self {
            content: String::new(),
            should_fail: true,
        }
    }
}

impl AdvisoryReader for MockAdvisoryReader {
    fn read_advisory(&self, path: &Path) -> Result<String> {
        if self.should_fail {
            anyhow::bail!("Mock read failure for {}", path.display());
        }
        Ok(self.content.clone())
    }
}
