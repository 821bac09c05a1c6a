//! Persistence for finished tests.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};

use crate::test_paper::{SavedTest, TestPayload};

/// Somewhere finished tests can be saved and listed.
pub trait TestStore: Send + Sync {
    /// Store `test` and return it with its assigned ID.
    fn save(&self, test: TestPayload) -> Result<SavedTest>;

    /// All stored tests, oldest first.
    fn list(&self) -> Result<Vec<SavedTest>>;
}

/// One pretty-printed JSON file per test in a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path a saved test is written to.
    pub fn path_for(&self, saved: &SavedTest) -> PathBuf {
        self.dir.join(format!("test-{}.json", saved.id))
    }

    fn load(path: &Path) -> Result<SavedTest> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read test from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("failed to parse test JSON: {}", path.display()))
    }
}

impl TestStore for JsonFileStore {
    fn save(&self, test: TestPayload) -> Result<SavedTest> {
        let saved = SavedTest::new(test);
        std::fs::create_dir_all(&self.dir)
            .with_context(|| format!("failed to create {}", self.dir.display()))?;
        let path = self.path_for(&saved);
        let json = serde_json::to_string_pretty(&saved).context("failed to serialize test")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write test to {}", path.display()))?;
        tracing::info!("saved test {} to {}", saved.id, path.display());
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedTest>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut tests = Vec::new();
        for entry in std::fs::read_dir(&self.dir)
            .with_context(|| format!("failed to read directory: {}", self.dir.display()))?
        {
            let path = entry?.path();
            let is_test_file = path.extension().is_some_and(|ext| ext == "json")
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("test-"));
            if !is_test_file {
                continue;
            }
            match Self::load(&path) {
                Ok(test) => tests.push(test),
                Err(e) => tracing::warn!("skipping {}: {e:#}", path.display()),
            }
        }

        tests.sort_by_key(|t| t.created_at);
        Ok(tests)
    }
}

/// Keeps tests in memory for the lifetime of the process.
#[derive(Default)]
pub struct MemoryStore {
    tests: Mutex<Vec<SavedTest>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TestStore for MemoryStore {
    fn save(&self, test: TestPayload) -> Result<SavedTest> {
        let saved = SavedTest::new(test);
        self.tests
            .lock()
            .map_err(|_| anyhow::anyhow!("test store lock poisoned"))?
            .push(saved.clone());
        Ok(saved)
    }

    fn list(&self) -> Result<Vec<SavedTest>> {
        Ok(self
            .tests
            .lock()
            .map_err(|_| anyhow::anyhow!("test store lock poisoned"))?
            .clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Difficulty, ReviewQuestion};
    use crate::test_paper::TestBuilder;

    fn payload(class_id: &str) -> TestPayload {
        TestBuilder::new(vec![ReviewQuestion {
            text: "What is 2+2?".into(),
            options: vec!["1".into(), "2".into(), "3".into(), "4".into()],
            correct_index: 3,
            difficulty: Difficulty::Easy,
        }])
        .class_id(class_id)
        .build(&[])
        .unwrap()
    }

    #[test]
    fn json_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("tests"));

        let saved = store.save(payload("ClassA")).unwrap();
        assert!(store.path_for(&saved).exists());

        let listed = store.list().unwrap();
        assert_eq!(listed, vec![saved]);
    }

    #[test]
    fn json_store_skips_foreign_and_broken_files() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path());
        store.save(payload("ClassB")).unwrap();
        std::fs::write(dir.path().join("notes.json"), "{}").unwrap();
        std::fs::write(dir.path().join("test-broken.json"), "not json").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].test.class_id, "ClassB");
    }

    #[test]
    fn json_store_missing_dir_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent"));
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn memory_store_keeps_order() {
        let store = MemoryStore::new();
        let first = store.save(payload("ClassA")).unwrap();
        let second = store.save(payload("ClassB")).unwrap();
        let ids: Vec<_> = store.list().unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }
}
