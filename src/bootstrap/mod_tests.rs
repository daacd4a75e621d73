//! Tests for the bootstrapper.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use tempfile::TempDir;

use super::*;
use crate::store::{FileConfigStore, temp_path_for};

const GENERATED: &str = "generated: true\nwhales_evm: []\n";

/// Generator writing fixed content and counting invocations.
#[derive(Debug)]
struct MockGenerator {
    content: Option<&'static str>,
    fail: bool,
    calls: AtomicUsize,
}

impl MockGenerator {
    fn writing(content: &'static str) -> Self {
        Self {
            content: Some(content),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn writing_nothing() -> Self {
        Self {
            content: None,
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            content: None,
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConfigGenerator for MockGenerator {
    async fn generate(&self, target: &Path) -> Result<(), GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GeneratorError::MissingInput { name: "ETH_WS" });
        }
        if let Some(content) = self.content {
            std::fs::write(target, content).unwrap();
        }
        Ok(())
    }
}

fn setup() -> (TempDir, FileConfigStore) {
    let dir = TempDir::new().unwrap();
    let store = FileConfigStore::new(dir.path().join("config.yaml"));
    (dir, store)
}

mod decisions {
    use super::*;

    #[tokio::test]
    async fn generates_once_then_reuses() {
        let (_dir, store) = setup();
        let generator = MockGenerator::writing(GENERATED);
        let bootstrapper = Bootstrapper::new(&store, &generator);

        let first = bootstrapper.prepare(false).await.unwrap();
        let second = bootstrapper.prepare(false).await.unwrap();

        assert_eq!(first.decision, BootstrapDecision::GenerateFresh);
        assert_eq!(second.decision, BootstrapDecision::ReuseExisting);
        assert_eq!(generator.calls(), 1);
        assert_eq!(first.document, second.document);
    }

    #[tokio::test]
    async fn reuse_does_not_touch_existing_file() {
        let (_dir, store) = setup();
        let original = "poll_interval: 15\nwhales_evm:\n- 0xAAA\n";
        std::fs::write(store.location(), original).unwrap();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator)
            .prepare(false)
            .await
            .unwrap();

        assert_eq!(result.decision, BootstrapDecision::ReuseExisting);
        assert_eq!(generator.calls(), 0);
        assert_eq!(std::fs::read_to_string(store.location()).unwrap(), original);
    }

    #[tokio::test]
    async fn force_regenerates_valid_file() {
        let (_dir, store) = setup();
        std::fs::write(store.location(), "old: 1\n").unwrap();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator)
            .prepare(true)
            .await
            .unwrap();

        assert_eq!(result.decision, BootstrapDecision::ForceRegenerate);
        assert_eq!(generator.calls(), 1);
        assert!(result.document.get("old").is_none());
        assert_eq!(std::fs::read_to_string(store.location()).unwrap(), GENERATED);
    }

    #[tokio::test]
    async fn force_replaces_corrupted_file() {
        let (_dir, store) = setup();
        std::fs::write(store.location(), "{{{ not yaml").unwrap();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator)
            .prepare(true)
            .await
            .unwrap();

        assert_eq!(result.document, ConfigDocument::parse(GENERATED).unwrap());
    }

    #[tokio::test]
    async fn force_without_existing_file_generates() {
        let (_dir, store) = setup();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator)
            .prepare(true)
            .await
            .unwrap();

        assert_eq!(result.decision, BootstrapDecision::ForceRegenerate);
        assert_eq!(generator.calls(), 1);
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn malformed_existing_file_is_fatal_and_not_regenerated() {
        let (_dir, store) = setup();
        std::fs::write(store.location(), "- just\n- a list\n").unwrap();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator).prepare(false).await;

        assert!(matches!(
            result,
            Err(BootstrapError::Store(StoreError::Malformed { .. }))
        ));
        assert_eq!(generator.calls(), 0);
        assert_eq!(
            std::fs::read_to_string(store.location()).unwrap(),
            "- just\n- a list\n"
        );
    }

    #[tokio::test]
    async fn generator_failure_is_fatal() {
        let (_dir, store) = setup();
        let generator = MockGenerator::failing();

        let result = Bootstrapper::new(&store, &generator).prepare(false).await;

        assert!(matches!(result, Err(BootstrapError::Generator(_))));
    }

    #[tokio::test]
    async fn generator_leaving_no_file_is_fatal() {
        let (_dir, store) = setup();
        let generator = MockGenerator::writing_nothing();

        let result = Bootstrapper::new(&store, &generator).prepare(false).await;

        assert!(matches!(
            result,
            Err(BootstrapError::Generated(StoreError::Missing { .. }))
        ));
    }

    #[tokio::test]
    async fn generator_writing_garbage_is_fatal() {
        let (_dir, store) = setup();
        let generator = MockGenerator::writing("");

        let result = Bootstrapper::new(&store, &generator).prepare(false).await;

        assert!(matches!(
            result,
            Err(BootstrapError::Generated(StoreError::Malformed { .. }))
        ));
    }

    #[tokio::test]
    async fn unremovable_location_is_fatal_on_force() {
        let dir = TempDir::new().unwrap();
        // A directory at the location cannot be removed as a file.
        let store = FileConfigStore::new(dir.path());
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator).prepare(true).await;

        assert!(matches!(
            result,
            Err(BootstrapError::Store(StoreError::Io { .. }))
        ));
        assert_eq!(generator.calls(), 0);
    }
}

mod recovery {
    use super::*;

    #[tokio::test]
    async fn stale_temp_file_is_removed_and_old_file_reused() {
        let (_dir, store) = setup();
        std::fs::write(store.location(), "poll_interval: 15\n").unwrap();
        let temp = temp_path_for(store.location());
        std::fs::write(&temp, "poll_inter").unwrap();
        let generator = MockGenerator::writing(GENERATED);

        let result = Bootstrapper::new(&store, &generator)
            .prepare(false)
            .await
            .unwrap();

        assert_eq!(result.decision, BootstrapDecision::ReuseExisting);
        assert!(!temp.exists());
        assert_eq!(
            result.document,
            ConfigDocument::parse("poll_interval: 15\n").unwrap()
        );
    }
}
