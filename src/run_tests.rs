//! Tests for the run module.

use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::*;
use whale_boot::bootstrap::GeneratorError;
use whale_boot::config::Cli;
use whale_boot::notify::{HttpError, HttpRequest, HttpResponse};

const BASE_CONFIG: &str = "\
chains:
  evm:
    rpc_http: https://rpc.example
whales_evm:
  - '0xaaa'
whales_solana: []
thresholds:
  usd_min: 250000
";

/// Generator writing a fixed document and counting calls.
#[derive(Debug, Default)]
struct FixedGenerator {
    calls: AtomicUsize,
}

impl FixedGenerator {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ConfigGenerator for FixedGenerator {
    async fn generate(&self, target: &Path) -> Result<(), GeneratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::fs::write(target, BASE_CONFIG).map_err(|source| GeneratorError::Spawn {
            program: "fixed".to_string(),
            source,
        })
    }
}

/// HTTP client recording request bodies and answering with `status`.
#[derive(Debug)]
struct RecordingClient {
    status: http::StatusCode,
    bodies: Mutex<Vec<String>>,
}

impl RecordingClient {
    fn new(status: http::StatusCode) -> Self {
        Self {
            status,
            bodies: Mutex::new(Vec::new()),
        }
    }

    fn bodies(&self) -> Vec<String> {
        self.bodies.lock().unwrap().clone()
    }
}

impl HttpClient for RecordingClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        let body = String::from_utf8(req.body.unwrap_or_default()).unwrap();
        self.bodies.lock().unwrap().push(body);
        Ok(HttpResponse::new(self.status, Vec::new()))
    }
}

/// HTTP client that can never connect.
#[derive(Debug)]
struct UnreachableClient;

impl HttpClient for UnreachableClient {
    async fn request(&self, _req: HttpRequest) -> Result<HttpResponse, HttpError> {
        Err(HttpError::Connection(Box::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "connection refused",
        ))))
    }
}

fn config_for(path: &Path, extra: &[&str]) -> ValidatedConfig {
    let mut args = vec![
        "whale-boot".to_string(),
        "--config".to_string(),
        path.display().to_string(),
        "--webhook-url".to_string(),
        "https://discord.example/api/webhooks/1/t".to_string(),
    ];
    args.extend(extra.iter().map(ToString::to_string));
    ValidatedConfig::from_cli(&Cli::parse_from_iter(args)).unwrap()
}

fn notifier<H: HttpClient>(client: H, config: &ValidatedConfig) -> Notifier<H> {
    Notifier::new(
        client,
        config.notify_endpoint().map(ToString::to_string),
        Duration::from_secs(1),
    )
}

mod sequence {
    use super::*;

    #[tokio::test]
    async fn first_boot_generates_merges_and_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let generator = FixedGenerator::default();
        let config = config_for(&path, &["--add-whales-evm", "0xBBB, 0xAAA"]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::NO_CONTENT), &config);

        let report = boot(&store, &generator, &notifier, &config).await.unwrap();

        assert_eq!(report.decision, BootstrapDecision::GenerateFresh);
        assert_eq!(report.whales_evm, 2);
        assert_eq!(report.whales_solana, 0);
        assert_eq!(report.added, 1);
        assert!(report.notification.is_sent());
        assert_eq!(generator.calls(), 1);

        let saved = store.load().unwrap();
        let evm = saved.address_set(&ChainKey::evm()).unwrap();
        assert_eq!(evm.as_slice(), ["0xaaa", "0xBBB"]);

        let bodies = notifier.client().bodies();
        assert_eq!(bodies.len(), 1);
        assert!(bodies[0].contains("(generate)"));
        assert!(bodies[0].contains("whales_evm=2"));
        assert!(bodies[0].contains("added 1"));
    }

    #[tokio::test]
    async fn second_boot_reuses_without_generating() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let generator = FixedGenerator::default();
        let config = config_for(&path, &[]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        boot(&store, &generator, &notifier, &config).await.unwrap();
        let before = std::fs::read_to_string(&path).unwrap();
        let report = boot(&store, &generator, &notifier, &config).await.unwrap();

        assert_eq!(report.decision, BootstrapDecision::ReuseExisting);
        assert_eq!(generator.calls(), 1);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), before);
    }

    #[tokio::test]
    async fn force_regenerates_existing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "whales_evm: ['0xold']\n").unwrap();
        let store = FileConfigStore::new(&path);
        let generator = FixedGenerator::default();
        let config = config_for(&path, &["--force-regen"]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        let report = boot(&store, &generator, &notifier, &config).await.unwrap();

        assert_eq!(report.decision, BootstrapDecision::ForceRegenerate);
        assert_eq!(generator.calls(), 1);
        assert!(!std::fs::read_to_string(&path).unwrap().contains("0xold"));
    }
}

mod notification {
    use super::*;

    #[tokio::test]
    async fn unreachable_endpoint_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &[]);
        let notifier = notifier(UnreachableClient, &config);

        let report = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap();

        assert!(matches!(report.notification, NotifyOutcome::Failed(_)));
        assert!(path.exists());
    }

    #[tokio::test]
    async fn server_error_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &[]);
        let notifier = notifier(
            RecordingClient::new(http::StatusCode::INTERNAL_SERVER_ERROR),
            &config,
        );

        let report = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap();

        assert!(matches!(report.notification, NotifyOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn dry_run_does_not_send() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &["--dry-run"]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        let report = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap();

        assert!(matches!(report.notification, NotifyOutcome::Skipped));
        assert!(notifier.client().bodies().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn disabled_notification_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &["--boot-notify", "false"]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        let report = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap();

        assert!(matches!(report.notification, NotifyOutcome::Skipped));
        assert!(notifier.client().bodies().is_empty());
    }

    #[tokio::test]
    async fn disabled_notification_ignores_configured_endpoint() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &["--boot-notify", "false"]);
        let notifier = Notifier::new(
            RecordingClient::new(http::StatusCode::OK),
            Some("https://discord.example/api/webhooks/1/t".to_string()),
            Duration::from_secs(1),
        );

        let report = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap();

        assert!(notifier.is_enabled());
        assert!(matches!(report.notification, NotifyOutcome::Skipped));
        assert!(notifier.client().bodies().is_empty());
    }
}

mod failures {
    use super::*;

    #[tokio::test]
    async fn malformed_existing_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "whales_evm: [unclosed\n").unwrap();
        let store = FileConfigStore::new(&path);
        let generator = FixedGenerator::default();
        let config = config_for(&path, &[]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        let err = boot(&store, &generator, &notifier, &config).await.unwrap_err();

        assert!(matches!(err, RunError::Bootstrap(_)));
        assert_eq!(generator.calls(), 0);
        assert!(notifier.client().bodies().is_empty());
    }

    #[tokio::test]
    async fn malformed_section_fails_merge() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "whales_solana: not-a-list\n").unwrap();
        let store = FileConfigStore::new(&path);
        let config = config_for(&path, &["--add-whales-solana", "So1"]);
        let notifier = notifier(RecordingClient::new(http::StatusCode::OK), &config);

        let err = boot(&store, &FixedGenerator::default(), &notifier, &config)
            .await
            .unwrap_err();

        assert!(matches!(err, RunError::Merge(_)));
        assert!(err.to_string().starts_with("Merge failed"));
    }
}

mod message {
    use super::*;

    #[test]
    fn message_without_additions() {
        let message = boot_message(
            Path::new("/data/config.yaml"),
            BootstrapDecision::ReuseExisting,
            3,
            1,
            0,
        );

        assert_eq!(
            message,
            "whale watcher booting: config=/data/config.yaml (reuse), whales_evm=3, whales_solana=1"
        );
    }

    #[test]
    fn message_with_additions() {
        let message = boot_message(
            Path::new("/data/config.yaml"),
            BootstrapDecision::ForceRegenerate,
            2,
            0,
            2,
        );

        assert!(message.ends_with("whales_solana=0, added 2"));
        assert!(message.contains("(force)"));
    }

    #[test]
    fn malformed_section_counts_zero() {
        let document = ConfigDocument::parse("whales_evm: 5\n").unwrap();

        assert_eq!(watched(&document, &ChainKey::evm()), 0);
    }
}
