use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stashget::download::marker::marker_path;
use stashget::{DownloaderBuilder, Error, Lifecycle, Task};
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

// Common test constants
pub const TEST_USER_AGENT: &str = "stashget-test-agent";
pub const TEST_LAST_MODIFIED: &str = "Wed, 21 Oct 2015 07:28:00 GMT";

/// Installs a test subscriber, filtered by `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 251) as u8).collect()
}

/// Asserts that a file holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).expect("Failed to read file");
    assert_eq!(content.len(), expected.len(), "File size mismatch at path: {:?}", path);
    assert!(content == expected, "File content mismatch at path: {:?}", path);
}

/// Asserts that the completion marker of `path` exists
pub fn assert_marked(path: &Path) {
    assert!(marker_path(path).exists(), "Marker should exist for {:?}", path);
}

/// Asserts that the completion marker of `path` does not exist
pub fn assert_not_marked(path: &Path) {
    assert!(!marker_path(path).exists(), "Marker should not exist for {:?}", path);
}

/// Builds the URL of `route` on the mock server
pub fn url(server: &MockServer, route: &str) -> String {
    format!("{}{}", server.uri(), route)
}

/// Serves `content` at `route` for both GET and HEAD
pub async fn mount_file(server: &MockServer, route: &str, content: &[u8]) {
    Mock::given(method("HEAD"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Creates a downloader builder for tests, with hidden progress
pub fn test_downloader_builder() -> DownloaderBuilder {
    init_tracing();
    DownloaderBuilder::new().verbose(false)
}

/// Counts hook calls and tracks the peak number of running transfers
#[derive(Debug, Default)]
pub struct TrackingLifecycle {
    pub running: AtomicUsize,
    pub peak: AtomicUsize,
    pub started: AtomicUsize,
    pub stopped: AtomicUsize,
    pub failed: AtomicUsize,
    pub skipped: AtomicUsize,
}

impl TrackingLifecycle {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    pub fn stopped(&self) -> usize {
        self.stopped.load(Ordering::SeqCst)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    pub fn skipped(&self) -> usize {
        self.skipped.load(Ordering::SeqCst)
    }
}

impl Lifecycle for TrackingLifecycle {
    fn before_start(&self, _task: &Task) {
        self.started.fetch_add(1, Ordering::SeqCst);
        let now = self.running.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn on_skip(&self, _task: &Task) {
        self.skipped.fetch_add(1, Ordering::SeqCst);
    }

    fn after_stop(&self, _task: &Task, error: Option<&Error>) {
        self.running.fetch_sub(1, Ordering::SeqCst);
        self.stopped.fetch_add(1, Ordering::SeqCst);
        if error.is_some() {
            self.failed.fetch_add(1, Ordering::SeqCst);
        }
    }
}

/// Serves `body` after a blocking delay while counting requests in flight.
///
/// wiremock responders are synchronous, so the sleep holds the request open
/// on the server side and overlapping requests show up in `peak`.
pub struct InFlightResponder {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
    delay: Duration,
    body: Vec<u8>,
}

impl InFlightResponder {
    pub fn new(peak: Arc<AtomicUsize>, delay: Duration, body: Vec<u8>) -> Self {
        Self {
            current: Arc::new(AtomicUsize::new(0)),
            peak,
            delay,
            body,
        }
    }
}

impl Respond for InFlightResponder {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        self.current.fetch_sub(1, Ordering::SeqCst);
        ResponseTemplate::new(200).set_body_bytes(self.body.clone())
    }
}
