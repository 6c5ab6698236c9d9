//! Test helper functions for integration tests
//!
//! Shared across test files using the tests/common/ pattern.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Once;

/// Initialize logging for tests (only once per test run)
static INIT: Once = Once::new();

pub fn init_test_logging() {
    INIT.call_once(|| {
        // Use tracing subscriber for tests since the catalog uses tracing
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let _ = tracing_subscriber::registry()
            .with(
                tracing_subscriber::fmt::layer()
                    .with_test_writer()
                    .with_target(true)
                    .with_level(true),
            )
            .with(tracing_subscriber::filter::EnvFilter::from_default_env())
            .try_init();
    });
}

/// Directory holding the fixture spell lists
pub fn sources_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sources")
}

/// Path of a fixture spell list by class name (e.g. "wizard")
pub fn source(class: &str) -> PathBuf {
    sources_dir().join(format!("{class}.csv"))
}
