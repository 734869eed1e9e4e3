//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p ffstudio-api`. Every test gets its
//! own working directory; the encoder is a shell script standing in for
//! ffmpeg unless a test asks for the real binary.

#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use ffstudio_api::setup::routes;
use ffstudio_api::state::AppState;
use ffstudio_core::Config;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tempfile::TempDir;

/// Copies the first `-i` input to the last argument, like a lossless remux
const COPYING_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version 0.0-fake"
  exit 0
fi
input=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ] && [ -z "$input" ]; then
    input="$arg"
  fi
  prev="$arg"
done
cp "$input" "$prev"
"#;

/// The copying encoder after a one second pause, for requests that are still
/// transcoding when the client goes away
const SLOW_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version 0.0-fake"
  exit 0
fi
sleep 1
input=""
prev=""
for arg in "$@"; do
  if [ "$prev" = "-i" ] && [ -z "$input" ]; then
    input="$arg"
  fi
  prev="$arg"
done
cp "$input" "$prev"
"#;

/// Answers `-version` but fails every job with a diagnostic on stderr
const FAILING_FFMPEG: &str = r#"#!/bin/sh
if [ "$1" = "-version" ]; then
  echo "ffmpeg version 0.0-fake"
  exit 0
fi
echo "Invalid data found when processing input" >&2
exit 1
"#;

/// Which encoder the test app runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoder {
    Copying,
    /// Copies after a one second delay
    Slow,
    Failing,
    Missing,
    /// `ffmpeg` from PATH
    Real,
}

fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).expect("Failed to write fake encoder");
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755))
        .expect("Failed to make fake encoder executable");
    path
}

/// Scripts are written once per test binary, before any of them runs
fn fake_bin_dir() -> &'static PathBuf {
    static BIN_DIR: OnceLock<PathBuf> = OnceLock::new();
    BIN_DIR.get_or_init(|| {
        let dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"))
            .join(format!("ffstudio-fake-bin-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("Failed to create fake bin dir");
        write_script(&dir, "ffmpeg-copy", COPYING_FFMPEG);
        write_script(&dir, "ffmpeg-slow", SLOW_FFMPEG);
        write_script(&dir, "ffmpeg-fail", FAILING_FFMPEG);
        dir
    })
}

fn encoder_path(encoder: Encoder) -> String {
    match encoder {
        Encoder::Copying => fake_bin_dir().join("ffmpeg-copy").display().to_string(),
        Encoder::Slow => fake_bin_dir().join("ffmpeg-slow").display().to_string(),
        Encoder::Failing => fake_bin_dir().join("ffmpeg-fail").display().to_string(),
        Encoder::Missing => "/nonexistent/bin/ffmpeg".to_string(),
        Encoder::Real => "ffmpeg".to_string(),
    }
}

/// Test application: server and its private working directory.
pub struct TestApp {
    pub server: TestServer,
    pub work_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }

    pub fn work_dir(&self) -> &Path {
        self.work_dir.path()
    }

    /// Files currently left in the working directory
    pub fn work_dir_files(&self) -> Vec<PathBuf> {
        std::fs::read_dir(self.work_dir.path())
            .expect("Failed to read work dir")
            .map(|entry| entry.expect("Failed to read dir entry").path())
            .collect()
    }
}

pub fn create_test_config(work_dir: &Path, encoder: Encoder) -> Config {
    Config {
        work_dir: work_dir.to_path_buf(),
        ffmpeg_path: encoder_path(encoder),
        static_dir: PathBuf::from("does-not-exist"),
        ..Config::default()
    }
}

/// Setup test app with the copying fake encoder.
pub fn setup_test_app() -> TestApp {
    setup_test_app_with(Encoder::Copying, |_| {})
}

pub fn setup_test_app_with(encoder: Encoder, customize: impl FnOnce(&mut Config)) -> TestApp {
    let work_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let mut config = create_test_config(work_dir.path(), encoder);
    customize(&mut config);

    let state = AppState::from_config(&config).expect("Failed to build app state");
    let app = routes::setup_routes(&config, state).expect("Failed to setup routes");
    let server = TestServer::new(app.into_make_service()).expect("Failed to create test server");

    TestApp { server, work_dir }
}
