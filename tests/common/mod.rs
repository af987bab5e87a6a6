// ABOUTME: Common utilities and helpers for integration tests
// ABOUTME: Provides temporary state script trees and a spy executor recording every call

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tempfile::TempDir;

use slsrender::{ExecutionContext, ResultEnvelope, ScriptExecutor};

/// A temporary file root holding state scripts.
pub struct TestFileRoot {
    pub temp_dir: TempDir,
}

impl TestFileRoot {
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Write a script at `relative` (directories are created as needed)
    pub fn write_script(&self, relative: &str, source: &str) -> PathBuf {
        let path = self.temp_dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create script directory");
        }
        std::fs::write(&path, source).expect("Failed to write script");
        path
    }

    pub fn missing(&self, relative: &str) -> PathBuf {
        self.temp_dir.path().join(relative)
    }
}

/// Executor returning a fixed envelope and recording what it was given.
pub struct SpyExecutor {
    envelope: ResultEnvelope,
    calls: AtomicUsize,
    contexts: Mutex<Vec<ExecutionContext>>,
}

impl SpyExecutor {
    pub fn returning(envelope: ResultEnvelope) -> Self {
        Self {
            envelope,
            calls: AtomicUsize::new(0),
            contexts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_context(&self) -> Option<ExecutionContext> {
        self.contexts.lock().unwrap().last().cloned()
    }
}

impl ScriptExecutor for SpyExecutor {
    fn execute(&self, _path: &Path, context: &ExecutionContext) -> ResultEnvelope {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.contexts.lock().unwrap().push(context.clone());
        self.envelope.clone()
    }
}

pub const PACKAGES_SCRIPT: &str = r#"
fn run() {
    #{ "common_packages": #{ "pkg.installed": [#{ "pkgs": ["curl", "vim"] }] } }
}
"#;

pub const S3CMD_SCRIPT: &str = r#"
fn run() {
    let config = #{};
    let user = "root";
    let group = "root";
    let home = "/root/";

    if grains.os == "Ubuntu" {
        user = "ubuntu";
        group = "ubuntu";
        home = `/home/${user}`;
    }

    config["s3cmd"] = #{ "pkg": ["installed", #{ "name": "s3cmd" }] };
    config[home + "/.s3cfg"] = #{
        "file.managed": [
            #{ "source": "salt://s3cfg/templates/s3cfg" },
            #{ "template": "jinja" },
            #{ "user": user },
            #{ "group": group },
            #{ "mode": 600 },
            #{ "context": #{
                "aws_key": pillar.AWS_ACCESS_KEY_ID,
                "aws_secret_key": pillar.AWS_SECRET_ACCESS_KEY
            } }
        ]
    };

    config
}
"#;
