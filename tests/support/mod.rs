//! Shared helpers for CLI integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::cargo::cargo_bin_cmd;
use assert_cmd::Command;
use serde_json::Value;
use tempfile::TempDir;

/// A throwaway home for one CLI test: its own config file and database.
pub struct Workspace {
    dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.path().join("config.toml")
    }

    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("appraisal.db")
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// `appraisal` pointed at this workspace, with no inherited overrides.
    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("appraisal");
        cmd.env_remove("APPRAISAL_DATABASE")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(self.config_path())
            .arg("--db")
            .arg(self.db_path());
        cmd
    }

    /// Run with `--json` and parse the single JSON document printed on stdout.
    pub fn json(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .arg("--json")
            .args(args)
            .output()
            .expect("run appraisal");
        assert!(
            output.status.success(),
            "appraisal {args:?} failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("stdout is one JSON document")
    }
}

/// Id field of a record nested under `key`.
pub fn id_of(value: &Value, key: &str) -> String {
    value[key]["id"].as_i64().expect("record id").to_string()
}
