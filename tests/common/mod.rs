#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::{TempDir, tempdir};

/// Scratch directory helper that cleans up files automatically on drop.
pub struct TestWorkspace {
    temp_dir: TempDir,
}

impl TestWorkspace {
    /// Creates a fresh scratch directory for the current test case.
    pub fn new() -> Self {
        Self {
            temp_dir: tempdir().expect("temp dir"),
        }
    }

    /// Returns the root path for all files owned by this workspace.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Writes `contents` into a file under the workspace and returns the path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.temp_dir.path().join(name);
        fs::write(&path, contents).expect("write temp file contents");
        path
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.temp_dir.path().join(name)).expect("read workspace file")
    }

    pub fn file_names(&self) -> Vec<String> {
        let mut names = fs::read_dir(self.path())
            .expect("list workspace")
            .map(|entry| entry.expect("dir entry").file_name().to_string_lossy().to_string())
            .collect::<Vec<_>>();
        names.sort();
        names
    }
}

/// The binary under test with a predictable logging environment.
pub fn sanitize_cmd() -> Command {
    let mut cmd = Command::cargo_bin("sanitize-precision").expect("binary exists");
    cmd.env_remove("RUST_LOG");
    cmd
}

pub fn path_arg(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}
