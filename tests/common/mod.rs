use assert_cmd::Command;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Variables the binary reads, cleared so the host environment can't leak into a test.
const ISOLATED_VARS: &[&str] = &[
    "ENCRYPTION_KEY",
    "DATABASE_URL",
    "PREFLIGHT_ENV_FILE",
    "PREFLIGHT_TABLE",
    "RUST_LOG",
];

/// A scratch working directory for one run of the binary.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("create temp dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `.env.local` in the working directory.
    pub fn write_env_local(&self, contents: &str) {
        self.write_file(".env.local", contents);
    }

    pub fn write_file(&self, name: &str, contents: &str) {
        fs::write(self.path().join(name), contents).expect("write env file");
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("api-key-preflight").expect("binary is built");
        cmd.current_dir(self.path());
        for var in ISOLATED_VARS {
            cmd.env_remove(var);
        }
        cmd
    }
}
