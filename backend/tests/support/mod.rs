//! Shared helpers for integration tests.
#![allow(dead_code)]

use std::sync::Mutex;

use availability::db::SqliteConfig;
use tempfile::TempDir;

/// Every test that touches process env goes through this lock.
static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Run `f` with the listed variables set (`Some`) or removed (`None`).
///
/// Previous values are put back on drop, so a failing assertion inside `f`
/// does not leak state into the next test.
pub fn with_scoped_env<F, R>(vars: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _restore = EnvRestore::apply(vars);
    f()
}

struct EnvRestore {
    saved: Vec<(String, Option<String>)>,
}

impl EnvRestore {
    fn apply(vars: &[(&str, Option<&str>)]) -> Self {
        let mut saved: Vec<(String, Option<String>)> = Vec::with_capacity(vars.len());
        for (key, value) in vars {
            if !saved.iter().any(|(k, _)| k == key) {
                saved.push((key.to_string(), std::env::var(key).ok()));
            }
            match value {
                Some(v) => std::env::set_var(key, v),
                None => std::env::remove_var(key),
            }
        }
        Self { saved }
    }
}

impl Drop for EnvRestore {
    fn drop(&mut self) {
        for (key, value) in self.saved.drain(..).rev() {
            match value {
                Some(v) => std::env::set_var(&key, v),
                None => std::env::remove_var(&key),
            }
        }
    }
}

/// A SQLite config pointing at `name` inside a scratch directory.
pub fn scratch_sqlite_config(dir: &TempDir, name: &str) -> SqliteConfig {
    SqliteConfig::with_path(dir.path().join(name).to_string_lossy().to_string())
}
