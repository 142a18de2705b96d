use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_path(prefix: &str) -> PathBuf {
    let now_ns = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    std::env::temp_dir().join(format!("liftlog_{prefix}_{}_{}", std::process::id(), now_ns))
}

pub fn remove_dir_if_exists(path: &Path) {
    let _ = std::fs::remove_dir_all(path);
}

pub fn apply_backend_test_env(command: &mut Command, api_base_url: &str, log_dir: &Path) {
    command.env("API_BASE_URL", api_base_url);
    command.env("REQUEST_TIMEOUT_MS", "2000");
    command.env("RUST_LOG", "error");
    command.env("LIFTLOG_FILE_LOG", "error");
    command.env("LIFTLOG_LOG_DIR", log_dir.as_os_str());
}
