use std::sync::OnceLock;

use claimcheck_common::observability::{LogConfig, LogFormat};

static INIT_PATH: OnceLock<std::path::PathBuf> = OnceLock::new();

pub fn init_test_tracing() {
    let _ = INIT_PATH.get_or_init(|| {
        let config = LogConfig {
            app_name: "claimcheck-tests",
            log_dir: Some(std::env::temp_dir().join("claimcheck-tests")),
            emit_stderr: true,
            format: std::env::var("CLAIMCHECK_LOG_FORMAT")
                .ok()
                .and_then(|raw| raw.parse::<LogFormat>().ok())
                .unwrap_or_default(),
            default_filter: "debug".to_string(),
        };

        claimcheck_common::observability::init_logging(config).unwrap_or_default()
    });
}
