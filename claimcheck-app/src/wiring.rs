use crate::cli::Cli;
use anyhow::Result;
use claimcheck_checker::{ClaimChecker, StalePolicy};
use claimcheck_common::{ClaimcheckError, observability::LogConfig};
use claimcheck_config::{
    ClaimcheckConfig, ClaimcheckConfigLoader, DEFAULT_CONFIG_FILE, StalePolicySetting,
};
use claimcheck_detect::DetectClient;
use std::sync::Arc;
use std::time::Duration;

/// File and environment first, then command-line overrides.
pub fn load_config(cli: &Cli) -> Result<ClaimcheckConfig> {
    let loader = match &cli.config {
        Some(path) => ClaimcheckConfigLoader::new().with_file(path),
        None => ClaimcheckConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
    };
    let mut cfg = loader.load()?;
    apply_overrides(&mut cfg, cli);
    validate(&cfg)?;
    Ok(cfg)
}

fn apply_overrides(cfg: &mut ClaimcheckConfig, cli: &Cli) {
    if let Some(url) = &cli.base_url {
        cfg.service.base_url = url.clone();
    }
    if let Some(secs) = cli.timeout_secs {
        cfg.service.timeout_secs = secs;
    }
    if let Some(policy) = cli.stale_policy {
        cfg.checker.stale_policy = policy.into();
    }
}

fn validate(cfg: &ClaimcheckConfig) -> Result<(), ClaimcheckError> {
    if cfg.service.base_url.trim().is_empty() {
        return Err(ClaimcheckError::Config("service.base_url is empty".into()));
    }
    if cfg.service.timeout_secs == 0 {
        return Err(ClaimcheckError::Config(
            "service.timeout_secs must be at least 1".into(),
        ));
    }
    Ok(())
}

pub fn log_config(cfg: &ClaimcheckConfig, interactive: bool) -> LogConfig {
    LogConfig {
        app_name: "claimcheck",
        log_dir: cfg.logging.dir.clone(),
        // The TUI owns the terminal.
        emit_stderr: cfg.logging.stderr && !interactive,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    }
}

pub fn build_checker(cfg: &ClaimcheckConfig) -> Result<ClaimChecker> {
    let service = &cfg.service;
    let client = DetectClient::new(&service.base_url)?
        .with_path(service.detect_path.clone())
        .with_timeout(Duration::from_secs(service.timeout_secs))
        .with_retries(service.retries);

    let policy = match cfg.checker.stale_policy {
        StalePolicySetting::LastCompleted => StalePolicy::LastCompleted,
        StalePolicySetting::LatestSubmitted => StalePolicy::LatestSubmitted,
    };

    let checker = ClaimChecker::new(Arc::new(client)).with_stale_policy(policy);
    tracing::info!(
        endpoint = %checker.endpoint(),
        timeout_secs = service.timeout_secs,
        retries = service.retries,
        stale_policy = ?policy,
        "checker.configured"
    );
    Ok(checker)
}
