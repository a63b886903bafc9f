use clap::{Parser, Subcommand, ValueEnum};
use claimcheck_config::StalePolicySetting;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "claimcheck", version, about = "Check a claim against a verification service")]
pub struct Cli {
    /// YAML config file; defaults to ./claimcheck.yaml when present.
    #[arg(long, global = true, env = "CLAIMCHECK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base URL of the verification service.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true)]
    pub timeout_secs: Option<u64>,

    /// Which answer wins when submissions overlap.
    #[arg(long, global = true, value_enum)]
    pub stale_policy: Option<StalePolicyArg>,

    #[command(subcommand)]
    pub command: Option<Cmd>,
}

#[derive(Debug, Subcommand)]
pub enum Cmd {
    /// Interactive terminal UI (default).
    Tui,
    /// Check one claim and print the result.
    Check {
        /// Claim text; read from stdin when omitted.
        claim: Vec<String>,

        #[arg(long, short, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StalePolicyArg {
    LastCompleted,
    LatestSubmitted,
}

impl From<StalePolicyArg> for StalePolicySetting {
    fn from(arg: StalePolicyArg) -> Self {
        match arg {
            StalePolicyArg::LastCompleted => StalePolicySetting::LastCompleted,
            StalePolicyArg::LatestSubmitted => StalePolicySetting::LatestSubmitted,
        }
    }
}
