use clap::Parser;
use std::path::PathBuf;

/// Watch a mailing-list archive and push keyword matches to chat webhooks
#[derive(Debug, Default, Parser)]
#[command(name = "vuln-monitor", version)]
pub struct Cli {
    /// Config file (toml, yaml or json); defaults to ./vuln_monitor.* if present
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Comma-separated list of keywords to filter messages
    #[arg(short, long)]
    pub keywords: Option<String>,

    /// Slack webhook URL for notifications
    #[arg(long)]
    pub slack_webhook: Option<String>,

    /// DingTalk webhook URL for notifications
    #[arg(long)]
    pub dingtalk_webhook: Option<String>,

    /// Discord webhook URL for notifications
    #[arg(long)]
    pub discord_webhook: Option<String>,

    /// Polling interval in minutes
    #[arg(short, long)]
    pub interval: Option<u64>,

    /// Directory holding the daily visited and audit records
    #[arg(long)]
    pub state_dir: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,
}
