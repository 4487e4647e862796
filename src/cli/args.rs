use crate::notify::{DispatchPolicy, MailRelayConfig};
use crate::types::FraudError;
use clap::{Args, Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Score payment transactions for suspicious patterns
#[derive(Parser, Debug)]
#[command(name = "fraud-engine")]
#[command(about = "Score payment transactions for suspicious patterns", long_about = None)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the HTTP ingestion service
    Serve(ServeArgs),
    /// Score a CSV file of payments and claims offline
    Replay(ReplayArgs),
}

/// Settings for the HTTP service
///
/// Every option can also be provided through the environment (or a `.env` file).
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(long, env = "FRAUD_BIND", default_value = "0.0.0.0:3000")]
    pub bind: SocketAddr,

    /// Mail relay endpoint receiving fraud alerts
    #[arg(long, env = "MAIL_RELAY_URL")]
    pub mail_relay_url: Option<String>,

    /// Sender identity for fraud alerts
    #[arg(long, env = "MAIL_SENDER")]
    pub mail_sender: Option<String>,

    /// Credential authorising the sender with the relay
    #[arg(long, env = "MAIL_CREDENTIAL", hide_env_values = true)]
    pub mail_credential: Option<String>,

    /// Reviewer address receiving fraud alerts
    #[arg(long, env = "MAIL_RECIPIENT")]
    pub mail_recipient: Option<String>,

    /// Upper bound for a single alert delivery attempt, in seconds
    #[arg(long, env = "NOTIFY_TIMEOUT_SECS", default_value_t = 10)]
    pub notify_timeout_secs: u64,

    /// Number of delivery attempts per alert
    #[arg(long, env = "NOTIFY_MAX_ATTEMPTS", default_value_t = 3)]
    pub notify_max_attempts: u32,
}

/// Settings for offline replay
#[derive(Args, Debug, Clone)]
pub struct ReplayArgs {
    /// Input CSV file path containing payment and claim records
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,
}

impl ServeArgs {
    /// Build the mail relay settings
    ///
    /// # Errors
    ///
    /// Returns [`FraudError::ConfigurationMissing`] naming the first absent
    /// (or blank) setting.
    pub fn mail_relay_config(&self) -> Result<MailRelayConfig, FraudError> {
        Ok(MailRelayConfig {
            endpoint: required("MAIL_RELAY_URL", &self.mail_relay_url)?,
            sender: required("MAIL_SENDER", &self.mail_sender)?,
            credential: required("MAIL_CREDENTIAL", &self.mail_credential)?,
            recipient: required("MAIL_RECIPIENT", &self.mail_recipient)?,
        })
    }

    /// Build the delivery policy, falling back to defaults for zero values
    pub fn dispatch_policy(&self) -> DispatchPolicy {
        DispatchPolicy::new(
            Duration::from_secs(self.notify_timeout_secs),
            self.notify_max_attempts,
        )
    }
}

fn required(setting: &str, value: &Option<String>) -> Result<String, FraudError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FraudError::configuration_missing(setting))
}

/// Parse `serve` arguments with every environment fallback removed
///
/// Keeps tests independent of `MAIL_*` and `NOTIFY_*` variables set in the
/// surrounding shell.
#[cfg(test)]
pub(crate) fn serve_args_without_env(args: &[&str]) -> ServeArgs {
    use clap::{CommandFactory, FromArgMatches};

    let command = CliArgs::command().mut_subcommand("serve", |serve| {
        let ids: Vec<String> = serve
            .get_arguments()
            .map(|a| a.get_id().as_str().to_owned())
            .collect();
        ids.into_iter()
            .fold(serve, |serve, id| serve.mut_arg(id, |arg| arg.env(None::<&str>)))
    });

    let matches = command
        .try_get_matches_from(args)
        .expect("Failed to parse serve arguments");
    match CliArgs::from_arg_matches(&matches)
        .expect("Failed to build CLI arguments")
        .command
    {
        Command::Serve(serve) => serve,
        other => panic!("Expected serve command, got {:?}", other),
    }
}
