mod cmd;
pub mod config;
pub mod error;

use std::{
    fmt,
    io::{IsTerminal as _, Write as _, stderr, stdout},
    process::ExitCode,
};

use camino::Utf8PathBuf;
use clap::{ArgAction, Parser};
use cmd::Commands;
use config::Config;
use error::{Error, Result};
use serde_json::Value;
use tracing::{error, trace};

/// Command-line client for the Slack conversations API.
#[derive(Parser)]
#[command(name = "slack", author, version, about, long_about = None)]
pub struct Cli {
    #[command(flatten, next_help_heading = "Global Options")]
    globals: Globals,

    #[command(subcommand, next_help_heading = "Options")]
    command: Commands,
}

#[derive(Debug, clap::Args)]
pub struct Globals {
    /// Path to the configuration file.
    ///
    /// Defaults to `$SLACK_CONFIG_FILE`, then `config.toml` in the user
    /// configuration directory.
    #[arg(long, value_name = "PATH", global = true)]
    config_file: Option<Utf8PathBuf>,

    /// Token to authenticate with. Overrides `SLACK_TOKEN`.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Web API endpoint. Overrides `SLACK_API_BASE`.
    #[arg(long, value_name = "URL", global = true)]
    api_base: Option<String>,

    /// Increase verbosity of logging.
    ///
    /// Can be specified multiple times to increase verbosity.
    ///
    /// Defaults to printing "error" messages. For each increase in verbosity,
    /// the log level is set to "warn", "info", "debug", and "trace"
    /// respectively.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output, including errors.
    #[arg(short, long, global = true)]
    quiet: bool,
}

impl fmt::Display for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entry(&"config_file", &self.globals.config_file)
            .entry(&"token", &self.globals.token.as_ref().map(|_| "[REDACTED]"))
            .entry(&"api_base", &self.globals.api_base)
            .entry(&"verbose", &self.globals.verbose)
            .entry(&"quiet", &self.globals.quiet)
            .finish()
    }
}

pub async fn run() -> ExitCode {
    let cli = Cli::parse();
    let is_tty = stdout().is_terminal();
    let quiet = cli.globals.quiet;

    configure_logging(cli.globals.verbose, quiet);
    trace!(command = cli.command.name(), arguments = %cli, "Starting CLI run.");

    let (code, output) = match run_inner(cli).await {
        Ok(value) => (0, Some(render(&value, is_tty))),
        Err(Error::Remote { error, body }) => {
            error!(%error, "Slack rejected the request.");
            (2, Some(render(&body, is_tty)))
        }
        Err(error) => {
            if !quiet {
                writeln!(stderr().lock(), "{error}").ok();
            }
            (error.code(), None)
        }
    };

    if let Some(output) = output.filter(|_| !quiet) {
        writeln!(stdout().lock(), "{output}").ok();
    }

    ExitCode::from(code)
}

async fn run_inner(cli: Cli) -> Result<Value> {
    let config = load_config(&cli.globals)?;
    let client = config.client()?;

    cli.command.run(&client).await
}

/// Layer the command-line flags over the file and environment configuration.
fn load_config(globals: &Globals) -> Result<Config> {
    let overrides = Config {
        token: globals.token.clone(),
        api_base: globals.api_base.clone(),
        user_agent: None,
    };

    let config = Config::load(globals.config_file.as_deref())?;
    trace!(
        api_base = config.api_base.as_deref(),
        has_token = config.token.is_some(),
        "Loaded configuration."
    );

    Ok(overrides.merge(config))
}

fn render(value: &Value, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
    } else {
        value.to_string()
    }
}

fn configure_logging(verbose: u8, quiet: bool) {
    use tracing::level_filters::LevelFilter;
    use tracing_subscriber::fmt;

    let mut level = match verbose {
        0 => LevelFilter::ERROR,
        1 => LevelFilter::WARN,
        2 => LevelFilter::INFO,
        3 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    if quiet {
        level = LevelFilter::OFF;
    }

    let mut filter = vec!["off".to_owned()];
    for krate in ["api", "cli"] {
        filter.push(format!("slack_{krate}={level}"));
    }

    let format = fmt::format().with_target(false).compact();

    if level < LevelFilter::DEBUG {
        tracing_subscriber::fmt()
            .event_format(format)
            .without_time()
            .with_ansi(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    } else {
        tracing_subscriber::fmt()
            .event_format(format)
            .with_ansi(true)
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_env_filter(filter.join(","))
            .init();
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use httpmock::{
        Method::{GET, POST},
        MockServer,
    };
    use serde_json::json;

    use super::*;

    #[test]
    fn test_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_paginated_listing() {
        let cli = Cli::try_parse_from([
            "slack",
            "conversations",
            "list",
            "--types",
            "public_channel,im",
            "--all",
        ])
        .unwrap();

        assert_eq!(cli.command.name(), "conversations.list");
    }

    #[test]
    fn open_needs_channel_or_users() {
        assert!(Cli::try_parse_from(["slack", "conversations", "open"]).is_err());
        assert!(Cli::try_parse_from(["slack", "conversations", "open", "--users", "U1,U2"]).is_ok());
    }

    #[test]
    fn rejects_unknown_conversation_type() {
        let result = Cli::try_parse_from(["slack", "c", "list", "--types", "channel"]);
        assert!(result.is_err());
    }

    #[test]
    fn display_redacts_token() {
        let cli = Cli::try_parse_from(["slack", "--token", "xoxb-secret", "c", "join", "C1"])
            .unwrap();

        let display = cli.to_string();
        assert!(!display.contains("xoxb-secret"), "{display}");
        assert!(display.contains("[REDACTED]"), "{display}");
    }

    #[test_log::test(tokio::test)]
    async fn command_runs_against_configured_endpoint() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/conversations.setTopic")
                    .header("authorization", "Bearer xoxb-cli")
                    .body("channel=C123&topic=standup");
                then.status(200).json_body(json!({ "ok": true }));
            })
            .await;

        let config = Config {
            token: Some("xoxb-cli".to_owned()),
            api_base: Some(server.base_url()),
            user_agent: None,
        };
        let client = config.client().unwrap();

        let cli = Cli::try_parse_from([
            "slack",
            "conversations",
            "set-topic",
            "C123",
            "standup",
        ])
        .unwrap();

        let output = cli.command.run(&client).await.unwrap();
        assert_eq!(output, json!({ "ok": true }));
        mock.assert();
    }

    #[test_log::test(tokio::test)]
    async fn users_conversations_collects_all_pages() {
        let server = MockServer::start_async().await;
        let page_1 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users.conversations")
                    .query_param("types", "im")
                    .query_param("cursor", "start");
                then.status(200).json_body(json!({
                    "ok": true,
                    "channels": [{ "id": "D1" }],
                    "response_metadata": { "next_cursor": "second" }
                }));
            })
            .await;
        let page_2 = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/users.conversations")
                    .query_param("types", "im")
                    .query_param("cursor", "second");
                then.status(200).json_body(json!({
                    "ok": true,
                    "channels": [{ "id": "D2" }],
                    "response_metadata": { "next_cursor": "" }
                }));
            })
            .await;

        let config = Config {
            token: Some("xoxb-cli".to_owned()),
            api_base: Some(server.base_url()),
            user_agent: None,
        };
        let client = config.client().unwrap();
        let cli = Cli::try_parse_from([
            "slack",
            "users",
            "conversations",
            "--types",
            "im",
            "--cursor",
            "start",
            "--all",
        ])
        .unwrap();

        let output = cli.command.run(&client).await.unwrap();
        let pages = output.as_array().unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[0]["channels"][0]["id"], "D1");
        assert_eq!(pages[1]["channels"][0]["id"], "D2");

        page_1.assert();
        page_2.assert();
    }

    #[test_log::test(tokio::test)]
    async fn ok_false_fails_the_command() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/conversations.archive");
                then.status(200)
                    .json_body(json!({ "ok": false, "error": "already_archived" }));
            })
            .await;

        let config = Config {
            token: Some("xoxb-cli".to_owned()),
            api_base: Some(server.base_url()),
            user_agent: None,
        };
        let client = config.client().unwrap();
        let cli = Cli::try_parse_from(["slack", "c", "archive", "C123"]).unwrap();

        let error = cli.command.run(&client).await.unwrap_err();
        assert_eq!(error.code(), 2);
        assert_eq!(error.to_string(), "Slack returned an error: already_archived");
        mock.assert();
    }
}
