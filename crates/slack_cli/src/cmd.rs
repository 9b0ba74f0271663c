mod conversations;
mod users;

use serde_json::Value;
use slack_api::Client;

use crate::error::{Error, Result};

#[derive(Debug, clap::Subcommand)]
pub(crate) enum Commands {
    /// Manage channels, direct messages and group messages.
    #[command(visible_alias = "c", alias = "conversation")]
    Conversations(conversations::Conversations),

    /// Look up conversations by user membership.
    #[command(visible_alias = "u", alias = "user")]
    Users(users::Users),
}

impl Commands {
    pub(crate) async fn run(self, client: &Client) -> Output {
        match self {
            Commands::Conversations(args) => args.run(client).await,
            Commands::Users(args) => args.run(client).await,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Commands::Conversations(args) => args.name(),
            Commands::Users(args) => args.name(),
        }
    }
}

/// The decoded response body, or every page of it when `--all` was given.
pub(crate) type Output = Result<Value>;

/// Turn a response body into command output.
///
/// A body that says `"ok": false` is still printed, but makes the command
/// fail.
pub(crate) fn finish(body: Value) -> Output {
    match remote_error(&body) {
        Some(error) => Err(Error::Remote { error, body }),
        None => Ok(body),
    }
}

pub(crate) fn finish_pages(pages: Vec<Value>) -> Output {
    let error = pages.iter().find_map(remote_error);
    let body = Value::Array(pages);

    match error {
        Some(error) => Err(Error::Remote { error, body }),
        None => Ok(body),
    }
}

fn remote_error(body: &Value) -> Option<String> {
    if body.get("ok").and_then(Value::as_bool) != Some(false) {
        return None;
    }

    Some(
        body.get("error")
            .and_then(Value::as_str)
            .unwrap_or("unknown_error")
            .to_owned(),
    )
}
