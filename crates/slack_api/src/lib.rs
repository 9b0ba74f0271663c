//! Client for the Slack Web API `conversations.*` methods.
//!
//! Every operation is a single HTTP call. Parameters left unset are not sent,
//! and the decoded response body is handed back untouched, including bodies
//! that report `"ok": false`.
//!
//! ```no_run
//! # async fn run() -> slack_api::Result<()> {
//! let client = slack_api::Client::builder().token("xoxb-...").build()?;
//! let history = client
//!     .conversations()
//!     .history("C0123456789")
//!     .limit(50)
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod cursor;
mod error;
mod handlers;
pub mod params;

pub use client::{Client, ClientBuilder, DEFAULT_API_BASE};
pub use cursor::next_cursor;
pub use error::{Error, Result, SlackError, StatusCode};
pub use handlers::{
    ConversationsHandler, CreateBuilder, HistoryBuilder, InfoBuilder, ListBuilder, MembersBuilder,
    OpenBuilder, RepliesBuilder, UserConversationsBuilder, UsersHandler,
};
