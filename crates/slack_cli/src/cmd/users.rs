use slack_api::{Client, params::ConversationType};

use super::{Output, conversations::Paging, finish, finish_pages};

#[derive(Debug, clap::Args)]
pub(crate) struct Users {
    #[command(subcommand)]
    command: Commands,
}

impl Users {
    pub(crate) async fn run(self, client: &Client) -> Output {
        match self.command {
            Commands::Conversations(args) => args.run(client).await,
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.command {
            Commands::Conversations(_) => "users.conversations",
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// List conversations a user is a member of.
    Conversations(Conversations),
}

#[derive(Debug, clap::Args)]
struct Conversations {
    /// Browse the memberships of this user instead of the token owner.
    #[arg(long)]
    user: Option<String>,

    /// Leave out archived channels.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    exclude_archived: Option<bool>,

    /// Maximum number of conversations per page.
    #[arg(long)]
    limit: Option<u16>,

    /// Conversation types, comma separated.
    #[arg(long, value_delimiter = ',')]
    types: Vec<ConversationType>,

    #[command(flatten)]
    paging: Paging,
}

impl Conversations {
    async fn run(self, client: &Client) -> Output {
        let mut request = client.users().conversations().types(self.types);

        if let Some(user) = self.user {
            request = request.user(user);
        }
        if let Some(exclude_archived) = self.exclude_archived {
            request = request.exclude_archived(exclude_archived);
        }
        if let Some(limit) = self.limit {
            request = request.limit(limit);
        }
        if let Some(cursor) = self.paging.cursor {
            request = request.cursor(cursor);
        }

        if self.paging.all {
            finish_pages(request.send_all().await?)
        } else {
            finish(request.send().await?)
        }
    }
}
