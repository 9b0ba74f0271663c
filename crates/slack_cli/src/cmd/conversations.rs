use slack_api::{Client, params::ConversationType};

use super::{Output, finish, finish_pages};

#[derive(Debug, clap::Args)]
pub(crate) struct Conversations {
    #[command(subcommand)]
    command: Commands,
}

impl Conversations {
    pub(crate) async fn run(self, client: &Client) -> Output {
        let handler = client.conversations();

        match self.command {
            Commands::Archive(args) => finish(handler.archive(args.channel).await?),
            Commands::Close(args) => finish(handler.close(args.channel).await?),
            Commands::Create(args) => args.run(client).await,
            Commands::History(args) => args.run(client).await,
            Commands::Info(args) => args.run(client).await,
            Commands::Invite(args) => finish(handler.invite(args.channel, args.users).await?),
            Commands::Join(args) => finish(handler.join(args.channel).await?),
            Commands::Kick(args) => finish(handler.kick(args.channel, args.user).await?),
            Commands::Leave(args) => finish(handler.leave(args.channel).await?),
            Commands::List(args) => args.run(client).await,
            Commands::Members(args) => args.run(client).await,
            Commands::Open(args) => args.run(client).await,
            Commands::Rename(args) => finish(handler.rename(args.channel, args.name).await?),
            Commands::Replies(args) => args.run(client).await,
            Commands::SetPurpose(args) => {
                finish(handler.set_purpose(args.channel, args.purpose).await?)
            }
            Commands::SetTopic(args) => finish(handler.set_topic(args.channel, args.topic).await?),
            Commands::Unarchive(args) => finish(handler.unarchive(args.channel).await?),
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self.command {
            Commands::Archive(_) => "conversations.archive",
            Commands::Close(_) => "conversations.close",
            Commands::Create(_) => "conversations.create",
            Commands::History(_) => "conversations.history",
            Commands::Info(_) => "conversations.info",
            Commands::Invite(_) => "conversations.invite",
            Commands::Join(_) => "conversations.join",
            Commands::Kick(_) => "conversations.kick",
            Commands::Leave(_) => "conversations.leave",
            Commands::List(_) => "conversations.list",
            Commands::Members(_) => "conversations.members",
            Commands::Open(_) => "conversations.open",
            Commands::Rename(_) => "conversations.rename",
            Commands::Replies(_) => "conversations.replies",
            Commands::SetPurpose(_) => "conversations.setPurpose",
            Commands::SetTopic(_) => "conversations.setTopic",
            Commands::Unarchive(_) => "conversations.unarchive",
        }
    }
}

#[derive(Debug, clap::Subcommand)]
enum Commands {
    /// Archive a conversation.
    Archive(Channel),

    /// Close a direct message or multi-person direct message.
    Close(Channel),

    /// Create a public or private channel.
    Create(Create),

    /// Fetch the message history of a conversation.
    History(History),

    /// Show details of a conversation.
    Info(Info),

    /// Invite users to a channel.
    Invite(Invite),

    /// Join an existing conversation.
    Join(Channel),

    /// Remove a user from a conversation.
    Kick(Kick),

    /// Leave a conversation.
    Leave(Channel),

    /// List conversations in the workspace.
    #[command(visible_alias = "ls")]
    List(List),

    /// List members of a conversation.
    Members(Members),

    /// Open or resume a direct message or multi-person direct message.
    Open(Open),

    /// Rename a conversation.
    Rename(Rename),

    /// Fetch a thread of messages.
    Replies(Replies),

    /// Set the purpose of a conversation.
    SetPurpose(SetPurpose),

    /// Set the topic of a conversation.
    SetTopic(SetTopic),

    /// Unarchive a conversation.
    Unarchive(Channel),
}

#[derive(Debug, clap::Args)]
struct Channel {
    /// Conversation ID.
    channel: String,
}

#[derive(Debug, clap::Args)]
struct Create {
    /// Name of the new channel.
    name: String,

    /// Create a private channel.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    is_private: Option<bool>,

    /// Users to add to the channel, comma separated.
    #[arg(long, value_delimiter = ',')]
    user_ids: Vec<String>,
}

impl Create {
    async fn run(self, client: &Client) -> Output {
        let mut request = client
            .conversations()
            .create(self.name)
            .user_ids(self.user_ids);

        if let Some(is_private) = self.is_private {
            request = request.is_private(is_private);
        }

        finish(request.send().await?)
    }
}

#[derive(Debug, clap::Args)]
struct History {
    /// Conversation ID.
    channel: String,

    #[command(flatten)]
    range: Range,

    /// Maximum number of messages per page.
    #[arg(long, default_value_t = 100)]
    limit: u16,

    #[command(flatten)]
    paging: Paging,
}

impl History {
    async fn run(self, client: &Client) -> Output {
        let mut request = client
            .conversations()
            .history(self.channel)
            .inclusive(self.range.inclusive)
            .limit(self.limit)
            .oldest(self.range.oldest);

        if let Some(latest) = self.range.latest {
            request = request.latest(latest);
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

#[derive(Debug, clap::Args)]
struct Info {
    /// Conversation ID.
    channel: String,

    /// Include the locale of the conversation.
    #[arg(long)]
    include_locale: bool,

    /// Include the member count of the conversation.
    #[arg(long)]
    include_num_members: bool,
}

impl Info {
    async fn run(self, client: &Client) -> Output {
        let request = client
            .conversations()
            .info(self.channel)
            .include_locale(self.include_locale)
            .include_num_members(self.include_num_members);

        finish(request.send().await?)
    }
}

#[derive(Debug, clap::Args)]
struct Invite {
    /// Channel ID.
    channel: String,

    /// User IDs to invite.
    #[arg(required = true, value_delimiter = ',')]
    users: Vec<String>,
}

#[derive(Debug, clap::Args)]
struct Kick {
    /// Conversation ID.
    channel: String,

    /// User ID to remove.
    user: String,
}

#[derive(Debug, clap::Args)]
struct List {
    /// Leave out archived channels.
    #[arg(long)]
    exclude_archived: bool,

    /// Maximum number of conversations per page.
    #[arg(long, default_value_t = 100)]
    limit: u16,

    /// Conversation types, comma separated.
    #[arg(long, value_delimiter = ',', default_value = "public_channel")]
    types: Vec<ConversationType>,

    #[command(flatten)]
    paging: Paging,
}

impl List {
    async fn run(self, client: &Client) -> Output {
        let mut request = client
            .conversations()
            .list()
            .exclude_archived(self.exclude_archived)
            .limit(self.limit)
            .types(self.types);

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

#[derive(Debug, clap::Args)]
struct Members {
    /// Conversation ID.
    channel: String,

    /// Maximum number of members per page.
    #[arg(long, default_value_t = 100)]
    limit: u16,

    #[command(flatten)]
    paging: Paging,
}

impl Members {
    async fn run(self, client: &Client) -> Output {
        let mut request = client
            .conversations()
            .members(self.channel)
            .limit(self.limit);

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

#[derive(Debug, clap::Args)]
struct Open {
    /// Resume an existing im or mpim by ID.
    #[arg(long, required_unless_present = "users")]
    channel: Option<String>,

    /// Return the full IM channel definition.
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    return_im: Option<bool>,

    /// Users to open a conversation with, comma separated.
    #[arg(long, value_delimiter = ',')]
    users: Vec<String>,
}

impl Open {
    async fn run(self, client: &Client) -> Output {
        let mut request = client.conversations().open().users(self.users);

        if let Some(channel) = self.channel {
            request = request.channel(channel);
        }
        if let Some(return_im) = self.return_im {
            request = request.return_im(return_im);
        }

        finish(request.send().await?)
    }
}

#[derive(Debug, clap::Args)]
struct Rename {
    /// Conversation ID.
    channel: String,

    /// New name.
    name: String,
}

#[derive(Debug, clap::Args)]
struct Replies {
    /// Conversation ID.
    channel: String,

    /// Timestamp of the parent message.
    ts: String,

    #[command(flatten)]
    range: Range,

    /// Maximum number of messages per page.
    #[arg(long, default_value_t = 10)]
    limit: u16,

    #[command(flatten)]
    paging: Paging,
}

impl Replies {
    async fn run(self, client: &Client) -> Output {
        let mut request = client
            .conversations()
            .replies(self.channel, self.ts)
            .inclusive(self.range.inclusive)
            .limit(self.limit)
            .oldest(self.range.oldest);

        if let Some(latest) = self.range.latest {
            request = request.latest(latest);
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

#[derive(Debug, clap::Args)]
struct SetPurpose {
    /// Conversation ID.
    channel: String,

    /// New purpose.
    purpose: String,
}

#[derive(Debug, clap::Args)]
struct SetTopic {
    /// Conversation ID.
    channel: String,

    /// New topic. Formatting and links are not rendered.
    topic: String,
}

/// Time range of a message listing.
#[derive(Debug, clap::Args)]
struct Range {
    /// Only messages before this timestamp.
    #[arg(long)]
    latest: Option<String>,

    /// Only messages after this timestamp.
    #[arg(long, default_value = "0")]
    oldest: String,

    /// Include messages exactly at `--latest` or `--oldest`.
    #[arg(long)]
    inclusive: bool,
}

#[derive(Debug, clap::Args)]
pub(super) struct Paging {
    /// Cursor from a previous response's `next_cursor`.
    #[arg(long)]
    pub(super) cursor: Option<String>,

    /// Follow the cursor and print every page.
    #[arg(long)]
    pub(super) all: bool,
}
