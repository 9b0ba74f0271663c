use serde_json::Value;

use crate::{
    Client, Result,
    params::{ConversationType, Params},
};

/// Operations of the `conversations.*` method family.
///
/// Single-argument calls are sent straight away. Calls that accept optional
/// arguments return a builder, finished with `send`.
pub struct ConversationsHandler {
    pub(crate) client: Client,
}

impl ConversationsHandler {
    /// Archive a conversation.
    pub async fn archive(&self, channel: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel);
        self.client.post("conversations.archive", &params).await
    }

    /// Close a direct message or multi-person direct message.
    pub async fn close(&self, channel: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel);
        self.client.post("conversations.close", &params).await
    }

    #[must_use]
    pub fn create(&self, name: impl Into<String>) -> CreateBuilder {
        CreateBuilder {
            client: self.client.clone(),
            name: name.into(),
            is_private: None,
            user_ids: vec![],
        }
    }

    /// Message events of a conversation, newest first.
    ///
    /// Without `latest` or `oldest` the full history is paged through via the
    /// response cursor.
    #[must_use]
    pub fn history(&self, channel: impl Into<String>) -> HistoryBuilder {
        HistoryBuilder {
            client: self.client.clone(),
            channel: channel.into(),
            cursor: None,
            inclusive: false,
            latest: None,
            limit: 100,
            oldest: "0".to_owned(),
        }
    }

    #[must_use]
    pub fn info(&self, channel: impl Into<String>) -> InfoBuilder {
        InfoBuilder {
            client: self.client.clone(),
            channel: channel.into(),
            include_locale: false,
            include_num_members: false,
        }
    }

    /// Invite users to a public or private channel.
    ///
    /// The calling user must be a member of the channel. Slack accepts up to
    /// 1000 user IDs per call.
    pub async fn invite<I, S>(&self, channel: impl Into<String>, users: I) -> Result<Value>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let params = Params::new()
            .with("channel", channel)
            .with_list("users", users);

        self.client.post("conversations.invite", &params).await
    }

    pub async fn join(&self, channel: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel);
        self.client.post("conversations.join", &params).await
    }

    /// Remove another member from a conversation.
    pub async fn kick(&self, channel: impl Into<String>, user: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel).with("user", user);
        self.client.post("conversations.kick", &params).await
    }

    pub async fn leave(&self, channel: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel);
        self.client.post("conversations.leave", &params).await
    }

    #[must_use]
    pub fn list(&self) -> ListBuilder {
        ListBuilder {
            client: self.client.clone(),
            cursor: None,
            exclude_archived: false,
            limit: 100,
            types: vec![ConversationType::PublicChannel],
        }
    }

    #[must_use]
    pub fn members(&self, channel: impl Into<String>) -> MembersBuilder {
        MembersBuilder {
            client: self.client.clone(),
            channel: channel.into(),
            cursor: None,
            limit: 100,
        }
    }

    /// Open or resume a direct message or multi-person direct message.
    ///
    /// Either an existing `channel` or a set of `users` identifies the
    /// conversation.
    #[must_use]
    pub fn open(&self) -> OpenBuilder {
        OpenBuilder {
            client: self.client.clone(),
            channel: None,
            return_im: None,
            users: vec![],
        }
    }

    /// Rename a conversation.
    ///
    /// Only workspace admins and the channel creator may do this, everybody
    /// else gets a `not_authorized` error back.
    pub async fn rename(
        &self,
        channel: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Value> {
        let params = Params::new().with("channel", channel).with("name", name);
        self.client.post("conversations.rename", &params).await
    }

    /// Messages of the thread started by the parent message `ts`.
    #[must_use]
    pub fn replies(&self, channel: impl Into<String>, ts: impl Into<String>) -> RepliesBuilder {
        RepliesBuilder {
            client: self.client.clone(),
            channel: channel.into(),
            ts: ts.into(),
            cursor: None,
            inclusive: false,
            latest: None,
            limit: 10,
            oldest: "0".to_owned(),
        }
    }

    pub async fn set_purpose(
        &self,
        channel: impl Into<String>,
        purpose: impl Into<String>,
    ) -> Result<Value> {
        let params = Params::new()
            .with("channel", channel)
            .with("purpose", purpose);

        self.client.post("conversations.setPurpose", &params).await
    }

    /// The topic is plain text, Slack applies no formatting or linkification.
    pub async fn set_topic(
        &self,
        channel: impl Into<String>,
        topic: impl Into<String>,
    ) -> Result<Value> {
        let params = Params::new().with("channel", channel).with("topic", topic);
        self.client.post("conversations.setTopic", &params).await
    }

    /// Unarchive a conversation. The calling user is added to it.
    pub async fn unarchive(&self, channel: impl Into<String>) -> Result<Value> {
        let params = Params::new().with("channel", channel);
        self.client.post("conversations.unarchive", &params).await
    }
}

pub struct CreateBuilder {
    pub(crate) client: Client,
    pub(crate) name: String,
    pub(crate) is_private: Option<bool>,
    pub(crate) user_ids: Vec<String>,
}

impl CreateBuilder {
    #[must_use]
    pub const fn is_private(mut self, is_private: bool) -> Self {
        self.is_private = Some(is_private);
        self
    }

    /// Members to add on creation. Only honored for org-wide apps.
    #[must_use]
    pub fn user_ids<I, S>(mut self, user_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.user_ids = user_ids.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with("name", self.name.as_str())
            .with_opt_flag("is_private", self.is_private)
            .with_list("user_ids", &self.user_ids)
    }

    pub async fn send(self) -> Result<Value> {
        self.client
            .post("conversations.create", &self.params())
            .await
    }
}

pub struct HistoryBuilder {
    pub(crate) client: Client,
    pub(crate) channel: String,
    pub(crate) cursor: Option<String>,
    pub(crate) inclusive: bool,
    pub(crate) latest: Option<String>,
    pub(crate) limit: u16,
    pub(crate) oldest: String,
}

impl HistoryBuilder {
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    /// Include messages exactly at `latest` or `oldest`.
    #[must_use]
    pub const fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    #[must_use]
    pub fn latest(mut self, latest: impl Into<String>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn oldest(mut self, oldest: impl Into<String>) -> Self {
        self.oldest = oldest.into();
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with("channel", self.channel.as_str())
            .with_opt("cursor", self.cursor.as_deref())
            .with_flag("inclusive", self.inclusive)
            .with_opt("latest", self.latest.as_deref())
            .with_number("limit", self.limit)
            .with("oldest", self.oldest.as_str())
    }

    pub async fn send(self) -> Result<Value> {
        self.client
            .get("conversations.history", &self.params())
            .await
    }

    /// Fetch this page and every page after it.
    pub async fn send_all(self) -> Result<Vec<Value>> {
        self.client
            .get_cursor_paginated("conversations.history", self.params())
            .await
    }
}

pub struct InfoBuilder {
    pub(crate) client: Client,
    pub(crate) channel: String,
    pub(crate) include_locale: bool,
    pub(crate) include_num_members: bool,
}

impl InfoBuilder {
    #[must_use]
    pub const fn include_locale(mut self, include_locale: bool) -> Self {
        self.include_locale = include_locale;
        self
    }

    #[must_use]
    pub const fn include_num_members(mut self, include_num_members: bool) -> Self {
        self.include_num_members = include_num_members;
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with("channel", self.channel.as_str())
            .with_flag("include_locale", self.include_locale)
            .with_flag("include_num_members", self.include_num_members)
    }

    pub async fn send(self) -> Result<Value> {
        self.client.get("conversations.info", &self.params()).await
    }
}

pub struct ListBuilder {
    pub(crate) client: Client,
    pub(crate) cursor: Option<String>,
    pub(crate) exclude_archived: bool,
    pub(crate) limit: u16,
    pub(crate) types: Vec<ConversationType>,
}

impl ListBuilder {
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn exclude_archived(mut self, exclude_archived: bool) -> Self {
        self.exclude_archived = exclude_archived;
        self
    }

    /// Page size. Slack caps this at 1000.
    #[must_use]
    pub const fn limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = ConversationType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with_opt("cursor", self.cursor.as_deref())
            .with_flag("exclude_archived", self.exclude_archived)
            .with_number("limit", self.limit)
            .with_list("types", self.types.iter().map(|kind| kind.as_str()))
    }

    pub async fn send(self) -> Result<Value> {
        self.client.get("conversations.list", &self.params()).await
    }

    pub async fn send_all(self) -> Result<Vec<Value>> {
        self.client
            .get_cursor_paginated("conversations.list", self.params())
            .await
    }
}

pub struct MembersBuilder {
    pub(crate) client: Client,
    pub(crate) channel: String,
    pub(crate) cursor: Option<String>,
    pub(crate) limit: u16,
}

impl MembersBuilder {
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with("channel", self.channel.as_str())
            .with_opt("cursor", self.cursor.as_deref())
            .with_number("limit", self.limit)
    }

    pub async fn send(self) -> Result<Value> {
        self.client
            .get("conversations.members", &self.params())
            .await
    }

    pub async fn send_all(self) -> Result<Vec<Value>> {
        self.client
            .get_cursor_paginated("conversations.members", self.params())
            .await
    }
}

pub struct OpenBuilder {
    pub(crate) client: Client,
    pub(crate) channel: Option<String>,
    pub(crate) return_im: Option<bool>,
    pub(crate) users: Vec<String>,
}

impl OpenBuilder {
    /// Resume an existing im or mpim by ID.
    #[must_use]
    pub fn channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = Some(channel.into());
        self
    }

    /// Ask for the full IM channel definition in the response.
    #[must_use]
    pub const fn return_im(mut self, return_im: bool) -> Self {
        self.return_im = Some(return_im);
        self
    }

    #[must_use]
    pub fn users<I, S>(mut self, users: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.users = users.into_iter().map(Into::into).collect();
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with_opt("channel", self.channel.as_deref())
            .with_opt_flag("return_im", self.return_im)
            .with_list("users", &self.users)
    }

    pub async fn send(self) -> Result<Value> {
        self.client.post("conversations.open", &self.params()).await
    }
}

pub struct RepliesBuilder {
    pub(crate) client: Client,
    pub(crate) channel: String,
    pub(crate) ts: String,
    pub(crate) cursor: Option<String>,
    pub(crate) inclusive: bool,
    pub(crate) latest: Option<String>,
    pub(crate) limit: u16,
    pub(crate) oldest: String,
}

impl RepliesBuilder {
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn inclusive(mut self, inclusive: bool) -> Self {
        self.inclusive = inclusive;
        self
    }

    #[must_use]
    pub fn latest(mut self, latest: impl Into<String>) -> Self {
        self.latest = Some(latest.into());
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u16) -> Self {
        self.limit = limit;
        self
    }

    #[must_use]
    pub fn oldest(mut self, oldest: impl Into<String>) -> Self {
        self.oldest = oldest.into();
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with("channel", self.channel.as_str())
            .with("ts", self.ts.as_str())
            .with_opt("cursor", self.cursor.as_deref())
            .with_flag("inclusive", self.inclusive)
            .with_opt("latest", self.latest.as_deref())
            .with_number("limit", self.limit)
            .with("oldest", self.oldest.as_str())
    }

    pub async fn send(self) -> Result<Value> {
        self.client
            .get("conversations.replies", &self.params())
            .await
    }

    pub async fn send_all(self) -> Result<Vec<Value>> {
        self.client
            .get_cursor_paginated("conversations.replies", self.params())
            .await
    }
}
