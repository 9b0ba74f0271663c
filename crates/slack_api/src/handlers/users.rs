use serde_json::Value;

use crate::{
    Client, Result,
    params::{ConversationType, Params},
};

pub struct UsersHandler {
    pub(crate) client: Client,
}

impl UsersHandler {
    /// Channel-like conversations the token's user or app can access.
    ///
    /// Nothing is sent unless set, the service applies its own defaults.
    #[must_use]
    pub fn conversations(&self) -> UserConversationsBuilder {
        UserConversationsBuilder {
            client: self.client.clone(),
            cursor: None,
            exclude_archived: None,
            limit: None,
            types: vec![],
            user: None,
        }
    }
}

pub struct UserConversationsBuilder {
    pub(crate) client: Client,
    pub(crate) cursor: Option<String>,
    pub(crate) exclude_archived: Option<bool>,
    pub(crate) limit: Option<u16>,
    pub(crate) types: Vec<ConversationType>,
    pub(crate) user: Option<String>,
}

impl UserConversationsBuilder {
    #[must_use]
    pub fn cursor(mut self, cursor: impl Into<String>) -> Self {
        self.cursor = Some(cursor.into());
        self
    }

    #[must_use]
    pub const fn exclude_archived(mut self, exclude_archived: bool) -> Self {
        self.exclude_archived = Some(exclude_archived);
        self
    }

    #[must_use]
    pub const fn limit(mut self, limit: u16) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = ConversationType>) -> Self {
        self.types = types.into_iter().collect();
        self
    }

    /// Browse the memberships of this user instead of the token owner.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub(crate) fn params(&self) -> Params {
        Params::new()
            .with_opt("cursor", self.cursor.as_deref())
            .with_opt_flag("exclude_archived", self.exclude_archived)
            .with_opt_number("limit", self.limit)
            .with_list("types", self.types.iter().map(|kind| kind.as_str()))
            .with_opt("user", self.user.as_deref())
    }

    pub async fn send(self) -> Result<Value> {
        self.client.get("users.conversations", &self.params()).await
    }

    pub async fn send_all(self) -> Result<Vec<Value>> {
        self.client
            .get_cursor_paginated("users.conversations", self.params())
            .await
    }
}
