use std::{collections::HashSet, fmt, sync::Arc};

use reqwest::{
    RequestBuilder,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use serde_json::Value;
use tracing::{debug, trace, warn};
use url::Url;

use crate::{
    Error, Result, SlackError, StatusCode,
    cursor::next_cursor,
    handlers::{ConversationsHandler, UsersHandler},
    params::Params,
};

/// The public Slack Web API endpoint.
pub const DEFAULT_API_BASE: &str = "https://slack.com/api";

const DEFAULT_USER_AGENT: &str = concat!("slack-api-rs/", env!("CARGO_PKG_VERSION"));

/// Slack Web API client.
///
/// Cloning is cheap, all clones share the same connection pool.
#[derive(Clone)]
pub struct Client {
    pub(crate) inner: Arc<Inner>,
}

pub(crate) struct Inner {
    pub(crate) client: reqwest::Client,
    pub(crate) api_base: String,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("api_base", &self.inner.api_base)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verb {
    Get,
    Post,
}

impl Verb {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl Client {
    #[must_use]
    pub fn builder() -> ClientBuilder {
        ClientBuilder {
            token: None,
            api_base: DEFAULT_API_BASE.to_owned(),
            user_agent: None,
        }
    }

    #[must_use]
    pub fn conversations(&self) -> ConversationsHandler {
        ConversationsHandler {
            client: self.clone(),
        }
    }

    #[must_use]
    pub fn users(&self) -> UsersHandler {
        UsersHandler {
            client: self.clone(),
        }
    }

    #[must_use]
    pub fn api_base(&self) -> &str {
        &self.inner.api_base
    }

    pub(crate) async fn get(&self, method: &str, params: &Params) -> Result<Value> {
        self.call(Verb::Get, method, params).await
    }

    pub(crate) async fn post(&self, method: &str, params: &Params) -> Result<Value> {
        self.call(Verb::Post, method, params).await
    }

    /// Follow `response_metadata.next_cursor` until the listing is exhausted.
    ///
    /// Every page body is returned as-is, in the order it was fetched.
    pub(crate) async fn get_cursor_paginated(
        &self,
        method: &str,
        mut params: Params,
    ) -> Result<Vec<Value>> {
        let mut pages = vec![];
        let mut sent = params
            .get("cursor")
            .map(str::to_owned)
            .into_iter()
            .collect::<HashSet<_>>();

        loop {
            let page = self.get(method, &params).await?;
            let failed = page.get("ok").and_then(Value::as_bool) == Some(false);
            let next = next_cursor(&page).map(str::to_owned);

            pages.push(page);
            debug!(method, page = pages.len(), failed, "Fetched page.");

            let Some(next) = next.filter(|_| !failed) else {
                break;
            };

            if !sent.insert(next.clone()) {
                warn!(method, cursor = %next, "Cursor was already sent. Stopping.");
                break;
            }

            params.set("cursor", next);
        }

        Ok(pages)
    }

    async fn call(&self, verb: Verb, method: &str, params: &Params) -> Result<Value> {
        let url = format!("{}/{method}", self.inner.api_base);
        let client = &self.inner.client;

        trace!(
            %url,
            verb = verb.as_str(),
            params = ?params.names().collect::<Vec<_>>(),
            "Triggering request."
        );

        let request = match verb {
            Verb::Get => client.get(&url).query(params.as_slice()),
            Verb::Post => client.post(&url).form(params.as_slice()),
        };

        self.send_json(request).await
    }

    async fn send_json(&self, request: RequestBuilder) -> Result<Value> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        trace!(
            status = status.as_u16(),
            content_length = body.len(),
            "Received response."
        );

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|value| {
                    value
                        .get("error")
                        .and_then(Value::as_str)
                        .map(str::to_owned)
                })
                .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));

            warn!(status = status.as_u16(), %message, "Unexpected response.");

            return Err(Error::Slack {
                source: SlackError {
                    status_code: StatusCode::new(status.as_u16()),
                    message,
                },
                body: Some(body),
            });
        }

        serde_json::from_str(&body).map_err(Into::into)
    }
}

pub struct ClientBuilder {
    token: Option<String>,
    api_base: String,
    user_agent: Option<String>,
}

impl ClientBuilder {
    /// Bot or user token sent as `Authorization: Bearer <token>`.
    #[must_use]
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the API endpoint, e.g. for an enterprise proxy or tests.
    #[must_use]
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    pub fn build(self) -> Result<Client> {
        let api_base = Url::parse(&self.api_base)?;
        if api_base.cannot_be_a_base() {
            return Err(Error::Build(format!(
                "`{}` cannot be used as an API base URL",
                self.api_base
            )));
        }

        let client = build_http_client(self.token.as_deref(), self.user_agent.as_deref())?;

        Ok(Client {
            inner: Arc::new(Inner {
                client,
                api_base: api_base.as_str().trim_end_matches('/').to_owned(),
            }),
        })
    }
}

fn build_http_client(token: Option<&str>, user_agent: Option<&str>) -> Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(user_agent.unwrap_or(DEFAULT_USER_AGENT))?,
    );
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
        value.set_sensitive(true);
        headers.insert(AUTHORIZATION, value);
    }

    reqwest::Client::builder()
        .default_headers(headers)
        .build()
        .map_err(|error| Error::Build(format!("{error:#}")))
}
