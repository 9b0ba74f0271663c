//! Client configuration.
//!
//! Values are layered, later sources override earlier ones:
//!
//! 1. built-in defaults
//! 2. the TOML configuration file
//! 3. `SLACK_*` environment variables
//! 4. command-line flags

use std::{env, fs, io};

use camino::{Utf8Path, Utf8PathBuf};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

const APPLICATION: &str = "slack";
const CONFIG_FILE_NAME: &str = "config.toml";
const CONFIG_FILE_ENV_VAR: &str = "SLACK_CONFIG_FILE";
const VARIABLE_PREFIX: &str = "SLACK_";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config file {path}: {source}")]
    Io { path: Utf8PathBuf, source: io::Error },

    #[error("invalid config file {path}: {source}")]
    Toml {
        path: Utf8PathBuf,
        source: toml::de::Error,
    },

    #[error("no Slack token configured, set `token` in config.toml, SLACK_TOKEN or --token")]
    MissingToken,

    #[error(transparent)]
    Client(#[from] slack_api::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Bot (`xoxb-`) or user (`xoxp-`) token.
    pub token: Option<String>,

    /// Web API endpoint, defaults to [`slack_api::DEFAULT_API_BASE`].
    pub api_base: Option<String>,

    pub user_agent: Option<String>,
}

impl Config {
    /// Load the file and environment layers.
    ///
    /// An explicitly requested file must exist, the default location may be
    /// absent.
    pub fn load(explicit: Option<&Utf8Path>) -> Result<Self, Error> {
        let from_env = file_from_env(|key| env::var(key).ok());

        let file = match explicit.map(Utf8Path::to_path_buf).or(from_env) {
            Some(path) => Self::from_file(&path)?,
            None => match default_path() {
                Some(path) if path.is_file() => Self::from_file(&path)?,
                _ => Self::default(),
            },
        };

        Ok(Self::from_envs(|key| env::var(key).ok()).merge(file))
    }

    pub fn from_file(path: &Utf8Path) -> Result<Self, Error> {
        trace!(path = path.as_str(), "Loading configuration file.");

        let contents = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

        toml::from_str(&contents).map_err(|source| Error::Toml {
            path: path.to_owned(),
            source,
        })
    }

    /// Read `SLACK_TOKEN`, `SLACK_API_BASE` and `SLACK_USER_AGENT`.
    pub fn from_envs(var: impl Fn(&str) -> Option<String>) -> Self {
        let get = |name: &str| {
            var(&format!("{VARIABLE_PREFIX}{name}")).filter(|value| !value.is_empty())
        };

        Self {
            token: get("TOKEN"),
            api_base: get("API_BASE"),
            user_agent: get("USER_AGENT"),
        }
    }

    /// Fill unset fields from `fallback`.
    #[must_use]
    pub fn merge(self, fallback: Self) -> Self {
        Self {
            token: self.token.or(fallback.token),
            api_base: self.api_base.or(fallback.api_base),
            user_agent: self.user_agent.or(fallback.user_agent),
        }
    }

    pub fn client(&self) -> Result<slack_api::Client, Error> {
        let token = self.token.as_deref().ok_or(Error::MissingToken)?;

        let mut builder = slack_api::Client::builder().token(token);
        if let Some(api_base) = &self.api_base {
            builder = builder.api_base(api_base);
        }
        if let Some(user_agent) = &self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder.build()?;
        debug!(api_base = client.api_base(), "Slack client configured.");

        Ok(client)
    }
}

/// Path named by `SLACK_CONFIG_FILE`, ignoring an empty value.
fn file_from_env(var: impl Fn(&str) -> Option<String>) -> Option<Utf8PathBuf> {
    var(CONFIG_FILE_ENV_VAR)
        .filter(|value| !value.is_empty())
        .map(Utf8PathBuf::from)
}

/// `<user config dir>/slack/config.toml`, if the platform has one.
#[must_use]
pub fn default_path() -> Option<Utf8PathBuf> {
    ProjectDirs::from("", "", APPLICATION)
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
        .and_then(|path| Utf8PathBuf::from_path_buf(path).ok())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;
    use camino_tempfile::tempdir;
    use indoc::indoc;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn reads_toml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, indoc! {r#"
            token = "xoxb-file"
            api_base = "https://slack.example.com/api"
        "#})
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config, Config {
            token: Some("xoxb-file".to_owned()),
            api_base: Some("https://slack.example.com/api".to_owned()),
            user_agent: None,
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "tokn = \"typo\"\n").unwrap();

        assert_matches!(Config::from_file(&path), Err(Error::Toml { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.toml");

        assert_matches!(Config::load(Some(path.as_path())), Err(Error::Io { .. }));
    }

    #[test]
    fn environment_overrides_file() {
        let vars = HashMap::from([
            ("SLACK_TOKEN", "xoxb-env"),
            ("SLACK_API_BASE", ""),
        ]);
        let envs = Config::from_envs(|key| vars.get(key).map(|v| (*v).to_owned()));

        let file = Config {
            token: Some("xoxb-file".to_owned()),
            api_base: Some("https://slack.example.com/api".to_owned()),
            user_agent: Some("ops-bot".to_owned()),
        };

        assert_eq!(envs.merge(file), Config {
            token: Some("xoxb-env".to_owned()),
            api_base: Some("https://slack.example.com/api".to_owned()),
            user_agent: Some("ops-bot".to_owned()),
        });
    }

    #[test]
    fn empty_config_file_variable_is_ignored() {
        let env = |value: &'static str| {
            move |key: &str| (key == CONFIG_FILE_ENV_VAR).then(|| value.to_owned())
        };

        assert_eq!(file_from_env(|_| None), None);
        assert_eq!(file_from_env(env("")), None);
        assert_eq!(
            file_from_env(env("/etc/slack.toml")),
            Some(Utf8PathBuf::from("/etc/slack.toml"))
        );
    }

    #[test]
    fn client_requires_token() {
        assert_matches!(Config::default().client(), Err(Error::MissingToken));

        let config = Config {
            token: Some("xoxb-test".to_owned()),
            api_base: Some("http://localhost:3000/api/".to_owned()),
            user_agent: None,
        };
        let client = config.client().unwrap();
        assert_eq!(client.api_base(), "http://localhost:3000/api");
    }
}
