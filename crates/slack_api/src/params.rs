use std::{fmt, str::FromStr};

/// The kind of conversation to include in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversationType {
    PublicChannel,
    PrivateChannel,
    Mpim,
    Im,
}

impl ConversationType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PublicChannel => "public_channel",
            Self::PrivateChannel => "private_channel",
            Self::Mpim => "mpim",
            Self::Im => "im",
        }
    }
}

impl fmt::Display for ConversationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConversationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "public_channel" => Ok(Self::PublicChannel),
            "private_channel" => Ok(Self::PrivateChannel),
            "mpim" => Ok(Self::Mpim),
            "im" => Ok(Self::Im),
            other => Err(format!(
                "unknown conversation type `{other}`, expected one of: public_channel, \
                 private_channel, mpim, im"
            )),
        }
    }
}

/// Ordered `name=value` pairs sent with a single API call.
///
/// Unset optional values never make it into the list, so what is stored here
/// is exactly what goes over the wire, either as a query string or as a
/// form-encoded body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(&'static str, String)>);

impl Params {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    #[must_use]
    pub fn with_opt(self, name: &'static str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    #[must_use]
    pub fn with_flag(self, name: &'static str, value: bool) -> Self {
        self.with(name, bool_str(value))
    }

    #[must_use]
    pub fn with_opt_flag(self, name: &'static str, value: Option<bool>) -> Self {
        self.with_opt(name, value.map(bool_str))
    }

    #[must_use]
    pub fn with_number(self, name: &'static str, value: impl fmt::Display) -> Self {
        self.with(name, value.to_string())
    }

    #[must_use]
    pub fn with_opt_number(self, name: &'static str, value: Option<impl fmt::Display>) -> Self {
        self.with_opt(name, value.map(|v| v.to_string()))
    }

    /// Push a comma-separated list. An empty list is dropped.
    #[must_use]
    pub fn with_list<I, S>(self, name: &'static str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = values
            .into_iter()
            .map(|v| v.as_ref().to_owned())
            .collect::<Vec<_>>()
            .join(",");

        if joined.is_empty() {
            return self;
        }

        self.with(name, joined)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replace the value of `name`, or append it when absent.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = value,
            None => self.0.push((name, value)),
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(key, _)| *key)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[(&'static str, String)] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn optional_values_are_dropped() {
        let params = Params::new()
            .with("channel", "C123")
            .with_opt("cursor", None::<String>)
            .with_opt_flag("return_im", None)
            .with_opt_number("limit", None::<u16>)
            .with_list("users", Vec::<String>::new());

        assert_eq!(params.as_slice(), &[("channel", "C123".to_owned())]);
    }

    #[test]
    fn flags_and_numbers_are_rendered() {
        let params = Params::new()
            .with_flag("inclusive", false)
            .with_opt_flag("is_private", Some(true))
            .with_number("limit", 100_u16);

        assert_eq!(params.as_slice(), &[
            ("inclusive", "false".to_owned()),
            ("is_private", "true".to_owned()),
            ("limit", "100".to_owned()),
        ]);
    }

    #[test]
    fn lists_are_comma_separated() {
        let params = Params::new().with_list("users", ["U1", "U2", "U3"]);
        assert_eq!(params.get("users"), Some("U1,U2,U3"));
    }

    #[test]
    fn set_replaces_existing_value_in_place() {
        let mut params = Params::new()
            .with("channel", "C1")
            .with("cursor", "a")
            .with_number("limit", 10);

        params.set("cursor", "b");
        params.set("oldest", "0");

        assert_eq!(params.names().collect::<Vec<_>>(), vec![
            "channel", "cursor", "limit", "oldest"
        ]);
        assert_eq!(params.get("cursor"), Some("b"));
    }

    #[test]
    fn conversation_type_parses_wire_names() {
        for kind in [
            ConversationType::PublicChannel,
            ConversationType::PrivateChannel,
            ConversationType::Mpim,
            ConversationType::Im,
        ] {
            assert_eq!(kind.as_str().parse::<ConversationType>(), Ok(kind));
        }

        assert!("channel".parse::<ConversationType>().is_err());
    }
}
