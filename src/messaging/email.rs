//! Email message model

use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use super::error::MessagingError;
use crate::constants::RECIPIENT_SEPARATORS;

/// An email as submitted by callers
///
/// `to_address` may hold several recipients separated by `;`, `,`, `|` or
/// spaces. Each one receives its own copy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Email {
    pub to_address: String,
    pub subject: String,
    /// HTML body
    pub message: String,
    pub from_address: Option<String>,
    pub from_name: Option<String>,
}

impl Email {
    pub fn new(
        to_address: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            to_address: to_address.into(),
            subject: subject.into(),
            message: message.into(),
            from_address: None,
            from_name: None,
        }
    }

    pub fn with_sender(mut self, address: impl Into<String>, name: Option<String>) -> Self {
        self.from_address = Some(address.into());
        self.from_name = name;
        self
    }

    /// Individual recipient entries, trimmed, empties dropped
    pub fn recipients(&self) -> Vec<&str> {
        self.to_address
            .split(RECIPIENT_SEPARATORS)
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}

/// A mailbox, optionally with a display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmailAddress {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl EmailAddress {
    pub fn new(email: impl Into<String>, name: Option<String>) -> Self {
        Self {
            email: email.into(),
            name: name.filter(|n| !n.trim().is_empty()),
        }
    }

    /// Parse `addr@example.com`, `<addr@example.com>` or `Name <addr@example.com>`
    pub fn parse(input: &str) -> Result<Self, MessagingError> {
        let input = input.trim();
        let invalid = || MessagingError::InvalidAddress(input.to_string());

        let (name, email) = match (input.find('<'), input.ends_with('>')) {
            (Some(open), true) => {
                let name = input[..open].trim().trim_matches('"').trim();
                let email = input[open + 1..input.len() - 1].trim();
                ((!name.is_empty()).then(|| name.to_string()), email)
            }
            (None, false) => (None, input),
            _ => return Err(invalid()),
        };

        if !is_plausible_address(email) {
            return Err(invalid());
        }
        Ok(Self::new(email, name))
    }
}

fn is_plausible_address(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(|c| c.is_whitespace() || c == '<' || c == '>')
        }
        None => false,
    }
}

impl FromStr for EmailAddress {
    type Err = MessagingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "{} <{}>", name, self.email),
            None => f.write_str(&self.email),
        }
    }
}
