// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Person record domain model (UI-agnostic).

use serde::Deserialize;
use thiserror::Error;

use crate::utils::last_name;

/// Wire shape of one entry returned by the people endpoint.
///
/// Unknown fields are ignored so extra metadata on the endpoint does not break loading.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct RawPerson {
    pub name: String,
    pub url: String,
}

/// A person whose name has fewer than two word tokens, so no last name can be derived.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("name {name:?} has {tokens} word token(s); a first and last name are required")]
pub struct MalformedNameError {
    pub name: String,
    pub tokens: usize,
}

/// Immutable person record with its last name derived once at load time.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Person {
    name: String,
    url: String,
    last_name: String,
}

impl Person {
    /// Build a person, deriving the last name from the second word token of `name`.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self, MalformedNameError> {
        let name = name.into();
        let Some(derived) = last_name(&name).map(str::to_string) else {
            let tokens = crate::utils::names::name_tokens(&name).count();
            return Err(MalformedNameError { name, tokens });
        };
        Ok(Self {
            name,
            url: url.into(),
            last_name: derived,
        })
    }

    /// Build a person with a last name that need not match `name`.
    #[cfg(test)]
    pub(crate) fn with_last_name(
        name: impl Into<String>,
        url: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            last_name: last_name.into(),
        }
    }

    /// Full display name as received.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Photo URL as received (may be protocol-relative).
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Last name captured at load time. Not re-derived from [`Person::name`].
    pub fn last_name(&self) -> &str {
        &self.last_name
    }
}

impl TryFrom<RawPerson> for Person {
    type Error = MalformedNameError;

    fn try_from(raw: RawPerson) -> Result<Self, Self::Error> {
        Person::new(raw.name, raw.url)
    }
}
