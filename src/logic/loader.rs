// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Fetch the people list from the namegame endpoint.
//!
//! Responsibilities:
//! - Issue a single GET to the configured endpoint (no retries, no caching).
//! - Parse the JSON array of `{name, url}` records and derive each last name.
//! - Reject records whose name lacks a last name without failing the whole load.
//! - Resolve and fetch photo URLs for thumbnails.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use thiserror::Error;
use url::Url;

use crate::models::{MalformedNameError, Person, RawPerson};

/// Endpoint the application talks to unless overridden on the command line.
pub const DEFAULT_ENDPOINT: &str = "http://api.namegame.willowtreemobile.com/";

/// Failure while loading the people list or a photo.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The request never produced a response (DNS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with something other than `200 OK`.
    #[error("unexpected HTTP status {0}")]
    Status(u16),
    /// The body is not JSON or not an array of `{name, url}` objects.
    #[error("response is not a list of people: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Coarse classification of [`LoadError`] for callers that only branch on the kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadErrorKind {
    Transport,
    Status,
    Parse,
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Transport(_) => LoadErrorKind::Transport,
            LoadError::Status(_) => LoadErrorKind::Status,
            LoadError::Parse(_) => LoadErrorKind::Parse,
        }
    }
}

/// Result of a successful load: accepted people in endpoint order plus rejected records.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoadedPeople {
    pub people: Vec<Person>,
    pub skipped: Vec<MalformedNameError>,
}

/// Build the shared blocking HTTP client used by the command workers.
pub fn build_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

/// Fetch and parse the people list from `endpoint`.
///
/// # Errors
///
/// Returns [`LoadError::Transport`] when the request fails, [`LoadError::Status`]
/// for any status other than 200, and [`LoadError::Parse`] for a malformed body.
pub fn load_people(client: &Client, endpoint: &Url) -> Result<LoadedPeople, LoadError> {
    tracing::info!(%endpoint, "loading people");
    let response = client.get(endpoint.clone()).send()?;
    let status = response.status().as_u16();
    if status != 200 {
        return Err(LoadError::Status(status));
    }
    let body = response.text()?;
    let loaded = people_from_response(status, &body)?;
    tracing::info!(
        people = loaded.people.len(),
        skipped = loaded.skipped.len(),
        "people loaded"
    );
    Ok(loaded)
}

/// Interpret an HTTP status and body as a people list.
pub fn people_from_response(status: u16, body: &str) -> Result<LoadedPeople, LoadError> {
    if status != 200 {
        return Err(LoadError::Status(status));
    }

    let raw: Vec<RawPerson> = serde_json::from_str(body)?;
    let mut loaded = LoadedPeople::default();
    for entry in raw {
        match Person::try_from(entry) {
            Ok(person) => loaded.people.push(person),
            Err(err) => {
                tracing::warn!(name = %err.name, "skipping person without a last name");
                loaded.skipped.push(err);
            }
        }
    }
    Ok(loaded)
}

/// Resolve a photo URL from the endpoint, which may be protocol-relative (`//host/path`)
/// or relative to the endpoint.
pub fn resolve_photo_url(endpoint: &Url, raw: &str) -> Result<Url, url::ParseError> {
    endpoint.join(raw.trim())
}

/// Download the raw bytes of a photo.
pub fn fetch_photo(client: &Client, url: &Url) -> Result<Vec<u8>, LoadError> {
    let response = client.get(url.clone()).send()?;
    let status = response.status();
    if !status.is_success() {
        return Err(LoadError::Status(status.as_u16()));
    }
    Ok(response.bytes()?.to_vec())
}
