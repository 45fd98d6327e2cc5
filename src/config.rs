// Copyright 2022 Alexander Krivács Schrøder
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//
// OR
//
// Licensed under the MIT License. See LICENSE-MIT for details.

//! Settings read from the environment, following the GitHub Actions
//! conventions (`INPUT_*` for action inputs, `GITHUB_*` for the runner).

use std::path::PathBuf;
use std::time::Duration;

use miette::Diagnostic;
use octocrab::service::middleware::retry::RetryConfig;
use octocrab::Octocrab;
use thiserror::Error;

use crate::retry::{Backoff, RetryPolicy};

pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_CHECK_NAME: &str = "github-checker";

#[derive(Error, Diagnostic, Debug)]
pub enum ConfigError {
    #[error("`{0}` environment variable missing")]
    #[diagnostic(code(github_checker::config::missing))]
    Missing(&'static str),

    #[error("`GITHUB_REPOSITORY` must look like `owner/repo`, got `{0}`")]
    #[diagnostic(code(github_checker::config::repository))]
    Repository(String),

    #[error("`{name}` must be a non-negative integer, got `{value}`")]
    #[diagnostic(code(github_checker::config::number))]
    Number { name: &'static str, value: String },

    #[error("could not build the GitHub client for `{api_url}`")]
    #[diagnostic(code(github_checker::config::client))]
    Client {
        api_url: String,
        #[source]
        source: octocrab::Error,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub token: String,
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub check_name: String,
    pub head_sha: String,
    pub pull_request: u64,
    pub workdir: PathBuf,
    pub retry: RetryPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from any variable source. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));
        let number = |name: &'static str| -> Result<Option<u64>, ConfigError> {
            var(name)
                .map(|value| {
                    value
                        .trim()
                        .parse()
                        .map_err(|_| ConfigError::Number { name, value })
                })
                .transpose()
        };

        let token = var("INPUT_TOKEN")
            .or_else(|| var("GITHUB_TOKEN"))
            .ok_or(ConfigError::Missing("INPUT_TOKEN"))?;

        let repository = required("GITHUB_REPOSITORY")?;
        let (owner, repo) = match repository.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                (owner.to_owned(), repo.to_owned())
            }
            _ => return Err(ConfigError::Repository(repository)),
        };

        let pull_request =
            number("INPUT_PULL_REQUEST")?.ok_or(ConfigError::Missing("INPUT_PULL_REQUEST"))?;

        let mut retry = RetryPolicy::default();
        if let Some(max_attempts) = number("INPUT_MAX_ATTEMPTS")? {
            retry.max_attempts = u32::try_from(max_attempts).unwrap_or(u32::MAX);
        }
        if let Some(delay_ms) = number("INPUT_RETRY_DELAY_MS")? {
            retry.backoff = Backoff::Fixed(Duration::from_millis(delay_ms));
        }

        Ok(Self {
            token,
            owner,
            repo,
            api_url: var("GITHUB_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_owned()),
            check_name: var("INPUT_NAME").unwrap_or_else(|| DEFAULT_CHECK_NAME.to_owned()),
            head_sha: required("GITHUB_SHA")?,
            pull_request,
            workdir: var("INPUT_WORKDIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
            retry,
        })
    }

    /// The authenticated client. Build it once and share it.
    pub fn octocrab(&self) -> Result<Octocrab, ConfigError> {
        client(&self.api_url, self.token.clone())
    }
}

/// Builds an Octocrab for `api_url` with octocrab's own retry layer switched
/// off. Every request it sends is sent exactly once, so `RetryPolicy` is the
/// only thing that decides how many times an update reaches GitHub.
pub fn client(api_url: &str, token: String) -> Result<Octocrab, ConfigError> {
    let client_error = |source: octocrab::Error| ConfigError::Client {
        api_url: api_url.to_owned(),
        source,
    };
    Octocrab::builder()
        .base_uri(api_url)
        .map_err(client_error)?
        .add_retry_config(RetryConfig::None)
        .personal_token(token)
        .build()
        .map_err(client_error)
}
