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

use std::process::ExitStatus;

use miette::Diagnostic;
use thiserror::Error;

/// A single call to the GitHub API failed.
#[derive(Error, Diagnostic, Debug)]
pub enum ApiError {
    /// GitHub answered with an error payload, e.g. `401 Bad credentials`.
    #[error("GitHub API error ({status}): {message}")]
    #[diagnostic(code(github_checker::api::response))]
    Response {
        /// HTTP status code of the reply.
        status: u16,
        message: String,
        documentation_url: Option<String>,
        /// Per-field validation errors, present on `422` replies.
        errors: Option<Vec<serde_json::Value>>,
    },
    /// The request never produced a readable error payload.
    #[error("GitHub API request failed")]
    #[diagnostic(code(github_checker::api::transport))]
    Transport(#[source] octocrab::Error),
}

impl ApiError {
    pub fn response(status: u16, message: impl Into<String>) -> Self {
        Self::Response {
            status,
            message: message.into(),
            documentation_url: None,
            errors: None,
        }
    }

    /// HTTP status of the reply, when GitHub sent one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Response { status, .. } => Some(*status),
            Self::Transport(_) => None,
        }
    }

    /// The body GitHub sent back with the failure, re-encoded as JSON along
    /// with the HTTP status.
    pub fn response_body(&self) -> Result<String, BodyReadError> {
        match self {
            Self::Response {
                status,
                message,
                documentation_url,
                errors,
            } => Ok(serde_json::json!({
                "status": status,
                "message": message,
                "documentation_url": documentation_url,
                "errors": errors,
            })
            .to_string()),
            Self::Transport(error) => Err(BodyReadError(error.to_string())),
        }
    }
}

impl From<octocrab::Error> for ApiError {
    fn from(error: octocrab::Error) -> Self {
        match error {
            octocrab::Error::GitHub { source, .. } => Self::Response {
                status: source.status_code.as_u16(),
                message: source.message.clone(),
                documentation_url: source.documentation_url.clone(),
                errors: source.errors.clone(),
            },
            other => Self::Transport(other),
        }
    }
}

#[derive(Error, Diagnostic, Debug)]
#[error("no response body available: {0}")]
pub struct BodyReadError(pub String);

#[derive(Error, Diagnostic, Debug)]
pub enum CheckerError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Api(#[from] ApiError),

    #[error("failed to run git diff")]
    #[diagnostic(code(github_checker::git::spawn), help("is `git` installed and on PATH?"))]
    GitSpawn(#[source] std::io::Error),

    #[error("failed to run git diff ({status}): {stderr}")]
    #[diagnostic(code(github_checker::git::diff))]
    GitDiff { status: ExitStatus, stderr: String },

    #[error("operation was cancelled")]
    #[diagnostic(code(github_checker::cancelled))]
    Cancelled,
}

impl CheckerError {
    /// The underlying API error, if this failure came from GitHub.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Self::Api(error) => Some(error),
            _ => None,
        }
    }
}
