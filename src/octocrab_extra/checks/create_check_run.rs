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

use crate::octocrab_extra::models::checks::{
    CheckRunAction, CheckRunConclusion, CheckRunOutput, CheckRunStatus,
};

/// Body of `POST /repos/{owner}/{repo}/check-runs`.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CreateCheckRunOptions {
    name: String,
    head_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<CheckRunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conclusion: Option<CheckRunConclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CheckRunOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actions: Option<Vec<CheckRunAction>>,
}

impl CreateCheckRunOptions {
    pub fn new(name: impl Into<String>, head_sha: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            head_sha: head_sha.into(),
            details_url: None,
            external_id: None,
            status: None,
            started_at: None,
            conclusion: None,
            completed_at: None,
            output: None,
            actions: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn head_sha(&self) -> &str {
        &self.head_sha
    }

    /// The URL of the integrator's site that has the full details of the
    /// check. If the integrator does not provide this, then the homepage of
    /// the GitHub app is used.
    pub fn details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(details_url.into());
        self
    }

    /// A reference for the run on the integrator's system.
    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// The current status.
    /// Default: [`CheckRunStatus::Queued`]
    pub fn status(mut self, status: impl Into<CheckRunStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// The time that the check run began.
    pub fn started_at(mut self, started_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.started_at = Some(started_at.into());
        self
    }

    /// The final conclusion of the check. **Required if you provide
    /// [`completed_at`](Self::completed_at) or a status of
    /// [`CheckRunStatus::Completed`]**.
    /// Note: Providing conclusion will automatically set the status parameter
    /// to completed. You cannot change a check run conclusion to stale, only
    /// GitHub can set this.
    pub fn conclusion(mut self, conclusion: impl Into<CheckRunConclusion>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    /// The time that the check completed.
    pub fn completed_at(mut self, completed_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.completed_at = Some(completed_at.into());
        self
    }

    /// Check runs can accept a variety of data in the `output` object,
    /// including a `title` and `summary` and can optionally provide
    /// descriptive details about the run.
    pub fn output(mut self, output: impl Into<CheckRunOutput>) -> Self {
        self.output = Some(output.into());
        self
    }

    /// Displays a button on GitHub that can be clicked to alert your app to
    /// do additional tasks. A maximum of three actions are accepted.
    pub fn actions(mut self, actions: impl Into<Vec<CheckRunAction>>) -> Self {
        self.actions = Some(actions.into());
        self
    }
}
