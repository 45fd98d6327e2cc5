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

/// Body of `PATCH /repos/{owner}/{repo}/check-runs/{check_run_id}`.
///
/// Every field is optional; fields that were never set are left out of the
/// request so GitHub keeps their current values.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct UpdateCheckRunOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    details_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    external_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<CheckRunStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    conclusion: Option<CheckRunConclusion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<CheckRunOutput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    actions: Option<Vec<CheckRunAction>>,
}

impl UpdateCheckRunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// The name of the check. For example, "code-coverage".
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn details_url(mut self, details_url: impl Into<String>) -> Self {
        self.details_url = Some(details_url.into());
        self
    }

    pub fn external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    pub fn started_at(mut self, started_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.started_at = Some(started_at.into());
        self
    }

    pub fn status(mut self, status: impl Into<CheckRunStatus>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Providing a conclusion will automatically set the status to
    /// completed.
    pub fn conclusion(mut self, conclusion: impl Into<CheckRunConclusion>) -> Self {
        self.conclusion = Some(conclusion.into());
        self
    }

    pub fn completed_at(mut self, completed_at: impl Into<chrono::DateTime<chrono::Utc>>) -> Self {
        self.completed_at = Some(completed_at.into());
        self
    }

    pub fn output(mut self, output: impl Into<CheckRunOutput>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn actions(mut self, actions: impl Into<Vec<CheckRunAction>>) -> Self {
        self.actions = Some(actions.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn empty_update_serializes_to_empty_object() {
        assert_eq!(
            serde_json::to_value(UpdateCheckRunOptions::new()).unwrap(),
            serde_json::json!({})
        );
    }

    #[test]
    fn completed_update_carries_conclusion_and_timestamp() {
        let completed_at = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let options = UpdateCheckRunOptions::new()
            .status(CheckRunStatus::Completed)
            .conclusion(CheckRunConclusion::TimedOut)
            .completed_at(completed_at);
        assert_eq!(
            serde_json::to_value(&options).unwrap(),
            serde_json::json!({
                "status": "completed",
                "conclusion": "timed_out",
                "completed_at": "2024-03-01T12:00:00Z",
            })
        );
    }
}
