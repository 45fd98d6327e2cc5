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

use std::fmt;

/// Identifier of a check run, as assigned by GitHub when it was created.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
pub struct CheckRunId(pub u64);

impl fmt::Display for CheckRunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for CheckRunId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CheckRunStatus {
    Queued,
    InProgress,
    Completed,
    Waiting,
    Requested,
    Pending,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum CheckRunConclusion {
    ActionRequired,
    Cancelled,
    Failure,
    Neutral,
    Success,
    Skipped,
    Stale,
    TimedOut,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunOutput {
    pub title: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Vec<CheckRunAnnotation>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<CheckRunImage>>,
}

impl CheckRunOutput {
    pub fn new(title: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            summary: summary.into(),
            text: None,
            annotations: None,
            images: None,
        }
    }

    /// The details of the check. Supports Markdown. The maximum size is 65535
    /// characters.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Adds information from your analysis to specific lines of code. GitHub
    /// accepts at most 50 annotations per request.
    pub fn annotations(mut self, annotations: impl Into<Vec<CheckRunAnnotation>>) -> Self {
        self.annotations = Some(annotations.into());
        self
    }

    pub fn images(mut self, images: impl Into<Vec<CheckRunImage>>) -> Self {
        self.images = Some(images.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunAnnotation {
    /// The path of the file to add an annotation to. For example, assets/css/main.css.
    pub path: String,
    /// The start line of the annotation.
    pub start_line: u64,
    /// The end line of the annotation.
    pub end_line: u64,
    /// The start column of the annotation. Annotations only support
    /// `start_column` and `end_column` on the same line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_column: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_column: Option<u64>,
    /// The level of the annotation.
    pub annotation_level: AnnotationLevel,
    /// A short description of the feedback for these lines of code. The
    /// maximum size is 64 KB.
    pub message: String,
    /// The title that represents the annotation. The maximum size is 255
    /// characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_details: Option<String>,
}

impl CheckRunAnnotation {
    pub fn new(
        path: impl Into<String>,
        start_line: u64,
        end_line: u64,
        annotation_level: AnnotationLevel,
        message: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            start_line,
            end_line,
            start_column: None,
            end_column: None,
            annotation_level,
            message: message.into(),
            title: None,
            raw_details: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunImage {
    /// The alternative text for the image.
    pub alt: String,
    /// The full URL of the image.
    pub image_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunAction {
    /// The text to be displayed on a button in the web UI. The maximum size
    /// is 20 characters.
    pub label: String,
    /// A short explanation of what this action would do. The maximum size is
    /// 40 characters.
    pub description: String,
    /// A reference for the action on the integrator's system. The maximum
    /// size is 20 characters.
    pub identifier: String,
}

impl CheckRunAction {
    pub fn new(
        label: impl Into<String>,
        description: impl Into<String>,
        identifier: impl Into<String>,
    ) -> Self {
        Self {
            label: label.into(),
            description: description.into(),
            identifier: identifier.into(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum AnnotationLevel {
    Notice,
    Warning,
    Failure,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunOutputResponse {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub text: Option<String>,
    #[serde(default)]
    pub annotations_count: u64,
    pub annotations_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRunCheckSuite {
    pub id: u64,
}

/// A check performed on the code of a given code change.
///
/// Only `id` and `status` are guaranteed; everything else is whatever the
/// API chose to send back.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub struct CheckRun {
    /// The id of the check.
    pub id: CheckRunId,
    /// The phase of the lifecycle that the check is currently in.
    pub status: CheckRunStatus,
    #[serde(default)]
    pub name: Option<String>,
    /// The SHA of the commit that is being checked.
    #[serde(default)]
    pub head_sha: Option<String>,
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub details_url: Option<String>,
    #[serde(default)]
    pub conclusion: Option<CheckRunConclusion>,
    #[serde(default)]
    pub started_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub completed_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub output: Option<CheckRunOutputResponse>,
    #[serde(default)]
    pub check_suite: Option<CheckRunCheckSuite>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_check_run_decodes() {
        let run: CheckRun = serde_json::from_str(r#"{"id":42,"status":"completed"}"#).unwrap();
        assert_eq!(run.id, CheckRunId(42));
        assert_eq!(run.status, CheckRunStatus::Completed);
        assert_eq!(run.conclusion, None);
        assert_eq!(run.output, None);
    }

    #[test]
    fn full_check_run_decodes() {
        let run: CheckRun = serde_json::from_str(
            r#"{
                "id": 4,
                "head_sha": "ce587453ced02b1526dfb4cb910479d431683101",
                "node_id": "MDg6Q2hlY2tSdW40",
                "external_id": "",
                "url": "https://api.github.com/repos/github/hello-world/check-runs/4",
                "html_url": "https://github.com/github/hello-world/runs/4",
                "details_url": "https://example.com",
                "status": "completed",
                "conclusion": "neutral",
                "started_at": "2018-05-04T01:14:52Z",
                "completed_at": "2018-05-04T01:14:52Z",
                "output": {
                    "title": "Mighty Readme report",
                    "summary": "There are 0 failures found",
                    "text": "You may have some misspelled words on lines 2 and 4.",
                    "annotations_count": 2,
                    "annotations_url": "https://api.github.com/repos/github/hello-world/check-runs/4/annotations"
                },
                "name": "mighty_readme",
                "check_suite": { "id": 5 },
                "pull_requests": []
            }"#,
        )
        .unwrap();
        assert_eq!(run.id, CheckRunId(4));
        assert_eq!(run.conclusion, Some(CheckRunConclusion::Neutral));
        assert_eq!(run.name.as_deref(), Some("mighty_readme"));
        assert_eq!(run.output.unwrap().annotations_count, 2);
        assert_eq!(run.check_suite, Some(CheckRunCheckSuite { id: 5 }));
    }

    #[test]
    fn output_omits_absent_fields() {
        let output = CheckRunOutput::new("lint", "2 warnings");
        assert_eq!(
            serde_json::to_value(&output).unwrap(),
            serde_json::json!({ "title": "lint", "summary": "2 warnings" })
        );
    }
}
