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

use octocrab::Octocrab;

use crate::octocrab_extra::models::checks::{CheckRun, CheckRunId};

mod create_check_run;
mod update_check_run;

pub use create_check_run::CreateCheckRunOptions;
pub use update_check_run::UpdateCheckRunOptions;

pub struct CheckRunHandler<'octo> {
    crab: &'octo Octocrab,
    owner: String,
    repo: String,
}

impl<'octo> CheckRunHandler<'octo> {
    pub(crate) fn new(crab: &'octo Octocrab, owner: String, repo: String) -> Self {
        Self { crab, owner, repo }
    }

    /// Creates a new check run for a specific commit.
    pub async fn create(&self, options: &CreateCheckRunOptions) -> octocrab::Result<CheckRun> {
        let route = format!(
            "/repos/{owner}/{repo}/check-runs",
            owner = self.owner,
            repo = self.repo,
        );

        self.crab.post(route, Some(options)).await
    }

    /// Updates a check run for a specific commit. A single request; callers
    /// that want retries go through [`crate::CheckRunUpdater`].
    pub async fn update(
        &self,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> octocrab::Result<CheckRun> {
        let route = format!(
            "/repos/{owner}/{repo}/check-runs/{check_run_id}",
            owner = self.owner,
            repo = self.repo,
        );

        self.crab.patch(route, Some(options)).await
    }
}
