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

use crate::octocrab_extra::models::pulls::PullRequest;

pub struct PullRefHandler<'octo> {
    crab: &'octo Octocrab,
    owner: String,
    repo: String,
}

impl<'octo> PullRefHandler<'octo> {
    pub(crate) fn new(crab: &'octo Octocrab, owner: String, repo: String) -> Self {
        Self { crab, owner, repo }
    }

    /// Fetches a pull request's head and base commits.
    pub async fn get(&self, number: u64) -> octocrab::Result<PullRequest> {
        let route = format!(
            "/repos/{owner}/{repo}/pulls/{number}",
            owner = self.owner,
            repo = self.repo,
        );

        self.crab.get(route, None::<&()>).await
    }
}
