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

pub mod models {
    pub mod checks;
    pub mod pulls;
}
pub mod checks;
pub mod pulls;

/// Endpoints this crate needs that are typed against our own, more lenient
/// models. Named so they don't collide with `Octocrab`'s inherent `checks`
/// and `pulls` handlers.
pub trait OctocrabExt {
    fn check_runs(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> checks::CheckRunHandler<'_>;

    fn pull_refs(&self, owner: impl Into<String>, repo: impl Into<String>)
        -> pulls::PullRefHandler<'_>;
}

impl OctocrabExt for Octocrab {
    fn check_runs(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> checks::CheckRunHandler<'_> {
        checks::CheckRunHandler::new(self, owner.into(), repo.into())
    }

    fn pull_refs(
        &self,
        owner: impl Into<String>,
        repo: impl Into<String>,
    ) -> pulls::PullRefHandler<'_> {
        pulls::PullRefHandler::new(self, owner.into(), repo.into())
    }
}
