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

use async_trait::async_trait;
use octocrab::Octocrab;

use crate::error::ApiError;
use crate::octocrab_extra::checks::{CreateCheckRunOptions, UpdateCheckRunOptions};
use crate::octocrab_extra::models::checks::{CheckRun, CheckRunId};
use crate::octocrab_extra::models::pulls::PullRequest;
use crate::octocrab_extra::OctocrabExt;

/// The raw GitHub calls. Each method is exactly one request; retrying is
/// the caller's business.
#[async_trait]
pub trait RemoteCheckApi: Send + Sync {
    async fn pull_request(&self, owner: &str, repo: &str, number: u64)
        -> Result<PullRequest, ApiError>;

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        options: &CreateCheckRunOptions,
    ) -> Result<CheckRun, ApiError>;

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, ApiError>;
}

#[async_trait]
impl RemoteCheckApi for Octocrab {
    async fn pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, ApiError> {
        Ok(self.pull_refs(owner, repo).get(number).await?)
    }

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        options: &CreateCheckRunOptions,
    ) -> Result<CheckRun, ApiError> {
        Ok(self.check_runs(owner, repo).create(options).await?)
    }

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, ApiError> {
        Ok(self
            .check_runs(owner, repo)
            .update(check_run_id, options)
            .await?)
    }
}

#[async_trait]
impl<T: RemoteCheckApi + ?Sized> RemoteCheckApi for std::sync::Arc<T> {
    async fn pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, ApiError> {
        (**self).pull_request(owner, repo, number).await
    }

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        options: &CreateCheckRunOptions,
    ) -> Result<CheckRun, ApiError> {
        (**self).create_check_run(owner, repo, options).await
    }

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, ApiError> {
        (**self)
            .update_check_run(owner, repo, check_run_id, options)
            .await
    }
}
