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

use std::path::PathBuf;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

use crate::error::{ApiError, CheckerError};
use crate::git;
use crate::octocrab_extra::checks::{CreateCheckRunOptions, UpdateCheckRunOptions};
use crate::octocrab_extra::models::checks::{CheckRun, CheckRunId};
use crate::remote::RemoteCheckApi;
use crate::retry::{RetryError, RetryPolicy};

/// What a review tool needs from the hosting platform.
#[async_trait]
pub trait CheckerClient: Send + Sync {
    /// The unified diff of a pull request, computed against the local clone.
    async fn get_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<u8>, CheckerError>;

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        options: &CreateCheckRunOptions,
    ) -> Result<CheckRun, CheckerError>;

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, CheckerError>;
}

/// Updates check runs, retrying every failure according to its
/// [`RetryPolicy`].
///
/// GitHub sometimes rejects a perfectly good token with
/// `401 Bad credentials`; a handful of spaced-out retries gets past it.
/// Permanent failures are retried too. When all attempts fail, only the
/// last attempt's error is returned; the earlier ones are logged.
#[derive(Debug, Clone)]
pub struct CheckRunUpdater<A> {
    api: A,
    policy: RetryPolicy,
    cancel: CancellationToken,
}

impl<A: RemoteCheckApi> CheckRunUpdater<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            policy: RetryPolicy::default(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Stops any in-flight update, including its sleeps, once `cancel` fires.
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub async fn update(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, CheckerError> {
        let max_attempts = self.policy.max_attempts.max(1);
        let result = self
            .policy
            .run(
                &self.cancel,
                |_| self.api.update_check_run(owner, repo, check_run_id, options),
                |attempt, err: &ApiError| {
                    let body = match err.response_body() {
                        Ok(body) => body,
                        Err(read_err) => {
                            error!("failed to read error response body: {read_err}");
                            String::new()
                        }
                    };
                    error!(
                        %check_run_id,
                        attempt,
                        status = ?err.status(),
                        "update_check_run failed: {body}"
                    );
                    if attempt < max_attempts {
                        debug!(%check_run_id, "retrying update_check_run...: {attempt}");
                    }
                },
            )
            .await;

        match result {
            Ok(check_run) => {
                debug!(%check_run_id, status = ?check_run.status, "check run updated");
                Ok(check_run)
            }
            Err(RetryError::Exhausted { attempts, last }) => {
                error!(%check_run_id, attempts, "giving up on update_check_run");
                Err(last.into())
            }
            Err(RetryError::Cancelled { attempts, .. }) => {
                debug!(%check_run_id, attempts, "update_check_run cancelled");
                Err(CheckerError::Cancelled)
            }
        }
    }
}

/// [`CheckerClient`] backed by the GitHub REST API and a local clone.
///
/// The API client is constructed once by the caller and handed in, so the
/// same authenticated `Octocrab` can be shared between checkers.
#[derive(Debug, Clone)]
pub struct GitHubChecker<A> {
    updater: CheckRunUpdater<A>,
    workdir: PathBuf,
}

impl<A: RemoteCheckApi> GitHubChecker<A> {
    pub fn new(api: A) -> Self {
        Self {
            updater: CheckRunUpdater::new(api),
            workdir: PathBuf::from("."),
        }
    }

    /// Directory of the local clone `git diff` runs in.
    pub fn with_workdir(mut self, workdir: impl Into<PathBuf>) -> Self {
        self.workdir = workdir.into();
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.updater = self.updater.with_policy(policy);
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.updater = self.updater.with_cancellation(cancel);
        self
    }

    fn api(&self) -> &A {
        self.updater.api()
    }
}

#[async_trait]
impl<A: RemoteCheckApi> CheckerClient for GitHubChecker<A> {
    async fn get_pull_request_diff(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Vec<u8>, CheckerError> {
        let pull_request = self.api().pull_request(owner, repo, number).await?;
        git::diff(
            &self.workdir,
            &pull_request.base.sha,
            &pull_request.head.sha,
        )
        .await
    }

    async fn create_check_run(
        &self,
        owner: &str,
        repo: &str,
        options: &CreateCheckRunOptions,
    ) -> Result<CheckRun, CheckerError> {
        let check_run = self.api().create_check_run(owner, repo, options).await?;
        debug!(check_run_id = %check_run.id, name = options.name(), "check run created");
        Ok(check_run)
    }

    async fn update_check_run(
        &self,
        owner: &str,
        repo: &str,
        check_run_id: CheckRunId,
        options: &UpdateCheckRunOptions,
    ) -> Result<CheckRun, CheckerError> {
        self.updater
            .update(owner, repo, check_run_id, options)
            .await
    }
}
