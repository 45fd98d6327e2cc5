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

//! Talks to GitHub directly on behalf of a code review tool: fetches a pull
//! request's diff and creates and updates check runs.
//!
//! ```no_run
//! use github_checker::{CheckerClient, Config, GitHubChecker, UpdateCheckRunOptions};
//! use github_checker::{CheckRunConclusion, CheckRunId};
//!
//! # async fn run() -> miette::Result<()> {
//! let config = Config::from_env()?;
//! let checker = GitHubChecker::new(config.octocrab()?).with_workdir(&config.workdir);
//! checker
//!     .update_check_run(
//!         &config.owner,
//!         &config.repo,
//!         CheckRunId(42),
//!         &UpdateCheckRunOptions::new().conclusion(CheckRunConclusion::Success),
//!     )
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod checker;
pub mod config;
mod error;
pub mod git;
pub mod octocrab_extra;
mod remote;
pub mod retry;

pub use checker::{CheckRunUpdater, CheckerClient, GitHubChecker};
pub use config::{Config, ConfigError};
pub use error::{ApiError, BodyReadError, CheckerError};
pub use octocrab_extra::checks::{CreateCheckRunOptions, UpdateCheckRunOptions};
pub use octocrab_extra::models::checks::{
    AnnotationLevel, CheckRun, CheckRunAction, CheckRunAnnotation, CheckRunConclusion, CheckRunId,
    CheckRunOutput, CheckRunStatus,
};
pub use octocrab_extra::models::pulls::{PullRequest, PullRequestRef};
pub use octocrab_extra::OctocrabExt;
pub use remote::RemoteCheckApi;
pub use retry::{Backoff, RetryPolicy};
