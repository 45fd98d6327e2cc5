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

use chrono::Utc;
use github_checker::{
    git, CheckRunConclusion, CheckRunOutput, CheckRunStatus, CheckerClient, CheckerError, Config,
    CreateCheckRunOptions, GitHubChecker, UpdateCheckRunOptions,
};
use miette::Context;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env()?;
    let octocrab = config.octocrab()?;
    let checker = GitHubChecker::new(octocrab)
        .with_workdir(&config.workdir)
        .with_retry_policy(config.retry);

    let (owner, repo) = (config.owner.as_str(), config.repo.as_str());
    let check_run = checker
        .create_check_run(
            owner,
            repo,
            &CreateCheckRunOptions::new(&config.check_name, &config.head_sha)
                .status(CheckRunStatus::InProgress)
                .started_at(Utc::now()),
        )
        .await
        .wrap_err("failed to create check run")?;
    info!(check_run_id = %check_run.id, pull_request = config.pull_request, "check run started");

    let diff = checker
        .get_pull_request_diff(owner, repo, config.pull_request)
        .await;

    let update = completion(&config, &diff);

    let check_run = checker
        .update_check_run(owner, repo, check_run.id, &update.status(CheckRunStatus::Completed))
        .await
        .wrap_err("failed to update check run")?;
    info!(check_run_id = %check_run.id, conclusion = ?check_run.conclusion, "check run completed");

    diff.wrap_err("failed to diff pull request")?;

    Ok(())
}

/// The final state of the check run, given how the diff went. A failed diff
/// is logged here, since the check run only carries its text.
fn completion(config: &Config, diff: &Result<Vec<u8>, CheckerError>) -> UpdateCheckRunOptions {
    match diff {
        Ok(diff) => {
            let files = git::changed_files(diff);
            UpdateCheckRunOptions::new()
                .conclusion(CheckRunConclusion::Success)
                .completed_at(Utc::now())
                .output(CheckRunOutput::new(
                    config.check_name.clone(),
                    format!("{files} changed file(s) in pull request #{}", config.pull_request),
                ))
        }
        Err(err) => {
            error!(pull_request = config.pull_request, "failed to diff pull request: {err}");
            UpdateCheckRunOptions::new()
                .conclusion(CheckRunConclusion::Failure)
                .completed_at(Utc::now())
                .output(
                    CheckRunOutput::new(config.check_name.clone(), "could not compute the diff")
                        .text(format!("```\n{err}\n```")),
                )
        }
    }
}
