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

use std::path::Path;

use tokio::process::Command;
use tracing::debug;

use crate::error::CheckerError;

/// Runs `git diff --find-renames <base> <head>` inside `workdir`.
///
/// The patch goes from `base` to `head`, so it reads as what the pull request
/// introduces: added lines are `+`, files new in the branch are new files.
/// Passing head first would give the reversed patch. Both commits must
/// already be present in the local clone.
pub async fn diff(workdir: &Path, base: &str, head: &str) -> Result<Vec<u8>, CheckerError> {
    debug!(workdir = %workdir.display(), base, head, "running git diff");
    let output = Command::new("git")
        .arg("diff")
        .arg("--find-renames")
        .arg(base)
        .arg(head)
        .current_dir(workdir)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(CheckerError::GitSpawn)?;

    if !output.status.success() {
        return Err(CheckerError::GitDiff {
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
        });
    }

    Ok(output.stdout)
}

/// Number of files touched by a unified diff.
pub fn changed_files(diff: &[u8]) -> usize {
    diff.split(|&b| b == b'\n')
        .filter(|line| line.starts_with(b"diff --git "))
        .count()
}
