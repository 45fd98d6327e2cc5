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

//! Bounded retries with a pluggable delay schedule.
//!
//! [`RetryPolicy::run`] drives an async operation with [`backon`] until it
//! succeeds, the attempt budget is spent, or the [`CancellationToken`] fires.
//! Every error is treated as retryable.

use std::future::Future;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use backon::{BackoffBuilder, ConstantBuilder, ExponentialBuilder, Retryable};
use tokio_util::sync::CancellationToken;

/// How long to wait before the next attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Backoff {
    /// The same delay between every pair of attempts.
    Fixed(Duration),
    /// `initial * factor^n` after the n-th failure (zero based), capped at `max`.
    Exponential {
        initial: Duration,
        factor: f64,
        max: Duration,
    },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Backoff,
    /// Adds a random extra delay of up to one base delay to every sleep.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    /// Five attempts, one second apart. GitHub intermittently answers
    /// `401 Bad credentials` for valid tokens; this is enough to ride it out.
    fn default() -> Self {
        Self::fixed(5, Duration::from_secs(1))
    }
}

/// Why [`RetryPolicy::run`] gave up.
#[derive(Debug)]
pub enum RetryError<E> {
    /// Every attempt failed; holds the error of the last one.
    Exhausted { attempts: u32, last: E },
    /// The token fired before an attempt succeeded.
    Cancelled { attempts: u32 },
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            backoff: Backoff::Fixed(delay),
            jitter: false,
        }
    }

    pub fn with_jitter(mut self) -> Self {
        self.jitter = true;
        self
    }

    /// Sleeps taken after failed attempts, before jitter. There is one fewer
    /// than the attempt budget, since nothing sleeps after the final attempt.
    pub fn delays(&self) -> Vec<Duration> {
        match self.backoff {
            Backoff::Fixed(delay) => self.constant(delay).build().collect(),
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => self.exponential(initial, factor, max).build().collect(),
        }
    }

    /// Runs `operation` until it succeeds or the policy gives up.
    ///
    /// `on_failure` is called with the 1-based attempt number after every
    /// failed attempt, before sleeping. There is no sleep after the final
    /// attempt. A `max_attempts` of zero still makes one attempt.
    pub async fn run<T, E, F, Fut>(
        &self,
        cancel: &CancellationToken,
        operation: F,
        on_failure: impl FnMut(u32, &E),
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        match self.backoff {
            Backoff::Fixed(delay) => {
                drive(self.constant(delay), cancel, operation, on_failure).await
            }
            Backoff::Exponential {
                initial,
                factor,
                max,
            } => {
                let builder = self.exponential(initial, factor, max);
                drive(builder, cancel, operation, on_failure).await
            }
        }
    }

    fn retries(&self) -> usize {
        self.max_attempts.saturating_sub(1) as usize
    }

    fn constant(&self, delay: Duration) -> ConstantBuilder {
        let builder = ConstantBuilder::default()
            .with_delay(delay)
            .with_max_times(self.retries());
        if self.jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }

    fn exponential(&self, initial: Duration, factor: f64, max: Duration) -> ExponentialBuilder {
        let builder = ExponentialBuilder::default()
            .with_min_delay(initial)
            .with_factor(factor as f32)
            .with_max_delay(max)
            .with_max_times(self.retries());
        if self.jitter {
            builder.with_jitter()
        } else {
            builder
        }
    }
}

async fn drive<B, T, E, F, Fut>(
    builder: B,
    cancel: &CancellationToken,
    mut operation: F,
    mut on_failure: impl FnMut(u32, &E),
) -> Result<T, RetryError<E>>
where
    B: BackoffBuilder,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let attempts = AtomicU32::new(0);
    let outcome = {
        let retry = (|| operation(attempts.fetch_add(1, Ordering::SeqCst) + 1))
            .retry(builder)
            .sleep(tokio::time::sleep)
            .notify(|err: &E, _| on_failure(attempts.load(Ordering::SeqCst), err));
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            result = retry => Some(result),
        }
    };

    let attempts = attempts.load(Ordering::SeqCst);
    match outcome {
        None => Err(RetryError::Cancelled { attempts }),
        Some(Ok(value)) => Ok(value),
        Some(Err(last)) => {
            // backon only notifies before a sleep; the last failure is ours to report.
            on_failure(attempts, &last);
            Err(RetryError::Exhausted { attempts, last })
        }
    }
}
