//! Timing and sampling around service entry points.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Thresholds for [`CallMonitor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallPolicy {
    /// Calls slower than this are logged at warn level.
    pub slow_call: Duration,
    /// Every `sample_rate`-th call is logged at debug level. Zero disables sampling.
    pub sample_rate: u64,
}

impl Default for CallPolicy {
    fn default() -> Self {
        Self {
            slow_call: Duration::from_millis(1200),
            sample_rate: 10_000,
        }
    }
}

/// Records duration metrics for wrapped calls and logs slow or sampled ones.
#[derive(Debug, Default)]
pub struct CallMonitor {
    policy: CallPolicy,
    calls: AtomicU64,
}

impl CallMonitor {
    /// Creates a monitor with the given policy.
    pub fn new(policy: CallPolicy) -> Self {
        Self {
            policy,
            calls: AtomicU64::new(0),
        }
    }

    /// Returns the policy in use.
    pub fn policy(&self) -> CallPolicy {
        self.policy
    }

    /// Returns how many calls have been observed.
    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }

    /// Runs `call`, recording how long it took.
    pub async fn observe<F: Future>(&self, name: &'static str, call: F) -> F::Output {
        let seq = self.calls.fetch_add(1, Ordering::Relaxed);
        let started = Instant::now();

        let output = call.await;

        let elapsed = started.elapsed();
        metrics::histogram!("call_duration_seconds", "call" => name)
            .record(elapsed.as_secs_f64());

        if elapsed > self.policy.slow_call {
            tracing::warn!(
                call = name,
                elapsed_ms = elapsed.as_millis() as u64,
                threshold_ms = self.policy.slow_call.as_millis() as u64,
                "slow call"
            );
        } else if self.is_sampled(seq) {
            tracing::debug!(call = name, elapsed_ms = elapsed.as_millis() as u64, "sampled call");
        }

        output
    }

    fn is_sampled(&self, seq: u64) -> bool {
        self.policy.sample_rate > 0 && seq % self.policy.sample_rate == 0
    }
}
