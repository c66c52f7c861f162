use std::time::Duration;

use tokio::time::{Instant, sleep};

/// Evaluate `condition` repeatedly until it holds or `timeout` elapses,
/// sleeping `interval` between attempts. Returns whether the condition was
/// observed true; an exhausted poll is a normal outcome, never an error, and
/// the wait is always bounded.
///
/// The condition is checked at least once even with a zero timeout. This is
/// the single waiting primitive of the harness: launch detection, drawer
/// verification and post-action settling all go through it.
pub async fn poll_until<F>(timeout: Duration, interval: Duration, mut condition: F) -> bool
where
    F: AsyncFnMut() -> bool,
{
    let deadline = Instant::now() + timeout;
    loop {
        if condition().await {
            return true;
        }
        let now = Instant::now();
        if now >= deadline {
            return false;
        }
        sleep(interval.min(deadline - now)).await;
    }
}
