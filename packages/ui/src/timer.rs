//! Platform timing: `gloo-timers` in the browser, tokio natively.

use std::time::Duration;

use chrono::{DateTime, Utc};

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Wall-clock time measured on the same clock [`sleep`] uses. Natively that is
/// tokio's clock, so a paused runtime holds it still as well.
pub fn now() -> DateTime<Utc> {
    #[cfg(target_arch = "wasm32")]
    {
        Utc::now()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use chrono::TimeDelta;

        thread_local! {
            static ANCHOR: (DateTime<Utc>, tokio::time::Instant) =
                (Utc::now(), tokio::time::Instant::now());
        }
        ANCHOR.with(|(wall, instant)| {
            let elapsed = tokio::time::Instant::now().saturating_duration_since(*instant);
            *wall + TimeDelta::from_std(elapsed).unwrap_or(TimeDelta::zero())
        })
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_now_follows_paused_clock() {
        let before = now();
        sleep(Duration::from_secs(3)).await;
        let elapsed = now() - before;
        assert_eq!(elapsed.num_seconds(), 3);
    }
}
