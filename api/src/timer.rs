//! A periodic timer that works both natively (tokio) and in the browser
//! (gloo-timers).
//!
//! Unlike a plain `tokio::time::interval`, the first tick fires one full
//! period after creation, and ticks missed while the owner was busy are
//! skipped rather than replayed.

#[cfg(target_arch = "wasm32")]
pub use wasm32::*;

#[cfg(not(target_arch = "wasm32"))]
pub use non_wasm32::*;

/// The period in whole milliseconds as the browser timer API takes it.
/// Periods too long for a `u32` saturate instead of wrapping.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn period_millis(period: std::time::Duration) -> u32 {
    u32::try_from(period.as_millis()).unwrap_or(u32::MAX)
}

#[cfg(target_arch = "wasm32")]
mod wasm32 {
    use super::period_millis;
    use std::time::Duration;
    use tokio::sync::mpsc;

    pub struct Interval {
        inner: Option<gloo_timers::callback::Interval>,
        rx: mpsc::Receiver<()>,
    }

    impl Interval {
        pub fn new(period: Duration) -> Self {
            // capacity 1: a tick that arrives while one is pending is dropped.
            let (tx, rx) = mpsc::channel(1);
            let gloo_interval = gloo_timers::callback::Interval::new(period_millis(period), move || {
                let _ = tx.try_send(());
            });

            Self {
                inner: Some(gloo_interval),
                rx,
            }
        }

        pub async fn tick(&mut self) {
            let _ = self.rx.recv().await;
        }
    }

    impl Drop for Interval {
        fn drop(&mut self) {
            if let Some(inner) = self.inner.take() {
                inner.cancel();
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod non_wasm32 {
    use std::time::Duration;
    use tokio::time::{self, Instant, MissedTickBehavior};

    pub struct Interval {
        inner: time::Interval,
    }

    impl Interval {
        pub fn new(period: Duration) -> Self {
            let mut interval = time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            Self { inner: interval }
        }

        pub async fn tick(&mut self) {
            self.inner.tick().await;
        }
    }
}
