use chrono::{DateTime, TimeDelta, TimeZone};
use std::{fmt::Display, future::Future, time::Duration};
use tokio::time::{self, MissedTickBehavior};
use tracing::debug;

/// Runs a cycle right away, then once per period.
#[derive(Debug, Clone, Copy)]
pub struct Scheduler {
    period: Duration,
}

impl Scheduler {
    /// `period` must be non-zero.
    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    /// Drive `cycle` until `max_cycles` have run, or forever when it is `None`.
    ///
    /// A cycle that overruns the period delays the next tick instead of
    /// triggering a burst of catch-up runs.
    pub async fn run<F, Fut>(&self, max_cycles: Option<u64>, mut cycle: F) -> u64
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = ()>,
    {
        let mut ticker = time::interval(self.period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let mut completed = 0;
        loop {
            ticker.tick().await;
            cycle().await;
            completed += 1;

            if max_cycles.is_some_and(|max| completed >= max) {
                return completed;
            }
            debug!(completed, period_secs = self.period.as_secs(), "waiting for next cycle");
        }
    }
}

/// Human-readable note printed under each table.
pub fn next_update_message<Tz>(period: Duration, now: DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let next = TimeDelta::from_std(period)
        .ok()
        .and_then(|delta| now.clone().checked_add_signed(delta))
        .unwrap_or(now);

    format!(
        "Next update in {} (at {}).",
        describe_period(period),
        next.format("%H:%M:%S")
    )
}

fn describe_period(period: Duration) -> String {
    let secs = period.as_secs();
    let (count, unit) = if secs >= 3600 && secs % 3600 == 0 {
        (secs / 3600, "hour")
    } else if secs >= 60 && secs % 60 == 0 {
        (secs / 60, "minute")
    } else {
        (secs, "second")
    };

    if count == 1 {
        format!("1 {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::{cell::RefCell, rc::Rc};
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn first_cycle_runs_immediately_then_every_period() {
        let period = Duration::from_secs(600);
        let start = Instant::now();
        let stamps = Rc::new(RefCell::new(Vec::new()));

        let ran = Scheduler::new(period)
            .run(Some(3), || {
                let stamps = Rc::clone(&stamps);
                async move { stamps.borrow_mut().push(start.elapsed()) }
            })
            .await;

        assert_eq!(ran, 3);
        assert_eq!(*stamps.borrow(), [Duration::ZERO, period, period * 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_cycle_delays_next_tick() {
        let period = Duration::from_secs(60);
        let start = Instant::now();
        let stamps = Rc::new(RefCell::new(Vec::new()));

        Scheduler::new(period)
            .run(Some(3), || {
                let stamps = Rc::clone(&stamps);
                async move {
                    let first = stamps.borrow().is_empty();
                    stamps.borrow_mut().push(start.elapsed());
                    if first {
                        time::sleep(Duration::from_secs(90)).await;
                    }
                }
            })
            .await;

        assert_eq!(
            *stamps.borrow(),
            [Duration::ZERO, Duration::from_secs(90), Duration::from_secs(150)]
        );
    }

    #[test]
    fn message_names_period_and_clock_time() {
        let now = Utc.with_ymd_and_hms(2024, 7, 1, 13, 55, 0).unwrap();
        assert_eq!(
            next_update_message(Duration::from_secs(600), now),
            "Next update in 10 minutes (at 14:05:00)."
        );
    }

    #[test]
    fn period_wording() {
        assert_eq!(describe_period(Duration::from_secs(60)), "1 minute");
        assert_eq!(describe_period(Duration::from_secs(90)), "90 seconds");
        assert_eq!(describe_period(Duration::from_secs(7200)), "2 hours");
        assert_eq!(describe_period(Duration::from_secs(1)), "1 second");
    }
}
