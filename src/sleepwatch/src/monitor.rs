use tokio::{
    sync::{mpsc, oneshot},
    task::JoinHandle,
    time::{MissedTickBehavior, interval},
};

use sleepwatch_types::AnalysisResult;

use crate::{Clock, Sample, SleepSession, SleepwatchError};

/// Drives a session on the tokio runtime.
///
/// Samples arrive over a bounded channel, the classifier runs on a fixed
/// interval and a stop request ends the session.
pub struct Monitor;

pub struct MonitorHandle {
    samples: SampleSender,
    stop: oneshot::Sender<()>,
    task: JoinHandle<AnalysisResult>,
}

/// Cloneable producer side of a running monitor.
#[derive(Clone)]
pub struct SampleSender {
    sender: mpsc::Sender<Sample>,
}

impl Monitor {
    pub const SAMPLE_BUFFER: usize = 256;

    pub fn spawn<C>(session: SleepSession<C>) -> Result<MonitorHandle, SleepwatchError>
    where
        C: Clock + 'static,
    {
        let period = session
            .config()
            .classify_interval
            .to_std()
            .ok()
            .filter(|p| !p.is_zero())
            .ok_or(SleepwatchError::InvalidInterval)?;

        let (sender, samples) = mpsc::channel(Self::SAMPLE_BUFFER);
        let (stop, stopped) = oneshot::channel();
        let task = tokio::spawn(Self::run(session, period, samples, stopped));

        Ok(MonitorHandle {
            samples: SampleSender { sender },
            stop,
            task,
        })
    }

    async fn run<C: Clock>(
        mut session: SleepSession<C>,
        period: std::time::Duration,
        mut samples: mpsc::Receiver<Sample>,
        mut stopped: oneshot::Receiver<()>,
    ) -> AnalysisResult {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    session.tick();
                },
                Some(sample) = samples.recv() => {
                    session.record(sample);
                },
                _ = &mut stopped => break,
            }
        }

        // Samples already queued were sent before the stop request.
        samples.close();
        while let Ok(sample) = samples.try_recv() {
            session.record(sample);
        }

        session.stop()
    }
}

impl MonitorHandle {
    pub fn sender(&self) -> SampleSender {
        self.samples.clone()
    }

    pub async fn send(&self, sample: Sample) -> Result<(), SleepwatchError> {
        self.samples.send(sample).await
    }

    /// Stops the session and waits for its report.
    pub async fn stop(self) -> Result<AnalysisResult, SleepwatchError> {
        // The task may already have ended if the runtime is shutting down.
        let _ = self.stop.send(());
        Ok(self.task.await?)
    }
}

impl SampleSender {
    pub async fn send(&self, sample: Sample) -> Result<(), SleepwatchError> {
        self.sender
            .send(sample)
            .await
            .map_err(|_| SleepwatchError::SessionClosed)
    }

    pub async fn motion(&self, magnitude: f64) -> Result<(), SleepwatchError> {
        self.send(Sample::Motion { magnitude }).await
    }

    pub async fn audio(&self, decibels: f64) -> Result<(), SleepwatchError> {
        self.send(Sample::Audio { decibels }).await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
    use sleepwatch_types::SleepStage;
    use uuid::Uuid;

    use super::*;

    /// Follows tokio's (paused) clock from a fixed start.
    struct RuntimeClock {
        base: NaiveDateTime,
        origin: tokio::time::Instant,
    }

    impl Clock for RuntimeClock {
        fn now(&self) -> NaiveDateTime {
            let elapsed = TimeDelta::from_std(self.origin.elapsed()).unwrap_or_default();
            self.base + elapsed
        }
    }

    fn session() -> SleepSession<RuntimeClock> {
        let clock = RuntimeClock {
            base: NaiveDate::from_ymd_opt(2025, 4, 1)
                .unwrap()
                .and_hms_opt(23, 0, 0)
                .unwrap(),
            origin: tokio::time::Instant::now(),
        };
        SleepSession::start(Uuid::new_v4(), clock, Default::default())
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_on_interval() {
        let handle = Monitor::spawn(session()).unwrap();
        tokio::time::sleep(Duration::from_secs(3500)).await;
        let report = handle.stop().await.unwrap();

        assert_eq!(report.cycles.len(), 2);
        assert_eq!(report.cycles[0].stage, SleepStage::Light);
        assert_eq!(report.cycles[0].duration, TimeDelta::seconds(2700));
        assert_eq!(report.cycles[1].stage, SleepStage::Deep);
        assert_eq!(report.cycles[1].duration, TimeDelta::seconds(800));
    }

    #[tokio::test(start_paused = true)]
    async fn movement_switches_to_awake() {
        let handle = Monitor::spawn(session()).unwrap();
        let sender = handle.sender();
        tokio::time::sleep(Duration::from_secs(10)).await;
        for _ in 0..10 {
            sender.motion(0.6).await.unwrap();
        }
        tokio::time::sleep(Duration::from_secs(600)).await;
        let report = handle.stop().await.unwrap();

        assert_eq!(report.quality_factors.movement, 1.0);
        assert_eq!(report.cycles.last().unwrap().stage, SleepStage::Awake);
        assert_eq!(report.cycles[0].duration, TimeDelta::seconds(300));
    }

    #[tokio::test(start_paused = true)]
    async fn queued_samples_count_and_later_sends_fail() {
        let handle = Monitor::spawn(session()).unwrap();
        let sender = handle.sender();
        for _ in 0..4 {
            handle.send(Sample::Audio { decibels: 75.0 }).await.unwrap();
        }
        let report = handle.stop().await.unwrap();

        assert_eq!(report.quality_factors.snoring, 0.4);
        assert!(matches!(
            sender.audio(75.0).await,
            Err(SleepwatchError::SessionClosed)
        ));
    }

    #[tokio::test]
    async fn zero_interval_is_rejected() {
        let session = SleepSession::start(
            Uuid::new_v4(),
            crate::SystemClock,
            sleepwatch_algos::AnalysisConfig::default().with_classify_interval(TimeDelta::zero()),
        );
        assert!(matches!(
            Monitor::spawn(session),
            Err(SleepwatchError::InvalidInterval)
        ));
    }
}
