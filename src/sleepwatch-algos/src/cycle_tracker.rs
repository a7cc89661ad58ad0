use chrono::{NaiveDateTime, TimeDelta};
use sleepwatch_types::{Cycle, SleepStage};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackerState {
    NoActiveCycle,
    ActiveCycle {
        stage: SleepStage,
        start: NaiveDateTime,
    },
}

/// Turns a stream of stage classifications into sealed, time ordered cycles.
///
/// Short cycles are kept as they are; `cycle_min_duration` is not applied
/// here.
#[derive(Debug)]
pub struct CycleTracker {
    state: TrackerState,
    sealed: Vec<Cycle>,
}

impl CycleTracker {
    pub fn new() -> Self {
        Self {
            state: TrackerState::NoActiveCycle,
            sealed: Vec::new(),
        }
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn sealed(&self) -> &[Cycle] {
        &self.sealed
    }

    /// Feeds one classifier tick. Returns the cycle sealed by a stage change.
    ///
    /// A `now` before the open cycle's start is treated as that start. A
    /// change that would seal a zero length cycle relabels the open one.
    pub fn observe(&mut self, stage: SleepStage, now: NaiveDateTime) -> Option<Cycle> {
        match self.state {
            TrackerState::NoActiveCycle => {
                debug!("cycle opened: {} at {}", stage, now);
                self.state = TrackerState::ActiveCycle { stage, start: now };
                None
            }
            TrackerState::ActiveCycle { stage: current, .. } if current == stage => None,
            TrackerState::ActiveCycle { start, .. } => {
                let now = now.max(start);
                if now == start {
                    debug!("cycle at {} relabeled to {}", start, stage);
                    self.state = TrackerState::ActiveCycle { stage, start };
                    return None;
                }

                let cycle = self.seal(now);
                debug!("cycle opened: {} at {}", stage, now);
                self.state = TrackerState::ActiveCycle { stage, start: now };
                cycle
            }
        }
    }

    /// Provisional view of the open cycle, its duration measured up to `now`.
    pub fn current(&self, now: NaiveDateTime) -> Option<Cycle> {
        match self.state {
            TrackerState::NoActiveCycle => None,
            TrackerState::ActiveCycle { stage, start } => Some(Cycle {
                id: self.next_id(),
                stage,
                start,
                duration: (now - start).max(TimeDelta::zero()),
            }),
        }
    }

    /// Seals the open cycle and hands out every sealed cycle.
    pub fn finish(mut self, now: NaiveDateTime) -> Vec<Cycle> {
        if let TrackerState::ActiveCycle { start, .. } = self.state {
            self.seal(now.max(start));
        }
        self.sealed
    }

    fn seal(&mut self, now: NaiveDateTime) -> Option<Cycle> {
        let cycle = self.current(now)?;
        debug!(
            "cycle {} sealed: {} for {}s",
            cycle.id,
            cycle.stage,
            cycle.duration.num_seconds()
        );
        self.sealed.push(cycle);
        self.state = TrackerState::NoActiveCycle;
        Some(cycle)
    }

    fn next_id(&self) -> u32 {
        self.sealed.len() as u32 + 1
    }
}

impl Default for CycleTracker {
    fn default() -> Self {
        Self::new()
    }
}
