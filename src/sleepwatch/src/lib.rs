#[macro_use]
extern crate log;

mod clock;
pub use clock::{Clock, ManualClock, SystemClock};

mod error;
pub use error::SleepwatchError;

mod sample;
pub use sample::Sample;

mod session;
pub use session::SleepSession;

mod monitor;
pub use monitor::{Monitor, MonitorHandle, SampleSender};

pub mod replay;

pub use sleepwatch_algos as algos;
pub use sleepwatch_types as types;
