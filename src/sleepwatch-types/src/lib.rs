#[macro_use]
extern crate serde;

mod stage;
pub use stage::SleepStage;

mod factors;
pub use factors::{EnvironmentReading, QualityFactors};

mod cycle;
pub use cycle::Cycle;

mod recommendation;
pub use recommendation::{Recommendation, RecommendationCategory};

mod report;
pub use report::AnalysisResult;

pub mod format_hm;

mod seconds;
