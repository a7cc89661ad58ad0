use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationCategory {
    Schedule,
    Environment,
    Habits,
    Lifestyle,
    Medical,
}

/// An advisory item. `priority` runs from 1 (low) to 5 (high).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: u32,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub priority: u8,
}

impl Display for RecommendationCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}", self))
    }
}

impl Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!(
            "[P{}] {} ({}): {}",
            self.priority, self.title, self.category, self.description
        ))
    }
}
