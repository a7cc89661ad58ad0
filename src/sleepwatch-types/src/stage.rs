use std::fmt::Display;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SleepStage {
    Awake,
    Light,
    Deep,
    REM,
}

impl SleepStage {
    pub const ALL: [SleepStage; 4] = [Self::Awake, Self::Light, Self::Deep, Self::REM];

    pub fn is_asleep(self) -> bool {
        !matches!(self, Self::Awake)
    }
}

impl Display for SleepStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Awake => "Awake",
            Self::Light => "Light",
            Self::Deep => "Deep",
            Self::REM => "REM",
        };
        f.write_str(name)
    }
}
