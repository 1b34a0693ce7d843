//! Named postures and behaviors known to ship with the robot.

use std::fmt;

/// The predefined postures the posture service can move to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardPosture {
    Sit,
    Stand,
    Crouch,
    LyingBack,
    LyingBelly,
    SitRelax,
    StandInit,
    StandZero,
}

impl StandardPosture {
    /// Sitting upright with the body leaning forward is the regular sit posture.
    pub const SIT_FORWARD: StandardPosture = StandardPosture::Sit;

    pub fn as_str(&self) -> &'static str {
        match self {
            StandardPosture::Sit => "Sit",
            StandardPosture::Stand => "Stand",
            StandardPosture::Crouch => "Crouch",
            StandardPosture::LyingBack => "LyingBack",
            StandardPosture::LyingBelly => "LyingBelly",
            StandardPosture::SitRelax => "SitRelax",
            StandardPosture::StandInit => "StandInit",
            StandardPosture::StandZero => "StandZero",
        }
    }
}

impl AsRef<str> for StandardPosture {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StandardPosture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dance behaviors installed on the robot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dance {
    Gangnam,
    Macarena,
    TaiChi,
}

impl Dance {
    /// The behavior path the behavior manager knows the dance by.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dance::Gangnam => "gangnam-fb8eb6/gangnam",
            Dance::Macarena => "macarena-d73ebc/Macarena",
            Dance::TaiChi => "taichi-7eb148/taichi",
        }
    }

    pub fn all() -> [Dance; 3] {
        [Dance::Gangnam, Dance::Macarena, Dance::TaiChi]
    }
}

impl AsRef<str> for Dance {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Dance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
