//! Letter grade mapping
//!
//! A pure step function from a percentage in [0, 100] to a letter grade.
//! The thresholds live in one policy table rather than inline branching so
//! the breakpoints are auditable in a single place. The function is total
//! (any real input maps to a grade; below 60 is an F, 97 and above is an
//! A+) and monotonic (a higher percentage never grades lower).

use serde::{Deserialize, Serialize};

/// Discrete letter grade. Ordering follows grade quality: `Grade::F` is the
/// lowest, `Grade::APlus` the highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D-")]
    DMinus,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "D+")]
    DPlus,
    #[serde(rename = "C-")]
    CMinus,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "C+")]
    CPlus,
    #[serde(rename = "B-")]
    BMinus,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "B+")]
    BPlus,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

/// Grade breakpoints, highest first. A percentage earns the first grade
/// whose threshold it meets; anything below the last threshold is an F.
const THRESHOLDS: &[(f64, Grade)] = &[
    (97.0, Grade::APlus),
    (93.0, Grade::A),
    (90.0, Grade::AMinus),
    (87.0, Grade::BPlus),
    (83.0, Grade::B),
    (80.0, Grade::BMinus),
    (77.0, Grade::CPlus),
    (73.0, Grade::C),
    (70.0, Grade::CMinus),
    (67.0, Grade::DPlus),
    (63.0, Grade::D),
    (60.0, Grade::DMinus),
];

impl Grade {
    /// Map a percentage (0-100 scale) to its letter grade.
    pub fn from_percentage(percentage: f64) -> Grade {
        for &(threshold, grade) in THRESHOLDS {
            if percentage >= threshold {
                return grade;
            }
        }
        Grade::F
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::CMinus => "C-",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::DMinus => "D-",
            Grade::F => "F",
        }
    }
}

impl std::fmt::Display for Grade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
