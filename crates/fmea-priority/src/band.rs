//! Rating bands of the AIAG-VDA Action Priority table.

use std::fmt;

use fmea_model::Rating;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SeverityBand {
    S1,
    S2To3,
    S4To6,
    S7To8,
    S9To10,
}

impl SeverityBand {
    pub const ALL: [SeverityBand; 5] = [Self::S9To10, Self::S7To8, Self::S4To6, Self::S2To3, Self::S1];

    #[must_use]
    pub fn of(rating: Rating) -> Self {
        match rating.get() {
            1 => Self::S1,
            2..=3 => Self::S2To3,
            4..=6 => Self::S4To6,
            7..=8 => Self::S7To8,
            _ => Self::S9To10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::S1 => "1",
            Self::S2To3 => "2-3",
            Self::S4To6 => "4-6",
            Self::S7To8 => "7-8",
            Self::S9To10 => "9-10",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OccurrenceBand {
    O1,
    O2To3,
    O4To5,
    O6To7,
    O8To10,
}

impl OccurrenceBand {
    pub const ALL: [OccurrenceBand; 5] = [Self::O8To10, Self::O6To7, Self::O4To5, Self::O2To3, Self::O1];

    #[must_use]
    pub fn of(rating: Rating) -> Self {
        match rating.get() {
            1 => Self::O1,
            2..=3 => Self::O2To3,
            4..=5 => Self::O4To5,
            6..=7 => Self::O6To7,
            _ => Self::O8To10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::O1 => "1",
            Self::O2To3 => "2-3",
            Self::O4To5 => "4-5",
            Self::O6To7 => "6-7",
            Self::O8To10 => "8-10",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DetectionBand {
    D1,
    D2To4,
    D5To6,
    D7To10,
}

impl DetectionBand {
    pub const ALL: [DetectionBand; 4] = [Self::D7To10, Self::D5To6, Self::D2To4, Self::D1];

    #[must_use]
    pub fn of(rating: Rating) -> Self {
        match rating.get() {
            1 => Self::D1,
            2..=4 => Self::D2To4,
            5..=6 => Self::D5To6,
            _ => Self::D7To10,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::D1 => "1",
            Self::D2To4 => "2-4",
            Self::D5To6 => "5-6",
            Self::D7To10 => "7-10",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|band| band.label() == label.trim())
    }
}

macro_rules! impl_band_display {
    ($($band:ty),*) => {
        $(
            impl fmt::Display for $band {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }
        )*
    };
}

impl_band_display!(SeverityBand, OccurrenceBand, DetectionBand);

/// Key of the priority table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BandTriple {
    pub severity: SeverityBand,
    pub occurrence: OccurrenceBand,
    pub detection: DetectionBand,
}

impl BandTriple {
    #[must_use]
    pub fn of(severity: Rating, occurrence: Rating, detection: Rating) -> Self {
        Self {
            severity: SeverityBand::of(severity),
            occurrence: OccurrenceBand::of(occurrence),
            detection: DetectionBand::of(detection),
        }
    }
}

impl fmt::Display for BandTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.severity, self.occurrence, self.detection)
    }
}
