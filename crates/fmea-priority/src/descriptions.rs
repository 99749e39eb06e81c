//! AIAG-VDA guidance text for each S/O/D rating.

use std::fmt;

use fmea_model::Rating;

// Indexed by rating - 1.
const SEVERITY: [&str; 10] = [
    "No discernible effect",
    "Perceived quality unacceptable to some customers",
    "Perceived quality unacceptable to many customers",
    "Perceived quality unacceptable to most customers",
    "Degradation of convenience function",
    "Loss of convenience function",
    "Degradation of essential function necessary for normal operation",
    "Loss of essential function necessary for normal operation during service life",
    "Noncompliance with regulations",
    "Affects safe operation of the vehicle or the health of the user",
];

const OCCURRENCE: [&str; 10] = [
    "Failure cannot occur or is significantly below acceptance level",
    "Failure predicted to be significantly below acceptance level but isolated cases possible",
    "Failure predicted to occur in isolated cases",
    "Failure cause may occur rarely",
    "Failure cause may occur occasionally",
    "Failure cause may occur somewhat frequently",
    "Failure cause may occur frequently in the field",
    "Failure cause may occur often in the field",
    "Failure cause is likely to occur during design life",
    "Occurrence unknown or extremely high; new technology without experience",
];

const DETECTION: [&str; 10] = [
    "Fault always detected automatically and responded in any operating condition",
    "Fault always detected automatically in all relevant operating conditions",
    "Fault automatically detected and responded to with high probability",
    "Fault will be detected and responded to in most operating conditions",
    "Fault will be detected and responded to in very many operating conditions",
    "Fault will be detected and responded to in many operating conditions",
    "Low probability of detection or response",
    "Fault detected in very few operating conditions; response may not always occur",
    "Fault is almost never detected; response may not reliably occur",
    "Fault cannot be detected at all or not during the fault tolerant interval; no monitoring",
];

/// One of the three rating scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RatingAxis {
    Severity,
    Occurrence,
    Detection,
}

impl RatingAxis {
    pub const ALL: [RatingAxis; 3] = [Self::Severity, Self::Occurrence, Self::Detection];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Severity => "severity",
            Self::Occurrence => "occurrence",
            Self::Detection => "detection",
        }
    }

    #[must_use]
    pub fn describe(self, rating: Rating) -> &'static str {
        let table = match self {
            Self::Severity => &SEVERITY,
            Self::Occurrence => &OCCURRENCE,
            Self::Detection => &DETECTION,
        };
        table[usize::from(rating.get() - Rating::MIN)]
    }
}

impl fmt::Display for RatingAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[must_use]
pub fn severity_description(rating: Rating) -> &'static str {
    RatingAxis::Severity.describe(rating)
}

#[must_use]
pub fn occurrence_description(rating: Rating) -> &'static str {
    RatingAxis::Occurrence.describe(rating)
}

#[must_use]
pub fn detection_description(rating: Rating) -> &'static str {
    RatingAxis::Detection.describe(rating)
}
