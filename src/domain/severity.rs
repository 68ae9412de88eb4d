// Congestion severity derived from vehicle counts
use serde::{Serialize, Serializer};

/// Counts at or above this are jammed.
pub const JAMMED_THRESHOLD: u32 = 15;
/// Counts at or above this (and below the jammed threshold) are congested.
pub const CONGESTED_THRESHOLD: u32 = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Smooth,
    Congested,
    Jammed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayColor {
    Red,
    Yellow,
    Green,
}

impl DisplayColor {
    pub fn hex(&self) -> &'static str {
        match self {
            DisplayColor::Red => "#dc3545",
            DisplayColor::Yellow => "#ffc107",
            DisplayColor::Green => "#28a745",
        }
    }
}

impl Serialize for DisplayColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.hex())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub severity: Severity,
    pub color: DisplayColor,
}

/// Map a vehicle count onto its severity band and display color.
pub fn classify(count: u32) -> Classification {
    if count >= JAMMED_THRESHOLD {
        Classification {
            severity: Severity::Jammed,
            color: DisplayColor::Red,
        }
    } else if count >= CONGESTED_THRESHOLD {
        Classification {
            severity: Severity::Congested,
            color: DisplayColor::Yellow,
        }
    } else {
        Classification {
            severity: Severity::Smooth,
            color: DisplayColor::Green,
        }
    }
}

/// Badge styling for the source-supplied status label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeTone {
    Danger,
    Warning,
    Success,
    Secondary,
}

impl BadgeTone {
    pub fn css_class(&self) -> &'static str {
        match self {
            BadgeTone::Danger => "text-bg-danger",
            BadgeTone::Warning => "text-bg-warning",
            BadgeTone::Success => "text-bg-success",
            BadgeTone::Secondary => "text-bg-secondary",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_bands() {
        assert_eq!(classify(20).severity, Severity::Jammed);
        assert_eq!(classify(10).severity, Severity::Congested);
        assert_eq!(classify(3).severity, Severity::Smooth);
        assert_eq!(classify(0).severity, Severity::Smooth);
    }

    #[test]
    fn test_classify_boundaries_are_inclusive() {
        assert_eq!(classify(15).color, DisplayColor::Red);
        assert_eq!(classify(14).color, DisplayColor::Yellow);
        assert_eq!(classify(7).color, DisplayColor::Yellow);
        assert_eq!(classify(6).color, DisplayColor::Green);
        assert_eq!(classify(u32::MAX).severity, Severity::Jammed);
    }

    #[test]
    fn test_severity_never_increases_as_count_drops() {
        let mut previous = classify(40).severity;
        for count in (0..40).rev() {
            let current = classify(count).severity;
            assert!(current <= previous, "count {} raised severity", count);
            previous = current;
        }
    }

    #[test]
    fn test_color_serializes_as_hex() {
        let json = serde_json::to_string(&DisplayColor::Yellow).unwrap();
        assert_eq!(json, "\"#ffc107\"");
    }
}
