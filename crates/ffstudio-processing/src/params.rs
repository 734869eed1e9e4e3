//! Form parameter parsing
//!
//! Every operation has a fixed parameter set. All of it is parsed and checked
//! here, before any process is started.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use ffstudio_core::OperationKind;

use crate::validator::ValidationError;

/// A media position or length with millisecond precision.
///
/// Accepts `SS`, `SS.fff`, `MM:SS(.fff)` and `HH:MM:SS(.fff)`. Rendered as
/// `HH:MM:SS.mmm`, which ffmpeg reads unambiguously.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp {
    millis: u64,
}

impl Timestamp {
    pub fn from_millis(millis: u64) -> Self {
        Self { millis }
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }
}

fn parse_seconds(part: &str) -> Option<u64> {
    let (whole, frac) = match part.split_once('.') {
        Some((w, f)) => (w, f),
        None => (part, ""),
    };
    if whole.is_empty() || !whole.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if frac.len() > 3 || !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let whole: u64 = whole.parse().ok()?;
    let frac_millis = if frac.is_empty() {
        0
    } else {
        format!("{:0<3}", frac).parse::<u64>().ok()?
    };
    whole.checked_mul(1000)?.checked_add(frac_millis)
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl FromStr for Timestamp {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parts: Vec<&str> = s.split(':').collect();
        let invalid = || format!("'{}' is not a timestamp (expected HH:MM:SS or seconds)", s);

        let millis = match parts.as_slice() {
            [seconds] => parse_seconds(seconds).ok_or_else(invalid)?,
            [minutes, seconds] => {
                let minutes = parse_component(minutes).ok_or_else(invalid)?;
                let seconds = parse_seconds(seconds).ok_or_else(invalid)?;
                if seconds >= 60_000 {
                    return Err(invalid());
                }
                minutes
                    .checked_mul(60_000)
                    .and_then(|m| m.checked_add(seconds))
                    .ok_or_else(invalid)?
            }
            [hours, minutes, seconds] => {
                let hours = parse_component(hours).ok_or_else(invalid)?;
                let minutes = parse_component(minutes).ok_or_else(invalid)?;
                let seconds = parse_seconds(seconds).ok_or_else(invalid)?;
                if minutes >= 60 || seconds >= 60_000 {
                    return Err(invalid());
                }
                hours
                    .checked_mul(3_600_000)
                    .and_then(|h| h.checked_add(minutes * 60_000 + seconds))
                    .ok_or_else(invalid)?
            }
            _ => return Err(invalid()),
        };

        Ok(Timestamp { millis })
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.millis / 3_600_000;
        let minutes = (self.millis / 60_000) % 60;
        let seconds = (self.millis / 1000) % 60;
        let millis = self.millis % 1000;
        write!(f, "{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
    }
}

/// Crop rectangle in source pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// A fully validated operation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationSpec {
    CutAudio {
        start: Timestamp,
        duration: Timestamp,
    },
    CropVideo {
        rect: CropRect,
    },
    TrimVideo {
        start: Timestamp,
        end: Timestamp,
    },
    ReplaceAudio,
    ImageToVideo,
}

fn required<'a>(
    fields: &'a HashMap<String, String>,
    name: &str,
) -> Result<&'a str, ValidationError> {
    fields
        .get(name)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ValidationError::MissingField(name.to_string()))
}

fn timestamp(fields: &HashMap<String, String>, name: &str) -> Result<Timestamp, ValidationError> {
    required(fields, name)?
        .parse()
        .map_err(|reason: String| ValidationError::invalid(name, reason))
}

fn pixels(fields: &HashMap<String, String>, name: &str) -> Result<u32, ValidationError> {
    let raw = required(fields, name)?;
    raw.parse::<u32>().map_err(|_| {
        ValidationError::invalid(name, format!("'{}' is not a non-negative integer", raw))
    })
}

impl OperationSpec {
    /// Parse and check the text form fields of `kind`
    pub fn from_form(
        kind: OperationKind,
        fields: &HashMap<String, String>,
    ) -> Result<Self, ValidationError> {
        match kind {
            OperationKind::CutAudio => {
                let start = timestamp(fields, "start")?;
                let duration = timestamp(fields, "duration")?;
                if duration.as_millis() == 0 {
                    return Err(ValidationError::invalid(
                        "duration",
                        "must be greater than zero",
                    ));
                }
                Ok(OperationSpec::CutAudio { start, duration })
            }
            OperationKind::CropVideo => {
                let rect = CropRect {
                    x: pixels(fields, "x")?,
                    y: pixels(fields, "y")?,
                    w: pixels(fields, "w")?,
                    h: pixels(fields, "h")?,
                };
                if rect.w == 0 || rect.h == 0 {
                    return Err(ValidationError::invalid(
                        if rect.w == 0 { "w" } else { "h" },
                        "must be greater than zero",
                    ));
                }
                Ok(OperationSpec::CropVideo { rect })
            }
            OperationKind::TrimVideo => {
                let start = timestamp(fields, "start")?;
                let end = timestamp(fields, "end")?;
                if end <= start {
                    return Err(ValidationError::invalid("end", "must be after start"));
                }
                Ok(OperationSpec::TrimVideo { start, end })
            }
            OperationKind::ReplaceAudio => Ok(OperationSpec::ReplaceAudio),
            OperationKind::ImageToVideo => Ok(OperationSpec::ImageToVideo),
        }
    }

    pub fn kind(&self) -> OperationKind {
        match self {
            OperationSpec::CutAudio { .. } => OperationKind::CutAudio,
            OperationSpec::CropVideo { .. } => OperationKind::CropVideo,
            OperationSpec::TrimVideo { .. } => OperationKind::TrimVideo,
            OperationSpec::ReplaceAudio => OperationKind::ReplaceAudio,
            OperationSpec::ImageToVideo => OperationKind::ImageToVideo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_timestamp_formats() {
        let ts: Timestamp = "00:00:02".parse().unwrap();
        assert_eq!(ts.as_millis(), 2_000);
        let ts: Timestamp = "01:02:03.5".parse().unwrap();
        assert_eq!(ts.as_millis(), 3_723_500);
        let ts: Timestamp = "1:30".parse().unwrap();
        assert_eq!(ts.as_millis(), 90_000);
        let ts: Timestamp = " 12.25 ".parse().unwrap();
        assert_eq!(ts.as_millis(), 12_250);
        assert_eq!(ts.to_string(), "00:00:12.250");
    }

    #[test]
    fn test_timestamp_rejects_garbage() {
        for bad in ["", "abc", "-1", "00:61:00", "00:00:75", "1:2:3:4", "1.2345", "5;rm -rf"] {
            assert!(bad.parse::<Timestamp>().is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn test_cut_audio_from_form() {
        let spec = OperationSpec::from_form(
            OperationKind::CutAudio,
            &form(&[("start", "00:00:02"), ("duration", "00:00:05")]),
        )
        .unwrap();
        assert_eq!(
            spec,
            OperationSpec::CutAudio {
                start: Timestamp::from_millis(2_000),
                duration: Timestamp::from_millis(5_000),
            }
        );
        assert_eq!(spec.kind(), OperationKind::CutAudio);
    }

    #[test]
    fn test_missing_and_malformed_fields() {
        let err = OperationSpec::from_form(OperationKind::CutAudio, &form(&[("start", "0")]))
            .unwrap_err();
        assert!(matches!(err, ValidationError::MissingField(ref f) if f == "duration"));

        let err = OperationSpec::from_form(
            OperationKind::CropVideo,
            &form(&[("x", "0"), ("y", "0"), ("w", "wide"), ("h", "240")]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidParameter { ref field, .. } if field == "w"));

        let err = OperationSpec::from_form(
            OperationKind::CropVideo,
            &form(&[("x", "-1"), ("y", "0"), ("w", "320"), ("h", "240")]),
        )
        .unwrap_err();
        assert!(matches!(err, ValidationError::InvalidParameter { ref field, .. } if field == "x"));
    }

    #[test]
    fn test_semantic_checks() {
        assert!(OperationSpec::from_form(
            OperationKind::TrimVideo,
            &form(&[("start", "00:00:10"), ("end", "00:00:05")]),
        )
        .is_err());
        assert!(OperationSpec::from_form(
            OperationKind::CutAudio,
            &form(&[("start", "0"), ("duration", "0")]),
        )
        .is_err());
        assert!(OperationSpec::from_form(
            OperationKind::CropVideo,
            &form(&[("x", "0"), ("y", "0"), ("w", "0"), ("h", "240")]),
        )
        .is_err());
    }

    #[test]
    fn test_fileless_params() {
        assert_eq!(
            OperationSpec::from_form(OperationKind::ReplaceAudio, &HashMap::new()).unwrap(),
            OperationSpec::ReplaceAudio
        );
    }
}
