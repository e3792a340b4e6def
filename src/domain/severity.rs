//! Notification severity.

use std::fmt;
use std::str::FromStr;

/// Kind of a notification, which drives its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Neutral information (the default)
    #[default]
    Info,
    /// Completed action
    Success,
    /// Failed action or validation problem
    Error,
}

impl Severity {
    /// All severities, in display priority order (lowest first).
    pub const ALL: [Severity; 3] = [Severity::Info, Severity::Success, Severity::Error];

    /// The lowercase tag used in markup and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }

    /// Map a level tag produced by a server-side message framework.
    ///
    /// Never fails: unknown tags (`debug`, `warning`, typos) render as
    /// [`Severity::Info`]. `danger` is accepted as an alias for `error`.
    ///
    /// ```
    /// use ui_pacing::Severity;
    ///
    /// assert_eq!(Severity::from_tag_lossy("success"), Severity::Success);
    /// assert_eq!(Severity::from_tag_lossy(" Danger "), Severity::Error);
    /// assert_eq!(Severity::from_tag_lossy("warning"), Severity::Info);
    /// ```
    pub fn from_tag_lossy(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "success" => Severity::Success,
            "error" | "danger" => Severity::Error,
            _ => Severity::Info,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a severity tag strictly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseSeverityError {
    tag: String,
}

impl ParseSeverityError {
    /// The tag that failed to parse.
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl fmt::Display for ParseSeverityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown severity '{}', expected one of: info, success, error",
            self.tag
        )
    }
}

impl std::error::Error for ParseSeverityError {}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "error" => Ok(Severity::Error),
            other => Err(ParseSeverityError {
                tag: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_info() {
        assert_eq!(Severity::default(), Severity::Info);
    }

    #[test]
    fn test_from_str_strict() {
        assert_eq!("info".parse::<Severity>(), Ok(Severity::Info));
        assert_eq!("success".parse::<Severity>(), Ok(Severity::Success));
        assert_eq!("error".parse::<Severity>(), Ok(Severity::Error));

        let err = "warning".parse::<Severity>().unwrap_err();
        assert_eq!(err.tag(), "warning");
        assert!(err.to_string().contains("warning"));
    }

    #[test]
    fn test_from_tag_lossy() {
        assert_eq!(Severity::from_tag_lossy("ERROR"), Severity::Error);
        assert_eq!(Severity::from_tag_lossy("danger"), Severity::Error);
        assert_eq!(Severity::from_tag_lossy("debug"), Severity::Info);
        assert_eq!(Severity::from_tag_lossy(""), Severity::Info);
    }

    #[test]
    fn test_display_matches_tag() {
        for severity in Severity::ALL {
            assert_eq!(severity.to_string().parse::<Severity>(), Ok(severity));
        }
    }
}
