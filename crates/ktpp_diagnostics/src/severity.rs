use std::fmt::{Display, Formatter};

/// How serious a logged record is.
///
/// Ordered from least to most severe, so a minimum level can be compared against directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug,
    Info,
    Warn,
    Error,
    Severe,
}

impl Severity {
    /// The level name without padding
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Info => "Info",
            Severity::Warn => "Warn",
            Severity::Error => "Error",
            Severity::Severe => "Severe",
        }
    }

    /// Checks if records of this severity mean the unit being compiled failed
    pub fn is_error(&self) -> bool {
        *self >= Severity::Error
    }
}

/// Padded to the width of the longest level name so headers line up.
impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:<6}", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordered_by_severity() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Warn < Severity::Error);
        assert!(Severity::Error < Severity::Severe);
        assert!(Severity::Severe.is_error());
        assert!(!Severity::Warn.is_error());
    }

    #[test]
    fn display_is_padded() {
        assert_eq!(Severity::Info.to_string(), "Info  ");
        assert_eq!(Severity::Severe.to_string(), "Severe");
        assert_eq!(format!("[{}] ", Severity::Debug), "[Debug ] ");
    }
}
