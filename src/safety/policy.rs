//! Execution policy for classified statements.

use super::{ClassificationResult, SafetyLevel};
use crate::error::{IntelliSqlError, Result};
use std::fmt;
use std::str::FromStr;

/// Decides which classified statements may be executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SafetyPolicy {
    /// Only a single read-only statement may run.
    #[default]
    ReadOnly,
    /// Any single statement runs as-is, writes included.
    AllowWrites,
}

impl SafetyPolicy {
    /// Builds the policy from the `allow_writes` switch.
    pub fn from_allow_writes(allow_writes: bool) -> Self {
        if allow_writes {
            Self::AllowWrites
        } else {
            Self::ReadOnly
        }
    }

    /// Returns true if the database may be opened read-only.
    pub fn is_read_only(&self) -> bool {
        matches!(self, Self::ReadOnly)
    }

    /// Checks a classification against the policy.
    ///
    /// Returns `Rejected` when the statement must not run. More than one
    /// statement is refused under every policy.
    pub fn check(&self, classification: &ClassificationResult) -> Result<()> {
        if classification.is_multiple() {
            return Err(IntelliSqlError::rejected(
                classification.statement_type.to_string(),
                "only a single statement may be executed",
            ));
        }

        match self {
            Self::AllowWrites => Ok(()),
            Self::ReadOnly => {
                if classification.level == SafetyLevel::Safe {
                    return Ok(());
                }
                let reason = match &classification.warning {
                    Some(warning) => format!(
                        "only read-only statements are allowed ({})",
                        warning.trim_end_matches('.')
                    ),
                    None => "only read-only statements are allowed".to_string(),
                };
                Err(IntelliSqlError::rejected(
                    classification.statement_type.to_string(),
                    reason,
                ))
            }
        }
    }

    /// Returns the policy as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ReadOnly => "read-only",
            Self::AllowWrites => "allow-writes",
        }
    }
}

impl FromStr for SafetyPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "read-only" | "readonly" => Ok(Self::ReadOnly),
            "allow-writes" | "permissive" => Ok(Self::AllowWrites),
            _ => Err(format!("Unknown safety policy: {}", s)),
        }
    }
}

impl fmt::Display for SafetyPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::classify_sql;

    #[test]
    fn test_default_is_read_only() {
        assert_eq!(SafetyPolicy::default(), SafetyPolicy::ReadOnly);
        assert!(SafetyPolicy::default().is_read_only());
    }

    #[test]
    fn test_read_only_allows_select() {
        let policy = SafetyPolicy::ReadOnly;
        assert!(policy.check(&classify_sql("SELECT * FROM Students")).is_ok());
    }

    #[test]
    fn test_read_only_rejects_writes() {
        let policy = SafetyPolicy::ReadOnly;

        for sql in [
            "DELETE FROM Students",
            "DROP TABLE Students",
            "UPDATE Students SET marks = 0",
            "INSERT INTO Students (name) VALUES ('x')",
        ] {
            let err = policy.check(&classify_sql(sql)).unwrap_err();
            assert!(
                matches!(err, IntelliSqlError::Rejected { .. }),
                "expected rejection for {sql}"
            );
        }
    }

    #[test]
    fn test_read_only_rejects_multiple_statements() {
        let err = SafetyPolicy::ReadOnly
            .check(&classify_sql("SELECT 1; SELECT 2"))
            .unwrap_err();
        assert!(err.to_string().contains("single statement"));
    }

    #[test]
    fn test_read_only_rejects_unparseable() {
        let err = SafetyPolicy::ReadOnly
            .check(&classify_sql("I am not SQL"))
            .unwrap_err();
        assert!(err.to_string().contains("Unknown"));
    }

    #[test]
    fn test_allow_writes_allows_single_writes() {
        let policy = SafetyPolicy::AllowWrites;
        assert!(policy.check(&classify_sql("DROP TABLE Students")).is_ok());
        assert!(policy.check(&classify_sql("DELETE FROM Students")).is_ok());
        assert!(!policy.is_read_only());
    }

    #[test]
    fn test_allow_writes_rejects_multiple_statements() {
        let err = SafetyPolicy::AllowWrites
            .check(&classify_sql("SELECT COUNT(*) FROM Students; DROP TABLE Students;"))
            .unwrap_err();
        assert!(matches!(err, IntelliSqlError::Rejected { .. }));
        assert!(err.to_string().contains("single statement"));
    }

    #[test]
    fn test_from_allow_writes() {
        assert_eq!(SafetyPolicy::from_allow_writes(true), SafetyPolicy::AllowWrites);
        assert_eq!(SafetyPolicy::from_allow_writes(false), SafetyPolicy::ReadOnly);
    }

    #[test]
    fn test_from_str_and_display() {
        assert_eq!("read-only".parse::<SafetyPolicy>().unwrap(), SafetyPolicy::ReadOnly);
        assert_eq!(
            "ALLOW-WRITES".parse::<SafetyPolicy>().unwrap(),
            SafetyPolicy::AllowWrites
        );
        assert!("yolo".parse::<SafetyPolicy>().is_err());
        assert_eq!(SafetyPolicy::AllowWrites.to_string(), "allow-writes");
    }
}
