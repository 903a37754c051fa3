use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Judging outcome for a submission or a single test case, using the judge
/// service's wire codes.
///
/// `IQ` is the only non-terminal state: while a submission reports `IQ` its
/// `test_cases` list is still growing and the snapshot must be re-fetched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    /// In queue or still running test cases.
    #[serde(rename = "IQ")]
    InQueue,
    /// All test cases passed.
    #[serde(rename = "AC")]
    Accepted,
    /// Output did not match expected output.
    #[serde(rename = "WA")]
    WrongAnswer,
    /// Exceeded time limit.
    #[serde(rename = "TLE")]
    TimeLimitExceeded,
    /// Exceeded memory limit.
    #[serde(rename = "MLE")]
    MemoryLimitExceeded,
    /// Program crashed or exited with non-zero code.
    #[serde(rename = "RTE")]
    RuntimeError,
    /// Failed to compile. No test cases were run.
    #[serde(rename = "CE")]
    CompilationError,
}

impl Verdict {
    /// Returns true if judging is complete (anything other than `IQ`).
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::InQueue)
    }

    /// Returns true if this is a successful verdict.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted)
    }

    /// All possible verdict values.
    pub const ALL: &'static [Verdict] = &[
        Self::InQueue,
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
    ];

    /// All terminal verdict values.
    pub const FINAL: &'static [Verdict] = &[
        Self::Accepted,
        Self::WrongAnswer,
        Self::TimeLimitExceeded,
        Self::MemoryLimitExceeded,
        Self::RuntimeError,
        Self::CompilationError,
    ];

    /// Returns the wire code for this verdict.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InQueue => "IQ",
            Self::Accepted => "AC",
            Self::WrongAnswer => "WA",
            Self::TimeLimitExceeded => "TLE",
            Self::MemoryLimitExceeded => "MLE",
            Self::RuntimeError => "RTE",
            Self::CompilationError => "CE",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::InQueue
    }
}

/// Error when parsing an invalid verdict code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseVerdictError {
    invalid: String,
}

impl fmt::Display for ParseVerdictError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid verdict '{}'. Valid values: {}",
            self.invalid,
            Verdict::ALL
                .iter()
                .map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

impl std::error::Error for ParseVerdictError {}

impl FromStr for Verdict {
    type Err = ParseVerdictError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IQ" => Ok(Self::InQueue),
            "AC" => Ok(Self::Accepted),
            "WA" => Ok(Self::WrongAnswer),
            "TLE" => Ok(Self::TimeLimitExceeded),
            "MLE" => Ok(Self::MemoryLimitExceeded),
            "RTE" => Ok(Self::RuntimeError),
            "CE" => Ok(Self::CompilationError),
            _ => Err(ParseVerdictError {
                invalid: s.to_string(),
            }),
        }
    }
}

/// How the judge service scores a submission.
///
/// Wire field name is `type`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum JudgeMode {
    /// Binary accept/reject with fail-fast judging.
    #[serde(rename = "AC")]
    AcceptReject,
    /// Partial credit per test case.
    #[serde(rename = "SC")]
    Scoring,
}

impl Default for JudgeMode {
    fn default() -> Self {
        Self::AcceptReject
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        for verdict in Verdict::ALL {
            let json = serde_json::to_string(verdict).unwrap();
            let parsed: Verdict = serde_json::from_str(&json).unwrap();
            assert_eq!(*verdict, parsed);
        }
    }

    #[test]
    fn test_wire_codes() {
        assert_eq!(
            serde_json::to_string(&Verdict::TimeLimitExceeded).unwrap(),
            "\"TLE\""
        );
        assert_eq!(serde_json::to_string(&JudgeMode::Scoring).unwrap(), "\"SC\"");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("AC".parse::<Verdict>().unwrap(), Verdict::Accepted);
        assert!("Invalid".parse::<Verdict>().is_err());
    }

    #[test]
    fn test_only_in_queue_is_non_final() {
        assert!(!Verdict::InQueue.is_final());
        for verdict in Verdict::FINAL {
            assert!(verdict.is_final());
        }
    }
}
