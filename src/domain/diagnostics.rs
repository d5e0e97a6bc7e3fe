use crate::domain::model::{TypeTag, ViewMode};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Which end of a wire a type mismatch was found on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WireEnd {
    Source,
    Destination,
}

impl fmt::Display for WireEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireEnd::Source => write!(f, "source terminal"),
            WireEnd::Destination => write!(f, "destination port"),
        }
    }
}

/// A tag the model supplies fewer times than a block requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shortfall {
    pub tag: TypeTag,
    pub required: usize,
    pub provided: usize,
}

impl Shortfall {
    pub fn missing(&self) -> usize {
        self.required.saturating_sub(self.provided)
    }
}

impl fmt::Display for Shortfall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} x{} (required {}, provided {})",
            self.tag,
            self.missing(),
            self.required,
            self.provided
        )
    }
}

fn join_shortfalls(shortfalls: &[Shortfall]) -> String {
    if shortfalls.is_empty() {
        return "none".to_string();
    }
    shortfalls
        .iter()
        .map(Shortfall::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// First violation found by a check. Out-of-range indices are never reported here.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    #[error("Open port: processor '{processor}' port {index} ({tag}) has no incoming wire")]
    OpenPort {
        processor: String,
        index: usize,
        tag: TypeTag,
    },

    #[error(
        "Duplicate destination: wires '{first_wire}' and '{second_wire}' both target port {index} of processor '{processor}'"
    )]
    DuplicateDestination {
        processor: String,
        index: usize,
        first_wire: String,
        second_wire: String,
    },

    #[error(
        "Type mismatch: wire '{wire}' carries {found} but {end} {index} of processor '{processor}' is {expected}"
    )]
    TypeMismatch {
        wire: String,
        end: WireEnd,
        processor: String,
        index: usize,
        expected: TypeTag,
        found: TypeTag,
    },

    #[error(
        "Signature mismatch against block '{block}' ({mode} view): missing inputs [{}], missing outputs [{}]",
        join_shortfalls(.missing_inputs),
        join_shortfalls(.missing_outputs)
    )]
    SignatureMismatch {
        block: String,
        mode: ViewMode,
        missing_inputs: Vec<Shortfall>,
        missing_outputs: Vec<Shortfall>,
    },
}

/// Kinds of check the engine knows how to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "check", rename_all = "snake_case")]
pub enum CheckKind {
    ClosedLoop,
    DuplicateDestination,
    WireTypes,
    Signature { block: String, mode: ViewMode },
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckKind::ClosedLoop => write!(f, "closed-loop"),
            CheckKind::DuplicateDestination => write!(f, "duplicate-destination"),
            CheckKind::WireTypes => write!(f, "wire-types"),
            CheckKind::Signature { block, mode } => write!(f, "signature[{}/{}]", block, mode),
        }
    }
}

/// Pass/fail outcome of a single check plus its diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verdict {
    #[serde(flatten)]
    pub check: CheckKind,
    pub passed: bool,
    pub violation: Option<Violation>,
}

impl Verdict {
    pub fn from_result(check: CheckKind, result: Result<(), Violation>) -> Self {
        match result {
            Ok(()) => Self {
                check,
                passed: true,
                violation: None,
            },
            Err(violation) => Self {
                check,
                passed: false,
                violation: Some(violation),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shortfall_display() {
        let shortfall = Shortfall {
            tag: "U".to_string(),
            required: 2,
            provided: 0,
        };
        assert_eq!(shortfall.missing(), 2);
        assert_eq!(shortfall.to_string(), "U x2 (required 2, provided 0)");
    }

    #[test]
    fn test_signature_mismatch_message_lists_shortfalls() {
        let violation = Violation::SignatureMismatch {
            block: "Loop".to_string(),
            mode: ViewMode::Effective,
            missing_inputs: vec![],
            missing_outputs: vec![Shortfall {
                tag: "Y".to_string(),
                required: 1,
                provided: 0,
            }],
        };
        let message = violation.to_string();
        assert!(message.contains("missing inputs [none]"));
        assert!(message.contains("Y x1"));
    }

    #[test]
    fn test_verdict_serializes_kind_and_check() {
        let verdict = Verdict::from_result(
            CheckKind::ClosedLoop,
            Err(Violation::OpenPort {
                processor: "f".to_string(),
                index: 1,
                tag: "U".to_string(),
            }),
        );
        let json = serde_json::to_value(&verdict).unwrap();

        assert_eq!(json["check"], "closed_loop");
        assert_eq!(json["passed"], false);
        assert_eq!(json["violation"]["kind"], "open_port");
    }
}
