//! Pronoun backreference resolution: "him", "her", "it", "them" resolve
//! against the targets of the previous successfully parsed command.
//!
//! Resolution is by identity within the *current* visibility snapshot:
//! a remembered target that has since left the room (or was dropped, or
//! whose exit closed) is reported as no longer around rather than
//! silently skipped.

use log::debug;

use crate::entity::{TargetRef, Visibility};
use crate::errors::ParseError;
use crate::lang::capital;
use crate::parse_result::ParseResult;

/// Resolve a backreference pronoun against the previous parse. Returns
/// the matched targets paired with the canonical name each one was
/// known by, for splicing back into the argument words.
pub fn match_previously_parsed(
    vis: &Visibility,
    previous: &ParseResult,
    pronoun: &str,
) -> Result<Vec<(TargetRef, String)>, ParseError> {
    if pronoun == "them" {
        // plural: everything the previous command addressed
        let mut matches = Vec::new();
        for entry in &previous.who {
            let target = &entry.target;
            if !vis.reachable(target) {
                return Err(gone(target));
            }
            debug!("them -> {}", target.name);
            matches.push((target.clone(), target.name.clone()));
        }
        if matches.is_empty() {
            return Err(unclear_referent());
        }
        return Ok(matches);
    }
    for entry in &previous.who {
        let target = &entry.target;
        if pronoun == target.gender.objective() {
            if !vis.reachable(target) {
                return Err(gone(target));
            }
            debug!("{} -> {}", pronoun, target.name);
            return Ok(vec![(target.clone(), target.name.clone())]);
        }
    }
    Err(unclear_referent())
}

fn gone(target: &TargetRef) -> ParseError {
    ParseError::new(format!(
        "{} is no longer around.",
        capital(target.gender.subjective())
    ))
}

fn unclear_referent() -> ParseError {
    ParseError::new("It is not clear who you're referring to.")
}
