#![crate_name = "mudsoul"]

//! The "soul" of a MUD player: free-text social verb parsing and
//! narration. Commands like `fail greet max and kate politely` become a
//! structured parse plus three narration strings, one each for the
//! actor, the bystanders in the room, and the targets.
//!
//! The crate owns no world state. The engine builds a [`Visibility`]
//! snapshot per command, hands it to a per-player [`Soul`], and
//! broadcasts the resulting [`VerbAction`] messages itself.

#[macro_use]
extern crate lazy_static;

pub mod compose;
pub mod entity;
pub mod errors;
pub mod grammar;
pub mod lang;
pub mod parse_result;
pub mod parser;
pub mod pronouns;
pub mod soul;
pub mod template;
pub mod test_utils;
pub mod verbs;

pub use entity::{Gender, TargetKind, TargetRef, Targetable, Visibility};
pub use errors::{ParseError, SoulError};
pub use parse_result::{ParseOutcome, ParseResult, SoulOutcome, VerbAction, WhoEntry};
pub use soul::Soul;
pub use verbs::{VerbConfig, VerbRegistry, VerbShape};
