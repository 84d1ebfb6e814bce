//! The structured result of parsing one soul command, and the outcome
//! types handed back to the engine.

use std::fmt;

use crate::entity::TargetRef;

/// One resolved target, with enough parse context to reconstruct the
/// player's phrasing: its position among the command words and the word
/// that directly preceded it (usually a preposition).
#[derive(Debug, Clone)]
pub struct WhoEntry {
    pub target: TargetRef,
    /// Index of the name's first word within the parsed words.
    pub sequence: usize,
    pub previous_word: Option<String>,
}

/// Everything the parser understood about one command line.
#[derive(Debug, Clone, Default)]
pub struct ParseResult {
    pub verb: String,
    pub qualifier: Option<String>,
    pub adverb: Option<String>,
    /// Quoted or trailing free text; empty when the command had none.
    pub message: String,
    /// Body-part key ("nuts"); the composer maps it to its phrase
    /// ("where it hurts") when the WHERE slot is rendered.
    pub bodypart: Option<String>,
    /// Resolved targets in the order they were first mentioned.
    pub who: Vec<WhoEntry>,
    /// All non-skip words after the verb, with resolved target names
    /// replaced by their canonical form. What an engine command handler
    /// receives as its arguments.
    pub args: Vec<String>,
    /// Words the parser could not make sense of (external verbs only).
    pub unrecognized: Vec<String>,
    /// The command line after the verb, verbatim.
    pub unparsed: String,
}

impl ParseResult {
    pub fn new(verb: impl Into<String>) -> ParseResult {
        ParseResult {
            verb: verb.into(),
            ..ParseResult::default()
        }
    }

    pub fn who_count(&self) -> usize {
        self.who.len()
    }

    /// The first target, when there is exactly one point of interest.
    pub fn who_1(&self) -> Option<&TargetRef> {
        self.who.first().map(|w| &w.target)
    }

    pub fn targets(&self) -> impl Iterator<Item = &TargetRef> {
        self.who.iter().map(|w| &w.target)
    }

    pub fn contains_target(&self, target: &TargetRef) -> bool {
        self.who.iter().any(|w| w.target.is_same(target))
    }

    /// Record a target; a repeated mention keeps the first entry.
    pub fn push_who(&mut self, target: TargetRef, sequence: usize, previous_word: Option<String>) {
        if !self.contains_target(&target) {
            self.who.push(WhoEntry {
                target,
                sequence,
                previous_word,
            });
        }
    }

    pub fn remove_who(&mut self, target: &TargetRef) {
        self.who.retain(|w| !w.target.is_same(target));
    }
}

impl fmt::Display for ParseResult {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "verb={}", self.verb)?;
        if let Some(q) = &self.qualifier {
            write!(f, " qualifier={}", q)?;
        }
        if let Some(a) = &self.adverb {
            write!(f, " adverb={}", a)?;
        }
        if let Some(b) = &self.bodypart {
            write!(f, " bodypart={}", b)?;
        }
        if !self.message.is_empty() {
            write!(f, " message={:?}", self.message)?;
        }
        if !self.who.is_empty() {
            let names: Vec<&str> = self.who.iter().map(|w| w.target.name.as_str()).collect();
            write!(f, " who={}", names.join(","))?;
        }
        if !self.args.is_empty() {
            write!(f, " args={}", self.args.join(","))?;
        }
        Ok(())
    }
}

/// What the parser decided to do with the command.
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    /// A soul (or external) verb, fully parsed.
    Parsed(ParseResult),
    /// Movement or an exit name; the engine takes over.
    HandOff(ParseResult),
    /// Not a verb this soul knows. The engine should try the first word
    /// against its own commands.
    Unknown {
        verb: String,
        words: Vec<String>,
        qualifier: Option<String>,
    },
}

/// A fully composed social action, ready for the engine to broadcast.
#[derive(Debug, Clone)]
pub struct VerbAction {
    /// The verb, prefixed with its qualifier when one was given
    /// ("fail kick").
    pub verb: String,
    pub targets: Vec<TargetRef>,
    /// Second-person narration for the actor: "You kick max hard."
    pub actor_msg: String,
    /// Third-person narration for bystanders: "Julie kicks max hard."
    pub room_msg: String,
    /// Narration for the targets themselves: "Julie kicks you hard."
    pub target_msg: String,
}

/// Result of running a whole command through the soul.
#[derive(Debug, Clone)]
pub enum SoulOutcome {
    Action(VerbAction, ParseResult),
    HandOff(ParseResult),
    Unknown {
        verb: String,
        words: Vec<String>,
        qualifier: Option<String>,
    },
}
