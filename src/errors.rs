// Error taxonomy for the soul command interpreter.

use std::fmt;

/// A problem with the player's input. The message is phrased for the
/// player and is safe to display verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError(pub String);

impl ParseError {
    pub fn new(msg: impl Into<String>) -> ParseError {
        ParseError(msg.into())
    }

    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseError {}

/// Failures that can come out of verb processing as a whole.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SoulError {
    /// Malformed or ambiguous user input; show the message to the player.
    Parse(ParseError),
    /// The verb is not in the registry at all. The engine should try its
    /// own command handlers before reporting anything to the player.
    UnknownVerb(String),
    /// Invariant violation inside the soul. Never caused by player input;
    /// not intended for user display.
    Internal(String),
}

impl fmt::Display for SoulError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SoulError::Parse(e) => write!(f, "{}", e),
            SoulError::UnknownVerb(verb) => write!(f, "unknown verb: {}", verb),
            SoulError::Internal(msg) => write!(f, "internal soul error: {}", msg),
        }
    }
}

impl std::error::Error for SoulError {}

impl From<ParseError> for SoulError {
    fn from(e: ParseError) -> SoulError {
        SoulError::Parse(e)
    }
}
