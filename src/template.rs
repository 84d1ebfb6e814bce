//! Narration templates.
//!
//! A verb's narration text is written with uppercase placeholder markers,
//! e.g. `"wave$ YOUR hand in front of POSS face, IS SUBJ HOW there?"`.
//! Templates are parsed once into a list of literal/placeholder segments
//! and rendered in a single pass: a substituted value is never re-scanned
//! for markers, so a target whose display name happens to spell a marker
//! can not be substituted twice.
//!
//! The `$` character inside literal text marks verb conjugation: it
//! renders as nothing in the second person ("you kick") and as "s" in the
//! third person ("she kicks"). It is only ever interpreted in template
//! literals, never in substituted values.

use std::fmt;

/// The placeholder vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Joined display names of the targets.
    Who,
    /// The adverb.
    How,
    /// The body-part phrase.
    Where,
    /// The message text, unquoted.
    What,
    /// The message text, quoted (unless marked as unquoted).
    Msg,
    /// Possessive form of the target(s): "max's", "your own".
    Poss,
    /// is/are agreement for the target(s).
    Is,
    /// Subjective pronoun of the target(s): he/she/it/they.
    Subj,
    /// Objective reference to the actor: "your" for the actor, else him/her/it.
    My,
    /// Possessive reference to the actor: "your" for the actor, else his/her/its.
    Your,
    /// Expands to the at-preposition plus WHO, but only when targets exist.
    At,
}

/// Longest names first, so prefix matching can never pick a shorter
/// marker that happens to lead a longer one.
const MARKERS: [(&str, Placeholder); 11] = [
    ("WHERE", Placeholder::Where),
    ("WHAT", Placeholder::What),
    ("YOUR", Placeholder::Your),
    ("SUBJ", Placeholder::Subj),
    ("POSS", Placeholder::Poss),
    ("MSG", Placeholder::Msg),
    ("HOW", Placeholder::How),
    ("WHO", Placeholder::Who),
    ("AT", Placeholder::At),
    ("IS", Placeholder::Is),
    ("MY", Placeholder::My),
];

/// One piece of a parsed template. `glue` means the segment attaches
/// directly to the preceding text without a separating space (trailing
/// punctuation after a marker, or the "self" in "MYself").
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal { text: String, glue: bool },
    Slot { ph: Placeholder, glue: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Template {
    pub segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Template {
        let mut segments = Vec::new();
        for word in source.split(' ') {
            if word.is_empty() {
                continue;
            }
            match split_marker(word) {
                Some((ph, rest)) => {
                    segments.push(Segment::Slot { ph, glue: false });
                    if !rest.is_empty() {
                        segments.push(Segment::Literal {
                            text: rest.to_string(),
                            glue: true,
                        });
                    }
                }
                None => segments.push(Segment::Literal {
                    text: word.to_string(),
                    glue: false,
                }),
            }
        }
        Template { segments }
    }

    pub fn contains(&self, ph: Placeholder) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Slot { ph: p, .. } if *p == ph))
    }

    /// A template with a WHO or POSS slot cannot be narrated without a
    /// target. (AT does not count: it disappears when there are none.)
    pub fn needs_target(&self) -> bool {
        self.contains(Placeholder::Who) || self.contains(Placeholder::Poss)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut first = true;
        for seg in &self.segments {
            let (text, glue): (String, bool) = match seg {
                Segment::Literal { text, glue } => (text.clone(), *glue),
                Segment::Slot { ph, glue } => (format!("{:?}", ph).to_uppercase(), *glue),
            };
            if !first && !glue {
                write!(f, " ")?;
            }
            write!(f, "{}", text)?;
            first = false;
        }
        Ok(())
    }
}

/// Split a word into a leading placeholder marker and its glued-on rest.
/// The rest must not continue in uppercase, so ordinary words that merely
/// start with a marker's letters ("ISLAND") stay literal.
fn split_marker(word: &str) -> Option<(Placeholder, &str)> {
    for (name, ph) in MARKERS {
        if let Some(rest) = word.strip_prefix(name) {
            if rest.starts_with(|c: char| c.is_ascii_uppercase()) {
                continue;
            }
            return Some((ph, rest));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_words() {
        let t = Template::parse("slip$ and slide$ HOW");
        assert_eq!(4, t.segments.len());
        assert!(t.contains(Placeholder::How));
        assert!(!t.needs_target());
    }

    #[test]
    fn parses_glued_punctuation() {
        let t = Template::parse(" HOW ask$ AT: WHAT?");
        assert_eq!(
            vec![
                Segment::Slot { ph: Placeholder::How, glue: false },
                Segment::Literal { text: "ask$".into(), glue: false },
                Segment::Slot { ph: Placeholder::At, glue: false },
                Segment::Literal { text: ":".into(), glue: true },
                Segment::Slot { ph: Placeholder::What, glue: false },
                Segment::Literal { text: "?".into(), glue: true },
            ],
            t.segments
        );
    }

    #[test]
    fn parses_glued_suffix_word() {
        let t = Template::parse("believe$ in MYself HOW");
        assert_eq!(
            vec![
                Segment::Literal { text: "believe$".into(), glue: false },
                Segment::Literal { text: "in".into(), glue: false },
                Segment::Slot { ph: Placeholder::My, glue: false },
                Segment::Literal { text: "self".into(), glue: true },
                Segment::Slot { ph: Placeholder::How, glue: false },
            ],
            t.segments
        );
    }

    #[test]
    fn uppercase_words_stay_literal() {
        let t = Template::parse("ISLAND HOWEVER");
        assert!(t
            .segments
            .iter()
            .all(|s| matches!(s, Segment::Literal { .. })));
    }

    #[test]
    fn needs_target_on_who_and_poss() {
        assert!(Template::parse("tickle$ WHO HOW").needs_target());
        assert!(Template::parse("nibble$ HOW on POSS ear").needs_target());
        assert!(!Template::parse("grin$ HOW AT").needs_target());
    }
}
