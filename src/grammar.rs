//! Closed grammar tables: action qualifiers, body parts, skip-words and
//! the pronoun word sets. These are fixed vocabulary; the open-ended verb
//! vocabulary lives in [`crate::verbs`].

use std::collections::{HashMap, HashSet};

/// How a leading qualifier word rewrites the narration. The wrapper
/// templates take the already-composed action phrase in place of `%s`.
#[derive(Debug, Clone, Copy)]
pub struct Qualifier {
    /// Wrapper for the actor's own message ("try to %s, but fail miserably").
    pub actor_wrap: &'static str,
    /// Wrapper for the room/target messages ("tries to %s, but fails miserably").
    pub room_wrap: &'static str,
    /// When false the room wrapper takes the actor-form (second person)
    /// action phrase, because "tries to ..." needs the uninflected verb.
    pub use_room_action: bool,
}

impl Qualifier {
    /// Negating qualifiers narrate an action that did not actually happen.
    pub fn is_negating(&self) -> bool {
        !self.use_room_action
    }
}

lazy_static! {
    pub static ref QUALIFIERS: HashMap<&'static str, Qualifier> = {
        let mut m = HashMap::new();
        let mut q = |word, actor_wrap, room_wrap, use_room_action| {
            m.insert(word, Qualifier { actor_wrap, room_wrap, use_room_action });
        };
        q("suddenly", "suddenly %s", "suddenly %s", true);
        q("fail", "try to %s, but fail miserably", "tries to %s, but fails miserably", false);
        q("again", "%s again", "%s again", true);
        q("pretend", "pretend to %s", "pretends to %s", false);
        q("dont", "don't %s", "doesn't %s", false);
        q("don't", "don't %s", "doesn't %s", false);
        q("attempt", "attempt to %s, without much success", "attempts to %s, without much success", false);
        m
    };

    /// Body part word -> the phrase that lands in a WHERE slot.
    pub static ref BODY_PARTS: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("hand", "on the hand");
        m.insert("forehead", "on the forehead");
        m.insert("head", "on the head");
        m.insert("kneecap", "on the kneecap");
        m.insert("ankle", "in the ankle");
        m.insert("knee", "on the knee");
        m.insert("face", "in the face");
        m.insert("hurts", "where it hurts");
        m.insert("nuts", "where it hurts");
        m.insert("eye", "in the eye");
        m.insert("ear", "on the ear");
        m.insert("stomach", "in the stomach");
        m.insert("butt", "on the butt");
        m.insert("behind", "on the behind");
        m.insert("leg", "on the leg");
        m.insert("foot", "on the foot");
        m.insert("toe", "on the right toe");
        m.insert("nose", "on the nose");
        m.insert("neck", "in the neck");
        m.insert("back", "on the back");
        m.insert("arm", "on the arm");
        m.insert("chest", "on the chest");
        m.insert("cheek", "on the cheek");
        m.insert("side", "in the side");
        m.insert("everywhere", "everywhere");
        m.insert("shoulder", "on the shoulder");
        m
    };

    /// Filler words silently tolerated between meaningful tokens.
    pub static ref SKIP_WORDS: HashSet<&'static str> = [
        "and", "&", "at", "to", "before", "in", "into", "on", "off", "onto",
        "the", "with", "from", "after", "under", "above", "next",
    ]
    .into_iter()
    .collect();
}

/// Words that refer back to the actor itself.
pub const REFLEXIVE_PRONOUNS: [&str; 3] = ["me", "myself", "self"];

/// Words resolved against the previous parse by the disambiguator.
pub const BACKREF_PRONOUNS: [&str; 4] = ["them", "him", "her", "it"];

/// Words that expand to every other living in the room.
pub const ALL_WORDS: [&str; 3] = ["everyone", "everybody", "all"];

/// Words that flip target matching from inclusion to exclusion.
pub const EXCEPT_WORDS: [&str; 2] = ["except", "but"];

pub fn is_qualifier(word: &str) -> bool {
    QUALIFIERS.contains_key(word)
}

pub fn is_body_part(word: &str) -> bool {
    BODY_PARTS.contains_key(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualifier_table() {
        assert!(is_qualifier("fail"));
        assert!(is_qualifier("don't"));
        assert!(!is_qualifier("happily"));
        assert!(QUALIFIERS["fail"].is_negating());
        assert!(!QUALIFIERS["suddenly"].is_negating());
        assert!(!QUALIFIERS["again"].is_negating());
    }

    #[test]
    fn body_part_phrases() {
        assert_eq!("in the face", BODY_PARTS["face"]);
        assert_eq!("where it hurts", BODY_PARTS["nuts"]);
        assert!(!is_body_part("tail"));
    }
}
