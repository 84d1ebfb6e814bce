//! English language helpers: pronoun-free text utilities used by the
//! parser and the message composer, plus the adverb vocabulary.

/// Adverbs the parser recognizes, one per line. Kept as a datafile so a
/// story can eyeball the vocabulary without reading code.
const ADVERB_DATA: &str = include_str!("data/soul_adverbs.txt");

lazy_static! {
    /// Sorted adverb list, used for membership tests and prefix search.
    pub static ref ADVERBS: Vec<&'static str> = {
        let mut list: Vec<&'static str> = ADVERB_DATA
            .lines()
            .map(|l| l.trim())
            .filter(|l| !l.is_empty())
            .collect();
        list.sort_unstable();
        list.dedup();
        list
    };
}

pub fn is_adverb(word: &str) -> bool {
    ADVERBS.binary_search(&word).is_ok()
}

/// Adverbs starting with the given prefix, at most `amount` of them.
/// Binary search on the sorted list, O(log n).
pub fn adverb_by_prefix(prefix: &str, amount: usize) -> Vec<&'static str> {
    let start = ADVERBS.partition_point(|a| *a < prefix);
    ADVERBS[start..]
        .iter()
        .take_while(|a| a.starts_with(prefix))
        .take(amount)
        .copied()
        .collect()
}

/// Prefix a non-empty string with a single space; leave "" alone.
pub fn spacify(s: &str) -> String {
    let trimmed = s.trim_start();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(" {}", trimmed)
    }
}

/// Uppercase the first character, leaving the rest untouched.
/// (`str::to_uppercase` on the whole string would mangle titles.)
pub fn capital(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Terminate a sentence with a full stop unless it already ends in
/// punctuation.
pub fn fullstop(sentence: &str) -> String {
    let s = sentence.trim_end();
    if s.ends_with(['!', '?', '.', ';', ':', '-', '=']) {
        s.to_string()
    } else {
        format!("{}.", s)
    }
}

fn possessive_letter(name: &str) -> &'static str {
    if name.is_empty() || name.ends_with(" own") {
        ""
    } else {
        "'s"
    }
}

/// "max" -> "max's", "your own" stays as-is.
pub fn possessive(name: &str) -> String {
    format!("{}{}", name, possessive_letter(name))
}

/// Naive plural, good enough for narration joins.
pub fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if !matches!(before, Some('a' | 'e' | 'i' | 'o' | 'u')) {
            return format!("{}ies", stem);
        }
    }
    if word.ends_with(['s', 'x', 'z']) || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

const NUMBER_WORDS: [&str; 21] = [
    "zero", "one", "two", "three", "four", "five", "six", "seven", "eight", "nine", "ten",
    "eleven", "twelve", "thirteen", "fourteen", "fifteen", "sixteen", "seventeen", "eighteen",
    "nineteen", "twenty",
];

const TENS_WORDS: [&str; 10] = [
    "", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety",
];

/// Spell out a small count in words; larger numbers fall back to digits.
pub fn spell_number(n: usize) -> String {
    match n {
        0..=20 => NUMBER_WORDS[n].to_string(),
        21..=99 => {
            let tens = TENS_WORDS[n / 10];
            if n % 10 == 0 {
                tens.to_string()
            } else {
                format!("{}-{}", tens, NUMBER_WORDS[n % 10])
            }
        }
        _ => n.to_string(),
    }
}

const ARTICLES: [&str; 3] = ["the", "a", "an"];

fn apply_amount(count: usize, word: &str) -> String {
    // drop a leading article when counting multiples: "two rocks",
    // not "two the rocks"
    let counted = match word.split_once(' ') {
        Some((first, rest)) if ARTICLES.contains(&first) => rest,
        _ => word,
    };
    format!("{} {}", spell_number(count), pluralize(counted))
}

/// Join words into natural language: "a, b, and c". Duplicate words are
/// grouped: "thing and thing" becomes "two things".
pub fn join(words: &[String], conj: &str) -> String {
    join_inner(words, conj, true)
}

fn join_inner(words: &[String], conj: &str, group_multi: bool) -> String {
    match words.len() {
        0 => return String::new(),
        1 => return words[0].clone(),
        _ => {}
    }
    if group_multi && words.iter().all(|w| w == &words[0]) {
        return apply_amount(words.len(), &words[0]);
    }
    if words.len() == 2 {
        return format!("{} {} {}", words[0], conj, words[1]);
    }
    if group_multi {
        // an ordered counter, so grouping keeps first-mention order
        let mut counts: indexmap::IndexMap<&str, usize> = indexmap::IndexMap::new();
        for w in words {
            *counts.entry(w.as_str()).or_insert(0) += 1;
        }
        let grouped: Vec<String> = counts
            .iter()
            .map(|(w, &c)| {
                if c == 1 {
                    (*w).to_string()
                } else {
                    apply_amount(c, w)
                }
            })
            .collect();
        return join_inner(&grouped, conj, false);
    }
    format!(
        "{}, {} {}",
        words[..words.len() - 1].join(", "),
        conj,
        words[words.len() - 1]
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strs(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn spacify_prefixes_nonempty() {
        assert_eq!("", spacify(""));
        assert_eq!(" abc", spacify("abc"));
        assert_eq!(" abc", spacify("  \t\tabc"));
    }

    #[test]
    fn capital_and_fullstop() {
        assert_eq!("Hello there", capital("hello there"));
        assert_eq!("hi.", fullstop("hi"));
        assert_eq!("hi?", fullstop("hi?"));
        assert_eq!("hi!", fullstop("hi!  "));
    }

    #[test]
    fn possessive_forms() {
        assert_eq!("max's", possessive("max"));
        assert_eq!("tess's", possessive("tess"));
        assert_eq!("your own", possessive("your own"));
    }

    #[test]
    fn join_plain() {
        assert_eq!("", join(&[], "and"));
        assert_eq!("max", join(&strs(&["max"]), "and"));
        assert_eq!("max and kate", join(&strs(&["max", "kate"]), "and"));
        assert_eq!(
            "max, kate, and julie",
            join(&strs(&["max", "kate", "julie"]), "and")
        );
        assert_eq!("max or kate", join(&strs(&["max", "kate"]), "or"));
    }

    #[test]
    fn join_groups_duplicates() {
        assert_eq!("two rocks", join(&strs(&["rock", "rock"]), "and"));
        assert_eq!(
            "two keys and a rock",
            join(&strs(&["key", "a rock", "key"]), "and")
        );
    }

    #[test]
    fn adverb_prefix_search() {
        assert_eq!(vec!["sickly"], adverb_by_prefix("sic", 5));
        assert_eq!(
            vec!["sickly", "sideways", "signally", "significantly", "silently"],
            adverb_by_prefix("si", 5)
        );
        assert_eq!(
            vec!["forgetfully", "forgivingly"],
            adverb_by_prefix("forg", 5)
        );
        assert!(adverb_by_prefix("zzz", 5).is_empty());
        assert!(is_adverb("happily"));
        assert!(!is_adverb("hubbabubba"));
    }
}
