//! The free-text soul command parser.
//!
//! Turns a command line like `"fail greet kate and max politely"` into a
//! structured [`ParseResult`]: qualifier, verb, resolved targets, adverb,
//! body part and message. Words are resolved against the actor's current
//! [`Visibility`] snapshot; pronouns resolve against the previous parse.

use std::collections::HashSet;

use log::debug;

use crate::entity::{TargetRef, Visibility};
use crate::errors::ParseError;
use crate::grammar::{
    self, ALL_WORDS, BACKREF_PRONOUNS, BODY_PARTS, EXCEPT_WORDS, QUALIFIERS, REFLEXIVE_PRONOUNS,
    SKIP_WORDS,
};
use crate::lang;
use crate::parse_result::{ParseOutcome, ParseResult};
use crate::pronouns::match_previously_parsed;
use crate::verbs::VerbRegistry;

/// Upper bound on the number of words a multi-word name can span.
const MAX_NAME_WORDS: usize = 6;

/// Parse one command line. `external_verbs` are verbs the engine handles
/// itself; they take priority over soul verbs and are returned parsed but
/// otherwise untouched. `previously_parsed` feeds pronoun resolution.
pub fn parse(
    registry: &VerbRegistry,
    vis: &Visibility,
    cmd: &str,
    external_verbs: &HashSet<String>,
    previously_parsed: Option<&ParseResult>,
) -> Result<ParseOutcome, ParseError> {
    let mut message: Vec<String> = Vec::new();
    let mut args: Vec<String> = Vec::new();
    let mut unrecognized: Vec<String> = Vec::new();
    let mut unparsed: &str = cmd;

    // a quoted substring is lifted out as the message
    let working = match extract_quoted(cmd) {
        Some((remainder, msg)) => {
            message.push(msg);
            remainder
        }
        None => cmd.to_string(),
    };

    let mut words: Vec<String> = working.split_whitespace().map(str::to_string).collect();
    if words.is_empty() {
        return Err(ParseError::new("What?"));
    }

    let mut qualifier: Option<String> = None;
    if QUALIFIERS.contains_key(words[0].as_str()) {
        let word = words.remove(0);
        unparsed = strip_leading_word(unparsed, &word);
        // little spelling suggestion
        qualifier = Some(if word == "dont" { "don't".to_string() } else { word });
    }
    if !words.is_empty() && SKIP_WORDS.contains(words[0].as_str()) {
        let word = words.remove(0);
        unparsed = strip_leading_word(unparsed, &word);
    }
    if words.is_empty() {
        return Err(ParseError::new("What?"));
    }

    let mut verb: Option<String> = None;
    let mut external_verb = false;
    let mut message_verb = false;
    if external_verbs.contains(&words[0]) {
        // external verbs take priority over soul verbs
        verb = Some(words.remove(0));
        external_verb = true;
    } else if registry.contains(&words[0]) {
        let v = words.remove(0);
        message_verb = registry.get(&v).map(|d| d.expects_message()).unwrap_or(false);
        verb = Some(v);
    } else if vis.has_exits() {
        // maybe the words name a room exit
        let mut move_action: Option<String> = None;
        if registry.is_movement(&words[0]) {
            let mv = words.remove(0);
            if words.is_empty() {
                return Err(ParseError::new(format!("{} where?", lang::capital(&mv))));
            }
            unparsed = strip_leading_word(unparsed, &mv);
            move_action = Some(mv);
        }
        if let Some((exit, exit_name, wordcount)) = find_exit(&words, 0, vis) {
            if wordcount != words.len() {
                return Err(ParseError::new("What do you want to do with that?"));
            }
            unparsed = strip_leading_word(unparsed, &exit_name);
            debug!("exit hand-off: {}", exit_name);
            let mut pr = ParseResult::new(exit_name);
            pr.qualifier = qualifier;
            pr.unparsed = unparsed.to_string();
            pr.push_who(exit, 0, None);
            return Ok(ParseOutcome::HandOff(pr));
        } else if let Some(mv) = move_action {
            return Err(ParseError::new(format!("You can't {} there.", mv)));
        }
    }
    if let Some(v) = &verb {
        unparsed = strip_leading_word(unparsed, v);
    }

    let mut pr = ParseResult::default();
    let mut include_flag = true;
    let mut collect_message = false;
    let mut previous_word: Option<String> = None;
    let mut who_sequence = 0usize;

    let mut i = 0usize;
    while i < words.len() {
        let idx = i;
        i += 1;
        let raw = words[idx].clone();
        if collect_message {
            message.push(raw.clone());
            args.push(raw.clone());
            previous_word = Some(raw);
            continue;
        }
        let word: &str = if message_verb {
            raw.as_str()
        } else {
            raw.trim_end_matches(',')
        };

        if BACKREF_PRONOUNS.contains(&word) {
            let previous = previously_parsed
                .ok_or_else(|| ParseError::new("It is not clear who you mean."))?;
            for (target, name) in match_previously_parsed(vis, previous, word)? {
                add_target(&mut pr, &mut who_sequence, target, &previous_word, include_flag);
                // the replacement name goes into the args instead of the pronoun
                args.push(name);
            }
            previous_word = None;
            continue;
        }
        if REFLEXIVE_PRONOUNS.contains(&word) {
            let actor = vis.actor().clone();
            add_target(&mut pr, &mut who_sequence, actor, &previous_word, include_flag);
            args.push(word.to_string());
            previous_word = None;
            continue;
        }
        if let Some(&phrase) = BODY_PARTS.get(word) {
            if let Some(already) = &pr.bodypart {
                let already = BODY_PARTS.get(already.as_str()).copied().unwrap_or(already);
                return Err(ParseError::new(format!(
                    "You can't do that both {} and {}.",
                    already, phrase
                )));
            }
            pr.bodypart = Some(word.to_string());
            args.push(word.to_string());
            continue;
        }
        if ALL_WORDS.contains(&word) {
            if include_flag {
                if vis.livings().is_empty() {
                    return Err(ParseError::new("There is nobody here."));
                }
                // every living except the actor; items never count
                let others: Vec<TargetRef> = vis.others().cloned().collect();
                for other in others {
                    add_target(&mut pr, &mut who_sequence, other, &previous_word, true);
                }
            } else {
                pr.who.clear();
                who_sequence = 0;
            }
            args.push(word.to_string());
            previous_word = None;
            continue;
        }
        if word == "everything" {
            return Err(ParseError::new(
                "You can't do something to everything around you, be more specific.",
            ));
        }
        if EXCEPT_WORDS.contains(&word) {
            include_flag = !include_flag;
            args.push(word.to_string());
            continue;
        }
        if lang::is_adverb(word) {
            if let Some(already) = &pr.adverb {
                return Err(ParseError::new(format!(
                    "You can't do that both {} and {}.",
                    already, word
                )));
            }
            pr.adverb = Some(word.to_string());
            args.push(word.to_string());
            continue;
        }
        if let Some(living) = vis.living(word) {
            let living = living.clone();
            add_target(&mut pr, &mut who_sequence, living, &previous_word, include_flag);
            args.push(word.to_string());
            previous_word = None;
            continue;
        }
        if let Some(item) = vis.item(word) {
            let item = item.clone();
            add_target(&mut pr, &mut who_sequence, item, &previous_word, include_flag);
            args.push(word.to_string());
            previous_word = None;
            continue;
        }
        if let Some((exit, exit_name, wordcount)) = find_exit(&words, idx, vis) {
            // exits join the targets even in exclude mode
            add_target(&mut pr, &mut who_sequence, exit, &previous_word, true);
            args.push(exit_name);
            previous_word = None;
            i = idx + wordcount;
            continue;
        }
        if let Some((target, full_name, wordcount)) = find_living_or_item(&words, idx, vis) {
            add_target(&mut pr, &mut who_sequence, target, &previous_word, include_flag);
            args.push(full_name);
            previous_word = None;
            i = idx + wordcount;
            continue;
        }
        if message_verb && message.is_empty() {
            collect_message = true;
            message.push(word.to_string());
            args.push(word.to_string());
            continue;
        }
        if !SKIP_WORDS.contains(word) {
            // unrecognized; maybe a name prefix the player abbreviated
            if pr.who.is_empty() {
                if let Some(name) = name_by_prefix(vis, word) {
                    return Err(ParseError::new(format!("Perhaps you meant {}?", name)));
                }
            }
            if !external_verb {
                if verb.is_none() {
                    return Ok(ParseOutcome::Unknown {
                        verb: word.to_string(),
                        words,
                        qualifier,
                    });
                }
                let adverbs = lang::adverb_by_prefix(word, 5);
                if adverbs.len() == 1 {
                    let full = adverbs[0];
                    if let Some(already) = &pr.adverb {
                        return Err(ParseError::new(format!(
                            "You can't do that both {} and {}.",
                            already, full
                        )));
                    }
                    pr.adverb = Some(full.to_string());
                    args.push(full.to_string());
                    previous_word = Some(full.to_string());
                    continue;
                } else if adverbs.len() > 1 {
                    let options: Vec<String> = adverbs.iter().map(|a| a.to_string()).collect();
                    return Err(ParseError::new(format!(
                        "What adverb did you mean: {}?",
                        lang::join(&options, "or")
                    )));
                }
            }
            if external_verb {
                args.push(word.to_string());
                unrecognized.push(word.to_string());
            } else if registry.contains(word)
                || grammar::is_qualifier(word)
                || grammar::is_body_part(word)
            {
                // a misplaced verb, qualifier or bodypart
                return Err(ParseError::new(format!(
                    "The word {} makes no sense at that location.",
                    word
                )));
            } else {
                return Err(ParseError::new(format!(
                    "It's not clear what you mean by '{}'.",
                    word
                )));
            }
        }
        previous_word = Some(word.to_string());
    }

    pr.message = message.join(" ");
    pr.verb = match verb {
        Some(v) => v,
        None => {
            // no verb, but maybe a lone target with a default verb
            match pr.who_1() {
                Some(target) if pr.who_count() == 1 => target
                    .default_verb
                    .clone()
                    .unwrap_or_else(|| "examine".to_string()),
                _ => {
                    return Ok(ParseOutcome::Unknown {
                        verb: words[0].clone(),
                        words,
                        qualifier,
                    })
                }
            }
        }
    };
    pr.qualifier = qualifier;
    pr.args = args;
    pr.unrecognized = unrecognized;
    pr.unparsed = unparsed.to_string();

    // a verb that cannot be narrated without a target fails here, not in
    // the composer
    if !external_verb {
        if let Some(def) = registry.get(&pr.verb) {
            if def.needs_target && pr.who_count() == 0 {
                return Err(ParseError::new(format!(
                    "The verb {} needs a person.",
                    pr.verb
                )));
            }
        }
    }

    debug!("parsed: {}", pr);
    Ok(ParseOutcome::Parsed(pr))
}

fn add_target(
    pr: &mut ParseResult,
    sequence: &mut usize,
    target: TargetRef,
    previous_word: &Option<String>,
    include: bool,
) {
    if include {
        if !pr.contains_target(&target) {
            pr.push_who(target, *sequence, previous_word.clone());
            *sequence += 1;
        }
    } else {
        pr.remove_who(&target);
    }
}

/// Lift the first quoted substring (single or double quotes) out of the
/// command. Greedy: the message runs to the last matching quote char.
fn extract_quoted(cmd: &str) -> Option<(String, String)> {
    for (start, ch) in cmd.char_indices() {
        if ch != '\'' && ch != '"' {
            continue;
        }
        if let Some(rel) = cmd[start + 1..].rfind(ch) {
            let end = start + 1 + rel;
            let msg = cmd[start + 1..end].trim().to_string();
            let remainder = format!("{}{}", &cmd[..start], &cmd[end + 1..]);
            return Some((remainder, msg));
        }
    }
    None
}

fn strip_leading_word<'a>(unparsed: &'a str, word: &str) -> &'a str {
    let u = unparsed.trim_start();
    u.strip_prefix(word).unwrap_or(u).trim_start()
}

/// Try to match a (possibly multi-word) name starting at `index`.
fn lookup_spaced<'v>(
    words: &[String],
    index: usize,
    lookup: impl Fn(&str) -> Option<&'v TargetRef>,
) -> Option<(TargetRef, String, usize)> {
    let mut name = words.get(index)?.clone();
    for wordcount in 1..MAX_NAME_WORDS {
        if let Some(target) = lookup(&name) {
            return Some((target.clone(), name, wordcount));
        }
        match words.get(index + wordcount) {
            Some(next) => {
                name.push(' ');
                name.push_str(next);
            }
            None => return None,
        }
    }
    None
}

fn find_exit(words: &[String], index: usize, vis: &Visibility) -> Option<(TargetRef, String, usize)> {
    lookup_spaced(words, index, |name| vis.exit(name))
}

fn find_living_or_item(
    words: &[String],
    index: usize,
    vis: &Visibility,
) -> Option<(TargetRef, String, usize)> {
    lookup_spaced(words, index, |name| vis.living(name).or_else(|| vis.item(name)))
}

/// First registered living (then item) name starting with the word, in
/// registration order.
fn name_by_prefix<'v>(vis: &'v Visibility, word: &str) -> Option<&'v str> {
    vis.living_names()
        .find(|name| name.starts_with(word))
        .or_else(|| vis.item_names().find(|name| name.starts_with(word)))
}
