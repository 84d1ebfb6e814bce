//! Message composition: turns a parsed soul command into the three
//! narration strings (actor, room, targets).
//!
//! The composer renders the verb's parsed template once per viewpoint.
//! Placeholder values are inserted as-is and never re-scanned, so target
//! titles that happen to contain placeholder words render literally.

use log::debug;

use crate::entity::TargetRef;
use crate::errors::SoulError;
use crate::grammar::{BODY_PARTS, QUALIFIERS};
use crate::lang;
use crate::parse_result::{ParseResult, VerbAction};
use crate::template::{Placeholder, Segment, Template};
use crate::verbs::{VerbDef, VerbRegistry, VerbShape};

/// Whose eyes the narration is rendered for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Viewer {
    /// The acting player: "You kick max."
    Actor,
    /// Bystanders: "Julie kicks max."
    Room,
    /// The targets of the action: "Julie kicks you."
    Target,
}

/// Verb conjugation for `$` in template literals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Person {
    Second,
    Third,
}

struct RenderCtx<'a> {
    actor: &'a TargetRef,
    targets: &'a [TargetRef],
    how: &'a str,
    what: &'a str,
    msg: &'a str,
    where_: Option<&'a Template>,
    at: Option<&'a str>,
}

/// Compose the narrations for an already parsed soul verb.
pub fn process_verb_parsed(
    registry: &VerbRegistry,
    actor: &TargetRef,
    parsed: &ParseResult,
) -> Result<VerbAction, SoulError> {
    let def = registry
        .get(&parsed.verb)
        .ok_or_else(|| SoulError::UnknownVerb(parsed.verb.clone()))?;

    let message = if parsed.message.is_empty() {
        def.message.clone().unwrap_or_default()
    } else {
        parsed.message.clone()
    };
    // a leading apostrophe in the default means: no quotes around it
    let (what, msg) = match message.strip_prefix('\'') {
        Some(bare) => (bare.to_string(), bare.to_string()),
        None if message.is_empty() => (String::new(), String::new()),
        None => (message.clone(), format!("'{}'", message)),
    };

    let how = parsed
        .adverb
        .clone()
        .or_else(|| def.adverb.clone())
        .unwrap_or_default();

    let bodypart_tpl = parsed
        .bodypart
        .as_deref()
        .map(|key| Template::parse(BODY_PARTS.get(key).copied().unwrap_or(key)));
    let where_ = bodypart_tpl.as_ref().or(def.where_default.as_ref());

    let targets: Vec<TargetRef> = parsed.targets().cloned().collect();
    let ctx = RenderCtx {
        actor,
        targets: &targets,
        how: &how,
        what: &what,
        msg: &msg,
        where_,
        at: def.at.as_deref(),
    };

    let (actor_tpl, room_tpl) = select_templates(def, !targets.is_empty());
    if targets.is_empty() && actor_tpl.needs_target() {
        // the parser rejects these before they ever get here
        return Err(SoulError::Internal(format!(
            "verb {} composed without a target",
            parsed.verb
        )));
    }

    let qualifier = parsed
        .qualifier
        .as_deref()
        .and_then(|q| QUALIFIERS.get(q).map(|qual| (q, *qual)));

    let actor_body = render(actor_tpl, &ctx, Viewer::Actor, Person::Second);
    // a negating qualifier ("tries to ...") wants the uninflected verb
    let (base_tpl, person) = match qualifier {
        Some((_, qual)) if qual.is_negating() => (actor_tpl, Person::Second),
        _ => (room_tpl, Person::Third),
    };
    let room_body = render(base_tpl, &ctx, Viewer::Room, person);
    let target_body = render(base_tpl, &ctx, Viewer::Target, person);

    let (actor_body, room_body, target_body) = match qualifier {
        Some((_, qual)) => (
            qual.actor_wrap.replace("%s", actor_body.trim()),
            qual.room_wrap.replace("%s", room_body.trim()),
            qual.room_wrap.replace("%s", target_body.trim()),
        ),
        None => (actor_body, room_body, target_body),
    };

    let actor_msg = lang::fullstop(&format!("You {}", actor_body.trim()));
    let room_msg = lang::capital(&lang::fullstop(&format!(
        "{} {}",
        actor.title,
        room_body.trim()
    )));
    let target_msg = lang::capital(&lang::fullstop(&format!(
        "{} {}",
        actor.title,
        target_body.trim()
    )));
    debug!("composed {}: {}", parsed.verb, actor_msg);

    let verb = match &parsed.qualifier {
        Some(q) => format!("{} {}", q, parsed.verb),
        None => parsed.verb.clone(),
    };
    // the actor is never among the broadcast targets
    let targets = targets
        .into_iter()
        .filter(|t| !t.is_same(actor))
        .collect();
    Ok(VerbAction {
        verb,
        targets,
        actor_msg,
        room_msg,
        target_msg,
    })
}

/// Pick the actor-form and room-form templates for the verb shape.
/// For the conjugating shapes both forms are the same template; `$`
/// takes care of the difference.
fn select_templates(def: &VerbDef, has_targets: bool) -> (&Template, &Template) {
    match def.shape {
        VerbShape::Deux => (&def.alone, def.alone_room.as_ref().unwrap_or(&def.alone)),
        VerbShape::Quad => {
            if has_targets {
                let actor = def.with_target.as_ref().unwrap_or(&def.alone);
                let room = def.with_target_room.as_ref().unwrap_or(actor);
                (actor, room)
            } else {
                (&def.alone, def.alone_room.as_ref().unwrap_or(&def.alone))
            }
        }
        VerbShape::Pers if has_targets => {
            let tpl = def.with_target.as_ref().unwrap_or(&def.alone);
            (tpl, tpl)
        }
        _ => (&def.alone, &def.alone),
    }
}

fn render(tpl: &Template, ctx: &RenderCtx, viewer: Viewer, person: Person) -> String {
    let mut out = String::new();
    for seg in &tpl.segments {
        match seg {
            Segment::Literal { text, glue } => {
                let conjugated = text.replace('$', if person == Person::Second { "" } else { "s" });
                push(&mut out, &conjugated, *glue);
            }
            Segment::Slot { ph, glue } => render_slot(&mut out, *ph, ctx, viewer, person, *glue),
        }
    }
    out
}

fn render_slot(
    out: &mut String,
    ph: Placeholder,
    ctx: &RenderCtx,
    viewer: Viewer,
    person: Person,
    glue: bool,
) {
    match ph {
        Placeholder::How => push(out, ctx.how, glue),
        Placeholder::What => push(out, ctx.what, glue),
        Placeholder::Msg => push(out, ctx.msg, glue),
        Placeholder::Where => {
            if let Some(where_tpl) = ctx.where_ {
                let rendered = render(where_tpl, ctx, viewer, person);
                push(out, &rendered, glue);
            }
        }
        Placeholder::Who => push(out, &who_join(ctx, viewer), glue),
        Placeholder::Poss => push(out, &poss_value(ctx, viewer), glue),
        Placeholder::Is => push(out, is_value(ctx, viewer), glue),
        Placeholder::Subj => push(out, &subj_value(ctx, viewer), glue),
        Placeholder::My => {
            let word = match viewer {
                Viewer::Actor => "your",
                _ => ctx.actor.gender.objective(),
            };
            push(out, word, glue);
        }
        Placeholder::Your => {
            let word = match viewer {
                Viewer::Actor => "your",
                _ => ctx.actor.gender.possessive(),
            };
            push(out, word, glue);
        }
        Placeholder::At => {
            // only materializes when there are targets and the verb has
            // an at-word (which may be empty: bare WHO)
            if let Some(at) = ctx.at {
                if !ctx.targets.is_empty() {
                    push(out, at, glue);
                    let who = who_join(ctx, viewer);
                    push(out, &who, false);
                }
            }
        }
    }
}

/// Append a value; a space separates it from what came before unless the
/// segment is glued or the value is empty.
fn push(out: &mut String, text: &str, glue: bool) {
    if text.is_empty() {
        return;
    }
    if !glue && !out.is_empty() {
        out.push(' ');
    }
    out.push_str(text);
}

fn who_join(ctx: &RenderCtx, viewer: Viewer) -> String {
    if viewer == Viewer::Target {
        // the targets read themselves as a plain "you"
        return "you".to_string();
    }
    let names: Vec<String> = ctx
        .targets
        .iter()
        .map(|t| who_word(ctx, t, viewer))
        .collect();
    lang::join(&names, "and")
}

fn who_word(ctx: &RenderCtx, target: &TargetRef, viewer: Viewer) -> String {
    if target.is_same(ctx.actor) {
        match viewer {
            Viewer::Actor => "yourself".to_string(),
            _ => format!("{}self", ctx.actor.gender.objective()),
        }
    } else {
        target.title.clone()
    }
}

fn poss_value(ctx: &RenderCtx, viewer: Viewer) -> String {
    if viewer == Viewer::Target {
        return "your".to_string();
    }
    match ctx.targets {
        [] => String::new(),
        [only] => poss_word(ctx, only, viewer),
        many => {
            let names: Vec<String> = many.iter().map(|t| poss_word(ctx, t, viewer)).collect();
            lang::possessive(&lang::join(&names, "and"))
        }
    }
}

fn poss_word(ctx: &RenderCtx, target: &TargetRef, viewer: Viewer) -> String {
    if target.is_same(ctx.actor) {
        match viewer {
            Viewer::Actor => "your own".to_string(),
            _ => format!("{} own", ctx.actor.gender.possessive()),
        }
    } else {
        lang::possessive(&target.title)
    }
}

fn is_value(ctx: &RenderCtx, viewer: Viewer) -> &'static str {
    if viewer == Viewer::Target || ctx.targets.len() != 1 {
        "are"
    } else {
        "is"
    }
}

fn subj_value(ctx: &RenderCtx, viewer: Viewer) -> String {
    if viewer == Viewer::Target {
        return "you".to_string();
    }
    match ctx.targets {
        [only] => only.gender.subjective().to_string(),
        _ => "they".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::entity::Visibility;
    use crate::parse_result::ParseOutcome;
    use crate::parser;
    use crate::test_utils::TestBeing;

    fn compose(cmd: &str) -> VerbAction {
        let julie = TestBeing::female("julie");
        let max = TestBeing::male("max");
        let kate = TestBeing::female("kate");
        let mut vis = Visibility::new(&julie);
        vis.add_living(&max);
        vis.add_living(&kate);
        let reg = VerbRegistry::builtin();
        let outcome = parser::parse(reg, &vis, cmd, &HashSet::new(), None).unwrap();
        let parsed = match outcome {
            ParseOutcome::Parsed(pr) => pr,
            other => panic!("unexpected outcome: {:?}", other),
        };
        process_verb_parsed(reg, vis.actor(), &parsed).unwrap()
    }

    #[test]
    fn default_adverb() {
        let a = compose("smile");
        assert_eq!("You smile happily.", a.actor_msg);
        assert_eq!("Julie smiles happily.", a.room_msg);
        assert!(a.targets.is_empty());
    }

    #[test]
    fn at_expansion_with_target() {
        let a = compose("grin at max");
        assert_eq!("You grin evilly at max.", a.actor_msg);
        assert_eq!("Julie grins evilly at max.", a.room_msg);
        assert_eq!("Julie grins evilly at you.", a.target_msg);
        assert_eq!(1, a.targets.len());
        assert_eq!("max", a.targets[0].name);
    }

    #[test]
    fn phys_with_bodypart() {
        let a = compose("kick max");
        assert_eq!("You kick max hard.", a.actor_msg);
        assert_eq!("Julie kicks max hard.", a.room_msg);
        assert_eq!("Julie kicks you hard.", a.target_msg);

        let a = compose("kick max nuts softly");
        assert_eq!("You kick max softly where it hurts.", a.actor_msg);
        assert_eq!("Julie kicks you softly where it hurts.", a.target_msg);
    }

    #[test]
    fn reflexive_target() {
        let a = compose("tickle myself");
        assert_eq!("You tickle yourself.", a.actor_msg);
        assert_eq!("Julie tickles herself.", a.room_msg);
        assert!(a.targets.is_empty());
    }

    #[test]
    fn negating_qualifier_uses_uninflected_verb() {
        let a = compose("fail tickle max");
        assert_eq!("fail tickle", a.verb);
        assert_eq!("You try to tickle max, but fail miserably.", a.actor_msg);
        assert_eq!("Julie tries to tickle max, but fails miserably.", a.room_msg);
        assert_eq!("Julie tries to tickle you, but fails miserably.", a.target_msg);
    }

    #[test]
    fn plain_qualifier_keeps_room_form() {
        let a = compose("suddenly kick max");
        assert_eq!("You suddenly kick max hard.", a.actor_msg);
        assert_eq!("Julie suddenly kicks max hard.", a.room_msg);

        let a = compose("again wave");
        assert_eq!("You wave happily again.", a.actor_msg);
        assert_eq!("Julie waves happily again.", a.room_msg);
    }

    #[test]
    fn pers_shape_switches_on_target() {
        let a = compose("stomp");
        assert_eq!("You stomp your foot.", a.actor_msg);
        assert_eq!("Julie stomps her foot.", a.room_msg);

        let a = compose("stomp max");
        assert_eq!("You stomp on max's foot.", a.actor_msg);
        assert_eq!("Julie stomps on max's foot.", a.room_msg);
        assert_eq!("Julie stomps on your foot.", a.target_msg);
    }

    #[test]
    fn quad_shape_has_four_texts() {
        let a = compose("watch");
        assert_eq!("You watch the surroundings carefully.", a.actor_msg);
        assert_eq!("Julie watches the surroundings carefully.", a.room_msg);

        let a = compose("watch max");
        assert_eq!("You watch max carefully.", a.actor_msg);
        assert_eq!("Julie watches max carefully.", a.room_msg);
        assert_eq!("Julie watches you carefully.", a.target_msg);
    }

    #[test]
    fn deux_shape_spells_room_form() {
        let a = compose("flex");
        assert_eq!("You flex your muscles.", a.actor_msg);
        assert_eq!("Julie flexes her muscles.", a.room_msg);
    }

    #[test]
    fn message_slots() {
        let a = compose("scream");
        assert_eq!("You scream loudly.", a.actor_msg);
        assert_eq!("Julie screams loudly.", a.room_msg);

        let a = compose("scream 'hello'");
        assert_eq!("You scream 'hello' loudly.", a.actor_msg);
        assert_eq!("Julie screams 'hello' loudly.", a.room_msg);

        let a = compose("chant");
        assert_eq!("You chant: Hare Krishna Krishna Hare Hare.", a.actor_msg);

        // an unquoted default message renders without quotes
        let a = compose("babble");
        assert_eq!("You babble something incoherently.", a.actor_msg);
        assert_eq!("Julie babbles something incoherently.", a.room_msg);

        let a = compose("ask max 'why'");
        assert_eq!("You ask max: why?", a.actor_msg);
        assert_eq!("Julie asks you: why?", a.target_msg);
    }

    #[test]
    fn poss_is_subj_agreement() {
        let a = compose("ayt max");
        assert_eq!(
            "You wave your hand in front of max's face, is he there?",
            a.actor_msg
        );
        assert_eq!(
            "Julie waves her hand in front of max's face, is he there?",
            a.room_msg
        );
        assert_eq!(
            "Julie waves her hand in front of your face, are you there?",
            a.target_msg
        );

        let a = compose("ayt max and me");
        assert_eq!(
            "You wave your hand in front of max's and your own face, are they there?",
            a.actor_msg
        );
        assert_eq!(
            "Julie waves her hand in front of max's and her own face, are they there?",
            a.room_msg
        );
        assert_eq!(
            "Julie waves her hand in front of your face, are you there?",
            a.target_msg
        );
    }

    #[test]
    fn where_default_may_hold_placeholders() {
        let a = compose("hold max");
        assert_eq!("You hold max in your arms.", a.actor_msg);
        assert_eq!("Julie holds max in her arms.", a.room_msg);
        assert_eq!("Julie holds you in her arms.", a.target_msg);
    }

    #[test]
    fn multiple_targets_join() {
        let a = compose("tickle max and kate");
        assert_eq!("You tickle max and kate.", a.actor_msg);
        assert_eq!("Julie tickles max and kate.", a.room_msg);
        assert_eq!("Julie tickles you.", a.target_msg);
        assert_eq!(2, a.targets.len());
    }

    #[test]
    fn unknown_verb_is_not_internal() {
        let julie = TestBeing::female("julie");
        let vis = Visibility::new(&julie);
        let reg = VerbRegistry::builtin();
        let parsed = ParseResult::new("frobnicate");
        match process_verb_parsed(reg, vis.actor(), &parsed) {
            Err(SoulError::UnknownVerb(v)) => assert_eq!("frobnicate", v),
            other => panic!("expected unknown verb, got {:?}", other),
        }
    }
}
