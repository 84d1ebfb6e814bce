//! The verb registry: every social verb the soul understands, with its
//! narration shape, defaults and templates.
//!
//! The built-in table descends from the classic LPC soul verb list and is
//! constructed once at startup. A story may narrow, remove from, or
//! extend it exactly once before play through [`VerbRegistry::customized`];
//! the result is a new immutable snapshot, safe to share between actors.

use std::collections::HashSet;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::lang::spacify;
use crate::template::{Placeholder, Template};

/// How a verb's narration strings are assembled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbShape {
    /// verb + HOW + AT: "you smile happily at Fritz"
    Defa,
    /// verb + WHO + HOW: "you ignore Fritz completely"
    Prev,
    /// verb + WHO + HOW + WHERE: "you stroke Anna softly on the shoulder"
    Phys,
    /// verb + HOW, never shows a target: "you sweat profusely"
    Shrt,
    /// alternate texts with and without a target
    Pers,
    /// the template carries all its own slots
    Simp,
    /// separate actor and room spellings
    Deux,
    /// like Deux, with two more texts for when a target is present
    Quad,
}

/// A single verb definition: shape, defaults and parsed templates.
#[derive(Debug, Clone)]
pub struct VerbDef {
    pub verb: String,
    pub shape: VerbShape,
    /// Default adverb when the player gives none.
    pub adverb: Option<String>,
    /// Default message for message-bearing verbs. A leading apostrophe
    /// means the message renders without quotes.
    pub message: Option<String>,
    /// Default body-part phrase for the WHERE slot.
    pub where_default: Option<Template>,
    /// Preposition spliced in front of WHO by the AT slot.
    pub at: Option<String>,
    /// Template used with no target (and, for most shapes, always).
    pub alone: Template,
    /// Room spelling (Deux/Quad only; other shapes conjugate with `$`).
    pub alone_room: Option<Template>,
    /// Target-present variant (Pers/Quad).
    pub with_target: Option<Template>,
    /// Room spelling of the target-present variant (Quad).
    pub with_target_room: Option<Template>,
    /// True when the verb cannot be narrated without a target.
    pub needs_target: bool,
}

impl VerbDef {
    /// Does this verb swallow the rest of the line as a message?
    pub fn expects_message(&self) -> bool {
        self.alone.contains(Placeholder::Msg) || self.alone.contains(Placeholder::What)
    }
}

type VerbMap = IndexMap<String, VerbDef>;

/// (default adverb, default message, default body-part phrase)
type Defaults<'a> = (Option<&'a str>, Option<&'a str>, Option<&'a str>);

const NO_DEFAULTS: Defaults = (None, None, None);

fn build(
    m: &mut VerbMap,
    verb: &str,
    shape: VerbShape,
    defaults: Defaults,
    at: Option<&str>,
    alone: Template,
    alone_room: Option<Template>,
    with_target: Option<Template>,
    with_target_room: Option<Template>,
) {
    let (adverb, message, where_) = defaults;
    let needs_target = match shape {
        VerbShape::Pers | VerbShape::Quad => false,
        _ => alone.needs_target(),
    };
    m.insert(
        verb.to_string(),
        VerbDef {
            verb: verb.to_string(),
            shape,
            adverb: adverb.map(str::to_string),
            message: message.map(str::to_string),
            where_default: where_.map(Template::parse),
            at: at.map(str::to_string),
            alone,
            alone_room,
            with_target,
            with_target_room,
            needs_target,
        },
    );
}

fn defa(m: &mut VerbMap, verb: &str, adverb: Option<&str>, at: &str) {
    let alone = Template::parse(&format!("{}$ HOW AT", verb));
    build(m, verb, VerbShape::Defa, (adverb, None, None), Some(at), alone, None, None, None);
}

fn prev(m: &mut VerbMap, verb: &str, adverb: Option<&str>, link: &str) {
    let alone = Template::parse(&format!("{}${} WHO HOW", verb, spacify(link)));
    build(m, verb, VerbShape::Prev, (adverb, None, None), None, alone, None, None, None);
}

fn phys(m: &mut VerbMap, verb: &str, adverb: Option<&str>, where_: Option<&str>) {
    let alone = Template::parse(&format!("{}$ WHO HOW WHERE", verb));
    build(m, verb, VerbShape::Phys, (adverb, None, where_), None, alone, None, None, None);
}

fn shrt(m: &mut VerbMap, verb: &str, adverb: Option<&str>) {
    let alone = Template::parse(&format!("{}$ HOW", verb));
    build(m, verb, VerbShape::Shrt, (adverb, None, None), None, alone, None, None, None);
}

fn pers(m: &mut VerbMap, verb: &str, defaults: Defaults, alone: &str, with_target: &str) {
    build(
        m,
        verb,
        VerbShape::Pers,
        defaults,
        None,
        Template::parse(alone),
        None,
        Some(Template::parse(with_target)),
        None,
    );
}

fn simp(m: &mut VerbMap, verb: &str, defaults: Defaults, template: &str, at: Option<&str>) {
    build(m, verb, VerbShape::Simp, defaults, at, Template::parse(template), None, None, None);
}

fn deux(m: &mut VerbMap, verb: &str, defaults: Defaults, actor: &str, room: &str) {
    build(
        m,
        verb,
        VerbShape::Deux,
        defaults,
        None,
        Template::parse(actor),
        Some(Template::parse(room)),
        None,
        None,
    );
}

#[allow(clippy::too_many_arguments)]
fn quad(
    m: &mut VerbMap,
    verb: &str,
    defaults: Defaults,
    actor: &str,
    room: &str,
    actor_target: &str,
    room_target: &str,
) {
    build(
        m,
        verb,
        VerbShape::Quad,
        defaults,
        None,
        Template::parse(actor),
        Some(Template::parse(room)),
        Some(Template::parse(actor_target)),
        Some(Template::parse(room_target)),
    );
}

fn builtin_verbs() -> VerbMap {
    let m = &mut VerbMap::new();

    deux(m, "flex", NO_DEFAULTS, "flex YOUR muscles HOW", "flexes YOUR muscles HOW");
    simp(m, "snort", NO_DEFAULTS, "snort$ HOW AT", Some("at"));
    simp(m, "pant", (Some("heavily"), None, None), "pant$ HOW AT", Some("at"));
    simp(m, "hmm", NO_DEFAULTS, "hmm$ HOW AT", Some("at"));
    simp(m, "ack", NO_DEFAULTS, "ack$ HOW AT", Some("at"));
    simp(m, "guffaw", NO_DEFAULTS, "guffaw$ HOW AT", Some("at"));
    simp(m, "raise", NO_DEFAULTS, " HOW raise$ an eyebrow AT", Some("at"));
    simp(m, "snap", NO_DEFAULTS, "snap$ YOUR fingers AT", Some("at"));
    defa(m, "lust", None, "for");
    defa(m, "burp", Some("rudely"), "at");
    defa(m, "bump", Some("clumsily"), "into");
    defa(m, "wink", Some("suggestively"), "at");
    defa(m, "smile", Some("happily"), "at");
    defa(m, "yawn", None, "at");
    defa(m, "swoon", Some("romantically"), "at");
    defa(m, "sneer", Some("disdainfully"), "at");
    simp(m, "talk", NO_DEFAULTS, "want$ to talk AT HOW", Some("to"));
    defa(m, "beam", None, "at");
    defa(m, "point", None, "at");
    defa(m, "grin", Some("evilly"), "at");
    defa(m, "laugh", None, "at");
    defa(m, "nod", Some("solemnly"), "at");
    defa(m, "wave", Some("happily"), "at");
    defa(m, "cackle", Some("gleefully"), "at");
    defa(m, "chuckle", None, "at");
    defa(m, "bow", None, "to");
    defa(m, "surrender", None, "to");
    defa(m, "sit", Some("down"), "in front of");
    defa(m, "stand", Some("up"), "in front of");
    defa(m, "capitulate", Some("unconditionally"), "to");
    defa(m, "glare", Some("stonily"), "at");
    defa(m, "giggle", Some("merrily"), "at");
    defa(m, "groan", None, "at");
    defa(m, "grunt", None, "at");
    defa(m, "growl", None, "at");
    defa(m, "breathe", Some("heavily"), "at");
    defa(m, "argh", None, "at");
    defa(m, "scowl", Some("darkly"), "at");
    defa(m, "snarl", None, "at");
    defa(m, "recoil", Some("with fear"), "from");
    defa(m, "moan", None, "at");
    defa(m, "howl", Some("in pain"), "at");
    defa(m, "puke", None, "on");
    defa(m, "drool", None, "on");
    defa(m, "sneeze", Some("loudly"), "at");
    defa(m, "spit", None, "on");
    defa(m, "stare", None, "at");
    defa(m, "whistle", Some("appreciatively"), "at");
    defa(m, "applaud", None, "");
    defa(m, "leer", None, "at");
    defa(m, "agree", None, "with");
    pers(m, "believe", NO_DEFAULTS, "believe$ in MYself HOW", "believe$ WHO HOW");
    pers(m, "understand", NO_DEFAULTS, "understand$ HOW", "understand$ WHO HOW");
    defa(m, "disagree", None, "with");
    defa(m, "fart", None, "at");
    defa(m, "dance", None, "with");
    defa(m, "spin", Some("dizzily"), "around");
    defa(m, "flirt", None, "with");
    defa(m, "meow", None, "at");
    defa(m, "bark", None, "at");
    simp(m, "slide", NO_DEFAULTS, "slip$ and slide$ HOW", None);
    prev(m, "ogle", None, "");
    prev(m, "eye", Some("suspiciously"), "");
    simp(m, "pet", NO_DEFAULTS, "pet$ WHO HOW WHERE", None);
    defa(m, "barf", None, "on");
    defa(m, "listen", None, "to");
    simp(m, "hear", NO_DEFAULTS, "listen$ AT HOW", Some("to"));
    defa(m, "purr", None, "at");
    defa(m, "curtsy", None, "before");
    simp(m, "puzzle", NO_DEFAULTS, "look$ HOW puzzled AT", Some("at"));
    defa(m, "grovel", None, "before");
    simp(m, "tongue", NO_DEFAULTS, "stick$ YOUR tongue out HOW AT", Some("at"));
    simp(m, "swing", (Some("wildly"), None, None), "swing$ YOUR arms HOW AT", Some("at"));
    defa(m, "apologize", None, "to");
    simp(m, "sorry", NO_DEFAULTS, "apologize$ AT HOW", Some("to"));
    defa(m, "complain", None, "about");
    pers(m, "rotate", NO_DEFAULTS, "rotate$ HOW", "rotate$ WHO HOW");
    pers(m, "excuse", NO_DEFAULTS, " HOW excuse$ MYself", " HOW excuse$ MYself to WHO");
    pers(m, "beg", NO_DEFAULTS, "beg$ HOW", "beg$ WHO for mercy HOW");
    pers(m, "fear", NO_DEFAULTS, "shiver$ HOW with fear", "fear$ WHO HOW");
    simp(m, "headshake", NO_DEFAULTS, "shake$ YOUR head AT HOW", Some("at"));
    simp(m, "shake", (Some("like a bowlful of jello"), None, None), "shake$ AT HOW", Some(""));
    simp(m, "jiggle", (Some("like a bowlful of jello"), None, None), "jiggle$ AT HOW", Some(""));
    pers(m, "stink", NO_DEFAULTS, "smell$ YOUR armpits. Eeeww!", "smell$ POSS armpits. Eeeww!");
    simp(m, "grimace", NO_DEFAULTS, " HOW make$ an awful face AT", Some("at"));
    pers(m, "stomp", NO_DEFAULTS, "stomp$ YOUR foot HOW", "stomp$ on POSS foot HOW");
    defa(m, "snigger", Some("jeeringly"), "at");
    quad(
        m,
        "watch",
        (Some("carefully"), None, None),
        "watch the surroundings HOW",
        "watches the surroundings HOW",
        "watch WHO HOW",
        "watches WHO HOW",
    );
    quad(
        m,
        "scratch",
        (None, None, Some("on the head")),
        "scratch MYself HOW WHERE",
        "scratches MYself HOW WHERE",
        "scratch WHO HOW WHERE",
        "scratches WHO HOW WHERE",
    );
    pers(
        m,
        "tap",
        (Some("impatiently"), None, Some("on the shoulder")),
        "tap$ YOUR foot HOW",
        "tap$ WHO WHERE",
    );
    simp(m, "wobble", NO_DEFAULTS, "wobble$ AT HOW", Some(""));
    simp(m, "move", (Some("thoughtfully"), None, None), "move$ out of the way HOW", Some(""));
    simp(m, "yodel", NO_DEFAULTS, "yodel$ a merry tune HOW", Some(""));
    simp(m, "spray", NO_DEFAULTS, "spray$ HOW AT", Some("all over"));
    simp(m, "spill", NO_DEFAULTS, "spill$ YOUR drink HOW AT", Some("all over"));
    pers(m, "melt", (Some("in front of"), None, None), "melt$ from the heat", "melt$ HOW WHO");
    pers(m, "hello", NO_DEFAULTS, "greet$ everyone HOW", "greet$ WHO HOW");
    pers(m, "hi", NO_DEFAULTS, "greet$ everyone HOW", "greet$ WHO HOW");
    simp(m, "wait", NO_DEFAULTS, "wait$ HOW", Some(""));
    simp(m, "grease", (Some("like a shiatsu"), None, None), "grease$ WHO HOW", None);
    simp(m, "oil", (Some("like a shiatsu"), None, None), "oil$ WHO HOW", None);
    pers(m, "sniff", NO_DEFAULTS, "sniff$. What's that smell?", "sniff$ WHO. What's that smell?");
    pers(m, "smell", NO_DEFAULTS, "sniff$. What's that smell?", "sniff$ WHO. What's that smell?");
    pers(
        m,
        "smoke",
        NO_DEFAULTS,
        "smoke$ a cigar, and blow$ out the smoke.",
        "smoke$ a cigar, and blow$ the smoke at WHO.",
    );

    // message-bearing verbs
    pers(m, "curse", NO_DEFAULTS, "curse$ WHAT HOW", "curse$ WHO HOW");
    simp(m, "swear", NO_DEFAULTS, "swear$ WHAT AT HOW", Some("before"));
    pers(m, "criticize", NO_DEFAULTS, "criticize$ WHAT HOW", "criticize$ WHO HOW");
    pers(m, "lie", NO_DEFAULTS, "lie$ MSG HOW", "lie$ to WHO HOW");
    pers(m, "mutter", (None, Some("ehh..."), None), "mutter$ MSG HOW", "mutter$ MSG to WHO HOW");
    simp(m, "babble", (Some("incoherently"), Some("'something"), None), "babble$ MSG HOW AT", Some("to"));
    simp(m, "chant", (None, Some("Hare Krishna Krishna Hare Hare"), None), " HOW chant$: WHAT", Some(""));
    simp(m, "sing", NO_DEFAULTS, "sing$ WHAT HOW AT", Some("to"));
    quad(
        m,
        "hiss",
        NO_DEFAULTS,
        "hiss MSG HOW",
        "hisses MSG HOW",
        "hiss MSG to WHO HOW",
        "hisses MSG to WHO HOW",
    );
    simp(m, "answer", (None, Some("ehh..."), None), " HOW answer$ AT: WHAT", Some(""));
    quad(
        m,
        "reply",
        (None, Some("ehh..."), None),
        " HOW reply: WHAT",
        " HOW replies: WHAT",
        " HOW reply to WHO: WHAT",
        " HOW replies to WHO: WHAT",
    );
    simp(m, "exclaim", (None, Some("no way"), None), " HOW exclaim$ AT: WHAT!", Some(""));
    simp(m, "quote", NO_DEFAULTS, " HOW quote$ AT MSG", Some("to"));
    simp(m, "ask", (None, Some("ehh..."), None), " HOW ask$ AT: WHAT?", Some(""));
    simp(m, "request", (None, Some("a moment"), None), " HOW request$ AT WHAT", Some(""));
    simp(m, "consult", NO_DEFAULTS, " HOW consult$ AT WHAT", Some(""));
    simp(m, "mumble", NO_DEFAULTS, "mumble$ MSG HOW AT", Some("to"));
    simp(m, "murmur", NO_DEFAULTS, "murmur$ MSG HOW AT", Some("to"));
    simp(m, "scream", (Some("loudly"), None, None), "scream$ MSG HOW AT", Some("at"));
    simp(m, "command", (None, Some("follow orders"), None), "command$ WHO HOW to WHAT", None);
    simp(m, "utter", (None, Some("ehh..."), None), " HOW utter$ MSG AT", Some("to"));
    simp(m, "whisper", NO_DEFAULTS, "whisper$ MSG HOW AT", Some("to"));

    // verbs that require a person
    simp(m, "glance", NO_DEFAULTS, "glance$ HOW at WHO", None);
    simp(m, "hide", NO_DEFAULTS, "hide$ HOW behind WHO", None);
    simp(m, "finger", NO_DEFAULTS, "give$ WHO the finger", None);
    simp(m, "mercy", NO_DEFAULTS, "beg$ WHO for mercy", None);
    simp(m, "jerk", (Some("briskly"), None, None), "jerk$ WHO HOW", Some(""));
    simp(m, "insult", (Some("angrily"), None, None), " HOW spew$ profanities at WHO", None);
    prev(m, "gripe", None, "to");
    prev(m, "peer", None, "at");
    prev(m, "gaze", None, "at");
    prev(m, "chase", Some("angrily"), "after");
    simp(m, "remember", NO_DEFAULTS, "remember$ AT HOW", Some(""));
    prev(m, "surprise", None, "");
    phys(m, "pounce", Some("playfully"), None);
    phys(m, "feel", Some("softly"), None);
    pers(m, "bite", NO_DEFAULTS, " HOW bite$ YOUR lip", "bite$ WHO HOW WHERE");
    simp(m, "lick", NO_DEFAULTS, "lick$ WHO HOW WHERE", None);
    pers(m, "caper", (Some("merrily"), None, None), "caper$ HOW about", "caper$ around WHO HOW");
    pers(
        m,
        "beep",
        (Some("triumphantly"), None, Some("on the nose")),
        " HOW beep$ MYself WHERE",
        " HOW beep$ WHO WHERE",
    );
    pers(m, "blink", NO_DEFAULTS, "blink$ HOW", "blink$ HOW at WHO");
    phys(m, "knock", None, Some("on the head"));
    phys(m, "bonk", None, Some("on the head"));
    phys(m, "bop", None, Some("on the head"));
    phys(m, "stroke", None, Some("on the cheek"));
    phys(m, "shove", Some("briskly"), Some("to the side"));
    phys(m, "push", None, Some("to the side"));
    simp(m, "pull", NO_DEFAULTS, "pull$ at WHO", None);
    phys(m, "rub", Some("gently"), Some("on the back"));
    phys(m, "hold", None, Some("in YOUR arms"));
    phys(m, "embrace", None, Some("in YOUR arms"));
    simp(m, "handshake", NO_DEFAULTS, "shake$ hands with WHO", Some(""));
    prev(m, "tickle", None, "");
    prev(m, "worship", None, "");
    prev(m, "admire", None, "");
    prev(m, "mock", None, "");
    prev(m, "tease", None, "");
    prev(m, "taunt", None, "");
    prev(m, "strangle", None, "");
    prev(m, "hate", None, "");
    prev(m, "kill", None, "");
    prev(m, "attack", None, "");
    prev(m, "fight", None, "");
    prev(m, "fondle", None, "");
    prev(m, "nominate", None, "");
    prev(m, "startle", None, "");
    prev(m, "turn", None, "YOUR head towards");
    prev(m, "squeeze", Some("fondly"), "");
    prev(m, "comfort", None, "");
    phys(m, "nudge", Some("suggestively"), None);
    phys(m, "slap", None, Some("in the face"));
    phys(m, "hit", None, Some("in the face"));
    phys(m, "kick", Some("hard"), None);
    simp(m, "tackle", NO_DEFAULTS, "tackle$ WHO HOW", Some(""));
    phys(m, "spank", None, Some("on the butt"));
    phys(m, "pat", None, Some("on the head"));
    deux(
        m,
        "punch",
        (None, None, Some("in the eye")),
        "punch WHO HOW WHERE",
        "punches WHO HOW WHERE",
    );
    prev(m, "hug", None, "");
    prev(m, "want", None, "");
    deux(m, "pinch", NO_DEFAULTS, "pinch WHO HOW WHERE", "pinches WHO HOW WHERE");
    deux(m, "kiss", NO_DEFAULTS, "kiss WHO HOW WHERE", "kisses WHO HOW WHERE");
    deux(
        m,
        "caress",
        (None, None, Some("on the cheek")),
        "caress WHO HOW WHERE",
        "caresses WHO HOW WHERE",
    );
    deux(m, "smooch", NO_DEFAULTS, "smooch WHO HOW", "smooches WHO HOW");
    deux(m, "envy", NO_DEFAULTS, "envy WHO HOW", "envies WHO HOW");
    deux(m, "touch", NO_DEFAULTS, "touch WHO HOW WHERE", "touches WHO HOW WHERE");
    phys(m, "knee", None, Some("where it hurts"));
    prev(m, "love", None, "");
    prev(m, "adore", None, "");
    prev(m, "grope", None, "");
    phys(m, "poke", None, Some("in the ribs"));
    prev(m, "snuggle", None, "");
    simp(m, "kneel", NO_DEFAULTS, " HOW fall$ on YOUR knees AT", Some("in front of"));
    prev(m, "trust", None, "");
    prev(m, "like", None, "");
    prev(m, "greet", None, "");
    prev(m, "welcome", None, "");
    prev(m, "thank", None, "");
    prev(m, "cuddle", None, "");
    prev(m, "salute", None, "");
    simp(m, "french", NO_DEFAULTS, "give$ WHO a REAL kiss, it seems to last forever", None);
    simp(m, "nibble", NO_DEFAULTS, "nibble$ HOW on POSS ear", None);
    simp(m, "ruffle", NO_DEFAULTS, "ruffle$ POSS hair HOW", None);
    prev(m, "ignore", None, "");
    prev(m, "forgive", None, "");
    prev(m, "congratulate", None, "");
    simp(
        m,
        "ayt",
        NO_DEFAULTS,
        "wave$ YOUR hand in front of POSS face, IS SUBJ HOW there?",
        None,
    );
    prev(m, "judge", None, "");

    // verbs that neither need nor use persons
    simp(m, "roll", (Some("to the ceiling"), None, None), "roll$ YOUR eyes HOW", None);
    simp(m, "boggle", NO_DEFAULTS, "boggle$ HOW at the concept", None);
    shrt(m, "cheer", Some("enthusiastically"));
    simp(m, "twiddle", NO_DEFAULTS, "twiddle$ YOUR thumbs HOW", None);
    simp(m, "wiggle", NO_DEFAULTS, "wiggle$ YOUR bottom AT HOW", Some("at"));
    simp(m, "wrinkle", NO_DEFAULTS, "wrinkle$ YOUR nose AT HOW", Some("at"));
    simp(m, "thumb", NO_DEFAULTS, " HOW suck$ YOUR thumb", None);
    simp(m, "flip", NO_DEFAULTS, "flip$ HOW head over heels", None);
    deux(m, "cry", NO_DEFAULTS, "cry HOW", "cries HOW");
    deux(m, "ah", NO_DEFAULTS, "go 'ah' HOW", "goes 'ah' HOW");
    deux(m, "halt!", NO_DEFAULTS, "go 'Halt! Hammerzeit!' HOW", "goes 'Halt! Hammerzeit!' HOW");
    deux(m, "stop!", NO_DEFAULTS, "go 'Stop! Hammertime!' HOW", "goes 'Stop! Hammertime!' HOW");
    simp(m, "clear", NO_DEFAULTS, "clear$ YOUR throat HOW", None);
    shrt(m, "sob", None);
    shrt(m, "lag", Some("helplessly"));
    shrt(m, "whine", None);
    simp(m, "cringe", (Some("in terror"), None, None), "cringe$ HOW", None);
    shrt(m, "sweat", None);
    shrt(m, "gurgle", None);
    shrt(m, "grumble", None);
    shrt(m, "panic", None);
    simp(m, "pace", (Some("impatiently"), None, None), "start$ pacing HOW", None);
    simp(m, "pale", NO_DEFAULTS, "turn$ white as ashes HOW", None);
    deux(m, "die", NO_DEFAULTS, " HOW fall down and play dead", " HOW falls to the ground, dead");
    simp(m, "sleep", NO_DEFAULTS, "yawn$ sleepily", None);
    deux(m, "wake", NO_DEFAULTS, "are awake", "is awake");
    deux(m, "awake", NO_DEFAULTS, "are awake", "is awake");
    shrt(m, "stumble", None);
    shrt(m, "bounce", Some("up and down"));
    shrt(m, "sulk", Some("in the corner"));
    shrt(m, "strut", Some("proudly"));
    shrt(m, "snivel", Some("pathetically"));
    shrt(m, "snore", None);
    simp(m, "clue", NO_DEFAULTS, "need$ a clue HOW", None);
    simp(m, "stupid", NO_DEFAULTS, "look$ HOW stupid", None);
    simp(m, "bored", NO_DEFAULTS, "look$ HOW bored", None);
    simp(m, "repent", NO_DEFAULTS, "repent$ YOUR sins", None);
    shrt(m, "snicker", None);
    shrt(m, "smirk", None);
    simp(m, "jump", (Some("up and down in aggravation"), None, None), "jump$ HOW", None);
    shrt(m, "squint", None);
    shrt(m, "huff", None);
    shrt(m, "puff", None);
    shrt(m, "fume", None);
    shrt(m, "steam", None);
    shrt(m, "choke", None);
    shrt(m, "faint", None);
    shrt(m, "shrug", None);
    shrt(m, "pout", None);
    shrt(m, "hiccup", None);
    shrt(m, "frown", None);
    simp(m, "pray", NO_DEFAULTS, "mumble$ a short prayer AT", Some("to"));
    shrt(m, "gasp", Some("in astonishment"));
    shrt(m, "think", Some("carefully"));
    shrt(m, "ponder", Some("over some problem"));
    defa(m, "wonder", None, "at");
    shrt(m, "clap", None);
    shrt(m, "sigh", None);
    shrt(m, "cough", Some("noisily"));
    shrt(m, "shiver", Some("from the cold"));
    shrt(m, "tremble", None);
    deux(m, "twitch", NO_DEFAULTS, "twitch HOW", "twitches HOW");
    deux(m, "bitch", NO_DEFAULTS, "bitch HOW", "bitches HOW");
    deux(m, "blush", NO_DEFAULTS, "blush HOW", "blushes HOW");
    deux(m, "stretch", NO_DEFAULTS, "stretch HOW", "stretches HOW");
    deux(m, "relax", NO_DEFAULTS, "relax HOW", "relaxes HOW");
    pers(m, "duck", NO_DEFAULTS, "duck$ HOW out of the way", "duck$ HOW out of POSS way");

    std::mem::take(m)
}

const AGGRESSIVE_VERBS: &[&str] = &[
    "attack", "barf", "bitch", "bite", "bonk", "bop", "bump", "burp", "caress", "chase", "curse",
    "feel", "fight", "finger", "fondle", "french", "grease", "grimace", "grope", "growl",
    "guffaw", "handshake", "hit", "hold", "hug", "insult", "jerk", "jiggle", "kick", "kill",
    "kiss", "knee", "knock", "lick", "mock", "nibble", "nudge", "oil", "pat", "pet", "pinch",
    "poke", "pounce", "puke", "push", "pull", "punch", "rotate", "rub", "ruffle", "scowl",
    "scratch", "shake", "shove", "slap", "smooch", "sneer", "snigger", "snuggle", "spank",
    "spill", "spit", "spray", "squeeze", "startle", "stomp", "strangle", "stroke", "surprise",
    "swing", "tackle", "tap", "taunt", "tease", "tickle", "tongue", "touch", "wiggle", "wobble",
    "wrinkle",
];

const NONLIVING_OK_VERBS: &[&str] = &[
    "admire", "adore", "answer", "argh", "ask", "babble", "barf", "bark", "beam", "bite",
    "blink", "bow", "breathe", "bump", "cackle", "caper", "capitulate", "chuckle", "complain",
    "cuddle", "curse", "drool", "embrace", "eye", "fear", "feel", "finger", "fondle", "gaze",
    "giggle", "glare", "glance", "grimace", "grin", "groan", "grope", "growl", "grunt",
    "guffaw", "hate", "headshake", "hide", "hiss", "hmm", "ignore", "jerk", "judge", "kick",
    "laugh", "leer", "lick", "like", "listen", "love", "lust", "meow", "moan", "mumble",
    "murmur", "mutter", "nod", "nominate", "ogle", "peer", "point", "puke", "pull", "push",
    "purr", "puzzle", "quote", "raise", "recoil", "reply", "rotate", "scowl", "scream",
    "shake", "shove", "sing", "smile", "snap", "snarl", "sneer", "sneeze", "smell", "sniff",
    "snigger", "snort", "spill", "spin", "spit", "spray", "stare", "surrender", "swing",
    "tongue", "touch", "trust", "turn", "understand", "utter", "want", "watch", "wave",
    "wiggle", "wobble", "worship", "wrinkle", "yawn",
];

/// Verbs that move the actor through an exit; not soul verbs themselves.
const MOVEMENT_VERBS: &[&str] = &["enter", "climb", "crawl", "go", "run", "move"];

/// The immutable verb registry plus the verb classification sets the
/// engine consults (retaliation triggers, target validation, movement).
#[derive(Debug, Clone)]
pub struct VerbRegistry {
    verbs: VerbMap,
    aggressive: HashSet<String>,
    nonliving_ok: HashSet<String>,
    movement: HashSet<String>,
}

lazy_static! {
    static ref BUILTIN: VerbRegistry = {
        let verbs = builtin_verbs();
        let to_set = |words: &[&str]| words.iter().map(|w| w.to_string()).collect();
        VerbRegistry {
            verbs,
            aggressive: to_set(AGGRESSIVE_VERBS),
            nonliving_ok: to_set(NONLIVING_OK_VERBS),
            movement: to_set(MOVEMENT_VERBS),
        }
    };
}

impl VerbRegistry {
    /// The full built-in verb set.
    pub fn builtin() -> &'static VerbRegistry {
        &BUILTIN
    }

    pub fn get(&self, verb: &str) -> Option<&VerbDef> {
        self.verbs.get(verb)
    }

    pub fn contains(&self, verb: &str) -> bool {
        self.verbs.contains_key(verb)
    }

    pub fn verbs(&self) -> impl Iterator<Item = &VerbDef> {
        self.verbs.values()
    }

    pub fn is_aggressive(&self, verb: &str) -> bool {
        self.aggressive.contains(verb)
    }

    pub fn is_nonliving_ok(&self, verb: &str) -> bool {
        self.nonliving_ok.contains(verb)
    }

    pub fn is_movement(&self, verb: &str) -> bool {
        self.movement.contains(verb)
    }

    pub fn aggressive_verbs(&self) -> &HashSet<String> {
        &self.aggressive
    }

    pub fn nonliving_ok_verbs(&self) -> &HashSet<String> {
        &self.nonliving_ok
    }

    pub fn movement_verbs(&self) -> &HashSet<String> {
        &self.movement
    }

    /// Build a customized registry from the built-in one: narrow to an
    /// allow-list, remove verbs, add new verbs — in that order. Meant to
    /// be called once, before play starts.
    pub fn customized(config: &VerbConfig) -> Result<VerbRegistry, String> {
        let mut reg = BUILTIN.clone();
        if let Some(allowed) = &config.allowed {
            for verb in allowed {
                if !reg.verbs.contains_key(verb) {
                    return Err(format!("unknown verb in allow list: {}", verb));
                }
            }
            let keep: HashSet<&String> = allowed.iter().collect();
            reg.verbs.retain(|v, _| keep.contains(v));
            reg.aggressive.retain(|v| keep.contains(v));
            reg.nonliving_ok.retain(|v| keep.contains(v));
            reg.movement.retain(|v| keep.contains(v));
        }
        for verb in &config.remove {
            if reg.verbs.shift_remove(verb).is_none() {
                return Err(format!("cannot remove unknown verb: {}", verb));
            }
            reg.aggressive.remove(verb);
            reg.nonliving_ok.remove(verb);
            reg.movement.remove(verb);
        }
        for spec in &config.add {
            let def = spec.build()?;
            debug!("adding configured verb {} ({:?})", def.verb, def.shape);
            if spec.aggressive {
                reg.aggressive.insert(def.verb.clone());
            }
            if spec.nonliving_ok {
                reg.nonliving_ok.insert(def.verb.clone());
            }
            reg.verbs.insert(def.verb.clone(), def);
        }
        debug!("verb registry customized: {} verbs", reg.verbs.len());
        Ok(reg)
    }
}

/// Registry customization document, typically loaded from TOML:
///
/// ```toml
/// allowed = ["smile", "wave", "bow"]
/// remove = ["bow"]
///
/// [[add]]
/// verb = "frobnizificate"
/// shape = "simp"
/// templates = ["frobnizes HOW AT"]
/// at = "at"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VerbConfig {
    /// When present, the registry is narrowed to exactly these verbs.
    pub allowed: Option<Vec<String>>,
    #[serde(default)]
    pub remove: Vec<String>,
    #[serde(default)]
    pub add: Vec<VerbSpec>,
}

impl VerbConfig {
    pub fn from_toml(text: &str) -> Result<VerbConfig, String> {
        toml::from_str(text).map_err(|e| format!("bad verb config: {}", e))
    }
}

/// A verb definition in configuration form.
#[derive(Debug, Clone, Deserialize)]
pub struct VerbSpec {
    pub verb: String,
    /// defa | prev | phys | shrt | pers | simp | deux | quad
    pub shape: String,
    #[serde(default)]
    pub adverb: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub bodypart: Option<String>,
    /// AT preposition (defa/simp) or the infix phrase (prev).
    #[serde(default)]
    pub at: Option<String>,
    /// Literal templates; count depends on the shape.
    #[serde(default)]
    pub templates: Vec<String>,
    #[serde(default)]
    pub aggressive: bool,
    #[serde(default)]
    pub nonliving_ok: bool,
}

impl VerbSpec {
    fn template(&self, idx: usize) -> Result<&str, String> {
        self.templates
            .get(idx)
            .map(|s| s.as_str())
            .ok_or_else(|| {
                format!(
                    "verb {}: shape {} needs at least {} template(s)",
                    self.verb,
                    self.shape,
                    idx + 1
                )
            })
    }

    fn build(&self) -> Result<VerbDef, String> {
        let mut m = VerbMap::new();
        let defaults: Defaults = (
            self.adverb.as_deref(),
            self.message.as_deref(),
            self.bodypart.as_deref(),
        );
        match self.shape.to_lowercase().as_str() {
            "defa" => defa(&mut m, &self.verb, defaults.0, self.at.as_deref().unwrap_or("at")),
            "prev" => prev(&mut m, &self.verb, defaults.0, self.at.as_deref().unwrap_or("")),
            "phys" => phys(&mut m, &self.verb, defaults.0, defaults.2),
            "shrt" => shrt(&mut m, &self.verb, defaults.0),
            "simp" => simp(&mut m, &self.verb, defaults, self.template(0)?, self.at.as_deref()),
            "pers" => pers(&mut m, &self.verb, defaults, self.template(0)?, self.template(1)?),
            "deux" => deux(&mut m, &self.verb, defaults, self.template(0)?, self.template(1)?),
            "quad" => quad(
                &mut m,
                &self.verb,
                defaults,
                self.template(0)?,
                self.template(1)?,
                self.template(2)?,
                self.template(3)?,
            ),
            other => return Err(format!("verb {}: unknown shape '{}'", self.verb, other)),
        }
        let (_, def) = m.pop().ok_or_else(|| "empty verb spec".to_string())?;
        Ok(def)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_registry_sanity() {
        let reg = VerbRegistry::builtin();
        assert!(reg.contains("smile"));
        assert!(reg.contains("ayt"));
        assert!(!reg.contains("frobnizificate"));
        assert!(reg.is_aggressive("kick"));
        assert!(!reg.is_aggressive("smile"));
        assert!(reg.is_nonliving_ok("kick"));
        assert!(reg.is_movement("crawl"));
        // classification sets only name verbs that exist (movement aside)
        for v in reg.aggressive_verbs() {
            assert!(reg.contains(v), "aggressive verb {} missing from table", v);
        }
        for v in reg.nonliving_ok_verbs() {
            assert!(reg.contains(v), "nonliving-ok verb {} missing from table", v);
        }
    }

    #[test]
    fn shapes_and_defaults() {
        let reg = VerbRegistry::builtin();
        let smile = reg.get("smile").unwrap();
        assert_eq!(VerbShape::Defa, smile.shape);
        assert_eq!(Some("happily"), smile.adverb.as_deref());
        assert_eq!(Some("at"), smile.at.as_deref());
        assert!(!smile.needs_target);

        let tickle = reg.get("tickle").unwrap();
        assert_eq!(VerbShape::Prev, tickle.shape);
        assert!(tickle.needs_target);

        let kick = reg.get("kick").unwrap();
        assert_eq!(VerbShape::Phys, kick.shape);
        assert!(kick.needs_target);

        let touch = reg.get("touch").unwrap();
        assert_eq!(VerbShape::Deux, touch.shape);
        assert!(touch.needs_target);

        let watch = reg.get("watch").unwrap();
        assert_eq!(VerbShape::Quad, watch.shape);
        assert!(!watch.needs_target);

        assert!(reg.get("whisper").unwrap().expects_message());
        assert!(reg.get("chant").unwrap().expects_message());
        assert!(!reg.get("smile").unwrap().expects_message());
    }

    #[test]
    fn customize_narrow_remove_add() {
        let cfg = VerbConfig::from_toml(
            r#"
            allowed = ["hug", "ponder", "sit", "kick", "cough", "greet", "poke", "yawn"]
            remove = ["hug", "kick"]

            [[add]]
            verb = "frobnizificate"
            shape = "simp"
            templates = ["frobnizes HOW AT"]
            at = "at"
            "#,
        )
        .unwrap();
        let reg = VerbRegistry::customized(&cfg).unwrap();
        let mut remaining: Vec<&str> = reg.verbs().map(|d| d.verb.as_str()).collect();
        remaining.sort_unstable();
        assert_eq!(
            vec!["cough", "frobnizificate", "greet", "poke", "ponder", "sit", "yawn"],
            remaining
        );
        assert_eq!(1, reg.aggressive_verbs().len());
        assert!(reg.is_aggressive("poke"));
        assert_eq!(1, reg.nonliving_ok_verbs().len());
        assert!(reg.is_nonliving_ok("yawn"));
        assert!(reg.movement_verbs().is_empty());
    }

    #[test]
    fn customize_rejects_unknown_verbs() {
        let cfg = VerbConfig {
            allowed: Some(vec!["notaverb".into()]),
            ..VerbConfig::default()
        };
        assert!(VerbRegistry::customized(&cfg).is_err());
        let cfg = VerbConfig {
            remove: vec!["notaverb".into()],
            ..VerbConfig::default()
        };
        assert!(VerbRegistry::customized(&cfg).is_err());
    }
}
