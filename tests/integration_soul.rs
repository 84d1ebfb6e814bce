// End-to-end tests: command line in, three narration strings out.

use std::collections::HashSet;

use test_log::test;

use mudsoul::test_utils::{TestBeing, TestExit, TestItem};
use mudsoul::{ParseOutcome, Soul, SoulOutcome, VerbConfig, VerbRegistry, Visibility};

fn no_external() -> HashSet<String> {
    HashSet::new()
}

fn action(soul: &mut Soul, vis: &Visibility, cmd: &str) -> mudsoul::VerbAction {
    match soul.process_verb(vis, cmd, &no_external()).unwrap() {
        SoulOutcome::Action(action, _) => action,
        other => panic!("expected an action for {:?}, got {:?}", cmd, other),
    }
}

#[test]
fn titled_actor_narration() {
    let julie = TestBeing::female("julie").titled("the great Julie, destroyer of worlds");
    let max = TestBeing::male("max");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&max);
    let mut soul = Soul::new();

    let a = action(&mut soul, &vis, "grin at max");
    assert_eq!("You grin evilly at max.", a.actor_msg);
    assert_eq!(
        "The great Julie, destroyer of worlds grins evilly at max.",
        a.room_msg
    );
    assert_eq!(
        "The great Julie, destroyer of worlds grins evilly at you.",
        a.target_msg
    );
}

#[test]
fn qualifier_spanning_multiple_targets() {
    let julie = TestBeing::female("julie");
    let max = TestBeing::male("max");
    let kate = TestBeing::female("kate");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&max);
    vis.add_living(&kate);
    let mut soul = Soul::new();

    let a = action(&mut soul, &vis, "fail greet all");
    assert_eq!("fail greet", a.verb);
    assert_eq!("You try to greet max and kate, but fail miserably.", a.actor_msg);
    assert_eq!(
        "Julie tries to greet max and kate, but fails miserably.",
        a.room_msg
    );
    assert_eq!("Julie tries to greet you, but fails miserably.", a.target_msg);
    assert_eq!(2, a.targets.len());
}

#[test]
fn multi_word_names_resolve() {
    let julie = TestBeing::female("julie");
    let cat = TestBeing::neuter("hairy cat").titled("the hairy cat");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&cat);
    let mut soul = Soul::new();

    let a = action(&mut soul, &vis, "pat hairy cat head");
    assert_eq!("You pat the hairy cat on the head.", a.actor_msg);
    assert_eq!("Julie pats the hairy cat on the head.", a.room_msg);
}

#[test]
fn pronoun_memory_survives_snapshot_rebuild() {
    let julie = TestBeing::female("julie");
    let max = TestBeing::male("max");
    let mut soul = Soul::new();

    {
        let mut vis = Visibility::new(&julie);
        vis.add_living(&max);
        action(&mut soul, &vis, "wave at max");
    }

    // a fresh snapshot with max still present
    {
        let mut vis = Visibility::new(&julie);
        vis.add_living(&max);
        let a = action(&mut soul, &vis, "poke him");
        assert_eq!("You poke max in the ribs.", a.actor_msg);
    }

    // and one where max has left the room
    {
        let vis = Visibility::new(&julie);
        let err = soul.process_verb(&vis, "poke him", &no_external()).unwrap_err();
        assert_eq!("He is no longer around.", err.to_string());
    }
}

#[test]
fn items_can_be_targets() {
    let julie = TestBeing::female("julie");
    let newspaper = TestItem::new("newspaper");
    let mut vis = Visibility::new(&julie);
    vis.add_item(&newspaper);
    let mut soul = Soul::new();

    let a = action(&mut soul, &vis, "point at newspaper");
    assert_eq!("You point at newspaper.", a.actor_msg);
    assert_eq!("Julie points at newspaper.", a.room_msg);
    assert_eq!(1, a.targets.len());
}

#[test]
fn exit_hand_off_keeps_qualifier() {
    let julie = TestBeing::female("julie");
    let north = TestExit::new("north");
    let mut vis = Visibility::new(&julie);
    vis.add_exit(&north);
    let mut soul = Soul::new();

    match soul.process_verb(&vis, "suddenly north", &no_external()).unwrap() {
        SoulOutcome::HandOff(parsed) => {
            assert_eq!("north", parsed.verb);
            assert_eq!(Some("suddenly"), parsed.qualifier.as_deref());
        }
        other => panic!("expected a hand-off, got {:?}", other),
    }
}

#[test]
fn message_verb_round_trip() {
    let julie = TestBeing::female("julie");
    let kate = TestBeing::female("kate");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&kate);
    let mut soul = Soul::new();

    let a = action(&mut soul, &vis, "ask kate 'have you seen my socks'");
    assert_eq!("You ask kate: have you seen my socks?", a.actor_msg);
    assert_eq!("Julie asks kate: have you seen my socks?", a.room_msg);
    assert_eq!("Julie asks you: have you seen my socks?", a.target_msg);

    let parsed = match soul.parse(&vis, "whisper kate something softly", &no_external()).unwrap() {
        ParseOutcome::Parsed(pr) => pr,
        other => panic!("expected a parse, got {:?}", other),
    };
    assert_eq!("something softly", parsed.message);
}

#[test]
fn customized_registry_end_to_end() {
    let cfg = VerbConfig::from_toml(
        r#"
        allowed = ["smile", "wave", "kick"]
        remove = ["wave"]

        [[add]]
        verb = "tango"
        shape = "defa"
        adverb = "passionately"
        at = "with"
        aggressive = true
        "#,
    )
    .unwrap();
    let registry = VerbRegistry::customized(&cfg).unwrap();
    assert!(registry.is_aggressive("tango"));
    assert!(registry.movement_verbs().is_empty());

    let julie = TestBeing::female("julie");
    let max = TestBeing::male("max");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&max);
    let mut soul = Soul::with_registry(registry);

    let a = action(&mut soul, &vis, "tango with max");
    assert_eq!("You tango passionately with max.", a.actor_msg);
    assert_eq!("Julie tangos passionately with max.", a.room_msg);

    match soul.process_verb(&vis, "wave", &no_external()).unwrap() {
        SoulOutcome::Unknown { verb, .. } => assert_eq!("wave", verb),
        other => panic!("expected unknown verb, got {:?}", other),
    }
}

#[test]
fn external_verb_keeps_unrecognized_args() {
    let julie = TestBeing::female("julie");
    let max = TestBeing::male("max");
    let mut vis = Visibility::new(&julie);
    vis.add_living(&max);
    let mut soul = Soul::new();
    let external: HashSet<String> = ["throw".to_string()].into_iter().collect();

    match soul.process_verb(&vis, "throw pillow at max", &external).unwrap() {
        SoulOutcome::HandOff(parsed) => {
            assert_eq!("throw", parsed.verb);
            assert_eq!(vec!["pillow"], parsed.unrecognized);
            assert_eq!("max", parsed.who_1().unwrap().name);
        }
        other => panic!("expected a hand-off, got {:?}", other),
    }
}
