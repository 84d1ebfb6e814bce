//! The soul facade: one object tying the parser and the composer
//! together, with the pronoun memory the parser needs.
//!
//! A `Soul` is cheap to clone; clones share the verb registry. Each
//! player gets their own `Soul` so pronoun memory stays per-player.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;

use crate::compose;
use crate::entity::{TargetRef, Visibility};
use crate::errors::{ParseError, SoulError};
use crate::parse_result::{ParseOutcome, ParseResult, SoulOutcome, VerbAction};
use crate::parser;
use crate::verbs::VerbRegistry;

#[derive(Clone)]
pub struct Soul {
    registry: Arc<VerbRegistry>,
    previously_parsed: Option<ParseResult>,
}

impl Soul {
    /// A soul with the built-in verb registry.
    pub fn new() -> Soul {
        Soul::with_registry(VerbRegistry::builtin().clone())
    }

    /// A soul with a customized registry (see [`VerbRegistry::customized`]).
    pub fn with_registry(registry: VerbRegistry) -> Soul {
        Soul {
            registry: Arc::new(registry),
            previously_parsed: None,
        }
    }

    pub fn registry(&self) -> &VerbRegistry {
        &self.registry
    }

    pub fn is_verb(&self, verb: &str) -> bool {
        self.registry.contains(verb)
    }

    /// Record a parse for pronoun resolution in the next command. Called
    /// automatically by [`Soul::process_verb`]; engines that drive the
    /// parser directly call this themselves after acting on a result.
    pub fn remember_previous_parse(&mut self, parsed: ParseResult) {
        self.previously_parsed = Some(parsed);
    }

    pub fn previously_parsed(&self) -> Option<&ParseResult> {
        self.previously_parsed.as_ref()
    }

    /// Parse a command line against the current visibility snapshot.
    pub fn parse(
        &self,
        vis: &Visibility,
        cmd: &str,
        external_verbs: &HashSet<String>,
    ) -> Result<ParseOutcome, ParseError> {
        parser::parse(
            &self.registry,
            vis,
            cmd,
            external_verbs,
            self.previously_parsed.as_ref(),
        )
    }

    /// Compose the narrations for an already parsed soul verb.
    pub fn compose(
        &self,
        actor: &TargetRef,
        parsed: &ParseResult,
    ) -> Result<VerbAction, SoulError> {
        compose::process_verb_parsed(&self.registry, actor, parsed)
    }

    /// Parse and compose in one step. External verbs and exit names are
    /// handed back unprocessed; everything else becomes a [`VerbAction`]
    /// whose verb carries the qualifier ("fail kick").
    pub fn process_verb(
        &mut self,
        vis: &Visibility,
        cmd: &str,
        external_verbs: &HashSet<String>,
    ) -> Result<SoulOutcome, SoulError> {
        match self.parse(vis, cmd, external_verbs)? {
            ParseOutcome::Parsed(parsed) => {
                if external_verbs.contains(&parsed.verb) {
                    debug!("external verb hand-off: {}", parsed.verb);
                    return Ok(SoulOutcome::HandOff(parsed));
                }
                let action = self.compose(vis.actor(), &parsed)?;
                self.remember_previous_parse(parsed.clone());
                Ok(SoulOutcome::Action(action, parsed))
            }
            ParseOutcome::HandOff(parsed) => Ok(SoulOutcome::HandOff(parsed)),
            ParseOutcome::Unknown {
                verb,
                words,
                qualifier,
            } => Ok(SoulOutcome::Unknown {
                verb,
                words,
                qualifier,
            }),
        }
    }
}

impl Default for Soul {
    fn default() -> Soul {
        Soul::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestBeing;

    fn no_external() -> HashSet<String> {
        HashSet::new()
    }

    #[test]
    fn process_verb_records_pronoun_memory() {
        let julie = TestBeing::female("julie");
        let max = TestBeing::male("max");
        let mut vis = Visibility::new(&julie);
        vis.add_living(&max);
        let mut soul = Soul::new();

        match soul.process_verb(&vis, "tickle max", &no_external()).unwrap() {
            SoulOutcome::Action(action, _) => {
                assert_eq!("You tickle max.", action.actor_msg);
            }
            other => panic!("expected an action, got {:?}", other),
        }
        match soul.process_verb(&vis, "kick him", &no_external()).unwrap() {
            SoulOutcome::Action(action, parsed) => {
                assert_eq!("You kick max hard.", action.actor_msg);
                assert_eq!("max", parsed.who_1().unwrap().name);
            }
            other => panic!("expected an action, got {:?}", other),
        }
    }

    #[test]
    fn qualifier_prefixes_the_reported_verb() {
        let julie = TestBeing::female("julie");
        let max = TestBeing::male("max");
        let mut vis = Visibility::new(&julie);
        vis.add_living(&max);
        let mut soul = Soul::new();

        match soul.process_verb(&vis, "fail kick max", &no_external()).unwrap() {
            SoulOutcome::Action(action, _) => assert_eq!("fail kick", action.verb),
            other => panic!("expected an action, got {:?}", other),
        }
    }

    #[test]
    fn external_verbs_are_handed_off() {
        let julie = TestBeing::female("julie");
        let vis = Visibility::new(&julie);
        let mut soul = Soul::new();
        let external: HashSet<String> = ["smile".to_string()].into_iter().collect();

        match soul.process_verb(&vis, "smile", &external).unwrap() {
            SoulOutcome::HandOff(parsed) => assert_eq!("smile", parsed.verb),
            other => panic!("expected a hand-off, got {:?}", other),
        }
        // the hand-off is not remembered for pronouns
        assert!(soul.previously_parsed().is_none());
    }

    #[test]
    fn unknown_verbs_bubble_up() {
        let julie = TestBeing::female("julie");
        let vis = Visibility::new(&julie);
        let mut soul = Soul::new();
        match soul.process_verb(&vis, "frobnicate wildly", &no_external()).unwrap() {
            SoulOutcome::Unknown { verb, .. } => assert_eq!("frobnicate", verb),
            other => panic!("expected unknown, got {:?}", other),
        }
    }
}
