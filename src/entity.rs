//! Target-capable entities and the per-command visibility snapshot.
//!
//! The world model itself lives outside this crate. The parser only sees
//! a read-only [`Visibility`] snapshot of what the actor can currently
//! reach by name: the livings in the room, the items in the room and in
//! the actor's inventory, and the room exits.

use indexmap::IndexMap;

/// Grammatical gender, used to derive the pronoun triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
    Neuter,
}

impl Gender {
    /// he / she / it
    pub fn subjective(self) -> &'static str {
        match self {
            Gender::Male => "he",
            Gender::Female => "she",
            Gender::Neuter => "it",
        }
    }

    /// his / her / its
    pub fn possessive(self) -> &'static str {
        match self {
            Gender::Male => "his",
            Gender::Female => "her",
            Gender::Neuter => "its",
        }
    }

    /// him / her / it
    pub fn objective(self) -> &'static str {
        match self {
            Gender::Male => "him",
            Gender::Female => "her",
            Gender::Neuter => "it",
        }
    }
}

/// Anything the parser can resolve as the target of a command: a living,
/// an item, or a room exit. World entities implement this; the soul never
/// needs to know anything else about them.
pub trait Targetable {
    /// Canonical (lowercase) name the entity is addressed by.
    /// For exits this is the primary direction ("east", "door one").
    fn name(&self) -> &str;

    /// Extra names the entity also answers to.
    fn aliases(&self) -> &[String] {
        &[]
    }

    /// Display title used in narration ("the hairy cat", "Kate").
    fn title(&self) -> &str;

    fn gender(&self) -> Gender;

    /// Verb to fall back to when the player only types this entity's name.
    fn default_verb(&self) -> Option<&str> {
        None
    }
}

/// What kind of thing a resolved target is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Living,
    Item,
    Exit,
}

/// An owned snapshot of a resolved target. Parse results keep these
/// instead of borrowing world entities, so a previous parse can outlive
/// the visibility snapshot it was made from (pronoun memory re-checks
/// reachability by name on the next command).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub name: String,
    pub title: String,
    pub gender: Gender,
    pub default_verb: Option<String>,
}

impl TargetRef {
    pub fn from_entity(kind: TargetKind, entity: &dyn Targetable) -> TargetRef {
        TargetRef {
            kind,
            name: entity.name().to_lowercase(),
            title: entity.title().to_string(),
            gender: entity.gender(),
            default_verb: entity.default_verb().map(|v| v.to_string()),
        }
    }

    /// Identity within one snapshot: kind plus canonical name.
    pub fn is_same(&self, other: &TargetRef) -> bool {
        self.kind == other.kind && self.name == other.name
    }
}

/// Everything the actor can currently refer to by name, queryable by
/// name and alias. Built fresh by the engine for every command; the
/// parser treats it as read-only.
pub struct Visibility {
    actor: TargetRef,
    livings: Vec<TargetRef>,
    items: Vec<TargetRef>,
    exits: Vec<TargetRef>,
    living_names: IndexMap<String, usize>,
    item_names: IndexMap<String, usize>,
    exit_names: IndexMap<String, usize>,
}

impl Visibility {
    /// Start a snapshot for the given actor. The actor is also registered
    /// as a living in the room, so it can target itself by name.
    pub fn new(actor: &dyn Targetable) -> Visibility {
        let actor_ref = TargetRef::from_entity(TargetKind::Living, actor);
        let mut vis = Visibility {
            actor: actor_ref,
            livings: Vec::new(),
            items: Vec::new(),
            exits: Vec::new(),
            living_names: IndexMap::new(),
            item_names: IndexMap::new(),
            exit_names: IndexMap::new(),
        };
        vis.add_living(actor);
        vis
    }

    pub fn actor(&self) -> &TargetRef {
        &self.actor
    }

    pub fn add_living(&mut self, entity: &dyn Targetable) {
        let target = TargetRef::from_entity(TargetKind::Living, entity);
        let idx = self.livings.len();
        self.register(entity, &target.name, idx, TargetKind::Living);
        self.livings.push(target);
    }

    /// Room items and inventory items share one namespace, like the room
    /// they are seen from.
    pub fn add_item(&mut self, entity: &dyn Targetable) {
        let target = TargetRef::from_entity(TargetKind::Item, entity);
        let idx = self.items.len();
        self.register(entity, &target.name, idx, TargetKind::Item);
        self.items.push(target);
    }

    pub fn add_exit(&mut self, entity: &dyn Targetable) {
        let target = TargetRef::from_entity(TargetKind::Exit, entity);
        let idx = self.exits.len();
        self.register(entity, &target.name, idx, TargetKind::Exit);
        self.exits.push(target);
    }

    fn register(&mut self, entity: &dyn Targetable, name: &str, idx: usize, kind: TargetKind) {
        let map = match kind {
            TargetKind::Living => &mut self.living_names,
            TargetKind::Item => &mut self.item_names,
            TargetKind::Exit => &mut self.exit_names,
        };
        map.insert(name.to_string(), idx);
        for alias in entity.aliases() {
            map.insert(alias.to_lowercase(), idx);
        }
    }

    pub fn living(&self, name: &str) -> Option<&TargetRef> {
        self.living_names.get(name).map(|&i| &self.livings[i])
    }

    pub fn item(&self, name: &str) -> Option<&TargetRef> {
        self.item_names.get(name).map(|&i| &self.items[i])
    }

    pub fn exit(&self, name: &str) -> Option<&TargetRef> {
        self.exit_names.get(name).map(|&i| &self.exits[i])
    }

    pub fn has_exits(&self) -> bool {
        !self.exits.is_empty()
    }

    /// All livings in room order, the actor included.
    pub fn livings(&self) -> &[TargetRef] {
        &self.livings
    }

    /// Livings other than the actor, in room order ("everyone").
    pub fn others(&self) -> impl Iterator<Item = &TargetRef> {
        let actor = &self.actor;
        self.livings.iter().filter(move |l| !l.is_same(actor))
    }

    /// Registered living names and aliases, in registration order.
    pub fn living_names(&self) -> impl Iterator<Item = &str> {
        self.living_names.keys().map(|s| s.as_str())
    }

    pub fn item_names(&self) -> impl Iterator<Item = &str> {
        self.item_names.keys().map(|s| s.as_str())
    }

    /// Can the actor still reach this previously-resolved target?
    pub fn reachable(&self, target: &TargetRef) -> bool {
        match target.kind {
            TargetKind::Living => self.living(&target.name).is_some(),
            TargetKind::Item => self.item(&target.name).is_some(),
            TargetKind::Exit => self.exit(&target.name).is_some(),
        }
    }
}
