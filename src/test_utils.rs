//! Small `Targetable` implementations for tests. The real world model
//! lives in the engine; these stand in for livings, items and exits.

use crate::entity::{Gender, Targetable};

/// A living being with a name, title and gender.
#[derive(Debug, Clone)]
pub struct TestBeing {
    pub name: String,
    pub title: String,
    pub gender: Gender,
    pub aliases: Vec<String>,
    pub default_verb: Option<String>,
}

impl TestBeing {
    pub fn new(name: &str, gender: Gender) -> TestBeing {
        TestBeing {
            name: name.to_string(),
            title: name.to_string(),
            gender,
            aliases: Vec::new(),
            default_verb: None,
        }
    }

    pub fn female(name: &str) -> TestBeing {
        TestBeing::new(name, Gender::Female)
    }

    pub fn male(name: &str) -> TestBeing {
        TestBeing::new(name, Gender::Male)
    }

    pub fn neuter(name: &str) -> TestBeing {
        TestBeing::new(name, Gender::Neuter)
    }

    /// Replace the display title ("the great Julie, destroyer of worlds").
    pub fn titled(mut self, title: &str) -> TestBeing {
        self.title = title.to_string();
        self
    }
}

impl Targetable for TestBeing {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn gender(&self) -> Gender {
        self.gender
    }

    fn default_verb(&self) -> Option<&str> {
        self.default_verb.as_deref()
    }
}

/// An inanimate item.
#[derive(Debug, Clone)]
pub struct TestItem {
    pub name: String,
    pub title: String,
    pub aliases: Vec<String>,
    pub default_verb: Option<String>,
}

impl TestItem {
    pub fn new(name: &str) -> TestItem {
        TestItem {
            name: name.to_string(),
            title: name.to_string(),
            aliases: Vec::new(),
            default_verb: None,
        }
    }
}

impl Targetable for TestItem {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn gender(&self) -> Gender {
        Gender::Neuter
    }

    fn default_verb(&self) -> Option<&str> {
        self.default_verb.as_deref()
    }
}

/// A room exit, addressed by its direction name.
#[derive(Debug, Clone)]
pub struct TestExit {
    pub name: String,
    pub aliases: Vec<String>,
}

impl TestExit {
    pub fn new(name: &str) -> TestExit {
        TestExit {
            name: name.to_string(),
            aliases: Vec::new(),
        }
    }
}

impl Targetable for TestExit {
    fn name(&self) -> &str {
        &self.name
    }

    fn aliases(&self) -> &[String] {
        &self.aliases
    }

    fn title(&self) -> &str {
        &self.name
    }

    fn gender(&self) -> Gender {
        Gender::Neuter
    }
}
