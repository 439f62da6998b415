//! Puzzle instance representation.
//!
//! [`InstanceConfig`] is the JSON form an instance file deserializes into.
//! [`Instance`] is the validated, immutable value the solvers borrow; it can
//! only be obtained through validation or from the built-in catalog.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::state::State;

/// Items are tracked in a 64-bit set, one bit per catalog entry
pub const MAX_ITEMS: usize = 64;

/// Built-in instances by CLI key
pub const BUILTIN_INSTANCES: &[(&str, fn() -> Instance)] = &[
    ("classic", Instance::classic),
    ("goat-right", Instance::goat_starts_right),
];

/// River bank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Bank {
    Left,
    Right,
}

impl Bank {
    pub fn opposite(self) -> Bank {
        match self {
            Bank::Left => Bank::Right,
            Bank::Right => Bank::Left,
        }
    }

    /// Single-letter tag used in state encodings
    pub fn letter(self) -> char {
        match self {
            Bank::Left => 'L',
            Bank::Right => 'R',
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Position of an item in its instance's catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u8);

impl ItemId {
    fn new(index: usize) -> Self {
        debug_assert!(index < MAX_ITEMS);
        Self(index as u8)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A set of items, stored as a bitmask over catalog positions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ItemSet(u64);

impl ItemSet {
    pub const EMPTY: ItemSet = ItemSet(0);

    /// The set holding the first `len` catalog items
    pub fn full(len: usize) -> Self {
        if len >= MAX_ITEMS {
            ItemSet(u64::MAX)
        } else {
            ItemSet((1u64 << len) - 1)
        }
    }

    #[cfg(test)]
    pub(crate) fn from_bits(bits: u64) -> Self {
        ItemSet(bits)
    }

    #[cfg(test)]
    pub(crate) fn bits(self) -> u64 {
        self.0
    }

    pub fn contains(self, item: ItemId) -> bool {
        self.0 & (1u64 << item.0) != 0
    }

    pub fn with(self, item: ItemId) -> Self {
        ItemSet(self.0 | (1u64 << item.0))
    }

    pub fn without(self, item: ItemId) -> Self {
        ItemSet(self.0 & !(1u64 << item.0))
    }

    /// Check if every member of `other` is also in this set
    pub fn contains_all(self, other: ItemSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub fn difference(self, other: ItemSet) -> Self {
        ItemSet(self.0 & !other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Members in catalog order
    pub fn iter(self) -> impl Iterator<Item = ItemId> {
        (0..MAX_ITEMS)
            .filter(move |&i| self.0 & (1u64 << i) != 0)
            .map(ItemId::new)
    }
}

impl FromIterator<ItemId> for ItemSet {
    fn from_iter<I: IntoIterator<Item = ItemId>>(iter: I) -> Self {
        iter.into_iter().fold(ItemSet::EMPTY, ItemSet::with)
    }
}

/// Two distinct items that must not share a bank without the agent.
///
/// Unordered: the constructor stores the lower catalog position first, so
/// `{a, b}` and `{b, a}` compare equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ForbiddenPair {
    first: ItemId,
    second: ItemId,
}

impl ForbiddenPair {
    pub fn new(a: ItemId, b: ItemId) -> Self {
        Self {
            first: a.min(b),
            second: a.max(b),
        }
    }

    pub fn members(self) -> (ItemId, ItemId) {
        (self.first, self.second)
    }

    pub fn as_set(self) -> ItemSet {
        ItemSet::EMPTY.with(self.first).with(self.second)
    }
}

fn default_agent() -> String {
    "Farmer".to_string()
}

fn default_start_agent() -> Bank {
    Bank::Left
}

fn default_goal() -> Bank {
    Bank::Right
}

/// Instance description as written in JSON files
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InstanceConfig {
    pub name: String,
    /// Display name of the mobile agent
    #[serde(default = "default_agent")]
    pub agent: String,
    pub items: Vec<String>,
    #[serde(default)]
    pub forbidden_pairs: Vec<(String, String)>,
    #[serde(default = "default_start_agent")]
    pub start_agent: Bank,
    /// Starting bank per item; unlisted items start on the left
    #[serde(default)]
    pub start_items: BTreeMap<String, Bank>,
    #[serde(default = "default_goal")]
    pub goal: Bank,
}

impl InstanceConfig {
    /// Validate the description and produce an [`Instance`].
    pub fn build(self) -> Result<Instance, ConfigError> {
        if self.items.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if self.items.len() > MAX_ITEMS {
            return Err(ConfigError::TooManyItems {
                count: self.items.len(),
                max: MAX_ITEMS,
            });
        }

        let mut index: HashMap<&str, ItemId> = HashMap::with_capacity(self.items.len());
        for (i, name) in self.items.iter().enumerate() {
            if name.is_empty() {
                return Err(ConfigError::EmptyItemName);
            }
            if index.insert(name.as_str(), ItemId::new(i)).is_some() {
                return Err(ConfigError::DuplicateItem(name.clone()));
            }
        }
        let lookup = |name: &str, unknown: fn(String) -> ConfigError| {
            index.get(name).copied().ok_or_else(|| unknown(name.to_string()))
        };

        let mut forbidden_pairs = Vec::with_capacity(self.forbidden_pairs.len());
        for (a, b) in &self.forbidden_pairs {
            let a_id = lookup(a.as_str(), ConfigError::UnknownPairItem)?;
            let b_id = lookup(b.as_str(), ConfigError::UnknownPairItem)?;
            if a_id == b_id {
                return Err(ConfigError::SelfPair(a.clone()));
            }
            forbidden_pairs.push(ForbiddenPair::new(a_id, b_id));
        }
        forbidden_pairs.sort();
        forbidden_pairs.dedup();

        let mut start_left = ItemSet::full(self.items.len());
        for (name, bank) in &self.start_items {
            let id = lookup(name.as_str(), ConfigError::UnknownStartItem)?;
            if *bank == Bank::Right {
                start_left = start_left.without(id);
            }
        }

        Ok(Instance {
            name: self.name,
            agent: self.agent,
            items: self.items,
            forbidden_pairs,
            start_agent: self.start_agent,
            start_left,
            goal: self.goal,
        })
    }
}

impl TryFrom<InstanceConfig> for Instance {
    type Error = ConfigError;

    fn try_from(config: InstanceConfig) -> Result<Self, Self::Error> {
        config.build()
    }
}

/// A validated puzzle instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instance {
    name: String,
    agent: String,
    items: Vec<String>,
    forbidden_pairs: Vec<ForbiddenPair>,
    start_agent: Bank,
    start_left: ItemSet,
    goal: Bank,
}

impl Instance {
    /// Wolf, goat and cabbage all start on the left with the farmer.
    pub fn classic() -> Self {
        Self::wolf_goat_cabbage("WGC A (classic)", Bank::Left)
    }

    /// Classic catalog, but the goat starts on the right bank.
    pub fn goat_starts_right() -> Self {
        Self::wolf_goat_cabbage("WGC B (goat starts right)", Bank::Right)
    }

    fn wolf_goat_cabbage(name: &str, goat_start: Bank) -> Self {
        let (wolf, goat, cabbage) = (ItemId::new(0), ItemId::new(1), ItemId::new(2));
        let mut start_left = ItemSet::full(3);
        if goat_start == Bank::Right {
            start_left = start_left.without(goat);
        }
        Self {
            name: name.to_string(),
            agent: default_agent(),
            items: vec!["Wolf".to_string(), "Goat".to_string(), "Cabbage".to_string()],
            forbidden_pairs: vec![ForbiddenPair::new(wolf, goat), ForbiddenPair::new(goat, cabbage)],
            start_agent: Bank::Left,
            start_left,
            goal: Bank::Right,
        }
    }

    /// Look up a built-in instance by its CLI key
    pub fn builtin(key: &str) -> Result<Self, ConfigError> {
        BUILTIN_INSTANCES
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, build)| build())
            .ok_or_else(|| ConfigError::UnknownInstance(key.to_string()))
    }

    /// Parse and validate an instance from JSON text.
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: InstanceConfig = serde_json::from_str(s)?;
        config.build()
    }

    /// Load and validate an instance from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn agent(&self) -> &str {
        &self.agent
    }

    /// Item names in catalog order
    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    pub fn item_name(&self, item: ItemId) -> &str {
        &self.items[item.index()]
    }

    /// Item ids in catalog order
    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> {
        self.all_items().iter()
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.items.iter().position(|n| n == name).map(ItemId::new)
    }

    pub fn all_items(&self) -> ItemSet {
        ItemSet::full(self.items.len())
    }

    pub fn forbidden_pairs(&self) -> &[ForbiddenPair] {
        &self.forbidden_pairs
    }

    pub fn start_agent(&self) -> Bank {
        self.start_agent
    }

    pub fn start_bank(&self, item: ItemId) -> Bank {
        if self.start_left.contains(item) {
            Bank::Left
        } else {
            Bank::Right
        }
    }

    /// Bank every item must reach
    pub fn goal(&self) -> Bank {
        self.goal
    }

    pub fn start_state(&self) -> State {
        State::new(self.start_left, self.start_agent)
    }
}
