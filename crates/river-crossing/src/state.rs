//! Search states, safety checks and successor generation.
//!
//! A state records which items are on the left bank and where the agent
//! is; the right bank is always derived from the instance catalog.

use std::fmt;
use std::iter;

use smallvec::SmallVec;

use crate::instance::{Bank, Instance, ItemId, ItemSet};

/// Successors of one state; at most one per item plus the empty crossing
pub type Successors = SmallVec<[(State, Move); 8]>;

/// Item placement and agent side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State {
    left: ItemSet,
    agent: Bank,
}

impl State {
    pub fn new(left: ItemSet, agent: Bank) -> Self {
        Self { left, agent }
    }

    pub fn left(self) -> ItemSet {
        self.left
    }

    pub fn right(self, instance: &Instance) -> ItemSet {
        instance.all_items().difference(self.left)
    }

    pub fn agent(self) -> Bank {
        self.agent
    }

    /// Items on the given bank
    pub fn bank(self, bank: Bank, instance: &Instance) -> ItemSet {
        match bank {
            Bank::Left => self.left,
            Bank::Right => self.right(instance),
        }
    }

    pub fn side_of(self, item: ItemId) -> Bank {
        if self.left.contains(item) {
            Bank::Left
        } else {
            Bank::Right
        }
    }

    /// The same placement with the bank names swapped.
    pub fn mirror(self, instance: &Instance) -> State {
        State::new(self.right(instance), self.agent.opposite())
    }

    /// Agent side followed by each item's side, in catalog order.
    pub fn tokens(self, instance: &Instance) -> impl Iterator<Item = Bank> + '_ {
        iter::once(self.agent).chain(instance.item_ids().map(move |item| self.side_of(item)))
    }

    /// Render as `(F,item1,item2,...)` with `L`/`R` tokens.
    pub fn display(self, instance: &Instance) -> StateDisplay<'_> {
        StateDisplay {
            state: self,
            instance,
        }
    }
}

/// [`fmt::Display`] adapter returned by [`State::display`]
pub struct StateDisplay<'a> {
    state: State,
    instance: &'a Instance,
}

impl fmt::Display for StateDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, bank) in self.state.tokens(self.instance).enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", bank)?;
        }
        write!(f, ")")
    }
}

/// One crossing of the agent, with at most one item aboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub cargo: Option<ItemId>,
    pub from: Bank,
    pub to: Bank,
}

impl Move {
    /// Human-readable form, e.g. `Farmer takes Goat L→R`
    pub fn describe(self, instance: &Instance) -> String {
        let cargo = self
            .cargo
            .map_or("nothing", |item| instance.item_name(item));
        format!("{} takes {} {}→{}", instance.agent(), cargo, self.from, self.to)
    }
}

/// Check if every item has reached the goal bank. The agent may be anywhere.
pub fn is_goal(state: &State, instance: &Instance) -> bool {
    match instance.goal() {
        Bank::Right => state.left.is_empty(),
        Bank::Left => state.left == instance.all_items(),
    }
}

/// A bank is unsafe when the agent is away and some forbidden pair is on it
fn bank_unsafe(items: ItemSet, agent_here: bool, instance: &Instance) -> bool {
    !agent_here
        && instance
            .forbidden_pairs()
            .iter()
            .any(|pair| items.contains_all(pair.as_set()))
}

/// Check both banks independently for an unsupervised forbidden pair.
pub fn is_safe(state: &State, instance: &Instance) -> bool {
    let left_unsafe = bank_unsafe(state.left, state.agent == Bank::Left, instance);
    let right_unsafe = bank_unsafe(state.right(instance), state.agent == Bank::Right, instance);
    !left_unsafe && !right_unsafe
}

/// Enumerate the safe crossings from `state`.
///
/// The agent always changes bank, carrying nothing or one item from its
/// current bank. Candidates are tried empty-handed first, then in catalog
/// order; unsafe results are dropped. Both solvers rely on this order to
/// break ties between equally short solutions.
pub fn successors(state: &State, instance: &Instance) -> Successors {
    let from = state.agent;
    let to = from.opposite();
    let here = state.bank(from, instance);

    iter::once(None)
        .chain(here.iter().map(Some))
        .filter_map(|cargo| {
            let left = match (cargo, from) {
                (None, _) => state.left,
                (Some(item), Bank::Left) => state.left.without(item),
                (Some(item), Bank::Right) => state.left.with(item),
            };
            let next = State::new(left, to);
            is_safe(&next, instance).then_some((next, Move { cargo, from, to }))
        })
        .collect()
}
