//! Shared fixtures for unit tests.

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::instance::{Bank, Instance, InstanceConfig, ItemSet};
use crate::state::State;

/// `n` items with every pair forbidden, everything starting left
pub fn all_forbidden(n: usize) -> Instance {
    let items: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();
    let mut forbidden_pairs = Vec::new();
    for a in 0..n {
        for b in a + 1..n {
            forbidden_pairs.push((items[a].clone(), items[b].clone()));
        }
    }
    InstanceConfig {
        name: format!("all forbidden ({n})"),
        agent: "Farmer".to_string(),
        items,
        forbidden_pairs,
        start_agent: Bank::Left,
        start_items: BTreeMap::new(),
        goal: Bank::Right,
    }
    .build()
    .unwrap()
}

/// Every placement of the catalog, valid or not
pub fn all_states(instance: &Instance) -> impl Iterator<Item = State> {
    let full = instance.all_items().bits();
    (0..=full).flat_map(|bits| {
        [Bank::Left, Bank::Right]
            .into_iter()
            .map(move |agent| State::new(ItemSet::from_bits(bits), agent))
    })
}

fn bank(right: bool) -> Bank {
    if right {
        Bank::Right
    } else {
        Bank::Left
    }
}

/// Random instances with up to `max_items` items, random forbidden pairs,
/// random start placement and a random goal bank
pub fn arb_instance(max_items: usize) -> impl Strategy<Value = Instance> {
    (1..=max_items)
        .prop_flat_map(|n| {
            let pair_count = n * (n - 1) / 2;
            (
                Just(n),
                prop::collection::vec(any::<bool>(), pair_count),
                prop::collection::vec(any::<bool>(), n),
                any::<bool>(),
                any::<bool>(),
            )
        })
        .prop_map(|(n, pair_mask, starts_right, agent_right, goal_left)| {
            let items: Vec<String> = (0..n).map(|i| format!("item{i}")).collect();

            let mut forbidden_pairs = Vec::new();
            let mut k = 0;
            for a in 0..n {
                for b in a + 1..n {
                    if pair_mask[k] {
                        forbidden_pairs.push((items[a].clone(), items[b].clone()));
                    }
                    k += 1;
                }
            }

            let start_items = items
                .iter()
                .zip(&starts_right)
                .map(|(name, &right)| (name.clone(), bank(right)))
                .collect();

            InstanceConfig {
                name: "random".to_string(),
                agent: "Farmer".to_string(),
                items,
                forbidden_pairs,
                start_agent: bank(agent_right),
                start_items,
                goal: bank(!goal_left),
            }
            .build()
            .unwrap()
        })
}
