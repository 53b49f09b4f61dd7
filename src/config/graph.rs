//! Profile inheritance graph utilities.

use std::collections::HashMap;

use super::profiles::Profile;

/// Detect cycles in the `extends` graph using Kahn's algorithm.
///
/// Returns the names of every profile that could not be ordered (members of
/// a cycle and the profiles that inherit from one), sorted by name. An
/// empty result means the graph is acyclic. Parent names that do not refer
/// to a profile in `profiles` are ignored.
pub fn cyclic_profiles(profiles: &[&Profile]) -> Vec<String> {
    let name_to_idx: HashMap<&str, usize> = profiles
        .iter()
        .enumerate()
        .map(|(i, p)| (p.name.as_str(), i))
        .collect();

    // Edge child -> parent; a profile is ready once all its parents are.
    let mut in_degree: Vec<usize> = profiles
        .iter()
        .map(|p| {
            p.extends
                .iter()
                .filter(|parent| name_to_idx.contains_key(parent.as_str()))
                .count()
        })
        .collect();

    let mut children: Vec<Vec<usize>> = vec![Vec::new(); profiles.len()];
    for (i, p) in profiles.iter().enumerate() {
        for parent in &p.extends {
            if let Some(&parent_idx) = name_to_idx.get(parent.as_str())
                && let Some(c) = children.get_mut(parent_idx)
            {
                c.push(i);
            }
        }
    }

    let mut queue: Vec<usize> = in_degree
        .iter()
        .enumerate()
        .filter_map(|(i, &d)| (d == 0).then_some(i))
        .collect();
    let mut processed = vec![false; profiles.len()];

    while let Some(idx) = queue.pop() {
        if let Some(done) = processed.get_mut(idx) {
            *done = true;
        }
        if let Some(dependents) = children.get(idx) {
            for &child in dependents {
                if let Some(count) = in_degree.get_mut(child) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push(child);
                    }
                }
            }
        }
    }

    let mut stuck: Vec<String> = profiles
        .iter()
        .zip(&processed)
        .filter(|(_, done)| !**done)
        .map(|(p, _)| p.name.clone())
        .collect();
    stuck.sort();
    stuck
}
