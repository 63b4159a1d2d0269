use super::CompoundCostEstimator;
use phf::{Set, phf_set};
use std::collections::HashSet;

static BOND_SYMBOLS: Set<char> = phf_set! { '-', '=', '#', '$', ':', '/', '\\', '.' };

static ORGANIC_SUBSET: Set<char> = phf_set! {
    'B', 'C', 'N', 'O', 'P', 'S', 'F', 'I',
    'b', 'c', 'n', 'o', 'p', 's',
};

/// Counts explicit atoms in SMILES notation.
///
/// Bracket atoms count as one atom each regardless of their hydrogen count or charge;
/// implicit hydrogens are not counted. The notation is rejected when brackets or branches
/// are unbalanced, a ring bond is left open, or an unknown symbol appears.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplicitAtomCounter;

impl CompoundCostEstimator for ExplicitAtomCounter {
    fn atom_count(&self, notation: &str) -> Option<u64> {
        count_explicit_atoms(notation)
    }
}

fn count_explicit_atoms(notation: &str) -> Option<u64> {
    let chars: Vec<char> = notation.trim().chars().collect();
    let mut atoms: u64 = 0;
    let mut depth: usize = 0;
    let mut open_rings: HashSet<u32> = HashSet::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        match c {
            '[' => {
                let close = chars[i + 1..].iter().position(|&ch| ch == ']')? + i + 1;
                if !chars[i + 1..close].iter().any(|ch| ch.is_ascii_alphabetic() || *ch == '*') {
                    return None;
                }
                atoms += 1;
                i = close;
            }
            '(' => {
                if atoms == 0 {
                    return None;
                }
                depth += 1;
            }
            ')' => {
                depth = depth.checked_sub(1)?;
            }
            'C' if chars.get(i + 1) == Some(&'l') => {
                atoms += 1;
                i += 1;
            }
            'B' if chars.get(i + 1) == Some(&'r') => {
                atoms += 1;
                i += 1;
            }
            '*' => atoms += 1,
            '0'..='9' => {
                if atoms == 0 {
                    return None;
                }
                toggle_ring(&mut open_rings, c.to_digit(10)?);
            }
            '%' => {
                let tens = chars.get(i + 1)?.to_digit(10)?;
                let units = chars.get(i + 2)?.to_digit(10)?;
                if atoms == 0 {
                    return None;
                }
                toggle_ring(&mut open_rings, tens * 10 + units);
                i += 2;
            }
            _ if ORGANIC_SUBSET.contains(&c) => atoms += 1,
            _ if BOND_SYMBOLS.contains(&c) => {}
            _ => return None,
        }
        i += 1;
    }

    (depth == 0 && open_rings.is_empty() && atoms > 0).then_some(atoms)
}

fn toggle_ring(open_rings: &mut HashSet<u32>, label: u32) {
    if !open_rings.remove(&label) {
        open_rings.insert(label);
    }
}
