use std::collections::{BTreeMap, HashMap};

use super::Unit;

/// Two-way map between the detector's surah names and surah numbers.
///
/// The detector reports the Arabic `name` attribute of the surah index, so the
/// table is keyed on that string. Built once, never mutated afterwards.
#[derive(Debug, Clone, Default)]
pub struct NameResolver {
    by_name: HashMap<String, u32>,
    by_index: BTreeMap<u32, String>,
}

impl NameResolver {
    pub fn from_units(units: &[Unit]) -> Self {
        let mut resolver = Self::default();
        for unit in units {
            if unit.name.is_empty() {
                continue;
            }
            resolver.by_name.insert(unit.name.clone(), unit.index);
            resolver.by_index.insert(unit.index, unit.name.clone());
        }
        resolver
    }

    pub fn resolve(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    pub fn name_of(&self, index: u32) -> Option<&str> {
        self.by_index.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }
}
