use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Person, Tense};

/// Display-only marker for a missing cell. Never stored.
pub const PLACEHOLDER: &str = "-";

pub type PersonForms = BTreeMap<Person, String>;

type RawTable = BTreeMap<Tense, PersonForms>;

/// Conjugated forms keyed by tense, then person.
///
/// Absent cells are simply missing. Empty strings and the placeholder are
/// refused on insert, and dropped when deserializing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawTable", into = "RawTable")]
pub struct ConjugationTable {
    tenses: RawTable,
}

impl ConjugationTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a form. Returns false (and stores nothing) for blank or placeholder values.
    pub fn insert(&mut self, tense: Tense, person: Person, form: impl Into<String>) -> bool {
        let form = form.into();
        let trimmed = form.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            return false;
        }
        let form = if trimmed.len() == form.len() {
            form
        } else {
            trimmed.to_string()
        };
        self.tenses.entry(tense).or_default().insert(person, form);
        true
    }

    pub fn get(&self, tense: Tense, person: Person) -> Option<&str> {
        self.tenses
            .get(&tense)
            .and_then(|forms| forms.get(&person))
            .map(String::as_str)
    }

    pub fn forms(&self, tense: Tense) -> Option<&PersonForms> {
        self.tenses.get(&tense)
    }

    pub fn contains_tense(&self, tense: Tense) -> bool {
        self.tenses.contains_key(&tense)
    }

    pub fn contains(&self, tense: Tense, person: Person) -> bool {
        self.get(tense, person).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.tenses.is_empty()
    }

    /// Number of tenses with at least one form
    pub fn tense_count(&self) -> usize {
        self.tenses.len()
    }

    /// Number of filled (tense, person) cells
    pub fn cell_count(&self) -> usize {
        self.tenses.values().map(BTreeMap::len).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Tense, &PersonForms)> {
        self.tenses.iter().map(|(t, forms)| (*t, forms))
    }
}

impl From<RawTable> for ConjugationTable {
    fn from(raw: RawTable) -> Self {
        let mut table = ConjugationTable::new();
        for (tense, forms) in raw {
            for (person, form) in forms {
                table.insert(tense, person, form);
            }
        }
        table
    }
}

impl From<ConjugationTable> for RawTable {
    fn from(table: ConjugationTable) -> Self {
        table.tenses
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_and_blank_are_refused() {
        let mut table = ConjugationTable::new();
        assert!(!table.insert(Tense::Present, Person::Yo, "-"));
        assert!(!table.insert(Tense::Present, Person::Yo, "   "));
        assert!(table.is_empty());

        assert!(table.insert(Tense::Present, Person::Yo, " camino "));
        assert_eq!(table.get(Tense::Present, Person::Yo), Some("camino"));
        assert_eq!(table.cell_count(), 1);
    }

    #[test]
    fn json_shape_is_flat_nested_map() {
        let mut table = ConjugationTable::new();
        table.insert(Tense::Preterite, Person::El, "comió");
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"preterite":{"él/ella":"comió"}}"#);
    }

    #[test]
    fn deserializing_drops_placeholders() {
        let json = r#"{"present":{"yo":"como","tú":"-","ellos":""},"future":{"yo":"-"}}"#;
        let table: ConjugationTable = serde_json::from_str(json).unwrap();
        assert_eq!(table.cell_count(), 1);
        assert!(!table.contains_tense(Tense::Future));
    }
}
