pub mod table;
pub mod types;
pub mod verb;

pub use table::{ConjugationTable, PLACEHOLDER, PersonForms};
pub use types::{Direction, ParseTenseError, Person, Tense, ValidationProfile};
pub use verb::Verb;
