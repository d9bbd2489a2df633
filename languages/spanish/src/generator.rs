use tr_core::language::FormGenerator;
use tr_types::{ConjugationTable, Person, Tense, Verb};

// Suffixes in Person::ALL order
const AR_PRESENT: [&str; 6] = ["o", "as", "a", "amos", "áis", "an"];
const AR_PRETERITE: [&str; 6] = ["é", "aste", "ó", "amos", "asteis", "aron"];
const ER_PRESENT: [&str; 6] = ["o", "es", "e", "emos", "éis", "en"];
const IR_PRESENT: [&str; 6] = ["o", "es", "e", "imos", "ís", "en"];
const ER_IR_PRETERITE: [&str; 6] = ["í", "iste", "ió", "imos", "isteis", "ieron"];

// Appended to the whole infinitive
const FUTURE: [&str; 6] = ["é", "ás", "á", "emos", "éis", "án"];
const CONDITIONAL: [&str; 6] = ["ía", "ías", "ía", "íamos", "íais", "ían"];

/// Regular-verb conjugation from spelling rules.
///
/// Irregulars, stem changes and orthographic shifts are not modelled.
#[derive(Debug, Default, Clone, Copy)]
pub struct SpanishGenerator;

impl SpanishGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl FormGenerator for SpanishGenerator {
    fn generate(&self, verb: &Verb) -> ConjugationTable {
        generate(verb)
    }
}

/// Present, preterite, future and conditional for a regular verb.
/// Empty for anything without an ar/er/ir ending.
pub fn generate(verb: &Verb) -> ConjugationTable {
    let mut table = ConjugationTable::new();

    let (present, preterite) = match verb.ending() {
        Some("ar") => (AR_PRESENT, AR_PRETERITE),
        Some("er") => (ER_PRESENT, ER_IR_PRETERITE),
        Some("ir") => (IR_PRESENT, ER_IR_PRETERITE),
        _ => return table,
    };

    let stem = verb.stem();
    let infinitive = verb.as_str();

    fill(&mut table, Tense::Present, stem, &present);
    fill(&mut table, Tense::Preterite, stem, &preterite);
    fill(&mut table, Tense::Future, infinitive, &FUTURE);
    fill(&mut table, Tense::Conditional, infinitive, &CONDITIONAL);

    table
}

fn fill(table: &mut ConjugationTable, tense: Tense, base: &str, suffixes: &[&str; 6]) {
    for (person, suffix) in Person::ALL.into_iter().zip(suffixes) {
        table.insert(tense, person, format!("{base}{suffix}"));
    }
}
