use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Tense identifiers used as conjugation table keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tense {
    Present,
    Preterite,
    Imperfect,
    Future,
    Conditional,
    PresentSubjunctive,
    ImperfectSubjunctive,
    PresentPerfect,
    Pluperfect,
    FuturePerfect,
    ConditionalPerfect,
    PresentPerfectSubjunctive,
}

impl Tense {
    pub const ALL: [Tense; 12] = [
        Tense::Present,
        Tense::Preterite,
        Tense::Imperfect,
        Tense::Future,
        Tense::Conditional,
        Tense::PresentSubjunctive,
        Tense::ImperfectSubjunctive,
        Tense::PresentPerfect,
        Tense::Pluperfect,
        Tense::FuturePerfect,
        Tense::ConditionalPerfect,
        Tense::PresentPerfectSubjunctive,
    ];

    /// Tenses filled by scraping, in SpanishDict column order
    pub const SCRAPED: [Tense; 5] = [
        Tense::Present,
        Tense::Preterite,
        Tense::Imperfect,
        Tense::Conditional,
        Tense::Future,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Tense::Present => "present",
            Tense::Preterite => "preterite",
            Tense::Imperfect => "imperfect",
            Tense::Future => "future",
            Tense::Conditional => "conditional",
            Tense::PresentSubjunctive => "present_subjunctive",
            Tense::ImperfectSubjunctive => "imperfect_subjunctive",
            Tense::PresentPerfect => "present_perfect",
            Tense::Pluperfect => "pluperfect",
            Tense::FuturePerfect => "future_perfect",
            Tense::ConditionalPerfect => "conditional_perfect",
            Tense::PresentPerfectSubjunctive => "present_perfect_subjunctive",
        }
    }

    /// Short column title
    pub fn display_name(self) -> &'static str {
        match self {
            Tense::Present => "Present",
            Tense::Preterite => "Preterite",
            Tense::Imperfect => "Imperfect",
            Tense::Future => "Future",
            Tense::Conditional => "Conditional",
            Tense::PresentSubjunctive => "Pres. Subj.",
            Tense::ImperfectSubjunctive => "Imp. Subj.",
            Tense::PresentPerfect => "Pres. Perfect",
            Tense::Pluperfect => "Pluperfect",
            Tense::FuturePerfect => "Fut. Perfect",
            Tense::ConditionalPerfect => "Cond. Perfect",
            Tense::PresentPerfectSubjunctive => "Pres. Perf. Subj.",
        }
    }
}

impl fmt::Display for Tense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tense: {0}")]
pub struct ParseTenseError(pub String);

impl FromStr for Tense {
    type Err = ParseTenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase().replace([' ', '-'], "_");
        Tense::ALL
            .into_iter()
            .find(|t| t.id() == wanted)
            .ok_or_else(|| ParseTenseError(s.to_string()))
    }
}

/// Grammatical person
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Person {
    #[serde(rename = "yo")]
    Yo,
    #[serde(rename = "tú")]
    Tu,
    #[serde(rename = "él/ella")]
    El,
    #[serde(rename = "nosotros")]
    Nosotros,
    #[serde(rename = "vosotros")]
    Vosotros,
    #[serde(rename = "ellos")]
    Ellos,
}

impl Person {
    pub const ALL: [Person; 6] = [
        Person::Yo,
        Person::Tu,
        Person::El,
        Person::Nosotros,
        Person::Vosotros,
        Person::Ellos,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Person::Yo => "yo",
            Person::Tu => "tú",
            Person::El => "él/ella",
            Person::Nosotros => "nosotros",
            Person::Vosotros => "vosotros",
            Person::Ellos => "ellos",
        }
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Translation direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    #[serde(rename = "es2en")]
    EsToEn,
    #[serde(rename = "en2es")]
    EnToEs,
}

impl Direction {
    /// (from, to) language codes
    pub fn langs(self) -> (&'static str, &'static str) {
        match self {
            Direction::EsToEn => ("es", "en"),
            Direction::EnToEs => ("en", "es"),
        }
    }

    pub fn toggle(self) -> Self {
        match self {
            Direction::EsToEn => Direction::EnToEs,
            Direction::EnToEs => Direction::EsToEn,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Direction::EsToEn => "Spanish → English",
            Direction::EnToEs => "English → Spanish",
        }
    }

    /// Text with Spanish-only characters is Spanish; anything else keeps `fallback`.
    pub fn infer(text: &str, fallback: Direction) -> Direction {
        if text.chars().any(|c| "ñáéíóúü¿¡ÑÁÉÍÓÚÜ".contains(c)) {
            Direction::EsToEn
        } else {
            fallback
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "es2en" => Ok(Direction::EsToEn),
            "en2es" => Ok(Direction::EnToEs),
            other => Err(format!("unknown direction: {other} (expected es2en or en2es)")),
        }
    }
}

/// How picky the validator is about scraped cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationProfile {
    /// Length and character-set checks only
    #[default]
    Lenient,
    /// Also requires the verb stem or a short form
    Strict,
}

impl FromStr for ValidationProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "lenient" => Ok(ValidationProfile::Lenient),
            "strict" => Ok(ValidationProfile::Strict),
            other => Err(format!("unknown validation profile: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tense_ids_parse_back() {
        for tense in Tense::ALL {
            assert_eq!(tense.id().parse::<Tense>(), Ok(tense));
        }
        assert_eq!("Present Perfect".parse::<Tense>(), Ok(Tense::PresentPerfect));
        assert!("aorist".parse::<Tense>().is_err());
    }

    #[test]
    fn person_serializes_with_spanish_labels() {
        let json = serde_json::to_string(&Person::El).unwrap();
        assert_eq!(json, "\"él/ella\"");
        let back: Person = serde_json::from_str("\"tú\"").unwrap();
        assert_eq!(back, Person::Tu);
    }

    #[test]
    fn direction_inference_prefers_spanish_marks() {
        assert_eq!(Direction::infer("¿dónde?", Direction::EnToEs), Direction::EsToEn);
        assert_eq!(Direction::infer("house", Direction::EnToEs), Direction::EnToEs);
        assert_eq!(Direction::EsToEn.toggle(), Direction::EnToEs);
    }
}
