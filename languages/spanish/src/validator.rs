use tr_types::{ValidationProfile, Verb};

const MIN_LEN: usize = 2;
const LENIENT_MAX_LEN: usize = 15;
const STRICT_MAX_LEN: usize = 20;
/// Strict profile accepts stem-less forms only up to this length
const SHORT_FORM_MAX_LEN: usize = 10;

const NOISE_MARKERS: [&str; 3] = ["http", "@", "#"];
const ACCENTED: &str = "áéíóúüñ";

/// Decides whether a scraped string is a plausible conjugated word
#[derive(Debug, Clone, Copy, Default)]
pub struct ConjugationValidator {
    profile: ValidationProfile,
}

impl ConjugationValidator {
    pub fn new(profile: ValidationProfile) -> Self {
        Self { profile }
    }

    pub fn profile(&self) -> ValidationProfile {
        self.profile
    }

    pub fn is_valid(&self, candidate: &str, verb: &Verb) -> bool {
        let lower = candidate.to_lowercase();
        let len = lower.chars().count();

        let max_len = match self.profile {
            ValidationProfile::Lenient => LENIENT_MAX_LEN,
            ValidationProfile::Strict => STRICT_MAX_LEN,
        };
        if len < MIN_LEN || len > max_len {
            return false;
        }

        if NOISE_MARKERS.iter().any(|m| lower.contains(m)) {
            return false;
        }

        if !lower.chars().all(|c| c.is_ascii_lowercase() || ACCENTED.contains(c)) {
            return false;
        }

        match self.profile {
            ValidationProfile::Lenient => true,
            ValidationProfile::Strict => {
                lower.contains(verb.stem()) || len <= SHORT_FORM_MAX_LEN
            }
        }
    }
}
