use unicode_normalization::UnicodeNormalization;

pub trait Preprocessor {
    /// Trim, NFC-compose and collapse inner whitespace to single spaces
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        let composed: String = text.nfc().collect();
        composed.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace_and_composes() {
        let out = DefaultPreprocessor.process("  buenos \n\t di\u{301}as ");
        assert_eq!(out, "buenos días");
    }

    #[test]
    fn blank_stays_blank() {
        assert_eq!(DefaultPreprocessor.process(" \n "), "");
    }
}
