//! Terminal rendering. Everything returns a `String` so the REPL and the
//! one-shot commands can decide where it goes.

use std::fmt::Write as _;
use std::path::Path;

use tr_config::Config;
use tr_translator::Translation;
use tr_types::{ConjugationTable, Direction, PLACEHOLDER, Person, Tense};

const RESET: &str = "\x1b[0m";

/// ANSI colors, only when enabled in config and stdout is a terminal
#[derive(Debug, Clone, Copy, Default)]
pub struct Palette {
    enabled: bool,
}

impl Palette {
    pub fn for_stdout(color: bool) -> Self {
        Self {
            enabled: color && atty::is(atty::Stream::Stdout),
        }
    }

    #[cfg(test)]
    pub fn plain() -> Self {
        Self { enabled: false }
    }

    fn paint(self, code: &str, text: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    pub fn header(self, text: &str) -> String {
        self.paint("1;36", text)
    }

    pub fn title(self, text: &str) -> String {
        self.paint("1;32", text)
    }

    pub fn person(self, text: &str) -> String {
        self.paint("33", text)
    }

    pub fn info(self, text: &str) -> String {
        self.paint("36", text)
    }

    pub fn success(self, text: &str) -> String {
        self.paint("32", text)
    }

    pub fn warning(self, text: &str) -> String {
        self.paint("1;33", text)
    }

    pub fn error(self, text: &str) -> String {
        self.paint("31", text)
    }

    pub fn prompt(self, text: &str) -> String {
        self.paint("1;34", text)
    }
}

pub fn language_name(code: &str) -> String {
    match code {
        "es" => "Spanish".to_string(),
        "en" => "English".to_string(),
        other => other.to_uppercase(),
    }
}

/// Bordered grid with an upper-cased header row. With `label_column` the first
/// column is styled as row labels.
fn render_grid(
    header: &[&str],
    rows: &[Vec<String>],
    palette: Palette,
    label_column: bool,
) -> String {
    let header: Vec<String> = header.iter().map(|h| h.to_uppercase()).collect();
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let rule = {
        let mut rule = String::from("+");
        for width in &widths {
            rule.push_str(&"-".repeat(width + 2));
            rule.push('+');
        }
        rule
    };

    let pad = |text: &str, width: usize| {
        let fill = width.saturating_sub(text.chars().count());
        (text.to_string(), " ".repeat(fill))
    };

    let mut out = String::new();
    out.push_str(&rule);
    out.push('\n');

    out.push('|');
    for (cell, width) in header.iter().zip(&widths) {
        let (text, fill) = pad(cell, *width);
        let _ = write!(out, " {}{fill} |", palette.header(&text));
    }
    out.push('\n');
    out.push_str(&rule);
    out.push('\n');

    for row in rows {
        out.push('|');
        for (i, (cell, width)) in row.iter().zip(&widths).enumerate() {
            let (text, fill) = pad(cell, *width);
            let text = if label_column && i == 0 { palette.person(&text) } else { text };
            let _ = write!(out, " {text}{fill} |");
        }
        out.push('\n');
    }
    out.push_str(&rule);
    out
}

/// Two columns headed by the language names
pub fn render_translation(translation: &Translation, palette: Palette) -> String {
    let from = language_name(&translation.from);
    let to = language_name(&translation.to);
    let row = vec![translation.original.clone(), translation.text.clone()];

    render_grid(&[&from, &to], &[row], palette, false)
}

/// Tenses to put on screen, in display order, limited to what `table` has
pub fn visible_tenses(table: &ConjugationTable, defaults: &[Tense], show_all: bool) -> Vec<Tense> {
    if show_all {
        return Tense::ALL
            .into_iter()
            .filter(|t| table.contains_tense(*t))
            .collect();
    }

    let mut tenses = Vec::new();
    for tense in defaults {
        if table.contains_tense(*tense) && !tenses.contains(tense) {
            tenses.push(*tense);
        }
    }
    tenses
}

/// Person × Tense grid, `-` for empty cells
pub fn render_conjugations(table: &ConjugationTable, tenses: &[Tense], palette: Palette) -> String {
    let mut out = palette.title("Verb Conjugations:");
    out.push('\n');

    if tenses.is_empty() {
        out.push_str(&palette.info("No conjugations available for the specified tenses."));
        return out;
    }

    let mut header = vec!["Person"];
    header.extend(tenses.iter().map(|t| t.display_name()));

    let rows: Vec<Vec<String>> = Person::ALL
        .into_iter()
        .map(|person| {
            let mut row = vec![person.label().to_string()];
            row.extend(
                tenses
                    .iter()
                    .map(|t| table.get(*t, person).unwrap_or(PLACEHOLDER).to_string()),
            );
            row
        })
        .collect();

    out.push_str(&render_grid(&header, &rows, palette, true));
    out
}

/// Hint shown when some of the table's tenses were left off screen
pub fn expansion_hint(
    table: &ConjugationTable,
    shown: usize,
    verb: &str,
    palette: Palette,
) -> Option<String> {
    let hidden = table.tense_count().saturating_sub(shown);
    if hidden == 0 {
        return None;
    }
    Some(palette.info(&format!(
        "{hidden} more tenses available. Type 'expand {verb}' to see all conjugations."
    )))
}

pub fn render_tenses(defaults: &[Tense], palette: Palette) -> String {
    let mut out = palette.title("Available Tenses:");
    out.push('\n');
    for (i, tense) in Tense::ALL.iter().enumerate() {
        if defaults.contains(tense) {
            let _ = writeln!(
                out,
                "  {:>2}. {} (default)",
                i + 1,
                palette.success(tense.display_name())
            );
        } else {
            let _ = writeln!(out, "  {:>2}. {}", i + 1, tense.display_name());
        }
    }
    out.push('\n');
    out.push_str("Default tenses are shown automatically. Use 'expand [verb]' to see all tenses.");
    out
}

pub fn render_help(palette: Palette) -> String {
    let commands = [
        ("help, h", "Show this help message"),
        ("toggle, t", "Toggle translation direction"),
        ("clear, cls", "Clear the screen"),
        ("exit, quit, q", "Exit the program"),
        ("config", "Show current configuration"),
        ("tenses", "Show available tenses"),
        ("expand [verb]", "Show all conjugations for a verb"),
        ("Ctrl+C", "Cancel a lookup and exit"),
    ];

    let mut out = palette.header("Available Commands:");
    out.push('\n');
    for (command, description) in commands {
        let _ = writeln!(out, "  {} - {description}", palette.warning(command));
    }
    out.push('\n');
    out.push_str("Simply type any word or phrase to translate it.\n");
    out.push_str("For Spanish verbs, basic conjugations are shown automatically.\n");
    out.push_str("Use 'expand' to see all available tenses and moods.");
    out
}

pub fn render_config(config: &Config, path: Option<&Path>, palette: Palette) -> String {
    let display = &config.display;
    let tenses: Vec<&str> = display.default_tenses.iter().map(|t| t.id()).collect();
    let direction = match display.default_direction {
        Direction::EsToEn => "es2en",
        Direction::EnToEs => "en2es",
    };

    let entries = [
        ("Default Direction", direction.to_string()),
        ("Default Tenses", tenses.join(", ")),
        ("Show All Tenses", display.show_all_tenses.to_string()),
        ("Validation", format!("{:?}", config.conjugation.validation).to_lowercase()),
        ("Cache Enabled", config.conjugation.cache_enabled.to_string()),
        ("Timeout", format!("{}s", config.conjugation.timeout_seconds)),
    ];

    let mut out = palette.header("Current Configuration:");
    out.push('\n');
    for (key, value) in entries {
        let _ = writeln!(out, "  {}: {value}", palette.warning(key));
    }
    out.push('\n');
    match path {
        Some(path) => {
            let _ = writeln!(out, "Configuration file location: {}", path.display());
        }
        None => out.push_str("No configuration file in use.\n"),
    }
    out.push_str("Edit the file directly to change settings.");
    out
}

pub fn welcome(palette: Palette) -> String {
    format!(
        "{}\nType 'help' for commands, 'toggle' to switch direction, Ctrl+C to exit\n",
        palette.header("TR - English-Spanish Translator")
    )
}

pub fn prompt(direction: Direction, palette: Palette) -> String {
    format!(
        "{}\n{} ",
        palette.success(&format!("Current direction: {}", direction.label())),
        palette.prompt(">")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ConjugationTable {
        let mut table = ConjugationTable::new();
        table.insert(Tense::Present, Person::Yo, "hablo");
        table.insert(Tense::Present, Person::Tu, "hablas");
        table.insert(Tense::Preterite, Person::Yo, "hablé");
        table.insert(Tense::Future, Person::Yo, "hablaré");
        table.insert(Tense::Conditional, Person::Yo, "hablaría");
        table
    }

    #[test]
    fn translation_table_is_headed_by_language_names() {
        let translation = Translation {
            original: "caminar".to_string(),
            text: "to walk".to_string(),
            from: "es".to_string(),
            to: "en".to_string(),
            provider: "mymemory".to_string(),
            is_verb: true,
        };
        let out = render_translation(&translation, Palette::plain());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "+---------+---------+");
        assert_eq!(lines[1], "| SPANISH | ENGLISH |");
        assert_eq!(lines[3], "| caminar | to walk |");
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn grid_marks_missing_cells() {
        let table = sample();
        let out = render_conjugations(&table, &[Tense::Present, Tense::Preterite], Palette::plain());

        assert!(out.starts_with("Verb Conjugations:\n"));
        assert!(out.contains("| PERSON   | PRESENT | PRETERITE |"));
        assert!(out.contains("| yo       | hablo   | hablé     |"));
        assert!(out.contains("| tú       | hablas  | -         |"));
        assert!(out.contains("| ellos    | -       | -         |"));
    }

    #[test]
    fn visible_tenses_follow_defaults_or_show_all() {
        let table = sample();

        let defaults = visible_tenses(&table, &[Tense::Present, Tense::Imperfect, Tense::Present], false);
        assert_eq!(defaults, vec![Tense::Present]);

        let all = visible_tenses(&table, &[], true);
        assert_eq!(
            all,
            vec![Tense::Present, Tense::Preterite, Tense::Future, Tense::Conditional]
        );
    }

    #[test]
    fn hint_counts_hidden_tenses() {
        let table = sample();
        let hint = expansion_hint(&table, 1, "hablar", Palette::plain()).unwrap();
        assert_eq!(
            hint,
            "3 more tenses available. Type 'expand hablar' to see all conjugations."
        );
        assert!(expansion_hint(&table, 4, "hablar", Palette::plain()).is_none());
    }

    #[test]
    fn tense_listing_marks_defaults() {
        let out = render_tenses(&[Tense::Present, Tense::Preterite], Palette::plain());

        assert!(out.contains("   1. Present (default)"));
        assert!(out.contains("   2. Preterite (default)"));
        assert!(out.contains("   3. Imperfect\n"));
        assert!(out.contains("  12. Pres. Perf. Subj."));
    }

    #[test]
    fn empty_selection_explains_itself() {
        let out = render_conjugations(&sample(), &[], Palette::plain());
        assert!(out.ends_with("No conjugations available for the specified tenses."));
    }
}
