use tr_core::language::MarkupExtractor;
use tr_types::{ConjugationTable, Person, Tense, Verb};

use crate::html::{self, Element};
use crate::validator::ConjugationValidator;

/// Class carried by SpanishDict's indicative conjugation table
pub const SPANISHDICT_TABLE_CLASS: &str = "sTe03NLF";

/// Header text of the indicative table, whitespace removed
const HEADER_SIGNATURE: &str = "PresentPreteriteImperfectConditionalFuture";

const HEADER_KEYWORDS: [(&str, Tense); 5] = [
    ("imperfect", Tense::Imperfect),
    ("preterite", Tense::Preterite),
    ("present", Tense::Present),
    ("conditional", Tense::Conditional),
    ("future", Tense::Future),
];

const PRONOUN_ROWS: [(&str, Person); 6] = [
    ("yo", Person::Yo),
    ("tú", Person::Tu),
    ("él/ella/Ud.", Person::El),
    ("nosotros", Person::Nosotros),
    ("vosotros", Person::Vosotros),
    ("ellos/ellas/Uds.", Person::Ellos),
];

/// Scrapes conjugation tables out of a SpanishDict conjugation page.
///
/// Tries the classed indicative table first and only falls back to a
/// positional scan of every 6-7 row table when that yields nothing.
#[derive(Debug, Clone)]
pub struct SpanishDictExtractor {
    validator: ConjugationValidator,
    table_class: String,
}

impl SpanishDictExtractor {
    pub fn new(validator: ConjugationValidator) -> Self {
        Self {
            validator,
            table_class: SPANISHDICT_TABLE_CLASS.to_string(),
        }
    }

    pub fn with_table_class(mut self, class: impl Into<String>) -> Self {
        self.table_class = class.into();
        self
    }

    fn extract_structured(&self, table: &Element<'_>, verb: &Verb) -> ConjugationTable {
        let mut out = ConjugationTable::new();
        let rows = table.children(&["tr"]);
        let Some((header, body)) = rows.split_first() else {
            return out;
        };

        let columns = header_columns(header);
        tracing::debug!("structured table columns: {:?}", columns);

        for row in body {
            let text = row.text();
            let Some(person) = person_for_row(text.trim_start()) else {
                continue;
            };

            let cells = row.children(&["td"]);
            if cells.len() != columns.len() {
                tracing::debug!(
                    "skipping {person} row: {} cells for {} columns",
                    cells.len(),
                    columns.len()
                );
                continue;
            }

            for (cell, tense) in cells.iter().zip(&columns) {
                if let Some(tense) = tense {
                    self.accept(&mut out, *tense, person, cell, verb);
                }
            }
        }

        out
    }

    fn extract_generic(&self, table: &Element<'_>, verb: &Verb) -> ConjugationTable {
        let mut out = ConjugationTable::new();
        let rows = table.children(&["tr"]);
        if !(6..=7).contains(&rows.len()) {
            return out;
        }

        let offset = usize::from(looks_like_header(&rows[0]));

        for (person, row) in Person::ALL.into_iter().zip(&rows[offset..]) {
            let cells = row.children(&["td"]);
            for (cell, tense) in cells.iter().zip(Tense::SCRAPED) {
                self.accept(&mut out, tense, person, cell, verb);
            }
        }

        out
    }

    fn accept(
        &self,
        out: &mut ConjugationTable,
        tense: Tense,
        person: Person,
        cell: &Element<'_>,
        verb: &Verb,
    ) {
        let form = html::clean_cell(cell.inner);
        if self.validator.is_valid(&form, verb) {
            out.insert(tense, person, form);
        } else if !form.is_empty() {
            tracing::trace!("rejected cell {form:?} for {tense}/{person}");
        }
    }
}

impl MarkupExtractor for SpanishDictExtractor {
    fn extract(&self, markup: &str, verb: &Verb) -> ConjugationTable {
        let tables = html::all_elements(markup, &["table"]);
        tracing::debug!(
            "{} tables in page for {verb}, {:?} validation",
            tables.len(),
            self.validator.profile()
        );

        if let Some(primary) = tables.iter().find(|t| t.has_class(&self.table_class)) {
            let table = self.extract_structured(primary, verb);
            if !table.is_empty() {
                return table;
            }
            tracing::debug!("classed table for {verb} yielded nothing, scanning all tables");
        }

        for candidate in &tables {
            let table = self.extract_generic(candidate, verb);
            if !table.is_empty() {
                return table;
            }
        }

        ConjugationTable::new()
    }
}

/// Column tenses from the header row, `None` for columns past the known five
fn header_columns(header: &Element<'_>) -> Vec<Option<Tense>> {
    let compact: String = header.text().split_whitespace().collect();
    if compact == HEADER_SIGNATURE {
        return Tense::SCRAPED.into_iter().map(Some).collect();
    }

    header
        .children(&["th", "td"])
        .iter()
        .map(|cell| html::clean_cell(cell.inner))
        .filter(|name| !name.is_empty())
        .enumerate()
        .map(|(i, name)| keyword_tense(&name).or_else(|| Tense::SCRAPED.get(i).copied()))
        .collect()
}

fn keyword_tense(header: &str) -> Option<Tense> {
    let lower = header.to_lowercase();
    HEADER_KEYWORDS
        .iter()
        .find(|(keyword, _)| lower.contains(keyword))
        .map(|(_, tense)| *tense)
}

fn person_for_row(text: &str) -> Option<Person> {
    PRONOUN_ROWS
        .iter()
        .find(|(prefix, _)| text.starts_with(prefix))
        .map(|(_, person)| *person)
}

fn looks_like_header(row: &Element<'_>) -> bool {
    if !row.children(&["th"]).is_empty() {
        return true;
    }
    let text = row.text().to_lowercase();
    text.contains("presente") || text.contains("preterite")
}

#[cfg(test)]
mod tests {
    use tr_types::ValidationProfile;

    use super::*;

    fn extractor() -> SpanishDictExtractor {
        SpanishDictExtractor::new(ConjugationValidator::new(ValidationProfile::Lenient))
    }

    fn row(pronoun: &str, forms: &[&str]) -> String {
        let cells: String = forms
            .iter()
            .map(|f| format!("<td><div><a href=\"/x\">{f}</a></div></td>"))
            .collect();
        format!("<tr><th>{pronoun}</th>{cells}</tr>")
    }

    fn hablar_page(class: &str, header: &str) -> String {
        format!(
            r#"<html><body><table class="{class}"><tbody>{header}{}{}{}{}{}{}</tbody></table></body></html>"#,
            row("yo", &["hablo", "hablé", "hablaba", "hablaría", "hablaré"]),
            row("tú", &["hablas", "hablaste", "hablabas", "hablarías", "hablarás"]),
            row("él/ella/Ud.", &["habla", "habló", "hablaba", "hablaría", "hablará"]),
            row("nosotros", &["hablamos", "hablamos", "hablábamos", "hablaríamos", "hablaremos"]),
            row("vosotros", &["habláis", "hablasteis", "hablabais", "hablaríais", "hablaréis"]),
            row("ellos/ellas/Uds.", &["hablan", "hablaron", "hablaban", "hablarían", "hablarán"]),
        )
    }

    const SIGNATURE_HEADER: &str = "<tr><th></th><th>Present</th><th>Preterite</th>\
        <th>Imperfect</th><th>Conditional</th><th>Future</th></tr>";

    #[test]
    fn structured_table_with_signature_header() {
        let page = hablar_page(SPANISHDICT_TABLE_CLASS, SIGNATURE_HEADER);
        let table = extractor().extract(&page, &Verb::new("hablar"));

        assert_eq!(table.tense_count(), 5);
        assert_eq!(table.cell_count(), 30);
        assert_eq!(table.get(Tense::Present, Person::Yo), Some("hablo"));
        assert_eq!(table.get(Tense::Imperfect, Person::Nosotros), Some("hablábamos"));
        assert_eq!(table.get(Tense::Conditional, Person::El), Some("hablaría"));
        assert_eq!(table.get(Tense::Future, Person::Ellos), Some("hablarán"));
    }

    #[test]
    fn header_keywords_set_column_order() {
        let header = "<tr><th></th><th>Future tense</th><th>Simple Present</th>\
            <th>Mystery</th><th>Preterite</th><th>Conditional</th></tr>";
        let page = hablar_page(SPANISHDICT_TABLE_CLASS, header);
        let table = extractor().extract(&page, &Verb::new("hablar"));

        // first data column is labelled Future
        assert_eq!(table.get(Tense::Future, Person::Yo), Some("hablo"));
        assert_eq!(table.get(Tense::Present, Person::Yo), Some("hablé"));
        // unrecognized header falls back to its positional tense (index 2)
        assert_eq!(table.get(Tense::Imperfect, Person::Yo), Some("hablaba"));
        assert_eq!(table.get(Tense::Preterite, Person::Yo), Some("hablaría"));
    }

    #[test]
    fn malformed_and_unknown_rows_are_skipped() {
        let page = format!(
            r#"<table class="{SPANISHDICT_TABLE_CLASS}">{SIGNATURE_HEADER}{}{}{}</table>"#,
            row("yo", &["hablo", "hablé", "hablaba", "hablaría"]),
            row("usted", &["habla", "habló", "hablaba", "hablaría", "hablará"]),
            row("tú", &["hablas", "http://ad", "hablabas", "-", "hablarás"]),
        );
        let table = extractor().extract(&page, &Verb::new("hablar"));

        assert!(!table.contains(Tense::Present, Person::Yo));
        assert!(!table.contains(Tense::Present, Person::El));
        assert_eq!(table.get(Tense::Present, Person::Tu), Some("hablas"));
        assert!(!table.contains(Tense::Preterite, Person::Tu));
        assert!(!table.contains(Tense::Conditional, Person::Tu));
        assert_eq!(table.cell_count(), 3);
    }

    #[test]
    fn entities_are_decoded_before_validation() {
        let page = format!(
            r#"<table class="{SPANISHDICT_TABLE_CLASS}">{SIGNATURE_HEADER}<tr><th>yo</th>
            <td>&nbsp;hablo&#8203;</td><td>habl<span>é</span></td><td>hablaba</td>
            <td>hablaría</td><td>hablaré&nbsp;</td></tr></table>"#
        );
        let table = extractor().extract(&page, &Verb::new("hablar"));

        assert_eq!(table.get(Tense::Present, Person::Yo), Some("hablo"));
        assert_eq!(table.get(Tense::Preterite, Person::Yo), Some("hablé"));
        assert_eq!(table.get(Tense::Future, Person::Yo), Some("hablaré"));
    }

    #[test]
    fn falls_back_to_generic_tables() {
        let rows: String = [
            ["como", "comí", "comía", "comería", "comeré"],
            ["comes", "comiste", "comías", "comerías", "comerás"],
            ["come", "comió", "comía", "comería", "comerá"],
            ["comemos", "comimos", "comíamos", "comeríamos", "comeremos"],
            ["coméis", "comisteis", "comíais", "comeríais", "comeréis"],
            ["comen", "comieron", "comían", "comerían", "comerán"],
        ]
        .iter()
        .map(|forms| {
            let cells: String = forms.iter().map(|f| format!("<td>{f}</td>")).collect();
            format!("<tr>{cells}<td>extra</td></tr>")
        })
        .collect();
        let page = format!(
            "<table><tr><td>ad</td></tr></table>\
             <table><tr><td>Presente</td><td>Pretérito</td></tr>{rows}</table>"
        );

        let table = extractor().extract(&page, &Verb::new("comer"));

        assert_eq!(table.tense_count(), 5);
        assert_eq!(table.get(Tense::Present, Person::Yo), Some("como"));
        assert_eq!(table.get(Tense::Preterite, Person::Ellos), Some("comieron"));
        assert_eq!(table.get(Tense::Future, Person::Vosotros), Some("comeréis"));
    }

    #[test]
    fn generic_table_without_header_starts_at_yo() {
        let rows: String = (0..6)
            .map(|i| format!("<tr><td>vivo{}</td></tr>", "o".repeat(i)))
            .collect();
        let page = format!("<table>{rows}</table>");
        let table = extractor().extract(&page, &Verb::new("vivir"));

        assert_eq!(table.get(Tense::Present, Person::Yo), Some("vivo"));
        assert_eq!(table.get(Tense::Present, Person::Ellos), Some("vivoooooo"));
    }

    #[test]
    fn empty_classed_table_triggers_fallback() {
        let page = format!(
            r#"<table class="{SPANISHDICT_TABLE_CLASS}"><tr><th>nothing</th></tr></table>
            <table><tr><th>Present</th></tr>{}</table>"#,
            (0..6).map(|_| "<tr><td>vivo</td></tr>").collect::<String>()
        );
        let table = extractor().extract(&page, &Verb::new("vivir"));
        assert_eq!(table.get(Tense::Present, Person::Vosotros), Some("vivo"));
    }

    #[test]
    fn classed_table_inside_a_layout_table() {
        let page = format!(
            r#"<table class="layout"><tr><td><div><table class="{SPANISHDICT_TABLE_CLASS}">{SIGNATURE_HEADER}{}</table></div></td></tr></table>"#,
            row("yo", &["soy", "fui", "era", "sería", "seré"]),
        );
        let table = extractor().extract(&page, &Verb::new("ser"));

        assert_eq!(table.get(Tense::Present, Person::Yo), Some("soy"));
        assert_eq!(table.get(Tense::Future, Person::Yo), Some("seré"));
        assert_eq!(table.cell_count(), 5);
    }

    #[test]
    fn generic_table_inside_a_layout_table() {
        let rows: String = ["voy", "vas", "va", "vamos", "vais", "van"]
            .iter()
            .map(|form| format!("<tr><td>{form}</td></tr>"))
            .collect();
        let page = format!("<table><tr><td><table>{rows}</table></td></tr></table>");
        let table = extractor().extract(&page, &Verb::new("ir"));

        assert_eq!(table.get(Tense::Present, Person::Yo), Some("voy"));
        assert_eq!(table.get(Tense::Present, Person::Ellos), Some("van"));
    }

    #[test]
    fn generic_path_rejects_eight_row_tables() {
        let rows: String = (0..8).map(|_| "<tr><td>vivo</td></tr>").collect();
        let page = format!("<table>{rows}</table>");
        assert!(extractor().extract(&page, &Verb::new("vivir")).is_empty());
    }

    #[test]
    fn headerless_seven_row_table_maps_first_six_rows() {
        let rows: String = ["vivo", "vives", "vive", "vivimos", "vivís", "viven", "vivido"]
            .iter()
            .map(|form| format!("<tr><td>{form}</td></tr>"))
            .collect();
        let page = format!("<table>{rows}</table>");
        let table = extractor().extract(&page, &Verb::new("vivir"));

        assert_eq!(table.get(Tense::Present, Person::Yo), Some("vivo"));
        assert_eq!(table.get(Tense::Present, Person::Ellos), Some("viven"));
        assert_eq!(table.cell_count(), 6);
    }

    #[test]
    fn unrelated_page_yields_empty_table() {
        let page = "<html><body><p>Not found</p><table><tr><td>a</td></tr></table></body></html>";
        assert!(extractor().extract(page, &Verb::new("mesa")).is_empty());
    }
}
