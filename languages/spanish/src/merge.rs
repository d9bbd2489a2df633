use tr_core::ScrapeOutcome;
use tr_types::ConjugationTable;

/// Scraped cells always win; generated cells only fill gaps.
///
/// An empty `extracted` table returns `generated` unchanged. Nothing found
/// only in `extracted` is ever removed.
pub fn merge(extracted: ConjugationTable, generated: ConjugationTable) -> ConjugationTable {
    if extracted.is_empty() {
        return generated;
    }

    let mut merged = extracted;
    for (tense, forms) in generated.iter() {
        for (person, form) in forms {
            if !merged.contains(tense, *person) {
                merged.insert(tense, *person, form.clone());
            }
        }
    }
    merged
}

/// Merge the scrape outcome with the rule-based table
pub fn reconcile(outcome: ScrapeOutcome, generated: ConjugationTable) -> ConjugationTable {
    match outcome {
        ScrapeOutcome::Scraped(extracted) => merge(extracted, generated),
        ScrapeOutcome::Failed(reason) => {
            tracing::debug!("using generated conjugations: {reason}");
            generated
        }
    }
}
