use chrono::NaiveDate;
use fhir_model::Period;

/// Pick the primary entry of a repeating element.
///
/// A single entry is always primary. Otherwise entries whose period excludes
/// `reference_date` are skipped, the first flagged entry wins, and the first
/// remaining entry is used when none is flagged. If every entry was skipped
/// the first entry of the sequence is returned.
pub(crate) fn select_primary<'a, T>(
    entries: &'a [T],
    reference_date: NaiveDate,
    period: impl Fn(&T) -> Option<&Period>,
    is_flagged: impl Fn(&T) -> bool,
) -> Option<&'a T> {
    match entries {
        [] => None,
        [only] => Some(only),
        _ => {
            let current: Vec<&T> = entries
                .iter()
                .filter(|e| period(e).map_or(true, |p| p.covers(reference_date)))
                .collect();

            if current.is_empty() {
                tracing::debug!(
                    "No entry of {} is current on {}, using the first",
                    entries.len(),
                    reference_date
                );
            }

            current
                .iter()
                .find(|e| is_flagged(e))
                .or_else(|| current.first())
                .copied()
                .or_else(|| entries.first())
        }
    }
}
