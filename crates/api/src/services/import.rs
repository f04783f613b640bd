//! Bulk import runs.
//!
//! Each request replays the importer state machine from the raw input:
//! preview stops after parsing, a run creates the records one at a time in
//! input order.

use vitrine_core::error::CoreError;
use vitrine_core::import::{import_elements, ImportRecord, ImportReport, ImportSession};
use vitrine_db::DocumentStore;

use super::content::ContentRecord;
use crate::error::{AppError, AppResult};

/// Parse and normalize `input` without touching the store.
pub fn preview_import<R: ContentRecord>(input: &str) -> AppResult<Vec<R>> {
    let mut session = ImportSession::<R>::new();
    session.load(input)?;
    Ok(session.preview().map(<[R]>::to_vec).unwrap_or_default())
}

fn failure_message(err: CoreError) -> String {
    match err {
        CoreError::Validation(msg) => msg,
        other => other.to_string(),
    }
}

/// Parse `input` and create every record, sequentially.
///
/// A record that fails validation or persistence, or whose input held a
/// value normalization would have replaced (an unknown status), is
/// reported against its title and the batch carries on. Only an unparseable input fails the
/// whole request.
pub async fn run_import<R: ContentRecord>(
    store: &dyn DocumentStore,
    input: &str,
) -> AppResult<ImportReport> {
    let mut session = ImportSession::<R>::new();
    session.load(input)?;
    let records = session.start()?;
    let elements = import_elements(input)?;
    tracing::info!(collection = %R::COLLECTION, total = records.len(), "Import started");

    for (record, element) in records.into_iter().zip(&elements) {
        let checked = R::check_element(element).and_then(|()| record.check_import());
        let outcome = match checked {
            Err(e) => Err(failure_message(e)),
            Ok(()) => R::create(store, &record).await.map(|_| ()).map_err(|e| {
                tracing::warn!(collection = %R::COLLECTION, title = %record.title(), error = %e, "Import item failed");
                e.to_string()
            }),
        };
        if let Some(progress) = session.record(record.title(), outcome) {
            tracing::debug!(current = progress.current, total = progress.total, "Import progress");
        }
    }

    let report = session
        .finish()
        .ok_or_else(|| AppError::InternalError("Import session did not complete".into()))?;
    tracing::info!(
        collection = %R::COLLECTION,
        success_count = report.success_count,
        failed = report.errors.len(),
        "Import finished",
    );
    Ok(report)
}
