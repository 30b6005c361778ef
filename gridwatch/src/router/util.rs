use gridwatch_core::{Dataset, Decoded, FetchWarning, GridError, UnitId};

/// Join a collection of tasks and apply an optional request-level deadline.
///
/// This wraps `futures::future::join_all(tasks)` with a timeout. On expiry the
/// result is `GridError::RequestTimeout("request")`, which call sites remap to
/// a more specific label as needed.
///
/// # Errors
/// Returns `RequestTimeout` when `deadline` elapses before every task completes.
pub async fn join_with_deadline<I, F, T>(
    tasks: I,
    deadline: Option<std::time::Duration>,
) -> Result<Vec<T>, GridError>
where
    I: IntoIterator<Item = F>,
    F: core::future::Future<Output = T>,
{
    crate::core::with_request_deadline(deadline, futures::future::join_all(tasks)).await
}

/// Collapse a set of provider errors into a uniform `GridError` outcome.
///
/// Rules:
/// - If `attempted_any` is false → `Unsupported(capability)`.
/// - If all errors are `ProviderTimeout` → `AllProvidersTimedOut(capability)`.
/// - If `not_found_what` is `Some` and all errors are `NotFound` → `NotFound(what)`.
/// - A single remaining error is returned as is.
/// - Else → `AllProvidersFailed(errors)`.
#[must_use]
pub fn collapse_errors(
    capability: Dataset,
    attempted_any: bool,
    mut errors: Vec<GridError>,
    not_found_what: Option<String>,
) -> GridError {
    if !attempted_any {
        return GridError::unsupported(capability.as_str());
    }
    if !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GridError::ProviderTimeout { .. }))
    {
        return GridError::AllProvidersTimedOut {
            capability: capability.to_string(),
        };
    }
    if let Some(what) = not_found_what
        && !errors.is_empty()
        && errors
            .iter()
            .all(|e| matches!(e, GridError::NotFound { .. }))
    {
        return GridError::not_found(what);
    }
    if errors.len() == 1
        && let Some(only) = errors.pop()
    {
        return only;
    }
    GridError::AllProvidersFailed(errors)
}

/// Failures and malformed-row counts collected while joining per-unit results.
#[derive(Debug, Default)]
pub(crate) struct FetchNotes {
    pub(crate) warnings: Vec<FetchWarning>,
    pub(crate) skipped_rows: usize,
}

impl FetchNotes {
    /// Unwrap a unit's dataset result, recording a failure as a warning.
    ///
    /// A failed dataset contributes an empty series.
    pub(crate) fn absorb<T>(
        &mut self,
        res: Result<Decoded<T>, GridError>,
        unit: &UnitId,
        dataset: Dataset,
    ) -> Vec<T> {
        match res {
            Ok(decoded) => {
                self.skipped_rows += decoded.skipped;
                decoded.records
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(unit = %unit, dataset = %dataset, error = %e, "upstream fetch failed; using empty series");
                self.warnings.push(FetchWarning::new(unit.clone(), dataset, e));
                Vec::new()
            }
        }
    }

    pub(crate) fn merge(&mut self, other: Self) {
        self.warnings.extend(other.warnings);
        self.skipped_rows += other.skipped_rows;
    }
}
