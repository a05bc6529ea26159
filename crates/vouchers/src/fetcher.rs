use crate::{ExportRange, NoteKind, NoteQuery, NoteStore, NoteStoreError, OrderNote, SortOrder};

/// Carrier marker every voucher note contains (case-sensitive).
pub const DEFAULT_NOTE_MARKER: &str = "Geniki";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub marker: String,
    /// Row cap for a single export (`None` = unbounded). Exceeding it fails
    /// the fetch with [`NoteStoreError::TooManyNotes`].
    pub limit: Option<usize>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            marker: DEFAULT_NOTE_MARKER.to_string(),
            limit: None,
        }
    }
}

/// Fetch the carrier's order notes inside `range`, oldest first.
///
/// The store is asked for ascending order, and the result is filtered and
/// stably re-sorted here as well: the reconciler relies on "later note wins"
/// and must not depend on every adapter getting the ordering right.
pub async fn fetch_notes<S>(
    store: &S,
    range: &ExportRange,
    options: &FetchOptions,
) -> Result<Vec<OrderNote>, NoteStoreError>
where
    S: NoteStore + ?Sized,
{
    let query = NoteQuery {
        kind: NoteKind::OrderNote,
        text_contains: options.marker.clone(),
        from: range.start(),
        to: range.end(),
        order: SortOrder::Ascending,
        // One extra row tells "exactly at the cap" apart from "over it".
        limit: options.limit.map(|limit| limit.saturating_add(1)),
    };

    let mut notes = store.query_notes(&query).await?;
    let returned = notes.len();

    notes.retain(|n| range.contains(n.note_date) && n.text.contains(options.marker.as_str()));
    notes.sort_by_key(|n| n.note_date);

    if notes.len() != returned {
        tracing::warn!(
            returned,
            kept = notes.len(),
            "note store returned rows outside the requested filter"
        );
    }
    if let Some(limit) = options.limit {
        if notes.len() > limit {
            tracing::warn!(limit, "note query exceeded the row cap; aborting export");
            return Err(NoteStoreError::TooManyNotes { limit });
        }
    }

    tracing::debug!(
        notes = notes.len(),
        start = %range.start(),
        end = %range.end(),
        "fetched carrier notes"
    );

    Ok(notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeNotes, ts};
    use geniki_core::OrderId;

    fn range() -> ExportRange {
        ExportRange::parse("2024-03-01", "2024-03-31").unwrap()
    }

    #[tokio::test]
    async fn passes_the_full_filter_to_the_store() {
        let store = FakeNotes::default();
        let options = FetchOptions {
            limit: Some(100),
            ..FetchOptions::default()
        };

        fetch_notes(&store, &range(), &options).await.unwrap();

        let query = store.last_query().unwrap();
        assert_eq!(query.kind, NoteKind::OrderNote);
        assert_eq!(query.text_contains, "Geniki");
        assert_eq!(query.from, ts("2024-03-01 00:00:00"));
        assert_eq!(query.to, ts("2024-03-31 23:59:59"));
        assert_eq!(query.order, SortOrder::Ascending);
        assert_eq!(query.limit, Some(101));
    }

    #[tokio::test]
    async fn notes_over_the_cap_fail_instead_of_truncating() {
        let store = FakeNotes::returning(vec![
            OrderNote::new(OrderId::new(1), ts("2024-03-01 10:00:00"), "Geniki 1111111111"),
            OrderNote::new(OrderId::new(1), ts("2024-03-02 10:00:00"), "Geniki 2222222222"),
        ]);
        let options = FetchOptions {
            limit: Some(1),
            ..FetchOptions::default()
        };

        let err = fetch_notes(&store, &range(), &options).await.unwrap_err();
        assert_eq!(err, NoteStoreError::TooManyNotes { limit: 1 });
    }

    #[tokio::test]
    async fn notes_exactly_at_the_cap_are_kept() {
        let store = FakeNotes::returning(vec![
            OrderNote::new(OrderId::new(1), ts("2024-03-01 10:00:00"), "Geniki 1111111111"),
            OrderNote::new(OrderId::new(2), ts("2024-03-02 10:00:00"), "Geniki 2222222222"),
        ]);
        let options = FetchOptions {
            limit: Some(2),
            ..FetchOptions::default()
        };

        let notes = fetch_notes(&store, &range(), &options).await.unwrap();
        assert_eq!(notes.len(), 2);
    }

    #[tokio::test]
    async fn output_is_sorted_and_filtered_even_if_store_is_sloppy() {
        let store = FakeNotes::returning(vec![
            OrderNote::new(OrderId::new(2), ts("2024-03-10 12:00:00"), "Geniki 2222222222"),
            OrderNote::new(OrderId::new(1), ts("2024-03-02 08:00:00"), "Geniki 1111111111"),
            OrderNote::new(OrderId::new(3), ts("2024-04-01 00:00:00"), "Geniki late"),
            OrderNote::new(OrderId::new(4), ts("2024-03-05 00:00:00"), "geniki lowercase"),
        ]);

        let notes = fetch_notes(&store, &range(), &FetchOptions::default())
            .await
            .unwrap();

        let ids: Vec<u64> = notes.iter().map(|n| n.order_id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn empty_store_is_not_an_error() {
        let store = FakeNotes::default();
        let notes = fetch_notes(&store, &range(), &FetchOptions::default())
            .await
            .unwrap();
        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn store_failures_propagate() {
        let store = FakeNotes::failing("connection refused");
        let err = fetch_notes(&store, &range(), &FetchOptions::default())
            .await
            .unwrap_err();
        assert_eq!(err, NoteStoreError::Storage("connection refused".to_string()));
    }
}
