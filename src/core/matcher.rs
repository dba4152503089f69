use async_trait::async_trait;

use crate::core::scoring::score_record;
use crate::error::Result;
use crate::models::{PageCursor, PropertyMatchOptions, ScoredRecord, SearchCriteria};

/// A paged collection of records that can be walked one page at a time
///
/// Resource clients implement this so the matchers stay independent of
/// any particular endpoint or wire format.
#[async_trait]
pub trait PagedSource: Send + Sync {
    /// Fetch one page of records carrying at least the given properties.
    ///
    /// `offset` is `None` for the first page and otherwise the cursor
    /// returned with the previous page.
    async fn fetch_page(
        &self,
        properties: &[String],
        offset: Option<&PageCursor>,
    ) -> Result<crate::models::RecordPage>;
}

/// Find records matching property criteria, scored and ranked
///
/// Pages are fetched one at a time and every record on a page is scored
/// with [`score_record`]. Records scoring zero are discarded. By default
/// the first page that yields any match ends the search and its matches
/// are ranked by score (descending, ties in page order) and cut to
/// `limit`; pages that yield nothing are skipped over for as long as
/// `recursive` allows. With `exhaustive` set, matches accumulate
/// instead of ending the search and ranking runs over every page the
/// walk reaches; `recursive` and `max_pages` bound the walk either way.
///
/// Empty criteria return an empty result without fetching anything.
/// Fetch errors abort the search and surface unchanged. The walk also
/// stops when `max_pages` is reached, when a page reports more data
/// without a cursor, or when the cursor stops advancing.
pub async fn match_by_properties(
    source: &dyn PagedSource,
    criteria: &SearchCriteria,
    options: &PropertyMatchOptions,
) -> Result<Vec<ScoredRecord>> {
    if criteria.is_empty() {
        tracing::debug!("empty criteria, skipping search");
        return Ok(Vec::new());
    }

    let properties = merge_properties(&options.return_properties, &criteria.property_names());

    let mut matches: Vec<ScoredRecord> = Vec::new();
    let mut offset: Option<PageCursor> = None;
    let mut pages_fetched = 0usize;

    loop {
        if pages_fetched == options.max_pages {
            tracing::warn!(
                pages = pages_fetched,
                "page budget exhausted before the collection was, stopping"
            );
            break;
        }

        let page = source.fetch_page(&properties, offset.as_ref()).await?;
        pages_fetched += 1;

        for record in page.records {
            let score = score_record(&record, criteria);
            if score != 0 {
                matches.push(ScoredRecord {
                    record,
                    match_score: score,
                });
            }
        }

        tracing::debug!(
            page = pages_fetched,
            matches = matches.len(),
            has_more = page.has_more,
            "scored page"
        );

        // First page with matches wins unless an exhaustive scan was asked for
        if !options.exhaustive && !matches.is_empty() {
            break;
        }

        if !page.has_more {
            break;
        }

        if !options.recursive {
            break;
        }

        match page.offset {
            Some(next) => {
                if offset.as_ref() == Some(&next) {
                    tracing::warn!(cursor = %next, "offset cursor did not advance, stopping");
                    break;
                }
                offset = Some(next);
            }
            None => {
                tracing::warn!("more pages reported without an offset cursor, stopping");
                break;
            }
        }
    }

    // Rank by score, keeping page order between equals
    matches.sort_by(|a, b| b.match_score.cmp(&a.match_score));
    matches.truncate(options.limit);

    Ok(matches)
}

/// Properties to request from the source: the caller's return
/// properties first, then the search properties, without duplicates.
pub(crate) fn merge_properties(return_properties: &[String], search_properties: &[String]) -> Vec<String> {
    let mut properties: Vec<String> =
        Vec::with_capacity(return_properties.len() + search_properties.len());

    for name in return_properties.iter().chain(search_properties.iter()) {
        if !properties.contains(name) {
            properties.push(name.clone());
        }
    }

    properties
}
