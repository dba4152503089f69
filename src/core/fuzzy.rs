use crate::core::matcher::{merge_properties, PagedSource};
use crate::core::similarity::{normalize, similarity};
use crate::error::Result;
use crate::models::{FuzzyMatch, FuzzySearchOptions, PageCursor, Record};

/// Find records whose text properties resemble the query
///
/// Unlike property matching, fuzzy search pulls the whole collection
/// before ranking: every page is fetched eagerly, then each record's
/// best similarity between the query and its search properties decides
/// whether it ranks. Records below `threshold` and records with no
/// value in any search property are dropped, the rest come back sorted
/// by similarity (descending) and cut to `limit`.
///
/// A query with no comparable text (nothing left after normalization)
/// or an empty search property list returns an empty result without
/// fetching anything.
pub async fn fuzzy_search(
    source: &dyn PagedSource,
    query: &str,
    options: &FuzzySearchOptions,
) -> Result<Vec<FuzzyMatch>> {
    if normalize(query).is_empty() || options.search_properties.is_empty() {
        tracing::debug!("nothing to compare, skipping search");
        return Ok(Vec::new());
    }

    let properties = merge_properties(&options.return_properties, &options.search_properties);
    let records = fetch_all_pages(source, &properties, options.max_pages).await?;

    let mut matches: Vec<FuzzyMatch> = records
        .into_iter()
        .filter_map(|record| {
            let best = best_similarity(&record, query, &options.search_properties)?;
            if best >= options.threshold {
                Some(FuzzyMatch {
                    record,
                    similarity: best,
                })
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    matches.truncate(options.limit);

    Ok(matches)
}

/// Best similarity between the query and any of the record's search
/// properties, or `None` when the record carries no value in any of them
fn best_similarity(record: &Record, query: &str, search_properties: &[String]) -> Option<f64> {
    let mut best: Option<f64> = None;

    for property in search_properties {
        if let Some(value) = record.property_str(property) {
            let score = similarity(query, value);
            best = Some(best.map_or(score, |b| b.max(score)));
        }
    }

    best
}

/// Walk the source to exhaustion and collect every record
async fn fetch_all_pages(
    source: &dyn PagedSource,
    properties: &[String],
    max_pages: usize,
) -> Result<Vec<Record>> {
    let mut records: Vec<Record> = Vec::new();
    let mut offset: Option<PageCursor> = None;
    let mut pages_fetched = 0usize;

    loop {
        if pages_fetched == max_pages {
            tracing::warn!(
                pages = pages_fetched,
                "page budget exhausted before the collection was, ranking what was fetched"
            );
            break;
        }

        let mut page = source.fetch_page(properties, offset.as_ref()).await?;
        pages_fetched += 1;
        records.append(&mut page.records);

        if !page.has_more {
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

    tracing::debug!(pages = pages_fetched, records = records.len(), "collection fetched");

    Ok(records)
}
