// Model exports
pub mod domain;
pub mod options;

pub use domain::{FuzzyMatch, PageCursor, Property, PropertyUpdate, Record, RecordPage, ScoredRecord, SearchCriteria};
pub use options::{FuzzySearchOptions, PageOptions, PropertyMatchOptions, RecentOptions};
