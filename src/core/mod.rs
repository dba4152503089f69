// Core matching algorithms
pub mod fuzzy;
pub mod matcher;
pub mod scoring;
pub mod similarity;

pub use fuzzy::fuzzy_search;
pub use matcher::{match_by_properties, PagedSource};
pub use scoring::score_record;
pub use similarity::{normalize, similarity, token_similarity, tokenize};
