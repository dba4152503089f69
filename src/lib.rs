//! HubSpot CRM API client with scored and fuzzy property search
//!
//! This library wraps the legacy HubSpot REST API (companies, tickets,
//! associations) and layers two search strategies over the paged
//! listing endpoints: a scored property matcher that walks pages until
//! it finds matches, and a fuzzy matcher that pulls the collection and
//! ranks it by string similarity.

pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use core::{fuzzy_search, match_by_properties, PagedSource};
pub use error::{HubspotError, Result};
pub use models::{
    FuzzyMatch, FuzzySearchOptions, PageCursor, PageOptions, Property, PropertyMatchOptions,
    PropertyUpdate, RecentOptions, Record, RecordPage, ScoredRecord, SearchCriteria,
};
pub use services::{AssociationType, Auth, HubspotClient};
