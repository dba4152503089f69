// Service exports
pub mod associations;
pub mod client;
pub mod companies;
pub mod tickets;

pub use associations::{Associations, AssociationType};
pub use client::{Auth, HubspotClient, DEFAULT_BASE_URL};
pub use companies::{Companies, CompanyBatchUpdate, ContactIdsPage};
pub use tickets::Tickets;
