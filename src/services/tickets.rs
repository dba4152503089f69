use async_trait::async_trait;
use serde::Deserialize;

use crate::core::{self, PagedSource};
use crate::error::Result;
use crate::models::{
    PageCursor, PageOptions, PropertyMatchOptions, PropertyUpdate, Record, RecordPage,
    ScoredRecord, SearchCriteria,
};
use crate::services::client::HubspotClient;

const TICKETS_V1: &str = "/crm-objects/v1/objects/tickets";

/// Tickets endpoint group
///
/// Same record shape as companies but a different wire dialect: the
/// paged listing keys its records as `objects`, create and update take
/// the bare property array as the body, and delete answers 204.
pub struct Tickets<'a> {
    client: &'a HubspotClient,
}

impl HubspotClient {
    pub fn tickets(&self) -> Tickets<'_> {
        Tickets { client: self }
    }
}

impl Tickets<'_> {
    /// One page of the ticket collection.
    pub async fn page(&self, options: &PageOptions) -> Result<RecordPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(limit) = options.limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = &options.offset {
            query.push(("offset", offset.to_string()));
        }
        for property in &options.properties {
            query.push(("properties", property.clone()));
        }

        let page: TicketPage = self
            .client
            .get_json(&format!("{}/paged", TICKETS_V1), &query)
            .await?;

        Ok(page.into())
    }

    /// A single ticket, carrying the requested properties.
    pub async fn get_by_id(&self, id: u64, properties: &[String]) -> Result<Record> {
        let query: Vec<(&str, String)> = properties
            .iter()
            .map(|p| ("properties", p.clone()))
            .collect();

        self.client
            .get_json(&format!("{}/{}", TICKETS_V1, id), &query)
            .await
    }

    pub async fn create(&self, properties: &[PropertyUpdate]) -> Result<Record> {
        // The ticket create body is the property array itself
        let body = serde_json::to_value(properties)?;

        self.client.post_json(TICKETS_V1, &body).await
    }

    pub async fn update(&self, id: u64, properties: &[PropertyUpdate]) -> Result<Record> {
        let body = serde_json::to_value(properties)?;

        self.client
            .put_json(&format!("{}/{}", TICKETS_V1, id), &body)
            .await
    }

    /// Delete a ticket. The API answers 204 with no body.
    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", TICKETS_V1, id))
            .await?;

        Ok(())
    }

    /// Scored property search over the ticket collection.
    pub async fn search_by_properties(
        &self,
        criteria: &SearchCriteria,
        options: &PropertyMatchOptions,
    ) -> Result<Vec<ScoredRecord>> {
        core::match_by_properties(self, criteria, options).await
    }
}

#[async_trait]
impl PagedSource for Tickets<'_> {
    async fn fetch_page(
        &self,
        properties: &[String],
        offset: Option<&PageCursor>,
    ) -> Result<RecordPage> {
        let options = PageOptions {
            limit: None,
            offset: offset.cloned(),
            properties: properties.to_vec(),
        };

        self.page(&options).await
    }
}

#[derive(Debug, Deserialize)]
struct TicketPage {
    #[serde(default)]
    objects: Vec<Record>,
    #[serde(rename = "has-more", alias = "hasMore", default)]
    has_more: bool,
    #[serde(default)]
    offset: Option<PageCursor>,
}

impl From<TicketPage> for RecordPage {
    fn from(page: TicketPage) -> Self {
        RecordPage {
            records: page.objects,
            has_more: page.has_more,
            offset: page.offset,
            total: None,
        }
    }
}
