use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::core::{self, PagedSource};
use crate::error::Result;
use crate::models::{
    FuzzyMatch, FuzzySearchOptions, PageCursor, PageOptions, PropertyMatchOptions, PropertyUpdate,
    RecentOptions, Record, RecordPage, ScoredRecord, SearchCriteria,
};
use crate::services::client::HubspotClient;

const COMPANIES_V2: &str = "/companies/v2/companies";
const COMPANIES_V1_BATCH: &str = "/companies/v1/batch-async/update";

/// Properties compared by default in [`Companies::fuzzy_search`]
const DEFAULT_FUZZY_PROPERTIES: [&str; 2] = ["name", "website"];

/// Companies endpoint group
///
/// Covers CRUD, the paged and recent listings, company-contact links
/// and both search flavors (scored property search and fuzzy name
/// search).
pub struct Companies<'a> {
    client: &'a HubspotClient,
}

impl HubspotClient {
    pub fn companies(&self) -> Companies<'_> {
        Companies { client: self }
    }
}

impl Companies<'_> {
    /// One page of the company collection.
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

        let page: CompanyPage = self
            .client
            .get_json(&format!("{}/paged", COMPANIES_V2), &query)
            .await?;

        Ok(page.into())
    }

    pub async fn get_by_id(&self, id: u64) -> Result<Record> {
        self.client
            .get_json(&format!("{}/{}", COMPANIES_V2, id), &[])
            .await
    }

    /// All companies registered under a domain name.
    pub async fn get_by_domain(&self, domain: &str) -> Result<Vec<Record>> {
        let encoded = urlencoding::encode(domain);

        self.client
            .get_json(&format!("{}/domain/{}", COMPANIES_V2, encoded), &[])
            .await
    }

    pub async fn recently_created(&self, options: &RecentOptions) -> Result<RecordPage> {
        self.recent("created", options).await
    }

    pub async fn recently_modified(&self, options: &RecentOptions) -> Result<RecordPage> {
        self.recent("modified", options).await
    }

    async fn recent(&self, kind: &str, options: &RecentOptions) -> Result<RecordPage> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(count) = options.count {
            query.push(("count", count.to_string()));
        }
        if let Some(offset) = &options.offset {
            query.push(("offset", offset.to_string()));
        }
        if let Some(since) = options.since {
            query.push(("since", since.timestamp_millis().to_string()));
        }

        let page: RecentCompanyPage = self
            .client
            .get_json(&format!("{}/recent/{}", COMPANIES_V2, kind), &query)
            .await?;

        Ok(page.into())
    }

    pub async fn create(&self, properties: &[PropertyUpdate]) -> Result<Record> {
        let body = json!({ "properties": properties });

        self.client
            .post_json(&format!("{}/", COMPANIES_V2), &body)
            .await
    }

    pub async fn update(&self, id: u64, properties: &[PropertyUpdate]) -> Result<Record> {
        let body = json!({ "properties": properties });

        self.client
            .put_json(&format!("{}/{}", COMPANIES_V2, id), &body)
            .await
    }

    /// Queue property updates for many companies at once. The API only
    /// acknowledges the batch (202); it applies asynchronously.
    pub async fn update_batch(&self, updates: &[CompanyBatchUpdate]) -> Result<()> {
        let body = serde_json::to_value(updates)?;

        self.client.post(COMPANIES_V1_BATCH, &body).await?;

        Ok(())
    }

    pub async fn delete(&self, id: u64) -> Result<()> {
        self.client
            .delete(&format!("{}/{}", COMPANIES_V2, id))
            .await?;

        Ok(())
    }

    /// Attach a contact to a company.
    pub async fn add_contact(&self, company_id: u64, contact_vid: u64) -> Result<()> {
        self.client
            .put_empty(&format!("{}/{}/contacts/{}", COMPANIES_V2, company_id, contact_vid))
            .await?;

        Ok(())
    }

    /// Ids of the contacts attached to a company.
    ///
    /// The endpoint takes only `count` and `vidOffset`, fed from
    /// `options.limit` and `options.offset`; it has no property
    /// selection, so `options.properties` is ignored.
    pub async fn contact_ids(&self, id: u64, options: &PageOptions) -> Result<ContactIdsPage> {
        let query = contact_query(options);

        self.client
            .get_json(&format!("{}/{}/vids", COMPANIES_V2, id), &query)
            .await
    }

    /// Contacts attached to a company, as records keyed by `vid`.
    ///
    /// As with [`Companies::contact_ids`], only `options.limit` and
    /// `options.offset` apply (as `count` and `vidOffset`); the
    /// endpoint returns its fixed contact projection and
    /// `options.properties` is ignored.
    pub async fn contacts(&self, id: u64, options: &PageOptions) -> Result<RecordPage> {
        let query = contact_query(options);

        let page: ContactsPage = self
            .client
            .get_json(&format!("{}/{}/contacts", COMPANIES_V2, id), &query)
            .await?;

        Ok(page.into())
    }

    /// Scored property search over the company collection.
    pub async fn search_by_properties(
        &self,
        criteria: &SearchCriteria,
        options: &PropertyMatchOptions,
    ) -> Result<Vec<ScoredRecord>> {
        core::match_by_properties(self, criteria, options).await
    }

    /// Scored search on the company name, with default options.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<ScoredRecord>> {
        let criteria = SearchCriteria::new().with("name", name);

        self.search_by_properties(&criteria, &PropertyMatchOptions::default())
            .await
    }

    /// Fuzzy search over the whole company collection. When no search
    /// properties are configured, name and website are compared.
    pub async fn fuzzy_search(
        &self,
        query: &str,
        options: &FuzzySearchOptions,
    ) -> Result<Vec<FuzzyMatch>> {
        let mut options = options.clone();
        if options.search_properties.is_empty() {
            options.search_properties = DEFAULT_FUZZY_PROPERTIES
                .iter()
                .map(|p| p.to_string())
                .collect();
        }

        core::fuzzy_search(self, query, &options).await
    }
}

#[async_trait]
impl PagedSource for Companies<'_> {
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

/// One batch entry for [`Companies::update_batch`]
#[derive(Debug, Clone, Serialize)]
pub struct CompanyBatchUpdate {
    #[serde(rename = "objectId")]
    pub object_id: u64,
    pub properties: Vec<PropertyUpdate>,
}

/// Page of contact ids attached to a company
#[derive(Debug, Clone, Deserialize)]
pub struct ContactIdsPage {
    #[serde(default)]
    pub vids: Vec<u64>,
    #[serde(rename = "hasMore", default)]
    pub has_more: bool,
    #[serde(rename = "vidOffset", default)]
    pub vid_offset: Option<PageCursor>,
}

fn contact_query(options: &PageOptions) -> Vec<(&'static str, String)> {
    let mut query: Vec<(&str, String)> = Vec::new();
    if let Some(limit) = options.limit {
        query.push(("count", limit.to_string()));
    }
    if let Some(offset) = &options.offset {
        query.push(("vidOffset", offset.to_string()));
    }
    query
}

#[derive(Debug, Deserialize)]
struct CompanyPage {
    #[serde(default)]
    companies: Vec<Record>,
    #[serde(rename = "has-more", alias = "hasMore", default)]
    has_more: bool,
    #[serde(default)]
    offset: Option<PageCursor>,
}

impl From<CompanyPage> for RecordPage {
    fn from(page: CompanyPage) -> Self {
        RecordPage {
            records: page.companies,
            has_more: page.has_more,
            offset: page.offset,
            total: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RecentCompanyPage {
    #[serde(default)]
    results: Vec<Record>,
    #[serde(rename = "hasMore", default)]
    has_more: bool,
    #[serde(default)]
    offset: Option<PageCursor>,
    #[serde(default)]
    total: Option<u64>,
}

impl From<RecentCompanyPage> for RecordPage {
    fn from(page: RecentCompanyPage) -> Self {
        RecordPage {
            records: page.results,
            has_more: page.has_more,
            offset: page.offset,
            total: page.total,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ContactsPage {
    #[serde(default)]
    contacts: Vec<Record>,
    #[serde(rename = "hasMore", default)]
    has_more: bool,
    #[serde(rename = "vidOffset", default)]
    vid_offset: Option<PageCursor>,
}

impl From<ContactsPage> for RecordPage {
    fn from(page: ContactsPage) -> Self {
        RecordPage {
            records: page.contacts,
            has_more: page.has_more,
            offset: page.vid_offset,
            total: None,
        }
    }
}
