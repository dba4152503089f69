use serde_json::json;

use crate::error::Result;
use crate::services::client::HubspotClient;

const ASSOCIATIONS_V1: &str = "/crm-associations/v1/associations/";

/// CRM associations endpoint group
///
/// Links CRM objects to each other (contact to company, ticket to
/// deal, ...). Only creation is exposed; the API treats a repeated
/// create as an update.
pub struct Associations<'a> {
    client: &'a HubspotClient,
}

impl HubspotClient {
    pub fn associations(&self) -> Associations<'_> {
        Associations { client: self }
    }
}

impl Associations<'_> {
    /// Associate two objects. Directionality matters: `from_id` must be
    /// the object on the left of the association type's name.
    pub async fn create(
        &self,
        from_id: u64,
        to_id: u64,
        association_type: AssociationType,
    ) -> Result<()> {
        let body = json!({
            "fromObjectId": from_id,
            "toObjectId": to_id,
            "category": "HUBSPOT_DEFINED",
            "definitionId": association_type.definition_id(),
        });

        self.client.put(ASSOCIATIONS_V1, &body).await?;

        Ok(())
    }
}

/// HubSpot-defined association types
///
/// The discriminants are the definition ids the API expects. The gaps
/// in the numbering are the API's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum AssociationType {
    ContactToCompany = 1,
    CompanyToContact = 2,
    DealToContact = 3,
    ContactToDeal = 4,
    DealToCompany = 5,
    CompanyToDeal = 6,
    CompanyToEngagement = 7,
    EngagementToCompany = 8,
    ContactToEngagement = 9,
    EngagementToContact = 10,
    DealToEngagement = 11,
    EngagementToDeal = 12,
    ParentCompanyToChildCompany = 13,
    ChildCompanyToParentCompany = 14,
    ContactToTicket = 15,
    TicketToContact = 16,
    TicketToEngagement = 17,
    EngagementToTicket = 18,
    DealToLineItem = 19,
    LineItemToDeal = 20,
    CompanyToTicket = 25,
    TicketToCompany = 26,
    DealToTicket = 27,
    TicketToDeal = 28,
    AdvisorToCompany = 33,
    CompanyToAdvisor = 34,
    BoardMemberToCompany = 35,
    CompanyToBoardMember = 36,
    ContractorToCompany = 37,
    CompanyToContractor = 38,
    ManagerToCompany = 39,
    CompanyToManager = 40,
    BusinessOwnerToCompany = 41,
    CompanyToBusinessOwner = 42,
    PartnerToCompany = 43,
    CompanyToPartner = 44,
    ResellerToCompany = 45,
    CompanyToReseller = 46,
}

impl AssociationType {
    /// Numeric definition id sent on the wire.
    pub fn definition_id(self) -> u32 {
        self as u32
    }
}
