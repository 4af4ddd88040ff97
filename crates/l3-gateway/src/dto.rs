use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AggregationLevel {
    Global,
    Vault,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntityDetailsRequest {
    pub addresses: Vec<String>,
    pub aggregation_level: AggregationLevel,
    pub opt_ins: EntityDetailsOptIns,
}

/// Optional response parts. The gateway leaves non-fungible ids out of vaults unless asked.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct EntityDetailsOptIns {
    pub non_fungible_include_nfids: bool,
}

impl EntityDetailsRequest {
    /// Vault-aggregated details of `address`, with the local ids of held non-fungibles.
    pub fn vault_aggregated(address: &str) -> Self {
        Self {
            addresses: vec![address.to_string()],
            aggregation_level: AggregationLevel::Vault,
            opt_ins: EntityDetailsOptIns {
                non_fungible_include_nfids: true,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NonFungibleDataRequest {
    pub resource_address: String,
    pub non_fungible_ids: Vec<String>,
}

// ============================================================================
// Entity details
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct EntityDetailsResponse {
    #[serde(default)]
    pub items: Vec<EntityDetails>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EntityDetails {
    pub address: String,
    #[serde(default)]
    pub fungible_resources: FungibleResources,
    #[serde(default)]
    pub non_fungible_resources: NonFungibleResources,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FungibleResources {
    #[serde(default)]
    pub items: Vec<FungibleResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FungibleResource {
    pub resource_address: String,
    #[serde(default)]
    pub vaults: FungibleVaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FungibleVaults {
    #[serde(default)]
    pub items: Vec<FungibleVault>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FungibleVault {
    pub vault_address: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NonFungibleResources {
    #[serde(default)]
    pub items: Vec<NonFungibleResource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonFungibleResource {
    pub resource_address: String,
    #[serde(default)]
    pub vaults: NonFungibleVaults,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NonFungibleVaults {
    #[serde(default)]
    pub items: Vec<NonFungibleVault>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NonFungibleVault {
    pub vault_address: String,
    #[serde(default)]
    pub total_count: u64,
    /// Local ids held in the vault.
    #[serde(default)]
    pub items: Vec<String>,
}

/// Identity of a single non-fungible held by an account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonFungibleGlobalId {
    pub resource_address: String,
    pub local_id: String,
}

impl EntityDetails {
    /// First non-fungible of `resource_address` held by the entity, if any.
    pub fn first_non_fungible(&self, resource_address: &str) -> Option<NonFungibleGlobalId> {
        let resource = self
            .non_fungible_resources
            .items
            .iter()
            .find(|r| r.resource_address == resource_address)?;
        let local_id = resource.vaults.items.first()?.items.first()?;

        Some(NonFungibleGlobalId {
            resource_address: resource.resource_address.clone(),
            local_id: local_id.clone(),
        })
    }

    /// Sum of all vault amounts for a fungible resource. Zero when the entity doesn't hold it.
    pub fn fungible_balance(&self, resource_address: &str) -> Result<Decimal, GatewayError> {
        let Some(resource) = self
            .fungible_resources
            .items
            .iter()
            .find(|r| r.resource_address == resource_address)
        else {
            return Ok(Decimal::ZERO);
        };

        resource
            .vaults
            .items
            .iter()
            .try_fold(Decimal::ZERO, |acc, vault| {
                let amount = Decimal::from_str(vault.amount.trim()).map_err(|_| {
                    GatewayError::InvalidAmount {
                        resource_address: resource_address.to_string(),
                        value: vault.amount.clone(),
                    }
                })?;
                Ok(acc + amount)
            })
    }
}

// ============================================================================
// Non-fungible data
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct NonFungibleDataResponse {
    pub resource_address: String,
    #[serde(default)]
    pub non_fungible_ids: Vec<NonFungibleDataItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NonFungibleDataItem {
    pub non_fungible_id: String,
    #[serde(default)]
    pub is_burned: bool,
    pub data: Option<NonFungibleData>,
}

/// Data document of a non-fungible, as a tree of named fields.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NonFungibleData {
    pub programmatic_json: ProgrammaticJson,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgrammaticJson {
    #[serde(default)]
    pub kind: String,
    #[serde(default)]
    pub fields: Vec<ProgrammaticField>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgrammaticField {
    #[serde(default)]
    pub kind: String,
    pub field_name: Option<String>,
    /// Only populated for `Map` fields.
    #[serde(default)]
    pub entries: Vec<MapEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapEntry {
    pub key: ScalarValue,
    pub value: ScalarValue,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalarValue {
    #[serde(default)]
    pub kind: String,
    pub value: String,
}

impl ProgrammaticJson {
    pub fn field(&self, name: &str) -> Option<&ProgrammaticField> {
        self.fields
            .iter()
            .find(|f| f.field_name.as_deref() == Some(name))
    }
}
