//! Entities other than [`Destination`], which all map field-for-field to JSON.
use serde::{Deserialize, Deserializer, Serialize};

use crate::destination::Destination;

/// A keystore or certificate stored next to the destinations.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Certificate {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(rename = "Type", alias = "type")]
    pub r#type: String,
    /// Base64 encoded content.
    #[serde(rename = "Content", alias = "content")]
    pub content: String,
}

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AuthToken {
    pub r#type: String,
    pub value: String,
}

/// The level on which a destination is defined.
///
/// The service guarantees that at least one of the fields is set.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Owner {
    #[serde(
        rename = "SubaccountId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub subaccount_id: Option<String>,
    #[serde(rename = "InstanceId", default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
}

/// Everything the service knows about a destination found by name.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationLookupResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub owner: Owner,
    #[serde(
        rename = "destinationConfiguration",
        default,
        deserialize_with = "null_as_default"
    )]
    pub destination: Destination,
    #[serde(default, deserialize_with = "null_as_default")]
    pub certificates: Vec<Certificate>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub auth_tokens: Vec<AuthToken>,
}

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct AffectedRecords {
    #[serde(alias = "Count")]
    pub count: u64,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
