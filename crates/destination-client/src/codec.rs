//! Mapping between [`Destination`] and the flat object used on the wire.
//!
//! The service has no nested container for custom properties; `Name` and `Type` are reserved keys
//! that sit next to them at the top level. The mapping is lossy in one direction: a custom
//! property that is itself named `Name` or `Type` is replaced when encoding and can never be
//! recovered when decoding.
use std::collections::{BTreeMap, HashMap};

use crate::{
    destination::{Destination, DestinationType},
    error::Error,
};

pub const NAME_KEY: &str = "Name";
pub const TYPE_KEY: &str = "Type";

/// Flatten a destination into the object the service expects.
pub fn encode(destination: &Destination) -> BTreeMap<String, String> {
    let Destination {
        name,
        r#type,
        properties,
    } = destination;
    let mut wire: BTreeMap<String, String> = properties
        .iter()
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect();
    wire.insert(NAME_KEY.to_string(), name.clone());
    wire.insert(TYPE_KEY.to_string(), r#type.as_str().to_string());
    wire
}

/// Lift the reserved keys out of a flat object; every other key becomes a property.
pub fn decode<I>(wire: I) -> Destination
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut destination = Destination {
        name: String::new(),
        r#type: DestinationType::Unknown,
        properties: HashMap::new(),
    };
    for (k, v) in wire {
        match k.as_str() {
            NAME_KEY => destination.name = v,
            TYPE_KEY => destination.r#type = DestinationType::from_wire(&v),
            _ => {
                destination.properties.insert(k, v);
            }
        }
    }
    destination
}

pub fn to_json(destination: &Destination) -> String {
    serde_json::to_string(&encode(destination))
        .expect("A map of strings can always be represented as JSON")
}

/// Parse a flat JSON object of string values.
///
/// Anything else, including nested objects, arrays and numbers, is rejected with
/// [`Error::MalformedPayload`].
pub fn from_json(text: &str) -> Result<Destination, Error> {
    let wire: BTreeMap<String, String> = serde_json::from_str(text)?;
    Ok(decode(wire))
}
