//! The [`Destination`] type and the names of the properties commonly set on it.
use std::{
    collections::{BTreeMap, HashMap},
    fmt::{Display, Formatter},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec;

/// The kind of connection a destination describes.
///
/// Values not known to this crate decode to [`DestinationType::Unknown`] so that new types added
/// by the service do not break older clients.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum DestinationType {
    Http,
    Rfc,
    Mail,
    Ldap,
    #[default]
    Unknown,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Http => "HTTP",
            DestinationType::Rfc => "RFC",
            DestinationType::Mail => "MAIL",
            DestinationType::Ldap => "LDAP",
            DestinationType::Unknown => "",
        }
    }

    /// Map the wire representation to a type, falling back to [`DestinationType::Unknown`].
    pub fn from_wire(s: &str) -> Self {
        match s {
            "HTTP" => DestinationType::Http,
            "RFC" => DestinationType::Rfc,
            "MAIL" => DestinationType::Mail,
            "LDAP" => DestinationType::Ldap,
            _ => DestinationType::Unknown,
        }
    }
}

impl Display for DestinationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.as_str().fmt(f)
    }
}

/// A named, typed connection profile.
///
/// On the wire a destination is a single flat object where `Name` and `Type` are siblings of
/// the custom properties; see [`codec`] for the details of the mapping.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Destination {
    pub name: String,
    pub r#type: DestinationType,
    pub properties: HashMap<String, String>,
}

impl Destination {
    pub fn new(name: impl ToString, r#type: DestinationType) -> Self {
        Self {
            name: name.to_string(),
            r#type,
            properties: HashMap::new(),
        }
    }

    /// Sets a custom property.
    ///
    /// Note that properties named `Name` or `Type` are replaced by the fields of the same name
    /// when the destination is sent.
    pub fn with_property(mut self, key: impl ToString, value: impl ToString) -> Self {
        self.properties.insert(key.to_string(), value.to_string());
        self
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }
}

impl Serialize for Destination {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        codec::encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Destination {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        BTreeMap::<String, String>::deserialize(deserializer).map(codec::decode)
    }
}

/// Names and values of well-known destination properties.
pub mod properties {
    pub const DESCRIPTION: &str = "Description";
    pub const AUTHENTICATION: &str = "Authentication";
    pub const PROXY_TYPE: &str = "ProxyType";
    pub const URL: &str = "URL";
    pub const LOCATION_ID: &str = "LocationID";
    pub const USER: &str = "User";
    pub const PASSWORD: &str = "Password";
    pub const REPOSITORY_USER: &str = "RepositoryUser";
    pub const REPOSITORY_PASSWORD: &str = "RepositoryPassword";

    /// Values accepted by the [`AUTHENTICATION`] property.
    pub mod authentication {
        pub const APP_TO_APP_SSO: &str = "AppToAppSSO";
        pub const BASIC: &str = "BasicAuthentication";
        pub const CLIENT_CERTIFICATE: &str = "ClientCertificateAuthentication";
        pub const NONE: &str = "NoAuthentication";
        pub const OAUTH2_CLIENT_CREDENTIALS: &str = "OAuth2ClientCredentials";
        pub const OAUTH2_SAML_BEARER_ASSERTION: &str = "OAuth2SAMLBearerAssertion";
        pub const OAUTH2_USER_TOKEN_EXCHANGE: &str = "OAuth2UserTokenExchange";
        pub const SAP_ASSERTION_SSO: &str = "SAPAssertionSSO";
    }

    /// Values accepted by the [`PROXY_TYPE`] property.
    pub mod proxy_type {
        pub const INTERNET: &str = "Internet";
        pub const ON_PREMISE: &str = "OnPremise";
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_type_survives_the_wire_mapping() {
        for t in [
            DestinationType::Http,
            DestinationType::Rfc,
            DestinationType::Mail,
            DestinationType::Ldap,
            DestinationType::Unknown,
        ] {
            assert_eq!(DestinationType::from_wire(t.as_str()), t);
        }
    }

    #[test]
    fn type_mapping_is_case_sensitive() {
        assert_eq!(DestinationType::from_wire("http"), DestinationType::Unknown);
        assert_eq!(DestinationType::from_wire("Mail"), DestinationType::Unknown);
    }

    #[test]
    fn builder_sets_properties() {
        let d = Destination::new("d1", DestinationType::Http)
            .with_property(properties::URL, "https://example.com")
            .with_property(properties::AUTHENTICATION, properties::authentication::NONE);
        assert_eq!(d.property(properties::URL), Some("https://example.com"));
        assert_eq!(d.property(properties::AUTHENTICATION), Some("NoAuthentication"));
        assert_eq!(d.property(properties::PROXY_TYPE), None);
    }

    #[test]
    fn embedded_destinations_use_the_flat_form() {
        #[derive(Deserialize, Serialize)]
        struct Wrapper {
            inner: Destination,
        }
        let w: Wrapper =
            serde_json::from_str(r#"{"inner":{"Name":"d1","Type":"LDAP","x":"y"}}"#).unwrap();
        assert_eq!(w.inner.name, "d1");
        assert_eq!(w.inner.r#type, DestinationType::Ldap);
        assert_eq!(w.inner.property("x"), Some("y"));
        assert_eq!(
            serde_json::to_value(&w).unwrap(),
            serde_json::json!({"inner":{"Name":"d1","Type":"LDAP","x":"y"}})
        );
    }
}
