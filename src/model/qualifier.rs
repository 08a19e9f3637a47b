//! References to catalog objects, by stable identifier or absolute URI.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// A reference to a catalog object.
///
/// An object is addressed either by its stable identifier or by its absolute
/// URI. The two forms never mix: qualifiers are equal only within the same
/// variant, even when the wrapped strings match.
///
/// On the wire the two forms are distinguished structurally, not by a
/// discriminator key: `{"identifier": "attr.region"}` vs
/// `{"uri": "/projects/p1/obj/42"}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjQualifier {
    /// Stable identifier, e.g. `attr.customer.region`.
    #[serde(rename = "identifier")]
    Identifier(String),
    /// Absolute URI, e.g. `/projects/p1/obj/42`.
    #[serde(rename = "uri")]
    Uri(String),
}

impl ObjQualifier {
    /// Create an identifier qualifier.
    pub fn identifier(id: impl Into<String>) -> Self {
        ObjQualifier::Identifier(id.into())
    }

    /// Create a URI qualifier.
    pub fn uri(uri: impl Into<String>) -> Self {
        ObjQualifier::Uri(uri.into())
    }

    /// Check if this is an identifier qualifier.
    pub fn is_identifier(&self) -> bool {
        matches!(self, ObjQualifier::Identifier(_))
    }

    /// Check if this is a URI qualifier.
    pub fn is_uri(&self) -> bool {
        matches!(self, ObjQualifier::Uri(_))
    }

    /// The wrapped identifier or URI string.
    pub fn as_str(&self) -> &str {
        match self {
            ObjQualifier::Identifier(id) => id,
            ObjQualifier::Uri(uri) => uri,
        }
    }

    /// Rewrite this qualifier into URI form.
    ///
    /// A URI qualifier is returned unchanged. An identifier qualifier is
    /// resolved through `converter`; when the converter has no mapping the
    /// rewrite fails with [`ConversionError`] naming the identifier.
    pub fn with_uri(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<ObjQualifier, ConversionError> {
        match self {
            ObjQualifier::Uri(_) => Ok(self.clone()),
            ObjQualifier::Identifier(id) => converter
                .uri_for(id)
                .map(ObjQualifier::Uri)
                .ok_or_else(|| ConversionError {
                    identifier: id.clone(),
                }),
        }
    }
}

/// Resolves identifier qualifiers to URIs.
///
/// Typically backed by a remote identifier lookup; the core never performs
/// that I/O itself. Returning `None` means no mapping exists, which makes
/// the qualifier rewrite fail with [`ConversionError`].
pub trait ObjQualifierConverter {
    /// The URI for `identifier`, or `None` when the object is unknown.
    fn uri_for(&self, identifier: &str) -> Option<String>;
}

impl<F> ObjQualifierConverter for F
where
    F: Fn(&str) -> Option<String>,
{
    fn uri_for(&self, identifier: &str) -> Option<String> {
        self(identifier)
    }
}

impl ObjQualifierConverter for HashMap<String, String> {
    fn uri_for(&self, identifier: &str) -> Option<String> {
        self.get(identifier).cloned()
    }
}

/// An identifier qualifier could not be resolved to a URI.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("no URI mapping for identifier qualifier '{identifier}'")]
pub struct ConversionError {
    /// The identifier the converter declined to resolve.
    pub identifier: String,
}
