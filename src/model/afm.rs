//! The AFM aggregate: attributes, filters, measures and native totals of a
//! single execution request, cross-referenced by local identifier.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::filter::FilterItem;
use super::measure::MeasureDefinition;
use super::qualifier::{ConversionError, ObjQualifier, ObjQualifierConverter};

/// An execution request body: what to compute, filtered how.
///
/// Attributes and measures are referenced elsewhere (totals, sort locators,
/// derived measures) through their local identifiers. No two attributes and
/// no two measures may share a local identifier; that uniqueness is a caller
/// invariant rather than something enforced on every mutation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Afm {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attributes: Vec<AttributeItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub measures: Vec<MeasureItem>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub native_totals: Vec<NativeTotalItem>,
}

impl Afm {
    /// An empty AFM.
    pub fn new() -> Self {
        Afm::default()
    }

    pub fn add_attribute(&mut self, attribute: AttributeItem) {
        self.attributes.push(attribute);
    }

    pub fn add_filter(&mut self, filter: FilterItem) {
        self.filters.push(filter);
    }

    pub fn add_measure(&mut self, measure: MeasureItem) {
        self.measures.push(measure);
    }

    pub fn add_native_total(&mut self, total: NativeTotalItem) {
        self.native_totals.push(total);
    }

    /// Look up an attribute by local identifier.
    ///
    /// A miss is a programming error in the caller (a dangling local
    /// reference), so it fails with [`NotFoundError`] rather than `None`.
    pub fn get_attribute(&self, local_identifier: &str) -> Result<&AttributeItem, NotFoundError> {
        self.attributes
            .iter()
            .find(|a| a.local_identifier == local_identifier)
            .ok_or_else(|| NotFoundError::Attribute(local_identifier.to_string()))
    }

    /// Look up a measure by local identifier. Fails like
    /// [`Afm::get_attribute`] on a miss.
    pub fn get_measure(&self, local_identifier: &str) -> Result<&MeasureItem, NotFoundError> {
        self.measures
            .iter()
            .find(|m| m.local_identifier == local_identifier)
            .ok_or_else(|| NotFoundError::Measure(local_identifier.to_string()))
    }

    /// Rewrite every identifier qualifier in the tree (attribute display
    /// forms, filters, measure definitions and their nested filters) into
    /// URI form, failing on the first one the converter cannot resolve.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<Afm, ConversionError> {
        Ok(Afm {
            attributes: self
                .attributes
                .iter()
                .map(|a| a.with_uri_qualifiers(converter))
                .collect::<Result<Vec<_>, _>>()?,
            filters: self
                .filters
                .iter()
                .map(|f| f.with_uri_qualifiers(converter))
                .collect::<Result<Vec<_>, _>>()?,
            measures: self
                .measures
                .iter()
                .map(|m| m.with_uri_qualifiers(converter))
                .collect::<Result<Vec<_>, _>>()?,
            native_totals: self.native_totals.clone(),
        })
    }
}

/// An attribute of the execution, addressed through its display form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeItem {
    pub display_form: ObjQualifier,
    pub local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl AttributeItem {
    pub fn new(display_form: ObjQualifier, local_identifier: impl Into<String>) -> Self {
        AttributeItem {
            display_form,
            local_identifier: local_identifier.into(),
            alias: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Rewrite the display form into URI form.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<AttributeItem, ConversionError> {
        Ok(AttributeItem {
            display_form: self.display_form.with_uri(converter)?,
            local_identifier: self.local_identifier.clone(),
            alias: self.alias.clone(),
        })
    }
}

/// A measure of the execution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureItem {
    pub definition: MeasureDefinition,
    pub local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl MeasureItem {
    pub fn new(definition: MeasureDefinition, local_identifier: impl Into<String>) -> Self {
        MeasureItem {
            definition,
            local_identifier: local_identifier.into(),
            alias: None,
            format: None,
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Rewrite the definition's qualifiers into URI form.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<MeasureItem, ConversionError> {
        Ok(MeasureItem {
            definition: self.definition.with_uri_qualifiers(converter)?,
            local_identifier: self.local_identifier.clone(),
            alias: self.alias.clone(),
            format: self.format.clone(),
        })
    }
}

/// A native (server-computed) total over a measure, grouped by attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NativeTotalItem {
    /// Local identifier of the totaled measure.
    pub measure_identifier: String,
    /// Local identifiers of the grouping attributes; empty for a grand
    /// total.
    pub attribute_identifiers: Vec<String>,
}

impl NativeTotalItem {
    pub fn new(
        measure_identifier: impl Into<String>,
        attribute_identifiers: Vec<String>,
    ) -> Self {
        NativeTotalItem {
            measure_identifier: measure_identifier.into(),
            attribute_identifiers,
        }
    }
}

/// A local-identifier lookup missed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("no attribute with local identifier '{0}' in the AFM")]
    Attribute(String),
    #[error("no measure with local identifier '{0}' in the AFM")]
    Measure(String),
}
