//! Measure definition model: simple, period-over-period derived, and
//! arithmetic measures.
//!
//! Each variant serializes as a wrapper object `{"<discriminator>": {...}}`
//! with the discriminator table centralized in [`MeasureDefinition`].

use serde::{Deserialize, Serialize};

use super::filter::FilterItem;
use super::qualifier::{ConversionError, ObjQualifier, ObjQualifierConverter};
use super::ValidationError;

// =============================================================================
// Measure definition sum type
// =============================================================================

/// A measure definition, in any of the supported kinds.
///
/// Derived kinds (`Pop`, `OverPeriod`, `PreviousPeriod`) reference a master
/// measure by its local identifier within the same AFM; that reference is
/// validated at use, not at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureDefinition {
    /// Plain measure over a catalog item, optionally ad-hoc aggregated,
    /// ratio-computed or filtered.
    #[serde(rename = "measure")]
    Simple(SimpleMeasureDefinition),

    /// Period-over-period against a single attribute. Deprecated in favor
    /// of [`MeasureDefinition::OverPeriod`].
    #[serde(rename = "popMeasure")]
    Pop(PopMeasureDefinition),

    /// Period-over-period over one or more date attributes.
    #[serde(rename = "overPeriodMeasure")]
    OverPeriod(OverPeriodMeasureDefinition),

    /// Same-period-previous-period over one or more date data sets.
    #[serde(rename = "previousPeriodMeasure")]
    PreviousPeriod(PreviousPeriodMeasureDefinition),

    /// Arithmetic combination of other measures in the same AFM.
    #[serde(rename = "arithmeticMeasure")]
    Arithmetic(ArithmeticMeasureDefinition),
}

impl MeasureDefinition {
    /// Whether this definition is ad-hoc, i.e. not backed 1:1 by a persisted
    /// catalog metric. Every derived and arithmetic measure is ad-hoc; a
    /// simple measure is ad-hoc once it adds aggregation, ratio computation
    /// or filters.
    pub fn is_ad_hoc(&self) -> bool {
        match self {
            MeasureDefinition::Simple(def) => def.is_ad_hoc(),
            MeasureDefinition::Pop(_)
            | MeasureDefinition::OverPeriod(_)
            | MeasureDefinition::PreviousPeriod(_)
            | MeasureDefinition::Arithmetic(_) => true,
        }
    }

    /// Local identifier of the master measure for derived kinds.
    pub fn derived_from(&self) -> Option<&str> {
        match self {
            MeasureDefinition::Pop(def) => Some(&def.measure_identifier),
            MeasureDefinition::OverPeriod(def) => Some(&def.measure_identifier),
            MeasureDefinition::PreviousPeriod(def) => Some(&def.measure_identifier),
            MeasureDefinition::Simple(_) | MeasureDefinition::Arithmetic(_) => None,
        }
    }

    /// Every object qualifier this definition references, in declaration
    /// order. Arithmetic measures reference only local identifiers and
    /// return nothing.
    pub fn obj_qualifiers(&self) -> Vec<&ObjQualifier> {
        match self {
            MeasureDefinition::Simple(def) => {
                let mut qualifiers = vec![&def.item];
                for filter in &def.filters {
                    qualifiers.extend(filter.obj_qualifier());
                }
                qualifiers
            }
            MeasureDefinition::Pop(def) => def.pop_attribute.iter().collect(),
            MeasureDefinition::OverPeriod(def) => {
                def.date_attributes.iter().map(|a| &a.attribute).collect()
            }
            MeasureDefinition::PreviousPeriod(def) => {
                def.date_data_sets.iter().map(|d| &d.data_set).collect()
            }
            MeasureDefinition::Arithmetic(_) => Vec::new(),
        }
    }

    /// Rewrite every embedded identifier qualifier into URI form, recursing
    /// into nested filters of simple measures. Fails on the first qualifier
    /// the converter cannot resolve.
    ///
    /// Arithmetic measures reference other measures purely by local
    /// identifier and return `self` unchanged; this is a documented no-op,
    /// not a degenerate case of the general rule.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<MeasureDefinition, ConversionError> {
        match self {
            MeasureDefinition::Simple(def) => {
                let filters = def
                    .filters
                    .iter()
                    .map(|f| f.with_uri_qualifiers(converter))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(MeasureDefinition::Simple(SimpleMeasureDefinition {
                    item: def.item.with_uri(converter)?,
                    aggregation: def.aggregation,
                    compute_ratio: def.compute_ratio,
                    filters,
                }))
            }
            MeasureDefinition::Pop(def) => {
                let pop_attribute = match &def.pop_attribute {
                    Some(attr) => Some(attr.with_uri(converter)?),
                    None => None,
                };
                Ok(MeasureDefinition::Pop(PopMeasureDefinition {
                    measure_identifier: def.measure_identifier.clone(),
                    pop_attribute,
                }))
            }
            MeasureDefinition::OverPeriod(def) => {
                let date_attributes = def
                    .date_attributes
                    .iter()
                    .map(|a| {
                        Ok(OverPeriodDateAttribute {
                            attribute: a.attribute.with_uri(converter)?,
                            periods_ago: a.periods_ago,
                        })
                    })
                    .collect::<Result<Vec<_>, ConversionError>>()?;
                Ok(MeasureDefinition::OverPeriod(OverPeriodMeasureDefinition {
                    measure_identifier: def.measure_identifier.clone(),
                    date_attributes,
                }))
            }
            MeasureDefinition::PreviousPeriod(def) => {
                let date_data_sets = def
                    .date_data_sets
                    .iter()
                    .map(|d| {
                        Ok(PreviousPeriodDateDataSet {
                            data_set: d.data_set.with_uri(converter)?,
                            periods_ago: d.periods_ago,
                        })
                    })
                    .collect::<Result<Vec<_>, ConversionError>>()?;
                Ok(MeasureDefinition::PreviousPeriod(
                    PreviousPeriodMeasureDefinition {
                        measure_identifier: def.measure_identifier.clone(),
                        date_data_sets,
                    },
                ))
            }
            MeasureDefinition::Arithmetic(_) => Ok(self.clone()),
        }
    }
}

// =============================================================================
// Simple measure
// =============================================================================

/// A measure over a single catalog item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleMeasureDefinition {
    /// The measured catalog item (metric or fact).
    pub item: ObjQualifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Aggregation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_ratio: Option<bool>,
    /// Measure-scoped filters (attribute and date kinds).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterItem>,
}

impl SimpleMeasureDefinition {
    /// A bare measure over `item`, with no extras.
    pub fn new(item: ObjQualifier) -> Self {
        SimpleMeasureDefinition {
            item,
            aggregation: None,
            compute_ratio: None,
            filters: Vec::new(),
        }
    }

    pub fn with_aggregation(mut self, aggregation: Aggregation) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    pub fn with_compute_ratio(mut self, compute_ratio: bool) -> Self {
        self.compute_ratio = Some(compute_ratio);
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterItem>) -> Self {
        self.filters = filters;
        self
    }

    /// Ad-hoc once any of aggregation, ratio computation or filters is set.
    pub fn is_ad_hoc(&self) -> bool {
        self.aggregation.is_some()
            || self.compute_ratio.unwrap_or(false)
            || !self.filters.is_empty()
    }
}

/// Ad-hoc aggregation applied to a simple measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregation {
    Sum,
    Count,
    Avg,
    Min,
    Max,
    Median,
    Runsum,
}

// =============================================================================
// Derived measures
// =============================================================================

/// Period-over-period against a single attribute.
///
/// Deprecated: new clients emit [`OverPeriodMeasureDefinition`] instead.
/// Kept because stored visualizations still carry it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopMeasureDefinition {
    /// Local identifier of the master measure within the same AFM.
    pub measure_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pop_attribute: Option<ObjQualifier>,
}

impl PopMeasureDefinition {
    pub fn new(measure_identifier: impl Into<String>, pop_attribute: Option<ObjQualifier>) -> Self {
        PopMeasureDefinition {
            measure_identifier: measure_identifier.into(),
            pop_attribute,
        }
    }
}

/// Period-over-period over one or more date attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverPeriodMeasureDefinition {
    /// Local identifier of the master measure within the same AFM.
    pub measure_identifier: String,
    /// Date attributes to shift over. Never empty.
    pub date_attributes: Vec<OverPeriodDateAttribute>,
}

impl OverPeriodMeasureDefinition {
    /// Create an over-period measure. Fails when `date_attributes` is empty.
    pub fn new(
        measure_identifier: impl Into<String>,
        date_attributes: Vec<OverPeriodDateAttribute>,
    ) -> Result<Self, ValidationError> {
        if date_attributes.is_empty() {
            return Err(ValidationError::EmptyField {
                type_name: "OverPeriodMeasureDefinition",
                field: "dateAttributes",
            });
        }
        Ok(OverPeriodMeasureDefinition {
            measure_identifier: measure_identifier.into(),
            date_attributes,
        })
    }
}

/// One date attribute shift of an over-period measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverPeriodDateAttribute {
    pub attribute: ObjQualifier,
    /// Positive shifts into the past, negative into the future.
    pub periods_ago: i32,
}

impl OverPeriodDateAttribute {
    pub fn new(attribute: ObjQualifier, periods_ago: i32) -> Self {
        OverPeriodDateAttribute {
            attribute,
            periods_ago,
        }
    }
}

/// Same-period-previous-period over one or more date data sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodMeasureDefinition {
    /// Local identifier of the master measure within the same AFM.
    pub measure_identifier: String,
    /// Date data sets to shift over. Never empty.
    pub date_data_sets: Vec<PreviousPeriodDateDataSet>,
}

impl PreviousPeriodMeasureDefinition {
    /// Create a previous-period measure. Fails when `date_data_sets` is
    /// empty.
    pub fn new(
        measure_identifier: impl Into<String>,
        date_data_sets: Vec<PreviousPeriodDateDataSet>,
    ) -> Result<Self, ValidationError> {
        if date_data_sets.is_empty() {
            return Err(ValidationError::EmptyField {
                type_name: "PreviousPeriodMeasureDefinition",
                field: "dateDataSets",
            });
        }
        Ok(PreviousPeriodMeasureDefinition {
            measure_identifier: measure_identifier.into(),
            date_data_sets,
        })
    }
}

/// One date data set shift of a previous-period measure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviousPeriodDateDataSet {
    pub data_set: ObjQualifier,
    /// Positive shifts into the past, negative into the future.
    pub periods_ago: i32,
}

impl PreviousPeriodDateDataSet {
    pub fn new(data_set: ObjQualifier, periods_ago: i32) -> Self {
        PreviousPeriodDateDataSet {
            data_set,
            periods_ago,
        }
    }
}

// =============================================================================
// Arithmetic measure
// =============================================================================

/// Arithmetic combination of other measures, referenced by local identifier.
///
/// Known operators: `sum`, `difference`, `product`, `ratio`, `change`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArithmeticMeasureDefinition {
    /// Local identifiers of the operand measures within the same AFM.
    pub measure_identifiers: Vec<String>,
    pub operator: String,
}

impl ArithmeticMeasureDefinition {
    pub fn new(measure_identifiers: Vec<String>, operator: impl Into<String>) -> Self {
        ArithmeticMeasureDefinition {
            measure_identifiers,
            operator: operator.into(),
        }
    }
}
