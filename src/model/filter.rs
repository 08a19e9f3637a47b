//! Filter model: tagged union of attribute, date, measure-value and ranking
//! filters, plus the legacy expression filter.
//!
//! Each variant serializes as a wrapper object `{"<discriminator>": {...}}`.
//! The discriminator table lives in the [`FilterItem`] enum so adding a kind
//! is a compile-time-checked change everywhere filters are matched.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::qualifier::{ConversionError, ObjQualifier, ObjQualifierConverter};
use super::ValidationError;

// =============================================================================
// Filter sum type
// =============================================================================

/// A filter, in any of the supported kinds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FilterItem {
    /// Keep only the selected attribute elements.
    #[serde(rename = "positiveAttributeFilter")]
    PositiveAttribute(PositiveAttributeFilter),

    /// Exclude the selected attribute elements.
    #[serde(rename = "negativeAttributeFilter")]
    NegativeAttribute(NegativeAttributeFilter),

    /// Fixed date range on a date data set.
    #[serde(rename = "absoluteDateFilter")]
    AbsoluteDate(AbsoluteDateFilter),

    /// Rolling date range on a date data set.
    #[serde(rename = "relativeDateFilter")]
    RelativeDate(RelativeDateFilter),

    /// Condition on a computed measure value.
    #[serde(rename = "measureValueFilter")]
    MeasureValue(MeasureValueFilter),

    /// Top/bottom ranking by one or more measures.
    #[serde(rename = "rankingFilter")]
    Ranking(RankingFilter),

    /// Legacy opaque filter expression.
    #[serde(rename = "expression")]
    Expression(ExpressionFilter),
}

impl FilterItem {
    /// The single object qualifier this filter applies to, for the kinds
    /// that have one. Measure-value, ranking and expression filters are not
    /// tied to a single object and return `None`.
    pub fn obj_qualifier(&self) -> Option<&ObjQualifier> {
        match self {
            FilterItem::PositiveAttribute(f) => Some(&f.display_form),
            FilterItem::NegativeAttribute(f) => Some(&f.display_form),
            FilterItem::AbsoluteDate(f) => Some(&f.data_set),
            FilterItem::RelativeDate(f) => Some(&f.data_set),
            FilterItem::MeasureValue(_) | FilterItem::Ranking(_) | FilterItem::Expression(_) => {
                None
            }
        }
    }

    /// Rewrite every embedded identifier qualifier into URI form.
    ///
    /// Multi-qualifier kinds (ranking) apply the rule to each embedded
    /// qualifier independently and fail on the first unresolved one.
    /// Expression filters carry no qualifier and return `self` unchanged;
    /// this is a documented no-op, not a fallback.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<FilterItem, ConversionError> {
        match self {
            FilterItem::PositiveAttribute(f) => {
                Ok(FilterItem::PositiveAttribute(PositiveAttributeFilter {
                    display_form: f.display_form.with_uri(converter)?,
                    elements: f.elements.clone(),
                }))
            }
            FilterItem::NegativeAttribute(f) => {
                Ok(FilterItem::NegativeAttribute(NegativeAttributeFilter {
                    display_form: f.display_form.with_uri(converter)?,
                    elements: f.elements.clone(),
                }))
            }
            FilterItem::AbsoluteDate(f) => Ok(FilterItem::AbsoluteDate(AbsoluteDateFilter {
                data_set: f.data_set.with_uri(converter)?,
                ..f.clone()
            })),
            FilterItem::RelativeDate(f) => Ok(FilterItem::RelativeDate(RelativeDateFilter {
                data_set: f.data_set.with_uri(converter)?,
                ..f.clone()
            })),
            FilterItem::MeasureValue(f) => Ok(FilterItem::MeasureValue(MeasureValueFilter {
                measure: f.measure.with_uri(converter)?,
                condition: f.condition.clone(),
            })),
            FilterItem::Ranking(f) => Ok(FilterItem::Ranking(f.with_uri_qualifiers(converter)?)),
            FilterItem::Expression(_) => Ok(self.clone()),
        }
    }
}

// =============================================================================
// Attribute filters
// =============================================================================

/// Keeps rows whose attribute value is among the selected elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositiveAttributeFilter {
    /// Display form of the filtered attribute.
    pub display_form: ObjQualifier,
    /// Selected elements.
    #[serde(rename = "in")]
    pub elements: AttributeFilterElements,
}

impl PositiveAttributeFilter {
    pub fn new(display_form: ObjQualifier, elements: AttributeFilterElements) -> Self {
        PositiveAttributeFilter {
            display_form,
            elements,
        }
    }
}

/// Excludes rows whose attribute value is among the selected elements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NegativeAttributeFilter {
    /// Display form of the filtered attribute.
    pub display_form: ObjQualifier,
    /// Excluded elements.
    #[serde(rename = "notIn")]
    pub elements: AttributeFilterElements,
}

impl NegativeAttributeFilter {
    pub fn new(display_form: ObjQualifier, elements: AttributeFilterElements) -> Self {
        NegativeAttributeFilter {
            display_form,
            elements,
        }
    }

    /// An empty exclusion list means every element is selected, i.e. the
    /// filter has no effect.
    pub fn is_all_selected(&self) -> bool {
        self.elements.is_empty()
    }
}

/// Elements of an attribute filter, referenced by URI or by textual value.
///
/// Serializes as `{"uris": [...]}` or `{"values": [...]}`. For backward
/// compatibility the decoder also accepts the legacy encoding, a bare array
/// of element URIs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum AttributeFilterElements {
    #[serde(rename = "uris")]
    Uris(Vec<String>),
    #[serde(rename = "values")]
    Values(Vec<String>),
}

impl AttributeFilterElements {
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        match self {
            AttributeFilterElements::Uris(items) => items.len(),
            AttributeFilterElements::Values(items) => items.len(),
        }
    }
}

impl<'de> Deserialize<'de> for AttributeFilterElements {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Uris { uris: Vec<String> },
            Values { values: Vec<String> },
            /// Legacy flat array of element URIs.
            Legacy(Vec<String>),
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Uris { uris } => AttributeFilterElements::Uris(uris),
            Repr::Values { values } => AttributeFilterElements::Values(values),
            Repr::Legacy(uris) => AttributeFilterElements::Uris(uris),
        })
    }
}

// =============================================================================
// Date filters
// =============================================================================

/// Fixed date range on a date data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbsoluteDateFilter {
    /// The date data set the range applies to.
    pub data_set: ObjQualifier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<NaiveDate>,
}

impl AbsoluteDateFilter {
    pub fn new(data_set: ObjQualifier, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        AbsoluteDateFilter { data_set, from, to }
    }

    /// A missing bound on either side means "all time".
    pub fn is_all_time(&self) -> bool {
        self.from.is_none() || self.to.is_none()
    }
}

/// Rolling date range on a date data set, in whole periods of `granularity`
/// relative to today (0 = current period, negative = past).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelativeDateFilter {
    /// The date data set the range applies to.
    pub data_set: ObjQualifier,
    /// Period granularity, e.g. `GDC.time.month`. Never empty.
    pub granularity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<i32>,
}

impl RelativeDateFilter {
    pub fn new(
        data_set: ObjQualifier,
        granularity: impl Into<String>,
        from: Option<i32>,
        to: Option<i32>,
    ) -> Self {
        RelativeDateFilter {
            data_set,
            granularity: granularity.into(),
            from,
            to,
        }
    }

    /// A missing bound on either side means "all time".
    pub fn is_all_time(&self) -> bool {
        self.from.is_none() || self.to.is_none()
    }
}

// =============================================================================
// Measure value filter
// =============================================================================

/// Condition on the computed value of a measure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureValueFilter {
    /// The measure the condition applies to (by local identifier qualifier
    /// or object qualifier).
    pub measure: ObjQualifier,
    /// Absent condition means the filter is a placeholder with no effect.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<MeasureValueFilterCondition>,
}

impl MeasureValueFilter {
    pub fn new(measure: ObjQualifier, condition: Option<MeasureValueFilterCondition>) -> Self {
        MeasureValueFilter { measure, condition }
    }
}

/// Comparison against a single bound or containment in a range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasureValueFilterCondition {
    #[serde(rename = "comparison")]
    Comparison(ComparisonCondition),
    #[serde(rename = "range")]
    Range(RangeCondition),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonCondition {
    pub operator: ComparisonOperator,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComparisonOperator {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
    Neq,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeCondition {
    pub operator: RangeOperator,
    pub from: f64,
    pub to: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RangeOperator {
    Between,
    NotBetween,
}

// =============================================================================
// Ranking filter
// =============================================================================

/// Keeps the top or bottom `value` rows ranked by one or more measures,
/// optionally within groups given by `attributes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankingFilter {
    /// Measures the ranking is computed from. Never empty.
    pub measures: Vec<ObjQualifier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Vec<ObjQualifier>>,
    pub operator: RankingOperator,
    pub value: i32,
}

impl RankingFilter {
    /// Create a ranking filter. Fails when `measures` is empty.
    pub fn new(
        measures: Vec<ObjQualifier>,
        operator: RankingOperator,
        value: i32,
    ) -> Result<Self, ValidationError> {
        if measures.is_empty() {
            return Err(ValidationError::EmptyField {
                type_name: "RankingFilter",
                field: "measures",
            });
        }
        Ok(RankingFilter {
            measures,
            attributes: None,
            operator,
            value,
        })
    }

    /// Restrict the ranking to groups given by these attributes.
    pub fn with_attributes(mut self, attributes: Vec<ObjQualifier>) -> Self {
        self.attributes = Some(attributes);
        self
    }

    /// Rewrite every embedded identifier qualifier, failing on the first
    /// one the converter cannot resolve.
    pub fn with_uri_qualifiers(
        &self,
        converter: &impl ObjQualifierConverter,
    ) -> Result<RankingFilter, ConversionError> {
        let measures = self
            .measures
            .iter()
            .map(|q| q.with_uri(converter))
            .collect::<Result<Vec<_>, _>>()?;
        let attributes = match &self.attributes {
            Some(attrs) => Some(
                attrs
                    .iter()
                    .map(|q| q.with_uri(converter))
                    .collect::<Result<Vec<_>, _>>()?,
            ),
            None => None,
        };
        Ok(RankingFilter {
            measures,
            attributes,
            operator: self.operator,
            value: self.value,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RankingOperator {
    Top,
    Bottom,
}

impl FromStr for RankingOperator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("top") {
            Ok(RankingOperator::Top)
        } else if s.eq_ignore_ascii_case("bottom") {
            Ok(RankingOperator::Bottom)
        } else {
            Err(ValidationError::UnknownRankingOperator(s.to_string()))
        }
    }
}

// =============================================================================
// Expression filter (legacy)
// =============================================================================

/// Opaque filter expression kept for backward compatibility. The core never
/// inspects the value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionFilter {
    pub value: String,
}

impl ExpressionFilter {
    pub fn new(value: impl Into<String>) -> Self {
        ExpressionFilter {
            value: value.into(),
        }
    }
}
