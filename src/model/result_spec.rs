//! Result spec: the multi-dimensional layout and sort order of an execution
//! result.

use serde::{Deserialize, Serialize};

/// Sentinel dimension item standing for "all measures" in a result layout.
pub const MEASURE_GROUP: &str = "measureGroup";

/// Layout and ordering of an execution result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSpec {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<Dimension>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<SortItem>,
}

impl ResultSpec {
    pub fn new(dimensions: Vec<Dimension>, sorts: Vec<SortItem>) -> Self {
        ResultSpec { dimensions, sorts }
    }
}

/// One result dimension: an ordered list of attribute local identifiers,
/// possibly including the [`MEASURE_GROUP`] marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dimension {
    pub item_identifiers: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<Vec<TotalItem>>,
}

impl Dimension {
    pub fn new(item_identifiers: Vec<String>) -> Self {
        Dimension {
            item_identifiers,
            totals: None,
        }
    }

    /// A dimension holding a single item.
    pub fn of(item: impl Into<String>) -> Self {
        Dimension::new(vec![item.into()])
    }

    pub fn with_totals(mut self, totals: Vec<TotalItem>) -> Self {
        self.totals = Some(totals);
        self
    }
}

/// A client-side total over a measure within one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalItem {
    /// Local identifier of the totaled measure.
    pub measure_identifier: String,
    #[serde(rename = "type")]
    pub total_type: TotalType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl TotalItem {
    pub fn new(measure_identifier: impl Into<String>, total_type: TotalType) -> Self {
        TotalItem {
            measure_identifier: measure_identifier.into(),
            total_type,
            alias: None,
        }
    }
}

/// Kind of total. `Nat` (native) totals are computed by the execution
/// engine and must also be listed in the AFM's native totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TotalType {
    Sum,
    Max,
    Min,
    Avg,
    Med,
    Nat,
}

// =============================================================================
// Sort items
// =============================================================================

/// One entry of a result sort order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortItem {
    /// Sort by the values of an attribute.
    #[serde(rename = "attributeSortItem")]
    Attribute(AttributeSortItem),
    /// Sort by a measure, located through attribute elements.
    #[serde(rename = "measureSortItem")]
    Measure(MeasureSortItem),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSortItem {
    pub direction: Direction,
    /// Local identifier of the attribute to sort by.
    pub attribute_identifier: String,
}

impl AttributeSortItem {
    pub fn new(direction: Direction, attribute_identifier: impl Into<String>) -> Self {
        AttributeSortItem {
            direction,
            attribute_identifier: attribute_identifier.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureSortItem {
    pub direction: Direction,
    /// Path to the sorted column: attribute element locators narrowing down
    /// to a single measure locator.
    pub locators: Vec<LocatorItem>,
}

impl MeasureSortItem {
    pub fn new(direction: Direction, locators: Vec<LocatorItem>) -> Self {
        MeasureSortItem {
            direction,
            locators,
        }
    }
}

/// One step of a measure sort locator path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocatorItem {
    #[serde(rename = "attributeLocatorItem")]
    Attribute(AttributeLocator),
    #[serde(rename = "measureLocatorItem")]
    Measure(MeasureLocator),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeLocator {
    /// Local identifier of the attribute.
    pub attribute_identifier: String,
    /// URI of the attribute element to pin.
    pub element: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureLocator {
    /// Local identifier of the measure.
    pub measure_identifier: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}
