//! Visualization object model: the declarative chart description that gets
//! converted into an execution.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;

use super::afm::AttributeItem;
use super::filter::FilterItem;
use super::measure::MeasureDefinition;
use super::result_spec::TotalItem;
use super::ValidationError;

/// A stored visualization: buckets of attribute/measure items plus
/// free-form display properties.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationObject {
    pub title: String,
    /// URI of the visualization class describing the chart type.
    pub visualization_class_uri: String,
    pub buckets: Vec<Bucket>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterItem>,
    /// Opaque JSON blob of display properties (colors, sort items, ...).
    /// Parsed best-effort during conversion, never validated here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_items: Option<HashMap<String, String>>,
}

impl VisualizationObject {
    pub fn new(
        title: impl Into<String>,
        visualization_class_uri: impl Into<String>,
        buckets: Vec<Bucket>,
    ) -> Self {
        VisualizationObject {
            title: title.into(),
            visualization_class_uri: visualization_class_uri.into(),
            buckets,
            filters: Vec::new(),
            properties: None,
            reference_items: None,
        }
    }

    pub fn with_filters(mut self, filters: Vec<FilterItem>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_properties(mut self, properties: impl Into<String>) -> Self {
        self.properties = Some(properties.into());
        self
    }

    /// Every measure across all buckets, in bucket-then-item order.
    pub fn measures(&self) -> Vec<&Measure> {
        self.buckets
            .iter()
            .flat_map(|b| &b.items)
            .filter_map(|item| match item {
                BucketItem::Measure(measure) => Some(measure),
                BucketItem::Attribute(_) => None,
            })
            .collect()
    }

    /// Every attribute across all buckets, in bucket-then-item order.
    pub fn attributes(&self) -> Vec<&AttributeItem> {
        self.buckets
            .iter()
            .flat_map(|b| &b.items)
            .filter_map(|item| match item {
                BucketItem::Attribute(attribute) => Some(attribute),
                BucketItem::Measure(_) => None,
            })
            .collect()
    }

    pub fn has_measures(&self) -> bool {
        self.buckets
            .iter()
            .flat_map(|b| &b.items)
            .any(|item| matches!(item, BucketItem::Measure(_)))
    }

    /// The attribute of the bucket tagged with `collection`, applying the
    /// singleton rule: the bucket must hold exactly one item and that item
    /// must be an attribute, otherwise no attribute is contributed (silently,
    /// not an error).
    pub fn attribute_in(&self, collection: CollectionType) -> Option<&AttributeItem> {
        self.buckets
            .iter()
            .find(|b| collection.matches(&b.local_identifier))
            .and_then(|b| match b.items.as_slice() {
                [BucketItem::Attribute(attribute)] => Some(attribute),
                _ => None,
            })
    }
}

/// A named group of bucket items. The `local_identifier` doubles as the
/// layout role tag (`view`, `stack`, `segment`, `trend`, `measures`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    pub local_identifier: String,
    pub items: Vec<BucketItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub totals: Option<Vec<TotalItem>>,
}

impl Bucket {
    pub fn new(local_identifier: impl Into<String>, items: Vec<BucketItem>) -> Self {
        Bucket {
            local_identifier: local_identifier.into(),
            items,
            totals: None,
        }
    }
}

/// One item of a bucket. Attributes reuse the AFM's [`AttributeItem`]
/// directly; conversion moves them across without reshaping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BucketItem {
    #[serde(rename = "measure")]
    Measure(Measure),
    #[serde(rename = "visualizationAttribute")]
    Attribute(AttributeItem),
}

/// A measure as stored in a visualization bucket. Carries display extras
/// (title, alias, format) on top of the shared definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub definition: MeasureDefinition,
    pub local_identifier: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

impl Measure {
    pub fn new(definition: MeasureDefinition, local_identifier: impl Into<String>) -> Self {
        Measure {
            definition,
            local_identifier: local_identifier.into(),
            title: None,
            alias: None,
            format: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    /// Whether the underlying definition computes a ratio.
    pub fn has_compute_ratio(&self) -> bool {
        match &self.definition {
            MeasureDefinition::Simple(def) => def.compute_ratio.unwrap_or(false),
            _ => false,
        }
    }
}

/// Layout role a bucket can be tagged with through its local identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionType {
    View,
    Stack,
    Segment,
    Trend,
}

impl CollectionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionType::View => "view",
            CollectionType::Stack => "stack",
            CollectionType::Segment => "segment",
            CollectionType::Trend => "trend",
        }
    }

    /// Role tags match bucket local identifiers case-insensitively.
    pub fn matches(&self, bucket_local_identifier: &str) -> bool {
        bucket_local_identifier.eq_ignore_ascii_case(self.as_str())
    }
}

/// Catalog metadata describing a chart type. Supplied by the caller's class
/// resolver; the core only reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualizationClass {
    pub title: String,
    pub uri: String,
    /// Chart type name, parsed on demand via [`VisualizationType`].
    pub visualization_type: String,
}

impl VisualizationClass {
    pub fn new(
        title: impl Into<String>,
        uri: impl Into<String>,
        visualization_type: impl Into<String>,
    ) -> Self {
        VisualizationClass {
            title: title.into(),
            uri: uri.into(),
            visualization_type: visualization_type.into(),
        }
    }
}

/// Chart types with dedicated dimension layouts. Everything the converter
/// does not recognize by name is a validation failure, not a fallback to
/// table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizationType {
    Table,
    Line,
    Column,
    Bar,
    Pie,
}

impl FromStr for VisualizationType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" => Ok(VisualizationType::Table),
            "line" => Ok(VisualizationType::Line),
            "column" => Ok(VisualizationType::Column),
            "bar" => Ok(VisualizationType::Bar),
            "pie" => Ok(VisualizationType::Pie),
            _ => Err(ValidationError::UnknownVisualizationType(s.to_string())),
        }
    }
}
