//! Translation of visualization objects into executable AFM requests.
//!
//! The converter is pure: it reads the visualization object and produces a
//! fresh [`Afm`] and [`ResultSpec`]. Normalization that the stored object
//! must not see (ratio format clearing, irrelevant-filter removal) happens
//! on working copies, never on the input.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::model::afm::{Afm, MeasureItem};
use crate::model::filter::FilterItem;
use crate::model::measure::MeasureDefinition;
use crate::model::result_spec::{Dimension, ResultSpec, SortItem, MEASURE_GROUP};
use crate::model::visualization::{
    CollectionType, Measure, VisualizationClass, VisualizationObject, VisualizationType,
};
use crate::model::ValidationError;

/// A complete execution request: the AFM plus the result layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Execution {
    pub afm: Afm,
    pub result_spec: ResultSpec,
}

/// Error of [`convert_to_execution_with`]: the class resolver failed, or
/// the resolved class did not validate against the object.
#[derive(Error, Debug)]
pub enum ConvertError<E> {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The caller's resolver error, passed through untouched.
    #[error("visualization class lookup failed: {0}")]
    Resolver(E),
}

/// Convert a visualization object and its class into an execution request.
pub fn convert_to_execution(
    vo: &VisualizationObject,
    class: &VisualizationClass,
) -> Result<Execution, ValidationError> {
    debug!(title = %vo.title, class = %class.uri, "converting visualization to execution");
    Ok(Execution {
        afm: convert_to_afm(vo),
        result_spec: convert_to_result_spec(vo, class)?,
    })
}

/// Convert a visualization object, looking up its class through the
/// caller-supplied resolver (typically backed by a metadata service).
pub fn convert_to_execution_with<F, E>(
    vo: &VisualizationObject,
    resolver: F,
) -> Result<Execution, ConvertError<E>>
where
    F: FnOnce(&str) -> Result<VisualizationClass, E>,
{
    let class = resolver(&vo.visualization_class_uri).map_err(ConvertError::Resolver)?;
    Ok(convert_to_execution(vo, &class)?)
}

/// Build the AFM part: attributes, normalized filters and measures, each in
/// bucket-then-item order.
pub fn convert_to_afm(vo: &VisualizationObject) -> Afm {
    let mut afm = Afm::new();
    for attribute in vo.attributes() {
        afm.add_attribute(attribute.clone());
    }
    for filter in vo.filters.iter().filter(|f| is_relevant(f)) {
        afm.add_filter(filter.clone());
    }
    for measure in vo.measures() {
        afm.add_measure(convert_measure(measure));
    }
    afm
}

fn convert_measure(measure: &Measure) -> MeasureItem {
    // Ratio formatting is applied downstream; a ratio measure must not
    // carry its stored format into the execution.
    let format = if measure.has_compute_ratio() {
        None
    } else {
        measure.format.clone()
    };
    let alias = measure
        .alias
        .as_deref()
        .filter(|a| !a.is_empty())
        .map(str::to_owned)
        .or_else(|| measure.title.clone());
    let mut definition = measure.definition.clone();
    if let MeasureDefinition::Simple(def) = &mut definition {
        def.filters.retain(is_relevant);
    }
    MeasureItem {
        definition,
        local_identifier: measure.local_identifier.clone(),
        alias,
        format,
    }
}

/// Whether a filter survives normalization.
///
/// This is a closed allow/deny list applied uniformly to bucket-level and
/// per-measure filters. Date filters are dropped when they select all time,
/// negative attribute filters when they select every element, measure value
/// filters when they carry no condition. Kinds outside the list (currently
/// only expression filters) are dropped outright, not passed through.
fn is_relevant(filter: &FilterItem) -> bool {
    match filter {
        FilterItem::PositiveAttribute(_) => true,
        FilterItem::NegativeAttribute(f) => !f.is_all_selected(),
        FilterItem::AbsoluteDate(f) => !f.is_all_time(),
        FilterItem::RelativeDate(f) => !f.is_all_time(),
        FilterItem::MeasureValue(f) => f.condition.is_some(),
        FilterItem::Ranking(_) => true,
        FilterItem::Expression(_) => false,
    }
}

/// Build the result spec part: dimension layout per chart type plus the
/// sort order extracted from the object's display properties.
///
/// Fails when `class` is not the class the object references or names an
/// unknown chart type.
pub fn convert_to_result_spec(
    vo: &VisualizationObject,
    class: &VisualizationClass,
) -> Result<ResultSpec, ValidationError> {
    if class.uri != vo.visualization_class_uri {
        return Err(ValidationError::ClassMismatch {
            class_uri: class.uri.clone(),
            object_uri: vo.visualization_class_uri.clone(),
        });
    }
    let vis_type: VisualizationType = class.visualization_type.parse()?;
    Ok(ResultSpec {
        dimensions: dimensions_for(vo, vis_type),
        sorts: parse_sort_items_or_empty(vo.properties.as_deref()),
    })
}

// =============================================================================
// Sort extraction
// =============================================================================

#[derive(Deserialize)]
struct VisualizationProperties {
    #[serde(default, rename = "sortItems")]
    sort_items: Option<Vec<SortItem>>,
}

/// Extract `sortItems` from the free-form properties blob.
///
/// Properties are display state owned by UI clients; a malformed blob must
/// never fail an execution. Any parse or structural failure therefore
/// yields an empty sort order instead of an error.
fn parse_sort_items_or_empty(properties: Option<&str>) -> Vec<SortItem> {
    let Some(raw) = properties else {
        return Vec::new();
    };
    match serde_json::from_str::<VisualizationProperties>(raw) {
        Ok(props) => props.sort_items.unwrap_or_default(),
        Err(err) => {
            debug!(error = %err, "ignoring unparsable visualization properties");
            Vec::new()
        }
    }
}

// =============================================================================
// Dimension layout
// =============================================================================

fn dimensions_for(vo: &VisualizationObject, vis_type: VisualizationType) -> Vec<Dimension> {
    match vis_type {
        VisualizationType::Bar | VisualizationType::Column => {
            stacked_dimensions(vo, CollectionType::Stack, CollectionType::View)
        }
        VisualizationType::Line => {
            stacked_dimensions(vo, CollectionType::Segment, CollectionType::Trend)
        }
        VisualizationType::Pie => pie_dimensions(vo),
        VisualizationType::Table => table_dimensions(vo),
    }
}

/// Layout for charts that split series over a second attribute: the
/// stacking attribute alone in dimension one, the viewing attribute and the
/// measure group in dimension two. Without a stacking attribute the measure
/// group and the viewing attribute get a dimension each, only if present.
fn stacked_dimensions(
    vo: &VisualizationObject,
    stack_by: CollectionType,
    view_by: CollectionType,
) -> Vec<Dimension> {
    let view = vo.attribute_in(view_by);
    match vo.attribute_in(stack_by) {
        Some(stack) => {
            let mut second = Vec::new();
            if let Some(view) = view {
                second.push(view.local_identifier.clone());
            }
            if vo.has_measures() {
                second.push(MEASURE_GROUP.to_string());
            }
            vec![
                Dimension::of(stack.local_identifier.clone()),
                Dimension::new(second),
            ]
        }
        None => {
            let mut dimensions = Vec::new();
            if vo.has_measures() {
                dimensions.push(Dimension::of(MEASURE_GROUP));
            }
            if let Some(view) = view {
                dimensions.push(Dimension::of(view.local_identifier.clone()));
            }
            dimensions
        }
    }
}

fn pie_dimensions(vo: &VisualizationObject) -> Vec<Dimension> {
    let mut dimensions = Vec::new();
    if vo.has_measures() {
        dimensions.push(Dimension::of(MEASURE_GROUP));
    }
    if let Some(view) = vo.attribute_in(CollectionType::View) {
        dimensions.push(Dimension::of(view.local_identifier.clone()));
    }
    dimensions
}

/// Table layout: every attribute in dimension one (even when there are
/// none), the measure group in dimension two only when measures exist.
fn table_dimensions(vo: &VisualizationObject) -> Vec<Dimension> {
    let attributes = vo
        .attributes()
        .iter()
        .map(|a| a.local_identifier.clone())
        .collect();
    let mut dimensions = vec![Dimension::new(attributes)];
    if vo.has_measures() {
        dimensions.push(Dimension::of(MEASURE_GROUP));
    }
    dimensions
}
