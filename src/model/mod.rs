//! Execution model types: qualifiers, filters, measures, the AFM aggregate,
//! visualization objects and result specs.

pub mod afm;
pub mod filter;
pub mod measure;
pub mod qualifier;
pub mod result_spec;
pub mod visualization;

pub use afm::{Afm, AttributeItem, MeasureItem, NativeTotalItem, NotFoundError};
pub use filter::{
    AbsoluteDateFilter, AttributeFilterElements, ComparisonCondition, ComparisonOperator,
    ExpressionFilter, FilterItem, MeasureValueFilter, MeasureValueFilterCondition,
    NegativeAttributeFilter, PositiveAttributeFilter, RangeCondition, RangeOperator,
    RankingFilter, RankingOperator, RelativeDateFilter,
};
pub use measure::{
    Aggregation, ArithmeticMeasureDefinition, MeasureDefinition, OverPeriodDateAttribute,
    OverPeriodMeasureDefinition, PopMeasureDefinition, PreviousPeriodDateDataSet,
    PreviousPeriodMeasureDefinition, SimpleMeasureDefinition,
};
pub use qualifier::{ConversionError, ObjQualifier, ObjQualifierConverter};
pub use result_spec::{
    AttributeLocator, AttributeSortItem, Dimension, Direction, LocatorItem, MeasureLocator,
    MeasureSortItem, ResultSpec, SortItem, TotalItem, TotalType, MEASURE_GROUP,
};
pub use visualization::{
    Bucket, BucketItem, CollectionType, Measure, VisualizationClass, VisualizationObject,
    VisualizationType,
};

use thiserror::Error;

/// A required structural constraint on a model value was broken.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A field that must hold at least one entry was empty.
    #[error("{type_name} requires a non-empty '{field}'")]
    EmptyField {
        type_name: &'static str,
        field: &'static str,
    },

    /// The supplied visualization class is not the one the visualization
    /// object references.
    #[error("visualization class '{class_uri}' does not match the object's class '{object_uri}'")]
    ClassMismatch {
        class_uri: String,
        object_uri: String,
    },

    /// The visualization class names a chart type the converter does not
    /// know.
    #[error("unknown visualization type '{0}'")]
    UnknownVisualizationType(String),

    /// Ranking operator outside TOP/BOTTOM.
    #[error("unknown ranking operator '{0}'")]
    UnknownRankingOperator(String),
}
