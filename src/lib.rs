//! # Prism
//!
//! Execution model for an analytics platform: the AFM
//! (Attribute-Filter-Measure) request shape, its wire format, and the
//! conversion of stored visualizations into executable requests.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │            VisualizationObject (+ class)                 │
//! │     (buckets of attributes/measures, filters, props)     │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [translation]
//! ┌─────────────────────────────────────────────────────────┐
//! │                 Afm  +  ResultSpec                       │
//! │   (attributes, filters, measures / dimensions, sorts)    │
//! └─────────────────────────────────────────────────────────┘
//!                          │
//!                          ▼ [qualifier rewriting]
//! ┌─────────────────────────────────────────────────────────┐
//! │        identifier-free execution request (wire)          │
//! │            → external execution engine                   │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! The crate performs no I/O. Identifier resolution and visualization-class
//! lookup are caller-supplied callbacks
//! ([`model::ObjQualifierConverter`], the resolver of
//! [`translation::convert_to_execution_with`]).

pub mod model;
pub mod translation;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::model::{
        Afm, AttributeItem, Bucket, BucketItem, CollectionType, ConversionError, Dimension,
        FilterItem, Measure, MeasureDefinition, MeasureItem, ObjQualifier, ObjQualifierConverter,
        ResultSpec, SortItem, ValidationError, VisualizationClass, VisualizationObject,
        VisualizationType, MEASURE_GROUP,
    };
    pub use crate::translation::{
        convert_to_afm, convert_to_execution, convert_to_execution_with, convert_to_result_spec,
        Execution,
    };
}

// Also export the entry points at crate root for convenience
pub use model::{Afm, ObjQualifier, ResultSpec, VisualizationClass, VisualizationObject};
pub use translation::{convert_to_execution, Execution};
