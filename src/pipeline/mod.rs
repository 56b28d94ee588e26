pub mod params;
pub mod pattern;
pub mod presets;

pub use params::{ParamField, ParameterSet};
pub use pattern::PatternDescriptor;
pub use presets::{Catalog, CatalogEntry, CurvePreset, DiscreteFeedbackKind};
