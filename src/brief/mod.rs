//! Content brief schema layer: typed brief entities and their validator.

pub mod model;
pub mod schema;

pub use model::{
    title_case, ContentBrief, ContentGap, ContentType, Faq, OutlineSection, SearchIntent,
};
pub use schema::{brief_json_schema, format_instructions, BriefValidator, ValidatedBrief};
