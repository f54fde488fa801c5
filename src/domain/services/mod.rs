pub mod completeness;
pub mod field_lookup;
pub mod toll_mapping;

pub use completeness::missing_responses;
pub use field_lookup::{lookup, lookup_str, render_value};
pub use toll_mapping::rows_for_document;
