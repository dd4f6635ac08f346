//! Static resolution of stylesheet `@import` references to files on disk.
//!
//! Each concern lives in its own submodule so it can be tested alone: partial naming,
//! candidate generation, plain CSS detection, statement extraction and the search-path walk
//! that ties them together.

mod candidates;
mod extract;
mod filters;
mod partial;
mod resolve;

pub use candidates::{SASS_EXTENSIONS, generate_import_candidates};
pub use extract::{CssImportExtractor, ImportExtractor, extract_import_references};
pub use filters::is_plain_css_import;
pub use partial::partialize;
pub use resolve::{ResolveContext, SearchPath, resolve_children, resolve_import};
