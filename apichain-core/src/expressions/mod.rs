mod path;
mod template;

pub use path::lookup_path;
pub use template::{parse_template, resolve, resolve_headers, Segment, Template, TemplateError};
