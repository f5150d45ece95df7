//! Content renderers behind the `md`, `scss` and `yml` directives.

pub mod data;
pub mod markdown;
pub mod stylesheet;

pub use data::parse_yaml;
pub use markdown::render_markdown;
pub use stylesheet::compile_scss;
