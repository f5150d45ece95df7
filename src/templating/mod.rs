//! Template rendering for the `njk` directive.
//!
//! Built on [Tera](https://keats.github.io/tera/), whose syntax is close to the
//! Nunjucks/Jinja family:
//!
//! ```text
//! <h1>{{ title }}</h1>
//! {% for item in items %}<li>{{ item }}</li>{% endfor %}
//! ```

mod error;
mod renderer;

pub use error::TemplateError;
pub use renderer::TemplateRenderer;
