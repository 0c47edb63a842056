//! Tera rendering engine — [`JobSpec`] and [`Renderer`].
//!
//! The descriptor template is baked into the binary at compile time via
//! `include_str!`. The template name carries an `.xml` suffix so tera's
//! autoescaping HTML-escapes every interpolated value; the raw pipeline
//! script can contain arbitrary markup without breaking the document.

use serde::Serialize;
use tera::Tera;

use crate::annotations;
use crate::error::RenderError;

const JOB_TEMPLATE_NAME: &str = "job.xml";
const JOB_TEMPLATE: &str = include_str!("templates/job.xml.tera");

/// Everything the descriptor template interpolates, derived from a tracked
/// file's content. Absent annotations are empty strings and render as empty
/// elements, never omitted ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSpec {
    pub script: String,
    pub description: String,
    pub auth_token: String,
}

impl JobSpec {
    /// Derive the template context for a pipeline definition's content.
    pub fn from_content(content: &str) -> Self {
        Self {
            script: content.to_string(),
            description: annotations::description(content),
            auth_token: annotations::auth_token(content),
        }
    }
}

/// Tera-based descriptor renderer. Create once with [`Renderer::new`] and
/// reuse for every changed file in a run.
pub struct Renderer {
    tera: Tera,
}

impl Renderer {
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.add_raw_template(JOB_TEMPLATE_NAME, JOB_TEMPLATE)?;
        tera.autoescape_on(vec![".xml"]);
        Ok(Self { tera })
    }

    /// Render the descriptor XML for a pipeline definition's content.
    pub fn render(&self, content: &str) -> Result<String, RenderError> {
        self.render_spec(&JobSpec::from_content(content))
    }

    /// Render from an already derived [`JobSpec`].
    pub fn render_spec(&self, spec: &JobSpec) -> Result<String, RenderError> {
        let ctx = tera::Context::from_serialize(spec)?;
        Ok(self.tera.render(JOB_TEMPLATE_NAME, &ctx)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_script_and_annotations() {
        let renderer = Renderer::new().unwrap();
        let content = "// description: Payments build\n// authToken: tok123\nnode { }\n";
        let xml = renderer.render(content).unwrap();

        assert!(xml.contains("<description>Payments build</description>"));
        assert!(xml.contains("<authToken>tok123</authToken>"));
        assert!(xml.contains("node { }"));
    }

    #[test]
    fn missing_annotations_render_as_empty_elements() {
        let renderer = Renderer::new().unwrap();
        let xml = renderer.render("pipeline { agent any }\n").unwrap();

        assert!(xml.contains("<description></description>"));
        assert!(xml.contains("<authToken></authToken>"));
    }

    #[test]
    fn interpolated_values_are_escaped() {
        let renderer = Renderer::new().unwrap();
        let content = "// description: a <b> & \"c\"\nsh \"echo 1 < 2\"\n";
        let xml = renderer.render(content).unwrap();

        assert!(xml.contains("a &lt;b&gt; &amp; &quot;c&quot;"));
        assert!(xml.contains("echo 1 &lt; 2"));
        assert!(
            !xml.contains("<b>"),
            "raw markup must not survive escaping"
        );
    }

    #[test]
    fn rendering_is_a_pure_function_of_content() {
        let renderer = Renderer::new().unwrap();
        let content = "// description: stable\nnode { }\n";
        assert_eq!(
            renderer.render(content).unwrap(),
            renderer.render(content).unwrap()
        );
    }
}
