//! Infrastructure implementation of the `TemplateSource` port over the
//! templates embedded in `crate::assets`.

use anyhow::Result;

use crate::application::ports::TemplateSource;

/// Serves templates compiled into the binary.
pub struct EmbeddedTemplates;

impl TemplateSource for EmbeddedTemplates {
    fn template(&self, name: &str) -> Result<&'static str> {
        crate::assets::get_template(name)
    }
}
