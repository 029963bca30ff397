//! Embedded templates — the configuration files compiled into the binary.
//!
//! At compile time, `include_dir!` embeds everything under `templates/`:
//!   - `client.rb`     — Chef client configuration
//!   - `chef.control`  — link marker read by the GECOS tooling
//!   - `knife.rb`      — management-client configuration used on unlink

use anyhow::{Context, Result};
use include_dir::{Dir, include_dir};

static EMBEDDED_TEMPLATES: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Return the text of a single embedded template.
///
/// # Errors
///
/// Returns an error if no template with the given `name` exists or it is
/// not UTF-8.
pub fn get_template(name: &str) -> Result<&'static str> {
    let file = EMBEDDED_TEMPLATES
        .get_file(name)
        .ok_or_else(|| anyhow::anyhow!("embedded template not found: {name}"))?;
    file.contents_utf8()
        .with_context(|| format!("embedded template {name} is not UTF-8"))
}
