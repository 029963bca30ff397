//! Placeholder substitution for configuration templates.
//!
//! Templates use `${name}` placeholders. Rendering is strict: every
//! placeholder must have a value, so a typo never reaches `/etc`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::error::TemplateError;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("valid regex")
});

pub const CLIENT_CONFIG_TEMPLATE: &str = "client.rb";
pub const CONTROL_FILE_TEMPLATE: &str = "chef.control";
pub const KNIFE_CONFIG_TEMPLATE: &str = "knife.rb";

/// Placeholder values written into `client.rb` on disconnect.
pub const PLACEHOLDER_CHEF_URL: &str = "CHEF_URL";
pub const PLACEHOLDER_ADMIN_NAME: &str = "ADMIN_NAME";
pub const PLACEHOLDER_NODE_NAME: &str = "NODE_NAME";

/// Variables passed to a template.
pub type TemplateVars = BTreeMap<&'static str, String>;

/// A named template plus where and how its output is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateJob {
    pub template: &'static str,
    pub destination: PathBuf,
    pub mode: u32,
    pub variables: TemplateVars,
}

/// Substitutes every `${name}` in `source`.
///
/// # Errors
///
/// Returns [`TemplateError::MissingVariable`] for the first placeholder
/// without a value.
pub fn render(template: &str, source: &str, vars: &TemplateVars) -> Result<String, TemplateError> {
    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for caps in PLACEHOLDER_RE.captures_iter(source) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let value = vars
            .get(name.as_str())
            .ok_or_else(|| TemplateError::MissingVariable {
                template: template.to_string(),
                name: name.as_str().to_string(),
            })?;
        out.push_str(&source[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&source[last..]);
    Ok(out)
}
