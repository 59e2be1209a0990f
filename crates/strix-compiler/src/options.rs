//! Lowering configuration
//!
//! Options live in the `[lowering]` table of a TOML file:
//!
//! ```toml
//! [lowering]
//! module-name = "app"
//! entry-function = "main"
//! max-literal-properties = 8
//! validate = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::CompileResult;

/// Options controlling class lowering and the passes after it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct LoweringOptions {
    /// Name of the produced IR module
    pub module_name: String,
    /// Name of the function that receives top-level statements
    pub entry_function: String,
    /// Split object literals with more properties than this
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_literal_properties: Option<u32>,
    /// Validate the module after lowering
    pub validate: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            module_name: "main".to_string(),
            entry_function: "main".to_string(),
            max_literal_properties: None,
            validate: true,
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OptionsFile {
    #[serde(default)]
    lowering: LoweringOptions,
}

impl LoweringOptions {
    /// Parse options from TOML text
    ///
    /// A missing `[lowering]` table yields the defaults.
    pub fn from_toml_str(content: &str) -> CompileResult<Self> {
        let file: OptionsFile = toml::from_str(content)?;
        Ok(file.lowering)
    }

    /// Load options from a TOML file
    pub fn load(path: &Path) -> CompileResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let options = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), ?options, "loaded lowering options");
        Ok(options)
    }

    /// Render as a TOML document with a `[lowering]` table
    pub fn to_toml_string(&self) -> CompileResult<String> {
        let file = OptionsFile {
            lowering: self.clone(),
        };
        Ok(toml::to_string_pretty(&file)?)
    }
}
