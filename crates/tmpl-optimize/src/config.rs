use eyre::WrapErr;
use serde::{Deserialize, Serialize};
use tmpl_core::config::{bool_from_env, list_from_env, string_from_env};
use tmpl_core::{Error, Result};

pub const ENV_DISABLE_PASSES: &str = "TMPL_OPT_DISABLE_PASSES";
pub const ENV_VERIFY: &str = "TMPL_OPT_VERIFY";
pub const ENV_OUTPUT_VAR: &str = "TMPL_OPT_OUTPUT_VAR";
pub const ENV_RECEIVER: &str = "TMPL_OPT_RECEIVER";

/// Knobs for the rewrite pipeline. The defaults match the template
/// compiler's generated shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizeOptions {
    /// Accumulator the render function appends its output to.
    pub output_variable: String,
    /// Captured alias of the render context inside closures.
    pub context_identifier: String,
    /// Identifier that replaces `context_identifier`.
    pub receiver_identifier: String,
    /// Functions whose name contains this character are reusable partials.
    pub partial_marker: char,
    pub disabled_passes: Vec<String>,
    /// Re-validate the tree after every pass.
    pub verify_each_pass: bool,
}

impl Default for OptimizeOptions {
    fn default() -> Self {
        Self {
            output_variable: "html".to_string(),
            context_identifier: "context".to_string(),
            receiver_identifier: "self".to_string(),
            partial_marker: '$',
            disabled_passes: Vec::new(),
            verify_each_pass: true,
        }
    }
}

impl OptimizeOptions {
    pub fn from_json_str(source: &str) -> Result<Self> {
        let options: Self =
            serde_json::from_str(source).wrap_err("failed to parse optimizer options")?;
        options.validate()?;
        Ok(options)
    }

    /// Defaults with environment overrides applied.
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    pub fn with_env_overrides(mut self) -> Self {
        if let Some(passes) = list_from_env(ENV_DISABLE_PASSES) {
            self.disabled_passes = passes;
        }
        if let Some(verify) = bool_from_env(ENV_VERIFY) {
            self.verify_each_pass = verify;
        }
        if let Some(var) = string_from_env(ENV_OUTPUT_VAR) {
            self.output_variable = var;
        }
        if let Some(receiver) = string_from_env(ENV_RECEIVER) {
            self.receiver_identifier = receiver;
        }
        self
    }

    pub fn disable(mut self, pass: &str) -> Self {
        self.disabled_passes.push(pass.to_string());
        self
    }

    pub fn is_disabled(&self, pass: &str) -> bool {
        self.disabled_passes.iter().any(|p| p == pass)
    }

    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("output_variable", &self.output_variable),
            ("context_identifier", &self.context_identifier),
            ("receiver_identifier", &self.receiver_identifier),
        ] {
            if value.is_empty() {
                return Err(Error::Generic(format!("option `{field}` must not be empty")));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_overrides_keep_remaining_defaults() -> Result<()> {
        let options = OptimizeOptions::from_json_str(
            r#"{ "receiver_identifier": "this_", "disabled_passes": ["combine-output"] }"#,
        )?;
        assert_eq!(options.receiver_identifier, "this_");
        assert_eq!(options.output_variable, "html");
        assert!(options.is_disabled("combine-output"));
        assert!(!options.is_disabled("flatten-blocks"));
        Ok(())
    }

    #[test]
    fn empty_identifiers_are_rejected() {
        assert!(OptimizeOptions::from_json_str(r#"{ "output_variable": "" }"#).is_err());
    }

    #[test]
    fn environment_overrides_apply() {
        std::env::set_var(ENV_DISABLE_PASSES, "hoist-partials, ,replace-context");
        std::env::set_var(ENV_VERIFY, "0");
        let options = OptimizeOptions::from_env();
        std::env::remove_var(ENV_DISABLE_PASSES);
        std::env::remove_var(ENV_VERIFY);

        assert_eq!(
            options.disabled_passes,
            vec!["hoist-partials".to_string(), "replace-context".to_string()]
        );
        assert!(!options.verify_each_pass);
    }
}
