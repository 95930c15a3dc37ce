//! Synthesis options.
//!
//! Every knob has a default matching the classic React DOM playground, so
//! `SynthesisOptions::default()` reproduces the conventional output:
//! `import ReactDOM from 'react-dom'`, `import React from 'react'`, an `App`
//! wrapper and a mount into `document.getElementById("root")`.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SynthesisError};

lazy_static! {
    static ref IDENTIFIER_RE: Regex = Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").unwrap();

    /// Dotted callee such as `document.getElementById`.
    static ref CALLEE_PATH_RE: Regex =
        Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap();
}

pub fn is_identifier(name: &str) -> bool {
    IDENTIFIER_RE.is_match(name)
}

/// A module together with the local name used when its binding is injected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleBinding {
    pub module: String,
    pub local: String,
}

impl ModuleBinding {
    pub fn new(module: &str, local: &str) -> Self {
        Self {
            module: module.to_string(),
            local: local.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SynthesisOptions {
    pub wrapper_name: String,
    pub root_element_id: String,
    pub framework: ModuleBinding,
    pub dom: ModuleBinding,
    pub mount_method: String,
    pub host_lookup: String,
}

impl Default for SynthesisOptions {
    fn default() -> Self {
        Self {
            wrapper_name: "App".to_string(),
            root_element_id: "root".to_string(),
            framework: ModuleBinding::new("react", "React"),
            dom: ModuleBinding::new("react-dom", "ReactDOM"),
            mount_method: "render".to_string(),
            host_lookup: "document.getElementById".to_string(),
        }
    }
}

impl SynthesisOptions {
    /// Parse options from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: SynthesisOptions = serde_json::from_str(json)
            .map_err(|e| SynthesisError::InvalidOptions(e.to_string()))?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<()> {
        let identifiers = [
            ("wrapperName", &self.wrapper_name),
            ("framework.local", &self.framework.local),
            ("dom.local", &self.dom.local),
            ("mountMethod", &self.mount_method),
        ];
        for (field, value) in identifiers {
            if !is_identifier(value) {
                return Err(SynthesisError::InvalidOptions(format!(
                    "{} must be a JavaScript identifier, got {:?}",
                    field, value
                )));
            }
        }

        if !CALLEE_PATH_RE.is_match(&self.host_lookup) {
            return Err(SynthesisError::InvalidOptions(format!(
                "hostLookup must be a dotted identifier path, got {:?}",
                self.host_lookup
            )));
        }

        if self.framework.module.is_empty() || self.dom.module.is_empty() {
            return Err(SynthesisError::InvalidOptions(
                "module paths must not be empty".to_string(),
            ));
        }
        if self.framework.module == self.dom.module {
            return Err(SynthesisError::InvalidOptions(format!(
                "framework and dom modules must differ, both are {:?}",
                self.dom.module
            )));
        }

        if self.root_element_id.is_empty() {
            return Err(SynthesisError::InvalidOptions(
                "rootElementId must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_defaults_are_valid() {
        let options = SynthesisOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.wrapper_name, "App");
        assert_eq!(options.root_element_id, "root");
        assert_eq!(options.dom, ModuleBinding::new("react-dom", "ReactDOM"));
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let raw = json!({ "rootElementId": "app", "wrapperName": "Playground" }).to_string();
        let options = SynthesisOptions::from_json(&raw).unwrap();
        assert_eq!(options.root_element_id, "app");
        assert_eq!(options.wrapper_name, "Playground");
        assert_eq!(options.framework, ModuleBinding::new("react", "React"));
        assert_eq!(options.host_lookup, "document.getElementById");
    }

    #[test]
    fn test_rejects_bad_identifiers() {
        let raw = json!({ "wrapperName": "my-app" }).to_string();
        let err = SynthesisOptions::from_json(&raw).unwrap_err();
        assert_eq!(err.code(), "INVALID_OPTIONS");

        let raw = json!({ "hostLookup": "document.querySelector(" }).to_string();
        assert!(SynthesisOptions::from_json(&raw).is_err());
    }

    #[test]
    fn test_rejects_shared_module() {
        let raw = json!({ "dom": { "module": "react", "local": "ReactDOM" } }).to_string();
        assert!(SynthesisOptions::from_json(&raw).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(SynthesisOptions::from_json("{ not json").is_err());
    }
}
