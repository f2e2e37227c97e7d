// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Named [`MappingOptions`] profiles loaded from YAML or JSON.
//!
//! A profile lists only the flags it overrides; everything else comes from
//! the built-in defaults or from the profile named in `inherits`.
//!
//! ```yaml
//! default_profile: lenient
//! profiles:
//!   strict:
//!     case_sensitive: true
//!     can_alter_properties: false
//!   lenient:
//!     inherits: strict
//!     case_sensitive: false
//!     parse_values: true
//!     fail_on_mismatched_types: false
//!     undefined_value: null
//! ```

use super::{DynamicObjectType, MappingOptions};
use crate::error::{MapError, Result};
use crate::value::{Value, UNDEFINED};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// Upper bound on `inherits` chains.
const MAX_INHERITANCE_DEPTH: usize = 16;

/// Options profile loader for YAML and JSON documents.
pub struct ProfileLoader;

/// Root of a profile document.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct ProfileDocument {
    /// Profile returned by [`ProfileLoader::get_default_profile`].
    pub default_profile: Option<String>,
    /// Profiles by name.
    pub profiles: BTreeMap<String, OptionsProfile>,
}

/// One profile. Absent keys keep the inherited value.
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OptionsProfile {
    pub inherits: Option<String>,
    pub include_fields: Option<bool>,
    pub include_properties: Option<bool>,
    pub include_private: Option<bool>,
    pub declared_only: Option<bool>,
    pub case_sensitive: Option<bool>,
    pub parse_values: Option<bool>,
    pub fail_on_mismatched_types: Option<bool>,
    pub can_alter_properties: Option<bool>,
    pub can_access_missing_properties: Option<bool>,
    pub is_read_only: Option<bool>,
    pub update_source: Option<bool>,
    /// `expando`, `dictionary` or `case_sensitive_dictionary`.
    pub dynamic_object: Option<String>,
    /// `undefined` or `null`. A bare YAML `null` also selects null.
    #[serde(deserialize_with = "deserialize_undefined")]
    pub undefined_value: Option<UndefinedSetting>,
    pub max_depth: Option<usize>,
}

/// Substitute returned for missing keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndefinedSetting {
    Undefined,
    Null,
}

fn deserialize_undefined<'de, D>(deserializer: D) -> std::result::Result<Option<UndefinedSetting>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None | Some("null") => Ok(Some(UndefinedSetting::Null)),
        Some("undefined") => Ok(Some(UndefinedSetting::Undefined)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "invalid undefined_value: {}",
            other
        ))),
    }
}

impl ProfileLoader {
    /// Load a profile document; `.json` files are parsed as JSON, anything
    /// else as YAML.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<ProfileDocument> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            MapError::Profile(format!("failed to read {}: {}", path.display(), e))
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        log::debug!("[options] loading profiles from {}", path.display());
        if is_json {
            Self::parse_json(&content)
        } else {
            Self::parse_yaml(&content)
        }
    }

    /// Parse YAML content.
    pub fn parse_yaml(content: &str) -> Result<ProfileDocument> {
        serde_yaml::from_str(content)
            .map_err(|e| MapError::Profile(format!("failed to parse YAML: {}", e)))
    }

    /// Parse JSON content.
    pub fn parse_json(content: &str) -> Result<ProfileDocument> {
        serde_json::from_str(content)
            .map_err(|e| MapError::Profile(format!("failed to parse JSON: {}", e)))
    }

    /// Resolve a profile by name, following `inherits`.
    pub fn get_profile(doc: &ProfileDocument, name: &str) -> Result<MappingOptions> {
        let mut chain = Vec::new();
        let mut current = Some(name.to_string());
        while let Some(profile_name) = current {
            if chain.len() >= MAX_INHERITANCE_DEPTH || chain.iter().any(|(n, _)| *n == profile_name) {
                return Err(MapError::Profile(format!(
                    "profile '{}' has a circular or too deep inherits chain",
                    name
                )));
            }
            let profile = doc
                .profiles
                .get(&profile_name)
                .ok_or_else(|| MapError::Profile(format!("profile '{}' not found", profile_name)))?;
            current = profile.inherits.clone();
            chain.push((profile_name, profile));
        }

        let mut options = MappingOptions::default();
        for (_, profile) in chain.iter().rev() {
            options = Self::apply(profile, options)?;
        }
        Ok(options)
    }

    /// Resolve the default profile: `default_profile`, else the first
    /// profile by name, else the built-in defaults.
    pub fn get_default_profile(doc: &ProfileDocument) -> Result<MappingOptions> {
        if let Some(ref default_name) = doc.default_profile {
            Self::get_profile(doc, default_name)
        } else if let Some(first) = doc.profiles.keys().next() {
            Self::get_profile(doc, first)
        } else {
            Ok(MappingOptions::default())
        }
    }

    /// Apply one profile's overrides onto `base`.
    pub fn apply(profile: &OptionsProfile, base: MappingOptions) -> Result<MappingOptions> {
        let mut opts = base;
        let flags: [(&Option<bool>, &mut bool); 11] = [
            (&profile.include_fields, &mut opts.include_fields),
            (&profile.include_properties, &mut opts.include_properties),
            (&profile.include_private, &mut opts.include_private),
            (&profile.declared_only, &mut opts.declared_only),
            (&profile.case_sensitive, &mut opts.case_sensitive),
            (&profile.parse_values, &mut opts.parse_values),
            (&profile.fail_on_mismatched_types, &mut opts.fail_on_mismatched_types),
            (&profile.can_alter_properties, &mut opts.can_alter_properties),
            (
                &profile.can_access_missing_properties,
                &mut opts.can_access_missing_properties,
            ),
            (&profile.is_read_only, &mut opts.is_read_only),
            (&profile.update_source, &mut opts.update_source),
        ];
        for (setting, target) in flags {
            if let Some(value) = setting {
                *target = *value;
            }
        }

        if let Some(ref kind) = profile.dynamic_object {
            opts.dynamic_object_type = match kind.to_ascii_lowercase().as_str() {
                "expando" => DynamicObjectType::Expando,
                "dictionary" => DynamicObjectType::Dictionary {
                    case_sensitive: false,
                },
                "case_sensitive_dictionary" => DynamicObjectType::Dictionary {
                    case_sensitive: true,
                },
                other => {
                    return Err(MapError::Profile(format!(
                        "invalid dynamic_object: {}",
                        other
                    )))
                }
            };
        }

        if let Some(setting) = profile.undefined_value {
            opts.undefined_value = match setting {
                UndefinedSetting::Undefined => UNDEFINED,
                UndefinedSetting::Null => Value::Null,
            };
        }

        if let Some(depth) = profile.max_depth {
            if depth == 0 {
                return Err(MapError::Profile("max_depth must be positive".into()));
            }
            opts.max_depth = depth;
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
default_profile: lenient
profiles:
  strict:
    case_sensitive: true
    can_alter_properties: false
  lenient:
    inherits: strict
    case_sensitive: false
    parse_values: true
    fail_on_mismatched_types: false
    undefined_value: null
    dynamic_object: case_sensitive_dictionary
"#;

    #[test]
    fn test_parse_and_resolve_inherits() {
        let doc = ProfileLoader::parse_yaml(DOC).expect("yaml");
        let strict = ProfileLoader::get_profile(&doc, "strict").expect("strict");
        assert!(strict.case_sensitive);
        assert!(!strict.can_alter_properties);
        assert!(strict.undefined_value.is_undefined());

        let lenient = ProfileLoader::get_default_profile(&doc).expect("lenient");
        assert!(!lenient.case_sensitive);
        assert!(!lenient.can_alter_properties);
        assert!(lenient.parse_values);
        assert!(!lenient.fail_on_mismatched_types);
        assert!(lenient.undefined_value.is_null());
        assert_eq!(
            lenient.dynamic_object_type,
            DynamicObjectType::Dictionary {
                case_sensitive: true
            }
        );
    }

    #[test]
    fn test_unknown_profile() {
        let doc = ProfileLoader::parse_yaml(DOC).expect("yaml");
        let err = ProfileLoader::get_profile(&doc, "missing").unwrap_err();
        assert!(matches!(err, MapError::Profile(_)));
    }

    #[test]
    fn test_circular_inherits_rejected() {
        let doc = ProfileLoader::parse_yaml(
            "profiles:\n  a:\n    inherits: b\n  b:\n    inherits: a\n",
        )
        .expect("yaml");
        assert!(ProfileLoader::get_profile(&doc, "a").is_err());
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(ProfileLoader::parse_yaml("profiles:\n  a:\n    colour: red\n").is_err());
    }

    #[test]
    fn test_json_document() {
        let doc = ProfileLoader::parse_json(
            r#"{"profiles": {"ro": {"is_read_only": true, "max_depth": 8}}}"#,
        )
        .expect("json");
        let opts = ProfileLoader::get_default_profile(&doc).expect("first profile");
        assert!(opts.is_read_only);
        assert_eq!(opts.max_depth, 8);
    }

    #[test]
    fn test_empty_document_yields_defaults() {
        let doc = ProfileLoader::parse_yaml("{}").expect("yaml");
        assert_eq!(
            ProfileLoader::get_default_profile(&doc).expect("defaults"),
            MappingOptions::default()
        );
    }
}
