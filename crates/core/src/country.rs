use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Country record as returned by the restcountries v3.1 API.
///
/// Only `name` is required. Everything else is optional because list
/// queries project a subset of fields with `?fields=`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: CountryName,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cca3: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subregion: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub population: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<Flags>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maps: Option<Maps>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub borders: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tld: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currencies: Option<BTreeMap<String, Currency>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CountryName {
    #[serde(default)]
    pub common: String,
    #[serde(default)]
    pub official: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub native_name: Option<BTreeMap<String, NativeName>>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NativeName {
    #[serde(default)]
    pub official: String,
    #[serde(default)]
    pub common: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Flags {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub png: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub svg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Maps {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub google_maps: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub open_street_maps: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Currency {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
}

impl Country {
    /// Minimal record with just a common name. Mostly useful for fixtures.
    pub fn named(name: &str) -> Self {
        Self {
            name: CountryName {
                common: name.to_string(),
                official: name.to_string(),
                native_name: None,
            },
            cca3: None,
            region: None,
            subregion: None,
            capital: None,
            population: 0,
            languages: None,
            flags: None,
            maps: None,
            borders: None,
            tld: None,
            currencies: None,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name.common
    }

    /// Language names (not codes), in code order.
    pub fn language_names(&self) -> Vec<&str> {
        self.languages
            .as_ref()
            .map(|langs| langs.values().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn flag_url(&self) -> Option<&str> {
        self.flags
            .as_ref()
            .and_then(|flags| flags.svg.as_deref().or(flags.png.as_deref()))
    }

    pub fn border_codes(&self) -> &[String] {
        self.borders.as_deref().unwrap_or(&[])
    }
}
