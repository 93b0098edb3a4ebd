//! Transformations for the country detail view
//!
//! Builds a flat, display-ready [`CountryDetail`] out of a full record plus
//! the records of its bordering countries.

use serde::Serialize;

use crate::collate::sort_by_name;
use crate::country::{Country, Currency};

/// Border country rendered as a navigation target.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct BorderLink {
    pub name: String,
    pub code: Option<String>,
    pub show_command: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct CountryDetail {
    pub name: String,
    pub official_name: String,
    pub code: Option<String>,
    pub native_names: Vec<String>,
    pub population: u64,
    pub population_display: String,
    pub region: Option<String>,
    pub subregion: Option<String>,
    pub capitals: Vec<String>,
    pub tlds: Vec<String>,
    pub currencies: Vec<String>,
    pub languages: Vec<String>,
    pub flag: Option<String>,
    pub map: Option<String>,
    pub borders: Vec<BorderLink>,
}

/// Group digits in threes: `32971846` becomes `"32,971,846"`.
pub fn format_population(population: u64) -> String {
    let digits = population.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    grouped
}

/// `"Peruvian sol (S/)"`, or just the name when there is no symbol.
pub fn format_currency(currency: &Currency) -> String {
    match currency.symbol.as_deref().map(str::trim) {
        Some(symbol) if !symbol.is_empty() => format!("{} ({symbol})", currency.name),
        _ => currency.name.clone(),
    }
}

/// Command that opens the detail view for `name`, quoted when needed.
pub fn show_command(name: &str) -> String {
    if name.chars().any(|c| c.is_whitespace() || c == '\'' || c == '"') {
        format!("countries show \"{}\"", name.replace('"', "\\\""))
    } else {
        format!("countries show {name}")
    }
}

pub fn build_detail(country: &Country, borders: &[Country]) -> CountryDetail {
    let mut native_names: Vec<String> = Vec::new();
    if let Some(natives) = &country.name.native_name {
        for native in natives.values() {
            if !native.common.is_empty() && !native_names.contains(&native.common) {
                native_names.push(native.common.clone());
            }
        }
    }

    let currencies = country
        .currencies
        .as_ref()
        .map(|currencies| currencies.values().map(format_currency).collect())
        .unwrap_or_default();

    let mut borders = borders.to_vec();
    sort_by_name(&mut borders);
    let borders = borders
        .iter()
        .map(|border| BorderLink {
            name: border.display_name().to_string(),
            code: border.cca3.clone(),
            show_command: show_command(border.display_name()),
        })
        .collect();

    CountryDetail {
        name: country.display_name().to_string(),
        official_name: country.name.official.clone(),
        code: country.cca3.clone(),
        native_names,
        population: country.population,
        population_display: format_population(country.population),
        region: country.region.clone(),
        subregion: country.subregion.clone(),
        capitals: country.capital.clone().unwrap_or_default(),
        tlds: country.tld.clone().unwrap_or_default(),
        currencies,
        languages: country
            .language_names()
            .into_iter()
            .map(str::to_string)
            .collect(),
        flag: country.flag_url().map(str::to_string),
        map: country
            .maps
            .as_ref()
            .and_then(|maps| maps.google_maps.clone().or(maps.open_street_maps.clone())),
        borders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::country::{CountryName, Maps, NativeName};
    use std::collections::BTreeMap;

    fn peru() -> Country {
        let mut peru = Country::named("Peru");
        peru.name = CountryName {
            common: "Peru".to_string(),
            official: "Republic of Peru".to_string(),
            native_name: Some(BTreeMap::from([
                (
                    "aym".to_string(),
                    NativeName {
                        official: "Piruw Suyu".to_string(),
                        common: "Piruw".to_string(),
                    },
                ),
                (
                    "que".to_string(),
                    NativeName {
                        official: "Piruw Ripuwlika".to_string(),
                        common: "Piruw".to_string(),
                    },
                ),
                (
                    "spa".to_string(),
                    NativeName {
                        official: "República del Perú".to_string(),
                        common: "Perú".to_string(),
                    },
                ),
            ])),
        };
        peru.cca3 = Some("PER".to_string());
        peru.population = 32971846;
        peru.region = Some("Americas".to_string());
        peru.capital = Some(vec!["Lima".to_string()]);
        peru.currencies = Some(BTreeMap::from([(
            "PEN".to_string(),
            Currency {
                name: "Peruvian sol".to_string(),
                symbol: Some("S/ ".to_string()),
            },
        )]));
        peru.maps = Some(Maps {
            google_maps: Some("https://goo.gl/maps/peru".to_string()),
            open_street_maps: None,
        });
        peru
    }

    #[test]
    fn test_format_population() {
        assert_eq!(format_population(0), "0");
        assert_eq!(format_population(999), "999");
        assert_eq!(format_population(1000), "1,000");
        assert_eq!(format_population(32971846), "32,971,846");
        assert_eq!(format_population(1402112000), "1,402,112,000");
    }

    #[test]
    fn test_format_currency() {
        let sol = Currency {
            name: "Peruvian sol".to_string(),
            symbol: Some("S/ ".to_string()),
        };
        let unnamed = Currency {
            name: "Kiribati dollar".to_string(),
            symbol: None,
        };

        assert_eq!(format_currency(&sol), "Peruvian sol (S/)");
        assert_eq!(format_currency(&unnamed), "Kiribati dollar");
    }

    #[test]
    fn test_show_command_quotes_when_needed() {
        assert_eq!(show_command("Peru"), "countries show Peru");
        assert_eq!(
            show_command("United States"),
            "countries show \"United States\""
        );
        assert_eq!(
            show_command("Côte d'Ivoire"),
            "countries show \"Côte d'Ivoire\""
        );
    }

    #[test]
    fn test_build_detail() {
        let borders = vec![
            Country::named("Ecuador"),
            Country::named("Bolivia"),
            Country::named("Brazil"),
        ];

        let detail = build_detail(&peru(), &borders);

        assert_eq!(detail.name, "Peru");
        assert_eq!(detail.official_name, "Republic of Peru");
        assert_eq!(detail.native_names, vec!["Piruw", "Perú"]);
        assert_eq!(detail.population_display, "32,971,846");
        assert_eq!(detail.capitals, vec!["Lima"]);
        assert_eq!(detail.currencies, vec!["Peruvian sol (S/)"]);
        assert_eq!(detail.map.as_deref(), Some("https://goo.gl/maps/peru"));

        let border_names: Vec<&str> = detail.borders.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(border_names, vec!["Bolivia", "Brazil", "Ecuador"]);
        assert_eq!(detail.borders[0].show_command, "countries show Bolivia");
    }

    #[test]
    fn test_build_detail_sparse_record() {
        let detail = build_detail(&Country::named("Antarctica"), &[]);

        assert!(detail.native_names.is_empty());
        assert!(detail.capitals.is_empty());
        assert!(detail.currencies.is_empty());
        assert!(detail.languages.is_empty());
        assert!(detail.borders.is_empty());
        assert!(detail.flag.is_none());
        assert_eq!(detail.population_display, "0");
    }
}
