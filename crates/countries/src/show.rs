use crate::api::CountriesClient;
use crate::prelude::{eprintln, println, *};
use colored::Color;
use countries_core::detail::{build_detail, CountryDetail};

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ShowOptions {
    /// Exact country name (e.g. "Peru" or "United States")
    pub name: String,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(options: ShowOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Looking up {}", options.name);
    }

    let client = CountriesClient::from_global(&global)?;
    let detail = show_data(&client, &options.name).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&detail)?;
        println!("{}", json);
    } else {
        print!("{}", format_detail_text(&detail));
    }

    Ok(())
}

/// Fetches a country by exact name plus its border countries
pub async fn show_data(client: &CountriesClient, name: &str) -> Result<CountryDetail> {
    let country = client
        .find_by_name(name)
        .await
        .map_err(Error::from)
        .wrap_err_with(|| f!("Failed to load country {name}"))?;

    let borders = client.border_countries(&country).await;

    Ok(build_detail(&country, &borders))
}

fn join_or_na(values: &[String]) -> String {
    if values.is_empty() {
        "N/A".to_string()
    } else {
        values.join(", ")
    }
}

fn format_detail_text(detail: &CountryDetail) -> String {
    let mut result = String::new();

    result.push_str(&heading(&detail.name.to_uppercase(), Color::BrightCyan));

    let mut table = new_table();
    table.add_row(prettytable::row!["Official name", detail.official_name]);
    table.add_row(prettytable::row!["Native name", join_or_na(&detail.native_names)]);
    table.add_row(prettytable::row!["Population", detail.population_display]);
    table.add_row(prettytable::row![
        "Region",
        detail.region.as_deref().unwrap_or("N/A")
    ]);
    table.add_row(prettytable::row![
        "Subregion",
        detail.subregion.as_deref().unwrap_or("N/A")
    ]);
    table.add_row(prettytable::row!["Capital", join_or_na(&detail.capitals)]);
    table.add_row(prettytable::row!["Top level domain", join_or_na(&detail.tlds)]);
    table.add_row(prettytable::row!["Currencies", join_or_na(&detail.currencies)]);
    table.add_row(prettytable::row!["Languages", join_or_na(&detail.languages)]);
    if let Some(flag) = &detail.flag {
        table.add_row(prettytable::row!["Flag", flag]);
    }
    if let Some(map) = &detail.map {
        table.add_row(prettytable::row!["Map", map]);
    }
    result.push('\n');
    result.push_str(&table.to_string());

    result.push_str(&heading("BORDER COUNTRIES", Color::BrightYellow));

    if detail.borders.is_empty() {
        result.push_str(&f!("\n{}\n", "No land borders.".bright_black()));
    } else {
        result.push('\n');
        for border in &detail.borders {
            result.push_str(&f!(
                "  {:<32} {}\n",
                border.name.white().bold(),
                border.show_command.cyan()
            ));
        }
    }

    result.push_str(&f!("\n{}:\n", "To get JSON output".bright_white().bold()));
    result.push_str(&f!(
        "  {} --json\n",
        countries_core::detail::show_command(&detail.name).cyan()
    ));
    result.push('\n');
    result
}
