//! Step through every country one card at a time.

use crate::api::CountriesClient;
use crate::prelude::{eprintln, println, *};
use countries_core::country::Country;
use countries_core::detail::{format_population, show_command};
use countries_core::navigator::Navigator;
use countries_core::query::CatalogQuery;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, clap::Args, Clone)]
pub struct TourOptions {
    /// Country to start from (defaults to the first one alphabetically)
    #[arg(long)]
    pub start: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TourCommand {
    Next,
    Previous,
    Seek(String),
    Quit,
}

fn parse_command(line: &str) -> TourCommand {
    match line.trim() {
        "" | "n" | "next" => TourCommand::Next,
        "p" | "prev" | "previous" => TourCommand::Previous,
        ":q" | ":quit" | "q" => TourCommand::Quit,
        name => TourCommand::Seek(name.to_string()),
    }
}

pub async fn run(options: TourOptions, global: crate::Global) -> Result<()> {
    let client = CountriesClient::from_global(&global)?;
    let catalog = client
        .load_catalog(&CatalogQuery::All)
        .await
        .map_err(Error::from)
        .wrap_err("Failed to load the country catalog")?;

    if global.verbose {
        eprintln!("Loaded {} countries", catalog.len());
    }

    let mut navigator = Navigator::new(catalog);
    if navigator.is_empty() {
        println!("{}", "No countries to show.".yellow());
        return Ok(());
    }

    if let Some(start) = &options.start {
        if navigator.seek(start).is_none() {
            eprintln!("{} {start}", "No country named".yellow());
        }
    }

    print_current(&navigator);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_command(&line) {
            TourCommand::Next => {
                navigator.next();
            }
            TourCommand::Previous => {
                navigator.previous();
            }
            TourCommand::Seek(name) => {
                if navigator.seek(&name).is_none() {
                    println!("{} {name}", "No country named".yellow());
                    continue;
                }
            }
            TourCommand::Quit => break,
        }
        print_current(&navigator);
    }

    Ok(())
}

fn print_current(navigator: &Navigator) {
    if let Some(country) = navigator.current() {
        print!(
            "{}",
            format_card(country, navigator.index() + 1, navigator.len())
        );
    }
}

fn format_card(country: &Country, position: usize, total: usize) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "-".repeat(60).bright_black()));
    result.push_str(&f!(
        "{} {}\n",
        f!("[{position}/{total}]").yellow().bold(),
        country.display_name().white().bold()
    ));
    result.push_str(&f!(
        "    {}: {}\n",
        "Capital".green(),
        country
            .capital
            .as_ref()
            .filter(|c| !c.is_empty())
            .map(|c| c.join(", "))
            .unwrap_or_else(|| "N/A".to_string())
    ));
    result.push_str(&f!(
        "    {}: {}\n",
        "Region".green(),
        country.region.as_deref().unwrap_or("N/A")
    ));
    result.push_str(&f!(
        "    {}: {}\n",
        "Population".green(),
        format_population(country.population)
    ));
    if let Some(flag) = country.flag_url() {
        result.push_str(&f!("    {}: {}\n", "Flag".green(), flag.cyan()));
    }
    result.push_str(&f!(
        "    {}: {}\n",
        "Details".green(),
        show_command(country.display_name()).cyan()
    ));
    result.push_str(&f!(
        "{}\n",
        "Enter/n: next  p: previous  <name>: jump  :q: quit".bright_black()
    ));

    result
}
