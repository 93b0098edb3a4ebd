use crate::api::CountriesClient;
use crate::prelude::{eprintln, println, *};
use colored::Color;
use countries_core::browse::{plan_facets, BrowseSession, Facets};
use countries_core::country::Country;
use countries_core::detail::{format_population, show_command};
use countries_core::loader::{LoaderConfig, CHUNK_SIZE, INITIAL_CHUNK};
use countries_core::window::{window_info, WindowInfo};
use serde::Serialize;

#[derive(Debug, clap::Args, serde::Serialize, serde::Deserialize, Clone)]
pub struct ListOptions {
    /// Only countries in this region (e.g. "Europe")
    #[arg(short, long)]
    pub region: Option<String>,

    /// Only countries speaking this language (e.g. "Spanish")
    #[arg(short = 'L', long)]
    pub language: Option<String>,

    /// Case-insensitive substring of the country name
    #[arg(short, long)]
    pub search: Option<String>,

    /// Number of countries to show
    #[arg(short, long, env = "COUNTRIES_LIMIT", default_value_t = INITIAL_CHUNK)]
    pub limit: usize,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Individual list row
#[derive(Debug, Serialize, Clone)]
pub struct ListItem {
    pub name: String,
    pub code: Option<String>,
    pub capital: Option<String>,
    pub region: Option<String>,
    pub population: u64,
    pub flag: Option<String>,
    pub map: Option<String>,
}

/// Complete list output with window metadata
#[derive(Debug, Serialize, Clone)]
pub struct ListOutput {
    pub query: String,
    pub search: String,
    pub countries: Vec<ListItem>,
    pub window: WindowInfo,
}

impl From<&Country> for ListItem {
    fn from(country: &Country) -> Self {
        Self {
            name: country.display_name().to_string(),
            code: country.cca3.clone(),
            capital: country
                .capital
                .as_ref()
                .filter(|capitals| !capitals.is_empty())
                .map(|capitals| capitals.join(", ")),
            region: country.region.clone(),
            population: country.population,
            flag: country.flag_url().map(str::to_string),
            map: country.maps.as_ref().and_then(|maps| maps.google_maps.clone()),
        }
    }
}

pub async fn run(options: ListOptions, global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("API base: {}", global.api_base);
    }

    let client = CountriesClient::from_global(&global)?;
    let output = list_data(
        &client,
        options.region.clone(),
        options.language.clone(),
        options.search.clone(),
        options.limit,
    )
    .await?;

    if options.json {
        println!("{}", format_list_json(&output)?);
    } else {
        print!("{}", format_list_text(&output));
    }

    Ok(())
}

/// Fetches the catalog for the facets and returns the first `limit` matches
pub async fn list_data(
    client: &CountriesClient,
    region: Option<String>,
    language: Option<String>,
    search: Option<String>,
    limit: usize,
) -> Result<ListOutput> {
    if limit == 0 {
        return Err(Error::InvalidArgument("--limit must be at least 1".to_string()).into());
    }

    let (query, facets) = plan_facets(region.as_deref(), language.as_deref());
    let catalog = client
        .load_catalog(&query)
        .await
        .map_err(Error::from)
        .wrap_err_with(|| f!("Failed to load {}", query.describe()))?;

    let search = search.unwrap_or_default();
    Ok(build_list_output(
        catalog,
        facets,
        query.describe(),
        &search,
        limit,
        &list_command(region.as_deref(), language.as_deref(), &search),
    ))
}

fn build_list_output(
    catalog: countries_core::catalog::Catalog,
    facets: Facets,
    query: String,
    search: &str,
    limit: usize,
    command_base: &str,
) -> ListOutput {
    let mut session = BrowseSession::new(
        LoaderConfig {
            initial_chunk: limit,
            ..LoaderConfig::default()
        },
        facets,
    );
    session.load(catalog);
    session.set_term(search);

    let page = session.page();
    let countries = page.shown.iter().map(|country| ListItem::from(*country)).collect();

    ListOutput {
        query,
        search: search.to_string(),
        countries,
        window: window_info(page.total_matches, limit, CHUNK_SIZE, command_base),
    }
}

/// The command line that reproduces a listing, without `--limit`.
pub fn list_command(region: Option<&str>, language: Option<&str>, search: &str) -> String {
    let mut command = "countries list".to_string();
    for (flag, value) in [("--region", region), ("--language", language)] {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            command.push_str(&f!(" {flag} {}", quote(value)));
        }
    }
    if !search.is_empty() {
        command.push_str(&f!(" --search {}", quote(search)));
    }
    command
}

fn quote(value: &str) -> String {
    if value.chars().any(char::is_whitespace) {
        f!("\"{value}\"")
    } else {
        value.to_string()
    }
}

fn format_list_json(output: &ListOutput) -> Result<String> {
    serde_json::to_string_pretty(output).map_err(|e| eyre!("JSON serialization failed: {}", e))
}

fn format_list_text(output: &ListOutput) -> String {
    let mut result = String::new();

    let title = if output.search.is_empty() {
        f!("COUNTRIES: {}", output.query.to_uppercase())
    } else {
        f!(
            "COUNTRIES: {} MATCHING \"{}\"",
            output.query.to_uppercase(),
            output.search
        )
    };
    result.push_str(&heading(&title, Color::BrightCyan));

    if output.countries.is_empty() {
        result.push_str(&f!("\n{}\n", "No countries found.".yellow()));
    } else {
        let mut table = new_table();
        table.add_row(prettytable::row!["#", "Name", "Capital", "Region", "Population"]);
        for (idx, item) in output.countries.iter().enumerate() {
            table.add_row(prettytable::row![
                idx + 1,
                item.name,
                item.capital.as_deref().unwrap_or("N/A"),
                item.region.as_deref().unwrap_or("N/A"),
                format_population(item.population)
            ]);
        }
        result.push('\n');
        result.push_str(&table.to_string());
    }

    result.push_str(&heading("NAVIGATION", Color::BrightYellow));

    result.push_str(&f!(
        "\n{} {} {} {} {}\n",
        "Showing".bright_white(),
        output.window.shown.to_string().bright_cyan().bold(),
        "of".bright_white(),
        output.window.total_matches.to_string().bright_cyan().bold(),
        "matching countries".bright_white()
    ));

    match &output.window.next_window_command {
        Some(command) => {
            result.push_str(&f!("\n{}:\n", "To show more".bright_white().bold()));
            result.push_str(&f!("  {}\n", command.cyan()));
        }
        None => {
            result.push_str(&f!("\n{}\n", "End of the list.".bright_black()));
        }
    }

    if let Some(first) = output.countries.first() {
        result.push_str(&f!("\n{}:\n", "To see a country".bright_white().bold()));
        result.push_str(&f!("  {}\n", "countries show <name>".cyan()));
        result.push_str(&f!(
            "  {}: {}\n",
            "Example".green(),
            show_command(&first.name).cyan()
        ));
    }

    result.push_str(&f!("\n{}:\n", "To browse interactively".bright_white().bold()));
    result.push_str(&f!("  {}\n", "countries browse".cyan()));

    result.push('\n');
    result
}
