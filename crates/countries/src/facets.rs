use crate::api::CountriesClient;
use crate::prelude::{println, *};
use countries_core::catalog::Catalog;
use countries_core::filter::{languages, regions};
use countries_core::query::CatalogQuery;
use serde::Serialize;

#[derive(Debug, clap::Args, Clone)]
pub struct FacetsOptions {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Values available for `--region` and `--language`
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FacetsOutput {
    pub regions: Vec<String>,
    pub languages: Vec<String>,
}

pub async fn run(options: FacetsOptions, global: crate::Global) -> Result<()> {
    let client = CountriesClient::from_global(&global)?;
    let output = facets_data(&client).await?;

    if options.json {
        let json = serde_json::to_string_pretty(&output)?;
        println!("{}", json);
    } else {
        print!("{}", format_facets_text(&output));
    }

    Ok(())
}

pub async fn facets_data(client: &CountriesClient) -> Result<FacetsOutput> {
    let catalog = client
        .load_catalog(&CatalogQuery::All)
        .await
        .map_err(Error::from)
        .wrap_err("Failed to load the country catalog")?;

    Ok(build_facets(&catalog))
}

fn build_facets(catalog: &Catalog) -> FacetsOutput {
    FacetsOutput {
        regions: regions(catalog.as_slice()),
        languages: languages(catalog.as_slice()),
    }
}

fn format_facets_text(output: &FacetsOutput) -> String {
    let mut result = String::new();

    result.push_str(&f!("\n{}\n", "REGIONS".bright_cyan().bold()));
    for region in &output.regions {
        result.push_str(&f!("  {region}\n"));
    }

    result.push_str(&f!(
        "\n{} ({})\n",
        "LANGUAGES".bright_cyan().bold(),
        output.languages.len()
    ));
    result.push_str(&f!("  {}\n", output.languages.join(", ")));

    result.push_str(&f!("\n{}:\n", "To filter a listing".bright_white().bold()));
    result.push_str(&f!(
        "  {}\n",
        "countries list --region <region> --language <language>".cyan()
    ));
    result.push('\n');
    result
}
