use crate::prelude::*;
use clap::Parser;

mod api;
mod browse;
mod error;
mod facets;
mod list;
mod mcp;
mod prelude;
mod show;
mod tour;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "Browse, search and inspect country data from restcountries.com"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// Base URL of the restcountries API
    #[clap(
        long,
        env = "COUNTRIES_API_BASE",
        global = true,
        default_value = countries_core::query::DEFAULT_API_BASE
    )]
    api_base: String,

    /// Request timeout in seconds
    #[clap(long, env = "COUNTRIES_TIMEOUT_SECS", global = true, default_value = "30")]
    timeout_secs: u64,

    /// Whether to display additional information.
    #[clap(long, env = "COUNTRIES_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// List countries, optionally narrowed by region, language and name
    List(crate::list::ListOptions),

    /// Show the regions and languages available as filters
    Facets(crate::facets::FacetsOptions),

    /// Show one country and its neighbours
    Show(crate::show::ShowOptions),

    /// Search interactively, loading more rows as you scroll
    Browse(crate::browse::BrowseOptions),

    /// Step through the catalog one country at a time
    Tour(crate::tour::TourOptions),

    /// Model Context Protocol server
    MCP(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::List(options) => crate::list::run(options, app.global).await,
        SubCommands::Facets(options) => crate::facets::run(options, app.global).await,
        SubCommands::Show(options) => crate::show::run(options, app.global).await,
        SubCommands::Browse(options) => crate::browse::run(options, app.global).await,
        SubCommands::Tour(options) => crate::tour::run(options, app.global).await,
        SubCommands::MCP(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
