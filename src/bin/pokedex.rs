use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use miette::IntoDiagnostic;
use tracing_subscriber::EnvFilter;

use pokedex_catalog::adapter::Adapter;
use pokedex_catalog::api::{CatalogClient, PokeApiHttpClient};
use pokedex_catalog::config::ConfigLoader;
use pokedex_catalog::domain::PokemonId;
use pokedex_catalog::error::{CatalogError, StoreError};
use pokedex_catalog::output::{
    DetailResult, GalleryResult, JsonOutput, ListResult, OutputMode, TextOutput,
};
use pokedex_catalog::query::{SortKey, SortOrder, TypeSelection, all_types, search_and_sort};
use pokedex_catalog::store::{CollectionStore, InitOutcome};

#[derive(Parser)]
#[command(name = "pokedex")]
#[command(about = "Browse the first-generation Pokédex from PokeAPI")]
#[command(version, author)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<String>,

    #[arg(long, global = true)]
    limit: Option<u32>,

    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(about = "Search and sort the roster")]
    List(ListArgs),
    #[command(about = "Browse artwork filtered by type")]
    Gallery(GalleryArgs),
    #[command(about = "List every type present in the roster")]
    Types,
    #[command(about = "Show one Pokémon with its neighbours")]
    Show(ShowArgs),
}

#[derive(Args)]
struct ListArgs {
    #[arg(long, default_value = "")]
    search: String,

    #[arg(long, value_enum, default_value_t = SortKey::Id)]
    sort: SortKey,

    #[arg(long)]
    desc: bool,
}

#[derive(Args)]
struct GalleryArgs {
    #[arg(long = "type")]
    types: Vec<String>,
}

#[derive(Args)]
struct ShowArgs {
    id: String,
}

#[derive(Debug, thiserror::Error, miette::Diagnostic)]
#[error("We couldn't find that Pokémon. Try another one from the list.")]
struct NotFoundReport;

fn main() -> ExitCode {
    if let Err(report) = run() {
        eprintln!("{report:?}");
        if let Some(err) = report.downcast_ref::<CatalogError>() {
            return ExitCode::from(map_exit_code(err));
        }
        if report.downcast_ref::<NotFoundReport>().is_some() {
            return ExitCode::from(2);
        }
        if report.downcast_ref::<StoreError>().is_some() {
            return ExitCode::from(3);
        }
        return ExitCode::from(1);
    }
    ExitCode::SUCCESS
}

fn map_exit_code(error: &CatalogError) -> u8 {
    match error {
        CatalogError::NotFound(_)
        | CatalogError::InvalidId(_)
        | CatalogError::InvalidSortKey(_) => 2,
        CatalogError::Http(_) | CatalogError::Status { .. } | CatalogError::Decode(_) => 3,
        _ => 1,
    }
}

fn run() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let output_mode = if cli.json {
        OutputMode::Json
    } else {
        OutputMode::Text
    };

    let mut config = ConfigLoader::resolve(cli.config.as_deref())?;
    if let Some(limit) = cli.limit {
        if limit == 0 {
            return Err(CatalogError::ConfigParse("--limit must be positive".to_string()).into());
        }
        config.limit = limit;
    }

    let client = PokeApiHttpClient::from_config(&config)?;
    let store = CollectionStore::with_limit(
        Adapter::with_fanout(client, config.concurrency),
        config.limit,
    );

    match cli.command {
        Commands::List(args) => run_list(&store, args, output_mode),
        Commands::Gallery(args) => run_gallery(&store, args, output_mode),
        Commands::Types => run_types(&store, output_mode),
        Commands::Show(args) => run_show(&store, args, output_mode),
    }
}

fn load_collection<C: CatalogClient>(store: &CollectionStore<C>) -> miette::Result<()> {
    match store.initialize() {
        InitOutcome::Loaded(_) => Ok(()),
        InitOutcome::Failed | InitOutcome::Discarded => Err(store
            .error()
            .unwrap_or(StoreError::CollectionLoadFailed)
            .into()),
    }
}

fn run_list<C: CatalogClient>(
    store: &CollectionStore<C>,
    args: ListArgs,
    output_mode: OutputMode,
) -> miette::Result<()> {
    load_collection(store)?;
    let items = store.items();
    let order = if args.desc {
        SortOrder::Desc
    } else {
        SortOrder::Asc
    };
    let result = ListResult {
        total: items.len(),
        items: search_and_sort(&items, &args.search, args.sort, order),
        search: args.search,
        sort: args.sort,
        order,
    };
    match output_mode {
        OutputMode::Json => JsonOutput::print(&result).into_diagnostic(),
        OutputMode::Text => {
            TextOutput::print_list(&result);
            Ok(())
        }
    }
}

fn run_gallery<C: CatalogClient>(
    store: &CollectionStore<C>,
    args: GalleryArgs,
    output_mode: OutputMode,
) -> miette::Result<()> {
    load_collection(store)?;
    let items = store.items();
    let selection: TypeSelection = args.types.iter().map(|t| t.trim().to_lowercase()).collect();
    let result = GalleryResult {
        available_types: all_types(&items),
        selected_types: selection.as_slice().to_vec(),
        total: items.len(),
        items: selection.apply(&items),
    };
    match output_mode {
        OutputMode::Json => JsonOutput::print(&result).into_diagnostic(),
        OutputMode::Text => {
            TextOutput::print_gallery(&result);
            Ok(())
        }
    }
}

fn run_types<C: CatalogClient>(
    store: &CollectionStore<C>,
    output_mode: OutputMode,
) -> miette::Result<()> {
    load_collection(store)?;
    let types = all_types(&store.items());
    match output_mode {
        OutputMode::Json => JsonOutput::print(&types).into_diagnostic(),
        OutputMode::Text => {
            for type_name in types {
                println!("{type_name}");
            }
            Ok(())
        }
    }
}

fn run_show<C: CatalogClient>(
    store: &CollectionStore<C>,
    args: ShowArgs,
    output_mode: OutputMode,
) -> miette::Result<()> {
    let Ok(id) = args.id.parse::<PokemonId>() else {
        return Err(NotFoundReport.into());
    };
    load_collection(store)?;
    let Some(pokemon) = store.load_by_id(id) else {
        return Err(NotFoundReport.into());
    };
    let result = DetailResult::new(pokemon, store.neighbors(id));
    match output_mode {
        OutputMode::Json => JsonOutput::print(&result).into_diagnostic(),
        OutputMode::Text => {
            TextOutput::print_detail(&result);
            Ok(())
        }
    }
}
