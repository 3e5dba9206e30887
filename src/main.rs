use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use modrinth_client::config::{find_config_file, ClientConfig};
use modrinth_client::models::{
    HashAlgorithm, Project, ProjectDependencies, SearchCriteria, SortIndex, User, Version,
};
use modrinth_client::utils::download_file;
use modrinth_client::{FileSelection, FileSelector, HttpGateway, ModrinthClient};
use serde::Serialize;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Modrinth - Search projects and resolve versions and files on Modrinth
#[derive(Parser, Debug)]
#[command(name = "modrinth")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Search Modrinth projects and resolve versions, files and users", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(long, short, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, short, value_enum, global = true, default_value_t = OutputFormat::Auto)]
    output: OutputFormat,

    /// Configuration file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Request timeout in seconds (overrides the config file)
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// API base URL (overrides the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for results
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Automatic based on terminal (table if TTY, JSON otherwise)
    Auto,
    /// Table format (human-readable)
    Table,
    /// JSON format (machine-readable)
    Json,
    /// Plain text format
    Plain,
}

/// Hash algorithm argument
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum HashArg {
    Sha1,
    Sha512,
}

impl From<HashArg> for HashAlgorithm {
    fn from(arg: HashArg) -> Self {
        match arg {
            HashArg::Sha1 => HashAlgorithm::Sha1,
            HashArg::Sha512 => HashAlgorithm::Sha512,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Search projects
    #[command(alias = "s")]
    Search {
        /// Search query string
        query: String,

        /// Category facet (repeatable)
        #[arg(long, short)]
        category: Vec<String>,

        /// Game version facet (repeatable)
        #[arg(long, short = 'g')]
        game_version: Vec<String>,

        /// Project type facet (repeatable, e.g. mod, modpack)
        #[arg(long, short = 't')]
        project_type: Vec<String>,

        /// License facet (repeatable)
        #[arg(long, short)]
        license: Vec<String>,

        /// Sort index: relevance, downloads, follows, newest, updated
        #[arg(long, default_value = "relevance")]
        index: SortIndex,

        /// Number of hits to skip
        #[arg(long, default_value_t = 0)]
        offset: usize,

        /// Maximum number of hits (defaults to the configured page size)
        #[arg(long, short = 'n')]
        limit: Option<usize>,

        /// Raw filter expression
        #[arg(long)]
        filters: Option<String>,
    },

    /// Show a project
    #[command(alias = "p")]
    Project {
        /// Project ID or slug
        id: String,

        /// List the project's dependencies instead
        #[arg(long)]
        dependencies: bool,
    },

    /// Show a version of a project and its files
    #[command(alias = "v")]
    Version {
        /// Project ID or slug
        project: String,

        /// Version ID (defaults to the latest listed version)
        #[arg(value_name = "VERSION")]
        version_id: Option<String>,

        /// Show every version of the project
        #[arg(long, conflicts_with = "version_id")]
        all: bool,

        /// Hash algorithm for file hashes
        #[arg(long, value_enum, default_value_t = HashArg::Sha1)]
        hash: HashArg,

        /// Leave out the primary file
        #[arg(long)]
        no_primary: bool,

        /// Leave out optional files
        #[arg(long)]
        no_optional: bool,
    },

    /// Show a user profile
    #[command(alias = "u")]
    User {
        /// User ID or username
        id: String,
    },

    /// Download a version file, verified against its sha512
    #[command(alias = "d")]
    Download {
        /// Project ID or slug
        project: String,

        /// Version ID
        #[arg(value_name = "VERSION")]
        version_id: String,

        /// Hash of the file to download (defaults to the primary file)
        #[arg(long)]
        hash: Option<String>,

        /// Algorithm of --hash
        #[arg(long, value_enum, default_value_t = HashArg::Sha1)]
        algorithm: HashArg,

        /// Directory to save into (defaults to the configured download path)
        #[arg(long)]
        output_dir: Option<PathBuf>,
    },

    /// Follow a project (needs a token)
    Follow {
        /// Project ID or slug
        project: String,
    },

    /// Unfollow a project (needs a token)
    Unfollow {
        /// Project ID or slug
        project: String,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in default locations
    let found = cli.config.clone().or_else(find_config_file);
    let mut config = match &found {
        Some(path) => ClientConfig::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display()))?,
        None => ClientConfig::default(),
    };

    init_tracing(&cli, &config);
    if let Some(path) = &found {
        tracing::info!("Using config file: {}", path.display());
    }

    if let Some(timeout) = cli.timeout {
        config.api.timeout_secs = timeout;
    }
    if let Some(base_url) = &cli.base_url {
        config.api.base_url = base_url.clone();
    }

    let gateway = HttpGateway::new(&config.api)?;
    let client = ModrinthClient::with_gateway(Arc::new(gateway.clone()))
        .max_concurrent_requests(config.search.max_concurrent_requests);
    let format = resolve_format(cli.output);

    match cli.command {
        Commands::Search {
            query,
            category,
            game_version,
            project_type,
            license,
            index,
            offset,
            limit,
            filters,
        } => {
            let criteria = SearchCriteria {
                query,
                categories: category,
                versions: game_version,
                project_types: project_type,
                licenses: license,
                index,
                offset,
                limit: limit.unwrap_or(config.search.default_limit),
                filters: filters.unwrap_or_default(),
            };

            let result = client.search(&criteria).await?;
            if !cli.quiet && format != OutputFormat::Json {
                eprintln!(
                    "Showing {} of {} projects (offset {})",
                    result.len(),
                    result.total,
                    result.offset
                );
            }
            match format {
                OutputFormat::Json => print_json(&result)?,
                _ => output_projects(&result.hits, format),
            }
        }

        Commands::Project { id, dependencies } => {
            let project = client.resolve_project(&id).await?;
            if dependencies {
                let deps = client.project_dependencies(&project).await?;
                output_dependencies(&deps, format)?;
            } else {
                match format {
                    OutputFormat::Json => print_json(&project)?,
                    _ => output_project_details(&project),
                }
            }
        }

        Commands::Version {
            project,
            version_id,
            all,
            hash,
            no_primary,
            no_optional,
        } => {
            let project = client.resolve_project(&project).await?;
            let versions = if all {
                client.resolve_versions(&project, &project.versions).await?
            } else if let Some(id) = version_id {
                vec![client.resolve_version(&project, &id).await?]
            } else {
                vec![client.latest_version(&project).await?]
            };

            let selection = FileSelection::from_flags(!no_primary, !no_optional);
            output_versions(&versions, selection, hash.into(), format)?;
        }

        Commands::User { id } => {
            let user = client.resolve_user(&id).await?;
            match format {
                OutputFormat::Json => print_json(&user)?,
                _ => output_user(&user),
            }
        }

        Commands::Download {
            project,
            version_id,
            hash,
            algorithm,
            output_dir,
        } => {
            let project = client.resolve_project(&project).await?;
            let version = client.resolve_version(&project, &version_id).await?;

            let file = match hash {
                Some(hash) => version.find_selected(FileSelection::all(), &hash, algorithm.into())?,
                None => version
                    .selected(FileSelection::PRIMARY)
                    .into_iter()
                    .next()
                    .context("Version has no primary file; pass --hash")?,
            };

            let dir = output_dir.unwrap_or_else(|| config.downloads.default_path.clone());
            let path = download_file(gateway.client(), file, &dir).await?;
            if !cli.quiet {
                println!("Saved {}", path.display());
            }
        }

        Commands::Follow { project } => {
            let token = config
                .api
                .auth_token()
                .context("No token configured: set api.token or MODRINTH_TOKEN")??;
            let project = client.resolve_project(&project).await?;
            client.follow(&project, &token).await?;
            if !cli.quiet {
                println!("Following {}", project.slug);
            }
        }

        Commands::Unfollow { project } => {
            let token = config
                .api
                .auth_token()
                .context("No token configured: set api.token or MODRINTH_TOKEN")??;
            let project = client.resolve_project(&project).await?;
            client.unfollow(&project, &token).await?;
            if !cli.quiet {
                println!("Unfollowed {}", project.slug);
            }
        }

        Commands::Completions { shell } => {
            let mut command = Cli::command();
            clap_complete::generate(shell, &mut command, "modrinth", &mut std::io::stdout());
        }
    }

    Ok(())
}

/// Initialize tracing based on verbosity, `RUST_LOG` and the logging config
fn init_tracing(cli: &Cli, config: &ClientConfig) {
    let log_level = match cli.verbose {
        0 => config.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };

    let env_filter = if cli.quiet { "error" } else { log_level };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| format!("modrinth_client={}", env_filter)),
    );

    if config.logging.is_json() {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn resolve_format(format: OutputFormat) -> OutputFormat {
    if format == OutputFormat::Auto {
        if std::io::stdout().is_terminal() {
            OutputFormat::Table
        } else {
            OutputFormat::Json
        }
    } else {
        format
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let cut: String = text.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    } else {
        text.to_string()
    }
}

fn output_projects(projects: &[Project], format: OutputFormat) {
    match format {
        OutputFormat::Plain => {
            for project in projects {
                println!("{} ({}) - {}", project.title, project.slug, project.project_type);
                println!("  {}", project.description);
                println!("  Downloads: {}  Followers: {}", project.downloads, project.followers);
                println!();
            }
        }
        _ => {
            use comfy_table::{Attribute, Cell, Table};
            let mut table = Table::new();
            table.load_preset(comfy_table::presets::UTF8_FULL);
            table.set_header(vec!["Title", "Slug", "Type", "Downloads", "Sides"]);

            for project in projects {
                let sides = format!("C:{} S:{}", project.client_side, project.server_side);
                table.add_row(vec![
                    Cell::new(truncate(&project.title, 40)).add_attribute(Attribute::Bold),
                    Cell::new(&project.slug),
                    Cell::new(&project.project_type),
                    Cell::new(project.downloads),
                    Cell::new(sides),
                ]);
            }
            println!("{table}");
        }
    }
}

fn output_project_details(project: &Project) {
    println!("{} ({})", project.title, project.slug);
    println!("  ID:          {}", project.id);
    println!("  Type:        {}", project.project_type);
    println!("  Description: {}", project.description);
    println!(
        "  Sides:       client {}, server {}",
        project.client_side, project.server_side
    );
    println!(
        "  Runs on:     client={} server={} universal={}",
        project.is_client_side(),
        project.is_server_side(),
        project.is_universal()
    );
    if let Some(license) = &project.license {
        println!("  License:     {}", license.id);
    }
    println!("  Downloads:   {}", project.downloads);
    println!("  Followers:   {}", project.followers);
    println!("  Versions:    {}", project.versions.len());
    if let Some(source) = &project.source_url {
        println!("  Source:      {}", source);
    }
}

fn output_dependencies(deps: &ProjectDependencies, format: OutputFormat) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(deps);
    }

    output_projects(&deps.projects, format);
    for version in &deps.versions {
        println!(
            "  version {} of {}: {}",
            version.id,
            version.project_id,
            version.version_number.as_deref().unwrap_or("?")
        );
    }
    Ok(())
}

fn output_versions(
    versions: &[Version],
    selection: FileSelection,
    algorithm: HashAlgorithm,
    format: OutputFormat,
) -> Result<()> {
    if format == OutputFormat::Json {
        return print_json(&versions);
    }

    for version in versions {
        println!(
            "{} {} [{}] ({})",
            version.name,
            version.version_number,
            version.version_type,
            version.id
        );
        println!("  Game versions: {}", version.game_versions.join(", "));
        println!("  Loaders:       {}", version.loaders.join(", "));

        use comfy_table::{Cell, Table};
        let mut table = Table::new();
        table.load_preset(comfy_table::presets::UTF8_FULL);
        table.set_header(vec!["File", "Primary", algorithm.as_str(), "URL"]);
        for file in version.selected(selection) {
            table.add_row(vec![
                Cell::new(&file.filename),
                Cell::new(if file.primary { "yes" } else { "" }),
                Cell::new(truncate(file.hashes.get(algorithm), 24)),
                Cell::new(&file.url),
            ]);
        }
        println!("{table}");
    }
    Ok(())
}

fn output_user(user: &User) {
    println!("{} ({})", user.username, user.id);
    if let Some(name) = &user.name {
        println!("  Name:    {}", name);
    }
    println!("  Role:    {}", user.role);
    if let Some(bio) = &user.bio {
        println!("  Bio:     {}", bio);
    }
    if let Some(created) = &user.created {
        println!("  Joined:  {}", created.format("%Y-%m-%d"));
    }
}
