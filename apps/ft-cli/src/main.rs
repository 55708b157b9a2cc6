use clap::{Parser, Subcommand, ValueEnum};
use ft_codec::{CodecError, load_json, save_json, serialize};
use ft_core::{FtError, MemberId};
use ft_graph::{FamilyGraph, GraphError, Member, Profile, validate_reciprocity};
use std::path::{Path, PathBuf};
use tracing::Level;

#[derive(Parser)]
#[command(name = "ft-cli")]
#[command(about = "Family tree CLI - build, inspect and walk family graphs", long_about = None)]
struct Cli {
    /// Minimum level of log events written to stderr
    #[arg(long, value_enum, default_value_t = LogLevel::Warn, global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the sample family and print (or write) its JSON document
    Demo {
        /// Output JSON file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a family document and check that every edge is mirrored
    Validate {
        /// Path to the family JSON file
        family_path: PathBuf,
    },
    /// Print the detail line of every member
    Show {
        /// Path to the family JSON file
        family_path: PathBuf,
    },
    /// List all ancestors of a member
    Ancestors {
        /// Path to the family JSON file
        family_path: PathBuf,
        /// Member id, or a fragment of their full name
        member: String,
    },
    /// List all descendants of a member
    Descendants {
        /// Path to the family JSON file
        family_path: PathBuf,
        /// Member id, or a fragment of their full name
        member: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Member(#[from] FtError),

    #[error("No member matches '{query}'")]
    NoMatch { query: String },

    #[error("'{query}' matches {count} members; use a member id instead")]
    Ambiguous { query: String, count: usize },

    #[error("{count} relationship problem(s) found")]
    Invalid { count: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Demo { output } => cmd_demo(output.as_deref()),
        Commands::Validate { family_path } => cmd_validate(&family_path),
        Commands::Show { family_path } => cmd_show(&family_path),
        Commands::Ancestors {
            family_path,
            member,
        } => cmd_walk(&family_path, &member, Walk::Ancestors),
        Commands::Descendants {
            family_path,
            member,
        } => cmd_walk(&family_path, &member, Walk::Descendants),
    }
}

fn cmd_demo(output: Option<&Path>) -> CliResult<()> {
    let graph = sample_family()?;
    match output {
        Some(path) => {
            save_json(path, &graph)?;
            println!("✓ Wrote {} members to {}", graph.len(), path.display());
        }
        None => println!("{}", serialize(&graph)?),
    }
    Ok(())
}

fn cmd_validate(family_path: &Path) -> CliResult<()> {
    println!("Validating family: {}", family_path.display());
    let graph = load_json(family_path)?;
    let problems = validate_reciprocity(&graph);
    if problems.is_empty() {
        println!("✓ {} members, all relationships mirrored", graph.len());
        return Ok(());
    }
    for problem in &problems {
        println!("  ✗ {problem}");
    }
    Err(CliError::Invalid {
        count: problems.len(),
    })
}

fn cmd_show(family_path: &Path) -> CliResult<()> {
    let graph = load_json(family_path)?;
    if graph.is_empty() {
        println!("No members found in family");
        return Ok(());
    }
    for member in graph.iter() {
        println!("  {} - {}", member.id(), member.profile().details());
    }
    Ok(())
}

#[derive(Clone, Copy)]
enum Walk {
    Ancestors,
    Descendants,
}

fn cmd_walk(family_path: &Path, query: &str, walk: Walk) -> CliResult<()> {
    let graph = load_json(family_path)?;
    let start = select_member(&graph, query)?;
    let (label, found) = match walk {
        Walk::Ancestors => ("Ancestors", graph.ancestors(start.id())?),
        Walk::Descendants => ("Descendants", graph.descendants(start.id())?),
    };

    if found.is_empty() {
        println!("No {} recorded for {}", label.to_lowercase(), start);
    } else {
        println!("{label} of {start}:");
        for member in found {
            println!("  {}", member.profile().details());
        }
    }
    Ok(())
}

/// Resolve a member by id, falling back to a unique name match.
fn select_member<'g>(graph: &'g FamilyGraph, query: &str) -> CliResult<&'g Member> {
    if let Ok(id) = query.parse::<MemberId>() {
        return Ok(graph.member(id)?);
    }
    let matches = graph.find_by_name(query);
    match matches.as_slice() {
        [] => Err(CliError::NoMatch {
            query: query.to_string(),
        }),
        [member] => Ok(*member),
        _ => Err(CliError::Ambiguous {
            query: query.to_string(),
            count: matches.len(),
        }),
    }
}

/// Three generations: Clarence -> Petra (+ Junie) -> Jerry.
fn sample_family() -> CliResult<FamilyGraph> {
    let mut graph = FamilyGraph::new();
    let jerry = graph.add_member(
        Profile::new("Jerry", "Aska")?
            .with_suffix("Jr")
            .with_death_year(2023),
    );
    let petra = graph.add_member(Profile::new("Petra", "Williams")?);
    let clarence = graph.add_member(Profile::new("Clarence", "Williams")?);
    let junie = graph.add_member(Profile::new("Jerry", "Aska")?.with_suffix("Sr"));

    graph.add_child(petra, jerry, Some(junie))?;
    graph.add_parent(petra, clarence)?;
    Ok(graph)
}
