use clap::{Parser as ClapParser, Subcommand};
use dfql::cli::{self, CheckOptions, CheckResult, CliError, Emit};
use std::io::{self, Read};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "dfql")]
#[command(about = "dfql - translate a small query language into DataFrame API code")]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level unless RUST_LOG is set)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Source text (reads --file or stdin if not provided)
    query: Option<String>,

    /// Read source text from a file
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Skip characters that are not part of any token instead of failing
    #[arg(long)]
    permissive: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate source into DataFrame code
    Transpile {
        #[command(flatten)]
        source: SourceArgs,

        /// Table to select from when a block names none
        #[arg(short, long)]
        default_source: Option<String>,
    },

    /// Print the parsed AST as JSON
    Ast {
        #[command(flatten)]
        source: SourceArgs,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },

    /// Only validate syntax
    Check {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// List documentation categories
    Docs,

    /// Show documentation for a specific category
    Doc {
        /// Category name (use 'dfql docs' to list categories)
        category: String,
    },
}

fn main() {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Transpile {
            source,
            default_source,
        } => run_check(source, Emit::Code, default_source, false),
        Commands::Ast { source, pretty } => run_check(source, Emit::Ast, None, pretty),
        Commands::Check { source } => run_check(source, Emit::SyntaxOnly, None, false),
        Commands::Docs => {
            print!("{}", cli::get_docs_overview());
            Ok(())
        }
        Commands::Doc { category } => match cli::get_doc_category(&category) {
            Ok(content) => {
                print!("{}", content);
                Ok(())
            }
            Err(e) => Err(e),
        },
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("dfql=debug")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_source(args: &SourceArgs) -> Result<String, CliError> {
    if let Some(query) = &args.query {
        return Ok(query.clone());
    }
    if let Some(path) = &args.file {
        tracing::debug!(path = %path.display(), "reading source file");
        return std::fs::read_to_string(path).map_err(CliError::Io);
    }
    if !atty::is(atty::Stream::Stdin) {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer).map_err(CliError::Io)?;
        return Ok(buffer);
    }
    Err(CliError::NoInput)
}

fn run_check(
    source: SourceArgs,
    emit: Emit,
    default_source: Option<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let options = CheckOptions {
        query: read_source(&source)?,
        emit,
        permissive: source.permissive,
        default_source,
    };

    match cli::execute_check(&options)? {
        CheckResult::SyntaxValid => println!("Syntax is valid"),
        CheckResult::Code(code) => println!("{}", code),
        CheckResult::Ast(ast) => {
            if pretty {
                println!("{:#}", ast);
            } else {
                println!("{}", ast);
            }
        }
    }
    Ok(())
}
