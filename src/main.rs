use clap::{Parser as ClapParser, Subcommand};
use mongo_search_query::cli::{self, CliError, CompileOptions, OutputFormat, ParseOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "msq")]
#[command(about = "Compile search queries like `level:error AND type:upload` into MongoDB query documents")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query into a MongoDB query document
    Compile {
        /// The search query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Output encoding
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Print the syntax tree of a query as JSON
    Parse {
        /// The search query (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Compile {
            query,
            pretty,
            format,
        } => read_query(query).and_then(|query| {
            cli::execute_compile(&CompileOptions {
                query,
                pretty,
                format,
            })
        }),
        Commands::Parse { query, pretty } => read_query(query)
            .and_then(|query| cli::execute_parse(&ParseOptions { query, pretty })),
    };

    match result {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

fn read_query(query: Option<String>) -> Result<String, CliError> {
    match query {
        Some(q) => Ok(q),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
        None => Err(CliError::NoInput),
    }
}
