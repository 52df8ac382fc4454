use cardcat_core::*;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cardcat")]
#[command(about = "Card catalog query compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the catalog vocabulary snapshot (JSON)
    #[arg(long, global = true)]
    vocabulary: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile filters into query text
    Query {
        /// Filter expression, applied in order: `attr:value`, `-attr:value`,
        /// `power>=3`, `mana:R=2`
        #[arg(short, long = "filter", value_name = "EXPR", allow_hyphen_values = true)]
        filters: Vec<String>,

        /// How name filters match (overrides config)
        #[arg(long, value_enum)]
        name_match: Option<NameMatchArg>,
    },

    /// List a vocabulary, one value per line, sorted
    Vocab {
        #[arg(value_enum)]
        kind: VocabKind,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum NameMatchArg {
    Contains,
    Prefix,
    Exact,
}

impl From<NameMatchArg> for NameMatch {
    fn from(arg: NameMatchArg) -> Self {
        match arg {
            NameMatchArg::Contains => NameMatch::Contains,
            NameMatchArg::Prefix => NameMatch::Prefix,
            NameMatchArg::Exact => NameMatch::Exact,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum VocabKind {
    Supertypes,
    Types,
    Subtypes,
    Rarities,
    Colors,
    ManaSymbols,
    MultiFaceTypes,
    Blocks,
    Artists,
    Sets,
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        // 2 for rejected input, 1 for environmental failures.
        std::process::exit(if e.is_validation() { 2 } else { 1 });
    }
}

fn run(cli: Cli) -> Result<()> {
    cardcat_core::logging::init_with_level(cardcat_core::logging::level_for_verbosity(
        cli.verbose,
    ));

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(path) = cli.vocabulary {
        config.catalog.vocabulary_path = Some(path);
    }

    let vocabulary = config.vocabulary()?;

    match cli.command {
        Commands::Query {
            filters,
            name_match,
        } => cmd_query(&config, &vocabulary, &filters, name_match),
        Commands::Vocab { kind } => {
            cmd_vocab(&*vocabulary, kind);
            Ok(())
        }
    }
}

fn cmd_query(
    config: &Config,
    vocabulary: &CatalogVocabulary,
    filters: &[String],
    name_match: Option<NameMatchArg>,
) -> Result<()> {
    let mut query = config.query(vocabulary);
    if let Some(mode) = name_match {
        query = query.with_name_match(mode.into());
    }

    for expr in filters {
        query.apply(expr)?;
    }

    tracing::info!("Compiled {} filter clause(s)", query.len());
    println!("{}", query.as_query());
    Ok(())
}

fn cmd_vocab(source: &dyn VocabularySource, kind: VocabKind) {
    let values = match kind {
        VocabKind::Supertypes => source.supertypes(),
        VocabKind::Types => source.types(),
        VocabKind::Subtypes => source.subtypes(),
        VocabKind::Rarities => source.rarities(),
        VocabKind::Colors => source.colors(),
        VocabKind::ManaSymbols => source.mana_symbols(),
        VocabKind::MultiFaceTypes => source.multi_face_types(),
        VocabKind::Blocks => source.blocks(),
        VocabKind::Artists => source.artists(),
        VocabKind::Sets => source.sets(),
    };

    for value in values {
        println!("{}", value);
    }
}
