//! Command line front end for the Sylver Coinage solver: positional seeds
//! plus `--length`/`--backend`/`--verbose`/`--deep`/`--reverse`/`--json`.

use clap::{Parser, ValueEnum};
use log::error;

use sylver::oracle::KnownPPositions;
use sylver::position::Position;
use sylver::primality::TrialDivision;
use sylver::solver::{NullObserver, PrintObserver, SolveOptions, Solver};
use sylver::store::{MemoryStore, NullStore, StatusStore};

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum BackendKind {
    /// In-process hash map (the default).
    Memory,
    /// No memoization at all.
    None,
}

#[derive(Parser, Debug)]
#[command(name = "sylver", about = "Sylver Coinage position solver.")]
struct Cli {
    /// Positive integer position seeds.
    #[arg(required = true)]
    seeds: Vec<u64>,

    /// Length to use for the underlying bit array.
    #[arg(short, long)]
    length: Option<usize>,

    /// Status store backend to use for memoizing results.
    #[arg(short, long, value_enum, default_value_t = BackendKind::Memory)]
    backend: BackendKind,

    /// Solve verbosely, printing every position visited.
    #[arg(short, long)]
    verbose: bool,

    /// Solve deeply: don't stop the traversal when a P position is found.
    #[arg(short, long)]
    deep: bool,

    /// Traverse gaps in reverse (descending) order.
    #[arg(short, long)]
    reverse: bool,

    /// Print the derived record and final status as JSON instead of the
    /// human-readable summary.
    #[arg(long)]
    json: bool,
}

fn run(cli: &Cli, store: &dyn StatusStore) -> Result<(), sylver::error::SylverError> {
    let position = Position::construct(&cli.seeds, cli.length)?;
    if !cli.json {
        println!("Solving position: {:?}", position.to_record());
    }

    let options = SolveOptions {
        reverse: cli.reverse,
        deep: cli.deep,
        verbose: cli.verbose,
    };
    let primality = TrialDivision;
    let table = KnownPPositions;

    // StatusStore is boxed behind a trait object for the CLI's sake; the
    // solver itself is generic and does not pay for this indirection in
    // library use.
    struct BoxedStore<'a>(&'a dyn StatusStore);
    impl StatusStore for BoxedStore<'_> {
        fn get_status(&self, key: &str) -> Result<sylver::status::Status, sylver::error::SylverError> {
            self.0.get_status(key)
        }
        fn save(
            &self,
            key: &str,
            status: sylver::status::Status,
            replies: &[u64],
        ) -> Result<(), sylver::error::SylverError> {
            self.0.save(key, status, replies)
        }
    }
    let boxed = BoxedStore(store);
    let solver = Solver::new(&boxed, &primality, &table, options);

    let status = if cli.verbose {
        solver.solve(&position, &mut PrintObserver)?
    } else {
        solver.solve(&position, &mut NullObserver)?
    };

    if cli.json {
        let payload = serde_json::json!({
            "record": position.to_record(),
            "status": status.to_string(),
        });
        let rendered = serde_json::to_string_pretty(&payload)
            .map_err(|e| sylver::error::SylverError::BackendError(e.to_string()))?;
        println!("{rendered}");
    } else {
        println!("Solution: {status}");
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.backend {
        BackendKind::Memory => {
            let store = MemoryStore::new();
            run(&cli, &store)
        }
        BackendKind::None => {
            let store = NullStore;
            run(&cli, &store)
        }
    };

    if let Err(err) = result {
        error!("{err}");
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
