mod annotate;
mod sizes;

use anyhow::Result;
use clap::{ArgMatches, Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const PKG_NAME: &str = "qregions";
    pub const BIN_NAME: &str = "qregions";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .about("Annotate sorted variant records with the labeled genomic regions they overlap.")
        .subcommand_required(true)
        .arg(arg!(-v --verbose "Log debug messages").global(true))
        .subcommand(annotate::cli::create_annotate_cli())
        .subcommand(sizes::cli::create_sizes_cli())
}

fn init_logging(matches: &ArgMatches) {
    let default_level = if matches.get_flag("verbose") {
        "debug"
    } else {
        "info"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();
}

fn main() -> Result<()> {
    let app = build_parser();
    let matches = app.get_matches();

    init_logging(&matches);
    log::debug!("{} {}", consts::PKG_NAME, consts::VERSION);

    match matches.subcommand() {
        //
        // ANNOTATE
        //
        Some((annotate::cli::ANNOTATE_CMD, matches)) => {
            annotate::handlers::run_annotate(matches)?;
        }

        //
        // SIZES
        //
        Some((sizes::cli::SIZES_CMD, matches)) => {
            sizes::handlers::run_sizes(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}
