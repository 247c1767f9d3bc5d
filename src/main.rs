//! # segalign
//!
//! ```sh
//! segalign 0.1.0
//! sentence alignment of aligned document pairs.
//!
//! USAGE:
//!     segalign <SUBCOMMAND>
//!
//! FLAGS:
//!     -h, --help       Prints help information
//!     -V, --version    Prints version information
//!
//! SUBCOMMANDS:
//!     align      Align sentences of aligned documents with vecalign
//!     extract    Only extract the sentences (and urls) of aligned documents
//!     help       Prints this message or the help of the given subcommand(s)
//! ```
//!
//! Logging is configured with `RUST_LOG` (e.g. `RUST_LOG=segalign=info`).
use structopt::StructOpt;

use segalign::cli;
use segalign::config::{AlignConfig, ExtractConfig};
use segalign::error::Error;
use segalign::pipelines::{Extract, Pipeline, Vecalign};

#[macro_use]
extern crate log;

fn run(opt: cli::Segalign) -> Result<(), Error> {
    match opt {
        cli::Segalign::Align(a) => {
            let config = AlignConfig::from_cli(a)?;
            Vecalign::new(config).run()?;
        }
        cli::Segalign::Extract(e) => {
            let config = ExtractConfig::from_cli(e)?;
            let counts = Extract::new(config).run()?;
            info!(
                "extracted {} src and {} trg sentences",
                counts.src, counts.trg
            );
        }
    };
    Ok(())
}

fn main() {
    env_logger::init();

    let opt = cli::Segalign::from_args();
    debug!("cli args\n{:#?}", opt);

    if let Err(e) = run(opt) {
        error!("{}", e);
        eprintln!("segalign: {}", e);
        std::process::exit(1);
    }
}
