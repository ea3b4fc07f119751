use clap::Parser;

use crate::opts::{Opts, Subcommand};
use crate::prelude::*;

mod cli;
mod helpers;
mod opts;
mod prelude;
mod regression;
mod web;

#[tokio::main]
async fn main() -> Result {
    let opts = Opts::parse();
    let _sentry_guard = helpers::tracing::init(opts.sentry_dsn, opts.traces_sample_rate)?;
    info!(version = env!("CARGO_PKG_VERSION"), "starting…");

    match opts.subcommand {
        Subcommand::Web(opts) => web::run(&opts.host, opts.port).await,
        Subcommand::Train(opts) => cli::train(&opts),
        Subcommand::Predict(opts) => cli::predict(&opts),
    }
}
