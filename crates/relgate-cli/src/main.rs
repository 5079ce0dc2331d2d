//! Relgate CLI: the `relgate` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use support::EvalOptions;

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::ReadinessCheck {
            release,
            scope,
            source,
            evidence_root,
            outcomes,
            coverage,
            specs_root,
            now,
            json,
        } => commands::readiness_check::run(
            EvalOptions {
                release,
                scope,
                source,
                evidence_root,
                outcomes,
                coverage,
                specs_root,
                now,
            },
            json,
        ),

        Commands::PublicationGate {
            release,
            scope,
            source,
            evidence_root,
            outcomes,
            coverage,
            specs_root,
            now,
            json,
        } => commands::publication_gate::run(
            EvalOptions {
                release,
                scope,
                source,
                evidence_root,
                outcomes,
                coverage,
                specs_root,
                now,
            },
            json,
        ),

        Commands::BundleWrite {
            input,
            evidence_root,
            now,
            json,
        } => commands::bundle_write::run(input, evidence_root, now, json),
    }
}
