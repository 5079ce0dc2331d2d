use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "relgate",
    about = "Release readiness gate evaluation over canonical evidence bundles",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate release readiness against the committed requirements
    ReadinessCheck {
        /// Candidate release identifier
        #[arg(long)]
        release: String,

        /// Evaluation scope: committed or committed_plus_optional
        #[arg(long, default_value = "committed")]
        scope: String,

        /// Report source: ci_authoritative or local_preview (default:
        /// derived from the CI environment indicator)
        #[arg(long)]
        source: Option<String>,

        /// Evidence root directory
        #[arg(long, default_value = "evidence")]
        evidence_root: String,

        /// Override for the verification-outcomes file
        #[arg(long)]
        outcomes: Option<String>,

        /// Override for the field-test-coverage file
        #[arg(long)]
        coverage: Option<String>,

        /// Canonical specification documents root
        #[arg(long, default_value = "specs")]
        specs_root: String,

        /// Fixed evaluation clock (RFC 3339) for reproducible runs
        #[arg(long)]
        now: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decide whether CI may publish, from a fresh readiness evaluation
    PublicationGate {
        /// Candidate release identifier
        #[arg(long)]
        release: String,

        /// Evaluation scope: committed or committed_plus_optional
        #[arg(long, default_value = "committed")]
        scope: String,

        /// Report source: ci_authoritative or local_preview (default:
        /// derived from the CI environment indicator)
        #[arg(long)]
        source: Option<String>,

        /// Evidence root directory
        #[arg(long, default_value = "evidence")]
        evidence_root: String,

        /// Override for the verification-outcomes file
        #[arg(long)]
        outcomes: Option<String>,

        /// Override for the field-test-coverage file
        #[arg(long)]
        coverage: Option<String>,

        /// Canonical specification documents root
        #[arg(long, default_value = "specs")]
        specs_root: String,

        /// Fixed evaluation clock (RFC 3339) for reproducible runs
        #[arg(long)]
        now: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Evaluate one gate decision and write its canonical evidence bundle
    BundleWrite {
        /// Path to the bundle-write request JSON
        #[arg(long)]
        input: String,

        /// Evidence root directory
        #[arg(long, default_value = "evidence")]
        evidence_root: String,

        /// Fixed write clock (RFC 3339) for reproducible bundles
        #[arg(long)]
        now: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
