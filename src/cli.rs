use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "splice", about = "Symbol-aware lexical source-patch engine", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args)]
pub struct CommonArgs {
    /// Root of the source tree searched for declarations
    /// (default: `SPLICE_ROOT` or the current directory).
    #[arg(long)]
    pub root: Option<PathBuf>,
    /// File to patch (default: `SPLICE_TARGET`).
    #[arg(long)]
    pub target: Option<PathBuf>,
    /// Run all passes and print the report, but leave the file alone.
    #[arg(long)]
    pub dry_run: bool,
    /// Emit the per-pass report as JSON on stdout.
    #[arg(long)]
    pub report_json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Re-point every `use ...::<SYMBOL>;` line at the symbol's declaring file.
    FixImports {
        /// Symbol whose import lines get rewritten.
        symbol: String,
        /// Module path to assume when nothing declares the symbol.
        #[arg(long, default_value = "crate")]
        fallback_module: String,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Insert a tagged entry block directly after a marker line,
    /// retiring any previously injected entries first.
    InjectServices {
        /// Line after which the entries go, e.g. `App::new()`.
        #[arg(long)]
        marker: String,
        /// Name of the entry set; stale entries are tracked per tag.
        #[arg(long)]
        tag: String,
        /// Entry line, repeatable, inserted in the given order.
        #[arg(long = "entry")]
        entries: Vec<String>,
        /// Regex matching previously injected lines to retire
        /// (default: only the current entries themselves).
        #[arg(long)]
        retire: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Replace an entire function (header through balanced body) with the
    /// contents of a file.
    ReplaceFunction {
        /// Function header prefix, e.g. `pub async fn login(`.
        #[arg(long)]
        header: String,
        /// File holding the replacement text.
        #[arg(long = "with")]
        replacement: PathBuf,
        /// Record failure instead of aborting when the header is missing.
        #[arg(long)]
        optional: bool,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Delete a matched region: a literal line, a regex match, or a whole
    /// function found by header prefix.
    StripBlock {
        /// Exact line to strip (compared ignoring surrounding whitespace).
        #[arg(long, conflicts_with_all = ["pattern", "header"])]
        line: Option<String>,
        /// Regex matching the line to strip.
        #[arg(long, conflicts_with = "header")]
        pattern: Option<String>,
        /// Function header prefix; strips the header and its body.
        #[arg(long)]
        header: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
    },
    /// Replace one line, preserving its indentation.
    ReplaceLine {
        /// Literal line to replace.
        #[arg(long, conflicts_with = "pattern")]
        line: Option<String>,
        /// Regex matching the line to replace.
        #[arg(long)]
        pattern: Option<String>,
        /// Replacement line, given without indentation.
        #[arg(long = "with")]
        replacement: String,
        #[command(flatten)]
        common: CommonArgs,
    },
}
