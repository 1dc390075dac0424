use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(version, about = "Decide membership of words in a context-free language with an Earley recognizer")]
pub struct Cli {
    /// File containing the session (default: read stdin)
    pub input: Option<PathBuf>,

    /// Don't print the interactive prompts
    #[arg(short, long)]
    pub quiet: bool,

    /// Print every word's closed chart to stderr
    #[arg(short, long)]
    pub trace: bool,

    /// Include the producing item in item identity (reproduces the legacy behaviour)
    #[arg(long)]
    pub provenance_identity: bool,

    /// Print this many sampled words of the language instead of reading words
    #[arg(short, long, value_name = "AMOUNT")]
    pub sample: Option<u32>,

    /// Seed for --sample (default: random)
    #[arg(long, value_name = "SEED", requires = "sample")]
    pub seed: Option<u64>,

    /// Derivation depth before --sample falls back to the shortest rules
    #[arg(long, value_name = "DEPTH", default_value_t = 16)]
    pub max_depth: usize,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn arguments_are_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["earley"]);
        assert_eq!(cli.input, None);
        assert!(!cli.quiet && !cli.trace && !cli.provenance_identity);
        assert_eq!(cli.sample, None);
        assert_eq!(cli.max_depth, 16);
    }

    #[test]
    fn sampling_options() {
        let cli = Cli::parse_from(["earley", "grammar.txt", "-s", "5", "--seed", "7", "--max-depth", "3"]);
        assert_eq!(cli.input, Some(PathBuf::from("grammar.txt")));
        assert_eq!(cli.sample, Some(5));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.max_depth, 3);

        assert!(Cli::try_parse_from(["earley", "--seed", "7"]).is_err());
    }
}
