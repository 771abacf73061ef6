use clap::Parser;

/// Command-line arguments for atcmd
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "atcmd")]
#[command(about = "Run @commands with their options, e.g. `atcmd @echo text=hi upper`")]
#[command(long_about = None)]
#[command(version)]
pub struct Args {
    /// Enable verbose logging output
    #[arg(short, long, env = "ATCMD_VERBOSE")]
    pub verbose: bool,

    /// Command tokens: `@command` followed by `option`, `option+`, `option-` or `option=VALUE`
    #[arg(
        value_name = "TOKENS",
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub tokens: Vec<String>,
}

impl Args {
    /// Tokens to hand to the commander; an empty command line asks for help
    #[must_use]
    pub fn command_tokens(&self) -> Vec<String> {
        if self.tokens.is_empty() {
            return vec!["@help".to_owned()];
        }
        self.tokens.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_are_collected_verbatim() {
        let args = Args::parse_from(["atcmd", "@echo", "text=-x", "upper-", "@home"]);
        assert!(!args.verbose);
        assert_eq!(args.tokens, vec!["@echo", "text=-x", "upper-", "@home"]);
        assert_eq!(args.command_tokens(), args.tokens);
    }

    #[test]
    fn test_verbose_flag_before_tokens() {
        let args = Args::parse_from(["atcmd", "--verbose", "@home"]);
        assert!(args.verbose);
        assert_eq!(args.tokens, vec!["@home"]);
    }

    #[test]
    fn test_empty_tokens_request_help() {
        let args = Args::parse_from(["atcmd"]);
        assert_eq!(args.command_tokens(), vec!["@help"]);
    }
}
