use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "arc")]
#[command(about = "The Arc CLI. Installs Arc Agents and runs them on a local Arc server.", long_about = None)]
#[command(version = env!("ARC_VERSION"))]
#[command(after_help = "\
EXAMPLES:
  arc set ARC_AI_URL=https://my-endpoint.openai.azure.com
  arc set ARC_AI_KEY=<key>
  arc install weather                Download the 'weather' Agent into ~/.arc
  arc list                           Show installed Agents
  arc run                            Start the Arc server with the Agents in ~/.arc

Environment variables ARC_AI_URL and ARC_AI_KEY take precedence over values
stored with 'arc set'.")]
pub struct Cli {
    /// Show debug logging on stderr
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Starts the Arc server
    Run {
        /// Folder containing the Agents to run. Defaults to HOME (~/.arc)
        folder: Option<PathBuf>,
    },

    /// Lists the Agents that are installed in HOME
    List,

    /// Installs an Agent
    Install {
        /// The name of the Agent to install
        name: Option<String>,
    },

    /// Sets a property for the runner
    #[command(long_about = "Sets a property for the runner.\n\n\
        Properties are stored in ~/.arc/arc.properties and passed to the server on 'arc run'.\n\
        The runner itself understands ARC_AI_KEY, ARC_AI_URL, ARC_MODEL, ARC_CLIENT and ARC_SERVER.")]
    Set {
        /// KEY=VALUE, or just KEY when the value is given separately
        assignment: Option<String>,

        /// The value, when not given as KEY=VALUE
        value: Option<String>,
    },

    /// Creates a new, empty Agent file
    New {
        /// The name of the Agent to create
        name: Option<String>,
    },

    /// Creates a new function file
    Fun {
        /// The name of the function to create
        name: Option<String>,
    },

    /// Opens the Arc View in the browser
    View {
        /// The port the Agent server is running on
        #[arg(default_value_t = crate::config::DEFAULT_PORT)]
        port: u16,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_parses() {
        let cli = Cli::try_parse_from(["arc"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_set_forms() {
        let cli = Cli::try_parse_from(["arc", "set", "ARC_AI_URL=https://x"]).unwrap();
        match cli.command {
            Some(Commands::Set { assignment, value }) => {
                assert_eq!(assignment.as_deref(), Some("ARC_AI_URL=https://x"));
                assert!(value.is_none());
            }
            other => panic!("unexpected: {:?}", other),
        }

        let cli = Cli::try_parse_from(["arc", "set", "ARC_MODEL", "gpt-4o"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Set { value: Some(ref v), .. }) if v == "gpt-4o"
        ));
    }

    #[test]
    fn test_missing_positionals_reach_the_command() {
        let cli = Cli::try_parse_from(["arc", "install"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Install { name: None })));

        let cli = Cli::try_parse_from(["arc", "-v", "run"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Some(Commands::Run { folder: None })));
    }

    #[test]
    fn test_view_default_port() {
        let cli = Cli::try_parse_from(["arc", "view"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::View { port: 8080 })));
    }

    #[test]
    fn test_unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["arc", "deploy"]).is_err());
    }
}
