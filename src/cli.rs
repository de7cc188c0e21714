use std::path::PathBuf;

use clap::{ArgGroup, Parser};

#[derive(Parser, Debug, Clone)]
#[command(name = "scriptman", about = "Parameterized shell script manager", version)]
#[command(group(ArgGroup::new("mode").args(["extract", "render"]).multiple(false)))]
#[command(group(ArgGroup::new("source").args(["script", "command"]).multiple(false)))]
#[command(group(ArgGroup::new("manage").args(["save_script", "list_scripts", "show_script", "delete_script"]).multiple(false).conflicts_with_all(["mode", "source"])))]
pub struct Cli {
    /// Name of a stored script to instantiate and run.
    #[arg(value_name = "SCRIPT")]
    pub script: Option<String>,

    /// Run a raw command line directly, without a stored script.
    #[arg(short = 'c', long)]
    pub command: Option<String>,

    /// Read the script template from a file instead of the store.
    /// With --save-script, the file provides the content to save.
    #[arg(short = 'f', long)]
    pub file: Option<PathBuf>,

    /// Bind a placeholder value as name=value. Repeatable:
    /// --var user=alice --var host=db1
    #[arg(long = "var", action = clap::ArgAction::Append, value_name = "NAME=VALUE")]
    pub var: Vec<String>,

    /// Print the placeholder names of the template, one per line, and exit.
    #[arg(long)]
    pub extract: bool,

    /// Print the rendered command line without executing it.
    #[arg(long)]
    pub render: bool,

    /// Cancel execution after this many seconds (overrides DEFAULT_TIMEOUT).
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Emit the execution result as JSON ({ output, exitCode, success, error }).
    #[arg(long)]
    pub json: bool,

    /// Skip the execute/abort confirmation.
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Do not prompt for missing placeholder values; leave them literal.
    #[arg(long = "no-input")]
    pub no_input: bool,

    /// Override the interpreter shell (auto|powershell|cmd|bash|zsh|fish|sh).
    #[arg(long = "target-shell")]
    pub target_shell: Option<String>,

    /// Save (or update) a script under this name. Content comes from --file
    /// or piped stdin.
    #[arg(long = "save-script", value_name = "NAME")]
    pub save_script: Option<String>,

    /// Optional description stored with --save-script.
    #[arg(long)]
    pub description: Option<String>,

    /// List stored scripts.
    #[arg(short = 'l', long = "list-scripts", visible_alias = "ls")]
    pub list_scripts: bool,

    /// Show a stored script.
    #[arg(long = "show-script", value_name = "NAME")]
    pub show_script: Option<String>,

    /// Delete a stored script.
    #[arg(long = "delete-script", value_name = "NAME")]
    pub delete_script: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
