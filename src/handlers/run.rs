//! Instantiate-and-run flow: collect bindings, render, confirm, execute,
//! present the result.

use std::collections::HashMap;
use std::io::{self, Write};
use std::time::Duration;

use anyhow::{bail, Result};
use owo_colors::OwoColorize;

use scriptman::{
    config::Config,
    exec::{ExecError, ExecOptions, ExecutionResult, Executor},
    template,
};

use crate::cli::Cli;

/// Run the resolved template. Returns the process exit code the CLI should
/// mirror (0 when nothing was executed, e.g. --render).
pub async fn run(cfg: &Config, template_text: &str, args: &Cli, stdin_is_tty: bool) -> Result<i32> {
    let mut bindings = parse_var_args(&args.var)?;

    // Prompt for placeholders the caller did not bind, like the original
    // per-variable input form. Unbound names stay literal in the output.
    if !args.no_input && stdin_is_tty {
        for name in template::extract_placeholders(template_text) {
            if !bindings.contains_key(&name) {
                let value = prompt_line(&format!("$({}): ", name.magenta()))?;
                bindings.insert(name, value);
            }
        }
    }

    let rendered = template::render_template(template_text, &bindings);

    if args.render {
        println!("{rendered}");
        return Ok(0);
    }

    // Confirmation before anything is executed. Anything other than an
    // explicit yes aborts, including the empty string read_line yields at
    // EOF on a closed tty.
    let confirm = !args.yes && cfg.get_bool("EXECUTE_CONFIRM") && stdin_is_tty;
    if confirm {
        println!("{rendered}");
        let choice = prompt_line("[E]xecute, [A]bort: ")?;
        if !should_execute(&choice) {
            return Ok(0);
        }
    }

    let cancel_after = args
        .timeout
        .or_else(|| cfg.get_u64("DEFAULT_TIMEOUT"))
        .filter(|&secs| secs > 0)
        .map(Duration::from_secs);

    let executor = Executor::from_config(cfg);
    match executor.run(&rendered, &ExecOptions { cancel_after }).await {
        Ok(result) => {
            present(&result, args.json)?;
            Ok(result.exit_code)
        }
        Err(err @ ExecError::Cancelled { .. }) => {
            eprintln!("{}", err.to_string().yellow());
            // timeout convention
            Ok(124)
        }
        // Spawn and i/o failures are adapter faults, not script output.
        Err(err) => Err(err.into()),
    }
}

fn present(result: &ExecutionResult, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(result)?);
        return Ok(());
    }

    if !result.output.is_empty() {
        print!("{}", result.output);
        if !result.output.ends_with('\n') {
            println!();
        }
    } else if result.success && result.error.is_empty() {
        println!("{}", "(no output)".dimmed());
    }

    if !result.error.is_empty() {
        eprint!("{}", result.error.red());
        if !result.error.ends_with('\n') {
            eprintln!();
        }
    }

    if !result.success {
        eprintln!("{}", format!("exited with code {}", result.exit_code).red());
    }

    Ok(())
}

fn should_execute(choice: &str) -> bool {
    matches!(choice.trim().to_lowercase().as_str(), "e" | "y")
}

fn parse_var_args(vars: &[String]) -> Result<HashMap<String, String>> {
    let mut bindings = HashMap::new();
    for pair in vars {
        match pair.split_once('=') {
            Some((name, value)) => {
                bindings.insert(name.to_string(), value.to_string());
            }
            None => bail!("invalid --var '{}': expected NAME=VALUE", pair),
        }
    }
    Ok(bindings)
}

fn prompt_line(prompt: &str) -> Result<String> {
    print!("{prompt}");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::{parse_var_args, should_execute};

    #[test]
    fn only_explicit_yes_confirms_execution() {
        assert!(should_execute("e"));
        assert!(should_execute("E"));
        assert!(should_execute("y"));
        assert!(!should_execute("a"));
        assert!(!should_execute("anything else"));
        // EOF on stdin yields an empty line; that must abort, not re-prompt.
        assert!(!should_execute(""));
    }

    #[test]
    fn var_args_parse_or_reject() {
        let b = parse_var_args(&["user=alice".into(), "empty=".into()]).unwrap();
        assert_eq!(b["user"], "alice");
        assert_eq!(b["empty"], "");
        assert!(parse_var_args(&["novalue".into()]).is_err());
    }
}
