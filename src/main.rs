mod cli;
mod handlers;

use std::fs;
use std::io::{self, Read};

use anyhow::{bail, Result};
use is_terminal::IsTerminal;

use scriptman::{config::Config, script::ScriptStore, template};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    // Optional: override target shell via CLI before loading config
    if let Some(ts) = args.target_shell.as_deref() {
        // Normalize common values
        let lower = ts.to_ascii_lowercase();
        let norm = match lower.as_str() {
            "pwsh" | "powershell" | "powershell.exe" => "powershell.exe".to_string(),
            "cmd" | "cmd.exe" => "cmd.exe".to_string(),
            other => other.to_string(),
        };
        std::env::set_var("SHELL_NAME", norm);
    }

    let log_level = match args.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(args.verbose >= 2)
        .with_writer(io::stderr)
        .init();

    let cfg = Config::load();
    let store = ScriptStore::from_config(&cfg);
    let stdin_is_tty = io::stdin().is_terminal();

    // Store management shortcuts
    if args.list_scripts {
        handlers::manage::list(&store);
        return Ok(());
    }
    if let Some(name) = &args.show_script {
        return handlers::manage::show(&store, name);
    }
    if let Some(name) = &args.delete_script {
        return handlers::manage::delete(&store, name);
    }
    if let Some(name) = &args.save_script {
        let content = read_content(&args, stdin_is_tty)?;
        return handlers::manage::save(&store, name, &content, args.description.clone());
    }

    // Resolve the template to operate on: raw command line, stored script,
    // file, or piped stdin.
    let template_text = if let Some(cmdline) = &args.command {
        cmdline.clone()
    } else if let Some(name) = &args.script {
        store.load(name)?.content
    } else {
        match read_content(&args, stdin_is_tty) {
            Ok(content) => content,
            Err(_) => {
                bail!("nothing to run: pass a script name, --command, --file, or pipe a template on stdin")
            }
        }
    };

    if args.extract {
        for name in template::extract_placeholders(&template_text) {
            println!("{name}");
        }
        return Ok(());
    }

    let exit_code = handlers::run::run(&cfg, &template_text, &args, stdin_is_tty).await?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

fn read_content(args: &cli::Cli, stdin_is_tty: bool) -> Result<String> {
    if let Some(path) = &args.file {
        return fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read {}: {}", path.display(), e));
    }
    if !stdin_is_tty {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    bail!("no content provided: pass --file or pipe the script on stdin")
}
