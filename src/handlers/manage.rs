//! Script store shortcuts: save, list, show, delete.

use anyhow::Result;
use owo_colors::OwoColorize;

use scriptman::script::ScriptStore;

pub fn save(
    store: &ScriptStore,
    name: &str,
    content: &str,
    description: Option<String>,
) -> Result<()> {
    let script = store.upsert(name, content, description)?;
    if script.variables.is_empty() {
        println!("Saved script '{}' (no variables)", script.name);
    } else {
        println!(
            "Saved script '{}' ({} variables: {})",
            script.name,
            script.variables.len(),
            script.variables.join(", ")
        );
    }
    Ok(())
}

pub fn list(store: &ScriptStore) {
    let scripts = store.list();
    if scripts.is_empty() {
        println!("No scripts stored yet. Save one with --save-script NAME.");
        return;
    }
    for script in scripts {
        let vars = if script.variables.is_empty() {
            String::new()
        } else {
            format!("  [{}]", script.variables.join(", "))
        };
        match &script.description {
            Some(desc) => println!("{}{}  {}", script.name.green(), vars, desc.dimmed()),
            None => println!("{}{}", script.name.green(), vars),
        }
    }
}

pub fn show(store: &ScriptStore, name: &str) -> Result<()> {
    let script = store.load(name)?;
    println!("{}", script.name.green());
    if let Some(desc) = &script.description {
        println!("{}", desc.dimmed());
    }
    if !script.variables.is_empty() {
        println!("variables: {}", script.variables.join(", ").magenta());
    }
    println!("created:   {}", script.created_at.to_rfc3339());
    println!("updated:   {}", script.updated_at.to_rfc3339());
    println!();
    println!("{}", script.content);
    Ok(())
}

pub fn delete(store: &ScriptStore, name: &str) -> Result<()> {
    store.remove(name)?;
    println!("Deleted script '{}'", name);
    Ok(())
}
