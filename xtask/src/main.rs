use anyhow::Result;
use schemars::schema_for;
use std::fs;

fn main() -> Result<()> {
    let args: Vec<_> = std::env::args().collect();

    match args.get(1).map(|s| s.as_str()) {
        Some("gendocs") => generate_docs()?,
        _ => {
            println!("Usage: cargo xtask <command>");
            println!("\nCommands:");
            println!("  gendocs    Generate the JSON schema of the fixture file");
        }
    }

    Ok(())
}

fn generate_docs() -> Result<()> {
    println!("Generating fixture schema...");

    let schema = schema_for!(ipcheck::config::FixtureConfig);
    let schema_json = serde_json::to_string_pretty(&schema)?;

    fs::create_dir_all("docs")?;
    fs::write("docs/schema.json", schema_json)?;
    println!("✓ Generated docs/schema.json");

    Ok(())
}
