use crate::cli::ConfigCommands;
use crate::config::{Config, MatchStrategy};
use crate::utils::{FlowResult, OutputStyle, handle_flow};
use anyhow::{Result, bail};
use std::path::PathBuf;

pub fn handle_config_command(
    config: Config,
    config_path: Option<PathBuf>,
    command: Option<ConfigCommands>,
) -> Result<()> {
    let path = config_path.unwrap_or_else(Config::config_file_path);

    match command {
        Some(ConfigCommands::Show) => handle_show_command(&config),
        Some(ConfigCommands::Path) => {
            println!("{}", path.display());
            Ok(())
        }
        Some(ConfigCommands::Init { force }) => handle_init_command(&path, force),
        None => handle_config_help(&path),
    }
}

fn handle_show_command(config: &Config) -> Result<()> {
    OutputStyle::print_header("⚙️  tracesift configuration");

    for (label, value) in config_fields(config) {
        OutputStyle::print_field(&label, &value);
    }
    Ok(())
}

/// Label/value pairs shown by `config show`, in display order
fn config_fields(config: &Config) -> Vec<(String, String)> {
    let mut fields = vec![
        ("Color".to_string(), config.general.color.to_string()),
        (
            "Format".to_string(),
            format!("{:?}", config.general.format).to_lowercase(),
        ),
    ];

    let framework = &config.framework;
    match framework.strategy {
        MatchStrategy::Regex => {
            fields.push(("Framework regex".to_string(), framework.pattern.clone()))
        }
        MatchStrategy::Substring => fields.push((
            "Framework keys".to_string(),
            framework.keywords.join(", "),
        )),
    }
    fields.push((
        "Case sensitive".to_string(),
        framework.case_sensitive.to_string(),
    ));

    if config.substitutions.is_empty() {
        fields.push(("Substitutions".to_string(), "none".to_string()));
    } else {
        for (i, sub) in config.substitutions.iter().enumerate() {
            fields.push((
                format!("Substitution {}", i + 1),
                format!("{} => {:?}", sub.pattern, sub.replacement),
            ));
        }
    }

    fields.push(("Log level".to_string(), config.logging.level.clone()));
    fields.push((
        "Log format".to_string(),
        format!("{:?}", config.logging.format).to_lowercase(),
    ));
    fields
}

fn handle_init_command(path: &std::path::Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "{} already exists, use --force to overwrite it",
            path.display()
        );
    }

    Config::default().save_to(path)?;
    handle_flow(FlowResult::Success(format!(
        "Wrote default configuration to {}",
        path.display()
    )));
    Ok(())
}

fn handle_config_help(path: &std::path::Path) -> Result<()> {
    println!("⚙️  Configuration Management");
    println!("==========================");
    println!("Available configuration commands:");
    println!("  tracesift config show    - Show current configuration");
    println!("  tracesift config path    - Print the configuration file location");
    println!("  tracesift config init    - Write a default configuration file");
    println!();
    println!("Configuration file location: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_lists_logging_settings() {
        let config = Config::from_toml("[logging]\nlevel = \"info\"\nformat = \"json\"\n").unwrap();
        let fields = config_fields(&config);

        assert!(fields.contains(&("Log level".to_string(), "info".to_string())));
        assert!(fields.contains(&("Log format".to_string(), "json".to_string())));
        assert!(fields.contains(&("Substitutions".to_string(), "none".to_string())));
    }

    #[test]
    fn test_init_writes_loadable_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        handle_init_command(&path, false).unwrap();
        let loaded = Config::load_custom(&path).unwrap();
        assert_eq!(loaded.framework.strategy, MatchStrategy::Regex);
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[general]\ncolor = false\n").unwrap();

        assert!(handle_init_command(&path, false).is_err());
        assert!(!Config::load_custom(&path).unwrap().general.color);

        handle_init_command(&path, true).unwrap();
        assert!(Config::load_custom(&path).unwrap().general.color);
    }
}
