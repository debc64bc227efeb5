use botmeta_cli::cli::dispatcher::Dispatcher;
use botmeta_cli::cli::main_types::Cli;
use botmeta_cli::storage::config::{Config, Profile};
use botmeta_cli::utils::logging::{log_warning, print_verbose};
use clap::Parser;
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config_path = cli
        .config_dir
        .as_ref()
        .map(|dir| PathBuf::from(dir).join("config.toml"));

    let mut config = match Config::load(config_path.clone()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Error loading config: {}", err);
            std::process::exit(1);
        }
    };

    // Determine the profile to use
    let profile_name = cli
        .profile
        .or(config.default_profile.clone())
        .unwrap_or_else(|| "default".to_string());

    // Create a default profile if it doesn't exist
    if config.get_profile(&profile_name).is_none() {
        print_verbose(
            cli.verbose,
            &format!("Creating default profile: {}", profile_name),
        );

        config.set_profile(profile_name.clone(), Profile::default());

        if config.default_profile.is_none() {
            config.default_profile = Some(profile_name.clone());
        }

        if let Err(err) = config.save(config_path.clone()) {
            log_warning(&format!("Failed to save config: {}", err));
        }
    }

    if cli.verbose {
        println!("Verbose mode is enabled");
        println!("Using profile: {}", profile_name);

        if let Some(config_dir) = &cli.config_dir {
            println!("Using config directory: {}", config_dir);
        }

        if let Some(url) = &cli.server_url {
            println!("Using server URL override: {}", url);
        }
    }

    let mut dispatcher = Dispatcher::new(
        config,
        profile_name,
        cli.server_url,
        config_path,
        cli.verbose,
    );

    if let Err(e) = dispatcher.dispatch(cli.command).await {
        eprintln!("{} {}", e.severity().emoji(), e);
        if let Some(hint) = e.troubleshooting_hint() {
            eprintln!("Hint: {}", hint);
        }
        std::process::exit(1);
    }

    Ok(())
}
