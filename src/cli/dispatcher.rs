use crate::api::client::BotmetaClient;
use crate::api::models::RenderRequest;
use crate::cli::main_types::{Commands, ConfigCommands};
use crate::core::grid::Grid;
use crate::core::report::ReportSource;
use crate::display::table::GridRenderer;
use crate::error::{AppError, ConfigError, StorageError};
use crate::storage::config::Config;
use crate::utils::logging::VerboseLogger;
use crate::utils::validation::{validate_filepaths, validate_url};
use std::fs;
use std::path::PathBuf;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub struct Dispatcher {
    config: Config,
    profile_name: String,
    server_override: Option<String>,
    config_path: Option<PathBuf>,
    logger: VerboseLogger,
}

impl Dispatcher {
    pub fn new(
        config: Config,
        profile_name: String,
        server_override: Option<String>,
        config_path: Option<PathBuf>,
        verbose: bool,
    ) -> Self {
        Self {
            config,
            profile_name,
            server_override,
            config_path,
            logger: VerboseLogger::new(verbose),
        }
    }

    pub async fn dispatch(&mut self, command: Commands) -> Result<(), AppError> {
        match command {
            Commands::Render {
                files,
                meta_file,
                tag,
            } => self.handle_render_command(files, meta_file, tag).await,
            Commands::Current { output } => self.handle_current_command(output).await,
            Commands::Report {
                source,
                filter,
                sort,
                columns,
                limit,
            } => {
                self.handle_report_command(source, filter, sort, columns, limit)
                    .await
            }
            Commands::Config { command } => self.handle_config_command(command).await,
        }
    }

    fn make_client(&self) -> Result<BotmetaClient, AppError> {
        let profile = self
            .config
            .get_profile(&self.profile_name)
            .ok_or_else(|| ConfigError::ProfileNotFound {
                name: self.profile_name.clone(),
                hint: "Run any command once to create the default profile".to_string(),
            })?;

        let server_url = self
            .server_override
            .clone()
            .unwrap_or_else(|| profile.server_url.clone());
        validate_url(&server_url)?;

        let timeout = profile.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
        Ok(BotmetaClient::with_timeout(server_url, timeout)?)
    }

    async fn handle_render_command(
        &self,
        files: Vec<String>,
        meta_file: Option<PathBuf>,
        tag: String,
    ) -> Result<(), AppError> {
        self.logger.log(&format!(
            "Attempting render command - {} path(s), tag: {}",
            files.len(),
            tag
        ));
        validate_filepaths(&files)?;

        let client = self.make_client()?;

        let current_meta = match meta_file {
            Some(path) => {
                self.logger
                    .log(&format!("Reading metadata from {}", path.display()));
                fs::read_to_string(&path).map_err(|source| StorageError::FileIo {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?
            }
            None => {
                self.logger.log("Fetching current metadata from the server");
                client.fetch_current().await?
            }
        };

        let request = RenderRequest::new(files, current_meta, Some(tag));
        let rendered = client.render(&request).await?;

        let renderer = GridRenderer::new();
        println!("{}", renderer.render_json(&rendered)?);
        Ok(())
    }

    async fn handle_current_command(&self, output: Option<PathBuf>) -> Result<(), AppError> {
        self.logger.log("Attempting current command");
        let client = self.make_client()?;
        let current_meta = client.fetch_current().await?;

        match output {
            Some(path) => {
                fs::write(&path, &current_meta).map_err(|source| StorageError::FileIo {
                    path: path.to_string_lossy().to_string(),
                    source,
                })?;
                println!("✅ Saved current metadata to {}", path.display());
            }
            None => print!("{}", current_meta),
        }
        Ok(())
    }

    async fn handle_report_command(
        &self,
        source: String,
        filter: Option<String>,
        sort: Vec<String>,
        columns: Vec<String>,
        limit: Option<usize>,
    ) -> Result<(), AppError> {
        self.logger.log(&format!(
            "Attempting report command - Source: {}, Filter: {:?}, Sort: {:?}",
            source, filter, sort
        ));

        let report_source = ReportSource::parse(&source);
        let rows = report_source.load().await?;
        if rows.is_empty() {
            println!("Report contains no rows.");
            return Ok(());
        }

        let columns = if columns.is_empty() {
            // First row's keys define the default display order
            rows[0].keys().cloned().collect()
        } else {
            columns
        };

        let mut grid = Grid::new(columns);
        if let Some(filter_text) = filter {
            grid.set_filter(filter_text);
        }
        for column in &sort {
            grid.set_sort_key(column);
        }

        let view = grid.compute_view(&rows);
        let shown = match limit {
            Some(n) => &view[..n.min(view.len())],
            None => &view[..],
        };

        let renderer = GridRenderer::new();
        println!(
            "{}",
            renderer.render_grid_summary(shown.len(), rows.len(), grid.filter_text(), grid.sort_key())
        );
        println!("{}", renderer.render_grid(grid.columns(), shown)?);
        Ok(())
    }

    async fn handle_config_command(&mut self, command: ConfigCommands) -> Result<(), AppError> {
        match command {
            ConfigCommands::Show => {
                self.logger.log("Attempting config show command");

                println!("Current Configuration:");
                println!("=====================");

                if let Some(default_profile) = &self.config.default_profile {
                    println!("Default Profile: {}", default_profile);
                } else {
                    println!("Default Profile: (not set)");
                }

                println!("\nProfiles:");
                if self.config.profiles.is_empty() {
                    println!("  No profiles configured");
                } else {
                    for (name, profile) in &self.config.profiles {
                        println!("  [{}]", name);
                        println!("    Server URL: {}", profile.server_url);
                        if let Some(timeout) = profile.timeout_seconds {
                            println!("    Timeout: {} seconds", timeout);
                        }
                    }
                }

                Ok(())
            }
            ConfigCommands::Set { key, value } => {
                self.logger.log(&format!(
                    "Attempting config set - key: {}, value: {}",
                    key, value
                ));
                self.config.set_value(&self.profile_name, &key, &value)?;
                self.config.save(self.config_path.clone())?;
                println!("✅ Set {} for profile '{}'", key, self.profile_name);
                Ok(())
            }
        }
    }
}
