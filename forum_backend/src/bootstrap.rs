use crate::config::ForumConfig;
use crate::database::Database;
use anyhow::Result;
use std::fs;

pub struct BootstrapResources {
    pub database_initialized: bool,
    pub database: Database,
}

pub fn initialize(config: &ForumConfig) -> Result<BootstrapResources> {
    let mut directories_created = Vec::new();
    create_dir_if_missing(&config.paths.data_dir, &mut directories_created)?;

    let database = Database::connect(&config.paths)?;
    let database_initialized = database.ensure_migrations()?;

    tracing::info!(
        directories_created = ?directories_created,
        database_initialized,
        db_path = %config.paths.db_path.display(),
        "forum storage ready"
    );

    Ok(BootstrapResources {
        database_initialized,
        database,
    })
}

fn create_dir_if_missing(path: &std::path::Path, created: &mut Vec<String>) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
        created.push(path.display().to_string());
    }
    Ok(())
}
