use clap::Parser;
use pickastock_common::PaginationMode;
use pickastock_config::{
    ConfigLoadError, DEFAULT_CONFIG_FILE, PickastockConfig, PickastockConfigLoader,
};
use std::path::PathBuf;

/// Scrape EPF shareholding changes from pickastock.info into an A4 PDF report.
#[derive(Debug, Parser)]
#[command(name = "pickastock", version)]
pub struct Args {
    /// YAML configuration file. Optional unless given explicitly.
    #[arg(short, long, env = "PICKASTOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum number of result pages to visit.
    #[arg(long)]
    pub max_pages: Option<u32>,

    /// Reload the search URL on every page instead of paginating in-session.
    #[arg(long)]
    pub reload_each_page: bool,

    /// Show the browser window.
    #[arg(long)]
    pub headed: bool,
}

impl Args {
    /// Merge file, environment and command-line settings.
    pub fn load_config(&self) -> Result<PickastockConfig, ConfigLoadError> {
        let loader = match &self.config {
            Some(path) => PickastockConfigLoader::new().with_file(path),
            None => PickastockConfigLoader::new().with_optional_file(DEFAULT_CONFIG_FILE),
        };
        let mut config = loader.load()?;
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut PickastockConfig) {
        if let Some(max_pages) = self.max_pages {
            config.max_pages = max_pages;
        }
        if self.reload_each_page {
            config.pagination = PaginationMode::Reload;
        }
        if self.headed {
            config.browser.headless = false;
        }
    }
}
