use std::path::PathBuf;

use pdftotxt_core::ConvertOptions;
use pdftotxt_core::config_file::ConfigFile;

use crate::Cli;

/// Fully resolved run settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub directory: PathBuf,
    pub options: ConvertOptions,
    pub header_exclusion: f32,
    pub footer_exclusion: f32,
    pub color: bool,
}

impl Settings {
    /// Resolve configuration: CLI flags > env vars > config file > defaults.
    pub fn resolve(
        cli: &Cli,
        config: &ConfigFile,
        env_directory: Option<String>,
    ) -> anyhow::Result<Self> {
        let conversion = config.conversion.clone().unwrap_or_default();
        let extraction = config.extraction.clone().unwrap_or_default();
        let display = config.display.clone().unwrap_or_default();

        let directory = cli
            .directory
            .clone()
            .or_else(|| env_directory.map(PathBuf::from))
            .or_else(|| conversion.directory.map(PathBuf::from))
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No directory given. Pass it as an argument, set PDFTOTXT_DIR, \
                     or set conversion.directory in .pdftotxt.toml"
                )
            })?;

        let header_exclusion = cli
            .header_exclusion
            .or(extraction.header_exclusion)
            .unwrap_or(0.0);
        let footer_exclusion = cli
            .footer_exclusion
            .or(extraction.footer_exclusion)
            .unwrap_or(0.0);
        check_ratio("header exclusion", header_exclusion)?;
        check_ratio("footer exclusion", footer_exclusion)?;

        let options = ConvertOptions {
            skip_existing: cli.skip_existing || conversion.skip_existing.unwrap_or(false),
            expand_ligatures: cli.expand_ligatures
                || extraction.expand_ligatures.unwrap_or(false),
        };

        Ok(Self {
            directory,
            options,
            header_exclusion,
            footer_exclusion,
            color: !cli.no_color && display.color.unwrap_or(true),
        })
    }
}

fn check_ratio(name: &str, ratio: f32) -> anyhow::Result<()> {
    if !(0.0..1.0).contains(&ratio) {
        anyhow::bail!("{} must be in [0.0, 1.0), got {}", name, ratio);
    }
    Ok(())
}
