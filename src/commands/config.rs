use anyhow::{Context as _, Result};
use clap::ValueEnum;
use contentcal_core::config::ContentCalConfig;
use owo_colors::OwoColorize;

/// Settings that `contentcal config <key> <value>` can change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigKey {
    Source,
    DefaultClient,
    FeedbackUrl,
    TimeoutSecs,
}

pub fn run(key: Option<ConfigKey>, value: Option<String>) -> Result<()> {
    let config_path = ContentCalConfig::config_path()?;
    let mut config = ContentCalConfig::load()?;

    let (Some(key), Some(value)) = (key, value) else {
        print_config(&config, &config_path);
        return Ok(());
    };

    set(&mut config, key, value.trim())?;
    config.save_to(&config_path)?;

    println!("{} {}", "Saved".green(), config_path.display());
    Ok(())
}

/// Apply one setting. An empty value clears optional settings.
fn set(config: &mut ContentCalConfig, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::Source => {
            if value.is_empty() {
                anyhow::bail!("source can't be empty");
            }
            let previous = std::mem::replace(&mut config.source, value.to_string());
            if let Err(e) = config.post_source() {
                config.source = previous;
                return Err(e).context("Invalid source");
            }
        }
        ConfigKey::DefaultClient => {
            config.default_client = (!value.is_empty()).then(|| value.to_string());
        }
        ConfigKey::FeedbackUrl => {
            url::Url::parse(value).with_context(|| format!("Invalid feedback URL: {value}"))?;
            config.feedback_url = value.to_string();
        }
        ConfigKey::TimeoutSecs => {
            config.timeout_secs = if value.is_empty() {
                None
            } else {
                Some(
                    value
                        .parse()
                        .with_context(|| format!("timeout_secs must be a whole number, got '{value}'"))?,
                )
            };
        }
    }
    Ok(())
}

fn print_config(config: &ContentCalConfig, config_path: &std::path::Path) {
    let none = "(none)".dimmed().to_string();

    println!("{}", "Paths".bold());
    println!("  Config:          {}", config_path.display());
    println!();
    println!("{}", "Settings".bold());
    println!("  source:          {}", config.source);
    println!(
        "  default_client:  {}",
        config.default_client.clone().unwrap_or_else(|| none.clone())
    );
    println!("  feedback_url:    {}", config.feedback_url);
    println!(
        "  timeout_secs:    {}",
        config
            .timeout_secs
            .map(|s| s.to_string())
            .unwrap_or(none)
    );
}
