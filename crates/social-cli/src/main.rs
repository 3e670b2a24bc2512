//! Social Tokens CLI
//!
//! Command-line interface for deriving and inspecting creator token tokenomics.

use anyhow::Context;
use clap::{Parser, Subcommand};
use social_tokenomics::{
    evaluate_progress, CreatorMetrics, EngineConfig, Tier, Tokenomics, TokenomicsEngine,
};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "social-tokens")]
#[command(version = "0.1.0")]
#[command(about = "Social Tokens - milestone-based creator token economics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Engine configuration file
    #[arg(short, long, global = true, default_value = "social-tokens.toml")]
    config: PathBuf,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Derive tokenomics from audience metrics
    Compute {
        /// Follower count
        #[arg(long)]
        followers: u64,

        /// Engagement rate as a fraction (0.05 = 5%)
        #[arg(long)]
        engagement: f64,

        /// Influence score (0-100)
        #[arg(long)]
        influence: f64,

        /// Tier: nano, micro, macro, mega or celebrity
        #[arg(short, long, default_value = "nano")]
        tier: String,

        /// Activity signal
        #[arg(long)]
        active: Option<bool>,

        /// Reject unknown tier labels instead of using nano
        #[arg(long)]
        strict: bool,
    },

    /// Evaluate milestone progress of a tokenomics record
    Progress {
        /// Tokenomics JSON file
        #[arg(long)]
        tokenomics: PathBuf,

        /// Current holder count
        #[arg(long)]
        holders: u64,
    },

    /// Validate a custom tokenomics request
    Validate {
        /// Custom tokenomics JSON file
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Show the active tier table
    Tiers,

    /// Show the effective engine configuration
    Config,
}

fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Layer the optional config file under `SOCIAL_TOKENS__*` environment overrides
fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    if path.exists() {
        tracing::info!("Loading config from {:?}", path);
    } else {
        tracing::debug!("Config {:?} not found, using defaults", path);
    }

    let settings = config::Config::builder()
        .add_source(config::File::from(path.to_path_buf()).required(false))
        .add_source(
            config::Environment::with_prefix("SOCIAL_TOKENS")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .with_context(|| format!("failed to read config {:?}", path))?;

    let engine_config: EngineConfig = settings
        .try_deserialize()
        .context("invalid engine configuration")?;

    Ok(engine_config)
}

/// Effective configuration as TOML
fn render_config(config: &EngineConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("failed to render configuration")
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
    serde_json::from_str(&content).with_context(|| format!("failed to parse {:?}", path))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let engine_config = load_config(&cli.config)?;
    let engine = TokenomicsEngine::new(engine_config).context("engine configuration rejected")?;

    match cli.command {
        Commands::Compute {
            followers,
            engagement,
            influence,
            tier,
            active,
            strict,
        } => {
            let metrics = CreatorMetrics {
                followers,
                engagement_rate: engagement,
                influence_score: influence,
                is_active: active,
            };

            let tokenomics = if strict {
                let tier: Tier = tier.parse()?;
                engine.compute_tokenomics(&metrics, tier)?
            } else {
                engine.compute_for_label(&metrics, &tier)?
            };

            tracing::info!(
                "Computed {} tokenomics: {} tokens at {}",
                tokenomics.tier,
                tokenomics.total_supply,
                tokenomics.initial_price
            );
            println!("{}", serde_json::to_string_pretty(&tokenomics)?);
        }

        Commands::Progress {
            tokenomics,
            holders,
        } => {
            let record: Tokenomics = read_json(&tokenomics)?;
            let report = evaluate_progress(&record, holders);

            if !report.pending_unlocks.is_empty() {
                tracing::info!("Milestones ready to unlock: {:?}", report.pending_unlocks);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Validate { input } => {
            let value: serde_json::Value = read_json(&input)?;

            match engine.validate_custom_json(&value) {
                Ok(tokenomics) => {
                    println!("{}", serde_json::to_string_pretty(&tokenomics)?);
                }
                Err(e) => {
                    tracing::error!("Custom tokenomics rejected (code {}): {}", e.code(), e);
                    return Err(e.into());
                }
            }
        }

        Commands::Tiers => {
            println!("┌───────────┬─────────┬─────────┬─────────┬─────────────────┐");
            println!("│ Tier      │ Supply  │ Price   │ Rewards │ Milestone Bonus │");
            println!("├───────────┼─────────┼─────────┼─────────┼─────────────────┤");
            for (tier, row) in engine.tiers().rows() {
                println!(
                    "│ {:<9} │ {:>6}x │ {:>6}x │ {:>6}x │ {:>14}x │",
                    tier.name(),
                    row.supply,
                    row.price,
                    row.rewards,
                    row.milestone_bonus
                );
            }
            println!("└───────────┴─────────┴─────────┴─────────┴─────────────────┘");
            println!(
                "Single-bonus supply bound: {:.2}x tier base",
                engine.config().single_bonus_supply_bound()
            );
        }

        Commands::Config => {
            println!("{}", render_config(engine.config())?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use social_tokenomics::TierPreset;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_compute_args() {
        let cli = Cli::try_parse_from([
            "social-tokens",
            "compute",
            "--followers",
            "15000",
            "--engagement",
            "0.05",
            "--influence",
            "60",
            "--tier",
            "micro",
            "--active",
            "true",
        ])
        .unwrap();

        match cli.command {
            Commands::Compute {
                followers,
                tier,
                active,
                strict,
                ..
            } => {
                assert_eq!(followers, 15_000);
                assert_eq!(tier, "micro");
                assert_eq!(active, Some(true));
                assert!(!strict);
            }
            _ => panic!("expected compute"),
        }
    }

    #[test]
    fn test_missing_config_uses_defaults() {
        let config = load_config(Path::new("does-not-exist/social-tokens.toml")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("social-tokens.toml");
        std::fs::write(
            &path,
            r#"
base_supply = 2000000
price_decimals = 4
tier_preset = "conservative"

[bonus]
activity_swing = 0.2
"#,
        )
        .unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.base_supply, 2_000_000);
        assert_eq!(config.price_decimals, 4);
        assert_eq!(config.tier_preset, TierPreset::Conservative);
        assert_eq!(config.bonus.activity_swing, 0.2);
        assert_eq!(config.weights, EngineConfig::default().weights);
        assert!(TokenomicsEngine::new(config).is_ok());
    }

    #[test]
    fn test_rendered_config_reads_back() {
        let config = EngineConfig {
            tier_preset: TierPreset::Conservative,
            price_decimals: 5,
            ..Default::default()
        };

        let rendered = render_config(&config).unwrap();
        let parsed: EngineConfig = toml::from_str(&rendered).unwrap();
        assert_eq!(parsed, config);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("social-tokens.toml");
        std::fs::write(&path, &rendered).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }
}
