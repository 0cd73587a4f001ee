use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use xpvision_core::EmotionTag;
use xpvision_finance::{
    classify_with_emotion, evaluate_badges, parse_ledger_csv, simulate, BetProtection, SaboteurMap,
    TransactionTagger,
};

mod config;
mod state;

#[derive(Parser, Debug)]
#[command(name = "xpvision", version, about = "XP Vision dream impact calculator")]
struct Cli {
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet output (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Completion percentage and days remaining for a dream
    Progress {
        #[arg(long)]
        saved: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
    },

    /// Days a lump contribution advances the dream
    Boost {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        target: Option<f64>,
    },

    /// Day impact and reality trigger for one transaction (negative = expense)
    Impact {
        #[arg(long, allow_hyphen_values = true)]
        amount: f64,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        saved: Option<f64>,
    },

    /// Bet flag and spending category for a description
    Classify {
        description: String,
        #[arg(long, default_value = "")]
        category: String,
        /// necessary | conscious_pleasure | impulsive | investment
        #[arg(long, value_parser = parse_emotion)]
        emotion: Option<EmotionTag>,
    },

    /// How long a purchase would delay the dream
    Simulate {
        #[arg(long)]
        value: f64,
        #[arg(long)]
        target: Option<f64>,
    },

    /// Tag a transactions CSV and print the Saboteur Map
    Map {
        /// Path to transactions CSV (defaults to ./transactions.csv)
        #[arg(long)]
        csv: Option<PathBuf>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        saved: Option<f64>,
        /// Reference date for month totals (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Manage ~/.xpvision/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn parse_emotion(s: &str) -> std::result::Result<EmotionTag, String> {
    EmotionTag::from_tag(s).ok_or_else(|| format!("unknown emotion tag: {s}"))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "warn"
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    // classify needs no config, so it is read per command
    let load = config::load_config;
    let today = chrono::Local::now().date_naive();
    let json = cli.json;

    match cli.command {
        Command::Progress { saved, target } => {
            let cfg = load()?;
            let dream = cfg.resolve_dream(target, saved)?;
            let model = cfg.impact_model(&dream, today)?;
            let p = dream.progress(&model)?;
            emit(json, &p, || {
                println!("{}: {}% saved", dream.title, p.percent_display());
                println!("Days remaining: {}", p.days_remaining);
            })?;
        }

        Command::Boost { amount, target } => {
            let cfg = load()?;
            if amount <= 0.0 {
                bail!("boost amount must be positive, got {amount}");
            }
            let dream = cfg.resolve_dream(target, None)?;
            let model = cfg.impact_model(&dream, today)?;
            let days = model.boost_days(amount, dream.target_value)?;
            emit(json, &serde_json::json!({ "boost_days": days }), || {
                println!("R$ {:.2} advances '{}' by {} days", amount, dream.title, days);
            })?;
        }

        Command::Impact { amount, target, saved } => {
            let cfg = load()?;
            let dream = cfg.resolve_dream(target, saved)?;
            let model = cfg.impact_model(&dream, today)?;
            let days = model.impact_days(amount, dream.target_value)?;
            let trigger = model.reality_trigger(amount, dream.target_value, dream.current_saved)?;
            let out = serde_json::json!({ "impact_days": days, "reality_trigger": trigger });
            emit(json, &out, || {
                println!("Impact: {}{} days", if days > 0 { "+" } else { "" }, days);
                if amount < 0.0 {
                    println!("≈ {} meals", trigger.meals_equivalent);
                    println!("{}", trigger.message);
                }
            })?;
        }

        Command::Classify { description, category, emotion } => {
            let c = classify_with_emotion(&description, &category, emotion);
            emit(json, &c, || {
                println!("{} {}{}", c.category.emoji(), c.category_name(), if c.is_bet { " (bet)" } else { "" });
            })?;
        }

        Command::Simulate { value, target } => {
            let cfg = load()?;
            let dream = cfg.resolve_dream(target, None)?;
            let model = cfg.impact_model(&dream, today)?;
            let r = simulate(value, &dream, &model)?;
            emit(json, &r, || {
                println!("R$ {:.2} delays '{}' by {} days", r.value, dream.title, r.days_delayed);
                println!("{}", r.recommendation.message());
                println!("\nWith this money you could:");
                for alt in &r.what_could_be_done {
                    println!("- {}", alt);
                }
            })?;
        }

        Command::Map { csv, target, saved, today: as_of } => {
            let csv_path = csv.unwrap_or_else(default_transactions_csv);
            if !csv_path.exists() {
                bail!("CSV not found: {} (pass --csv <path>)", csv_path.display());
            }
            let as_of = as_of.unwrap_or(today);

            let cfg = load()?;
            let dream = cfg.resolve_dream(target, saved)?;
            let model = cfg.impact_model(&dream, as_of)?;
            let raws = parse_ledger_csv(&csv_path)?;
            let txns = TransactionTagger::new(model, &dream)
                .tag_all(&raws)
                .with_context(|| format!("tagging {}", csv_path.display()))?;

            let map = SaboteurMap::build(&txns);
            let protection = BetProtection::from_transactions(&txns, as_of, true);
            let badges = evaluate_badges(&txns, as_of, false, &[]);

            let out = serde_json::json!({
                "categories": map.categories,
                "month_total": map.month_total(as_of),
                "month_days_lost": map.month_days_lost(as_of),
                "bet_protection": protection,
                "badges": badges,
            });
            emit(json, &out, || {
                println!("Parsed {} transactions from {}\n", txns.len(), csv_path.display());
                println!("Month total: R$ {:.2} | days lost: {}", map.month_total(as_of), map.month_days_lost(as_of));
                if let Some(top) = map.most_critical() {
                    println!("Biggest saboteur: {} {}\n", top.category.emoji(), top.category);
                }
                for c in &map.categories {
                    println!(
                        "{} {:<20} total=R$ {:>9.2} | count={:>3} | days lost={}",
                        c.category.emoji(),
                        c.category.name(),
                        c.total,
                        c.count,
                        c.days_lost
                    );
                }
                println!("\n{}", protection.savings_message());
                if let Some(days) = protection.days_since_last_bet(as_of) {
                    println!("Days since last bet: {}", days);
                }
                for b in &badges {
                    println!("{} {}: {}", b.kind.emoji(), b.kind.title(), b.kind.description());
                }
            })?;
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config()?,
            ConfigCommand::Show => {
                let cfg = load()?;
                println!("# {}", config::config_path()?.display());
                println!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn default_transactions_csv() -> PathBuf {
    PathBuf::from("transactions.csv")
}

/// Print `value` as JSON, or run the human-readable printer
fn emit<T: Serialize>(json: bool, value: &T, human: impl FnOnce()) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        human();
    }
    Ok(())
}
