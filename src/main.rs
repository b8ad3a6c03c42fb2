use anyhow::{bail, Context, Result};
use std::env;
use std::io::{self, Read};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use serene_journal::trends::DEFAULT_TREND_DAYS;
use serene_journal::{load_csv, AppConfig, Journal, SentimentScorer, SqliteStore};

const USAGE: &str = "usage:
  serene classify [--basic] [--explain] <text...>   (reads stdin when no text)
  serene import <csv> [db]
  serene trends [db] [days]";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("warn".parse()?))
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("classify") => run_classify(&args[1..]),
        Some("import") => run_import(&args[1..]),
        Some("trends") => run_trends(&args[1..]),
        _ => {
            eprintln!("{}", USAGE);
            std::process::exit(2);
        }
    }
}

fn run_classify(args: &[String]) -> Result<()> {
    let basic = args.iter().any(|a| a == "--basic");
    let explain = args.iter().any(|a| a == "--explain");
    let words: Vec<&str> = args
        .iter()
        .filter(|a| !a.starts_with("--"))
        .map(String::as_str)
        .collect();

    let text = if words.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read text from stdin")?;
        buffer
    } else {
        words.join(" ")
    };

    let scorer = if basic {
        SentimentScorer::basic()
    } else {
        AppConfig::load()?.build_scorer()?
    };

    let score = scorer.score(&text);
    println!("{}", score.sentiment);

    if explain {
        println!("  positive:   {}", score.positive());
        println!("  negative:   {}", score.negative());
        println!("  difference: {}", score.difference());
        println!("  words:      {}", score.word_count);
        println!("  threshold:  {}", score.threshold);
    }

    Ok(())
}

fn db_path_arg(args: &[String], index: usize, config: &AppConfig) -> std::path::PathBuf {
    args.get(index)
        .map(|p| Path::new(p).to_path_buf())
        .unwrap_or_else(|| config.storage.path.clone())
}

fn run_import(args: &[String]) -> Result<()> {
    let Some(csv_path) = args.first() else {
        bail!("missing CSV path\n{}", USAGE);
    };

    let config = AppConfig::load()?;
    let db_path = db_path_arg(args, 1, &config);

    println!("📂 Loading CSV...");
    let rows = load_csv(Path::new(csv_path))?;
    println!("✓ Loaded {} entries from {}", rows.len(), csv_path);

    let store = SqliteStore::open(&db_path)?;
    let scorer = config.build_scorer()?;

    println!("\n💾 Inserting entries...");
    let summary = store.import_rows(&scorer, &rows)?;
    println!("✓ Inserted: {} entries", summary.inserted);
    println!("✓ Skipped duplicates: {}", summary.duplicates);
    println!("✓ Database contains {} entries", store.count()?);

    Ok(())
}

fn run_trends(args: &[String]) -> Result<()> {
    let config = AppConfig::load()?;
    let db_path = db_path_arg(args, 0, &config);
    let days = match args.get(1) {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid day count '{}'", raw))?,
        None => DEFAULT_TREND_DAYS,
    };

    if !db_path.exists() {
        bail!("database not found at {:?}; run `serene import <csv>` first", db_path);
    }

    let journal = Journal::new(config.build_scorer()?, Arc::new(SqliteStore::open(&db_path)?));
    let trends = journal.trends(days)?;

    println!("📊 Last {} days: {} entries", trends.days, trends.total_entries);
    for (mood, count) in &trends.mood_counts {
        println!("  {} {:<8} {}", mood.emoji(), mood.name(), count);
    }
    for (sentiment, count) in &trends.sentiment_counts {
        println!("  {:<10} {}", sentiment.name(), count);
    }
    if let Some(mood) = trends.dominant_mood {
        println!("\nMost frequent mood: {} {}", mood.emoji(), mood);
        println!("Try: {}", mood.activities().join(", "));
    }

    Ok(())
}
