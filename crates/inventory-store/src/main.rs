use anyhow::{bail, Context};
use bigdecimal::BigDecimal;
use chrono::{TimeZone, Utc};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use futures::future::join_all;
use inventory_store::prelude::*;
use inventory_store::Backend;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Command::new("inventory-store")
        .version(inventory_store::VERSION)
        .about("Home Inventory concurrent record store")
        .subcommand_required(true)
        .subcommand(
            Command::new("demo")
                .about("Seed preview receipts and run every query")
                .arg(
                    Arg::new("config")
                        .long("config")
                        .help("Path to a TOML store configuration"),
                )
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Output as JSON"),
                ),
        )
        .subcommand(
            Command::new("stress")
                .about("Run concurrent saves and reads, then verify the result")
                .arg(
                    Arg::new("writers")
                        .long("writers")
                        .default_value("100")
                        .value_parser(value_parser!(usize))
                        .help("Number of concurrent saves"),
                )
                .arg(
                    Arg::new("readers")
                        .long("readers")
                        .default_value("100")
                        .value_parser(value_parser!(usize))
                        .help("Number of concurrent fetch-all calls"),
                )
                .arg(
                    Arg::new("backend")
                        .long("backend")
                        .default_value("rw-lock")
                        .value_parser(value_parser!(Backend))
                        .help("Store backend: rw-lock or actor"),
                ),
        );

    match cli.get_matches().subcommand() {
        Some(("demo", args)) => run_demo(args).await,
        Some(("stress", args)) => run_stress(args).await,
        _ => Ok(()),
    }
}

async fn run_demo(args: &ArgMatches) -> anyhow::Result<()> {
    let config = match args.get_one::<String>("config") {
        Some(path) => StoreConfig::load(path).with_context(|| format!("loading {path}"))?,
        None => StoreConfig::new(),
    }
    .with_preview_data(true);

    let store = open_store(&config, Vec::new())?;

    let all = store.fetch_all().await?;
    let from = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).single().context("invalid date")?;
    let to = Utc.with_ymd_and_hms(2024, 3, 31, 23, 59, 59).single().context("invalid date")?;
    let in_range = store.fetch_by_date_range(from, to).await?;
    let marts = store.fetch_by_store("mart").await?;
    let above = store.fetch_above_amount(BigDecimal::from(100)).await?;
    let by_item = match all.first().and_then(|r| r.item_ids.first()) {
        Some(item) => store.fetch_by_item_id(*item).await?,
        None => Vec::new(),
    };

    if args.get_flag("json") {
        let report = serde_json::json!({
            "backend": config.backend.name(),
            "all": all,
            "date_range": in_range,
            "store_mart": marts,
            "above_100": above,
            "by_item": by_item,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Backend: {}", config.backend);
    print_section("All receipts", &all);
    print_section("Feb 1 - Mar 31 2024", &in_range);
    print_section("Store contains \"mart\"", &marts);
    print_section("Total above 100", &above);
    print_section("Containing first item of first receipt", &by_item);
    Ok(())
}

fn print_section(title: &str, receipts: &[Receipt]) {
    println!("\n{title} ({})", receipts.len());
    for receipt in receipts {
        println!(
            "  {}  {:<12} {:>10}  {} items",
            receipt.date.format("%Y-%m-%d"),
            receipt.store_name,
            receipt.total_amount,
            receipt.item_ids.len()
        );
    }
}

async fn run_stress(args: &ArgMatches) -> anyhow::Result<()> {
    let writers = *args.get_one::<usize>("writers").context("missing --writers")?;
    let readers = *args.get_one::<usize>("readers").context("missing --readers")?;
    let backend = *args.get_one::<Backend>("backend").context("missing --backend")?;

    println!("Running stress test: {writers} writers, {readers} readers, {backend} backend");
    let start = Instant::now();

    let store = open_store(&StoreConfig::new().with_backend(backend), Vec::new())?;
    let date = Utc::now();

    let saves = (0..writers).map(|i| {
        let store = Arc::clone(&store);
        let amount = BigDecimal::from(u64::try_from(i).unwrap_or(u64::MAX));
        let receipt = Receipt::new(date, format!("Store {i}"), amount);
        tokio::spawn(async move { store.save(receipt).await })
    });
    for result in join_all(saves).await {
        result??;
    }

    let reads = (0..readers).map(|_| {
        let store = Arc::clone(&store);
        tokio::spawn(async move { store.fetch_all().await })
    });
    for result in join_all(reads).await {
        let snapshot = result??;
        if snapshot.len() != writers {
            bail!("reader saw {} records, expected {writers}", snapshot.len());
        }
    }

    let records = store.fetch_all().await?;
    let distinct: HashSet<ReceiptId> = records.iter().map(|r| r.id).collect();
    if records.len() != writers || distinct.len() != writers {
        bail!(
            "expected {writers} distinct records, found {} ({} distinct)",
            records.len(),
            distinct.len()
        );
    }

    println!(
        "  Completed in {:.3}s, {} records verified",
        start.elapsed().as_secs_f64(),
        records.len()
    );
    Ok(())
}
