use std::collections::HashMap;

use anyhow::{bail, Context, Result};
use defillama::{CoinIdSource, DefiLlamaClient, Identifier};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

fn print_usage(bin: &str) {
    eprintln!("Usage:");
    eprintln!("  {} [--header Name:Value]... <command> [args]", bin);
    eprintln!();
    eprintln!("  Commands:");
    eprintln!("    chains                 → known chains");
    eprintln!("    protocols              → known protocol slugs");
    eprintln!("    bridges                → bridge id → name");
    eprintln!("    stablecoins            → stablecoin id → symbol");
    eprintln!("    pools                  → yield pool id → symbol");
    eprintln!("    protocol <slug>        → historical TVL of a protocol");
    eprintln!("    tvl <slug>             → current TVL of a protocol");
    eprintln!("    prices <coins>         → current prices, coins as chain:address[,chain:address]");
    eprintln!("    bridge <id|name>       → bridge volume summary");
    eprintln!("    coin-ids [skip] [limit] → bundled CoinGecko ids");
    eprintln!();
    eprintln!("  Example:");
    eprintln!("    cargo run --release -- prices coingecko:ethereum,ethereum:0xdF574c24545E5FfEcb9a659c229253D4111d87e1");
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn parse_header(raw: &str) -> Result<(String, String)> {
    match raw.split_once(':') {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value.trim().to_string())),
        _ => bail!("--header expects Name:Value, got '{}'", raw),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let raw_args: Vec<String> = std::env::args().collect();
    let bin = raw_args.first().map(String::as_str).unwrap_or("defillama");

    // Parse --header flags and positional args
    let mut headers = HashMap::new();
    let mut args: Vec<String> = Vec::new();
    let mut i = 1;
    while i < raw_args.len() {
        if raw_args[i] == "--header" {
            i += 1;
            let Some(raw) = raw_args.get(i) else {
                eprintln!("--header requires a value");
                std::process::exit(1);
            };
            let (name, value) = parse_header(raw)?;
            headers.insert(name, value);
        } else {
            args.push(raw_args[i].clone());
        }
        i += 1;
    }

    let Some(command) = args.first() else {
        print_usage(bin);
        std::process::exit(1);
    };

    let client = DefiLlamaClient::with_headers(headers).context("failed to build client")?;

    match (command.as_str(), &args[1..]) {
        ("chains", []) => print_json(client.chains().await?)?,
        ("protocols", []) => print_json(client.protocols().await?)?,
        ("bridges", []) => print_json(client.bridges().await?)?,
        ("stablecoins", []) => print_json(client.stablecoins().await?)?,
        ("pools", []) => print_json(client.pools().await?)?,
        ("protocol", [slug]) => print_json(&client.protocol(slug).await?)?,
        ("tvl", [slug]) => print_json(&client.protocol_current_tvl(slug).await?)?,
        ("prices", [coins]) => print_json(&client.current_prices(coins.as_str(), None).await?)?,
        ("bridge", [bridge]) => print_json(&client.bridge(Identifier::from(bridge)).await?)?,
        ("coin-ids", rest) if rest.len() <= 2 => {
            let skip = match rest.first() {
                Some(s) => s.parse::<usize>().with_context(|| format!("invalid skip '{}'", s))?,
                None => 0,
            };
            let limit = match rest.get(1) {
                Some(l) => Some(l.parse::<usize>().with_context(|| format!("invalid limit '{}'", l))?),
                None => None,
            };
            let ids = client.coingecko_coin_ids(skip, limit, CoinIdSource::Bundled).await?;
            eprintln!("{} id(s)", ids.len());
            print_json(&ids)?;
        }
        (other, _) => {
            eprintln!("Unknown command or wrong arguments: '{}'", other);
            print_usage(bin);
            std::process::exit(1);
        }
    }

    Ok(())
}
