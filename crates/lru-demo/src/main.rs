//! LRU cache demo - exercises add/get/remove and prints each result

use anyhow::{bail, Context, Result};
use clap::Parser;
use lrucache::LruCache;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Cache capacity (number of items)
    #[arg(short, long, default_value_t = 3)]
    capacity: usize,

    /// Extra KEY=VALUE pairs to add before the scripted run
    #[arg(long, value_delimiter = ',')]
    keys: Vec<String>,
}

fn parse_pair(raw: &str) -> Result<(&str, &str)> {
    match raw.split_once('=') {
        Some((key, value)) => Ok((key, value)),
        None => bail!("expected KEY=VALUE, got '{}'", raw),
    }
}

fn render_get(cache: &LruCache, key: &str) -> String {
    match cache.get(key) {
        Some(value) => format!("{} -> {} true", key, value),
        None => format!("{} ->  false", key),
    }
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();

    info!("Starting LRU demo v{}", env!("CARGO_PKG_VERSION"));
    info!("Cache capacity: {}", args.capacity);

    let cache = LruCache::new(args.capacity).context("failed to create cache")?;

    for raw in &args.keys {
        let (key, value) = parse_pair(raw)?;
        println!("add {}={} -> {}", key, value, cache.add(key, value));
    }

    cache.add("HELLO", "WORLD");
    cache.add("HELLO-2", "WORLD-2");
    cache.add("HELLO-3", "WORLD-3");

    println!("{}", render_get(&cache, "HELLO"));

    cache.add("HELLO-4", "WORLD-4");
    cache.remove("HELLO-3");

    for key in ["HELLO", "HELLO-4", "HELLO-2", "HELLO-3", "HELLO-4"] {
        println!("{}", render_get(&cache, key));
    }

    info!("Cache holds {} of {} entries", cache.len(), cache.capacity());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(parse_pair("a=b").unwrap(), ("a", "b"));
        assert_eq!(parse_pair("a=b=c").unwrap(), ("a", "b=c"));
        assert_eq!(parse_pair("a=").unwrap(), ("a", ""));
        assert!(parse_pair("novalue").is_err());
    }

    #[test]
    fn test_render_get() {
        let cache = LruCache::new(1).unwrap();
        cache.add("k", "v");

        assert_eq!(render_get(&cache, "k"), "k -> v true");
        assert_eq!(render_get(&cache, "x"), "x ->  false");
    }
}
