use anyhow::{Context, Result};
use log::{info, warn};
use logseq_export_config::{Config, LogseqConfig};
use logseq_export_engine::{LoadOptions, load_graph_with};
use std::{env, path::PathBuf, process};

mod summary;

use summary::GraphSummary;

struct Args {
    graph_path: Option<PathBuf>,
    public_only: bool,
    json: bool,
}

fn usage(program: &str) -> ! {
    eprintln!("Usage: {program} [--public] [--json] [graph-folder-path]");
    eprintln!(
        "Without a path, graph_path is read from {}",
        Config::config_path().display()
    );
    process::exit(1);
}

fn parse_args(args: &[String]) -> Option<Args> {
    let mut parsed = Args {
        graph_path: None,
        public_only: false,
        json: false,
    };
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--public" => parsed.public_only = true,
            "--json" => parsed.json = true,
            flag if flag.starts_with("--") => return None,
            path if parsed.graph_path.is_none() => parsed.graph_path = Some(PathBuf::from(path)),
            _ => return None,
        }
    }
    Some(parsed)
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("logseq-export");
    let Some(cli) = parse_args(&args) else {
        usage(program);
    };

    // Determine graph path from CLI args or config file
    let config = match Config::load() {
        Ok(config) => config,
        Err(e) if cli.graph_path.is_some() => {
            warn!("Ignoring unreadable config file: {e}");
            None
        }
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            usage(program);
        }
    };

    let (graph_path, from_config) = match (&cli.graph_path, &config) {
        (Some(path), _) => (path.clone(), false),
        (None, Some(config)) => (config.graph_path.clone(), true),
        (None, None) => {
            eprintln!("Error: No graph path provided and no config file found");
            usage(program);
        }
    };

    if let Err(e) = LogseqConfig::check(&graph_path) {
        let source = if from_config {
            format!(" from config file '{}'", Config::config_path().display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Graph path '{}'{} is not usable: {e}",
            graph_path.display(),
            source
        );
        process::exit(1);
    }

    let options = config
        .as_ref()
        .map(|c| LoadOptions {
            ignored_files: c.ignored_files.clone(),
        })
        .unwrap_or_default();
    let public_only = cli.public_only || config.as_ref().is_some_and(|c| c.require_public);

    let graph = load_graph_with(&graph_path, &options)
        .await
        .with_context(|| format!("loading graph at {}", graph_path.display()))?;

    let summary = if public_only {
        let public = graph
            .public_graph()
            .context("building public projection")?;
        info!("Reporting on public projection");
        GraphSummary::new(&public, true)
    } else {
        GraphSummary::new(&graph, false)
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print!("{}", summary.to_text());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_path() {
        let cli = parse_args(&args(&["logseq-export", "--json", "/graph", "--public"])).unwrap();

        assert_eq!(cli.graph_path, Some(PathBuf::from("/graph")));
        assert!(cli.json);
        assert!(cli.public_only);
    }

    #[test]
    fn rejects_unknown_flags_and_extra_paths() {
        assert!(parse_args(&args(&["logseq-export", "--verbose"])).is_none());
        assert!(parse_args(&args(&["logseq-export", "/a", "/b"])).is_none());
        assert!(parse_args(&args(&["logseq-export"])).unwrap().graph_path.is_none());
    }
}
