use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use lse_core::loader::build_from_files;
use lse_core::SearchEngine;
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lse")]
#[command(about = "Keyword-frequency search over a small document corpus", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct Sources {
    /// Manifest listing document files, or a directory of .txt documents
    #[arg(long, env = "LSE_DOCS")]
    docs: PathBuf,
    /// File of noise words, one per line
    #[arg(long, env = "LSE_NOISE")]
    noise: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and run a single "kw1 OR kw2" query
    Search {
        #[command(flatten)]
        sources: Sources,
        kw1: String,
        kw2: Option<String>,
        /// Print the result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print every keyword with its occurrence list
    Dump {
        #[command(flatten)]
        sources: Sources,
        /// Only print this keyword
        #[arg(long)]
        keyword: Option<String>,
    },
    /// Build once, then answer queries read from stdin
    Shell {
        #[command(flatten)]
        sources: Sources,
    },
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    kw1: &'a str,
    kw2: Option<&'a str>,
    results: &'a [String],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Search { sources, kw1, kw2, json } => {
            let engine = load(&sources)?;
            let results = engine.top5_search(Some(&kw1), kw2.as_deref());
            if json {
                let payload = SearchOutput { kw1: &kw1, kw2: kw2.as_deref(), results: &results };
                writeln!(out, "{}", serde_json::to_string_pretty(&payload)?)?;
            } else {
                print_results(&mut out, &results)?;
            }
        }
        Commands::Dump { sources, keyword } => {
            let engine = load(&sources)?;
            dump(&mut out, &engine, keyword.as_deref())?;
        }
        Commands::Shell { sources } => {
            let engine = load(&sources)?;
            shell(io::stdin().lock(), &mut out, &engine)?;
        }
    }
    Ok(())
}

fn load(sources: &Sources) -> Result<SearchEngine> {
    let engine = build_from_files(&sources.docs, &sources.noise)
        .with_context(|| format!("building index from {}", sources.docs.display()))?;
    tracing::info!(
        docs = %sources.docs.display(),
        num_docs = engine.document_count(),
        num_keywords = engine.index().len(),
        "corpus loaded"
    );
    Ok(engine)
}

fn print_results<W: Write>(out: &mut W, results: &[String]) -> Result<()> {
    if results.is_empty() {
        writeln!(out, "no matching documents")?;
    }
    for doc in results {
        writeln!(out, "{doc}")?;
    }
    Ok(())
}

fn dump<W: Write>(out: &mut W, engine: &SearchEngine, keyword: Option<&str>) -> Result<()> {
    match keyword {
        Some(kw) => match engine.index().get(&kw.trim().to_lowercase()) {
            Some(list) => writeln!(out, "{} {list}", kw.trim().to_lowercase())?,
            None => writeln!(out, "{kw}: not indexed")?,
        },
        None => {
            for (kw, list) in engine.index().iter_sorted() {
                writeln!(out, "{kw} {list}")?;
            }
        }
    }
    Ok(())
}

fn shell<R: BufRead, W: Write>(input: R, out: &mut W, engine: &SearchEngine) -> Result<()> {
    for line in input.lines() {
        let line = line?;
        let mut words = line.split_whitespace();
        let Some(kw1) = words.next() else { continue };
        if kw1.eq_ignore_ascii_case("quit") { break; }
        let kw2 = words.next();
        let results = engine.top5_search(Some(kw1), kw2);
        print_results(out, &results)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use lse_core::NoiseWords;

    fn engine() -> SearchEngine {
        let noise: NoiseWords = ["the"].into_iter().collect();
        SearchEngine::build(
            vec![
                ("D1".to_string(), "the Cat sat. The cat Ran!".split_whitespace()),
                ("D2".to_string(), "cat dog dog dog".split_whitespace()),
            ],
            noise,
        )
    }

    #[test]
    fn shell_answers_each_line_until_quit() {
        let input = "cat dog\n\nzebra\nquit\nran\n".as_bytes();
        let mut out = Vec::new();
        shell(input, &mut out, &engine()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "D2\nD1\nno matching documents\n");
    }

    #[test]
    fn dump_is_sorted_by_keyword() {
        let mut out = Vec::new();
        dump(&mut out, &engine(), None).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "cat [(D1,2), (D2,1)]\ndog [(D2,3)]\nran [(D1,1)]\nsat [(D1,1)]\n");
    }

    #[test]
    fn dump_single_keyword() {
        let mut out = Vec::new();
        dump(&mut out, &engine(), Some("Dog")).unwrap();
        dump(&mut out, &engine(), Some("owl")).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "dog [(D2,3)]\nowl: not indexed\n");
    }
}
