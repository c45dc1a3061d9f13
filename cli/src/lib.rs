use anyhow::{Context, Result};
use clap::Parser;
use docfind_core::config::load_stop_words;
use docfind_core::response::{DumpEntry, DumpPosting};
use docfind_core::{build_index, InvertedIndex, QueryEngine, SearchConfig, SearchResponse};
use std::io::{BufRead, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "docfind")]
#[command(about = "Index a directory of documents and answer AND queries ranked by term frequency", long_about = None)]
pub struct Cli {
    /// Query string; every term must appear in a document for it to match
    pub query: Option<String>,
    /// Document directory (files one or two levels deep are indexed)
    #[arg(long, default_value = "doc_sets")]
    pub docs: PathBuf,
    /// Whitespace-separated stop-word list replacing the built-in one
    #[arg(long)]
    pub stop_words: Option<PathBuf>,
    /// Maximum number of ranked hits returned per query
    #[arg(long, default_value_t = docfind_core::config::DEFAULT_MAX_RESULTS)]
    pub max_results: usize,
    /// Maximum number of raw query terms considered
    #[arg(long, default_value_t = docfind_core::config::DEFAULT_MAX_QUERY_TERMS)]
    pub max_terms: usize,
    /// Words longer than this many characters are truncated
    #[arg(long, default_value_t = docfind_core::tokenizer::DEFAULT_MAX_WORD_LEN)]
    pub max_word_len: usize,
    /// Read queries from stdin, one per line, until EOF or `exit`
    #[arg(long, default_value_t = false)]
    pub interactive: bool,
    /// Print every indexed word with its postings as JSON lines
    #[arg(long, default_value_t = false)]
    pub dump: bool,
    /// Pretty-print JSON output
    #[arg(long, default_value_t = false)]
    pub pretty: bool,
}

impl Cli {
    pub fn search_config(&self) -> Result<SearchConfig> {
        let mut config = SearchConfig {
            max_query_terms: self.max_terms,
            max_results: self.max_results,
            max_word_len: self.max_word_len,
            ..SearchConfig::default()
        };
        if let Some(path) = &self.stop_words {
            config.stop_words = load_stop_words(path)?;
        }
        Ok(config)
    }
}

/// Build the index and answer the query (or queries). Returns the process exit code.
pub fn run<W: Write, R: BufRead>(cli: &Cli, out: &mut W, input: R) -> Result<u8> {
    let config = cli.search_config()?;
    let normalizer = config.normalizer();

    let index = match build_index(&cli.docs, &normalizer) {
        Ok(index) => index,
        Err(err) if err.is_setup_failure() => {
            tracing::error!(docs = %cli.docs.display(), error = %err, "index build failed");
            writeln!(out, "{}", SearchResponse::error(err.to_string()).to_json(cli.pretty))?;
            return Ok(1);
        }
        Err(err) => return Err(err).context("index build aborted"),
    };

    if cli.dump {
        dump(&index, out)?;
    }

    let engine = QueryEngine::new(&index, &normalizer, config.limits());
    if cli.interactive {
        interactive(&engine, &index, cli.pretty, out, input)?;
    } else if !cli.dump || cli.query.is_some() {
        let response = answer(&engine, &index, cli.query.as_deref())?;
        writeln!(out, "{}", response.to_json(cli.pretty))?;
    }

    let stats = index.teardown();
    tracing::debug!(words = stats.words, postings = stats.postings, "done");
    Ok(0)
}

fn answer(engine: &QueryEngine<'_>, index: &InvertedIndex, query: Option<&str>) -> Result<SearchResponse> {
    match query.map(str::trim).filter(|q| !q.is_empty()) {
        None => Ok(SearchResponse::message(format!(
            "No query supplied. Indexed {} words across {} documents.",
            index.word_count(),
            index.document_count()
        ))),
        Some(q) => Ok(engine.search(q)?.into()),
    }
}

fn interactive<W: Write, R: BufRead>(
    engine: &QueryEngine<'_>,
    index: &InvertedIndex,
    pretty: bool,
    out: &mut W,
    input: R,
) -> Result<()> {
    eprint!("search> ");
    for line in input.lines() {
        let line = line?;
        if line.trim() == "exit" {
            break;
        }
        let response = answer(engine, index, Some(&line))?;
        writeln!(out, "{}", response.to_json(pretty))?;
        out.flush()?;
        eprint!("search> ");
    }
    Ok(())
}

fn dump<W: Write>(index: &InvertedIndex, out: &mut W) -> Result<()> {
    for (word, postings) in index.entries() {
        let entry = DumpEntry {
            word,
            postings: postings
                .iter()
                .filter_map(|p| index.document(p.doc).map(|filename| DumpPosting { filename, count: p.count }))
                .collect(),
        };
        writeln!(out, "{}", serde_json::to_string(&entry)?)?;
    }
    Ok(())
}
