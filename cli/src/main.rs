use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::{process_queries, DocId, DocumentStatus, ExecutionPolicy, SearchServer};
use serde::Deserialize;
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Deserialize)]
struct InputDoc {
    id: DocId,
    text: String,
    #[serde(default)]
    status: DocumentStatus,
    #[serde(default)]
    ratings: Vec<i32>,
}

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Index documents in memory and run TF-IDF queries against them", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in pet/rat walkthrough: add five documents, then remove three
    Demo,
    /// Load documents and print the top documents for each query
    Search {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        /// Whitespace-separated stop words
        #[arg(long, env = "SEARCH_STOP_WORDS", default_value = "")]
        stop_words: String,
        /// Query text; repeat for several queries
        #[arg(long, required = true)]
        query: Vec<String>,
        /// Only return documents with this status
        #[arg(long, value_parser = parse_status, default_value = "ACTUAL")]
        status: DocumentStatus,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Load documents and show which query words every document matches
    Match {
        /// Input path (JSON/JSONL file or directory)
        #[arg(long)]
        input: String,
        /// Whitespace-separated stop words
        #[arg(long, env = "SEARCH_STOP_WORDS", default_value = "")]
        stop_words: String,
        /// Query text
        #[arg(long)]
        query: String,
        /// Match with the parallel execution policy
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Demo => run_demo(),
        Commands::Search { input, stop_words, query, status, json } => {
            let server = load_server(&input, &stop_words)?;
            run_search(&server, &query, status, json)
        }
        Commands::Match { input, stop_words, query, parallel } => {
            let server = load_server(&input, &stop_words)?;
            let policy = if parallel { ExecutionPolicy::Parallel } else { ExecutionPolicy::Sequential };
            match_documents(&server, &query, policy);
            Ok(())
        }
    }
}

fn parse_status(s: &str) -> Result<DocumentStatus, String> {
    serde_json::from_value(serde_json::Value::String(s.to_ascii_uppercase()))
        .map_err(|_| format!("unknown status {s:?}, expected ACTUAL, IRRELEVANT, BANNED or REMOVED"))
}

fn run_demo() -> Result<()> {
    let mut server = SearchServer::new("and with")?;
    let texts = [
        "funny pet and nasty rat",
        "funny pet with curly hair",
        "funny pet and not very nasty rat",
        "pet with rat and rat and rat",
        "nasty rat with curly hair",
    ];
    for (id, text) in (1..).zip(texts) {
        add_document(&mut server, id, text, DocumentStatus::Actual, &[1, 2]);
    }

    let query = "curly and funny";
    let report = |server: &SearchServer| -> Result<()> {
        let found = server.find_top_documents(query)?;
        println!("{} documents total, {} documents for query [{}]", server.document_count(), found.len(), query);
        Ok(())
    };

    report(&server)?;
    server.remove_document(5);
    report(&server)?;
    server.remove_document_with(ExecutionPolicy::Sequential, 1);
    report(&server)?;
    server.remove_document_with(ExecutionPolicy::Parallel, 2);
    report(&server)?;
    Ok(())
}

fn run_search(server: &SearchServer, queries: &[String], status: DocumentStatus, json: bool) -> Result<()> {
    let start = Instant::now();
    let results = if status == DocumentStatus::Actual {
        process_queries(server, queries)
    } else {
        queries.iter().map(|q| server.find_top_documents_by_status(q, status)).collect()
    };
    tracing::info!(queries = queries.len(), elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "operation time");

    for (query, result) in queries.iter().zip(results) {
        match result {
            Ok(documents) if json => {
                let out = serde_json::json!({ "query": query, "results": documents });
                println!("{}", serde_json::to_string(&out)?);
            }
            Ok(documents) => {
                println!("Search results for query: {query}");
                for document in documents {
                    println!("{document}");
                }
                println!();
            }
            Err(e) => tracing::error!(%query, error = %e, "search failed"),
        }
    }
    Ok(())
}

fn match_documents(server: &SearchServer, query: &str, policy: ExecutionPolicy) {
    let start = Instant::now();
    println!("Matching documents for query: {query}");
    for id in server {
        match server.match_document_with(policy, query, id) {
            Ok((words, status)) => println!("{}", format_match(id, &words, status)),
            Err(e) => {
                tracing::error!(%query, error = %e, "matching failed");
                break;
            }
        }
    }
    tracing::info!(elapsed_ms = start.elapsed().as_secs_f64() * 1000.0, "operation time");
}

fn format_match(id: DocId, words: &[String], status: DocumentStatus) -> String {
    let mut line = format!("{{ document_id = {}, status = {}, words =", id, status.code());
    for word in words {
        line.push(' ');
        line.push_str(word);
    }
    line.push('}');
    line
}

/// Add one document, logging instead of failing so a batch keeps going.
fn add_document(server: &mut SearchServer, id: DocId, text: &str, status: DocumentStatus, ratings: &[i32]) -> bool {
    match server.add_document(id, text, status, ratings) {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(doc_id = id, error = %e, "failed to add document");
            false
        }
    }
}

fn load_server(input: &str, stop_words: &str) -> Result<SearchServer> {
    let mut server = SearchServer::new(stop_words)?;
    let docs = read_input_docs(Path::new(input))?;
    let total = docs.len();
    let added = docs
        .into_iter()
        .filter(|doc| add_document(&mut server, doc.id, &doc.text, doc.status, &doc.ratings))
        .count();
    tracing::info!(total, added, "loaded documents");
    Ok(server)
}

fn read_input_docs(input_path: &Path) -> Result<Vec<InputDoc>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && matches!(p.extension().and_then(|s| s.to_str()), Some("json" | "jsonl")) {
                files.push(p.to_path_buf());
            }
        }
    } else {
        files.push(input_path.to_path_buf());
    }

    let mut docs = Vec::new();
    for file in files {
        if file.extension().and_then(|s| s.to_str()) == Some("jsonl") {
            read_jsonl(&file, &mut docs)?;
        } else {
            read_json(&file, &mut docs)?;
        }
    }
    Ok(docs)
}

fn read_jsonl(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        docs.push(serde_json::from_str(&line)?);
    }
    Ok(())
}

fn read_json(file: &Path, docs: &mut Vec<InputDoc>) -> Result<()> {
    let reader = BufReader::new(File::open(file)?);
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    match json {
        serde_json::Value::Array(arr) => {
            for v in arr {
                docs.push(serde_json::from_value(v)?);
            }
        }
        serde_json::Value::Object(_) => docs.push(serde_json::from_value(json)?),
        _ => tracing::warn!(file = %file.display(), "ignoring JSON that is neither object nor array"),
    }
    Ok(())
}
