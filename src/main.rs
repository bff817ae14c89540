use anyhow::{bail, Context, Result};
use clap::Parser;
use glob::glob;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tabtext::{
    render::render_value,
    source::{archive::read_zip_lines, open_lines},
    Config, EmptyLinePolicy, OutputFormat, Records,
};
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Parse delimiter-separated text files into records.
#[derive(Parser, Debug)]
#[command(name = "tabtext", version)]
struct Args {
    /// YAML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Field separator (default ",")
    #[arg(short, long)]
    separator: Option<String>,

    /// Output format: json or yaml
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Fail on empty lines instead of producing empty records
    #[arg(long)]
    reject_empty_lines: bool,

    /// Print only this column, projected across all records
    #[arg(long)]
    column: Option<String>,

    /// Files, ZIP archives or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,
}

fn main() -> Result<()> {
    // ─── 1) init logging ─────────────────────────────────────────────
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    // ─── 2) resolve config: file, then env, then flags ───────────────
    let cfg = build_config(&args, |key| std::env::var(key).ok())?;
    debug!(?cfg, "config");

    // ─── 3) expand inputs ────────────────────────────────────────────
    let paths = expand_inputs(&args.inputs)?;
    info!("{} inputs", paths.len());

    // ─── 4) read + parse in parallel, order preserved ────────────────
    let parsed: Vec<(String, Records)> = paths
        .par_iter()
        .map(|path| load(path, &cfg).with_context(|| format!("processing {}", path.display())))
        .collect::<Result<Vec<_>>>()?
        .into_iter()
        .flatten()
        .collect();

    // ─── 5) render everything, then print once ──────────────────────
    let out = render_output(&parsed, args.column.as_deref(), cfg.output)?;
    println!("{}", out.trim_end());

    info!("all done");
    Ok(())
}

/// One input's records, tagged with where they came from.
#[derive(Serialize)]
struct RecordsDoc<'a> {
    source: &'a str,
    records: &'a Records,
}

/// One input's projected column, tagged with where it came from.
#[derive(Serialize)]
struct ColumnDoc<'a> {
    source: &'a str,
    column: &'a str,
    values: Vec<Option<&'a str>>,
}

/// Render every parsed input into a single document: a top-level array with
/// one entry per input. Fails without producing output if any input lacks
/// `column`.
fn render_output(
    parsed: &[(String, Records)],
    column: Option<&str>,
    format: OutputFormat,
) -> Result<String> {
    let out = match column {
        Some(col) => {
            let docs = parsed
                .iter()
                .map(|(name, records)| {
                    let values = records
                        .column(col)
                        .with_context(|| format!("{} has no column {:?}", name, col))?;
                    Ok(ColumnDoc {
                        source: name,
                        column: col,
                        values,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            render_value(&docs, format)?
        }
        None => {
            let docs: Vec<RecordsDoc<'_>> = parsed
                .iter()
                .map(|(name, records)| RecordsDoc {
                    source: name,
                    records,
                })
                .collect();
            render_value(&docs, format)?
        }
    };
    Ok(out)
}

fn build_config<F>(args: &Args, lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut cfg = match &args.config {
        Some(path) => Config::from_yaml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    }
    .with_overrides(lookup);

    if let Some(sep) = &args.separator {
        cfg.parse.separator = sep.clone();
    }
    if let Some(format) = args.format {
        cfg.output = format;
    }
    if args.reject_empty_lines {
        cfg.parse.empty_lines = EmptyLinePolicy::Reject;
    }
    Ok(cfg)
}

/// Expand each input as a glob pattern. An existing literal path is taken
/// as-is, so names like `data[1].csv` are not read as character classes.
fn expand_inputs(inputs: &[String]) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    for pattern in inputs {
        let literal = Path::new(pattern);
        if literal.exists() {
            paths.push(literal.to_path_buf());
            continue;
        }
        let matched: Vec<PathBuf> = glob(pattern)
            .with_context(|| format!("Failed to read glob pattern '{}'", pattern))?
            .filter_map(|entry| entry.ok())
            .collect();
        if matched.is_empty() {
            bail!("no files match '{}'", pattern);
        }
        paths.extend(matched);
    }
    Ok(paths)
}

fn is_zip(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("zip"))
        .unwrap_or(false)
}

/// Read one input (a file or every matching entry of an archive) and parse it.
fn load(path: &Path, cfg: &Config) -> Result<Vec<(String, Records)>> {
    let texts = if is_zip(path) {
        read_zip_lines(path, &cfg.source)?
    } else {
        vec![open_lines(path, &cfg.source)?]
    };

    texts
        .into_iter()
        .map(|text| {
            let name = text
                .name
                .clone()
                .unwrap_or_else(|| path.display().to_string());
            let records = text
                .parse(&cfg.parse)
                .with_context(|| format!("parsing {}", name))?;
            Ok((name, records))
        })
        .collect()
}
