use std::io::Write;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use opentree_client::{OpenTreeClient, TreePayload};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Parser)]
#[command(
    name = "opentree-doi-search",
    version,
    about = "List Open Tree studies and fetch their trees by DOI"
)]
struct Cli {
    /// Base URL for the API. Defaults to the public v2 endpoint.
    #[arg(long, env = "OPENTREE_BASE_URL")]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List indexed studies that carry a publication DOI.
    ListStudies {
        /// 1-based index of the first study to list (default: first).
        #[arg(long)]
        list_from: Option<usize>,

        /// Maximum number of studies to list (default: all).
        #[arg(long)]
        max_studies: Option<usize>,

        /// Format as tab-delimited rows instead of bracketed blocks.
        #[arg(long)]
        as_table: bool,
    },
    /// Fetch the trees of the studies matching a publication DOI.
    GetTree {
        /// Publication DOI to search for.
        doi: String,

        /// Tree serialization format.
        #[arg(long, value_enum, default_value = "newick")]
        format: TreeFormat,
    },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum TreeFormat {
    Nexus,
    Newick,
    Nexml,
}

impl TreeFormat {
    fn as_schema(self) -> &'static str {
        match self {
            TreeFormat::Nexus => "nexus",
            TreeFormat::Newick => "newick",
            TreeFormat::Nexml => "nexml",
        }
    }
}

/// One study worth reporting: indexed, resolvable, and carrying a DOI.
#[derive(Debug)]
struct StudyInfo {
    doi: String,
    citation: Option<String>,
}

/// The slice of a `matched_studies` entry the listing needs.
#[derive(Debug, Deserialize)]
struct StudyRecord {
    #[serde(rename = "ot:studyId")]
    study_id: String,
}

fn main() -> Result<()> {
    // Bad or missing subcommands exit 1 with usage on stderr; --help and
    // --version keep clap's success path.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => {
            let code = i32::from(error.use_stderr());
            let _ = error.print();
            std::process::exit(code);
        }
    };

    let client = match &cli.base_url {
        Some(url) => OpenTreeClient::new(url)
            .with_context(|| format!("failed to create client with base URL '{url}'"))?,
        None => OpenTreeClient::default_service()
            .context("failed to create client for the default service URL")?,
    };

    match cli.command {
        Command::ListStudies {
            list_from,
            max_studies,
            as_table,
        } => {
            let studies = collect_doi_studies(&client, list_from, max_studies)?;
            let stdout = std::io::stdout();
            render_studies(&studies, as_table, &mut stdout.lock())
                .context("failed to write study listing")?;
        }
        Command::GetTree { doi, format } => {
            let trees = fetch_trees_by_doi(&client, &doi, format.as_schema())?;
            for tree in trees {
                println!("{tree}");
            }
        }
    }

    Ok(())
}

/// Walks the study index and resolves each paged study's metadata, keeping
/// the ones that carry a DOI.
fn collect_doi_studies(
    client: &OpenTreeClient,
    list_from: Option<usize>,
    max_studies: Option<usize>,
) -> Result<Vec<StudyInfo>> {
    let found = client
        .studies_find_studies(None, None, false, false)
        .context("study search failed")?;
    let matched = found
        .get("matched_studies")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();

    let mut studies = Vec::new();
    for entry in page(&matched, list_from, max_studies) {
        let Ok(record) = serde_json::from_value::<StudyRecord>(entry.clone()) else {
            continue;
        };
        let meta = client.get_study_meta(&record.study_id).with_context(|| {
            format!("failed to fetch metadata for study '{}'", record.study_id)
        })?;
        if let Some(info) = study_info_from_meta(&meta) {
            studies.push(info);
        }
    }
    Ok(studies)
}

/// Extracts DOI and citation from a study metadata payload.
///
/// Studies without a `^ot:studyPublication` DOI are skipped.
fn study_info_from_meta(meta: &Value) -> Option<StudyInfo> {
    let nexml = meta.get("nexml")?;
    let doi = nexml
        .get("^ot:studyPublication")?
        .get("@href")?
        .as_str()?
        .to_owned();
    let citation = nexml
        .get("^ot:studyPublicationReference")
        .and_then(Value::as_str)
        .map(str::to_owned);
    Some(StudyInfo { doi, citation })
}

/// Pages a list with a 1-based start index and a count.
///
/// `start_from = Some(2), count = Some(2)` on five items yields items 2..=3.
/// Out-of-range starts yield an empty page.
fn page<T>(items: &[T], start_from: Option<usize>, count: Option<usize>) -> &[T] {
    let begin = start_from.unwrap_or(1).saturating_sub(1).min(items.len());
    let end = count.map_or(items.len(), |count| {
        begin.saturating_add(count).min(items.len())
    });
    &items[begin..end]
}

/// Writes the listing: `doi<TAB>citation` rows in table mode, bracketed
/// blocks otherwise.
fn render_studies(studies: &[StudyInfo], as_table: bool, out: &mut impl Write) -> Result<()> {
    for study in studies {
        let citation = study.citation.as_deref().unwrap_or("");
        if as_table {
            writeln!(out, "{}\t{citation}", study.doi)?;
        } else {
            writeln!(out, "[{}]\n{citation}\n", study.doi)?;
        }
    }
    Ok(())
}

/// Finds the trees whose study publication matches `doi` and retrieves each
/// one in the requested schema.
fn fetch_trees_by_doi(client: &OpenTreeClient, doi: &str, schema: &str) -> Result<Vec<String>> {
    let found = client
        .studies_find_trees("ot:studyPublication", doi, true, false)
        .context("tree search failed")?;
    let matched = found
        .get("matched_studies")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default();
    if matched.is_empty() {
        bail!("no study found for DOI '{doi}'");
    }

    let mut trees = Vec::new();
    for study in &matched {
        let Some(study_id) = study.get("ot:studyId").and_then(Value::as_str) else {
            continue;
        };
        let matched_trees = study
            .get("matched_trees")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();
        for tree in &matched_trees {
            let Some(tree_id) = tree.get("nexson_id").and_then(Value::as_str) else {
                continue;
            };
            let payload = client
                .get_study_tree(study_id, tree_id, schema)
                .with_context(|| {
                    format!("failed to fetch tree '{tree_id}' of study '{study_id}'")
                })?;
            match payload {
                TreePayload::Text(text) => trees.push(text),
                TreePayload::Json(value) => trees.push(serde_json::to_string_pretty(&value)?),
            }
        }
    }
    if trees.is_empty() {
        bail!("study matching DOI '{doi}' has no retrievable trees");
    }
    Ok(trees)
}
