//! `caucus <CONGRESS> <HOUSE>`: fetch or load bills, build and analyze the
//! co-sponsorship network, then report and export it.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use caucus_core::api::{ApiClient, HttpTransport, RetrievalStats};
use caucus_core::config::load_config;
use caucus_core::model::Chamber;
use caucus_core::{BillCache, FetchRequest, LoadSource};
use caucus_graph::analyze::{analyze, metric_value, rank_nodes};
use caucus_graph::export::{ExportFormat, STDOUT_PATH, write_graph};
use caucus_graph::network::{ResizeMetric, build_network, trim_edges};
use caucus_graph::{CosponsorGraph, GraphStats};
use clap::Args;
use serde::Serialize;
use tracing::info;

use crate::output::{OutputMode, pretty_kv, pretty_rule, pretty_section, render_mode};
use crate::progress::FetchProgress;

#[derive(Args, Debug, Clone)]
pub struct NetworkArgs {
    /// Congress number, e.g. 113 for January 2013 to January 2015.
    #[arg(value_name = "CONGRESS")]
    pub congress: u32,

    /// Chamber: lower (representatives) or upper (senate).
    #[arg(value_name = "HOUSE")]
    pub house: String,

    /// Ignore the cache and download every bill again.
    #[arg(long)]
    pub ignore_cache: bool,

    /// Number of bills to download (all by default).
    #[arg(short, long, value_name = "N")]
    pub limit: Option<u64>,

    /// Remove edges with a weight at or below this value.
    #[arg(short, long, value_name = "WEIGHT")]
    pub trim: Option<u32>,

    /// Node attribute renderers should size nodes by.
    #[arg(
        short,
        long,
        value_name = "METRIC",
        num_args = 0..=1,
        default_missing_value = "betweenness"
    )]
    pub resize: Option<ResizeMetric>,

    /// Write the analyzed graph here (`.json` node-link, or `-` for stdout).
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Number of top-ranked legislators to list.
    #[arg(long, default_value_t = 10)]
    pub top: usize,

    /// Edge weight at or below which edges are ignored for centrality.
    #[arg(long, value_name = "WEIGHT")]
    pub centrality_trim: Option<u32>,

    /// Config file (default: <config dir>/caucus/config.toml).
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Cache directory (overrides config).
    #[arg(long, value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct RankedLegislator {
    bioguideid: String,
    name: String,
    party_affiliation: String,
    degree: usize,
    betweenness: f64,
}

#[derive(Debug, Serialize)]
struct RetrievalSummary {
    requests: usize,
    retries: usize,
    dropped: usize,
    fetched: usize,
}

impl From<RetrievalStats> for RetrievalSummary {
    fn from(stats: RetrievalStats) -> Self {
        Self {
            requests: stats.requests,
            retries: stats.retries,
            dropped: stats.dropped,
            fetched: stats.fetched,
        }
    }
}

/// Report payload for a network run.
#[derive(Debug, Serialize)]
pub struct NetworkReport {
    congress: u32,
    chamber: Chamber,
    source: &'static str,
    cache_file: PathBuf,
    bills: usize,
    retrieval: RetrievalSummary,
    trim: Option<u32>,
    centrality_trim: u32,
    resize: Option<ResizeMetric>,
    content_hash: String,
    stats: GraphStats,
    ranking_metric: ResizeMetric,
    top: Vec<RankedLegislator>,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<PathBuf>,
}

/// Execute a network run.
pub fn run_network(args: &NetworkArgs, mode: OutputMode, quiet: bool) -> anyhow::Result<()> {
    // Both checks run before any network or disk access.
    let chamber = Chamber::parse(&args.house)?;
    if let Some(path) = &args.output {
        ExportFormat::from_path(path)?;
    }

    let config = load_config(args.config.as_deref()).context("failed to load configuration")?;
    let cache = BillCache::new(
        args.cache_dir
            .clone()
            .unwrap_or_else(|| config.cache.resolved_dir()),
    );
    let centrality_trim = args
        .centrality_trim
        .unwrap_or(config.analysis.centrality_trim);

    let transport = HttpTransport::new(&config.api.user_agent, config.api.timeout());
    let client = ApiClient::new(transport, config.api.locator())
        .with_retry_policy(config.api.retry_policy());

    let request = FetchRequest {
        congress: args.congress,
        chamber,
        limit: args.limit,
        ignore_cache: args.ignore_cache,
    };
    let progress = FetchProgress::new(quiet);
    let outcome = match cache.load_or_fetch(&client, request, |percent| progress.set(percent)) {
        Ok(outcome) => {
            progress.finish("bills ready");
            outcome
        }
        Err(err) => {
            // Clear the bar so the error starts on a clean line.
            progress.clear();
            return Err(anyhow::Error::from(err)
                .context(format!("failed to load bills for congress {}", args.congress)));
        }
    };

    let mut graph = build_network(&outcome.bills).context("failed to build network")?;
    if let Some(weight) = args.trim {
        graph = trim_edges(&graph, weight);
    }
    analyze(&mut graph, centrality_trim);
    graph.resize = args.resize;

    info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        hash = %graph.content_hash(),
        "network ready"
    );

    if let Some(path) = &args.output {
        write_graph(&graph, path)
            .with_context(|| format!("failed to export graph to {}", path.display()))?;
    }

    let to_stdout = args
        .output
        .as_deref()
        .is_some_and(|path| path == Path::new(STDOUT_PATH));
    if quiet || to_stdout {
        return Ok(());
    }

    let source = match outcome.source {
        LoadSource::Cache => "cache",
        LoadSource::Fetched => "api",
    };
    let ranking_metric = args.resize.unwrap_or(ResizeMetric::Betweenness);
    let report = NetworkReport {
        congress: args.congress,
        chamber,
        source,
        cache_file: outcome.path,
        bills: outcome.bills.len(),
        retrieval: outcome.stats.into(),
        trim: args.trim,
        centrality_trim,
        resize: args.resize,
        content_hash: graph.content_hash(),
        stats: GraphStats::compute(&graph),
        ranking_metric,
        top: top_ranked(&graph, ranking_metric, args.top),
        output: args.output.clone(),
    };

    render_mode(mode, &report, render_report_text, render_report_pretty)
}

fn top_ranked(graph: &CosponsorGraph, metric: ResizeMetric, n: usize) -> Vec<RankedLegislator> {
    rank_nodes(graph, metric, true)
        .into_iter()
        .take(n)
        .map(|node| RankedLegislator {
            bioguideid: node.key().to_string(),
            name: node.attrs.name.clone(),
            party_affiliation: node.attrs.party_affiliation.to_string(),
            degree: node.degree.unwrap_or(0),
            betweenness: metric_value(node, ResizeMetric::Betweenness),
        })
        .collect()
}

fn render_report_text(report: &NetworkReport, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(
        w,
        "congress={} chamber={} source={} bills={} nodes={} edges={} components={} hash={}",
        report.congress,
        report.chamber,
        report.source,
        report.bills,
        report.stats.nodes,
        report.stats.edges,
        report.stats.components,
        report.content_hash,
    )?;
    writeln!(w, "rank\tbioguideid\tparty\tdegree\tbetweenness\tname")?;
    for (i, entry) in report.top.iter().enumerate() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{:.2}\t{}",
            i + 1,
            entry.bioguideid,
            entry.party_affiliation,
            entry.degree,
            entry.betweenness,
            entry.name
        )?;
    }
    Ok(())
}

fn render_report_pretty(report: &NetworkReport, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, &format!("Congress {} ({})", report.congress, report.chamber))?;
    pretty_kv(w, "Bills", format!("{} from {}", report.bills, report.source))?;
    pretty_kv(w, "Cache file", report.cache_file.display().to_string())?;
    if report.retrieval.requests > 0 {
        pretty_kv(
            w,
            "Requests",
            format!(
                "{} ({} retried, {} dropped)",
                report.retrieval.requests, report.retrieval.retries, report.retrieval.dropped
            ),
        )?;
    }
    pretty_kv(w, "Legislators", report.stats.nodes.to_string())?;
    pretty_kv(w, "Edges", report.stats.edges.to_string())?;
    pretty_kv(w, "Pairings", report.stats.total_weight.to_string())?;
    pretty_kv(w, "Max weight", report.stats.max_weight.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", report.stats.density))?;
    pretty_kv(
        w,
        "Components",
        format!("{} ({} isolated)", report.stats.components, report.stats.isolated),
    )?;
    if let Some(trim) = report.trim {
        pretty_kv(w, "Trim", format!("weight <= {trim} removed"))?;
    }
    pretty_kv(w, "Centrality", format!("edges <= {} ignored", report.centrality_trim))?;
    let parties: Vec<String> = report
        .stats
        .parties
        .iter()
        .map(|(party, count)| format!("{party} {count}"))
        .collect();
    pretty_kv(w, "Parties", parties.join(", "))?;
    if let Some(path) = &report.output {
        pretty_kv(w, "Output", path.display().to_string())?;
    }

    writeln!(w)?;
    pretty_section(w, &format!("Top legislators by {}", report.ranking_metric))?;
    for (i, entry) in report.top.iter().enumerate() {
        writeln!(
            w,
            "{:>3}. {:<10} {:<12} deg {:>4}  btw {:>10.2}  {}",
            i + 1,
            entry.bioguideid,
            entry.party_affiliation,
            entry.degree,
            entry.betweenness,
            entry.name
        )?;
    }
    pretty_rule(w)
}
