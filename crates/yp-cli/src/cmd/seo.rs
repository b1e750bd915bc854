use crate::output::{print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use serde::Serialize;
use std::path::{Path, PathBuf};
use yp_core::config::Config;
use yp_core::paths;
use yp_core::seo::{
    score_with_diagnostics, upload_tasks, ConvexTaskStore, Gap, GapFile, SeoTables, TaskBuilder,
    TaskSummary, UploadSummary,
};

// ---------------------------------------------------------------------------
// Subcommand types
// ---------------------------------------------------------------------------

#[derive(Subcommand)]
pub enum SeoSubcommand {
    /// Turn the keyword gap file into sorted content tasks
    Seed {
        /// Gap file (default from config)
        #[arg(long)]
        gaps: Option<PathBuf>,
        /// Where to write the task list (default from config)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Upsert every task into the Convex task store
        #[arg(long)]
        upload: bool,
        /// Convex deployment URL
        #[arg(long, env = "CONVEX_URL")]
        convex_url: Option<String>,
    },

    /// Score a single keyword
    Score {
        #[arg(long)]
        keyword: String,
        #[arg(long)]
        volume: u64,
        #[arg(long)]
        difficulty: u32,
        #[arg(long, default_value = "informational")]
        intent: String,
        #[arg(long)]
        cluster: String,
        /// Apply the consolidation primary boost
        #[arg(long)]
        primary: bool,
    },

    /// Check the built-in tables and the gap file without writing anything
    Validate {
        /// Gap file (default from config)
        #[arg(long)]
        gaps: Option<PathBuf>,
    },
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn run(root: &Path, subcmd: SeoSubcommand, json: bool) -> anyhow::Result<()> {
    let config = Config::load(root).context("failed to load config")?;
    match subcmd {
        SeoSubcommand::Seed {
            gaps,
            out,
            upload,
            convex_url,
        } => seed(root, &config, gaps, out, upload, convex_url, json),
        SeoSubcommand::Score {
            keyword,
            volume,
            difficulty,
            intent,
            cluster,
            primary,
        } => {
            let gap = Gap {
                keyword,
                volume,
                difficulty,
                intent,
                cluster,
                sport: "basketball".to_string(),
                age_group: None,
                source: "cli".to_string(),
            };
            score(&gap, primary, json)
        }
        SeoSubcommand::Validate { gaps } => validate(root, &config, gaps, json),
    }
}

fn gaps_path(root: &Path, config: &Config, flag: Option<PathBuf>) -> PathBuf {
    paths::resolve(root, flag.as_deref().unwrap_or(&config.seo.gaps_path))
}

// ---------------------------------------------------------------------------
// seed
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct SeedReport {
    summary: TaskSummary,
    output: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    upload: Option<UploadSummary>,
}

fn seed(
    root: &Path,
    config: &Config,
    gaps: Option<PathBuf>,
    out: Option<PathBuf>,
    upload: bool,
    convex_url: Option<String>,
    json: bool,
) -> anyhow::Result<()> {
    let gaps_path = gaps_path(root, config, gaps);
    let out_path = paths::resolve(root, out.as_deref().unwrap_or(&config.seo.output_path));

    let gap_file = GapFile::load(&gaps_path)
        .with_context(|| format!("failed to load gaps from {}", gaps_path.display()))?;
    tracing::info!(count = gap_file.gaps.len(), path = %gaps_path.display(), "loaded gaps");

    let tables = SeoTables::builtin().context("built-in consolidation rules are invalid")?;
    let tasks = TaskBuilder::new(&tables)
        .strict(config.seo.strict_tables)
        .projects(&config.seo.neoball_project, &config.seo.content_project)
        .build(&gap_file.gaps, chrono::Utc::now().timestamp_millis())?;

    yp_core::io::write_json(&out_path, &tasks)
        .with_context(|| format!("failed to write {}", out_path.display()))?;
    tracing::info!(path = %out_path.display(), "tasks written");

    let upload_summary = if upload {
        let url = convex_url.context("--upload needs --convex-url or CONVEX_URL")?;
        let mut store =
            ConvexTaskStore::new(&url, &config.seo.convex_mutation, config.tom.request_timeout())?;
        Some(upload_tasks(&mut store, &tasks))
    } else {
        None
    };

    let report = SeedReport {
        summary: TaskSummary::from_tasks(&tasks),
        output: out_path,
        upload: upload_summary,
    };

    if json {
        print_json(&report)?;
    } else {
        print_summary(&report);
    }

    if let Some(u) = report.upload {
        if u.failed > 0 {
            anyhow::bail!("{} of {} tasks failed to upload", u.failed, report.summary.total);
        }
    }
    Ok(())
}

fn print_summary(report: &SeedReport) {
    let s = &report.summary;
    let count = |t: &str| s.by_type.get(t).copied().unwrap_or(0);
    let bucket = |p: u8| s.by_priority.get(&p).copied().unwrap_or(0);

    println!("Total tasks: {}", s.total);
    println!("  pillars: {}", count("pillar"));
    println!("  spokes:  {}", count("spoke"));
    println!("  q&as:    {}", count("qa"));
    println!("  drills:  {}", count("drill"));
    println!("Silent basketball tasks: {}", s.silent_basketball);
    println!("NeoBall CTA pages: {}", s.neoball_cta);
    println!(
        "Priority: P1 {}  P2 {}  P3 {}  P4 {}",
        bucket(1),
        bucket(2),
        bucket(3),
        bucket(4)
    );
    println!("Tasks written to {}", report.output.display());
    if let Some(u) = &report.upload {
        println!(
            "Upload: {} created, {} updated, {} failed",
            u.created, u.updated, u.failed
        );
    }
}

// ---------------------------------------------------------------------------
// score
// ---------------------------------------------------------------------------

fn score(gap: &Gap, primary: bool, json: bool) -> anyhow::Result<()> {
    let tables = SeoTables::builtin()?;
    let diag = score_with_diagnostics(&tables, gap, primary);

    if json {
        return print_json(&diag);
    }

    println!("{}", diag.score);
    for w in &diag.warnings {
        eprintln!("warning: {w}");
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// validate
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct GapWarning {
    keyword: String,
    warning: String,
}

fn validate(root: &Path, config: &Config, gaps: Option<PathBuf>, json: bool) -> anyhow::Result<()> {
    let tables = SeoTables::builtin().context("built-in consolidation rules are invalid")?;

    let path = gaps_path(root, config, gaps);
    let gap_file =
        GapFile::load(&path).with_context(|| format!("failed to load gaps from {}", path.display()))?;

    let warnings: Vec<GapWarning> = gap_file
        .gaps
        .iter()
        .flat_map(|gap| {
            score_with_diagnostics(&tables, gap, false)
                .warnings
                .into_iter()
                .map(|warning| GapWarning {
                    keyword: gap.keyword.clone(),
                    warning,
                })
        })
        .collect();

    if json {
        print_json(&serde_json::json!({
            "rules": tables.rules.len(),
            "pillars": tables.pillars.len(),
            "gaps": gap_file.gaps.len(),
            "warnings": warnings,
        }))?;
    } else {
        println!(
            "{} rules, {} pillars, {} gaps",
            tables.rules.len(),
            tables.pillars.len(),
            gap_file.gaps.len()
        );
        if warnings.is_empty() {
            println!("No table misses.");
        } else {
            print_table(
                &["KEYWORD", "WARNING"],
                warnings
                    .iter()
                    .map(|w| vec![w.keyword.clone(), w.warning.clone()])
                    .collect(),
            );
        }
    }

    if config.seo.strict_tables && !warnings.is_empty() {
        anyhow::bail!("{} table misses with strict_tables enabled", warnings.len());
    }
    Ok(())
}
