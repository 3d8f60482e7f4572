use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use tracing::{debug, info};

use hx_cli::report::{AnalysisReport, MappingReport, apply_assignments};
use hx_ingest::{
    Projection, ProjectionOptions, project_rows, read_csv_headers, read_csv_table,
    write_readings_csv,
};
use hx_map::{AliasTable, ColumnMapper, MappingState, SimilarityScore, score};

use crate::cli::{
    FieldsArgs, MapArgs, MappingArgs, MetricsArgs, OutputFormatArg, ProjectArgs, ScoreArgs,
};

/// Outcome of `hxmap project`.
pub struct ProjectResult {
    pub readings: usize,
    pub skipped: usize,
    /// File the readings were written to; `None` for stdout.
    pub output: Option<PathBuf>,
}

fn load_aliases(path: Option<&Path>) -> Result<AliasTable> {
    match path {
        Some(path) => {
            let table = AliasTable::load(path).context("load alias table")?;
            debug!(
                path = %path.display(),
                fields = table.field_count(),
                aliases = table.alias_count(),
                "custom alias table"
            );
            Ok(table)
        }
        None => Ok(AliasTable::default()),
    }
}

fn mapping_state(headers: Vec<String>, args: &MappingArgs) -> Result<MappingState> {
    let mapper = ColumnMapper::new(load_aliases(args.aliases.as_deref())?);
    let mut state = MappingState::new(headers, &mapper);
    apply_assignments(&mut state, &args.assign)?;
    Ok(state)
}

pub fn run_map(args: &MapArgs) -> Result<MappingReport> {
    let headers = read_csv_headers(&args.csv).context("read CSV headers")?;
    let state = mapping_state(headers, &args.mapping)?;
    Ok(MappingReport::from_state(&state))
}

pub fn run_score(args: &ScoreArgs) -> SimilarityScore {
    score(&args.left, &args.right)
}

pub fn run_fields(args: &FieldsArgs) -> Result<AliasTable> {
    load_aliases(args.aliases.as_deref())
}

/// Reads, maps and projects a CSV file, failing if a required field is unmapped.
fn project_csv(
    csv: &Path,
    mapping: &MappingArgs,
    fallback_timestamp: Option<&str>,
) -> Result<Projection> {
    let table = read_csv_table(csv).context("read CSV")?;
    let state = mapping_state(table.headers.clone(), mapping)?;

    let validation = state.validation();
    if let Some(message) = validation.message() {
        bail!("{message}");
    }

    let options = match fallback_timestamp {
        Some(timestamp) => ProjectionOptions::with_timestamp(timestamp),
        None => ProjectionOptions::default(),
    };
    project_rows(&table, state.mappings(), &options).context("project rows")
}

fn write_readings<W: Write>(
    projection: &Projection,
    format: OutputFormatArg,
    mut out: W,
) -> Result<()> {
    match format {
        OutputFormatArg::Json => {
            serde_json::to_writer_pretty(&mut out, &projection.readings)
                .context("serialize readings")?;
            writeln!(out).context("write readings")?;
        }
        OutputFormatArg::Csv => {
            write_readings_csv(&projection.readings, &mut out).context("write readings CSV")?;
        }
    }
    out.flush().context("flush readings")
}

pub fn run_project(args: &ProjectArgs) -> Result<ProjectResult> {
    let projection = project_csv(
        &args.csv,
        &args.mapping,
        args.fallback_timestamp.as_deref(),
    )?;

    match &args.output {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
            write_readings(&projection, args.format, BufWriter::new(file))
                .with_context(|| format!("write {}", path.display()))?;
            info!(path = %path.display(), "readings written");
        }
        None => write_readings(&projection, args.format, io::stdout().lock())?,
    }

    Ok(ProjectResult {
        readings: projection.readings.len(),
        skipped: projection.skipped,
        output: args.output.clone(),
    })
}

pub fn run_metrics(args: &MetricsArgs) -> Result<AnalysisReport> {
    let projection = project_csv(
        &args.csv,
        &args.mapping,
        args.fallback_timestamp.as_deref(),
    )?;
    AnalysisReport::from_projection(&projection)
}
