//! Merge → normalize → aggregate, per category then across categories.

use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::analyzers::analyzer::build_report;
use crate::analyzers::types::PipelineReport;
use crate::category::Category;
use crate::config::PipelineConfig;
use crate::geography::Geography;
use crate::merge::merge_category;
use crate::normalize::normalize_table;
use crate::stats::CategoryDiagnostics;
use crate::table::CategoryTable;

/// The three normalized tables, ready for aggregation.
#[derive(Debug, Clone)]
pub struct NormalizedTables {
    pub biometric: CategoryTable,
    pub demographic: CategoryTable,
    pub enrolment: CategoryTable,
    pub diagnostics: Vec<CategoryDiagnostics>,
}

/// Merges and normalizes a single category.
#[tracing::instrument(skip(base_dir, geo), fields(dir = %base_dir.display()))]
pub fn load_category(
    base_dir: &Path,
    category: Category,
    geo: &Geography,
) -> Result<(CategoryTable, CategoryDiagnostics)> {
    let (merged, merge) = merge_category(base_dir, category)?;
    let (normalized, normalize) = normalize_table(&merged, geo);

    Ok((
        normalized,
        CategoryDiagnostics {
            category,
            merge,
            normalize,
        },
    ))
}

/// Loads all three categories concurrently on the blocking pool.
pub async fn load_all(base_dir: &Path, geo: Arc<Geography>) -> Result<NormalizedTables> {
    let spawn = |category: Category| {
        let base_dir = base_dir.to_path_buf();
        let geo = Arc::clone(&geo);
        tokio::task::spawn_blocking(move || load_category(&base_dir, category, &geo))
    };

    let (bio, demo, enrol) = tokio::join!(
        spawn(Category::Biometric),
        spawn(Category::Demographic),
        spawn(Category::Enrolment),
    );

    let (biometric, bio_diag) = bio.context("biometric load task panicked")??;
    let (demographic, demo_diag) = demo.context("demographic load task panicked")??;
    let (enrolment, enrol_diag) = enrol.context("enrolment load task panicked")??;

    Ok(NormalizedTables {
        biometric,
        demographic,
        enrolment,
        diagnostics: vec![bio_diag, demo_diag, enrol_diag],
    })
}

/// Runs the whole pipeline against `config.base_dir`.
pub async fn run(config: &PipelineConfig, geo: Arc<Geography>) -> Result<PipelineReport> {
    info!(base_dir = %config.base_dir.display(), "Starting pipeline");

    let tables = load_all(&config.base_dir, geo).await?;

    let report = build_report(
        &tables.biometric,
        &tables.demographic,
        &tables.enrolment,
        tables.diagnostics,
        config.top_k,
    );

    info!(errors = report.errors().len(), "Pipeline finished");
    Ok(report)
}
