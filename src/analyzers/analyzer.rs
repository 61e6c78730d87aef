use chrono::Utc;
use tracing::{error, info};

use crate::analyzers::aggregate::scalar_total;
use crate::analyzers::ratio::{Selection, ranked_ratio};
use crate::analyzers::trend::resample_monthly;
use crate::analyzers::types::{PipelineReport, RankedRatio, ResampledSeries, ScalarTotal};
use crate::category::{
    COL_AGE_0_5, COL_BIO_AGE_5_17, COL_BIO_AGE_17, COL_DATE, COL_DEMO_AGE_5_17, COL_DEMO_AGE_17,
    COL_STATE,
};
use crate::error::AggregateError;
use crate::stats::CategoryDiagnostics;
use crate::table::CategoryTable;

pub const DEMOGRAPHIC_UPDATES: &str = "Demographic Updates";
pub const BIOMETRIC_UPDATES: &str = "Biometric Updates";

/// Total demographic vs. biometric update volume.
pub fn update_totals(
    demographic: &CategoryTable,
    biometric: &CategoryTable,
) -> Result<Vec<ScalarTotal>, AggregateError> {
    let demo = scalar_total(
        DEMOGRAPHIC_UPDATES,
        demographic,
        &[COL_DEMO_AGE_5_17, COL_DEMO_AGE_17],
    )?;
    let bio = scalar_total(
        BIOMETRIC_UPDATES,
        biometric,
        &[COL_BIO_AGE_5_17, COL_BIO_AGE_17],
    )?;

    info!(demo = demo.value, bio = bio.value, "Raw sums");
    Ok(vec![demo, bio])
}

/// States ranked by child biometric updates (5-17) per child enrolment (0-5).
pub fn child_compliance(
    enrolment: &CategoryTable,
    biometric: &CategoryTable,
    top_k: usize,
) -> Result<RankedRatio, AggregateError> {
    let ranked = ranked_ratio(
        Selection::new(enrolment, COL_STATE, COL_AGE_0_5),
        Selection::new(biometric, COL_STATE, COL_BIO_AGE_5_17),
    )?;

    let non_finite = ranked
        .entries()
        .iter()
        .filter(|e| !e.ratio().is_finite())
        .count();
    info!(states = ranked.len(), non_finite, top_k, "Ranked child compliance");

    Ok(ranked.top(top_k))
}

/// Monthly adult demographic updates.
pub fn adult_trend(demographic: &CategoryTable) -> Result<ResampledSeries, AggregateError> {
    let series = resample_monthly(demographic, COL_DATE, COL_DEMO_AGE_17)?;
    info!(months = series.len(), "Resampled adult trend");
    Ok(series)
}

fn record<T>(name: &str, result: Result<T, AggregateError>, errors: &mut Vec<String>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            error!(computation = name, error = %e, "Aggregation failed");
            errors.push(format!("{name}: {e}"));
            None
        }
    }
}

/// Runs the three analyses. A usage error stops only the analysis it
/// belongs to; the others still produce results.
pub fn build_report(
    biometric: &CategoryTable,
    demographic: &CategoryTable,
    enrolment: &CategoryTable,
    diagnostics: Vec<CategoryDiagnostics>,
    top_k: usize,
) -> PipelineReport {
    let mut errors = Vec::new();

    let update_totals = record(
        "update_totals",
        update_totals(demographic, biometric),
        &mut errors,
    );
    let child_compliance = record(
        "child_compliance",
        child_compliance(enrolment, biometric, top_k),
        &mut errors,
    );
    let adult_trend = record("adult_trend", adult_trend(demographic), &mut errors);

    PipelineReport {
        generated_at: Utc::now(),
        update_totals,
        child_compliance,
        adult_trend,
        diagnostics,
        errors,
    }
}
