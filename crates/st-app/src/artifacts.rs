//! Files written into the output directory.

use std::path::{Path, PathBuf};

use st_ident::StepResponseTrace;
use st_results::{AnalysisReport, ReportStore};

use crate::config::FigureConfig;
use crate::error::AppResult;
use crate::pipeline::MethodOutcome;
use crate::plot;

const TRACE_FIGURE: &str = "transfer_function.png";

pub struct ArtifactWriter {
    store: ReportStore,
    figures: FigureConfig,
}

impl ArtifactWriter {
    /// Open (and create if needed) `output_dir`.
    pub fn new(output_dir: &Path, figures: FigureConfig) -> AppResult<Self> {
        let store = ReportStore::new(output_dir.to_path_buf())?;
        Ok(Self { store, figures })
    }

    pub fn output_dir(&self) -> &Path {
        self.store.root_dir()
    }

    /// Raw input/output figure. `None` when figures are disabled.
    pub fn write_trace(&self, trace: &StepResponseTrace) -> AppResult<Option<PathBuf>> {
        if !self.figures.enabled {
            return Ok(None);
        }
        let path = self.output_dir().join(TRACE_FIGURE);
        plot::render_trace(&path, trace, self.figures.trace_size)?;
        tracing::info!(path = %path.display(), "wrote figure");
        Ok(Some(path))
    }

    /// Response CSV and, when enabled, the comparison figure.
    pub fn write_outcome(
        &self,
        trace: &StepResponseTrace,
        outcome: &MethodOutcome,
    ) -> AppResult<Vec<PathBuf>> {
        let csv = self.store.save_response(
            &outcome.label,
            &outcome.response.time,
            &outcome.response.response,
        )?;
        tracing::info!(path = %csv.display(), "wrote response series");
        let mut written = vec![csv];

        if self.figures.enabled {
            let path = self.output_dir().join(format!("{}.png", outcome.label));
            plot::render_comparison(&path, trace, outcome, self.figures.comparison_size)?;
            tracing::info!(path = %path.display(), "wrote figure");
            written.push(path);
        }
        Ok(written)
    }

    pub fn write_report(&self, report: &AnalysisReport) -> AppResult<PathBuf> {
        let path = self.store.save_report(report)?;
        tracing::info!(path = %path.display(), runs = report.runs.len(), "wrote report");
        Ok(path)
    }
}
