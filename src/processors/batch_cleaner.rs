use crate::error::{ProcessingError, Rejection, RejectionKind, Result};
use crate::models::JourneyRecord;
use crate::processors::{DiagnosticSink, RecordCleaner};
use crate::utils::constants::{DEFAULT_CHUNK_SIZE, DEFAULT_REJECTION_SAMPLES};
use crate::utils::progress::ProgressReporter;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CleaningReport {
    pub total_lines: usize,
    pub valid_records: usize,
    pub rejected_by_kind: BTreeMap<RejectionKind, usize>,
    #[serde(skip)]
    pub sample_rejections: Vec<Rejection>,
}

impl CleaningReport {
    pub fn rejected(&self) -> usize {
        self.rejected_by_kind.values().sum()
    }

    pub fn rejected_of(&self, kind: RejectionKind) -> usize {
        self.rejected_by_kind.get(&kind).copied().unwrap_or(0)
    }

    fn record_rejection(&mut self, rejection: &Rejection, max_samples: usize) {
        *self.rejected_by_kind.entry(rejection.kind()).or_default() += 1;
        if self.sample_rejections.len() < max_samples {
            self.sample_rejections.push(rejection.clone());
        }
    }

    /// Generate a summary report
    pub fn summary(&self) -> String {
        let percent = |count: usize| {
            if self.total_lines == 0 {
                0.0
            } else {
                100.0 * count as f64 / self.total_lines as f64
            }
        };

        let mut summary = String::new();

        summary.push_str("=== Cleaning Report ===\n");
        summary.push_str(&format!("Total Lines: {}\n", self.total_lines));
        summary.push_str(&format!(
            "Valid Records: {} ({:.1}%)\n",
            self.valid_records,
            percent(self.valid_records)
        ));
        summary.push_str(&format!(
            "Rejected Lines: {} ({:.1}%)\n",
            self.rejected(),
            percent(self.rejected())
        ));

        for kind in [
            RejectionKind::MalformedFormat,
            RejectionKind::ParseFailure,
            RejectionKind::InvalidData,
        ] {
            summary.push_str(&format!("  {}: {}\n", kind, self.rejected_of(kind)));
        }

        if !self.sample_rejections.is_empty() {
            summary.push_str(&format!(
                "\nFirst {} Rejections:\n",
                self.sample_rejections.len()
            ));
            for (i, rejection) in self.sample_rejections.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. [{}] {} :: {}\n",
                    i + 1,
                    rejection.kind(),
                    rejection.reason,
                    rejection.line
                ));
            }
        }

        summary
    }
}

/// Accepted records in input order plus the tally of what was dropped.
#[derive(Debug, Clone)]
pub struct CleaningOutcome {
    pub records: Vec<JourneyRecord>,
    pub report: CleaningReport,
}

/// Runs the [`RecordCleaner`] over a whole batch of lines.
pub struct BatchCleaner {
    cleaner: RecordCleaner,
    max_workers: usize,
    chunk_size: usize,
    max_samples: usize,
}

impl BatchCleaner {
    pub fn new(cleaner: RecordCleaner) -> Self {
        Self {
            cleaner,
            max_workers: 1,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_samples: DEFAULT_REJECTION_SAMPLES,
        }
    }

    pub fn with_max_workers(mut self, max_workers: usize) -> Self {
        self.max_workers = max_workers.max(1);
        self
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    pub fn with_max_samples(mut self, max_samples: usize) -> Self {
        self.max_samples = max_samples;
        self
    }

    /// Clean every line; each rejection goes to `sink` in input order.
    pub fn clean_lines<S, D>(
        &self,
        lines: &[S],
        sink: &D,
        progress: Option<&ProgressReporter>,
    ) -> Result<CleaningOutcome>
    where
        S: AsRef<str> + Sync,
        D: DiagnosticSink + ?Sized,
    {
        if let Some(p) = progress {
            p.set_message(&format!("Cleaning {} lines...", lines.len()));
        }

        let results = if self.max_workers > 1 {
            self.clean_parallel(lines, progress)?
        } else {
            lines
                .chunks(self.chunk_size)
                .flat_map(|chunk| self.clean_chunk(chunk, progress))
                .collect()
        };

        let mut report = CleaningReport {
            total_lines: lines.len(),
            ..Default::default()
        };
        let mut records = Vec::with_capacity(results.len());

        for result in results {
            match result {
                Ok(record) => records.push(record),
                Err(rejection) => {
                    report.record_rejection(&rejection, self.max_samples);
                    sink.rejected(&rejection);
                }
            }
        }
        report.valid_records = records.len();

        tracing::debug!(
            total = report.total_lines,
            valid = report.valid_records,
            rejected = report.rejected(),
            "Cleaned batch"
        );

        if let Some(p) = progress {
            p.finish_with_message(&format!("Cleaned {} lines", lines.len()));
        }

        Ok(CleaningOutcome { records, report })
    }

    /// Clean fixed-size chunks on a bounded pool; `collect` keeps chunk order.
    fn clean_parallel<S>(
        &self,
        lines: &[S],
        progress: Option<&ProgressReporter>,
    ) -> Result<Vec<std::result::Result<JourneyRecord, Rejection>>>
    where
        S: AsRef<str> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.max_workers)
            .build()
            .map_err(|e| ProcessingError::Config(e.to_string()))?;

        let chunks: Vec<Vec<_>> = pool.install(|| {
            lines
                .par_chunks(self.chunk_size)
                .map(|chunk| self.clean_chunk(chunk, progress))
                .collect()
        });

        Ok(chunks.into_iter().flatten().collect())
    }

    fn clean_chunk<S>(
        &self,
        chunk: &[S],
        progress: Option<&ProgressReporter>,
    ) -> Vec<std::result::Result<JourneyRecord, Rejection>>
    where
        S: AsRef<str>,
    {
        let cleaned = chunk
            .iter()
            .map(|line| self.cleaner.clean(line.as_ref()))
            .collect();

        if let Some(p) = progress {
            p.increment(chunk.len() as u64);
        }

        cleaned
    }
}
