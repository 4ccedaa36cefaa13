//! `normalize` command.

use anyhow::{Result, bail};
use rayon::prelude::*;

use super::NormalizeArgs;
use crate::config::ToolConfig;
use crate::logger::ProgressLine;
use crate::log;
use crate::pipeline::{self, NormalizeJob, Report};

/// Build one job per input from CLI arguments and config.
pub fn plan_jobs(args: &NormalizeArgs, config: &ToolConfig) -> Result<Vec<NormalizeJob>> {
    if let Some(output) = &args.output {
        if args.inputs.len() != 1 {
            bail!("--output takes a single input, got {}", args.inputs.len());
        }
        return Ok(vec![NormalizeJob::new(&args.inputs[0], output)]);
    }

    let output_dir = args
        .output_dir
        .as_deref()
        .or(config.normalize.output_dir.as_deref());

    Ok(args
        .inputs
        .iter()
        .map(|input| NormalizeJob::with_default_output(input, output_dir))
        .collect())
}

/// Normalize every input; independent documents run in parallel.
///
/// Every run is logged, failures under the `error` prefix. When any run
/// failed, a summary error is returned after all runs have finished.
pub fn run_normalize(args: &NormalizeArgs, config: &ToolConfig) -> Result<()> {
    let jobs = plan_jobs(args, config)?;

    let results: Vec<Result<Report>> = if jobs.len() == 1 {
        vec![pipeline::run(&jobs[0])]
    } else {
        let progress = ProgressLine::new("normalize", &[("documents", jobs.len())]);
        let results: Vec<_> = jobs
            .par_iter()
            .map(|job| {
                let result = pipeline::run(job);
                progress.inc("documents");
                result
            })
            .collect();
        progress.finish();
        results
    };

    let total = results.len();
    let mut failed = 0;
    for result in results {
        match result {
            Ok(report) => log!("normalize"; "{} ({} path{})",
                report.output.display(),
                report.path_count,
                if report.path_count == 1 { "" } else { "s" }),
            Err(e) => {
                log!("error"; "{:#}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {total} document{} failed", if total == 1 { "" } else { "s" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn args(inputs: &[&str], output: Option<&str>, output_dir: Option<&str>) -> NormalizeArgs {
        NormalizeArgs {
            inputs: inputs.iter().map(PathBuf::from).collect(),
            output: output.map(PathBuf::from),
            output_dir: output_dir.map(PathBuf::from),
        }
    }

    #[test]
    fn test_plan_explicit_output() {
        let jobs = plan_jobs(&args(&["a.raw.svg"], Some("x.svg"), None), &ToolConfig::default())
            .unwrap();
        assert_eq!(jobs, vec![NormalizeJob::new("a.raw.svg", "x.svg")]);
    }

    #[test]
    fn test_plan_explicit_output_rejects_many_inputs() {
        let result = plan_jobs(
            &args(&["a.svg", "b.svg"], Some("x.svg"), None),
            &ToolConfig::default(),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_plan_output_dir_precedence() {
        let mut config = ToolConfig::default();
        config.normalize.output_dir = Some(PathBuf::from("from-config"));

        let jobs = plan_jobs(&args(&["in/a.raw.svg"], None, None), &config).unwrap();
        assert_eq!(jobs[0].output, PathBuf::from("from-config/a.svg"));

        let jobs = plan_jobs(&args(&["in/a.raw.svg"], None, Some("cli")), &config).unwrap();
        assert_eq!(jobs[0].output, PathBuf::from("cli/a.svg"));

        let jobs = plan_jobs(&args(&["in/a.raw.svg", "in/b.svg"], None, None), &ToolConfig::default())
            .unwrap();
        assert_eq!(jobs[0].output, PathBuf::from("in/a.svg"));
        assert_eq!(jobs[1].output, PathBuf::from("in/b.norm.svg"));
    }

    #[test]
    fn test_run_normalize_summarizes_failures() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("a.raw.svg");
        let missing = dir.path().join("missing.svg");
        fs::write(&good, r#"<svg viewBox="0 0 10 10"><path d="M0 0"/></svg>"#).unwrap();

        let inputs = [good.to_str().unwrap(), missing.to_str().unwrap()];
        let err = run_normalize(&args(&inputs, None, None), &ToolConfig::default()).unwrap_err();

        assert_eq!(err.to_string(), "1 of 2 documents failed");
        assert!(dir.path().join("a.svg").exists());
        assert!(!dir.path().join("missing.norm.svg").exists());
    }

    #[test]
    fn test_run_normalize_single_success() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("b.svg");
        fs::write(&input, "<svg><path d=\"M1 1\"/></svg>").unwrap();

        let inputs = [input.to_str().unwrap()];
        run_normalize(&args(&inputs, None, None), &ToolConfig::default()).unwrap();
        assert!(dir.path().join("b.norm.svg").exists());
    }
}
