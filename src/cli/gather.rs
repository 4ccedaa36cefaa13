//! `gather` command.

use anyhow::{Context, Result};
use std::path::PathBuf;

use super::GatherArgs;
use crate::config::ToolConfig;
use crate::gather::{GatherRequest, gather, keys_from_manifest, keys_from_str};
use crate::logger::ProgressLine;
use crate::{debug, log};

/// Resolve keys and directories from CLI arguments, falling back to config.
pub fn build_request(args: &GatherArgs, config: &ToolConfig) -> Result<GatherRequest> {
    let keys = match (&args.keys, &args.manifest) {
        (Some(keys), _) => keys_from_str(keys),
        (None, Some(manifest)) => {
            let field = args.field.as_deref().unwrap_or(&config.gather.field);
            keys_from_manifest(manifest, field)?
        }
        (None, None) => Vec::new(),
    };

    let source = args
        .source
        .clone()
        .or_else(|| config.gather.source.clone())
        .context("no source directory: pass --source or set [gather] source")?;
    let output = args
        .output
        .clone()
        .or_else(|| config.gather.output.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(GatherRequest {
        keys,
        source,
        output,
    })
}

pub fn run_gather(args: &GatherArgs, config: &ToolConfig) -> Result<()> {
    let request = build_request(args, config)?;
    debug!("gather"; "{} key(s) from {}", request.keys.len(), request.source.display());

    let progress = ProgressLine::new("gather", &[("copied", request.keys.len())]);
    let report = gather(&request, Some(&progress));
    progress.finish();
    let report = report?;

    log!("gather"; "copied {} file{} -> {}",
        report.copied,
        if report.copied == 1 { "" } else { "s" },
        request.output.display());

    if !report.missing.is_empty() {
        for missing in &report.missing {
            log!("missing"; "{}  {}", missing.key, missing.expected);
        }
        log!("missing"; "{} key{} without a file",
            report.missing.len(),
            if report.missing.len() == 1 { "" } else { "s" });
    }

    Ok(())
}
