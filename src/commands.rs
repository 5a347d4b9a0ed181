use std::fs;

use anyhow::{bail, Context, Result};
use regex::Regex;

use splice::engine::{self, ApplyOptions};
use splice::error::EngineError;
use splice::inject::Anchor;
use splice::matcher::AnchorSpec;
use splice::pass::PatchPass;
use splice::recipes;
use splice::report::PatchReport;
use splice::Settings;

use crate::cli::{Command, CommonArgs};

pub fn execute_command(cmd: Command) -> Result<()> {
    match cmd {
        Command::FixImports { symbol, fallback_module, common } => {
            let settings = Settings::resolve(common.root.clone(), common.target.clone())?;
            let pass = recipes::fix_imports(settings.root.clone(), symbol, fallback_module)?;
            run(&settings, vec![pass], &common)
        }
        Command::InjectServices { marker, tag, entries, retire, common } => {
            if entries.is_empty() {
                bail!("inject-services needs at least one --entry");
            }
            let settings = Settings::resolve(common.root.clone(), common.target.clone())?;
            let retire = retire
                .as_deref()
                .map(Regex::new)
                .transpose()
                .context("invalid --retire pattern")?;
            let anchor = Anchor { tag, marker: AnchorSpec::Literal(marker), entries, retire };
            run(&settings, vec![recipes::inject_block(anchor)], &common)
        }
        Command::ReplaceFunction { header, replacement, optional, common } => {
            let settings = Settings::resolve(common.root.clone(), common.target.clone())?;
            let text = fs::read_to_string(&replacement)
                .with_context(|| format!("reading replacement `{}`", replacement.display()))?;
            let mut pass = recipes::replace_function(header, text);
            if optional {
                pass = pass.optional();
            }
            run(&settings, vec![pass], &common)
        }
        Command::StripBlock { line, pattern, header, common } => {
            let settings = Settings::resolve(common.root.clone(), common.target.clone())?;
            let spec = anchor_spec(line, pattern, header)?;
            run(&settings, vec![recipes::strip_block(spec)], &common)
        }
        Command::ReplaceLine { line, pattern, replacement, common } => {
            let settings = Settings::resolve(common.root.clone(), common.target.clone())?;
            let spec = anchor_spec(line, pattern, None)?;
            run(&settings, vec![recipes::replace_line(spec, replacement)], &common)
        }
    }
}

fn anchor_spec(
    line: Option<String>,
    pattern: Option<String>,
    header: Option<String>,
) -> Result<AnchorSpec> {
    match (line, pattern, header) {
        (Some(lit), None, None) => Ok(AnchorSpec::Literal(lit)),
        (None, Some(re), None) => Ok(AnchorSpec::Pattern(Regex::new(&re).context("invalid --pattern")?)),
        (None, None, Some(prefix)) => Ok(AnchorSpec::FnHeader(prefix)),
        _ => bail!("give exactly one of --line, --pattern, --header"),
    }
}

fn run(settings: &Settings, passes: Vec<PatchPass>, common: &CommonArgs) -> Result<()> {
    let options = ApplyOptions { dry_run: common.dry_run };
    let report = engine::apply(&settings.target, &passes, options)?;
    finish(report, common.report_json)
}

fn finish(report: PatchReport, as_json: bool) -> Result<()> {
    if as_json {
        println!("{}", report.to_json()?);
    } else {
        println!("{report}");
        if let Some(preview) = &report.preview {
            println!("--- dry-run preview of `{}` ---", report.target.display());
            print!("{preview}");
        }
    }
    if !report.success {
        // The aborting pass is the last failure recorded.
        let (pass, reason) = match report.failed_passes().last() {
            Some(failed) => (failed.name.clone(), failed.reason.clone().unwrap_or_default()),
            None => (String::from("unknown"), String::from("no failing pass recorded")),
        };
        return Err(EngineError::RequiredPassFailed { pass, reason }.into());
    }
    Ok(())
}
