use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::Context;
use svelte_ts_setup::{
    convert_template, ConvertOptions, ConvertPlan, DiagnosticLevel,
};

fn main() {
    if let Err(err) = run() {
        eprintln!("[svelte-ts-setup] {:#}", err);
        process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let (plan, opts) = parse_args()?;

    let project_dir = plan.project_dir.display().to_string();
    let report = convert_template(plan, opts)
        .with_context(|| format!("conversion of '{}' failed", project_dir))?;

    for diagnostic in &report.diagnostics {
        if diagnostic.level == DiagnosticLevel::Warning {
            eprintln!("[svelte-ts-setup] warning: {}", diagnostic.message);
            if let Some(context) = &diagnostic.context {
                eprintln!("[svelte-ts-setup]   {}", context);
            }
        }
    }

    println!("Converted to TypeScript.");
    if report.reinstall_required {
        println!("\nYou will need to re-run your dependency manager to get started.");
    }
    Ok(())
}

fn parse_args() -> anyhow::Result<(ConvertPlan, ConvertOptions)> {
    let mut project_dir: Option<PathBuf> = None;
    let mut opts = ConvertOptions::default();
    let mut args = env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--strict" => {
                opts.strict = true;
            }
            "--remove-setup-script" => {
                let value = args
                    .next()
                    .context("missing value for --remove-setup-script")?;
                opts.cleanup = Some(PathBuf::from(value));
            }
            other if other.starts_with('-') => {
                anyhow::bail!(
                    "unknown argument '{other}'. usage: svelte-ts-setup [--strict] [--remove-setup-script <path>] <project-dir>"
                );
            }
            _ => {
                if project_dir.is_some() {
                    anyhow::bail!("unexpected extra argument '{arg}'; only one project directory is accepted");
                }
                project_dir = Some(PathBuf::from(arg.as_str()));
            }
        }
    }

    let project_dir = project_dir
        .context("required argument missing: <project-dir>. usage: svelte-ts-setup [--strict] [--remove-setup-script <path>] <project-dir>")?;

    Ok((ConvertPlan { project_dir }, opts))
}
