use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use crate::catalog::Catalog;
use crate::cli::args::{Cli, Commands};
use crate::cli::completions;
use crate::error::{Error, Result};
use crate::logging::{audit_event_fields, AuditFields};
use crate::osinfo::OsInfo;
use crate::precheck::{self, Report};

/// Main CLI handler; writes command output to stdout.
pub fn handle_cli(cli: Cli) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    handle_cli_to(cli, &mut out)
}

/// Same as [`handle_cli`] with an explicit output sink.
pub fn handle_cli_to(cli: Cli, out: &mut dyn Write) -> Result<()> {
    let _cli_span = tracing::info_span!("cli", command = ?cli.command, json = cli.json).entered();

    match cli.command {
        Commands::Check {
            ref root,
            ref short_name,
            ref os_version,
            ref arch,
            strict,
        } => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            let os_info = OsInfo::detect(root)?.with_overrides(
                short_name.as_deref(),
                os_version.as_deref(),
                arch.as_deref(),
            );
            let _ = audit_event_fields(
                "cli",
                "os_detected",
                "observed",
                &AuditFields {
                    short_name: Some(os_info.short_name.clone()),
                    version: Some(os_info.version.clone()),
                    architecture: Some(os_info.architecture.clone()),
                    ..Default::default()
                },
            );
            let checks = precheck::all_checks(os_info, Arc::new(catalog));
            let reports = precheck::run_all(&checks)?;
            print_reports(&reports, cli.json, out)?;
            precheck::verdict(&reports, strict)
        }
        Commands::ListSupported => {
            let catalog = load_catalog(cli.catalog.as_deref())?;
            if cli.json {
                let ids: Vec<&str> = catalog.iter().collect();
                let body = serde_json::to_string(&ids).map_err(|e| Error::Other(e.to_string()))?;
                writeln!(out, "{}", body)?;
            } else {
                for id in catalog.iter() {
                    writeln!(out, "{}", id)?;
                }
            }
            Ok(())
        }
        Commands::Completions { shell } => {
            completions::emit(shell, out);
            Ok(())
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(p) => Catalog::from_json_file(p),
        None => Ok(Catalog::builtin()),
    }
}

fn print_reports(reports: &[Report], json: bool, out: &mut dyn Write) -> Result<()> {
    if json {
        let body = serde_json::to_string_pretty(reports).map_err(|e| Error::Other(e.to_string()))?;
        writeln!(out, "{}", body)?;
    } else {
        for r in reports {
            write!(out, "{}", r)?;
        }
    }
    Ok(())
}
