use std::{env, path::PathBuf};

use chrono::Local;

use crate::{
    cli::{
        core::{CommandError, CommandResult, ShellContext},
        io,
        registry::CommandEntry,
    },
    report::{CsvRenderer, PdfRenderer, ReportExporter, ReportRenderer},
};

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "export",
        "Export the active context as a PDF or CSV report",
        "export <pdf|csv> [DIR]",
        cmd_export,
    )]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (format, dir) = match args {
        [format] => (*format, None),
        [format, dir] => (*format, Some(PathBuf::from(dir))),
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: export <pdf|csv> [DIR]".into(),
            ))
        }
    };
    let renderer: Box<dyn ReportRenderer> = match format.to_ascii_lowercase().as_str() {
        "pdf" => Box::new(PdfRenderer::new(context.config.report.table_layout)),
        "csv" => Box::new(CsvRenderer),
        other => {
            return Err(CommandError::InvalidArguments(format!(
                "unknown report format `{}` (pdf or csv)",
                other
            )))
        }
    };
    let dir = match dir.or_else(|| context.config.report.export_dir.clone()) {
        Some(dir) => dir,
        None => env::current_dir()?,
    };

    let path = ReportExporter::new(context.config.currency.clone()).export(
        renderer.as_ref(),
        context.store.transactions(),
        context.active_context(),
        Local::now().date_naive(),
        &dir,
    )?;
    io::print_success(format!("Report saved to {}", path.display()));
    if !renderer.supports_tables() {
        io::print_hint("Table layout is disabled (report.tables = false); the report holds totals only.");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::cli::core::script_context;

    #[test]
    fn export_writes_into_requested_directory() {
        let (mut context, temp) = script_context();
        context.process_line("add income 1000").unwrap();
        let out = temp.path().join("reports");
        context
            .process_line(&format!("export csv \"{}\"", out.display()))
            .unwrap();
        context
            .process_line(&format!("export pdf \"{}\"", out.display()))
            .unwrap();
        assert!(out.join("Home_Expenses_Report.csv").exists());
        assert!(out.join("Home_Expenses_Report.pdf").exists());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let (mut context, _temp) = script_context();
        assert!(context.process_line("export docx").is_err());
    }
}
