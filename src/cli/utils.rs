use configure_project::SubstitutionReport;

/// One-line summary of a substitution pass for the diagnostics log
pub fn summarize(report: &SubstitutionReport) -> String {
    let counted = |count: usize, noun: &str| match count {
        1 => format!("1 {noun}"),
        _ => format!("{count} {noun}s"),
    };

    let mut summary = format!(
        "Scanned {}, rewrote {} ({} replaced)",
        counted(report.files_scanned, "file"),
        report.files_rewritten,
        counted(report.replacements, "placeholder"),
    );
    if !report.skipped_non_utf8.is_empty() {
        summary.push_str(&format!(
            ", skipped {}",
            counted(report.skipped_non_utf8.len(), "non-UTF-8 file")
        ));
    }

    let millis = report.elapsed.as_millis();
    if millis < 1000 {
        summary.push_str(&format!(" in {millis}ms"));
    } else {
        summary.push_str(&format!(" in {:.2}s", report.elapsed.as_secs_f64()));
    }
    summary
}
