use crate::model::{ScanOutcome, ScanReport};
use crate::report::group_by_pattern;
use anyhow::Result;
use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
struct LockRow {
    #[tabled(rename = "Package")]
    package: String,
    #[tabled(rename = "Version")]
    version: String,
    #[tabled(rename = "Section")]
    section: String,
}

#[derive(Tabled)]
struct TextRow {
    #[tabled(rename = "File")]
    file: String,
    #[tabled(rename = "Line")]
    line: u64,
    #[tabled(rename = "Content")]
    content: String,
}

pub fn print_cli_report(report: &ScanReport) -> Result<()> {
    println!();
    println!(
        "Scanned {} ({} mode, {} patterns) at {}",
        report.root.display(),
        report.mode,
        report.pattern_count,
        report.scan_time.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    if report.outcome.is_empty() {
        println!("No matches found. Your project appears clean.");
        return Ok(());
    }

    println!("Found {} match(es):", report.outcome.len());

    match &report.outcome {
        ScanOutcome::Shallow(matches) => {
            for group in group_by_pattern(matches) {
                println!();
                println!("Package: {}", group.pattern);

                let rows: Vec<LockRow> = group
                    .records
                    .iter()
                    .map(|m| LockRow {
                        package: m.package.clone(),
                        version: m.version.clone(),
                        section: m.section.clone(),
                    })
                    .collect();

                let table = Table::new(rows).with(Style::rounded()).to_string();
                println!("{}", table);
            }
        }
        ScanOutcome::Exhaustive(matches) => {
            for group in group_by_pattern(matches) {
                println!();
                println!("Package: {}", group.pattern);

                let rows: Vec<TextRow> = group
                    .records
                    .iter()
                    .map(|m| TextRow {
                        file: m.file.display().to_string(),
                        line: m.line,
                        content: truncate(&m.content, 70),
                    })
                    .collect();

                let table = Table::new(rows).with(Style::rounded()).to_string();
                println!("{}", table);
            }
        }
    }

    Ok(())
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
