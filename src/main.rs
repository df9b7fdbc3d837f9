use anyhow::Context;
use spoje_refresh_lib::run_default;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run_default().context("timetable refresh failed") {
        Ok(report) => {
            log::info!(
                "Refreshed {} archives ({} files)",
                report.extracted.len(),
                report
                    .extracted
                    .iter()
                    .map(|o| o.files_extracted)
                    .sum::<usize>()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
