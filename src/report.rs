use std::io::Write;

use crate::catalog::CatalogConnector;
use crate::checks::{check_database, check_encryption_key, CheckOutcome, CheckResult};
use crate::config::Config;
use crate::environment::{load_env_file, Environment};

pub const ENCRYPTION_KEY_LABEL: &str = "Encryption Key";
pub const DATABASE_LABEL: &str = "Database Connection";

const RULE_WIDTH: usize = 60;

/// The results that count towards the verdict, in the order the checks ran.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Summary {
    entries: Vec<(&'static str, CheckResult)>,
}

impl Summary {
    /// Record a result. Skipped checks are dropped here so they can't affect the verdict.
    pub fn record(&mut self, label: &'static str, result: CheckResult) {
        if result != CheckResult::Skip {
            self.entries.push((label, result));
        }
    }

    pub fn entries(&self) -> &[(&'static str, CheckResult)] {
        &self.entries
    }

    pub fn all_passed(&self) -> bool {
        self.entries
            .iter()
            .all(|(_, result)| *result == CheckResult::Pass)
    }

    pub fn exit_code(&self) -> u8 {
        if self.all_passed() {
            0
        } else {
            1
        }
    }
}

/// Load the env file named in `config` on top of `env`, run both checks and write the
/// report to `out`.
///
/// Check failures end up in the returned [`Summary`]; the only errors returned from here
/// are an unreadable env file and failing to write to `out`.
pub async fn run<W: Write>(
    config: &Config,
    mut env: Environment,
    connector: Option<&dyn CatalogConnector>,
    out: &mut W,
) -> anyhow::Result<Summary> {
    write_banner(out, "API Key Save Test")?;

    match load_env_file(&config.env_file)? {
        Some(entries) => {
            writeln!(out, "\nLoading environment from {}...", config.env_file.display())?;
            log::debug!("loaded {} entries from {:?}", entries.len(), config.env_file);
            env.overlay(entries);
        }
        None => writeln!(
            out,
            "\nNo env file at {}, using the process environment only.",
            config.env_file.display()
        )?,
    }

    let mut summary = Summary::default();

    let outcome = check_encryption_key(&env);
    write_notes(out, &outcome)?;
    summary.record(ENCRYPTION_KEY_LABEL, outcome.result);

    let outcome = check_database(&env, connector, &config.table).await;
    write_notes(out, &outcome)?;
    summary.record(DATABASE_LABEL, outcome.result);

    writeln!(out)?;
    write_banner(out, "Test Summary")?;

    for (label, result) in summary.entries() {
        let status = match result {
            CheckResult::Pass => "✅ PASS",
            _ => "❌ FAIL",
        };
        writeln!(out, "{}: {}", label, status)?;
    }

    if summary.all_passed() {
        writeln!(out, "\n✅ All tests passed!")?;
    } else {
        writeln!(out, "\n❌ Some tests failed. Check the output above.")?;
    }

    out.flush()?;

    Ok(summary)
}

fn write_banner<W: Write>(out: &mut W, title: &str) -> std::io::Result<()> {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(out, "{}\n{}\n{}", rule, title, rule)
}

fn write_notes<W: Write>(out: &mut W, outcome: &CheckOutcome) -> std::io::Result<()> {
    // Blank line between sections.
    writeln!(out)?;
    for note in &outcome.notes {
        writeln!(out, "{}", note)?;
    }
    Ok(())
}
