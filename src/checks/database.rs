use crate::catalog::{CatalogConnection, CatalogConnector, CatalogError, ConnectionTarget};
use crate::checks::{CheckOutcome, CheckResult, Note};
use crate::environment::Environment;

pub const DATABASE_URL_VAR: &str = "DATABASE_URL";

/// What the check expects to find when nothing else is configured.
pub const DEFAULT_TABLE: &str = "api_keys";

/// Check that `DATABASE_URL` points at a reachable database containing `table`.
///
/// `connector` is `None` when this build has no database client, which makes the result
/// [`CheckResult::Skip`]. That's decided before looking at `DATABASE_URL` at all, since
/// without a client there's nothing we could do with it.
///
/// If a connection was opened, it is closed again before returning, whatever the result.
pub async fn check_database(
    env: &Environment,
    connector: Option<&dyn CatalogConnector>,
    table: &str,
) -> CheckOutcome {
    let mut notes = vec![Note::Info("Testing database connection...".into())];

    let connector = match connector {
        Some(connector) => connector,
        None => {
            notes.push(Note::Warning(
                "no database client in this build - skipping database connection test".into(),
            ));
            notes.push(Note::Detail(
                "Rebuild from source with: cargo install --path . --features postgres".into(),
            ));

            return CheckOutcome {
                result: CheckResult::Skip,
                notes,
            };
        }
    };

    let database_url = match env.get(DATABASE_URL_VAR) {
        Some(url) if !url.is_empty() => url,
        _ => return CheckOutcome::fail(notes, format!("{} not set", DATABASE_URL_VAR)),
    };

    notes.push(Note::Success(format!("{} is set", DATABASE_URL_VAR)));

    let target = match ConnectionTarget::parse(database_url) {
        Ok(target) => target,
        Err(e) => return CheckOutcome::fail(notes, format!("Database connection failed: {}", e)),
    };

    let mut conn = match connector.connect(&target).await {
        Ok(conn) => conn,
        Err(e) => return CheckOutcome::fail(notes, format!("Database connection failed: {}", e)),
    };

    let inspected = inspect_table(&mut *conn, table, &mut notes).await;

    // Closing is best-effort; a failure here doesn't change what we found.
    if let Err(e) = conn.close().await {
        log::warn!("failed to close database connection: {}", e);
    }

    match inspected {
        Ok(true) => CheckOutcome {
            result: CheckResult::Pass,
            notes,
        },
        Ok(false) => CheckOutcome {
            result: CheckResult::Fail,
            notes,
        },
        Err(e) => CheckOutcome::fail(notes, format!("Database connection failed: {}", e)),
    }
}

/// Returns `Ok(false)` if the table is missing. Either way the outcome is already in `notes`.
async fn inspect_table(
    conn: &mut dyn CatalogConnection,
    table: &str,
    notes: &mut Vec<Note>,
) -> Result<bool, CatalogError> {
    if !conn.table_exists(table).await? {
        log::debug!("table {:?} not found in information_schema.tables", table);
        notes.push(Note::Failure(format!(
            "{} table does not exist - run migrations!",
            table
        )));
        return Ok(false);
    }

    notes.push(Note::Success(format!("{} table exists", table)));

    let columns = conn.columns(table).await?;

    notes.push(Note::Detail(format!("Table has {} columns:", columns.len())));
    notes.extend(
        columns
            .iter()
            .map(|column| Note::Detail(format!("- {}: {}", column.name, column.data_type))),
    );

    Ok(true)
}
