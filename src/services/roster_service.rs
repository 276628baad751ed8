use std::sync::Arc;

use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::house::Department;
use crate::models::ledger::SystemState;
use crate::services::state_store::StateStore;

/// Bulk name import: a delimited text upload fully replaces a department's
/// known-student list.
pub struct RosterService {
    store: Arc<StateStore>,
}

impl RosterService {
    pub fn new(store: Arc<StateStore>) -> Self {
        Self { store }
    }

    /// Parses the upload and overwrites `studentNames[department]` with the
    /// result. This is a replace, not a merge.
    pub fn replace_from_csv(
        &self,
        department: Department,
        csv_text: &str,
    ) -> AppResult<SystemState> {
        let names = parse_roster(csv_text)?;
        let count = names.len();

        let (state, _) = self.store.update(|state| {
            state.student_names.insert(department, names);
        })?;

        info!(
            target: "app::roster",
            department = %department,
            count,
            "student roster replaced"
        );

        Ok(state)
    }
}

/// First field of each record, trimmed. Header rows (a first field reading
/// `name` in any casing) and blank entries are discarded.
pub fn parse_roster(text: &str) -> AppResult<Vec<String>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut names = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|err| AppError::validation(format!("invalid roster upload: {err}")))?;
        let Some(first) = record.get(0) else {
            continue;
        };
        let name = first.trim();
        if name.is_empty() || name.eq_ignore_ascii_case("name") {
            continue;
        }
        names.push(name.to_string());
    }

    Ok(names)
}
