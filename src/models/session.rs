use serde::{Deserialize, Serialize};

use crate::models::house::{AcademicYear, Department};

/// A resolved login. Teachers carry the academic year they submit entries
/// for; the admin role has no year.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub department: Department,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub year: Option<AcademicYear>,
}

impl Session {
    pub fn is_admin(&self) -> bool {
        self.department == Department::Admin
    }
}
