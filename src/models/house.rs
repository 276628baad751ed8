use serde::{Deserialize, Serialize};
use std::fmt;

/// The four competing student houses. Declaration order is the canonical
/// stable-sort order for tie-breaking in every leaderboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum House {
    Bosco,
    Savio,
    Ruva,
    Thomas,
}

impl House {
    pub const ALL: [House; 4] = [House::Bosco, House::Savio, House::Ruva, House::Thomas];

    pub fn as_str(&self) -> &'static str {
        match self {
            House::Bosco => "Bosco",
            House::Savio => "Savio",
            House::Ruva => "Ruva",
            House::Thomas => "Thomas",
        }
    }
}

impl fmt::Display for House {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for House {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Bosco" => Ok(House::Bosco),
            "Savio" => Ok(House::Savio),
            "Ruva" => Ok(House::Ruva),
            "Thomas" => Ok(House::Thomas),
            other => Err(format!("unsupported house: {other}")),
        }
    }
}

/// Teaching departments plus the privileged Admin role. The serialized form
/// keeps the full display names the persisted document has always used.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Department {
    #[serde(rename = "Basic Science and Humanities")]
    Basic,
    #[serde(rename = "Mechanical Engineering")]
    Mech,
    #[serde(rename = "Electrical and Electronics Engineering")]
    Eee,
    #[serde(rename = "Civil Engineering")]
    Civil,
    #[serde(rename = "Computer Science Engineering")]
    Cse,
    #[serde(rename = "Electronics and Communication Engineering")]
    Ece,
    #[serde(rename = "Admin")]
    Admin,
}

impl Department {
    pub const ALL: [Department; 7] = [
        Department::Basic,
        Department::Mech,
        Department::Eee,
        Department::Civil,
        Department::Cse,
        Department::Ece,
        Department::Admin,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Basic => "Basic Science and Humanities",
            Department::Mech => "Mechanical Engineering",
            Department::Eee => "Electrical and Electronics Engineering",
            Department::Civil => "Civil Engineering",
            Department::Cse => "Computer Science Engineering",
            Department::Ece => "Electronics and Communication Engineering",
            Department::Admin => "Admin",
        }
    }

    /// Departments that actually teach, i.e. everything except Admin.
    pub fn teaching() -> impl Iterator<Item = Department> {
        Department::ALL
            .into_iter()
            .filter(|dept| *dept != Department::Admin)
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Department {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Basic Science and Humanities" => Ok(Department::Basic),
            "Mechanical Engineering" => Ok(Department::Mech),
            "Electrical and Electronics Engineering" => Ok(Department::Eee),
            "Civil Engineering" => Ok(Department::Civil),
            "Computer Science Engineering" => Ok(Department::Cse),
            "Electronics and Communication Engineering" => Ok(Department::Ece),
            "Admin" => Ok(Department::Admin),
            other => Err(format!("unsupported department: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum AcademicYear {
    #[serde(rename = "First Year")]
    First,
    #[serde(rename = "Second Year")]
    Second,
    #[serde(rename = "Third Year")]
    Third,
}

impl AcademicYear {
    pub fn as_str(&self) -> &'static str {
        match self {
            AcademicYear::First => "First Year",
            AcademicYear::Second => "Second Year",
            AcademicYear::Third => "Third Year",
        }
    }
}

impl fmt::Display for AcademicYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for AcademicYear {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "First Year" => Ok(AcademicYear::First),
            "Second Year" => Ok(AcademicYear::Second),
            "Third Year" => Ok(AcademicYear::Third),
            other => Err(format!("unsupported academic year: {other}")),
        }
    }
}

/// Point categories. The fixed tags cover the standard award reasons; any
/// other label submitted by a teacher is carried through verbatim as Custom.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    Attendance,
    CatExam,
    ExtraActivities,
    Discipline,
    CollegeEvents,
    Custom(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Attendance => "Attendance",
            Category::CatExam => "CAT Exam",
            Category::ExtraActivities => "Extra Activities",
            Category::Discipline => "Discipline",
            Category::CollegeEvents => "College Events",
            Category::Custom(label) => label,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        match value {
            "Attendance" => Category::Attendance,
            "CAT Exam" => Category::CatExam,
            "Extra Activities" => Category::ExtraActivities,
            "Discipline" => Category::Discipline,
            "College Events" => Category::CollegeEvents,
            other => Category::Custom(other.to_string()),
        }
    }
}

impl Serialize for Category {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Category::from(value.as_str()))
    }
}
