//! School taxonomy: grade levels, sections, streams, subjects and FAV IDs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

pub const MIN_GRADE: i32 = 9;
pub const MAX_GRADE: i32 = 12;
/// Grades from this level upward are split into streams
pub const STREAM_FROM_GRADE: i32 = 11;

/// Secondary school grade level (9-12)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "i32", into = "i32")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct GradeLevel(i32);

impl GradeLevel {
    pub fn value(self) -> i32 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = GradeLevel> {
        (MIN_GRADE..=MAX_GRADE).map(GradeLevel)
    }

    pub fn has_streams(self) -> bool {
        self.0 >= STREAM_FROM_GRADE
    }
}

impl TryFrom<i32> for GradeLevel {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        if (MIN_GRADE..=MAX_GRADE).contains(&value) {
            Ok(GradeLevel(value))
        } else {
            Err(format!(
                "Invalid grade level: {value}. Supported grades: {MIN_GRADE}-{MAX_GRADE}"
            ))
        }
    }
}

impl Default for GradeLevel {
    fn default() -> Self {
        GradeLevel(MIN_GRADE)
    }
}

impl From<GradeLevel> for i32 {
    fn from(value: GradeLevel) -> Self {
        value.0
    }
}

impl fmt::Display for GradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Class section, a single letter A-F
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct Section(String);

impl Section {
    pub const ALL: [&'static str; 6] = ["A", "B", "C", "D", "E", "F"];

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Section {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_uppercase();
        if Self::ALL.contains(&normalized.as_str()) {
            Ok(Section(normalized))
        } else {
            Err(format!("Invalid section: '{value}'. Supported sections: A-F"))
        }
    }
}

impl TryFrom<&str> for Section {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Section::try_from(value.to_string())
    }
}

impl Default for Section {
    fn default() -> Self {
        Section(Self::ALL[0].to_string())
    }
}

impl From<Section> for String {
    fn from(value: Section) -> Self {
        value.0
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Grade 11-12 specialization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub enum Stream {
    Natural,
    Social,
}

impl fmt::Display for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stream::Natural => f.write_str("natural"),
            Stream::Social => f.write_str("social"),
        }
    }
}

impl std::str::FromStr for Stream {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "natural" => Ok(Stream::Natural),
            "social" => Ok(Stream::Social),
            _ => Err(format!("Invalid stream: {s}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub enum Subject {
    Amharic,
    English,
    Mathematics,
    Physics,
    Chemistry,
    Biology,
    Geography,
    History,
    Civics,
    Ict,
    Hpe,
    Economics,
    TechnicalDrawing,
    GeneralBusiness,
}

const LOWER_SECONDARY: &[Subject] = &[
    Subject::Amharic,
    Subject::English,
    Subject::Mathematics,
    Subject::Physics,
    Subject::Chemistry,
    Subject::Biology,
    Subject::Geography,
    Subject::History,
    Subject::Civics,
    Subject::Ict,
    Subject::Hpe,
];

const NATURAL_STREAM: &[Subject] = &[
    Subject::Amharic,
    Subject::English,
    Subject::Mathematics,
    Subject::Physics,
    Subject::Chemistry,
    Subject::Biology,
    Subject::Civics,
    Subject::Ict,
    Subject::Hpe,
    Subject::TechnicalDrawing,
];

const SOCIAL_STREAM: &[Subject] = &[
    Subject::Amharic,
    Subject::English,
    Subject::Mathematics,
    Subject::Geography,
    Subject::History,
    Subject::Civics,
    Subject::Ict,
    Subject::Hpe,
    Subject::Economics,
    Subject::GeneralBusiness,
];

impl Subject {
    pub const ALL: [Subject; 14] = [
        Subject::Amharic,
        Subject::English,
        Subject::Mathematics,
        Subject::Physics,
        Subject::Chemistry,
        Subject::Biology,
        Subject::Geography,
        Subject::History,
        Subject::Civics,
        Subject::Ict,
        Subject::Hpe,
        Subject::Economics,
        Subject::TechnicalDrawing,
        Subject::GeneralBusiness,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Subject::Amharic => "amharic",
            Subject::English => "english",
            Subject::Mathematics => "mathematics",
            Subject::Physics => "physics",
            Subject::Chemistry => "chemistry",
            Subject::Biology => "biology",
            Subject::Geography => "geography",
            Subject::History => "history",
            Subject::Civics => "civics",
            Subject::Ict => "ict",
            Subject::Hpe => "hpe",
            Subject::Economics => "economics",
            Subject::TechnicalDrawing => "technical_drawing",
            Subject::GeneralBusiness => "general_business",
        }
    }

    /// Curriculum for a grade; grades 11-12 require a stream
    pub fn curriculum(grade: GradeLevel, stream: Option<Stream>) -> &'static [Subject] {
        if !grade.has_streams() {
            return LOWER_SECONDARY;
        }
        match stream {
            Some(Stream::Natural) => NATURAL_STREAM,
            Some(Stream::Social) => SOCIAL_STREAM,
            None => &[],
        }
    }

    /// Whether the subject is taught in the grade under any stream
    pub fn is_taught_in(self, grade: GradeLevel) -> bool {
        if grade.has_streams() {
            NATURAL_STREAM.contains(&self) || SOCIAL_STREAM.contains(&self)
        } else {
            LOWER_SECONDARY.contains(&self)
        }
    }

    /// Whether a student with the given placement takes the subject
    pub fn is_taken_by(self, grade: GradeLevel, stream: Option<Stream>) -> bool {
        if grade.has_streams() && stream.is_none() {
            return self.is_taught_in(grade);
        }
        Self::curriculum(grade, stream).contains(&self)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Subject {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subject::ALL
            .iter()
            .copied()
            .find(|subject| subject.as_str() == s)
            .ok_or_else(|| format!("Invalid subject: {s}"))
    }
}

/// Validates a student placement (grade, section, stream)
pub fn validate_placement(grade: GradeLevel, stream: Option<Stream>) -> Result<(), String> {
    match (grade.has_streams(), stream) {
        (true, None) => Err(format!("Grade {grade} requires a stream (natural or social)")),
        (false, Some(_)) => Err(format!("Grade {grade} does not have streams")),
        _ => Ok(()),
    }
}

static FAV_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^FAV-(\d{4})-(\d{4})$").expect("Invalid FAV ID regex"));

/// Student identifier, `FAV-YYYY-NNNN`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "String", into = "String")]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct FavId(String);

impl FavId {
    pub const MAX_SEQUENCE: u32 = 9999;

    pub fn new(year: i32, sequence: u32) -> Result<Self, String> {
        if !(1000..=9999).contains(&year) {
            return Err(format!("Invalid enrolment year: {year}"));
        }
        if sequence == 0 || sequence > Self::MAX_SEQUENCE {
            return Err(format!("FAV ID sequence out of range: {sequence}"));
        }
        Ok(FavId(format!("FAV-{year:04}-{sequence:04}")))
    }

    /// Parses case-insensitively, normalizing to upper case
    pub fn parse(value: &str) -> Result<Self, String> {
        let normalized = value.trim().to_ascii_uppercase();
        if FAV_ID_RE.is_match(&normalized) {
            Ok(FavId(normalized))
        } else {
            Err(format!("Invalid FAV ID: '{value}'. Expected format FAV-YYYY-NNNN"))
        }
    }

    /// Wraps a value read back from the students table
    pub fn from_stored(value: String) -> Self {
        FavId(value)
    }

    /// Prefix shared by every ID issued in a year
    pub fn year_prefix(year: i32) -> String {
        format!("FAV-{year:04}-")
    }

    pub fn sequence(&self) -> u32 {
        FAV_ID_RE
            .captures(&self.0)
            .and_then(|c| c.get(2))
            .and_then(|m| m.as_str().parse().ok())
            .unwrap_or(0)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for FavId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        FavId::parse(&value)
    }
}

impl From<FavId> for String {
    fn from(value: FavId) -> Self {
        value.0
    }
}

impl fmt::Display for FavId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grade(v: i32) -> GradeLevel {
        GradeLevel::try_from(v).unwrap()
    }

    #[test]
    fn test_grade_bounds() {
        assert!(GradeLevel::try_from(8).is_err());
        assert!(GradeLevel::try_from(13).is_err());
        assert_eq!(GradeLevel::all().count(), 4);
        assert!(!grade(10).has_streams());
        assert!(grade(11).has_streams());
    }

    #[test]
    fn test_grade_deserialize_rejects_out_of_range() {
        assert!(serde_json::from_str::<GradeLevel>("12").is_ok());
        assert!(serde_json::from_str::<GradeLevel>("7").is_err());
    }

    #[test]
    fn test_section_normalizes_case() {
        assert_eq!(Section::try_from("b").unwrap().as_str(), "B");
        assert!(Section::try_from("G").is_err());
        assert!(Section::try_from("AB").is_err());
    }

    #[test]
    fn test_curriculum_by_stream() {
        assert!(Subject::Physics.is_taken_by(grade(9), None));
        assert!(!Subject::Economics.is_taken_by(grade(9), None));
        assert!(Subject::Physics.is_taken_by(grade(11), Some(Stream::Natural)));
        assert!(!Subject::Physics.is_taken_by(grade(11), Some(Stream::Social)));
        assert!(Subject::Economics.is_taken_by(grade(12), Some(Stream::Social)));
        assert!(Subject::TechnicalDrawing.is_taught_in(grade(12)));
        assert!(!Subject::TechnicalDrawing.is_taught_in(grade(10)));
    }

    #[test]
    fn test_subject_round_trip_names() {
        for subject in Subject::ALL {
            assert_eq!(subject.as_str().parse::<Subject>().unwrap(), subject);
        }
        assert!("astrology".parse::<Subject>().is_err());
    }

    #[test]
    fn test_placement_requires_stream_only_for_upper_grades() {
        assert!(validate_placement(grade(9), None).is_ok());
        assert!(validate_placement(grade(9), Some(Stream::Natural)).is_err());
        assert!(validate_placement(grade(11), None).is_err());
        assert!(validate_placement(grade(12), Some(Stream::Social)).is_ok());
    }

    #[test]
    fn test_fav_id_format() {
        let id = FavId::new(2026, 42).unwrap();
        assert_eq!(id.as_str(), "FAV-2026-0042");
        assert_eq!(id.sequence(), 42);
        assert!(id.as_str().starts_with(&FavId::year_prefix(2026)));
        assert!(FavId::new(2026, 0).is_err());
        assert!(FavId::new(2026, 10_000).is_err());
    }

    #[test]
    fn test_fav_id_parse() {
        assert_eq!(FavId::parse(" fav-2025-0001 ").unwrap().as_str(), "FAV-2025-0001");
        assert!(FavId::parse("FAV-25-0001").is_err());
        assert!(FavId::parse("student@falcon.et").is_err());
    }
}
