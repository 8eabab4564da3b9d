use super::entities::{StudentSummary, TeacherAssignment};
use super::taxonomy::{GradeLevel, Section, Stream, Subject};
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct StudentListResponse {
    pub items: Vec<StudentSummary>,
    pub pagination: PaginationInfo,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct TeacherAssignmentListResponse {
    pub items: Vec<TeacherAssignment>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct CurriculumEntry {
    pub grade_level: GradeLevel,
    pub stream: Option<Stream>,
    pub subjects: Vec<Subject>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/academics.ts")]
pub struct TaxonomyResponse {
    pub grade_levels: Vec<GradeLevel>,
    pub sections: Vec<Section>,
    pub streams: Vec<Stream>,
    pub subjects: Vec<Subject>,
    pub curriculum: Vec<CurriculumEntry>,
}

impl TaxonomyResponse {
    pub fn build() -> Self {
        let mut curriculum = Vec::new();
        for grade_level in GradeLevel::all() {
            if grade_level.has_streams() {
                for stream in [Stream::Natural, Stream::Social] {
                    curriculum.push(CurriculumEntry {
                        grade_level,
                        stream: Some(stream),
                        subjects: Subject::curriculum(grade_level, Some(stream)).to_vec(),
                    });
                }
            } else {
                curriculum.push(CurriculumEntry {
                    grade_level,
                    stream: None,
                    subjects: Subject::curriculum(grade_level, None).to_vec(),
                });
            }
        }

        Self {
            grade_levels: GradeLevel::all().collect(),
            sections: Section::ALL
                .iter()
                .filter_map(|s| Section::try_from(*s).ok())
                .collect(),
            streams: vec![Stream::Natural, Stream::Social],
            subjects: Subject::ALL.to_vec(),
            curriculum,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxonomy_covers_every_grade_and_stream() {
        let taxonomy = TaxonomyResponse::build();
        assert_eq!(taxonomy.grade_levels.len(), 4);
        assert_eq!(taxonomy.sections.len(), 6);
        // 9, 10, then two streams each for 11 and 12
        assert_eq!(taxonomy.curriculum.len(), 6);
        assert!(
            taxonomy
                .curriculum
                .iter()
                .all(|entry| !entry.subjects.is_empty())
        );
    }
}
