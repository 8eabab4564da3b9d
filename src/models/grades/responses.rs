use super::entities::GradeRecord;
use crate::models::academics::entities::StudentSummary;
use crate::models::academics::taxonomy::Subject;
use crate::utils::percent;
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<GradeRecord>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCardEntry {
    pub subject: Subject,
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct ReportCard {
    pub student: StudentSummary,
    pub term: i32,
    pub academic_year: i32,
    pub entries: Vec<ReportCardEntry>,
    /// Mean of the per-subject percentages
    pub average_percentage: f64,
}

impl ReportCard {
    pub fn build(
        student: StudentSummary,
        term: i32,
        academic_year: i32,
        records: Vec<GradeRecord>,
    ) -> Self {
        let entries: Vec<ReportCardEntry> = records
            .into_iter()
            .map(|record| ReportCardEntry {
                percentage: record.percentage(),
                subject: record.subject,
                score: record.score,
                max_score: record.max_score,
                remarks: record.remarks,
            })
            .collect();
        let average_percentage = percent::mean(entries.iter().map(|e| e.percentage));

        Self {
            student,
            term,
            academic_year,
            entries,
            average_percentage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::academics::taxonomy::{FavId, GradeLevel, Section};

    fn record(subject: Subject, score: f64, max_score: f64) -> GradeRecord {
        let now = chrono::Utc::now();
        GradeRecord {
            id: 1,
            student_id: 10,
            teacher_id: 20,
            subject,
            term: 1,
            academic_year: 2026,
            score,
            max_score,
            remarks: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn student() -> StudentSummary {
        StudentSummary {
            user_id: 10,
            fav_id: FavId::new(2026, 1).unwrap(),
            full_name: "Liya Bekele".into(),
            email: "liya@falcon.edu.et".into(),
            grade_level: GradeLevel::try_from(9).unwrap(),
            section: Section::try_from("A").unwrap(),
            stream: None,
        }
    }

    #[test]
    fn test_report_card_average() {
        let card = ReportCard::build(
            student(),
            1,
            2026,
            vec![
                record(Subject::Mathematics, 45.0, 50.0),
                record(Subject::English, 3.0, 4.0),
            ],
        );
        assert_eq!(card.entries.len(), 2);
        assert_eq!(card.entries[0].percentage, 90.0);
        assert_eq!(card.entries[1].percentage, 75.0);
        assert_eq!(card.average_percentage, 82.5);
    }

    #[test]
    fn test_empty_report_card() {
        let card = ReportCard::build(student(), 2, 2026, Vec::new());
        assert_eq!(card.average_percentage, 0.0);
    }
}
