//! Question validation and all-or-nothing answer scoring

use super::entities::{QuestionType, QuizAnswer, QuizQuestion};

/// Canonical form used when comparing answers
pub fn normalize_answer(question_type: QuestionType, answer: &str) -> String {
    match question_type {
        QuestionType::MultipleChoice | QuestionType::TrueFalse => answer.trim().to_lowercase(),
        QuestionType::ShortAnswer => answer
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase(),
    }
}

pub fn is_correct(question: &QuizQuestion, answer: &str) -> bool {
    normalize_answer(question.question_type, answer)
        == normalize_answer(question.question_type, &question.correct_answer)
}

/// Validates a question definition, returning the cleaned options and answer
pub fn validate_question(
    question_type: QuestionType,
    question_text: &str,
    options: Vec<String>,
    correct_answer: &str,
    points: i32,
) -> Result<(Vec<String>, String), String> {
    if question_text.trim().is_empty() {
        return Err("Question text must not be empty".into());
    }
    if points <= 0 {
        return Err("Points must be greater than 0".into());
    }
    let correct_answer = correct_answer.trim().to_string();

    match question_type {
        QuestionType::MultipleChoice => {
            let options: Vec<String> = options
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if options.len() < 2 {
                return Err("Multiple choice questions need at least 2 options".into());
            }
            let expected = normalize_answer(question_type, &correct_answer);
            if !options
                .iter()
                .any(|o| normalize_answer(question_type, o) == expected)
            {
                return Err("Correct answer must be one of the options".into());
            }
            Ok((options, correct_answer))
        }
        QuestionType::TrueFalse => {
            let normalized = normalize_answer(question_type, &correct_answer);
            if normalized != "true" && normalized != "false" {
                return Err("True/false answers must be 'true' or 'false'".into());
            }
            Ok((Vec::new(), normalized))
        }
        QuestionType::ShortAnswer => {
            if correct_answer.is_empty() {
                return Err("Short answer questions need a correct answer".into());
            }
            Ok((Vec::new(), correct_answer))
        }
    }
}

/// Score for one question after submission
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredAnswer {
    pub question_id: i64,
    pub answer_id: Option<i64>,
    pub is_correct: bool,
    pub points_awarded: i32,
}

/// Scores every question; unanswered questions earn nothing
pub fn score_answers(questions: &[QuizQuestion], answers: &[QuizAnswer]) -> Vec<ScoredAnswer> {
    questions
        .iter()
        .map(|question| {
            let answer = answers.iter().find(|a| a.question_id == question.id);
            let correct = answer.is_some_and(|a| is_correct(question, &a.answer));
            ScoredAnswer {
                question_id: question.id,
                answer_id: answer.map(|a| a.id),
                is_correct: correct,
                points_awarded: if correct { question.points } else { 0 },
            }
        })
        .collect()
}

pub fn total_points(questions: &[QuizQuestion]) -> i32 {
    questions.iter().map(|q| q.points).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: i64, question_type: QuestionType, correct: &str, points: i32) -> QuizQuestion {
        QuizQuestion {
            id,
            quiz_id: 1,
            question_text: format!("Question {id}"),
            question_type,
            options: Vec::new(),
            correct_answer: correct.into(),
            points,
            position: id as i32,
        }
    }

    fn answer(id: i64, question_id: i64, text: &str) -> QuizAnswer {
        QuizAnswer {
            id,
            attempt_id: 1,
            question_id,
            answer: text.into(),
            is_correct: None,
            points_awarded: None,
        }
    }

    #[test]
    fn test_comparison_rules() {
        let mc = question(1, QuestionType::MultipleChoice, "Mitochondria", 1);
        assert!(is_correct(&mc, "  mitochondria "));
        let short = question(2, QuestionType::ShortAnswer, "Addis Ababa", 1);
        assert!(is_correct(&short, "addis   ababa"));
        assert!(!is_correct(&short, "addisababa"));
        let tf = question(3, QuestionType::TrueFalse, "true", 1);
        assert!(is_correct(&tf, "TRUE"));
        assert!(!is_correct(&tf, "false"));
    }

    #[test]
    fn test_scoring_is_all_or_nothing() {
        let questions = vec![
            question(1, QuestionType::TrueFalse, "false", 2),
            question(2, QuestionType::ShortAnswer, "photosynthesis", 3),
            question(3, QuestionType::TrueFalse, "true", 5),
        ];
        let answers = vec![answer(10, 1, "False"), answer(11, 2, "photo synthesis")];
        let scored = score_answers(&questions, &answers);

        assert_eq!(scored.len(), 3);
        assert_eq!(scored[0].points_awarded, 2);
        assert_eq!(scored[1].points_awarded, 0);
        assert!(!scored[2].is_correct);
        assert_eq!(scored[2].answer_id, None);
        assert_eq!(scored.iter().map(|s| s.points_awarded).sum::<i32>(), 2);
        assert_eq!(total_points(&questions), 10);
    }

    #[test]
    fn test_multiple_choice_validation() {
        assert!(
            validate_question(
                QuestionType::MultipleChoice,
                "Pick one",
                vec!["A".into()],
                "A",
                1
            )
            .is_err()
        );
        assert!(
            validate_question(
                QuestionType::MultipleChoice,
                "Pick one",
                vec!["A".into(), "B".into()],
                "C",
                1
            )
            .is_err()
        );
        let (options, correct) = validate_question(
            QuestionType::MultipleChoice,
            "Pick one",
            vec![" A ".into(), "".into(), "B".into()],
            " b ",
            1,
        )
        .unwrap();
        assert_eq!(options, vec!["A".to_string(), "B".to_string()]);
        assert_eq!(correct, "b");
    }

    #[test]
    fn test_true_false_validation_normalizes() {
        let (options, correct) =
            validate_question(QuestionType::TrueFalse, "Water boils at 100C", vec!["x".into()], "True", 1)
                .unwrap();
        assert!(options.is_empty());
        assert_eq!(correct, "true");
        assert!(validate_question(QuestionType::TrueFalse, "Q", vec![], "yes", 1).is_err());
        assert!(validate_question(QuestionType::ShortAnswer, "Q", vec![], "x", 0).is_err());
    }
}
