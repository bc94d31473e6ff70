#[cfg(test)]
pub mod fixtures {
    use std::{collections::VecDeque, sync::Mutex};

    use crate::{
        models::domain::{AnswerOption, Question, RenderableQuiz},
        services::option_shuffler::RandomIndex,
    };

    /// Index source replaying a fixed sequence, clamped to the requested bound.
    pub struct ScriptedIndex {
        values: Mutex<VecDeque<usize>>,
        bounds: Mutex<Vec<usize>>,
    }

    impl ScriptedIndex {
        pub fn new(values: Vec<usize>) -> Self {
            Self {
                values: Mutex::new(values.into()),
                bounds: Mutex::new(Vec::new()),
            }
        }

        pub fn requested_bounds(&self) -> Vec<usize> {
            self.bounds.lock().unwrap().clone()
        }
    }

    impl RandomIndex for ScriptedIndex {
        fn index_up_to(&self, upper: usize) -> usize {
            self.bounds.lock().unwrap().push(upper);
            let next = self.values.lock().unwrap().pop_front().unwrap_or(upper);
            next.min(upper)
        }
    }

    /// Model reply with `count` questions whose first option ("A") is correct.
    pub fn four_option_reply(count: usize) -> String {
        let questions: Vec<Question> = (1..=count).map(sample_question).collect();
        serde_json::to_string(&questions).unwrap()
    }

    pub fn sample_question(number: usize) -> Question {
        Question::new(
            format!("Question number {}?", number),
            format!("Explanation for question {}.", number),
            vec![
                AnswerOption::new("A", true),
                AnswerOption::new("B", false),
                AnswerOption::new("C", false),
                AnswerOption::new("D", false),
            ],
        )
    }

    pub fn sample_quiz(title: &str, question_count: usize) -> RenderableQuiz {
        RenderableQuiz::new(title, (1..=question_count).map(sample_question).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::option_shuffler::RandomIndex;

    #[test]
    fn test_fixtures_sample_quiz() {
        let quiz = sample_quiz("Capitals", 3);
        assert_eq!(quiz.title, "Capitals");
        assert_eq!(quiz.questions.len(), 3);
        assert_eq!(quiz.questions[2].text, "Question number 3?");
    }

    #[test]
    fn test_fixtures_four_option_reply_parses() {
        let reply = four_option_reply(2);
        let value: serde_json::Value = serde_json::from_str(&reply).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 2);
        assert_eq!(value[0]["options"][0]["isCorrect"], true);
    }

    #[test]
    fn test_fixtures_scripted_index_clamps_and_records() {
        let source = ScriptedIndex::new(vec![5, 0]);
        assert_eq!(source.index_up_to(2), 2);
        assert_eq!(source.index_up_to(1), 0);
        assert_eq!(source.index_up_to(3), 3);
        assert_eq!(source.requested_bounds(), vec![2, 1, 3]);
    }
}
