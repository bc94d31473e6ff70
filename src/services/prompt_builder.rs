use crate::{
    constants::quiz_prompt::{
        CORRECT_OPTIONS_PER_QUESTION, DEFAULT_QUESTION_COUNT, OPTIONS_ARRAY_FORMAT,
        OPTIONS_PER_QUESTION, QUESTION_OBJECT_FORMAT, QUIZ_ARRAY_FORMAT,
        QUIZ_SYSTEM_PROMPT_HEADER, SOURCE_EXCERPT_CHAR_LIMIT,
    },
    services::model_service::ChatMessage,
};

/// Prompt text for one model call. Building it performs no I/O.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizPrompt {
    pub system: Option<String>,
    pub user: String,
}

impl QuizPrompt {
    pub fn into_messages(self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(self.user));
        messages
    }
}

#[derive(Debug, Clone)]
pub struct QuizPromptBuilder {
    language: String,
}

impl QuizPromptBuilder {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn build_full_quiz_prompt(
        &self,
        topic: &str,
        difficulty: &str,
        source_text: Option<&str>,
        question_count: Option<usize>,
    ) -> QuizPrompt {
        let count = question_count.unwrap_or(DEFAULT_QUESTION_COUNT);

        let system = format!(
            "{header}
Write exactly {count} questions.

STRICT RULES:
1. Reply ONLY with a valid JSON array.
2. No Markdown (no ```json fences), no text before or after the array.
3. Every question, option and explanation must be written in {language}.
4. Every question has exactly {options} options, exactly {correct} of which is correct.
5. Add a clear pedagogical explanation used for the correction.

EXPECTED JSON FORMAT:
{format}",
            header = QUIZ_SYSTEM_PROMPT_HEADER,
            count = count,
            language = self.language,
            options = OPTIONS_PER_QUESTION,
            correct = CORRECT_OPTIONS_PER_QUESTION,
            format = QUIZ_ARRAY_FORMAT,
        );

        let user = match source_text {
            Some(text) => {
                let excerpt = truncate_chars(text, SOURCE_EXCERPT_CHAR_LIMIT);
                format!(
                    "Here is the content of a course:
\"\"\"{excerpt}\"\"\"

TASK: Write a quiz of {count} questions (difficulty: {difficulty}) based on this text.
If the text is not sufficient, use your general knowledge of the subject \"{topic}\"."
                )
            }
            None => format!(
                "Write a quiz of {count} questions on the subject: {topic} (difficulty: {difficulty})"
            ),
        };

        QuizPrompt {
            system: Some(system),
            user,
        }
    }

    pub fn build_assist_question_prompt(
        &self,
        context: &str,
        difficulty: &str,
        existing_question_texts: &[String],
        global_topic: Option<&str>,
    ) -> QuizPrompt {
        let topic_line = match global_topic.map(str::trim).filter(|t| !t.is_empty()) {
            Some(topic) => format!("The overall topic of the quiz is: \"{topic}\".\n"),
            None => String::new(),
        };

        let avoid = if existing_question_texts.is_empty() {
            String::new()
        } else {
            let listed = existing_question_texts
                .iter()
                .map(|text| format!("- {text}"))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Do NOT ask any of these questions, they already exist:\n{listed}\n")
        };

        let user = format!(
            "Write ONE complete multiple-choice question on the subject: \"{context}\".
{topic_line}Difficulty: {difficulty}.
{avoid}
RULES:
- Language: {language}.
- {options} options ({correct} correct, {wrong} wrong).
- A clear explanation.

STRICT JSON FORMAT (no markdown):
{format}",
            language = self.language,
            options = OPTIONS_PER_QUESTION,
            correct = CORRECT_OPTIONS_PER_QUESTION,
            wrong = OPTIONS_PER_QUESTION - CORRECT_OPTIONS_PER_QUESTION,
            format = QUESTION_OBJECT_FORMAT,
        );

        QuizPrompt { system: None, user }
    }

    pub fn build_assist_options_prompt(&self, question_context: &str, global_topic: &str) -> QuizPrompt {
        let user = format!(
            "The topic of the quiz is: \"{global_topic}\".
The question is: \"{question_context}\".

Write {options} options for this question ({correct} correct, {wrong} wrong) that stay on the topic of the quiz.
Language: {language}.

Strict JSON format, a bare array of options (no question text, no explanation, no markdown):
{format}",
            options = OPTIONS_PER_QUESTION,
            correct = CORRECT_OPTIONS_PER_QUESTION,
            wrong = OPTIONS_PER_QUESTION - CORRECT_OPTIONS_PER_QUESTION,
            language = self.language,
            format = OPTIONS_ARRAY_FORMAT,
        );

        QuizPrompt { system: None, user }
    }
}

impl Default for QuizPromptBuilder {
    fn default() -> Self {
        Self::new("French")
    }
}

fn truncate_chars(text: &str, limit: usize) -> &str {
    match text.char_indices().nth(limit) {
        Some((byte_index, _)) => &text[..byte_index],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::model_service::ChatRole;

    #[test]
    fn full_quiz_prompt_embeds_topic_and_requested_count() {
        let prompt = QuizPromptBuilder::default().build_full_quiz_prompt("Rome", "Easy", None, Some(8));

        assert!(prompt.user.contains("Rome"));
        assert!(prompt.user.contains('8'));
        assert!(prompt.user.contains("Easy"));
        let system = prompt.system.expect("full quiz prompt has a system message");
        assert!(system.contains("exactly 8 questions"));
        assert!(!system.contains("exactly 5 questions"));
    }

    #[test]
    fn full_quiz_prompt_defaults_to_five_questions() {
        let prompt = QuizPromptBuilder::default().build_full_quiz_prompt("Rome", "Easy", None, None);

        assert!(prompt.user.contains("5 questions"));
        assert!(prompt.system.unwrap().contains("exactly 5 questions"));
    }

    #[test]
    fn system_prompt_fixes_language_and_json_contract() {
        let builder = QuizPromptBuilder::new("English");
        let system = builder
            .build_full_quiz_prompt("Rust", "Hard", None, None)
            .system
            .unwrap();

        assert!(system.contains("written in English"));
        assert!(system.contains("valid JSON array"));
        assert!(system.contains("exactly 4 options, exactly 1 of which is correct"));
    }

    #[test]
    fn source_text_is_truncated_to_excerpt_limit() {
        let source = "é".repeat(SOURCE_EXCERPT_CHAR_LIMIT + 500);
        let prompt = QuizPromptBuilder::default().build_full_quiz_prompt(
            "Chemistry",
            "Medium",
            Some(&source),
            None,
        );

        let embedded = prompt.user.matches('é').count();
        assert_eq!(embedded, SOURCE_EXCERPT_CHAR_LIMIT);
        assert!(prompt.user.contains("general knowledge"));
        assert!(prompt.user.contains("\"Chemistry\""));
    }

    #[test]
    fn short_source_text_is_embedded_whole() {
        let prompt = QuizPromptBuilder::default().build_full_quiz_prompt(
            "Biology",
            "Easy",
            Some("Cells are the basic unit of life."),
            Some(3),
        );

        assert!(prompt.user.contains("\"\"\"Cells are the basic unit of life.\"\"\""));
        assert!(prompt.user.contains("3 questions"));
    }

    #[test]
    fn assist_question_lists_existing_questions_verbatim() {
        let existing = vec![
            "What is the capital of Italy?".to_string(),
            "What is the capital of Italy?".to_string(),
        ];
        let prompt = QuizPromptBuilder::default().build_assist_question_prompt(
            "Italian geography",
            "Easy",
            &existing,
            Some("Europe"),
        );

        assert_eq!(prompt.user.matches("- What is the capital of Italy?").count(), 2);
        assert!(prompt.user.contains("Do NOT ask"));
        assert!(prompt.user.contains("\"Europe\""));
        assert!(prompt.system.is_none());
    }

    #[test]
    fn assist_question_without_existing_has_no_exclusion_clause() {
        let prompt = QuizPromptBuilder::default().build_assist_question_prompt("Volcanoes", "Hard", &[], None);

        assert!(!prompt.user.contains("Do NOT ask"));
        assert!(!prompt.user.contains("overall topic"));
        assert!(prompt.user.contains("\"explanation\""));
    }

    #[test]
    fn assist_options_prompt_requests_bare_array() {
        let prompt = QuizPromptBuilder::default()
            .build_assist_options_prompt("Who painted the Mona Lisa?", "Renaissance art");

        assert!(prompt.user.contains("Who painted the Mona Lisa?"));
        assert!(prompt.user.contains("Renaissance art"));
        assert!(prompt.user.contains("bare array"));
        assert!(!prompt.user.contains("\"explanation\""));
    }

    #[test]
    fn prompt_messages_put_system_first() {
        let messages = QuizPromptBuilder::default()
            .build_full_quiz_prompt("Rome", "Easy", None, None)
            .into_messages();

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, ChatRole::System);
        assert_eq!(messages[1].role, ChatRole::User);
    }

    #[test]
    fn truncate_chars_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
    }
}
