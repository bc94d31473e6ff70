pub const DEFAULT_QUESTION_COUNT: usize = 5;
pub const OPTIONS_PER_QUESTION: usize = 4;
pub const CORRECT_OPTIONS_PER_QUESTION: usize = 1;

/// Longest source-document excerpt embedded in a prompt, in characters.
pub const SOURCE_EXCERPT_CHAR_LIMIT: usize = 15_000;

pub const QUIZ_ARRAY_FORMAT: &str = r#"[
  {
    "text": "The question statement?",
    "explanation": "A detailed explanation of the correct answer...",
    "options": [
      { "text": "Wrong answer A", "isCorrect": false },
      { "text": "Right answer B", "isCorrect": true },
      { "text": "Wrong answer C", "isCorrect": false },
      { "text": "Wrong answer D", "isCorrect": false }
    ]
  }
]"#;

pub const QUESTION_OBJECT_FORMAT: &str = r#"{
  "text": "The question statement",
  "explanation": "The explanation of the answer",
  "options": [
    { "text": "Choice 1", "isCorrect": true },
    { "text": "Choice 2", "isCorrect": false },
    { "text": "Choice 3", "isCorrect": false },
    { "text": "Choice 4", "isCorrect": false }
  ]
}"#;

pub const OPTIONS_ARRAY_FORMAT: &str = r#"[
  { "text": "Wrong answer", "isCorrect": false },
  { "text": "Right answer", "isCorrect": true },
  { "text": "Wrong answer", "isCorrect": false },
  { "text": "Wrong answer", "isCorrect": false }
]"#;

pub const QUIZ_SYSTEM_PROMPT_HEADER: &str = "You are an expert educator who writes interactive quizzes.
Your goal is to write multiple-choice questions (MCQ) on a given subject.";
