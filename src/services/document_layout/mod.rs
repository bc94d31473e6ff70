//! Paginated quiz export.
//!
//! Layout runs in two passes over a buffered [`PagedDocument`]: the first flows
//! the title and question blocks across pages, the second stamps `n / total`
//! footers once the page count is known. The finished document is then
//! serialized to PDF.

pub mod page;
pub mod pdf_writer;
pub mod text_metrics;

use std::io::Write;

use crate::{
    errors::AppResult,
    models::domain::{AnswerOption, RenderMode, RenderableQuiz},
};

use page::{Align, FontFace, PageFlow, PageGeometry, PagedDocument, Rgb, TextStyle};
use text_metrics::text_width;

/// A question heading needs at least this much room left on the page.
const QUESTION_MIN_REMAINING: f32 = 100.0;
/// An option may not start lower than this distance above the page bottom.
const OPTION_SAFE_ZONE: f32 = 50.0;
/// An explanation may not start lower than this distance above the page bottom.
const EXPLANATION_SAFE_ZONE: f32 = 60.0;

const OPTION_INDENT: f32 = 15.0;
const NOTE_MARKER_X: f32 = 40.0;
const NOTE_MARKER_HEIGHT: f32 = 12.0;
const NOTE_X: f32 = 45.0;
const NOTE_WIDTH: f32 = 500.0;
const FOOTER_Y: f32 = 790.0;

const BLACK: Rgb = Rgb::hex(0x000000);
const MUTED: Rgb = Rgb::hex(0x6b7280);
const RULE: Rgb = Rgb::hex(0x9ca3af);
const NOTE_MARKER: Rgb = Rgb::hex(0xd1d5db);
const NOTE_TEXT: Rgb = Rgb::hex(0x4b5563);

const TITLE_STYLE: TextStyle = TextStyle {
    face: FontFace::Bold,
    size: 18.0,
    color: BLACK,
};
const HEADING_STYLE: TextStyle = TextStyle {
    face: FontFace::Bold,
    size: 11.0,
    color: BLACK,
};
const OPTION_STYLE: TextStyle = TextStyle {
    face: FontFace::Regular,
    size: 10.0,
    color: BLACK,
};
const CORRECT_OPTION_STYLE: TextStyle = TextStyle {
    face: FontFace::Bold,
    size: 10.0,
    color: BLACK,
};
const WRONG_OPTION_STYLE: TextStyle = TextStyle {
    face: FontFace::Regular,
    size: 10.0,
    color: MUTED,
};
const NOTE_STYLE: TextStyle = TextStyle {
    face: FontFace::Oblique,
    size: 9.0,
    color: NOTE_TEXT,
};
const FOOTER_STYLE: TextStyle = TextStyle {
    face: FontFace::Regular,
    size: 8.0,
    color: RULE,
};

#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentLayoutEngine {
    geometry: PageGeometry,
}

impl DocumentLayoutEngine {
    pub fn new(geometry: PageGeometry) -> Self {
        Self { geometry }
    }

    /// Lays out the quiz and writes it as PDF to `writer`.
    pub fn render<W: Write>(&self, quiz: &RenderableQuiz, mode: RenderMode, writer: W) -> AppResult<()> {
        let document = self.layout(quiz, mode);
        log::debug!(
            "Rendering '{}' ({:?}) on {} page(s)",
            quiz.title,
            mode,
            document.page_count()
        );
        pdf_writer::write_pdf(&document, &quiz.title, writer)
    }

    pub fn render_to_bytes(&self, quiz: &RenderableQuiz, mode: RenderMode) -> AppResult<Vec<u8>> {
        let mut bytes = Vec::new();
        self.render(quiz, mode, &mut bytes)?;
        Ok(bytes)
    }

    pub fn layout(&self, quiz: &RenderableQuiz, mode: RenderMode) -> PagedDocument {
        let geometry = self.geometry;
        let margin = geometry.margin;
        let content_width = geometry.content_width();
        let mut flow = PageFlow::new(geometry);

        flow.write(&quiz.title, margin, content_width, TITLE_STYLE, Align::Center);
        flow.move_down(0.5);
        let rule_y = flow.y();
        flow.line((margin, rule_y), (margin + content_width, rule_y), 0.5, RULE);
        flow.move_down(1.0);

        let page_height = flow.page_height();
        let last = quiz.questions.len().saturating_sub(1);

        for (index, question) in quiz.questions.iter().enumerate() {
            if flow.remaining() < QUESTION_MIN_REMAINING {
                flow.add_page();
            }

            let heading = format!("{}. {}", index + 1, question.text);
            flow.write(&heading, margin, content_width, HEADING_STYLE, Align::Left);
            flow.move_down(0.3);

            for (position, option) in question.options.iter().enumerate() {
                let (line, style) = option_line(position, option, mode);

                if flow.y() > page_height - OPTION_SAFE_ZONE {
                    flow.add_page();
                }

                flow.write(
                    &line,
                    margin + OPTION_INDENT,
                    content_width - OPTION_INDENT,
                    style,
                    Align::Left,
                );
                flow.move_down(0.2);
            }

            if mode == RenderMode::Answered && !question.explanation.trim().is_empty() {
                flow.move_down(0.3);

                if flow.y() > page_height - EXPLANATION_SAFE_ZONE {
                    flow.add_page();
                }

                let top = flow.y();
                flow.line(
                    (NOTE_MARKER_X, top),
                    (NOTE_MARKER_X, top + NOTE_MARKER_HEIGHT),
                    1.0,
                    NOTE_MARKER,
                );
                let note = format!("Note: {}", question.explanation);
                flow.write(&note, NOTE_X, NOTE_WIDTH, NOTE_STYLE, Align::Left);
            }

            if index < last {
                flow.move_down(1.2);
            }
        }

        let mut document = flow.finish();
        stamp_page_numbers(&mut document);
        document
    }
}

fn option_line(position: usize, option: &AnswerOption, mode: RenderMode) -> (String, TextStyle) {
    let letter = option_letter(position);

    match mode {
        RenderMode::Answered if option.is_correct => {
            (format!("[X] {}. {}", letter, option.text), CORRECT_OPTION_STYLE)
        }
        RenderMode::Answered => (format!("( ) {}. {}", letter, option.text), WRONG_OPTION_STYLE),
        RenderMode::Plain => (format!("( ) {}. {}", letter, option.text), OPTION_STYLE),
    }
}

/// `A`, `B`, `C`, … by zero-based position.
pub fn option_letter(position: usize) -> char {
    u32::try_from(position)
        .ok()
        .and_then(|offset| char::from_u32(u32::from('A') + offset))
        .unwrap_or('?')
}

/// Second pass: every buffered page gets its `n / total` footer.
fn stamp_page_numbers(document: &mut PagedDocument) {
    let geometry = document.geometry();
    let right_edge = geometry.width - geometry.margin;
    let total = document.page_count();

    for (index, page) in document.pages_mut().iter_mut().enumerate() {
        let label = format!("{} / {}", index + 1, total);
        let x = right_edge - text_width(&label, FOOTER_STYLE.face, FOOTER_STYLE.size);
        page.elements.push(page::Element::Text {
            text: label,
            x,
            y: FOOTER_Y,
            style: FOOTER_STYLE,
        });
    }
}

/// Download name derived from the quiz title, e.g. `Quiz-Roman_Empire_Correction.pdf`.
pub fn suggested_filename(title: &str, mode: RenderMode) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    let suffix = match mode {
        RenderMode::Answered => "_Correction",
        RenderMode::Plain => "",
    };
    format!("Quiz-{}{}.pdf", stem, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::domain::{AnswerOption, Question},
        test_utils::fixtures::sample_quiz,
    };
    use page::Element;
    use text_metrics::line_height;

    fn footers(document: &PagedDocument) -> Vec<String> {
        document
            .pages()
            .iter()
            .map(|page| match page.elements.last() {
                Some(Element::Text { text, .. }) => text.clone(),
                other => panic!("page does not end with a footer: {:?}", other),
            })
            .collect()
    }

    fn content_texts(document: &PagedDocument) -> Vec<Vec<(String, f32, TextStyle)>> {
        document
            .pages()
            .iter()
            .map(|page| {
                page.texts()
                    .filter(|(_, y, _)| *y != FOOTER_Y)
                    .map(|(text, y, style)| (text.to_string(), y, *style))
                    .collect()
            })
            .collect()
    }

    #[test]
    fn zero_questions_render_a_single_titled_page() {
        let quiz = RenderableQuiz::new("Empty quiz", vec![]);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Plain);

        assert_eq!(document.page_count(), 1);
        assert_eq!(footers(&document), vec!["1 / 1"]);
        let texts = &content_texts(&document)[0];
        assert_eq!(texts.len(), 1);
        assert_eq!(texts[0].0, "Empty quiz");
        assert!(document.pages()[0]
            .elements
            .iter()
            .any(|e| matches!(e, Element::Line { .. })));
    }

    #[test]
    fn forty_questions_span_several_numbered_pages() {
        let quiz = sample_quiz("Capitals", 40);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Plain);

        let total = document.page_count();
        assert!(total > 1);
        let expected: Vec<String> = (1..=total).map(|n| format!("{} / {}", n, total)).collect();
        assert_eq!(footers(&document), expected);
    }

    #[test]
    fn every_question_and_option_is_laid_out_in_order() {
        let quiz = sample_quiz("Capitals", 40);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Plain);

        let all: Vec<String> = content_texts(&document)
            .into_iter()
            .flatten()
            .map(|(text, _, _)| text)
            .collect();
        let headings: Vec<&String> = all.iter().filter(|t| t.contains("Question number")).collect();
        assert_eq!(headings.len(), 40);
        assert_eq!(headings[0], "1. Question number 1?");
        assert_eq!(headings[39], "40. Question number 40?");
        assert_eq!(all.iter().filter(|t| t.starts_with("( ) ")).count(), 160);
    }

    #[test]
    fn content_never_crosses_the_bottom_margin() {
        let quiz = sample_quiz("Capitals", 60);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Answered);
        let limit = document.geometry().bottom_limit();

        for page in content_texts(&document) {
            for (text, y, style) in page {
                assert!(y + line_height(style.size) <= limit + 1e-3, "'{}' overflows at {}", text, y);
            }
        }
    }

    #[test]
    fn a_heading_is_never_the_last_line_of_a_page() {
        let quiz = sample_quiz("Capitals", 60);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Answered);

        for page in content_texts(&document) {
            let (last, _, _) = page.last().expect("every page has content");
            assert!(!last.contains("Question number"), "orphaned heading '{}'", last);
        }
    }

    #[test]
    fn options_and_notes_start_inside_their_safe_zones() {
        let quiz = sample_quiz("Capitals", 60);
        let engine = DocumentLayoutEngine::default();
        let document = engine.layout(&quiz, RenderMode::Answered);
        let height = document.geometry().height;

        for page in content_texts(&document) {
            for (text, y, _) in page {
                if text.starts_with("( ) ") || text.starts_with("[X] ") {
                    assert!(y <= height - OPTION_SAFE_ZONE);
                }
                if text.starts_with("Note: ") {
                    assert!(y <= height - EXPLANATION_SAFE_ZONE);
                }
            }
        }
    }

    #[test]
    fn plain_mode_ignores_correctness_flags() {
        let quiz = sample_quiz("Capitals", 5);
        let mut flipped = quiz.clone();
        for question in &mut flipped.questions {
            for option in &mut question.options {
                option.is_correct = !option.is_correct;
            }
        }

        let engine = DocumentLayoutEngine::default();
        let first = engine.layout(&quiz, RenderMode::Plain);
        let second = engine.layout(&quiz, RenderMode::Plain);
        let with_flipped_flags = engine.layout(&flipped, RenderMode::Plain);

        assert_eq!(first, second);
        assert_eq!(first, with_flipped_flags);

        let options: Vec<(String, f32, TextStyle)> = content_texts(&first)
            .into_iter()
            .flatten()
            .filter(|(text, _, _)| text.starts_with("( ) "))
            .collect();
        assert_eq!(options.len(), 20);
        assert!(options.iter().all(|(_, _, style)| *style == OPTION_STYLE));
    }

    #[test]
    fn plain_mode_hides_explanations() {
        let quiz = sample_quiz("Capitals", 3);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Plain);

        let any_note = content_texts(&document)
            .into_iter()
            .flatten()
            .any(|(text, _, _)| text.starts_with("Note:") || text.starts_with("[X]"));
        assert!(!any_note);
    }

    #[test]
    fn answered_mode_marks_the_correct_option_and_shows_the_note() {
        let quiz = RenderableQuiz::new(
            "Rome",
            vec![Question::new(
                "Who founded Rome?",
                "Legend credits Romulus.",
                vec![
                    AnswerOption::new("Remus", false),
                    AnswerOption::new("Romulus", true),
                    AnswerOption::new("Caesar", false),
                ],
            )],
        );
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Answered);
        let texts = &content_texts(&document)[0];

        assert_eq!(texts[1].0, "1. Who founded Rome?");
        assert_eq!(texts[2].0, "( ) A. Remus");
        assert_eq!(texts[2].2, WRONG_OPTION_STYLE);
        assert_eq!(texts[3].0, "[X] B. Romulus");
        assert_eq!(texts[3].2, CORRECT_OPTION_STYLE);
        assert_eq!(texts[4].0, "( ) C. Caesar");
        assert_eq!(texts[5].0, "Note: Legend credits Romulus.");
        assert_eq!(texts[5].2, NOTE_STYLE);

        let marker = document.pages()[0].elements.iter().any(|e| {
            matches!(e, Element::Line { from, to, .. } if from.0 == NOTE_MARKER_X && (to.1 - from.1 - NOTE_MARKER_HEIGHT).abs() < 1e-3)
        });
        assert!(marker);
    }

    #[test]
    fn blank_explanation_is_skipped_in_answered_mode() {
        let quiz = RenderableQuiz::new(
            "Rome",
            vec![Question::new("Q?", "  ", vec![AnswerOption::new("Yes", true)])],
        );
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Answered);

        assert!(!content_texts(&document)[0].iter().any(|(t, _, _)| t.starts_with("Note:")));
    }

    #[test]
    fn many_options_flow_across_pages_with_running_letters() {
        let options = (0..80).map(|i| AnswerOption::new(format!("choice {}", i), i == 0)).collect();
        let quiz = RenderableQuiz::new("Long", vec![Question::new("Pick one", "", options)]);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Plain);

        assert!(document.page_count() > 1);
        let all: Vec<String> = content_texts(&document)
            .into_iter()
            .flatten()
            .map(|(text, _, _)| text)
            .collect();
        assert!(all.contains(&"( ) Z. choice 25".to_string()));
        assert!(all.contains(&"( ) [. choice 26".to_string()));
    }

    #[test]
    fn question_without_options_renders_heading_only() {
        let quiz = RenderableQuiz::new("Rome", vec![Question::new("Open question", "", vec![])]);
        let document = DocumentLayoutEngine::default().layout(&quiz, RenderMode::Answered);

        let texts = &content_texts(&document)[0];
        assert_eq!(texts.len(), 2);
        assert_eq!(texts[1].0, "1. Open question");
    }

    #[test]
    fn render_to_bytes_produces_a_pdf() {
        let quiz = sample_quiz("Capitals", 12);
        let bytes = DocumentLayoutEngine::default()
            .render_to_bytes(&quiz, RenderMode::Answered)
            .unwrap();

        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn option_letters_follow_the_alphabet() {
        assert_eq!(option_letter(0), 'A');
        assert_eq!(option_letter(3), 'D');
        assert_eq!(option_letter(25), 'Z');
    }

    #[test]
    fn filename_replaces_non_alphanumerics() {
        assert_eq!(
            suggested_filename("Histoire: l'Empire romain", RenderMode::Plain),
            "Quiz-Histoire__l_Empire_romain.pdf"
        );
        assert_eq!(
            suggested_filename("Rome 101", RenderMode::Answered),
            "Quiz-Rome_101_Correction.pdf"
        );
        assert_eq!(suggested_filename("Été", RenderMode::Plain), "Quiz-_t_.pdf");
    }
}
