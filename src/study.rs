//! Study material returned by the model as JSON: quizzes, flashcards and
//! learning roadmaps.
//!
//! Each kind can be turned into ordinary [`Node`]s so the HTML and Typst
//! renderers display it without knowing about study material.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::block::{Node, Span, Table};
use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    /// Index into `options`.
    pub correct_answer: usize,
    pub explanation: String,
}

/// Outcome of answering a quiz question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grade {
    Correct,
    Incorrect { correct: usize },
}

impl QuizItem {
    pub fn grade(&self, choice: usize) -> Grade {
        if choice == self.correct_answer {
            Grade::Correct
        } else {
            Grade::Incorrect {
                correct: self.correct_answer,
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flashcard {
    pub front: String,
    pub back: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapStep {
    pub title: String,
    pub description: String,
    pub estimated_time: String,
}

/// Decode a JSON array; a blank response counts as an empty list.
fn parse_list<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(json)?)
}

pub fn parse_quizzes(json: &str) -> Result<Vec<QuizItem>> {
    let quizzes: Vec<QuizItem> = parse_list(json)?;
    for (index, quiz) in quizzes.iter().enumerate() {
        if quiz.correct_answer >= quiz.options.len() {
            return Err(Error::InvalidQuiz {
                index,
                answer: quiz.correct_answer,
                options: quiz.options.len(),
            });
        }
    }
    Ok(quizzes)
}

pub fn parse_flashcards(json: &str) -> Result<Vec<Flashcard>> {
    parse_list(json)
}

pub fn parse_roadmap(json: &str) -> Result<Vec<RoadmapStep>> {
    parse_list(json)
}

fn push_question(nodes: &mut Vec<Node>, n: usize, quiz: &QuizItem, reveal: bool) {
    nodes.push(Node::heading(format!("QUESTION {}", n + 1)));
    nodes.push(Node::paragraph(quiz.question.as_str()));
    for (i, option) in quiz.options.iter().enumerate() {
        let label = Span::Text(option.clone());
        let content = if reveal && i == quiz.correct_answer {
            vec![Span::Bold(vec![label])]
        } else {
            vec![label]
        };
        nodes.push(Node::ListItem { content });
    }
}

fn mentor_note(quiz: &QuizItem) -> Node {
    Node::Paragraph {
        content: vec![
            Span::Bold(vec![Span::Text("Mentor's note:".to_string())]),
            Span::Text(format!(" {}", quiz.explanation)),
        ],
    }
}

/// Quizzes as nodes. With `reveal`, the correct option is bold and the
/// explanation follows the options.
pub fn quiz_nodes(quizzes: &[QuizItem], reveal: bool) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (n, quiz) in quizzes.iter().enumerate() {
        push_question(&mut nodes, n, quiz, reveal);
        if reveal {
            nodes.push(mentor_note(quiz));
        }
    }
    nodes
}

/// Quizzes answered with `choices`, one option index per question in order.
///
/// An answered question is revealed and gets a verdict before the
/// explanation. Questions past the end of `choices` stay hidden.
pub fn graded_quiz_nodes(quizzes: &[QuizItem], choices: &[usize]) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (n, quiz) in quizzes.iter().enumerate() {
        let Some(&choice) = choices.get(n) else {
            push_question(&mut nodes, n, quiz, false);
            continue;
        };
        push_question(&mut nodes, n, quiz, true);
        let content = match quiz.grade(choice) {
            Grade::Correct => vec![Span::Bold(vec![Span::Text("Correct.".to_string())])],
            Grade::Incorrect { correct } => {
                let answer = quiz.options.get(correct).map_or("", String::as_str);
                vec![
                    Span::Bold(vec![Span::Text("Incorrect.".to_string())]),
                    Span::Text(format!(" The answer is: {answer}")),
                ]
            }
        };
        nodes.push(Node::Paragraph { content });
        nodes.push(mentor_note(quiz));
    }
    nodes
}

/// Flashcards as a two-column table.
pub fn flashcard_nodes(cards: &[Flashcard]) -> Vec<Node> {
    if cards.is_empty() {
        return Vec::new();
    }
    vec![Node::Table(Table {
        headers: vec!["Front".to_string(), "Back".to_string()],
        rows: cards
            .iter()
            .map(|card| vec![card.front.clone(), card.back.clone()])
            .collect(),
    })]
}

/// Roadmap steps as numbered sections.
pub fn roadmap_nodes(steps: &[RoadmapStep]) -> Vec<Node> {
    let mut nodes = Vec::new();
    for (n, step) in steps.iter().enumerate() {
        nodes.push(Node::heading(format!("{}. {}", n + 1, step.title)));
        nodes.push(Node::Paragraph {
            content: vec![
                Span::Bold(vec![Span::Text(step.estimated_time.clone())]),
                Span::Text(format!(" {}", step.description)),
            ],
        });
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUIZ_JSON: &str = r#"[{
        "question": "Lookup cost in a hash map?",
        "options": ["O(1) average", "O(log n)", "O(n)"],
        "correctAnswer": 0,
        "explanation": "Hashing gives constant expected time."
    }]"#;

    #[test]
    fn parses_quizzes() {
        let quizzes = parse_quizzes(QUIZ_JSON).unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].options.len(), 3);
        assert_eq!(quizzes[0].correct_answer, 0);
    }

    #[test]
    fn blank_response_is_empty() {
        assert!(parse_quizzes("").unwrap().is_empty());
        assert!(parse_flashcards("  \n").unwrap().is_empty());
        assert!(parse_roadmap("[]").unwrap().is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(parse_flashcards("[{\"front\": 1}]"), Err(Error::Json(_))));
    }

    #[test]
    fn out_of_range_answer_is_rejected() {
        let json = QUIZ_JSON.replace("\"correctAnswer\": 0", "\"correctAnswer\": 3");
        assert!(matches!(
            parse_quizzes(&json),
            Err(Error::InvalidQuiz {
                index: 0,
                answer: 3,
                options: 3
            })
        ));
    }

    #[test]
    fn grading() {
        let quiz = &parse_quizzes(QUIZ_JSON).unwrap()[0];
        assert_eq!(quiz.grade(0), Grade::Correct);
        assert_eq!(quiz.grade(2), Grade::Incorrect { correct: 0 });
    }

    #[test]
    fn revealed_quiz_marks_answer() {
        let quizzes = parse_quizzes(QUIZ_JSON).unwrap();
        let nodes = quiz_nodes(&quizzes, true);
        assert_eq!(nodes[0], Node::heading("QUESTION 1"));
        assert_eq!(
            nodes[2],
            Node::ListItem {
                content: vec![Span::Bold(vec![Span::Text("O(1) average".to_string())])]
            }
        );
        assert_eq!(
            nodes.last().map(Node::plain_text).as_deref(),
            Some("Mentor's note: Hashing gives constant expected time.")
        );
    }

    #[test]
    fn hidden_quiz_has_no_explanation() {
        let quizzes = parse_quizzes(QUIZ_JSON).unwrap();
        let nodes = quiz_nodes(&quizzes, false);
        assert_eq!(nodes.len(), 5);
        assert!(nodes.iter().all(|n| !n.plain_text().contains("Hashing")));
    }

    #[test]
    fn graded_quiz_shows_verdicts() {
        let mut quizzes = parse_quizzes(QUIZ_JSON).unwrap();
        quizzes.push(quizzes[0].clone());
        let nodes = graded_quiz_nodes(&quizzes, &[0, 2]);
        let text: Vec<String> = nodes.iter().map(Node::plain_text).collect();
        assert_eq!(text[5], "Correct.");
        assert_eq!(text[12], "Incorrect. The answer is: O(1) average");
        assert_eq!(text[13], "Mentor's note: Hashing gives constant expected time.");
        assert_eq!(nodes.len(), 14);
    }

    #[test]
    fn unanswered_questions_stay_hidden() {
        let quizzes = parse_quizzes(QUIZ_JSON).unwrap();
        assert_eq!(graded_quiz_nodes(&quizzes, &[]), quiz_nodes(&quizzes, false));
    }

    #[test]
    fn flashcards_become_a_table() {
        let cards = parse_flashcards(r#"[{"front": "Stack", "back": "LIFO"}]"#).unwrap();
        let nodes = flashcard_nodes(&cards);
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].plain_text(), "Front Back\nStack LIFO");
        assert!(flashcard_nodes(&[]).is_empty());
    }

    #[test]
    fn roadmap_steps_are_numbered() {
        let steps = parse_roadmap(
            r#"[{"title": "Arrays", "description": "Two pointers.", "estimatedTime": "1 week"}]"#,
        )
        .unwrap();
        let nodes = roadmap_nodes(&steps);
        assert_eq!(nodes[0], Node::heading("1. Arrays"));
        assert_eq!(nodes[1].plain_text(), "1 week Two pointers.");
    }
}
