use serde::Serialize;

use folio_core::model::Question;

/// Marker class applied to an option button after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionMarker {
    Correct,
    Wrong,
}

/// Render state of one option button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OptionView {
    pub label: String,
    pub marker: Option<OptionMarker>,
    pub enabled: bool,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackTone {
    Affirmative,
    Corrective,
    Summary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feedback {
    pub text: String,
    pub tone: FeedbackTone,
}

/// The single button under the quiz, relabelled once the quiz is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlView {
    Hidden,
    Next,
    Restart,
}

impl ControlView {
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        match self {
            ControlView::Hidden => None,
            ControlView::Next => Some("Next Question"),
            ControlView::Restart => Some("Restart Quiz"),
        }
    }
}

/// Everything an adapter needs to mirror the quiz widget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuizView {
    pub prompt: String,
    pub options: Vec<OptionView>,
    pub feedback: Option<Feedback>,
    pub control: ControlView,
    pub score_text: String,
    pub total_text: String,
}

pub(crate) const COMPLETED_PROMPT: &str = "Quiz Completed!";

impl QuizView {
    pub(crate) fn blank(slots: usize, total: usize) -> Self {
        Self {
            prompt: String::new(),
            options: (0..slots)
                .map(|_| OptionView {
                    label: String::new(),
                    marker: None,
                    enabled: true,
                    visible: true,
                })
                .collect(),
            feedback: None,
            control: ControlView::Hidden,
            score_text: "0".into(),
            total_text: total.to_string(),
        }
    }

    pub(crate) fn show_question(&mut self, question: &Question) {
        self.prompt = question.prompt().to_owned();
        for (slot, label) in self.options.iter_mut().zip(question.options()) {
            slot.label.clone_from(label);
            slot.marker = None;
            slot.enabled = true;
            slot.visible = true;
        }
        self.feedback = None;
        self.control = ControlView::Hidden;
    }

    pub(crate) fn show_answer(&mut self, selected: usize, correct: usize, feedback: Feedback) {
        for (index, slot) in self.options.iter_mut().enumerate() {
            slot.enabled = false;
            if index == correct {
                slot.marker = Some(OptionMarker::Correct);
            } else if index == selected {
                slot.marker = Some(OptionMarker::Wrong);
            }
        }
        self.feedback = Some(feedback);
        self.control = ControlView::Next;
    }

    pub(crate) fn show_completed(&mut self, message: String) {
        self.prompt = COMPLETED_PROMPT.to_owned();
        for slot in &mut self.options {
            slot.visible = false;
        }
        self.feedback = Some(Feedback {
            text: message,
            tone: FeedbackTone::Summary,
        });
        self.control = ControlView::Restart;
    }

    #[must_use]
    pub fn visible_options(&self) -> usize {
        self.options.iter().filter(|o| o.visible).count()
    }
}
