//! Kahoot 题库 JSON 文档
//!
//! 对应 `GET /rest/kahoots/{quiz_id}` 的返回结构，只保留答题需要的字段。

use serde::Deserialize;
use tracing::{debug, warn};

use crate::models::question::{Question, SliderTarget};

/// 题库中的题型标签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TypeLabel {
    Quiz,
    MultipleSelectQuiz,
    OpenEnded,
    Slider,
    /// 纯展示页，不占题号
    Content,
}

/// 外部题型字符串 → 题型，字符串匹配只发生在这里
static TYPE_LABELS: phf::Map<&'static str, TypeLabel> = phf::phf_map! {
    "quiz" => TypeLabel::Quiz,
    "multiple_select_quiz" => TypeLabel::MultipleSelectQuiz,
    "open_ended" => TypeLabel::OpenEnded,
    "slider" => TypeLabel::Slider,
    "content" => TypeLabel::Content,
};

/// 题库文档
#[derive(Debug, Clone, Deserialize)]
pub struct QuizDocument {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub questions: Vec<RawQuestion>,
}

/// 原始题目
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuestion {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub choices: Vec<RawChoice>,
    #[serde(default)]
    pub choice_range: Option<ChoiceRange>,
}

/// 选项
#[derive(Debug, Clone, Deserialize)]
pub struct RawChoice {
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub correct: bool,
}

/// 滑块题取值范围
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceRange {
    pub correct: serde_json::Number,
    #[serde(default)]
    pub start: Option<serde_json::Number>,
    #[serde(default)]
    pub end: Option<serde_json::Number>,
}

impl QuizDocument {
    /// 解析为按出场顺序排列的题目列表
    ///
    /// `content` 页被丢弃且不占用题号；无法识别的题型保留为 `Unknown`
    /// 以便会话循环跟随页面进度。
    pub fn extract_questions(&self) -> Vec<Question> {
        let mut questions = Vec::with_capacity(self.questions.len());

        for raw in &self.questions {
            let Some(label) = TYPE_LABELS.get(raw.kind.as_str()).copied() else {
                debug!("不支持的题型 {}，标记为未知", raw.kind);
                questions.push(Question::unknown(raw.question.clone()));
                continue;
            };

            let question = match label {
                TypeLabel::Content => continue,
                TypeLabel::Quiz => match raw.choices.iter().position(|c| c.correct) {
                    Some(index) => Question::single(raw.question.clone(), index),
                    None => demote(raw, "没有正确选项"),
                },
                TypeLabel::MultipleSelectQuiz => {
                    let indices: Vec<usize> = raw
                        .choices
                        .iter()
                        .enumerate()
                        .filter(|(_, c)| c.correct)
                        .map(|(i, _)| i)
                        .collect();
                    if indices.is_empty() {
                        demote(raw, "没有正确选项")
                    } else {
                        Question::multi_select(raw.question.clone(), indices)
                    }
                }
                TypeLabel::OpenEnded => {
                    match raw.choices.first().and_then(|c| c.answer.as_deref()) {
                        Some(text) if !text.is_empty() => {
                            Question::open_ended(raw.question.clone(), text)
                        }
                        _ => demote(raw, "没有参考答案"),
                    }
                }
                TypeLabel::Slider => match raw.choice_range.as_ref().and_then(slider_target) {
                    Some(target) => Question::slider(raw.question.clone(), target),
                    None => demote(raw, "缺少 choiceRange.correct"),
                },
            };
            questions.push(question);
        }

        questions
    }
}

fn slider_target(range: &ChoiceRange) -> Option<SliderTarget> {
    if range.correct.is_i64() || range.correct.is_u64() {
        return SliderTarget::parse(range.correct.to_string());
    }
    range.correct.as_f64().map(SliderTarget::from_number)
}

fn demote(raw: &RawQuestion, reason: &str) -> Question {
    warn!("题型 {} {}，按未知题型处理", raw.kind, reason);
    Question::unknown(raw.question.clone())
}
