use std::fmt;

/// 题目类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    /// 单选题
    Single,
    /// 多选题
    MultiSelect,
    /// 填空题
    OpenEnded,
    /// 滑块题
    Slider,
    /// 不支持的题型（投票、拼图等），只跟随进度不作答
    Unknown,
}

impl QuestionKind {
    /// 获取标准名称
    pub fn name(self) -> &'static str {
        match self {
            QuestionKind::Single => "单选题",
            QuestionKind::MultiSelect => "多选题",
            QuestionKind::OpenEnded => "填空题",
            QuestionKind::Slider => "滑块题",
            QuestionKind::Unknown => "未知题型",
        }
    }
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 滑块题的目标值
///
/// `label` 是页面刻度上显示的文本前缀，`value` 用于决定拖动方向。
#[derive(Debug, Clone, PartialEq)]
pub struct SliderTarget {
    pub label: String,
    pub value: f64,
}

impl SliderTarget {
    /// 从答案文本构造，文本必须是合法数字
    pub fn parse(label: impl Into<String>) -> Option<Self> {
        let label = label.into();
        let value = label.trim().parse::<f64>().ok()?;
        Some(Self { label, value })
    }

    /// 由题库中的数值构造，整数值不带 `.0` 后缀
    pub fn from_number(value: f64) -> Self {
        Self {
            label: value.to_string(),
            value,
        }
    }
}

/// 预先计算好的正确答案
#[derive(Debug, Clone, PartialEq)]
pub enum Answer {
    /// 单选：正确选项的下标
    Index(usize),
    /// 多选：所有正确选项的下标（升序）
    Indices(Vec<usize>),
    /// 填空：需要输入的文本
    Text(String),
    /// 滑块：目标刻度
    Slider(SliderTarget),
    /// 无答案（仅 `Unknown` 题型）
    None,
}

/// 单道题目
///
/// 在题库解析阶段构造一次，之后只读。
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub prompt: Option<String>,
    answer: Answer,
}

impl Question {
    pub fn single(prompt: Option<String>, index: usize) -> Self {
        Self {
            prompt,
            answer: Answer::Index(index),
        }
    }

    /// 多选题，下标会被排序去重；空集合退化为 `Unknown`
    pub fn multi_select(prompt: Option<String>, mut indices: Vec<usize>) -> Self {
        indices.sort_unstable();
        indices.dedup();
        if indices.is_empty() {
            return Self::unknown(prompt);
        }
        Self {
            prompt,
            answer: Answer::Indices(indices),
        }
    }

    pub fn open_ended(prompt: Option<String>, text: impl Into<String>) -> Self {
        Self {
            prompt,
            answer: Answer::Text(text.into()),
        }
    }

    pub fn slider(prompt: Option<String>, target: SliderTarget) -> Self {
        Self {
            prompt,
            answer: Answer::Slider(target),
        }
    }

    pub fn unknown(prompt: Option<String>) -> Self {
        Self {
            prompt,
            answer: Answer::None,
        }
    }

    pub fn kind(&self) -> QuestionKind {
        match self.answer {
            Answer::Index(_) => QuestionKind::Single,
            Answer::Indices(_) => QuestionKind::MultiSelect,
            Answer::Text(_) => QuestionKind::OpenEnded,
            Answer::Slider(_) => QuestionKind::Slider,
            Answer::None => QuestionKind::Unknown,
        }
    }

    pub fn answer(&self) -> &Answer {
        &self.answer
    }

    /// 题干预览（最多 `max_len` 个字符）
    pub fn prompt_preview(&self, max_len: usize) -> String {
        match &self.prompt {
            Some(prompt) => crate::utils::logging::truncate_text(prompt, max_len),
            None => "<无题干>".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_follows_answer_variant() {
        assert_eq!(Question::single(None, 2).kind(), QuestionKind::Single);
        assert_eq!(
            Question::open_ended(None, "42").kind(),
            QuestionKind::OpenEnded
        );
        assert_eq!(Question::unknown(None).kind(), QuestionKind::Unknown);
        assert_eq!(*Question::unknown(None).answer(), Answer::None);
    }

    #[test]
    fn test_multi_select_sorts_and_demotes_empty() {
        let q = Question::multi_select(None, vec![3, 0, 3]);
        assert_eq!(*q.answer(), Answer::Indices(vec![0, 3]));
        assert_eq!(
            Question::multi_select(None, Vec::new()).kind(),
            QuestionKind::Unknown
        );
    }

    #[test]
    fn test_slider_target_label_drops_trailing_zero() {
        assert_eq!(SliderTarget::from_number(10.0).label, "10");
        assert_eq!(SliderTarget::from_number(2.5).label, "2.5");
        assert_eq!(SliderTarget::from_number(-3.0).label, "-3");
        assert_eq!(SliderTarget::parse("abc"), None);
        assert_eq!(SliderTarget::parse("7").map(|t| t.value), Some(7.0));
    }
}
