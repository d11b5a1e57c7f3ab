//! 题目处理上下文
//!
//! 封装"我正在处理第几题、一共几题、什么题型"这一信息

use std::fmt::Display;

use crate::models::QuestionKind;

/// 题目处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCtx {
    /// 题目在会话中的索引（从1开始）
    pub question_index: usize,

    /// 题目总数
    pub total: usize,

    /// 题型
    pub kind: QuestionKind,
}

impl QuestionCtx {
    /// 创建新的题目上下文
    pub fn new(question_index: usize, total: usize, kind: QuestionKind) -> Self {
        Self {
            question_index,
            total,
            kind,
        }
    }
}

impl Display for QuestionCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[题目 {}/{} {}]",
            self.question_index, self.total, self.kind
        )
    }
}
