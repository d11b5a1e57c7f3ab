//! Kahoot 页面选择器
//!
//! 页面结构变化时只需要修改这里

use crate::infrastructure::Selector;

/// 多选题中每个选项占用的按钮数量（选项块 + 勾选框）
pub const MULTI_SELECT_BUTTON_STRIDE: usize = 2;

/// 不间断空格，Kahoot 用它分隔千位和单位
pub const NBSP: char = '\u{a0}';

/// 题目进行中（倒计时出现）
pub fn question_active() -> Selector {
    Selector::xpath(r#"//div[contains(@class, "countdown")]"#)
}

/// 结果页
pub fn result_shown() -> Selector {
    Selector::xpath(r#"//div[contains(@class, "ResultPage")]"#)
}

/// 选项按钮
pub fn answer_buttons() -> Selector {
    Selector::css("button")
}

/// 多选题提交按钮
pub fn multi_select_submit() -> Selector {
    Selector::css(r#"button[class*="SubmitButton"]"#)
}

/// 填空题输入框
pub fn open_ended_input() -> Selector {
    Selector::css("input")
}

/// 滑块拖动区域
pub fn slider_container() -> Selector {
    Selector::css(r#"div[class*="ScrollContainer"]"#)
}

/// 滑块当前值
pub fn slider_value() -> Selector {
    Selector::css(r#"p[class*="ValueText"]>span"#)
}

/// 滑块提交按钮
pub fn slider_submit() -> Selector {
    Selector::css(r#"button[type="button"]"#)
}

/// 文本（去掉不间断空格后）以 `label` 开头的滑块刻度
pub fn slider_marker(label: &str) -> Selector {
    Selector::xpath(format!(
        "//div[starts-with(translate(text(),'{}',''),{})]/parent::div",
        NBSP,
        xpath_literal(label)
    ))
}

/// 游戏 PIN 输入框
pub fn game_pin_input() -> Selector {
    Selector::css(r#"input[name="gameId"]"#)
}

/// 昵称输入框
pub fn nickname_input() -> Selector {
    Selector::css(r#"input[name="nickname"]"#)
}

/// 把任意文本转换为 XPath 字符串字面量
///
/// XPath 1.0 没有转义，同时包含两种引号时需要用 `concat()` 拼接
pub fn xpath_literal(text: &str) -> String {
    if !text.contains('\'') {
        return format!("'{}'", text);
    }
    if !text.contains('"') {
        return format!("\"{}\"", text);
    }
    let parts: Vec<String> = text
        .split('\'')
        .map(|part| format!("'{}'", part))
        .collect();
    format!("concat({})", parts.join(r#", "'", "#))
}
