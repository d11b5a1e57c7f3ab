//! 页面能力抽象 - 基础设施层
//!
//! 答题策略只通过 `UiSurface` 操作页面，不直接接触浏览器。

use std::fmt;

use async_trait::async_trait;

use crate::error::SurfaceResult;

/// 元素选择器
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector {
    Css(String),
    XPath(String),
}

impl Selector {
    pub fn css(selector: impl Into<String>) -> Self {
        Selector::Css(selector.into())
    }

    pub fn xpath(selector: impl Into<String>) -> Self {
        Selector::XPath(selector.into())
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selector::Css(s) => write!(f, "css:{}", s),
            Selector::XPath(s) => write!(f, "xpath:{}", s),
        }
    }
}

/// 键盘按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Enter,
}

impl Key {
    /// DOM `KeyboardEvent.key`
    pub fn key(self) -> &'static str {
        match self {
            Key::ArrowLeft => "ArrowLeft",
            Key::ArrowRight => "ArrowRight",
            Key::Enter => "Enter",
        }
    }

    /// DOM `KeyboardEvent.code`
    pub fn code(self) -> &'static str {
        self.key()
    }

    /// Windows 虚拟键码
    pub fn key_code(self) -> i64 {
        match self {
            Key::ArrowLeft => 37,
            Key::ArrowRight => 39,
            Key::Enter => 13,
        }
    }

    /// 按键产生的字符
    pub fn text(self) -> Option<&'static str> {
        match self {
            Key::Enter => Some("\r"),
            _ => None,
        }
    }
}

/// 页面能力
///
/// 职责：
/// - 查找元素（CSS / XPath）
/// - 点击、输入、发送按键、读取文本
/// - 不认识 Question，不处理答题流程
#[async_trait]
pub trait UiSurface: Send + Sync {
    /// 页面元素句柄
    type Element: Send + Sync;

    /// 查找所有匹配的元素，没有匹配时返回空列表
    async fn find_all(&self, selector: &Selector) -> SurfaceResult<Vec<Self::Element>>;

    /// 查找第一个匹配的元素
    async fn find_first(&self, selector: &Selector) -> SurfaceResult<Option<Self::Element>> {
        Ok(self.find_all(selector).await?.into_iter().next())
    }

    /// 点击元素
    async fn activate(&self, element: &Self::Element) -> SurfaceResult<()>;

    /// 用 `text` 覆盖输入框的内容
    async fn type_text(&self, element: &Self::Element, text: &str) -> SurfaceResult<()>;

    /// 向当前焦点依次发送按键
    async fn send_keys(&self, keys: &[Key]) -> SurfaceResult<()>;

    /// 读取元素的可见文本
    async fn read_text(&self, element: &Self::Element) -> SurfaceResult<String>;
}
