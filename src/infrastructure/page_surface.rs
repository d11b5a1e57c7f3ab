//! 浏览器页面能力 - 基础设施层
//!
//! 持有唯一的 page 资源，对外只暴露 `UiSurface` 能力

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::input::{DispatchKeyEventParams, DispatchKeyEventType};
use chromiumoxide::error::CdpError;
use chromiumoxide::{Element, Page};
use tracing::debug;

use crate::error::{SurfaceError, SurfaceResult};
use crate::infrastructure::surface::{Key, Selector, UiSurface};

/// 清空输入框并通知前端框架
const CLEAR_INPUT_JS: &str = r#"function() {
    this.value = '';
    this.dispatchEvent(new Event('input', { bubbles: true }));
}"#;

/// 基于 chromiumoxide 的页面能力
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 实现查找 / 点击 / 输入 / 按键
/// - 不认识 Question，不处理答题流程
pub struct PageSurface {
    page: Page,
}

impl PageSurface {
    /// 创建新的页面能力
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    async fn dispatch_key(&self, event: DispatchKeyEventType, key: Key) -> SurfaceResult<()> {
        let mut builder = DispatchKeyEventParams::builder()
            .r#type(event.clone())
            .key(key.key())
            .code(key.code())
            .windows_virtual_key_code(key.key_code())
            .native_virtual_key_code(key.key_code());
        if let (DispatchKeyEventType::KeyDown, Some(text)) = (event, key.text()) {
            builder = builder.text(text);
        }
        let params = builder
            .build()
            .map_err(|e| SurfaceError::new("send_keys", e))?;
        self.page.execute(params).await?;
        Ok(())
    }
}

#[async_trait]
impl UiSurface for PageSurface {
    type Element = Element;

    async fn find_all(&self, selector: &Selector) -> SurfaceResult<Vec<Element>> {
        let found = match selector {
            Selector::Css(css) => self.page.find_elements(css.as_str()).await,
            Selector::XPath(xpath) => self.page.find_xpaths(xpath.as_str()).await,
        };
        match found {
            Ok(elements) => Ok(elements),
            // 没有匹配的节点不算错误
            Err(CdpError::NotFound) => Ok(Vec::new()),
            Err(e) => Err(SurfaceError::new("find_all", format!("{}: {}", selector, e))),
        }
    }

    async fn activate(&self, element: &Element) -> SurfaceResult<()> {
        element
            .click()
            .await
            .map_err(|e| SurfaceError::new("activate", e.to_string()))?;
        Ok(())
    }

    async fn type_text(&self, element: &Element, text: &str) -> SurfaceResult<()> {
        element
            .click()
            .await
            .map_err(|e| SurfaceError::new("type_text", e.to_string()))?;
        element
            .call_js_fn(CLEAR_INPUT_JS, false)
            .await
            .map_err(|e| SurfaceError::new("type_text", e.to_string()))?;
        element
            .type_str(text)
            .await
            .map_err(|e| SurfaceError::new("type_text", e.to_string()))?;
        Ok(())
    }

    async fn send_keys(&self, keys: &[Key]) -> SurfaceResult<()> {
        debug!("发送按键: {:?}", keys);
        for key in keys {
            self.dispatch_key(DispatchKeyEventType::KeyDown, *key).await?;
            self.dispatch_key(DispatchKeyEventType::KeyUp, *key).await?;
        }
        Ok(())
    }

    async fn read_text(&self, element: &Element) -> SurfaceResult<String> {
        let text = element
            .inner_text()
            .await
            .map_err(|e| SurfaceError::new("read_text", e.to_string()))?;
        Ok(text.unwrap_or_default())
    }
}
