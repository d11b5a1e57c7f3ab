use anyhow::Result;
use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::error::{AppError, BrowserError};

/// 连接到已开启调试端口的浏览器
///
/// 优先复用地址以 `url` 开头的标签页，否则新建标签页；最后都会重新导航到 `url`
pub async fn connect_to_browser(port: u16, url: &str) -> Result<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 添加短暂延迟以等待浏览器状态同步
    sleep(tokio::time::Duration::from_millis(300)).await;

    // 已经打开的游戏标签页直接复用
    let pages = browser.pages().await.map_err(|e| BrowserError::PageCreationFailed {
        source: Box::new(e),
    })?;
    debug!("获取到 {} 个页面", pages.len());
    let mut existing = None;
    for p in pages {
        if let Ok(Some(current)) = p.url().await {
            if current.starts_with(url) {
                debug!("复用已打开的页面: {}", current);
                existing = Some(p);
                break;
            }
        }
    }

    let page = match existing {
        Some(page) => page,
        None => browser.new_page("about:blank").await.map_err(|e| {
            error!("创建新页面失败: {}", e);
            BrowserError::PageCreationFailed {
                source: Box::new(e),
            }
        })?,
    };
    page.goto(url).await.map_err(|e| {
        error!("导航到 {} 失败: {}", url, e);
        BrowserError::NavigationFailed {
            url: url.to_string(),
            source: Box::new(e),
        }
    })?;
    info!("已导航到: {}", url);

    Ok((browser, page))
}
