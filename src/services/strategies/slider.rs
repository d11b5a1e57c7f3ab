//! 滑块题
//!
//! 页面不接受直接输入数值，只能用方向键拖动滑块。做法是固定步长的爬山搜索：
//! 读一次当前值决定方向，然后每轮发送固定数量的方向键，直到页面上出现
//! 以目标值开头的刻度为止。方向和步长在循环中都不会重新计算，
//! 所以搜索依赖页面在刻度可达时立即渲染出它，轮数由 `slider_max_rounds` 封顶。

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;
use tracing::{debug, info};

use super::{AnswerContext, AnswerStrategy};
use crate::error::AnswerError;
use crate::infrastructure::{cancellable, pause, wait_for_element, Key, UiSurface};
use crate::models::SliderTarget;
use crate::services::selectors;

/// 滑块题：爬山搜索目标刻度后提交
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slider<'a> {
    target: &'a SliderTarget,
}

impl<'a> Slider<'a> {
    pub fn new(target: &'a SliderTarget) -> Self {
        Self { target }
    }

    /// 根据当前值决定拖动方向，相等时向左（与页面初始行为一致）
    pub fn direction(&self, reference: f64) -> Key {
        if reference < self.target.value {
            Key::ArrowRight
        } else {
            Key::ArrowLeft
        }
    }
}

#[async_trait]
impl<'a> AnswerStrategy for Slider<'a> {
    async fn answer<S: UiSurface>(&self, surface: &S, ctx: &AnswerContext) -> Result<(), AnswerError> {
        let container = wait_for_element(
            surface,
            &selectors::slider_container(),
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        .map_err(|e| AnswerError::from_wait(e, "滑块拖动区域"))?;
        let reference = wait_for_element(
            surface,
            &selectors::slider_value(),
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        .map_err(|e| AnswerError::from_wait(e, "滑块当前值"))?;
        let submit = wait_for_element(
            surface,
            &selectors::slider_submit(),
            ctx.element_wait,
            &ctx.cancel,
        )
        .await
        .map_err(|e| AnswerError::from_wait(e, "滑块提交按钮"))?;

        surface.activate(&container).await?;

        let text = surface.read_text(&reference).await?;
        let reference_value =
            parse_reference_value(&text).ok_or(AnswerError::UnreadableValue { text })?;

        let direction = self.direction(reference_value);
        let keys = vec![direction; ctx.slider_keys_per_round];
        let marker_selector = selectors::slider_marker(&self.target.label);
        debug!(
            "滑块当前值 {}，目标 {}，方向 {:?}",
            reference_value, self.target.label, direction
        );

        let mut rounds = 0usize;
        let marker = loop {
            if ctx.cancel.is_cancelled() {
                return Err(AnswerError::Cancelled);
            }
            let found = cancellable(surface.find_first(&marker_selector), &ctx.cancel)
                .await
                .map_err(|e| AnswerError::from_wait(e, "滑块刻度"))?;
            if let Some(marker) = found {
                break marker;
            }
            if rounds >= ctx.slider_max_rounds {
                return Err(AnswerError::ConvergenceFailure {
                    target: self.target.label.clone(),
                    rounds,
                });
            }
            cancellable(surface.send_keys(&keys), &ctx.cancel)
                .await
                .map_err(|e| AnswerError::from_wait(e, "滑块刻度"))?;
            rounds += 1;
            pause(ctx.slider_step_pause, &ctx.cancel)
                .await
                .map_err(|e| AnswerError::from_wait(e, "滑块刻度"))?;
        };

        info!("滑块经过 {} 轮找到刻度 {}", rounds, self.target.label);
        surface.activate(&marker).await?;
        pause(ctx.slider_commit_pause, &ctx.cancel)
            .await
            .map_err(|e| AnswerError::from_wait(e, "滑块提交按钮"))?;
        surface.activate(&submit).await?;
        Ok(())
    }
}

fn separators() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[\s\u{00a0}\u{202f}]").expect("静态正则"))
}

/// 解析滑块上显示的数值
///
/// 去掉普通空格、不间断空格和窄不间断空格；只有 `,` 时视为小数点，
/// `,` 与 `.` 同时出现时视为千位分隔符。
pub fn parse_reference_value(text: &str) -> Option<f64> {
    let compact = separators().replace_all(text, "");
    let normalized = match (compact.contains(','), compact.contains('.')) {
        (true, true) => compact.replace(',', ""),
        (true, false) => compact.replace(',', "."),
        _ => compact.into_owned(),
    };
    normalized.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_value_formats() {
        assert_eq!(parse_reference_value("42"), Some(42.0));
        assert_eq!(parse_reference_value("1\u{a0}000"), Some(1000.0));
        assert_eq!(parse_reference_value(" 12 500 "), Some(12500.0));
        assert_eq!(parse_reference_value("2,5"), Some(2.5));
        assert_eq!(parse_reference_value("1,000.5"), Some(1000.5));
        assert_eq!(parse_reference_value("-3"), Some(-3.0));
        assert_eq!(parse_reference_value("abc"), None);
        assert_eq!(parse_reference_value(""), None);
    }

    #[test]
    fn test_direction_follows_reference() {
        let target = SliderTarget::from_number(50.0);
        let slider = Slider::new(&target);
        assert_eq!(slider.direction(10.0), Key::ArrowRight);
        assert_eq!(slider.direction(90.0), Key::ArrowLeft);
        assert_eq!(slider.direction(50.0), Key::ArrowLeft);
    }
}
