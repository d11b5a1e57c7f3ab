//! 测试用的脚本化页面
//!
//! 在内存中模拟 Kahoot 页面：静态元素、延迟出现的元素、
//! 题目开始 / 结果页交替信号，以及一个按方向键移动的滑块。

#![allow(dead_code)]

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::sync::Mutex;

use async_trait::async_trait;
use kahoot_autoplay::config::TimingConfig;
use kahoot_autoplay::error::SurfaceResult;
use kahoot_autoplay::infrastructure::{Key, Selector, UiSurface};
use kahoot_autoplay::services::selectors;
use kahoot_autoplay::services::AnswerContext;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FakeElement {
    pub name: String,
}

/// 页面上发生的可观察事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// 会话信号被观察到（"active" / "result"）
    Observed(&'static str),
    Activate(String),
    Type(String, String),
    Keys(Vec<Key>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Result,
}

struct SliderSim {
    label: String,
    position: i64,
    visible: RangeInclusive<i64>,
}

#[derive(Default)]
struct State {
    elements: HashMap<Selector, Vec<String>>,
    texts: HashMap<String, String>,
    appear_after: HashMap<Selector, usize>,
    lookups: HashMap<Selector, usize>,
    actions: Vec<Action>,
    phase: Option<Phase>,
    slider: Option<SliderSim>,
    hang_keys: bool,
    staged: HashMap<Selector, (usize, usize)>,
}

#[derive(Default)]
pub struct ScriptedSurface {
    state: Mutex<State>,
}

impl ScriptedSurface {
    pub fn new() -> Self {
        Self::default()
    }

    fn edit(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn with_elements(self, selector: Selector, names: &[&str]) -> Self {
        let names: Vec<String> = names.iter().map(|n| n.to_string()).collect();
        self.edit(|s| {
            s.elements.insert(selector, names);
        })
    }

    /// `count` 个选项按钮，命名为 `button#i`
    pub fn with_buttons(self, count: usize) -> Self {
        let names: Vec<String> = (0..count).map(|i| format!("button#{}", i)).collect();
        self.edit(|s| {
            s.elements.insert(selectors::answer_buttons(), names);
        })
    }

    pub fn with_text(self, name: &str, text: &str) -> Self {
        self.edit(|s| {
            s.texts.insert(name.to_string(), text.to_string());
        })
    }

    /// 前 `lookups` 次查找返回空
    pub fn appearing_after(self, selector: Selector, lookups: usize) -> Self {
        self.edit(|s| {
            s.appear_after.insert(selector, lookups);
        })
    }

    /// 前 `lookups` 次查找只返回前 `count` 个元素，模拟分批渲染
    pub fn rendering_partially(self, selector: Selector, count: usize, lookups: usize) -> Self {
        self.edit(|s| {
            s.staged.insert(selector, (count, lookups));
        })
    }

    /// 按键调用卡住一小时，模拟无响应的页面
    pub fn with_hanging_keys(self) -> Self {
        self.edit(|s| s.hang_keys = true)
    }

    /// 开启题目开始 / 结果页交替信号，从"题目开始"开始
    pub fn with_phases(self) -> Self {
        self.edit(|s| s.phase = Some(Phase::Active))
    }

    /// 滑块控件：当前位置 `start`，位置落在 `visible` 内时出现 `label` 刻度
    pub fn with_slider(self, label: &str, start: i64, visible: RangeInclusive<i64>) -> Self {
        let surface = self
            .with_elements(selectors::slider_container(), &["container"])
            .with_elements(selectors::slider_value(), &["value"])
            .with_elements(selectors::slider_submit(), &["slider-submit"])
            .with_text("value", &start.to_string());
        surface.edit(|s| {
            s.slider = Some(SliderSim {
                label: label.to_string(),
                position: start,
                visible,
            });
        })
    }

    pub fn actions(&self) -> Vec<Action> {
        self.state.lock().unwrap().actions.clone()
    }

    pub fn activated(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Activate(name) => Some(name),
                _ => None,
            })
            .collect()
    }

    pub fn key_rounds(&self) -> Vec<Vec<Key>> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                Action::Keys(keys) => Some(keys),
                _ => None,
            })
            .collect()
    }

    pub fn text_of(&self, name: &str) -> Option<String> {
        self.state.lock().unwrap().texts.get(name).cloned()
    }

    pub fn lookups(&self, selector: &Selector) -> usize {
        self.state
            .lock()
            .unwrap()
            .lookups
            .get(selector)
            .copied()
            .unwrap_or(0)
    }

    pub fn slider_position(&self) -> Option<i64> {
        self.state.lock().unwrap().slider.as_ref().map(|s| s.position)
    }
}

fn element(name: &str) -> FakeElement {
    FakeElement {
        name: name.to_string(),
    }
}

#[async_trait]
impl UiSurface for ScriptedSurface {
    type Element = FakeElement;

    async fn find_all(&self, selector: &Selector) -> SurfaceResult<Vec<FakeElement>> {
        let mut state = self.state.lock().unwrap();
        let seen = {
            let counter = state.lookups.entry(selector.clone()).or_insert(0);
            *counter += 1;
            *counter
        };

        if *selector == selectors::question_active() {
            if state.phase == Some(Phase::Active) {
                state.phase = Some(Phase::Result);
                state.actions.push(Action::Observed("active"));
                return Ok(vec![element("countdown")]);
            }
            return Ok(Vec::new());
        }
        if *selector == selectors::result_shown() {
            if state.phase == Some(Phase::Result) {
                state.phase = Some(Phase::Active);
                state.actions.push(Action::Observed("result"));
                return Ok(vec![element("result")]);
            }
            return Ok(Vec::new());
        }
        if let Some(slider) = &state.slider {
            if *selector == selectors::slider_marker(&slider.label) {
                return Ok(if slider.visible.contains(&slider.position) {
                    vec![element("marker")]
                } else {
                    Vec::new()
                });
            }
        }

        if let Some(&hidden_for) = state.appear_after.get(selector) {
            if seen <= hidden_for {
                return Ok(Vec::new());
            }
        }

        let mut found: Vec<FakeElement> = state
            .elements
            .get(selector)
            .map(|names| names.iter().map(|n| element(n)).collect())
            .unwrap_or_default();
        if let Some(&(count, staged_for)) = state.staged.get(selector) {
            if seen <= staged_for {
                found.truncate(count);
            }
        }
        Ok(found)
    }

    async fn activate(&self, element: &FakeElement) -> SurfaceResult<()> {
        let mut state = self.state.lock().unwrap();
        state.actions.push(Action::Activate(element.name.clone()));
        Ok(())
    }

    async fn type_text(&self, element: &FakeElement, text: &str) -> SurfaceResult<()> {
        let mut state = self.state.lock().unwrap();
        state.texts.insert(element.name.clone(), text.to_string());
        state
            .actions
            .push(Action::Type(element.name.clone(), text.to_string()));
        Ok(())
    }

    async fn send_keys(&self, keys: &[Key]) -> SurfaceResult<()> {
        let hang = self.state.lock().unwrap().hang_keys;
        if hang {
            tokio::time::sleep(std::time::Duration::from_secs(3_600)).await;
        }
        let mut state = self.state.lock().unwrap();
        if let Some(slider) = state.slider.as_mut() {
            for key in keys {
                match key {
                    Key::ArrowRight => slider.position += 1,
                    Key::ArrowLeft => slider.position -= 1,
                    Key::Enter => {}
                }
            }
        }
        state.actions.push(Action::Keys(keys.to_vec()));
        Ok(())
    }

    async fn read_text(&self, element: &FakeElement) -> SurfaceResult<String> {
        let state = self.state.lock().unwrap();
        Ok(state.texts.get(&element.name).cloned().unwrap_or_default())
    }
}

/// 测试用时间配置：滑块最多 25 轮，阶段等待 60 秒
pub fn test_timing() -> TimingConfig {
    TimingConfig {
        phase_timeout_ms: 60_000,
        slider_max_rounds: 25,
        ..TimingConfig::default()
    }
}

pub fn answer_ctx() -> AnswerContext {
    AnswerContext::new(&test_timing(), CancellationToken::new())
}
