use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::infrastructure::WaitPolicy;

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 浏览器使用方式
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowserMode {
    /// 自行启动浏览器
    Launch,
    /// 连接已开启调试端口的浏览器
    Connect,
}

impl FromStr for BrowserMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "launch" => Ok(BrowserMode::Launch),
            "connect" => Ok(BrowserMode::Connect),
            _ => Err(()),
        }
    }
}

/// 时间相关配置（毫秒）
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// 轮询间隔
    pub poll_interval_ms: u64,
    /// 等待答题控件的预算
    pub element_timeout_ms: u64,
    /// 等待加入游戏输入框的预算
    pub join_timeout_ms: u64,
    /// 等待题目开始 / 结果页的预算，题目时长由主持人决定所以要足够长
    pub phase_timeout_ms: u64,
    /// 滑块每轮按键后的停顿
    pub slider_step_pause_ms: u64,
    /// 点击滑块刻度后、提交前的停顿
    pub slider_commit_pause_ms: u64,
    /// 滑块搜索的最大轮数
    pub slider_max_rounds: usize,
    /// 滑块每轮发送的方向键数量
    pub slider_keys_per_round: usize,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 100,
            element_timeout_ms: 30_000,
            join_timeout_ms: 30_000,
            phase_timeout_ms: 1_000_000,
            slider_step_pause_ms: 500,
            slider_commit_pause_ms: 1_000,
            slider_max_rounds: 400,
            slider_keys_per_round: 2,
        }
    }
}

impl TimingConfig {
    pub fn element_wait(&self) -> WaitPolicy {
        WaitPolicy::from_millis(self.element_timeout_ms, self.poll_interval_ms)
    }

    pub fn join_wait(&self) -> WaitPolicy {
        WaitPolicy::from_millis(self.join_timeout_ms, self.poll_interval_ms)
    }

    pub fn phase_wait(&self) -> WaitPolicy {
        WaitPolicy::from_millis(self.phase_timeout_ms, self.poll_interval_ms)
    }

    pub fn slider_step_pause(&self) -> Duration {
        Duration::from_millis(self.slider_step_pause_ms)
    }

    pub fn slider_commit_pause(&self) -> Duration {
        Duration::from_millis(self.slider_commit_pause_ms)
    }
}

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 浏览器使用方式
    pub browser_mode: BrowserMode,
    /// 浏览器可执行文件（Brave / Edge 等 Chromium 内核浏览器）
    pub browser_executable: Option<String>,
    /// 是否无头运行
    pub headless: bool,
    /// 浏览器调试端口（connect 模式）
    pub browser_debug_port: u16,
    /// 游戏页面
    pub game_url: String,
    /// 题库 API 前缀
    pub quiz_api_base_url: String,
    /// 题库 ID，为空时从终端读取
    pub quiz_id: Option<String>,
    /// 游戏 PIN，为空时从终端读取
    pub game_pin: Option<String>,
    /// 昵称，为空时从终端读取
    pub nickname: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
    /// 单题失败（滑块不收敛等）后是否继续下一题
    pub continue_on_answer_error: bool,
    /// 时间配置
    pub timing: TimingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            browser_mode: BrowserMode::Launch,
            browser_executable: None,
            headless: false,
            browser_debug_port: 9222,
            game_url: "https://kahoot.it/".to_string(),
            quiz_api_base_url: "https://play.kahoot.it/rest/kahoots/".to_string(),
            quiz_id: None,
            game_pin: None,
            nickname: None,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
            continue_on_answer_error: true,
            timing: TimingConfig::default(),
        }
    }
}

impl Config {
    /// 加载配置：TOML 文件（可选） → 环境变量覆盖 → 校验
    ///
    /// 文件路径取 `KAHOOT_CONFIG`，默认 `config.toml`，文件不存在时使用默认值
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("KAHOOT_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let base = if Path::new(&path).exists() {
            Self::from_file(&path)?
        } else {
            Self::default()
        };
        let config = base.with_env_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// 从 TOML 文件读取，缺失的字段使用默认值
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 用环境变量覆盖配置，`lookup` 便于测试时注入
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BROWSER_MODE") {
            self.browser_mode = parse_env("BROWSER_MODE", &v, "launch|connect")?;
        }
        if let Some(v) = lookup("BROWSER_EXECUTABLE") {
            self.browser_executable = non_empty(v);
        }
        if let Some(v) = lookup("HEADLESS") {
            self.headless = parse_env("HEADLESS", &v, "bool")?;
        }
        if let Some(v) = lookup("BROWSER_DEBUG_PORT") {
            self.browser_debug_port = parse_env("BROWSER_DEBUG_PORT", &v, "u16")?;
        }
        if let Some(v) = lookup("GAME_URL") {
            self.game_url = v;
        }
        if let Some(v) = lookup("QUIZ_API_BASE_URL") {
            self.quiz_api_base_url = v;
        }
        if let Some(v) = lookup("QUIZ_ID") {
            self.quiz_id = non_empty(v);
        }
        if let Some(v) = lookup("GAME_PIN") {
            self.game_pin = non_empty(v);
        }
        if let Some(v) = lookup("NICKNAME") {
            self.nickname = non_empty(v);
        }
        if let Some(v) = lookup("VERBOSE_LOGGING") {
            self.verbose_logging = parse_env("VERBOSE_LOGGING", &v, "bool")?;
        }
        if let Some(v) = lookup("OUTPUT_LOG_FILE") {
            self.output_log_file = v;
        }
        if let Some(v) = lookup("CONTINUE_ON_ANSWER_ERROR") {
            self.continue_on_answer_error = parse_env("CONTINUE_ON_ANSWER_ERROR", &v, "bool")?;
        }
        Ok(self)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "game_url",
                reason: "不能为空".to_string(),
            });
        }
        if self.quiz_api_base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "quiz_api_base_url",
                reason: "不能为空".to_string(),
            });
        }
        let timing = &self.timing;
        let positive = [
            ("timing.poll_interval_ms", timing.poll_interval_ms),
            ("timing.element_timeout_ms", timing.element_timeout_ms),
            ("timing.join_timeout_ms", timing.join_timeout_ms),
            ("timing.phase_timeout_ms", timing.phase_timeout_ms),
            ("timing.slider_max_rounds", timing.slider_max_rounds as u64),
            ("timing.slider_keys_per_round", timing.slider_keys_per_round as u64),
        ];
        for (field, value) in positive {
            if value == 0 {
                return Err(ConfigError::InvalidValue {
                    field,
                    reason: "必须大于 0".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_env<T: FromStr>(var_name: &str, value: &str, expected_type: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value: value.to_string(),
            expected_type: expected_type.to_string(),
        })
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            browser_mode = "connect"
            browser_debug_port = 2001
            [timing]
            slider_max_rounds = 50
            "#,
        )
        .unwrap();

        assert_eq!(config.browser_mode, BrowserMode::Connect);
        assert_eq!(config.browser_debug_port, 2001);
        assert_eq!(config.timing.slider_max_rounds, 50);
        assert_eq!(config.timing.poll_interval_ms, 100);
        assert_eq!(config.game_url, "https://kahoot.it/");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_overrides_and_parse_errors() {
        let env: HashMap<&str, &str> = [("GAME_PIN", " 123456 "), ("HEADLESS", "true"), ("NICKNAME", "")]
            .into_iter()
            .collect();
        let config = Config::default()
            .with_env_overrides(|name| env.get(name).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.game_pin.as_deref(), Some("123456"));
        assert!(config.headless);
        assert_eq!(config.nickname, None);

        let err = Config::default()
            .with_env_overrides(|name| (name == "BROWSER_DEBUG_PORT").then(|| "abc".to_string()))
            .unwrap_err();
        assert!(matches!(err, ConfigError::EnvVarParseFailed { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_timing() {
        let mut config = Config::default();
        config.timing.slider_max_rounds = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue {
                field: "timing.slider_max_rounds",
                ..
            })
        ));
    }
}
