use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 浏览器相关错误
    #[error("浏览器错误: {0}")]
    Browser(#[from] BrowserError),
    /// 题库 API 调用错误
    #[error("API错误: {0}")]
    Api(#[from] ApiError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 答题会话错误
    #[error("会话错误: {0}")]
    Session(#[from] SessionError),
}

/// 浏览器相关错误
#[derive(Debug, Error)]
pub enum BrowserError {
    /// 连接浏览器失败
    #[error("无法连接到浏览器 (端口: {port}): {source}")]
    ConnectionFailed {
        port: u16,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 启动浏览器失败
    #[error("启动浏览器失败: {source}")]
    LaunchFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 创建页面失败
    #[error("创建页面失败: {source}")]
    PageCreationFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 导航失败
    #[error("导航到 {url} 失败: {source}")]
    NavigationFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 浏览器配置失败
    #[error("浏览器配置失败: {message}")]
    ConfigurationFailed { message: String },
    /// 加入游戏失败
    #[error("加入游戏失败 ({step}): {source}")]
    JoinFailed {
        step: &'static str,
        #[source]
        source: WaitError,
    },
}

/// 题库 API 调用错误
#[derive(Debug, Error)]
pub enum ApiError {
    /// 网络请求失败
    #[error("API请求失败 ({endpoint}): {source}")]
    RequestFailed {
        endpoint: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// API 返回错误响应（私有 kahoot 会返回 403/404）
    #[error("API返回错误响应 ({endpoint}): status={status}")]
    BadResponse { endpoint: String, status: u16 },
    /// JSON 解析失败
    #[error("JSON解析失败: {source}")]
    JsonParseFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    /// 配置项取值无效
    #[error("配置项 {field} 无效: {reason}")]
    InvalidValue { field: &'static str, reason: String },
}

// ========== 答题引擎错误 ==========

/// 页面操作（查找 / 点击 / 输入）失败
#[derive(Debug, Error)]
#[error("页面操作 {operation} 失败: {message}")]
pub struct SurfaceError {
    pub operation: &'static str,
    pub message: String,
}

impl SurfaceError {
    pub fn new(operation: &'static str, message: impl Into<String>) -> Self {
        Self {
            operation,
            message: message.into(),
        }
    }
}

/// 轮询等待的结果错误
#[derive(Debug, Error)]
pub enum WaitError {
    /// 在预算时间内条件始终未满足
    #[error("等待超时 (已等待 {waited:?})")]
    Timeout { waited: Duration },
    /// 调用方取消了等待
    #[error("等待已取消")]
    Cancelled,
    /// 轮询过程中页面操作失败
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// 单道题答题失败
#[derive(Debug, Error)]
pub enum AnswerError {
    /// 需要的控件在等待预算内没有出现
    #[error("未找到元素: {element} (已等待 {waited:?})")]
    ElementNotFound {
        element: &'static str,
        waited: Duration,
    },
    /// 滑块搜索超过轮数上限仍未找到目标刻度
    #[error("滑块未能收敛到 {target} (已尝试 {rounds} 轮)")]
    ConvergenceFailure { target: String, rounds: usize },
    /// 正确答案的位置超出了渲染出的选项数量
    #[error("选项索引 {index} 超出范围 (共 {available} 个)")]
    OptionOutOfRange { index: usize, available: usize },
    /// 滑块当前值无法解析为数字
    #[error("无法解析滑块当前值: {text:?}")]
    UnreadableValue { text: String },
    /// 答题过程被取消
    #[error("答题已取消")]
    Cancelled,
    /// 页面操作失败
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl AnswerError {
    /// 把等待失败转换为答题失败，`element` 描述正在等待的控件
    pub fn from_wait(err: WaitError, element: &'static str) -> Self {
        match err {
            WaitError::Timeout { waited } => AnswerError::ElementNotFound { element, waited },
            WaitError::Cancelled => AnswerError::Cancelled,
            WaitError::Surface(e) => AnswerError::Surface(e),
        }
    }

    /// 是否必须终止整个会话
    ///
    /// 控件缺失、取消和页面故障说明会话已经失去同步；
    /// 其余错误只影响当前题目，由会话策略决定跳过还是终止。
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            AnswerError::ElementNotFound { .. } | AnswerError::Cancelled | AnswerError::Surface(_)
        )
    }
}

/// 答题会话失败
#[derive(Debug, Error)]
pub enum SessionError {
    /// 等待题目开始 / 结果页超时，视为会话丢失
    #[error("[题目 {question}] 等待{phase}超时 (已等待 {waited:?})")]
    Timeout {
        question: usize,
        phase: &'static str,
        waited: Duration,
    },
    /// 答题策略失败
    #[error("[题目 {question}] 答题失败: {source}")]
    Answer {
        question: usize,
        #[source]
        source: AnswerError,
    },
    /// 会话被取消
    #[error("会话已取消")]
    Cancelled,
    /// 页面操作失败
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

// ========== 从常见错误类型转换 ==========

impl From<chromiumoxide::error::CdpError> for SurfaceError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        SurfaceError::new("cdp", err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Api(ApiError::JsonParseFailed {
            source: Box::new(err),
        })
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建浏览器连接错误
    pub fn browser_connection_failed(
        port: u16,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Browser(BrowserError::ConnectionFailed {
            port,
            source: Box::new(source),
        })
    }

    /// 创建API请求失败错误
    pub fn api_request_failed(
        endpoint: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Api(ApiError::RequestFailed {
            endpoint: endpoint.into(),
            source: Box::new(source),
        })
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

/// 页面操作结果类型
pub type SurfaceResult<T> = Result<T, SurfaceError>;
