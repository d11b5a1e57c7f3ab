/// Kahoot 题库 API 客户端
///
/// 只能获取公开 kahoot 的题目和答案
use crate::config::Config;
use crate::error::{ApiError, AppError, AppResult};
use crate::models::{Question, QuizDocument};
use tracing::{debug, info};

/// Kahoot 题库 API 客户端
pub struct KahootClient {
    http: reqwest::Client,
    base_url: String,
}

impl KahootClient {
    /// 创建新的题库客户端
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(config.quiz_api_base_url.clone())
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// 题库地址
    pub fn quiz_url(&self, quiz_id: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), quiz_id.trim())
    }

    /// 获取题库原始文档
    pub async fn fetch_quiz(&self, quiz_id: &str) -> AppResult<QuizDocument> {
        let url = self.quiz_url(quiz_id);
        debug!("请求题库: {}", url);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::BadResponse {
                endpoint: url,
                status: status.as_u16(),
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::api_request_failed(&url, e))?;
        let document: QuizDocument = serde_json::from_str(&body)?;
        Ok(document)
    }

    /// 获取题库并解析为题目列表
    pub async fn fetch_questions(&self, quiz_id: &str) -> AppResult<Vec<Question>> {
        let document = self.fetch_quiz(quiz_id).await?;
        let questions = document.extract_questions();
        info!(
            "✓ 题库 {} 加载完成: {} 道题",
            document.title.as_deref().unwrap_or(quiz_id),
            questions.len()
        );
        Ok(questions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiz_url_joins_without_double_slash() {
        let client = KahootClient::with_base_url("https://play.kahoot.it/rest/kahoots/");
        assert_eq!(
            client.quiz_url(" abc-123 "),
            "https://play.kahoot.it/rest/kahoots/abc-123"
        );
    }
}
