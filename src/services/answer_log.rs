//! 答题日志服务 - 业务能力层
//!
//! 只负责把每道题的处理结果追加到日志文件，不关心流程

use std::fs::{self, OpenOptions};
use std::io::Write;

use anyhow::{Context, Result};
use tracing::debug;

/// 答题日志
///
/// 职责：
/// - 创建带时间戳表头的日志文件
/// - 每道题追加一行结果
pub struct AnswerLog {
    log_file_path: String,
}

impl AnswerLog {
    /// 使用自定义文件路径创建
    pub fn with_path(path: impl Into<String>) -> Self {
        Self {
            log_file_path: path.into(),
        }
    }

    pub fn path(&self) -> &str {
        &self.log_file_path
    }

    /// 初始化日志文件（覆盖旧内容）
    pub fn init(&self, title: &str) -> Result<()> {
        let log_header = format!(
            "{}\n答题日志 - {} - {}\n{}\n\n",
            "=".repeat(60),
            title,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            "=".repeat(60)
        );
        fs::write(&self.log_file_path, log_header)
            .with_context(|| format!("无法创建日志文件: {}", self.log_file_path))?;
        Ok(())
    }

    /// 追加一行记录
    pub fn write(&self, line: &str) -> Result<()> {
        debug!("写入答题日志: {}", line);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.log_file_path)
            .with_context(|| format!("无法打开日志文件: {}", self.log_file_path))?;

        writeln!(
            file,
            "[{}] {}",
            chrono::Local::now().format("%H:%M:%S"),
            line
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_then_append() {
        let path = std::env::temp_dir().join(format!("answer_log_{}.txt", std::process::id()));
        let log = AnswerLog::with_path(path.to_string_lossy().to_string());

        log.init("demo").unwrap();
        log.write("[题目 1/2 单选题] 已作答").unwrap();
        log.write("[题目 2/2 未知题型] 已跳过").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert!(content.contains("答题日志 - demo"));
        assert!(content.contains("[题目 1/2 单选题] 已作答"));
        assert_eq!(content.lines().filter(|l| l.contains("[题目")).count(), 2);

        let _ = fs::remove_file(path);
    }
}
