//! 终端输入
//!
//! 配置中缺少题库 ID / PIN / 昵称时从终端读取

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};

/// 读取一行非空输入，空行时提示重试，输入结束（EOF）时报错
pub fn read_non_empty<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    title: &str,
    label: &str,
) -> Result<String> {
    writeln!(writer, "请输入{}!", title)?;
    loop {
        write!(writer, "{}: ", label)?;
        writer.flush()?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            bail!("未输入{}", title);
        }
        let value = line.trim();
        if !value.is_empty() {
            return Ok(value.to_string());
        }
        writeln!(writer, "请重试!")?;
    }
}

/// 优先使用配置值，否则从标准输入读取
pub fn value_or_prompt(configured: Option<&str>, title: &str, label: &str) -> Result<String> {
    if let Some(value) = configured {
        return Ok(value.to_string());
    }
    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut writer = io::stdout();
    read_non_empty(&mut reader, &mut writer, title, label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_retries_on_empty_lines() {
        let mut input = Cursor::new("\n  \n123456\n");
        let mut output = Vec::new();
        let value = read_non_empty(&mut input, &mut output, "游戏 PIN", "game pin").unwrap();
        assert_eq!(value, "123456");
        let printed = String::from_utf8(output).unwrap();
        assert_eq!(printed.matches("请重试!").count(), 2);
    }

    #[test]
    fn test_eof_is_an_error() {
        let mut input = Cursor::new("");
        let mut output = Vec::new();
        assert!(read_non_empty(&mut input, &mut output, "昵称", "nickname").is_err());
    }
}
