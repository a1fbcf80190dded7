//! 终端日志输出端

use std::any::Any;
use std::io::{self, BufWriter, Write};

use parking_lot::Mutex;

use crate::config::{ColorConfig, Record};
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};

const COLOR_RESET: &str = "\x1b[0m";

/// 终端输出配置
#[derive(Debug, Clone)]
pub struct TermConfig {
    /// 是否启用颜色输出
    pub enable_color: bool,
    /// 颜色配置
    pub color: Option<ColorConfig>,
}

impl TermConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        // 验证颜色配置一致性
        if !self.enable_color && self.color.is_some() {
            return Err("配置冲突: 颜色配置被提供但 enable_color 为 false。如果要启用颜色，请设置 enable_color = true；如果要禁用颜色，请移除 color 配置。".to_string());
        }
        Ok(())
    }
}

impl Default for TermConfig {
    fn default() -> Self {
        Self {
            enable_color: true,
            color: None,
        }
    }
}

/// 终端日志输出端
///
/// 每条记录按文本原样写入标准输出，整行按级别着色（若启用）
pub struct TermSink {
    config: TermConfig,
    stdout: Mutex<BufWriter<io::Stdout>>,
}

impl TermSink {
    /// 创建默认配置的终端输出端
    pub fn new() -> Self {
        Self::with_config(TermConfig::default())
    }

    /// 使用配置创建终端输出端
    pub fn with_config(config: TermConfig) -> Self {
        // 验证配置，如果失败则直接panic，让用户明确知道配置问题
        if let Err(e) = config.validate() {
            panic!("TermConfig 验证失败: {}\n请检查您的配置并修复上述问题后再重试。", e);
        }
        Self {
            config,
            stdout: Mutex::new(BufWriter::new(io::stdout())),
        }
    }
}

impl Default for TermSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for TermSink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        let mut stdout = self.stdout.lock();
        match &self.config.color {
            Some(color) if self.config.enable_color => {
                writeln!(
                    stdout,
                    "{}{}{}",
                    color.level_color(record.metadata.level),
                    record.text,
                    COLOR_RESET
                )?;
            }
            _ => writeln!(stdout, "{}", record.text)?,
        }
        stdout.flush()?;
        Ok(())
    }

    fn close(&self) -> Result<(), PipelineError> {
        self.stdout.lock().flush()?;
        Ok(())
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Terminal
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
