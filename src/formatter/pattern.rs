//! 模板格式化器

use std::fmt::Write as _;

use crate::config::{ColorConfig, FormatConfig, Record};
use crate::error::PipelineError;
use crate::formatter::Formatter;

const COLOR_RESET: &str = "\x1b[0m";

/// 基于模板的格式化器
///
/// 按 FormatConfig 的模板渲染记录，占位符支持
/// {timestamp}、{level}、{target}、{file}、{line}、{message}；
/// 附加 ColorConfig 后各字段会用对应的ANSI序列包裹
pub struct PatternFormatter {
    config: FormatConfig,
    color: Option<ColorConfig>,
}

impl PatternFormatter {
    /// 使用默认格式创建格式化器
    pub fn new() -> Self {
        Self::with_config(FormatConfig::default())
    }

    /// 使用配置创建格式化器
    pub fn with_config(config: FormatConfig) -> Self {
        // 验证配置，如果失败则直接panic，让用户明确知道配置问题
        if let Err(e) = config.validate() {
            panic!("FormatConfig 验证失败: {}\n请检查您的配置并修复上述问题后再重试。", e);
        }
        Self { config, color: None }
    }

    /// 启用颜色输出
    pub fn with_color(mut self, color: ColorConfig) -> Self {
        self.color = Some(color);
        self
    }

    fn render_timestamp(&self, record: &Record) -> Result<String, PipelineError> {
        let mut rendered = String::new();
        write!(rendered, "{}", record.timestamp.format(&self.config.timestamp_format))
            .map_err(|_| PipelineError::Format(format!("无效的时间戳格式: {}", self.config.timestamp_format)))?;
        Ok(rendered)
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter for PatternFormatter {
    fn format(&self, record: &Record) -> Result<String, PipelineError> {
        let timestamp = self.render_timestamp(record)?;
        let level = self.config.level_style.label(record.metadata.level).to_string();
        let target = record.metadata.target.clone();
        let file = record.file.as_deref().unwrap_or("unknown").to_string();
        let line = record.line.unwrap_or(0).to_string();
        let message = record.text.clone();

        let (timestamp, level, target, file, message) = match &self.color {
            Some(color) => (
                paint(&timestamp, &color.timestamp),
                paint(&level, color.level_color(record.metadata.level)),
                paint(&target, &color.target),
                paint(&file, &color.file),
                paint(&message, &color.message),
            ),
            None => (timestamp, level, target, file, message),
        };

        Ok(self.config.format_template
            .replace("{timestamp}", &timestamp)
            .replace("{level}", &level)
            .replace("{target}", &target)
            .replace("{file}", &file)
            .replace("{line}", &line)
            .replace("{message}", &message))
    }
}

fn paint(text: &str, code: &str) -> String {
    if code.is_empty() {
        text.to_string()
    } else {
        format!("{}{}{}", code, text, COLOR_RESET)
    }
}
