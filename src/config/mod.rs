//! 配置模块 - 日志记录与管道配置类型

use chrono::{DateTime, Local};
use serde::{Serialize, Deserialize};
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

/// 日志级别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Level {
    pub fn to_level_filter(&self) -> LevelFilter {
        match self {
            Level::Error => LevelFilter::Error,
            Level::Warn => LevelFilter::Warn,
            Level::Info => LevelFilter::Info,
            Level::Debug => LevelFilter::Debug,
            Level::Trace => LevelFilter::Trace,
        }
    }

    /// 判断该级别的记录在指定阈值下是否应该放行
    pub fn should_log_at_level(&self, threshold: Level) -> bool {
        (self.to_level_filter() as u8) <= (threshold.to_level_filter() as u8)
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "ERROR"),
            Level::Warn => write!(f, "WARN"),
            Level::Info => write!(f, "INFO"),
            Level::Debug => write!(f, "DEBUG"),
            Level::Trace => write!(f, "TRACE"),
        }
    }
}

impl bincode::Encode for Level {
    fn encode<E: bincode::enc::Encoder>(&self, encoder: &mut E) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.to_string(), encoder)
    }
}

impl<Context> bincode::Decode<Context> for Level {
    fn decode<D: bincode::de::Decoder<Context = Context>>(decoder: &mut D) -> Result<Self, bincode::error::DecodeError> {
        let label: String = bincode::Decode::decode(decoder)?;
        match label.as_str() {
            "ERROR" => Ok(Level::Error),
            "WARN" => Ok(Level::Warn),
            "INFO" => Ok(Level::Info),
            "DEBUG" => Ok(Level::Debug),
            "TRACE" => Ok(Level::Trace),
            _ => Err(bincode::error::DecodeError::Other("invalid level label")),
        }
    }
}

/// 日志级别过滤器
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LevelFilter {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LevelFilter {
    /// 从数值恢复级别过滤器
    pub fn from_usize(value: usize) -> LevelFilter {
        match value {
            0 => LevelFilter::Off,
            1 => LevelFilter::Error,
            2 => LevelFilter::Warn,
            3 => LevelFilter::Info,
            4 => LevelFilter::Debug,
            5 => LevelFilter::Trace,
            _ => LevelFilter::Info,
        }
    }
}

impl FromStr for LevelFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(LevelFilter::Off),
            "error" => Ok(LevelFilter::Error),
            "warn" => Ok(LevelFilter::Warn),
            "info" => Ok(LevelFilter::Info),
            "debug" => Ok(LevelFilter::Debug),
            "trace" => Ok(LevelFilter::Trace),
            _ => Err(format!("无效的日志级别: {}", s)),
        }
    }
}

/// 日志元数据
#[derive(Clone, Serialize, Deserialize)]
pub struct Metadata {
    pub level: Level,
    pub target: String,
}

impl Default for Metadata {
    fn default() -> Self {
        Metadata {
            level: Level::Info,
            target: String::new(),
        }
    }
}

/// 日志记录
///
/// 文本载荷可能是未格式化的原始消息，也可能是已渲染的文本；
/// 过滤器替换文本时只改动记录的拷贝，原记录保持不变
#[derive(Clone)]
pub struct Record {
    pub metadata: Arc<Metadata>,
    pub text: String,
    pub timestamp: DateTime<Local>,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Record {
    /// 创建一条带当前时间戳的记录
    pub fn new<T: Into<String>, S: Into<String>>(level: Level, target: T, text: S) -> Self {
        Record {
            metadata: Arc::new(Metadata {
                level,
                target: target.into(),
            }),
            text: text.into(),
            timestamp: Local::now(),
            module_path: None,
            file: None,
            line: None,
        }
    }

    /// 生成一条替换了文本载荷的拷贝
    pub fn with_text<S: Into<String>>(&self, text: S) -> Record {
        let mut copy = self.clone();
        copy.text = text.into();
        copy
    }
}

/// 级别标签样式
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelStyle {
    pub error: String,
    pub warn: String,
    pub info: String,
    pub debug: String,
    pub trace: String,
}

impl LevelStyle {
    /// 获取指定级别的标签
    pub fn label(&self, level: Level) -> &str {
        match level {
            Level::Error => &self.error,
            Level::Warn => &self.warn,
            Level::Info => &self.info,
            Level::Debug => &self.debug,
            Level::Trace => &self.trace,
        }
    }
}

impl Default for LevelStyle {
    fn default() -> Self {
        Self {
            error: "ERROR".to_string(),
            warn: "WARN".to_string(),
            info: "INFO".to_string(),
            debug: "DEBUG".to_string(),
            trace: "TRACE".to_string(),
        }
    }
}

/// 格式配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatConfig {
    /// 时间戳格式（chrono格式串）
    pub timestamp_format: String,
    /// 级别标签样式
    pub level_style: LevelStyle,
    /// 格式模板，支持 {timestamp}、{level}、{target}、{file}、{line}、{message}
    pub format_template: String,
}

impl FormatConfig {
    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), String> {
        if self.format_template.is_empty() {
            return Err("配置错误: 格式模板不能为空".to_string());
        }
        if self.timestamp_format.is_empty() {
            return Err("配置错误: 时间戳格式不能为空".to_string());
        }
        Ok(())
    }
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
            level_style: LevelStyle::default(),
            format_template: "{timestamp} [{level}] {target} {file}:{line} - {message}".to_string(),
        }
    }
}

/// 颜色配置（ANSI转义序列）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorConfig {
    pub error: String,
    pub warn: String,
    pub info: String,
    pub debug: String,
    pub trace: String,
    pub timestamp: String,
    pub target: String,
    pub file: String,
    pub message: String,
}

impl ColorConfig {
    /// 获取指定级别的颜色
    pub fn level_color(&self, level: Level) -> &str {
        match level {
            Level::Error => &self.error,
            Level::Warn => &self.warn,
            Level::Info => &self.info,
            Level::Debug => &self.debug,
            Level::Trace => &self.trace,
        }
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            error: "\x1b[91m".to_string(),      // 亮红色
            warn: "\x1b[93m".to_string(),       // 亮黄色
            info: "\x1b[92m".to_string(),       // 亮绿色
            debug: "\x1b[96m".to_string(),      // 亮青色
            trace: "\x1b[95m".to_string(),      // 亮紫色
            timestamp: "\x1b[90m".to_string(),  // 深灰色
            target: "\x1b[94m".to_string(),     // 亮蓝色
            file: "\x1b[95m".to_string(),       // 亮紫色
            message: "\x1b[97m".to_string(),    // 亮白色
        }
    }
}

/// 文件日志配置
#[derive(Clone, Serialize, Deserialize)]
pub struct FileConfig {
    pub log_dir: PathBuf,
    pub file_name: String,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("./logs"),
            file_name: "app.log".to_string(),
        }
    }
}

/// 网络日志配置
#[derive(Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub server_addr: String,
    pub server_port: u16,
    pub auth_token: String,
    pub app_id: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            server_addr: "127.0.0.1".to_string(),
            server_port: 5140,
            auth_token: "default_token".to_string(),
            app_id: "default_app".to_string(),
        }
    }
}

/// 用于网络传输的日志记录
#[derive(Serialize, Deserialize)]
pub struct NetRecord {
    pub level: Level,
    pub target: String,
    pub message: String,
    pub module_path: Option<String>,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub timestamp: u64,
    pub auth_token: Option<String>,
    pub app_id: Option<String>,
}

impl bincode::Encode for NetRecord {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.level, encoder)?;
        bincode::Encode::encode(&self.target, encoder)?;
        bincode::Encode::encode(&self.message, encoder)?;
        bincode::Encode::encode(&self.module_path, encoder)?;
        bincode::Encode::encode(&self.file, encoder)?;
        bincode::Encode::encode(&self.line, encoder)?;
        bincode::Encode::encode(&self.timestamp, encoder)?;
        bincode::Encode::encode(&self.auth_token, encoder)?;
        bincode::Encode::encode(&self.app_id, encoder)?;
        Ok(())
    }
}

impl<Context> bincode::Decode<Context> for NetRecord {
    fn decode<D: bincode::de::Decoder<Context = Context>>(
        decoder: &mut D,
    ) -> Result<Self, bincode::error::DecodeError> {
        Ok(NetRecord {
            level: bincode::Decode::decode(decoder)?,
            target: bincode::Decode::decode(decoder)?,
            message: bincode::Decode::decode(decoder)?,
            module_path: bincode::Decode::decode(decoder)?,
            file: bincode::Decode::decode(decoder)?,
            line: bincode::Decode::decode(decoder)?,
            timestamp: bincode::Decode::decode(decoder)?,
            auth_token: bincode::Decode::decode(decoder)?,
            app_id: bincode::Decode::decode(decoder)?,
        })
    }
}

impl From<&Record> for NetRecord {
    fn from(record: &Record) -> Self {
        NetRecord {
            level: record.metadata.level,
            target: record.metadata.target.clone(),
            message: record.text.clone(),
            module_path: record.module_path.clone(),
            file: record.file.clone(),
            line: record.line,
            timestamp: record.timestamp.timestamp().max(0) as u64,
            auth_token: None,
            app_id: None,
        }
    }
}
