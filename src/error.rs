//! 错误类型模块

use std::fmt;
use std::io;

/// 管道错误
///
/// 过滤器本身不做恢复和重试，协作者产生的错误按原样向上传播
#[derive(Debug)]
pub enum PipelineError {
    /// 格式化器渲染失败
    Format(String),
    /// 输出端投递失败
    Io(io::Error),
    /// 配置错误（未知配置项或名称解析失败）
    Config(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Format(msg) => write!(f, "format error: {}", msg),
            PipelineError::Io(err) => write!(f, "io error: {}", err),
            PipelineError::Config(msg) => write!(f, "config error: {}", msg),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PipelineError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for PipelineError {
    fn from(err: io::Error) -> Self {
        PipelineError::Io(err)
    }
}
