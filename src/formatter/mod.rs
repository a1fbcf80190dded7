//! 格式化器模块

use crate::config::Record;
use crate::error::PipelineError;

/// 格式化器 trait
///
/// 把结构化的日志记录渲染为文本。实例通过 Arc 共享，
/// 同一个格式化器可以同时挂在多个过滤器上
pub trait Formatter: Send + Sync {
    /// 将日志记录渲染为文本
    fn format(&self, record: &Record) -> Result<String, PipelineError>;
}

/// 闭包可以直接作为格式化器使用
impl<F> Formatter for F
where
    F: Fn(&Record) -> Result<String, PipelineError> + Send + Sync,
{
    fn format(&self, record: &Record) -> Result<String, PipelineError> {
        self(record)
    }
}

pub mod pattern;

pub use pattern::PatternFormatter;
