//! 日志输出端模块

use std::any::Any;

use crate::config::Record;
use crate::error::PipelineError;

/// 日志输出端 trait
///
/// 输出端接收文本已渲染完毕的日志记录并负责投递，
/// 带 open/close 生命周期。实例通过 Arc 共享，
/// 同一个输出端可以同时挂在多个过滤器上
pub trait Sink: Send + Sync + Any {
    /// 投递一条日志记录
    fn accept(&self, record: &Record) -> Result<(), PipelineError>;

    /// 准备投递资源
    fn open(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// 释放投递资源
    fn close(&self) -> Result<(), PipelineError> {
        Ok(())
    }

    /// 设置输出端专属配置项，无法识别的键返回配置错误
    fn set_config_option(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        let _ = value;
        Err(PipelineError::Config(format!("未知配置项: {}", name)))
    }

    /// 获取输出端类型
    fn sink_type(&self) -> SinkType;

    /// 类型安全的向下转型
    fn as_any(&self) -> &dyn Any;
}

/// 输出端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkType {
    Terminal,
    File,
    Udp,
    Composite,
    Level,
    Memory,
    Filter,
}

pub mod term;
pub mod file;
pub mod udp;
pub mod composite;
pub mod level;
pub mod memory;

pub use term::TermSink;
pub use file::FileSink;
pub use udp::UdpSink;
pub use composite::CompositeSink;
pub use level::LevelSink;
pub use memory::MemorySink;
