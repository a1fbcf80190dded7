//! rat_pipeline - 可组合日志管道
//!
//! 管道由格式化过滤器组成：过滤器把日志记录交给可插拔的格式化器
//! 渲染成文本，再转发给可插拔的下游输出端。格式化逻辑与投递逻辑
//! 因此彼此解耦。过滤器本身实现输出端接口，多个过滤器可以递归
//! 组成链，例如 格式化 → 按级别分流 → 同时写入文件与终端

pub mod config;
pub mod error;
pub mod filter;
pub mod formatter;
pub mod registry;
pub mod sink;
pub mod wire;

// 重新导出主要类型
pub use config::{
    ColorConfig, FileConfig, FormatConfig, Level, LevelFilter, LevelStyle, Metadata, NetRecord,
    NetworkConfig, Record,
};
pub use error::PipelineError;
pub use filter::FormattingFilter;
pub use formatter::{Formatter, PatternFormatter};
pub use registry::Registry;
pub use sink::{
    CompositeSink, FileSink, LevelSink, MemorySink, Sink, SinkType, TermSink, UdpSink,
};
