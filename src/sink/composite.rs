//! 组合日志输出端

use std::any::Any;
use std::sync::Arc;

use rayon::prelude::*;

use crate::config::Record;
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};

/// 组合多个输出端的实现
///
/// 顺序模式下首个错误中止剩余投递并向上传播；
/// 并行模式下同样返回首个错误，但其余子输出端可能已经执行
pub struct CompositeSink {
    sinks: Vec<Arc<dyn Sink>>,
    parallel: bool,
}

impl CompositeSink {
    /// 创建新的组合输出端
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            parallel: false,
        }
    }

    /// 启用并行投递
    pub fn with_parallel(mut self) -> Self {
        self.parallel = true;
        self
    }

    /// 添加输出端
    pub fn add_sink(&mut self, sink: Arc<dyn Sink>) {
        self.sinks.push(sink);
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }
}

impl Default for CompositeSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for CompositeSink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        if self.parallel {
            self.sinks.par_iter().try_for_each(|sink| sink.accept(record))
        } else {
            for sink in &self.sinks {
                sink.accept(record)?;
            }
            Ok(())
        }
    }

    fn open(&self) -> Result<(), PipelineError> {
        for sink in &self.sinks {
            sink.open()?;
        }
        Ok(())
    }

    fn close(&self) -> Result<(), PipelineError> {
        for sink in &self.sinks {
            sink.close()?;
        }
        Ok(())
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Composite
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
