//! 级别过滤输出端

use std::any::Any;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::config::{LevelFilter, Record};
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};

/// 级别过滤输出端
///
/// 只把达到阈值的记录转发给内部输出端，其余静默丢弃。
/// 配置项 "level" 在运行时更新阈值，其他配置项透传给内部输出端
pub struct LevelSink {
    threshold: AtomicUsize,
    inner: Arc<dyn Sink>,
}

impl LevelSink {
    /// 创建新的级别过滤输出端
    pub fn new(threshold: LevelFilter, inner: Arc<dyn Sink>) -> Self {
        Self {
            threshold: AtomicUsize::new(threshold as usize),
            inner,
        }
    }

    /// 更新级别阈值
    pub fn set_threshold(&self, threshold: LevelFilter) {
        self.threshold.store(threshold as usize, Ordering::Relaxed);
    }

    /// 当前级别阈值
    pub fn threshold(&self) -> LevelFilter {
        LevelFilter::from_usize(self.threshold.load(Ordering::Relaxed))
    }

    /// 检查是否应该转发该记录
    pub fn should_forward(&self, record: &Record) -> bool {
        (record.metadata.level.to_level_filter() as usize) <= self.threshold.load(Ordering::Relaxed)
    }
}

impl Sink for LevelSink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        if self.should_forward(record) {
            self.inner.accept(record)
        } else {
            Ok(())
        }
    }

    fn open(&self) -> Result<(), PipelineError> {
        self.inner.open()
    }

    fn close(&self) -> Result<(), PipelineError> {
        self.inner.close()
    }

    fn set_config_option(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        match name {
            "level" => {
                let threshold: LevelFilter = value.parse().map_err(PipelineError::Config)?;
                self.set_threshold(threshold);
                Ok(())
            }
            _ => self.inner.set_config_option(name, value),
        }
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Level
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
