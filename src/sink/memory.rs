//! 内存日志输出端

use std::any::Any;

use parking_lot::Mutex;

use crate::config::Record;
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};

/// 内存输出端
///
/// 把接收到的记录追加到内存序列，主要用于测试与调试
pub struct MemorySink {
    records: Mutex<Vec<Record>>,
}

impl MemorySink {
    /// 创建新的内存输出端
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    /// 读取当前已接收的全部记录
    pub fn records(&self) -> Vec<Record> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }

    /// 清空已接收的记录
    pub fn clear(&self) {
        self.records.lock().clear();
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for MemorySink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Memory
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
