//! 文件日志输出端

use std::any::Any;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;

use crate::config::{FileConfig, Record};
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};

/// 文件日志输出端
///
/// open() 创建日志目录并以追加模式打开文件；
/// accept 在尚未打开时会自动打开。配置项 "flush" 控制是否逐条刷盘
pub struct FileSink {
    config: FileConfig,
    writer: Mutex<Option<BufWriter<File>>>,
    flush_each: AtomicBool,
}

impl FileSink {
    /// 创建新的文件输出端
    pub fn new(config: FileConfig) -> Self {
        Self {
            config,
            writer: Mutex::new(None),
            flush_each: AtomicBool::new(true),
        }
    }

    fn open_writer(&self) -> Result<BufWriter<File>, PipelineError> {
        fs::create_dir_all(&self.config.log_dir)?;
        let path = self.config.log_dir.join(&self.config.file_name);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(BufWriter::new(file))
    }
}

impl Sink for FileSink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        let mut writer = self.writer.lock();
        if writer.is_none() {
            *writer = Some(self.open_writer()?);
        }
        if let Some(w) = writer.as_mut() {
            writeln!(w, "{}", record.text)?;
            if self.flush_each.load(Ordering::Relaxed) {
                w.flush()?;
            }
        }
        Ok(())
    }

    fn open(&self) -> Result<(), PipelineError> {
        let mut writer = self.writer.lock();
        if writer.is_none() {
            *writer = Some(self.open_writer()?);
        }
        Ok(())
    }

    fn close(&self) -> Result<(), PipelineError> {
        if let Some(mut w) = self.writer.lock().take() {
            w.flush()?;
        }
        Ok(())
    }

    fn set_config_option(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        match name {
            "flush" => match value.parse::<bool>() {
                Ok(v) => {
                    self.flush_each.store(v, Ordering::Relaxed);
                    Ok(())
                }
                Err(_) => Err(PipelineError::Config(format!("无效的布尔值: {}", value))),
            },
            _ => Err(PipelineError::Config(format!("未知配置项: {}", name))),
        }
    }

    fn sink_type(&self) -> SinkType {
        SinkType::File
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
