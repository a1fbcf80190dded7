//! 格式化过滤器 - 管道的核心组件

use std::any::Any;
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use parking_lot::RwLock;

use crate::config::Record;
use crate::error::PipelineError;
use crate::formatter::Formatter;
use crate::registry::Registry;
use crate::sink::{Sink, SinkType};

/// 格式化过滤器
///
/// 把日志记录交给可选的格式化器渲染，再转发给可选的下游输出端，
/// 渲染逻辑与投递逻辑因此彼此解耦。两个协作者都是可空的共享引用，
/// 任意时刻可以独立替换；两个槽位各自持锁，并发重配置时一次 log
/// 可能观察到新旧搭配，需要原子重配置的调用方应在外部自行串行化。
///
/// 过滤器本身实现 Sink，下游输出端可以是另一个过滤器，
/// 从而递归组成链（例如 格式化 → 按级别分流 → 写入文件与终端）
pub struct FormattingFilter {
    formatter: RwLock<Option<Arc<dyn Formatter>>>,
    sink: RwLock<Option<Arc<dyn Sink>>>,
    registry: ArcSwapOption<Registry>,
}

impl FormattingFilter {
    /// 创建未附加任何协作者的过滤器
    pub fn new() -> Self {
        Self {
            formatter: RwLock::new(None),
            sink: RwLock::new(None),
            registry: ArcSwapOption::new(None),
        }
    }

    /// 创建附加了格式化器的过滤器
    pub fn with_formatter(formatter: Arc<dyn Formatter>) -> Self {
        let filter = Self::new();
        filter.set_formatter(Some(formatter));
        filter
    }

    /// 创建附加了格式化器与输出端的过滤器
    pub fn with_formatter_and_sink(formatter: Arc<dyn Formatter>, sink: Arc<dyn Sink>) -> Self {
        let filter = Self::with_formatter(formatter);
        filter.set_sink(Some(sink));
        filter
    }

    /// 替换格式化器引用，传入 None 表示清除
    ///
    /// 对之后的 log 调用生效，不影响其他线程已经开始的调用
    pub fn set_formatter(&self, formatter: Option<Arc<dyn Formatter>>) {
        *self.formatter.write() = formatter;
    }

    /// 当前格式化器引用
    pub fn formatter(&self) -> Option<Arc<dyn Formatter>> {
        self.formatter.read().clone()
    }

    /// 替换输出端引用，传入 None 表示清除
    ///
    /// 生效时机与 set_formatter 相同
    pub fn set_sink(&self, sink: Option<Arc<dyn Sink>>) {
        *self.sink.write() = sink;
    }

    /// 当前输出端引用
    pub fn sink(&self) -> Option<Arc<dyn Sink>> {
        self.sink.read().clone()
    }

    /// 注入命名实例注册表，set_config_option 按名称解析实例时使用
    pub fn set_registry(&self, registry: Option<Arc<Registry>>) {
        self.registry.store(registry);
    }

    /// 当前注册表引用
    pub fn registry(&self) -> Option<Arc<Registry>> {
        self.registry.load_full()
    }

    /// 处理一条日志记录
    ///
    /// 附加了格式化器时先渲染，渲染结果写进记录的拷贝，
    /// 调用方的原记录不会被改动；之后把记录转发给输出端，
    /// 至多转发一次。没有输出端时该调用是空操作。
    /// 协作者产生的错误原样向上传播，调用失败不会改变槽位状态
    pub fn log(&self, record: &Record) -> Result<(), PipelineError> {
        let formatter = self.formatter.read().clone();
        match formatter {
            Some(formatter) => {
                let text = formatter.format(record)?;
                self.forward(&record.with_text(text))
            }
            None => self.forward(record),
        }
    }

    fn forward(&self, record: &Record) -> Result<(), PipelineError> {
        let sink = self.sink.read().clone();
        match sink {
            Some(sink) => sink.accept(record),
            None => Ok(()),
        }
    }

    fn resolve_registry(&self) -> Result<Arc<Registry>, PipelineError> {
        self.registry
            .load_full()
            .ok_or_else(|| PipelineError::Config("未附加注册表，无法按名称解析实例".to_string()))
    }
}

impl Default for FormattingFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for FormattingFilter {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        self.log(record)
    }

    /// 打开下游输出端，未附加时为空操作
    fn open(&self) -> Result<(), PipelineError> {
        match self.sink() {
            Some(sink) => sink.open(),
            None => Ok(()),
        }
    }

    /// 关闭下游输出端，未附加时为空操作
    fn close(&self) -> Result<(), PipelineError> {
        match self.sink() {
            Some(sink) => sink.close(),
            None => Ok(()),
        }
    }

    /// "sink" 与 "formatter" 两个键通过注册表解析实例并替换对应槽位，
    /// 只写不读（读取用 formatter()/sink()）；解析失败时原槽位保持不变。
    /// 其余键透传给已附加的输出端，没有输出端时是配置错误
    fn set_config_option(&self, name: &str, value: &str) -> Result<(), PipelineError> {
        match name {
            "sink" => {
                let sink = self.resolve_registry()?.sink(value)?;
                self.set_sink(Some(sink));
                Ok(())
            }
            "formatter" => {
                let formatter = self.resolve_registry()?.formatter(value)?;
                self.set_formatter(Some(formatter));
                Ok(())
            }
            _ => match self.sink() {
                Some(sink) => sink.set_config_option(name, value),
                None => Err(PipelineError::Config(format!("未知配置项: {}", name))),
            },
        }
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Filter
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
