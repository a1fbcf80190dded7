//! 命名实例注册表

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::PipelineError;
use crate::formatter::Formatter;
use crate::sink::Sink;

/// 命名实例注册表
///
/// 按名称解析共享的格式化器与输出端实例，供过滤器的配置协议使用。
/// 注册表通过 set_registry 注入过滤器，不依赖任何全局状态
pub struct Registry {
    formatters: DashMap<String, Arc<dyn Formatter>>,
    sinks: DashMap<String, Arc<dyn Sink>>,
}

impl Registry {
    /// 创建空注册表
    pub fn new() -> Self {
        Self {
            formatters: DashMap::new(),
            sinks: DashMap::new(),
        }
    }

    /// 注册格式化器，同名实例会被替换
    pub fn register_formatter<S: Into<String>>(&self, name: S, formatter: Arc<dyn Formatter>) {
        self.formatters.insert(name.into(), formatter);
    }

    /// 注册输出端，同名实例会被替换
    pub fn register_sink<S: Into<String>>(&self, name: S, sink: Arc<dyn Sink>) {
        self.sinks.insert(name.into(), sink);
    }

    /// 按名称解析格式化器
    pub fn formatter(&self, name: &str) -> Result<Arc<dyn Formatter>, PipelineError> {
        self.formatters
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PipelineError::Config(format!("未注册的格式化器: {}", name)))
    }

    /// 按名称解析输出端
    pub fn sink(&self, name: &str) -> Result<Arc<dyn Sink>, PipelineError> {
        self.sinks
            .get(name)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| PipelineError::Config(format!("未注册的输出端: {}", name)))
    }

    /// 移除格式化器，返回该名称此前是否存在
    pub fn unregister_formatter(&self, name: &str) -> bool {
        self.formatters.remove(name).is_some()
    }

    /// 移除输出端，返回该名称此前是否存在
    pub fn unregister_sink(&self, name: &str) -> bool {
        self.sinks.remove(name).is_some()
    }

    /// 清空注册表
    pub fn clear(&self) {
        self.formatters.clear();
        self.sinks.clear();
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::MemorySink;

    #[test]
    fn test_register_and_resolve_sink() {
        let registry = Registry::new();
        let sink: Arc<dyn Sink> = Arc::new(MemorySink::new());
        registry.register_sink("memory", Arc::clone(&sink));

        let resolved = registry.sink("memory").unwrap();
        assert!(Arc::ptr_eq(&resolved, &sink));
    }

    #[test]
    fn test_unregistered_name() {
        let registry = Registry::new();
        let result = registry.sink("missing");
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn test_unregister() {
        let registry = Registry::new();
        registry.register_sink("memory", Arc::new(MemorySink::new()));

        assert!(registry.unregister_sink("memory"));
        assert!(!registry.unregister_sink("memory"));
        assert!(registry.sink("memory").is_err());
    }

    #[test]
    fn test_clear() {
        let registry = Registry::new();
        registry.register_sink("memory", Arc::new(MemorySink::new()));
        let formatter: Arc<dyn crate::formatter::Formatter> =
            Arc::new(|record: &crate::config::Record| Ok::<String, PipelineError>(record.text.clone()));
        registry.register_formatter("plain", formatter);

        registry.clear();
        assert!(registry.sink("memory").is_err());
        assert!(registry.formatter("plain").is_err());
    }
}
