//! 格式化过滤器测试
//! 覆盖协作者缺失、渲染转发、引用替换与错误传播

use std::any::Any;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rat_pipeline::{
    FormattingFilter, Formatter, Level, MemorySink, PipelineError, Record, Sink, SinkType,
};

/// 统计调用次数并把文本转为大写的格式化器
struct UppercaseFormatter {
    calls: AtomicUsize,
}

impl UppercaseFormatter {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Formatter for UppercaseFormatter {
    fn format(&self, record: &Record) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(record.text.to_uppercase())
    }
}

/// 始终渲染失败的格式化器
struct FailingFormatter;

impl Formatter for FailingFormatter {
    fn format(&self, _record: &Record) -> Result<String, PipelineError> {
        Err(PipelineError::Format("渲染失败".to_string()))
    }
}

/// 始终投递失败的输出端
struct FailingSink;

impl Sink for FailingSink {
    fn accept(&self, _record: &Record) -> Result<(), PipelineError> {
        Err(PipelineError::Io(io::Error::new(
            io::ErrorKind::Other,
            "投递失败",
        )))
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Memory
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// 统计生命周期调用的输出端
struct TrackingSink {
    opens: AtomicUsize,
    closes: AtomicUsize,
}

impl TrackingSink {
    fn new() -> Self {
        Self {
            opens: AtomicUsize::new(0),
            closes: AtomicUsize::new(0),
        }
    }
}

impl Sink for TrackingSink {
    fn accept(&self, _record: &Record) -> Result<(), PipelineError> {
        Ok(())
    }

    fn open(&self) -> Result<(), PipelineError> {
        self.opens.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn close(&self) -> Result<(), PipelineError> {
        self.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Memory
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[test]
fn test_log_without_collaborators() {
    println!("=== 无协作者测试 ===");

    let filter = FormattingFilter::new();
    assert!(filter.formatter().is_none());
    assert!(filter.sink().is_none());

    // 无格式化器、无输出端时 log 是空操作
    filter.log(&Record::new(Level::Info, "test", "无人接收")).unwrap();
}

#[test]
fn test_formatter_only_renders_once() {
    println!("=== 仅格式化器测试 ===");

    let formatter = Arc::new(UppercaseFormatter::new());
    let filter = FormattingFilter::with_formatter(formatter.clone());

    filter.log(&Record::new(Level::Info, "test", "hi")).unwrap();

    // 渲染恰好一次，且没有输出端可转发
    assert_eq!(formatter.calls(), 1);
}

#[test]
fn test_format_and_forward() {
    println!("=== 渲染转发测试 ===");

    let formatter = Arc::new(UppercaseFormatter::new());
    let memory = Arc::new(MemorySink::new());
    let filter = FormattingFilter::with_formatter_and_sink(formatter.clone(), memory.clone());

    let record = Record::new(Level::Info, "app", "hi");
    filter.log(&record).unwrap();

    assert_eq!(formatter.calls(), 1);
    let received = memory.records();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].text, "HI");
    assert_eq!(received[0].metadata.level, Level::Info);
    assert_eq!(received[0].metadata.target, "app");
    assert_eq!(received[0].timestamp, record.timestamp);

    // 调用方的原记录保持不变
    assert_eq!(record.text, "hi");
}

#[test]
fn test_passthrough_without_formatter() {
    println!("=== 无格式化器透传测试 ===");

    let memory = Arc::new(MemorySink::new());
    let filter = FormattingFilter::new();
    filter.set_sink(Some(memory.clone()));

    filter.log(&Record::new(Level::Debug, "raw", "原样转发")).unwrap();

    let received = memory.records();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].text, "原样转发");
}

#[test]
fn test_getters_idempotent() {
    println!("=== 读取稳定性测试 ===");

    let formatter: Arc<dyn Formatter> = Arc::new(UppercaseFormatter::new());
    let sink: Arc<dyn Sink> = Arc::new(MemorySink::new());
    let filter = FormattingFilter::new();
    filter.set_formatter(Some(formatter.clone()));
    filter.set_sink(Some(sink.clone()));

    // 没有中间写入时，任意次读取返回同一引用
    for _ in 0..3 {
        let f = filter.formatter().unwrap();
        assert!(Arc::ptr_eq(&f, &formatter));
        let s = filter.sink().unwrap();
        assert!(Arc::ptr_eq(&s, &sink));
    }
}

#[test]
fn test_formatter_replacement() {
    println!("=== 格式化器替换测试 ===");

    let memory = Arc::new(MemorySink::new());
    let first = Arc::new(UppercaseFormatter::new());
    let filter = FormattingFilter::with_formatter_and_sink(first.clone(), memory.clone());

    let second: Arc<dyn Formatter> =
        Arc::new(|record: &Record| Ok::<String, PipelineError>(format!("2:{}", record.text)));
    filter.set_formatter(Some(second));

    filter.log(&Record::new(Level::Info, "test", "msg")).unwrap();

    // 替换后旧格式化器不再被调用
    assert_eq!(first.calls(), 0);
    assert_eq!(memory.records()[0].text, "2:msg");
}

#[test]
fn test_clear_collaborators() {
    println!("=== 清除协作者测试 ===");

    let memory = Arc::new(MemorySink::new());
    let filter = FormattingFilter::with_formatter_and_sink(
        Arc::new(UppercaseFormatter::new()),
        memory.clone(),
    );

    filter.set_formatter(None);
    filter.set_sink(None);

    assert!(filter.formatter().is_none());
    assert!(filter.sink().is_none());

    filter.log(&Record::new(Level::Info, "test", "无人接收")).unwrap();
    assert!(memory.is_empty());
}

#[test]
fn test_formatter_error_propagates() {
    println!("=== 渲染错误传播测试 ===");

    let memory = Arc::new(MemorySink::new());
    let filter =
        FormattingFilter::with_formatter_and_sink(Arc::new(FailingFormatter), memory.clone());

    let result = filter.log(&Record::new(Level::Info, "test", "msg"));
    assert!(matches!(result, Err(PipelineError::Format(_))));

    // 渲染失败时不转发，槽位也保持原状
    assert!(memory.is_empty());
    assert!(filter.formatter().is_some());
    assert!(filter.sink().is_some());

    // 之后的独立调用不受影响
    filter.set_formatter(None);
    filter.log(&Record::new(Level::Info, "test", "第二条")).unwrap();
    assert_eq!(memory.len(), 1);
}

#[test]
fn test_sink_error_propagates() {
    println!("=== 投递错误传播测试 ===");

    let filter = FormattingFilter::new();
    filter.set_sink(Some(Arc::new(FailingSink)));

    let result = filter.log(&Record::new(Level::Info, "test", "msg"));
    assert!(matches!(result, Err(PipelineError::Io(_))));
}

#[test]
fn test_open_close_without_sink() {
    println!("=== 无输出端生命周期测试 ===");

    let filter = FormattingFilter::new();
    filter.open().unwrap();
    filter.close().unwrap();
}

#[test]
fn test_open_close_delegate() {
    println!("=== 生命周期委托测试 ===");

    let tracking = Arc::new(TrackingSink::new());
    let filter = FormattingFilter::new();
    filter.set_sink(Some(tracking.clone()));

    filter.open().unwrap();
    filter.close().unwrap();

    assert_eq!(tracking.opens.load(Ordering::SeqCst), 1);
    assert_eq!(tracking.closes.load(Ordering::SeqCst), 1);
}
