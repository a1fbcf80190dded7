//! 管道链示例：格式化 → 按级别分流 → 同时写入文件与终端

use std::sync::Arc;

use rat_pipeline::{
    CompositeSink, FileConfig, FileSink, FormattingFilter, Level, LevelFilter, LevelSink,
    PatternFormatter, Record, Registry, Sink, TermSink,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rat_pipeline 管道链示例 ===\n");

    // 终端收到全部记录，文件只收 Warn 及以上
    let term: Arc<dyn Sink> = Arc::new(TermSink::new());
    let file = Arc::new(FileSink::new(FileConfig::default()));

    let mut split = CompositeSink::new();
    split.add_sink(term);
    split.add_sink(Arc::new(LevelSink::new(LevelFilter::Warn, file)));

    let filter = Arc::new(FormattingFilter::with_formatter_and_sink(
        Arc::new(PatternFormatter::new()),
        Arc::new(split),
    ));

    filter.open()?;
    filter.log(&Record::new(Level::Info, "chain", "只进终端"))?;
    filter.log(&Record::new(Level::Error, "chain", "终端和文件都有"))?;
    filter.close()?;

    // 通过注册表按名称重新接线
    let registry = Arc::new(Registry::new());
    registry.register_sink("term", Arc::new(TermSink::new()));

    let rewired = FormattingFilter::new();
    rewired.set_registry(Some(registry));
    rewired.set_config_option("sink", "term")?;
    rewired.log(&Record::new(Level::Info, "chain", "注册表接线完成"))?;

    Ok(())
}
