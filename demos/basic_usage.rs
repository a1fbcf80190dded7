//! 基础用法示例

use std::sync::Arc;

use rat_pipeline::{FormattingFilter, Level, PatternFormatter, Record, Sink, TermSink};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 格式化器负责渲染，输出端负责投递，过滤器把两者串起来
    let formatter = Arc::new(PatternFormatter::new());
    let sink = Arc::new(TermSink::new());
    let filter = FormattingFilter::with_formatter_and_sink(formatter, sink);

    filter.open()?;

    filter.log(&Record::new(Level::Info, "demo", "管道已就绪"))?;
    filter.log(&Record::new(Level::Warn, "demo", "这是一条警告"))?;
    filter.log(&Record::new(Level::Error, "demo", "这是一条错误"))?;

    filter.close()?;
    Ok(())
}
