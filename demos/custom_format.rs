//! 自定义格式示例

use std::sync::Arc;

use rat_pipeline::{
    ColorConfig, FormatConfig, Formatter, FormattingFilter, Level, LevelStyle, PatternFormatter,
    PipelineError, Record, TermSink,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== rat_pipeline 自定义格式示例 ===\n");

    // 1. 简洁格式配置
    let simple_format = FormatConfig {
        timestamp_format: "%H:%M:%S".to_string(),
        level_style: LevelStyle {
            error: "E".to_string(),
            warn: "W".to_string(),
            info: "I".to_string(),
            debug: "D".to_string(),
            trace: "T".to_string(),
        },
        format_template: "{level} {timestamp} {message}".to_string(),
    };

    let filter = FormattingFilter::with_formatter_and_sink(
        Arc::new(PatternFormatter::with_config(simple_format)),
        Arc::new(TermSink::new()),
    );
    filter.log(&Record::new(Level::Info, "demo", "简洁格式日志"))?;

    // 2. 详细格式 + 颜色
    let detailed_format = FormatConfig {
        timestamp_format: "%Y-%m-%d %H:%M:%S%.3f".to_string(),
        level_style: LevelStyle::default(),
        format_template: "[{level}] {timestamp} {target}:{line} - {message}".to_string(),
    };
    let colored = PatternFormatter::with_config(detailed_format).with_color(ColorConfig::default());
    filter.set_formatter(Some(Arc::new(colored)));

    filter.log(&Record::new(Level::Error, "demo", "彩色错误日志"))?;
    filter.log(&Record::new(Level::Debug, "demo", "彩色调试日志"))?;

    // 3. 闭包直接作为格式化器
    let closure: Arc<dyn Formatter> = Arc::new(|record: &Record| {
        Ok::<String, PipelineError>(format!(">> {} | {}", record.metadata.level, record.text))
    });
    filter.set_formatter(Some(closure));

    filter.log(&Record::new(Level::Info, "demo", "闭包渲染的日志"))?;
    Ok(())
}
