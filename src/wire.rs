//! UDP封包解包辅助工具

use std::io;
use std::sync::Arc;

use chrono::Local;

use crate::config::{Level, Metadata, NetRecord, Record};
use crate::error::PipelineError;

/// UDP封包解包工具
pub struct PacketCodec;

impl PacketCodec {
    /// 将Record编码为UDP数据包
    pub fn encode_record(
        record: &Record,
        auth_token: Option<String>,
        app_id: Option<String>,
    ) -> Result<Vec<u8>, PipelineError> {
        let mut net_record = NetRecord::from(record);
        net_record.auth_token = auth_token;
        net_record.app_id = app_id;

        bincode::encode_to_vec(&net_record, bincode::config::standard())
            .map_err(|e| PipelineError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// 将UDP数据包解码为NetRecord
    pub fn decode_packet(data: &[u8]) -> Result<NetRecord, PipelineError> {
        bincode::decode_from_slice(data, bincode::config::standard())
            .map(|(record, _)| record)
            .map_err(|e| PipelineError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// 将NetRecord转换为Record
    pub fn net_record_to_record(net_record: &NetRecord) -> Record {
        let metadata = Metadata {
            level: net_record.level,
            target: net_record.target.clone(),
        };

        Record {
            metadata: Arc::new(metadata),
            text: net_record.message.clone(),
            timestamp: chrono::DateTime::from_timestamp(net_record.timestamp as i64, 0)
                .map(|utc| utc.with_timezone(&Local))
                .unwrap_or_else(Local::now),
            module_path: net_record.module_path.clone(),
            file: net_record.file.clone(),
            line: net_record.line,
        }
    }

    /// 验证UDP数据包的有效性
    pub fn validate_packet(data: &[u8]) -> bool {
        Self::decode_packet(data).is_ok()
    }

    /// 读取数据包的元数据
    pub fn packet_metadata(data: &[u8]) -> Option<PacketMetadata> {
        match Self::decode_packet(data) {
            Ok(net_record) => Some(PacketMetadata {
                level: net_record.level,
                target: net_record.target,
                app_id: net_record.app_id,
                timestamp: net_record.timestamp,
                message_length: net_record.message.len(),
            }),
            Err(_) => None,
        }
    }
}

/// UDP数据包的元数据信息
#[derive(Debug, Clone)]
pub struct PacketMetadata {
    pub level: Level,
    pub target: String,
    pub app_id: Option<String>,
    pub timestamp: u64,
    pub message_length: usize,
}

impl PacketMetadata {
    /// 检查数据包是否来自指定的应用
    pub fn is_from_app(&self, app_id: &str) -> bool {
        self.app_id.as_deref() == Some(app_id)
    }

    /// 获取数据包的年龄（秒）
    pub fn age_seconds(&self) -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
            .saturating_sub(self.timestamp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let mut record = Record::new(Level::Info, "test", "test message");
        record.module_path = Some("test::module".to_string());
        record.file = Some("test.rs".to_string());
        record.line = Some(42);

        let encoded =
            PacketCodec::encode_record(&record, Some("token".to_string()), Some("app".to_string()))
                .unwrap();
        let decoded = PacketCodec::decode_packet(&encoded).unwrap();
        let restored = PacketCodec::net_record_to_record(&decoded);

        assert_eq!(restored.metadata.level, record.metadata.level);
        assert_eq!(restored.metadata.target, record.metadata.target);
        assert_eq!(restored.text, record.text);
        assert_eq!(restored.module_path, record.module_path);
        assert_eq!(restored.line, record.line);
    }

    #[test]
    fn test_packet_metadata() {
        let record = Record::new(Level::Error, "test", "error message");

        let encoded =
            PacketCodec::encode_record(&record, None, Some("my_app".to_string())).unwrap();
        let metadata = PacketCodec::packet_metadata(&encoded).unwrap();

        assert_eq!(metadata.level, Level::Error);
        assert_eq!(metadata.target, "test");
        assert_eq!(metadata.app_id, Some("my_app".to_string()));
        assert_eq!(metadata.message_length, "error message".len());
        assert!(metadata.is_from_app("my_app"));
        assert!(!metadata.is_from_app("other_app"));
        assert!(metadata.level.should_log_at_level(Level::Error)); // Error日志在Error级别下应该发送
        assert!(metadata.level.should_log_at_level(Level::Trace)); // Error日志在Trace级别下应该发送
    }

    #[test]
    fn test_invalid_packet() {
        assert!(!PacketCodec::validate_packet(b"not a packet"));
        assert!(PacketCodec::packet_metadata(b"not a packet").is_none());
    }
}
