//! UDP日志输出端 - 后台工作线程投递

use std::any::Any;
use std::io;
use std::thread::{self, JoinHandle};

use crossbeam_channel::{Receiver, Sender, unbounded};
use parking_lot::Mutex;
use tokio::net::UdpSocket;
use tokio::runtime::Runtime;

use crate::config::{NetworkConfig, Record};
use crate::error::PipelineError;
use crate::sink::{Sink, SinkType};
use crate::wire::PacketCodec;

/// UDP指令枚举
enum UdpCommand {
    /// 发送日志数据
    Send(Vec<u8>),
    /// 停止工作线程
    Shutdown,
}

/// UDP日志输出端
///
/// open() 同步建立套接字，套接字错误直接返回给调用方；
/// 之后实际发送由工作线程串行完成，accept 只负责编码并入队。
/// 输出端未打开时 accept 返回错误
pub struct UdpSink {
    config: NetworkConfig,
    sender: Mutex<Option<Sender<UdpCommand>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl UdpSink {
    /// 创建新的UDP输出端
    pub fn new(config: NetworkConfig) -> Self {
        Self {
            config,
            sender: Mutex::new(None),
            worker: Mutex::new(None),
        }
    }
}

impl Sink for UdpSink {
    fn accept(&self, record: &Record) -> Result<(), PipelineError> {
        let sender = self.sender.lock();
        match sender.as_ref() {
            Some(tx) => {
                let data = PacketCodec::encode_record(
                    record,
                    Some(self.config.auth_token.clone()),
                    Some(self.config.app_id.clone()),
                )?;
                tx.send(UdpCommand::Send(data)).map_err(|_| {
                    PipelineError::Io(io::Error::new(io::ErrorKind::BrokenPipe, "UDP工作线程已退出"))
                })
            }
            None => Err(PipelineError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "UDP输出端尚未打开",
            ))),
        }
    }

    fn open(&self) -> Result<(), PipelineError> {
        let mut sender = self.sender.lock();
        if sender.is_some() {
            return Ok(());
        }

        let runtime = Runtime::new()?;
        let addr = format!("{}:{}", self.config.server_addr, self.config.server_port);
        let socket = runtime.block_on(async {
            let socket = UdpSocket::bind("0.0.0.0:0").await?;
            socket.connect(&addr).await?;
            Ok::<UdpSocket, io::Error>(socket)
        })?;

        let (tx, rx) = unbounded();
        let handle = thread::Builder::new()
            .name("rat-pipeline-udp".to_string())
            .spawn(move || udp_worker(runtime, socket, rx))?;

        *sender = Some(tx);
        *self.worker.lock() = Some(handle);
        Ok(())
    }

    fn close(&self) -> Result<(), PipelineError> {
        if let Some(tx) = self.sender.lock().take() {
            let _ = tx.send(UdpCommand::Shutdown);
        }
        if let Some(handle) = self.worker.lock().take() {
            let _ = handle.join();
        }
        Ok(())
    }

    fn sink_type(&self) -> SinkType {
        SinkType::Udp
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for UdpSink {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// 工作线程主循环：串行消费指令并通过套接字发送
fn udp_worker(runtime: Runtime, socket: UdpSocket, rx: Receiver<UdpCommand>) {
    for command in rx {
        match command {
            UdpCommand::Send(data) => {
                if let Err(e) = runtime.block_on(socket.send(&data)) {
                    eprintln!("UDP日志发送失败: {}", e);
                }
            }
            UdpCommand::Shutdown => break,
        }
    }
}
