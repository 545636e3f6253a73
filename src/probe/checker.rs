//! 网络探测器实现
//!
//! 提供端点探测功能：ICMP延迟探测与TCP/UDP端口可达性检测

use crate::config::{EndpointConfig, Protocol};
use crate::error::ProbeError;
use crate::probe::result::{PortCheckResult, ProbeResult};
use async_trait::async_trait;
use rand::random;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use surge_ping::{Client as PingClient, Config as PingConfig, PingIdentifier, PingSequence, ICMP};
use tokio::net::{TcpStream, UdpSocket};
use tokio::time::timeout;
use tracing::debug;

/// 端点探测器trait，定义探测接口
///
/// 探测过程中的所有失败均折叠进`ProbeResult`，不向调用方传播错误。
#[async_trait]
pub trait EndpointProber: Send + Sync {
    /// 对单个端点执行一次完整探测
    ///
    /// # 参数
    /// * `endpoint` - 端点配置
    ///
    /// # 返回
    /// * `ProbeResult` - 探测结果
    async fn probe(&self, endpoint: &EndpointConfig) -> ProbeResult;
}

/// 网络探测器实现
///
/// ICMP延迟探测与端口检测并发执行，二者都结束后才返回结果。
/// ICMPv4与ICMPv6各持有一个客户端，按目标地址族选用。
pub struct NetworkProber {
    /// ICMPv4客户端
    ping_v4: PingClient,
    /// ICMPv6客户端
    ping_v6: PingClient,
    /// 单次探测超时时间
    probe_timeout: Duration,
}

impl NetworkProber {
    /// 创建新的网络探测器
    ///
    /// # 参数
    /// * `probe_timeout` - 单次探测超时时间，同时作用于ICMP与端口检测
    ///
    /// # 返回
    /// * `Result<Self, ProbeError>` - 探测器实例
    pub fn new(probe_timeout: Duration) -> Result<Self, ProbeError> {
        let ping_v4 = PingClient::new(&PingConfig::default())
            .map_err(|e| ProbeError::IcmpInit(e.to_string()))?;
        let ping_v6 = PingClient::new(&PingConfig::builder().kind(ICMP::V6).build())
            .map_err(|e| ProbeError::IcmpInit(e.to_string()))?;

        Ok(Self {
            ping_v4,
            ping_v6,
            probe_timeout,
        })
    }

    /// 执行一次ICMP延迟探测
    ///
    /// 解析失败、超时或任何传输错误均返回None。
    async fn measure_latency(&self, address: &str) -> Option<Duration> {
        let ip = resolve_host(address).await?;

        let client = match ip {
            IpAddr::V4(_) => &self.ping_v4,
            IpAddr::V6(_) => &self.ping_v6,
        };

        let payload = [0u8; 56];
        let mut pinger = client.pinger(ip, PingIdentifier(random())).await;
        pinger.timeout(self.probe_timeout);

        match pinger.ping(PingSequence(0), &payload).await {
            Ok((_, latency)) => Some(latency),
            Err(e) => {
                debug!("ICMP探测失败 {}: {}", address, e);
                None
            }
        }
    }
}

#[async_trait]
impl EndpointProber for NetworkProber {
    async fn probe(&self, endpoint: &EndpointConfig) -> ProbeResult {
        debug!("开始探测端点: {}", endpoint.name);

        let latency_check = self.measure_latency(&endpoint.address);
        let port_check = async {
            match endpoint.protocol {
                Protocol::Tcp => {
                    check_tcp_port(&endpoint.address, endpoint.port, self.probe_timeout).await
                }
                Protocol::Udp => {
                    check_udp_port(&endpoint.address, endpoint.port, self.probe_timeout).await
                }
            }
        };

        let (latency, port) = tokio::join!(latency_check, port_check);

        ProbeResult::new(endpoint.name.clone(), latency, port)
    }
}

/// 解析目标地址为IP
///
/// IP字面量（含IPv6）直接解析，域名通过系统解析器查询，取第一个结果。
pub(crate) async fn resolve_host(address: &str) -> Option<IpAddr> {
    if let Ok(ip) = address.parse::<IpAddr>() {
        return Some(ip);
    }

    match tokio::net::lookup_host((address, 0)).await {
        Ok(mut addrs) => addrs.next().map(|addr| addr.ip()),
        Err(e) => {
            debug!("域名解析失败 {}: {}", address, e);
            None
        }
    }
}

/// 解析目标为套接字地址
///
/// 通过`SocketAddr`构造，IPv6字面量无需方括号拼接。
async fn resolve_target(address: &str, port: u16) -> Option<SocketAddr> {
    let ip = resolve_host(address).await?;
    Some(SocketAddr::new(ip, port))
}

/// TCP端口检测：在超时时间内尝试完成连接握手
async fn check_tcp_port(address: &str, port: u16, connect_timeout: Duration) -> PortCheckResult {
    let Some(addr) = resolve_target(address, port).await else {
        return PortCheckResult::Closed;
    };

    match timeout(connect_timeout, TcpStream::connect(addr)).await {
        Ok(Ok(_)) => PortCheckResult::Open,
        Ok(Err(e)) => {
            debug!("TCP连接失败 {}: {}", addr, e);
            PortCheckResult::Closed
        }
        Err(_) => {
            debug!("TCP连接超时: {}", addr);
            PortCheckResult::Closed
        }
    }
}

/// UDP端口检测：发送零长度数据报
///
/// UDP没有握手环节，发送成功只能得到`Unknown`的弱信号。
/// 整个检测包裹在超时内，发送调用不会无限挂起。
async fn check_udp_port(address: &str, port: u16, send_timeout: Duration) -> PortCheckResult {
    let Some(addr) = resolve_target(address, port).await else {
        return PortCheckResult::Closed;
    };

    // 本端套接字与目标地址族保持一致
    let bind_addr = if addr.is_ipv4() { "0.0.0.0:0" } else { "[::]:0" };

    let attempt = async {
        let socket = UdpSocket::bind(bind_addr).await?;
        socket.send_to(&[], addr).await?;
        std::io::Result::Ok(())
    };

    match timeout(send_timeout, attempt).await {
        Ok(Ok(())) => PortCheckResult::Unknown,
        Ok(Err(e)) => {
            debug!("UDP发送失败 {}: {}", addr, e);
            PortCheckResult::Closed
        }
        Err(_) => {
            debug!("UDP发送超时: {}", addr);
            PortCheckResult::Closed
        }
    }
}
