//! Web 服务器配置
//!
//! 使用类型安全的环境变量系统进行配置管理

use std::time::Duration;

use crate::env::{EnvError, EnvResult, EnvVar};

/// Web 服务器配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebConfig {
    /// 绑定地址
    pub bind_addr: String,
    /// 端口
    pub port: u16,
    /// 单个 HTTP 请求的最长处理时间
    pub request_timeout: Duration,
    /// 请求体大小上限（字节）
    pub body_limit: usize,
}

impl WebConfig {
    /// 从环境变量创建配置
    pub fn from_env() -> EnvResult<Self> {
        use crate::env::web;

        Ok(Self {
            bind_addr: web::BindAddress::get()?,
            port: web::Port::get()?,
            request_timeout: web::RequestTimeout::get()?,
            ..Self::default()
        })
    }

    /// 验证配置
    pub fn validate(&self) -> EnvResult<()> {
        if self.bind_addr.trim().is_empty() {
            return Err(EnvError {
                variable: "HTML_TRANSLATOR_BIND_ADDRESS".to_string(),
                message: "Bind address cannot be empty".to_string(),
            });
        }

        if self.port == 0 {
            return Err(EnvError {
                variable: "HTML_TRANSLATOR_PORT".to_string(),
                message: "Port cannot be 0".to_string(),
            });
        }

        Ok(())
    }

    /// 获取完整的监听地址
    pub fn listen_address(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1".to_string(),
            port: 8000,
            request_timeout: Duration::from_secs(120),
            body_limit: 10 * 1024 * 1024,
        }
    }
}
