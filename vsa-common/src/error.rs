//! 远程调用错误定义

use thiserror::Error;

use crate::fault::MethodFault;

/// 远程调用结果类型
pub type Result<T> = std::result::Result<T, VimError>;

/// 远程调用错误类型
#[derive(Error, Debug, Clone)]
pub enum VimError {
    /// 无法建立连接 / 传输层错误
    #[error("连接错误: {0}")]
    Connection(String),

    /// 认证失败或会话失效
    #[error("认证错误: {0}")]
    Auth(String),

    /// 服务端拒绝调用并返回故障
    #[error("服务端故障: {0}")]
    Fault(MethodFault),

    /// 非预期的 HTTP 状态
    #[error("API 错误 [{0}]: {1}")]
    Api(u16, String),

    /// 响应解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

impl VimError {
    /// 服务端故障（如果是）
    pub fn fault(&self) -> Option<&MethodFault> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }

    /// 是否为指定故障码的服务端故障
    pub fn is_fault(&self, code: &str) -> bool {
        self.fault().map_or(false, |f| f.is(code))
    }
}

impl From<MethodFault> for VimError {
    fn from(fault: MethodFault) -> Self {
        Self::Fault(fault)
    }
}
