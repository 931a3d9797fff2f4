//! VSA 通用类型定义
//!
//! 此 crate 包含 inventory / task / vimclient / executor 之间共享的类型：
//! - [`MoRef`]: vSphere 托管对象引用（服务端对象的不透明句柄）
//! - [`MethodFault`]: 服务端上报的结构化故障（故障码 + 消息）
//! - [`VimError`]: 远程调用错误

mod error;
mod fault;
mod moref;

pub use error::{Result, VimError};
pub use fault::MethodFault;
pub use moref::MoRef;
