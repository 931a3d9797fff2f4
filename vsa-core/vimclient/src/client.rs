//! vSphere 客户端核心实现

use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, Method, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use url::Url;
use vsa_common::{MethodFault, MoRef, Result, VimError};

use crate::api::{
    DatastoreApi, FileManagerApi, InventoryObjectApi, PropertyApi, TaskInfoApi, ViewApi, VmApi,
};
use crate::models::ServiceContent;

/// 会话令牌请求头
pub const SESSION_HEADER: &str = "vmware-api-session-id";

/// vSphere 客户端配置
#[derive(Debug, Clone)]
pub struct VimConfig {
    /// 连接超时（秒）
    pub connect_timeout: u64,

    /// 请求超时（秒）
    pub request_timeout: u64,

    /// 是否验证 SSL 证书
    pub verify_ssl: bool,

    /// VI/JSON API 版本
    pub api_release: String,
}

impl Default for VimConfig {
    fn default() -> Self {
        Self {
            connect_timeout: 10,
            request_timeout: 60,
            verify_ssl: true,
            api_release: "8.0.1.0".to_string(),
        }
    }
}

/// vSphere 客户端
pub struct VimClient {
    /// API 基础 URL (`.../sdk/vim25/{release}/`)
    base_url: Url,

    /// HTTP 客户端
    http_client: Client,

    /// 会话令牌
    session_id: Arc<RwLock<Option<String>>>,

    /// 登录时读取的服务实例内容
    content: Option<ServiceContent>,

    /// 配置
    config: VimConfig,
}

impl VimClient {
    /// 创建连接 `https://host:port` 的客户端（尚未登录）
    pub fn new(host: &str, port: u16, config: VimConfig) -> Result<Self> {
        let endpoint = Url::parse(&format!("https://{}:{}/", host, port))
            .map_err(|e| VimError::Config(format!("无效的主机地址 {}: {}", host, e)))?;
        Self::with_endpoint(endpoint, config)
    }

    /// 使用完整的服务端地址创建客户端（如反向代理后的 `http://...`）
    pub fn with_endpoint(endpoint: Url, config: VimConfig) -> Result<Self> {
        let base_url = endpoint
            .join(&format!("sdk/vim25/{}/", config.api_release))
            .map_err(|e| VimError::Config(format!("无效的 API 地址: {}", e)))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout))
            .connect_timeout(Duration::from_secs(config.connect_timeout))
            .danger_accept_invalid_certs(!config.verify_ssl)
            .build()
            .map_err(|e| VimError::Connection(e.to_string()))?;

        Ok(Self {
            base_url,
            http_client,
            session_id: Arc::new(RwLock::new(None)),
            content: None,
            config,
        })
    }

    /// API 基础 URL
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn config(&self) -> &VimConfig {
        &self.config
    }

    /// 是否持有会话
    pub async fn is_connected(&self) -> bool {
        self.session_id.read().await.is_some()
    }

    // ============================================
    // 会话管理
    // ============================================

    /// 读取服务实例内容（无需登录）
    pub async fn retrieve_service_content(&self) -> Result<ServiceContent> {
        let instance = MoRef::new("ServiceInstance", "ServiceInstance");
        let url = self.endpoint(&instance, "content")?;
        let response = self.send(Method::GET, url, None::<&()>, false).await?;
        Self::parse_response(response).await
    }

    /// 认证登录
    ///
    /// # Arguments
    /// * `username` - 用户名
    /// * `password` - 明文密码
    pub async fn login(&mut self, username: &str, password: &str) -> Result<()> {
        info!("vSphere 客户端登录: {}@{}", username, self.base_url.host_str().unwrap_or(""));

        let content = self.retrieve_service_content().await?;
        debug!("服务端: {}", content.about.full_name);

        let session_manager = content
            .session_manager
            .clone()
            .ok_or_else(|| VimError::Auth("服务端未提供 SessionManager".to_string()))?;

        let body = serde_json::json!({
            "userName": username,
            "password": password,
        });
        let url = self.endpoint(&session_manager, "Login")?;
        let response = self
            .send(Method::POST, url, Some(&body), false)
            .await
            .map_err(|e| match e {
                VimError::Fault(fault) => VimError::Auth(fault.to_string()),
                other => other,
            })?;

        let token = response
            .headers()
            .get(SESSION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| VimError::Auth("未获取到会话令牌".to_string()))?;

        *self.session_id.write().await = Some(token);
        self.content = Some(content);

        info!("vSphere 客户端登录成功");
        Ok(())
    }

    /// 注销登出
    ///
    /// 无论服务端调用是否成功，本地会话都会被清除。
    pub async fn logout(&mut self) -> Result<()> {
        let session_manager = self.content.take().and_then(|c| c.session_manager);
        let had_session = self.session_id.read().await.is_some();

        let outcome = match session_manager {
            Some(manager) if had_session => {
                info!("vSphere 客户端登出");
                self.invoke::<(), ()>(&manager, "Logout", None).await
            }
            _ => Ok(()),
        };

        *self.session_id.write().await = None;
        outcome
    }

    /// 登录时读取的服务实例内容
    pub fn content(&self) -> Result<&ServiceContent> {
        self.content
            .as_ref()
            .ok_or_else(|| VimError::Auth("未认证，请先登录".to_string()))
    }

    // ============================================
    // API 访问入口
    // ============================================

    /// 获取视图管理 API
    pub fn view(&self) -> ViewApi<'_> {
        ViewApi::new(self)
    }

    /// 获取属性读取 API
    pub fn property(&self) -> PropertyApi<'_> {
        PropertyApi::new(self)
    }

    /// 获取文件管理 API
    pub fn file_manager(&self) -> FileManagerApi<'_> {
        FileManagerApi::new(self)
    }

    /// 获取清单对象 API
    pub fn inventory(&self) -> InventoryObjectApi<'_> {
        InventoryObjectApi::new(self)
    }

    /// 获取虚拟机 API
    pub fn vm(&self) -> VmApi<'_> {
        VmApi::new(self)
    }

    /// 获取数据存储 API
    pub fn datastore(&self) -> DatastoreApi<'_> {
        DatastoreApi::new(self)
    }

    /// 获取任务 API
    pub fn task(&self) -> TaskInfoApi<'_> {
        TaskInfoApi::new(self)
    }

    // ============================================
    // 请求辅助
    // ============================================

    /// 调用托管对象方法
    pub(crate) async fn invoke<B: Serialize, R: DeserializeOwned>(
        &self,
        target: &MoRef,
        method: &str,
        body: Option<&B>,
    ) -> Result<R> {
        let url = self.endpoint(target, method)?;
        let response = self.send(Method::POST, url, body, true).await?;
        Self::parse_response(response).await
    }

    /// 读取托管对象属性
    pub(crate) async fn get_property<R: DeserializeOwned>(
        &self,
        target: &MoRef,
        property: &str,
    ) -> Result<R> {
        let url = self.endpoint(target, property)?;
        let response = self.send(Method::GET, url, None::<&()>, true).await?;
        Self::parse_response(response).await
    }

    /// `{base}/{type}/{id}/{method 或 property}`
    pub(crate) fn endpoint(&self, target: &MoRef, path: &str) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| VimError::Config(format!("无效的 API 地址: {}", self.base_url)))?
            .pop_if_empty()
            .extend([target.kind.as_str(), target.value.as_str(), path]);
        Ok(url)
    }

    async fn send<B: Serialize>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        authenticated: bool,
    ) -> Result<Response> {
        debug!("vSphere API 请求: {} {}", method, url);

        let mut request = self.http_client.request(method, url);

        if authenticated {
            let token = self.session_id.read().await;
            let token = token
                .as_deref()
                .ok_or_else(|| VimError::Auth("未认证，请先登录".to_string()))?;
            request = request.header(SESSION_HEADER, token);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request
            .send()
            .await
            .map_err(|e| VimError::Connection(e.to_string()))?;

        Self::check_status(response).await
    }

    async fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "无法读取错误响应".to_string());
        let error = error_from_body(status, &body);
        warn!("API 请求失败: {} - {}", status, error);
        Err(error)
    }

    async fn parse_response<R: DeserializeOwned>(response: Response) -> Result<R> {
        let text = response
            .text()
            .await
            .map_err(|e| VimError::Connection(format!("读取响应失败: {}", e)))?;

        // 无返回值的方法响应 204 空体
        let text = if text.trim().is_empty() { "null" } else { text.as_str() };

        serde_json::from_str(text).map_err(|e| {
            let preview: String = text.chars().take(300).collect();
            VimError::Parse(format!("{} - 响应: {}", e, preview))
        })
    }
}

/// 将失败响应映射为错误
///
/// 服务端故障以 `_typeName` 标识的 JSON 对象返回；会话失效类故障归为认证错误。
pub(crate) fn error_from_body(status: StatusCode, body: &str) -> VimError {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if value.get("_typeName").and_then(|v| v.as_str()).is_some() {
            let fault = MethodFault::from_fault(&value);
            if fault.is("NotAuthenticated") || fault.is("InvalidLogin") {
                return VimError::Auth(fault.to_string());
            }
            return VimError::Fault(fault);
        }
    }

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            VimError::Auth(format!("会话失效或无权限: {}", body))
        }
        _ => VimError::Api(status.as_u16(), body.chars().take(500).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = VimClient::new("vcenter.example.com", 443, VimConfig::default()).unwrap();
        assert_eq!(
            client.base_url().as_str(),
            "https://vcenter.example.com/sdk/vim25/8.0.1.0/"
        );
    }

    #[test]
    fn test_invalid_host() {
        let result = VimClient::new("bad host", 443, VimConfig::default());
        assert!(matches!(result, Err(VimError::Config(_))));
    }

    #[test]
    fn test_endpoint() {
        let config = VimConfig {
            api_release: "7.0.3.0".to_string(),
            ..VimConfig::default()
        };
        let client = VimClient::new("10.0.0.5", 8443, config).unwrap();
        let url = client
            .endpoint(&MoRef::new("FileManager", "FileManager"), "MakeDirectory")
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://10.0.0.5:8443/sdk/vim25/7.0.3.0/FileManager/FileManager/MakeDirectory"
        );
    }

    #[test]
    fn test_endpoint_escapes_segments() {
        let client = VimClient::new("vc", 443, VimConfig::default()).unwrap();
        let url = client
            .endpoint(&MoRef::new("Datastore", "ds 1/x"), "summary")
            .unwrap();
        assert!(url.as_str().ends_with("/Datastore/ds%201%2Fx/summary"));
    }

    #[test]
    fn test_fault_body() {
        let body = r#"{"_typeName":"FileNotFound","faultMessage":[{"message":"not found"}]}"#;
        let error = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(error.is_fault("FileNotFound"));
    }

    #[test]
    fn test_auth_fault_body() {
        let body = r#"{"_typeName":"NotAuthenticated"}"#;
        let error = error_from_body(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert!(matches!(error, VimError::Auth(_)));

        let error = error_from_body(StatusCode::UNAUTHORIZED, "");
        assert!(matches!(error, VimError::Auth(_)));
    }

    #[test]
    fn test_plain_error_body() {
        let error = error_from_body(StatusCode::BAD_GATEWAY, "upstream down");
        match error {
            VimError::Api(code, body) => {
                assert_eq!(code, 502);
                assert_eq!(body, "upstream down");
            }
            other => panic!("意外错误: {:?}", other),
        }
    }
}
