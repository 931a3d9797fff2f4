//! vSphere 客户端测试
//!
//! 在本地启动一个最小的 VI/JSON 服务端，验证会话、视图、分页、故障映射与任务轮询。

use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use url::Url;
use vsa_inventory::{InventoryResolver, ObjectType};
use vsa_task::{MonitorConfig, TaskFault, TaskMonitor};
use vsa_vimclient::*;

const TOKEN: &str = "52b2f0c1-session";

// ============================================
// 模拟服务端
// ============================================

#[derive(Default)]
struct FakeVcenter {
    /// 已打开的视图: 视图 ID -> (范围 ID, 类型)
    views: Mutex<HashMap<String, (String, String)>>,
    destroyed: Mutex<Vec<String>>,
    next_view: Mutex<usize>,
    /// 分页续取: 令牌 -> 剩余对象
    pages: Mutex<HashMap<String, Vec<Value>>>,
    directories: Mutex<HashSet<String>>,
    task_states: Mutex<VecDeque<Value>>,
    calls: Mutex<Vec<String>>,
    logged_out: Mutex<bool>,
}

fn moref(kind: &str, value: &str) -> Value {
    json!({"_typeName": "ManagedObjectReference", "type": kind, "value": value})
}

fn fault(code: &str, message: &str) -> Response {
    let body = json!({
        "_typeName": code,
        "faultCause": null,
        "faultMessage": [{"_typeName": "LocalizableMessage", "key": "msg", "message": message}]
    });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}

impl FakeVcenter {
    /// (范围, 类型) 下递归可见的对象
    fn members(scope: &str, kind: &str) -> Vec<Value> {
        let object = |kind: &str, id: &str, name: Value| {
            json!({
                "_typeName": "ObjectContent",
                "obj": moref(kind, id),
                "propSet": [{"_typeName": "DynamicProperty", "name": "name", "val": name}]
            })
        };

        match (scope, kind) {
            ("group-d1", "Datacenter") => vec![
                object("Datacenter", "datacenter-1", json!("dc1")),
                object("Datacenter", "datacenter-2", json!({"_typeName": "string", "_value": "dc2"})),
            ],
            ("datacenter-1", "Datastore") => vec![
                object("Datastore", "datastore-11", json!("dsA")),
                object("Datastore", "datastore-12", json!("dsB")),
            ],
            ("datacenter-2", "Datastore") => vec![
                object("Datastore", "datastore-21", json!({"_typeName": "string", "_value": "dsC"})),
            ],
            _ => vec![],
        }
    }

    fn handle(&self, rest: &str, headers: &HeaderMap, body: Value) -> Response {
        self.calls.lock().unwrap().push(rest.to_string());
        let parts: Vec<&str> = rest.split('/').collect();

        if rest == "ServiceInstance/ServiceInstance/content" {
            return Json(json!({
                "_typeName": "ServiceContent",
                "rootFolder": moref("Folder", "group-d1"),
                "propertyCollector": moref("PropertyCollector", "propertyCollector"),
                "viewManager": moref("ViewManager", "ViewManager"),
                "fileManager": moref("FileManager", "FileManager"),
                "sessionManager": moref("SessionManager", "SessionManager"),
                "about": {"_typeName": "AboutInfo", "name": "VMware vCenter Server",
                          "fullName": "VMware vCenter Server 8.0.1", "version": "8.0.1",
                          "apiVersion": "8.0.1.0", "apiType": "VirtualCenter"}
            }))
            .into_response();
        }

        if rest == "SessionManager/SessionManager/Login" {
            if body["password"] != "secret" {
                return fault("InvalidLogin", "Cannot complete login due to an incorrect user name or password.");
            }
            return ([("vmware-api-session-id", TOKEN)], Json(json!({"userName": body["userName"]})))
                .into_response();
        }

        let authorized = headers
            .get("vmware-api-session-id")
            .and_then(|v| v.to_str().ok())
            == Some(TOKEN);
        if !authorized || *self.logged_out.lock().unwrap() {
            return fault("NotAuthenticated", "The session is not authenticated.");
        }

        match parts.as_slice() {
            ["SessionManager", _, "Logout"] => {
                *self.logged_out.lock().unwrap() = true;
                StatusCode::NO_CONTENT.into_response()
            }
            ["ViewManager", _, "CreateContainerView"] => {
                let scope = body["container"]["value"].as_str().unwrap_or_default().to_string();
                let kind = body["type"][0].as_str().unwrap_or_default().to_string();
                let mut next = self.next_view.lock().unwrap();
                *next += 1;
                let id = format!("session[52b2]{}", *next);
                self.views.lock().unwrap().insert(id.clone(), (scope, kind));
                Json(moref("ContainerView", &id)).into_response()
            }
            ["ContainerView", id, "DestroyView"] => {
                if self.views.lock().unwrap().remove(*id).is_none() {
                    return fault("ManagedObjectNotFound", "The object has already been deleted");
                }
                self.destroyed.lock().unwrap().push(id.to_string());
                StatusCode::NO_CONTENT.into_response()
            }
            ["PropertyCollector", _, "RetrievePropertiesEx"] => {
                let view = body["specSet"][0]["objectSet"][0]["obj"]["value"]
                    .as_str()
                    .unwrap_or_default();
                let (scope, kind) = match self.views.lock().unwrap().get(view) {
                    Some(entry) => entry.clone(),
                    None => return fault("ManagedObjectNotFound", "view not found"),
                };
                let mut objects = Self::members(&scope, &kind);
                if objects.is_empty() {
                    return StatusCode::NO_CONTENT.into_response();
                }
                // 每页一个对象以覆盖续取
                let rest_objects = objects.split_off(1);
                self.page(objects, rest_objects)
            }
            ["PropertyCollector", _, "ContinueRetrievePropertiesEx"] => {
                let token = body["token"].as_str().unwrap_or_default().to_string();
                let mut remaining = self.pages.lock().unwrap().remove(&token).unwrap_or_default();
                let rest_objects = remaining.split_off(1.min(remaining.len()));
                self.page(remaining, rest_objects)
            }
            ["FileManager", _, "MakeDirectory"] => {
                let name = body["name"].as_str().unwrap_or_default().to_string();
                if !self.directories.lock().unwrap().insert(name.clone()) {
                    return fault("FileAlreadyExists", &format!("Cannot complete the operation because the file or folder {} already exists", name));
                }
                StatusCode::NO_CONTENT.into_response()
            }
            ["FileManager", _, "CopyDatastoreFile_Task"] => {
                if body["sourceName"] == "[dsA] missing.txt" {
                    return fault("InvalidDatastorePath", "Invalid datastore path '[dsA] missing.txt'.");
                }
                Json(moref("Task", "task-101")).into_response()
            }
            ["Task", id, "info"] => {
                let mut info = self
                    .task_states
                    .lock()
                    .unwrap()
                    .pop_front()
                    .unwrap_or_else(|| json!({"state": "success"}));
                info["_typeName"] = json!("TaskInfo");
                info["key"] = json!(id);
                info["task"] = moref("Task", id);
                Json(info).into_response()
            }
            ["Datastore", "datastore-11", "summary"] => Json(json!({
                "_typeName": "DatastoreSummary",
                "datastore": moref("Datastore", "datastore-11"),
                "name": "dsA",
                "url": "ds:///vmfs/volumes/5f1a/",
                "capacity": 1099511627776_i64,
                "freeSpace": 549755813888_i64,
                "uncommitted": 824633720832_i64,
                "accessible": true,
                "type": "VMFS"
            }))
            .into_response(),
            ["Datastore", "datastore-11", "vm"] => {
                Json(json!([moref("VirtualMachine", "vm-1"), moref("VirtualMachine", "vm-2")])).into_response()
            }
            ["Datacenter", "datacenter-1", "hostFolder"] => Json(moref("Folder", "group-h4")).into_response(),
            ["Folder", "group-h4", "childEntity"] => Json(json!([moref("ClusterComputeResource", "domain-c8")])).into_response(),
            ["ClusterComputeResource", "domain-c8", "resourcePool"] => Json(moref("ResourcePool", "resgroup-9")).into_response(),
            _ => fault("MethodNotFound", &format!("unknown path {}", rest)),
        }
    }

    fn page(&self, objects: Vec<Value>, remaining: Vec<Value>) -> Response {
        let mut result = json!({"_typeName": "RetrieveResult", "objects": objects});
        if !remaining.is_empty() {
            let token = format!("page-{}", self.pages.lock().unwrap().len() + 1);
            self.pages.lock().unwrap().insert(token.clone(), remaining);
            result["token"] = json!(token);
        }
        Json(result).into_response()
    }
}

async fn dispatch(
    State(fake): State<Arc<FakeVcenter>>,
    Path((_release, rest)): Path<(String, String)>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body = serde_json::from_slice(&body).unwrap_or(Value::Null);
    fake.handle(&rest, &headers, body)
}

async fn start(fake: Arc<FakeVcenter>) -> VimClient {
    let app = Router::new()
        .route("/sdk/vim25/:release/*rest", any(dispatch))
        .with_state(fake);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let endpoint = Url::parse(&format!("http://{}/", addr)).unwrap();
    VimClient::with_endpoint(endpoint, VimConfig::default()).unwrap()
}

async fn logged_in(fake: Arc<FakeVcenter>) -> VimClient {
    let mut client = start(fake).await;
    client.login("administrator@vsphere.local", "secret").await.unwrap();
    client
}

// ============================================
// 会话
// ============================================

#[tokio::test]
async fn test_login_and_logout() {
    let fake = Arc::new(FakeVcenter::default());
    let mut client = start(fake.clone()).await;

    assert!(client.content().is_err());
    client.login("administrator@vsphere.local", "secret").await.unwrap();

    assert!(client.is_connected().await);
    let content = client.content().unwrap();
    assert_eq!(content.root_folder, MoRef::new("Folder", "group-d1"));
    assert_eq!(content.about.api_version, "8.0.1.0");

    client.logout().await.unwrap();
    assert!(!client.is_connected().await);
    assert!(*fake.logged_out.lock().unwrap());

    // 再次登出无需访问服务端
    client.logout().await.unwrap();
}

#[tokio::test]
async fn test_login_rejected() {
    let fake = Arc::new(FakeVcenter::default());
    let mut client = start(fake).await;

    let err = client.login("administrator@vsphere.local", "wrong").await.unwrap_err();
    assert!(matches!(err, VimError::Auth(_)));
    assert!(!client.is_connected().await);
}

#[tokio::test]
async fn test_requests_require_session() {
    let fake = Arc::new(FakeVcenter::default());
    let client = start(fake).await;

    let err = client
        .view()
        .destroy_view(&MoRef::new("ContainerView", "x"))
        .await
        .unwrap_err();
    assert!(matches!(err, VimError::Auth(_)));
}

#[tokio::test]
async fn test_connection_refused() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let endpoint = Url::parse(&format!("http://{}/", addr)).unwrap();
    let mut client = VimClient::with_endpoint(endpoint, VimConfig::default()).unwrap();

    let err = client.login("root", "secret").await.unwrap_err();
    assert!(matches!(err, VimError::Connection(_)));
}

// ============================================
// 清单解析
// ============================================

#[tokio::test]
async fn test_resolver_over_client_releases_views() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake.clone()).await;
    let root = client.content().unwrap().root_folder.clone();
    let resolver = InventoryResolver::new(&client);

    let (dc, ds) = resolver
        .find_within(&root, ObjectType::Datacenter, ObjectType::Datastore, "dsC")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(dc.name, "dc2");
    assert_eq!(dc.handle, MoRef::new("Datacenter", "datacenter-2"));
    assert_eq!(ds.handle, MoRef::new("Datastore", "datastore-21"));
    assert_eq!(ds.kind, ObjectType::Datastore);

    assert!(fake.views.lock().unwrap().is_empty());
    assert_eq!(fake.destroyed.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_retrieve_names_follows_pages() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake.clone()).await;

    let view = client
        .view()
        .create_container_view(&MoRef::new("Datacenter", "datacenter-1"), "Datastore", true)
        .await
        .unwrap();
    let names = client.property().retrieve_names(&view, "Datastore").await.unwrap();
    client.view().destroy_view(&view).await.unwrap();

    let names: Vec<_> = names.into_iter().map(|(_, name)| name).collect();
    assert_eq!(names, vec!["dsA", "dsB"]);
    assert!(fake
        .calls
        .lock()
        .unwrap()
        .iter()
        .any(|c| c.ends_with("ContinueRetrievePropertiesEx")));
}

#[tokio::test]
async fn test_empty_view_yields_no_members() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake).await;

    let view = client
        .view()
        .create_container_view(&MoRef::new("Datacenter", "datacenter-9"), "Datastore", true)
        .await
        .unwrap();
    let names = client.property().retrieve_names(&view, "Datastore").await.unwrap();
    client.view().destroy_view(&view).await.unwrap();

    assert!(names.is_empty());
}

#[tokio::test]
async fn test_destroying_view_twice_is_a_fault() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake).await;

    let view = client
        .view()
        .create_container_view(&MoRef::new("Folder", "group-d1"), "Datacenter", true)
        .await
        .unwrap();
    client.view().destroy_view(&view).await.unwrap();

    let err = client.view().destroy_view(&view).await.unwrap_err();
    assert!(err.is_fault("ManagedObjectNotFound"));
}

// ============================================
// 文件管理与任务
// ============================================

#[tokio::test]
async fn test_make_directory_is_idempotent() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake).await;
    let dc = MoRef::new("Datacenter", "datacenter-1");

    client.file_manager().make_directory("[dsB] /a", Some(&dc), true).await.unwrap();
    client.file_manager().make_directory("[dsB] /a", Some(&dc), true).await.unwrap();
}

#[tokio::test]
async fn test_copy_rejected_with_fault() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake).await;
    let dc = MoRef::new("Datacenter", "datacenter-1");

    let err = client
        .file_manager()
        .copy_datastore_file("[dsA] missing.txt", Some(&dc), "[dsB] x.txt", Some(&dc), true)
        .await
        .unwrap_err();

    let fault = err.fault().unwrap();
    assert_eq!(fault.code, "InvalidDatastorePath");
    assert_eq!(fault.message, "Invalid datastore path '[dsA] missing.txt'.");
}

#[tokio::test]
async fn test_copy_task_monitored_to_success() {
    let fake = Arc::new(FakeVcenter::default());
    fake.task_states.lock().unwrap().extend([
        json!({"state": "queued"}),
        json!({"state": "running", "progress": 35}),
        json!({"state": "running", "progress": 90}),
        json!({"state": "success"}),
    ]);
    let client = logged_in(fake).await;
    let dc = MoRef::new("Datacenter", "datacenter-1");

    let task = client
        .file_manager()
        .copy_datastore_file("[dsA] /a/b.txt", Some(&dc), "[dsB] /a/c.txt", Some(&dc), true)
        .await
        .unwrap();
    assert_eq!(task, MoRef::new("Task", "task-101"));

    let config = MonitorConfig {
        poll_interval: std::time::Duration::from_millis(5),
        ..MonitorConfig::default()
    };
    let monitor = TaskMonitor::new(&client, config);
    let mut percents = Vec::new();
    monitor
        .wait_with_progress(&task, |_, e| percents.push(e.percent))
        .await
        .unwrap();

    assert_eq!(percents, vec![Some(35), Some(90)]);
}

#[tokio::test]
async fn test_task_error_surfaces_fault() {
    let fake = Arc::new(FakeVcenter::default());
    fake.task_states.lock().unwrap().push_back(json!({
        "state": "error",
        "error": {
            "_typeName": "LocalizedMethodFault",
            "fault": {"_typeName": "NoDiskSpace", "datastore": "dsB"},
            "localizedMessage": "There is not enough space on the file system for the selected operation."
        }
    }));
    let client = logged_in(fake).await;

    let monitor = TaskMonitor::new(&client, MonitorConfig::default());
    let err = monitor.wait(&MoRef::new("Task", "task-7")).await.unwrap_err();

    match err {
        TaskFault::Failed(fault) => {
            assert_eq!(fault.code, "NoDiskSpace");
            assert!(fault.message.starts_with("There is not enough space"));
        }
        other => panic!("意外结果: {:?}", other),
    }
}

// ============================================
// 对象属性
// ============================================

#[tokio::test]
async fn test_datastore_and_placement_properties() {
    let fake = Arc::new(FakeVcenter::default());
    let client = logged_in(fake).await;
    let ds = MoRef::new("Datastore", "datastore-11");

    let summary = client.datastore().summary(&ds).await.unwrap();
    assert_eq!(summary.name, "dsA");
    assert_eq!(summary.kind, "VMFS");
    assert_eq!(summary.uncommitted, Some(824633720832));
    assert_eq!(client.datastore().vms(&ds).await.unwrap().len(), 2);

    let host_folder = client
        .inventory()
        .host_folder(&MoRef::new("Datacenter", "datacenter-1"))
        .await
        .unwrap();
    let children = client.inventory().child_entities(&host_folder).await.unwrap();
    assert_eq!(children, vec![MoRef::new("ClusterComputeResource", "domain-c8")]);

    let pool = client.inventory().resource_pool(&children[0]).await.unwrap();
    assert_eq!(pool, Some(MoRef::new("ResourcePool", "resgroup-9")));
}
