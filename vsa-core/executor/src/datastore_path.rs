//! 数据存储路径
//!
//! 形如 `[datastore] dir/file`，方括号内为数据存储名称，其后为数据存储内的相对路径。

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DatastorePath {
    datastore: String,
    path: String,
}

impl DatastorePath {
    pub fn new(datastore: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            datastore: datastore.into(),
            path: path.into(),
        }
    }

    /// 数据存储根目录
    pub fn root(datastore: impl Into<String>) -> Self {
        Self::new(datastore, "")
    }

    /// 拼接子路径
    pub fn join(&self, child: &str) -> Self {
        let child = child.trim_start_matches('/');
        let path = if self.path.is_empty() {
            child.to_string()
        } else {
            format!("{}/{}", self.path.trim_end_matches('/'), child)
        };
        Self::new(self.datastore.clone(), path)
    }

    /// 父目录
    ///
    /// 位于数据存储根目录下的条目（`file.txt`、`/file.txt`）没有父目录。
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.path.trim_end_matches('/');
        let (parent, _) = trimmed.rsplit_once('/')?;
        if parent.trim_matches('/').is_empty() {
            return None;
        }
        Some(Self::new(self.datastore.clone(), parent))
    }
}

impl fmt::Display for DatastorePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            write!(f, "[{}]", self.datastore)
        } else {
            write!(f, "[{}] {}", self.datastore, self.path)
        }
    }
}
