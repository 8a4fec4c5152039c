//! Key query descriptors used to store and locate key halves.
// 中文: 用于写入与定位密钥半边的结构化查询。

use serde::{Deserialize, Serialize};

/// 存储条目的类别
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyClass {
    /// 加密密钥
    Key,
    /// 通用口令
    GenericPassword,
    /// 证书
    Certificate,
}

/// 密钥算法类型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyType {
    Rsa,
    Ec,
}

/// 条目的可访问性策略
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Accessibility {
    /// 仅在设备/会话解锁期间可用
    WhenUnlocked,
    /// 首次解锁之后一直可用
    AfterFirstUnlock,
    /// 始终可用
    Always,
}

/// A structured query describing one key half in the secure store.
///
/// The same query shape is used both to write a key and to read it back,
/// which guarantees a stored key is always findable again by the query
/// derived from the same application tag.
///
/// 中文: 描述安全存储中一个密钥半边的结构化查询。
/// 写入与读取使用完全相同的查询形状，保证以同一应用标签派生的查询
/// 总能重新定位已写入的密钥。
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeyQuery {
    /// 条目类别
    pub key_class: KeyClass,
    /// 密钥算法类型
    pub key_type: KeyType,
    /// 应用标签，条目在命名空间中的身份
    pub application_tag: String,
    /// 可访问性策略
    pub accessibility: Accessibility,
    /// 是否持久化（非持久化条目随进程结束消失）
    pub permanent: bool,
    /// 可读标签，仅用于展示
    pub label: Option<String>,
}

impl KeyQuery {
    /// 构造一个固定形状的 RSA 密钥查询：
    /// 类别 = `Key`，类型 = `Rsa`，解锁期间可用，持久化。
    ///
    /// 纯函数，没有失败路径；只有后续的存储操作才可能出错。
    pub fn rsa_key(application_tag: impl Into<String>) -> Self {
        Self {
            key_class: KeyClass::Key,
            key_type: KeyType::Rsa,
            application_tag: application_tag.into(),
            accessibility: Accessibility::WhenUnlocked,
            permanent: true,
            label: None,
        }
    }

    /// 设置可读标签
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// 规范化的存储键，后端以它为主键定位条目。
    ///
    /// 类别与类型参与键值，因此不同类别/类型下的同名标签互不冲突。
    pub fn storage_key(&self) -> String {
        let class = match self.key_class {
            KeyClass::Key => "keys",
            KeyClass::GenericPassword => "genp",
            KeyClass::Certificate => "cert",
        };
        let key_type = match self.key_type {
            KeyType::Rsa => "rsa",
            KeyType::Ec => "ec",
        };
        format!("{}.{}.{}", class, key_type, self.application_tag)
    }
}

/// 由基础标识符派生出两半的应用标签。
///
/// 后缀是两半存储身份之间唯一的差异点，
/// 查询的其余字段完全对称。
pub fn derived_tags(tag: &str) -> (String, String) {
    (format!("{}.public", tag), format!("{}.private", tag))
}
