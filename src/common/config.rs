//!
//! # 通用配置模块
//!
//! 定义密钥尺寸等核心配置类型。
//! 受支持的 RSA 模数是一个封闭集合：非法尺寸在构造期即被拒绝，
//! 而不是等到运行期才暴露。
//!
use crate::common::errors::Error;
use serde::{Deserialize, Serialize};

/// 受支持的 RSA 模数位数
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeySize {
    /// 512 位，仅用于兼容遗留数据，安全强度不足
    Rsa512,
    /// 768 位，仅用于兼容遗留数据
    Rsa768,
    /// 1024 位
    Rsa1024,
    /// 2048 位，推荐的默认值
    Rsa2048,
}

impl KeySize {
    /// 模数位数
    pub fn bits(self) -> usize {
        match self {
            KeySize::Rsa512 => 512,
            KeySize::Rsa768 => 768,
            KeySize::Rsa1024 => 1024,
            KeySize::Rsa2048 => 2048,
        }
    }

    /// 单块尺寸（字节），等于模数长度
    pub fn block_size(self) -> usize {
        self.bits() / 8
    }

    /// 从位数构造密钥尺寸
    ///
    /// 只接受封闭集合 {512, 768, 1024, 2048}，
    /// 其他位数返回 `Error::InvalidKeySize`。
    pub fn from_bits(bits: usize) -> Result<Self, Error> {
        match bits {
            512 => Ok(KeySize::Rsa512),
            768 => Ok(KeySize::Rsa768),
            1024 => Ok(KeySize::Rsa1024),
            2048 => Ok(KeySize::Rsa2048),
            other => Err(Error::InvalidKeySize(other)),
        }
    }
}

impl Default for KeySize {
    fn default() -> Self {
        KeySize::Rsa2048
    }
}
