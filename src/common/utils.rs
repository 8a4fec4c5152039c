use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// 自动清零的字节向量，用于私钥 DER 等敏感数据
///
/// 当对象离开作用域时，自动清除内存中的敏感数据
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct ZeroizingVec(#[serde(with = "serde_bytes")] pub Vec<u8>);

impl std::ops::Deref for ZeroizingVec {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<[u8]> for ZeroizingVec {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for ZeroizingVec {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::ZeroizingVec;

    #[test]
    fn test_zeroizing_vec_deref_and_as_ref() {
        let material = ZeroizingVec(vec![1, 2, 3, 4]);

        assert_eq!(&*material, &[1, 2, 3, 4]);
        assert_eq!(material.as_ref(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_zeroizing_vec_clone_eq() {
        let material = ZeroizingVec(b"private key der".to_vec());
        let copy = material.clone();

        assert_eq!(material, copy);

        // 注：内存擦除功能在离开作用域时自动触发，无法直接测试
    }
}
