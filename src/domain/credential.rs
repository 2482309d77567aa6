//! Credential Codec - 密码哈希与校验
//!
//! 存储格式: `<saltHex>:<derivedKeyHex>`
//! - salt: 16 字节随机数，以十六进制字符串作为 KDF 的盐输入
//! - key: PBKDF2-HMAC-SHA512，10000 轮，64 字节

use pbkdf2::pbkdf2_hmac;
use sha2::Sha512;

use crate::domain::story::CredentialHash;

/// PBKDF2 迭代次数
pub const PBKDF2_ROUNDS: u32 = 10_000;

/// 派生密钥长度（字节）
pub const DERIVED_KEY_LEN: usize = 64;

const SALT_LEN: usize = 16;

/// 生成可存储的密码哈希
pub fn hash(secret: &str) -> CredentialHash {
    let salt = to_hex(&rand::random::<[u8; SALT_LEN]>());
    let key = derive_key(secret, &salt);
    CredentialHash::from_stored(format!("{}:{}", salt, to_hex(&key)))
}

/// 校验明文密码
///
/// 存储值缺失或格式错误时返回 `false`，不会报错
pub fn verify(secret: &str, stored: Option<&str>) -> bool {
    let Some((salt, key_hex)) = stored.and_then(|s| s.split_once(':')) else {
        return false;
    };
    if salt.is_empty() {
        return false;
    }
    if key_hex.len() != DERIVED_KEY_LEN * 2 {
        return false;
    }

    let derived = to_hex(&derive_key(secret, salt));
    constant_time_eq(derived.as_bytes(), key_hex.as_bytes())
}

/// 小写十六进制编码
fn to_hex(bytes: &[u8]) -> String {
    let mut s = String::with_capacity(bytes.len() * 2);
    for b in bytes {
        s.push_str(&format!("{:02x}", b));
    }
    s
}

fn derive_key(secret: &str, salt: &str) -> [u8; DERIVED_KEY_LEN] {
    let mut key = [0u8; DERIVED_KEY_LEN];
    pbkdf2_hmac::<Sha512>(secret.as_bytes(), salt.as_bytes(), PBKDF2_ROUNDS, &mut key);
    key
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
