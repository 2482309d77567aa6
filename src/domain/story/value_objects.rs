//! Story Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::StoryError;

/// 密码最小长度（字符数）
pub const MIN_SECRET_LEN: usize = 4;

/// 故事唯一标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StoryId(Uuid);

impl StoryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StoryId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 故事标题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Title(String);

impl Title {
    pub fn new(title: impl Into<String>) -> Result<Self, StoryError> {
        let title = title.into();
        let trimmed = title.trim();
        if trimmed.is_empty() {
            return Err(StoryError::InvalidTitle("标题不能为空".to_string()));
        }
        if trimmed.chars().count() > 200 {
            return Err(StoryError::InvalidTitle("标题长度不能超过200字符".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Title {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 故事类型（自由文本）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre(String);

impl Genre {
    pub fn new(genre: impl Into<String>) -> Result<Self, StoryError> {
        let genre = genre.into();
        let trimmed = genre.trim();
        if trimmed.is_empty() {
            return Err(StoryError::InvalidGenre("类型不能为空".to_string()));
        }
        if trimmed.chars().count() > 100 {
            return Err(StoryError::InvalidGenre("类型长度不能超过100字符".to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Genre {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 明文密码，仅在设置保护时使用
///
/// 不变量: 至少 [`MIN_SECRET_LEN`] 个字符
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    pub fn new(secret: impl Into<String>) -> Result<Self, StoryError> {
        let secret = secret.into();
        if secret.chars().count() < MIN_SECRET_LEN {
            return Err(StoryError::InvalidSecret(format!(
                "密码长度不能少于{}个字符",
                MIN_SECRET_LEN
            )));
        }
        Ok(Self(secret))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Secret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// 已存储的密码哈希（`salt:derivedKeyHex`）
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialHash(String);

impl CredentialHash {
    pub fn from_stored(stored: impl Into<String>) -> Self {
        Self(stored.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for CredentialHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CredentialHash(***)")
    }
}

/// 故事保护状态
///
/// 受保护与否完全由是否持有哈希决定，两者不会不一致
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Protection {
    #[default]
    Unprotected,
    Protected(CredentialHash),
}

impl Protection {
    pub fn is_protected(&self) -> bool {
        matches!(self, Protection::Protected(_))
    }

    pub fn credential(&self) -> Option<&CredentialHash> {
        match self {
            Protection::Unprotected => None,
            Protection::Protected(hash) => Some(hash),
        }
    }

    /// 从数据库中的可空列恢复
    pub fn from_stored(hash: Option<String>) -> Self {
        match hash {
            Some(hash) if !hash.is_empty() => Protection::Protected(CredentialHash::from_stored(hash)),
            _ => Protection::Unprotected,
        }
    }
}

/// 故事状态标签
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryStatus {
    /// 进行中
    #[default]
    Active,
    /// 已完结
    Completed,
}

impl StoryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoryStatus::Active => "active",
            StoryStatus::Completed => "completed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(StoryStatus::Active),
            "completed" => Some(StoryStatus::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_length_policy() {
        assert!(Secret::new("abc").is_err());
        assert!(Secret::new("abcd").is_ok());
    }

    #[test]
    fn test_secret_counts_characters_not_bytes() {
        // 三个汉字占 9 字节，但只有 3 个字符
        assert!(Secret::new("三个字").is_err());
        assert!(Secret::new("四个汉字").is_ok());
    }

    #[test]
    fn test_secret_debug_is_redacted() {
        let secret = Secret::new("hunter2").unwrap();
        assert_eq!(format!("{:?}", secret), "Secret(***)");
    }

    #[test]
    fn test_title_validation() {
        assert!(Title::new("   ").is_err());
        assert!(Title::new("x".repeat(201)).is_err());
        assert_eq!(Title::new("  The Long Night ").unwrap().as_str(), "The Long Night");
    }

    #[test]
    fn test_protection_from_stored() {
        assert!(!Protection::from_stored(None).is_protected());
        assert!(!Protection::from_stored(Some(String::new())).is_protected());
        assert!(Protection::from_stored(Some("aa:bb".to_string())).is_protected());
    }

    #[test]
    fn test_status_round_trip_tags() {
        assert_eq!(StoryStatus::from_str("active"), Some(StoryStatus::Active));
        assert_eq!(StoryStatus::from_str("completed"), Some(StoryStatus::Completed));
        assert_eq!(StoryStatus::from_str("archived"), None);
    }
}
