use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Record, Zone};

/// 页面种类（内部使用），用于错误上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PageKind {
    /// Public login page and the login response.
    Login,
    /// Account domain listing.
    Domains,
    /// Zone management page.
    Zone,
}

impl PageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Domains => "domains",
            Self::Zone => "zone",
        }
    }
}

/// 页面错误构造 Trait（内部使用）
/// Provider 实现此 trait 以生成带 provider 标识的统一错误
pub(crate) trait PageErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 快捷方法：页面结构不符合预期
    fn shape_error(&self, page: PageKind, detail: impl ToString) -> ProviderError {
        ProviderError::PageShape {
            provider: self.provider_name().to_string(),
            page: page.as_str().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：域名不在账户列表中
    fn zone_not_found(&self, zone: &str) -> ProviderError {
        ProviderError::DomainNotFound {
            provider: self.provider_name().to_string(),
            domain: zone.to_string(),
            raw_message: None,
        }
    }

    /// 快捷方法：登录被拒绝
    fn invalid_credentials(&self, raw_message: Option<String>) -> ProviderError {
        ProviderError::InvalidCredentials {
            provider: self.provider_name().to_string(),
            raw_message,
        }
    }
}

/// DNS 记录管理 Trait
///
/// Every operation is one sequential scrape-then-mutate round trip. Mutating
/// operations return the *confirmed subset*: the requested records that a fresh
/// fetch after the mutation shows as present (append, set) or absent (delete).
#[async_trait]
pub trait RecordProvider: Send + Sync {
    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// 获取账户下的域名列表
    async fn list_zones(&self) -> Result<Vec<Zone>>;

    /// 获取 DNS 记录列表（页面顺序）
    async fn list_records(&self, zone: &str) -> Result<Vec<Record>>;

    /// 追加记录，不与现有记录比对
    async fn append_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// 使现有记录向目标集合收敛
    async fn set_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;

    /// 删除与请求完全相等的记录
    async fn delete_records(&self, zone: &str, records: &[Record]) -> Result<Vec<Record>>;
}
