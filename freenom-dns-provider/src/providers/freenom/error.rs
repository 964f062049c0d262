//! Freenom 错误构造

use crate::providers::PROVIDER_NAME;
use crate::traits::PageErrorMapper;

use super::FreenomProvider;

/// 无状态错误构造器，供页面解析函数使用
pub(crate) struct PageErrors;

impl PageErrorMapper for PageErrors {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}

impl PageErrorMapper for FreenomProvider {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }
}
