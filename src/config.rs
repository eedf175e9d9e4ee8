//! Transaction configuration

use crate::crypto::cosmos::{CosmosCoin, CosmosFee};

/// 기본 가스 한도
pub const DEFAULT_GAS_LIMIT: u64 = 200_000;

/// 기본 가스 가격 0.1 uscrt (분자/분모)
const GAS_PRICE_NUMERATOR: u64 = 1;
const GAS_PRICE_DENOMINATOR: u64 = 10;

/// 컨트랙트 실행 트랜잭션 설정
#[derive(Debug, Clone)]
pub struct TxConfig {
    gas_limit: u64,
    fee_amount: Option<u64>,
    memo: String,
    timeout_height: u64,
    funds: Vec<CosmosCoin>,
}

impl Default for TxConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TxConfig {
    /// 기본 설정 (가스 200,000, 가스 가격 기반 수수료)
    pub fn new() -> Self {
        Self {
            gas_limit: DEFAULT_GAS_LIMIT,
            fee_amount: None,
            memo: String::new(),
            timeout_height: 0,
            funds: vec![],
        }
    }

    /// 가스 한도 설정
    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    /// 수수료 직접 지정 (기본 단위)
    pub fn with_fee_amount(mut self, amount: u64) -> Self {
        self.fee_amount = Some(amount);
        self
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// 타임아웃 블록 높이 (0 = 없음)
    pub fn with_timeout_height(mut self, height: u64) -> Self {
        self.timeout_height = height;
        self
    }

    /// 컨트랙트에 함께 보낼 자금
    pub fn with_funds(mut self, funds: Vec<CosmosCoin>) -> Self {
        self.funds = funds;
        self
    }

    // === Getters ===

    pub fn gas_limit(&self) -> u64 {
        self.gas_limit
    }

    /// 수수료 (지정값, 없으면 가스 한도 × 0.1 올림)
    pub fn fee_amount(&self) -> u64 {
        self.fee_amount.unwrap_or_else(|| {
            (self.gas_limit.saturating_mul(GAS_PRICE_NUMERATOR)).div_ceil(GAS_PRICE_DENOMINATOR)
        })
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn timeout_height(&self) -> u64 {
        self.timeout_height
    }

    pub fn funds(&self) -> &[CosmosCoin] {
        &self.funds
    }

    /// 트랜잭션 수수료
    pub fn fee(&self, denom: &str) -> CosmosFee {
        CosmosFee::new(
            vec![CosmosCoin::new(denom, self.fee_amount().to_string())],
            self.gas_limit,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = TxConfig::default();
        assert_eq!(config.gas_limit(), 200_000);
        assert_eq!(config.fee_amount(), 20_000);
        assert_eq!(config.memo(), "");
        assert_eq!(config.timeout_height(), 0);
        assert!(config.funds().is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = TxConfig::new()
            .with_gas_limit(150_001)
            .with_memo("hi")
            .with_timeout_height(99)
            .with_funds(vec![CosmosCoin::new("uscrt", "5")]);

        // 0.1 uscrt/gas, 올림
        assert_eq!(config.fee_amount(), 15_001);
        assert_eq!(config.memo(), "hi");
        assert_eq!(config.timeout_height(), 99);
        assert_eq!(config.funds().len(), 1);
    }

    #[test]
    fn test_explicit_fee() {
        let config = TxConfig::new().with_fee_amount(50_000);
        let fee = config.fee("uscrt");
        assert_eq!(fee.gas_limit, 200_000);
        assert_eq!(fee.amount, vec![CosmosCoin::new("uscrt", "50000")]);
    }
}
