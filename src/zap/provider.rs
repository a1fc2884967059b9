// src/zap/provider.rs
use alloy_primitives::U256;
use async_trait::async_trait;
use futures_util::future::try_join3;
use std::ops::Deref;
use std::sync::Arc;

use crate::zap::error::ZapResult;
use crate::zap::types::{LpPool, LpStats, ZapAsset, ZapOrder};

/// Everything the zap dialog needs from the chain, the wallet and the zapper
#[async_trait]
pub trait ZapProvider: Send + Sync {
    /// Raw balance of `asset` held by the connected account
    async fn token_balance(&self, asset: ZapAsset) -> ZapResult<U256>;

    /// Statistics of one of the supported pools
    async fn lp_stats(&self, pool: LpPool) -> ZapResult<LpStats>;

    /// Whether the zapper may already spend `asset`
    async fn approval_status(&self, asset: ZapAsset) -> ZapResult<bool>;

    /// Submit an approval transaction, returning its hash
    async fn approve_zapper(&self, asset: ZapAsset) -> ZapResult<String>;

    /// Projected (token0, token1) split of zapping `amount` of `asset` into `lp_name`
    async fn estimate_zap_in(&self, asset: ZapAsset, lp_name: &str, amount: &str) -> ZapResult<[String; 2]>;

    /// Execute the zap, returning the transaction hash
    async fn zap_in(&self, order: &ZapOrder) -> ZapResult<String>;

    /// Display name for logs
    fn get_name(&self) -> String;
}

/// Cloneable provider handle that can sit in component props.
/// Equality is identity so props only change when the provider is swapped.
#[derive(Clone)]
pub struct SharedProvider(Arc<dyn ZapProvider>);

impl SharedProvider {
    pub fn new<P: ZapProvider + 'static>(provider: P) -> Self {
        Self(Arc::new(provider))
    }
}

impl PartialEq for SharedProvider {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl Deref for SharedProvider {
    type Target = dyn ZapProvider;

    fn deref(&self) -> &Self::Target {
        self.0.as_ref()
    }
}

/// Raw balances of the three zappable assets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ZapBalances {
    pub mim: U256,
    pub wine: U256,
    pub grape: U256,
}

impl ZapBalances {
    pub fn get(&self, asset: ZapAsset) -> U256 {
        match asset {
            ZapAsset::Mim => self.mim,
            ZapAsset::Wine => self.wine,
            ZapAsset::Grape => self.grape,
        }
    }

    /// Fetch all three balances concurrently
    pub async fn load(provider: &dyn ZapProvider) -> ZapResult<Self> {
        let (mim, wine, grape) = try_join3(
            provider.token_balance(ZapAsset::Mim),
            provider.token_balance(ZapAsset::Wine),
            provider.token_balance(ZapAsset::Grape),
        )
        .await?;

        log::info!("Loaded zap balances via {}: MIM={} WINE={} GRAPE={}", provider.get_name(), mim, wine, grape);
        Ok(Self { mim, wine, grape })
    }
}


#[cfg(test)]
mod tests {
    use super::mock::MockProvider;
    use super::*;

    #[tokio::test]
    async fn test_load_balances() {
        let mut provider = MockProvider::default();
        provider.balances.insert(ZapAsset::Grape, U256::from(7u64));
        let balances = ZapBalances::load(&provider).await.unwrap();
        assert_eq!(balances.get(ZapAsset::Grape), U256::from(7u64));
        assert_eq!(balances.get(ZapAsset::Mim), U256::ZERO);
        assert_eq!(provider.calls().len(), 3);
    }

    #[test]
    fn test_shared_provider_identity() {
        let a = SharedProvider::new(MockProvider::default());
        let b = a.clone();
        let c = SharedProvider::new(MockProvider::default());
        assert!(a == b);
        assert!(a != c);
        assert_eq!(a.get_name(), "mock");
    }
}
