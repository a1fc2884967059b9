// src/zap/client.rs
use alloy_primitives::U256;
use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::config::ZapConfig;
use crate::zap::error::{ZapError, ZapResult};
use crate::zap::format::is_numeric;
use crate::zap::provider::ZapProvider;
use crate::zap::types::{LpPool, LpStats, ZapAsset, ZapOrder};

#[derive(Debug, Deserialize)]
struct BalanceResponse {
    balance: String,
}

#[derive(Debug, Deserialize)]
struct AllowanceResponse {
    approved: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TxResponse {
    tx_hash: String,
}

#[derive(Debug, Deserialize)]
struct EstimateResponse {
    estimate: [String; 2],
}

#[derive(Debug, Serialize)]
struct ApproveRequest<'a> {
    account: &'a str,
    asset: ZapAsset,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EstimateRequestBody<'a> {
    asset: ZapAsset,
    lp_name: &'a str,
    amount: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ZapInRequest<'a> {
    account: &'a str,
    #[serde(flatten)]
    order: &'a ZapOrder,
}

/// Finance gateway client: balances, pool stats and zapper calls over HTTP/JSON
pub struct ZapperClient {
    base_url: String,
    account: String,
    http_client: HttpClient,
}

impl ZapperClient {
    pub fn new(config: &ZapConfig) -> Self {
        Self {
            base_url: config.gateway_url.trim_end_matches('/').to_string(),
            account: config.account.clone(),
            http_client: HttpClient::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn account(&self) -> ZapResult<&str> {
        if self.account.is_empty() {
            Err(ZapError::NoAccount)
        } else {
            Ok(&self.account)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ZapResult<T> {
        let response = self.http_client.get(self.url(path)).send().await?;
        Self::decode(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(&self, path: &str, body: &B) -> ZapResult<T> {
        let response = self.http_client.post(self.url(path)).json(body).send().await?;
        Self::decode(path, response).await
    }

    async fn decode<T: DeserializeOwned>(path: &str, response: reqwest::Response) -> ZapResult<T> {
        let status = response.status();
        if !status.is_success() {
            log::error!("Gateway {} returned {}", path, status);
            return Err(ZapError::Gateway {
                endpoint: path.to_string(),
                status: status.as_u16(),
            });
        }
        let text = response.text().await?;
        parse_body(path, &text)
    }
}

fn parse_body<T: DeserializeOwned>(path: &str, text: &str) -> ZapResult<T> {
    serde_json::from_str(text).map_err(|e| ZapError::Decode(format!("{}: {}", path, e)))
}

fn parse_wei(value: &str) -> ZapResult<U256> {
    U256::from_str(value.trim()).map_err(|e| ZapError::Decode(format!("bad balance '{}': {}", value, e)))
}

#[async_trait]
impl ZapProvider for ZapperClient {
    async fn token_balance(&self, asset: ZapAsset) -> ZapResult<U256> {
        let path = format!("/balances/{}/{}", self.account()?, asset);
        let response: BalanceResponse = self.get_json(&path).await?;
        parse_wei(&response.balance)
    }

    async fn lp_stats(&self, pool: LpPool) -> ZapResult<LpStats> {
        self.get_json(&format!("/lp-stats/{}", pool.name())).await
    }

    async fn approval_status(&self, asset: ZapAsset) -> ZapResult<bool> {
        let path = format!("/zapper/allowance/{}/{}", self.account()?, asset);
        let response: AllowanceResponse = self.get_json(&path).await?;
        Ok(response.approved)
    }

    async fn approve_zapper(&self, asset: ZapAsset) -> ZapResult<String> {
        log::info!("Requesting zapper approval for {}", asset);
        let body = ApproveRequest { account: self.account()?, asset };
        let response: TxResponse = self.post_json("/zapper/approve", &body).await?;
        log::info!("Approval submitted: {}", response.tx_hash);
        Ok(response.tx_hash)
    }

    async fn estimate_zap_in(&self, asset: ZapAsset, lp_name: &str, amount: &str) -> ZapResult<[String; 2]> {
        if !is_numeric(amount) {
            return Err(ZapError::InvalidAmount(amount.to_string()));
        }
        let body = EstimateRequestBody { asset, lp_name, amount };
        let response: EstimateResponse = self.post_json("/zapper/estimate", &body).await?;
        Ok(response.estimate)
    }

    async fn zap_in(&self, order: &ZapOrder) -> ZapResult<String> {
        log::info!("Zapping {} {} into {}", order.amount, order.zap_asset, order.lp_name);
        let body = ZapInRequest { account: self.account()?, order };
        let response: TxResponse = self.post_json("/zapper/zap-in", &body).await?;
        log::info!("Zap submitted: {}", response.tx_hash);
        Ok(response.tx_hash)
    }

    fn get_name(&self) -> String {
        format!("gateway {}", self.base_url)
    }
}
