use serde_json::Value;

use super::volumes::overview_request;
use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::models::{FeesDataType, OverviewOptions};
use crate::request::{ApiRequest, ApiSection};

impl DefiLlamaClient {
    /// Fees and revenue of every protocol.
    pub async fn fees_overview(&self, data_type: FeesDataType, options: OverviewOptions) -> Result<Value> {
        self.execute(overview_request(ApiSection::Fees, "fees", None, options, data_type.as_str()))
            .await
    }

    pub async fn fees_overview_for_chain(
        &self,
        chain: &str,
        data_type: FeesDataType,
        options: OverviewOptions,
    ) -> Result<Value> {
        let chain = self.resolve_fees_chain(chain).await?;
        self.execute(overview_request(ApiSection::Fees, "fees", Some(chain), options, data_type.as_str()))
            .await
    }

    pub async fn protocol_fees_summary(&self, protocol: &str, data_type: FeesDataType) -> Result<Value> {
        let protocol = self.resolve_fees_protocol(protocol).await?;
        self.execute(
            ApiRequest::new(ApiSection::Fees, "summary")
                .segment("fees")
                .segment(protocol)
                .param("dataType", data_type),
        )
        .await
    }
}
