use serde_json::Value;

use crate::client::DefiLlamaClient;
use crate::error::Result;
use crate::models::{DexDataType, OptionsDataType, OverviewOptions};
use crate::request::{ApiRequest, ApiSection};

/// `overview/{kind}[/{chain}]` with the shared chart toggles and `dataType`.
pub(crate) fn overview_request(
    section: ApiSection,
    kind: &str,
    chain: Option<String>,
    options: OverviewOptions,
    data_type: &str,
) -> ApiRequest {
    ApiRequest::new(section, "overview")
        .segment(kind)
        .opt_segment(chain)
        .param("excludeTotalDataChart", options.exclude_total_data_chart)
        .param("excludeTotalDataChartBreakdown", options.exclude_total_data_chart_breakdown)
        .param("dataType", data_type)
}

impl DefiLlamaClient {
    /// All DEXes with volume summaries.
    pub async fn dexes_volume_overview(&self, data_type: DexDataType, options: OverviewOptions) -> Result<Value> {
        self.execute(overview_request(ApiSection::Volumes, "dexs", None, options, data_type.as_str()))
            .await
    }

    pub async fn dexes_volume_overview_for_chain(
        &self,
        chain: &str,
        data_type: DexDataType,
        options: OverviewOptions,
    ) -> Result<Value> {
        let chain = self.resolve_dex_chain(chain).await?;
        self.execute(overview_request(ApiSection::Volumes, "dexs", Some(chain), options, data_type.as_str()))
            .await
    }

    /// Volume summary of one DEX with historical data.
    pub async fn dex_volume_summary(
        &self,
        protocol: &str,
        data_type: DexDataType,
        options: OverviewOptions,
    ) -> Result<Value> {
        let protocol = self.resolve_dex_protocol(protocol).await?;
        self.execute(
            ApiRequest::new(ApiSection::Volumes, "summary")
                .segment("dexs")
                .segment(protocol)
                .param("excludeTotalDataChart", options.exclude_total_data_chart)
                .param("excludeTotalDataChartBreakdown", options.exclude_total_data_chart_breakdown)
                .param("dataType", data_type),
        )
        .await
    }

    /// All options DEXes with premium or notional volume summaries.
    pub async fn options_overview(&self, data_type: OptionsDataType, options: OverviewOptions) -> Result<Value> {
        self.execute(overview_request(ApiSection::Volumes, "options", None, options, data_type.as_str()))
            .await
    }

    pub async fn options_overview_for_chain(
        &self,
        chain: &str,
        data_type: OptionsDataType,
        options: OverviewOptions,
    ) -> Result<Value> {
        let chain = self.resolve_options_chain(chain).await?;
        self.execute(overview_request(ApiSection::Volumes, "options", Some(chain), options, data_type.as_str()))
            .await
    }

    pub async fn options_volume_summary(&self, protocol: &str, data_type: OptionsDataType) -> Result<Value> {
        let protocol = self.resolve_options_protocol(protocol).await?;
        self.execute(
            ApiRequest::new(ApiSection::Volumes, "summary")
                .segment("options")
                .segment(protocol)
                .param("dataType", data_type),
        )
        .await
    }
}
