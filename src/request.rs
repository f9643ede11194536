use std::fmt;
use std::str::FromStr;

use crate::config::{BRIDGES_URL, COINS_URL, STABLECOINS_URL, TVL_URL, YIELDS_URL};
use crate::error::LlamaError;

/// Upstream API section; each one is served from a fixed host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApiSection {
    Tvl,
    Coins,
    Stablecoins,
    Yields,
    Bridges,
    Volumes,
    Fees,
}

impl ApiSection {
    pub const ALL: [ApiSection; 7] = [
        ApiSection::Tvl,
        ApiSection::Coins,
        ApiSection::Stablecoins,
        ApiSection::Yields,
        ApiSection::Bridges,
        ApiSection::Volumes,
        ApiSection::Fees,
    ];

    pub fn base_url(&self) -> &'static str {
        match self {
            ApiSection::Tvl | ApiSection::Volumes | ApiSection::Fees => TVL_URL,
            ApiSection::Coins => COINS_URL,
            ApiSection::Stablecoins => STABLECOINS_URL,
            ApiSection::Yields => YIELDS_URL,
            ApiSection::Bridges => BRIDGES_URL,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ApiSection::Tvl => "tvl",
            ApiSection::Coins => "coins",
            ApiSection::Stablecoins => "stablecoins",
            ApiSection::Yields => "yields",
            ApiSection::Bridges => "bridges",
            ApiSection::Volumes => "volumes",
            ApiSection::Fees => "fees",
        }
    }
}

impl fmt::Display for ApiSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiSection {
    type Err = LlamaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiSection::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| LlamaError::Configuration(format!("Invalid section: {}", s)))
    }
}

/// `{base}/{endpoint}` followed by every non-empty segment, in order.
pub fn build_url<S: AsRef<str>>(section: ApiSection, endpoint: &str, segments: &[S]) -> String {
    let mut url = format!("{}/{}", section.base_url(), endpoint.trim_matches('/'));
    for segment in segments.iter().map(AsRef::as_ref).filter(|s| !s.is_empty()) {
        url.push('/');
        url.push_str(segment);
    }
    url
}

/// One outbound GET: section, endpoint, positional path segments and query pairs.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    section: ApiSection,
    endpoint: String,
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl ApiRequest {
    pub fn new(section: ApiSection, endpoint: &str) -> Self {
        Self {
            section,
            endpoint: endpoint.to_string(),
            segments: Vec::new(),
            query: Vec::new(),
        }
    }

    pub fn segment<T: fmt::Display>(mut self, segment: T) -> Self {
        let segment = segment.to_string();
        if !segment.is_empty() {
            self.segments.push(segment);
        }
        self
    }

    pub fn opt_segment<T: fmt::Display>(self, segment: Option<T>) -> Self {
        match segment {
            Some(s) => self.segment(s),
            None => self,
        }
    }

    /// `false` and `0` are real flag values upstream and are always sent.
    pub fn param<T: fmt::Display>(mut self, key: &str, value: T) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn opt_param<T: fmt::Display>(self, key: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.param(key, v),
            None => self,
        }
    }

    pub fn section(&self) -> ApiSection {
        self.section
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query(&self) -> &[(String, String)] {
        &self.query
    }

    pub fn url(&self) -> String {
        build_url(self.section, &self.endpoint, &self.segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NO_SEGMENTS: [&str; 0] = [];

    #[test]
    fn test_base_urls() {
        assert_eq!(ApiSection::Tvl.base_url(), "https://api.llama.fi");
        assert_eq!(ApiSection::Coins.base_url(), "https://coins.llama.fi");
        assert_eq!(ApiSection::Stablecoins.base_url(), "https://stablecoins.llama.fi");
        assert_eq!(ApiSection::Yields.base_url(), "https://yields.llama.fi");
        assert_eq!(ApiSection::Bridges.base_url(), "https://bridges.llama.fi");
        assert_eq!(ApiSection::Volumes.base_url(), "https://api.llama.fi");
        assert_eq!(ApiSection::Fees.base_url(), "https://api.llama.fi");
    }

    #[test]
    fn test_build_url_without_segments() {
        for section in ApiSection::ALL {
            let url = build_url(section, "endpoint1", &NO_SEGMENTS);
            assert_eq!(url, format!("{}/endpoint1", section.base_url()));
            assert!(!url.ends_with('/'));
            assert!(!url["https://".len()..].contains("//"));
        }
    }

    #[test]
    fn test_build_url_with_segments() {
        assert_eq!(
            build_url(ApiSection::Coins, "endpoint2", &["1", "2", "3"]),
            "https://coins.llama.fi/endpoint2/1/2/3"
        );
        assert_eq!(
            build_url(ApiSection::Coins, "endpoint3", &["ethereum", "1654000"]),
            "https://coins.llama.fi/endpoint3/ethereum/1654000"
        );
        assert_eq!(
            build_url(ApiSection::Tvl, "v2", &["", "chains"]),
            "https://api.llama.fi/v2/chains"
        );
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("bridges".parse::<ApiSection>().unwrap(), ApiSection::Bridges);
        let err = "invalid-section".parse::<ApiSection>().unwrap_err();
        assert!(matches!(err, LlamaError::Configuration(_)));
    }

    #[test]
    fn test_request_drops_none_keeps_false_and_zero() {
        let request = ApiRequest::new(ApiSection::Tvl, "endpoint")
            .param("a", 1)
            .opt_param::<i64>("b", None)
            .param("c", false)
            .opt_param("d", Some(0));
        let keys: Vec<&str> = request.query().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["a", "c", "d"]);
        assert_eq!(request.query()[1], ("c".to_string(), "false".to_string()));
        assert_eq!(request.query()[2], ("d".to_string(), "0".to_string()));
    }

    #[test]
    fn test_request_url_skips_empty_segments() {
        let request = ApiRequest::new(ApiSection::Bridges, "bridgevolume")
            .segment("ethereum")
            .opt_segment::<u64>(None)
            .segment("");
        assert_eq!(request.url(), "https://bridges.llama.fi/bridgevolume/ethereum");
    }
}
