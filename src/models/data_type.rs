use std::fmt;

/// `dataType` values accepted by the DEX volume endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DexDataType {
    #[default]
    DailyVolume,
    TotalVolume,
}

impl DexDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DexDataType::DailyVolume => "dailyVolume",
            DexDataType::TotalVolume => "totalVolume",
        }
    }
}

/// `dataType` values accepted by the options endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptionsDataType {
    #[default]
    DailyPremiumVolume,
    TotalPremiumVolume,
    DailyNotionalVolume,
    TotalNotionalVolume,
}

impl OptionsDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionsDataType::DailyPremiumVolume => "dailyPremiumVolume",
            OptionsDataType::TotalPremiumVolume => "totalPremiumVolume",
            OptionsDataType::DailyNotionalVolume => "dailyNotionalVolume",
            OptionsDataType::TotalNotionalVolume => "totalNotionalVolume",
        }
    }
}

/// `dataType` values accepted by the fees endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FeesDataType {
    #[default]
    DailyFees,
    TotalFees,
    DailyRevenue,
    TotalRevenue,
}

impl FeesDataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeesDataType::DailyFees => "dailyFees",
            FeesDataType::TotalFees => "totalFees",
            FeesDataType::DailyRevenue => "dailyRevenue",
            FeesDataType::TotalRevenue => "totalRevenue",
        }
    }
}

macro_rules! display_as_wire {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        })*
    };
}

display_as_wire!(DexDataType, OptionsDataType, FeesDataType);

/// Toggles shared by every overview endpoint. Both default to `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverviewOptions {
    pub exclude_total_data_chart: bool,
    pub exclude_total_data_chart_breakdown: bool,
}

impl Default for OverviewOptions {
    fn default() -> Self {
        Self {
            exclude_total_data_chart: true,
            exclude_total_data_chart_breakdown: true,
        }
    }
}

impl OverviewOptions {
    pub fn with_charts() -> Self {
        Self {
            exclude_total_data_chart: false,
            exclude_total_data_chart_breakdown: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_strings() {
        assert_eq!(DexDataType::default().to_string(), "dailyVolume");
        assert_eq!(DexDataType::TotalVolume.as_str(), "totalVolume");
        assert_eq!(OptionsDataType::default().as_str(), "dailyPremiumVolume");
        assert_eq!(OptionsDataType::TotalNotionalVolume.to_string(), "totalNotionalVolume");
        assert_eq!(FeesDataType::default().as_str(), "dailyFees");
        assert_eq!(FeesDataType::TotalRevenue.to_string(), "totalRevenue");
    }
}
