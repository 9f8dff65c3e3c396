use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FuelType {
    Gasoline,
    Diesel,
    Electric,
    Hybrid,
}

impl FuelType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Gasoline => "gasoline",
            Self::Diesel => "diesel",
            Self::Electric => "electric",
            Self::Hybrid => "hybrid",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gasoline" => Some(Self::Gasoline),
            "diesel" => Some(Self::Diesel),
            "electric" => Some(Self::Electric),
            "hybrid" => Some(Self::Hybrid),
            _ => None,
        }
    }
}

/// Transmission is collected with the query but carries no pricing weight;
/// it is kept so listings can round-trip through storage unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Transmission {
    Automatic,
    Manual,
    Cvt,
}

impl Transmission {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Automatic => "automatic",
            Self::Manual => "manual",
            Self::Cvt => "cvt",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "automatic" => Some(Self::Automatic),
            "manual" => Some(Self::Manual),
            "cvt" => Some(Self::Cvt),
            _ => None,
        }
    }
}
