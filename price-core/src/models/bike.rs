use serde::{Deserialize, Serialize};

/// Bike body style. For bikes the base price is looked up by category
/// rather than by make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BikeCategory {
    Standard,
    Sports,
    Cruiser,
    Touring,
    OffRoad,
    Scooter,
    Electric,
}

impl BikeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Standard => "standard",
            Self::Sports => "sports",
            Self::Cruiser => "cruiser",
            Self::Touring => "touring",
            Self::OffRoad => "off-road",
            Self::Scooter => "scooter",
            Self::Electric => "electric",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standard" => Some(Self::Standard),
            "sports" => Some(Self::Sports),
            "cruiser" => Some(Self::Cruiser),
            "touring" => Some(Self::Touring),
            "off-road" => Some(Self::OffRoad),
            "scooter" => Some(Self::Scooter),
            "electric" => Some(Self::Electric),
            _ => None,
        }
    }
}

/// Engine displacement band, mirroring the ranges the intake form offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineBand {
    #[serde(rename = "under-125")]
    Under125,
    #[serde(rename = "125-150")]
    From125To150,
    #[serde(rename = "150-250")]
    From150To250,
    #[serde(rename = "250-500")]
    From250To500,
    #[serde(rename = "500-750")]
    From500To750,
    #[serde(rename = "over-750")]
    Over750,
}

impl EngineBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Under125 => "under-125",
            Self::From125To150 => "125-150",
            Self::From150To250 => "150-250",
            Self::From250To500 => "250-500",
            Self::From500To750 => "500-750",
            Self::Over750 => "over-750",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "under-125" => Some(Self::Under125),
            "125-150" => Some(Self::From125To150),
            "150-250" => Some(Self::From150To250),
            "250-500" => Some(Self::From250To500),
            "500-750" => Some(Self::From500To750),
            "over-750" => Some(Self::Over750),
            _ => None,
        }
    }
}
