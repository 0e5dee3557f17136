use serde::{Deserialize, Serialize};

/// Fuel categories shared between compiled profiles and normalized candidates.
///
/// Profiles only ever recommend `Petrol`, `Diesel`, `Hybrid` or `Electric`;
/// the remaining variants exist so candidate records can carry what sources
/// actually report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuelType {
    Petrol,
    Diesel,
    Hybrid,
    PluginHybrid,
    Electric,
    Unknown,
}

impl FuelType {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Petrol => "Petrol",
            Self::Diesel => "Diesel",
            Self::Hybrid => "Hybrid",
            Self::PluginHybrid => "Plug-in Hybrid",
            Self::Electric => "Electric",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyStyle {
    Hatchback,
    Sedan,
    Estate,
    Suv,
    Van,
    Coupe,
    Pickup,
    Unknown,
}

impl BodyStyle {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hatchback => "Hatchback",
            Self::Sedan => "Sedan",
            Self::Estate => "Estate",
            Self::Suv => "SUV",
            Self::Van => "Van",
            Self::Coupe => "Coupe",
            Self::Pickup => "Pickup",
            Self::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    Manual,
    Automatic,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DriveType {
    FrontWheel,
    RearWheel,
    AllWheel,
    Unknown,
}

/// Market segments in preference order as produced by the compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Segment {
    A,
    B,
    C,
    D,
    BSuv,
    CSuv,
    DSuv,
    Van,
    LargeSuv,
}

impl Segment {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A (city car)",
            Self::B => "B (supermini)",
            Self::C => "C (compact)",
            Self::D => "D (large)",
            Self::BSuv => "B-SUV",
            Self::CSuv => "C-SUV",
            Self::DSuv => "D-SUV",
            Self::Van => "Van / MPV",
            Self::LargeSuv => "Large SUV",
        }
    }

    /// Whether this is one of the plain hatch/sedan segments, as opposed to
    /// an SUV or people-carrier entry.
    pub const fn is_plain(self) -> bool {
        matches!(self, Self::A | Self::B | Self::C | Self::D)
    }

    /// The elevated counterpart a plain segment gets when all-wheel drive is
    /// required. The A segment has no SUV variant of its own, so it shares
    /// the B-SUV one.
    pub const fn suv_counterpart(self) -> Option<Self> {
        match self {
            Self::A | Self::B => Some(Self::BSuv),
            Self::C => Some(Self::CSuv),
            Self::D => Some(Self::DSuv),
            _ => None,
        }
    }

    /// Typical body style buyers associate with the segment, used for the
    /// profile's recommended style.
    pub const fn typical_body_style(self) -> BodyStyle {
        match self {
            Self::A | Self::B => BodyStyle::Hatchback,
            Self::C => BodyStyle::Estate,
            Self::D => BodyStyle::Sedan,
            Self::BSuv | Self::CSuv | Self::DSuv | Self::LargeSuv => BodyStyle::Suv,
            Self::Van => BodyStyle::Van,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReliabilityPriority {
    Low,
    Medium,
    High,
}

/// Where a candidate record came from. Downstream consumers must disclose
/// synthetic records as illustrative rather than live listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateSource {
    Registry,
    Classifieds,
    Synthetic,
}

impl CandidateSource {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::Classifieds => "classifieds",
            Self::Synthetic => "synthetic",
        }
    }
}

/// Normalized representation of one vehicle, regardless of source.
///
/// Numeric fields use `0` as the documented "unknown" sentinel rather than an
/// option, which keeps downstream scoring arithmetic simple. A zero is never
/// a real value for power, seats or the physical dimensions. `mileage_km`
/// stays `0` for registry records, which describe a specification rather than
/// a specific used unit, and `asking_price` is `0` when the source did not
/// state one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    /// Source-qualified identifier, unique within one gateway result set.
    pub id: String,
    pub source: CandidateSource,
    pub make: String,
    pub model: String,
    pub variant: String,
    pub model_year: i32,
    pub body_style: BodyStyle,
    pub fuel_type: FuelType,
    pub transmission: Transmission,
    pub power_kw: u32,
    pub torque_nm: u32,
    pub mileage_km: u32,
    pub asking_price: u32,
    pub seat_count: u32,
    /// Derived at construction: `seat_count >= 7`.
    pub has_third_row: bool,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub fuel_consumption_l_per_100km: f32,
    pub co2_g_per_km: u32,
    pub drive_type: DriveType,
}

impl CandidateRecord {
    /// Display name for reports, e.g. "Skoda Octavia Combi (2019)".
    pub fn display_name(&self) -> String {
        let mut name = format!("{} {}", self.make, self.model);
        if !self.variant.is_empty() {
            name.push(' ');
            name.push_str(&self.variant);
        }
        if self.model_year > 0 {
            name.push_str(&format!(" ({})", self.model_year));
        }
        name
    }
}
