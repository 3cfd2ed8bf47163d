use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Raised when a wire label does not belong to its closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("`{value}` is not a valid {domain}")]
pub struct UnknownLabel {
    pub domain: &'static str,
    pub value: String,
}

fn parse_label<T, const N: usize>(
    domain: &'static str,
    variants: [T; N],
    label: fn(T) -> &'static str,
    raw: &str,
) -> Result<T, UnknownLabel>
where
    T: Copy,
{
    variants
        .into_iter()
        .find(|variant| label(*variant) == raw)
        .ok_or_else(|| UnknownLabel {
            domain,
            value: raw.to_string(),
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Mitigation,
    Adaptation,
}

impl Category {
    pub const fn ordered() -> [Self; 2] {
        [Self::Mitigation, Self::Adaptation]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Mitigation => "Mitigation",
            Self::Adaptation => "Adaptation",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Sector {
    #[serde(rename = "AFOLU")]
    Afolu,
    #[serde(rename = "Stationary Energy")]
    StationaryEnergy,
    Transportation,
    Waste,
    #[serde(rename = "IPPU")]
    Ippu,
}

impl Sector {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Afolu,
            Self::StationaryEnergy,
            Self::Transportation,
            Self::Waste,
            Self::Ippu,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Afolu => "AFOLU",
            Self::StationaryEnergy => "Stationary Energy",
            Self::Transportation => "Transportation",
            Self::Waste => "Waste",
            Self::Ippu => "IPPU",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CostTier {
    Low,
    Medium,
    High,
}

impl CostTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Lifecycle of an action. Declaration order is the display order used by
/// selectors and KPI breakdowns; [`ActionStatus::priority`] drives sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ActionStatus {
    #[serde(rename = "Not started")]
    NotStarted,
    #[serde(rename = "Ready to start")]
    ReadyToStart,
    #[serde(rename = "In progress")]
    InProgress,
    Completed,
    #[serde(rename = "On hold")]
    OnHold,
}

impl ActionStatus {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::NotStarted,
            Self::ReadyToStart,
            Self::InProgress,
            Self::Completed,
            Self::OnHold,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::ReadyToStart => "Ready to start",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::OnHold => "On hold",
        }
    }

    /// Work that can be acted on ranks first.
    pub const fn priority(self) -> u8 {
        match self {
            Self::ReadyToStart => 1,
            Self::InProgress => 2,
            Self::Completed => 3,
            Self::NotStarted => 4,
            Self::OnHold => 5,
        }
    }

    /// Following status in display order, wrapping after `On hold`.
    pub const fn next(self) -> Self {
        match self {
            Self::NotStarted => Self::ReadyToStart,
            Self::ReadyToStart => Self::InProgress,
            Self::InProgress => Self::Completed,
            Self::Completed => Self::OnHold,
            Self::OnHold => Self::NotStarted,
        }
    }
}

macro_rules! label_conversions {
    ($($ty:ident => $domain:literal),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.label())
                }
            }

            impl FromStr for $ty {
                type Err = UnknownLabel;

                fn from_str(raw: &str) -> Result<Self, Self::Err> {
                    parse_label($domain, Self::ordered(), Self::label, raw)
                }
            }
        )+
    };
}

label_conversions! {
    Category => "category",
    Sector => "sector",
    CostTier => "cost tier",
    ActionStatus => "status",
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusHistoryEntry {
    pub date: String,
    pub status: ActionStatus,
}

/// One climate action tracked for a city.
///
/// Field order matches the upstream record layout so JSON exports keep the
/// shape the dashboard was fed with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    pub id: String,
    pub city: String,
    pub country: String,
    pub action_name: String,
    pub category: Category,
    pub sector: Sector,
    pub cost_tier: CostTier,
    #[serde(
        rename = "investmentUSD",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_amount"
    )]
    pub investment_usd: Option<f64>,
    pub status: ActionStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reduction_potential_pct: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub implementation_time_years: Option<String>,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    pub last_updated: String,
    #[serde(
        rename = "status_history",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub status_history: Option<Vec<StatusHistoryEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

/// Integer form of a whole, finite amount.
pub(crate) fn whole_amount(amount: f64) -> Option<i64> {
    (amount.is_finite() && amount.fract() == 0.0 && amount.abs() < i64::MAX as f64)
        .then_some(amount as i64)
}

fn serialize_amount<S>(amount: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match amount.map(|value| (value, whole_amount(value))) {
        Some((_, Some(whole))) => serializer.serialize_i64(whole),
        Some((value, None)) => serializer.serialize_f64(value),
        None => serializer.serialize_none(),
    }
}

impl ActionRecord {
    pub fn tags(&self) -> &[String] {
        self.tags.as_deref().unwrap_or_default()
    }

    pub fn status_history(&self) -> &[StatusHistoryEntry] {
        self.status_history.as_deref().unwrap_or_default()
    }
}
