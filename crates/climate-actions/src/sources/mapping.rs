use serde_json::{Map, Value};

/// Record field a spreadsheet or CSV column feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RecordField {
    Id,
    City,
    Country,
    ActionName,
    Category,
    Sector,
    CostTier,
    InvestmentUsd,
    Status,
    ReductionPotentialPct,
    ImplementationTimeYears,
    Description,
    Owner,
    LastUpdated,
    Tags,
}

impl RecordField {
    /// Header cells match case-insensitively, ignoring stray BOMs and padding.
    pub(crate) fn from_header(header: &str) -> Option<Self> {
        let normalized = header
            .replace(['\u{feff}', '\u{200b}'], "")
            .trim()
            .to_ascii_lowercase();
        let field = match normalized.as_str() {
            "id" => Self::Id,
            "city" => Self::City,
            "country" => Self::Country,
            "actionname" => Self::ActionName,
            "category" => Self::Category,
            "sector" => Self::Sector,
            "costtier" => Self::CostTier,
            "investmentusd" => Self::InvestmentUsd,
            "status" => Self::Status,
            "reductionpotentialpct" => Self::ReductionPotentialPct,
            "implementationtimeyears" => Self::ImplementationTimeYears,
            "description" => Self::Description,
            "owner" => Self::Owner,
            "lastupdated" => Self::LastUpdated,
            "tags" => Self::Tags,
            _ => return None,
        };
        Some(field)
    }

    const fn key(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::City => "city",
            Self::Country => "country",
            Self::ActionName => "actionName",
            Self::Category => "category",
            Self::Sector => "sector",
            Self::CostTier => "costTier",
            Self::InvestmentUsd => "investmentUSD",
            Self::Status => "status",
            Self::ReductionPotentialPct => "reductionPotentialPct",
            Self::ImplementationTimeYears => "implementationTimeYears",
            Self::Description => "description",
            Self::Owner => "owner",
            Self::LastUpdated => "lastUpdated",
            Self::Tags => "tags",
        }
    }
}

pub(crate) fn header_fields<'a, I>(headers: I) -> Vec<Option<RecordField>>
where
    I: IntoIterator<Item = &'a str>,
{
    headers.into_iter().map(RecordField::from_header).collect()
}

/// Builds one JSON record from a row of cells. Returns `None` for rows
/// without an id. Required text fields are copied even when empty so the
/// validator reports them; empty optional cells are left out.
pub(crate) fn row_to_record<'a, I>(fields: &[Option<RecordField>], cells: I) -> Option<Value>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut cells = cells.into_iter();
    let mut record = Map::new();

    for field in fields {
        let cell = cells.next().unwrap_or_default().trim();
        let Some(field) = field else {
            continue;
        };

        let value = match field {
            RecordField::InvestmentUsd => parse_investment(cell).map(Value::from),
            RecordField::Tags => parse_tags(cell),
            RecordField::ReductionPotentialPct
            | RecordField::ImplementationTimeYears
            | RecordField::Owner => (!cell.is_empty()).then(|| Value::from(cell)),
            _ => Some(Value::from(cell)),
        };

        match value {
            Some(value) => {
                record.insert(field.key().to_string(), value);
            }
            None => {
                record.remove(field.key());
            }
        }
    }

    let has_id = record
        .get(RecordField::Id.key())
        .and_then(Value::as_str)
        .is_some_and(|id| !id.is_empty());
    has_id.then_some(Value::Object(record))
}

/// Leading integer part, ignoring thousands separators.
fn parse_investment(cell: &str) -> Option<i64> {
    let digits: String = cell.chars().filter(|c| *c != ',' && *c != '_').collect();
    if let Ok(amount) = digits.parse::<i64>() {
        return Some(amount);
    }
    let amount = digits.parse::<f64>().ok()?;
    amount.is_finite().then(|| amount.trunc() as i64)
}

fn parse_tags(cell: &str) -> Option<Value> {
    if cell.is_empty() {
        return None;
    }
    let tags = cell
        .split(';')
        .map(str::trim)
        .map(Value::from)
        .collect::<Vec<_>>();
    Some(Value::Array(tags))
}
