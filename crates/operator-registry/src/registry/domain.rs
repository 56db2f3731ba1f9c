use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use std::fmt;

/// Geographic reach an operator is authorised to sell plans in.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoverageRegion {
    National,
    Regional,
    State,
    Other(String),
}

impl CoverageRegion {
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "nacional" | "national" => Self::National,
            "regional" => Self::Regional,
            "estadual" | "state" => Self::State,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::National => "Nacional",
            Self::Regional => "Regional",
            Self::State => "Estadual",
            Self::Other(label) => label,
        }
    }

    /// Absolute weight; unknown regions score like a state-level operator.
    pub fn weight(&self) -> f64 {
        match self {
            Self::National => 3.0,
            Self::Regional => 2.0,
            Self::State | Self::Other(_) => 1.0,
        }
    }
}

impl Default for CoverageRegion {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for CoverageRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for CoverageRegion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Business model under which the operator is registered.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Modality {
    SelfManagement,
    MedicalCooperative,
    Dental,
    Other(String),
}

impl Modality {
    pub fn from_label(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_lowercase().as_str() {
            "autogestão" | "autogestao" | "self-management" | "self management" => {
                Self::SelfManagement
            }
            "cooperativa médica" | "cooperativa medica" | "medical cooperative" => {
                Self::MedicalCooperative
            }
            "odontológica" | "odontologica" | "dental" => Self::Dental,
            _ => Self::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::SelfManagement => "Autogestão",
            Self::MedicalCooperative => "Cooperativa Médica",
            Self::Dental => "Odontológica",
            Self::Other(label) => label,
        }
    }

    pub fn weight(&self) -> f64 {
        match self {
            Self::SelfManagement => 3.0,
            Self::MedicalCooperative => 2.0,
            Self::Dental | Self::Other(_) => 1.0,
        }
    }
}

impl Default for Modality {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Modality {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// One operator's registration entry as published by the regulator.
///
/// Optional fields are `None` when the source cell was empty or missing. Only
/// `legal_name`, `trade_name`, `registration_id` and `tax_id` are searched; the
/// address and representative fields are carried for display.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Operator {
    pub registration_id: String,
    pub tax_id: String,
    pub legal_name: String,
    pub trade_name: String,
    pub modality: Modality,
    pub street: Option<String>,
    pub number: Option<String>,
    pub complement: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub area_code: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub electronic_address: Option<String>,
    pub representative: Option<String>,
    pub representative_title: Option<String>,
    pub coverage_region: CoverageRegion,
    pub registration_date: Option<NaiveDate>,
}

impl Operator {
    /// Field names as they appear in serialized ranked records.
    pub const COLUMNS: [&'static str; 21] = [
        "registration_id",
        "tax_id",
        "legal_name",
        "trade_name",
        "modality",
        "street",
        "number",
        "complement",
        "district",
        "city",
        "state",
        "postal_code",
        "area_code",
        "phone",
        "fax",
        "electronic_address",
        "representative",
        "representative_title",
        "coverage_region",
        "registration_date",
        "relevance_score",
    ];

    pub fn has_electronic_address(&self) -> bool {
        is_present(self.electronic_address.as_deref())
    }

    pub fn has_phone(&self) -> bool {
        is_present(self.phone.as_deref())
    }

    pub fn has_fax(&self) -> bool {
        is_present(self.fax.as_deref())
    }
}

fn is_present(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// An operator paired with the score computed for it when the dataset was built.
///
/// Fields are private so a score can never be rewritten once ranked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedOperator {
    #[serde(flatten)]
    operator: Operator,
    relevance_score: f64,
}

impl RankedOperator {
    pub(crate) fn new(operator: Operator, relevance_score: f64) -> Self {
        Self {
            operator,
            relevance_score,
        }
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn relevance_score(&self) -> f64 {
        self.relevance_score
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_labels_map_case_insensitively() {
        assert_eq!(CoverageRegion::from_label(" NACIONAL "), CoverageRegion::National);
        assert_eq!(CoverageRegion::from_label("regional"), CoverageRegion::Regional);
        assert_eq!(CoverageRegion::from_label("Estadual"), CoverageRegion::State);
        assert_eq!(
            CoverageRegion::from_label("4"),
            CoverageRegion::Other("4".to_string())
        );
    }

    #[test]
    fn unknown_labels_take_the_other_weight() {
        assert_eq!(CoverageRegion::from_label("Municipal").weight(), 1.0);
        assert_eq!(Modality::from_label("Medicina de Grupo").weight(), 1.0);
        assert_eq!(Modality::default().weight(), 1.0);
    }

    #[test]
    fn modality_accepts_accented_and_plain_spellings() {
        assert_eq!(Modality::from_label("Autogestão"), Modality::SelfManagement);
        assert_eq!(Modality::from_label("AUTOGESTAO"), Modality::SelfManagement);
        assert_eq!(
            Modality::from_label("Cooperativa Médica"),
            Modality::MedicalCooperative
        );
        assert_eq!(Modality::from_label("odontológica"), Modality::Dental);
    }

    #[test]
    fn blank_contact_fields_are_not_present() {
        let operator = Operator {
            phone: Some("  ".to_string()),
            fax: Some("33334444".to_string()),
            ..Operator::default()
        };
        assert!(!operator.has_phone());
        assert!(operator.has_fax());
        assert!(!operator.has_electronic_address());
    }

    #[test]
    fn ranked_operator_serializes_flat_with_score() {
        let ranked = RankedOperator::new(
            Operator {
                legal_name: "Acme Saude".to_string(),
                modality: Modality::MedicalCooperative,
                coverage_region: CoverageRegion::National,
                ..Operator::default()
            },
            6.5,
        );
        let value = serde_json::to_value(&ranked).expect("serializes");
        let object = value.as_object().expect("object");
        assert_eq!(object["legal_name"], "Acme Saude");
        assert_eq!(object["modality"], "Cooperativa Médica");
        assert_eq!(object["coverage_region"], "Nacional");
        assert_eq!(object["relevance_score"], 6.5);

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        let mut columns = Operator::COLUMNS.to_vec();
        keys.sort_unstable();
        columns.sort_unstable();
        assert_eq!(keys, columns);
    }
}
