use super::normalizer::{collapse_whitespace, normalize_header};
use crate::registry::domain::{CoverageRegion, Modality, Operator};
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Deserializer};
use std::io::Read;

/// Outcome of reading one export: parsed operators plus per-field recoveries.
#[derive(Debug, Default)]
pub(crate) struct ParsedExport {
    pub(crate) operators: Vec<Operator>,
    pub(crate) malformed_dates: usize,
}

pub(crate) fn parse_records<R: Read>(
    reader: R,
    delimiter: u8,
) -> Result<ParsedExport, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers: csv::StringRecord = csv_reader
        .headers()?
        .iter()
        .map(normalize_header)
        .collect();
    csv_reader.set_headers(headers);

    let mut export = ParsedExport::default();
    for (index, record) in csv_reader.deserialize::<CadopRow>().enumerate() {
        let row = record?;
        let registration_date = match row.registration_date.as_deref() {
            Some(raw) => {
                let parsed = parse_date(raw);
                if parsed.is_none() {
                    tracing::debug!(row = index + 1, value = raw, "unparseable registration date");
                    export.malformed_dates += 1;
                }
                parsed
            }
            None => None,
        };

        export.operators.push(row.into_operator(registration_date));
    }

    Ok(export)
}

/// One row of the regulator's active-operator export.
#[derive(Debug, Deserialize)]
struct CadopRow {
    #[serde(rename = "Registro_ANS", default)]
    registration_id: String,
    #[serde(rename = "CNPJ", default)]
    tax_id: String,
    #[serde(rename = "Razao_Social", default)]
    legal_name: String,
    #[serde(rename = "Nome_Fantasia", default)]
    trade_name: String,
    #[serde(rename = "Modalidade", default)]
    modality: String,
    #[serde(rename = "Logradouro", default, deserialize_with = "empty_string_as_none")]
    street: Option<String>,
    #[serde(rename = "Numero", default, deserialize_with = "empty_string_as_none")]
    number: Option<String>,
    #[serde(rename = "Complemento", default, deserialize_with = "empty_string_as_none")]
    complement: Option<String>,
    #[serde(rename = "Bairro", default, deserialize_with = "empty_string_as_none")]
    district: Option<String>,
    #[serde(rename = "Cidade", default, deserialize_with = "empty_string_as_none")]
    city: Option<String>,
    #[serde(rename = "UF", default, deserialize_with = "empty_string_as_none")]
    state: Option<String>,
    #[serde(rename = "CEP", default, deserialize_with = "empty_string_as_none")]
    postal_code: Option<String>,
    #[serde(rename = "DDD", default, deserialize_with = "empty_string_as_none")]
    area_code: Option<String>,
    #[serde(rename = "Telefone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
    #[serde(rename = "Fax", default, deserialize_with = "empty_string_as_none")]
    fax: Option<String>,
    #[serde(
        rename = "Endereco_eletronico",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    electronic_address: Option<String>,
    #[serde(rename = "Representante", default, deserialize_with = "empty_string_as_none")]
    representative: Option<String>,
    #[serde(
        rename = "Cargo_Representante",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    representative_title: Option<String>,
    #[serde(rename = "Regiao_de_Comercializacao", default)]
    coverage_region: String,
    #[serde(
        rename = "Data_Registro_ANS",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    registration_date: Option<String>,
}

impl CadopRow {
    fn into_operator(self, registration_date: Option<NaiveDate>) -> Operator {
        Operator {
            registration_id: self.registration_id,
            tax_id: self.tax_id,
            legal_name: collapse_whitespace(&self.legal_name),
            trade_name: collapse_whitespace(&self.trade_name),
            modality: Modality::from_label(&self.modality),
            street: self.street,
            number: self.number,
            complement: self.complement,
            district: self.district,
            city: self.city,
            state: self.state,
            postal_code: self.postal_code,
            area_code: self.area_code,
            phone: self.phone,
            fax: self.fax,
            electronic_address: self.electronic_address,
            representative: self.representative,
            representative_title: self.representative_title,
            coverage_region: CoverageRegion::from_label(&self.coverage_region),
            registration_date,
        }
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in ["%Y-%m-%d", "%d/%m/%Y"] {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|dt| dt.date_naive())
}

#[cfg(test)]
pub(crate) fn parse_date_for_tests(value: &str) -> Option<NaiveDate> {
    parse_date(value)
}
