use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::registry::domain::{CoverageRegion, Modality, Operator};
use crate::registry::query::QueryService;
use crate::registry::ranked::RankedDataset;

pub(super) fn as_of() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid as-of date")
}

pub(super) fn operator(legal_name: &str) -> Operator {
    Operator {
        legal_name: legal_name.to_string(),
        ..Operator::default()
    }
}

pub(super) fn numbered(count: usize, prefix: &str) -> Vec<Operator> {
    (0..count)
        .map(|index| Operator {
            registration_id: format!("{:06}", 100_000 + index),
            ..operator(&format!("{prefix} {index:02}"))
        })
        .collect()
}

/// A small registry with distinct scores: Acme is the only "acme" match anywhere.
pub(super) fn mixed_registry() -> Vec<Operator> {
    vec![
        Operator {
            registration_id: "326305".to_string(),
            tax_id: "44649812000138".to_string(),
            trade_name: "Bradesco".to_string(),
            modality: Modality::Other("Seguradora Especializada em Saúde".to_string()),
            coverage_region: CoverageRegion::National,
            phone: Some("1130001000".to_string()),
            registration_date: NaiveDate::from_ymd_opt(1999, 1, 1),
            ..operator("Bradesco Saude S.A.")
        },
        Operator {
            registration_id: "419761".to_string(),
            tax_id: "19541931000125".to_string(),
            trade_name: "Acme".to_string(),
            modality: Modality::MedicalCooperative,
            coverage_region: CoverageRegion::Regional,
            electronic_address: Some("contato@acme.com.br".to_string()),
            registration_date: NaiveDate::from_ymd_opt(2010, 5, 1),
            ..operator("Acme Health Corp")
        },
        Operator {
            registration_id: "346659".to_string(),
            tax_id: "33719485000127".to_string(),
            trade_name: "CASSI".to_string(),
            modality: Modality::SelfManagement,
            coverage_region: CoverageRegion::National,
            electronic_address: Some("cassi@cassi.com.br".to_string()),
            phone: Some("6130001000".to_string()),
            fax: Some("6130001001".to_string()),
            registration_date: NaiveDate::from_ymd_opt(1985, 3, 1),
            ..operator("Caixa de Assistencia dos Funcionarios")
        },
        Operator {
            registration_id: "000582".to_string(),
            tax_id: "02812468000106".to_string(),
            trade_name: "Dental Sorriso".to_string(),
            modality: Modality::Dental,
            coverage_region: CoverageRegion::State,
            ..operator("Odonto Sorriso Ltda")
        },
    ]
}

pub(super) fn service_for(operators: Vec<Operator>) -> Arc<QueryService> {
    Arc::new(QueryService::new(Arc::new(RankedDataset::build(
        operators,
        as_of(),
    ))))
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request builds")
}

pub(super) async fn json_body(response: Response) -> (StatusCode, Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    let value = serde_json::from_slice(&bytes).expect("json body");
    (status, value)
}
