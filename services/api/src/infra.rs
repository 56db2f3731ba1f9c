use chrono::NaiveDate;
use metrics_exporter_prometheus::PrometheusHandle;
use operator_registry::config::DatasetConfig;
use operator_registry::registry::{QueryService, RankedDataset, RegistryImporter};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Imports and ranks the configured export once.
///
/// A failed or empty import is logged here and yields a service that reports the
/// dataset as unavailable; it is not retried until the process restarts.
pub(crate) fn load_query_service(dataset: &DatasetConfig, as_of: NaiveDate) -> QueryService {
    let importer = RegistryImporter::with_delimiter(dataset.delimiter);
    let operators = match importer.from_path(&dataset.path) {
        Ok(operators) => operators,
        Err(err) => {
            error!(path = %dataset.path.display(), error = %err, "operator dataset unavailable");
            return QueryService::unavailable();
        }
    };

    if operators.is_empty() {
        error!(path = %dataset.path.display(), "operator dataset is empty");
        return QueryService::unavailable();
    }

    let ranked = RankedDataset::build(operators, as_of);
    info!(
        path = %dataset.path.display(),
        records = ranked.total_count(),
        %as_of,
        "operator dataset ranked"
    );
    QueryService::new(Arc::new(ranked))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("valid as-of date")
    }

    fn write_export(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("temp file");
        file.write_all(contents.as_bytes()).expect("write export");
        path
    }

    #[test]
    fn missing_export_leaves_service_unavailable() {
        let config = DatasetConfig {
            path: PathBuf::from("./no-such-export.csv"),
            delimiter: b';',
        };
        assert!(!load_query_service(&config, as_of()).is_available());
    }

    #[test]
    fn header_only_export_leaves_service_unavailable() {
        let path = write_export("header-only.csv", "Registro_ANS;Razao_Social\n");
        let config = DatasetConfig {
            path: path.clone(),
            delimiter: b';',
        };
        assert!(!load_query_service(&config, as_of()).is_available());
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn populated_export_is_ranked() {
        let path = write_export(
            "populated.csv",
            "Registro_ANS;Razao_Social;Regiao_de_Comercializacao\n1;Local;Estadual\n2;Everywhere;Nacional\n",
        );
        let config = DatasetConfig {
            path: path.clone(),
            delimiter: b';',
        };
        let service = load_query_service(&config, as_of());
        let dataset = service.dataset().expect("dataset available");
        assert_eq!(dataset.total_count(), 2);
        assert_eq!(dataset.all()[0].operator().legal_name, "Everywhere");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn parse_date_requires_iso_format() {
        let leap_day = NaiveDate::from_ymd_opt(2024, 2, 29).expect("leap day");
        assert_eq!(parse_date(" 2024-02-29 "), Ok(leap_day));
        assert!(parse_date("29/02/2024").is_err());
    }
}
