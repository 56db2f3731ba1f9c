use chrono::{Local, NaiveDate};
use clap::Args;
use operator_registry::error::AppError;
use operator_registry::registry::{
    ListPage, QueryService, RankedDataset, RankedOperator, RegistryImporter, DEFAULT_PAGE_SIZE,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Operator export to rank (CSV)
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Page to print (1-indexed)
    #[arg(long, default_value_t = 1)]
    pub(crate) page: i64,
    /// Operators per page
    #[arg(long, default_value_t = DEFAULT_PAGE_SIZE)]
    pub(crate) per_page: usize,
    /// Field delimiter of the export
    #[arg(long, default_value_t = ';')]
    pub(crate) delimiter: char,
    /// Score tenure as of this date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct SearchArgs {
    /// Operator export to search (CSV)
    #[arg(long)]
    pub(crate) dataset: PathBuf,
    /// Field delimiter of the export
    #[arg(long, default_value_t = ';')]
    pub(crate) delimiter: char,
    /// Score tenure as of this date (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = crate::infra::parse_date)]
    pub(crate) as_of: Option<NaiveDate>,
    /// Text to find in names, registration ids or tax ids
    pub(crate) term: String,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        dataset,
        page,
        per_page,
        delimiter,
        as_of,
    } = args;

    let service = load_service(&dataset, delimiter, as_of)?;
    let listing = service.list(page, per_page)?;
    render_listing(&listing);
    Ok(())
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let SearchArgs {
        dataset,
        delimiter,
        as_of,
        term,
    } = args;

    let service = load_service(&dataset, delimiter, as_of)?;
    let matches = service.search(&term)?;
    if matches.is_empty() {
        println!("No operators match '{}'", term.trim());
        return Ok(());
    }

    println!("{} operator(s) match '{}'", matches.len(), term.trim());
    for entry in matches {
        println!("- {}", describe(entry));
    }
    Ok(())
}

fn load_service(
    dataset: &Path,
    delimiter: char,
    as_of: Option<NaiveDate>,
) -> Result<QueryService, AppError> {
    let delimiter = u8::try_from(delimiter).map_err(|_| {
        AppError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("delimiter '{delimiter}' is not a single byte"),
        ))
    })?;
    let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
    let operators = RegistryImporter::with_delimiter(delimiter).from_path(dataset)?;
    Ok(QueryService::new(Arc::new(RankedDataset::build(
        operators, as_of,
    ))))
}

fn render_listing(listing: &ListPage<'_>) {
    let pagination = listing.pagination;
    println!(
        "Page {} of {} ({} operators, {} per page)",
        pagination.current_page,
        pagination.total_pages,
        pagination.total_items,
        pagination.per_page
    );

    if listing.data.is_empty() {
        println!("\nNo operators on this page");
        return;
    }

    println!();
    for entry in listing.data {
        println!("- {}", describe(entry));
    }
}

fn describe(entry: &RankedOperator) -> String {
    let operator = entry.operator();
    let name = if operator.trade_name.is_empty() {
        operator.legal_name.as_str()
    } else {
        operator.trade_name.as_str()
    };
    let registered = operator
        .registration_date
        .map(|date| date.to_string())
        .unwrap_or_else(|| "undated".to_string());

    format!(
        "{:>6.2} | {} | {} | {} | {} | registered {}",
        entry.relevance_score(),
        operator.registration_id,
        name,
        operator.modality,
        operator.coverage_region,
        registered
    )
}
