use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FilterError {
    #[error("Unknown sort order '{0}', expected one of: date_desc, date_asc, amount_desc, amount_asc, category")]
    UnknownSortOrder(String)
}
