mod debounce;
mod errors;
mod filter;
#[cfg(test)]
mod tests;
mod view;

pub use debounce::{SearchDebouncer, DEFAULT_QUIET_PERIOD};
pub use errors::FilterError;
pub use filter::{CategoryFilter, FilterSpec, SortOrder};
pub use view::apply_view;
