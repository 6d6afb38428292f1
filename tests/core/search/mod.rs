pub mod test_filters;
pub mod test_search;
