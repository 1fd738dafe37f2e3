pub mod constants;
pub mod pagination;
pub mod status;
pub mod templating;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
