pub mod handlers;
pub mod query;
pub mod store;

#[cfg(test)]
pub(crate) mod test_support;
