pub mod admin_accounts;
pub mod payload;
pub mod query_filter;
pub mod resources;
pub mod token_service;
