pub mod into_utc_trait;
