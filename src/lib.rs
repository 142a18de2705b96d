pub mod api;
pub mod config;
pub mod format;
pub mod programs;
pub mod studio;
#[doc(hidden)]
pub mod test_support;
