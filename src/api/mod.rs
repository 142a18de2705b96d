pub mod client;

pub use client::{ApiClient, ApiClientError, Day, Exercise, Program, ProgramDraft};
