//! HTTP layer — `SwapbookHttp` plus retry policies.

pub mod client;
pub mod retry;

pub use client::SwapbookHttp;
pub use retry::{RetryConfig, RetryPolicy};
