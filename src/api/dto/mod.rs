mod common;

pub use common::ApiResponse;
