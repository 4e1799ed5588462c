pub mod compute;
pub mod requests;
pub mod responses;
