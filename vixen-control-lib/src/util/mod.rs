pub mod acknowledgment;
pub mod endpoint;
pub mod error;
#[cfg(test)]
pub(crate) mod log_capture;
