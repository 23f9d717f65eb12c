pub mod config;
pub mod dashboard;
pub mod errors;
pub mod irrigation;
pub mod report;
pub mod sensors;
pub mod weather;

#[cfg(test)]
mod tests;
