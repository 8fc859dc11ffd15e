pub mod cli;
pub mod math;
pub mod test_stores;
