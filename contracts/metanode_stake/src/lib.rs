pub mod access;
pub mod bond;
pub mod contract;
pub mod error;
pub mod pool;
pub mod query;
pub mod reward;
pub mod state;
