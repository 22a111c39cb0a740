pub mod asset;
pub mod stake;
pub mod token;
