use cosmwasm_std::{OverflowError, StdError, Uint128};
use thiserror::Error;

/// ## Description
/// This enum describes stake contract errors!
#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Invalid message")]
    InvalidMessage {},

    #[error("Invalid funds")]
    InvalidFunds {},

    #[error("Invalid zero amount")]
    InvalidZeroAmount {},

    #[error("Unstake lock must be at least one block")]
    InvalidZeroLockBlocks {},

    #[error("Emission start block must not be after the end block")]
    InvalidEmissionWindow {},

    #[error("Pool {pid} not found")]
    PoolNotFound { pid: u64 },

    #[error("Deposit amount {amount} is below the pool minimum {min}")]
    BelowMinimumDeposit { min: Uint128, amount: Uint128 },

    #[error("Cannot unstake {amount}, staked balance is {staked}")]
    InsufficientStake { staked: Uint128, amount: Uint128 },

    #[error("No unstake request is unlocked yet")]
    NothingWithdrawable {},

    #[error("No reward to claim")]
    NothingToClaim {},

    #[error("Contract is paused")]
    Paused {},

    #[error("Contract is not paused")]
    NotPaused {},

    #[error("Cannot remove the last admin")]
    LastAdmin {},

    #[error("Cannot migrate from a different contract")]
    InvalidMigration {},
}

impl From<OverflowError> for ContractError {
    fn from(o: OverflowError) -> Self {
        StdError::from(o).into()
    }
}
