use cw_storage_plus::{Item, Map};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Addr, Decimal256, Empty, StdResult, Storage, Uint128};
use metanode::asset::AssetInfo;
use metanode::stake::UnstakeRequest;
use metanode::token::Token;

use crate::error::ContractError;

// Keys are part of the persisted layout. Never rename them; new fields are appended with serde defaults.
pub const CONFIG: Item<Config> = Item::new("config");
pub const STATE: Item<State> = Item::new("state");
pub const POOLS: Map<u64, PoolInfo> = Map::new("pools");
pub const USERS: Map<(u64, &Addr), UserInfo> = Map::new("users");
pub const UNSTAKE_REQUESTS: Map<(u64, &Addr), Vec<UnstakeRequest>> = Map::new("unstake_requests");
pub const ROLES: Map<(&str, &Addr), Empty> = Map::new("roles");

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Config {
    pub reward_token: Token,
    pub emission_per_block: Uint128,
    pub start_block: u64,
    pub end_block: u64,
}

impl Config {
    /// Clamps a block into the emission window.
    pub fn emission_block(&self, block_height: u64) -> u64 {
        block_height.max(self.start_block).min(self.end_block)
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct State {
    pub total_weight: u64,
    pub pool_count: u64,
    pub paused: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PoolInfo {
    pub asset: AssetInfo,
    pub weight: u64,
    pub min_deposit: Uint128,
    pub lock_blocks: u64,
    pub total_staked: Uint128,
    pub acc_reward_per_share: Decimal256,
    pub last_settled_block: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema, Default)]
pub struct UserInfo {
    pub staked: Uint128,
    /// Pool index recorded at the last settlement of this user
    pub reward_debt: Decimal256,
    pub pending_reward: Uint128,
    #[serde(default)]
    pub claimed_reward: Uint128,
}

pub fn read_pool(storage: &dyn Storage, pid: u64) -> Result<PoolInfo, ContractError> {
    POOLS
        .may_load(storage, pid)?
        .ok_or(ContractError::PoolNotFound { pid })
}

/// returns the position of this user in the pool, empty when never staked
pub fn read_user_info(storage: &dyn Storage, pid: u64, user: &Addr) -> StdResult<UserInfo> {
    Ok(USERS.may_load(storage, (pid, user))?.unwrap_or_default())
}

pub fn read_unstake_requests(
    storage: &dyn Storage,
    pid: u64,
    user: &Addr,
) -> StdResult<Vec<UnstakeRequest>> {
    Ok(UNSTAKE_REQUESTS
        .may_load(storage, (pid, user))?
        .unwrap_or_default())
}

pub fn assert_not_paused(storage: &dyn Storage) -> Result<(), ContractError> {
    if STATE.load(storage)?.paused {
        return Err(ContractError::Paused {});
    }

    Ok(())
}
