use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use cosmwasm_std::{Binary, Decimal256, Uint128};
use cw20::Cw20ReceiveMsg;

use crate::asset::AssetInfo;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct InstantiateMsg {
    /// Receives both the admin and the upgrader role
    pub owner: String,
    /// cw20 token rewards are paid in
    pub reward_token: String,
    pub emission_per_block: Uint128,
    /// First block that emits rewards
    pub start_block: u64,
    /// Last block that emits rewards
    pub end_block: u64,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Manages pools, emission, pause state and roles
    Admin,
    /// Authorizes contract migrations
    Upgrader,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Upgrader => "upgrader",
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    /// Receives a message of type [`Cw20ReceiveMsg`]
    Receive(Cw20ReceiveMsg),
    /// Stakes into a pool. Native pools expect the coins attached, token pools
    /// pull the amount with an allowance.
    Deposit { pid: u64, amount: Uint128 },
    /// Moves stake into the pool's unstake queue
    Unstake { pid: u64, amount: Uint128 },
    /// Sends every unlocked unstake request back to the sender
    Withdraw { pid: u64 },
    /// Pays out pending rewards
    Claim { pid: u64 },
    /// Settles a pool's rewards up to the current block
    SettlePool { pid: u64 },
    /// Settles every pool up to the current block
    MassUpdatePools {},

    // admin
    AddPool {
        asset: AssetInfo,
        weight: u64,
        min_deposit: Uint128,
        lock_blocks: u64,
    },
    SetPoolWeight {
        pid: u64,
        weight: u64,
    },
    UpdatePool {
        pid: u64,
        min_deposit: Uint128,
        lock_blocks: u64,
    },
    SetEmissionPerBlock {
        emission_per_block: Uint128,
    },
    GrantRole {
        role: Role,
        account: String,
    },
    RevokeRole {
        role: Role,
        account: String,
    },
    /// Drops a role held by the sender
    RenounceRole {
        role: Role,
    },
    Pause {},
    Unpause {},

    // upgrader
    /// Migrates this contract to a new code id. The contract must be its own admin.
    Upgrade {
        new_code_id: u64,
        msg: Binary,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Cw20HookMsg {
    Deposit { pid: u64 },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    Config {},
    State {},
    PoolLength {},
    Pool {
        pid: u64,
    },
    Pools {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
    UserInfo {
        pid: u64,
        user: String,
    },
    /// Reward a claim would pay at `block_height`, defaults to the current block
    PendingReward {
        pid: u64,
        user: String,
        block_height: Option<u64>,
    },
    WithdrawableAmount {
        pid: u64,
        user: String,
    },
    UnstakeRequestCount {
        pid: u64,
        user: String,
    },
    UnstakeRequests {
        pid: u64,
        user: String,
    },
    HasRole {
        role: Role,
        account: String,
    },
    /// Returns the cw2 contract version
    Version {},
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct ConfigResponse {
    pub reward_token: String,
    pub emission_per_block: Uint128,
    pub start_block: u64,
    pub end_block: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct StateResponse {
    pub total_weight: u64,
    pub pool_length: u64,
    pub paused: bool,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct PoolResponse {
    pub pid: u64,
    pub asset: AssetInfo,
    pub weight: u64,
    pub min_deposit: Uint128,
    pub lock_blocks: u64,
    pub total_staked: Uint128,
    pub acc_reward_per_share: Decimal256,
    pub last_settled_block: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct UserInfoResponse {
    pub pid: u64,
    pub user: String,
    pub staked: Uint128,
    pub reward_debt: Decimal256,
    pub pending_reward: Uint128,
    pub claimed_reward: Uint128,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, JsonSchema)]
pub struct UnstakeRequest {
    pub amount: Uint128,
    pub unlock_block: u64,
}

impl UnstakeRequest {
    pub fn is_unlocked(&self, block_height: u64) -> bool {
        self.unlock_block <= block_height
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct UnstakeRequestsResponse {
    pub block_height: u64,
    /// Queued requests, oldest first
    pub requests: Vec<UnstakeRequest>,
    pub requested_amount: Uint128,
    pub withdrawable_amount: Uint128,
}

/// This structure describes a migration message.
/// We currently take no arguments for migrations
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct MigrateMsg {}
