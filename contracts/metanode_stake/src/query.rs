use cosmwasm_std::{Deps, Env, Order, StdError, StdResult, Uint128};
use cw_storage_plus::Bound;
use metanode::stake::{
    ConfigResponse, PoolResponse, Role, StateResponse, UnstakeRequest, UnstakeRequestsResponse,
    UserInfoResponse,
};

use crate::access::has_role;
use crate::reward::{harvest, settle_pool};
use crate::state::{
    read_pool, read_unstake_requests, read_user_info, PoolInfo, CONFIG, POOLS, STATE,
};

const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 30;

fn load_pool(deps: Deps, pid: u64) -> StdResult<PoolInfo> {
    read_pool(deps.storage, pid).map_err(|e| StdError::generic_err(e.to_string()))
}

fn to_pool_response(pid: u64, pool: PoolInfo) -> PoolResponse {
    PoolResponse {
        pid,
        asset: pool.asset,
        weight: pool.weight,
        min_deposit: pool.min_deposit,
        lock_blocks: pool.lock_blocks,
        total_staked: pool.total_staked,
        acc_reward_per_share: pool.acc_reward_per_share,
        last_settled_block: pool.last_settled_block,
    }
}

fn sum_amount<'a>(mut requests: impl Iterator<Item = &'a UnstakeRequest>) -> StdResult<Uint128> {
    requests.try_fold(Uint128::zero(), |total, request| {
        Ok(total.checked_add(request.amount)?)
    })
}

pub fn query_config(deps: Deps) -> StdResult<ConfigResponse> {
    let config = CONFIG.load(deps.storage)?;
    Ok(ConfigResponse {
        reward_token: config.reward_token.0.to_string(),
        emission_per_block: config.emission_per_block,
        start_block: config.start_block,
        end_block: config.end_block,
    })
}

pub fn query_state(deps: Deps) -> StdResult<StateResponse> {
    let state = STATE.load(deps.storage)?;
    Ok(StateResponse {
        total_weight: state.total_weight,
        pool_length: state.pool_count,
        paused: state.paused,
    })
}

pub fn query_pool_length(deps: Deps) -> StdResult<u64> {
    Ok(STATE.load(deps.storage)?.pool_count)
}

pub fn query_pool(deps: Deps, pid: u64) -> StdResult<PoolResponse> {
    Ok(to_pool_response(pid, load_pool(deps, pid)?))
}

pub fn query_pools(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Vec<PoolResponse>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT) as usize;
    let start = start_after.map(Bound::exclusive);

    POOLS
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| item.map(|(pid, pool)| to_pool_response(pid, pool)))
        .collect()
}

pub fn query_user_info(deps: Deps, pid: u64, user: String) -> StdResult<UserInfoResponse> {
    load_pool(deps, pid)?;
    let user_addr = deps.api.addr_validate(&user)?;
    let user_info = read_user_info(deps.storage, pid, &user_addr)?;

    Ok(UserInfoResponse {
        pid,
        user: user_addr.to_string(),
        staked: user_info.staked,
        reward_debt: user_info.reward_debt,
        pending_reward: user_info.pending_reward,
        claimed_reward: user_info.claimed_reward,
    })
}

/// Settles copies of the pool and the user at `block_height`, so the result is
/// exactly what a claim in that block would pay.
pub fn query_pending_reward(
    deps: Deps,
    env: Env,
    pid: u64,
    user: String,
    block_height: Option<u64>,
) -> StdResult<Uint128> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let mut pool = load_pool(deps, pid)?;
    let user_addr = deps.api.addr_validate(&user)?;
    let mut user_info = read_user_info(deps.storage, pid, &user_addr)?;

    let block_height = block_height.unwrap_or(env.block.height);
    settle_pool(&config, state.total_weight, &mut pool, block_height)?;
    harvest(&pool, &mut user_info)?;

    Ok(user_info.pending_reward)
}

pub fn query_withdrawable_amount(
    deps: Deps,
    env: Env,
    pid: u64,
    user: String,
) -> StdResult<Uint128> {
    load_pool(deps, pid)?;
    let user_addr = deps.api.addr_validate(&user)?;
    let requests = read_unstake_requests(deps.storage, pid, &user_addr)?;

    sum_amount(
        requests
            .iter()
            .filter(|request| request.is_unlocked(env.block.height)),
    )
}

pub fn query_unstake_request_count(deps: Deps, pid: u64, user: String) -> StdResult<u64> {
    load_pool(deps, pid)?;
    let user_addr = deps.api.addr_validate(&user)?;
    Ok(read_unstake_requests(deps.storage, pid, &user_addr)?.len() as u64)
}

pub fn query_unstake_requests(
    deps: Deps,
    env: Env,
    pid: u64,
    user: String,
) -> StdResult<UnstakeRequestsResponse> {
    load_pool(deps, pid)?;
    let user_addr = deps.api.addr_validate(&user)?;
    let requests = read_unstake_requests(deps.storage, pid, &user_addr)?;
    let block_height = env.block.height;

    Ok(UnstakeRequestsResponse {
        block_height,
        requested_amount: sum_amount(requests.iter())?,
        withdrawable_amount: sum_amount(
            requests
                .iter()
                .filter(|request| request.is_unlocked(block_height)),
        )?,
        requests,
    })
}

pub fn query_has_role(deps: Deps, role: Role, account: String) -> StdResult<bool> {
    let account = deps.api.addr_validate(&account)?;
    Ok(has_role(deps.storage, role, &account))
}
