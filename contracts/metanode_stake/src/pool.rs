use cosmwasm_std::{
    attr, Decimal256, DepsMut, Env, MessageInfo, OverflowError, OverflowOperation, Response,
    Uint128,
};
use metanode::asset::AssetInfo;
use metanode::stake::Role;

use crate::access::assert_role;
use crate::error::ContractError;
use crate::reward::{mass_update_pools, settle_pool};
use crate::state::{read_pool, PoolInfo, CONFIG, POOLS, STATE};

/// ## Description
/// Appends a new pool. All existing pools are settled first because the new weight
/// dilutes their share of future emission.
pub fn add_pool(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    asset: AssetInfo,
    weight: u64,
    min_deposit: Uint128,
    lock_blocks: u64,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;
    if lock_blocks == 0 {
        return Err(ContractError::InvalidZeroLockBlocks {});
    }
    asset.check(deps.api)?;

    let config = CONFIG.load(deps.storage)?;
    let mut state = STATE.load(deps.storage)?;
    let block_height = env.block.height;
    let total_weight = state.total_weight.checked_add(weight).ok_or_else(|| {
        OverflowError::new(OverflowOperation::Add, state.total_weight, weight)
    })?;

    mass_update_pools(deps.storage, &config, &state, block_height)?;

    let pid = state.pool_count;
    POOLS.save(
        deps.storage,
        pid,
        &PoolInfo {
            asset: asset.clone(),
            weight,
            min_deposit,
            lock_blocks,
            total_staked: Uint128::zero(),
            acc_reward_per_share: Decimal256::zero(),
            last_settled_block: block_height.max(config.start_block),
        },
    )?;

    state.pool_count += 1;
    state.total_weight = total_weight;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "add_pool"),
        attr("pid", pid.to_string()),
        attr("asset", asset.to_string()),
        attr("weight", weight.to_string()),
        attr("min_deposit", min_deposit.to_string()),
        attr("lock_blocks", lock_blocks.to_string()),
    ]))
}

/// ## Description
/// Changes the emission weight of a pool. Every pool is settled with the old total
/// weight before the new one takes effect.
pub fn set_pool_weight(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pid: u64,
    weight: u64,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;
    read_pool(deps.storage, pid)?;

    let config = CONFIG.load(deps.storage)?;
    let mut state = STATE.load(deps.storage)?;

    mass_update_pools(deps.storage, &config, &state, env.block.height)?;

    let mut pool = read_pool(deps.storage, pid)?;
    let remaining_weight = state.total_weight.checked_sub(pool.weight).ok_or_else(|| {
        OverflowError::new(OverflowOperation::Sub, state.total_weight, pool.weight)
    })?;
    state.total_weight = remaining_weight.checked_add(weight).ok_or_else(|| {
        OverflowError::new(OverflowOperation::Add, remaining_weight, weight)
    })?;
    pool.weight = weight;

    POOLS.save(deps.storage, pid, &pool)?;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_pool_weight"),
        attr("pid", pid.to_string()),
        attr("weight", weight.to_string()),
        attr("total_weight", state.total_weight.to_string()),
    ]))
}

/// ## Description
/// Updates deposit minimum and unstake lock of a pool. Queued unstake requests keep
/// the unlock block they were created with.
pub fn update_pool(
    deps: DepsMut,
    info: MessageInfo,
    pid: u64,
    min_deposit: Uint128,
    lock_blocks: u64,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;
    if lock_blocks == 0 {
        return Err(ContractError::InvalidZeroLockBlocks {});
    }

    let mut pool = read_pool(deps.storage, pid)?;
    pool.min_deposit = min_deposit;
    pool.lock_blocks = lock_blocks;
    POOLS.save(deps.storage, pid, &pool)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "update_pool"),
        attr("pid", pid.to_string()),
        attr("min_deposit", min_deposit.to_string()),
        attr("lock_blocks", lock_blocks.to_string()),
    ]))
}

pub fn set_emission_per_block(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    emission_per_block: Uint128,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let mut config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;

    // rewards up to this block are paid at the old rate
    mass_update_pools(deps.storage, &config, &state, env.block.height)?;

    config.emission_per_block = emission_per_block;
    CONFIG.save(deps.storage, &config)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "set_emission_per_block"),
        attr("emission_per_block", emission_per_block.to_string()),
    ]))
}

pub fn execute_settle_pool(deps: DepsMut, env: Env, pid: u64) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let mut pool = read_pool(deps.storage, pid)?;

    settle_pool(&config, state.total_weight, &mut pool, env.block.height)?;
    POOLS.save(deps.storage, pid, &pool)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "settle_pool"),
        attr("pid", pid.to_string()),
        attr("acc_reward_per_share", pool.acc_reward_per_share.to_string()),
    ]))
}

pub fn execute_mass_update_pools(deps: DepsMut, env: Env) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;

    mass_update_pools(deps.storage, &config, &state, env.block.height)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "mass_update_pools"),
        attr("pool_length", state.pool_count.to_string()),
    ]))
}
