use cosmwasm_std::{Decimal256, StdResult, Storage, Uint128, Uint256};

use crate::state::{Config, PoolInfo, State, UserInfo, POOLS};

/// Reward emitted to a pool between two blocks, clamped to the emission window.
/// Integer division truncates, so the sum over pools never exceeds the emission.
pub fn compute_pool_reward(
    config: &Config,
    total_weight: u64,
    pool: &PoolInfo,
    from_block: u64,
    to_block: u64,
) -> StdResult<Uint256> {
    if total_weight == 0 {
        return Ok(Uint256::zero());
    }

    let elapsed = config
        .emission_block(to_block)
        .saturating_sub(config.emission_block(from_block));
    if elapsed == 0 {
        return Ok(Uint256::zero());
    }

    let emitted = Uint256::from(elapsed).checked_mul(Uint256::from(config.emission_per_block))?;
    Ok(emitted.multiply_ratio(pool.weight, total_weight))
}

// compute distributed rewards and update the pool reward index
pub fn settle_pool(
    config: &Config,
    total_weight: u64,
    pool: &mut PoolInfo,
    block_height: u64,
) -> StdResult<()> {
    if block_height <= pool.last_settled_block {
        return Ok(());
    }

    if pool.total_staked.is_zero() {
        pool.last_settled_block = block_height;
        return Ok(());
    }

    let pool_reward = compute_pool_reward(
        config,
        total_weight,
        pool,
        pool.last_settled_block,
        block_height,
    )?;
    if !pool_reward.is_zero() {
        pool.acc_reward_per_share = pool.acc_reward_per_share
            + Decimal256::from_ratio(pool_reward, pool.total_staked);
    }
    pool.last_settled_block = block_height;

    Ok(())
}

/// Settles every pool in index order.
pub fn mass_update_pools(
    storage: &mut dyn Storage,
    config: &Config,
    state: &State,
    block_height: u64,
) -> StdResult<()> {
    for pid in 0..state.pool_count {
        let mut pool = POOLS.load(storage, pid)?;
        settle_pool(config, state.total_weight, &mut pool, block_height)?;
        POOLS.save(storage, pid, &pool)?;
    }

    Ok(())
}

// move the reward owed since the last settlement into pending reward
pub fn harvest(pool: &PoolInfo, user: &mut UserInfo) -> StdResult<Uint128> {
    let owed: Uint128 = (Uint256::from(user.staked)
        * (pool.acc_reward_per_share - user.reward_debt))
        .try_into()?;

    user.pending_reward = user.pending_reward.checked_add(owed)?;
    user.reward_debt = pool.acc_reward_per_share;
    Ok(owed)
}
