use cosmwasm_std::{
    attr, from_binary, Addr, Coin, DepsMut, Env, MessageInfo, OverflowError, OverflowOperation,
    Response, Uint128,
};
use cw20::Cw20ReceiveMsg;
use metanode::asset::AssetInfo;
use metanode::stake::{Cw20HookMsg, UnstakeRequest};

use crate::error::ContractError;
use crate::reward::{harvest, settle_pool};
use crate::state::{
    assert_not_paused, read_pool, read_unstake_requests, read_user_info, CONFIG, POOLS, STATE,
    UNSTAKE_REQUESTS, USERS,
};

/// Native deposits must carry exactly `amount` of the pool denom and nothing else.
fn assert_sent_native(funds: &[Coin], denom: &str, amount: Uint128) -> Result<(), ContractError> {
    match funds {
        [coin] if coin.denom == denom && coin.amount == amount => Ok(()),
        _ => Err(ContractError::InvalidFunds {}),
    }
}

pub fn deposit(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pid: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.storage)?;
    let pool = read_pool(deps.storage, pid)?;

    match &pool.asset {
        AssetInfo::NativeToken { denom } => assert_sent_native(&info.funds, denom, amount)?,
        AssetInfo::Token { .. } => {
            if !info.funds.is_empty() {
                return Err(ContractError::InvalidFunds {});
            }
        }
    }

    // token pools pull the stake after the ledger is updated
    let transfer_msg = pool
        .asset
        .transfer_from_msg(&info.sender, &env.contract.address, amount)?;

    let res = bond(deps, &env, info.sender, pid, amount)?;
    Ok(match transfer_msg {
        Some(msg) => res.add_message(msg),
        None => res,
    })
}

pub fn receive_cw20(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    cw20_msg: Cw20ReceiveMsg,
) -> Result<Response, ContractError> {
    match from_binary(&cw20_msg.msg) {
        Ok(Cw20HookMsg::Deposit { pid }) => {
            assert_not_paused(deps.storage)?;
            let pool = read_pool(deps.storage, pid)?;

            // only the pool's staking token can deposit through the hook
            match &pool.asset {
                AssetInfo::Token { contract_addr } if *contract_addr == info.sender => {}
                _ => return Err(ContractError::Unauthorized {}),
            }

            let staker_addr = deps.api.addr_validate(&cw20_msg.sender)?;
            bond(deps, &env, staker_addr, pid, cw20_msg.amount)
        }
        Err(_) => Err(ContractError::InvalidMessage {}),
    }
}

fn bond(
    deps: DepsMut,
    env: &Env,
    staker_addr: Addr,
    pid: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let mut pool = read_pool(deps.storage, pid)?;

    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }
    if amount < pool.min_deposit {
        return Err(ContractError::BelowMinimumDeposit {
            min: pool.min_deposit,
            amount,
        });
    }

    let mut user = read_user_info(deps.storage, pid, &staker_addr)?;

    // Compute pool reward & staker reward
    settle_pool(&config, state.total_weight, &mut pool, env.block.height)?;
    harvest(&pool, &mut user)?;

    pool.total_staked = pool.total_staked.checked_add(amount)?;
    user.staked = user.staked.checked_add(amount)?;

    POOLS.save(deps.storage, pid, &pool)?;
    USERS.save(deps.storage, (pid, &staker_addr), &user)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "deposit"),
        attr("pid", pid.to_string()),
        attr("owner", staker_addr.as_str()),
        attr("amount", amount.to_string()),
    ]))
}

pub fn unstake(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pid: u64,
    amount: Uint128,
) -> Result<Response, ContractError> {
    assert_not_paused(deps.storage)?;
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let mut pool = read_pool(deps.storage, pid)?;
    let sender_addr = info.sender;

    if amount.is_zero() {
        return Err(ContractError::InvalidZeroAmount {});
    }

    let mut user = read_user_info(deps.storage, pid, &sender_addr)?;
    if user.staked < amount {
        return Err(ContractError::InsufficientStake {
            staked: user.staked,
            amount,
        });
    }

    let block_height = env.block.height;
    let unlock_block = block_height.checked_add(pool.lock_blocks).ok_or_else(|| {
        OverflowError::new(OverflowOperation::Add, block_height, pool.lock_blocks)
    })?;

    settle_pool(&config, state.total_weight, &mut pool, block_height)?;
    harvest(&pool, &mut user)?;

    pool.total_staked = pool.total_staked.checked_sub(amount)?;
    user.staked = user.staked.checked_sub(amount)?;

    let mut requests = read_unstake_requests(deps.storage, pid, &sender_addr)?;
    requests.push(UnstakeRequest {
        amount,
        unlock_block,
    });

    POOLS.save(deps.storage, pid, &pool)?;
    USERS.save(deps.storage, (pid, &sender_addr), &user)?;
    UNSTAKE_REQUESTS.save(deps.storage, (pid, &sender_addr), &requests)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "unstake"),
        attr("pid", pid.to_string()),
        attr("owner", sender_addr.as_str()),
        attr("amount", amount.to_string()),
        attr("unlock_block", unlock_block.to_string()),
    ]))
}

/// ## Description
/// Pays out every unlocked unstake request. Locked requests stay queued in the
/// order they were added. The queue is saved before the transfer message is emitted.
pub fn withdraw(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pid: u64,
) -> Result<Response, ContractError> {
    let pool = read_pool(deps.storage, pid)?;
    let sender_addr = info.sender;
    let block_height = env.block.height;

    let (unlocked, locked): (Vec<UnstakeRequest>, Vec<UnstakeRequest>) =
        read_unstake_requests(deps.storage, pid, &sender_addr)?
            .into_iter()
            .partition(|request| request.is_unlocked(block_height));
    if unlocked.is_empty() {
        return Err(ContractError::NothingWithdrawable {});
    }

    let mut amount = Uint128::zero();
    for request in unlocked.iter() {
        amount = amount.checked_add(request.amount)?;
    }

    if locked.is_empty() {
        UNSTAKE_REQUESTS.remove(deps.storage, (pid, &sender_addr));
    } else {
        UNSTAKE_REQUESTS.save(deps.storage, (pid, &sender_addr), &locked)?;
    }

    Ok(Response::new()
        .add_message(pool.asset.transfer_msg(&sender_addr, amount)?)
        .add_attributes(vec![
            attr("action", "withdraw"),
            attr("pid", pid.to_string()),
            attr("owner", sender_addr.as_str()),
            attr("amount", amount.to_string()),
            attr("requests", unlocked.len().to_string()),
        ]))
}

// claim rewards to executor
pub fn claim(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    pid: u64,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    let state = STATE.load(deps.storage)?;
    let mut pool = read_pool(deps.storage, pid)?;
    let sender_addr = info.sender;
    let mut user = read_user_info(deps.storage, pid, &sender_addr)?;

    settle_pool(&config, state.total_weight, &mut pool, env.block.height)?;
    harvest(&pool, &mut user)?;

    let amount = user.pending_reward;
    if amount.is_zero() {
        return Err(ContractError::NothingToClaim {});
    }
    user.pending_reward = Uint128::zero();
    user.claimed_reward = user.claimed_reward.checked_add(amount)?;

    POOLS.save(deps.storage, pid, &pool)?;
    USERS.save(deps.storage, (pid, &sender_addr), &user)?;

    Ok(Response::new()
        .add_message(
            config
                .reward_token
                .transfer_msg(sender_addr.to_string(), amount)?,
        )
        .add_attributes(vec![
            attr("action", "claim"),
            attr("pid", pid.to_string()),
            attr("owner", sender_addr.as_str()),
            attr("amount", amount.to_string()),
        ]))
}
