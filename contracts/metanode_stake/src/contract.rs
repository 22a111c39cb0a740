#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;

use cosmwasm_std::{attr, to_binary, Binary, Deps, DepsMut, Env, MessageInfo, Response, StdResult};
use cw2::{get_contract_version, set_contract_version};

use metanode::stake::{ExecuteMsg, InstantiateMsg, MigrateMsg, QueryMsg, Role};
use metanode::token::Token;

use crate::{
    access::{grant_role, pause, renounce_role, revoke_role, save_role, unpause, upgrade},
    bond::{claim, deposit, receive_cw20, unstake, withdraw},
    error::ContractError,
    pool::{
        add_pool, execute_mass_update_pools, execute_settle_pool, set_emission_per_block,
        set_pool_weight, update_pool,
    },
    query::{
        query_config, query_has_role, query_pending_reward, query_pool, query_pool_length,
        query_pools, query_state, query_unstake_request_count, query_unstake_requests,
        query_user_info, query_withdrawable_amount,
    },
    state::{Config, State, CONFIG, STATE},
};

/// Contract name that is used for migration.
pub const CONTRACT_NAME: &str = "metanode-stake";
/// Contract version that is used for migration.
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    _info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    if msg.start_block > msg.end_block {
        return Err(ContractError::InvalidEmissionWindow {});
    }

    let owner = deps.api.addr_validate(&msg.owner)?;

    CONFIG.save(
        deps.storage,
        &Config {
            reward_token: Token(deps.api.addr_validate(&msg.reward_token)?),
            emission_per_block: msg.emission_per_block,
            start_block: msg.start_block,
            end_block: msg.end_block,
        },
    )?;

    STATE.save(
        deps.storage,
        &State {
            total_weight: 0,
            pool_count: 0,
            paused: false,
        },
    )?;

    save_role(deps.storage, Role::Admin, &owner)?;
    save_role(deps.storage, Role::Upgrader, &owner)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "instantiate"),
        attr("owner", owner.as_str()),
    ]))
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::Receive(msg) => receive_cw20(deps, env, info, msg),
        ExecuteMsg::Deposit { pid, amount } => deposit(deps, env, info, pid, amount),
        ExecuteMsg::Unstake { pid, amount } => unstake(deps, env, info, pid, amount),
        ExecuteMsg::Withdraw { pid } => withdraw(deps, env, info, pid),
        ExecuteMsg::Claim { pid } => claim(deps, env, info, pid),
        ExecuteMsg::SettlePool { pid } => execute_settle_pool(deps, env, pid),
        ExecuteMsg::MassUpdatePools {} => execute_mass_update_pools(deps, env),
        ExecuteMsg::AddPool {
            asset,
            weight,
            min_deposit,
            lock_blocks,
        } => add_pool(deps, env, info, asset, weight, min_deposit, lock_blocks),
        ExecuteMsg::SetPoolWeight { pid, weight } => set_pool_weight(deps, env, info, pid, weight),
        ExecuteMsg::UpdatePool {
            pid,
            min_deposit,
            lock_blocks,
        } => update_pool(deps, info, pid, min_deposit, lock_blocks),
        ExecuteMsg::SetEmissionPerBlock { emission_per_block } => {
            set_emission_per_block(deps, env, info, emission_per_block)
        }
        ExecuteMsg::GrantRole { role, account } => grant_role(deps, info, role, account),
        ExecuteMsg::RevokeRole { role, account } => revoke_role(deps, info, role, account),
        ExecuteMsg::RenounceRole { role } => renounce_role(deps, info, role),
        ExecuteMsg::Pause {} => pause(deps, info),
        ExecuteMsg::Unpause {} => unpause(deps, info),
        ExecuteMsg::Upgrade { new_code_id, msg } => upgrade(deps, env, info, new_code_id, msg),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_binary(&query_config(deps)?),
        QueryMsg::State {} => to_binary(&query_state(deps)?),
        QueryMsg::PoolLength {} => to_binary(&query_pool_length(deps)?),
        QueryMsg::Pool { pid } => to_binary(&query_pool(deps, pid)?),
        QueryMsg::Pools { start_after, limit } => {
            to_binary(&query_pools(deps, start_after, limit)?)
        }
        QueryMsg::UserInfo { pid, user } => to_binary(&query_user_info(deps, pid, user)?),
        QueryMsg::PendingReward {
            pid,
            user,
            block_height,
        } => to_binary(&query_pending_reward(deps, env, pid, user, block_height)?),
        QueryMsg::WithdrawableAmount { pid, user } => {
            to_binary(&query_withdrawable_amount(deps, env, pid, user)?)
        }
        QueryMsg::UnstakeRequestCount { pid, user } => {
            to_binary(&query_unstake_request_count(deps, pid, user)?)
        }
        QueryMsg::UnstakeRequests { pid, user } => {
            to_binary(&query_unstake_requests(deps, env, pid, user)?)
        }
        QueryMsg::HasRole { role, account } => to_binary(&query_has_role(deps, role, account)?),
        QueryMsg::Version {} => to_binary(&get_contract_version(deps.storage)?),
    }
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn migrate(deps: DepsMut, _env: Env, _msg: MigrateMsg) -> Result<Response, ContractError> {
    let stored = get_contract_version(deps.storage)?;
    if stored.contract != CONTRACT_NAME {
        return Err(ContractError::InvalidMigration {});
    }

    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "migrate"),
        attr("previous_version", stored.version),
        attr("version", CONTRACT_VERSION),
    ]))
}
