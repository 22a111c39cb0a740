use cosmwasm_std::{
    attr, Addr, Binary, DepsMut, Empty, Env, MessageInfo, Order, Response, StdResult, Storage,
    WasmMsg,
};
use metanode::stake::Role;

use crate::error::ContractError;
use crate::state::{ROLES, STATE};

pub fn has_role(storage: &dyn Storage, role: Role, account: &Addr) -> bool {
    ROLES.has(storage, (role.as_str(), account))
}

/// Role checks run before anything is written.
pub fn assert_role(storage: &dyn Storage, role: Role, account: &Addr) -> Result<(), ContractError> {
    if !has_role(storage, role, account) {
        return Err(ContractError::Unauthorized {});
    }

    Ok(())
}

pub fn save_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> StdResult<()> {
    ROLES.save(storage, (role.as_str(), account), &Empty {})
}

fn remove_role(storage: &mut dyn Storage, role: Role, account: &Addr) -> Result<(), ContractError> {
    if role == Role::Admin && has_role(storage, role, account) {
        let admins = ROLES
            .prefix(role.as_str())
            .keys(storage, None, None, Order::Ascending)
            .take(2)
            .count();
        if admins < 2 {
            return Err(ContractError::LastAdmin {});
        }
    }

    ROLES.remove(storage, (role.as_str(), account));
    Ok(())
}

pub fn grant_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    save_role(deps.storage, role, &account)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "grant_role"),
        attr("role", role.as_str()),
        attr("account", account.as_str()),
    ]))
}

pub fn revoke_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
    account: String,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let account = deps.api.addr_validate(&account)?;
    remove_role(deps.storage, role, &account)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "revoke_role"),
        attr("role", role.as_str()),
        attr("account", account.as_str()),
    ]))
}

pub fn renounce_role(
    deps: DepsMut,
    info: MessageInfo,
    role: Role,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, role, &info.sender)?;
    remove_role(deps.storage, role, &info.sender)?;

    Ok(Response::new().add_attributes(vec![
        attr("action", "renounce_role"),
        attr("role", role.as_str()),
        attr("account", info.sender.as_str()),
    ]))
}

pub fn pause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let mut state = STATE.load(deps.storage)?;
    if state.paused {
        return Err(ContractError::Paused {});
    }
    state.paused = true;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new().add_attribute("action", "pause"))
}

pub fn unpause(deps: DepsMut, info: MessageInfo) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Admin, &info.sender)?;

    let mut state = STATE.load(deps.storage)?;
    if !state.paused {
        return Err(ContractError::NotPaused {});
    }
    state.paused = false;
    STATE.save(deps.storage, &state)?;

    Ok(Response::new().add_attribute("action", "unpause"))
}

/// ## Description
/// Migrates the contract to `new_code_id`. Only works when the chain admin of this
/// contract is the contract itself.
pub fn upgrade(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    new_code_id: u64,
    msg: Binary,
) -> Result<Response, ContractError> {
    assert_role(deps.storage, Role::Upgrader, &info.sender)?;

    Ok(Response::new()
        .add_message(WasmMsg::Migrate {
            contract_addr: env.contract.address.to_string(),
            new_code_id,
            msg,
        })
        .add_attributes(vec![
            attr("action", "upgrade"),
            attr("new_code_id", new_code_id.to_string()),
        ]))
}
