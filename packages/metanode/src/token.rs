use cosmwasm_std::{to_binary, Addr, CosmosMsg, StdResult, Uint128, WasmMsg};
use cw20::Cw20ExecuteMsg;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The cw20 token rewards are paid out in.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, JsonSchema)]
pub struct Token(pub Addr);

impl Token {
    pub fn transfer_msg(&self, recipient: String, amount: Uint128) -> StdResult<CosmosMsg> {
        Ok(CosmosMsg::Wasm(WasmMsg::Execute {
            contract_addr: self.0.to_string(),
            msg: to_binary(&Cw20ExecuteMsg::Transfer {
                recipient,
                amount,
            })?,
            funds: vec![],
        }))
    }
}
