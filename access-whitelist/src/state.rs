use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

use crate::msg::Allowance;

pub const CONTRACT_NAME: &str = "crates.io:access-whitelist";
pub const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const OWNER: Item<Addr> = Item::new("owner");
pub const PENDING_OWNER: Item<Addr> = Item::new("pending_owner");

/// protocol => approved by the owner
pub const PROTOCOL_ALLOWANCES: Map<&Addr, bool> = Map::new("protocol_allowances");

/// (account, protocol) => allowance granted by the account
pub const ALLOWANCES: Map<(&Addr, &Addr), Allowance> = Map::new("allowances");
