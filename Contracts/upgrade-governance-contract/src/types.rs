// types.rs
use soroban_sdk::{contracttype, Address, BytesN, String, Vec};

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UpgradeStatus {
    Proposed,
    Approved,
    TimelockActive,
    Executed,
    Cancelled,
}

impl UpgradeStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, UpgradeStatus::Executed | UpgradeStatus::Cancelled)
    }
}

/// Singleton governance configuration. Membership and threshold are fixed
/// at initialization; only the pause flag mutates afterwards.
#[contracttype]
#[derive(Clone)]
pub struct MultisigConfig {
    pub authority: Address,
    pub members: Vec<Address>,
    pub threshold: u32,
    pub is_paused: bool,
}

/// One proposal per staged payload, keyed by the payload hash. Terminal
/// records are kept for audit; approvals preserve insertion order.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UpgradeProposal {
    pub payload_ref: BytesN<32>,
    pub proposer: Address,
    pub description: String,
    pub status: UpgradeStatus,
    pub approvals: Vec<Address>,
    pub created_at: u64,
    pub timelock_start: Option<u64>,
    pub executed_at: Option<u64>,
}

/// One-shot migration record for a legacy account. Immutable once written.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccountVersion {
    pub account: Address,
    pub version: u32,
    pub migrated: bool,
    pub migrated_at: u64,
}
