use soroban_sdk::{contracttype, symbol_short, Address, BytesN, Env, String};

use crate::types::UpgradeProposal;

#[contracttype]
#[derive(Clone)]
pub struct ProposalCreatedEvent {
    pub payload_ref: BytesN<32>,
    pub proposer: Address,
    pub description: String,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct UpgradeApprovedEvent {
    pub payload_ref: BytesN<32>,
    pub approver: Address,
    pub approval_count: u32,
    pub threshold: u32,
    pub timelock_activated: bool,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct TimelockActivatedEvent {
    pub payload_ref: BytesN<32>,
    pub activated_at: u64,
    pub expires_at: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct UpgradeExecutedEvent {
    pub payload_ref: BytesN<32>,
    pub executor: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct UpgradeCancelledEvent {
    pub payload_ref: BytesN<32>,
    pub canceller: Address,
    pub refund_to: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct AccountMigratedEvent {
    pub account: Address,
    pub old_version: u32,
    pub new_version: u32,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct SystemPausedEvent {
    pub paused_by: Address,
    pub timestamp: u64,
}

#[contracttype]
#[derive(Clone)]
pub struct SystemResumedEvent {
    pub resumed_by: Address,
    pub timestamp: u64,
}

pub struct Events;

impl Events {
    pub fn emit_proposal_created(env: &Env, proposal: &UpgradeProposal) {
        let event = ProposalCreatedEvent {
            payload_ref: proposal.payload_ref.clone(),
            proposer: proposal.proposer.clone(),
            description: proposal.description.clone(),
            timestamp: proposal.created_at,
        };
        env.events().publish((symbol_short!("prop_new"),), event);
    }

    pub fn emit_upgrade_approved(
        env: &Env,
        payload_ref: &BytesN<32>,
        approver: &Address,
        approval_count: u32,
        threshold: u32,
        timelock_activated: bool,
        timestamp: u64,
    ) {
        let event = UpgradeApprovedEvent {
            payload_ref: payload_ref.clone(),
            approver: approver.clone(),
            approval_count,
            threshold,
            timelock_activated,
            timestamp,
        };
        env.events().publish((symbol_short!("prop_appr"),), event);
    }

    pub fn emit_timelock_activated(
        env: &Env,
        payload_ref: &BytesN<32>,
        activated_at: u64,
        expires_at: u64,
    ) {
        let event = TimelockActivatedEvent {
            payload_ref: payload_ref.clone(),
            activated_at,
            expires_at,
        };
        env.events().publish((symbol_short!("tl_start"),), event);
    }

    pub fn emit_upgrade_executed(
        env: &Env,
        payload_ref: &BytesN<32>,
        executor: &Address,
        timestamp: u64,
    ) {
        let event = UpgradeExecutedEvent {
            payload_ref: payload_ref.clone(),
            executor: executor.clone(),
            timestamp,
        };
        env.events().publish((symbol_short!("upg_done"),), event);
    }

    pub fn emit_upgrade_cancelled(
        env: &Env,
        payload_ref: &BytesN<32>,
        canceller: &Address,
        refund_to: &Address,
        timestamp: u64,
    ) {
        let event = UpgradeCancelledEvent {
            payload_ref: payload_ref.clone(),
            canceller: canceller.clone(),
            refund_to: refund_to.clone(),
            timestamp,
        };
        env.events().publish((symbol_short!("upg_cxl"),), event);
    }

    pub fn emit_account_migrated(
        env: &Env,
        account: &Address,
        old_version: u32,
        new_version: u32,
        timestamp: u64,
    ) {
        let event = AccountMigratedEvent {
            account: account.clone(),
            old_version,
            new_version,
            timestamp,
        };
        env.events().publish((symbol_short!("acct_migr"),), event);
    }

    pub fn emit_system_paused(env: &Env, paused_by: &Address, timestamp: u64) {
        let event = SystemPausedEvent {
            paused_by: paused_by.clone(),
            timestamp,
        };
        env.events().publish((symbol_short!("sys_pause"),), event);
    }

    pub fn emit_system_resumed(env: &Env, resumed_by: &Address, timestamp: u64) {
        let event = SystemResumedEvent {
            resumed_by: resumed_by.clone(),
            timestamp,
        };
        env.events().publish((symbol_short!("sys_resum"),), event);
    }
}
