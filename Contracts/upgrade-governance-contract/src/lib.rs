#![no_std]
//! Upgrade Governance Contract
//!
//! Gates replacement of a governed program's executable code behind an
//! m-of-n multisig and a mandatory timelock. Members stage a payload via a
//! proposal, approve until quorum, wait out the delay, then execute, which
//! hands the payload to a code-loading contract and finalizes the proposal.
//! An emergency pause switch suspends every mutating entry point except
//! resume, and a one-shot migration record tracks legacy accounts moved to
//! the current schema version.

mod error;
mod events;
mod storage;
mod types;

use soroban_sdk::{
    contract, contractimpl, symbol_short, Address, BytesN, Env, IntoVal, String, Val, Vec,
};

use crate::{
    error::GovernanceError,
    events::Events,
    storage::Storage,
    types::{AccountVersion, MultisigConfig, UpgradeProposal, UpgradeStatus},
};

/// Mandatory delay between reaching quorum and execution, in seconds (48h).
pub const TIMELOCK_PERIOD: u64 = 172_800;

pub const MAX_MEMBERS: u32 = 10;

pub const MAX_DESCRIPTION_LEN: u32 = 500;

/// Schema version legacy accounts are migrated to.
pub const TARGET_VERSION: u32 = 2;

#[contract]
pub struct UpgradeGovernanceContract;

/// Public interface for upgrade governance.
pub trait UpgradeGovernanceTrait {
    /// Initialize the multisig with a member list, an approval threshold,
    /// the code-loading contract, and the governed target. Can only be
    /// called once; threshold must be >0 and <= members length.
    fn init(
        env: Env,
        authority: Address,
        members: Vec<Address>,
        threshold: u32,
        loader: Address,
        target: Address,
    ) -> Result<(), GovernanceError>;
    /// Stage an upgrade proposal for a payload hash. One live proposal per
    /// payload; a terminal record for the same payload may be superseded.
    fn propose_upgrade(
        env: Env,
        proposer: Address,
        payload_ref: BytesN<32>,
        description: String,
    ) -> Result<(), GovernanceError>;
    /// Record one member's approval; the approval that reaches quorum also
    /// starts the timelock in the same step.
    fn approve_upgrade(
        env: Env,
        approver: Address,
        payload_ref: BytesN<32>,
    ) -> Result<(), GovernanceError>;
    /// Execute an eligible proposal: invoke the loader and, only on its
    /// confirmed success, mark the proposal executed. Loader failure leaves
    /// the proposal retryable.
    fn execute_upgrade(
        env: Env,
        executor: Address,
        payload_ref: BytesN<32>,
        spill: Address,
    ) -> Result<(), GovernanceError>;
    /// Cancel a non-terminal proposal; reclaimed staging rent goes to
    /// `refund_to`.
    fn cancel_upgrade(
        env: Env,
        canceller: Address,
        payload_ref: BytesN<32>,
        refund_to: Address,
    ) -> Result<(), GovernanceError>;
    /// Suspend all mutating entry points except `resume_system`.
    fn pause_system(env: Env, caller: Address) -> Result<(), GovernanceError>;
    fn resume_system(env: Env, caller: Address) -> Result<(), GovernanceError>;
    /// Record that a legacy account was migrated to the current schema
    /// version. Rejects re-migration of the same account.
    fn migrate_account(
        env: Env,
        migrator: Address,
        old_account: Address,
    ) -> Result<(), GovernanceError>;
    fn get_proposal(env: Env, payload_ref: BytesN<32>) -> Result<UpgradeProposal, GovernanceError>;
    fn get_account_version(env: Env, old_account: Address)
        -> Result<AccountVersion, GovernanceError>;
    fn is_member(env: Env, who: Address) -> bool;
    fn is_paused(env: Env) -> bool;
}

/// Timelock policy: a proposal is executable once its clock has been
/// running for `TIMELOCK_PERIOD`. A clock that moved backwards reads as
/// not ready rather than wrapping.
fn timelock_ready(proposal: &UpgradeProposal, now: u64) -> bool {
    if proposal.status != UpgradeStatus::TimelockActive {
        return false;
    }
    match proposal.timelock_start {
        Some(start) => match now.checked_sub(start) {
            Some(elapsed) => elapsed >= TIMELOCK_PERIOD,
            None => false,
        },
        None => false,
    }
}

fn require_not_terminal(proposal: &UpgradeProposal) -> Result<(), GovernanceError> {
    match proposal.status {
        UpgradeStatus::Executed => Err(GovernanceError::ProposalAlreadyExecuted),
        UpgradeStatus::Cancelled => Err(GovernanceError::ProposalAlreadyCancelled),
        _ => Ok(()),
    }
}

#[contractimpl]
impl UpgradeGovernanceTrait for UpgradeGovernanceContract {
    fn init(
        env: Env,
        authority: Address,
        members: Vec<Address>,
        threshold: u32,
        loader: Address,
        target: Address,
    ) -> Result<(), GovernanceError> {
        authority.require_auth();
        let store = Storage::new(&env);
        if store.is_initialized() {
            return Err(GovernanceError::AlreadyInitialized);
        }
        if members.len() == 0 {
            return Err(GovernanceError::EmptyMembers);
        }
        if members.len() > MAX_MEMBERS {
            return Err(GovernanceError::TooManyMembers);
        }
        if threshold == 0 || threshold > members.len() {
            return Err(GovernanceError::InvalidThreshold);
        }
        for i in 0..members.len() {
            let member = members.get_unchecked(i);
            for j in (i + 1)..members.len() {
                if members.get_unchecked(j) == member {
                    return Err(GovernanceError::DuplicateMember);
                }
            }
        }
        let config = MultisigConfig {
            authority,
            members,
            threshold,
            is_paused: false,
        };
        store.init(&config, &loader, &target);
        Ok(())
    }

    fn propose_upgrade(
        env: Env,
        proposer: Address,
        payload_ref: BytesN<32>,
        description: String,
    ) -> Result<(), GovernanceError> {
        proposer.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_not_paused()?;
        store.require_member(&proposer)?;
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(GovernanceError::DescriptionTooLong);
        }
        if let Some(existing) = store.find_proposal(&payload_ref) {
            if !existing.status.is_terminal() {
                return Err(GovernanceError::ProposalAlreadyExists);
            }
        }
        let now = env.ledger().timestamp();
        let proposal = UpgradeProposal {
            payload_ref,
            proposer,
            description,
            status: UpgradeStatus::Proposed,
            approvals: Vec::new(&env),
            created_at: now,
            timelock_start: None,
            executed_at: None,
        };
        store.save_proposal(&proposal);
        Events::emit_proposal_created(&env, &proposal);
        Ok(())
    }

    fn approve_upgrade(
        env: Env,
        approver: Address,
        payload_ref: BytesN<32>,
    ) -> Result<(), GovernanceError> {
        approver.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_not_paused()?;
        store.require_member(&approver)?;
        let mut proposal = store.get_proposal(&payload_ref)?;
        require_not_terminal(&proposal)?;
        // Checked before insertion so a rejected duplicate never counts.
        if proposal.approvals.contains(&approver) {
            return Err(GovernanceError::AlreadyApproved);
        }
        proposal.approvals.push_back(approver.clone());

        let now = env.ledger().timestamp();
        let threshold = store.config().threshold;
        let mut timelock_activated = false;
        // The approval that reaches quorum starts the clock in the same
        // step; later approvals are recorded but change nothing else.
        if proposal.approvals.len() == threshold && proposal.timelock_start.is_none() {
            proposal.status = UpgradeStatus::TimelockActive;
            proposal.timelock_start = Some(now);
            timelock_activated = true;
        }
        store.save_proposal(&proposal);

        if timelock_activated {
            Events::emit_timelock_activated(
                &env,
                &payload_ref,
                now,
                now.saturating_add(TIMELOCK_PERIOD),
            );
        }
        Events::emit_upgrade_approved(
            &env,
            &payload_ref,
            &approver,
            proposal.approvals.len(),
            threshold,
            timelock_activated,
            now,
        );
        Ok(())
    }

    fn execute_upgrade(
        env: Env,
        executor: Address,
        payload_ref: BytesN<32>,
        spill: Address,
    ) -> Result<(), GovernanceError> {
        executor.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_not_paused()?;
        let mut proposal = store.get_proposal(&payload_ref)?;
        match proposal.status {
            UpgradeStatus::TimelockActive => {}
            UpgradeStatus::Executed => return Err(GovernanceError::ProposalAlreadyExecuted),
            UpgradeStatus::Cancelled => return Err(GovernanceError::ProposalAlreadyCancelled),
            _ => return Err(GovernanceError::InvalidProposalState),
        }
        let now = env.ledger().timestamp();
        if !timelock_ready(&proposal, now) {
            return Err(GovernanceError::TimelockNotElapsed);
        }

        // Hand the payload to the loader. Anything but a clean success
        // leaves the proposal in TimelockActive for a later retry.
        let loader = store.loader();
        let target = store.target();
        let args: Vec<Val> = (target, proposal.payload_ref.clone(), spill).into_val(&env);
        let res = env.try_invoke_contract::<(), soroban_sdk::Error>(
            &loader,
            &symbol_short!("load"),
            args,
        );
        if !matches!(res, Ok(Ok(()))) {
            return Err(GovernanceError::LoaderCallFailed);
        }

        proposal.status = UpgradeStatus::Executed;
        proposal.executed_at = Some(now);
        store.save_proposal(&proposal);
        Events::emit_upgrade_executed(&env, &payload_ref, &executor, now);
        Ok(())
    }

    fn cancel_upgrade(
        env: Env,
        canceller: Address,
        payload_ref: BytesN<32>,
        refund_to: Address,
    ) -> Result<(), GovernanceError> {
        canceller.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_not_paused()?;
        store.require_member(&canceller)?;
        let mut proposal = store.get_proposal(&payload_ref)?;
        require_not_terminal(&proposal)?;
        proposal.status = UpgradeStatus::Cancelled;
        store.save_proposal(&proposal);
        let now = env.ledger().timestamp();
        Events::emit_upgrade_cancelled(&env, &payload_ref, &canceller, &refund_to, now);
        Ok(())
    }

    fn pause_system(env: Env, caller: Address) -> Result<(), GovernanceError> {
        caller.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_member(&caller)?;
        let mut config = store.config();
        if config.is_paused {
            return Err(GovernanceError::SystemAlreadyPaused);
        }
        config.is_paused = true;
        store.save_config(&config);
        Events::emit_system_paused(&env, &caller, env.ledger().timestamp());
        Ok(())
    }

    fn resume_system(env: Env, caller: Address) -> Result<(), GovernanceError> {
        caller.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_member(&caller)?;
        let mut config = store.config();
        if !config.is_paused {
            return Err(GovernanceError::SystemNotPaused);
        }
        config.is_paused = false;
        store.save_config(&config);
        Events::emit_system_resumed(&env, &caller, env.ledger().timestamp());
        Ok(())
    }

    fn migrate_account(
        env: Env,
        migrator: Address,
        old_account: Address,
    ) -> Result<(), GovernanceError> {
        migrator.require_auth();
        let store = Storage::new(&env);
        store.require_initialized()?;
        store.require_not_paused()?;
        store.require_member(&migrator)?;
        if store.has_migration(&old_account) {
            return Err(GovernanceError::AlreadyMigrated);
        }
        let now = env.ledger().timestamp();
        let record = AccountVersion {
            account: old_account.clone(),
            version: TARGET_VERSION,
            migrated: true,
            migrated_at: now,
        };
        store.save_migration(&record);
        Events::emit_account_migrated(&env, &old_account, TARGET_VERSION - 1, TARGET_VERSION, now);
        Ok(())
    }

    fn get_proposal(env: Env, payload_ref: BytesN<32>) -> Result<UpgradeProposal, GovernanceError> {
        Storage::new(&env).get_proposal(&payload_ref)
    }

    fn get_account_version(
        env: Env,
        old_account: Address,
    ) -> Result<AccountVersion, GovernanceError> {
        Storage::new(&env).get_migration(&old_account)
    }

    fn is_member(env: Env, who: Address) -> bool {
        let store = Storage::new(&env);
        store.is_initialized() && store.is_member(&who)
    }

    fn is_paused(env: Env) -> bool {
        let store = Storage::new(&env);
        store.is_initialized() && store.config().is_paused
    }
}
