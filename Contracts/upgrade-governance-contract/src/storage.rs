use soroban_sdk::{contracttype, Address, BytesN, Env, Map};

use crate::{
    error::GovernanceError,
    types::{AccountVersion, MultisigConfig, UpgradeProposal},
};

#[contracttype]
#[derive(Clone)]
pub enum DataKey {
    Config,
    Proposals,
    Migrations,
    Loader,
    Target,
}

pub struct Storage<'a> {
    env: &'a Env,
}

impl<'a> Storage<'a> {
    pub fn new(env: &'a Env) -> Self {
        Self { env }
    }

    pub fn is_initialized(&self) -> bool {
        self.env.storage().instance().has(&DataKey::Config)
    }

    pub fn require_initialized(&self) -> Result<(), GovernanceError> {
        if self.is_initialized() {
            Ok(())
        } else {
            Err(GovernanceError::NotInitialized)
        }
    }

    pub fn init(&self, config: &MultisigConfig, loader: &Address, target: &Address) {
        self.env.storage().instance().set(&DataKey::Config, config);
        self.env.storage().instance().set(&DataKey::Loader, loader);
        self.env.storage().instance().set(&DataKey::Target, target);
    }

    pub fn config(&self) -> MultisigConfig {
        self.env.storage().instance().get(&DataKey::Config).unwrap()
    }

    pub fn save_config(&self, config: &MultisigConfig) {
        self.env.storage().instance().set(&DataKey::Config, config);
    }

    pub fn is_member(&self, who: &Address) -> bool {
        self.config().members.contains(who)
    }

    pub fn require_member(&self, who: &Address) -> Result<(), GovernanceError> {
        if self.is_member(who) {
            Ok(())
        } else {
            Err(GovernanceError::NotAMember)
        }
    }

    pub fn require_not_paused(&self) -> Result<(), GovernanceError> {
        if self.config().is_paused {
            Err(GovernanceError::SystemPaused)
        } else {
            Ok(())
        }
    }

    pub fn loader(&self) -> Address {
        self.env.storage().instance().get(&DataKey::Loader).unwrap()
    }

    pub fn target(&self) -> Address {
        self.env.storage().instance().get(&DataKey::Target).unwrap()
    }

    pub fn find_proposal(&self, payload_ref: &BytesN<32>) -> Option<UpgradeProposal> {
        self.proposals_map().get(payload_ref.clone())
    }

    pub fn get_proposal(&self, payload_ref: &BytesN<32>) -> Result<UpgradeProposal, GovernanceError> {
        self.find_proposal(payload_ref)
            .ok_or(GovernanceError::ProposalNotFound)
    }

    pub fn save_proposal(&self, proposal: &UpgradeProposal) {
        let mut map = self.proposals_map();
        map.set(proposal.payload_ref.clone(), proposal.clone());
        self.env.storage().instance().set(&DataKey::Proposals, &map);
    }

    pub fn has_migration(&self, account: &Address) -> bool {
        self.migrations_map().contains_key(account.clone())
    }

    pub fn get_migration(&self, account: &Address) -> Result<AccountVersion, GovernanceError> {
        self.migrations_map()
            .get(account.clone())
            .ok_or(GovernanceError::MigrationNotFound)
    }

    pub fn save_migration(&self, record: &AccountVersion) {
        let mut map = self.migrations_map();
        map.set(record.account.clone(), record.clone());
        self.env.storage().instance().set(&DataKey::Migrations, &map);
    }

    fn proposals_map(&self) -> Map<BytesN<32>, UpgradeProposal> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Proposals)
            .unwrap_or_else(|| Map::new(self.env))
    }

    fn migrations_map(&self) -> Map<Address, AccountVersion> {
        self.env
            .storage()
            .instance()
            .get(&DataKey::Migrations)
            .unwrap_or_else(|| Map::new(self.env))
    }
}
