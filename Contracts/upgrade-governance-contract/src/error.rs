use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum GovernanceError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    EmptyMembers = 3,
    TooManyMembers = 4,
    InvalidThreshold = 5,
    DuplicateMember = 6,
    NotAMember = 7,
    SystemPaused = 8,
    SystemAlreadyPaused = 9,
    SystemNotPaused = 10,
    DescriptionTooLong = 11,
    ProposalAlreadyExists = 12,
    ProposalNotFound = 13,
    AlreadyApproved = 14,
    InvalidProposalState = 15,
    TimelockNotElapsed = 16,
    ProposalAlreadyExecuted = 17,
    ProposalAlreadyCancelled = 18,
    LoaderCallFailed = 19,
    AlreadyMigrated = 20,
    MigrationNotFound = 21,
}
