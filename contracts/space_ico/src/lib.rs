#![cfg_attr(not(feature = "std"), no_std, no_main)]

pub mod constants {
    /// One whole contribution unit in base denomination (18 decimals).
    pub const ONE_TOKEN: u128 = 1_000_000_000_000_000_000;

    // Seed phase: allowlisted contributors only.
    pub const SEED_INDIVIDUAL_LIMIT: u128 = 1_500 * ONE_TOKEN;
    pub const SEED_TOTAL_LIMIT: u128 = 15_000 * ONE_TOKEN;

    // General phase: anyone. Both caps are cumulative over Seed + General.
    pub const GENERAL_INDIVIDUAL_LIMIT: u128 = 1_000 * ONE_TOKEN;
    pub const GENERAL_TOTAL_LIMIT: u128 = 30_000 * ONE_TOKEN;
}

/// # Space ICO: Crowdsale Ledger
///
/// Gates who may contribute, how much, and when, across three ordered
/// phases:
///
/// ```text
///   SEED ──advance_phase_to_general──► GENERAL ──advance_phase_to_open──► OPEN
///
///   Phase    │ Allowlist │ Individual cap        │ Aggregate cap
///   ─────────┼───────────┼───────────────────────┼──────────────────────
///   SEED     │ required  │ seed_individual       │ seed_total
///   GENERAL  │ ignored   │ general_individual    │ general_total
///   OPEN     │ ignored   │ none                  │ none
/// ```
///
/// A single running total is kept per contributor. Caps are evaluated against
/// that cumulative value, so Seed contributions count toward the General cap.
///
/// The ledger never mints. An accepted contribution emits
/// [`InvestmentReceived`], and crediting tokens to the investor is left to
/// whoever consumes that event.
#[ink::contract]
mod space_ico {
    use crate::constants::*;
    use ink::storage::Mapping;

    // =========================================================================
    // TYPES
    // =========================================================================

    /// Sale phase. Discriminants are stable: `Seed = 0`, `General = 1`,
    /// `Open = 2`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub enum Phase {
        Seed = 0,
        General = 1,
        Open = 2,
    }

    impl Phase {
        /// The phase an advance from `self` lands in. `None` from `Open`.
        pub fn next(self) -> Option<Phase> {
            match self {
                Phase::Seed => Some(Phase::General),
                Phase::General => Some(Phase::Open),
                Phase::Open => None,
            }
        }
    }

    impl From<Phase> for u8 {
        fn from(phase: Phase) -> u8 {
            phase as u8
        }
    }

    /// Contribution caps, fixed at construction.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(
        feature = "std",
        derive(scale_info::TypeInfo, ink::storage::traits::StorageLayout)
    )]
    pub struct SaleLimits {
        pub seed_individual: Balance,
        pub seed_total: Balance,
        pub general_individual: Balance,
        pub general_total: Balance,
    }

    impl SaleLimits {
        pub const fn default_limits() -> Self {
            Self {
                seed_individual: SEED_INDIVIDUAL_LIMIT,
                seed_total: SEED_TOTAL_LIMIT,
                general_individual: GENERAL_INDIVIDUAL_LIMIT,
                general_total: GENERAL_TOTAL_LIMIT,
            }
        }

        /// An individual cap may not exceed its phase's aggregate cap, and the
        /// General aggregate includes the Seed raise.
        pub fn validate(&self) -> Result<(), Error> {
            if self.seed_individual > self.seed_total
                || self.general_individual > self.general_total
                || self.seed_total > self.general_total
            {
                return Err(Error::InvalidLimits);
            }
            Ok(())
        }

        pub fn individual_cap(&self, phase: Phase) -> Option<Balance> {
            match phase {
                Phase::Seed => Some(self.seed_individual),
                Phase::General => Some(self.general_individual),
                Phase::Open => None,
            }
        }

        pub fn total_cap(&self, phase: Phase) -> Option<Balance> {
            match phase {
                Phase::Seed => Some(self.seed_total),
                Phase::General => Some(self.general_total),
                Phase::Open => None,
            }
        }
    }

    // =========================================================================
    // STORAGE
    // =========================================================================

    #[ink(storage)]
    pub struct SpaceIco {
        owner: AccountId,
        phase: Phase,
        fundraising: bool,
        limits: SaleLimits,
        allow_listed: Mapping<AccountId, bool>,
        /// Running total per contributor. Never reset between phases.
        contributions: Mapping<AccountId, Balance>,
        total_raised: Balance,
    }

    // =========================================================================
    // EVENTS
    // =========================================================================

    #[ink(event)]
    pub struct InvestmentReceived {
        #[ink(topic)]
        investor: AccountId,
        amount: Balance,
        phase: Phase,
    }

    #[ink(event)]
    pub struct PhaseUpgraded {
        phase: Phase,
    }

    /// Emitted the first time an account is allowlisted.
    #[ink(event)]
    pub struct AllowListed {
        #[ink(topic)]
        account: AccountId,
    }

    #[ink(event)]
    pub struct FundraisingStatusChanged {
        fundraising: bool,
    }

    // =========================================================================
    // ERRORS
    // =========================================================================

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        /// Caller is not the contract owner.
        NotAuthorized,
        /// Phase advance requested while not in the contained phase.
        InvalidPhaseTransition(Phase),
        /// Seed contribution from an account missing from the allowlist.
        AddressNotAllowlisted,
        /// Contribution would push the caller past the phase's individual cap.
        IndividualLimitExceeded,
        /// Contribution would push the raise past the phase's aggregate cap.
        ContributionExceedsLimit,
        /// The owner has paused fundraising.
        FundraisingPaused,
        /// Construction limits are inconsistent.
        InvalidLimits,
        Overflow,
    }

    impl Error {
        /// Stable string identifier surfaced to callers.
        pub fn code(&self) -> &'static str {
            match self {
                Error::NotAuthorized => "ONLY_OWNER",
                Error::InvalidPhaseTransition(Phase::Seed) => "PHASE_NOT_SEED",
                Error::InvalidPhaseTransition(Phase::General) => "PHASE_NOT_GENERAL",
                Error::InvalidPhaseTransition(Phase::Open) => "PHASE_NOT_OPEN",
                Error::AddressNotAllowlisted => "ADDRESS_NOT_ON_ALLOWLIST",
                Error::IndividualLimitExceeded => "INDIVIDUAL_LIMIT_EXCEEDED",
                Error::ContributionExceedsLimit => "CONTRIBUTION_EXCEEDS_LIMIT",
                Error::FundraisingPaused => "FUNDRAISING_PAUSED",
                Error::InvalidLimits => "INVALID_LIMITS",
                Error::Overflow => "OVERFLOW",
            }
        }
    }

    // =========================================================================
    // IMPLEMENTATION
    // =========================================================================

    impl SpaceIco {
        /// Deploy with the default caps from [`crate::constants`]. The caller
        /// becomes the owner.
        #[ink(constructor)]
        pub fn new() -> Self {
            Self::init(SaleLimits::default_limits())
        }

        #[ink(constructor)]
        pub fn new_with_limits(limits: SaleLimits) -> Result<Self, Error> {
            limits.validate()?;
            Ok(Self::init(limits))
        }

        fn init(limits: SaleLimits) -> Self {
            Self {
                owner: Self::env().caller(),
                phase: Phase::Seed,
                fundraising: true,
                limits,
                allow_listed: Mapping::default(),
                contributions: Mapping::default(),
                total_raised: 0,
            }
        }

        // ---------------------------------------------------------------------
        // Contribution
        // ---------------------------------------------------------------------

        /// Contribute the transferred value under the current phase's rules.
        ///
        /// # Errors
        /// - [`Error::FundraisingPaused`]        fundraising is switched off.
        /// - [`Error::AddressNotAllowlisted`]    Seed phase, caller not allowlisted.
        /// - [`Error::ContributionExceedsLimit`] aggregate cap would be passed.
        /// - [`Error::IndividualLimitExceeded`]  caller's cap would be passed.
        #[ink(message, payable)]
        pub fn buy(&mut self) -> Result<(), Error> {
            let investor = self.env().caller();
            let amount = self.env().transferred_value();
            self.contribute(investor, amount)
        }

        fn contribute(&mut self, investor: AccountId, amount: Balance) -> Result<(), Error> {
            self.assert_fundraising()?;

            let phase = self.phase;
            if phase == Phase::Seed && !self.is_allow_listed(investor) {
                return Err(Error::AddressNotAllowlisted);
            }

            let new_total = self
                .total_raised
                .checked_add(amount)
                .ok_or(Error::Overflow)?;
            let new_contribution = self
                .contribution_of(investor)
                .checked_add(amount)
                .ok_or(Error::Overflow)?;

            // Aggregate before individual: once the raise is full every caller
            // is turned away with the same error.
            if let Some(cap) = self.limits.total_cap(phase) {
                if new_total > cap {
                    return Err(Error::ContributionExceedsLimit);
                }
            }
            if let Some(cap) = self.limits.individual_cap(phase) {
                if new_contribution > cap {
                    return Err(Error::IndividualLimitExceeded);
                }
            }

            self.contributions.insert(investor, &new_contribution);
            self.total_raised = new_total;

            self.env().emit_event(InvestmentReceived {
                investor,
                amount,
                phase,
            });
            Ok(())
        }

        // ---------------------------------------------------------------------
        // Admin
        // ---------------------------------------------------------------------

        /// Permit `account` to contribute during Seed. Idempotent.
        #[ink(message)]
        pub fn allow_list(&mut self, account: AccountId) -> Result<(), Error> {
            self.only_owner()?;
            if !self.is_allow_listed(account) {
                self.allow_listed.insert(account, &true);
                self.env().emit_event(AllowListed { account });
            }
            Ok(())
        }

        #[ink(message)]
        pub fn advance_phase_to_general(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            self.advance_from(Phase::Seed)
        }

        #[ink(message)]
        pub fn advance_phase_to_open(&mut self) -> Result<(), Error> {
            self.only_owner()?;
            self.advance_from(Phase::General)
        }

        /// Pause (`false`) or resume (`true`) contributions.
        #[ink(message)]
        pub fn set_fundraising(&mut self, fundraising: bool) -> Result<(), Error> {
            self.only_owner()?;
            self.fundraising = fundraising;
            self.env()
                .emit_event(FundraisingStatusChanged { fundraising });
            Ok(())
        }

        // ---------------------------------------------------------------------
        // Views
        // ---------------------------------------------------------------------

        #[ink(message)]
        pub fn ico_phase(&self) -> Phase {
            self.phase
        }

        #[ink(message)]
        pub fn is_fundraising(&self) -> bool {
            self.fundraising
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn total_raised(&self) -> Balance {
            self.total_raised
        }

        #[ink(message)]
        pub fn contribution_of(&self, account: AccountId) -> Balance {
            self.contributions.get(account).unwrap_or(0)
        }

        #[ink(message)]
        pub fn is_allow_listed(&self, account: AccountId) -> bool {
            self.allow_listed.get(account).unwrap_or(false)
        }

        #[ink(message)]
        pub fn limits(&self) -> SaleLimits {
            self.limits
        }

        /// Individual cap of the current phase; `None` once Open.
        #[ink(message)]
        pub fn individual_limit(&self) -> Option<Balance> {
            self.limits.individual_cap(self.phase)
        }

        /// Aggregate cap of the current phase; `None` once Open.
        #[ink(message)]
        pub fn total_limit(&self) -> Option<Balance> {
            self.limits.total_cap(self.phase)
        }

        // ---------------------------------------------------------------------
        // Internal helpers
        // ---------------------------------------------------------------------

        fn advance_from(&mut self, expected: Phase) -> Result<(), Error> {
            if self.phase != expected {
                return Err(Error::InvalidPhaseTransition(expected));
            }
            let next = expected
                .next()
                .ok_or(Error::InvalidPhaseTransition(expected))?;
            self.phase = next;
            self.env().emit_event(PhaseUpgraded { phase: next });
            Ok(())
        }

        fn only_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotAuthorized);
            }
            Ok(())
        }

        fn assert_fundraising(&self) -> Result<(), Error> {
            if !self.fundraising {
                return Err(Error::FundraisingPaused);
            }
            Ok(())
        }
    }

    // =========================================================================
    // UNIT TESTS
    // =========================================================================

}
