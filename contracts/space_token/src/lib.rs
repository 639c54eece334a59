#![cfg_attr(not(feature = "std"), no_std, no_main)]

//! SPACE COIN: SpaceToken
//! Fixed-supply token with an owner-switched transfer tax routed to a treasury.

pub mod constants {
    pub const SCALING_FACTOR: u128 = 1_000_000_000_000_000_000u128;

    pub const TOKEN_NAME: &str = "Space Token";
    pub const TOKEN_SYMBOL: &str = "SPC";
    pub const TOKEN_DECIMALS: u8 = 18;
    pub const TOTAL_SUPPLY: u128 = 500_000 * SCALING_FACTOR;

    // Transfer tax, applied only while switched on
    pub const DEFAULT_TAX_PERCENT: u8 = 2; // 2%
    pub const PERCENT_DENOMINATOR: u128 = 100;
}

#[ink::contract]
mod space_token {
    use crate::constants::*;
    use ink::prelude::string::String;
    use ink::storage::Mapping;

    #[ink(storage)]
    pub struct SpaceToken {
        name: String,
        symbol: String,
        decimals: u8,
        total_supply: Balance,
        balances: Mapping<AccountId, Balance>,
        owner: AccountId,
        treasury: AccountId,
        tax_enabled: bool,
        tax_percent: u8,
    }

    #[ink(event)]
    pub struct Transfer {
        #[ink(topic)] from: Option<AccountId>,
        #[ink(topic)] to: Option<AccountId>,
        value: Balance,
    }

    #[ink(event)]
    pub struct TaxStatusChanged {
        enabled: bool,
    }

    #[derive(Debug, PartialEq, Eq, scale::Encode, scale::Decode)]
    #[cfg_attr(feature = "std", derive(scale_info::TypeInfo))]
    pub enum Error {
        NotAuthorized,
        InsufficientBalance,
        InvalidTaxRate,
        Overflow,
    }

    impl Error {
        pub fn code(&self) -> &'static str {
            match self {
                Error::NotAuthorized => "ONLY_OWNER",
                Error::InsufficientBalance => "INSUFFICIENT_BALANCE",
                Error::InvalidTaxRate => "INVALID_TAX_RATE",
                Error::Overflow => "OVERFLOW",
            }
        }
    }

    impl SpaceToken {
        /// Mints the whole supply to the deployer. Tax starts switched off.
        #[ink(constructor)]
        pub fn new(treasury: AccountId) -> Self {
            Self::init(treasury, TOTAL_SUPPLY, DEFAULT_TAX_PERCENT)
        }

        #[ink(constructor)]
        pub fn new_with_supply(
            treasury: AccountId,
            total_supply: Balance,
            tax_percent: u8,
        ) -> Result<Self, Error> {
            if u128::from(tax_percent) > PERCENT_DENOMINATOR {
                return Err(Error::InvalidTaxRate);
            }
            Ok(Self::init(treasury, total_supply, tax_percent))
        }

        fn init(treasury: AccountId, total_supply: Balance, tax_percent: u8) -> Self {
            let caller = Self::env().caller();
            let mut balances = Mapping::default();
            balances.insert(caller, &total_supply);

            Self::env().emit_event(Transfer {
                from: None,
                to: Some(caller),
                value: total_supply,
            });

            Self {
                name: String::from(TOKEN_NAME),
                symbol: String::from(TOKEN_SYMBOL),
                decimals: TOKEN_DECIMALS,
                total_supply,
                balances,
                owner: caller,
                treasury,
                tax_enabled: false,
                tax_percent,
            }
        }

        #[ink(message)]
        pub fn name(&self) -> String {
            self.name.clone()
        }

        #[ink(message)]
        pub fn symbol(&self) -> String {
            self.symbol.clone()
        }

        #[ink(message)]
        pub fn decimals(&self) -> u8 {
            self.decimals
        }

        #[ink(message)]
        pub fn total_supply(&self) -> Balance {
            self.total_supply
        }

        #[ink(message)]
        pub fn balance_of(&self, owner: AccountId) -> Balance {
            self.balances.get(owner).unwrap_or(0)
        }

        #[ink(message)]
        pub fn owner(&self) -> AccountId {
            self.owner
        }

        #[ink(message)]
        pub fn treasury(&self) -> AccountId {
            self.treasury
        }

        #[ink(message)]
        pub fn tax_status(&self) -> bool {
            self.tax_enabled
        }

        #[ink(message)]
        pub fn tax_percent(&self) -> u8 {
            self.tax_percent
        }

        /// Tax a transfer of `amount` would pay right now, rounded down.
        #[ink(message)]
        pub fn compute_tax(&self, amount: Balance) -> Balance {
            if !self.tax_enabled {
                return 0;
            }
            // amount = 100q + r, so amount * p / 100 = q * p + r * p / 100 without a wide multiply.
            let percent = u128::from(self.tax_percent);
            let whole = amount / PERCENT_DENOMINATOR;
            let rest = amount % PERCENT_DENOMINATOR;
            whole * percent + (rest * percent) / PERCENT_DENOMINATOR
        }

        #[ink(message)]
        pub fn set_tax(&mut self, enabled: bool) -> Result<(), Error> {
            self.ensure_owner()?;
            self.tax_enabled = enabled;
            self.env().emit_event(TaxStatusChanged { enabled });
            Ok(())
        }

        #[ink(message)]
        pub fn transfer(&mut self, to: AccountId, value: Balance) -> Result<(), Error> {
            let from = self.env().caller();
            self.process_transfer(from, to, value)
        }

        // Sender always pays `value`; recipient gets `value - tax`, treasury gets `tax`.
        fn process_transfer(&mut self, from: AccountId, to: AccountId, value: Balance) -> Result<(), Error> {
            let tax = self.compute_tax(value);
            let net_value = value.checked_sub(tax).ok_or(Error::Overflow)?;

            self.debit_balance(from, value)?;
            self.credit_balance(to, net_value)?;
            self.env().emit_event(Transfer { from: Some(from), to: Some(to), value: net_value });

            if tax > 0 {
                let treasury = self.treasury;
                self.credit_balance(treasury, tax)?;
                self.env().emit_event(Transfer { from: Some(from), to: Some(treasury), value: tax });
            }

            Ok(())
        }

        fn debit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            if balance < amount {
                return Err(Error::InsufficientBalance);
            }
            self.balances.insert(account, &(balance - amount));
            Ok(())
        }

        fn credit_balance(&mut self, account: AccountId, amount: Balance) -> Result<(), Error> {
            let balance = self.balance_of(account);
            let new_balance = balance.checked_add(amount).ok_or(Error::Overflow)?;
            self.balances.insert(account, &new_balance);
            Ok(())
        }

        fn ensure_owner(&self) -> Result<(), Error> {
            if self.env().caller() != self.owner {
                return Err(Error::NotAuthorized);
            }
            Ok(())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use ink::env::{test, DefaultEnvironment};

        type Env = DefaultEnvironment;

        const TRANSFER_AMOUNT: Balance = 10_000;

        fn accounts() -> test::DefaultAccounts<Env> {
            test::default_accounts::<Env>()
        }

        fn set_caller(account: AccountId) {
            test::set_caller::<Env>(account);
        }

        // alice = owner, bob = treasury, charlie / django = holders
        fn deploy() -> SpaceToken {
            let accs = accounts();
            set_caller(accs.alice);
            SpaceToken::new(accs.bob)
        }

        fn decode_transfer(event: &test::EmittedEvent) -> Transfer {
            <Transfer as scale::Decode>::decode(&mut &event.data[..])
                .expect("invalid Transfer event data")
        }

        #[ink::test]
        fn supply_belongs_to_owner() {
            let token = deploy();
            assert_eq!(token.balance_of(accounts().alice), TOTAL_SUPPLY);
            assert_eq!(token.total_supply(), token.balance_of(accounts().alice));
            assert_eq!(token.owner(), accounts().alice);
        }

        #[ink::test]
        fn metadata() {
            let token = deploy();
            assert_eq!(token.name(), "Space Token");
            assert_eq!(token.symbol(), "SPC");
            assert_eq!(token.decimals(), 18);
        }

        #[ink::test]
        fn treasury_and_tax_defaults() {
            let token = deploy();
            assert_eq!(token.treasury(), accounts().bob);
            assert!(!token.tax_status());
            assert_eq!(token.tax_percent(), DEFAULT_TAX_PERCENT);
        }

        #[ink::test]
        fn constructor_emits_mint() {
            let token = deploy();
            let events: Vec<_> = test::recorded_events().collect();
            assert_eq!(events.len(), 1);
            let mint = decode_transfer(&events[0]);
            assert_eq!(mint.from, None);
            assert_eq!(mint.to, Some(accounts().alice));
            assert_eq!(mint.value, token.total_supply());
        }

        #[ink::test]
        fn tax_rate_above_hundred_rejected() {
            set_caller(accounts().alice);
            assert!(matches!(
                SpaceToken::new_with_supply(accounts().bob, 1_000, 101),
                Err(Error::InvalidTaxRate)
            ));
            let token = SpaceToken::new_with_supply(accounts().bob, 1_000, 100).expect("valid rate");
            assert_eq!(token.total_supply(), 1_000);
            assert_eq!(token.balance_of(accounts().alice), 1_000);
        }

        #[ink::test]
        fn owner_sets_tax_status() {
            let mut token = deploy();
            assert_eq!(token.set_tax(true), Ok(()));
            assert!(token.tax_status());
            assert_eq!(token.set_tax(false), Ok(()));
            assert!(!token.tax_status());
        }

        #[ink::test]
        fn non_owner_cannot_set_tax() {
            let mut token = deploy();
            set_caller(accounts().charlie);
            let err = token.set_tax(true).unwrap_err();
            assert_eq!(err, Error::NotAuthorized);
            assert_eq!(err.code(), "ONLY_OWNER");
            assert!(!token.tax_status());
        }

        #[ink::test]
        fn transfer_without_tax() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(false).unwrap();
            token.transfer(accs.charlie, TRANSFER_AMOUNT).unwrap();
            assert_eq!(token.balance_of(accs.charlie), TRANSFER_AMOUNT);
            assert_eq!(token.balance_of(accs.bob), 0);
            assert_eq!(token.balance_of(accs.alice), TOTAL_SUPPLY - TRANSFER_AMOUNT);
        }

        #[ink::test]
        fn transfer_with_tax_funds_treasury() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(true).unwrap();
            token.transfer(accs.charlie, TRANSFER_AMOUNT).unwrap();
            assert_eq!(token.balance_of(accs.charlie), 9_800);
            assert_eq!(token.balance_of(accs.bob), 200);
            assert_eq!(token.balance_of(accs.alice), TOTAL_SUPPLY - TRANSFER_AMOUNT);
        }

        #[ink::test]
        fn taxed_transfer_emits_recipient_and_treasury_legs() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(true).unwrap();
            token.transfer(accs.charlie, TRANSFER_AMOUNT).unwrap();

            let events: Vec<_> = test::recorded_events().collect();
            // mint, TaxStatusChanged, recipient leg, treasury leg
            assert_eq!(events.len(), 4);
            let to_recipient = decode_transfer(&events[2]);
            let to_treasury = decode_transfer(&events[3]);
            assert_eq!(to_recipient.to, Some(accs.charlie));
            assert_eq!(to_recipient.value, 9_800);
            assert_eq!(to_treasury.to, Some(accs.bob));
            assert_eq!(to_treasury.value, 200);
        }

        #[ink::test]
        fn tax_rounds_down() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(true).unwrap();

            // 49 * 2% = 0.98 -> 0
            assert_eq!(token.compute_tax(49), 0);
            token.transfer(accs.charlie, 49).unwrap();
            assert_eq!(token.balance_of(accs.charlie), 49);
            assert_eq!(token.balance_of(accs.bob), 0);

            // 149 * 2% = 2.98 -> 2
            assert_eq!(token.compute_tax(149), 2);
            token.transfer(accs.django, 149).unwrap();
            assert_eq!(token.balance_of(accs.django), 147);
            assert_eq!(token.balance_of(accs.bob), 2);
        }

        #[ink::test]
        fn compute_tax_is_zero_when_disabled() {
            let token = deploy();
            assert_eq!(token.compute_tax(TRANSFER_AMOUNT), 0);
        }

        #[ink::test]
        fn compute_tax_does_not_overflow() {
            let mut token = deploy();
            token.set_tax(true).unwrap();
            let tax = token.compute_tax(Balance::MAX);
            assert!(tax <= Balance::MAX / 50 + 1);
            assert!(tax > 0);
        }

        #[ink::test]
        fn insufficient_balance_rejected() {
            let mut token = deploy();
            let accs = accounts();
            token.transfer(accs.charlie, 100).unwrap();

            set_caller(accs.charlie);
            let err = token.transfer(accs.django, 101).unwrap_err();
            assert_eq!(err, Error::InsufficientBalance);
            assert_eq!(err.code(), "INSUFFICIENT_BALANCE");
            assert_eq!(token.balance_of(accs.charlie), 100);
            assert_eq!(token.balance_of(accs.django), 0);
        }

        #[ink::test]
        fn holder_without_balance_cannot_transfer() {
            let mut token = deploy();
            let accs = accounts();
            set_caller(accs.eve);
            assert_eq!(token.transfer(accs.alice, 1), Err(Error::InsufficientBalance));
            assert_eq!(token.transfer(accs.alice, 0), Ok(()));
        }

        #[ink::test]
        fn transfers_conserve_supply() {
            let mut token = deploy();
            let accs = accounts();
            let holders = [accs.alice, accs.bob, accs.charlie, accs.django, accs.eve];
            let sum = |t: &SpaceToken| holders.iter().map(|a| t.balance_of(*a)).sum::<Balance>();

            token.set_tax(true).unwrap();
            token.transfer(accs.charlie, 12_345).unwrap();
            assert_eq!(sum(&token), TOTAL_SUPPLY);

            set_caller(accs.charlie);
            token.transfer(accs.django, 1_001).unwrap();
            token.transfer(accs.charlie, 500).unwrap();
            assert_eq!(sum(&token), TOTAL_SUPPLY);

            set_caller(accs.alice);
            token.set_tax(false).unwrap();
            set_caller(accs.django);
            token.transfer(accs.eve, 981).unwrap();
            assert_eq!(sum(&token), TOTAL_SUPPLY);
            assert_eq!(token.balance_of(accs.django), 0);
        }

        #[ink::test]
        fn taxed_transfer_to_treasury_keeps_full_amount() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(true).unwrap();
            token.transfer(accs.bob, TRANSFER_AMOUNT).unwrap();
            assert_eq!(token.balance_of(accs.bob), TRANSFER_AMOUNT);
        }

        #[ink::test]
        fn taxed_transfer_to_self_only_loses_tax() {
            let mut token = deploy();
            let accs = accounts();
            token.set_tax(true).unwrap();
            token.transfer(accs.alice, TRANSFER_AMOUNT).unwrap();
            assert_eq!(token.balance_of(accs.alice), TOTAL_SUPPLY - 200);
            assert_eq!(token.balance_of(accs.bob), 200);
        }

        #[ink::test]
        fn treasury_transfers_are_taxed_back_to_itself() {
            let mut token = deploy();
            let accs = accounts();
            token.transfer(accs.bob, TRANSFER_AMOUNT).unwrap();
            token.set_tax(true).unwrap();

            set_caller(accs.bob);
            token.transfer(accs.charlie, 5_000).unwrap();
            assert_eq!(token.balance_of(accs.charlie), 4_900);
            assert_eq!(token.balance_of(accs.bob), 5_100);
        }
    }
}
