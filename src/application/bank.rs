use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::domain::{Account, AccountKind, AccountNumber, Customer, CustomerId, Money};
use crate::storage::{self, BankData};

use super::AppError;

/// The bank ledger: owns every account and customer.
///
/// Customers refer to accounts by number; every operation resolves
/// customer → account through the ledger, first match wins.
#[derive(Debug, Default)]
pub struct Bank {
    accounts: Vec<Account>,
    customers: Vec<Customer>,
}

/// Parameters of a transfer. `to_customer: None` moves money between two
/// accounts of the same customer.
#[derive(Debug, Clone, Copy)]
pub struct TransferRequest {
    pub from_customer: CustomerId,
    pub from_kind: AccountKind,
    pub amount: Money,
    pub to_customer: Option<CustomerId>,
    pub to_kind: AccountKind,
}

impl TransferRequest {
    pub fn within(customer: CustomerId, from: AccountKind, to: AccountKind, amount: Money) -> Self {
        Self {
            from_customer: customer,
            from_kind: from,
            amount,
            to_customer: None,
            to_kind: to,
        }
    }

    pub fn between(
        from_customer: CustomerId,
        from_kind: AccountKind,
        to_customer: CustomerId,
        to_kind: AccountKind,
        amount: Money,
    ) -> Self {
        Self {
            from_customer,
            from_kind,
            amount,
            to_customer: Some(to_customer),
            to_kind,
        }
    }

    pub fn is_self_transfer(&self) -> bool {
        self.to_customer.is_none()
    }
}

/// Outcome of a completed transfer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferReceipt {
    pub from_account: AccountNumber,
    pub to_account: AccountNumber,
    pub amount: Money,
    pub from_balance: Money,
    pub to_balance: Money,
    pub self_transfer: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BalanceView {
    pub customer: CustomerId,
    pub kind: AccountKind,
    pub account: AccountNumber,
    pub balance: Money,
}

impl Bank {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Registration
    // ========================

    pub fn add_account(&mut self, account: Account) {
        debug!(number = account.number, kind = %account.kind, "adding account");
        self.accounts.push(account);
    }

    pub fn add_customer(&mut self, customer: Customer) {
        debug!(id = customer.id, "adding customer");
        self.customers.push(customer);
    }

    /// Link an existing account to an existing customer. The link takes the
    /// kind of the first account with that number.
    pub fn attach_account(
        &mut self,
        customer_id: CustomerId,
        number: AccountNumber,
    ) -> Result<(), AppError> {
        let kind = self
            .find_account(number)
            .map(|account| account.kind)
            .ok_or(AppError::AccountNotFound(number))?;
        self.link(customer_id, number, kind)
    }

    /// Open a new account for an existing customer and link it.
    pub fn open_account(
        &mut self,
        customer_id: CustomerId,
        kind: AccountKind,
        number: AccountNumber,
        holder: impl Into<String>,
        opening_balance: Money,
    ) -> Result<(), AppError> {
        if !self.customer_exists(customer_id) {
            return Err(AppError::CustomerNotFound(customer_id));
        }
        let account = Account::open(number, holder, kind, opening_balance)?;
        self.add_account(account);
        self.link(customer_id, number, kind)
    }

    fn link(
        &mut self,
        customer_id: CustomerId,
        number: AccountNumber,
        kind: AccountKind,
    ) -> Result<(), AppError> {
        let customer = self
            .customers
            .iter_mut()
            .find(|c| c.id == customer_id)
            .ok_or(AppError::CustomerNotFound(customer_id))?;

        if !customer.add_account(number, kind) {
            warn!(
                customer = customer_id,
                number,
                %kind,
                "customer already has an account of this kind; the new one is shadowed"
            );
        }
        Ok(())
    }

    // ========================
    // Lookup
    // ========================

    pub fn find_customer(&self, id: CustomerId) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn find_account(&self, number: AccountNumber) -> Option<&Account> {
        self.accounts.iter().find(|a| a.number == number)
    }

    pub fn customer_exists(&self, id: CustomerId) -> bool {
        self.find_customer(id).is_some()
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    /// Index into `accounts` of the customer's account of the given kind.
    /// The account must match both the linked number and the kind.
    fn resolve(&self, customer_id: CustomerId, kind: AccountKind) -> Result<usize, AppError> {
        let customer = self
            .find_customer(customer_id)
            .ok_or(AppError::CustomerNotFound(customer_id))?;
        let not_found = || AppError::AccountNotFoundForVariant {
            customer: customer_id,
            kind,
        };
        let number = customer.account_for(kind).ok_or_else(not_found)?;
        self.accounts
            .iter()
            .position(|a| a.number == number && a.kind == kind)
            .ok_or_else(not_found)
    }

    // ========================
    // Money movement
    // ========================

    pub fn deposit(
        &mut self,
        customer_id: CustomerId,
        kind: AccountKind,
        amount: Money,
    ) -> Result<Money, AppError> {
        let index = self.resolve(customer_id, kind)?;
        let account = &mut self.accounts[index];
        account.deposit(amount)?;
        debug!(customer = customer_id, %kind, %amount, balance = %account.balance(), "deposit");
        Ok(account.balance())
    }

    pub fn withdraw(
        &mut self,
        customer_id: CustomerId,
        kind: AccountKind,
        amount: Money,
    ) -> Result<Money, AppError> {
        let index = self.resolve(customer_id, kind)?;
        let account = &mut self.accounts[index];
        account.withdraw(amount)?;
        debug!(customer = customer_id, %kind, %amount, balance = %account.balance(), "withdraw");
        Ok(account.balance())
    }

    /// Withdraw from the source, then deposit into the target.
    ///
    /// Both endpoints are resolved before anything is touched. Should the
    /// deposit fail after the withdrawal went through, the amount is paid
    /// back into the source before the error is returned.
    pub fn transfer(&mut self, request: TransferRequest) -> Result<TransferReceipt, AppError> {
        let from = self.resolve(request.from_customer, request.from_kind)?;
        let target_customer = request.to_customer.unwrap_or(request.from_customer);
        let to = self.resolve(target_customer, request.to_kind)?;
        let amount = request.amount;

        self.accounts[from].withdraw(amount)?;
        if let Err(err) = self.accounts[to].deposit(amount) {
            warn!(
                from = self.accounts[from].number,
                to = self.accounts[to].number,
                %amount,
                "deposit leg failed, restoring source"
            );
            self.accounts[from].deposit(amount)?;
            return Err(err.into());
        }

        let receipt = TransferReceipt {
            from_account: self.accounts[from].number,
            to_account: self.accounts[to].number,
            amount,
            from_balance: self.accounts[from].balance(),
            to_balance: self.accounts[to].balance(),
            self_transfer: request.is_self_transfer(),
        };
        debug!(
            from = receipt.from_account,
            to = receipt.to_account,
            %amount,
            self_transfer = receipt.self_transfer,
            "transfer"
        );
        Ok(receipt)
    }

    pub fn view_balance(
        &self,
        customer_id: CustomerId,
        kind: AccountKind,
    ) -> Result<BalanceView, AppError> {
        let account = &self.accounts[self.resolve(customer_id, kind)?];
        Ok(BalanceView {
            customer: customer_id,
            kind,
            account: account.number,
            balance: account.balance(),
        })
    }

    // ========================
    // Persistence
    // ========================

    pub fn save_data(&self, path: &Path) -> Result<(), AppError> {
        storage::save_file(path, |writer| {
            storage::write_bank(writer, &self.accounts, &self.customers)
        })?;
        info!(
            path = %path.display(),
            accounts = self.accounts.len(),
            customers = self.customers.len(),
            "saved bank data"
        );
        Ok(())
    }

    /// Append the accounts and customers stored at `path`. Nothing is added
    /// unless the whole file decodes.
    pub fn load_data(&mut self, path: &Path) -> Result<(), AppError> {
        let BankData {
            accounts,
            customers,
        } = storage::load_file(path, storage::read_bank)?;
        info!(
            path = %path.display(),
            accounts = accounts.len(),
            customers = customers.len(),
            "loaded bank data"
        );
        self.accounts.extend(accounts);
        self.customers.extend(customers);
        Ok(())
    }
}
