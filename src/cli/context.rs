use std::str::FromStr;

use dialoguer::{theme::ColorfulTheme, Confirm};
use rust_decimal::Decimal;

use crate::{
    config::{Config, ConfigManager},
    core::BankDirectory,
    ledger::{AccountKind, Customer},
    utils::build_info,
};

use super::{output, CliError, CliMode, CommandError, LoopControl};

/// (name, usage, description)
pub(crate) const COMMANDS: &[(&str, &str, &str)] = &[
    ("employee", "employee <pin>", "Unlock bank employee commands"),
    ("login", "login <first> <last> <account> <pin>", "Sign in as a customer"),
    ("logout", "logout", "End the current session"),
    ("create-customer", "create-customer <first> <last> <email>", "Employee: add a customer"),
    ("delete-customer", "delete-customer <account>", "Employee: remove a customer with zero balances"),
    ("list-customers", "list-customers", "Employee: show every customer"),
    ("transact", "transact <account> <savings|current> <deposit|withdraw> <amount>", "Employee: post a transaction"),
    ("balance", "balance", "Customer: show both balances"),
    ("history", "history <savings|current>", "Customer: show an account's transactions"),
    ("deposit", "deposit <savings|current> <amount>", "Customer: lodge money"),
    ("withdraw", "withdraw <savings|current> <amount>", "Customer: withdraw money"),
    ("version", "version", "Show build information"),
    ("help", "help", "List commands"),
    ("exit", "exit", "Leave the shell"),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    Employee,
    Customer { account_number: String },
}

#[derive(Debug, Clone, Copy)]
enum Movement {
    Deposit,
    Withdraw,
}

impl FromStr for Movement {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "d" | "deposit" => Ok(Movement::Deposit),
            "w" | "withdraw" => Ok(Movement::Withdraw),
            other => Err(CommandError::InvalidArguments(format!(
                "invalid transaction type `{other}` (expected deposit or withdraw)"
            ))),
        }
    }
}

pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) running: bool,
    directory: BankDirectory,
    config: Config,
    session: Session,
}

impl ShellContext {
    /// Loads configuration from the application data directory and opens the roster.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = ConfigManager::new()?;
        let config = manager.load()?;
        let layout = config.layout(manager.base_dir());
        tracing::info!(data_dir = %layout.root().display(), "opening bank directory");
        let directory = BankDirectory::open(layout)?;
        Ok(Self::with_directory(mode, config, directory))
    }

    pub fn with_directory(mode: CliMode, config: Config, directory: BankDirectory) -> Self {
        Self {
            mode,
            running: true,
            directory,
            config,
            session: Session::Anonymous,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn directory(&self) -> &BankDirectory {
        &self.directory
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        COMMANDS.iter().map(|(name, _, _)| *name).collect()
    }

    pub fn prompt(&self) -> String {
        match &self.session {
            Session::Anonymous => "bank> ".to_string(),
            Session::Employee => "bank[employee]> ".to_string(),
            Session::Customer { account_number } => format!("bank[{account_number}]> "),
        }
    }

    pub fn report_error(&self, err: CommandError) {
        match err {
            CommandError::Denied(message) => output::warning(message),
            other => output::error(other),
        }
    }

    pub fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Exit the banking shell?")
            .default(true)
            .interact()?)
    }

    pub fn dispatch(&mut self, command: &str, args: &[&str]) -> Result<LoopControl, CommandError> {
        match command {
            "help" => self.cmd_help(),
            "version" => {
                output::info(build_info::current().summary());
                Ok(LoopControl::Continue)
            }
            "exit" | "quit" => Ok(LoopControl::Exit),
            "logout" => {
                self.session = Session::Anonymous;
                output::info("Signed out.");
                Ok(LoopControl::Continue)
            }
            "employee" => self.cmd_employee(args),
            "login" => self.cmd_login(args),
            "create-customer" => self.cmd_create_customer(args),
            "delete-customer" => self.cmd_delete_customer(args),
            "list-customers" => self.cmd_list_customers(),
            "transact" => self.cmd_transact(args),
            "balance" => self.cmd_balance(),
            "history" => self.cmd_history(args),
            "deposit" => self.cmd_customer_movement(Movement::Deposit, args),
            "withdraw" => self.cmd_customer_movement(Movement::Withdraw, args),
            other => Err(CommandError::InvalidArguments(format!(
                "unknown command `{other}`; type `help` for a list"
            ))),
        }
    }

    fn cmd_help(&self) -> Result<LoopControl, CommandError> {
        output::section("Commands");
        for (_, usage, description) in COMMANDS {
            output::info(format!("  {usage:<70} {description}"));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_employee(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [pin] = expect_args::<1>("employee <pin>", args)?;
        if pin != self.config.employee_pin {
            self.session = Session::Anonymous;
            return Err(CommandError::Denied("Invalid PIN. Access denied.".into()));
        }
        self.session = Session::Employee;
        output::success("Employee session started.");
        Ok(LoopControl::Continue)
    }

    fn cmd_login(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let [first, last, account, pin] =
            expect_args::<4>("login <first> <last> <account> <pin>", args)?;
        let Some(customer) = self.directory.get_customer(first, last, account, pin) else {
            self.session = Session::Anonymous;
            return Err(CommandError::Denied(
                "Invalid credentials. Access denied.".into(),
            ));
        };
        output::success(format!("Welcome, {}", customer.full_name()));
        self.session = Session::Customer {
            account_number: customer.account_number().to_string(),
        };
        Ok(LoopControl::Continue)
    }

    fn cmd_create_customer(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        self.require_employee()?;
        let [first, last, email] =
            expect_args::<3>("create-customer <first> <last> <email>", args)?;
        let before = self.directory.len();
        let customer = self.directory.create_customer(first, last, email)?;
        let message = format!(
            "Account Number: {}  PIN: {}",
            customer.account_number(),
            customer.pin()
        );
        if self.directory.len() == before {
            output::warning("Customer already exists. Returning existing customer.");
        } else {
            output::success("Customer created successfully.");
        }
        output::info(message);
        Ok(LoopControl::Continue)
    }

    fn cmd_delete_customer(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        self.require_employee()?;
        let [account] = expect_args::<1>("delete-customer <account>", args)?;
        if self.directory.delete_customer(account)? {
            output::success("Customer deleted successfully.");
        } else {
            output::warning("Unable to delete customer. Check if account balances are zero.");
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_list_customers(&self) -> Result<LoopControl, CommandError> {
        self.require_employee()?;
        let customers = self.directory.all_customers();
        output::section(format!("Customers ({})", customers.len()));
        for customer in &customers {
            print_customer(customer);
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_transact(&mut self, args: &[&str]) -> Result<LoopControl, CommandError> {
        self.require_employee()?;
        let [account, kind, movement, amount] = expect_args::<4>(
            "transact <account> <savings|current> <deposit|withdraw> <amount>",
            args,
        )?;
        let account = account.to_string();
        let kind: AccountKind = kind.parse()?;
        let movement: Movement = movement.parse()?;
        let amount = parse_amount(amount)?;
        self.apply(&account, kind, movement, amount)
    }

    fn cmd_balance(&self) -> Result<LoopControl, CommandError> {
        let customer = self.signed_in_customer()?;
        for kind in AccountKind::ALL {
            output::info(format!(
                "{:<8} {:>12.2}",
                kind.label(),
                customer.account(kind).balance()
            ));
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_history(&self, args: &[&str]) -> Result<LoopControl, CommandError> {
        let customer = self.signed_in_customer()?;
        let [kind] = expect_args::<1>("history <savings|current>", args)?;
        let kind: AccountKind = kind.parse()?;
        let history = customer.account(kind).transaction_history();
        output::section(format!("Transaction History for {kind} Account"));
        if history.is_empty() {
            output::info("No transactions recorded.");
        }
        for txn in history {
            output::info(txn);
        }
        Ok(LoopControl::Continue)
    }

    fn cmd_customer_movement(
        &mut self,
        movement: Movement,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let account = self.signed_in_customer()?.account_number().to_string();
        let usage = match movement {
            Movement::Deposit => "deposit <savings|current> <amount>",
            Movement::Withdraw => "withdraw <savings|current> <amount>",
        };
        let [kind, amount] = expect_args::<2>(usage, args)?;
        let kind: AccountKind = kind.parse()?;
        let amount = parse_amount(amount)?;
        self.apply(&account, kind, movement, amount)
    }

    fn apply(
        &mut self,
        account: &str,
        kind: AccountKind,
        movement: Movement,
        amount: Decimal,
    ) -> Result<LoopControl, CommandError> {
        match movement {
            Movement::Deposit => {
                self.directory.deposit(account, kind, amount)?;
                output::success("Deposit successful.");
            }
            Movement::Withdraw => {
                if self.directory.withdraw(account, kind, amount)? {
                    output::success("Withdrawal successful.");
                } else {
                    output::warning("Insufficient funds.");
                }
            }
        }
        Ok(LoopControl::Continue)
    }

    fn require_employee(&self) -> Result<(), CommandError> {
        if self.session == Session::Employee {
            Ok(())
        } else {
            Err(CommandError::Denied(
                "This command requires an employee session (`employee <pin>`).".into(),
            ))
        }
    }

    fn signed_in_customer(&self) -> Result<&Customer, CommandError> {
        let Session::Customer { account_number } = &self.session else {
            return Err(CommandError::Denied(
                "This command requires a customer session (`login ...`).".into(),
            ));
        };
        self.directory.find_customer(account_number).ok_or_else(|| {
            CommandError::Denied("Your customer record no longer exists.".into())
        })
    }
}

fn print_customer(customer: &Customer) {
    output::info(format!("Name: {}", customer.full_name()));
    output::info(format!("Email: {}", customer.email()));
    output::info(format!("Account Number: {}", customer.account_number()));
    output::info(format!(
        "Savings Balance: {:.2}",
        customer.savings_account().balance()
    ));
    output::info(format!(
        "Current Balance: {:.2}",
        customer.current_account().balance()
    ));
    output::info("");
}

fn expect_args<'a, const N: usize>(
    usage: &str,
    args: &[&'a str],
) -> Result<[&'a str; N], CommandError> {
    <[&str; N]>::try_from(args)
        .map_err(|_| CommandError::InvalidArguments(format!("usage: {usage}")))
}

fn parse_amount(raw: &str) -> Result<Decimal, CommandError> {
    Decimal::from_str(raw).map_err(|_| {
        CommandError::InvalidArguments(format!(
            "`{raw}` is not a valid amount; enter a decimal number"
        ))
    })
}
