//! REPL commands - tokenized parsing for the command interpreter.
//!
//! One line of input per invocation, tokens split on whitespace. Parsing is
//! separate from terminal I/O so it can be tested without one.

use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use crate::order_book::Side;
use crate::WalletId;

/// A parsed input line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// `add-wallet <fiatMoney> <name>`
    AddWallet { fiat: Decimal, name: String },
    /// `make-order <buy|sell> <grnCoins> <walletId>`
    MakeOrder {
        side: Side,
        quantity: Decimal,
        wallet: WalletId,
    },
    /// `transfer <senderId> <receiverId> <grnCoins>`
    Transfer {
        sender: WalletId,
        receiver: WalletId,
        amount: Decimal,
    },
    /// `wallet-info <walletId>`
    WalletInfo { wallet: WalletId },
    /// `attract-investors`
    AttractInvestors,
    /// `export-report <path>`
    ExportReport { path: PathBuf },
    /// `quit`
    Quit,
}

/// Why a line failed to parse.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("`{command}` expects {expected}")]
    BadArguments {
        command: &'static str,
        expected: &'static str,
    },
}

impl Command {
    /// Parse one whitespace-tokenized input line. Tokens beyond a complete
    /// command are ignored.
    pub fn parse(line: &str) -> Result<Self, ParseError> {
        let mut tokens = line.split_whitespace();
        let command = tokens.next().ok_or(ParseError::Empty)?;

        match command {
            "add-wallet" => {
                let fiat = arg(&mut tokens, "add-wallet", "<fiatMoney> <name>")?;
                let name = tokens
                    .next()
                    .ok_or(ParseError::BadArguments {
                        command: "add-wallet",
                        expected: "<fiatMoney> <name>",
                    })?
                    .to_string();
                Ok(Command::AddWallet { fiat, name })
            }
            "make-order" => {
                const EXPECTED: &str = "<buy|sell> <grnCoins> <walletId>";
                let side = match tokens.next() {
                    Some("buy") => Side::Buy,
                    Some("sell") => Side::Sell,
                    _ => {
                        return Err(ParseError::BadArguments {
                            command: "make-order",
                            expected: EXPECTED,
                        })
                    }
                };
                let quantity = arg(&mut tokens, "make-order", EXPECTED)?;
                let wallet = arg(&mut tokens, "make-order", EXPECTED)?;
                Ok(Command::MakeOrder {
                    side,
                    quantity,
                    wallet,
                })
            }
            "transfer" => {
                const EXPECTED: &str = "<senderId> <receiverId> <grnCoins>";
                let sender = arg(&mut tokens, "transfer", EXPECTED)?;
                let receiver = arg(&mut tokens, "transfer", EXPECTED)?;
                let amount = arg(&mut tokens, "transfer", EXPECTED)?;
                Ok(Command::Transfer {
                    sender,
                    receiver,
                    amount,
                })
            }
            "wallet-info" => {
                let wallet = arg(&mut tokens, "wallet-info", "<walletId>")?;
                Ok(Command::WalletInfo { wallet })
            }
            "attract-investors" => Ok(Command::AttractInvestors),
            "export-report" => {
                let path = tokens.next().ok_or(ParseError::BadArguments {
                    command: "export-report",
                    expected: "<path>",
                })?;
                Ok(Command::ExportReport {
                    path: PathBuf::from(path),
                })
            }
            "quit" => Ok(Command::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

/// Pull and parse the next token, or report what the command expected.
fn arg<'a, T, I>(tokens: &mut I, command: &'static str, expected: &'static str) -> Result<T, ParseError>
where
    T: FromStr,
    I: Iterator<Item = &'a str>,
{
    tokens
        .next()
        .and_then(|t| t.parse().ok())
        .ok_or(ParseError::BadArguments { command, expected })
}
