//! Line-oriented command interpreter for the exchange.
//!
//! Loads the persisted state at startup, processes one command per input
//! line, and saves the state back on `quit`.

use std::io::{self, BufRead};
use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use grn_exchange::report;
use grn_exchange::store;
use grn_exchange::{Command, Exchange, ParseError, Settlement};

#[derive(Parser, Debug)]
#[command(name = "exchange-cli", about = "Toy fiat/GRN-coin exchange")]
struct Args {
    /// Directory holding the binary state files
    #[arg(long, default_value = "data")]
    data_dir: PathBuf,

    /// Rows shown by attract-investors
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let state = match store::load(&args.data_dir) {
        Ok(state) => state,
        Err(err) => {
            eprintln!("Could not load state from {}: {err}", args.data_dir.display());
            std::process::exit(1);
        }
    };
    let mut exchange = Exchange::from_state(state);

    println!("Welcome");
    println!();
    print_menu();
    println!();

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        match Command::parse(&line) {
            Err(ParseError::Empty) => continue,
            Err(err) => println!("{err}"),
            Ok(Command::Quit) => {
                match store::save(&args.data_dir, &exchange.dump_state()) {
                    Ok(()) => println!("Successfully saved data"),
                    Err(err) => println!("Could not save data: {err}"),
                }
                return;
            }
            Ok(command) => dispatch(&mut exchange, command, args.top),
        }
    }
}

fn print_menu() {
    println!("COMMANDS");
    println!("add-wallet **fiatMoney** **name**");
    println!("make-order **type** **grnCoins** **walletId**");
    println!("transfer **senderId** **receiverId** **grnCoins**");
    println!("wallet-info **walletId**");
    println!("attract-investors");
    println!("export-report **path**");
    println!("quit");
}

fn dispatch(exchange: &mut Exchange, command: Command, top: usize) {
    match command {
        Command::AddWallet { fiat, name } => match exchange.create_wallet(&name, fiat) {
            Ok(id) => println!("Successfully added wallet with ID {id}"),
            Err(err) => println!("Could not add wallet: {err}"),
        },
        Command::MakeOrder {
            side,
            quantity,
            wallet,
        } => match exchange.submit_order(wallet, side, quantity) {
            Ok(settlements) => {
                println!("Successfully added order");
                for settlement in settlements {
                    print_settlement(&settlement);
                }
            }
            Err(err) => println!("Could not add order: {err}"),
        },
        Command::Transfer {
            sender,
            receiver,
            amount,
        } => match exchange.transfer(sender, receiver, amount) {
            Ok(()) => println!("Successful transfer"),
            Err(err) => println!("Unsuccessful transfer: {err}"),
        },
        Command::WalletInfo { wallet } => match exchange.wallet_snapshot(wallet) {
            Some(snapshot) => {
                println!("Owner: {}", snapshot.owner);
                println!("Fiat money: {}", snapshot.fiat);
                println!("GRN coins: {}", snapshot.coins);
            }
            None => println!("There is no wallet with ID: {wallet}"),
        },
        Command::AttractInvestors => {
            for summary in exchange.richest_investors(top) {
                println!("Owner: {}", summary.owner);
                println!("Wallet ID: {}", summary.wallet);
                println!("GRN coins: {}", summary.coins);
                println!("Executed orders: {}", summary.executed_orders);
                if let (Some(first), Some(last)) = (summary.first_activity, summary.last_activity)
                {
                    println!("First active: {}", report::format_timestamp(first));
                    println!("Last active: {}", report::format_timestamp(last));
                }
                println!();
            }
        }
        Command::ExportReport { path } => match report::write_csv(exchange, &path) {
            Ok(()) => println!("Report written to {}", path.display()),
            Err(err) => println!("Could not write report: {err}"),
        },
        Command::Quit => unreachable!("quit is handled by the input loop"),
    }
}

fn print_settlement(settlement: &Settlement) {
    println!(
        "Settled {} GRN: wallet {} -> wallet {} for {} fiat",
        settlement.coins, settlement.seller, settlement.buyer, settlement.fiat
    );
}
