use anyhow::Context;
use clap::Args;
use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Confirm;
use stakeboard_core::{Amount, BalanceSource, ClientConfig, StacksApi, WagerQuote};
use stakeboard_game::{new_game_form, ContractCallClient, GameCreationController};

/// Where the player's balance comes from
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct FundsArgs {
    /// Balance in micro-STX
    #[arg(long)]
    balance: Option<u64>,

    /// Stacks principal to look the balance up for
    #[arg(long)]
    address: Option<String>,
}

async fn resolve_balance(config: &ClientConfig, funds: &FundsArgs) -> anyhow::Result<Amount> {
    if let Some(micro) = funds.balance {
        return Ok(Amount::from_micro(micro));
    }

    let address = funds
        .address
        .as_deref()
        .context("Either --balance or --address is required")?;

    let api = StacksApi::new(config)?;
    let balance = api.balance(address).await?;
    Ok(balance.spendable())
}

fn print_breakdown(form: &GameCreationController) {
    let quote = form.quote();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["", "Amount"]);
    for line in form.calculator().breakdown(quote) {
        table.add_row(vec![line.label, line.value]);
    }

    println!("{}", table);
    println!("Your Balance: {}", form.balance());

    if !quote.can_afford {
        println!("{}", insufficient_notice(quote));
    }
}

fn insufficient_notice(quote: &WagerQuote) -> String {
    if quote.use_lending {
        format!(
            "Insufficient balance! Need {} for collateral",
            quote.required_lock()
        )
    } else {
        format!("Insufficient balance! Need {}", quote.required_lock())
    }
}

pub async fn show_quote(
    config: &ClientConfig,
    stake: &str,
    lending: bool,
    funds: &FundsArgs,
) -> anyhow::Result<()> {
    let balance = resolve_balance(config, funds).await?;

    let mut form = new_game_form(balance);
    form.set_stake_text(stake)?;
    form.set_lending(lending);

    print_breakdown(&form);

    Ok(())
}

pub async fn show_max_stake(
    config: &ClientConfig,
    lending: bool,
    funds: &FundsArgs,
) -> anyhow::Result<()> {
    let balance = resolve_balance(config, funds).await?;

    let mut form = new_game_form(balance);
    form.set_lending(lending);
    form.fill_max_stake();

    println!("Balance: {}", balance);
    if lending {
        println!(
            "Max stake (borrowed): {} (collateral {})",
            form.stake(),
            form.quote().collateral
        );
    } else {
        println!("Max stake: {}", form.stake());
    }

    Ok(())
}

pub async fn create_game(
    config: &ClientConfig,
    stake: &str,
    cell: Option<usize>,
    lending: bool,
    funds: &FundsArgs,
    yes: bool,
) -> anyhow::Result<()> {
    let balance = resolve_balance(config, funds).await?;

    let mut form = new_game_form(balance);
    form.set_stake_text(stake)?;
    form.set_lending(lending);
    if let Some(cell) = cell {
        form.select_cell(cell)?;
    }

    println!("{}", form.board());
    println!();
    if !form.stake().is_zero() {
        print_breakdown(&form);
        println!();
    }

    if form.can_submit() && !form.board().is_empty() && !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} on {}?", form.submit_label(), config.contract_id()))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let client = ContractCallClient::new(config.clone())?;
    let receipt = form.create_game(&client).await?;

    println!("Game prepared!");
    println!("Reference: {}", receipt.reference);
    println!(
        "Prepared at: {}",
        receipt.submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();
    println!("Sign and broadcast this contract call with your wallet:");
    println!("{}", serde_json::to_string_pretty(&receipt.details)?);

    Ok(())
}
