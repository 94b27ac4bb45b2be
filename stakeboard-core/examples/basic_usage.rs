use stakeboard_core::{Amount, LendingTerms, WagerCalculator, WagerInput};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let calculator = WagerCalculator::new(LendingTerms::STANDARD);
    let balance = Amount::from_micro(160_000_000);
    let stake: Amount = "100".parse()?;

    for use_lending in [false, true] {
        let quote = calculator.quote(&WagerInput::new(stake, use_lending, balance));

        println!("Lending: {}", use_lending);
        for line in calculator.breakdown(&quote) {
            println!("  {}: {}", line.label, line.value);
        }
        println!("  Affordable with {}: {}", balance, quote.can_afford);
    }

    println!(
        "\nMax borrowed stake: {}",
        calculator.max_stake(balance, true)
    );

    Ok(())
}
