//! CLI commands

use ctoken_core::{Address, Amount, ComplianceId};
use ctoken_journal::{verify_chain, JournalReader, KeySigner};
use ctoken_token::{Operation, Outcome, TokenConfig};
use rust_decimal::Decimal;
use std::path::Path;

use crate::context::AppContext;

/// Convert a display amount into base units
fn to_base_units(ctx: &AppContext, amount: Decimal) -> Result<Amount, anyhow::Error> {
    Ok(Amount::from_units(amount, ctx.token.decimals())?)
}

fn display(ctx: &AppContext, amount: Amount) -> String {
    match amount.to_units(ctx.token.decimals()) {
        Ok(units) => format!("{} {}", units, ctx.token.symbol()),
        Err(_) => format!("{} base units", amount),
    }
}

/// Deploy a token into `data_path`
pub fn init(data_path: &Path, config: TokenConfig) -> Result<(), anyhow::Error> {
    let ctx = AppContext::init(data_path, config)?;

    println!(
        "✅ Deployed {} ({}) issued by {} at compliance {}",
        ctx.token.name(),
        ctx.token.symbol(),
        ctx.token.issuer(),
        ctx.token.current_compliance_id()
    );
    Ok(())
}

/// Generate a participant key and print its address
pub fn keygen(output: &Path) -> Result<(), anyhow::Error> {
    if output.exists() {
        anyhow::bail!("Key file {} already exists", output.display());
    }

    let signer = KeySigner::generate();
    signer.write_to(output)?;

    println!("✅ Key written to {}", output.display());
    println!("   Address: {}", signer.address());
    println!("   Public key: {}", signer.public_key_hex());
    Ok(())
}

/// Mint tokens to a holder (issuer only)
pub fn issue(
    ctx: &mut AppContext,
    signer: &KeySigner,
    holder: Address,
    amount: Decimal,
) -> Result<(), anyhow::Error> {
    let amount = to_base_units(ctx, amount)?;
    let op = Operation::Issue {
        caller: signer.address(),
        holder,
        amount,
    };

    let (record, _) = ctx.commit(op, signer)?;

    println!(
        "✅ Issued {} to {} (seq: {})",
        display(ctx, amount),
        holder,
        record.sequence
    );
    Ok(())
}

/// Open a compliance round (issuer only)
pub fn open_round(
    ctx: &mut AppContext,
    signer: &KeySigner,
    compliance_id: ComplianceId,
) -> Result<(), anyhow::Error> {
    let op = Operation::OpenRound {
        caller: signer.address(),
        compliance_id,
    };

    let (record, outcome) = ctx.commit(op, signer)?;

    if let Outcome::RoundOpened(opened) = outcome {
        if let Some(previous) = opened.superseded {
            println!("⚠️  Round {} superseded and promoted to current", previous);
        }
        if opened.settled {
            println!(
                "✅ No holders registered: compliance {} is current (seq: {})",
                opened.id, record.sequence
            );
        } else {
            println!(
                "✅ Compliance round {} opened, {} holder(s) must decide (seq: {})",
                opened.id, opened.eligible, record.sequence
            );
        }
    }
    Ok(())
}

/// Accept the pending compliance round
pub fn accept(ctx: &mut AppContext, signer: &KeySigner) -> Result<(), anyhow::Error> {
    let op = Operation::Accept {
        caller: signer.address(),
    };
    let (record, outcome) = ctx.commit(op, signer)?;

    if let Outcome::Decided { round } = outcome {
        println!(
            "✅ {} accepted compliance {} ({}/{} signed off, seq: {})",
            signer.address(),
            round,
            ctx.token.sign_off_count(),
            ctx.token.eligible_holders(),
            record.sequence
        );
    }
    Ok(())
}

/// Decline the pending compliance round
pub fn decline(ctx: &mut AppContext, signer: &KeySigner) -> Result<(), anyhow::Error> {
    let op = Operation::Decline {
        caller: signer.address(),
    };
    let (record, outcome) = ctx.commit(op, signer)?;

    if let Outcome::Decided { round } = outcome {
        println!(
            "✅ {} declined compliance {} (seq: {})",
            signer.address(),
            round,
            record.sequence
        );
        println!("   Tokens can only be returned to the issuer until the next round");
    }
    Ok(())
}

/// Transfer tokens from the signer to `receiver`
pub fn transfer(
    ctx: &mut AppContext,
    signer: &KeySigner,
    receiver: Address,
    amount: Decimal,
) -> Result<(), anyhow::Error> {
    let amount = to_base_units(ctx, amount)?;
    let op = Operation::Transfer {
        caller: signer.address(),
        receiver,
        amount,
    };

    let (record, outcome) = ctx.commit(op, signer)?;

    if let Outcome::Transferred(authorization) = outcome {
        println!(
            "✅ Transferred {} from {} to {} [{}] (seq: {})",
            display(ctx, amount),
            signer.address(),
            receiver,
            authorization,
            record.sequence
        );
    }
    Ok(())
}

/// Print a holder's balance and compliance status
pub fn balance(ctx: &AppContext, holder: Address) -> Result<(), anyhow::Error> {
    let token = &ctx.token;

    println!("Balance for {}: {}", holder, display(ctx, token.balance_of(&holder)));
    match token.holder_compliance(&holder) {
        Some(id) => println!("   Last acknowledged compliance: {}", id),
        None => println!("   Not a registered holder"),
    }
    if token.pending_compliance_id().is_some() {
        println!("   Decision in pending round: {}", token.decision_of(&holder));
    }
    Ok(())
}

/// Print token metadata and round state
pub fn status(ctx: &AppContext) -> Result<(), anyhow::Error> {
    let token = &ctx.token;

    println!("📋 {} ({})", token.name(), token.symbol());
    println!("   Issuer:            {}", token.issuer());
    println!("   Document registry: {}", token.document_registry());
    println!("   Decimals:          {}", token.decimals());
    println!("   Total supply:      {}", display(ctx, token.total_supply()));
    println!("   Holders:           {}", token.total_holders());
    println!("   Compliance:        {}", token.current_compliance_id());

    match token.pending_compliance_id() {
        Some(pending) => {
            println!("   Round:             {} ({})", token.round_state(), pending);
            println!(
                "   Sign-offs:         {}/{} ({} declined)",
                token.sign_off_count(),
                token.eligible_holders(),
                token.decline_count()
            );
            if token.is_round_complete() {
                println!("   Every eligible holder has decided");
            }
        }
        None => println!("   Round:             {}", token.round_state()),
    }
    println!("   Journal:           {} record(s)", ctx.last_sequence());
    Ok(())
}

/// List holders in registration order
pub fn holders(ctx: &AppContext, json: bool) -> Result<(), anyhow::Error> {
    let holders = ctx.token.holders();

    if json {
        println!("{}", serde_json::to_string_pretty(&holders)?);
        return Ok(());
    }

    if holders.is_empty() {
        println!("No holders yet.");
        return Ok(());
    }

    println!(
        "{:<44} {:>24} {:>10} {:>10}",
        "ADDRESS", "BALANCE", "ACK", "DECISION"
    );
    for holder in holders {
        println!(
            "{:<44} {:>24} {:>10} {:>10}",
            holder.address.to_string(),
            display(ctx, holder.balance),
            holder.last_acknowledged.to_string(),
            holder.decision.to_string()
        );
    }
    Ok(())
}

/// Verify the journal's hash chain and caller signatures
pub fn audit(data_path: &Path) -> Result<(), anyhow::Error> {
    let journal_path = AppContext::journal_dir(data_path);
    let records = JournalReader::from_directory(&journal_path)?.read_all()?;

    verify_chain(&records)?;
    println!("✅ Hash chain verified ({} records)", records.len());

    for record in &records {
        record.verify_signature()?;
    }
    println!("✅ Caller signatures verified");

    AppContext::open(data_path)?;
    println!("✅ Journal replays cleanly");
    Ok(())
}
