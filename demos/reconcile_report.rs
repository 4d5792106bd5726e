//! End-to-end reconciliation example over an in-memory source

use bigdecimal::BigDecimal;
use recon_core::utils::MemorySource;
use recon_core::{report, ClientName, Commitment, Currency, Payment, ReconOptions, Reconciler};
use uuid::Uuid;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🏗️ Recon Core - Client Payment Reconciliation Example\n");

    // 1. Seed a tenant's books. Rates are quoted against the tenant's base
    // currency: pesos carry rate 1, dollars rate 350.
    println!("📋 Seeding commitments and payments...");
    let source = MemorySource::new();

    let usd = Currency::new(
        Uuid::new_v4(),
        "USD".to_string(),
        "US Dollar".to_string(),
        "$".to_string(),
    );
    let ars = Currency::new(
        Uuid::new_v4(),
        "ARS".to_string(),
        "Argentine Peso".to_string(),
        "AR$".to_string(),
    );
    source.add_currency(usd.clone())?;
    source.add_currency(ars.clone())?;

    let torre = Commitment::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        usd.id,
        BigDecimal::from(100_000),
    )
    .with_project_name("Torre Norte".to_string())
    .with_client(ClientName::full("Carla Mendoza".to_string()))
    .with_unit("Apt 4B".to_string())
    .with_rate(BigDecimal::from(350));

    let altos_lot12 = Commitment::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        ars.id,
        BigDecimal::from(35_000_000),
    )
    .with_project_name("Altos del Parque".to_string())
    .with_client(ClientName::person("Diego".to_string(), "Paz".to_string()))
    .with_unit("Lot 12".to_string())
    .with_rate(BigDecimal::from(1));

    let altos_lot7 = Commitment::new(
        Uuid::new_v4(),
        Uuid::new_v4(),
        Uuid::new_v4(),
        ars.id,
        BigDecimal::from(21_000_000),
    )
    .with_project_name("Altos del Parque".to_string())
    .with_client(ClientName::company("Hormigón SRL".to_string()))
    .with_unit("Lot 7".to_string())
    .with_rate(BigDecimal::from(1));

    // A dollar payment and a peso payment against the dollar commitment;
    // the peso one converts through the stored rates on its way in.
    source.add_payment(Payment::new(
        Uuid::new_v4(),
        torre.id,
        BigDecimal::from(40_000),
        usd.id,
        BigDecimal::from(350),
    ))?;
    source.add_payment(Payment::new(
        Uuid::new_v4(),
        torre.id,
        BigDecimal::from(3_500_000),
        ars.id,
        BigDecimal::from(1),
    ))?;
    source.add_payment(Payment::new(
        Uuid::new_v4(),
        altos_lot12.id,
        BigDecimal::from(14_000_000),
        ars.id,
        BigDecimal::from(1),
    ))?;

    source.add_commitment(torre)?;
    source.add_commitment(altos_lot12)?;
    source.add_commitment(altos_lot7)?;
    println!("  ✓ 2 currencies, 3 commitments, 3 payments\n");

    let reconciler = Reconciler::new(source);

    // 2. The whole portfolio: mixed currencies stay in separate groups
    println!("📒 Full portfolio:\n");
    let full = reconciler.reconcile(&ReconOptions::new()).await?;
    println!("{}", report::render(&full));

    // 3. Narrow to one project
    println!("🔍 Only \"Altos del Parque\":\n");
    let altos = reconciler
        .reconcile(&ReconOptions::new().project("altos".to_string()))
        .await?;
    println!("{}", report::render(&altos));

    // 4. Narrow to one client: a single survivor renders as a detail block
    println!("🔍 Only client \"mendoza\":\n");
    let mendoza = reconciler
        .reconcile(&ReconOptions::new().client("mendoza".to_string()))
        .await?;
    println!("{}", report::render(&mendoza));

    // 5. Re-express everything in dollars; the rate comes from the dollar
    // commitment already on the books
    println!("💱 Full portfolio in USD:\n");
    let in_usd = reconciler
        .reconcile(&ReconOptions::new().display_in("USD".to_string()))
        .await?;
    println!("{}", report::render(&in_usd));

    // 6. A filter that matches nothing explains itself instead of failing
    println!("🚫 A project nobody has:\n");
    let nothing = reconciler
        .reconcile(&ReconOptions::new().project("Central Park".to_string()))
        .await?;
    println!("{}", report::render(&nothing));

    println!("\n🎉 Example completed successfully!");
    Ok(())
}
