/// time control - deterministic overdue detection with controlled time
use installment_ledger_rs::chrono::{Duration, TimeZone, Utc};
use installment_ledger_rs::{
    CreateDebt, DebtPeriod, Debtor, Ledger, LedgerStore, MemoryStore, Money, PaymentMethod,
    PaymentRequest, SafeTimeProvider, Store, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    // create controlled time for testing
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
    ));
    let controller = time.test_control().unwrap();

    println!("starting date: {}", time.now().format("%Y-%m-%d"));

    let mut backend = MemoryStore::new();
    let store = Store {
        id: Uuid::new_v4(),
        login: "corner-shop".to_string(),
        wallet: Money::ZERO,
        is_active: true,
    };
    let debtor = Debtor {
        id: Uuid::new_v4(),
        store_id: store.id,
        full_name: "Olim Rashidov".to_string(),
        phone_number: "+998900000000".to_string(),
        address: "Samarkand".to_string(),
        note: None,
    };
    backend.persist_store(store.clone())?;
    backend.persist_debtor(debtor.clone())?;

    let mut ledger = Ledger::new(backend);
    let debt = ledger.create_debt(
        CreateDebt {
            debtor_id: debtor.id,
            debt_date: time.now(),
            debt_period: DebtPeriod::ThreeMonths,
            debt_sum: Money::from_major(300_000),
            description: "television".to_string(),
        },
        &time,
    )?;
    println!("debt created: {} per month", debt.monthly_sum);

    // nothing due yet
    println!(
        "late units on day 0: {}",
        ledger.late_units_for_store(store.id, &time)?
    );

    // advance 40 days without a payment
    controller.advance(Duration::days(40));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!(
        "late units after 40 days: {}",
        ledger.late_units_for_store(store.id, &time)?
    );

    // first installment arrives
    ledger.apply_payment(
        PaymentRequest {
            debt_id: debt.id,
            amount: debt.monthly_sum,
            date: time.now().date_naive(),
            method: PaymentMethod::Cash,
        },
        &time,
    )?;
    println!(
        "paid one installment, remaining {}",
        ledger.remaining_balance(debt.id)?
    );

    // two more months pass
    controller.advance(Duration::days(60));
    println!("\nadvanced to: {}", time.now().format("%Y-%m-%d"));
    println!(
        "late units after 100 days: {}",
        ledger.late_units_for_store(store.id, &time)?
    );
    println!("overdue: {}", ledger.is_overdue(debt.id, &time)?);

    // settle in full
    let next = ledger.upcoming_installment(debt.id)?;
    ledger.apply_payment(
        PaymentRequest {
            debt_id: debt.id,
            amount: next.remaining,
            date: time.now().date_naive(),
            method: PaymentMethod::BankTransfer,
        },
        &time,
    )?;
    println!(
        "\nsettled; late units now: {}",
        ledger.late_units_for_store(store.id, &time)?
    );

    Ok(())
}
