/// quick start - open a credit sale and pay it off
use installment_ledger_rs::{
    CreateDebt, DebtPeriod, Debtor, Ledger, LedgerStore, MemoryStore, Money, PaymentMethod,
    PaymentRequest, SafeTimeProvider, Store, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== quick start example ===\n");

    let time = SafeTimeProvider::new(TimeSource::System);

    // seed a store with one debtor
    let mut backend = MemoryStore::new();
    let store = Store {
        id: Uuid::new_v4(),
        login: "demo-store".to_string(),
        wallet: Money::ZERO,
        is_active: true,
    };
    let debtor = Debtor {
        id: Uuid::new_v4(),
        store_id: store.id,
        full_name: "Demo Debtor".to_string(),
        phone_number: "+998900000000".to_string(),
        address: "Tashkent".to_string(),
        note: None,
    };
    backend.persist_store(store.clone())?;
    backend.persist_debtor(debtor.clone())?;

    let mut ledger = Ledger::new(backend);

    // sell on credit: 900 over 3 months
    let debt = ledger.create_debt(
        CreateDebt {
            debtor_id: debtor.id,
            debt_date: time.now(),
            debt_period: DebtPeriod::ThreeMonths,
            debt_sum: Money::from_major(900),
            description: "washing machine".to_string(),
        },
        &time,
    )?;
    println!("debt created: {} per month for 3 months", debt.monthly_sum);

    // pay two installments
    for _ in 0..2 {
        let receipt = ledger.apply_payment(
            PaymentRequest {
                debt_id: debt.id,
                amount: debt.monthly_sum,
                date: time.now().date_naive(),
                method: PaymentMethod::Cash,
            },
            &time,
        )?;
        println!("paid {}, remaining {}", receipt.payment.sum, receipt.remaining_balance);
    }

    // settle the rest
    let next = ledger.upcoming_installment(debt.id)?;
    println!("next amount due: {}", next.amount);
    let receipt = ledger.apply_payment(
        PaymentRequest {
            debt_id: debt.id,
            amount: next.remaining,
            date: time.now().date_naive(),
            method: PaymentMethod::Card,
        },
        &time,
    )?;
    println!("settled: {}", receipt.settled);

    println!("\nevents:");
    for event in ledger.take_events() {
        println!("  {:?}", event);
    }

    Ok(())
}
