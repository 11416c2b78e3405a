/// store statistics - debtor rollups, monthly breakdown, wallet refresh
use installment_ledger_rs::chrono::{TimeZone, Utc};
use installment_ledger_rs::{
    CreateDebt, DebtPeriod, Debtor, Ledger, LedgerStore, MemoryStore, Money, PaymentMethod,
    PaymentRequest, SafeTimeProvider, Store, TimeSource, Uuid,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("installment_ledger_rs=info")
        .init();

    println!("=== store statistics example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 5, 20, 9, 0, 0).unwrap(),
    ));

    let mut backend = MemoryStore::new();
    let store = Store {
        id: Uuid::new_v4(),
        login: "bazaar-electronics".to_string(),
        wallet: Money::ZERO,
        is_active: true,
    };
    backend.persist_store(store.clone())?;

    let mut debtor_ids = Vec::new();
    for name in ["Aziz Karimov", "Nodira Azimova", "Sardor Nazarov"] {
        let debtor = Debtor {
            id: Uuid::new_v4(),
            store_id: store.id,
            full_name: name.to_string(),
            phone_number: "+998900000000".to_string(),
            address: "Tashkent".to_string(),
            note: None,
        };
        backend.persist_debtor(debtor.clone())?;
        debtor_ids.push(debtor.id);
    }

    let mut ledger = Ledger::new(backend);

    // issue credit on different days of may
    let sale_days = [(0, 5, 5_000_i64), (1, 10, 3_000), (2, 10, 1_200)];
    let mut debt_ids = Vec::new();
    for (debtor_idx, day, sum) in sale_days {
        let sale_time = SafeTimeProvider::new(TimeSource::Test(
            Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap(),
        ));
        let debt = ledger.create_debt(
            CreateDebt {
                debtor_id: debtor_ids[debtor_idx],
                debt_date: sale_time.now(),
                debt_period: DebtPeriod::SixMonths,
                debt_sum: Money::from_major(sum),
                description: "electronics".to_string(),
            },
            &sale_time,
        )?;
        debt_ids.push(debt.id);
    }

    // one debtor starts paying
    ledger.apply_payment(
        PaymentRequest {
            debt_id: debt_ids[1],
            amount: Money::from_major(500),
            date: time.now().date_naive() - installment_ledger_rs::chrono::Duration::days(5),
            method: PaymentMethod::Cash,
        },
        &time,
    )?;

    let stats = ledger.debtor_statistics(store.id, &time)?;
    println!(
        "debtors: {} total, {} active, {} overdue",
        stats.total_debtors, stats.active_debtors, stats.overdue_debtors
    );
    for detail in &stats.debtor_details {
        println!(
            "  {}: owes {}, paid {}, remaining {}",
            detail.full_name, detail.total_debt, detail.total_paid, detail.remaining_debt
        );
    }

    let monthly = ledger.monthly_breakdown(store.id, 2024, 5)?;
    println!("\nmay: issued {} across {} sales, received {} across {} payments, net {}",
        monthly.total_debt_amount,
        monthly.total_new_debts,
        monthly.total_payment_amount,
        monthly.total_payments,
        monthly.net_balance,
    );
    for (day, totals) in &monthly.daily_breakdown {
        println!("  day {:>2}: debts {}, payments {}", day, totals.debts, totals.payments);
    }

    let dashboard = ledger.dashboard_summary(store.id)?;
    println!(
        "\ndashboard: {} debtors, {} issued",
        dashboard.total_debtors, dashboard.total_debt_amount
    );

    let wallet = ledger.refresh_store_wallet(store.id, &time)?;
    println!("wallet after refresh: {}", wallet);

    Ok(())
}
