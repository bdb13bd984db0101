use criterion::{Criterion, black_box, criterion_group, criterion_main};

use invoicer_invoicing::{InvoiceItem, total_cents};

fn items(n: usize) -> Vec<InvoiceItem> {
    (0..n)
        .map(|i| InvoiceItem {
            id: format!("item-{i}"),
            name: format!("line {i}"),
            description: String::new(),
            quantity: 1.0 + (i % 7) as f64 * 0.5,
            price_cents: 100 + (i as i64 % 997),
            tax_percentage: if i % 3 == 0 { 19.0 } else { 7.0 },
        })
        .collect()
}

fn bench_totals(c: &mut Criterion) {
    for size in [10usize, 100, 1000] {
        let list = items(size);
        c.bench_function(&format!("total_cents/{size}"), |b| {
            b.iter(|| total_cents(black_box(&list)))
        });
    }
}

criterion_group!(benches, bench_totals);
criterion_main!(benches);
