mod common;

use common::budget_alloc::BudgetAlloc;
use common::corpus;
use entity_lines::{Label, LabelList, LayoutConfig, MonoMeasurer};

#[global_allocator]
static GLOBAL: BudgetAlloc = BudgetAlloc::new();

#[test]
fn warm_split_reuses_memoized_widths() {
    let text = corpus::document(3, 2_000);
    let entities = corpus::entities(3, text.chars().count(), 200, 2);
    let labels = LabelList::new([Label::new(1, "PER", 24.0), Label::new(2, "LOC", 30.0)]);
    let mut splitter = entity_lines::splitter_for(
        LayoutConfig::for_width(240.0),
        MonoMeasurer::shared(7.0),
        &labels,
    );

    GLOBAL.reset();
    let cold = splitter.split(&text, 0, &entities).count();
    let cold_allocs = GLOBAL.alloc_count();
    let cold_peak = GLOBAL.peak_bytes();

    GLOBAL.reset();
    let warm = splitter.split(&text, 0, &entities).count();
    let warm_allocs = GLOBAL.alloc_count();
    let warm_peak = GLOBAL.peak_bytes();

    assert_eq!(cold, warm);
    assert!(cold > 1);
    assert!(cold_allocs > 0, "cold split should fill the word-width memo");
    assert!(
        warm_allocs < cold_allocs && warm_peak < cold_peak,
        "warm split allocs={} peak={} cold allocs={} peak={}",
        warm_allocs,
        warm_peak,
        cold_allocs,
        cold_peak
    );
    assert!(warm_peak <= 1024, "warm split peak heap {} bytes", warm_peak);
}
