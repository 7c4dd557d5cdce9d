//! Layout benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use mosaic_layout::{reflow, AutoLayout, PackOrder, Unconstrained, Widget};

fn dashboard(count: u32) -> Vec<Widget> {
    (0..count)
        .map(|i| Widget::new(format!("w{i}"), i % 3, i / 2, 1 + i % 2, 1 + i % 3))
        .collect()
}

fn auto_layout_small(c: &mut Criterion) {
    let widgets = dashboard(12);
    let layout = AutoLayout::new(4).with_max_visible_rows(10);
    c.bench_function("auto_layout_12", |b| {
        b.iter(|| {
            let mut widgets = widgets.clone();
            layout.layout(black_box(&mut widgets), &Unconstrained)
        })
    });
}

fn auto_layout_large(c: &mut Criterion) {
    let widgets = dashboard(200);
    let layout = AutoLayout::new(4)
        .with_order(PackOrder::Preserve)
        .with_max_visible_rows(10);
    c.bench_function("auto_layout_200", |b| {
        b.iter(|| {
            let mut widgets = widgets.clone();
            layout.layout(black_box(&mut widgets), &Unconstrained)
        })
    });
}

fn reflow_stacked(c: &mut Criterion) {
    let widgets: Vec<Widget> = (0..50).map(|i| Widget::new(format!("w{i}"), 0, 0, 2, 1)).collect();
    c.bench_function("reflow_50_stacked", |b| {
        b.iter(|| {
            let mut widgets = widgets.clone();
            reflow(black_box(&mut widgets))
        })
    });
}

criterion_group!(benches, auto_layout_small, auto_layout_large, reflow_stacked);
criterion_main!(benches);
