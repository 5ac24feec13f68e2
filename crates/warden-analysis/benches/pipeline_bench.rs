//! Scan throughput over a synthetic polyglot tree.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use warden_analysis::pipeline::{BoundaryAnalyzer, SourceFile};

fn synthetic_files(count: usize) -> Vec<SourceFile> {
    (0..count)
        .map(|i| match i % 4 {
            0 => SourceFile::new(
                format!("svc/mod_{i}.ts"),
                format!(
                    "export async function load{i}() {{\n  \
                     return supabase.from('users').select('id,email').eq('tenant_id', {i});\n}}\n"
                ),
            ),
            1 => SourceFile::new(
                format!("svc/mod_{i}.py"),
                format!("def load_{i}():\n    return Account.objects.filter(owner_id={i})\n"),
            ),
            2 => SourceFile::new(
                format!("svc/mod_{i}.go"),
                format!(
                    "package svc\n\nfunc Load{i}() {{\n    db.Table(\"orders\").Where(\"status = ?\", s).Find(&rows)\n}}\n"
                ),
            ),
            _ => SourceFile::new(
                format!("svc/mod_{i}.rb"),
                format!("def load_{i}\n  Invoice.where(customer_id: {i}).first\nend\n"),
            ),
        })
        .collect()
}

fn bench_scan(c: &mut Criterion) {
    let analyzer = BoundaryAnalyzer::with_defaults();
    let mut group = c.benchmark_group("scan");
    for size in [16usize, 64, 256] {
        let files = synthetic_files(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &files, |b, files| {
            b.iter(|| analyzer.scan(files, None).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
