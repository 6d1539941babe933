//! End-to-End Parser Benchmarks
//!
//! Measures tokenizing and parsing `SELECT` statements of increasing size.
//!
//! - **Simple Queries**: single-table selects
//! - **Joins**: join chains with ON and USING constraints
//! - **Expressions**: operator-heavy predicates
//! - **Stress Tests**: wide select lists, long join chains and deep nesting
//!
//! ## Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench simple_queries
//! ```

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use sql_select_parser::{parse, parse_expression, tokenize};

// ============================================================================
// Simple Query Benchmarks
// ============================================================================

fn bench_simple_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("simple_queries");

    let queries = vec![
        ("minimal", "SELECT 1"),
        ("star", "SELECT * FROM users"),
        ("columns", "SELECT id, name, email FROM users"),
        (
            "where",
            "SELECT id FROM users WHERE age > 18 AND country = 'NL'",
        ),
        (
            "all_clauses",
            "SELECT dept, count(*) AS n FROM employees WHERE salary > 1000 \
             GROUP BY dept HAVING count(*) > 2 ORDER BY n DESC LIMIT 10 OFFSET 20",
        ),
    ];

    for (name, query) in queries {
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    group.finish();
}

// ============================================================================
// Join Benchmarks
// ============================================================================

fn bench_joins(c: &mut Criterion) {
    let mut group = c.benchmark_group("joins");

    let queries = vec![
        ("inner_on", "SELECT * FROM a JOIN b ON a.id = b.a_id"),
        ("natural_using", "SELECT * FROM a NATURAL JOIN b USING (id)"),
        (
            "mixed_chain",
            "SELECT * FROM a LEFT OUTER JOIN b ON a.id = b.id \
             CROSS JOIN c ON 1, d USING (x) INNER JOIN e ON e.y = d.y",
        ),
        (
            "derived_table",
            "SELECT s.id FROM (SELECT id FROM a WHERE x > 1) AS s JOIN b ON s.id = b.id",
        ),
    ];

    for (name, query) in queries {
        group.bench_with_input(BenchmarkId::from_parameter(name), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    group.finish();
}

// ============================================================================
// Expression Benchmarks
// ============================================================================

fn bench_expressions(c: &mut Criterion) {
    let mut group = c.benchmark_group("expressions");

    let expressions = vec![
        ("arithmetic", "a + b * c - d / e % f"),
        ("boolean", "a = 1 AND (b <> 2 OR c IS NOT NULL) AND NOT d"),
        ("calls", "coalesce(max(a), min(b), 0) || upper(name)"),
        ("bind_variables", "a = ? AND b = ?2 AND c = :name"),
    ];

    for (name, expression) in expressions {
        group.bench_with_input(
            BenchmarkId::from_parameter(name),
            &expression,
            |b, e| {
                b.iter(|| parse_expression(black_box(e)));
            },
        );
    }

    group.finish();
}

// ============================================================================
// Stress Benchmarks
// ============================================================================

fn wide_select(columns: usize) -> String {
    let list: Vec<String> = (0..columns).map(|i| format!("t.c{i} AS a{i}")).collect();
    format!("SELECT {} FROM t", list.join(", "))
}

fn long_join_chain(joins: usize) -> String {
    let mut query = String::from("SELECT * FROM t0");
    for i in 1..=joins {
        query.push_str(&format!(" JOIN t{i} ON t{i}.id = t{}.id", i - 1));
    }
    query
}

fn nested_parentheses(depth: usize) -> String {
    format!("SELECT {}1{}", "(".repeat(depth), ")".repeat(depth))
}

fn bench_stress(c: &mut Criterion) {
    let mut group = c.benchmark_group("stress_tests");

    for size in [10, 100, 1000] {
        let query = wide_select(size);
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::new("wide_select", size), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    for size in [10, 50, 200] {
        let query = long_join_chain(size);
        group.throughput(Throughput::Bytes(query.len() as u64));
        group.bench_with_input(BenchmarkId::new("join_chain", size), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    for depth in [10, 20, 35] {
        let query = nested_parentheses(depth);
        group.bench_with_input(BenchmarkId::new("nesting", depth), &query, |b, q| {
            b.iter(|| parse(black_box(q)));
        });
    }

    group.finish();
}

fn bench_tokenize_only(c: &mut Criterion) {
    let query = wide_select(1000);
    c.bench_function("tokenize_wide_select", |b| {
        b.iter(|| tokenize(black_box(&query)));
    });
}

criterion_group!(
    benches,
    bench_simple_queries,
    bench_joins,
    bench_expressions,
    bench_stress,
    bench_tokenize_only
);
criterion_main!(benches);
