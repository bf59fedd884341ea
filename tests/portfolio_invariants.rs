//! Backtest invariant tests: concrete scenarios, cost identities, skip-and-retain.

use signalbook::portfolio::{Portfolio, Universe, turnover};
use signalbook::{
    BacktestConfig, BacktestRun, Date, EQUITY_CURVE_NAME, Panel, Symbol, equity_curve,
    run_backtest,
};

fn sym(s: &str) -> Symbol {
    Symbol::new(s)
}

fn ymd(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn panel(cols: &[&str], rows: &[(Date, Vec<Option<f64>>)]) -> Panel {
    let mut p = Panel::new(cols.iter().map(|s| sym(s)).collect()).unwrap();
    for (date, values) in rows {
        p.insert_row(*date, values.clone()).unwrap();
    }
    p
}

/// The two-date A/B/C scenario used throughout.
fn abc_panels() -> (Panel, Panel) {
    let cols = ["A", "B", "C"];
    let scores = panel(
        &cols,
        &[
            (ymd(2020, 1, 31), vec![Some(0.05), Some(0.03), Some(0.01)]),
            (ymd(2020, 2, 29), vec![Some(0.00), Some(0.06), Some(0.05)]),
        ],
    );
    let returns = panel(
        &cols,
        &[
            (ymd(2020, 1, 31), vec![Some(0.02), Some(0.01), Some(-0.01)]),
            (ymd(2020, 2, 29), vec![Some(0.01), Some(0.03), Some(0.02)]),
        ],
    );
    (scores, returns)
}

// === Concrete Scenario ===

#[test]
fn abc_first_date_picks_top_two() {
    let (scores, returns) = abc_panels();
    let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 0.0)).unwrap();

    let first = &run.events()[0];
    assert_eq!(first.selected, vec![sym("A"), sym("B")]);
    assert_eq!(first.turnover, 0.0);
    assert_eq!(first.cost, 0.0);
    assert!((first.gross_return - 0.015).abs() < 1e-12);
    assert!((run.curve().get(ymd(2020, 1, 31)).unwrap() - 1.015).abs() < 1e-12);
}

#[test]
fn abc_rotation_trades_half_the_book() {
    let (scores, returns) = abc_panels();
    let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 10.0)).unwrap();

    // {A, B} -> {B, C}: A sold (0.5), C bought (0.5), B unchanged; half of 1.0.
    let second = &run.events()[1];
    assert_eq!(second.selected, vec![sym("B"), sym("C")]);
    assert!((second.turnover - 0.5).abs() < 1e-12);
    assert!((second.gross_return - 0.025).abs() < 1e-12);
    assert!((second.cost - 0.0005).abs() < 1e-12);
    assert!((second.net_return - 0.0245).abs() < 1e-12);

    let d2 = run.curve().get(ymd(2020, 2, 29)).unwrap();
    assert!((d2 - 1.015 * 1.0245).abs() < 1e-12);
}

#[test]
fn weights_cover_universe() {
    let (scores, returns) = abc_panels();
    let universe = Universe::at(ymd(2020, 2, 29), &scores, &returns);
    let portfolio = Portfolio::top_k(&universe, 2).unwrap();

    let total: f64 = portfolio.weights().iter().map(|(_, w)| w).sum();
    assert!((total - 1.0).abs() < 1e-9);
    assert_eq!(portfolio.weight(&sym("A")), Some(0.0));
    assert_eq!(portfolio.weight(&sym("B")), Some(0.5));
    assert_eq!(portfolio.weight(&sym("C")), Some(0.5));
    assert_eq!(portfolio.weight(&sym("Z")), None);
}

#[test]
fn fully_disjoint_rotation_is_full_turnover() {
    let cols = ["A", "B", "C", "D"];
    let date = ymd(2020, 1, 1);
    let returns = panel(&cols, &[(date, vec![Some(0.0); 4])]);
    let first = panel(&cols, &[(date, vec![Some(4.0), Some(3.0), Some(2.0), Some(1.0)])]);
    let second = panel(&cols, &[(date, vec![Some(1.0), Some(2.0), Some(3.0), Some(4.0)])]);

    let old = Portfolio::top_k(&Universe::at(date, &first, &returns), 2).unwrap();
    let new = Portfolio::top_k(&Universe::at(date, &second, &returns), 2).unwrap();
    assert_eq!(turnover(&new, Some(&old)), 1.0);
    assert_eq!(turnover(&new, Some(&new)), 0.0);
}

// === Cost Identities ===

#[test]
fn zero_cost_net_equals_gross_exactly() {
    let (scores, returns) = abc_panels();
    let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 0.0)).unwrap();
    for event in run.events() {
        assert_eq!(event.cost, 0.0);
        assert_eq!(event.net_return, event.gross_return);
    }
}

#[test]
fn costs_only_lower_the_curve() {
    let (scores, returns) = abc_panels();
    let free = equity_curve(&scores, &returns, &BacktestConfig::new(2, 1, 0.0)).unwrap();
    let costly = equity_curve(&scores, &returns, &BacktestConfig::new(2, 1, 50.0)).unwrap();
    for ((_, a), (_, b)) in free.points().iter().zip(costly.points()) {
        assert!(b <= a);
    }
}

#[test]
fn curve_is_running_product() {
    let (scores, returns) = abc_panels();
    let run = run_backtest(&scores, &returns, &BacktestConfig::new(2, 1, 10.0)).unwrap();
    let mut acc = 1.0;
    for (event, &(date, value)) in run.events().iter().zip(run.curve().points()) {
        acc *= 1.0 + event.net_return;
        assert_eq!(date, event.date);
        assert_eq!(value, acc);
    }
}

// === Empty and Degenerate Inputs ===

#[test]
fn disjoint_date_ranges_yield_empty_named_curve() {
    let cols = ["A", "B"];
    let scores = panel(
        &cols,
        &[
            (ymd(2020, 1, 1), vec![Some(1.0), Some(2.0)]),
            (ymd(2020, 1, 2), vec![Some(1.0), Some(2.0)]),
            (ymd(2020, 1, 3), vec![Some(1.0), Some(2.0)]),
        ],
    );
    let returns = panel(
        &cols,
        &[
            (ymd(2021, 1, 1), vec![Some(0.1), Some(0.2)]),
            (ymd(2021, 6, 1), vec![Some(0.1), Some(0.2)]),
        ],
    );

    let run = run_backtest(&scores, &returns, &BacktestConfig::new(1, 1, 0.0)).unwrap();
    assert!(run.events().is_empty());
    assert!(run.skipped().is_empty());
    assert!(run.curve().is_empty());
    assert_eq!(run.curve().name(), EQUITY_CURVE_NAME);
}

// === Skip and Retain ===

#[test]
fn insufficient_universe_skips_and_retains() {
    let cols = ["A", "B", "C", "D", "E", "F"];
    let all = |v: f64| vec![Some(v); 6];
    let scores = panel(
        &cols,
        &[
            (
                ymd(2020, 1, 1),
                vec![Some(6.0), Some(5.0), Some(4.0), Some(3.0), Some(2.0), Some(1.0)],
            ),
            // Only A, B, C are valid: three names cannot fill a top-5 book.
            (
                ymd(2020, 1, 2),
                vec![Some(1.0), Some(2.0), Some(3.0), None, Some(f64::NAN), None],
            ),
            (
                ymd(2020, 1, 3),
                vec![Some(6.0), Some(5.0), Some(4.0), Some(3.0), Some(1.0), Some(2.0)],
            ),
        ],
    );
    let returns = panel(
        &cols,
        &[
            (ymd(2020, 1, 1), all(0.01)),
            (ymd(2020, 1, 2), all(0.01)),
            (ymd(2020, 1, 3), all(0.01)),
        ],
    );

    let run = run_backtest(&scores, &returns, &BacktestConfig::new(5, 1, 20.0)).unwrap();
    assert_eq!(run.skipped(), &[ymd(2020, 1, 2)]);
    assert_eq!(run.events().len(), 2);

    // Day 3 swaps E for F relative to day 1: 0.2 sold + 0.2 bought, halved.
    let third = &run.events()[1];
    assert_eq!(third.date, ymd(2020, 1, 3));
    assert!((third.turnover - 0.2).abs() < 1e-12);
    assert!((third.cost - 0.002 * 0.2).abs() < 1e-12);
}

#[test]
fn stride_samples_common_positions() {
    let cols = ["A"];
    let rows: Vec<(Date, Vec<Option<f64>>)> = (1..=7)
        .map(|d| (ymd(2020, 1, d), vec![Some(0.01)]))
        .collect();
    let p = panel(&cols, &rows);

    let run = run_backtest(&p, &p, &BacktestConfig::new(1, 3, 0.0)).unwrap();
    let dates: Vec<Date> = run.events().iter().map(|e| e.date).collect();
    assert_eq!(dates, vec![ymd(2020, 1, 1), ymd(2020, 1, 4), ymd(2020, 1, 7)]);
}

#[test]
fn rerun_is_identical() {
    let (scores, returns) = abc_panels();
    let config = BacktestConfig::new(2, 1, 10.0);
    let a = run_backtest(&scores, &returns, &config).unwrap();
    let b = run_backtest(&scores, &returns, &config).unwrap();
    assert_eq!(a, b);
    let bits = |r: &BacktestRun| -> Vec<u64> {
        r.curve().values().map(f64::to_bits).collect()
    };
    assert_eq!(bits(&a), bits(&b));
}
