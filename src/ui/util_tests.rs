#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("Groceries", 10), "Groceries");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("Travel", 6), "Travel");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("Entertainment", 8), "Enterta…");
}

#[test]
fn test_truncate_empty() {
    assert_eq!(truncate("", 5), "");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    // Category names can be multi-byte UTF-8
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

#[test]
fn test_truncate_one_char() {
    assert_eq!(truncate("hello", 1), "…");
}

// ── format_amount ──────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_no_commas() {
    assert_eq!(format_amount(dec!(999.99)), "$999.99");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-42.50)), "-$42.50");
}

#[test]
fn test_format_amount_large() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_rounds_to_two_decimals() {
    assert_eq!(format_amount(dec!(1.5)), "$1.50");
}

// ── scroll helpers ─────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor_and_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..5 {
        scroll_down(&mut index, &mut scroll, 10, 3);
    }
    assert_eq!(index, 5);
    assert_eq!(scroll, 3);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (1, 0);
    scroll_down(&mut index, &mut scroll, 2, 5);
    assert_eq!(index, 1);
}

#[test]
fn test_scroll_up_clamps_at_zero() {
    let (mut index, mut scroll) = (0, 0);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}

#[test]
fn test_scroll_to_bottom_and_top() {
    let (mut index, mut scroll) = (0, 0);
    scroll_to_bottom(&mut index, &mut scroll, 20, 5);
    assert_eq!(index, 19);
    assert_eq!(scroll, 15);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!(index, 0);
    assert_eq!(scroll, 0);
}
