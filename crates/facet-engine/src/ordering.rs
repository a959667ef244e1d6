use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::facet::FacetOption;

/// One entry of an externally supplied display ordering. Options are matched
/// by id (`uid`) or by name (`text`); matched options sort by entry index,
/// unmatched options go last, stable among themselves.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderingEntry {
    pub uid: String,
    pub text: String,
}

impl OrderingEntry {
    pub fn new(uid: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            text: text.into(),
        }
    }
}

/// Sort facet options in place: custom ordering when supplied, numeric
/// ascending when every name parses as a number, natural case-insensitive
/// alphabetic otherwise.
pub fn sort_options(options: &mut [FacetOption], custom: Option<&[OrderingEntry]>) {
    if let Some(order) = custom.filter(|entries| !entries.is_empty()) {
        // Stable sort keeps unmatched options in their original relative order.
        options.sort_by_key(|opt| custom_position(order, opt).unwrap_or(usize::MAX));
        return;
    }

    let all_numeric = !options.is_empty()
        && options
            .iter()
            .all(|opt| opt.name().trim().parse::<f64>().is_ok());
    if all_numeric {
        options.sort_by(|a, b| {
            let na = a.name().trim().parse::<f64>().unwrap_or(f64::NAN);
            let nb = b.name().trim().parse::<f64>().unwrap_or(f64::NAN);
            na.total_cmp(&nb)
        });
    } else {
        options.sort_by(|a, b| natural_cmp(a.name(), b.name()));
    }
}

fn custom_position(order: &[OrderingEntry], opt: &FacetOption) -> Option<usize> {
    order.iter().position(|entry| {
        opt.option.id.as_deref() == Some(entry.uid.as_str()) || opt.name() == entry.text
    })
}

/// Case-insensitive comparison with numeric collation: digit runs compare by
/// numeric value (`item2` sorts before `item10`). Ties after folding break on
/// the raw strings so the ordering is total and deterministic.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    match natural_cmp_folded(a, b) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}

fn natural_cmp_folded(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let ra = take_digit_run(&mut ai);
                let rb = take_digit_run(&mut bi);
                match cmp_digit_runs(&ra, &rb) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            (Some(ca), Some(cb)) => {
                match fold_char(ca).cmp(&fold_char(cb)) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
                ai.next();
                bi.next();
            }
        }
    }
}

fn take_digit_run(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = chars.peek().copied() {
        if !c.is_ascii_digit() {
            break;
        }
        run.push(c);
        chars.next();
    }
    run
}

fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    // Longer run of significant digits is the larger number; equal lengths
    // compare lexically (digits are ordered).
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn fold_char(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}
