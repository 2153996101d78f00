//! Numeric conversion.
//!
//! A reading with digits in it is looked up with every digit run replaced by
//! `#` (`12がつ4にち` → `#がつ#にち`). Dictionary surfaces then carry
//! placeholders that say how each number is written back:
//!
//! | placeholder | 34    |
//! |-------------|-------|
//! | `#0`        | 34    |
//! | `#1`        | ３４  |
//! | `#2`        | 三四  |
//! | `#3`        | 三十四 |
//!
//! Placeholders take the numbers in order. Any other `#n` is left as typed.

const KANJI_DIGITS: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];
const PLACE_UNITS: [&str; 4] = ["", "十", "百", "千"];
const GROUP_UNITS: [&str; 5] = ["", "万", "億", "兆", "京"];

/// Replace each run of ASCII digits in `text` with `#`, returning the
/// rewritten text and the runs in order.
pub fn numeric_key(text: &str) -> (String, Vec<String>) {
    let mut key = String::with_capacity(text.len());
    let mut numbers: Vec<String> = Vec::new();
    let mut in_run = false;
    for c in text.chars() {
        if c.is_ascii_digit() {
            if !in_run {
                key.push('#');
                numbers.push(String::new());
                in_run = true;
            }
            if let Some(run) = numbers.last_mut() {
                run.push(c);
            }
        } else {
            key.push(c);
            in_run = false;
        }
    }
    (key, numbers)
}

/// Fill the `#0`..`#3` placeholders in `surface` with `numbers`.
pub fn expand(surface: &str, numbers: &[String]) -> String {
    if numbers.is_empty() || !surface.contains('#') {
        return surface.to_string();
    }
    let mut out = String::with_capacity(surface.len());
    let mut next = numbers.iter();
    let mut chars = surface.chars().peekable();
    while let Some(c) = chars.next() {
        let kind = match chars.peek() {
            Some(&d @ '0'..='3') if c == '#' => d,
            _ => {
                out.push(c);
                continue;
            }
        };
        let Some(number) = next.next() else {
            out.push(c);
            continue;
        };
        chars.next();
        match kind {
            '0' => out.push_str(number),
            '1' => out.push_str(&to_zenkaku_digits(number)),
            '2' => out.push_str(&to_kanji_digits(number)),
            _ => out.push_str(&to_kanji_number(number)),
        }
    }
    out
}

/// `12` → `１２`.
pub fn to_zenkaku_digits(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => char::from_u32('０' as u32 + d).unwrap_or(c),
            None => c,
        })
        .collect()
}

/// `105` → `一〇五`.
pub fn to_kanji_digits(digits: &str) -> String {
    digits
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(d) => KANJI_DIGITS[d as usize],
            None => c,
        })
        .collect()
}

/// `10034` → `一万三十四`. Readings past 京 fall back to one kanji per digit.
pub fn to_kanji_number(digits: &str) -> String {
    let digits = digits.trim_start_matches('0');
    if digits.is_empty() {
        return KANJI_DIGITS[0].to_string();
    }
    if digits.len() > GROUP_UNITS.len() * 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return to_kanji_digits(digits);
    }

    let values: Vec<usize> = digits.bytes().map(|b| usize::from(b - b'0')).collect();
    let mut out = String::new();
    let mut group_has_digit = false;
    for (i, &d) in values.iter().enumerate() {
        let power = values.len() - 1 - i;
        let place = power % 4;
        if d != 0 {
            // 十, 百 and 千 drop a leading 一.
            if d != 1 || place == 0 {
                out.push(KANJI_DIGITS[d]);
            }
            out.push_str(PLACE_UNITS[place]);
            group_has_digit = true;
        }
        if place == 0 {
            if group_has_digit {
                out.push_str(GROUP_UNITS[power / 4]);
            }
            group_has_digit = false;
        }
    }
    out
}
